pub mod clock;
pub mod hotp;
pub mod label;
pub mod options;
pub mod totp;

use std::{fmt::Display, str::Utf8Error, time::Duration};

pub use clock::{Clock, FixedClock, SteppingClock, SystemClock};
pub use label::{modifier, Purpose};
pub use options::{TotpOptions, WindowMode};
pub use totp::{generate_code, validate_code, validate_code_anchored};

/// Length of one time step. Coarser than the 30 seconds RFC 6238 suggests.
pub const TIME_STEP: Duration = Duration::from_secs(60);

/// Number of digits in a code
pub const CODE_DIGITS: u32 = 6;

/// 10^[`CODE_DIGITS`]
pub const CODE_MODULUS: u32 = 1_000_000;

#[derive(Debug, thiserror::Error)]
pub enum OtpError {
    #[error("No secret was provided")]
    MissingSecret,
    #[error("The {field} is not valid UTF-8")]
    Encoding {
        field: &'static str,
        #[source]
        source: Utf8Error,
    },
    #[error("The HMAC implementation rejected the key")]
    InvalidKeyLength,
    #[error("Invalid digest")]
    InvalidDigest(Vec<u8>),
}

/// A one-time code, always in `[0, 999999]`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OtpCode {
    code: u32,
}

impl OtpCode {
    pub(crate) fn new(code: u32) -> Self {
        Self { code }
    }

    pub fn integer(&self) -> u32 {
        self.code
    }

    /// Whether an arbitrary caller-supplied integer equals this code.
    /// Negative or oversized candidates never match.
    pub fn matches(&self, candidate: i64) -> bool {
        i64::from(self.code) == candidate
    }
}

impl Display for OtpCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:0padding$}",
            self.code,
            padding = (CODE_DIGITS as usize)
        )
    }
}

impl From<OtpCode> for u32 {
    fn from(code: OtpCode) -> Self {
        code.code
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use crate::OtpCode;

    #[rstest]
    #[case(0, "000000")]
    #[case(42, "000042")]
    #[case(755224, "755224")]
    #[case(999999, "999999")]
    fn pads_to_six_digits(#[case] code: u32, #[case] expected: &str) {
        assert_eq!(expected, OtpCode::new(code).to_string());
    }

    #[rstest]
    #[case(-1)]
    #[case(1_000_000)]
    #[case(i64::MIN)]
    #[case(i64::MAX)]
    fn out_of_range_candidates_never_match(#[case] candidate: i64) {
        for code in [0, 1, 999_999] {
            assert!(!OtpCode::new(code).matches(candidate));
        }
    }

    #[test]
    fn matching_candidate() {
        assert!(OtpCode::new(287082).matches(287082));
        assert_eq!(287082, u32::from(OtpCode::new(287082)));
    }
}
