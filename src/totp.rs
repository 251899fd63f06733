//! Time-based codes on top of the counter-driven core in [`crate::hotp`].
//!
//! The counter is the number of whole [`TIME_STEP`]s elapsed since the UNIX epoch,
//! read from a caller-supplied [`Clock`].

use std::time::{Duration, SystemTime};

use tracing::{debug, trace};

use crate::{
    clock::Clock,
    hotp::{self, label_bytes, secret_bytes},
    OtpCode, OtpError, TIME_STEP,
};

/// Number of whole time steps between the UNIX epoch and `instant`.
///
/// Instants before the epoch map to step 0.
pub fn time_step(instant: SystemTime) -> u64 {
    match instant.duration_since(SystemTime::UNIX_EPOCH) {
        Ok(elapsed) => elapsed.as_secs() / TIME_STEP.as_secs(),
        Err(_) => 0,
    }
}

/// Moves `instant` by a signed number of time steps, `None` if that leaves
/// the representable range.
fn shift(instant: SystemTime, steps: i64) -> Option<SystemTime> {
    let by = Duration::from_secs(TIME_STEP.as_secs().checked_mul(steps.unsigned_abs())?);

    if steps.is_negative() {
        instant.checked_sub(by)
    } else {
        instant.checked_add(by)
    }
}

/// Offsets scanned by validation: `tolerance` steps into the past plus one into the future.
fn window(tolerance_minutes: i32) -> std::ops::RangeInclusive<i64> {
    -i64::from(tolerance_minutes.unsigned_abs())..=1
}

/// Generates the code for the current time step.
///
/// # Errors
/// [`OtpError::MissingSecret`] when `secret` is `None`, [`OtpError::Encoding`]
/// when the secret or label are not valid UTF-8.
pub fn generate_code(
    clock: &impl Clock,
    secret: Option<&[u8]>,
    label: Option<&[u8]>,
) -> Result<OtpCode, OtpError> {
    let secret = secret_bytes(secret)?;
    let label = label_bytes(label)?;

    hotp::generate_unchecked(secret, time_step(clock.now()), label)
}

/// Validates a code against `|tolerance_minutes|` steps in the past and one step in the future.
///
/// The clock is read again for every offset, so a scan that straddles a minute
/// boundary can cover a different set of steps than [`validate_code_anchored`].
/// A mismatch is `Ok(false)`, never an error.
///
/// # Errors
/// Same as [`generate_code`].
pub fn validate_code(
    clock: &impl Clock,
    secret: Option<&[u8]>,
    candidate: i64,
    label: Option<&[u8]>,
    tolerance_minutes: i32,
) -> Result<bool, OtpError> {
    let secret = secret_bytes(secret)?;
    let label = label_bytes(label)?;

    for offset in window(tolerance_minutes) {
        let Some(instant) = shift(clock.now(), offset) else {
            continue;
        };
        let step = time_step(instant);
        trace!(offset, step, "checking time step");

        if hotp::generate_unchecked(secret, step, label)?.matches(candidate) {
            debug!(offset, "code accepted");
            return Ok(true);
        }
    }

    debug!(tolerance_minutes, "code rejected");
    Ok(false)
}

/// Validates a code against the fixed range `[T - |tolerance_minutes|, T + 1]`,
/// where `T` is the time step read once at the start of the call.
///
/// # Errors
/// Same as [`generate_code`].
pub fn validate_code_anchored(
    clock: &impl Clock,
    secret: Option<&[u8]>,
    candidate: i64,
    label: Option<&[u8]>,
    tolerance_minutes: i32,
) -> Result<bool, OtpError> {
    let secret = secret_bytes(secret)?;
    let label = label_bytes(label)?;
    let anchor = time_step(clock.now());

    for offset in window(tolerance_minutes) {
        let Some(step) = anchor.checked_add_signed(offset) else {
            continue;
        };
        trace!(offset, step, "checking time step");

        if hotp::generate_unchecked(secret, step, label)?.matches(candidate) {
            debug!(offset, anchor, "code accepted");
            return Ok(true);
        }
    }

    debug!(tolerance_minutes, anchor, "code rejected");
    Ok(false)
}
