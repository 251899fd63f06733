use hmac::{Hmac, Mac};
use sha1::Sha1;

use crate::{OtpCode, OtpError, CODE_MODULUS};

type HmacSha1 = Hmac<Sha1>;

/// Checks that the secret is present and valid UTF-8, returning its bytes.
pub(crate) fn secret_bytes(secret: Option<&[u8]>) -> Result<&[u8], OtpError> {
    let secret = secret.ok_or(OtpError::MissingSecret)?;
    std::str::from_utf8(secret).map_err(|source| OtpError::Encoding {
        field: "secret",
        source,
    })?;

    Ok(secret)
}

/// Checks that the label is valid UTF-8. An absent and an empty label are the same thing.
pub(crate) fn label_bytes(label: Option<&[u8]>) -> Result<&[u8], OtpError> {
    let label = label.unwrap_or_default();
    std::str::from_utf8(label).map_err(|source| OtpError::Encoding {
        field: "label",
        source,
    })?;

    Ok(label)
}

/// Builds the HMAC message: the 8-byte big-endian counter followed by the label.
pub fn compose_message(counter: u64, label: &[u8]) -> Vec<u8> {
    let mut message = Vec::with_capacity(8 + label.len());
    message.extend_from_slice(&counter.to_be_bytes());
    message.extend_from_slice(label);

    message
}

/// Calculates the HMAC-SHA1 digest of the composed message.
///
/// A fresh keyed context is built for every call.
pub fn calc_digest(secret: &[u8], counter: u64, label: &[u8]) -> Result<Vec<u8>, OtpError> {
    let mut mac = HmacSha1::new_from_slice(secret).map_err(|_| OtpError::InvalidKeyLength)?;
    mac.update(&compose_message(counter, label));

    Ok(mac.finalize().into_bytes().to_vec())
}

/// Encodes the HMAC digest into a 6-digit code (RFC 4226 §5.3 dynamic truncation).
pub fn encode_digest_truncated(digest: &[u8]) -> Result<OtpCode, OtpError> {
    // the last byte tells us the offset
    let offset = match digest.last() {
        Some(x) => *x & 0xf,
        None => return Err(OtpError::InvalidDigest(Vec::from(digest))),
    } as usize;

    // Gets the 4 bytes that will compose the code
    let code_bytes: [u8; 4] = match digest.get(offset..offset + 4).map(<[u8; 4]>::try_from) {
        Some(Ok(x)) => x,
        _ => return Err(OtpError::InvalidDigest(Vec::from(digest))),
    };

    let code = u32::from_be_bytes(code_bytes) & 0x7fff_ffff;

    Ok(OtpCode::new(code % CODE_MODULUS))
}

/// Computes the code for an explicit counter, independent of any clock.
///
/// # Errors
/// [`OtpError::MissingSecret`] when `secret` is `None`, [`OtpError::Encoding`]
/// when the secret or label bytes are not valid UTF-8.
pub fn generate(
    secret: Option<&[u8]>,
    counter: u64,
    label: Option<&[u8]>,
) -> Result<OtpCode, OtpError> {
    let secret = secret_bytes(secret)?;
    let label = label_bytes(label)?;

    generate_unchecked(secret, counter, label)
}

/// Same as [`generate`] for inputs that were already validated.
pub(crate) fn generate_unchecked(
    secret: &[u8],
    counter: u64,
    label: &[u8],
) -> Result<OtpCode, OtpError> {
    let digest = calc_digest(secret, counter, label)?;

    encode_digest_truncated(&digest)
}
