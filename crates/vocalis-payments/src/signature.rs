//! Webhook signature verification
//!
//! The signature header has the form `t=<unix seconds>,v1=<hex>[,v1=<hex>...]`.
//! Each `v1` entry is `hex(HMAC-SHA256(secret, "<t>.<raw body>"))`; any one
//! matching entry authenticates the payload.

use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;

type HmacSha256 = Hmac<Sha256>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SignatureError {
    #[error("missing signature header")]
    MissingHeader,

    #[error("malformed signature header")]
    MalformedHeader,

    #[error("timestamp outside tolerance")]
    Stale,

    #[error("no signature matched")]
    Mismatch,
}

/// Verify `payload` against a signature header using the current time
pub fn verify(payload: &[u8], header: Option<&str>, secret: &[u8], tolerance_secs: u64) -> Result<(), SignatureError> {
    verify_at(payload, header, secret, tolerance_secs, jiff::Timestamp::now().as_second())
}

/// Verify `payload` against a signature header as of `now` (unix seconds)
pub fn verify_at(
    payload: &[u8],
    header: Option<&str>,
    secret: &[u8],
    tolerance_secs: u64,
    now: i64,
) -> Result<(), SignatureError> {
    let header = header.map(str::trim).filter(|h| !h.is_empty()).ok_or(SignatureError::MissingHeader)?;

    let mut timestamp = None;
    let mut candidates = Vec::new();

    for part in header.split(',') {
        let Some((key, value)) = part.trim().split_once('=') else {
            return Err(SignatureError::MalformedHeader);
        };

        match key {
            "t" => timestamp = Some(value.parse::<i64>().map_err(|_| SignatureError::MalformedHeader)?),
            // Unparseable entries can never match; skip them like unknown schemes
            "v1" => candidates.extend(hex::decode(value).ok()),
            _ => {}
        }
    }

    let timestamp = timestamp.ok_or(SignatureError::MalformedHeader)?;

    if candidates.is_empty() {
        return Err(SignatureError::MalformedHeader);
    }

    if now.abs_diff(timestamp) > tolerance_secs {
        return Err(SignatureError::Stale);
    }

    let expected = sign(payload, secret, timestamp);

    let matched = candidates
        .iter()
        .fold(subtle::Choice::from(0), |acc, candidate| acc | expected.as_slice().ct_eq(candidate));

    if bool::from(matched) {
        Ok(())
    } else {
        Err(SignatureError::Mismatch)
    }
}

/// Build a complete signature header for `payload` at `timestamp`
pub fn signature_header(payload: &[u8], secret: &[u8], timestamp: i64) -> String {
    format!("t={timestamp},v1={}", hex::encode(sign(payload, secret, timestamp)))
}

fn sign(payload: &[u8], secret: &[u8], timestamp: i64) -> Vec<u8> {
    let mut mac = HmacSha256::new_from_slice(secret).expect("HMAC accepts keys of any length");
    mac.update(timestamp.to_string().as_bytes());
    mac.update(b".");
    mac.update(payload);
    mac.finalize().into_bytes().to_vec()
}
