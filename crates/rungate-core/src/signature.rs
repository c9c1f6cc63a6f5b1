//! HMAC-SHA512 request signature verification.
//!
//! HCP Terraform signs the raw request body with the run task's shared
//! secret and sends the hex digest in `x-tfc-task-signature`. Verification
//! must run over the exact bytes as received (re-serializing the parsed
//! JSON would change the digest) and must compare in constant time.

use hmac::{Hmac, Mac};
use sha2::Sha512;

type HmacSha512 = Hmac<Sha512>;

/// Compute the hex-encoded HMAC-SHA512 signature of a body.
///
/// Used by tests and by operators generating known-good signatures; the
/// inverse of [`verify`].
pub fn sign(secret: &[u8], body: &[u8]) -> String {
    // HMAC accepts keys of any length, so new_from_slice cannot fail here
    let Ok(mut mac) = HmacSha512::new_from_slice(secret) else {
        return String::new();
    };
    mac.update(body);
    hex_encode(&mac.finalize().into_bytes())
}

/// Verify a hex-encoded HMAC-SHA512 signature against the raw body.
///
/// The comparison is performed on the hex strings in constant time, so an
/// uppercase or truncated signature fails just like a tampered one, and
/// the time taken is independent of where the first mismatch occurs.
///
/// Pure function: this is the sole authentication gate and has no side
/// effects.
pub fn verify(secret: &[u8], body: &[u8], signature: &str) -> bool {
    let computed = sign(secret, body);
    constant_time_eq(computed.as_bytes(), signature.as_bytes())
}

/// Encode bytes to a lowercase hex string.
fn hex_encode(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

/// Constant-time byte comparison (XOR-based).
///
/// Returns true if and only if `a == b`. Time taken is independent of
/// how many bytes match (mitigates timing attacks).
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut result: u8 = 0;
    for (x, y) in a.iter().zip(b.iter()) {
        result |= x ^ y;
    }
    result == 0
}
