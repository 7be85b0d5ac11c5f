use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use rand::RngCore;

/// Number of random bytes behind one anti-forgery token.
pub const STATE_BYTES: usize = 32;

/// Generates the anti-forgery `state` value for one authorization round trip.
///
/// Uses the thread-local CSPRNG and encodes the bytes URL-safe without padding,
/// so the value can be put into a query string as is.
pub fn generate_state() -> String {
    let mut bytes = [0u8; STATE_BYTES];
    rand::rng().fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}

/// Splits the comma-separated `SCOPES` value into single scopes.
pub fn split_scopes(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}
