//! Reversible, URL-safe text encoding of the session payload.
//!
//! Deliberately unsigned: the console guards a single shared internal
//! identity, so the token only exists to avoid re-prompting credentials,
//! not to provide a security boundary beyond possession of the value.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use serde::de::DeserializeOwned;
use serde::Serialize;

pub fn encode<T: Serialize>(payload: &T) -> String {
    let json = serde_json::to_vec(payload).unwrap_or_default();
    URL_SAFE_NO_PAD.encode(json)
}

/// Returns `None` on any malformed input; never panics.
pub fn decode<T: DeserializeOwned>(token: &str) -> Option<T> {
    let bytes = URL_SAFE_NO_PAD.decode(token.trim()).ok()?;
    serde_json::from_slice(&bytes).ok()
}
