//! Anti-CSRF `state` tokens round-tripped through the authorization redirect.
use base64::{Engine, prelude::BASE64_URL_SAFE_NO_PAD};
use rand::{RngCore, SeedableRng, TryRngCore, rngs::OsRng, rngs::SmallRng};
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::warn;

/// A randomly generated `state` token, Base64URL-encoded.
///
/// Generated from the operating system RNG. If no secure random source is
/// available the generator falls back to a time-seeded non-cryptographic
/// RNG; such tokens report `is_secure() == false` and must not be relied on
/// for CSRF protection.
///
/// # Example
/// ```rust
/// use google_oauth2_flow::state_token::StateToken;
///
/// let state = StateToken::generate();
/// assert!(!state.value().is_empty());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct StateToken {
    value: String,
    secure: bool,
}

impl StateToken {
    /// Generates a new state token.
    /// - Uses `OsRng` and encodes 32 random bytes in Base64URL format.
    /// - Falls back to a time-seeded `SmallRng` when the OS RNG is
    ///   unavailable; the resulting token is flagged as not secure.
    pub fn generate() -> Self {
        let mut key = [0u8; 32];
        match OsRng.try_fill_bytes(&mut key) {
            Ok(()) => Self {
                value: BASE64_URL_SAFE_NO_PAD.encode(key),
                secure: true,
            },
            Err(e) => {
                warn!(
                    "OS random source unavailable, state token is not CSRF-safe: {:?}",
                    e
                );
                let seed = SystemTime::now()
                    .duration_since(UNIX_EPOCH)
                    .map(|d| d.as_nanos() as u64)
                    .unwrap_or(0);
                SmallRng::seed_from_u64(seed).fill_bytes(&mut key);
                Self {
                    value: BASE64_URL_SAFE_NO_PAD.encode(key),
                    secure: false,
                }
            }
        }
    }

    /// Wraps a caller-supplied state value.
    pub fn from_value(value: &str) -> Self {
        Self {
            value: value.to_string(),
            secure: true,
        }
    }

    /// Returns the token as a string reference.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// `false` when the token came from the non-cryptographic fallback.
    pub fn is_secure(&self) -> bool {
        self.secure
    }
}
