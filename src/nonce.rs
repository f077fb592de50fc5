//! Represents a cryptographic nonce for the authorization request.
use serde::{Deserialize, Serialize};

/// A `Nonce` is a unique, random value bound to one authorization request to
/// mitigate replay attacks. When set on the configuration it is sent as the
/// `nonce` query parameter and echoed back inside the ID token, where the
/// caller can compare it against the original value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Nonce(pub(crate) String);

impl Nonce {
    /// Generates a new nonce using UUIDv4.
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    /// Returns the nonce as a string reference.
    pub fn value(&self) -> &str {
        &self.0
    }
}

/// Equivalent to `Nonce::new()`.
impl Default for Nonce {
    fn default() -> Self {
        Self::new()
    }
}

// ==========Test==========
#[cfg(test)]
mod test {
    use uuid::Uuid;

    use super::Nonce;

    #[test]
    fn test_nonce_new() {
        let nonce = Nonce::new();
        assert!(!nonce.0.is_empty());
        assert!(Uuid::parse_str(&nonce.0).is_ok())
    }
}
