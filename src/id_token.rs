//! Decoding and shallowly verifying ID tokens.
//!
//! This module:
//! - `IdTokenRaw`: the encoded ID token as received from the token endpoint.
//! - `IdTokenClaims`: the decoded payload (middle JWT segment).
//! - [`verify_id_token`]: the claim check applied during login.
//!
//! # Caution
//! Nothing here verifies the token's signature against Google's published
//! keys. [`verify_id_token`] checks the audience and expiry claims only,
//! which is sufficient when the token was just received over HTTPS directly
//! from Google, and NOT sufficient as a standalone trust decision. Do not
//! pass the raw token to other components of your application expecting
//! them to trust it.

use std::time::{SystemTime, UNIX_EPOCH};

use base64::{Engine, prelude::BASE64_URL_SAFE_NO_PAD};
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::{error::Error, nonce::Nonce};

/// An encoded ID token. Decode it to read the claims.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IdTokenRaw(String);

impl IdTokenRaw {
    pub fn new(value: &str) -> Self {
        Self(value.to_string())
    }

    pub fn value(&self) -> &str {
        &self.0
    }
}

/// The decoded ID token payload: the user's identity claims.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdTokenClaims {
    /// Issuer, e.g. "https://accounts.google.com".
    pub iss: String,
    /// Audience, the client ID the token was minted for.
    pub aud: String,
    /// Stable Google account identifier.
    pub sub: String,
    pub azp: Option<String>,
    pub email: Option<String>,
    pub email_verified: Option<bool>,
    pub given_name: Option<String>,
    pub family_name: Option<String>,
    pub name: Option<String>,
    pub picture: Option<String>,
    pub at_hash: Option<String>,
    /// Issued-at timestamp (UNIX seconds).
    pub iat: u64,
    /// Expiration timestamp (UNIX seconds).
    pub exp: u64,
    pub nonce: Option<Nonce>,
}

impl IdTokenClaims {
    /// Decodes the payload segment of an encoded ID token. The signature
    /// segment is ignored entirely.
    pub fn decode(id_token: &IdTokenRaw) -> Result<Self, Error> {
        let split: Vec<_> = id_token.0.split('.').collect();
        if split.len() != 3 {
            return Err(Error::Parse);
        }
        let bytes = BASE64_URL_SAFE_NO_PAD.decode(split[1]).map_err(|e| {
            error!("Failed to decode ID token payload: {}", e);
            Error::Parse
        })?;
        let claims = serde_json::from_slice::<IdTokenClaims>(&bytes).map_err(|e| {
            error!("Failed to deserialize ID token payload: {}", e);
            Error::Parse
        })?;
        Ok(claims)
    }
}

/// Shallow ID-token check: `aud` must equal the client ID and `exp` must not
/// be in the past (whole seconds against the system clock).
///
/// Never fails loudly; malformed input is simply invalid. See the module
/// caution: this does not verify the issuer's signature and must be paired
/// with true signature verification before the result is used as a
/// production trust decision.
pub fn verify_id_token(id_token: &IdTokenRaw, client_id: &str) -> bool {
    let claims = match IdTokenClaims::decode(id_token) {
        Ok(claims) => claims,
        Err(_) => return false,
    };
    if claims.aud != client_id {
        return false;
    }
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(u64::MAX);
    claims.exp >= now
}

// ==========Tests==========
#[cfg(test)]
mod tests {
    use std::time::{SystemTime, UNIX_EPOCH};

    use base64::{Engine, prelude::BASE64_URL_SAFE_NO_PAD};

    use crate::error::Error;

    use super::{IdTokenClaims, IdTokenRaw, verify_id_token};

    fn encode_token(aud: &str, exp: u64) -> IdTokenRaw {
        let payload = serde_json::json!({
            "iss": "https://accounts.google.com",
            "aud": aud,
            "sub": "my_sub",
            "iat": exp.saturating_sub(3600),
            "exp": exp,
        });
        let encoded = BASE64_URL_SAFE_NO_PAD.encode(payload.to_string());
        IdTokenRaw(format!("header.{}.signature", encoded))
    }

    fn now_secs() -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_secs()
    }

    #[test]
    fn test_decode_success() {
        let id_token_json = r#"{
            "iss": "https://accounts.google.com",
            "aud": "my_aud",
            "sub": "my_sub",
            "azp": "my_azp",
            "email": "email@gmail.com",
            "email_verified": true,
            "given_name": "my_given_name",
            "family_name": "my_family_name",
            "name": "my_name",
            "picture": "https://picture.example.com",
            "at_hash": "my_at_hash",
            "iat": 1742189616,
            "exp": 1742193216,
            "nonce": "my_nonce"
        }"#;
        let encoded = BASE64_URL_SAFE_NO_PAD.encode(id_token_json);
        let raw = IdTokenRaw(format!("header.{}.signature", encoded));

        let claims = IdTokenClaims::decode(&raw).unwrap();
        assert_eq!(claims.aud, "my_aud");
        assert_eq!(claims.sub, "my_sub");
        assert_eq!(claims.exp, 1742193216);
    }

    #[test]
    fn test_decode_wrong_segment_count() {
        let raw = IdTokenRaw("only_one_segment".to_string());
        assert!(matches!(IdTokenClaims::decode(&raw), Err(Error::Parse)));
    }

    #[test]
    fn test_decode_invalid_base64() {
        let raw = IdTokenRaw("header.!!not-base64!!.signature".to_string());
        assert!(matches!(IdTokenClaims::decode(&raw), Err(Error::Parse)));
    }

    #[test]
    fn test_decode_invalid_json() {
        let encoded = BASE64_URL_SAFE_NO_PAD.encode("not a valid json");
        let raw = IdTokenRaw(format!("header.{}.signature", encoded));
        assert!(matches!(IdTokenClaims::decode(&raw), Err(Error::Parse)));
    }

    #[test]
    fn test_verify_valid_token() {
        let raw = encode_token("my_client_id", now_secs() + 3600);
        assert!(verify_id_token(&raw, "my_client_id"));
    }

    #[test]
    fn test_verify_wrong_audience() {
        let raw = encode_token("other_client_id", now_secs() + 3600);
        assert!(!verify_id_token(&raw, "my_client_id"));
    }

    #[test]
    fn test_verify_expired_token() {
        let raw = encode_token("my_client_id", now_secs() - 60);
        assert!(!verify_id_token(&raw, "my_client_id"));
    }

    #[test]
    fn test_verify_malformed_token() {
        let raw = IdTokenRaw("garbage".to_string());
        assert!(!verify_id_token(&raw, "my_client_id"));
    }
}
