//! Provides functionality for revoking OAuth 2.0 tokens.
//!
//! This module includes:
//! - `RevokeToken`: An enum representing either an access token or a refresh
//!   token to revoke; the variant decides the `token_type_hint` form field.
//! - `RevokeTokenRequest`: Form parameters for the revocation endpoint.
//!
//! Revocation is best-effort cleanup on a logout path. Revoking an access
//! token ends the current session only; revoking a refresh token invalidates
//! every access token associated with it.

use crate::{config::Config, refresh_token::RefreshToken, token::AccessToken};

/// A token to be revoked, either an access token or a refresh token.
#[derive(Debug, Clone, PartialEq)]
pub enum RevokeToken {
    AccessToken(AccessToken),
    RefreshToken(RefreshToken),
}

impl RevokeToken {
    /// Creates a `RevokeToken` instance for an access token.
    pub fn new_access_token(token: &str) -> Self {
        Self::AccessToken(AccessToken(token.to_string()))
    }

    /// Creates a `RevokeToken` instance for a refresh token.
    pub fn new_refresh_token(token: &str) -> Self {
        Self::RefreshToken(RefreshToken(token.to_string()))
    }
}

/// Represents a request to revoke a token at the provider's revocation
/// endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct RevokeTokenRequest {
    pub(crate) end_point: String,
    pub(crate) token: RevokeToken,
}

impl RevokeTokenRequest {
    /// Creates a new `RevokeTokenRequest` for the configured revocation
    /// endpoint.
    pub fn new(config: &Config, token: &RevokeToken) -> Self {
        Self {
            end_point: config.revoke_endpoint.0.clone(),
            token: token.clone(),
        }
    }

    /// Returns the revocation endpoint URL.
    pub fn end_point(&self) -> &str {
        &self.end_point
    }

    /// Extracts the token string, whichever variant holds it.
    pub fn inner_value(&self) -> &str {
        match &self.token {
            RevokeToken::AccessToken(v) => &v.0,
            RevokeToken::RefreshToken(v) => &v.0,
        }
    }

    /// The `token_type_hint` form field for this token.
    pub fn token_type_hint(&self) -> &'static str {
        match &self.token {
            RevokeToken::AccessToken(_) => "access_token",
            RevokeToken::RefreshToken(_) => "refresh_token",
        }
    }
}
