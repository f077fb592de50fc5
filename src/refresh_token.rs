//! Provides functionality for refreshing access tokens.
//!
//! This module includes:
//! - `RefreshToken`: A structure representing the refresh token.
//! - `RefreshTokenRequest`: Form parameters for `grant_type=refresh_token`.
//!
//! The token endpoint answers a refresh with the same shape as the code
//! exchange ([`TokenResponse`](crate::token::TokenResponse)), minus the
//! refresh token itself.

use serde::{Deserialize, Serialize};

use crate::config::{ClientID, ClientSecret, Config, TokenEndPoint};

/// Represents an OAuth 2.0 refresh token, used to obtain a new access token
/// without user interaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RefreshToken(pub(crate) String);

impl RefreshToken {
    /// Creates a new refresh token from a string.
    pub fn new(value: &str) -> Self {
        Self(value.to_string())
    }

    /// Returns the refresh token as a String.
    pub fn value(&self) -> String {
        self.0.to_owned()
    }

    /// Returns the refresh token as a string reference.
    pub fn value_as_str(&self) -> &str {
        &self.0
    }
}

/// Represents a request to exchange a refresh token for a new access token.
#[derive(Debug, Clone)]
pub struct RefreshTokenRequest {
    pub(crate) token_endpoint: TokenEndPoint,
    pub(crate) client_id: ClientID,
    pub(crate) client_secret: ClientSecret,
    pub(crate) refresh_token: RefreshToken,
    pub(crate) grant_type: String,
}

impl RefreshTokenRequest {
    /// Creates a new `RefreshTokenRequest` with the necessary parameters.
    pub fn new(config: &Config, refresh_token: &RefreshToken) -> Self {
        Self {
            token_endpoint: config.token_endpoint.to_owned(),
            client_id: config.client_id.to_owned(),
            client_secret: config.client_secret.to_owned(),
            refresh_token: refresh_token.to_owned(),
            grant_type: "refresh_token".to_string(),
        }
    }
}

// ==========Tests==========
#[cfg(test)]
mod tests {
    use crate::config::Config;

    use super::{RefreshToken, RefreshTokenRequest};

    #[test]
    fn test_refresh_token_methods() {
        let refresh_token = RefreshToken("refresh_token_value".to_string());

        assert_eq!(refresh_token.value(), "refresh_token_value");
        assert_eq!(refresh_token.value_as_str(), "refresh_token_value");
    }

    #[test]
    fn test_refresh_token_request_new() {
        let config = Config::builder()
            .token_endpoint("https://token.example.com/token")
            .client_id("my_client_id")
            .client_secret("my_secret")
            .redirect_uri("https://redirect.example.com")
            .build();

        let refresh_token = RefreshToken::new("my_refresh_token");
        let request = RefreshTokenRequest::new(&config, &refresh_token);

        assert_eq!(request.token_endpoint, config.token_endpoint);
        assert_eq!(request.client_id, config.client_id);
        assert_eq!(request.client_secret, config.client_secret);
        assert_eq!(request.refresh_token, refresh_token);
        assert_eq!(request.grant_type, "refresh_token");
    }
}
