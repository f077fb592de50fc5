//! Token-endpoint types for the authorization-code grant.
//!
//! This module:
//! - `AccessToken`: bearer credential for Google API calls.
//! - `TokenResponse`: the token endpoint's response body, received verbatim.
//! - `TokenExchangeRequest`: form parameters for `grant_type=authorization_code`.

use serde::{Deserialize, Serialize};

use crate::{
    authorize::Code,
    config::{ClientID, ClientSecret, Config, RedirectURI, TokenEndPoint},
    id_token::IdTokenRaw,
    refresh_token::RefreshToken,
};

/// Represents an OAuth 2.0 access token.
/// This token is used to access Google APIs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccessToken(pub(crate) String);

impl AccessToken {
    pub fn new(value: &str) -> Self {
        Self(value.to_string())
    }

    /// Retrieves the access token as a string.
    pub fn value(&self) -> &str {
        &self.0
    }
}

/// The provider's token response, for both the `authorization_code` and the
/// `refresh_token` grant. Not mutated here; callers persist it if they need
/// it beyond the call.
///
/// `refresh_token` is only present when Google decides to issue one
/// (`access_type=offline`, first consent); `id_token` only when an OpenID
/// scope was requested. Refresh responses carry neither.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    access_token: AccessToken,
    token_type: String,
    expires_in: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    refresh_token: Option<RefreshToken>,
    #[serde(default)]
    scope: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    id_token: Option<IdTokenRaw>,
}

impl TokenResponse {
    pub fn access_token(&self) -> &AccessToken {
        &self.access_token
    }

    pub fn token_type(&self) -> &str {
        &self.token_type
    }

    pub fn expires_in(&self) -> u32 {
        self.expires_in
    }

    pub fn refresh_token(&self) -> Option<&RefreshToken> {
        self.refresh_token.as_ref()
    }

    pub fn scope(&self) -> &str {
        &self.scope
    }

    pub fn id_token(&self) -> Option<&IdTokenRaw> {
        self.id_token.as_ref()
    }
}

/// Form parameters sent to the token endpoint to exchange an authorization
/// code for tokens.
#[derive(Debug, Clone)]
pub struct TokenExchangeRequest {
    token_endpoint: TokenEndPoint,
    code: Code,
    client_id: ClientID,
    client_secret: ClientSecret,
    redirect_uri: RedirectURI,
    grant_type: String,
}

impl TokenExchangeRequest {
    /// Creates a new request using parameters from `Config`.
    pub fn new(config: &Config, code: Code) -> Self {
        Self {
            token_endpoint: config.token_endpoint.to_owned(),
            code,
            client_id: config.client_id.to_owned(),
            client_secret: config.client_secret.to_owned(),
            redirect_uri: config.redirect_uri.to_owned(),
            grant_type: "authorization_code".to_string(),
        }
    }

    pub fn token_endpoint(&self) -> &str {
        &self.token_endpoint.0
    }

    pub fn code(&self) -> &str {
        &self.code.0
    }

    pub fn client_id(&self) -> &str {
        &self.client_id.0
    }

    pub fn client_secret(&self) -> &str {
        &self.client_secret.0
    }

    pub fn redirect_uri(&self) -> &str {
        &self.redirect_uri.0
    }

    pub fn grant_type(&self) -> &str {
        &self.grant_type
    }
}

// ==========Tests==========
#[cfg(test)]
mod tests {
    use crate::{authorize::Code, config::Config};

    use super::{AccessToken, TokenExchangeRequest, TokenResponse};

    #[test]
    fn test_access_token_value() {
        let token = AccessToken("test_token".to_string());
        assert_eq!(token.value(), "test_token");
    }

    #[test]
    fn test_token_exchange_request_new() {
        let config = Config::builder()
            .token_endpoint("https://token.example.com")
            .client_id("client_id")
            .client_secret("secret")
            .redirect_uri("https://redirect.example.com")
            .build();

        let request = TokenExchangeRequest::new(&config, Code::new("auth_code"));

        assert_eq!(request.token_endpoint(), "https://token.example.com");
        assert_eq!(request.code(), "auth_code");
        assert_eq!(request.client_id(), "client_id");
        assert_eq!(request.client_secret(), "secret");
        assert_eq!(request.redirect_uri(), "https://redirect.example.com");
        assert_eq!(request.grant_type(), "authorization_code");
    }

    #[test]
    fn test_token_response_deserialize_full() {
        let body = r#"{
            "access_token": "my_access_token",
            "token_type": "Bearer",
            "expires_in": 3599,
            "refresh_token": "my_refresh_token",
            "scope": "openid email profile",
            "id_token": "header.payload.signature"
        }"#;
        let response: TokenResponse = serde_json::from_str(body).unwrap();

        assert_eq!(response.access_token().value(), "my_access_token");
        assert_eq!(response.token_type(), "Bearer");
        assert_eq!(response.expires_in(), 3599);
        assert_eq!(
            response.refresh_token().map(|t| t.value_as_str()),
            Some("my_refresh_token")
        );
        assert_eq!(response.scope(), "openid email profile");
        assert!(response.id_token().is_some());
    }

    #[test]
    fn test_token_response_deserialize_minimal() {
        let body = r#"{
            "access_token": "my_access_token",
            "token_type": "Bearer",
            "expires_in": 3599,
            "scope": "email"
        }"#;
        let response: TokenResponse = serde_json::from_str(body).unwrap();

        assert!(response.refresh_token().is_none());
        assert!(response.id_token().is_none());
    }
}
