//! Building the authorization redirect URL and parsing the provider's
//! callback.
//!
//! - `AuthorizeRequest` serializes a merged [`Config`](crate::config::Config)
//!   into the provider's authorization-endpoint query string.
//! - `CallbackParams` is the raw, unverified query-parameter set Google sends
//!   back to the redirect URI. It must go through the login controller's
//!   state check before the code is used.
//! - `AuthorizationResult` is a code/state pair whose `state` matched the
//!   pending one.
//!
//! # Flow
//! 1. Generate a state token and include it in the authorization request.
//! 2. Redirect the user to Google's authentication page.
//! 3. Google redirects back with `code` and `state` query parameters.
//! 4. The login controller compares the returned state with the stored one
//!    and only then hands out an `AuthorizationResult`.

use std::collections::HashMap;

use tracing::error;
use url::Url;

use crate::{config::Config, error::Error, state_token::StateToken};

/// The value of the `code` query parameter sent by Google, after the state
/// comparison succeeded. Exchange it for tokens server-side.
#[derive(Debug, Clone, PartialEq)]
pub struct Code(pub(crate) String);

impl Code {
    pub fn new(value: &str) -> Self {
        Self(value.to_string())
    }

    /// Returns the authorization code as a string reference.
    pub fn value(&self) -> &str {
        &self.0
    }
}

impl From<String> for Code {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// A verified code/state pair produced by the callback handler.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthorizationResult {
    pub code: Code,
    pub state: String,
}

/// Generates the URL that initiates the authorization request.
///
/// # Example
/// ```rust
/// use google_oauth2_flow::{authorize::AuthorizeRequest, config::Config, state_token::StateToken};
///
/// let config = Config::builder()
///     .client_id("your_client_id")
///     .redirect_uri("https://your-app.com/callback")
///     .build();
/// let state = StateToken::generate();
///
/// let url = AuthorizeRequest::new(&config, &state).into_url().unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct AuthorizeRequest {
    auth_endpoint: String,
    client_id: String,
    redirect_uri: String,
    response_type: String,
    scope: Vec<String>,
    access_type: &'static str,
    include_granted_scopes: bool,
    state: String,
    prompt: Option<String>,
    login_hint: Option<String>,
    nonce: Option<String>,
    hd: Option<String>,
}

impl AuthorizeRequest {
    /// Creates a new request from a (merged) configuration and the state
    /// token generated for this login.
    pub fn new(config: &Config, state: &StateToken) -> Self {
        Self {
            auth_endpoint: config.auth_endpoint.0.clone(),
            client_id: config.client_id.0.clone(),
            redirect_uri: config.redirect_uri.0.clone(),
            response_type: config.response_type.clone(),
            scope: config.scope.clone(),
            access_type: config.access_type.as_str(),
            include_granted_scopes: config.include_granted_scopes,
            state: state.value().to_string(),
            prompt: config.prompt.clone(),
            login_hint: config.login_hint.clone(),
            nonce: config.nonce.as_ref().map(|n| n.value().to_string()),
            hd: config.hd.clone(),
        }
    }

    /// Constructs the authorization URL with the required parameters,
    /// percent-encoded. Optional parameters (`prompt`, `login_hint`,
    /// `nonce`, `hd`) are appended only when set; an empty `prompt`
    /// suppresses the parameter.
    pub fn into_url(&self) -> Result<String, Error> {
        let mut url = Url::parse(&self.auth_endpoint).map_err(|e| {
            error!("Failed to parse auth endpoint url: {}", e);
            Error::Url
        })?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("client_id", &self.client_id);
            pairs.append_pair("redirect_uri", &self.redirect_uri);
            pairs.append_pair("response_type", &self.response_type);
            pairs.append_pair("scope", &self.scope.join(" "));
            pairs.append_pair("access_type", self.access_type);
            pairs.append_pair(
                "include_granted_scopes",
                if self.include_granted_scopes {
                    "true"
                } else {
                    "false"
                },
            );
            pairs.append_pair("state", &self.state);
            if let Some(prompt) = self.prompt.as_deref().filter(|p| !p.is_empty()) {
                pairs.append_pair("prompt", prompt);
            }
            if let Some(login_hint) = &self.login_hint {
                pairs.append_pair("login_hint", login_hint);
            }
            if let Some(nonce) = &self.nonce {
                pairs.append_pair("nonce", nonce);
            }
            if let Some(hd) = &self.hd {
                pairs.append_pair("hd", hd);
            }
        }
        Ok(url.into())
    }
}

/// The raw query parameters of a redirect back from Google. Nothing here has
/// been checked against the pending state yet.
#[derive(Debug, Clone, Default)]
pub struct CallbackParams {
    pub(crate) code: Option<String>,
    pub(crate) state: Option<String>,
    pub(crate) error: Option<String>,
    pub(crate) error_description: Option<String>,
}

impl CallbackParams {
    /// Parses a full callback URL string.
    pub fn parse(callback_url: &str) -> Result<Self, Error> {
        let url = Url::parse(callback_url).map_err(|e| {
            error!("Failed to parse callback url: {}", e);
            Error::Url
        })?;
        Ok(Self::from_url(&url))
    }

    /// Extracts the OAuth parameters from an already-parsed URL.
    pub fn from_url(url: &Url) -> Self {
        let mut params: HashMap<_, _> = url.query_pairs().map(|v| (v.0, v.1)).collect();
        Self {
            code: params.remove("code").map(|v| v.into_owned()),
            state: params.remove("state").map(|v| v.into_owned()),
            error: params.remove("error").map(|v| v.into_owned()),
            error_description: params.remove("error_description").map(|v| v.into_owned()),
        }
    }

    pub fn code(&self) -> Option<&str> {
        self.code.as_deref()
    }

    pub fn state(&self) -> Option<&str> {
        self.state.as_deref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn error_description(&self) -> Option<&str> {
        self.error_description.as_deref()
    }
}

// ==========Tests==========
#[cfg(test)]
mod tests {
    use url::Url;

    use crate::{
        config::{AccessType, Config},
        nonce::Nonce,
        state_token::StateToken,
    };

    use super::{AuthorizeRequest, CallbackParams};

    fn base_config() -> Config {
        Config::builder()
            .auth_endpoint("https://auth.example.com/auth")
            .client_id("my_client_id")
            .client_secret("my_secret")
            .redirect_uri("https://redirect.example.com/cb")
            .build()
    }

    fn query_keys(url: &str) -> Vec<String> {
        Url::parse(url)
            .unwrap()
            .query_pairs()
            .map(|(k, _)| k.into_owned())
            .collect()
    }

    #[test]
    fn test_into_url_required_params() {
        let config = Config::builder()
            .auth_endpoint("https://auth.example.com/auth")
            .client_id("my_client_id")
            .redirect_uri("cb")
            .build();
        let state = StateToken::from_value("xyz");

        let url = AuthorizeRequest::new(&config, &state).into_url().unwrap();
        let expected = "https://auth.example.com/auth?client_id=my_client_id\
                        &redirect_uri=cb&response_type=code&scope=profile+email\
                        &access_type=offline&include_granted_scopes=true&state=xyz\
                        &prompt=consent";
        assert_eq!(url, expected);
    }

    #[test]
    fn test_into_url_param_order_with_optionals() {
        let config = Config::builder()
            .auth_endpoint("https://auth.example.com/auth")
            .client_id("my_client_id")
            .redirect_uri("https://redirect.example.com/cb")
            .login_hint("user@example.com")
            .nonce(Nonce::new())
            .hd("example.com")
            .build();
        let state = StateToken::generate();

        let url = AuthorizeRequest::new(&config, &state).into_url().unwrap();
        assert_eq!(
            query_keys(&url),
            vec![
                "client_id",
                "redirect_uri",
                "response_type",
                "scope",
                "access_type",
                "include_granted_scopes",
                "state",
                "prompt",
                "login_hint",
                "nonce",
                "hd",
            ]
        );
    }

    #[test]
    fn test_into_url_empty_prompt_suppressed() {
        let config = Config::builder()
            .auth_endpoint("https://auth.example.com/auth")
            .client_id("my_client_id")
            .redirect_uri("cb")
            .prompt("")
            .build();
        let state = StateToken::from_value("xyz");

        let url = AuthorizeRequest::new(&config, &state).into_url().unwrap();
        assert!(!url.contains("prompt="));
    }

    #[test]
    fn test_into_url_encodes_redirect_uri() {
        let state = StateToken::from_value("xyz");
        let url = AuthorizeRequest::new(&base_config(), &state)
            .into_url()
            .unwrap();
        assert!(url.contains("redirect_uri=https%3A%2F%2Fredirect.example.com%2Fcb"));
    }

    #[test]
    fn test_into_url_online_access_type() {
        let config = Config::builder()
            .auth_endpoint("https://auth.example.com/auth")
            .client_id("my_client_id")
            .redirect_uri("cb")
            .access_type(AccessType::Online)
            .build();
        let state = StateToken::from_value("xyz");

        let url = AuthorizeRequest::new(&config, &state).into_url().unwrap();
        assert!(url.contains("access_type=online"));
    }

    #[test]
    fn test_callback_params_parse_code_and_state() {
        let params =
            CallbackParams::parse("https://redirect.example.com/cb?code=abc&state=xyz").unwrap();
        assert_eq!(params.code.as_deref(), Some("abc"));
        assert_eq!(params.state.as_deref(), Some("xyz"));
        assert!(params.error.is_none());
    }

    #[test]
    fn test_callback_params_parse_error() {
        let params = CallbackParams::parse(
            "https://redirect.example.com/cb?error=access_denied&error_description=User+denied",
        )
        .unwrap();
        assert_eq!(params.error.as_deref(), Some("access_denied"));
        assert_eq!(params.error_description.as_deref(), Some("User denied"));
        assert!(params.code.is_none());
    }

    #[test]
    fn test_callback_params_parse_plain_url() {
        let params = CallbackParams::parse("https://redirect.example.com/cb").unwrap();
        assert!(params.code.is_none());
        assert!(params.state.is_none());
        assert!(params.error.is_none());
    }

    #[test]
    fn test_callback_params_invalid_url() {
        assert!(CallbackParams::parse("not a url").is_err());
    }
}
