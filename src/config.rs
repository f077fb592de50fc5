//! Defines structures and builders related to authentication configuration.
//!
//! Provides a structured way to handle the credentials, endpoints and
//! authorization-request parameters used across the flow.
//!
//! ## Structures
//! - `Config`: Stores all the necessary authentication information.
//! - `ConfigBuilder`: A builder for constructing a `Config` instance.
//! - `Overrides`: Per-login partial configuration merged over a `Config`.
//!
//! All four provider endpoints default to Google's published URLs, so a
//! minimal configuration only needs the client credentials and redirect URI:
//!
//! ```rust,no_run
//! use google_oauth2_flow::config::Config;
//!
//! let config = Config::builder()
//!     .client_id("your-client-id")
//!     .client_secret("your-client-secret")
//!     .redirect_uri("https://your-app.com/callback")
//!     .build();
//! ```

use crate::nonce::Nonce;

pub const GOOGLE_AUTH_ENDPOINT: &str = "https://accounts.google.com/o/oauth2/v2/auth";
pub const GOOGLE_TOKEN_ENDPOINT: &str = "https://oauth2.googleapis.com/token";
pub const GOOGLE_REVOKE_ENDPOINT: &str = "https://oauth2.googleapis.com/revoke";
pub const GOOGLE_USERINFO_ENDPOINT: &str = "https://www.googleapis.com/oauth2/v2/userinfo";

#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct AuthEndPoint(pub String);

#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct TokenEndPoint(pub String);

#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct RevokeEndPoint(pub String);

#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct UserInfoEndPoint(pub String);

#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct ClientID(pub String);

#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct ClientSecret(pub String);

#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct RedirectURI(pub String);

/// Value of the `access_type` authorization parameter.
/// `Offline` asks Google for a refresh token alongside the access token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessType {
    Online,
    Offline,
}

impl AccessType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccessType::Online => "online",
            AccessType::Offline => "offline",
        }
    }
}

/// Holds all information required for the Authorization Code flow, both the
/// browser-side authorization request and the server-side token exchange.
///
/// Immutable once constructed; build it with [`ConfigBuilder`] and adjust a
/// single login attempt with [`Overrides`].
#[derive(Debug, Clone)]
pub struct Config {
    pub(crate) auth_endpoint: AuthEndPoint,
    pub(crate) token_endpoint: TokenEndPoint,
    pub(crate) revoke_endpoint: RevokeEndPoint,
    pub(crate) user_info_endpoint: UserInfoEndPoint,
    pub(crate) client_id: ClientID,
    pub(crate) client_secret: ClientSecret,
    pub(crate) redirect_uri: RedirectURI,
    pub(crate) scope: Vec<String>,
    pub(crate) response_type: String,
    pub(crate) access_type: AccessType,
    pub(crate) prompt: Option<String>,
    pub(crate) state: Option<String>,
    pub(crate) include_granted_scopes: bool,
    pub(crate) login_hint: Option<String>,
    pub(crate) nonce: Option<Nonce>,
    pub(crate) hd: Option<String>,
}

// ==========impl Config==========
impl Config {
    /// Returns a new `ConfigBuilder` instance to create a `Config` object.
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Returns `self` with every populated field of `overrides` applied on
    /// top. The base configuration is left untouched.
    pub fn merged(&self, overrides: &Overrides) -> Config {
        let mut merged = self.clone();
        if let Some(v) = &overrides.client_id {
            merged.client_id = ClientID(v.clone());
        }
        if let Some(v) = &overrides.redirect_uri {
            merged.redirect_uri = RedirectURI(v.clone());
        }
        if let Some(v) = &overrides.scope {
            merged.scope = v.clone();
        }
        if let Some(v) = &overrides.response_type {
            merged.response_type = v.clone();
        }
        if let Some(v) = overrides.access_type {
            merged.access_type = v;
        }
        if let Some(v) = &overrides.prompt {
            merged.prompt = Some(v.clone());
        }
        if let Some(v) = &overrides.state {
            merged.state = Some(v.clone());
        }
        if let Some(v) = overrides.include_granted_scopes {
            merged.include_granted_scopes = v;
        }
        if let Some(v) = &overrides.login_hint {
            merged.login_hint = Some(v.clone());
        }
        if let Some(v) = &overrides.nonce {
            merged.nonce = Some(v.clone());
        }
        if let Some(v) = &overrides.hd {
            merged.hd = Some(v.clone());
        }
        merged
    }
}

/// Provides a convenient way to create a `Config` instance step by step.
///
/// Defaults: Google endpoints, `scope = ["profile", "email"]`,
/// `response_type = "code"`, `access_type = offline`, `prompt = "consent"`,
/// `include_granted_scopes = true`. Credentials and the redirect URI start
/// empty and are validated at login time, not here.
#[derive(Debug, Clone)]
pub struct ConfigBuilder {
    auth_endpoint: AuthEndPoint,
    token_endpoint: TokenEndPoint,
    revoke_endpoint: RevokeEndPoint,
    user_info_endpoint: UserInfoEndPoint,
    client_id: ClientID,
    client_secret: ClientSecret,
    redirect_uri: RedirectURI,
    scope: Vec<String>,
    response_type: String,
    access_type: AccessType,
    prompt: Option<String>,
    state: Option<String>,
    include_granted_scopes: bool,
    login_hint: Option<String>,
    nonce: Option<Nonce>,
    hd: Option<String>,
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self {
            auth_endpoint: AuthEndPoint(GOOGLE_AUTH_ENDPOINT.to_string()),
            token_endpoint: TokenEndPoint(GOOGLE_TOKEN_ENDPOINT.to_string()),
            revoke_endpoint: RevokeEndPoint(GOOGLE_REVOKE_ENDPOINT.to_string()),
            user_info_endpoint: UserInfoEndPoint(GOOGLE_USERINFO_ENDPOINT.to_string()),
            client_id: ClientID::default(),
            client_secret: ClientSecret::default(),
            redirect_uri: RedirectURI::default(),
            scope: vec!["profile".to_string(), "email".to_string()],
            response_type: "code".to_string(),
            access_type: AccessType::Offline,
            prompt: Some("consent".to_string()),
            state: None,
            include_granted_scopes: true,
            login_hint: None,
            nonce: None,
            hd: None,
        }
    }
}

// ==========impl ConfigBuilder==========
impl ConfigBuilder {
    /// Creates a new `ConfigBuilder` instance with default values.
    pub fn new() -> Self {
        ConfigBuilder::default()
    }

    /// Sets the authorization endpoint URL.
    pub fn auth_endpoint(mut self, auth_endpoint: &str) -> Self {
        self.auth_endpoint = AuthEndPoint(auth_endpoint.to_string());
        self
    }

    /// Sets the token exchange endpoint URL.
    pub fn token_endpoint(mut self, token_endpoint: &str) -> Self {
        self.token_endpoint = TokenEndPoint(token_endpoint.to_string());
        self
    }

    /// Sets the token revocation endpoint URL.
    pub fn revoke_endpoint(mut self, revoke_endpoint: &str) -> Self {
        self.revoke_endpoint = RevokeEndPoint(revoke_endpoint.to_string());
        self
    }

    /// Sets the user-info endpoint URL.
    pub fn user_info_endpoint(mut self, user_info_endpoint: &str) -> Self {
        self.user_info_endpoint = UserInfoEndPoint(user_info_endpoint.to_string());
        self
    }

    /// Sets the client ID obtained from Google Cloud Console.
    pub fn client_id(mut self, client_id: &str) -> Self {
        self.client_id = ClientID(client_id.to_string());
        self
    }

    /// Sets the client secret associated with the client ID.
    pub fn client_secret(mut self, client_secret: &str) -> Self {
        self.client_secret = ClientSecret(client_secret.to_string());
        self
    }

    /// Sets the redirect URI registered in Google Cloud Console.
    pub fn redirect_uri(mut self, redirect_uri: &str) -> Self {
        self.redirect_uri = RedirectURI(redirect_uri.to_string());
        self
    }

    /// Sets the requested scopes. Joined with spaces, in the given order,
    /// when the authorization URL is built.
    pub fn scope(mut self, scope: &[&str]) -> Self {
        self.scope = scope.iter().map(|s| s.to_string()).collect();
        self
    }

    /// Sets the `response_type` parameter.
    pub fn response_type(mut self, response_type: &str) -> Self {
        self.response_type = response_type.to_string();
        self
    }

    /// Sets the `access_type` parameter.
    pub fn access_type(mut self, access_type: AccessType) -> Self {
        self.access_type = access_type;
        self
    }

    /// Sets the `prompt` parameter.
    pub fn prompt(mut self, prompt: &str) -> Self {
        self.prompt = Some(prompt.to_string());
        self
    }

    /// Sets a fixed `state` value. When unset, a fresh random token is
    /// generated per login.
    pub fn state(mut self, state: &str) -> Self {
        self.state = Some(state.to_string());
        self
    }

    /// Sets the `include_granted_scopes` parameter.
    pub fn include_granted_scopes(mut self, include: bool) -> Self {
        self.include_granted_scopes = include;
        self
    }

    /// Sets the `login_hint` parameter.
    pub fn login_hint(mut self, login_hint: &str) -> Self {
        self.login_hint = Some(login_hint.to_string());
        self
    }

    /// Sets the `nonce` parameter.
    pub fn nonce(mut self, nonce: Nonce) -> Self {
        self.nonce = Some(nonce);
        self
    }

    /// Sets the `hd` (hosted domain) parameter.
    pub fn hd(mut self, hd: &str) -> Self {
        self.hd = Some(hd.to_string());
        self
    }

    /// Constructs a `Config` instance with the provided values.
    pub fn build(self) -> Config {
        Config {
            auth_endpoint: self.auth_endpoint,
            token_endpoint: self.token_endpoint,
            revoke_endpoint: self.revoke_endpoint,
            user_info_endpoint: self.user_info_endpoint,
            client_id: self.client_id,
            client_secret: self.client_secret,
            redirect_uri: self.redirect_uri,
            scope: self.scope,
            response_type: self.response_type,
            access_type: self.access_type,
            prompt: self.prompt,
            state: self.state,
            include_granted_scopes: self.include_granted_scopes,
            login_hint: self.login_hint,
            nonce: self.nonce,
            hd: self.hd,
        }
    }
}

/// Per-login partial configuration. Every populated field replaces the
/// corresponding `Config` field for that login only.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub(crate) client_id: Option<String>,
    pub(crate) redirect_uri: Option<String>,
    pub(crate) scope: Option<Vec<String>>,
    pub(crate) response_type: Option<String>,
    pub(crate) access_type: Option<AccessType>,
    pub(crate) prompt: Option<String>,
    pub(crate) state: Option<String>,
    pub(crate) include_granted_scopes: Option<bool>,
    pub(crate) login_hint: Option<String>,
    pub(crate) nonce: Option<Nonce>,
    pub(crate) hd: Option<String>,
}

impl Overrides {
    pub fn new() -> Self {
        Overrides::default()
    }

    pub fn client_id(mut self, client_id: &str) -> Self {
        self.client_id = Some(client_id.to_string());
        self
    }

    pub fn redirect_uri(mut self, redirect_uri: &str) -> Self {
        self.redirect_uri = Some(redirect_uri.to_string());
        self
    }

    pub fn scope(mut self, scope: &[&str]) -> Self {
        self.scope = Some(scope.iter().map(|s| s.to_string()).collect());
        self
    }

    pub fn response_type(mut self, response_type: &str) -> Self {
        self.response_type = Some(response_type.to_string());
        self
    }

    pub fn access_type(mut self, access_type: AccessType) -> Self {
        self.access_type = Some(access_type);
        self
    }

    pub fn prompt(mut self, prompt: &str) -> Self {
        self.prompt = Some(prompt.to_string());
        self
    }

    pub fn state(mut self, state: &str) -> Self {
        self.state = Some(state.to_string());
        self
    }

    pub fn include_granted_scopes(mut self, include: bool) -> Self {
        self.include_granted_scopes = Some(include);
        self
    }

    pub fn login_hint(mut self, login_hint: &str) -> Self {
        self.login_hint = Some(login_hint.to_string());
        self
    }

    pub fn nonce(mut self, nonce: Nonce) -> Self {
        self.nonce = Some(nonce);
        self
    }

    pub fn hd(mut self, hd: &str) -> Self {
        self.hd = Some(hd.to_string());
        self
    }
}
