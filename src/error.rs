//! Error taxonomy for the whole flow.
//!
//! Configuration and provider-status failures surface as `Err`; conditions
//! that are routine navigation outcomes (callback not present yet, state
//! mismatch, revoke failure) are reported through the event channel, a
//! `None` return, or a `false` flag instead. See the individual operations.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error body returned by Google's token endpoint, and the payload carried
/// by [`crate::event::AuthEvent::Error`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AuthError {
    #[serde(default)]
    pub error: String,
    #[serde(default)]
    pub error_description: Option<String>,
}

impl AuthError {
    pub fn new(error: &str, error_description: &str) -> Self {
        Self {
            error: error.to_string(),
            error_description: Some(error_description.to_string()),
        }
    }

    /// The provider's `error_description` when present, else a generic
    /// fallback message.
    pub fn message(&self) -> &str {
        self.error_description
            .as_deref()
            .unwrap_or("token request rejected by provider")
    }
}

#[derive(Debug, Clone, Error)]
pub enum Error {
    /// A required input was missing. Detected before any network call.
    #[error("{0} is required")]
    Config(&'static str),
    /// The token endpoint answered with a non-success status.
    #[error("{}", .0.message())]
    TokenExchange(AuthError),
    /// The user-info endpoint answered with a non-success status.
    #[error("failed to fetch user info (HTTP status {0})")]
    UserInfo(u16),
    /// The ID token failed the shallow claim check.
    #[error("invalid ID token")]
    InvalidIdToken,
    #[error("failed to send request")]
    Send,
    #[error("failed to parse response")]
    Parse,
    #[error("failed to parse url")]
    Url,
}
