//! Server-side flow operations: code exchange, refresh, revocation,
//! profile fetch and the full login orchestration.
//!
//! Each operation is one outbound HTTP call awaited to completion; inside
//! [`handle_google_login`] the calls run strictly in sequence and every
//! intermediate error propagates to the caller unmodified. Retry policy, if
//! any, belongs to the caller.

use tracing::debug;

use crate::{
    authorize::Code,
    config::Config,
    error::Error,
    executer::{Executer, RefreshTokenExe, RevokeTokenExe, TokenExchangeExe, UserInfoExe},
    id_token::verify_id_token,
    refresh_token::{RefreshToken, RefreshTokenRequest},
    revoke_token::{RevokeToken, RevokeTokenRequest},
    token::{AccessToken, TokenExchangeRequest, TokenResponse},
    user_info::{UserInfo, UserInfoRequest},
};

/// Tokens and profile returned by a completed login. Snapshots only; the
/// caller persists what it needs.
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    pub tokens: TokenResponse,
    pub user: UserInfo,
}

/// Exchanges an authorization code for tokens at the token endpoint.
///
/// A non-success status becomes [`Error::TokenExchange`] carrying the
/// provider's `error`/`error_description` body.
pub async fn exchange_code_for_token(config: &Config, code: Code) -> Result<TokenResponse, Error> {
    let req = TokenExchangeRequest::new(config, code);
    TokenExchangeExe.execute(&req).await
}

/// Obtains a fresh access token using a refresh token. Same endpoint and
/// error contract as [`exchange_code_for_token`].
pub async fn refresh_access_token(
    config: &Config,
    refresh_token: &RefreshToken,
) -> Result<TokenResponse, Error> {
    let req = RefreshTokenRequest::new(config, refresh_token);
    RefreshTokenExe.execute(&req).await
}

/// Revokes an access or refresh token, best-effort.
///
/// Returns `true` only when the provider confirmed the revocation. Provider
/// rejections and network failures both come back as `false`, never as an
/// error: revocation runs on logout paths that must not be blocked.
pub async fn revoke_token(config: &Config, token: &RevokeToken) -> bool {
    let req = RevokeTokenRequest::new(config, token);
    match RevokeTokenExe.execute(&req).await {
        Ok(status) => status.is_success(),
        Err(e) => {
            debug!("Token revocation failed locally: {}", e);
            false
        }
    }
}

/// Fetches the authenticated user's profile with a bearer access token.
pub async fn get_user_info(config: &Config, access_token: &AccessToken) -> Result<UserInfo, Error> {
    let req = UserInfoRequest::new(config, access_token);
    UserInfoExe.execute(&req).await
}

/// Runs the complete server half of the login: exchange the code, shallowly
/// verify the ID token when one was returned, fetch the profile.
///
/// Fails fast with [`Error::Config`] before any network call when the code
/// or the client credentials are missing, and with
/// [`Error::InvalidIdToken`] when the returned ID token does not pass
/// [`verify_id_token`]. No partial result is ever returned.
pub async fn handle_google_login(config: &Config, code: Code) -> Result<LoginOutcome, Error> {
    if code.value().is_empty() {
        return Err(Error::Config("authorization code"));
    }
    if config.client_id.0.is_empty() {
        return Err(Error::Config("client ID"));
    }
    if config.client_secret.0.is_empty() {
        return Err(Error::Config("client secret"));
    }

    let tokens = exchange_code_for_token(config, code).await?;

    if let Some(id_token) = tokens.id_token() {
        if !verify_id_token(id_token, &config.client_id.0) {
            return Err(Error::InvalidIdToken);
        }
    }

    let user = get_user_info(config, tokens.access_token()).await?;

    Ok(LoginOutcome { tokens, user })
}
