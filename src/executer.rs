//! Provides an asynchronous execution framework for sending HTTP requests to
//! the provider.
//!
//! This module:
//! - Defines the `Executer` trait, a unified interface for one awaited HTTP
//!   round-trip per request type.
//! - Implements executers for the token exchange, token refresh, token
//!   revocation and user-info requests.
//!
//! No retries, timeouts or cancellation: a network failure surfaces
//! immediately as the operation's error.

use std::{collections::HashMap, error::Error as StdError, pin::Pin};

use http::StatusCode;
use reqwest::{Client, Url};
use tracing::error;

use crate::{
    error::{AuthError, Error},
    refresh_token::RefreshTokenRequest,
    revoke_token::RevokeTokenRequest,
    token::{TokenExchangeRequest, TokenResponse},
    user_info::{UserInfo, UserInfoRequest},
};

/// Generic asynchronous execution interface for sending HTTP requests.
/// Key components:
/// - `Req`: The request type that the executer will handle.
/// - `Response`: The expected response type.
/// - `Error`: The error type returned on failure.
/// - `Future`: The asynchronous execution result, returning either
///   `Response` or `Error`.
pub trait Executer<'a, Req>
where
    Req: Send,
{
    type Response;
    type Error: StdError;
    type Future: Future<Output = Result<Self::Response, Self::Error>> + Send + 'a;

    fn execute(&'a self, req: &'a Req) -> Self::Future;
}

/// Exchanges a verified authorization code for tokens.
pub struct TokenExchangeExe;

/// Request workflow:
/// 1. Parse the token endpoint URL.
/// 2. POST the form-encoded `authorization_code` grant.
/// 3. On a non-success status, surface the provider's error body.
/// 4. Parse and return the response as `TokenResponse`.
impl<'a> Executer<'a, TokenExchangeRequest> for TokenExchangeExe {
    type Response = TokenResponse;
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send + 'a>>;

    fn execute(&'a self, req: &'a TokenExchangeRequest) -> Self::Future {
        Box::pin(async move {
            let url = Url::parse(req.token_endpoint()).map_err(|e| {
                error!("Failed to parse url: {:?}", e);
                Error::Url
            })?;

            let mut params = HashMap::new();
            params.insert("code", req.code());
            params.insert("client_id", req.client_id());
            params.insert("client_secret", req.client_secret());
            params.insert("redirect_uri", req.redirect_uri());
            params.insert("grant_type", req.grant_type());

            let client = Client::new();
            let res = client
                .post(url)
                .header("Content-Type", "application/x-www-form-urlencoded")
                .form(&params)
                .send()
                .await
                .map_err(|e| {
                    error!("Failed to send request: {:?}", e);
                    Error::Send
                })?;

            let status = res.status();
            if !status.is_success() {
                let provider_err = res.json::<AuthError>().await.unwrap_or_default();
                error!(
                    "Token endpoint returned {}: {:?}",
                    status, provider_err.error
                );
                return Err(Error::TokenExchange(provider_err));
            }
            res.json::<TokenResponse>().await.map_err(|e| {
                error!("Failed to parse JSON: {:?}", e);
                Error::Parse
            })
        })
    }
}

/// Obtains a fresh access token from a refresh token.
pub struct RefreshTokenExe;

/// Request workflow:
/// 1. POST the form-encoded `refresh_token` grant to the token endpoint.
/// 2. On a non-success status, surface the provider's error body.
/// 3. Parse and return the new `TokenResponse`.
impl<'a> Executer<'a, RefreshTokenRequest> for RefreshTokenExe {
    type Response = TokenResponse;
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send + 'a>>;

    fn execute(&'a self, req: &'a RefreshTokenRequest) -> Self::Future {
        Box::pin(async move {
            let mut params = HashMap::new();
            params.insert("refresh_token", req.refresh_token.0.as_str());
            params.insert("client_id", req.client_id.0.as_str());
            params.insert("client_secret", req.client_secret.0.as_str());
            params.insert("grant_type", req.grant_type.as_str());

            let client = Client::new();
            let res = client
                .post(&req.token_endpoint.0)
                .header("Content-Type", "application/x-www-form-urlencoded")
                .form(&params)
                .send()
                .await
                .map_err(|e| {
                    error!("Failed to send request: {:?}", e);
                    Error::Send
                })?;

            let status = res.status();
            if !status.is_success() {
                let provider_err = res.json::<AuthError>().await.unwrap_or_default();
                error!(
                    "Token endpoint returned {}: {:?}",
                    status, provider_err.error
                );
                return Err(Error::TokenExchange(provider_err));
            }
            res.json::<TokenResponse>().await.map_err(|e| {
                error!("Failed to parse JSON: {:?}", e);
                Error::Parse
            })
        })
    }
}

/// Revokes an access token or refresh token.
pub struct RevokeTokenExe;

/// Request workflow:
/// 1. POST the token and its `token_type_hint` to the revocation endpoint.
/// 2. Return the HTTP status code indicating success or failure.
impl<'a> Executer<'a, RevokeTokenRequest> for RevokeTokenExe {
    type Response = StatusCode;
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send + 'a>>;

    fn execute(&'a self, req: &'a RevokeTokenRequest) -> Self::Future {
        Box::pin(async move {
            let mut params = HashMap::new();
            params.insert("token", req.inner_value());
            params.insert("token_type_hint", req.token_type_hint());

            let client = Client::new();
            let status_code = client
                .post(&req.end_point)
                .header("Content-Type", "application/x-www-form-urlencoded")
                .form(&params)
                .send()
                .await
                .map_err(|e| {
                    error!("Failed to send request: {:?}", e);
                    Error::Send
                })?
                .status();
            Ok(status_code)
        })
    }
}

/// Fetches the user's profile with a bearer access token.
pub struct UserInfoExe;

/// Request workflow:
/// 1. GET the user-info endpoint with an `Authorization: Bearer` header.
/// 2. On a non-success status, report it as a user-info failure.
/// 3. Parse and return the response as `UserInfo`.
impl<'a> Executer<'a, UserInfoRequest> for UserInfoExe {
    type Response = UserInfo;
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send + 'a>>;

    fn execute(&'a self, req: &'a UserInfoRequest) -> Self::Future {
        Box::pin(async move {
            let client = Client::new();
            let res = client
                .get(req.end_point())
                .bearer_auth(req.access_token())
                .send()
                .await
                .map_err(|e| {
                    error!("Failed to send request: {:?}", e);
                    Error::Send
                })?;

            let status = res.status();
            if !status.is_success() {
                error!("User-info endpoint returned {}", status);
                return Err(Error::UserInfo(status.as_u16()));
            }
            res.json::<UserInfo>().await.map_err(|e| {
                error!("Failed to parse JSON: {:?}", e);
                Error::Parse
            })
        })
    }
}
