//! Google OAuth2 Authorization Code flow, both halves.
//!
//! This library covers the browser-side redirect protocol (authorization
//! URL, anti-CSRF `state` round-trip, callback parsing) and the server-side
//! token work (code exchange, refresh, revocation, profile fetch, shallow
//! ID-token checks) against Google's fixed endpoints.
//! [google document](https://developers.google.com/identity/protocols/oauth2/web-server)
//! # Feature
//! - Generate an anti-CSRF `state` token and the authorization request URL
//! - Persist the pending state in an injected session store and verify it
//!   read-once at callback time
//! - Subscribe to authentication events per login controller instance
//! - Exchange an authorization code for tokens (using reqwest)
//! - Refresh an access token using a refresh token (using reqwest)
//! - Revoke access/refresh tokens, best-effort (using reqwest)
//! - Fetch the authenticated user's profile
//! - Decode an ID token (Base64URLDecode) and shallowly check `aud`/`exp`
//! # Caution
//! - This library is designed for direct communication with Google over HTTPS.
//! - It does **not** validate the `id_token` signature against Google's
//!   published keys; [`id_token::verify_id_token`] checks the audience and
//!   expiry claims only. That is not a production trust decision on its own,
//!   so do not pass the token to other components of your application.
//! - For more details, refer to the
//!   [Google OpenID Connect documentation](https://developers.google.com/identity/openid-connect/openid-connect#obtainuserinfo).
//! # Examples
//! For example usage, see `demos/axum_server.rs` (`cargo run --example axum_server`).
pub mod authorize;
pub mod browser;
pub mod config;
pub mod error;
pub mod event;
pub mod executer;
pub mod flow;
pub mod id_token;
pub mod login;
pub mod nonce;
pub mod refresh_token;
pub mod revoke_token;
pub mod state_token;
pub mod token;
pub mod user_info;
