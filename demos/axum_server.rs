// In Google Cloud console
// Set
// - Redirect_url: http://localhost/auth/callback
// - Host: http://localhost
// And then you will get client_secret.json file from google.
// Set .env file
// ```.env
// client_id="your_client_id"
// client_secret="your_client_secret"
// redirect_uri="http://localhost/auth/callback"
// ```
// finally ```cargo run --example axum_server```
use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use anyhow::Context;
use axum::{
    Json, Router,
    extract::{Request, State},
    response::{IntoResponse, Redirect},
    routing::{get, post},
};
use axum_extra::extract::{CookieJar, cookie::Cookie};
use google_oauth2_flow::{
    authorize::{AuthorizeRequest, CallbackParams, Code},
    config::{Config, ConfigBuilder},
    flow::{handle_google_login, refresh_access_token, revoke_token},
    refresh_token::RefreshToken,
    revoke_token::RevokeToken,
    state_token::StateToken,
};
use http::{StatusCode, header::HOST};
use serde::Deserialize;
use tracing::error;
use uuid::Uuid;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Log settings
    tracing_subscriber::fmt::init();

    // Read environment; endpoints default to Google's published URLs
    let client_id = read_env("client_id")?;
    let client_secret = read_env("client_secret")?;
    let redirect_uri = read_env("redirect_uri")?;

    // Build Config
    let config = ConfigBuilder::new()
        .client_id(&client_id)
        .client_secret(&client_secret)
        .redirect_uri(&redirect_uri)
        .scope(&["openid", "email", "profile"])
        .build();

    // application state that holds Config and the pending state tokens
    let app_state = AppState::new(config);
    // Binding listener
    let listener = tokio::net::TcpListener::bind("0.0.0.0:80").await.unwrap();
    // Settings Router
    // '/auth/callback': A path that is set in google console
    // '/': A path to start auth (shows the Google login window)
    let app = Router::new()
        .route("/auth/callback", get(call_back))
        .route("/", get(start_auth))
        .route("/revoke", post(revoke))
        .route("/refresh", post(refresh))
        .with_state(Arc::new(app_state));

    axum::serve(listener, app).await.unwrap();
    anyhow::Ok(())
}

static COOKIE_KEY: &str = "pending_state";

async fn start_auth(
    State(app_state): State<Arc<AppState>>,
    jar: CookieJar,
) -> Result<impl IntoResponse, StatusCode> {
    // Generate a state token for each login attempt
    let state = StateToken::generate();

    // The cookie holds an opaque key; the state value itself stays
    // server-side (in memory here, Redis in production)
    let state_key = Uuid::new_v4().to_string();
    let cookie = Cookie::new(COOKIE_KEY, state_key.clone());
    {
        app_state
            .pending
            .lock()
            .unwrap()
            .insert(state_key, state.value().to_string());
    }

    // Construct the authorization URL from config and state
    let url = AuthorizeRequest::new(&app_state.config, &state)
        .into_url()
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;
    Ok((jar.add(cookie), Redirect::to(&url)))
}

async fn call_back(
    State(app_state): State<Arc<AppState>>,
    jar: CookieJar,
    req: Request,
) -> Result<impl IntoResponse, StatusCode> {
    // CallbackParams::parse needs the full url
    // https://localhost/...
    // So, get HOST from the header and the path from the request
    let host = req
        .headers()
        .get(HOST)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("localhost");
    let path = req
        .uri()
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or("/");
    let scheme = "http";
    let full_url = format!("{}://{}{}", scheme, host, path);

    let params = CallbackParams::parse(&full_url).map_err(|e| {
        error!("Failed to parse callback url: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;
    let (code, state) = match (params.code(), params.state()) {
        (Some(code), Some(state)) => (code.to_string(), state.to_string()),
        _ => return Err(StatusCode::BAD_REQUEST),
    };

    // Look up the pending state for this browser session, read-once
    let cookie = jar.get(COOKIE_KEY).ok_or(StatusCode::BAD_REQUEST)?;
    let stored = {
        // This block for early unlock
        let mut lock = app_state.pending.lock().unwrap();
        lock.remove(cookie.value())
    };
    if stored.as_deref() != Some(state.as_str()) {
        return Err(StatusCode::BAD_REQUEST);
    }

    // Exchange, verify the ID token, fetch the profile
    let outcome = handle_google_login(&app_state.config, Code::new(&code))
        .await
        .map_err(|e| {
            error!("Login failed: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        })?;
    println!("{:#?}", outcome.tokens);
    Ok((StatusCode::OK, Json(outcome.user)))
}

async fn revoke(
    State(app_state): State<Arc<AppState>>,
    Json(token): Json<Token>,
) -> impl IntoResponse {
    let token = RevokeToken::new_access_token(&token.token);
    let revoked = revoke_token(&app_state.config, &token).await;
    (StatusCode::OK, Json(revoked))
}

// Refresh token handler
async fn refresh(
    State(app_state): State<Arc<AppState>>,
    Json(token): Json<Token>,
) -> Result<impl IntoResponse, StatusCode> {
    // get refresh_token from json
    // this is a demo
    // Recommend getting the refresh_token from a secure database in production code
    let refresh_token = RefreshToken::new(&token.token);
    let res = refresh_access_token(&app_state.config, &refresh_token)
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;
    Ok((StatusCode::OK, Json(res)))
}

// Get env from .env file
fn read_env(key: &str) -> anyhow::Result<String> {
    dotenvy::var(key).context("Failed to read env")
}

#[derive(Debug, Clone)]
struct AppState {
    config: Config,
    pending: Arc<Mutex<HashMap<String, String>>>,
}

impl AppState {
    fn new(config: Config) -> Self {
        Self {
            config,
            pending: Arc::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
struct Token {
    token: String,
}
