//! The browser-side login controller.
//!
//! Owns one pending-state slot (via an injected [`StateStore`]), the page
//! capability used for the redirect, and an instance-scoped set of event
//! subscribers. One controller handles one login flow at a time: a second
//! `login` call overwrites the pending state of the first before its
//! callback arrives. That is the accepted single-flow limitation of the
//! `state` protocol, not something the controller works around.

use url::Url;

use crate::{
    authorize::{AuthorizationResult, AuthorizeRequest, CallbackParams, Code},
    browser::{BrowserPage, StateStore},
    config::{Config, Overrides},
    error::{AuthError, Error},
    event::{AuthEvent, Subscribers, Subscription},
    state_token::StateToken,
};

/// Fixed key under which the pending state lives in the session store.
pub const STATE_STORAGE_KEY: &str = "google_oauth2_state";

/// Drives the redirect half of the Authorization Code flow.
///
/// # Example
/// ```rust
/// use google_oauth2_flow::{
///     browser::MemoryStateStore, config::{Config, Overrides}, login::LoginController,
/// };
/// # use google_oauth2_flow::browser::BrowserPage;
/// # #[derive(Default)]
/// # struct Page(String);
/// # impl BrowserPage for Page {
/// #     fn current_url(&self) -> String { self.0.clone() }
/// #     fn replace_url(&mut self, url: &str) { self.0 = url.to_string(); }
/// #     fn navigate(&mut self, url: &str) { self.0 = url.to_string(); }
/// # }
///
/// let config = Config::builder()
///     .client_id("your-client-id")
///     .redirect_uri("https://your-app.com/callback")
///     .build();
/// let mut controller = LoginController::new(config, MemoryStateStore::new(), Page::default());
/// controller.login(&Overrides::new()).unwrap();
/// ```
pub struct LoginController<S, P>
where
    S: StateStore,
    P: BrowserPage,
{
    config: Config,
    store: S,
    page: P,
    subscribers: Subscribers,
}

impl<S, P> LoginController<S, P>
where
    S: StateStore,
    P: BrowserPage,
{
    pub fn new(config: Config, store: S, page: P) -> Self {
        Self {
            config,
            store,
            page,
            subscribers: Subscribers::default(),
        }
    }

    /// Starts the authorization flow: merges `overrides` over the base
    /// configuration, validates it, persists the state token under
    /// [`STATE_STORAGE_KEY`] and navigates to the authorization URL.
    ///
    /// Navigation is terminal for the page, so there is nothing meaningful
    /// to return on success. Fails with [`Error::Config`] before any side
    /// effect when `client_id` or `redirect_uri` is missing.
    pub fn login(&mut self, overrides: &Overrides) -> Result<(), Error> {
        let merged = self.config.merged(overrides);
        if merged.client_id.0.is_empty() {
            return Err(Error::Config("Google OAuth2 client ID"));
        }
        if merged.redirect_uri.0.is_empty() {
            return Err(Error::Config("redirect URI"));
        }

        let state = match &merged.state {
            Some(value) => StateToken::from_value(value),
            None => StateToken::generate(),
        };
        let url = AuthorizeRequest::new(&merged, &state).into_url()?;

        self.store.set(STATE_STORAGE_KEY, state.value());
        self.page.navigate(&url);
        Ok(())
    }

    /// Processes the provider's redirect back to the page.
    ///
    /// Outcomes:
    /// - `error` query parameter present: one `Error` event is emitted and
    ///   `None` returned. The stored state is not consulted.
    /// - `code` or `state` missing: `None`, silently. The page is simply not
    ///   (yet) a callback.
    /// - returned state does not match the pending one: one `state_mismatch`
    ///   error event, `None`.
    /// - match: the verified code/state pair.
    ///
    /// Whenever the URL is readable, its query string is removed via a
    /// history replace before anything else is decided, so the code cannot
    /// leak through a refresh or a shared link. The pending state is
    /// removed from the store the moment it is read; a replayed callback in
    /// the same session compares against nothing and fails.
    pub fn handle_callback(&mut self) -> Option<AuthorizationResult> {
        let url = match Url::parse(&self.page.current_url()) {
            Ok(url) => url,
            Err(_) => return None,
        };
        let params = CallbackParams::from_url(&url);

        let mut stripped = url;
        stripped.set_query(None);
        stripped.set_fragment(None);
        self.page.replace_url(stripped.as_str());

        if let Some(error) = params.error {
            self.subscribers.emit(&AuthEvent::Error(AuthError {
                error,
                error_description: params
                    .error_description
                    .or_else(|| Some("Authentication error".to_string())),
            }));
            return None;
        }

        let (code, state) = match (params.code, params.state) {
            (Some(code), Some(state)) => (code, state),
            _ => return None,
        };

        // Read-once: remove before comparing, so the same pending state can
        // never satisfy two callbacks.
        let stored = self.store.get(STATE_STORAGE_KEY);
        self.store.remove(STATE_STORAGE_KEY);
        if stored.as_deref() != Some(state.as_str()) {
            self.subscribers.emit(&AuthEvent::Error(AuthError::new(
                "state_mismatch",
                "State parameter does not match",
            )));
            return None;
        }

        Some(AuthorizationResult {
            code: Code::from(code),
            state,
        })
    }

    /// Registers a listener for [`AuthEvent`]s. Listeners run synchronously
    /// in subscription order.
    pub fn subscribe(&mut self, listener: impl Fn(&AuthEvent) + 'static) -> Subscription {
        self.subscribers.add(Box::new(listener))
    }

    /// Removes a previously registered listener. Returns whether it was
    /// still registered.
    pub fn unsubscribe(&mut self, subscription: Subscription) -> bool {
        self.subscribers.remove(subscription)
    }

    /// Broadcasts an event to the current listeners. The controller emits
    /// `Error` events itself; hosts use this to announce `SignedIn`,
    /// `SignedOut` and `TokenRefreshed` once the server-side steps finish.
    pub fn emit(&self, event: &AuthEvent) {
        self.subscribers.emit(event);
    }
}
