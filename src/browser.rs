//! Capabilities supplied by the hosting browser environment.
//!
//! The login controller never touches ambient globals; the session-scoped
//! key-value store and the page's URL/history machinery are injected through
//! these traits so that any host (a wasm page, a server-rendered app, a
//! test) can provide them.

use std::collections::HashMap;

/// A session-scoped key-value store holding the pending state token.
///
/// In a browser this maps onto `sessionStorage`; server-side hosts back it
/// with a cookie-keyed map. Only one pending state exists per store at a
/// time; a later `set` under the same key overwrites the earlier one.
pub trait StateStore {
    fn set(&mut self, key: &str, value: &str);
    fn get(&self, key: &str) -> Option<String>;
    fn remove(&mut self, key: &str);
}

/// The current page's URL and history, plus full-page navigation.
pub trait BrowserPage {
    /// The full URL of the page, including the query string.
    fn current_url(&self) -> String;
    /// Replaces the visible URL without navigating (history replace).
    fn replace_url(&mut self, url: &str);
    /// Performs a full-page navigation. Terminal for the current page.
    fn navigate(&mut self, url: &str);
}

/// In-memory [`StateStore`] for tests and non-browser hosts.
#[derive(Debug, Clone, Default)]
pub struct MemoryStateStore {
    entries: HashMap<String, String>,
}

impl MemoryStateStore {
    pub fn new() -> Self {
        MemoryStateStore::default()
    }
}

impl StateStore for MemoryStateStore {
    fn set(&mut self, key: &str, value: &str) {
        self.entries.insert(key.to_string(), value.to_string());
    }

    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn remove(&mut self, key: &str) {
        self.entries.remove(key);
    }
}

// ==========Tests==========
#[cfg(test)]
mod tests {
    use super::{MemoryStateStore, StateStore};

    #[test]
    fn test_memory_store_set_get_remove() {
        let mut store = MemoryStateStore::new();
        assert!(store.get("k").is_none());

        store.set("k", "v1");
        assert_eq!(store.get("k").as_deref(), Some("v1"));

        store.set("k", "v2");
        assert_eq!(store.get("k").as_deref(), Some("v2"));

        store.remove("k");
        assert!(store.get("k").is_none());
    }
}
