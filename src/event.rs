//! Authentication events and their subscriber registry.
//!
//! Events are fire-and-forget: dispatch is synchronous, in subscription
//! order, with no queuing or replay. Each listener runs isolated, so one
//! panicking listener cannot starve the ones registered after it.

use std::panic::{AssertUnwindSafe, catch_unwind};

use tracing::error;

use crate::error::AuthError;

/// An authentication lifecycle event.
///
/// The login controller emits `Error` events itself (provider-redirect
/// errors and state mismatches); hosts broadcast the remaining variants
/// through [`LoginController::emit`](crate::login::LoginController::emit)
/// once the server-side steps complete.
#[derive(Debug, Clone, PartialEq)]
pub enum AuthEvent {
    SignedIn,
    SignedOut,
    TokenRefreshed,
    Error(AuthError),
}

/// Handle returned by `subscribe`, used to remove the listener again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Subscription(pub(crate) u64);

type Listener = Box<dyn Fn(&AuthEvent)>;

/// Insertion-ordered listener registry owned by one login controller.
#[derive(Default)]
pub(crate) struct Subscribers {
    entries: Vec<(u64, Listener)>,
    next_id: u64,
}

impl Subscribers {
    pub(crate) fn add(&mut self, listener: Listener) -> Subscription {
        let id = self.next_id;
        self.next_id += 1;
        self.entries.push((id, listener));
        Subscription(id)
    }

    pub(crate) fn remove(&mut self, subscription: Subscription) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(id, _)| *id != subscription.0);
        self.entries.len() != before
    }

    /// Notifies every listener in subscription order. A panicking listener
    /// is caught and logged; the remaining listeners still run.
    pub(crate) fn emit(&self, event: &AuthEvent) {
        for (_, listener) in &self.entries {
            if catch_unwind(AssertUnwindSafe(|| listener(event))).is_err() {
                error!("auth event listener panicked, continuing with remaining listeners");
            }
        }
    }
}

// ==========Tests==========
#[cfg(test)]
mod tests {
    use std::{cell::RefCell, rc::Rc};

    use crate::error::AuthError;

    use super::{AuthEvent, Subscribers};

    #[test]
    fn test_emit_in_subscription_order() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut subs = Subscribers::default();

        let first = Rc::clone(&seen);
        subs.add(Box::new(move |_| first.borrow_mut().push("first")));
        let second = Rc::clone(&seen);
        subs.add(Box::new(move |_| second.borrow_mut().push("second")));

        subs.emit(&AuthEvent::SignedIn);
        assert_eq!(*seen.borrow(), vec!["first", "second"]);
    }

    #[test]
    fn test_remove_stops_delivery() {
        let seen = Rc::new(RefCell::new(0));
        let mut subs = Subscribers::default();

        let counter = Rc::clone(&seen);
        let subscription = subs.add(Box::new(move |_| *counter.borrow_mut() += 1));

        subs.emit(&AuthEvent::SignedOut);
        assert!(subs.remove(subscription));
        subs.emit(&AuthEvent::SignedOut);

        assert_eq!(*seen.borrow(), 1);
        // a second removal of the same handle is a no-op
        assert!(!subs.remove(subscription));
    }

    #[test]
    fn test_panicking_listener_does_not_block_later_ones() {
        let seen = Rc::new(RefCell::new(0));
        let mut subs = Subscribers::default();

        subs.add(Box::new(|_| panic!("listener failure")));
        let counter = Rc::clone(&seen);
        subs.add(Box::new(move |_| *counter.borrow_mut() += 1));

        subs.emit(&AuthEvent::Error(AuthError::new("error", "boom")));
        assert_eq!(*seen.borrow(), 1);
    }
}
