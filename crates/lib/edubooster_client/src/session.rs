//! The current session: who is logged in, if anyone.
//!
//! State is published through a `watch` channel so every transition replaces
//! the whole value; readers never observe a half-updated session.

use std::sync::Arc;

use tokio::sync::watch;

use crate::models::User;

/// Session lifecycle.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionState {
    /// Initial state, and while a session check or login is in flight.
    Loading,
    Unauthenticated,
    Authenticated(User),
}

impl SessionState {
    pub fn user(&self) -> Option<&User> {
        match self {
            SessionState::Authenticated(user) => Some(user),
            _ => None,
        }
    }
}

/// Shared handle to the one session of a client instance.
///
/// Views read it; only the session context and the interceptor's forced
/// logout write it.
#[derive(Clone)]
pub struct SessionHandle {
    tx: Arc<watch::Sender<SessionState>>,
}

impl SessionHandle {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(SessionState::Loading);
        Self { tx: Arc::new(tx) }
    }

    /// Current state.
    pub fn snapshot(&self) -> SessionState {
        self.tx.borrow().clone()
    }

    /// Receiver notified on every transition.
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.tx.subscribe()
    }

    pub fn user(&self) -> Option<User> {
        self.tx.borrow().user().cloned()
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(*self.tx.borrow(), SessionState::Authenticated(_))
    }

    pub fn is_loading(&self) -> bool {
        matches!(*self.tx.borrow(), SessionState::Loading)
    }

    pub(crate) fn set_loading(&self) {
        self.tx.send_replace(SessionState::Loading);
    }

    pub(crate) fn authenticate(&self, user: User) {
        self.tx.send_replace(SessionState::Authenticated(user));
    }

    pub(crate) fn clear(&self) {
        self.tx.send_replace(SessionState::Unauthenticated);
    }
}

impl Default for SessionHandle {
    fn default() -> Self {
        Self::new()
    }
}
