//! Navigation side effect.
//!
//! The client never renders anything; the only UI effect it performs is
//! sending the operator somewhere (home after login, entry route after a
//! logout). Front ends decide what "navigate" means.

use std::sync::Mutex;

use tracing::info;

/// Destination sink for client-driven navigation.
pub trait Navigator: Send + Sync {
    fn navigate(&self, location: &str);
}

/// Navigator that records the most recent location and logs it.
#[derive(Debug, Default)]
pub struct LogNavigator {
    last: Mutex<Option<String>>,
}

impl LogNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last location navigated to, if any.
    pub fn last_location(&self) -> Option<String> {
        self.last
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

impl Navigator for LogNavigator {
    fn navigate(&self, location: &str) {
        info!(location, "navigate");
        *self
            .last
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(location.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_last_location() {
        let nav = LogNavigator::new();
        assert!(nav.last_location().is_none());
        nav.navigate("/dashboard");
        nav.navigate("/?message=session_expired");
        assert_eq!(
            nav.last_location().as_deref(),
            Some("/?message=session_expired")
        );
    }
}
