//! Resource services, one per admin entity.
//!
//! Every call goes through the session-aware client, so an expired session
//! is renewed transparently here as everywhere else. Errors are returned to
//! the caller unchanged; [`ClientError::user_message`] gives the wording to
//! show an operator.
//!
//! [`ClientError::user_message`]: crate::error::ClientError::user_message

pub mod courses;
pub mod notifications;
pub mod provinces;
pub mod sections;
pub mod subscriptions;
pub mod users;

pub use courses::{Courses, filter_by_section};
pub use notifications::{Notifications, latest_unread, unread};
pub use provinces::Provinces;
pub use sections::Sections;
pub use subscriptions::Subscriptions;
pub use users::{ToggleOutcome, Users};

use crate::error::{ClientError, ClientResult};
use crate::interceptor::SessionClient;

impl SessionClient {
    pub fn users(&self) -> Users {
        Users::new(self.clone())
    }

    pub fn provinces(&self) -> Provinces {
        Provinces::new(self.clone())
    }

    pub fn sections(&self) -> Sections {
        Sections::new(self.clone())
    }

    pub fn courses(&self) -> Courses {
        Courses::new(self.clone())
    }

    pub fn subscriptions(&self) -> Subscriptions {
        Subscriptions::new(self.clone())
    }

    pub fn notifications(&self) -> Notifications {
        Notifications::new(self.clone())
    }
}

/// Unwrap an entity the backend should have echoed back.
fn required<T>(value: Option<T>, what: &str) -> ClientResult<T> {
    value.ok_or_else(|| ClientError::Decode(format!("response carried no {what}")))
}
