//! Domain models.
//!
//! Shapes follow the backend's JSON: MongoDB `_id` keys and camelCase
//! fields. Optional fields the backend may omit default rather than fail.

pub mod course;
pub mod notification;
pub mod province;
pub mod section;
pub mod subscription;
pub mod user;

pub use course::{Course, CourseStatus, NewCourse, SectionRef};
pub use notification::{Notification, NotificationKind};
pub use province::{NewProvince, Province, ProvinceUpdate};
pub use section::{NewSection, Section, SectionUpdate};
pub use subscription::{
    Subscriber, Subscription, SubscriptionPage, SubscriptionStatus, SubscriptionStats,
    SubscriptionSummary,
};
pub use user::{Credentials, User};

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::error::{ClientError, ClientResult};

/// Anything carrying a creation timestamp; used by the stats buckets.
pub trait Dated {
    fn created_at(&self) -> Option<DateTime<Utc>>;
}

/// Common envelope fields: `{ "success": bool, "message": "..." }`.
///
/// A missing `success` is treated as success; an explicit `false` is a
/// rejection carrying the backend's message.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Ack {
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub message: Option<String>,
}

impl Ack {
    pub fn ensure(&self) -> ClientResult<()> {
        match self.success {
            Some(false) => Err(ClientError::Rejected(
                self.message
                    .clone()
                    .unwrap_or_else(|| "request was not accepted".into()),
            )),
            _ => Ok(()),
        }
    }
}
