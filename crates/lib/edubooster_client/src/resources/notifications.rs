//! The admin's own notifications.

use serde::Deserialize;

use crate::error::ClientResult;
use crate::http::ApiRequest;
use crate::interceptor::SessionClient;
use crate::models::{Ack, Notification};
use crate::routes;

#[derive(Deserialize)]
struct NotificationList {
    #[serde(flatten)]
    ack: Ack,
    #[serde(default)]
    notifications: Vec<Notification>,
}

pub struct Notifications {
    client: SessionClient,
}

impl Notifications {
    pub fn new(client: SessionClient) -> Self {
        Self { client }
    }

    /// `GET /notification/me`
    pub async fn list(&self) -> ClientResult<Vec<Notification>> {
        let body: NotificationList = self.client.get_json(routes::GET_NOTIFICATIONS).await?;
        body.ack.ensure()?;
        Ok(body.notifications)
    }

    pub async fn mark_read(&self, id: &str) -> ClientResult<()> {
        let body: Ack = self
            .client
            .send_json(ApiRequest::patch(routes::mark_notification_read(id)))
            .await?;
        body.ensure()
    }
}

pub fn unread(notifications: &[Notification]) -> Vec<&Notification> {
    notifications.iter().filter(|n| !n.read).collect()
}

/// The first `n` unread notifications, in backend order.
pub fn latest_unread(notifications: &[Notification], n: usize) -> Vec<&Notification> {
    notifications.iter().filter(|item| !item.read).take(n).collect()
}
