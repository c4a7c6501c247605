//! Premium subscriptions: paging, stats and manual activation.

use serde::Deserialize;
use tracing::info;

use crate::error::{ClientError, ClientResult};
use crate::http::ApiRequest;
use crate::interceptor::SessionClient;
use crate::models::{Ack, SubscriptionPage, SubscriptionStatus, SubscriptionSummary};
use crate::routes;

#[derive(Deserialize)]
struct ActivateEnvelope {
    #[serde(flatten)]
    ack: Ack,
    /// Only its presence matters; the user reference may be unpopulated.
    #[serde(default)]
    sub: Option<serde_json::Value>,
}

pub struct Subscriptions {
    client: SessionClient,
}

impl Subscriptions {
    pub fn new(client: SessionClient) -> Self {
        Self { client }
    }

    /// One page of subscriptions, optionally filtered by status.
    pub async fn list(
        &self,
        page: u32,
        status: Option<SubscriptionStatus>,
    ) -> ClientResult<SubscriptionPage> {
        let mut request = ApiRequest::get(routes::GET_SUBSCRIPTIONS).query("page", page.max(1));
        if let Some(status) = status {
            request = request.query("status", status.as_str());
        }
        self.client.send_json(request).await
    }

    /// Per-status aggregates plus the active premium user count.
    pub async fn stats(&self) -> ClientResult<SubscriptionSummary> {
        self.client.get_json(routes::GET_SUBSCRIPTION_STATS).await
    }

    /// Mark a pending subscription as paid and active.
    pub async fn activate(&self, id: &str) -> ClientResult<()> {
        let body: ActivateEnvelope = self
            .client
            .send_json(ApiRequest::patch(routes::activate_subscription(id)))
            .await?;
        body.ack.ensure()?;
        if body.sub.is_none() {
            return Err(ClientError::Rejected(
                body.ack
                    .message
                    .unwrap_or_else(|| "subscription was not activated".into()),
            ));
        }
        info!(id, "subscription activated");
        Ok(())
    }
}
