//! Premium subscriptions and their aggregate stats.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Dated;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SubscriptionStatus {
    Pending,
    Active,
    Failed,
    Paid,
}

impl SubscriptionStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            SubscriptionStatus::Pending => "PENDING",
            SubscriptionStatus::Active => "ACTIVE",
            SubscriptionStatus::Failed => "FAILED",
            SubscriptionStatus::Paid => "PAID",
        }
    }
}

impl std::str::FromStr for SubscriptionStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "PENDING" => Ok(SubscriptionStatus::Pending),
            "ACTIVE" => Ok(SubscriptionStatus::Active),
            "FAILED" => Ok(SubscriptionStatus::Failed),
            "PAID" => Ok(SubscriptionStatus::Paid),
            other => Err(format!("unknown subscription status '{other}'")),
        }
    }
}

/// Subscriber summary embedded in a subscription.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subscriber {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subscription {
    #[serde(rename = "_id")]
    pub id: String,
    pub user: Subscriber,
    #[serde(default)]
    pub client_phone: String,
    pub amount: f64,
    pub currency: String,
    pub status: SubscriptionStatus,
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl Dated for Subscription {
    fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }
}

/// One row of `/subscription/admin/stats`, grouped by status (`_id`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubscriptionStats {
    #[serde(rename = "_id")]
    pub status: String,
    #[serde(rename = "totalCount", default)]
    pub total_count: u64,
    #[serde(rename = "totalRevenueUSD", default)]
    pub total_revenue_usd: f64,
    #[serde(rename = "totalRevenueCDF", default)]
    pub total_revenue_cdf: f64,
}

/// A page of subscriptions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionPage {
    #[serde(default)]
    pub subscriptions: Vec<Subscription>,
    #[serde(default = "first_page")]
    pub current_page: u32,
    #[serde(default = "first_page")]
    pub total_pages: u32,
}

fn first_page() -> u32 {
    1
}

/// Stats rows plus the count of users with an active premium plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionSummary {
    #[serde(default)]
    pub stats: Vec<SubscriptionStats>,
    #[serde(default)]
    pub active_users: u64,
}
