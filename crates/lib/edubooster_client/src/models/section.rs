//! School sections (tracks) attached to provinces.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Dated;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    /// Populated or bare province references, depending on the endpoint.
    #[serde(default)]
    pub provinces: Vec<serde_json::Value>,
    #[serde(default, rename = "addedby")]
    pub added_by: Option<serde_json::Value>,
    #[serde(default)]
    pub courses: Vec<serde_json::Value>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Dated for Section {
    fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }
}

/// Payload for `POST /section/province/`.
#[derive(Debug, Clone, Serialize)]
pub struct NewSection {
    pub name: String,
    /// Province ids.
    pub provinces: Vec<String>,
}

/// Payload for `PATCH /section/{id}`.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub province_id: Option<String>,
}
