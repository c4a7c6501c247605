//! Provinces.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Dated;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Province {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub country: String,
    #[serde(default, rename = "addedby")]
    pub added_by: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Dated for Province {
    fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }
}

/// Payload for `POST /province`.
#[derive(Debug, Clone, Serialize)]
pub struct NewProvince {
    pub name: String,
    pub country: String,
}

/// Payload for `PUT /province/{id}`; absent fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ProvinceUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
}
