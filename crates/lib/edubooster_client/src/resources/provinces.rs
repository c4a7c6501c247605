//! Provinces CRUD.

use serde::Deserialize;
use tracing::info;

use super::required;
use crate::error::ClientResult;
use crate::http::ApiRequest;
use crate::interceptor::SessionClient;
use crate::models::{Ack, NewProvince, Province, ProvinceUpdate};
use crate::routes;

#[derive(Deserialize)]
struct ProvinceList {
    #[serde(flatten)]
    ack: Ack,
    #[serde(default)]
    provinces: Vec<Province>,
}

#[derive(Deserialize)]
struct ProvinceEnvelope {
    #[serde(flatten)]
    ack: Ack,
    #[serde(default)]
    province: Option<Province>,
}

pub struct Provinces {
    client: SessionClient,
}

impl Provinces {
    pub fn new(client: SessionClient) -> Self {
        Self { client }
    }

    /// `GET /province`
    pub async fn list(&self) -> ClientResult<Vec<Province>> {
        let body: ProvinceList = self.client.get_json(routes::PROVINCE).await?;
        body.ack.ensure()?;
        Ok(body.provinces)
    }

    /// `POST /province`
    pub async fn create(&self, province: &NewProvince) -> ClientResult<Province> {
        let request = ApiRequest::post(routes::PROVINCE).json(province)?;
        let body: ProvinceEnvelope = self.client.send_json(request).await?;
        body.ack.ensure()?;
        let created = required(body.province, "province")?;
        info!(id = %created.id, name = %created.name, "province added");
        Ok(created)
    }

    /// `PUT /province/{id}`
    pub async fn update(&self, id: &str, update: &ProvinceUpdate) -> ClientResult<Province> {
        let request = ApiRequest::put(routes::province(id)).json(update)?;
        let body: ProvinceEnvelope = self.client.send_json(request).await?;
        body.ack.ensure()?;
        required(body.province, "province")
    }

    /// `DELETE /province/{id}`
    pub async fn remove(&self, id: &str) -> ClientResult<()> {
        let body: Ack = self
            .client
            .send_json(ApiRequest::delete(routes::province(id)))
            .await?;
        body.ensure()?;
        info!(id, "province removed");
        Ok(())
    }
}
