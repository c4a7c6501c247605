//! Sections CRUD.

use serde::Deserialize;
use tracing::info;

use super::required;
use crate::error::ClientResult;
use crate::http::ApiRequest;
use crate::interceptor::SessionClient;
use crate::models::{Ack, NewSection, Section, SectionUpdate};
use crate::routes;

#[derive(Deserialize)]
struct SectionList {
    #[serde(flatten)]
    ack: Ack,
    #[serde(default)]
    sections: Vec<Section>,
}

#[derive(Deserialize)]
struct SectionEnvelope {
    #[serde(flatten)]
    ack: Ack,
    #[serde(default)]
    section: Option<Section>,
}

pub struct Sections {
    client: SessionClient,
}

impl Sections {
    pub fn new(client: SessionClient) -> Self {
        Self { client }
    }

    /// `GET /section`
    pub async fn list(&self) -> ClientResult<Vec<Section>> {
        let body: SectionList = self.client.get_json(routes::SECTION).await?;
        body.ack.ensure()?;
        Ok(body.sections)
    }

    /// `POST /section/province/`
    pub async fn create(&self, section: &NewSection) -> ClientResult<Section> {
        let request = ApiRequest::post(routes::POST_SECTION).json(section)?;
        let body: SectionEnvelope = self.client.send_json(request).await?;
        body.ack.ensure()?;
        let created = required(body.section, "section")?;
        info!(id = %created.id, name = %created.name, "section created");
        Ok(created)
    }

    /// `PATCH /section/{id}`
    pub async fn update(&self, id: &str, update: &SectionUpdate) -> ClientResult<Section> {
        let request = ApiRequest::patch(routes::section(id)).json(update)?;
        let body: SectionEnvelope = self.client.send_json(request).await?;
        body.ack.ensure()?;
        required(body.section, "section")
    }

    /// `DELETE /section/{id}`
    pub async fn remove(&self, id: &str) -> ClientResult<()> {
        let body: Ack = self
            .client
            .send_json(ApiRequest::delete(routes::section(id)))
            .await?;
        body.ensure()?;
        info!(id, "section removed");
        Ok(())
    }
}
