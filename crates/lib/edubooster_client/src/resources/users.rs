//! Platform user administration.

use serde::Deserialize;
use tracing::info;

use crate::error::ClientResult;
use crate::http::ApiRequest;
use crate::interceptor::SessionClient;
use crate::models::{Ack, User};
use crate::routes;

#[derive(Deserialize)]
struct UserList {
    #[serde(flatten)]
    ack: Ack,
    #[serde(default)]
    users: Vec<User>,
}

#[derive(Deserialize)]
struct ActiveFlag {
    #[serde(rename = "isActive", default)]
    is_active: bool,
}

#[derive(Deserialize)]
struct ToggleEnvelope {
    #[serde(flatten)]
    ack: Ack,
    user: ActiveFlag,
}

/// Result of toggling a user's active flag.
#[derive(Debug, Clone, PartialEq)]
pub struct ToggleOutcome {
    pub is_active: bool,
    pub message: Option<String>,
}

pub struct Users {
    client: SessionClient,
}

impl Users {
    pub fn new(client: SessionClient) -> Self {
        Self { client }
    }

    /// `GET /users/admin/users/find`
    pub async fn list(&self) -> ClientResult<Vec<User>> {
        let body: UserList = self.client.get_json(routes::GET_USERS).await?;
        body.ack.ensure()?;
        Ok(body.users)
    }

    /// Soft-delete a user.
    pub async fn remove(&self, id: &str) -> ClientResult<()> {
        let body: Ack = self
            .client
            .send_json(ApiRequest::delete(routes::delete_user(id)))
            .await?;
        body.ensure()?;
        info!(id, "user deleted");
        Ok(())
    }

    /// Undo a soft delete.
    pub async fn restore(&self, id: &str) -> ClientResult<()> {
        let body: Ack = self
            .client
            .send_json(ApiRequest::patch(routes::restore_user(id)))
            .await?;
        body.ensure()?;
        info!(id, "user restored");
        Ok(())
    }

    pub async fn toggle_active(&self, id: &str) -> ClientResult<ToggleOutcome> {
        let body: ToggleEnvelope = self
            .client
            .send_json(ApiRequest::patch(routes::toggle_user_active(id)))
            .await?;
        body.ack.ensure()?;
        Ok(ToggleOutcome {
            is_active: body.user.is_active,
            message: body.ack.message,
        })
    }
}

#[cfg(test)]
mod tests {
    use http::Method;
    use serde_json::json;

    use super::*;
    use crate::resources::testing::{Canned, client};

    #[tokio::test]
    async fn list_decodes_users() {
        let transport = Canned::ok(json!({
            "success": true,
            "users": [{"_id": "u1", "email": "eleve@edubooster.org", "isActive": true}]
        }));
        let users = client(transport.clone()).users().list().await.unwrap();
        assert_eq!(users[0].email, "eleve@edubooster.org");
        assert_eq!(
            transport.last(),
            (Method::GET, "/users/admin/users/find".to_string())
        );
    }

    #[tokio::test]
    async fn toggle_active_reports_new_flag() {
        let transport = Canned::ok(json!({
            "user": {"_id": "u1", "isActive": false},
            "message": "Utilisateur désactivé"
        }));
        let outcome = client(transport.clone())
            .users()
            .toggle_active("u1")
            .await
            .unwrap();
        assert_eq!(
            outcome,
            ToggleOutcome {
                is_active: false,
                message: Some("Utilisateur désactivé".into())
            }
        );
        assert_eq!(
            transport.last(),
            (Method::PATCH, "/users/admin/users/u1/toggle-active".to_string())
        );
    }

    #[tokio::test]
    async fn restore_patches_restore_route() {
        let transport = Canned::ok(json!({"success": true}));
        client(transport.clone()).users().restore("u1").await.unwrap();
        assert_eq!(
            transport.last(),
            (Method::PATCH, "/users/users/u1/restore".to_string())
        );
    }

    #[tokio::test]
    async fn remove_deletes_user() {
        let transport = Canned::ok(json!({"success": true}));
        client(transport.clone()).users().remove("u1").await.unwrap();
        assert_eq!(
            transport.last(),
            (Method::DELETE, "/users/users/delete/u1".to_string())
        );
    }
}
