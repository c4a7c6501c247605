//! Session context: login, logout and the startup session check.

use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::error::{ClientError, ClientResult};
use crate::http::ApiRequest;
use crate::interceptor::SessionClient;
use crate::models::{Credentials, User};
use crate::routes;
use crate::session::{SessionHandle, SessionState};

/// Body of `/auth/me` and `/auth/login`.
#[derive(Debug, Deserialize)]
struct AuthEnvelope {
    #[serde(default)]
    user: Option<User>,
}

/// Single source of truth for who is logged in.
#[derive(Clone)]
pub struct SessionContext {
    client: SessionClient,
}

impl SessionContext {
    pub fn new(client: SessionClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &SessionClient {
        &self.client
    }

    pub fn session(&self) -> &SessionHandle {
        self.client.session()
    }

    /// Ask the backend who is logged in.
    ///
    /// Never fails: any error leaves the session unauthenticated.
    pub async fn check_session(&self) -> SessionState {
        self.session().set_loading();
        match self.client.get_json::<AuthEnvelope>(routes::GET_AUTH_ME).await {
            Ok(AuthEnvelope { user: Some(user) }) => {
                debug!(user = %user.email, "session restored");
                self.establish(user);
            }
            Ok(AuthEnvelope { user: None }) => {
                debug!("session check returned no user");
                self.session().clear();
            }
            Err(e) => {
                debug!(error = %e, "session check failed");
                self.session().clear();
            }
        }
        self.session().snapshot()
    }

    /// Log in and navigate to the home route.
    ///
    /// On failure the session stays unauthenticated and the error is returned
    /// so the caller can show it.
    pub async fn login(&self, credentials: &Credentials) -> ClientResult<User> {
        self.session().set_loading();
        match self.request_login(credentials).await {
            Ok(user) => {
                info!(user = %user.email, "logged in");
                self.establish(user.clone());
                self.client
                    .navigator()
                    .navigate(&self.client.config().home_route);
                Ok(user)
            }
            Err(e) => {
                self.session().clear();
                Err(e)
            }
        }
    }

    /// Log out. The backend call is best-effort; local state is always cleared.
    pub async fn logout(&self) {
        if let Err(e) = self
            .client
            .send(ApiRequest::post(routes::POST_AUTH_LOGOUT))
            .await
        {
            warn!(error = %e, "logout request failed");
        }
        self.session().clear();
        self.client
            .navigator()
            .navigate(&self.client.config().entry_route);
    }

    async fn request_login(&self, credentials: &Credentials) -> ClientResult<User> {
        let request = ApiRequest::post(routes::POST_AUTH_LOGIN).json(credentials)?;
        let envelope: AuthEnvelope = self.client.send_json(request).await?;
        envelope
            .user
            .ok_or_else(|| ClientError::Decode("login response carried no user".into()))
    }

    fn establish(&self, user: User) {
        self.client.session_established();
        self.session().authenticate(user);
    }
}
