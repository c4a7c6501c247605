//! Session-refresh interceptor.
//!
//! Every request goes through [`SessionClient::send`]. When the backend
//! answers `401` the client renews the session once via
//! `POST /auth/refresh-token` and re-issues the request. Requests that hit a
//! `401` while a renewal is already in flight wait for that renewal instead
//! of starting their own, then replay once it resolves.
//!
//! States: idle (`refreshing == false`) and refreshing. Transitions:
//!
//! - `401` on a first attempt, idle: become the renewal leader.
//! - `401` on a first attempt, refreshing: queue behind the leader.
//! - `401` on a replay: surfaced to the caller as is, no second renewal.
//! - `403` on the renewal endpoint: forced logout, error surfaced.
//! - anything else: passed through.
//!
//! A failed renewal rejects every queued request with the renewal error and
//! forces a logout. Forced logout is latched so concurrent failure paths
//! navigate only once.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use http::StatusCode;
use serde::de::DeserializeOwned;
use tokio::sync::{Mutex, oneshot};
use tracing::{debug, info, warn};

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};
use crate::http::{ApiRequest, ApiResponse, ReqwestTransport, Transport};
use crate::navigation::Navigator;
use crate::routes;
use crate::session::SessionHandle;

/// Result of a renewal, fanned out to every queued request.
type RenewalOutcome = Result<(), ClientError>;

/// Refresh gate and pending queue. Both only change under the mutex.
#[derive(Default)]
struct RefreshState {
    /// True while exactly one renewal call is outstanding.
    refreshing: bool,
    /// Requests suspended behind the outstanding renewal, in arrival order.
    waiters: Vec<oneshot::Sender<RenewalOutcome>>,
}

/// How the interceptor classified one exchange with the backend.
enum Verdict {
    Pass(ApiResponse),
    Fail(ClientError),
    /// `401` on a non-renewal request.
    Expired(ApiResponse),
}

struct Inner {
    transport: Arc<dyn Transport>,
    navigator: Arc<dyn Navigator>,
    session: SessionHandle,
    config: ClientConfig,
    refresh: Mutex<RefreshState>,
    /// Set by the first forced logout; cleared once a session is re-established.
    logged_out: AtomicBool,
}

/// HTTP client with transparent session renewal.
///
/// Cheap to clone; clones share the transport, the session and the refresh
/// state.
#[derive(Clone)]
pub struct SessionClient {
    inner: Arc<Inner>,
}

impl SessionClient {
    /// Client over the production reqwest transport.
    pub fn new(config: ClientConfig, navigator: Arc<dyn Navigator>) -> ClientResult<Self> {
        let transport = Arc::new(ReqwestTransport::new(config.clone())?);
        Ok(Self::with_transport(config, transport, navigator))
    }

    /// Client over an arbitrary transport.
    pub fn with_transport(
        config: ClientConfig,
        transport: Arc<dyn Transport>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self {
            inner: Arc::new(Inner {
                transport,
                navigator,
                session: SessionHandle::new(),
                config,
                refresh: Mutex::new(RefreshState::default()),
                logged_out: AtomicBool::new(false),
            }),
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.inner.config
    }

    pub fn session(&self) -> &SessionHandle {
        &self.inner.session
    }

    pub(crate) fn navigator(&self) -> &Arc<dyn Navigator> {
        &self.inner.navigator
    }

    /// Send a request, renewing the session once if it has expired.
    ///
    /// Returns the successful response, possibly after a single replay, or
    /// the terminal error. Non-2xx answers become [`ClientError::Status`].
    pub async fn send(&self, request: ApiRequest) -> ClientResult<ApiResponse> {
        match self.inner.exchange(&request).await {
            Verdict::Pass(response) => Ok(response),
            Verdict::Fail(err) => Err(err),
            Verdict::Expired(_) => self.inner.recover(request).await,
        }
    }

    /// Send and decode the JSON body.
    pub async fn send_json<T: DeserializeOwned>(&self, request: ApiRequest) -> ClientResult<T> {
        self.send(request).await?.json()
    }

    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        self.send_json(ApiRequest::get(path)).await
    }

    /// Clear the session and navigate to the entry route.
    ///
    /// Idempotent until a session is re-established: repeated calls neither
    /// navigate again nor disturb the refresh state.
    pub fn force_logout(&self) {
        self.inner.force_logout();
    }

    /// Number of requests waiting on the in-flight renewal.
    pub async fn queued_requests(&self) -> usize {
        self.inner.refresh.lock().await.waiters.len()
    }

    pub async fn is_refreshing(&self) -> bool {
        self.inner.refresh.lock().await.refreshing
    }

    /// Re-arm forced logout once a valid session exists again.
    pub(crate) fn session_established(&self) {
        self.inner.logged_out.store(false, Ordering::Release);
    }
}

impl Inner {
    /// One request/response exchange, classified. Never retries.
    async fn exchange(&self, request: &ApiRequest) -> Verdict {
        match self.transport.execute(request).await {
            Ok(response) => self.intercept(request, response),
            Err(err) => Verdict::Fail(err),
        }
    }

    fn intercept(&self, request: &ApiRequest, response: ApiResponse) -> Verdict {
        if response.status.is_success() {
            return Verdict::Pass(response);
        }

        if request.is_refresh() {
            // The renewal endpoint is never queued or renewed.
            if response.status == StatusCode::FORBIDDEN {
                let message = response
                    .message()
                    .unwrap_or_else(|| "refresh token invalid".into());
                self.force_logout();
                return Verdict::Fail(ClientError::RefreshRejected { message });
            }
            return Verdict::Fail(response.into_status_error());
        }

        if response.status == StatusCode::UNAUTHORIZED {
            return Verdict::Expired(response);
        }

        Verdict::Fail(response.into_status_error())
    }

    /// Renew (or wait for the in-flight renewal), then replay `request` once.
    async fn recover(self: &Arc<Self>, request: ApiRequest) -> ClientResult<ApiResponse> {
        let waiter = {
            let mut state = self.refresh.lock().await;
            if state.refreshing {
                let (tx, rx) = oneshot::channel();
                state.waiters.push(tx);
                debug!(
                    path = %request.path,
                    queued = state.waiters.len(),
                    "renewal in flight, queueing request"
                );
                Some(rx)
            } else {
                state.refreshing = true;
                None
            }
        };

        let outcome = match waiter {
            Some(rx) => rx
                .await
                .unwrap_or_else(|_| Err(ClientError::Internal("renewal abandoned".into()))),
            None => {
                // Detached so the queue is drained even if this caller is dropped.
                let inner = Arc::clone(self);
                match tokio::spawn(async move { inner.renew().await }).await {
                    Ok(outcome) => outcome,
                    Err(join_err) => {
                        let err = ClientError::Internal(format!("renewal task failed: {join_err}"))
                            .renewal();
                        self.settle(Err(err.clone())).await;
                        Err(err)
                    }
                }
            }
        };
        outcome?;

        self.replay(&request).await
    }

    /// Re-issue a request that already went through one renewal.
    async fn replay(&self, request: &ApiRequest) -> ClientResult<ApiResponse> {
        debug!(path = %request.path, "replaying request after renewal");
        match self.exchange(request).await {
            Verdict::Pass(response) => Ok(response),
            Verdict::Fail(err) => Err(err),
            // Already retried once: surface the 401 instead of renewing again.
            Verdict::Expired(response) => Err(response.into_status_error()),
        }
    }

    /// The single renewal call, bounded by the configured timeout.
    async fn renew(self: Arc<Self>) -> RenewalOutcome {
        info!("session expired, renewing");
        let request = ApiRequest::post(routes::POST_AUTH_REFRESH_TOKEN);

        let verdict = match self.config.refresh_timeout {
            Some(limit) => tokio::time::timeout(limit, self.exchange(&request))
                .await
                .unwrap_or(Verdict::Fail(ClientError::RefreshTimedOut(limit))),
            None => self.exchange(&request).await,
        };

        let outcome = match verdict {
            Verdict::Pass(_) => Ok(()),
            Verdict::Fail(err) => Err(err.renewal()),
            Verdict::Expired(response) => Err(response.into_status_error().renewal()),
        };
        self.settle(outcome.clone()).await;
        outcome
    }

    /// Leave the refreshing state and drain the whole queue with `outcome`.
    async fn settle(&self, outcome: RenewalOutcome) {
        let waiters = {
            let mut state = self.refresh.lock().await;
            state.refreshing = false;
            std::mem::take(&mut state.waiters)
        };

        match &outcome {
            Ok(()) => {
                info!(released = waiters.len(), "session renewed");
                self.logged_out.store(false, Ordering::Release);
            }
            Err(err) => {
                warn!(error = %err, rejected = waiters.len(), "session renewal failed");
            }
        }

        // A closed receiver means its caller went away; nothing to deliver.
        for waiter in waiters {
            let _ = waiter.send(outcome.clone());
        }

        if outcome.is_err() {
            self.force_logout();
        }
    }

    fn force_logout(&self) {
        if self.logged_out.swap(true, Ordering::AcqRel) {
            debug!("forced logout already performed");
            return;
        }
        warn!("session expired or invalid, logging out");
        self.session.clear();
        self.navigator
            .navigate(&self.config.session_expired_location());
    }
}
