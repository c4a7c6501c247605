//! Cookie-authenticated mock of the admin backend, served on an ephemeral
//! port so the real reqwest transport and its cookie store are exercised.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use edubooster_client::{ClientConfig, Navigator, SessionClient, SessionContext};
use serde::Deserialize;
use serde_json::json;

pub const ACCESS_COOKIE: &str = "edu_access";
pub const REFRESH_COOKIE: &str = "edu_refresh";
pub const PASSWORD: &str = "secret";

/// How `/auth/refresh-token` answers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RefreshMode {
    /// Issue a fresh access cookie.
    Renew,
    /// Answer 200 without issuing anything, so replays still get 401.
    Hollow,
    /// Refuse with 403.
    Forbidden,
    /// Never answer within the client's patience.
    Hang,
}

pub struct Backend {
    valid_access: Mutex<Option<String>>,
    refresh_valid: AtomicBool,
    issued: AtomicUsize,
    refresh_mode: Mutex<RefreshMode>,
    refresh_delay: Mutex<Duration>,
    refresh_calls: AtomicUsize,
    hits: Mutex<Vec<String>>,
}

impl Backend {
    fn new() -> Self {
        Self {
            valid_access: Mutex::new(None),
            refresh_valid: AtomicBool::new(false),
            issued: AtomicUsize::new(0),
            refresh_mode: Mutex::new(RefreshMode::Renew),
            refresh_delay: Mutex::new(Duration::ZERO),
            refresh_calls: AtomicUsize::new(0),
            hits: Mutex::new(Vec::new()),
        }
    }

    /// Invalidate the current access cookie.
    pub fn expire(&self) {
        *self.valid_access.lock().unwrap() = None;
    }

    pub fn set_refresh_mode(&self, mode: RefreshMode) {
        *self.refresh_mode.lock().unwrap() = mode;
    }

    pub fn set_refresh_delay(&self, delay: Duration) {
        *self.refresh_delay.lock().unwrap() = delay;
    }

    pub fn refresh_calls(&self) -> usize {
        self.refresh_calls.load(Ordering::SeqCst)
    }

    /// How many times `path` was requested (renewal excluded).
    pub fn hits(&self, path: &str) -> usize {
        self.hits.lock().unwrap().iter().filter(|p| *p == path).count()
    }

    fn issue(&self) -> Cookie<'static> {
        let n = self.issued.fetch_add(1, Ordering::SeqCst);
        let token = format!("access-{n}");
        *self.valid_access.lock().unwrap() = Some(token.clone());
        Cookie::build((ACCESS_COOKIE, token)).path("/").http_only(true).build()
    }

    fn authorized(&self, path: &str, jar: &CookieJar) -> bool {
        self.hits.lock().unwrap().push(path.to_string());
        let valid = self.valid_access.lock().unwrap();
        match (jar.get(ACCESS_COOKIE), valid.as_deref()) {
            (Some(cookie), Some(token)) => cookie.value() == token,
            _ => false,
        }
    }
}

type Shared = Arc<Backend>;

fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({"success": false, "message": "Token expiré"})),
    )
        .into_response()
}

fn admin() -> serde_json::Value {
    json!({
        "_id": "u-admin",
        "email": "admin@edubooster.org",
        "name": "Admin",
        "role": "admin",
        "isActive": true
    })
}

#[derive(Deserialize)]
struct LoginBody {
    email: String,
    password: String,
}

async fn login(State(b): State<Shared>, jar: CookieJar, Json(body): Json<LoginBody>) -> Response {
    if body.email != "admin@edubooster.org" || body.password != PASSWORD {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"success": false, "message": "Email ou mot de passe incorrect."})),
        )
            .into_response();
    }
    let refresh = Cookie::build((REFRESH_COOKIE, "refresh-ok"))
        .path("/")
        .http_only(true)
        .build();
    b.refresh_valid.store(true, Ordering::SeqCst);
    let jar = jar.add(b.issue()).add(refresh);
    (jar, Json(json!({"success": true, "user": admin()}))).into_response()
}

async fn me(State(b): State<Shared>, jar: CookieJar) -> Response {
    if !b.authorized("/auth/me", &jar) {
        return unauthorized();
    }
    Json(json!({"user": admin()})).into_response()
}

async fn refresh_token(State(b): State<Shared>, jar: CookieJar) -> Response {
    b.refresh_calls.fetch_add(1, Ordering::SeqCst);
    let delay = *b.refresh_delay.lock().unwrap();
    let mode = *b.refresh_mode.lock().unwrap();
    if mode == RefreshMode::Hang {
        tokio::time::sleep(Duration::from_secs(30)).await;
    } else if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }

    let has_refresh =
        jar.get(REFRESH_COOKIE).is_some() && b.refresh_valid.load(Ordering::SeqCst);
    match mode {
        RefreshMode::Renew if has_refresh => {
            (jar.add(b.issue()), Json(json!({"success": true}))).into_response()
        }
        RefreshMode::Hollow if has_refresh => Json(json!({"success": true})).into_response(),
        _ => (
            StatusCode::FORBIDDEN,
            Json(json!({"success": false, "message": "Refresh token invalide"})),
        )
            .into_response(),
    }
}

async fn logout(State(b): State<Shared>, jar: CookieJar) -> Response {
    b.expire();
    b.refresh_valid.store(false, Ordering::SeqCst);
    let jar = jar
        .remove(Cookie::build(ACCESS_COOKIE).path("/"))
        .remove(Cookie::build(REFRESH_COOKIE).path("/"));
    (jar, Json(json!({"success": true}))).into_response()
}

async fn provinces(State(b): State<Shared>, jar: CookieJar) -> Response {
    if !b.authorized("/province", &jar) {
        return unauthorized();
    }
    Json(json!({
        "success": true,
        "provinces": [
            {"_id": "p1", "name": "Kinshasa", "country": "RDC", "createdAt": "2025-01-10T09:00:00Z"},
            {"_id": "p2", "name": "Kwilu", "country": "RDC"}
        ]
    }))
    .into_response()
}

async fn remove_province(
    State(b): State<Shared>,
    jar: CookieJar,
    Path(id): Path<String>,
) -> Response {
    if !b.authorized("/province/{id}", &jar) {
        return unauthorized();
    }
    if id == "p1" {
        Json(json!({"success": true})).into_response()
    } else {
        (
            StatusCode::NOT_FOUND,
            Json(json!({"success": false, "message": "Province introuvable"})),
        )
            .into_response()
    }
}

async fn users(State(b): State<Shared>, jar: CookieJar) -> Response {
    if !b.authorized("/users/admin/users/find", &jar) {
        return unauthorized();
    }
    Json(json!({"success": true, "users": [admin()]})).into_response()
}

async fn sections(State(b): State<Shared>, jar: CookieJar) -> Response {
    if !b.authorized("/section", &jar) {
        return unauthorized();
    }
    Json(json!({
        "success": true,
        "sections": [{"_id": "s1", "name": "Scientifique", "provinces": ["p1"]}]
    }))
    .into_response()
}

async fn courses(State(b): State<Shared>, jar: CookieJar) -> Response {
    if !b.authorized("/cours/admin/", &jar) {
        return unauthorized();
    }
    Json(json!({
        "success": true,
        "courses": [
            {"_id": "c1", "title": "Physique", "status": "published", "sections": [{"_id": "s1", "name": "Scientifique"}]},
            {"_id": "c2", "title": "Chimie", "status": "draft"}
        ]
    }))
    .into_response()
}

async fn subscriptions(State(b): State<Shared>, jar: CookieJar) -> Response {
    if !b.authorized("/subscription/admin/all", &jar) {
        return unauthorized();
    }
    Json(json!({
        "subscriptions": [{
            "_id": "sub1",
            "user": {"_id": "u1", "name": "Amani", "email": "amani@example.cd"},
            "amount": 28000,
            "currency": "CDF",
            "status": "ACTIVE"
        }],
        "currentPage": 1,
        "totalPages": 1
    }))
    .into_response()
}

async fn subscription_stats(State(b): State<Shared>, jar: CookieJar) -> Response {
    if !b.authorized("/subscription/admin/stats", &jar) {
        return unauthorized();
    }
    Json(json!({
        "stats": [{"_id": "ACTIVE", "totalCount": 3, "totalRevenueUSD": 30, "totalRevenueCDF": 84000}],
        "activeUsers": 3
    }))
    .into_response()
}

fn router(backend: Shared) -> Router {
    let api = Router::new()
        .route("/auth/login", post(login))
        .route("/auth/me", get(me))
        .route("/auth/refresh-token", post(refresh_token))
        .route("/auth/logout", post(logout))
        .route("/province", get(provinces))
        .route("/province/{id}", delete(remove_province))
        .route("/users/admin/users/find", get(users))
        .route("/section", get(sections))
        .route("/cours/admin/", get(courses))
        .route("/subscription/admin/all", get(subscriptions))
        .route("/subscription/admin/stats", get(subscription_stats));
    Router::new().nest("/api", api).with_state(backend)
}

/// Records every navigation.
#[derive(Default)]
pub struct RecordingNavigator(Mutex<Vec<String>>);

impl RecordingNavigator {
    pub fn locations(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }

    pub fn count(&self, location: &str) -> usize {
        self.0.lock().unwrap().iter().filter(|l| *l == location).count()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, location: &str) {
        self.0.lock().unwrap().push(location.to_string());
    }
}

pub struct Harness {
    pub backend: Shared,
    pub addr: SocketAddr,
    pub nav: Arc<RecordingNavigator>,
    pub ctx: SessionContext,
}

impl Harness {
    pub fn client(&self) -> &SessionClient {
        self.ctx.client()
    }
}

/// Start the mock backend and a client pointed at it.
pub async fn start() -> Harness {
    start_with(|_| {}).await
}

pub async fn start_with(tweak: impl FnOnce(&mut ClientConfig)) -> Harness {
    let backend = Arc::new(Backend::new());
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral port");
    let addr = listener.local_addr().expect("local addr");
    let app = router(backend.clone());
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("mock backend");
    });

    let mut config = ClientConfig::with_base_url(format!("http://{addr}/api"));
    tweak(&mut config);
    let nav = Arc::new(RecordingNavigator::default());
    let client = SessionClient::new(config, nav.clone()).expect("client");
    Harness {
        backend,
        addr,
        nav,
        ctx: SessionContext::new(client),
    }
}

/// Start and log in as the admin.
pub async fn logged_in() -> Harness {
    let harness = start().await;
    harness
        .ctx
        .login(&edubooster_client::models::Credentials::new(
            "admin@edubooster.org",
            PASSWORD,
        ))
        .await
        .expect("login");
    harness
}
