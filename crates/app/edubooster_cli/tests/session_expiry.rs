//! Session expiry as seen from the binary: every resource call answers 401
//! and the renewal endpoint fails, so the run must end on the expiry redirect.

use std::net::SocketAddr;

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use predicates::prelude::*;
use serde_json::json;
use tokio::runtime::Runtime;

const EXPIRED: &str = "redirected to /?message=session_expired";

/// Backend whose access token is always stale and whose renewal answers
/// `refresh_status`.
fn backend(refresh_status: StatusCode) -> (Runtime, SocketAddr) {
    let rt = Runtime::new().expect("runtime");
    let login = post(|| async {
        Json(json!({
            "success": true,
            "user": {
                "_id": "u-admin",
                "email": "admin@edubooster.org",
                "name": "Admin",
                "role": "admin",
                "isActive": true
            }
        }))
    });
    let stale = get(|| async {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({"success": false, "message": "Token expiré"})),
        )
    });
    let refresh = post(move || async move {
        let body = Json(json!({"success": false, "message": "Refresh token invalide"}));
        (refresh_status, body).into_response()
    });
    let api = Router::new()
        .route("/auth/login", login)
        .route("/auth/refresh-token", refresh)
        .route("/province", stale);
    let app = Router::new().nest("/api", api);

    let listener = rt
        .block_on(tokio::net::TcpListener::bind("127.0.0.1:0"))
        .expect("bind");
    let addr = listener.local_addr().expect("local addr");
    rt.spawn(async move {
        axum::serve(listener, app).await.expect("mock backend");
    });
    (rt, addr)
}

fn list_provinces(addr: SocketAddr) -> Command {
    let api_url = format!("http://{addr}/api");
    let mut cmd = cargo_bin_cmd!("edubooster");
    cmd.env_remove("RUST_LOG")
        .env_remove("EDUBOOSTER_EMAIL")
        .env_remove("EDUBOOSTER_PASSWORD")
        .env_remove("EDUBOOSTER_API_URL")
        .args([
            "--api-url",
            api_url.as_str(),
            "--email",
            "admin@edubooster.org",
            "--password",
            "secret",
            "provinces",
            "list",
        ]);
    cmd
}

#[test]
fn rejected_refresh_ends_on_expiry_redirect() {
    let (_rt, addr) = backend(StatusCode::FORBIDDEN);
    list_provinces(addr)
        .assert()
        .code(1)
        .stderr(predicate::str::contains(EXPIRED));
}

#[test]
fn failing_refresh_ends_on_expiry_redirect() {
    let (_rt, addr) = backend(StatusCode::INTERNAL_SERVER_ERROR);
    list_provinces(addr)
        .assert()
        .code(1)
        .stderr(predicate::str::contains(EXPIRED));
}
