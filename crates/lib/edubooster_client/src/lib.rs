//! # edubooster_client
//!
//! Session-aware client for the EduBooster admin backend.
//!
//! Requests go through [`SessionClient`], which renews an expired session
//! once for every concurrent caller and replays the requests that were
//! waiting on it. [`SessionContext`] owns login, logout and the startup
//! session check; [`resources`] wraps each admin entity and [`stats`] turns
//! the fetched collections into dashboard figures.

pub mod config;
pub mod context;
pub mod error;
pub mod http;
pub mod interceptor;
pub mod models;
pub mod navigation;
pub mod resources;
pub mod routes;
pub mod session;
pub mod stats;

pub use config::ClientConfig;
pub use context::SessionContext;
pub use error::{ClientError, ClientResult};
pub use http::{ApiRequest, ApiResponse, ReqwestTransport, Transport};
pub use interceptor::SessionClient;
pub use navigation::{LogNavigator, Navigator};
pub use session::{SessionHandle, SessionState};
pub use stats::Dashboard;

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
