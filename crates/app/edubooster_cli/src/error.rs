use edubooster_client::ClientError;
use thiserror::Error;

pub type Result<T> = core::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("{}", .0)]
    Custom(String),

    #[error("IO::{:?}: {}", .0, .0)]
    Io(#[from] std::io::Error),

    #[error("Json::{:?}: {}", .0, .0)]
    Json(#[from] serde_json::Error),

    #[error("{}", .0)]
    Client(#[from] ClientError),

    #[error("Logging: {}", .0)]
    Logging(String),

    #[error("not logged in: pass --email and --password (or EDUBOOSTER_EMAIL / EDUBOOSTER_PASSWORD)")]
    NotLoggedIn,

    #[error("session expired, redirected to {location}")]
    SessionExpired { location: String },
}
