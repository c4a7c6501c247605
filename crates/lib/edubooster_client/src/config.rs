//! Client configuration.

use std::time::Duration;

use url::Url;

use crate::error::{ClientError, ClientResult};

/// Production API endpoint.
pub const DEFAULT_BASE_URL: &str = "https://school.edubooster.org/api";

/// Query value attached to the entry route after a forced logout.
pub const SESSION_EXPIRED_MARKER: &str = "session_expired";

/// Renewal timeout applied unless overridden.
pub const DEFAULT_REFRESH_TIMEOUT: Duration = Duration::from_secs(30);

/// Per-request timeout applied by the reqwest transport.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Configuration for the session-aware client.
#[derive(Clone, Debug)]
pub struct ClientConfig {
    /// Base endpoint every request path is appended to (e.g. `https://host/api`).
    pub base_url: String,
    /// Unauthenticated entry route (login screen).
    pub entry_route: String,
    /// Route shown after a successful login.
    pub home_route: String,
    /// Upper bound on a single renewal call. `None` waits indefinitely.
    pub refresh_timeout: Option<Duration>,
    /// Timeout applied to every request by the transport.
    pub request_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.into(),
            entry_route: "/".into(),
            home_route: "/dashboard".into(),
            refresh_timeout: Some(DEFAULT_REFRESH_TIMEOUT),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}

impl ClientConfig {
    /// Config pointing at `base_url` with every other field defaulted.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Reads configuration from environment variables with sensible defaults.
    ///
    /// | Variable                           | Default                              |
    /// |------------------------------------|--------------------------------------|
    /// | `EDUBOOSTER_API_URL`               | `https://school.edubooster.org/api`  |
    /// | `EDUBOOSTER_ENTRY_ROUTE`           | `/`                                  |
    /// | `EDUBOOSTER_HOME_ROUTE`            | `/dashboard`                         |
    /// | `EDUBOOSTER_REFRESH_TIMEOUT_SECS`  | `30` (`0` disables the bound)        |
    /// | `EDUBOOSTER_REQUEST_TIMEOUT_SECS`  | `60`                                 |
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            base_url: std::env::var("EDUBOOSTER_API_URL").unwrap_or(defaults.base_url),
            entry_route: std::env::var("EDUBOOSTER_ENTRY_ROUTE").unwrap_or(defaults.entry_route),
            home_route: std::env::var("EDUBOOSTER_HOME_ROUTE").unwrap_or(defaults.home_route),
            refresh_timeout: match env_secs("EDUBOOSTER_REFRESH_TIMEOUT_SECS") {
                Some(0) => None,
                Some(secs) => Some(Duration::from_secs(secs)),
                None => defaults.refresh_timeout,
            },
            request_timeout: env_secs("EDUBOOSTER_REQUEST_TIMEOUT_SECS")
                .map(Duration::from_secs)
                .unwrap_or(defaults.request_timeout),
        }
    }

    /// Check that the base URL is an absolute http(s) URL.
    pub fn validate(&self) -> ClientResult<()> {
        let url = Url::parse(&self.base_url)?;
        match url.scheme() {
            "http" | "https" => Ok(()),
            other => Err(ClientError::Config(format!(
                "unsupported scheme '{other}' in base URL {}",
                self.base_url
            ))),
        }
    }

    /// Full URL for an API path, keeping the base path prefix (`/api`).
    pub fn endpoint(&self, path: &str) -> String {
        let base = self.base_url.trim_end_matches('/');
        if path.starts_with('/') {
            format!("{base}{path}")
        } else {
            format!("{base}/{path}")
        }
    }

    /// Location navigated to after a forced logout.
    pub fn session_expired_location(&self) -> String {
        format!("{}?message={SESSION_EXPIRED_MARKER}", self.entry_route)
    }
}

fn env_secs(name: &str) -> Option<u64> {
    std::env::var(name).ok()?.trim().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_keeps_api_prefix() {
        let config = ClientConfig::with_base_url("https://school.edubooster.org/api");
        assert_eq!(
            config.endpoint("/province"),
            "https://school.edubooster.org/api/province"
        );
        assert_eq!(
            config.endpoint("cours/admin/"),
            "https://school.edubooster.org/api/cours/admin/"
        );
    }

    #[test]
    fn endpoint_tolerates_trailing_slash_on_base() {
        let config = ClientConfig::with_base_url("http://localhost:8080/api/");
        assert_eq!(
            config.endpoint("/auth/me"),
            "http://localhost:8080/api/auth/me"
        );
    }

    #[test]
    fn session_expired_location_uses_entry_route() {
        let config = ClientConfig::default();
        assert_eq!(config.session_expired_location(), "/?message=session_expired");
    }

    #[test]
    fn validate_rejects_non_http_scheme() {
        let config = ClientConfig::with_base_url("ftp://example.org/api");
        assert!(matches!(config.validate(), Err(ClientError::Config(_))));
    }

    #[test]
    fn validate_rejects_relative_url() {
        let config = ClientConfig::with_base_url("/api");
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_accepts_default() {
        assert!(ClientConfig::default().validate().is_ok());
    }
}
