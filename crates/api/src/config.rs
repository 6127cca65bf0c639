use std::path::PathBuf;

use crate::auth::jwt::JwtConfig;

/// Default cap on request bodies (uploads, thumbnails): 20 MiB.
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 20 * 1024 * 1024;

/// Server configuration loaded from environment variables.
///
/// All fields except the JWT secret have defaults suitable for local
/// development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS`.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Root directory of the local file store (default: `storage`).
    pub storage_root: PathBuf,
    /// Maximum accepted request body size in bytes.
    pub max_upload_bytes: usize,
    /// Token validation settings.
    pub jwt: JwtConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                 |
    /// |------------------------|-------------------------|
    /// | `HOST`                 | `0.0.0.0`               |
    /// | `PORT`                 | `3000`                  |
    /// | `CORS_ORIGINS`         | `http://localhost:5173` |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                    |
    /// | `STORAGE_ROOT`         | `storage`               |
    /// | `MAX_UPLOAD_BYTES`     | `20971520`              |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins = parse_origins(
            &std::env::var("CORS_ORIGINS").unwrap_or_else(|_| "http://localhost:5173".into()),
        );

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let storage_root =
            PathBuf::from(std::env::var("STORAGE_ROOT").unwrap_or_else(|_| "storage".into()));

        let max_upload_bytes: usize = std::env::var("MAX_UPLOAD_BYTES")
            .unwrap_or_else(|_| DEFAULT_MAX_UPLOAD_BYTES.to_string())
            .parse()
            .expect("MAX_UPLOAD_BYTES must be a valid usize");

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            storage_root,
            max_upload_bytes,
            jwt: JwtConfig::from_env(),
        }
    }
}

/// Settings for the `glaze-keepalive` binary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeepaliveConfig {
    /// Seconds between database pings (default: 6 hours).
    pub interval_secs: u64,
    /// Ping once and exit instead of looping.
    pub once: bool,
}

/// Default keep-alive interval: six hours.
pub const DEFAULT_KEEPALIVE_INTERVAL_SECS: u64 = 6 * 60 * 60;

impl KeepaliveConfig {
    /// | Env Var                   | Default |
    /// |---------------------------|---------|
    /// | `KEEPALIVE_INTERVAL_SECS` | `21600` |
    /// | `KEEPALIVE_ONCE`          | unset   |
    pub fn from_env() -> Self {
        let interval_secs: u64 = std::env::var("KEEPALIVE_INTERVAL_SECS")
            .unwrap_or_else(|_| DEFAULT_KEEPALIVE_INTERVAL_SECS.to_string())
            .parse()
            .expect("KEEPALIVE_INTERVAL_SECS must be a valid u64");
        assert!(interval_secs > 0, "KEEPALIVE_INTERVAL_SECS must be positive");

        let once = matches!(
            std::env::var("KEEPALIVE_ONCE").as_deref(),
            Ok("1") | Ok("true")
        );

        Self {
            interval_secs,
            once,
        }
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn origins_are_trimmed_and_blank_entries_dropped() {
        assert_eq!(
            parse_origins(" http://a.test , ,http://b.test,"),
            vec!["http://a.test".to_string(), "http://b.test".to_string()]
        );
        assert!(parse_origins("").is_empty());
    }
}
