/// Configuration management for the gateway
///
/// # Environment Variables
///
/// - `GATEWAY_HOST`: Host to bind to (default: 127.0.0.1)
/// - `GATEWAY_PORT`: Port to bind to (default: 5000)
/// - `AUTH_SERVICE_URL`: Auth authority (default: http://127.0.0.1:5001)
/// - `USER_SERVICE_URL`: User service (default: http://127.0.0.1:5002)
/// - `TASK_SERVICE_URL`: Task service (default: http://127.0.0.1:5003)
/// - `UPSTREAM_TIMEOUT_MS`: Bound on each forwarded request (default: 30000)
/// - `CORS_ORIGINS`: Comma separated allowed origins (default: *)
/// - `RUST_LOG`: Log filter (default: taskgate_gateway=debug,tower_http=debug)

use crate::proxy::UpstreamUrls;
use serde::{Deserialize, Serialize};
use std::{env, time::Duration};
use taskgate_shared::layers::parse_origins;

/// Complete gateway configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub api: ApiConfig,

    pub upstreams: UpstreamConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub host: String,

    pub port: u16,

    /// Allowed CORS origins ("*" = permissive)
    pub cors_origins: Vec<String>,
}

/// Upstream base URLs and timeout
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpstreamConfig {
    pub auth_url: String,

    pub user_url: String,

    pub task_url: String,

    pub timeout_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api: ApiConfig {
                host: "127.0.0.1".to_string(),
                port: 5000,
                cors_origins: vec!["*".to_string()],
            },
            upstreams: UpstreamConfig {
                auth_url: "http://127.0.0.1:5001".to_string(),
                user_url: "http://127.0.0.1:5002".to_string(),
                task_url: "http://127.0.0.1:5003".to_string(),
                timeout_ms: 30_000,
            },
        }
    }
}

impl Config {
    /// Loads configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is present but malformed.
    pub fn from_env() -> anyhow::Result<Self> {
        // Load .env file if present (for development)
        dotenvy::dotenv().ok();

        let defaults = Self::default();

        let host = env::var("GATEWAY_HOST").unwrap_or(defaults.api.host);
        let port = match env::var("GATEWAY_PORT") {
            Ok(raw) => raw.parse::<u16>()?,
            Err(_) => defaults.api.port,
        };
        let cors_origins = env::var("CORS_ORIGINS")
            .map(|raw| parse_origins(&raw))
            .unwrap_or(defaults.api.cors_origins);

        let timeout_ms = match env::var("UPSTREAM_TIMEOUT_MS") {
            Ok(raw) => raw.parse::<u64>()?,
            Err(_) => defaults.upstreams.timeout_ms,
        };
        if timeout_ms == 0 {
            anyhow::bail!("UPSTREAM_TIMEOUT_MS must be greater than zero");
        }

        Ok(Self {
            api: ApiConfig {
                host,
                port,
                cors_origins,
            },
            upstreams: UpstreamConfig {
                auth_url: env::var("AUTH_SERVICE_URL").unwrap_or(defaults.upstreams.auth_url),
                user_url: env::var("USER_SERVICE_URL").unwrap_or(defaults.upstreams.user_url),
                task_url: env::var("TASK_SERVICE_URL").unwrap_or(defaults.upstreams.task_url),
                timeout_ms,
            },
        })
    }

    /// Returns the server bind address
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.api.host, self.api.port)
    }

    pub fn upstream_timeout(&self) -> Duration {
        Duration::from_millis(self.upstreams.timeout_ms)
    }

    pub fn upstream_urls(&self) -> UpstreamUrls {
        UpstreamUrls {
            auth: self.upstreams.auth_url.clone(),
            users: self.upstreams.user_url.clone(),
            tasks: self.upstreams.task_url.clone(),
        }
    }
}
