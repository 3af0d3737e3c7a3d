/// Configuration management for the task service
///
/// # Environment Variables
///
/// - `TASKS_HOST`: Host to bind to (default: 0.0.0.0)
/// - `TASKS_PORT`: Port to bind to (default: 5003)
/// - `AUTH_SERVICE_URL`: Auth authority base URL (default: http://127.0.0.1:5001)
/// - `AUTH_TIMEOUT_MS`: Bound on each token validation call (default: 5000)
/// - `DATABASE_URL`: PostgreSQL URL; unset runs on the in-memory store
/// - `DATABASE_MAX_CONNECTIONS`: Pool size (default: 10)
/// - `TASKS_SEED_DEMO_DATA`: Insert demo tasks into an empty store (default: false)
/// - `CORS_ORIGINS`: Comma separated allowed origins (default: *)
/// - `RUST_LOG`: Log filter (default: taskgate_tasks=debug,tower_http=debug)

use serde::{Deserialize, Serialize};
use std::{env, time::Duration};
use taskgate_shared::layers::parse_origins;

/// Complete task service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// HTTP server configuration
    pub api: ApiConfig,

    /// Auth authority client configuration
    pub auth: AuthServiceConfig,

    /// Database configuration; `None` selects the in-memory store
    pub database: Option<DatabaseSettings>,

    /// Insert the demo tasks at startup
    pub seed_demo_data: bool,
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub host: String,

    pub port: u16,

    /// Allowed CORS origins ("*" = permissive)
    pub cors_origins: Vec<String>,
}

/// Where and how to call the auth authority
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthServiceConfig {
    /// Base URL, without the `/validate_token` path
    pub url: String,

    /// Per-call timeout in milliseconds
    pub timeout_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseSettings {
    pub url: String,

    pub max_connections: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api: ApiConfig {
                host: "0.0.0.0".to_string(),
                port: 5003,
                cors_origins: vec!["*".to_string()],
            },
            auth: AuthServiceConfig {
                url: "http://127.0.0.1:5001".to_string(),
                timeout_ms: 5000,
            },
            database: None,
            seed_demo_data: false,
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

        let host = env::var("TASKS_HOST").unwrap_or(defaults.api.host);
        let port = match env::var("TASKS_PORT") {
            Ok(raw) => raw.parse::<u16>()?,
            Err(_) => defaults.api.port,
        };
        let cors_origins = env::var("CORS_ORIGINS")
            .map(|raw| parse_origins(&raw))
            .unwrap_or(defaults.api.cors_origins);

        let auth_url = env::var("AUTH_SERVICE_URL").unwrap_or(defaults.auth.url);
        let timeout_ms = match env::var("AUTH_TIMEOUT_MS") {
            Ok(raw) => raw.parse::<u64>()?,
            Err(_) => defaults.auth.timeout_ms,
        };
        if timeout_ms == 0 {
            anyhow::bail!("AUTH_TIMEOUT_MS must be greater than zero");
        }

        let database = match env::var("DATABASE_URL") {
            Ok(url) if !url.trim().is_empty() => {
                let max_connections = match env::var("DATABASE_MAX_CONNECTIONS") {
                    Ok(raw) => raw.parse::<u32>()?,
                    Err(_) => 10,
                };
                Some(DatabaseSettings {
                    url,
                    max_connections,
                })
            }
            _ => None,
        };

        let seed_demo_data = match env::var("TASKS_SEED_DEMO_DATA") {
            Ok(raw) => raw.parse::<bool>()?,
            Err(_) => defaults.seed_demo_data,
        };

        Ok(Self {
            api: ApiConfig {
                host,
                port,
                cors_origins,
            },
            auth: AuthServiceConfig {
                url: auth_url,
                timeout_ms,
            },
            database,
            seed_demo_data,
        })
    }

    /// Returns the server bind address
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.api.host, self.api.port)
    }

    pub fn auth_timeout(&self) -> Duration {
        Duration::from_millis(self.auth.timeout_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();

        assert_eq!(config.bind_address(), "0.0.0.0:5003");
        assert_eq!(config.auth.url, "http://127.0.0.1:5001");
        assert_eq!(config.auth_timeout(), Duration::from_secs(5));
        assert!(config.database.is_none());
    }
}
