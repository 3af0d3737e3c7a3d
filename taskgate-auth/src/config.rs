/// Configuration management for the auth authority
///
/// # Environment Variables
///
/// - `AUTH_HOST`: Host to bind to (default: 0.0.0.0)
/// - `AUTH_PORT`: Port to bind to (default: 5001)
/// - `AUTH_TOKEN_TTL_SECONDS`: Token lifetime (default: 600, must be > 0)
/// - `AUTH_SEED_DEMO_USERS`: Register `user1`/`user2` at startup (default: false)
/// - `CORS_ORIGINS`: Comma separated allowed origins (default: *)
/// - `RUST_LOG`: Log filter (default: taskgate_auth=debug,tower_http=debug)
///
/// # Example
///
/// ```no_run
/// use taskgate_auth::config::Config;
///
/// # fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// println!("Auth authority will listen on {}", config.bind_address());
/// # Ok(())
/// # }
/// ```

use crate::authority::DEFAULT_TOKEN_TTL_SECONDS;
use serde::{Deserialize, Serialize};
use std::env;
use taskgate_shared::layers::parse_origins;

/// Complete auth authority configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// HTTP server configuration
    pub api: ApiConfig,

    /// Token configuration
    pub token: TokenConfig,

    /// Register the demo accounts at startup
    pub seed_demo_users: bool,
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Host to bind to
    pub host: String,

    /// Port to bind to
    pub port: u16,

    /// Allowed CORS origins ("*" = permissive)
    pub cors_origins: Vec<String>,
}

/// Token configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenConfig {
    /// Lifetime of an issued token in seconds
    pub ttl_seconds: i64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api: ApiConfig {
                host: "0.0.0.0".to_string(),
                port: 5001,
                cors_origins: vec!["*".to_string()],
            },
            token: TokenConfig {
                ttl_seconds: DEFAULT_TOKEN_TTL_SECONDS,
            },
            seed_demo_users: false,
        }
    }
}

impl Config {
    /// Loads configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is present but malformed, or if the
    /// token TTL is not positive.
    pub fn from_env() -> anyhow::Result<Self> {
        // Load .env file if present (for development)
        dotenvy::dotenv().ok();

        let defaults = Self::default();

        let host = env::var("AUTH_HOST").unwrap_or(defaults.api.host);
        let port = match env::var("AUTH_PORT") {
            Ok(raw) => raw.parse::<u16>()?,
            Err(_) => defaults.api.port,
        };

        let ttl_seconds = match env::var("AUTH_TOKEN_TTL_SECONDS") {
            Ok(raw) => raw.parse::<i64>()?,
            Err(_) => defaults.token.ttl_seconds,
        };
        if ttl_seconds <= 0 {
            anyhow::bail!("AUTH_TOKEN_TTL_SECONDS must be greater than zero");
        }

        let seed_demo_users = match env::var("AUTH_SEED_DEMO_USERS") {
            Ok(raw) => raw.parse::<bool>()?,
            Err(_) => defaults.seed_demo_users,
        };

        let cors_origins = env::var("CORS_ORIGINS")
            .map(|raw| parse_origins(&raw))
            .unwrap_or(defaults.api.cors_origins);

        Ok(Self {
            api: ApiConfig {
                host,
                port,
                cors_origins,
            },
            token: TokenConfig { ttl_seconds },
            seed_demo_users,
        })
    }

    /// Returns the server bind address
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.api.host, self.api.port)
    }

    /// Token lifetime as a duration
    pub fn token_ttl(&self) -> chrono::Duration {
        chrono::Duration::seconds(self.token.ttl_seconds)
    }
}
