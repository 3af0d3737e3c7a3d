/// Token lifecycle: register, login, validate, logout
///
/// `AuthAuthority` is the only reader and writer of the credential and
/// token stores. All operations are synchronous from the caller's point of
/// view and never retry.
///
/// # Lifecycle
///
/// ```text
/// login ──> live ──(validate, now < expires_at)──> live
///            │
///            ├──(validate, now >= expires_at)──> reaped ("expired token")
///            └──(logout)──────────────────────> removed
/// ```
///
/// # Example
///
/// ```
/// use taskgate_auth::authority::AuthAuthority;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let authority = AuthAuthority::new(chrono::Duration::seconds(600));
///
/// authority.register("alice", "pw1").await?;
/// let session = authority.login("alice", "pw1").await?;
///
/// let identity = authority.validate_token(Some(&session.token)).await?;
/// assert_eq!(identity.username, "alice");
///
/// authority.logout(Some(&format!("Bearer {}", session.token))).await?;
/// # Ok(())
/// # }
/// ```

use crate::{
    error::{AuthorityError, AuthorityResult},
    store::{CredentialStore, TokenLookup, TokenRecord, TokenStore, User},
};
use chrono::{DateTime, Duration, Utc};
use taskgate_shared::auth::{
    bearer::strip_bearer,
    identity::VerifiedIdentity,
    password,
    token::generate_token,
};
use tracing::{debug, info, warn};

/// Default token lifetime (10 minutes)
pub const DEFAULT_TOKEN_TTL_SECONDS: i64 = 600;

/// Accounts seeded when demo users are enabled
pub const DEMO_USERS: [(&str, &str); 2] = [("user1", "pass1"), ("user2", "pass2")];

/// A freshly issued session
#[derive(Debug, Clone)]
pub struct Session {
    /// Plaintext token; only ever returned here
    pub token: String,

    pub user_id: i64,

    pub username: String,

    pub expires_at: DateTime<Utc>,
}

/// Issues, validates and revokes tokens
#[derive(Debug)]
pub struct AuthAuthority {
    credentials: CredentialStore,
    tokens: TokenStore,
    token_ttl: Duration,
}

impl AuthAuthority {
    /// Creates an authority with empty stores
    ///
    /// A non-positive `token_ttl` falls back to the default so that every
    /// token expires strictly after it is issued.
    pub fn new(token_ttl: Duration) -> Self {
        let token_ttl = if token_ttl <= Duration::zero() {
            Duration::seconds(DEFAULT_TOKEN_TTL_SECONDS)
        } else {
            token_ttl
        };

        Self {
            credentials: CredentialStore::new(),
            tokens: TokenStore::new(),
            token_ttl,
        }
    }

    pub fn token_ttl(&self) -> Duration {
        self.token_ttl
    }

    /// Registers a new user
    ///
    /// # Errors
    ///
    /// - `UsernameTaken` if the username exists
    pub async fn register(&self, username: &str, password: &str) -> AuthorityResult<User> {
        // Fail fast before paying for a hash
        if self.credentials.contains(username).await {
            return Err(crate::store::UsernameTaken(username.to_string()).into());
        }

        let password_hash = run_blocking({
            let password = password.to_string();
            move || password::hash_password(&password)
        })
        .await??;

        let user = self.credentials.insert(username, password_hash).await?;
        info!(user_id = user.id, username = %user.username, "User registered");

        Ok(user)
    }

    /// Verifies credentials and mints a new token
    ///
    /// Every call produces a distinct, independent token; earlier tokens for
    /// the same user stay valid.
    pub async fn login(&self, username: &str, password: &str) -> AuthorityResult<Session> {
        self.login_at(username, password, Utc::now()).await
    }

    /// [`login`](Self::login) with an explicit issue instant
    pub async fn login_at(
        &self,
        username: &str,
        password: &str,
        now: DateTime<Utc>,
    ) -> AuthorityResult<Session> {
        let user = self.credentials.find_by_username(username).await;

        let verified = run_blocking({
            let password = password.to_string();
            let hash = user.as_ref().map(|u| u.password_hash.clone());
            move || match hash {
                Some(hash) => password::verify_password(&password, &hash),
                None => Ok(password::verify_dummy(&password)),
            }
        })
        .await??;

        let user = match user {
            Some(user) if verified => user,
            _ => {
                warn!(username = %username, "Login failed: invalid credentials");
                return Err(AuthorityError::InvalidCredentials);
            }
        };

        let token = generate_token();
        let expires_at = now + self.token_ttl;
        self.tokens
            .insert(
                &token,
                TokenRecord {
                    user_id: user.id,
                    username: user.username.clone(),
                    expires_at,
                },
            )
            .await;

        info!(user_id = user.id, %expires_at, "Token issued");

        Ok(Session {
            token,
            user_id: user.id,
            username: user.username,
            expires_at,
        })
    }

    /// Checks a token without consuming it
    ///
    /// Accepts the value with or without a `Bearer ` prefix.
    pub async fn validate_token(&self, token: Option<&str>) -> AuthorityResult<VerifiedIdentity> {
        self.validate_token_at(token, Utc::now()).await
    }

    /// [`validate_token`](Self::validate_token) as of `now`
    pub async fn validate_token_at(
        &self,
        token: Option<&str>,
        now: DateTime<Utc>,
    ) -> AuthorityResult<VerifiedIdentity> {
        let token = strip_bearer(token.ok_or(AuthorityError::MissingToken)?);
        if token.is_empty() {
            return Err(AuthorityError::InvalidToken);
        }

        match self.tokens.lookup(token, now).await {
            TokenLookup::Valid(record) => {
                debug!(user_id = record.user_id, "Token validated");
                Ok(VerifiedIdentity {
                    user_id: record.user_id,
                    username: record.username,
                })
            }
            TokenLookup::Expired => {
                info!("Expired token reaped on validation");
                Err(AuthorityError::ExpiredToken)
            }
            TokenLookup::Missing => {
                debug!("Unknown token presented for validation");
                Err(AuthorityError::InvalidToken)
            }
        }
    }

    /// Revokes a token
    pub async fn logout(&self, token: Option<&str>) -> AuthorityResult<()> {
        let token = strip_bearer(token.ok_or(AuthorityError::MissingToken)?);

        match self.tokens.remove(token).await {
            Some(record) => {
                info!(user_id = record.user_id, "Token revoked");
                Ok(())
            }
            None => Err(AuthorityError::TokenNotFound),
        }
    }

    /// Number of stored tokens (expired ones count until reaped)
    pub async fn active_tokens(&self) -> usize {
        self.tokens.len().await
    }

    pub async fn registered_users(&self) -> usize {
        self.credentials.len().await
    }

    /// Registers [`DEMO_USERS`], skipping any that already exist
    pub async fn seed_demo_users(&self) -> AuthorityResult<()> {
        for (username, password) in DEMO_USERS {
            match self.register(username, password).await {
                Ok(_) | Err(AuthorityError::UsernameTaken(_)) => {}
                Err(e) => return Err(e),
            }
        }
        Ok(())
    }
}

/// Runs CPU-bound password work off the async executor
async fn run_blocking<F, T>(f: F) -> AuthorityResult<T>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| AuthorityError::Worker(e.to_string()))
}
