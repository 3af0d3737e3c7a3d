/// Credential and token stores for the auth authority
///
/// Both stores are owned values injected into the router state; there is no
/// global mutable state. Each wraps a `tokio::sync::RwLock<HashMap<..>>` so
/// concurrent register/login/validate/logout calls never lose an insert or
/// a delete.
///
/// # Token keys
///
/// The token store is keyed by the SHA-256 digest of the token value
/// (see [`taskgate_shared::auth::token::digest_token`]). The plaintext token
/// only exists in the login response.
///
/// # Expiration
///
/// There is no background sweep. An expired entry is removed the first time
/// it is looked up at or after its expiration instant.

use chrono::{DateTime, Utc};
use std::collections::HashMap;
use taskgate_shared::auth::token::digest_token;
use tokio::sync::RwLock;

/// A registered user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    /// Sequential user ID, assigned at registration
    pub id: i64,

    /// Unique username
    pub username: String,

    /// Argon2id PHC string
    pub password_hash: String,
}

/// Username already registered
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("username '{0}' already exists")]
pub struct UsernameTaken(pub String);

#[derive(Debug, Default)]
struct Credentials {
    by_username: HashMap<String, User>,
    last_id: i64,
}

/// User identities and password hashes
#[derive(Debug, Default)]
pub struct CredentialStore {
    inner: RwLock<Credentials>,
}

impl CredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a user, assigning the next ID
    ///
    /// The uniqueness check and the insert happen under one write lock.
    pub async fn insert(&self, username: &str, password_hash: String) -> Result<User, UsernameTaken> {
        let mut inner = self.inner.write().await;

        if inner.by_username.contains_key(username) {
            return Err(UsernameTaken(username.to_string()));
        }

        inner.last_id += 1;
        let user = User {
            id: inner.last_id,
            username: username.to_string(),
            password_hash,
        };
        inner.by_username.insert(user.username.clone(), user.clone());

        Ok(user)
    }

    /// Finds a user by exact username
    pub async fn find_by_username(&self, username: &str) -> Option<User> {
        self.inner.read().await.by_username.get(username).cloned()
    }

    pub async fn contains(&self, username: &str) -> bool {
        self.inner.read().await.by_username.contains_key(username)
    }

    /// Number of registered users
    pub async fn len(&self) -> usize {
        self.inner.read().await.by_username.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

/// A live session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenRecord {
    pub user_id: i64,

    pub username: String,

    /// First instant at which the token is no longer accepted
    pub expires_at: DateTime<Utc>,
}

impl TokenRecord {
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

/// Outcome of a token lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenLookup {
    /// Token is live; the entry is untouched
    Valid(TokenRecord),

    /// Token had expired; the entry has now been removed
    Expired,

    /// No such token
    Missing,
}

/// Opaque token to session mapping
#[derive(Debug, Default)]
pub struct TokenStore {
    tokens: RwLock<HashMap<String, TokenRecord>>,
}

impl TokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a session under the digest of `token`
    pub async fn insert(&self, token: &str, record: TokenRecord) {
        self.tokens.write().await.insert(digest_token(token), record);
    }

    /// Looks up a token as of `now`, reaping it if expired
    pub async fn lookup(&self, token: &str, now: DateTime<Utc>) -> TokenLookup {
        let key = digest_token(token);

        // Fast path: live tokens only need the read lock
        {
            let tokens = self.tokens.read().await;
            match tokens.get(&key) {
                None => return TokenLookup::Missing,
                Some(record) if !record.is_expired_at(now) => {
                    return TokenLookup::Valid(record.clone())
                }
                Some(_) => {}
            }
        }

        let mut tokens = self.tokens.write().await;
        match tokens.get(&key) {
            // Reaped by a concurrent lookup between the two locks
            None => TokenLookup::Expired,
            Some(record) if record.is_expired_at(now) => {
                tokens.remove(&key);
                TokenLookup::Expired
            }
            Some(record) => TokenLookup::Valid(record.clone()),
        }
    }

    /// Removes a token, returning its record if it was present
    pub async fn remove(&self, token: &str) -> Option<TokenRecord> {
        self.tokens.write().await.remove(&digest_token(token))
    }

    /// Number of stored tokens, including expired ones not yet reaped
    pub async fn len(&self) -> usize {
        self.tokens.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use std::sync::Arc;

    fn record(expires_at: DateTime<Utc>) -> TokenRecord {
        TokenRecord {
            user_id: 1,
            username: "alice".to_string(),
            expires_at,
        }
    }

    #[tokio::test]
    async fn test_credential_insert_assigns_sequential_ids() {
        let store = CredentialStore::new();

        let alice = store.insert("alice", "h1".into()).await.unwrap();
        let bob = store.insert("bob", "h2".into()).await.unwrap();

        assert_eq!(alice.id, 1);
        assert_eq!(bob.id, 2);
        assert_eq!(store.len().await, 2);
        assert_eq!(store.find_by_username("bob").await, Some(bob));
    }

    #[tokio::test]
    async fn test_credential_insert_rejects_duplicate() {
        let store = CredentialStore::new();
        store.insert("alice", "h1".into()).await.unwrap();

        let err = store.insert("alice", "h2".into()).await.unwrap_err();
        assert_eq!(err, UsernameTaken("alice".to_string()));

        // Original hash is kept
        let alice = store.find_by_username("alice").await.unwrap();
        assert_eq!(alice.password_hash, "h1");
    }

    #[tokio::test]
    async fn test_concurrent_duplicate_registration_inserts_once() {
        let store = Arc::new(CredentialStore::new());

        let handles: Vec<_> = (0..32)
            .map(|i| {
                let store = store.clone();
                tokio::spawn(async move { store.insert("alice", format!("h{}", i)).await })
            })
            .collect();

        let mut successes = 0;
        for handle in handles {
            if handle.await.unwrap().is_ok() {
                successes += 1;
            }
        }

        assert_eq!(successes, 1);
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_token_lookup_valid_is_non_destructive() {
        let store = TokenStore::new();
        let now = Utc::now();
        store.insert("tok", record(now + Duration::seconds(600))).await;

        assert!(matches!(store.lookup("tok", now).await, TokenLookup::Valid(_)));
        assert!(matches!(store.lookup("tok", now).await, TokenLookup::Valid(_)));
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_token_lookup_expired_reaps_then_missing() {
        let store = TokenStore::new();
        let now = Utc::now();
        store.insert("tok", record(now + Duration::seconds(600))).await;

        let later = now + Duration::seconds(600);
        assert_eq!(store.lookup("tok", later).await, TokenLookup::Expired);
        assert_eq!(store.lookup("tok", later).await, TokenLookup::Missing);
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_token_remove() {
        let store = TokenStore::new();
        store.insert("tok", record(Utc::now() + Duration::seconds(60))).await;

        assert!(store.remove("tok").await.is_some());
        assert!(store.remove("tok").await.is_none());
        assert_eq!(store.lookup("tok", Utc::now()).await, TokenLookup::Missing);
    }

    #[tokio::test]
    async fn test_token_store_does_not_keep_plaintext() {
        let store = TokenStore::new();
        store.insert("plaintext-token", record(Utc::now() + Duration::seconds(60))).await;

        let tokens = store.tokens.read().await;
        assert!(!tokens.contains_key("plaintext-token"));
        assert!(tokens.contains_key(&digest_token("plaintext-token")));
    }

    #[tokio::test]
    async fn test_concurrent_inserts_and_removes_are_not_lost() {
        let store = Arc::new(TokenStore::new());
        let expires_at = Utc::now() + Duration::seconds(600);

        let inserts: Vec<_> = (0..100)
            .map(|i| {
                let store = store.clone();
                tokio::spawn(async move { store.insert(&format!("tok-{}", i), record(expires_at)).await })
            })
            .collect();
        for handle in inserts {
            handle.await.unwrap();
        }
        assert_eq!(store.len().await, 100);

        let removes: Vec<_> = (0..50)
            .map(|i| {
                let store = store.clone();
                tokio::spawn(async move { store.remove(&format!("tok-{}", i)).await })
            })
            .collect();
        for handle in removes {
            assert!(handle.await.unwrap().is_some());
        }
        assert_eq!(store.len().await, 50);
    }
}
