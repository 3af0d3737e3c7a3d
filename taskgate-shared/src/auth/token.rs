/// Opaque session tokens
///
/// Tokens carry no structure a client can inspect. The auth authority hands
/// the plaintext value to the client once and keys its store by the SHA-256
/// digest, so a dump of the store cannot be replayed.
///
/// # Token Format
///
/// 32 random bytes from the operating system CSPRNG, hex encoded
/// (64 lowercase hex characters, 256 bits of entropy).
///
/// # Example
///
/// ```
/// use taskgate_shared::auth::token::{digest_token, generate_token, TOKEN_LENGTH};
///
/// let token = generate_token();
/// assert_eq!(token.len(), TOKEN_LENGTH);
///
/// // Digest is deterministic
/// assert_eq!(digest_token(&token), digest_token(&token));
/// ```

use rand::{rngs::OsRng, RngCore};
use sha2::{Digest, Sha256};

/// Number of random bytes in a token
const TOKEN_BYTES: usize = 32;

/// Length of an encoded token (characters)
pub const TOKEN_LENGTH: usize = TOKEN_BYTES * 2;

/// Generates a new opaque token
pub fn generate_token() -> String {
    let mut bytes = [0u8; TOKEN_BYTES];
    OsRng.fill_bytes(&mut bytes);
    hex::encode(bytes)
}

/// SHA-256 digest of a token, hex encoded (64 characters)
///
/// This is the key under which a token is stored.
pub fn digest_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    hex::encode(hasher.finalize())
}
