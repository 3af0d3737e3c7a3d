/// Authentication utilities shared by the TaskGate services
///
/// # Modules
///
/// - [`bearer`]: `Authorization` header parsing (`Bearer <token>` or bare `<token>`)
/// - [`token`]: Opaque session token generation and digesting
/// - [`password`]: Argon2id password hashing
/// - [`identity`]: Verified identity and the validate-token wire contract
///
/// # Security Features
///
/// - **Opaque tokens**: 32 bytes from the OS CSPRNG, hex encoded
/// - **Token storage**: Only the SHA-256 digest of a token is kept server side
/// - **Password Hashing**: Argon2id, verification is constant-time

pub mod bearer;
pub mod identity;
pub mod password;
pub mod token;
