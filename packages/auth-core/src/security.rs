use std::time::Duration;

use jsonwebtoken::Algorithm;

/// Default access token lifetime (one hour).
pub const DEFAULT_TOKEN_TTL: Duration = Duration::from_secs(3600);

/// Security settings shared by token issuance and verification.
///
/// Loaded once at startup and injected wherever tokens are handled; core
/// logic never reads the secret from ambient global state. Both services
/// must be configured with the identical secret or verification fails.
#[derive(Debug, Clone)]
pub struct SecurityConfig {
    /// Symmetric secret used for signing and verifying tokens
    pub jwt_secret: Vec<u8>,
    /// Signing algorithm (pinned to HS256)
    pub algorithm: Algorithm,
    /// Lifetime applied to every issued token
    pub token_ttl: Duration,
}

impl SecurityConfig {
    pub fn new(jwt_secret: impl Into<Vec<u8>>, token_ttl: Duration) -> Self {
        Self {
            jwt_secret: jwt_secret.into(),
            algorithm: Algorithm::HS256,
            token_ttl,
        }
    }
}
