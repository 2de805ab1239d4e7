//! Token codec: mint and verify HS256 access tokens.

use std::time::{SystemTime, UNIX_EPOCH};

use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::claims::{AccessClaims, Role};
use crate::security::SecurityConfig;

/// Wire-format claims embedded in the signed token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject identifier (users.user_id)
    pub sub: String,
    pub role: Role,
    /// Expiry (seconds since epoch); always set at issuance
    pub exp: i64,
}

/// Distinguished token verification failures. All of them map to the same
/// generic unauthenticated response; the distinction exists for logs.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("malformed token")]
    Malformed,
    #[error("invalid token signature")]
    InvalidSignature,
    #[error("token expired")]
    Expired,
    #[error("failed to encode token: {0}")]
    Encode(String),
}

/// Mint an HS256 access token for the given subject and role, expiring at
/// `now` + the configured lifetime.
pub fn issue_access_token(
    sub: &str,
    role: Role,
    now: SystemTime,
    security: &SecurityConfig,
) -> Result<String, TokenError> {
    let iat = now
        .duration_since(UNIX_EPOCH)
        .map_err(|e| TokenError::Encode(format!("system time before epoch: {e}")))?
        .as_secs() as i64;

    let claims = Claims {
        sub: sub.to_string(),
        role,
        exp: iat + security.token_ttl.as_secs() as i64,
    };

    encode(
        &Header::new(security.algorithm),
        &claims,
        &EncodingKey::from_secret(&security.jwt_secret),
    )
    .map_err(|e| TokenError::Encode(e.to_string()))
}

/// Verify a token and return its claims with the expiry stripped out.
///
/// The algorithm is pinned to the configured symmetric MAC, so a token
/// re-signed under a different scheme fails as a signature error rather
/// than being interpreted with the attacker's algorithm. Expiry is checked
/// with zero leeway.
pub fn verify_access_token(
    token: &str,
    security: &SecurityConfig,
) -> Result<AccessClaims, TokenError> {
    let mut validation = Validation::new(security.algorithm);
    validation.leeway = 0;

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(&security.jwt_secret),
        &validation,
    )
    .map(|data| AccessClaims {
        sub: data.claims.sub,
        role: data.claims.role,
    })
    .map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => TokenError::Expired,
        jsonwebtoken::errors::ErrorKind::InvalidSignature
        | jsonwebtoken::errors::ErrorKind::InvalidAlgorithm => TokenError::InvalidSignature,
        _ => TokenError::Malformed,
    })
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, SystemTime};

    use super::{issue_access_token, verify_access_token, TokenError};
    use crate::claims::Role;
    use crate::security::SecurityConfig;

    fn test_security() -> SecurityConfig {
        SecurityConfig::new(
            "test_secret_key_for_testing_purposes_only".as_bytes(),
            Duration::from_secs(3600),
        )
    }

    #[test]
    fn test_issue_and_verify_roundtrip() {
        let security = test_security();

        let token =
            issue_access_token("user-123", Role::Receptionist, SystemTime::now(), &security)
                .unwrap();
        let claims = verify_access_token(&token, &security).unwrap();

        assert_eq!(claims.sub, "user-123");
        assert_eq!(claims.role, Role::Receptionist);
    }

    #[test]
    fn test_expired_token() {
        let security = test_security();

        // Issued two hours ago, so a one-hour token has already expired
        let issued_at = SystemTime::now() - Duration::from_secs(2 * 3600);
        let token = issue_access_token("user-456", Role::Doctor, issued_at, &security).unwrap();

        let result = verify_access_token(&token, &security);
        assert_eq!(result.unwrap_err(), TokenError::Expired);
    }

    #[test]
    fn test_token_still_valid_within_lifetime() {
        let security = test_security();

        // Issued almost a full lifetime ago but with a minute to spare
        let issued_at = SystemTime::now() - Duration::from_secs(3600 - 60);
        let token = issue_access_token("user-789", Role::Doctor, issued_at, &security).unwrap();

        assert!(verify_access_token(&token, &security).is_ok());
    }

    #[test]
    fn test_wrong_secret_fails_verification() {
        let security_a = SecurityConfig::new("secret-A".as_bytes(), Duration::from_secs(3600));
        let security_b = SecurityConfig::new("secret-B".as_bytes(), Duration::from_secs(3600));

        let token =
            issue_access_token("user-1", Role::Doctor, SystemTime::now(), &security_a).unwrap();

        let result = verify_access_token(&token, &security_b);
        assert_eq!(result.unwrap_err(), TokenError::InvalidSignature);
    }

    #[test]
    fn test_tampered_payload_fails_verification() {
        let security = test_security();

        let token =
            issue_access_token("user-1", Role::Doctor, SystemTime::now(), &security).unwrap();

        // Flip one character inside the payload segment without re-signing
        let mut parts: Vec<String> = token.split('.').map(str::to_string).collect();
        assert_eq!(parts.len(), 3);
        let mut payload: Vec<u8> = parts[1].clone().into_bytes();
        payload[0] = if payload[0] == b'A' { b'B' } else { b'A' };
        parts[1] = String::from_utf8(payload).unwrap();
        let tampered = parts.join(".");

        assert_eq!(
            verify_access_token(&tampered, &security).unwrap_err(),
            TokenError::InvalidSignature
        );
    }

    #[test]
    fn test_garbage_token_is_malformed() {
        let security = test_security();

        assert_eq!(
            verify_access_token("not-a-token", &security).unwrap_err(),
            TokenError::Malformed
        );
        assert_eq!(
            verify_access_token("", &security).unwrap_err(),
            TokenError::Malformed
        );
    }
}
