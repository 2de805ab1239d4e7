//! Argon2id password hashing.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use auth_core::AppError;

/// Well-formed Argon2id hash belonging to no account. Login verifies
/// against this when the email is unknown so that path costs the same
/// hashing work as a real comparison and response latency does not reveal
/// which accounts exist.
pub const DUMMY_PASSWORD_HASH: &str =
    "$argon2id$v=19$m=19456,t=2,p=1$gZiV/M1gPc22ElAH/Jh1Hw$CWOrkoo7oJBQ/iyh7uJ0LO2aLEfrHwTWllSAxT0zRno";

/// Hash a plaintext password into a PHC-format string with a random salt.
pub fn hash_password(password: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AppError::internal(format!("failed to hash password: {e}")))?;
    Ok(hash.to_string())
}

/// Compare a plaintext password against a stored PHC hash.
///
/// Returns `Ok(false)` on mismatch; the comparison inside Argon2 is
/// constant-time. A stored hash that fails to parse is a server error,
/// never a client one.
pub fn verify_password(password: &str, stored_hash: &str) -> Result<bool, AppError> {
    let parsed = PasswordHash::new(stored_hash)
        .map_err(|e| AppError::internal(format!("stored password hash is malformed: {e}")))?;

    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(AppError::internal(format!(
            "password verification failed: {e}"
        ))),
    }
}
