use argon2::{
    password_hash::SaltString, Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
};

use crate::errors::PasswordHashError;
use crate::types::internal::UserRecord;

/// Hash a password with Argon2id and a fresh random salt.
///
/// Records only ever hold the resulting PHC string; the plaintext is
/// dropped at the registration boundary.
pub fn hash_password(password: &str) -> Result<String, PasswordHashError> {
    let salt = SaltString::generate(&mut rand::thread_rng());
    let argon2 = Argon2::default();

    let hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| PasswordHashError::Hashing(e.to_string()))?;

    Ok(hash.to_string())
}

/// Check a supplied password against a stored record.
///
/// Pure check, no I/O. Any parse or verification failure is `false`;
/// the caller maps that to the unified invalid-credentials response.
pub fn validate(record: &UserRecord, supplied_password: &str) -> bool {
    let Ok(parsed_hash) = PasswordHash::new(&record.password_hash) else {
        return false;
    };

    Argon2::default()
        .verify_password(supplied_password.as_bytes(), &parsed_hash)
        .is_ok()
}
