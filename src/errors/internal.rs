use thiserror::Error;

/// Errors raised by the key-value user store.
///
/// Not exposed via API - endpoints convert these to `AuthError`.
/// A missing key is never an error here: `get` returns `Ok(None)`.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The underlying store is unreachable or the operation failed.
    ///
    /// Must surface as a 500-class response, never as "not found".
    #[error("store operation '{operation}' failed: {source}")]
    Backend {
        operation: String,
        #[source]
        source: sea_orm::DbErr,
    },

    /// A stored value could not be (de)serialized: storage-integrity
    /// failure, distinct from an absent key.
    #[error("corrupt record for key '{key}': {source}")]
    Corrupt {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// Create-if-absent hit an existing key.
    #[error("key '{key}' already exists")]
    Duplicate { key: String },

    /// Update requires the key to exist.
    #[error("key '{key}' does not exist for update")]
    MissingKey { key: String },
}

impl StoreError {
    pub fn backend(operation: &str, source: sea_orm::DbErr) -> Self {
        Self::Backend {
            operation: operation.to_string(),
            source,
        }
    }
}

/// Errors raised by token issuance and verification.
#[derive(Error, Debug)]
pub enum TokenError {
    #[error("token has expired")]
    Expired,

    #[error("invalid token: malformed or signature mismatch")]
    Invalid,

    #[error("failed to sign token: {0}")]
    Signing(String),
}

/// Error raised when hashing a password at registration.
#[derive(Error, Debug)]
pub enum PasswordHashError {
    #[error("password hashing failed: {0}")]
    Hashing(String),
}
