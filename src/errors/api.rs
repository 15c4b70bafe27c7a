use poem_openapi::{payload::Json, ApiResponse, Object};

use super::internal::{PasswordHashError, StoreError, TokenError};

/// Standardized error response body for authentication endpoints
#[derive(Object, Debug)]
pub struct ErrorBody {
    /// Error code identifier
    pub error: String,

    /// Human-readable error message
    pub message: String,

    /// HTTP status code
    pub status_code: u16,
}

/// Authentication error responses
#[derive(ApiResponse, Debug)]
pub enum AuthError {
    /// A required field is absent or empty
    #[oai(status = 400)]
    MissingField(Json<ErrorBody>),

    /// Username already registered
    #[oai(status = 409)]
    Conflict(Json<ErrorBody>),

    /// Unknown username or wrong password
    #[oai(status = 401)]
    InvalidCredentials(Json<ErrorBody>),

    /// Missing, malformed, or invalid bearer token
    #[oai(status = 401)]
    Unauthenticated(Json<ErrorBody>),

    /// The durable store is unreachable or returned corrupt data
    #[oai(status = 500)]
    StorageUnavailable(Json<ErrorBody>),
}

impl AuthError {
    /// Create a MissingField error naming the absent fields
    pub fn missing_field(detail: &str) -> Self {
        AuthError::MissingField(Json(ErrorBody {
            error: "missing_field".to_string(),
            message: format!("Missing required field: {}", detail),
            status_code: 400,
        }))
    }

    /// Create a Conflict error for a duplicate username
    pub fn conflict() -> Self {
        AuthError::Conflict(Json(ErrorBody {
            error: "duplicate_username".to_string(),
            message: "Username already exists".to_string(),
            status_code: 409,
        }))
    }

    /// Create an InvalidCredentials error.
    ///
    /// Deliberately identical for unknown-username and wrong-password
    /// so callers cannot enumerate registered usernames.
    pub fn invalid_credentials() -> Self {
        AuthError::InvalidCredentials(Json(ErrorBody {
            error: "invalid_credentials".to_string(),
            message: "Invalid username or password".to_string(),
            status_code: 401,
        }))
    }

    /// Create an Unauthenticated error
    pub fn unauthenticated() -> Self {
        AuthError::Unauthenticated(Json(ErrorBody {
            error: "unauthenticated".to_string(),
            message: "Missing or invalid authentication token".to_string(),
            status_code: 401,
        }))
    }

    /// Create a StorageUnavailable error
    pub fn storage_unavailable() -> Self {
        AuthError::StorageUnavailable(Json(ErrorBody {
            error: "storage_unavailable".to_string(),
            message: "The user store is currently unavailable".to_string(),
            status_code: 500,
        }))
    }
}

impl From<StoreError> for AuthError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Duplicate { .. } => AuthError::conflict(),
            StoreError::Backend { .. }
            | StoreError::Corrupt { .. }
            | StoreError::MissingKey { .. } => {
                tracing::error!(error = %err, "user store failure");
                AuthError::storage_unavailable()
            }
        }
    }
}

impl From<TokenError> for AuthError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::Expired | TokenError::Invalid => AuthError::unauthenticated(),
            TokenError::Signing(msg) => {
                tracing::error!(message = %msg, "token signing failure");
                AuthError::storage_unavailable()
            }
        }
    }
}

impl From<PasswordHashError> for AuthError {
    fn from(err: PasswordHashError) -> Self {
        tracing::error!(error = %err, "password hashing failure");
        AuthError::storage_unavailable()
    }
}
