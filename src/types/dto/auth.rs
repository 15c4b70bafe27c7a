use std::collections::BTreeMap;
use poem_openapi::{payload::Json, ApiResponse, Object};
use serde::{Deserialize, Serialize};

use crate::types::internal::UserRecord;

/// Request model for user registration
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct RegisterRequest {
    /// Desired username (unique, case-sensitive)
    pub username: String,

    /// Contact email address
    pub email: String,

    /// Account password
    pub password: String,

    /// Optional phone number (opaque pass-through)
    pub phone: Option<String>,

    /// Optional postal address (opaque pass-through)
    pub address: Option<String>,

    /// Optional extra fields, persisted as a declared extension map
    pub extra: Option<BTreeMap<String, String>>,
}

/// Response model for successful registration
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct RegisteredResponse {
    /// Username of the created account
    pub username: String,

    /// Generated avatar reference attached to the account
    pub avatar_url: String,
}

/// API response for the register endpoint
#[derive(ApiResponse, Debug)]
pub enum RegisterCreated {
    /// Account created; no token is issued on registration
    #[oai(status = 201)]
    Created(Json<RegisteredResponse>),
}

/// Request model for user login
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct LoginRequest {
    /// Username for authentication
    pub username: String,

    /// Password for authentication
    pub password: String,
}

/// Response model containing the session token
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    /// Signed JWT asserting the username claim
    pub token: String,

    /// Token type (always "Bearer")
    pub token_type: String,

    /// Number of seconds until the token expires
    pub expires_in: i64,
}

/// Response model for the profile endpoint.
///
/// Mirrors UserRecord minus any password material.
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct ProfileResponse {
    /// Username of the account
    pub username: String,

    /// Contact email address
    pub email: String,

    /// Optional phone number
    pub phone: Option<String>,

    /// Optional postal address
    pub address: Option<String>,

    /// Generated avatar reference
    pub avatar_url: Option<String>,

    /// Declared extension fields persisted at registration
    pub extra: Option<BTreeMap<String, String>>,
}

impl From<UserRecord> for ProfileResponse {
    fn from(record: UserRecord) -> Self {
        Self {
            username: record.username,
            email: record.email,
            phone: record.phone,
            address: record.address,
            avatar_url: record.avatar_url,
            extra: if record.extra.is_empty() {
                None
            } else {
                Some(record.extra)
            },
        }
    }
}
