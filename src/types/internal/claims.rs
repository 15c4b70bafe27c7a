use serde::{Deserialize, Serialize};

/// JWT claims carried by a session token.
///
/// The username is the sole identity claim; `iat`/`exp` bound the
/// session lifetime.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Username the token was issued for
    pub sub: String,

    /// Issued-at (Unix timestamp)
    pub iat: i64,

    /// Expiration (Unix timestamp)
    pub exp: i64,
}
