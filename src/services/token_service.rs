use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

use crate::errors::TokenError;
use crate::types::internal::Claims;

/// Default session lifetime when TOKEN_TTL_MINUTES is not set.
pub const DEFAULT_TOKEN_TTL_MINUTES: i64 = 60;

/// Issues and verifies signed session tokens bound to a username.
///
/// Tokens are HS256 JWTs whose sole identity claim is the username.
/// The signing secret is injected at construction and constant for the
/// process lifetime.
pub struct TokenService {
    jwt_secret: String,
    token_ttl_minutes: i64,
}

impl TokenService {
    /// Create a new TokenService with the given signing secret and TTL
    pub fn new(jwt_secret: String, token_ttl_minutes: i64) -> Self {
        Self {
            jwt_secret,
            token_ttl_minutes,
        }
    }

    /// Number of seconds an issued token stays valid
    pub fn ttl_seconds(&self) -> i64 {
        self.token_ttl_minutes * 60
    }

    /// Issue a signed token for the given username
    pub fn issue(&self, username: &str) -> Result<String, TokenError> {
        let now = Utc::now().timestamp();

        let claims = Claims {
            sub: username.to_string(),
            iat: now,
            exp: now + self.ttl_seconds(),
        };

        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_bytes()),
        )
        .map_err(|e| TokenError::Signing(e.to_string()))
    }

    /// Verify a token's signature and expiry, returning its claims.
    ///
    /// Fails on malformed structure, signature mismatch, and expiry.
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        let validation = Validation::new(Algorithm::HS256);

        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_bytes()),
            &validation,
        )
        .map_err(|e| match e.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => TokenError::Expired,
            _ => TokenError::Invalid,
        })?;

        Ok(token_data.claims)
    }

    /// Extract claims without validating signature or expiry.
    ///
    /// Not trust-establishing: only meaningful after `verify` succeeds.
    pub fn decode(&self, token: &str) -> Result<Claims, TokenError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.insecure_disable_signature_validation();
        validation.validate_exp = false;

        let token_data = decode::<Claims>(token, &DecodingKey::from_secret(b"unused"), &validation)
            .map_err(|_| TokenError::Invalid)?;

        Ok(token_data.claims)
    }
}
