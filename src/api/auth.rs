use std::collections::BTreeMap;
use std::sync::Arc;

use poem::http::HeaderMap;
use poem_openapi::{payload::Json, OpenApi, Tags};

use crate::errors::AuthError;
use crate::services::{avatar, credentials, TokenService};
use crate::stores::UserStore;
use crate::types::dto::auth::{
    LoginRequest, ProfileResponse, RegisterCreated, RegisterRequest, RegisteredResponse,
    TokenResponse,
};
use crate::types::internal::UserRecord;

/// Authentication API endpoints
pub struct AuthApi {
    user_store: Arc<UserStore>,
    token_service: Arc<TokenService>,
}

impl AuthApi {
    /// Create a new AuthApi over the given store and token service
    pub fn new(user_store: Arc<UserStore>, token_service: Arc<TokenService>) -> Self {
        Self {
            user_store,
            token_service,
        }
    }
}

/// API tags for authentication endpoints
#[derive(Tags)]
enum AuthTags {
    /// Registration, login, and profile endpoints
    Auth,
}

#[OpenApi]
impl AuthApi {
    /// Register a new user
    #[oai(path = "/register", method = "post", tag = "AuthTags::Auth")]
    async fn register(
        &self,
        body: Json<RegisterRequest>,
    ) -> Result<RegisterCreated, AuthError> {
        let missing = missing_fields(&[
            ("username", &body.username),
            ("email", &body.email),
            ("password", &body.password),
        ]);
        if !missing.is_empty() {
            return Err(AuthError::missing_field(&missing.join(", ")));
        }

        // Pre-check for a friendly conflict; the insert below is the
        // atomic create-if-absent that actually enforces uniqueness.
        if self.user_store.exists(&body.username).await? {
            return Err(AuthError::conflict());
        }

        let password_hash = credentials::hash_password(&body.password)?;
        let avatar_url = avatar::avatar_url(&body.username);

        let record = UserRecord {
            username: body.username.clone(),
            email: body.email.clone(),
            password_hash,
            phone: body.phone.clone(),
            address: body.address.clone(),
            avatar_url: Some(avatar_url.clone()),
            extra: body.extra.clone().unwrap_or_else(BTreeMap::new),
        };

        self.user_store.insert_new(&body.username, &record).await?;

        tracing::info!(username = %body.username, "registered new user");

        Ok(RegisterCreated::Created(Json(RegisteredResponse {
            username: body.username.clone(),
            avatar_url,
        })))
    }

    /// Login with username and password to receive a session token
    #[oai(path = "/login", method = "post", tag = "AuthTags::Auth")]
    async fn login(&self, body: Json<LoginRequest>) -> Result<Json<TokenResponse>, AuthError> {
        let missing = missing_fields(&[
            ("username", &body.username),
            ("password", &body.password),
        ]);
        if !missing.is_empty() {
            return Err(AuthError::missing_field(&missing.join(", ")));
        }

        // Unknown username and wrong password produce the same
        // response, so login cannot be used to probe for accounts.
        let record = self
            .user_store
            .get(&body.username)
            .await?
            .ok_or_else(AuthError::invalid_credentials)?;

        if !credentials::validate(&record, &body.password) {
            tracing::debug!(username = %body.username, "login rejected");
            return Err(AuthError::invalid_credentials());
        }

        let token = self.token_service.issue(&record.username)?;

        Ok(Json(TokenResponse {
            token,
            token_type: "Bearer".to_string(),
            expires_in: self.token_service.ttl_seconds(),
        }))
    }

    /// Fetch the authenticated user's profile
    #[oai(path = "/profile", method = "get", tag = "AuthTags::Auth")]
    async fn profile(&self, headers: &HeaderMap) -> Result<Json<ProfileResponse>, AuthError> {
        let auth_header = headers
            .get("authorization")
            .ok_or_else(AuthError::unauthenticated)?
            .to_str()
            .map_err(|_| AuthError::unauthenticated())?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or_else(AuthError::unauthenticated)?;

        let claims = self.token_service.verify(token)?;

        // A verified claim is only as good as the record behind it:
        // a token for a deleted user does not authenticate.
        let record = self
            .user_store
            .get(&claims.sub)
            .await?
            .ok_or_else(AuthError::unauthenticated)?;

        Ok(Json(ProfileResponse::from(record)))
    }
}

/// Names of the fields whose values are absent or empty
fn missing_fields(fields: &[(&'static str, &String)]) -> Vec<&'static str> {
    fields
        .iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| *name)
        .collect()
}
