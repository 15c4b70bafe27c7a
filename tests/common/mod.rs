// Common test utilities for integration tests

use std::sync::Arc;

use migration::{Migrator, MigratorTrait};
use poem::test::TestClient;
use poem::Route;
use poem_openapi::OpenApiService;
use sea_orm::{Database, DatabaseConnection};

use keyhaven_backend::api::{AuthApi, HealthApi};
use keyhaven_backend::services::token_service::DEFAULT_TOKEN_TTL_MINUTES;
use keyhaven_backend::services::TokenService;
use keyhaven_backend::stores::UserStore;

pub const TEST_SECRET: &str = "test-secret-key-minimum-32-characters-long";

/// Creates a test database with migrations applied
pub async fn setup_test_db() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to create test database");

    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    db
}

/// Wires the full API surface over an in-memory store, behind a test
/// client that exercises real HTTP framing.
pub async fn setup_app() -> (Arc<UserStore>, Arc<TokenService>, TestClient<Route>) {
    let db = setup_test_db().await;

    let user_store = Arc::new(UserStore::new(db));
    let token_service = Arc::new(TokenService::new(
        TEST_SECRET.to_string(),
        DEFAULT_TOKEN_TTL_MINUTES,
    ));
    let auth_api = AuthApi::new(user_store.clone(), token_service.clone());

    let api_service = OpenApiService::new((HealthApi, auth_api), "Keyhaven Auth API", "1.0.0");
    let app = Route::new().nest("/api", api_service);

    (user_store, token_service, TestClient::new(app))
}
