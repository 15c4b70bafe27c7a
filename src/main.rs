use std::sync::Arc;

use migration::{Migrator, MigratorTrait};
use poem::web::Redirect;
use poem::{get, handler, listener::TcpListener, Route, Server};
use poem_openapi::OpenApiService;
use sea_orm::{Database, DatabaseConnection};

use keyhaven_backend::api::{AuthApi, HealthApi};
use keyhaven_backend::config::{init_logging, SecretManager};
use keyhaven_backend::services::token_service::DEFAULT_TOKEN_TTL_MINUTES;
use keyhaven_backend::services::TokenService;
use keyhaven_backend::stores::UserStore;

#[tokio::main]
async fn main() -> Result<(), std::io::Error> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    init_logging().expect("Failed to initialize logging");

    let database_url = std::env::var("DATABASE_URL")
        .unwrap_or_else(|_| "sqlite://users.db?mode=rwc".to_string());

    let db: DatabaseConnection = Database::connect(&database_url)
        .await
        .expect("Failed to connect to database");

    tracing::info!(%database_url, "connected to database");

    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    tracing::info!("database migrations completed");

    // Secrets are loaded once here and injected; nothing reads the
    // environment at request time.
    let secrets = SecretManager::init().expect("Failed to load secrets");

    let token_ttl_minutes = std::env::var("TOKEN_TTL_MINUTES")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(DEFAULT_TOKEN_TTL_MINUTES);

    let user_store = Arc::new(UserStore::new(db.clone()));
    let token_service = Arc::new(TokenService::new(
        secrets.jwt_secret().to_string(),
        token_ttl_minutes,
    ));

    let auth_api = AuthApi::new(user_store, token_service);

    let api_service = OpenApiService::new((HealthApi, auth_api), "Keyhaven Auth API", "1.0.0")
        .server("http://localhost:3000/api");

    let ui = api_service.swagger_ui();

    // Unmatched paths fall through to poem's default 404
    let app = Route::new()
        .nest("/api", api_service)
        .nest("/swagger", ui)
        .at("/", get(root_redirect));

    tracing::info!("starting server on http://0.0.0.0:3000");
    tracing::info!("swagger UI available at http://localhost:3000/swagger");

    Server::new(TcpListener::bind("0.0.0.0:3000"))
        .run(app)
        .await
}

/// Redirect root requests to the interactive docs
#[handler]
fn root_redirect() -> Redirect {
    Redirect::temporary("/swagger")
}
