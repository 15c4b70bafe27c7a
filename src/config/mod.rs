// Config layer - startup configuration and secrets
pub mod logging;
pub mod secret_manager;

pub use logging::{init_logging, LoggingConfig, LoggingError};
pub use secret_manager::{SecretError, SecretManager};
