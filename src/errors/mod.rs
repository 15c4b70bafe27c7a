// Errors layer - Error type definitions
pub mod api;
pub mod internal;

pub use api::{AuthError, ErrorBody};
pub use internal::{PasswordHashError, StoreError, TokenError};
