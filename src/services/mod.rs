// Services layer - Business logic
pub mod avatar;
pub mod credentials;
pub mod token_service;

pub use token_service::TokenService;
