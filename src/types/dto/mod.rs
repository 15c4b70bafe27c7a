// Wire-facing request/response models
pub mod auth;
pub mod common;
