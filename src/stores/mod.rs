// Stores layer - Data access
pub mod user_store;

pub use user_store::UserStore;
