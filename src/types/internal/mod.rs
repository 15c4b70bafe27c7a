// Internal domain types - never exposed on the wire as-is
pub mod claims;
pub mod user_record;

pub use claims::Claims;
pub use user_record::UserRecord;
