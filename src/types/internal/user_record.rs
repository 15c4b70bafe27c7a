use std::collections::BTreeMap;
use serde::{Deserialize, Serialize};

/// Durable representation of one registered account.
///
/// This is the value serialized into the store namespace under the
/// username key. Passwords are never stored in the clear: only the
/// Argon2 PHC string produced at registration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    /// Unique identifier, immutable after creation, case-sensitive
    pub username: String,

    /// Contact email supplied at registration
    pub email: String,

    /// Argon2id PHC hash of the account password
    pub password_hash: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,

    /// Generated avatar reference attached at registration
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,

    /// Open extension map for caller-declared extra fields.
    ///
    /// Only this declared map is persisted; arbitrary body fields are
    /// never merged into the record.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub extra: BTreeMap<String, String>,
}
