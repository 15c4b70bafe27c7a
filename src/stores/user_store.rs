use chrono::Utc;
use sea_orm::sea_query::OnConflict;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set};

use crate::errors::StoreError;
use crate::types::db::user_record::{self, Entity as UserRecords};
use crate::types::internal::UserRecord;

/// Key-value store mapping usernames to serialized UserRecords.
///
/// Every call round-trips to the durable namespace; there is no
/// in-process cache. Backend failures surface as `StoreError::Backend`
/// and are never collapsed into "key absent".
pub struct UserStore {
    db: DatabaseConnection,
}

impl UserStore {
    /// Create a new UserStore over the given database connection
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Fetch the record stored under `username`.
    ///
    /// A missing key is `Ok(None)`. A row that fails to deserialize is
    /// a storage-integrity error, not an absent key.
    pub async fn get(&self, username: &str) -> Result<Option<UserRecord>, StoreError> {
        let row = UserRecords::find_by_id(username)
            .one(&self.db)
            .await
            .map_err(|e| StoreError::backend("get", e))?;

        match row {
            None => Ok(None),
            Some(model) => serde_json::from_str(&model.value)
                .map(Some)
                .map_err(|e| StoreError::Corrupt {
                    key: username.to_string(),
                    source: e,
                }),
        }
    }

    /// True iff a record is stored under `username`
    pub async fn exists(&self, username: &str) -> Result<bool, StoreError> {
        Ok(self.get(username).await?.is_some())
    }

    /// Unconditional upsert: overwrites any existing value
    pub async fn put(&self, username: &str, record: &UserRecord) -> Result<(), StoreError> {
        let active = self.to_active_model(username, record)?;

        UserRecords::insert(active)
            .on_conflict(
                OnConflict::column(user_record::Column::Key)
                    .update_columns([user_record::Column::Value, user_record::Column::UpdatedAt])
                    .to_owned(),
            )
            .exec(&self.db)
            .await
            .map_err(|e| StoreError::backend("put", e))?;

        Ok(())
    }

    /// Atomic create-if-absent.
    ///
    /// The primary key constraint makes this safe against two
    /// registrations racing the same username: the loser gets
    /// `StoreError::Duplicate`.
    pub async fn insert_new(&self, username: &str, record: &UserRecord) -> Result<(), StoreError> {
        let active = self.to_active_model(username, record)?;

        active.insert(&self.db).await.map_err(|e| {
            if e.to_string().contains("UNIQUE") {
                StoreError::Duplicate {
                    key: username.to_string(),
                }
            } else {
                StoreError::backend("insert_new", e)
            }
        })?;

        Ok(())
    }

    /// Remove the record stored under `username`, if any
    pub async fn delete(&self, username: &str) -> Result<(), StoreError> {
        UserRecords::delete_by_id(username)
            .exec(&self.db)
            .await
            .map_err(|e| StoreError::backend("delete", e))?;

        Ok(())
    }

    /// Overwrite an existing record; errors if the key is absent
    pub async fn update(&self, username: &str, record: &UserRecord) -> Result<(), StoreError> {
        if !self.exists(username).await? {
            return Err(StoreError::MissingKey {
                key: username.to_string(),
            });
        }

        self.put(username, record).await
    }

    fn to_active_model(
        &self,
        username: &str,
        record: &UserRecord,
    ) -> Result<user_record::ActiveModel, StoreError> {
        let value = serde_json::to_string(record).map_err(|e| StoreError::Corrupt {
            key: username.to_string(),
            source: e,
        })?;

        Ok(user_record::ActiveModel {
            key: Set(username.to_string()),
            value: Set(value),
            updated_at: Set(Utc::now().timestamp()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use migration::{Migrator, MigratorTrait};
    use sea_orm::Database;
    use std::collections::BTreeMap;

    async fn setup_test_store() -> UserStore {
        let db = Database::connect("sqlite::memory:")
            .await
            .expect("Failed to create test database");

        Migrator::up(&db, None)
            .await
            .expect("Failed to run migrations");

        UserStore::new(db)
    }

    fn sample_record(username: &str) -> UserRecord {
        UserRecord {
            username: username.to_string(),
            email: format!("{}@example.com", username),
            password_hash: "$argon2id$fake-hash-for-tests".to_string(),
            phone: None,
            address: Some("1 Main St".to_string()),
            avatar_url: Some("https://example.com/a.svg".to_string()),
            extra: BTreeMap::new(),
        }
    }

    #[tokio::test]
    async fn test_get_returns_none_for_missing_key() {
        let store = setup_test_store().await;

        let result = store.get("nobody").await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_put_then_get_round_trips_the_record() {
        let store = setup_test_store().await;
        let record = sample_record("alice");

        store.put("alice", &record).await.unwrap();
        let fetched = store.get("alice").await.unwrap().unwrap();

        assert_eq!(fetched, record);
    }

    #[tokio::test]
    async fn test_put_overwrites_existing_value() {
        let store = setup_test_store().await;

        let mut record = sample_record("alice");
        store.put("alice", &record).await.unwrap();

        record.email = "new@example.com".to_string();
        store.put("alice", &record).await.unwrap();

        let fetched = store.get("alice").await.unwrap().unwrap();
        assert_eq!(fetched.email, "new@example.com");
    }

    #[tokio::test]
    async fn test_exists_tracks_presence() {
        let store = setup_test_store().await;

        assert!(!store.exists("alice").await.unwrap());
        store.put("alice", &sample_record("alice")).await.unwrap();
        assert!(store.exists("alice").await.unwrap());
    }

    #[tokio::test]
    async fn test_insert_new_rejects_duplicate_key() {
        let store = setup_test_store().await;
        let first = sample_record("alice");

        store.insert_new("alice", &first).await.unwrap();

        let mut second = sample_record("alice");
        second.email = "other@example.com".to_string();
        let result = store.insert_new("alice", &second).await;

        assert!(matches!(result, Err(StoreError::Duplicate { .. })));

        // The losing write must not clobber the stored record
        let fetched = store.get("alice").await.unwrap().unwrap();
        assert_eq!(fetched.email, first.email);
    }

    #[tokio::test]
    async fn test_delete_removes_the_record() {
        let store = setup_test_store().await;

        store.put("alice", &sample_record("alice")).await.unwrap();
        store.delete("alice").await.unwrap();

        assert!(store.get("alice").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete_of_missing_key_is_a_no_op() {
        let store = setup_test_store().await;

        store.delete("nobody").await.unwrap();
    }

    #[tokio::test]
    async fn test_update_requires_existing_key() {
        let store = setup_test_store().await;

        let result = store.update("alice", &sample_record("alice")).await;
        assert!(matches!(result, Err(StoreError::MissingKey { .. })));

        store.put("alice", &sample_record("alice")).await.unwrap();

        let mut updated = sample_record("alice");
        updated.phone = Some("09088009900".to_string());
        store.update("alice", &updated).await.unwrap();

        let fetched = store.get("alice").await.unwrap().unwrap();
        assert_eq!(fetched.phone.as_deref(), Some("09088009900"));
    }

    #[tokio::test]
    async fn test_corrupt_value_is_an_integrity_error_not_absent() {
        let store = setup_test_store().await;

        // Write garbage straight into the namespace, bypassing the codec
        let active = user_record::ActiveModel {
            key: Set("mallory".to_string()),
            value: Set("{not json".to_string()),
            updated_at: Set(0),
        };
        active.insert(&store.db).await.unwrap();

        let result = store.get("mallory").await;
        assert!(matches!(result, Err(StoreError::Corrupt { .. })));
    }
}
