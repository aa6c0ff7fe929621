//! Repository for user accounts.

use chrono::Utc;
use kbase_core::error::CoreError;
use kbase_core::user::normalize_email;
use uuid::Uuid;

use crate::models::user::{CreateUser, UserRecord};
use crate::store::SharedDatabase;

/// Provides user storage. Emails are lowercased on the way in and are the
/// case-insensitive unique key.
#[derive(Debug, Clone)]
pub struct UserRepo {
    db: SharedDatabase,
}

impl UserRepo {
    pub fn new(db: SharedDatabase) -> Self {
        Self { db }
    }

    pub fn create(&self, params: CreateUser) -> Result<UserRecord, CoreError> {
        let email = normalize_email(&params.email);
        let mut db = self.db.write();
        if db.users.find_one(|u| u.email == email).is_some() {
            return Err(CoreError::Conflict(format!(
                "Email already registered: {email}"
            )));
        }
        let now = Utc::now();
        let record = UserRecord {
            id: Uuid::new_v4(),
            name: params.name,
            email,
            role: params.role,
            password_hash: params.password_hash,
            created_at: now,
            updated_at: now,
        };
        db.users.insert(record.clone());
        tracing::debug!(user_id = %record.id, role = record.role.as_str(), "Created user");
        Ok(record)
    }

    /// Case-insensitive email lookup.
    pub fn find_by_email(&self, email: &str) -> Option<UserRecord> {
        let email = normalize_email(email);
        let db = self.db.read();
        db.users.find_one(|u| u.email == email).cloned()
    }

    pub fn count(&self) -> usize {
        let db = self.db.read();
        db.users.len()
    }
}
