//! User records and DTOs.

use kbase_core::policy::Role;
use kbase_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};

use crate::store::Record;

/// A user account. The email is stored lowercased and is the
/// case-insensitive unique key. The hash is opaque to this crate.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub password_hash: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Record for UserRecord {
    fn id(&self) -> DbId {
        self.id
    }
}

/// Input for creating a user. `password_hash` is produced by the caller;
/// hashing is not this crate's concern.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUser {
    pub name: String,
    pub email: String,
    pub role: Role,
    pub password_hash: String,
}

/// A user without the credential hash, safe to expose.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicUser {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<&UserRecord> for PublicUser {
    fn from(u: &UserRecord) -> Self {
        Self {
            id: u.id,
            name: u.name.clone(),
            email: u.email.clone(),
            role: u.role,
            created_at: u.created_at,
            updated_at: u.updated_at,
        }
    }
}
