//! User accounts.
//!
//! Password hashing and token issuance are external collaborators; this
//! service stores whatever opaque hash the caller supplies.

use kbase_core::error::CoreError;
use kbase_core::policy::Role;
use kbase_core::user::{normalize_email, validate_email, validate_name};
use kbase_db::models::user::{CreateUser, PublicUser, UserRecord};
use kbase_db::repositories::UserRepo;

#[derive(Debug, Clone)]
pub struct UserService {
    repo: UserRepo,
}

impl UserService {
    pub fn new(repo: UserRepo) -> Self {
        Self { repo }
    }

    /// Create an account. The email is normalized to lowercase and must
    /// be unique among stored users.
    pub fn create_user(&self, input: CreateUser) -> Result<PublicUser, CoreError> {
        validate_name(&input.name)?;
        validate_email(&normalize_email(&input.email))?;
        let record = self.repo.create(input)?;
        Ok(PublicUser::from(&record))
    }

    /// Case-insensitive lookup. Returns the full record, hash included —
    /// the credential check happens in the (external) auth layer.
    pub fn find_by_email(&self, email: &str) -> Option<UserRecord> {
        self.repo.find_by_email(email)
    }

    pub fn count(&self) -> usize {
        self.repo.count()
    }

    /// Seed the three default accounts when the store is empty. `hash`
    /// turns a plaintext password into the stored hash. Returns how many
    /// accounts were created (0 or 3).
    pub fn seed_defaults_if_empty(
        &self,
        hash: impl Fn(&str) -> String,
    ) -> Result<usize, CoreError> {
        if self.repo.count() > 0 {
            return Ok(0);
        }
        let defaults = [
            ("Admin", "admin@example.com", Role::Admin),
            ("Editor", "editor@example.com", Role::Editor),
            ("Viewer", "viewer@example.com", Role::Viewer),
        ];
        for (name, email, role) in defaults {
            self.repo.create(CreateUser {
                name: name.to_string(),
                email: email.to_string(),
                role,
                password_hash: hash("password"),
            })?;
        }
        tracing::info!(count = defaults.len(), "Seeded default users");
        Ok(defaults.len())
    }
}
