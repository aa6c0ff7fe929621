//! Role-based access policy tables.
//!
//! Two decision functions exist and they are not the same table:
//!
//! - [`allows`] is the coarse read/write gate the request middleware uses.
//! - [`can`] is the finer per-CRUD-action check for domain-level callers,
//!   and is stricter: a Viewer may not read `user` records under [`can`]
//!   but may under [`allows`].
//!
//! The disagreement is inherited from the system this replaces and is kept
//! as-is. Both functions are pure; callers translate a `false` into their
//! own rejection.

use serde::{Deserialize, Serialize};

/// Closed set of user roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    Admin,
    Editor,
    Viewer,
}

/// Coarse action set used by the middleware gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Read,
    Write,
}

/// Fine-grained action set used by domain-level checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrudAction {
    Read,
    Create,
    Update,
    Delete,
}

/// Entity kinds subject to access control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Topic,
    Resource,
    User,
}

impl Role {
    /// Parse a role name from an untrusted source (e.g. a token claim).
    ///
    /// Unrecognized names fall back to [`Role::Viewer`], the most
    /// restrictive role.
    pub fn parse(value: &str) -> Role {
        match value {
            "Admin" => Role::Admin,
            "Editor" => Role::Editor,
            "Viewer" => Role::Viewer,
            _ => Role::Viewer,
        }
    }

    /// Canonical role name as stored on user records.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "Admin",
            Role::Editor => "Editor",
            Role::Viewer => "Viewer",
        }
    }
}

/// Coarse middleware gate.
///
/// Admin: everything. Editor: full access to topics and resources,
/// read-only on users. Viewer: read-only on everything.
pub fn allows(role: Role, action: Action, entity: EntityKind) -> bool {
    match role {
        Role::Admin => true,
        Role::Editor => match entity {
            EntityKind::Topic | EntityKind::Resource => true,
            EntityKind::User => action == Action::Read,
        },
        Role::Viewer => action == Action::Read,
    }
}

/// Fine-grained domain check.
///
/// Same table as [`allows`] for Admin and Editor, but a Viewer is limited
/// to reading topics and resources only — `user` reads are denied.
pub fn can(role: Role, action: CrudAction, entity: EntityKind) -> bool {
    match role {
        Role::Admin => true,
        Role::Editor => match entity {
            EntityKind::Topic | EntityKind::Resource => true,
            EntityKind::User => action == CrudAction::Read,
        },
        Role::Viewer => match entity {
            EntityKind::Topic | EntityKind::Resource => action == CrudAction::Read,
            EntityKind::User => false,
        },
    }
}
