//! In-memory record store and repositories for the kbase topic store.
//!
//! The store is a deliberately narrow surface: indexed collections with
//! insert/find/update by key, no transactions. The
//! repositories layer the domain rules on top — sibling-name uniqueness,
//! soft-delete visibility, and append-only versioning — each operation
//! holding the store lock for its whole read-check-then-write sequence.

pub mod models;
pub mod repositories;
pub mod store;
