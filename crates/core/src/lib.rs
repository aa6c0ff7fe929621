//! Pure domain logic for the kbase topic store.
//!
//! Everything in this crate is synchronous and storage-agnostic: shared id
//! and timestamp aliases, the closed domain error enum, the role-based
//! access policy tables, the generic append-only version ledger, and
//! per-domain validation helpers. Persistence lives in `kbase-db`.

pub mod error;
pub mod policy;
pub mod resource;
pub mod topic;
pub mod types;
pub mod user;
pub mod version;
