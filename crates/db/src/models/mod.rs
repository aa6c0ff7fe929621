pub mod resource;
pub mod topic;
pub mod user;
