//! Filesystem layout: per-request workspaces and the output store

pub mod store;
pub mod workspace;

pub use store::{OutputStore, StoredArtifact};
pub use workspace::Workspace;
