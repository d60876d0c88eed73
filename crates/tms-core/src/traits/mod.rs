//! Collaborator traits implemented by other TMS crates.

pub mod storage;

pub use storage::StorageProvider;
