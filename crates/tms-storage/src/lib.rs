//! # tms-storage
//!
//! Storage providers implementing [`tms_core::traits::StorageProvider`].

pub mod providers;

pub use providers::local::LocalStorageProvider;
