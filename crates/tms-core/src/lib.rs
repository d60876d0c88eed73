//! # tms-core
//!
//! Core crate for the TMS backend. Contains configuration schemas, the
//! storage collaborator trait, and the unified error system.
//!
//! This crate has **no** internal dependencies on other TMS crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;

pub use error::AppError;
pub use result::AppResult;
