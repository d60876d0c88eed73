//! User registration and lookup.

pub mod service;

pub use service::{RegisterUser, UserService};
