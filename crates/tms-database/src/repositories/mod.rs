//! Concrete repository implementations.

pub mod user;
