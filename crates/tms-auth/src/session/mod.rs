//! Login flow.

pub mod manager;

pub use manager::{LoginResult, SessionManager};
