//! # tms-api
//!
//! HTTP API layer for TMS built on Axum.
//!
//! Provides the login, registration, current-user, private, avatar upload,
//! and health endpoints, the auth gate middleware, extractors, DTOs, and
//! error mapping.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::{build_app, run_server};
pub use state::AppState;
