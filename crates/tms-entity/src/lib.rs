//! # tms-entity
//!
//! Domain entity models for the TMS backend. Database entities derive
//! `sqlx::FromRow` in addition to the serde traits.

pub mod user;
