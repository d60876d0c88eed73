//! # tms-database
//!
//! SQLite connection management, embedded migrations, and the concrete
//! user store consumed by the authentication and avatar pipelines.

pub mod connection;
pub mod migration;
pub mod repositories;
pub mod store;

pub use connection::create_pool;
pub use repositories::user::UserRepository;
pub use store::UserStore;
