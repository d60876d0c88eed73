//! # tms-service
//!
//! Business operations behind the HTTP layer: registration, current-user
//! lookup, and the avatar upload pipeline.

pub mod avatar;
pub mod context;
pub mod user;

pub use avatar::{AvatarService, AvatarUpload};
pub use context::RequestContext;
pub use user::{RegisterUser, UserService};

#[cfg(test)]
mod testing;
