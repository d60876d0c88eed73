//! Avatar upload pipeline.

pub mod processing;
pub mod service;

pub use processing::{AvatarFormat, ProcessedAvatar};
pub use service::{AvatarService, AvatarUpload};
