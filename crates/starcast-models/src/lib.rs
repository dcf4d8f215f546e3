//! Shared data models for the Starcast pipeline.
//!
//! This crate provides Serde-serializable types for:
//! - Media artifacts and their lifecycle roles
//! - Video encoding configuration
//! - Publish requests

pub mod artifact;
pub mod encoding;
pub mod request;

// Re-export common types
pub use artifact::{ArtifactRole, MediaArtifact};
pub use encoding::EncodingConfig;
pub use request::PublishRequest;
