//! Core types for describing entries of a versioned repository tree.
//!
//! This crate provides [`Node`], a backend-independent descriptor of a file
//! or directory by its relative path, together with the path/kind rules,
//! parent resolution and name ordering that tree browsing and diffing build
//! on.

mod config;
mod error;
mod listing;
mod mimetype;
mod node;

pub use config::{ListingConfig, ListingConfigBuilder, ListingConfigBuilderError};
pub use error::{ErrorClass, NodeError};
pub use mimetype::{ContentClassifier, DEFAULT_MIMETYPE};
pub use node::{Node, NodeDraft, NodeKind, sort_by_name};
