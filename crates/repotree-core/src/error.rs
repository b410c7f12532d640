//! Error types for node construction and node operations.

use compact_str::CompactString;
use thiserror::Error;

use crate::node::NodeKind;

/// Coarse classification of a [`NodeError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// The path is malformed for the node's kind or position.
    Path,
    /// The kind is invalid for the path, or a reassignment was attempted.
    Kind,
    /// An extension point was invoked without the capability it needs.
    NotSupported,
}

/// Errors raised while building or operating on a [`Node`](crate::Node).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NodeError {
    /// Only relative paths are accepted.
    #[error("Node paths must be relative, got leading slash: {path}")]
    AbsolutePath { path: CompactString },

    /// File paths cannot end with a slash.
    #[error("File node paths cannot end with a slash: {path}")]
    FileTrailingSlash { path: CompactString },

    /// Non-root directory paths must end with a slash.
    #[error("Directory node paths must end with a slash: {path}")]
    DirectoryMissingSlash { path: CompactString },

    /// The root node was given a non-directory kind.
    #[error("Root node cannot be of kind {kind}")]
    RootNotDirectory { kind: NodeKind },

    /// Kind was assigned a second time.
    #[error("Node kind is immutable once set: {path}")]
    KindImmutable { path: CompactString },

    /// A child was attached to a file node.
    #[error("Cannot attach children to a file node: {path}")]
    NotADirectory { path: CompactString },

    /// A child was attached to a node that is not its parent.
    #[error("{child} is not a direct child of '{parent}'")]
    NotAChild {
        parent: CompactString,
        child: CompactString,
    },

    /// Unimplemented extension point.
    #[error("Not supported: {operation}")]
    NotSupported { operation: &'static str },
}

impl NodeError {
    /// Classify this error into one of the three error families.
    pub fn class(&self) -> ErrorClass {
        match self {
            Self::AbsolutePath { .. }
            | Self::FileTrailingSlash { .. }
            | Self::DirectoryMissingSlash { .. }
            | Self::NotADirectory { .. }
            | Self::NotAChild { .. } => ErrorClass::Path,
            Self::RootNotDirectory { .. } | Self::KindImmutable { .. } => ErrorClass::Kind,
            Self::NotSupported { .. } => ErrorClass::NotSupported,
        }
    }

    /// Check if this is a path error.
    pub fn is_path_error(&self) -> bool {
        self.class() == ErrorClass::Path
    }

    /// Check if this is a kind error.
    pub fn is_kind_error(&self) -> bool {
        self.class() == ErrorClass::Kind
    }

    /// Check if this is a not-supported error.
    pub fn is_not_supported(&self) -> bool {
        self.class() == ErrorClass::NotSupported
    }
}
