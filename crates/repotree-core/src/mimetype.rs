//! Content type lookup for file nodes.
//!
//! The crate does not sniff content itself. Callers hand in a
//! [`ContentClassifier`] backed by whatever detection they use (byte
//! signatures, extension tables, ...).

use tracing::debug;

use crate::error::NodeError;
use crate::node::Node;

/// Fallback content type when a classifier has no opinion.
pub const DEFAULT_MIMETYPE: &str = "application/octet-stream";

/// External collaborator that maps a file's name and content to a mimetype.
pub trait ContentClassifier {
    /// Classify `content` of the file called `name`.
    ///
    /// Returns `None` when the content type cannot be determined.
    fn classify(&self, name: &str, content: &[u8]) -> Option<String>;
}

impl<F> ContentClassifier for F
where
    F: Fn(&str, &[u8]) -> Option<String>,
{
    fn classify(&self, name: &str, content: &[u8]) -> Option<String> {
        self(name, content)
    }
}

impl Node {
    /// Determine the mimetype of this file's `content`.
    ///
    /// Fails with [`NodeError::NotSupported`] when no classifier is supplied
    /// or when called on a directory.
    pub fn get_mimetype(
        &self,
        content: &[u8],
        classifier: Option<&dyn ContentClassifier>,
    ) -> Result<String, NodeError> {
        let Some(classifier) = classifier else {
            debug!(path = %self.path(), "mimetype requested without a classifier");
            return Err(NodeError::NotSupported {
                operation: "mimetype detection without a content classifier",
            });
        };

        if self.is_dir() {
            return Err(NodeError::NotSupported {
                operation: "mimetype detection for directories",
            });
        }

        Ok(classifier
            .classify(self.name(), content)
            .unwrap_or_else(|| DEFAULT_MIMETYPE.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::NodeKind;

    struct Markdown;

    impl ContentClassifier for Markdown {
        fn classify(&self, name: &str, _content: &[u8]) -> Option<String> {
            name.ends_with(".md").then(|| "text/markdown".to_string())
        }
    }

    #[test]
    fn test_without_classifier() {
        let node = Node::new("README.md", NodeKind::File).unwrap();
        let err = node.get_mimetype(b"# hi", None).unwrap_err();
        assert!(err.is_not_supported());
    }

    #[test]
    fn test_with_classifier() {
        let node = Node::new("docs/README.md", NodeKind::File).unwrap();
        let mime = node.get_mimetype(b"# hi", Some(&Markdown)).unwrap();
        assert_eq!(mime, "text/markdown");
    }

    #[test]
    fn test_fallback_mimetype() {
        let node = Node::new("blob.bin", NodeKind::File).unwrap();
        let mime = node.get_mimetype(&[0, 1, 2], Some(&Markdown)).unwrap();
        assert_eq!(mime, DEFAULT_MIMETYPE);
    }

    #[test]
    fn test_closure_classifier() {
        let node = Node::new("a.txt", NodeKind::File).unwrap();
        let sniff = |_: &str, content: &[u8]| {
            (!content.contains(&0)).then(|| "text/plain".to_string())
        };
        assert_eq!(node.get_mimetype(b"hello", Some(&sniff)).unwrap(), "text/plain");
    }

    #[test]
    fn test_directory_not_supported() {
        let node = Node::new("docs/", NodeKind::Directory).unwrap();
        let err = node.get_mimetype(b"", Some(&Markdown)).unwrap_err();
        assert!(err.is_not_supported());
    }
}
