//! Repository tree node types.
//!
//! A [`Node`] describes one file or directory of a repository tree by its
//! relative, slash-separated path. Directory paths carry a trailing slash
//! (except the root, whose path is the empty string), file paths never do.

use std::cell::OnceCell;
use std::cmp::Ordering;
use std::fmt;

use compact_str::CompactString;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::error::NodeError;

/// Type of repository tree node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    /// Directory.
    Directory,
    /// Regular file.
    File,
}

impl NodeKind {
    /// Check if this is a directory.
    pub fn is_dir(self) -> bool {
        matches!(self, NodeKind::Directory)
    }

    /// Check if this is a regular file.
    pub fn is_file(self) -> bool {
        matches!(self, NodeKind::File)
    }

    /// Lowercase name of the kind.
    pub fn as_str(self) -> &'static str {
        match self {
            NodeKind::Directory => "directory",
            NodeKind::File => "file",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Final segment of `path`, ignoring one trailing slash.
///
/// Only a single slash is stripped, so `"a//"` has an empty name even though
/// it is not the root.
fn name_of(path: &str) -> &str {
    let trimmed = path.strip_suffix('/').unwrap_or(path);
    match trimmed.rfind('/') {
        Some(idx) => &trimmed[idx + 1..],
        None => trimmed,
    }
}

/// Path of the directory containing `path`, with a trailing slash, or the
/// empty string when `path` sits directly under the root.
fn parent_path_of(path: &str) -> CompactString {
    let trimmed = path.strip_suffix('/').unwrap_or(path);
    match trimmed.rfind('/') {
        Some(idx) => {
            // "a//b" has parent "a/", not "a//"
            let head = trimmed[..idx].trim_end_matches('/');
            let mut parent = CompactString::from(head);
            parent.push('/');
            parent
        }
        None => CompactString::default(),
    }
}

fn rejected(err: NodeError) -> NodeError {
    debug!(error = %err, "rejected repository node");
    err
}

/// A node whose path has been checked but whose kind is not assigned yet.
///
/// Assigning the kind consumes the draft, so a kind can only ever be set
/// once. Tree builders that learn an entry's kind after its path use this
/// instead of [`Node::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeDraft {
    path: CompactString,
    name: CompactString,
}

impl NodeDraft {
    /// Start a node from a relative path.
    pub fn new(path: impl Into<CompactString>) -> Result<Self, NodeError> {
        let path = path.into();
        if path.starts_with('/') {
            return Err(rejected(NodeError::AbsolutePath { path }));
        }
        let name = CompactString::from(name_of(&path));
        Ok(Self { path, name })
    }

    /// Path of the pending node.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Name of the pending node.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Assign the kind, validating it against the path, and finish the node.
    pub fn set_kind(self, kind: NodeKind) -> Result<Node, NodeError> {
        let Self { path, name } = self;

        if path.is_empty() && !kind.is_dir() {
            return Err(rejected(NodeError::RootNotDirectory { kind }));
        }

        match kind {
            NodeKind::File if path.ends_with('/') => {
                return Err(rejected(NodeError::FileTrailingSlash { path }));
            }
            NodeKind::Directory if !path.is_empty() && !path.ends_with('/') => {
                return Err(rejected(NodeError::DirectoryMissingSlash { path }));
            }
            _ => {}
        }

        Ok(Node {
            path,
            kind,
            name,
            children_dirs: Vec::new(),
            children_files: Vec::new(),
            parent: OnceCell::new(),
        })
    }
}

/// A single file or directory entry of a repository tree.
///
/// Child lists are filled in by whoever builds the tree; the node itself
/// never walks a repository.
///
/// Equality compares every field, including whether [`Node::parent`] has
/// already been computed. Ordering is a separate relation keyed on the name
/// only, see [`Node::cmp_by_name`].
#[derive(Clone, Serialize, Deserialize)]
#[serde(try_from = "RawNode")]
pub struct Node {
    path: CompactString,
    kind: NodeKind,
    name: CompactString,

    /// Child directories, in the order the tree builder appended them.
    pub children_dirs: Vec<Node>,

    /// Child files, in the order the tree builder appended them.
    pub children_files: Vec<Node>,

    #[serde(skip)]
    parent: OnceCell<Box<Node>>,
}

#[derive(Deserialize)]
struct RawNode {
    path: CompactString,
    kind: NodeKind,
    #[serde(default)]
    children_dirs: Vec<Node>,
    #[serde(default)]
    children_files: Vec<Node>,
}

impl TryFrom<RawNode> for Node {
    type Error = NodeError;

    fn try_from(raw: RawNode) -> Result<Self, Self::Error> {
        let mut node = Node::new(raw.path, raw.kind)?;
        for child in raw.children_dirs.into_iter().chain(raw.children_files) {
            node.push_child(child)?;
        }
        Ok(node)
    }
}

impl Node {
    /// Create a node from a relative path and its kind.
    pub fn new(path: impl Into<CompactString>, kind: NodeKind) -> Result<Self, NodeError> {
        NodeDraft::new(path)?.set_kind(kind)
    }

    /// Create the repository root node.
    pub fn root() -> Self {
        Self::directory_unchecked(CompactString::default())
    }

    /// Build a directory node from a path already known to be well formed.
    fn directory_unchecked(path: CompactString) -> Self {
        let name = CompactString::from(name_of(&path));
        Self {
            path,
            kind: NodeKind::Directory,
            name,
            children_dirs: Vec::new(),
            children_files: Vec::new(),
            parent: OnceCell::new(),
        }
    }

    /// Relative path of this node.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Kind of this node.
    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    /// Final path segment; empty for the root.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Attempt to reassign the kind.
    ///
    /// A constructed node always has its kind, so this always fails, even
    /// when `kind` matches the current one.
    pub fn set_kind(&mut self, kind: NodeKind) -> Result<(), NodeError> {
        debug!(path = %self.path, current = %self.kind, requested = %kind, "kind reassignment refused");
        Err(NodeError::KindImmutable {
            path: self.path.clone(),
        })
    }

    /// Check if this node is a file.
    pub fn is_file(&self) -> bool {
        self.kind.is_file()
    }

    /// Check if this node is a directory.
    pub fn is_dir(&self) -> bool {
        self.kind.is_dir()
    }

    /// Check if this node is the repository root.
    pub fn is_root(&self) -> bool {
        self.path.is_empty()
    }

    /// Name of the entry at `path`, without building a node.
    ///
    /// One trailing slash is ignored, so `"a/b/"` yields `"b"`.
    pub fn get_name(path: &str) -> &str {
        name_of(path)
    }

    /// Path of the directory containing this node.
    ///
    /// Empty for the root and for entries directly under it.
    pub fn parent_path(&self) -> CompactString {
        if self.is_root() {
            return CompactString::default();
        }
        parent_path_of(&self.path)
    }

    /// Parent directory node, or `None` for the root.
    ///
    /// Computed on first call and cached for the life of this instance.
    pub fn parent(&self) -> Option<&Node> {
        if self.is_root() {
            return None;
        }
        let parent = self.parent.get_or_init(|| {
            let path = parent_path_of(&self.path);
            trace!(child = %self.path, parent = %path, "caching parent node");
            Box::new(Self::directory_unchecked(path))
        });
        Some(parent)
    }

    /// Whether [`Node::parent`] has been computed on this instance.
    pub fn is_parent_cached(&self) -> bool {
        self.parent.get().is_some()
    }

    /// Compare two nodes by name only.
    pub fn cmp_by_name(&self, other: &Node) -> Ordering {
        self.name.cmp(&other.name)
    }

    /// Sort both child lists by name.
    pub fn sort_children(&mut self) {
        sort_by_name(&mut self.children_dirs);
        sort_by_name(&mut self.children_files);
    }

    /// Attach a direct child, routing it into the matching child list.
    pub fn push_child(&mut self, child: Node) -> Result<(), NodeError> {
        if self.is_file() {
            return Err(NodeError::NotADirectory {
                path: self.path.clone(),
            });
        }
        if child.is_root() || child.parent_path() != self.path {
            return Err(NodeError::NotAChild {
                parent: self.path.clone(),
                child: child.path,
            });
        }

        match child.kind {
            NodeKind::Directory => self.children_dirs.push(child),
            NodeKind::File => self.children_files.push(child),
        }
        Ok(())
    }

    /// Number of direct children.
    pub fn child_count(&self) -> usize {
        self.children_dirs.len() + self.children_files.len()
    }
}

/// Stable-sort sibling nodes by name.
pub fn sort_by_name(nodes: &mut [Node]) {
    nodes.sort_by(Node::cmp_by_name);
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.path == other.path
            && self.kind == other.kind
            && self.name == other.name
            && self.children_dirs == other.children_dirs
            && self.children_files == other.children_files
            // TODO: confirm whether a forced parent cache should count here
            && self.parent.get() == other.parent.get()
    }
}

impl Eq for Node {}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("path", &self.path)
            .field("kind", &self.kind)
            .field("children_dirs", &self.children_dirs)
            .field("children_files", &self.children_files)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_of() {
        assert_eq!(name_of("a/b/c"), "c");
        assert_eq!(name_of("a/b/"), "b");
        assert_eq!(name_of("top"), "top");
        assert_eq!(name_of(""), "");
    }

    #[test]
    fn test_parent_path_of() {
        assert_eq!(parent_path_of("a/b/c"), "a/b/");
        assert_eq!(parent_path_of("a/b/"), "a/");
        assert_eq!(parent_path_of("a/"), "");
        assert_eq!(parent_path_of("a"), "");
        assert_eq!(parent_path_of("a//b"), "a/");
    }

    #[test]
    fn test_draft_then_kind() {
        let draft = NodeDraft::new("src/lib.rs").unwrap();
        assert_eq!(draft.name(), "lib.rs");

        let node = draft.set_kind(NodeKind::File).unwrap();
        assert!(node.is_file());
        assert_eq!(node.path(), "src/lib.rs");
    }

    #[test]
    fn test_draft_rejects_absolute() {
        let err = NodeDraft::new("/etc/passwd").unwrap_err();
        assert!(matches!(err, NodeError::AbsolutePath { .. }));
    }

    #[test]
    fn test_root_constructor() {
        let root = Node::root();
        assert!(root.is_root());
        assert!(root.is_dir());
        assert_eq!(root, Node::new("", NodeKind::Directory).unwrap());
    }

    #[test]
    fn test_parent_is_cached_once() {
        let node = Node::new("a/b", NodeKind::File).unwrap();
        assert!(!node.is_parent_cached());

        let first = node.parent().unwrap();
        let second = node.parent().unwrap();
        assert!(std::ptr::eq(first, second));
        assert!(node.is_parent_cached());
    }

    #[test]
    fn test_root_parent_not_cached() {
        let root = Node::root();
        assert!(root.parent().is_none());
        assert!(!root.is_parent_cached());
    }

    #[test]
    fn test_doubled_trailing_slash_has_empty_name() {
        // only one trailing slash is stripped before taking the last segment
        assert_eq!(name_of("a//"), "");

        let node = Node::new("a//", NodeKind::Directory).unwrap();
        assert_eq!(node.name(), "");
        assert!(!node.is_root());
        assert_eq!(node.parent().map(Node::path), Some("a/"));
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(NodeKind::Directory.to_string(), "directory");
        assert_eq!(NodeKind::File.to_string(), "file");
    }
}
