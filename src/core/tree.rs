//! Immutable node of the project tree (directory or source file).

use super::outcome::{FileOutcome, GodFileVerdict};
use std::path::{Path, PathBuf};

/// Whether a [`TreeNode`] represents a directory or a recognized source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub enum NodeKind {
    Directory,
    File,
}

/// A node of the project tree.
///
/// Constructed once by [`crate::tree_builder::TreeBuilder`] and never mutated
/// afterward: the engine's enrichment phase produces a brand new `TreeNode`
/// for each directory, built from its already-enriched children, rather than
/// mutating the original tree in place. A `TreeNode` of kind [`NodeKind::File`]
/// always has an empty `children` list.
#[derive(Debug, Clone, serde::Serialize)]
pub struct TreeNode {
    pub kind: NodeKind,
    pub name: String,
    pub path: PathBuf,
    pub depth: usize,
    pub children: Vec<TreeNode>,
    pub outcome: Option<FileOutcome>,
}

impl TreeNode {
    pub fn directory(name: impl Into<String>, path: impl Into<PathBuf>, depth: usize) -> Self {
        Self {
            kind: NodeKind::Directory,
            name: name.into(),
            path: path.into(),
            depth,
            children: Vec::new(),
            outcome: None,
        }
    }

    pub fn file(name: impl Into<String>, path: impl Into<PathBuf>, depth: usize) -> Self {
        Self {
            kind: NodeKind::File,
            name: name.into(),
            path: path.into(),
            depth,
            children: Vec::new(),
            outcome: None,
        }
    }

    pub fn is_directory(&self) -> bool {
        self.kind == NodeKind::Directory
    }

    pub fn is_file(&self) -> bool {
        self.kind == NodeKind::File
    }

    /// The file's god-file verdict, if this node is an analyzed file with one.
    pub fn god_file_verdict(&self) -> Option<&GodFileVerdict> {
        self.outcome.as_ref().and_then(|o| o.god_file_verdict.as_ref())
    }

    /// Return a new node identical to `self` but with `outcome` attached.
    /// Used by the engine to enrich a freshly-parsed file node.
    pub fn with_outcome(mut self, outcome: FileOutcome) -> Self {
        self.outcome = Some(outcome);
        self
    }

    /// Return a new node identical to `self` but with `children` replaced.
    /// Used by the engine to attach already-enriched children to a directory
    /// node without mutating the original.
    pub fn with_children(mut self, children: Vec<TreeNode>) -> Self {
        self.children = children;
        self
    }

    /// Depth-first iterator over every node in this subtree, self included.
    pub fn iter(&self) -> TreeIter<'_> {
        TreeIter { stack: vec![self] }
    }

    pub fn absolute_path(&self) -> &Path {
        &self.path
    }
}

/// Depth-first, pre-order iterator over a [`TreeNode`] and its descendants.
pub struct TreeIter<'a> {
    stack: Vec<&'a TreeNode>,
}

impl<'a> Iterator for TreeIter<'a> {
    type Item = &'a TreeNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        for child in node.children.iter().rev() {
            self.stack.push(child);
        }
        Some(node)
    }
}
