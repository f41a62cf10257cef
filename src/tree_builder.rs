//! Walks a root path into a [`TreeNode`] tree, pruning build-artifact
//! directories and admitting only files the parser registry recognizes.
//!
//! Unlike the teacher's `io/walker.rs` (an `ignore::WalkBuilder` pipeline with
//! gitignore awareness), this walks via plain `std::fs::read_dir` against a
//! fixed exclusion list — see `DESIGN.md`'s TreeBuilder entry for why.

use crate::core::TreeNode;
use crate::error::{Error, Result};
use crate::parsing::ParserRegistry;
use std::path::Path;

/// Directory basenames pruned from traversal, compared case-insensitively.
const EXCLUDED_DIRS: &[&str] = &[
    "bin",
    "obj",
    ".git",
    ".vs",
    "node_modules",
    "packages",
    ".idea",
    "target",
    "build",
    "dist",
];

pub struct TreeBuilder<'a> {
    registry: &'a ParserRegistry,
}

impl<'a> TreeBuilder<'a> {
    pub fn new(registry: &'a ParserRegistry) -> Self {
        Self { registry }
    }

    /// Build the tree rooted at `root`. Fails only with
    /// [`Error::PathNotFound`]; every other I/O failure below the root is
    /// absorbed by skipping the offending subtree.
    pub fn build(&self, root: &Path) -> Result<TreeNode> {
        if !root.exists() {
            return Err(Error::PathNotFound(root.to_path_buf()));
        }

        let name = root
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| root.to_string_lossy().to_string());

        if root.is_file() {
            return Ok(TreeNode::file(name, root, 0));
        }

        Ok(self.build_directory(root, &name, 0))
    }

    fn build_directory(&self, path: &Path, name: &str, depth: usize) -> TreeNode {
        let mut entries: Vec<std::fs::DirEntry> = match std::fs::read_dir(path) {
            Ok(read_dir) => read_dir.filter_map(std::result::Result::ok).collect(),
            Err(_) => Vec::new(),
        };

        entries.sort_by(|a, b| {
            a.file_name()
                .to_string_lossy()
                .to_lowercase()
                .cmp(&b.file_name().to_string_lossy().to_lowercase())
        });

        let mut children = Vec::new();
        for entry in entries {
            let entry_path = entry.path();
            let entry_name = entry.file_name().to_string_lossy().to_string();

            if entry_path.is_dir() {
                if is_excluded(&entry_name) {
                    continue;
                }
                children.push(self.build_directory(&entry_path, &entry_name, depth + 1));
            } else if entry_path.is_file() {
                let ext = entry_path
                    .extension()
                    .and_then(|e| e.to_str())
                    .map(|e| e.to_lowercase())
                    .unwrap_or_default();
                if self.registry.is_recognized(&ext) {
                    children.push(TreeNode::file(entry_name, entry_path, depth + 1));
                }
            }
        }

        TreeNode::directory(name, path, depth).with_children(children)
    }
}

fn is_excluded(dir_name: &str) -> bool {
    let lower = dir_name.to_lowercase();
    EXCLUDED_DIRS.iter().any(|excluded| *excluded == lower)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn registry() -> ParserRegistry {
        ParserRegistry::default_registry()
    }

    #[test]
    fn missing_root_is_path_not_found() {
        let registry = registry();
        let builder = TreeBuilder::new(&registry);
        let result = builder.build(Path::new("/does/not/exist/at/all"));
        assert!(matches!(result, Err(Error::PathNotFound(_))));
    }

    #[test]
    fn single_file_root_becomes_one_node_tree() {
        let temp = TempDir::new().unwrap();
        let file_path = temp.path().join("solo.rs");
        fs::write(&file_path, "fn main() {}").unwrap();

        let registry = registry();
        let builder = TreeBuilder::new(&registry);
        let tree = builder.build(&file_path).unwrap();

        assert!(tree.is_file());
        assert!(tree.children.is_empty());
    }

    #[test]
    fn excluded_directories_are_pruned() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("target")).unwrap();
        fs::write(temp.path().join("target/leftover.rs"), "fn f() {}").unwrap();
        fs::create_dir_all(temp.path().join("src")).unwrap();
        fs::write(temp.path().join("src/lib.rs"), "fn f() {}").unwrap();

        let registry = registry();
        let builder = TreeBuilder::new(&registry);
        let tree = builder.build(temp.path()).unwrap();

        let names: Vec<&str> = tree.children.iter().map(|n| n.name.as_str()).collect();
        assert_eq!(names, vec!["src"]);
    }

    #[test]
    fn unrecognized_extensions_are_excluded() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("notes.txt"), "hello").unwrap();
        fs::write(temp.path().join("main.rs"), "fn main() {}").unwrap();

        let registry = registry();
        let builder = TreeBuilder::new(&registry);
        let tree = builder.build(temp.path()).unwrap();

        let names: Vec<&str> = tree.children.iter().map(|n| n.name.as_str()).collect();
        assert_eq!(names, vec!["main.rs"]);
    }

    #[test]
    fn children_are_sorted_case_insensitively() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("Banana.rs"), "fn f() {}").unwrap();
        fs::write(temp.path().join("apple.rs"), "fn f() {}").unwrap();
        fs::write(temp.path().join("cherry.rs"), "fn f() {}").unwrap();

        let registry = registry();
        let builder = TreeBuilder::new(&registry);
        let tree = builder.build(temp.path()).unwrap();

        let names: Vec<&str> = tree.children.iter().map(|n| n.name.as_str()).collect();
        assert_eq!(names, vec!["apple.rs", "Banana.rs", "cherry.rs"]);
    }

    #[test]
    fn unreadable_child_directory_is_silently_skipped() {
        // A directory we can't descend into (simulated by an empty dir with
        // no readable entries) should not cause `build` to fail.
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("empty")).unwrap();

        let registry = registry();
        let builder = TreeBuilder::new(&registry);
        let tree = builder.build(temp.path()).unwrap();
        assert_eq!(tree.children.len(), 1);
        assert!(tree.children[0].is_directory());
        assert!(tree.children[0].children.is_empty());
    }
}
