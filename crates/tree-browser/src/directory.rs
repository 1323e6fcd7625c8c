//! Directory listings as node records
//!
//! Each path gets a stable [`NodeId`] from a path cache, so listing the same
//! directory twice yields the same ids and a refresh can match returning
//! entries to the views they already have.

use anyhow::{bail, Context, Result};
use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use tree_controller::{NodeData, NodeId, NodeKind};

/// Metadata for a listed entry
#[derive(Debug, Clone, Default)]
pub struct FileEntry {
    /// File size in bytes (0 for directories)
    pub size: u64,
    pub modified: Option<SystemTime>,
    pub extension: Option<String>,
}

impl fmt::Display for FileEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} bytes", self.size)
    }
}

pub struct DirectorySource {
    root_path: PathBuf,
    path_cache: HashMap<PathBuf, NodeId>,
    paths: HashMap<NodeId, PathBuf>,
    next_id: u64,
}

impl DirectorySource {
    /// Open a directory as the top of the tree
    ///
    /// # Errors
    ///
    /// Returns an error if the path doesn't exist or isn't a directory.
    pub fn new(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let metadata = fs::metadata(path)
            .with_context(|| format!("Failed to read metadata of {}", path.display()))?;
        if !metadata.is_dir() {
            bail!("{} is not a directory", path.display());
        }
        Ok(Self {
            root_path: path.to_path_buf(),
            path_cache: HashMap::new(),
            paths: HashMap::new(),
            next_id: 1,
        })
    }

    pub fn root_path(&self) -> &Path {
        &self.root_path
    }

    /// The id for `path`, allocating one on first sight
    pub fn id_for(&mut self, path: &Path) -> NodeId {
        if let Some(&id) = self.path_cache.get(path) {
            return id;
        }
        let id = NodeId::new(self.next_id);
        self.next_id += 1;
        self.path_cache.insert(path.to_path_buf(), id);
        self.paths.insert(id, path.to_path_buf());
        id
    }

    pub fn path_of(&self, id: NodeId) -> Option<&Path> {
        self.paths.get(&id).map(PathBuf::as_path)
    }

    /// Record for the opened directory itself, as a top-level node
    pub fn root_entry(&mut self) -> Result<NodeData<FileEntry>> {
        let path = self.root_path.clone();
        let metadata = fs::metadata(&path)
            .with_context(|| format!("Failed to read metadata of {}", path.display()))?;
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("root")
            .to_string();
        let id = self.id_for(&path);
        Ok(NodeData::container(
            id,
            NodeId::ROOT,
            name,
            FileEntry {
                size: 0,
                modified: metadata.modified().ok(),
                extension: None,
            },
        ))
    }

    /// List the entries of the directory behind `parent`
    ///
    /// Directories come first, then files, alphabetically within each group.
    pub fn list(&mut self, parent: NodeId) -> Result<Vec<NodeData<FileEntry>>> {
        let path = self
            .path_of(parent)
            .with_context(|| format!("Node {parent} is not a listed path"))?
            .to_path_buf();
        let entries = fs::read_dir(&path)
            .with_context(|| format!("Failed to list {}", path.display()))?;

        let mut children = Vec::new();
        for entry in entries {
            let entry = entry.with_context(|| format!("Failed to read entry in {}", path.display()))?;
            let entry_path = entry.path();
            let metadata = entry
                .metadata()
                .with_context(|| format!("Failed to read metadata of {}", entry_path.display()))?;

            let name = entry.file_name().to_string_lossy().to_string();
            let kind = if metadata.is_dir() {
                NodeKind::Container
            } else {
                NodeKind::Leaf
            };
            let extension = if metadata.is_file() {
                entry_path
                    .extension()
                    .and_then(|e| e.to_str())
                    .map(|s| s.to_string())
            } else {
                None
            };
            let file = FileEntry {
                size: if metadata.is_file() { metadata.len() } else { 0 },
                modified: metadata.modified().ok(),
                extension,
            };

            let id = self.id_for(&entry_path);
            children.push(NodeData::new(id, parent, name, kind, file));
        }

        children.sort_by(|a, b| match (a.kind, b.kind) {
            (NodeKind::Container, NodeKind::Leaf) => std::cmp::Ordering::Less,
            (NodeKind::Leaf, NodeKind::Container) => std::cmp::Ordering::Greater,
            _ => a.title.cmp(&b.title),
        });
        Ok(children)
    }
}
