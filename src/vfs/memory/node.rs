/*!
 * Filesystem Node Types
 * Internal representation of files and directories
 */

use parking_lot::Mutex;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::SystemTime;

use super::super::types::{FileType, Permissions};
use crate::core::NodeId;

/// Shared reference to a node; the tree and every open handle hold one
pub(in crate::vfs) type NodeRef = Arc<Mutex<Node>>;

/// Kind-specific payload
#[derive(Debug)]
pub(in crate::vfs) enum NodeKind {
    File { data: Vec<u8> },
    /// Children ordered by name so listings come out sorted
    Directory { children: BTreeMap<String, NodeId> },
}

/// In-memory filesystem node
///
/// Each node sits behind its own lock, guarding only its own fields.
#[derive(Debug)]
pub(in crate::vfs) struct Node {
    pub id: NodeId,
    pub name: String,
    pub permissions: Permissions,
    pub modified: SystemTime,
    /// Set once the node is unlinked from its parent
    pub detached: bool,
    pub kind: NodeKind,
}

impl Node {
    pub fn directory(id: NodeId, name: impl Into<String>, permissions: Permissions) -> Self {
        Self {
            id,
            name: name.into(),
            permissions,
            modified: SystemTime::now(),
            detached: false,
            kind: NodeKind::Directory {
                children: BTreeMap::new(),
            },
        }
    }

    pub fn file(id: NodeId, name: impl Into<String>, permissions: Permissions) -> Self {
        Self {
            id,
            name: name.into(),
            permissions,
            modified: SystemTime::now(),
            detached: false,
            kind: NodeKind::File { data: Vec::new() },
        }
    }

    pub fn into_ref(self) -> NodeRef {
        Arc::new(Mutex::new(self))
    }

    /// Name for diagnostics; the root has an empty name
    pub fn label(&self) -> &str {
        label_of(&self.name)
    }

    pub fn is_dir(&self) -> bool {
        matches!(self.kind, NodeKind::Directory { .. })
    }

    pub fn file_type(&self) -> FileType {
        match self.kind {
            NodeKind::File { .. } => FileType::File,
            NodeKind::Directory { .. } => FileType::Directory,
        }
    }

    /// Content length; 0 for directories and detached files
    pub fn size(&self) -> u64 {
        match &self.kind {
            NodeKind::File { data } if !self.detached => data.len() as u64,
            _ => 0,
        }
    }

    pub fn child(&self, name: &str) -> Option<NodeId> {
        match &self.kind {
            NodeKind::Directory { children } => children.get(name).copied(),
            NodeKind::File { .. } => None,
        }
    }

    pub fn has_children(&self) -> bool {
        matches!(&self.kind, NodeKind::Directory { children } if !children.is_empty())
    }

    /// Sorted (name, id) snapshot of a directory's children
    pub fn children_snapshot(&self) -> Vec<(String, NodeId)> {
        match &self.kind {
            NodeKind::Directory { children } => children
                .iter()
                .map(|(name, id)| (name.clone(), *id))
                .collect(),
            NodeKind::File { .. } => Vec::new(),
        }
    }

    /// Link a child; the caller has already checked the name is free
    pub fn insert_child(&mut self, name: String, id: NodeId) -> bool {
        match &mut self.kind {
            NodeKind::Directory { children } => {
                children.insert(name, id);
                self.modified = SystemTime::now();
                true
            }
            NodeKind::File { .. } => false,
        }
    }

    /// Unlink `name` only if it still points at `id`
    pub fn remove_child(&mut self, name: &str, id: NodeId) -> bool {
        match &mut self.kind {
            NodeKind::Directory { children } if children.get(name) == Some(&id) => {
                children.remove(name);
                self.modified = SystemTime::now();
                true
            }
            _ => false,
        }
    }
}

pub(super) fn label_of(name: &str) -> &str {
    if name.is_empty() {
        "/"
    } else {
        name
    }
}
