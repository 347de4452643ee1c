/*!
 * In-Memory Filesystem Backend
 * Fast, volatile filesystem for exercising file APIs without touching storage
 */

mod content;
mod dir_ops;
mod file_handle;
mod file_ops;
mod fs_impl;
mod info;
mod listing;
mod node;
mod resolver;
mod temp;

use ahash::RandomState;
use dashmap::DashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, warn};

use super::config::MemFsConfig;
use super::types::*;
use crate::core::limits::ROOT_NODE_ID;
use crate::core::{HandleIdGenerator, IdGenerator, NodeId, NodeIdGenerator};
use crate::monitoring::span_vfs;
use node::{Node, NodeRef};

pub use content::Whence;
pub use file_handle::FileHandle;
pub use info::FileInfo;
pub use listing::DirEntry;

/// Node arena: every attached node addressed by its stable id
///
/// Detached nodes leave the arena but stay alive for as long as a handle
/// still holds their `NodeRef`.
#[derive(Debug, Clone)]
pub(in crate::vfs) struct Arena {
    nodes: Arc<DashMap<NodeId, NodeRef, RandomState>>,
}

impl Arena {
    fn new() -> Self {
        Self {
            nodes: Arc::new(DashMap::with_hasher(RandomState::new())),
        }
    }

    pub fn get(&self, id: NodeId) -> Option<NodeRef> {
        self.nodes.get(&id).map(|entry| Arc::clone(entry.value()))
    }

    fn insert(&self, id: NodeId, node: NodeRef) {
        self.nodes.insert(id, node);
    }

    fn remove(&self, id: NodeId) {
        self.nodes.remove(&id);
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Sorted snapshot of a directory's live children
    ///
    /// Holds the directory lock only while copying the name map.
    pub fn children(&self, dir: &NodeRef) -> Vec<(String, NodeRef)> {
        let snapshot = dir.lock().children_snapshot();
        snapshot
            .into_iter()
            .filter_map(|(name, id)| self.get(id).map(|node| (name, node)))
            .collect()
    }
}

/// What to allocate when linking a missing name
#[derive(Debug, Clone, Copy)]
pub(in crate::vfs) enum NewNode {
    File(Permissions),
    Directory(Permissions),
}

/// Outcome of linking a name under a directory
pub(in crate::vfs) enum Link {
    Created(NodeRef),
    /// Someone else owns the name (resolution raced with a creation)
    Existing(NodeRef),
}

/// In-memory filesystem implementation
///
/// Cloning is cheap and yields another view of the same tree.
#[derive(Debug, Clone)]
pub struct MemFs {
    root: NodeRef,
    arena: Arena,
    node_ids: NodeIdGenerator,
    handle_ids: HandleIdGenerator,
    working_dir: Arc<PathBuf>,
    config: Arc<MemFsConfig>,
}

impl MemFs {
    /// Create a store seeded with `/tmp` and the process working directory
    pub fn new() -> Self {
        Self::build(MemFsConfig::default())
    }

    /// Create a store from validated configuration
    pub fn with_config(config: MemFsConfig) -> VfsResult<Self> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: MemFsConfig) -> Self {
        let root_id = NodeId(ROOT_NODE_ID);
        let root = Node::directory(root_id, "", Permissions::all()).into_ref();
        let arena = Arena::new();
        arena.insert(root_id, Arc::clone(&root));

        let working_dir = match &config.working_dir {
            Some(dir) => path_clean::clean(dir),
            None => std::env::current_dir()
                .map(|dir| path_clean::clean(&dir))
                .unwrap_or_else(|e| {
                    warn!(error = %e, "Could not read process working directory, using /");
                    PathBuf::from("/")
                }),
        };

        let fs = Self {
            root,
            arena,
            node_ids: NodeIdGenerator::new(ROOT_NODE_ID + 1),
            handle_ids: HandleIdGenerator::new(config.first_handle_id),
            working_dir: Arc::new(working_dir),
            config: Arc::new(config),
        };

        if let Err(e) = fs.mkdir(fs.temp_dir(), Permissions::all()) {
            warn!(error = %e, "Could not seed temporary directory");
        }
        if fs.config.seed_working_dir {
            if let Err(e) = fs.mkdir_all(fs.working_dir.as_path(), Permissions::all()) {
                warn!(
                    working_dir = %fs.working_dir.display(),
                    error = %e,
                    "Could not seed working directory"
                );
            }
        }

        debug!(
            working_dir = %fs.working_dir.display(),
            temp_dir = %fs.temp_dir().display(),
            "MemFS initialized"
        );
        fs
    }

    /// Directory relative paths are resolved against
    pub fn working_dir(&self) -> &Path {
        self.working_dir.as_path()
    }

    pub fn config(&self) -> &MemFsConfig {
        &self.config
    }

    /// Number of nodes currently attached to the tree (root included)
    pub fn node_count(&self) -> usize {
        self.arena.len()
    }

    /// Link `name` under `parent`, allocating a node if the name is free
    ///
    /// The existence check and the insertion happen under one acquisition of
    /// the parent lock. No other node lock is taken meanwhile.
    pub(in crate::vfs) fn link_child(
        &self,
        parent: &NodeRef,
        name: &str,
        new_node: NewNode,
    ) -> VfsResult<Link> {
        let mut dir = parent.lock();
        if dir.detached {
            return Err(VfsError::NotExist(format!(
                "parent directory was removed: {}",
                dir.label()
            )));
        }
        if !dir.is_dir() {
            return Err(VfsError::InvalidPath(format!(
                "not a directory: {}",
                dir.label()
            )));
        }

        if let Some(existing) = dir.child(name) {
            return self
                .arena
                .get(existing)
                .map(Link::Existing)
                .ok_or_else(|| VfsError::NotExist(name.to_string()));
        }

        let id: NodeId = self.node_ids.next();
        let node = match new_node {
            NewNode::File(perm) => Node::file(id, name, perm),
            NewNode::Directory(perm) => Node::directory(id, name, perm),
        }
        .into_ref();

        self.arena.insert(id, Arc::clone(&node));
        dir.insert_child(name.to_string(), id);
        Ok(Link::Created(node))
    }

    /// Unlink `target` from `parent` and mark it detached
    ///
    /// Non-empty directories are refused. Locks are taken one at a time:
    /// target first, then parent.
    pub(in crate::vfs) fn detach(
        &self,
        parent: &NodeRef,
        target: &NodeRef,
        path: &Path,
    ) -> VfsResult<()> {
        let (id, name) = {
            let mut node = target.lock();
            if node.detached {
                return Err(VfsError::NotExist(path.display().to_string()));
            }
            if node.has_children() {
                return Err(VfsError::InvalidPath(format!(
                    "directory not empty: {}",
                    path.display()
                )));
            }
            node.detached = true;
            (node.id, node.name.clone())
        };

        parent.lock().remove_child(&name, id);
        self.arena.remove(id);

        debug!(path = %path.display(), node = %id, "Detached node");
        Ok(())
    }
}

/// Run `op` inside an operation span, recording its outcome
fn traced<T>(
    operation: &'static str,
    path: &Path,
    op: impl FnOnce() -> VfsResult<T>,
) -> VfsResult<T> {
    let span = span_vfs(operation, path);
    let result = {
        let _entered = span.enter();
        op()
    };
    span.record_result(result.is_ok());
    result
}

impl Default for MemFs {
    fn default() -> Self {
        Self::new()
    }
}
