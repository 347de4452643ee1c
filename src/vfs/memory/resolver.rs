/*!
 * Path Resolution
 * Canonicalization and hand-over-hand descent through the node tree
 */

use std::path::{Component, Path, PathBuf};
use std::sync::Arc;
use tracing::trace;

use super::super::types::{VfsError, VfsResult};
use super::node::NodeRef;
use super::MemFs;

/// Result of walking a path
///
/// `parent` is the deepest existing directory on the path. `missing` holds
/// the segments past it that do not exist yet. The root resolves to no
/// target and no missing segments.
pub(in crate::vfs) struct Resolution {
    pub path: PathBuf,
    pub parent: NodeRef,
    pub target: Option<NodeRef>,
    pub missing: Vec<String>,
}

impl Resolution {
    pub fn is_root(&self) -> bool {
        self.target.is_none() && self.missing.is_empty()
    }

    /// Node the path names, if it exists (the root names the parent itself)
    pub fn existing(&self) -> Option<NodeRef> {
        if self.is_root() {
            Some(Arc::clone(&self.parent))
        } else {
            self.target.clone()
        }
    }

    /// The single missing final segment, or NotExist when an ancestor is
    /// missing too
    pub fn missing_leaf(&self) -> VfsResult<&str> {
        match self.missing.as_slice() {
            [leaf] => Ok(leaf),
            _ => Err(VfsError::NotExist(self.path.display().to_string())),
        }
    }
}

impl MemFs {
    /// Absolute, lexically cleaned form of `path`
    pub(in crate::vfs) fn canonicalize(&self, path: &Path) -> VfsResult<PathBuf> {
        let text = path
            .to_str()
            .ok_or_else(|| VfsError::InvalidPath(format!("not valid UTF-8: {:?}", path)))?;
        if text.is_empty() {
            return Err(VfsError::InvalidPath("empty path".into()));
        }
        if text.contains('\0') {
            return Err(VfsError::InvalidPath(format!(
                "path contains null byte: {:?}",
                text
            )));
        }

        let absolute = if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.working_dir().join(path)
        };
        Ok(path_clean::clean(&absolute))
    }

    /// Walk `path` one node at a time
    ///
    /// Only one node lock is held at any moment: a directory is locked to
    /// read a child id, released, and then the child is fetched and locked.
    pub(in crate::vfs) fn resolve(&self, path: impl AsRef<Path>) -> VfsResult<Resolution> {
        let path = self.canonicalize(path.as_ref())?;
        let segments = segments(&path);

        let mut current = Arc::clone(&self.root);
        let Some((leaf, dirs)) = segments.split_last() else {
            return Ok(Resolution {
                path,
                parent: current,
                target: None,
                missing: Vec::new(),
            });
        };

        for (depth, segment) in dirs.iter().enumerate() {
            let Some(next) = self.lookup(&current, segment) else {
                trace!(path = %path.display(), segment = %segment, "Resolution stopped at missing segment");
                return Ok(Resolution {
                    path,
                    parent: current,
                    target: None,
                    missing: segments[depth..].to_vec(),
                });
            };
            if !next.lock().is_dir() {
                return Err(VfsError::InvalidPath(format!(
                    "not a directory: {} in {}",
                    segment,
                    path.display()
                )));
            }
            current = next;
        }

        let target = self.lookup(&current, leaf);
        let missing = if target.is_some() {
            Vec::new()
        } else {
            vec![leaf.clone()]
        };
        trace!(path = %path.display(), found = target.is_some(), "Resolved path");

        Ok(Resolution {
            path,
            parent: current,
            target,
            missing,
        })
    }

    fn lookup(&self, dir: &NodeRef, name: &str) -> Option<NodeRef> {
        let id = dir.lock().child(name)?;
        self.arena.get(id)
    }
}

/// Normal segments of a canonical path
fn segments(path: &Path) -> Vec<String> {
    path.components()
        .filter_map(|component| match component {
            Component::Normal(segment) => segment.to_str().map(str::to_owned),
            _ => None,
        })
        .collect()
}
