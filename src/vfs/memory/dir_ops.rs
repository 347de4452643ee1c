/*!
 * Directory Operations Implementation
 * Creation, removal and listing of tree entries
 */

use std::path::Path;
use tracing::debug;

use super::super::types::*;
use super::listing::DirEntry;
use super::{traced, Link, MemFs, NewNode};

impl MemFs {
    /// Create a directory and any missing ancestors
    ///
    /// Existing directories along the way are reused; a file anywhere on the
    /// path fails with InvalidPath.
    pub fn mkdir_all(&self, path: impl AsRef<Path>, perm: impl Into<Permissions>) -> VfsResult<()> {
        let path = path.as_ref();
        let perm = perm.into();
        traced("mkdir_all", path, || {
            let resolved = self.resolve(path)?;
            if let Some(target) = &resolved.target {
                if !target.lock().is_dir() {
                    return Err(VfsError::InvalidPath(format!(
                        "not a directory: {}",
                        path.display()
                    )));
                }
                return Ok(());
            }

            let mut current = resolved.parent;
            for segment in &resolved.missing {
                current = match self.link_child(&current, segment, NewNode::Directory(perm))? {
                    Link::Created(node) => {
                        debug!(path = %resolved.path.display(), segment = %segment, "Created directory");
                        node
                    }
                    Link::Existing(node) => {
                        if !node.lock().is_dir() {
                            return Err(VfsError::InvalidPath(format!(
                                "not a directory: {}",
                                segment
                            )));
                        }
                        node
                    }
                };
            }
            Ok(())
        })
    }

    /// Create a single directory whose parent already exists
    ///
    /// `mkdir("/")` succeeds without doing anything.
    pub fn mkdir(&self, path: impl AsRef<Path>, perm: impl Into<Permissions>) -> VfsResult<()> {
        let path = path.as_ref();
        let perm = perm.into();
        traced("mkdir", path, || {
            let resolved = self.resolve(path)?;
            if resolved.is_root() {
                return Ok(());
            }
            if resolved.target.is_some() {
                return Err(VfsError::AlreadyExists(path.display().to_string()));
            }

            let name = resolved.missing_leaf()?;
            match self.link_child(&resolved.parent, name, NewNode::Directory(perm))? {
                Link::Created(_) => {
                    debug!(path = %resolved.path.display(), mode = %perm, "Created directory");
                    Ok(())
                }
                Link::Existing(_) => Err(VfsError::AlreadyExists(path.display().to_string())),
            }
        })
    }

    /// Remove a file or an empty directory
    ///
    /// Open handles on the removed node turn stale.
    pub fn remove(&self, path: impl AsRef<Path>) -> VfsResult<()> {
        let path = path.as_ref();
        traced("remove", path, || self.remove_node(path))
    }

    /// Same contract as [`MemFs::remove`]: non-empty directories are refused
    pub fn remove_all(&self, path: impl AsRef<Path>) -> VfsResult<()> {
        let path = path.as_ref();
        traced("remove_all", path, || self.remove_node(path))
    }

    fn remove_node(&self, path: &Path) -> VfsResult<()> {
        let resolved = self.resolve(path)?;
        if resolved.is_root() {
            return Err(VfsError::InvalidPath("cannot remove the root directory".into()));
        }
        let Some(target) = &resolved.target else {
            return Err(VfsError::NotExist(path.display().to_string()));
        };
        self.detach(&resolved.parent, target, &resolved.path)
    }

    /// Every child of a directory, sorted by name
    pub fn read_dir(&self, path: impl AsRef<Path>) -> VfsResult<Vec<DirEntry>> {
        let path = path.as_ref();
        traced("read_dir", path, || {
            let dir = self
                .resolve(path)?
                .existing()
                .ok_or_else(|| VfsError::NotExist(path.display().to_string()))?;
            if !dir.lock().is_dir() {
                return Err(VfsError::InvalidPath(format!(
                    "not a directory: {}",
                    path.display()
                )));
            }

            Ok(self
                .arena
                .children(&dir)
                .into_iter()
                .map(|(name, node)| DirEntry::new(name, node))
                .collect())
        })
    }
}
