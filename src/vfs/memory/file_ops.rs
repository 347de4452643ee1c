/*!
 * File Operations Implementation
 * Opening, creating and inspecting nodes by path
 */

use std::path::Path;
use std::time::SystemTime;
use tracing::debug;

use super::super::types::*;
use super::file_handle::FileHandle;
use super::info::FileInfo;
use super::node::{NodeKind, NodeRef};
use super::{traced, Link, MemFs, NewNode};
use crate::core::IdGenerator;

impl MemFs {
    /// Open an existing node read-only
    pub fn open(&self, path: impl AsRef<Path>) -> VfsResult<FileHandle> {
        self.open_file(path, OpenFlags::read_only(), Permissions::all())
    }

    /// Create or truncate a file, opened read-write with mode 0o666
    pub fn create(&self, path: impl AsRef<Path>) -> VfsResult<FileHandle> {
        self.open_file(path, OpenFlags::create(), Permissions::file_default())
    }

    /// Open with explicit flags; `perm` applies only when a file is created
    ///
    /// Existing directories open as directory handles whatever the flags.
    /// A missing file is created only when the flags carry `create` and the
    /// pattern is not exactly read-only.
    pub fn open_file(
        &self,
        path: impl AsRef<Path>,
        flags: OpenFlags,
        perm: impl Into<Permissions>,
    ) -> VfsResult<FileHandle> {
        let path = path.as_ref();
        let perm = perm.into();
        traced("open_file", path, || {
            let resolved = self.resolve(path)?;
            if resolved.missing.len() > 1 {
                return Err(VfsError::NotExist(path.display().to_string()));
            }
            if let Some(node) = resolved.existing() {
                return self.open_existing(path, node, flags);
            }

            if flags.is_read_only() {
                return Err(VfsError::NotExist(path.display().to_string()));
            }
            if !flags.create {
                return Err(VfsError::InvalidPath(format!(
                    "does not exist and flags do not allow creation: {}",
                    path.display()
                )));
            }

            let name = resolved.missing_leaf()?;
            match self.link_child(&resolved.parent, name, NewNode::File(perm))? {
                Link::Created(node) => {
                    debug!(path = %resolved.path.display(), mode = %perm, "Created file");
                    Ok(self.new_handle(path, node, flags, 0))
                }
                // Lost a creation race; the winner's node is opened instead
                Link::Existing(node) => self.open_existing(path, node, flags),
            }
        })
    }

    fn open_existing(&self, path: &Path, node: NodeRef, flags: OpenFlags) -> VfsResult<FileHandle> {
        let position = {
            let mut guard = node.lock();
            let mut truncated = false;
            let position = match &mut guard.kind {
                NodeKind::File { data } if flags.can_write() => {
                    if flags.is_exclusive_create() {
                        return Err(VfsError::AlreadyExists(path.display().to_string()));
                    }
                    if flags.truncate {
                        data.clear();
                        truncated = true;
                        0
                    } else if flags.append {
                        data.len() as u64
                    } else {
                        0
                    }
                }
                _ => 0,
            };
            if truncated {
                guard.modified = SystemTime::now();
            }
            position
        };
        Ok(self.new_handle(path, node, flags, position))
    }

    fn new_handle(&self, path: &Path, node: NodeRef, flags: OpenFlags, position: u64) -> FileHandle {
        let id = self.handle_ids.next();
        debug!(
            handle = %id,
            path = %path.display(),
            flags = flags.to_posix(),
            position,
            "Opened handle"
        );
        FileHandle::new(id, node, self.arena.clone(), flags, position)
    }

    /// Live metadata of the node at `path`
    pub fn stat(&self, path: impl AsRef<Path>) -> VfsResult<FileInfo> {
        let path = path.as_ref();
        traced("stat", path, || {
            self.resolve(path)?
                .existing()
                .map(FileInfo::new)
                .ok_or_else(|| VfsError::NotExist(path.display().to_string()))
        })
    }

    /// Whether anything exists at `path`
    pub fn exists(&self, path: impl AsRef<Path>) -> bool {
        self.stat(path).is_ok()
    }

    /// Create a file under `parent` only if `name` is free
    ///
    /// Returns `Ok(None)` when the name is taken by anything.
    pub(super) fn create_exclusive(
        &self,
        parent: &NodeRef,
        path: &Path,
        name: &str,
        perm: Permissions,
    ) -> VfsResult<Option<FileHandle>> {
        match self.link_child(parent, name, NewNode::File(perm))? {
            Link::Created(node) => Ok(Some(self.new_handle(
                path,
                node,
                OpenFlags::create_new(),
                0,
            ))),
            Link::Existing(_) => Ok(None),
        }
    }
}
