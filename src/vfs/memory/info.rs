/*!
 * Node Info
 * Live metadata view over a node
 */

use std::any::Any;
use std::fmt;
use std::time::SystemTime;

use super::super::types::{FileType, Metadata, Permissions};
use super::node::NodeRef;

/// Metadata view backed by the node itself
///
/// Every accessor reads the node at call time, so a value obtained before a
/// write reflects that write afterwards. Call [`FileInfo::metadata`] for a
/// frozen copy.
#[derive(Clone)]
pub struct FileInfo {
    node: NodeRef,
}

impl FileInfo {
    pub(super) fn new(node: NodeRef) -> Self {
        Self { node }
    }

    pub fn name(&self) -> String {
        self.node.lock().name.clone()
    }

    /// Content length; 0 for directories and removed files
    pub fn size(&self) -> u64 {
        self.node.lock().size()
    }

    /// Permission bits
    pub fn mode(&self) -> Permissions {
        self.node.lock().permissions
    }

    /// Permission bits combined with the type bit
    pub fn mode_bits(&self) -> u32 {
        let node = self.node.lock();
        node.permissions.mode | node.file_type().mode_bits()
    }

    pub fn modified(&self) -> SystemTime {
        self.node.lock().modified
    }

    pub fn is_dir(&self) -> bool {
        self.node.lock().is_dir()
    }

    pub fn file_type(&self) -> FileType {
        self.node.lock().file_type()
    }

    /// Backend-specific data; the in-memory store has none
    pub fn sys(&self) -> Option<&dyn Any> {
        None
    }

    /// Snapshot of the current values
    pub fn metadata(&self) -> Metadata {
        let node = self.node.lock();
        Metadata {
            name: node.name.clone(),
            file_type: node.file_type(),
            size: node.size(),
            permissions: node.permissions,
            modified: node.modified,
        }
    }
}

impl fmt::Debug for FileInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let meta = self.metadata();
        f.debug_struct("FileInfo")
            .field("name", &meta.name)
            .field("file_type", &meta.file_type)
            .field("size", &meta.size)
            .field("mode", &meta.permissions)
            .finish()
    }
}
