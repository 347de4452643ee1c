/*!
 * VFS Metadata
 * Point-in-time snapshot of a node's metadata
 */

use super::file_type::FileType;
use super::permissions::Permissions;
use serde::{Deserialize, Serialize};
use std::time::SystemTime;

/// Metadata snapshot
///
/// `size` is 0 for directories and for files that have been removed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case", deny_unknown_fields)]
pub struct Metadata {
    pub name: String,
    pub file_type: FileType,
    #[serde(default)]
    pub size: u64,
    #[serde(default)]
    pub permissions: Permissions,
    pub modified: SystemTime,
}

impl Metadata {
    /// Check if this is a directory
    #[inline(always)]
    #[must_use]
    pub const fn is_dir(&self) -> bool {
        matches!(self.file_type, FileType::Directory)
    }

    /// Check if this is a regular file
    #[inline(always)]
    #[must_use]
    pub const fn is_file(&self) -> bool {
        matches!(self.file_type, FileType::File)
    }
}
