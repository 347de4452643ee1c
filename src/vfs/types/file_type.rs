/*!
 * VFS File Type Enum
 * Defines the type of filesystem objects
 */

use serde::{Deserialize, Serialize};
use std::fmt;

/// Node kind as seen by callers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileType {
    File,
    Directory,
}

impl FileType {
    /// Type bits as reported in a directory entry's mode
    #[inline]
    #[must_use]
    pub const fn mode_bits(&self) -> u32 {
        match self {
            FileType::File => 0,
            FileType::Directory => 0o040000,
        }
    }
}

impl Default for FileType {
    fn default() -> Self {
        Self::File
    }
}

impl fmt::Display for FileType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            FileType::File => write!(f, "file"),
            FileType::Directory => write!(f, "directory"),
        }
    }
}
