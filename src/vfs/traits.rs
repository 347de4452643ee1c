/*!
 * VFS Traits
 * Core filesystem abstraction traits
 */

use std::io::{Read, Seek, Write};
use std::path::{Path, PathBuf};

use super::types::*;

/// Virtual filesystem trait
///
/// Path-addressed operations of a hierarchical store. Relative paths are
/// resolved against the implementation's working directory.
pub trait FileSystem: Send + Sync {
    /// Handle type produced by the open calls
    type File: OpenFile;

    /// Open an existing file or directory read-only
    fn open(&self, path: &Path) -> VfsResult<Self::File>;

    /// Create or truncate a file, opened read-write
    fn create(&self, path: &Path) -> VfsResult<Self::File>;

    /// Open with explicit flags; `perm` applies to newly created files
    fn open_file(&self, path: &Path, flags: OpenFlags, perm: Permissions) -> VfsResult<Self::File>;

    /// Get file metadata
    fn metadata(&self, path: &Path) -> VfsResult<Metadata>;

    /// List directory contents, sorted by name
    fn list_dir(&self, path: &Path) -> VfsResult<Vec<Entry>>;

    /// Create a single directory (parent must exist)
    fn create_dir(&self, path: &Path, perm: Permissions) -> VfsResult<()>;

    /// Create directory (including parents)
    fn create_dir_all(&self, path: &Path, perm: Permissions) -> VfsResult<()>;

    /// Remove a file or an empty directory
    fn remove(&self, path: &Path) -> VfsResult<()>;

    /// Remove entry; stores may refuse non-empty directories
    fn remove_all(&self, path: &Path) -> VfsResult<()>;

    /// Create a uniquely named file in `dir`
    fn create_temp(&self, dir: &Path, pattern: &str) -> VfsResult<Self::File>;

    /// Create a uniquely named directory in `dir` and return its path
    fn create_temp_dir(&self, dir: &Path, pattern: &str) -> VfsResult<PathBuf>;

    /// Default directory for temporary entries
    fn temp_dir(&self) -> PathBuf;

    /// Get filesystem name/type
    fn name(&self) -> &str;

    /// Check if file/directory exists
    fn exists(&self, path: &Path) -> bool {
        self.metadata(path).is_ok()
    }
}

/// Open file handle trait
///
/// Represents an open file with read/write/seek capabilities.
pub trait OpenFile: Read + Write + Seek + Send + Sync {
    /// Read at an absolute offset
    fn read_at(&mut self, buf: &mut [u8], offset: i64) -> VfsResult<usize>;

    /// Write at an absolute offset
    fn write_at(&mut self, buf: &[u8], offset: i64) -> VfsResult<usize>;

    /// Get file metadata
    fn metadata(&self) -> VfsResult<Metadata>;

    /// Release the handle; later calls fail
    fn close(&mut self) -> VfsResult<()>;

    /// Name of the underlying node
    fn name(&self) -> String;
}

/// Filesystem builder trait for configuration
pub trait FileSystemBuilder {
    type Output: FileSystem;

    /// Build the filesystem instance
    fn build(self) -> VfsResult<Self::Output>;
}
