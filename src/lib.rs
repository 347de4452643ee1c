/*!
 * MemFS Kernel Library
 * Concurrent in-memory filesystem exposed as a library
 */

pub mod core;
pub mod monitoring;
pub mod vfs;

// Re-exports
pub use monitoring::init_tracing;
pub use vfs::{
    DirEntry, Entry, ErrorKind, FileHandle, FileInfo, FileSystem, FileType, MemFs, MemFsConfig,
    Metadata, OpenFile, OpenFlags, Permissions, VfsError, VfsResult, Whence,
};
