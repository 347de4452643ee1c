/*!
 * Virtual File System Module
 * In-memory hierarchical store behind a pluggable filesystem abstraction
 */

pub mod config;
pub mod memory;
pub mod traits;
pub mod types;

// Re-exports
pub use config::MemFsConfig;
pub use memory::{DirEntry, FileHandle, FileInfo, MemFs, Whence};
pub use traits::{FileSystem, FileSystemBuilder, OpenFile};
pub use types::{
    Entry, ErrorKind, FileType, Metadata, OpenFlags, Permissions, VfsError, VfsResult,
};
