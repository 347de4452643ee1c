/*!
 * VFS Types
 * Shared value types for filesystem operations
 */

mod entry;
mod errors;
mod file_type;
mod metadata;
mod open_flags;
mod permissions;

pub use entry::Entry;
pub use errors::{ErrorKind, VfsError, VfsResult};
pub use file_type::FileType;
pub use metadata::Metadata;
pub use open_flags::OpenFlags;
pub use permissions::Permissions;
