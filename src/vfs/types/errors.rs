/*!
 * VFS Error Types
 * Structured, type-safe error handling for filesystem operations
 */

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::io;
use thiserror::Error;

/// VFS operation result
///
/// # Must Use
/// VFS operations can fail and must be handled to prevent data loss
#[must_use = "VFS operations can fail and must be handled"]
pub type VfsResult<T> = Result<T, VfsError>;

/// VFS errors with structured, type-safe error handling
///
/// All error variants with context carry the path or handle name involved.
/// Serialization uses tagged enum pattern for type safety.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case", tag = "error", content = "details")]
pub enum VfsError {
    /// Malformed path, non-directory component, negative offset,
    /// disallowed flag combination or non-empty directory removal
    #[error("Invalid path: {0}")]
    InvalidPath(#[serde(deserialize_with = "deserialize_nonempty_string")] String),

    #[error("Path does not exist: {0}")]
    NotExist(#[serde(deserialize_with = "deserialize_nonempty_string")] String),

    #[error("Already exists: {0}")]
    AlreadyExists(#[serde(deserialize_with = "deserialize_nonempty_string")] String),

    #[error("File closed: {0}")]
    Closed(#[serde(deserialize_with = "deserialize_nonempty_string")] String),

    /// The handle's node was removed from the tree
    #[error("File unlinked: {0}")]
    Stale(#[serde(deserialize_with = "deserialize_nonempty_string")] String),

    #[error("End of data")]
    EndOfData,
}

/// Error classification without the context payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidPath,
    NotExist,
    AlreadyExists,
    Closed,
    Stale,
    EndOfData,
}

impl VfsError {
    /// Get the kind of this error
    #[inline]
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            VfsError::InvalidPath(_) => ErrorKind::InvalidPath,
            VfsError::NotExist(_) => ErrorKind::NotExist,
            VfsError::AlreadyExists(_) => ErrorKind::AlreadyExists,
            VfsError::Closed(_) => ErrorKind::Closed,
            VfsError::Stale(_) => ErrorKind::Stale,
            VfsError::EndOfData => ErrorKind::EndOfData,
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ErrorKind::InvalidPath => write!(f, "invalid path"),
            ErrorKind::NotExist => write!(f, "not exist"),
            ErrorKind::AlreadyExists => write!(f, "already exists"),
            ErrorKind::Closed => write!(f, "closed"),
            ErrorKind::Stale => write!(f, "stale"),
            ErrorKind::EndOfData => write!(f, "end of data"),
        }
    }
}

impl From<VfsError> for io::Error {
    fn from(err: VfsError) -> Self {
        let kind = match err.kind() {
            ErrorKind::InvalidPath => io::ErrorKind::InvalidInput,
            ErrorKind::NotExist => io::ErrorKind::NotFound,
            ErrorKind::AlreadyExists => io::ErrorKind::AlreadyExists,
            ErrorKind::EndOfData => io::ErrorKind::UnexpectedEof,
            ErrorKind::Closed | ErrorKind::Stale => io::ErrorKind::Other,
        };
        io::Error::new(kind, err)
    }
}

/// Deserialize and validate non-empty string for error messages
pub(super) fn deserialize_nonempty_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    if s.is_empty() {
        return Err(serde::de::Error::custom("error message must not be empty"));
    }
    Ok(s)
}
