/*!
 * VFS Open Flags
 * Independent open-mode bits and their exact-pattern interpretation
 */

use serde::{Deserialize, Serialize};

// POSIX flag values (Linux)
const O_ACCMODE: u32 = 0x0003;
const O_RDONLY: u32 = 0x0000;
const O_WRONLY: u32 = 0x0001;
const O_RDWR: u32 = 0x0002;
const O_CREAT: u32 = 0x0040;
const O_EXCL: u32 = 0x0080;
const O_TRUNC: u32 = 0x0200;
const O_APPEND: u32 = 0x0400;

fn is_false(value: &bool) -> bool {
    !*value
}

/// File open flags with compact serialization (skips false values)
///
/// Each field is an independent bit. Read-only is matched as an exact
/// pattern: `{read}` and nothing else. A handle opened `{read, create}`
/// can therefore neither read nor write.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case", default, deny_unknown_fields)]
pub struct OpenFlags {
    #[serde(skip_serializing_if = "is_false")]
    pub read: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub write: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub append: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub truncate: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub create: bool,
    /// Exclusive create; only meaningful together with `create`
    #[serde(skip_serializing_if = "is_false")]
    pub create_new: bool,
}

impl OpenFlags {
    /// Create read-only flags
    #[inline]
    #[must_use]
    pub fn read_only() -> Self {
        Self {
            read: true,
            ..Default::default()
        }
    }

    /// Create write-only flags
    #[inline]
    #[must_use]
    pub fn write_only() -> Self {
        Self {
            write: true,
            ..Default::default()
        }
    }

    /// Create read-write flags
    #[inline]
    #[must_use]
    pub fn read_write() -> Self {
        Self {
            read: true,
            write: true,
            ..Default::default()
        }
    }

    /// Flags used by `create`: read-write, create, truncate
    #[inline]
    #[must_use]
    pub fn create() -> Self {
        Self {
            read: true,
            write: true,
            create: true,
            truncate: true,
            ..Default::default()
        }
    }

    /// Read-write, create, fail if the file already exists
    #[inline]
    #[must_use]
    pub fn create_new() -> Self {
        Self {
            read: true,
            write: true,
            create: true,
            create_new: true,
            ..Default::default()
        }
    }

    /// Create flags for appending (write + append)
    #[inline]
    #[must_use]
    pub fn append_only() -> Self {
        Self {
            write: true,
            append: true,
            ..Default::default()
        }
    }

    /// Builder-style setters
    #[inline]
    #[must_use]
    pub fn with_create(mut self) -> Self {
        self.create = true;
        self
    }

    #[inline]
    #[must_use]
    pub fn with_truncate(mut self) -> Self {
        self.truncate = true;
        self
    }

    /// Exactly `{read}` and no other bit
    #[inline]
    #[must_use]
    pub fn is_read_only(&self) -> bool {
        *self == Self::read_only()
    }

    /// Both access bits set
    #[inline]
    #[must_use]
    pub const fn is_read_write(&self) -> bool {
        self.read && self.write
    }

    #[inline]
    #[must_use]
    pub fn can_read(&self) -> bool {
        self.is_read_only() || self.is_read_write()
    }

    #[inline]
    #[must_use]
    pub const fn can_write(&self) -> bool {
        self.write
    }

    /// Create together with exclusive create
    #[inline]
    #[must_use]
    pub const fn is_exclusive_create(&self) -> bool {
        self.create && self.create_new
    }

    /// Convert from POSIX-style flags (O_RDONLY, O_WRONLY, O_RDWR, etc.)
    pub fn from_posix(flags: u32) -> Self {
        let access_mode = flags & O_ACCMODE;
        let read = access_mode == O_RDONLY || access_mode == O_RDWR;
        let write = access_mode == O_WRONLY || access_mode == O_RDWR;

        Self {
            read,
            write,
            append: flags & O_APPEND != 0,
            truncate: flags & O_TRUNC != 0,
            create: flags & O_CREAT != 0,
            create_new: flags & O_EXCL != 0,
        }
    }

    /// Convert to POSIX-style flags
    pub fn to_posix(&self) -> u32 {
        let mut flags = match (self.read, self.write) {
            (true, true) => O_RDWR,
            (false, true) => O_WRONLY,
            _ => O_RDONLY,
        };

        if self.append {
            flags |= O_APPEND;
        }
        if self.truncate {
            flags |= O_TRUNC;
        }
        if self.create {
            flags |= O_CREAT;
        }
        if self.create_new {
            flags |= O_EXCL;
        }

        flags
    }
}
