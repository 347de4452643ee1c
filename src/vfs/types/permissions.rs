/*!
 * VFS Permissions
 * Unix-style mode bits, stored but never enforced
 */

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

use crate::core::limits::{DEFAULT_DIR_MODE, DEFAULT_FILE_MODE};

/// File permissions (Unix-style) with validation
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Permissions {
    #[serde(deserialize_with = "deserialize_permission_mode")]
    pub mode: u32,
}

impl Permissions {
    /// Create permissions with mode validation (masks to valid bits)
    #[inline]
    #[must_use]
    pub const fn new(mode: u32) -> Self {
        Self {
            mode: mode & 0o7777,
        }
    }

    /// All permission bits (0o777)
    #[inline]
    #[must_use]
    pub const fn all() -> Self {
        Self {
            mode: DEFAULT_DIR_MODE,
        }
    }

    /// Default mode for created files (0o666)
    #[inline]
    #[must_use]
    pub const fn file_default() -> Self {
        Self {
            mode: DEFAULT_FILE_MODE,
        }
    }
}

/// Deserialize and validate permission mode (must be <= 0o7777)
fn deserialize_permission_mode<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let mode = u32::deserialize(deserializer)?;
    if mode > 0o7777 {
        return Err(serde::de::Error::custom(format!(
            "invalid permission mode: 0o{:o} exceeds maximum 0o7777",
            mode
        )));
    }
    Ok(mode)
}

impl Default for Permissions {
    fn default() -> Self {
        Self::file_default()
    }
}

impl From<u32> for Permissions {
    fn from(mode: u32) -> Self {
        Self::new(mode)
    }
}

impl fmt::Display for Permissions {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:04o}", self.mode)
    }
}
