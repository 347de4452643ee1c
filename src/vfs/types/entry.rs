/*!
 * VFS Directory Entry
 * Plain directory listing record with name validation
 */

use super::errors::VfsError;
use super::file_type::FileType;
use serde::{Deserialize, Deserializer, Serialize};

/// Directory entry value (name + type) used at the trait boundary
///
/// Entry names must be non-empty and cannot contain null bytes or path separators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Entry {
    #[serde(deserialize_with = "deserialize_valid_filename")]
    pub name: String,
    #[serde(default)]
    pub file_type: FileType,
}

impl Entry {
    /// Entry for a name already linked in the tree, so known to be valid
    pub(crate) fn new(name: String, file_type: FileType) -> Self {
        Self { name, file_type }
    }

    /// Validate a single path segment
    #[must_use = "validation result must be checked"]
    pub fn validate_name(name: &str) -> Result<(), VfsError> {
        name_problem(name).map_or(Ok(()), |problem| {
            Err(VfsError::InvalidPath(format!("{}: {:?}", problem, name)))
        })
    }
}

fn name_problem(name: &str) -> Option<&'static str> {
    if name.is_empty() {
        Some("entry name cannot be empty")
    } else if name.contains('\0') {
        Some("entry name cannot contain null bytes")
    } else if name.contains('/') || name.contains('\\') {
        Some("entry name cannot contain path separators")
    } else {
        None
    }
}

/// Deserialize and validate filename
fn deserialize_valid_filename<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let name = String::deserialize(deserializer)?;
    match name_problem(&name) {
        Some(problem) => Err(serde::de::Error::custom(problem)),
        None => Ok(name),
    }
}
