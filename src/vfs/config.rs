/*!
 * MemFS Configuration
 * Construction-time settings for the in-memory store
 */

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::types::{Entry, VfsError, VfsResult};
use crate::core::limits::{DEFAULT_TEMP_DIR_NAME, FIRST_HANDLE_ID, TEMP_NAME_LEN};

/// In-memory store configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MemFsConfig {
    /// Single root segment holding temporary files
    pub temp_dir_name: String,
    /// Length of the random run used for temp names
    pub temp_name_len: usize,
    /// First value of the handle identifier counter
    pub first_handle_id: u64,
    /// Working directory for relative paths (`None` = process working directory)
    pub working_dir: Option<PathBuf>,
    /// Create the working directory chain at construction
    pub seed_working_dir: bool,
}

impl Default for MemFsConfig {
    fn default() -> Self {
        Self {
            temp_dir_name: DEFAULT_TEMP_DIR_NAME.to_string(),
            temp_name_len: TEMP_NAME_LEN,
            first_handle_id: FIRST_HANDLE_ID,
            working_dir: None,
            seed_working_dir: true,
        }
    }
}

impl MemFsConfig {
    /// Configuration detached from the host process: working directory `/`,
    /// nothing seeded besides the root and the temp directory
    pub fn isolated() -> Self {
        Self {
            working_dir: Some(PathBuf::from("/")),
            seed_working_dir: false,
            ..Default::default()
        }
    }

    /// Use an explicit working directory
    #[must_use]
    pub fn with_working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    /// Parse configuration from JSON
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Validate settings before building a store
    #[must_use = "validation result must be checked"]
    pub fn validate(&self) -> VfsResult<()> {
        Entry::validate_name(&self.temp_dir_name)?;
        if self.temp_name_len == 0 {
            return Err(VfsError::InvalidPath(
                "temp_name_len must be greater than zero".into(),
            ));
        }
        if let Some(dir) = &self.working_dir {
            if !dir.is_absolute() {
                return Err(VfsError::InvalidPath(format!(
                    "working directory must be absolute: {}",
                    dir.display()
                )));
            }
        }
        Ok(())
    }
}
