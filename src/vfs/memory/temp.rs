/*!
 * Temporary Names
 * Unique file and directory creation from name patterns
 */

use rand::distributions::Alphanumeric;
use rand::Rng;
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

use super::super::types::*;
use super::file_handle::FileHandle;
use super::{traced, MemFs};
use crate::core::limits::{TEMP_DIR_MODE, TEMP_FILE_MODE, TEMP_NAME_PLACEHOLDER};

impl MemFs {
    /// Default directory for temporary files: `/tmp`
    pub fn temp_dir(&self) -> PathBuf {
        Path::new("/").join(&self.config.temp_dir_name)
    }

    /// Create a new file with a unique name in `dir` (empty means
    /// [`MemFs::temp_dir`]), mode 0o600, opened read-write
    ///
    /// The first `*` in `pattern` is replaced by a random alphanumeric run;
    /// without one the run is appended.
    pub fn create_temp(&self, dir: impl AsRef<Path>, pattern: &str) -> VfsResult<FileHandle> {
        validate_pattern(pattern)?;
        let dir = self.temp_parent(dir.as_ref())?;
        traced("create_temp", &dir, || {
            let parent = self
                .resolve(&dir)?
                .existing()
                .ok_or_else(|| VfsError::NotExist(dir.display().to_string()))?;

            loop {
                let name = self.temp_name(pattern);
                let path = dir.join(&name);
                match self.create_exclusive(&parent, &path, &name, Permissions::new(TEMP_FILE_MODE))? {
                    Some(handle) => {
                        debug!(path = %path.display(), "Created temporary file");
                        return Ok(handle);
                    }
                    None => trace!(name = %name, "Temporary name taken, retrying"),
                }
            }
        })
    }

    /// Create a new directory with a unique name in `dir`, mode 0o700, and
    /// return its path
    pub fn mkdir_temp(&self, dir: impl AsRef<Path>, pattern: &str) -> VfsResult<PathBuf> {
        validate_pattern(pattern)?;
        let dir = self.temp_parent(dir.as_ref())?;
        traced("mkdir_temp", &dir, || {
            loop {
                let path = dir.join(self.temp_name(pattern));
                match self.mkdir(&path, Permissions::new(TEMP_DIR_MODE)) {
                    Ok(()) => {
                        debug!(path = %path.display(), "Created temporary directory");
                        return Ok(path);
                    }
                    Err(VfsError::AlreadyExists(_)) => {
                        trace!(path = %path.display(), "Temporary name taken, retrying")
                    }
                    Err(e) => return Err(e),
                }
            }
        })
    }

    /// Canonical directory a temp entry goes into; must be an existing directory
    fn temp_parent(&self, dir: &Path) -> VfsResult<PathBuf> {
        let dir = if dir.as_os_str().is_empty() {
            self.temp_dir()
        } else {
            dir.to_path_buf()
        };

        let not_found = || {
            VfsError::NotExist(format!("not an existing directory: {}", dir.display()))
        };
        // Malformed text stays InvalidPath; a file along the way means no such directory
        let canonical = self.canonicalize(&dir)?;
        let resolved = self.resolve(&canonical).map_err(|_| not_found())?;
        match resolved.existing() {
            Some(node) if node.lock().is_dir() => Ok(resolved.path),
            _ => Err(not_found()),
        }
    }

    fn temp_name(&self, pattern: &str) -> String {
        let run = random_run(self.config.temp_name_len);
        if pattern.contains(TEMP_NAME_PLACEHOLDER) {
            pattern.replacen(TEMP_NAME_PLACEHOLDER, &run, 1)
        } else {
            format!("{}{}", pattern, run)
        }
    }
}

fn random_run(len: usize) -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(len)
        .map(char::from)
        .collect()
}

/// A pattern must be a single name segment; empty means a bare random run
fn validate_pattern(pattern: &str) -> VfsResult<()> {
    if pattern.is_empty() {
        return Ok(());
    }
    Entry::validate_name(pattern)
}
