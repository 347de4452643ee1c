/*!
 * Trait Implementations
 * Wires the in-memory store into the generic filesystem traits
 */

use std::path::{Path, PathBuf};

use super::super::config::MemFsConfig;
use super::super::traits::{FileSystem, FileSystemBuilder, OpenFile};
use super::super::types::*;
use super::file_handle::FileHandle;
use super::MemFs;

impl FileSystem for MemFs {
    type File = FileHandle;

    fn open(&self, path: &Path) -> VfsResult<FileHandle> {
        MemFs::open(self, path)
    }

    fn create(&self, path: &Path) -> VfsResult<FileHandle> {
        MemFs::create(self, path)
    }

    fn open_file(&self, path: &Path, flags: OpenFlags, perm: Permissions) -> VfsResult<FileHandle> {
        MemFs::open_file(self, path, flags, perm)
    }

    fn metadata(&self, path: &Path) -> VfsResult<Metadata> {
        Ok(self.stat(path)?.metadata())
    }

    fn list_dir(&self, path: &Path) -> VfsResult<Vec<Entry>> {
        Ok(self.read_dir(path)?.iter().map(|e| e.to_entry()).collect())
    }

    fn create_dir(&self, path: &Path, perm: Permissions) -> VfsResult<()> {
        self.mkdir(path, perm)
    }

    fn create_dir_all(&self, path: &Path, perm: Permissions) -> VfsResult<()> {
        self.mkdir_all(path, perm)
    }

    fn remove(&self, path: &Path) -> VfsResult<()> {
        MemFs::remove(self, path)
    }

    fn remove_all(&self, path: &Path) -> VfsResult<()> {
        MemFs::remove_all(self, path)
    }

    fn create_temp(&self, dir: &Path, pattern: &str) -> VfsResult<FileHandle> {
        MemFs::create_temp(self, dir, pattern)
    }

    fn create_temp_dir(&self, dir: &Path, pattern: &str) -> VfsResult<PathBuf> {
        self.mkdir_temp(dir, pattern)
    }

    fn temp_dir(&self) -> PathBuf {
        MemFs::temp_dir(self)
    }

    fn name(&self) -> &str {
        "memory"
    }

    fn exists(&self, path: &Path) -> bool {
        MemFs::exists(self, path)
    }
}

impl OpenFile for FileHandle {
    fn read_at(&mut self, buf: &mut [u8], offset: i64) -> VfsResult<usize> {
        FileHandle::read_at(self, buf, offset)
    }

    fn write_at(&mut self, buf: &[u8], offset: i64) -> VfsResult<usize> {
        FileHandle::write_at(self, buf, offset)
    }

    fn metadata(&self) -> VfsResult<Metadata> {
        Ok(self.stat()?.metadata())
    }

    fn close(&mut self) -> VfsResult<()> {
        FileHandle::close(self)
    }

    fn name(&self) -> String {
        FileHandle::name(self)
    }
}

impl FileSystemBuilder for MemFsConfig {
    type Output = MemFs;

    fn build(self) -> VfsResult<MemFs> {
        MemFs::with_config(self)
    }
}
