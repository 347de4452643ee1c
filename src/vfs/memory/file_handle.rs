/*!
 * File Handle
 * Open handle over a node: content cursor, listing cursors, lifecycle
 */

use std::fmt;
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::time::SystemTime;
use tracing::debug;

use super::super::types::{OpenFlags, VfsError, VfsResult};
use super::content::{self, ContentCursor, Whence};
use super::info::FileInfo;
use super::listing::{DirEntry, ListingCursors};
use super::node::{label_of, Node, NodeKind, NodeRef};
use super::Arena;
use crate::core::HandleId;

/// Handle returned by `open`, `open_file`, `create` and `create_temp`
///
/// Checks run in a fixed order: closed, then removed (stale), then node
/// kind, then open flags. A handle is not meant to be shared between
/// threads without external synchronization; `&mut self` enforces that.
pub struct FileHandle {
    id: HandleId,
    node: NodeRef,
    arena: Arena,
    flags: OpenFlags,
    cursor: ContentCursor,
    listing: ListingCursors,
    closed: bool,
}

impl FileHandle {
    pub(super) fn new(
        id: HandleId,
        node: NodeRef,
        arena: Arena,
        flags: OpenFlags,
        position: u64,
    ) -> Self {
        Self {
            id,
            node,
            arena,
            flags,
            cursor: ContentCursor::at(position),
            listing: ListingCursors::default(),
            closed: false,
        }
    }

    #[inline]
    pub fn id(&self) -> HandleId {
        self.id
    }

    #[inline]
    pub fn flags(&self) -> OpenFlags {
        self.flags
    }

    /// Name of the node (the final path segment it was opened by)
    pub fn name(&self) -> String {
        self.node.lock().name.clone()
    }

    #[inline]
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Current content position
    #[inline]
    pub fn position(&self) -> u64 {
        self.cursor.position()
    }

    fn ensure_open(&self) -> VfsResult<()> {
        if self.closed {
            return Err(VfsError::Closed(self.name()));
        }
        Ok(())
    }

    /// Close the handle; every later call fails with Closed
    pub fn close(&mut self) -> VfsResult<()> {
        self.ensure_open()?;
        self.closed = true;
        debug!(handle = %self.id, name = %self.name(), "Closed handle");
        Ok(())
    }

    /// Live metadata of the node
    pub fn stat(&self) -> VfsResult<FileInfo> {
        self.ensure_open()?;
        check_attached(&self.node.lock())?;
        Ok(FileInfo::new(self.node.clone()))
    }

    /// Read from the cursor
    pub fn read(&mut self, buf: &mut [u8]) -> VfsResult<usize> {
        self.ensure_open()?;
        let node = self.node.lock();
        let data = readable(&node, self.flags)?;
        self.cursor.read(data, buf)
    }

    /// Move the cursor to `offset`, then read
    ///
    /// The cursor is shared with `read`, so a later `read` continues after
    /// the bytes returned here.
    pub fn read_at(&mut self, buf: &mut [u8], offset: i64) -> VfsResult<usize> {
        self.ensure_open()?;
        let node = self.node.lock();
        let data = readable(&node, self.flags)?;
        let offset = non_negative(offset)?;
        self.cursor.set(offset);
        self.cursor.read(data, buf)
    }

    /// Write at the cursor, zero-filling any gap, and advance
    pub fn write(&mut self, buf: &[u8]) -> VfsResult<usize> {
        self.ensure_open()?;
        let mut node = self.node.lock();
        let n = {
            let data = writable(&mut node, self.flags)?;
            self.cursor.write(data, buf)?
        };
        node.modified = SystemTime::now();
        Ok(n)
    }

    /// Write at `offset` without moving the cursor
    ///
    /// Refused on handles opened for append.
    pub fn write_at(&mut self, buf: &[u8], offset: i64) -> VfsResult<usize> {
        self.ensure_open()?;
        let mut node = self.node.lock();
        let n = {
            let data = writable(&mut node, self.flags)?;
            if self.flags.append {
                return Err(VfsError::InvalidPath(
                    "write_at is not allowed on a handle opened for append".into(),
                ));
            }
            let offset = non_negative(offset)?;
            content::write_at(data, buf, offset)?
        };
        node.modified = SystemTime::now();
        Ok(n)
    }

    /// Move the cursor; `Whence::End` is relative to the content length
    pub fn seek(&mut self, offset: i64, whence: Whence) -> VfsResult<u64> {
        self.ensure_open()?;
        let node = self.node.lock();
        check_attached(&node)?;
        let len = match &node.kind {
            NodeKind::File { data } => data.len() as u64,
            NodeKind::Directory { .. } => {
                return Err(VfsError::InvalidPath(format!(
                    "cannot seek a directory: {}",
                    node.label()
                )))
            }
        };
        self.cursor.seek(len, offset, whence)
    }

    /// Next page of directory entries
    pub fn read_dir(&mut self, n: isize) -> VfsResult<Vec<DirEntry>> {
        let children = self.list_children()?;
        let page = self.listing.entries.next_page(children, n);
        Ok(page
            .into_iter()
            .map(|(name, node)| DirEntry::new(name, node))
            .collect())
    }

    /// Next page of child metadata
    pub fn readdir(&mut self, n: isize) -> VfsResult<Vec<FileInfo>> {
        let children = self.list_children()?;
        let page = self.listing.infos.next_page(children, n);
        Ok(page.into_iter().map(|(_, node)| FileInfo::new(node)).collect())
    }

    /// Next page of child names
    pub fn readdir_names(&mut self, n: isize) -> VfsResult<Vec<String>> {
        let children = self.list_children()?;
        let page = self.listing.names.next_page(children, n);
        Ok(page.into_iter().map(|(name, _)| name).collect())
    }

    /// Fresh sorted snapshot of the directory's children
    fn list_children(&self) -> VfsResult<Vec<(String, NodeRef)>> {
        self.ensure_open()?;
        {
            let node = self.node.lock();
            check_attached(&node)?;
            if !node.is_dir() {
                return Err(VfsError::InvalidPath(format!(
                    "not a directory: {}",
                    node.label()
                )));
            }
        }
        Ok(self.arena.children(&self.node))
    }

    #[cfg(test)]
    pub(super) fn listing_positions(&self) -> (usize, usize, usize) {
        let ListingCursors {
            entries,
            infos,
            names,
        } = self.listing;
        (entries.index(), infos.index(), names.index())
    }
}

fn check_attached(node: &Node) -> VfsResult<()> {
    if node.detached {
        return Err(VfsError::Stale(node.label().to_string()));
    }
    Ok(())
}

fn non_negative(offset: i64) -> VfsResult<u64> {
    u64::try_from(offset)
        .map_err(|_| VfsError::InvalidPath(format!("negative offset: {}", offset)))
}

/// Content of a live file the handle may read
fn readable(node: &Node, flags: OpenFlags) -> VfsResult<&[u8]> {
    check_attached(node)?;
    let NodeKind::File { data } = &node.kind else {
        return Err(VfsError::InvalidPath(format!(
            "cannot read a directory: {}",
            node.label()
        )));
    };
    if !flags.can_read() {
        return Err(VfsError::InvalidPath(format!(
            "handle not opened for reading: {}",
            node.name
        )));
    }
    Ok(data.as_slice())
}

/// Content of a live file the handle may write
fn writable(node: &mut Node, flags: OpenFlags) -> VfsResult<&mut Vec<u8>> {
    check_attached(node)?;
    let Node { name, kind, .. } = node;
    let NodeKind::File { data } = kind else {
        return Err(VfsError::InvalidPath(format!(
            "cannot write a directory: {}",
            label_of(name)
        )));
    };
    if !flags.can_write() {
        return Err(VfsError::InvalidPath(format!(
            "handle not opened for writing: {}",
            name
        )));
    }
    Ok(data)
}

impl fmt::Debug for FileHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileHandle")
            .field("id", &self.id)
            .field("flags", &self.flags)
            .field("position", &self.cursor.position())
            .field("closed", &self.closed)
            .finish()
    }
}

impl Read for FileHandle {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match FileHandle::read(self, buf) {
            Ok(n) => Ok(n),
            Err(VfsError::EndOfData) => Ok(0),
            Err(e) => Err(e.into()),
        }
    }
}

impl Write for FileHandle {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        FileHandle::write(self, buf).map_err(io::Error::from)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Seek for FileHandle {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        let (offset, whence) = match pos {
            SeekFrom::Start(offset) => {
                let offset = i64::try_from(offset).map_err(|_| {
                    io::Error::new(io::ErrorKind::InvalidInput, "seek offset out of range")
                })?;
                (offset, Whence::Start)
            }
            SeekFrom::Current(offset) => (offset, Whence::Current),
            SeekFrom::End(offset) => (offset, Whence::End),
        };
        FileHandle::seek(self, offset, whence).map_err(io::Error::from)
    }
}
