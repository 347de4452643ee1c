/*!
 * Directory Listing
 * Entry views and per-handle pagination state
 */

use std::fmt;

use super::super::types::{Entry, FileType};
use super::info::FileInfo;
use super::node::NodeRef;

/// One child of a directory, as seen when the listing was taken
#[derive(Clone)]
pub struct DirEntry {
    name: String,
    node: NodeRef,
}

impl DirEntry {
    pub(super) fn new(name: String, node: NodeRef) -> Self {
        Self { name, node }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_dir(&self) -> bool {
        self.node.lock().is_dir()
    }

    pub fn file_type(&self) -> FileType {
        self.node.lock().file_type()
    }

    /// Live metadata of the child
    pub fn info(&self) -> FileInfo {
        FileInfo::new(self.node.clone())
    }

    /// Plain name + type value
    pub fn to_entry(&self) -> Entry {
        Entry::new(self.name.clone(), self.file_type())
    }
}

impl fmt::Debug for DirEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DirEntry")
            .field("name", &self.name)
            .field("file_type", &self.file_type())
            .finish()
    }
}

/// Resume position of one listing view
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub(super) struct PageCursor {
    index: usize,
}

impl PageCursor {
    #[cfg(test)]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Take the next page from a fresh snapshot
    ///
    /// A negative `n`, or one covering everything left, returns the rest and
    /// rewinds to the start. Otherwise exactly `n` items are returned and the
    /// position advances; `n == 0` returns nothing and stays put.
    pub fn next_page<T>(&mut self, mut items: Vec<T>, n: isize) -> Vec<T> {
        let start = self.index.min(items.len());
        let rest = items.split_off(start);

        match usize::try_from(n) {
            Ok(count) if count < rest.len() => {
                self.index = start + count;
                rest.into_iter().take(count).collect()
            }
            _ => {
                self.index = 0;
                rest
            }
        }
    }
}

/// Independent cursors for the three listing views of a handle
#[derive(Debug, Default, Clone, Copy)]
pub(super) struct ListingCursors {
    pub entries: PageCursor,
    pub infos: PageCursor,
    pub names: PageCursor,
}
