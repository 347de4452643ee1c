/*!
 * Content Engine
 * Cursor-based reads, writes and seeks over a file's byte buffer
 */

use serde::{Deserialize, Serialize};

use super::super::types::{VfsError, VfsResult};

/// Reference point for a seek
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Whence {
    Start,
    Current,
    End,
}

/// Per-handle byte position
///
/// The position may sit past the end of the content. Reads there report
/// end of data and the next write zero-fills the gap.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub(super) struct ContentCursor {
    pos: u64,
}

impl ContentCursor {
    pub fn at(pos: u64) -> Self {
        Self { pos }
    }

    #[inline]
    pub fn position(&self) -> u64 {
        self.pos
    }

    #[inline]
    pub fn set(&mut self, pos: u64) {
        self.pos = pos;
    }

    /// Copy bytes from the cursor into `buf` and advance
    pub fn read(&mut self, data: &[u8], buf: &mut [u8]) -> VfsResult<usize> {
        let start = match usize::try_from(self.pos) {
            Ok(start) if start < data.len() => start,
            _ => return Err(VfsError::EndOfData),
        };
        let n = buf.len().min(data.len() - start);
        buf[..n].copy_from_slice(&data[start..start + n]);
        self.pos += n as u64;
        Ok(n)
    }

    /// Write `buf` at the cursor and advance past it
    pub fn write(&mut self, data: &mut Vec<u8>, buf: &[u8]) -> VfsResult<usize> {
        let n = write_at(data, buf, self.pos)?;
        self.pos += n as u64;
        Ok(n)
    }

    /// Move the cursor; `len` is the current content length
    ///
    /// Landing past the end is allowed and allocates nothing.
    pub fn seek(&mut self, len: u64, offset: i64, whence: Whence) -> VfsResult<u64> {
        let base = match whence {
            Whence::Start => 0,
            Whence::Current => self.pos,
            Whence::End => len,
        };
        let target = i128::from(base) + i128::from(offset);
        let pos = u64::try_from(target).map_err(|_| {
            VfsError::InvalidPath(format!("seek to negative position {}", target))
        })?;
        self.pos = pos;
        Ok(pos)
    }
}

/// Write `buf` at `offset`, zero-filling any gap past the current end
///
/// Bytes beyond `offset + buf.len()` are left untouched.
pub(super) fn write_at(data: &mut Vec<u8>, buf: &[u8], offset: u64) -> VfsResult<usize> {
    let out_of_range = || VfsError::InvalidPath(format!("offset out of range: {}", offset));
    let start = usize::try_from(offset).map_err(|_| out_of_range())?;
    let end = start
        .checked_add(buf.len())
        .filter(|&end| end <= isize::MAX as usize)
        .ok_or_else(out_of_range)?;

    if data.len() < end {
        data.try_reserve(end - data.len()).map_err(|_| out_of_range())?;
        data.resize(end, 0);
    }
    data[start..end].copy_from_slice(buf);
    Ok(buf.len())
}
