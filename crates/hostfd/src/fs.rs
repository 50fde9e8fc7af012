// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::io::SeekFrom;
use std::sync::Mutex;

use tracing::{Level, event};

use crate::ERR_POISONED_LOCK;
use crate::error::{Error, Result, translate_status};
use crate::fd::Fd;
use crate::pal::{HostHandle, Platform, SEEK_CUR, SEEK_END, SEEK_SET, STATUS_EOF, STATUS_OK};
use crate::table::HandleTable;

/// The caller-facing descriptor API.
///
/// Translates small-integer descriptors into the opaque handles the host
/// issued for them, invokes the matching host primitive, and routes every
/// raw result through the [`Error`] taxonomy. Construct one per host
/// boundary and share it; there is no hidden global instance.
///
/// # Concurrency
///
/// The layer performs no concurrency of its own; it is invoked by
/// arbitrarily many concurrent callers of the embedding runtime. The
/// descriptor table is the only shared mutable state and is guarded by a
/// single mutex: [`open`](Self::open) and [`close`](Self::close) mutate the
/// table and serialize against each other, while the data operations resolve
/// the handle under the lock and then call the host outside it. The host
/// boundary is assumed to serialize concurrent operations on the same handle
/// safely; where it does not, callers must not issue concurrent operations
/// on the same descriptor.
///
/// # Failure policy
///
/// Mutation is strict: a failed [`open`](Self::open) never creates a table
/// entry, and [`close`](Self::close) removes the entry even when the host
/// release fails - the descriptor is invalid regardless. No operation is
/// retried internally.
#[derive(Debug)]
pub struct FileSystem<P> {
    platform: P,
    table: Mutex<HandleTable>,
}

impl<P: Platform> FileSystem<P> {
    /// Creates a descriptor layer over the given host boundary.
    pub fn new(platform: P) -> Self {
        Self {
            platform,
            table: Mutex::new(HandleTable::new()),
        }
    }

    /// The host boundary this layer was constructed over.
    pub fn platform(&self) -> &P {
        &self.platform
    }

    /// Number of live descriptors.
    pub fn open_count(&self) -> usize {
        self.table.lock().expect(ERR_POISONED_LOCK).len()
    }

    /// Opens `path` and returns a fresh descriptor.
    ///
    /// `path`, `mode`, and `perm` are forwarded to the host open primitive
    /// verbatim; this layer attaches no meaning to any of them.
    ///
    /// # Errors
    ///
    /// [`Error::Io`] when the host reports failure; no descriptor is
    /// allocated in that case.
    ///
    /// # Aborts
    ///
    /// Aborts the process when the descriptor allocation counter is
    /// exhausted: wrapping it back into the reserved range would alias live
    /// descriptors and corrupt the table.
    pub fn open(&self, path: &str, mode: i32, perm: u32) -> Result<Fd> {
        // The whole allocation span holds the lock: capacity check, host
        // open, table insertion, counter increment.
        let mut table = self.table.lock().expect(ERR_POISONED_LOCK);
        table.check_capacity();

        let raw = self.platform.open(path, mode, perm);
        let Some(handle) = HostHandle::from_raw(raw) else {
            event!(Level::DEBUG, message = "host open failed", path);
            return Err(Error::Io);
        };

        let fd = table.insert(handle);
        event!(Level::TRACE, message = "opened", %fd, handle = %handle);
        Ok(fd)
    }

    /// Closes `fd` and asks the host to release the underlying resource.
    ///
    /// The table entry is removed before the host close primitive runs and
    /// stays removed even if the host reports failure: once close has been
    /// attempted, the descriptor is invalid either way.
    ///
    /// # Errors
    ///
    /// [`Error::Io`] when `fd` is not open (the host is not contacted) or
    /// when the host close primitive fails.
    pub fn close(&self, fd: Fd) -> Result<()> {
        let handle = {
            let mut table = self.table.lock().expect(ERR_POISONED_LOCK);
            table.remove(fd).ok_or(Error::Io)?
        };

        event!(Level::TRACE, message = "closing", %fd, handle = %handle);
        translate_status(self.platform.close(handle))
    }

    /// Reads from `fd` into `buf`, returning the transferred count.
    ///
    /// # Errors
    ///
    /// [`Error::EndOfStream`] when the host reports end of input; the
    /// variant carries the bytes transferred before the end was hit.
    /// [`Error::Io`] when `fd` is not open, the host primitive fails, or
    /// the host reports more bytes than were requested.
    pub fn read(&self, fd: Fd, buf: &mut [u8]) -> Result<usize> {
        // Zero-length requests complete here; some host boundaries reject
        // zero-length pointers.
        if buf.is_empty() {
            return Ok(0);
        }

        let handle = self.resolve(fd)?;
        let (count, status) = self.platform.read(handle, buf);
        if count > buf.len() {
            event!(
                Level::WARN,
                message = "host read count exceeds request",
                %fd,
                count,
                requested = buf.len(),
            );
            return Err(Error::Io);
        }

        match status {
            STATUS_OK => Ok(count),
            STATUS_EOF => Err(Error::EndOfStream { transferred: count }),
            _ => Err(Error::Io),
        }
    }

    /// Writes `buf` to `fd`, returning the transferred count.
    ///
    /// On success the count always equals `buf.len()`: the host write
    /// primitive either satisfies the whole request or fails, so there is no
    /// partial-write protocol across the boundary.
    ///
    /// # Errors
    ///
    /// [`Error::Io`] when `fd` is not open or the host-reported count
    /// differs from the requested length.
    pub fn write(&self, fd: Fd, buf: &[u8]) -> Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }

        let handle = self.resolve(fd)?;
        let count = self.platform.write(handle, buf);
        if count == buf.len() {
            Ok(count)
        } else {
            event!(
                Level::WARN,
                message = "host write count differs from request",
                %fd,
                count,
                requested = buf.len(),
            );
            Err(Error::Io)
        }
    }

    /// Repositions the cursor of `fd` and returns the new absolute offset.
    ///
    /// The host boundary has no primitive that repositions and reports the
    /// new offset atomically, so this composes two: reposition first, then
    /// query the position.
    ///
    /// # Errors
    ///
    /// [`Error::Io`] when `fd` is not open, the reposition primitive fails
    /// (the position query is then never issued), or the queried position is
    /// negative.
    pub fn seek(&self, fd: Fd, pos: SeekFrom) -> Result<u64> {
        let handle = self.resolve(fd)?;
        let (offset, whence) = lower_seek(pos)?;

        translate_status(self.platform.seek(handle, offset, whence))?;

        let position = self.platform.tell(handle);
        u64::try_from(position).map_err(|_negative| {
            event!(Level::WARN, message = "host reported negative position", %fd, position);
            Error::Io
        })
    }

    /// Flushes buffered state for `fd` to durable storage.
    ///
    /// # Errors
    ///
    /// [`Error::NotSupported`] when the active target configuration has no
    /// flush primitive - reported rather than silently succeeding, since
    /// callers may depend on durability. [`Error::Io`] when `fd` is not open
    /// or the primitive fails.
    pub fn fsync(&self, fd: Fd) -> Result<()> {
        let handle = self.resolve(fd)?;
        match self.platform.flush(handle) {
            Some(status) => translate_status(status),
            None => Err(Error::NotSupported),
        }
    }

    fn resolve(&self, fd: Fd) -> Result<HostHandle> {
        self.table
            .lock()
            .expect(ERR_POISONED_LOCK)
            .get(fd)
            .ok_or(Error::Io)
    }
}

/// Lowers a [`SeekFrom`] into the host's `(offset, whence)` pair.
fn lower_seek(pos: SeekFrom) -> Result<(i64, i32)> {
    match pos {
        SeekFrom::Start(offset) => i64::try_from(offset)
            .map(|offset| (offset, SEEK_SET))
            .map_err(|_overflow| Error::Io),
        SeekFrom::Current(offset) => Ok((offset, SEEK_CUR)),
        SeekFrom::End(offset) => Ok((offset, SEEK_END)),
    }
}
