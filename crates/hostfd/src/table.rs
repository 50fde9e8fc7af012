// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::collections::HashMap;

use tracing::{Level, event};

use crate::fd::Fd;
use crate::pal::HostHandle;

/// The descriptor table: the live descriptor-to-handle mapping plus the
/// monotonic allocation counter that feeds it.
///
/// The table carries no synchronization of its own; [`FileSystem`] wraps it
/// in the one process-wide mutex and every access goes through that lock.
/// Entries are created only by open and removed only by close, and no two
/// live descriptors ever map to the same handle - the layer performs no
/// implicit duplication.
///
/// [`FileSystem`]: crate::FileSystem
#[derive(Debug)]
pub(crate) struct HandleTable {
    entries: HashMap<Fd, HostHandle>,
    next_fd: u32,
}

impl HandleTable {
    pub(crate) fn new() -> Self {
        Self {
            entries: HashMap::new(),
            next_fd: Fd::FIRST_DYNAMIC.as_raw(),
        }
    }

    /// Aborts the process if the next allocation would wrap the counter back
    /// into the reserved descriptor range.
    ///
    /// Called before the host open primitive runs, so a doomed allocation
    /// never creates a host resource. Wraparound would hand out a descriptor
    /// that may still be live elsewhere in the table; there is no safe way
    /// to continue from that, so this is not a returned error.
    pub(crate) fn check_capacity(&self) {
        if self.next_fd == u32::MAX {
            event!(
                Level::ERROR,
                message = "descriptor allocation counter exhausted, aborting",
                next_fd = self.next_fd,
                live = self.entries.len(),
            );
            std::process::abort();
        }
    }

    /// Installs `handle` under the next free descriptor.
    pub(crate) fn insert(&mut self, handle: HostHandle) -> Fd {
        self.check_capacity();
        let fd = Fd::from_raw(self.next_fd);
        self.next_fd += 1;
        let previous = self.entries.insert(fd, handle);
        debug_assert!(previous.is_none(), "allocator handed out a live descriptor");
        fd
    }

    /// Removes the entry for `fd`, returning the handle it held.
    pub(crate) fn remove(&mut self, fd: Fd) -> Option<HostHandle> {
        self.entries.remove(&fd)
    }

    /// Resolves `fd` to its handle without disturbing the entry.
    pub(crate) fn get(&self, fd: Fd) -> Option<HostHandle> {
        self.entries.get(&fd).copied()
    }

    /// Number of live descriptors.
    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }
}
