// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! The deliberately not-supported part of the descriptor surface.
//!
//! The host boundary carries no primitives for directories, metadata,
//! links, renaming, truncation, working directories, duplication, or pipes,
//! so every operation here uniformly reports
//! [`Error::NotSupported`](crate::Error::NotSupported) and mutates nothing.
//! This is a stable contract: a higher-level filesystem abstraction detects
//! platform limits by probing it and degrades gracefully.

use std::time::SystemTime;

use crate::error::{Error, Result};
use crate::fd::Fd;
use crate::fs::FileSystem;
use crate::pal::Platform;

/// File metadata as a host stat primitive would report it.
///
/// No current target configuration has such a primitive, so values of this
/// type are never produced; it exists so the metadata queries keep honest
/// signatures for targets that grow one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[non_exhaustive]
pub struct Stat {
    /// Size in bytes.
    pub size: u64,
    /// Mode bits, in the host's encoding.
    pub mode: u32,
}

/// Every operation below fails with [`Error::NotSupported`], contacts no
/// host primitive, and leaves the descriptor table untouched.
#[expect(
    clippy::unused_self,
    reason = "the not-supported surface is part of the per-instance descriptor API"
)]
#[expect(
    clippy::missing_errors_doc,
    reason = "every operation here fails with NotSupported by contract, as the module docs state"
)]
impl<P: Platform> FileSystem<P> {
    /// Creates a directory.
    pub fn mkdir(&self, _path: &str, _perm: u32) -> Result<()> {
        Err(Error::NotSupported)
    }

    /// Removes a directory.
    pub fn rmdir(&self, _path: &str) -> Result<()> {
        Err(Error::NotSupported)
    }

    /// Reads directory entries from `fd` into `buf`.
    pub fn read_dir(&self, _fd: Fd, _buf: &mut [u8]) -> Result<usize> {
        Err(Error::NotSupported)
    }

    /// Queries metadata for `path`, following symlinks.
    pub fn stat(&self, _path: &str) -> Result<Stat> {
        Err(Error::NotSupported)
    }

    /// Queries metadata for `path` without following symlinks.
    pub fn lstat(&self, _path: &str) -> Result<Stat> {
        Err(Error::NotSupported)
    }

    /// Queries metadata for an open descriptor.
    pub fn fstat(&self, _fd: Fd) -> Result<Stat> {
        Err(Error::NotSupported)
    }

    /// Removes a file.
    pub fn unlink(&self, _path: &str) -> Result<()> {
        Err(Error::NotSupported)
    }

    /// Changes the mode bits of `path`.
    pub fn chmod(&self, _path: &str, _mode: u32) -> Result<()> {
        Err(Error::NotSupported)
    }

    /// Changes the mode bits of an open descriptor.
    pub fn fchmod(&self, _fd: Fd, _mode: u32) -> Result<()> {
        Err(Error::NotSupported)
    }

    /// Changes the ownership of `path`, following symlinks.
    pub fn chown(&self, _path: &str, _uid: u32, _gid: u32) -> Result<()> {
        Err(Error::NotSupported)
    }

    /// Changes the ownership of an open descriptor.
    pub fn fchown(&self, _fd: Fd, _uid: u32, _gid: u32) -> Result<()> {
        Err(Error::NotSupported)
    }

    /// Changes the ownership of `path` without following symlinks.
    pub fn lchown(&self, _path: &str, _uid: u32, _gid: u32) -> Result<()> {
        Err(Error::NotSupported)
    }

    /// Sets the access and modification times of `path`.
    pub fn set_times(&self, _path: &str, _accessed: SystemTime, _modified: SystemTime) -> Result<()> {
        Err(Error::NotSupported)
    }

    /// Renames `from` to `to`.
    pub fn rename(&self, _from: &str, _to: &str) -> Result<()> {
        Err(Error::NotSupported)
    }

    /// Truncates `path` to `length` bytes.
    pub fn truncate(&self, _path: &str, _length: u64) -> Result<()> {
        Err(Error::NotSupported)
    }

    /// Truncates an open descriptor to `length` bytes.
    pub fn ftruncate(&self, _fd: Fd, _length: u64) -> Result<()> {
        Err(Error::NotSupported)
    }

    /// Reports the working directory.
    pub fn current_dir(&self) -> Result<String> {
        Err(Error::NotSupported)
    }

    /// Changes the working directory.
    pub fn set_current_dir(&self, _path: &str) -> Result<()> {
        Err(Error::NotSupported)
    }

    /// Changes the working directory to the one open as `fd`.
    pub fn fchdir(&self, _fd: Fd) -> Result<()> {
        Err(Error::NotSupported)
    }

    /// Reads the target of a symbolic link.
    pub fn read_link(&self, _path: &str) -> Result<String> {
        Err(Error::NotSupported)
    }

    /// Creates a hard link at `link` pointing to `path`.
    pub fn link(&self, _path: &str, _link: &str) -> Result<()> {
        Err(Error::NotSupported)
    }

    /// Creates a symbolic link at `link` pointing to `path`.
    pub fn symlink(&self, _path: &str, _link: &str) -> Result<()> {
        Err(Error::NotSupported)
    }

    /// Reads from `fd` at an explicit offset, without moving the cursor.
    pub fn pread(&self, _fd: Fd, _buf: &mut [u8], _offset: u64) -> Result<usize> {
        Err(Error::NotSupported)
    }

    /// Writes to `fd` at an explicit offset, without moving the cursor.
    pub fn pwrite(&self, _fd: Fd, _buf: &[u8], _offset: u64) -> Result<usize> {
        Err(Error::NotSupported)
    }

    /// Duplicates a descriptor.
    ///
    /// Unsupported by design: the table invariant is that no two live
    /// descriptors map to the same host handle.
    pub fn dup(&self, _fd: Fd) -> Result<Fd> {
        Err(Error::NotSupported)
    }

    /// Duplicates a descriptor onto a specific target descriptor.
    pub fn dup2(&self, _fd: Fd, _target: Fd) -> Result<()> {
        Err(Error::NotSupported)
    }

    /// Creates a pipe.
    pub fn pipe(&self) -> Result<(Fd, Fd)> {
        Err(Error::NotSupported)
    }

    /// Marks a descriptor close-on-exec.
    ///
    /// A no-op: the host never executes child processes, so there is
    /// nothing to mark.
    pub fn close_on_exec(&self, _fd: Fd) {}
}
