// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::fmt::Debug;

use crate::pal::HostHandle;

/// Seek relative to the start of the resource.
pub const SEEK_SET: i32 = 0;

/// Seek relative to the current position.
pub const SEEK_CUR: i32 = 1;

/// Seek relative to the end of the resource.
pub const SEEK_END: i32 = 2;

/// Primitive status code: success.
pub const STATUS_OK: i32 = 0;

/// Primitive status code reported by reads that reached end of stream.
pub const STATUS_EOF: i32 = 1;

/// The host primitive boundary: the fixed set of operations the surrounding
/// runtime supplies for file I/O.
///
/// Implementations forward each call to the corresponding host primitive and
/// report its raw result; translation into the [`Error`] taxonomy happens in
/// the descriptor layer, never here. Paths, modes, and permission bits pass
/// through uninterpreted.
///
/// # Calling convention
///
/// All primitives are synchronous and run to completion; there is no
/// cancellation or timeout. The boundary is assumed to serialize concurrent
/// operations on the same handle safely - where the host does not, callers
/// of the descriptor API must not issue concurrent operations on the same
/// descriptor.
///
/// Implementations that hand the buffer of [`read`](Platform::read) or
/// [`write`](Platform::write) to a foreign call rely on the slice staying
/// unmoved and alive for the call's duration; the borrow guarantees that on
/// the Rust side, and the synchronous contract means the host never holds
/// the pointer past the call.
///
/// [`Error`]: crate::Error
pub trait Platform: Debug + Send + Sync + 'static {
    /// Opens `path` and returns the raw host handle, or `0` on failure.
    ///
    /// `mode` and `perm` are host-defined open flags and permission bits.
    fn open(&self, path: &str, mode: i32, perm: u32) -> u64;

    /// Releases the host resource. Returns [`STATUS_OK`] on success.
    fn close(&self, handle: HostHandle) -> i32;

    /// Reads into `buf` at the handle's cursor.
    ///
    /// Returns the transferred count and a status: [`STATUS_OK`],
    /// [`STATUS_EOF`] when the end of the input was encountered (the count
    /// may then be less than requested), or any other value for failure.
    fn read(&self, handle: HostHandle, buf: &mut [u8]) -> (usize, i32);

    /// Writes `buf` at the handle's cursor and returns the transferred
    /// count.
    ///
    /// The primitive either satisfies the whole request or fails; a count
    /// different from `buf.len()` means failure.
    fn write(&self, handle: HostHandle, buf: &[u8]) -> usize;

    /// Repositions the handle's cursor. Returns [`STATUS_OK`] on success.
    ///
    /// `whence` is one of [`SEEK_SET`], [`SEEK_CUR`], [`SEEK_END`]. The new
    /// position is not reported; pair with [`tell`](Platform::tell).
    fn seek(&self, handle: HostHandle, offset: i64, whence: i32) -> i32;

    /// Reports the handle's absolute cursor position, negative on failure.
    fn tell(&self, handle: HostHandle) -> i64;

    /// Flushes buffered state for the handle to durable storage.
    ///
    /// Returns `None` when the active target configuration has no flush
    /// primitive at all, otherwise the primitive's status.
    fn flush(&self, handle: HostHandle) -> Option<i32>;
}
