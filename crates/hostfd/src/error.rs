// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use thiserror::Error;

use crate::pal::STATUS_OK;

/// Any error a descriptor operation can report.
///
/// The taxonomy is deliberately closed: the host boundary can only produce
/// these three conditions, and callers are expected to match on them. The
/// fourth condition the layer can encounter - exhaustion of the descriptor
/// allocation counter - is not representable here because it aborts the
/// process instead of returning (see [`FileSystem::open`]).
///
/// # Thread safety
///
/// This type is thread-safe.
///
/// [`FileSystem::open`]: crate::FileSystem::open
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// No host primitive exists for this operation on the active target.
    ///
    /// This is a stable contract rather than a transient condition;
    /// higher-level filesystem code can probe for it and degrade gracefully.
    #[error("operation not supported by the host")]
    NotSupported,

    /// A host primitive failed, or returned a result inconsistent with its
    /// contract (a short write, a read count larger than the request, a
    /// negative position).
    ///
    /// Also reported for operations on a descriptor that is not open.
    #[error("host I/O failure")]
    Io,

    /// A read reached the end of its input.
    ///
    /// Kept apart from [`Error::Io`] so read loops can terminate cleanly.
    /// Carries the byte count so a partial final read is distinguishable
    /// from an empty one.
    #[error("end of stream after {transferred} bytes")]
    EndOfStream {
        /// Bytes transferred into the caller's buffer before the end was hit.
        transferred: usize,
    },
}

/// A specialized `Result` for descriptor operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Translates the raw status code of a non-read host primitive.
///
/// Zero is the sole success value; reads are translated at the call site
/// instead because their end-of-stream status needs the transferred count.
pub(crate) fn translate_status(status: i32) -> Result<()> {
    if status == STATUS_OK { Ok(()) } else { Err(Error::Io) }
}

/// Represents a descriptor-layer error as a standard I/O error.
/// This is often used when interoperating with libraries that expect standard I/O errors.
impl From<Error> for std::io::Error {
    fn from(value: Error) -> Self {
        match value {
            Error::NotSupported => Self::new(std::io::ErrorKind::Unsupported, value),
            Error::EndOfStream { .. } => Self::new(std::io::ErrorKind::UnexpectedEof, value),
            Error::Io => Self::other(value),
        }
    }
}
