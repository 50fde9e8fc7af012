// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! POSIX-like file descriptor table over an opaque host primitive boundary.
//!
//! A managed runtime embedded in a constrained host cannot reach the
//! operating system directly; filesystem access is proxied through a small
//! set of host-supplied primitives (open, close, read, write, seek, tell,
//! flush) with fixed, opaque signatures. This crate maps that boundary back
//! onto the small-integer descriptor surface callers expect:
//!
//! * [`FileSystem`] is the caller-facing descriptor API. It owns the
//!   mutex-guarded table that translates each [`Fd`] into the opaque
//!   [`HostHandle`] the host issued for it, and routes every raw host status
//!   through the closed [`Error`] taxonomy.
//! * [`Platform`] is the host primitive boundary. Production embedders
//!   implement it over their foreign-call mechanism; tests substitute
//!   [`testing::FakePlatform`].
//!
//! Operations the host has no primitives for (directories, metadata, links,
//! rename, truncation, working directories, duplication, pipes) fail with
//! [`Error::NotSupported`]. That is a stable contract, not an oversight:
//! higher-level filesystem code probes it to detect platform limits and
//! degrade gracefully.
//!
//! # Example
//!
//! ```
//! use hostfd::testing::FakePlatform;
//! use hostfd::{Error, FileSystem};
//!
//! let host = FakePlatform::new();
//! host.add_file("motd", b"welcome");
//!
//! // Clones of the fake share state, so the test can keep one to inspect.
//! let fs = FileSystem::new(host.clone());
//! let fd = fs.open("motd", 0, 0)?;
//!
//! let mut buf = [0_u8; 4];
//! assert_eq!(fs.read(fd, &mut buf)?, 4);
//! assert_eq!(&buf, b"welc");
//!
//! // The final read surfaces end of stream along with the bytes it carried.
//! let err = fs.read(fd, &mut buf).unwrap_err();
//! assert_eq!(err, Error::EndOfStream { transferred: 3 });
//! assert_eq!(&buf[..3], b"ome");
//!
//! fs.close(fd)?;
//! # Ok::<(), hostfd::Error>(())
//! ```

mod error;
mod fd;
mod fs;
mod pal;
mod table;
mod unsupported;

pub mod testing;

pub use error::*;
pub use fd::*;
pub use fs::*;
pub use pal::*;
pub use unsupported::*;

pub(crate) const ERR_POISONED_LOCK: &str =
    "poisoned lock - cannot continue execution because descriptor table consistency can no longer be upheld";
