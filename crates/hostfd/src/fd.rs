// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use derive_more::Display;

/// A small-integer file descriptor issued by a [`FileSystem`].
///
/// Descriptors 0 through 2 are reserved for the standard streams by
/// convention; dynamically allocated descriptors start above them. A `Fd` is
/// only meaningful to the [`FileSystem`] that issued it and has no relation
/// to any native descriptor of the embedding process.
///
/// [`FileSystem`]: crate::FileSystem
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Fd(u32);

impl Fd {
    /// Standard input.
    pub const STDIN: Self = Self(0);

    /// Standard output.
    pub const STDOUT: Self = Self(1);

    /// Standard error.
    pub const STDERR: Self = Self(2);

    /// First descriptor the allocator hands out; everything below is reserved.
    pub(crate) const FIRST_DYNAMIC: Self = Self(3);

    /// Reconstructs a descriptor from its raw integer form.
    ///
    /// Intended for embedders that surface descriptors to foreign code as
    /// plain integers. A value no live descriptor carries is harmless;
    /// operations on it fail with [`Error::Io`](crate::Error::Io).
    #[must_use]
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    /// The raw integer form of this descriptor.
    #[must_use]
    pub const fn as_raw(self) -> u32 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_streams_are_reserved() {
        assert_eq!(Fd::STDIN.as_raw(), 0);
        assert_eq!(Fd::STDOUT.as_raw(), 1);
        assert_eq!(Fd::STDERR.as_raw(), 2);
        assert!(Fd::FIRST_DYNAMIC > Fd::STDERR);
    }

    #[test]
    fn raw_round_trip() {
        let fd = Fd::from_raw(17);
        assert_eq!(fd.as_raw(), 17);
        assert_eq!(fd.to_string(), "17");
    }
}
