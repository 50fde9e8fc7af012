// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::num::NonZeroU64;

use derive_more::Display;

/// An opaque token for a resource held by the host.
///
/// The value is produced by the host open primitive and never interpreted by
/// this crate; it only travels back to the host alongside subsequent
/// primitive calls. The host reserves `0` as its failure sentinel, which is
/// why the payload is non-zero by construction - a failed open is not
/// representable in the descriptor table.
///
/// Deliberately distinct from [`Fd`]: a descriptor names an entry in the
/// table, a `HostHandle` names the host resource that entry points at.
///
/// Must implement `Send` because closing the host resource may take place on
/// a different thread than the one that opened it.
///
/// [`Fd`]: crate::Fd
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HostHandle(NonZeroU64);

impl HostHandle {
    /// Translates a raw host open result, mapping the `0` failure sentinel
    /// to `None`.
    #[must_use]
    pub fn from_raw(raw: u64) -> Option<Self> {
        NonZeroU64::new(raw).map(Self)
    }

    /// The raw value as passed across the host boundary.
    #[must_use]
    pub fn as_raw(self) -> u64 {
        self.0.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_is_the_failure_sentinel() {
        assert!(HostHandle::from_raw(0).is_none());
    }

    #[test]
    fn raw_round_trip() {
        let handle = HostHandle::from_raw(42).expect("non-zero raw value");
        assert_eq!(handle.as_raw(), 42);
        assert_eq!(handle.to_string(), "42");
    }
}
