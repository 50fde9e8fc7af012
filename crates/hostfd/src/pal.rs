// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! The platform abstraction layer: the boundary between the descriptor table
//! and the host-supplied I/O primitives.

mod handle;
mod platform;

pub use handle::*;
pub use platform::*;

#[cfg(test)]
mod mocks;
#[cfg(test)]
pub use mocks::*;
