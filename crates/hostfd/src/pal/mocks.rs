// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use mockall::mock;

use crate::pal::{HostHandle, Platform};

mock! {
    #[derive(Debug)]
    pub Platform { }

    impl Platform for Platform {
        fn open(&self, path: &str, mode: i32, perm: u32) -> u64;
        fn close(&self, handle: HostHandle) -> i32;
        fn read(&self, handle: HostHandle, buf: &mut [u8]) -> (usize, i32);
        fn write(&self, handle: HostHandle, buf: &[u8]) -> usize;
        fn seek(&self, handle: HostHandle, offset: i64, whence: i32) -> i32;
        fn tell(&self, handle: HostHandle) -> i64;
        fn flush(&self, handle: HostHandle) -> Option<i32>;
    }
}
