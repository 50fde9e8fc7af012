// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Test support: an in-memory stand-in for the host primitive boundary.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::pal::{HostHandle, Platform, SEEK_CUR, SEEK_END, SEEK_SET, STATUS_EOF, STATUS_OK};

/// Status the fake reports for injected and genuine failures.
const STATUS_FAILED: i32 = -1;

/// An in-memory [`Platform`] for exercising the descriptor layer without a
/// real host.
///
/// Behaves the way the host contract demands: reads report end of stream
/// with [`STATUS_EOF`] and a possibly short count, writes fully satisfy the
/// request, and seek/tell operate on a per-handle cursor. Failure injection
/// switches make individual primitives misbehave, and per-primitive call
/// counters let tests assert that an operation never reached the host.
///
/// Clones share state, so a test can keep one clone for inspection and hand
/// the other to [`FileSystem`](crate::FileSystem).
#[derive(Debug, Clone, Default)]
pub struct FakePlatform {
    state: Arc<Mutex<FakeState>>,
}

/// How many times each primitive has been invoked.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[non_exhaustive]
pub struct CallCounts {
    /// Invocations of the open primitive.
    pub open: usize,
    /// Invocations of the close primitive.
    pub close: usize,
    /// Invocations of the read primitive.
    pub read: usize,
    /// Invocations of the write primitive.
    pub write: usize,
    /// Invocations of the seek primitive.
    pub seek: usize,
    /// Invocations of the tell primitive.
    pub tell: usize,
    /// Invocations of the flush primitive.
    pub flush: usize,
}

impl CallCounts {
    /// Total invocations across all primitives.
    #[must_use]
    pub fn total(&self) -> usize {
        self.open + self.close + self.read + self.write + self.seek + self.tell + self.flush
    }
}

#[derive(Debug)]
struct FakeState {
    files: HashMap<String, Vec<u8>>,
    handles: HashMap<u64, OpenFile>,
    next_handle: u64,
    refuse_opens: bool,
    fail_reads: bool,
    short_writes: bool,
    fail_seeks: bool,
    fail_closes: bool,
    flush_supported: bool,
    calls: CallCounts,
}

impl Default for FakeState {
    fn default() -> Self {
        Self {
            files: HashMap::new(),
            handles: HashMap::new(),
            next_handle: 1,
            refuse_opens: false,
            fail_reads: false,
            short_writes: false,
            fail_seeks: false,
            fail_closes: false,
            flush_supported: true,
            calls: CallCounts::default(),
        }
    }
}

#[derive(Debug)]
struct OpenFile {
    path: String,
    cursor: usize,
}

const ERR_FAKE_LOCK: &str = "fake host state poisoned";

impl FakePlatform {
    /// Creates an empty fake host.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds (or replaces) a file's contents.
    pub fn add_file(&self, path: &str, contents: &[u8]) {
        let mut state = self.state.lock().expect(ERR_FAKE_LOCK);
        let _previous = state.files.insert(path.to_owned(), contents.to_vec());
    }

    /// The current contents of a file, if it exists.
    #[must_use]
    pub fn file_contents(&self, path: &str) -> Option<Vec<u8>> {
        self.state.lock().expect(ERR_FAKE_LOCK).files.get(path).cloned()
    }

    /// Makes the open primitive report its failure sentinel.
    pub fn refuse_opens(&self) {
        self.state.lock().expect(ERR_FAKE_LOCK).refuse_opens = true;
    }

    /// Makes the read primitive report failure.
    pub fn fail_reads(&self) {
        self.state.lock().expect(ERR_FAKE_LOCK).fail_reads = true;
    }

    /// Makes the write primitive transfer only half of each request.
    pub fn short_writes(&self) {
        self.state.lock().expect(ERR_FAKE_LOCK).short_writes = true;
    }

    /// Makes the seek primitive report failure.
    pub fn fail_seeks(&self) {
        self.state.lock().expect(ERR_FAKE_LOCK).fail_seeks = true;
    }

    /// Makes the close primitive report failure (the handle is still
    /// released, as a real host would).
    pub fn fail_closes(&self) {
        self.state.lock().expect(ERR_FAKE_LOCK).fail_closes = true;
    }

    /// Simulates a target configuration with no flush primitive.
    pub fn disable_flush(&self) {
        self.state.lock().expect(ERR_FAKE_LOCK).flush_supported = false;
    }

    /// How many times each primitive has been invoked so far.
    #[must_use]
    pub fn calls(&self) -> CallCounts {
        self.state.lock().expect(ERR_FAKE_LOCK).calls
    }

    /// Number of handles the host currently holds open.
    #[must_use]
    pub fn open_handle_count(&self) -> usize {
        self.state.lock().expect(ERR_FAKE_LOCK).handles.len()
    }
}

impl Platform for FakePlatform {
    fn open(&self, path: &str, _mode: i32, _perm: u32) -> u64 {
        let mut state = self.state.lock().expect(ERR_FAKE_LOCK);
        state.calls.open += 1;
        if state.refuse_opens {
            return 0;
        }

        // Mode flags are opaque to the layer under test, so the fake simply
        // creates missing files.
        state.files.entry(path.to_owned()).or_default();

        let raw = state.next_handle;
        state.next_handle += 1;
        let _previous = state.handles.insert(
            raw,
            OpenFile {
                path: path.to_owned(),
                cursor: 0,
            },
        );
        raw
    }

    fn close(&self, handle: HostHandle) -> i32 {
        let mut state = self.state.lock().expect(ERR_FAKE_LOCK);
        state.calls.close += 1;
        let released = state.handles.remove(&handle.as_raw()).is_some();
        if released && !state.fail_closes {
            STATUS_OK
        } else {
            STATUS_FAILED
        }
    }

    fn read(&self, handle: HostHandle, buf: &mut [u8]) -> (usize, i32) {
        let mut state = self.state.lock().expect(ERR_FAKE_LOCK);
        state.calls.read += 1;
        if state.fail_reads {
            return (0, STATUS_FAILED);
        }

        let Some(open) = state.handles.get(&handle.as_raw()) else {
            return (0, STATUS_FAILED);
        };
        let (path, cursor) = (open.path.clone(), open.cursor);
        let Some(data) = state.files.get(&path) else {
            return (0, STATUS_FAILED);
        };

        let available = data.len().saturating_sub(cursor);
        let count = available.min(buf.len());
        buf[..count].copy_from_slice(&data[cursor..cursor + count]);

        if let Some(open) = state.handles.get_mut(&handle.as_raw()) {
            open.cursor += count;
        }

        // End of stream is reported the moment the request cannot be fully
        // satisfied, possibly alongside a short count.
        if available < buf.len() { (count, STATUS_EOF) } else { (count, STATUS_OK) }
    }

    fn write(&self, handle: HostHandle, buf: &[u8]) -> usize {
        let mut state = self.state.lock().expect(ERR_FAKE_LOCK);
        state.calls.write += 1;
        if state.short_writes {
            return buf.len() / 2;
        }

        let Some(open) = state.handles.get(&handle.as_raw()) else {
            return 0;
        };
        let (path, cursor) = (open.path.clone(), open.cursor);
        let Some(data) = state.files.get_mut(&path) else {
            return 0;
        };

        let end = cursor + buf.len();
        if data.len() < end {
            data.resize(end, 0);
        }
        data[cursor..end].copy_from_slice(buf);

        if let Some(open) = state.handles.get_mut(&handle.as_raw()) {
            open.cursor = end;
        }
        buf.len()
    }

    fn seek(&self, handle: HostHandle, offset: i64, whence: i32) -> i32 {
        let mut state = self.state.lock().expect(ERR_FAKE_LOCK);
        state.calls.seek += 1;
        if state.fail_seeks {
            return STATUS_FAILED;
        }

        let Some(open) = state.handles.get(&handle.as_raw()) else {
            return STATUS_FAILED;
        };
        let base = match whence {
            SEEK_SET => 0_i64,
            SEEK_CUR => open.cursor as i64,
            SEEK_END => match state.files.get(&open.path) {
                Some(data) => data.len() as i64,
                None => return STATUS_FAILED,
            },
            _ => return STATUS_FAILED,
        };

        let Some(target) = base.checked_add(offset) else {
            return STATUS_FAILED;
        };
        let Ok(target) = usize::try_from(target) else {
            return STATUS_FAILED;
        };

        if let Some(open) = state.handles.get_mut(&handle.as_raw()) {
            open.cursor = target;
        }
        STATUS_OK
    }

    fn tell(&self, handle: HostHandle) -> i64 {
        let mut state = self.state.lock().expect(ERR_FAKE_LOCK);
        state.calls.tell += 1;
        match state.handles.get(&handle.as_raw()) {
            Some(open) => open.cursor as i64,
            None => -1,
        }
    }

    fn flush(&self, handle: HostHandle) -> Option<i32> {
        let mut state = self.state.lock().expect(ERR_FAKE_LOCK);
        state.calls.flush += 1;
        if !state.flush_supported {
            return None;
        }
        if state.handles.contains_key(&handle.as_raw()) {
            Some(STATUS_OK)
        } else {
            Some(STATUS_FAILED)
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "tests use unwrap for brevity")]
mod tests {
    use super::*;

    fn open(fake: &FakePlatform, path: &str) -> HostHandle {
        HostHandle::from_raw(fake.open(path, 0, 0)).unwrap()
    }

    #[test]
    fn read_reports_eof_with_a_short_count() {
        let fake = FakePlatform::new();
        fake.add_file("f", b"abcde");
        let handle = open(&fake, "f");

        let mut buf = [0_u8; 4];
        assert_eq!(fake.read(handle, &mut buf), (4, STATUS_OK));
        assert_eq!(fake.read(handle, &mut buf), (1, STATUS_EOF));
        assert_eq!(&buf[..1], b"e");
        assert_eq!(fake.read(handle, &mut buf), (0, STATUS_EOF));
    }

    #[test]
    fn writes_extend_the_backing_file() {
        let fake = FakePlatform::new();
        let handle = open(&fake, "f");

        assert_eq!(fake.write(handle, b"hello"), 5);
        assert_eq!(fake.file_contents("f").unwrap(), b"hello");
    }

    #[test]
    fn seek_moves_the_cursor_relative_to_each_origin() {
        let fake = FakePlatform::new();
        fake.add_file("f", b"abcdef");
        let handle = open(&fake, "f");

        assert_eq!(fake.seek(handle, 2, SEEK_SET), STATUS_OK);
        assert_eq!(fake.tell(handle), 2);
        assert_eq!(fake.seek(handle, 1, SEEK_CUR), STATUS_OK);
        assert_eq!(fake.tell(handle), 3);
        assert_eq!(fake.seek(handle, -1, SEEK_END), STATUS_OK);
        assert_eq!(fake.tell(handle), 5);
        assert_eq!(fake.seek(handle, -10, SEEK_SET), STATUS_FAILED);
    }

    #[test]
    fn call_counters_track_every_primitive() {
        let fake = FakePlatform::new();
        let handle = open(&fake, "f");
        let _status = fake.close(handle);

        let calls = fake.calls();
        assert_eq!(calls.open, 1);
        assert_eq!(calls.close, 1);
        assert_eq!(calls.total(), 2);
    }
}
