// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

#![allow(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
#![allow(clippy::missing_panics_doc, reason = "Tests")]
#![allow(clippy::missing_errors_doc, reason = "Tests")]
#![allow(unused_results, reason = "Tests")]
#![allow(missing_docs, reason = "Tests")]
#![allow(clippy::assertions_on_result_states, reason = "Tests use assert!(x.is_err()) for clarity")]

use std::io::SeekFrom;

use hostfd::testing::FakePlatform;
use hostfd::{Error, Fd, FileSystem};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn setup() -> (FakePlatform, FileSystem<FakePlatform>) {
    let host = FakePlatform::new();
    let fs = FileSystem::new(host.clone());
    (host, fs)
}

// ===========================================================================
// Open / Close tests
// ===========================================================================

mod open_close {
    use super::*;

    #[test]
    fn live_set_is_exactly_the_opened_and_not_closed() {
        let (host, fs) = setup();

        let a = fs.open("a", 0, 0).unwrap();
        let b = fs.open("b", 0, 0).unwrap();
        let c = fs.open("c", 0, 0).unwrap();
        assert_eq!(fs.open_count(), 3);
        assert_eq!(host.open_handle_count(), 3);

        fs.close(b).unwrap();
        assert_eq!(fs.open_count(), 2);
        assert_eq!(host.open_handle_count(), 2);

        // The survivors still work; the closed one does not.
        assert!(fs.write(a, b"x").is_ok());
        assert!(fs.write(c, b"x").is_ok());
        assert_eq!(fs.write(b, b"x"), Err(Error::Io));

        fs.close(a).unwrap();
        fs.close(c).unwrap();
        assert_eq!(fs.open_count(), 0);
        assert_eq!(host.open_handle_count(), 0);
    }

    #[test]
    fn descriptors_are_distinct_and_start_above_the_standard_streams() {
        let (_host, fs) = setup();

        let a = fs.open("a", 0, 0).unwrap();
        let b = fs.open("b", 0, 0).unwrap();
        assert_ne!(a, b);
        assert!(a > Fd::STDERR);
        assert_eq!(a.as_raw(), 3);
        assert_eq!(b.as_raw(), 4);
    }

    #[test]
    fn open_failure_allocates_nothing() {
        let (host, fs) = setup();
        host.refuse_opens();

        assert_eq!(fs.open("a", 0, 0), Err(Error::Io));
        assert_eq!(fs.open_count(), 0);
        assert_eq!(host.open_handle_count(), 0);
    }

    #[test]
    fn close_of_an_unopened_descriptor_never_reaches_the_host() {
        let (host, fs) = setup();

        assert_eq!(fs.close(Fd::from_raw(40)), Err(Error::Io));
        assert_eq!(host.calls().close, 0);
    }

    #[test]
    fn double_close_fails_visibly_without_a_second_host_call() {
        let (host, fs) = setup();

        let fd = fs.open("a", 0, 0).unwrap();
        fs.close(fd).unwrap();
        assert_eq!(fs.close(fd), Err(Error::Io));
        assert_eq!(host.calls().close, 1);
    }

    #[test]
    fn close_failure_still_invalidates_the_descriptor() {
        let (host, fs) = setup();

        let fd = fs.open("a", 0, 0).unwrap();
        host.fail_closes();
        assert_eq!(fs.close(fd), Err(Error::Io));
        assert_eq!(fs.open_count(), 0);
        assert_eq!(fs.write(fd, b"x"), Err(Error::Io));
    }
}

// ===========================================================================
// Read / Write tests
// ===========================================================================

mod read_write {
    use super::*;

    #[test]
    fn round_trip_through_the_host() {
        let (_host, fs) = setup();

        let fd = fs.open("notes", 0, 0).unwrap();
        assert_eq!(fs.write(fd, b"hello world").unwrap(), 11);
        fs.seek(fd, SeekFrom::Start(0)).unwrap();

        let mut buf = [0_u8; 11];
        assert_eq!(fs.read(fd, &mut buf).unwrap(), 11);
        assert_eq!(&buf, b"hello world");
    }

    #[test]
    fn zero_length_read_and_write_skip_the_host() {
        let (host, fs) = setup();
        let fd = fs.open("a", 0, 0).unwrap();

        assert_eq!(fs.read(fd, &mut []).unwrap(), 0);
        assert_eq!(fs.write(fd, &[]).unwrap(), 0);
        assert_eq!(host.calls().read, 0);
        assert_eq!(host.calls().write, 0);
    }

    #[test]
    fn partial_final_read_is_distinguishable_from_an_empty_one() {
        let (host, fs) = setup();
        host.add_file("f", b"abcdef");
        let fd = fs.open("f", 0, 0).unwrap();

        let mut buf = [0_u8; 4];
        assert_eq!(fs.read(fd, &mut buf).unwrap(), 4);

        // Two bytes remain: the end of the stream arrives with them.
        assert_eq!(fs.read(fd, &mut buf), Err(Error::EndOfStream { transferred: 2 }));
        assert_eq!(&buf[..2], b"ef");

        // Reading again yields a zero-byte end of stream.
        assert_eq!(fs.read(fd, &mut buf), Err(Error::EndOfStream { transferred: 0 }));
    }

    #[test]
    fn read_failure_is_not_end_of_stream() {
        let (host, fs) = setup();
        host.add_file("f", b"abc");
        let fd = fs.open("f", 0, 0).unwrap();

        host.fail_reads();
        let mut buf = [0_u8; 4];
        assert_eq!(fs.read(fd, &mut buf), Err(Error::Io));
    }

    #[test]
    fn short_write_is_reported_as_failure() {
        let (host, fs) = setup();
        let fd = fs.open("f", 0, 0).unwrap();

        host.short_writes();
        assert_eq!(fs.write(fd, b"abcd"), Err(Error::Io));
    }
}

// ===========================================================================
// Seek / Fsync tests
// ===========================================================================

mod seek_fsync {
    use super::*;

    #[test]
    fn seek_reports_the_new_absolute_offset() {
        let (host, fs) = setup();
        host.add_file("f", b"abcdefgh");
        let fd = fs.open("f", 0, 0).unwrap();

        assert_eq!(fs.seek(fd, SeekFrom::Start(5)).unwrap(), 5);
        assert_eq!(fs.seek(fd, SeekFrom::Current(-2)).unwrap(), 3);
        assert_eq!(fs.seek(fd, SeekFrom::End(-1)).unwrap(), 7);
    }

    #[test]
    fn reposition_failure_skips_the_position_query() {
        let (host, fs) = setup();
        let fd = fs.open("f", 0, 0).unwrap();

        host.fail_seeks();
        assert_eq!(fs.seek(fd, SeekFrom::Start(1)), Err(Error::Io));
        assert_eq!(host.calls().tell, 0);
    }

    #[test]
    fn fsync_forwards_to_the_flush_primitive() {
        let (host, fs) = setup();
        let fd = fs.open("f", 0, 0).unwrap();

        fs.fsync(fd).unwrap();
        assert_eq!(host.calls().flush, 1);
    }

    #[test]
    fn fsync_without_a_flush_primitive_reports_not_supported() {
        let (host, fs) = setup();
        let fd = fs.open("f", 0, 0).unwrap();

        host.disable_flush();
        assert_eq!(fs.fsync(fd), Err(Error::NotSupported));
    }
}

// ===========================================================================
// Unsupported surface tests
// ===========================================================================

mod unsupported {
    use super::*;

    #[test]
    fn every_unsupported_operation_reports_not_supported() {
        let (_host, fs) = setup();
        let fd = fs.open("f", 0, 0).unwrap();
        let now = std::time::SystemTime::now();
        let mut buf = [0_u8; 8];

        assert_eq!(fs.mkdir("d", 0o755), Err(Error::NotSupported));
        assert_eq!(fs.rmdir("d"), Err(Error::NotSupported));
        assert_eq!(fs.read_dir(fd, &mut buf), Err(Error::NotSupported));
        assert_eq!(fs.stat("f"), Err(Error::NotSupported));
        assert_eq!(fs.lstat("f"), Err(Error::NotSupported));
        assert_eq!(fs.fstat(fd), Err(Error::NotSupported));
        assert_eq!(fs.unlink("f"), Err(Error::NotSupported));
        assert_eq!(fs.chmod("f", 0o644), Err(Error::NotSupported));
        assert_eq!(fs.fchmod(fd, 0o644), Err(Error::NotSupported));
        assert_eq!(fs.chown("f", 0, 0), Err(Error::NotSupported));
        assert_eq!(fs.fchown(fd, 0, 0), Err(Error::NotSupported));
        assert_eq!(fs.lchown("f", 0, 0), Err(Error::NotSupported));
        assert_eq!(fs.set_times("f", now, now), Err(Error::NotSupported));
        assert_eq!(fs.rename("f", "g"), Err(Error::NotSupported));
        assert_eq!(fs.truncate("f", 0), Err(Error::NotSupported));
        assert_eq!(fs.ftruncate(fd, 0), Err(Error::NotSupported));
        assert_eq!(fs.current_dir(), Err(Error::NotSupported));
        assert_eq!(fs.set_current_dir("/"), Err(Error::NotSupported));
        assert_eq!(fs.fchdir(fd), Err(Error::NotSupported));
        assert_eq!(fs.read_link("f"), Err(Error::NotSupported));
        assert_eq!(fs.link("f", "g"), Err(Error::NotSupported));
        assert_eq!(fs.symlink("f", "g"), Err(Error::NotSupported));
        assert_eq!(fs.pread(fd, &mut buf, 0), Err(Error::NotSupported));
        assert_eq!(fs.pwrite(fd, &buf, 0), Err(Error::NotSupported));
        assert_eq!(fs.dup(fd), Err(Error::NotSupported));
        assert_eq!(fs.dup2(fd, Fd::from_raw(9)), Err(Error::NotSupported));
        assert_eq!(fs.pipe(), Err(Error::NotSupported));
        fs.close_on_exec(fd);
    }

    #[test]
    fn unsupported_operations_mutate_nothing_and_reach_no_primitive() {
        let (host, fs) = setup();
        let fd = fs.open("f", 0, 0).unwrap();
        let calls_before = host.calls();

        let _ = fs.mkdir("d", 0o755);
        let _ = fs.stat("f");
        let _ = fs.rename("f", "g");
        let _ = fs.dup(fd);
        let _ = fs.pipe();
        fs.close_on_exec(fd);

        assert_eq!(host.calls(), calls_before);
        assert_eq!(fs.open_count(), 1);
    }
}

// ===========================================================================
// Concurrency tests
// ===========================================================================

mod concurrency {
    use std::sync::Arc;

    use super::*;

    #[test]
    fn concurrent_opens_allocate_a_contiguous_range_of_distinct_descriptors() {
        const THREADS: usize = 8;
        const OPENS_PER_THREAD: usize = 25;

        let (_host, fs) = setup();
        let fs = Arc::new(fs);

        let handles: Vec<_> = (0..THREADS)
            .map(|thread| {
                let fs = Arc::clone(&fs);
                std::thread::spawn(move || {
                    (0..OPENS_PER_THREAD)
                        .map(|i| fs.open(&format!("{thread}-{i}"), 0, 0).unwrap())
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        let mut fds: Vec<Fd> = handles
            .into_iter()
            .flat_map(|handle| handle.join().unwrap())
            .collect();
        fds.sort_unstable();
        fds.dedup();

        // No duplicates, and the allocation range is contiguous from the
        // first dynamic descriptor.
        assert_eq!(fds.len(), THREADS * OPENS_PER_THREAD);
        assert_eq!(fds.first().unwrap().as_raw(), 3);
        let expected_last = 3 + u32::try_from(THREADS * OPENS_PER_THREAD).unwrap() - 1;
        assert_eq!(fds.last().unwrap().as_raw(), expected_last);
    }
}
