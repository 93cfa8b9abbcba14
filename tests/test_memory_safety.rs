//! Resource pairing and bounded input against real streams and the C heap

use safe_list::block::{
    fill_scoped_block, BlockAllocator, CountingAllocator, LibcAllocator, ScopedBlock,
};
use safe_list::{read_bounded, Error, ExcessPolicy, LineBuffer};
use std::fs::File;
use std::io::{BufReader, Seek, SeekFrom, Write};
use std::ptr::NonNull;

/// Grants a fixed number of blocks from the C heap, then refuses
struct Rationed {
    left: usize,
}

impl BlockAllocator for Rationed {
    fn acquire(&mut self, size: usize) -> Option<NonNull<u8>> {
        if self.left == 0 {
            return None;
        }
        self.left -= 1;
        LibcAllocator.acquire(size)
    }

    unsafe fn release(&mut self, ptr: NonNull<u8>, size: usize) {
        LibcAllocator.release(ptr, size);
    }
}

fn file_with(contents: &[u8]) -> File {
    let mut file = tempfile::tempfile().unwrap();
    file.write_all(contents).unwrap();
    file.flush().unwrap();
    file.seek(SeekFrom::Start(0)).unwrap();
    file
}

#[test]
fn test_counts_balance_across_success_and_failure() {
    let mut heap = CountingAllocator::new(Rationed { left: 3 });
    let mut successes = 0;
    let mut failures = 0;
    for _ in 0..5 {
        match fill_scoped_block(&mut heap, 100, "This is a memory leak example") {
            Ok(_) => successes += 1,
            Err(Error::AllocationFailed { .. }) => failures += 1,
            Err(e) => panic!("unexpected error: {}", e),
        }
        assert_eq!(heap.outstanding(), 0);
    }
    assert_eq!(successes, 3);
    assert_eq!(failures, 2);
    assert_eq!(heap.acquired(), 3);
    assert_eq!(heap.released(), 3);
}

#[test]
fn test_guard_released_on_early_return() {
    fn use_block<A: BlockAllocator>(heap: &mut A) -> Result<(), Error> {
        let mut block = ScopedBlock::acquire(heap, 16)?;
        block.write_str("fits")?;
        block.write_str("this payload is far too long for sixteen bytes")?;
        unreachable!("second write must fail");
    }

    let mut heap = CountingAllocator::new(LibcAllocator);
    assert!(matches!(
        use_block(&mut heap),
        Err(Error::PayloadTooLarge { .. })
    ));
    assert_eq!(heap.acquired(), 1);
    assert_eq!(heap.released(), 1);
}

#[test]
fn test_bounded_read_from_file() {
    let file = file_with(b"0123456789abcdef\nshort\n");
    let mut reader = BufReader::new(file);
    let mut line = LineBuffer::new(10).unwrap();

    assert!(line.read_from(&mut reader).unwrap());
    assert_eq!(line.as_bytes(), b"012345678");
    assert!(!line.ends_line());

    // the excess stayed on the stream
    assert!(line.read_from(&mut reader).unwrap());
    assert_eq!(line.as_bytes(), b"9abcdef\n");

    assert!(line.read_from(&mut reader).unwrap());
    assert_eq!(line.as_bytes(), b"short\n");

    assert!(!line.read_from(&mut reader).unwrap());
}

#[test]
fn test_bounded_read_discard_from_file() {
    let file = file_with(b"0123456789abcdef\nshort\n");
    let mut reader = BufReader::new(file);
    let mut line = LineBuffer::with_policy(10, ExcessPolicy::Discard).unwrap();

    assert!(line.read_from(&mut reader).unwrap());
    assert_eq!(line.as_bytes(), b"012345678");
    assert!(line.read_from(&mut reader).unwrap());
    assert_eq!(line.as_bytes(), b"short\n");
}

#[test]
fn test_bounded_read_never_overruns_for_any_length() {
    for capacity in 1..12 {
        for line_len in 0..30 {
            let mut input = vec![b'x'; line_len];
            input.push(b'\n');
            let mut backing = [0x5Au8; 40];
            let mut reader = &input[..];
            let result = read_bounded(&mut reader, &mut backing[..capacity], ExcessPolicy::Keep)
                .unwrap()
                .unwrap();

            assert!(result < capacity);
            assert_eq!(backing[result], 0);
            assert!(
                backing[capacity..].iter().all(|&b| b == 0x5A),
                "capacity {} line {} wrote past the buffer",
                capacity,
                line_len
            );
        }
    }
}

#[test]
fn test_bounded_read_empty_file() {
    let file = file_with(b"");
    let mut reader = BufReader::new(file);
    let mut buf = [0xFFu8; 10];
    assert!(read_bounded(&mut reader, &mut buf, ExcessPolicy::Keep)
        .unwrap()
        .is_none());
    assert_eq!(buf[0], 0);
}
