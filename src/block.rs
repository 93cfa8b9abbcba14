//! Scoped heap blocks
//!
//! A [`ScopedBlock`] owns one block obtained from a [`BlockAllocator`] and hands
//! it back when it goes out of scope, so every acquisition is paired with exactly
//! one release on every exit path, early returns and errors included.
//!
//! ```
//! use safe_list::block::{fill_scoped_block, CountingAllocator, LibcAllocator};
//!
//! # fn main() -> safe_list::Result<()> {
//! let mut heap = CountingAllocator::new(LibcAllocator);
//! let written = fill_scoped_block(&mut heap, 100, "This is a memory leak example")?;
//! assert_eq!(written, 29);
//! assert_eq!(heap.acquired(), heap.released());
//! # Ok(())
//! # }
//! ```

use crate::error::{Error, Result};
use std::ptr::{self, NonNull};
use std::slice;

/// Size of the block used by the demonstration flow
pub const DEFAULT_BLOCK_SIZE: usize = 100;

/// Text copied into the block by the demonstration flow
pub const DEFAULT_PAYLOAD: &str = "This is a memory leak example";

/// Raw byte-block allocator
pub trait BlockAllocator {
    /// Obtain `size` bytes, or `None` if the allocator cannot satisfy the request
    fn acquire(&mut self, size: usize) -> Option<NonNull<u8>>;

    /// Give a block back
    ///
    /// # Safety
    ///
    /// `ptr` must have been returned by [`BlockAllocator::acquire`] on this
    /// allocator with the same `size`, and must not have been released already.
    unsafe fn release(&mut self, ptr: NonNull<u8>, size: usize);
}

/// The C heap, through `malloc` and `free`
#[derive(Debug, Default, Clone, Copy)]
pub struct LibcAllocator;

impl BlockAllocator for LibcAllocator {
    fn acquire(&mut self, size: usize) -> Option<NonNull<u8>> {
        // SAFETY: malloc has no preconditions; a null result is handled below.
        let raw = unsafe { libc::malloc(size) } as *mut u8;
        NonNull::new(raw)
    }

    unsafe fn release(&mut self, ptr: NonNull<u8>, _size: usize) {
        libc::free(ptr.as_ptr() as *mut libc::c_void);
    }
}

/// Wraps another allocator and counts successful acquisitions and releases
#[derive(Debug, Default, Clone)]
pub struct CountingAllocator<A: BlockAllocator = LibcAllocator> {
    inner: A,
    acquired: usize,
    released: usize,
}

impl<A: BlockAllocator> CountingAllocator<A> {
    pub fn new(inner: A) -> Self {
        CountingAllocator {
            inner,
            acquired: 0,
            released: 0,
        }
    }

    /// Blocks handed out so far
    pub fn acquired(&self) -> usize {
        self.acquired
    }

    /// Blocks given back so far
    pub fn released(&self) -> usize {
        self.released
    }

    /// Blocks currently outstanding
    pub fn outstanding(&self) -> usize {
        self.acquired - self.released
    }

    pub fn into_inner(self) -> A {
        self.inner
    }
}

impl<A: BlockAllocator> BlockAllocator for CountingAllocator<A> {
    fn acquire(&mut self, size: usize) -> Option<NonNull<u8>> {
        let ptr = self.inner.acquire(size)?;
        self.acquired += 1;
        Some(ptr)
    }

    unsafe fn release(&mut self, ptr: NonNull<u8>, size: usize) {
        self.inner.release(ptr, size);
        self.released += 1;
    }
}

/// A block that is released when dropped
///
/// The contents are zeroed on acquisition.
pub struct ScopedBlock<'a, A: BlockAllocator> {
    ptr: NonNull<u8>,
    size: usize,
    alloc: &'a mut A,
}

impl<'a, A: BlockAllocator> ScopedBlock<'a, A> {
    /// Acquire `size` bytes from `alloc`
    ///
    /// # Errors
    ///
    /// Returns [`Error::AllocationFailed`] if the allocator refuses. Nothing is
    /// held in that case.
    pub fn acquire(alloc: &'a mut A, size: usize) -> Result<Self> {
        let ptr = alloc
            .acquire(size)
            .ok_or(Error::AllocationFailed { size })?;
        // SAFETY: the allocator returned `size` writable bytes at ptr.
        unsafe { ptr::write_bytes(ptr.as_ptr(), 0, size) };
        Ok(ScopedBlock { ptr, size, alloc })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn as_slice(&self) -> &[u8] {
        // SAFETY: ptr covers `size` initialised bytes owned by this guard.
        unsafe { slice::from_raw_parts(self.ptr.as_ptr(), self.size) }
    }

    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        // SAFETY: as above, and &mut self guarantees exclusive access.
        unsafe { slice::from_raw_parts_mut(self.ptr.as_ptr(), self.size) }
    }

    /// Copy `payload` and a `0` terminator to the start of the block
    ///
    /// Returns the number of payload bytes written.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PayloadTooLarge`] when payload and terminator do not fit.
    /// The block is left unmodified.
    pub fn write_str(&mut self, payload: &str) -> Result<usize> {
        let bytes = payload.as_bytes();
        let needed = bytes.len() + 1;
        if needed > self.size {
            return Err(Error::PayloadTooLarge {
                needed,
                capacity: self.size,
            });
        }
        let dest = self.as_mut_slice();
        dest[..bytes.len()].copy_from_slice(bytes);
        dest[bytes.len()] = 0;
        Ok(bytes.len())
    }
}

impl<A: BlockAllocator> Drop for ScopedBlock<'_, A> {
    fn drop(&mut self) {
        // SAFETY: ptr came from acquire on this allocator with this size, and the
        // guard is the only owner, so this is the single release.
        unsafe { self.alloc.release(self.ptr, self.size) };
    }
}

/// Acquire a block of `size` bytes, copy `payload` into it and release it
///
/// The fit check happens before anything is acquired, so a payload that is too
/// large costs no allocation at all. Returns the number of payload bytes written.
///
/// # Errors
///
/// - [`Error::PayloadTooLarge`] if payload plus terminator exceeds `size`
/// - [`Error::AllocationFailed`] if the allocator refuses the block
pub fn fill_scoped_block<A: BlockAllocator>(
    alloc: &mut A,
    size: usize,
    payload: &str,
) -> Result<usize> {
    let needed = payload.len() + 1;
    if needed > size {
        log::error!(
            "payload of {} bytes does not fit a {} byte block",
            needed,
            size
        );
        return Err(Error::PayloadTooLarge {
            needed,
            capacity: size,
        });
    }

    let mut block = ScopedBlock::acquire(alloc, size).map_err(|err| {
        log::error!("{}", err);
        err
    })?;
    let written = block.write_str(payload)?;
    log::debug!("wrote {} bytes into a {} byte block", written, block.size());
    Ok(written)
}
