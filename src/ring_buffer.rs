use std::alloc::Layout;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use thiserror::Error;

/// Errors for ring buffer construction and all-or-nothing writes.
///
/// Short reads and short writes are reported through return counts, never
/// through this type; they are routine flow-control signals. Data loss under
/// the overwrite policy is likewise not an error and is only observable by
/// comparing cursors before and after a write.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum RingBufferError {
    /// Capacity must be a positive element count.
    #[error("ring buffer capacity must be greater than zero")]
    InvalidCapacity,
    /// The backing storage could not be allocated.
    #[error("failed to allocate ring buffer storage for {capacity} elements")]
    AllocationFailed {
        /// Requested capacity in elements.
        capacity: usize,
    },
    /// An all-or-nothing write did not fit; nothing was written.
    #[error("buffer full: {requested} elements requested, space for {available}")]
    BufferFull {
        /// Elements the caller asked to write.
        requested: usize,
        /// Free space at the time of the call.
        available: usize,
    },
    /// Overwrite-policy buffers require exclusive access and cannot be split
    /// into concurrent producer/consumer halves.
    #[error("overwrite policy requires exclusive access; split needs the bounded policy")]
    OverwriteNotSplittable,
}

/// Behavior when a write exceeds the free space.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverflowPolicy {
    /// Reject the overflow: `write` stores as many leading elements as fit
    /// and returns the short count, mirroring short-write semantics of byte
    /// streams. The producer stays non-blocking and retries the remainder.
    Bounded,
    /// Ring semantics: every write succeeds in full and the oldest unread
    /// elements are silently dropped to stay within capacity.
    Overwrite,
}

mod sealed {
    pub trait Sealed {}
}

/// Marker for the fixed-width numeric types the buffer can carry.
///
/// The element type is chosen at construction via the type parameter and
/// fixes the storage layout for the buffer's lifetime, replacing any
/// dynamic element-width configuration with a compile-time choice.
pub trait Element: Copy + Send + Sync + sealed::Sealed + 'static {}

macro_rules! impl_element {
    ($($ty:ty),* $(,)?) => {
        $(
            impl sealed::Sealed for $ty {}
            impl Element for $ty {}
        )*
    };
}

impl_element!(u8, i8, u16, i16, u32, i32, u64, i64, f32, f64);

pub(crate) struct RingBufferInner<T> {
    /// Backing storage, `capacity` elements, allocated once and zeroed.
    data: *mut T,
    /// Fixed element capacity, immutable after construction.
    capacity: usize,
    policy: OverflowPolicy,
    /// Absolute count of elements ever written. Mutated only by the writer.
    write_cursor: AtomicU64,
    /// Absolute count of elements ever consumed. Mutated only by the reader.
    read_cursor: AtomicU64,
}

unsafe impl<T: Element> Send for RingBufferInner<T> {}
unsafe impl<T: Element> Sync for RingBufferInner<T> {}

impl<T> std::fmt::Debug for RingBufferInner<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RingBufferInner")
            .field("capacity", &self.capacity)
            .field("policy", &self.policy)
            .field("write_cursor", &self.write_cursor)
            .field("read_cursor", &self.read_cursor)
            .finish()
    }
}

impl<T> Drop for RingBufferInner<T> {
    fn drop(&mut self) {
        if !self.data.is_null() {
            unsafe {
                // Same layout the constructor allocated with.
                let layout = Layout::from_size_align_unchecked(
                    std::mem::size_of::<T>() * self.capacity,
                    std::mem::align_of::<T>(),
                );
                std::alloc::dealloc(self.data as *mut u8, layout);
            }
        }
    }
}

impl<T: Element> RingBufferInner<T> {
    fn physical_index(&self, cursor: u64) -> usize {
        (cursor % self.capacity as u64) as usize
    }

    /// Effective read cursor given an observed write cursor.
    ///
    /// Under the overwrite policy the stored cursor may still point at slots
    /// the writer has already destroyed; the readable window starts at the
    /// oldest surviving element, `write_cursor - capacity`.
    fn clamped_read_cursor(&self, write: u64) -> u64 {
        let read = self.read_cursor.load(Ordering::Acquire);
        read.max(write.saturating_sub(self.capacity as u64))
    }

    /// Copy `src` into the ring starting at the physical slot of `cursor`.
    ///
    /// A write may straddle the end of the backing array, so the copy splits
    /// into at most two contiguous spans.
    ///
    /// # Safety
    /// Caller must be the sole writer and `src.len() <= capacity`; the target
    /// slots must lie outside the window a concurrent reader may observe.
    unsafe fn copy_in(&self, cursor: u64, src: &[T]) {
        let start = self.physical_index(cursor);
        let first = src.len().min(self.capacity - start);
        std::ptr::copy_nonoverlapping(src.as_ptr(), self.data.add(start), first);
        if first < src.len() {
            std::ptr::copy_nonoverlapping(src[first..].as_ptr(), self.data, src.len() - first);
        }
    }

    /// Copy out of the ring starting at the physical slot of `cursor`,
    /// splitting across the wraparound boundary like `copy_in`.
    ///
    /// # Safety
    /// Caller must be the sole reader and `out.len()` must not exceed the
    /// readable element count observed under acquire ordering.
    unsafe fn copy_out(&self, cursor: u64, out: &mut [T]) {
        let start = self.physical_index(cursor);
        let first = out.len().min(self.capacity - start);
        std::ptr::copy_nonoverlapping(self.data.add(start), out.as_mut_ptr(), first);
        if first < out.len() {
            std::ptr::copy_nonoverlapping(self.data, out[first..].as_mut_ptr(), out.len() - first);
        }
    }

    pub(crate) fn write(&self, data: &[T]) -> usize {
        match self.policy {
            OverflowPolicy::Bounded => self.write_bounded(data),
            OverflowPolicy::Overwrite => self.write_overwrite(data),
        }
    }

    fn write_bounded(&self, data: &[T]) -> usize {
        let write = self.write_cursor.load(Ordering::Relaxed);
        let read = self.read_cursor.load(Ordering::Acquire);
        let available = self.capacity - (write - read) as usize;
        let count = data.len().min(available);
        if count == 0 {
            return 0;
        }
        // Safety: sole writer; the slots in [write, write + count) are free.
        unsafe { self.copy_in(write, &data[..count]) };
        // Publish data before cursor: the reader must never observe the new
        // cursor without the copy it covers.
        self.write_cursor
            .store(write + count as u64, Ordering::Release);
        count
    }

    fn write_overwrite(&self, data: &[T]) -> usize {
        let write = self.write_cursor.load(Ordering::Relaxed);
        // Only the newest `capacity` elements of an oversized write can
        // survive; earlier ones would be overwritten within this same call.
        let skip = data.len().saturating_sub(self.capacity);
        // Safety: overwrite buffers are exclusive-access (never split), so
        // no reader can race the copy.
        unsafe { self.copy_in(write + skip as u64, &data[skip..]) };
        self.write_cursor
            .store(write + data.len() as u64, Ordering::Release);
        data.len()
    }

    pub(crate) fn write_all(&self, data: &[T]) -> Result<(), RingBufferError> {
        if self.policy == OverflowPolicy::Bounded {
            let available = self.available_to_write();
            if data.len() > available {
                return Err(RingBufferError::BufferFull {
                    requested: data.len(),
                    available,
                });
            }
        }
        self.write(data);
        Ok(())
    }

    pub(crate) fn read(&self, out: &mut [T]) -> usize {
        let write = self.write_cursor.load(Ordering::Acquire);
        let read = self.clamped_read_cursor(write);
        let count = out.len().min((write - read) as usize);
        if count == 0 {
            return 0;
        }
        // Safety: sole reader; [read, read + count) is written and published.
        unsafe { self.copy_out(read, &mut out[..count]) };
        // Release the consumed slots back to the writer.
        self.read_cursor
            .store(read + count as u64, Ordering::Release);
        count
    }

    pub(crate) fn peek(&self, max: usize) -> (&[T], &[T]) {
        let write = self.write_cursor.load(Ordering::Acquire);
        let read = self.clamped_read_cursor(write);
        let count = max.min((write - read) as usize);
        if count == 0 {
            return (&[], &[]);
        }
        let start = self.physical_index(read);
        let first = count.min(self.capacity - start);
        // Safety: the readable window is initialized, published with release
        // ordering, and not written again until the reader advances.
        unsafe {
            (
                std::slice::from_raw_parts(self.data.add(start), first),
                std::slice::from_raw_parts(self.data, count - first),
            )
        }
    }

    pub(crate) fn skip(&self, max: usize) -> usize {
        let write = self.write_cursor.load(Ordering::Acquire);
        let read = self.clamped_read_cursor(write);
        let count = max.min((write - read) as usize);
        if count > 0 {
            self.read_cursor
                .store(read + count as u64, Ordering::Release);
        }
        count
    }

    pub(crate) fn capacity(&self) -> usize {
        self.capacity
    }

    pub(crate) fn policy(&self) -> OverflowPolicy {
        self.policy
    }

    pub(crate) fn available_to_read(&self) -> usize {
        let write = self.write_cursor.load(Ordering::Acquire);
        (write - self.clamped_read_cursor(write)) as usize
    }

    pub(crate) fn available_to_write(&self) -> usize {
        self.capacity - self.available_to_read()
    }

    pub(crate) fn write_cursor(&self) -> u64 {
        self.write_cursor.load(Ordering::Acquire)
    }

    pub(crate) fn read_cursor(&self) -> u64 {
        let write = self.write_cursor.load(Ordering::Acquire);
        self.clamped_read_cursor(write)
    }
}

/// Zero-copy view of the readable window, in at most two contiguous slices.
///
/// Returned by `peek`; borrows the buffer and never advances the read
/// cursor, so repeated peeks observe the identical element sequence.
#[derive(Debug, Clone, Copy)]
pub struct Peek<'a, T: Element> {
    first: &'a [T],
    second: &'a [T],
}

impl<'a, T: Element> Peek<'a, T> {
    pub(crate) fn new(first: &'a [T], second: &'a [T]) -> Self {
        Peek { first, second }
    }

    /// Slice up to the physical end of storage.
    pub fn first(&self) -> &'a [T] {
        self.first
    }

    /// Wrapped remainder from the start of storage; empty when the window
    /// does not straddle the boundary.
    pub fn second(&self) -> &'a [T] {
        self.second
    }

    /// Total peeked element count across both slices.
    pub fn len(&self) -> usize {
        self.first.len() + self.second.len()
    }

    /// True when nothing is readable.
    pub fn is_empty(&self) -> bool {
        self.first.is_empty() && self.second.is_empty()
    }

    /// Iterate the peeked elements in logical order.
    pub fn iter(&self) -> impl Iterator<Item = &'a T> {
        self.first.iter().chain(self.second.iter())
    }

    /// Copy the peeked elements into `out`, returning the count copied.
    pub fn copy_to(&self, out: &mut [T]) -> usize {
        let first = self.first.len().min(out.len());
        out[..first].copy_from_slice(&self.first[..first]);
        let second = self.second.len().min(out.len() - first);
        out[first..first + second].copy_from_slice(&self.second[..second]);
        first + second
    }
}

/// Fixed-capacity SPSC ring buffer over a fixed-width numeric element type.
///
/// - One allocation at construction, none afterwards
/// - Monotonic 64-bit cursors; physical offset is cursor modulo capacity
/// - Writes and reads transfer at most two contiguous spans across the
///   wraparound boundary
/// - Never blocks: every operation returns immediately with what it could do
///
/// Methods take `&mut self`, so a shared buffer needs no caller-side
/// discipline; for one writer and one reader on separate threads use
/// [`RingBuffer::split`].
#[derive(Debug)]
pub struct RingBuffer<T: Element> {
    pub(crate) inner: Arc<RingBufferInner<T>>,
}

impl<T: Element> RingBuffer<T> {
    /// Create a buffer with the given element capacity and overflow policy.
    ///
    /// # Returns
    /// * `Ok(RingBuffer)` on success
    /// * `Err(RingBufferError::InvalidCapacity)` if `capacity` is zero
    /// * `Err(RingBufferError::AllocationFailed)` if storage allocation fails
    pub fn with_policy(capacity: usize, policy: OverflowPolicy) -> Result<Self, RingBufferError> {
        if capacity == 0 {
            return Err(RingBufferError::InvalidCapacity);
        }
        let layout = Layout::array::<T>(capacity)
            .map_err(|_| RingBufferError::AllocationFailed { capacity })?;

        // Zeroed storage: every slot holds a valid element from the start,
        // though the protocol never reads a slot before it is written.
        // Safety: capacity > 0 and T is a fixed-width numeric, so the layout
        // has non-zero size.
        let data = unsafe { std::alloc::alloc_zeroed(layout) as *mut T };
        if data.is_null() {
            return Err(RingBufferError::AllocationFailed { capacity });
        }

        Ok(RingBuffer {
            inner: Arc::new(RingBufferInner {
                data,
                capacity,
                policy,
                write_cursor: AtomicU64::new(0),
                read_cursor: AtomicU64::new(0),
            }),
        })
    }

    /// Create a buffer with the bounded (reject-on-full) policy.
    pub fn bounded(capacity: usize) -> Result<Self, RingBufferError> {
        Self::with_policy(capacity, OverflowPolicy::Bounded)
    }

    /// Create a buffer with the overwrite (newest-wins) policy.
    pub fn overwriting(capacity: usize) -> Result<Self, RingBufferError> {
        Self::with_policy(capacity, OverflowPolicy::Overwrite)
    }

    /// Write elements from `data`, returning the count actually written.
    ///
    /// Bounded policy: stores the leading `min(data.len(), available)`
    /// elements and returns the short count; retry the remainder later.
    /// Overwrite policy: always returns `data.len()`, dropping the oldest
    /// unread elements as needed (detectable only via cursor comparison).
    pub fn write(&mut self, data: &[T]) -> usize {
        self.inner.write(data)
    }

    /// All-or-nothing write.
    ///
    /// Fails with [`RingBufferError::BufferFull`] under the bounded policy
    /// when `data` does not fit, leaving the buffer untouched. Under the
    /// overwrite policy this never fails.
    pub fn write_all(&mut self, data: &[T]) -> Result<(), RingBufferError> {
        self.inner.write_all(data)
    }

    /// Read up to `out.len()` elements into `out` by copy, returning the
    /// count actually read. Zero is a normal outcome of an empty buffer,
    /// not an error.
    pub fn read(&mut self, out: &mut [T]) -> usize {
        self.inner.read(out)
    }

    /// Zero-copy view of up to `max` readable elements without consuming
    /// them. Idempotent: cursors are unchanged, so repeated peeks return
    /// the identical sequence.
    pub fn peek(&self, max: usize) -> Peek<'_, T> {
        let (first, second) = self.inner.peek(max);
        Peek::new(first, second)
    }

    /// Discard up to `max` readable elements without copying, returning the
    /// count discarded.
    pub fn skip(&mut self, max: usize) -> usize {
        self.inner.skip(max)
    }

    /// Elements currently readable. Always within `0..=capacity`.
    pub fn available_to_read(&self) -> usize {
        self.inner.available_to_read()
    }

    /// Free element slots. `available_to_read() + available_to_write()`
    /// equals `capacity()` at every quiescent point.
    pub fn available_to_write(&self) -> usize {
        self.inner.available_to_write()
    }

    /// Fixed element capacity chosen at construction.
    pub fn capacity(&self) -> usize {
        self.inner.capacity()
    }

    /// True when nothing is readable.
    pub fn is_empty(&self) -> bool {
        self.available_to_read() == 0
    }

    /// True when no free slot remains.
    pub fn is_full(&self) -> bool {
        self.available_to_read() == self.capacity()
    }

    /// The overflow policy chosen at construction.
    pub fn policy(&self) -> OverflowPolicy {
        self.inner.policy()
    }

    /// Absolute count of elements ever written.
    pub fn write_cursor(&self) -> u64 {
        self.inner.write_cursor()
    }

    /// Absolute count of elements consumed or destroyed by overwrite.
    ///
    /// Jumps past unconsumed positions exactly when an overwriting write
    /// dropped data; comparing this across calls is the loss-detection
    /// mechanism.
    pub fn read_cursor(&self) -> u64 {
        self.inner.read_cursor()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_ring_buffer() {
        let rb = RingBuffer::<u8>::bounded(16).unwrap();
        assert_eq!(rb.capacity(), 16);
        assert_eq!(rb.available_to_read(), 0);
        assert_eq!(rb.available_to_write(), 16);
        assert_eq!(rb.policy(), OverflowPolicy::Bounded);
    }

    #[test]
    fn create_with_zero_capacity() {
        let result = RingBuffer::<u8>::bounded(0);
        assert_eq!(result.unwrap_err(), RingBufferError::InvalidCapacity);
        let result = RingBuffer::<f64>::overwriting(0);
        assert_eq!(result.unwrap_err(), RingBufferError::InvalidCapacity);
    }

    #[test]
    fn capacity_one_roundtrips() {
        let mut rb = RingBuffer::<u8>::bounded(1).unwrap();
        for i in 0..10u8 {
            assert_eq!(rb.write(&[i]), 1);
            assert_eq!(rb.write(&[0xFF]), 0);
            let mut out = [0u8; 1];
            assert_eq!(rb.read(&mut out), 1);
            assert_eq!(out[0], i);
        }
        assert!(rb.is_empty());
    }

    #[test]
    fn bounded_short_write() {
        let mut rb = RingBuffer::<u8>::bounded(4).unwrap();

        assert_eq!(rb.write(&[1, 2, 3]), 3);
        assert_eq!(rb.available_to_read(), 3);

        // Only one slot left: short write.
        assert_eq!(rb.write(&[4, 5]), 1);
        assert_eq!(rb.available_to_read(), 4);
        assert!(rb.is_full());

        let mut out = [0u8; 10];
        let n = rb.read(&mut out);
        assert_eq!(&out[..n], &[1, 2, 3, 4]);
        assert_eq!(rb.available_to_read(), 0);
    }

    #[test]
    fn empty_read_is_not_an_error() {
        let mut rb = RingBuffer::<i32>::bounded(8).unwrap();
        let mut out = [0i32; 4];
        assert_eq!(rb.read(&mut out), 0);
        assert_eq!(rb.skip(4), 0);
    }

    #[test]
    fn write_all_rejects_without_side_effects() {
        let mut rb = RingBuffer::<u8>::bounded(4).unwrap();
        rb.write_all(&[1, 2, 3]).unwrap();

        let err = rb.write_all(&[4, 5]).unwrap_err();
        assert_eq!(
            err,
            RingBufferError::BufferFull {
                requested: 2,
                available: 1,
            }
        );
        // Nothing was written by the failed call.
        assert_eq!(rb.available_to_read(), 3);
        let mut out = [0u8; 4];
        let n = rb.read(&mut out);
        assert_eq!(&out[..n], &[1, 2, 3]);
    }

    #[test]
    fn wraparound_matches_unbounded_sequence() {
        // Write C-1, read C-2, then write 5 more so the write straddles the
        // physical end of storage; reads must match the flat sequence.
        const C: usize = 8;
        let mut rb = RingBuffer::<u16>::bounded(C).unwrap();
        let flat: Vec<u16> = (100..).take(C - 1 + 5).collect();

        assert_eq!(rb.write(&flat[..C - 1]), C - 1);
        let mut out = vec![0u16; C - 2];
        assert_eq!(rb.read(&mut out), C - 2);
        assert_eq!(&out, &flat[..C - 2]);

        assert_eq!(rb.write(&flat[C - 1..]), 5);
        assert_eq!(rb.available_to_read(), 6);

        let mut rest = vec![0u16; 6];
        assert_eq!(rb.read(&mut rest), 6);
        assert_eq!(&rest, &flat[C - 2..]);
    }

    #[test]
    fn overwrite_drops_oldest() {
        let mut rb = RingBuffer::<u8>::overwriting(3).unwrap();

        assert_eq!(rb.write(&[1, 2, 3, 4, 5]), 5);
        assert_eq!(rb.available_to_read(), 3);
        assert_eq!(rb.write_cursor(), 5);
        assert_eq!(rb.read_cursor(), 2);

        let mut out = [0u8; 3];
        assert_eq!(rb.read(&mut out), 3);
        assert_eq!(out, [3, 4, 5]);
        assert!(rb.is_empty());
    }

    #[test]
    fn overwrite_across_multiple_writes() {
        let mut rb = RingBuffer::<u32>::overwriting(4).unwrap();
        for chunk in [&[1u32, 2][..], &[3, 4, 5][..], &[6][..]] {
            assert_eq!(rb.write(chunk), chunk.len());
        }
        // Six written, capacity four: the newest four survive.
        assert_eq!(rb.available_to_read(), 4);
        let mut out = [0u32; 4];
        assert_eq!(rb.read(&mut out), 4);
        assert_eq!(out, [3, 4, 5, 6]);
    }

    #[test]
    fn overwrite_loss_detected_by_cursors() {
        let mut rb = RingBuffer::<u8>::overwriting(4).unwrap();
        rb.write(&[1, 2, 3, 4]);

        let read_before = rb.read_cursor();
        rb.write(&[5, 6]);
        let lost = rb.read_cursor() - read_before;
        assert_eq!(lost, 2);

        let mut out = [0u8; 4];
        assert_eq!(rb.read(&mut out), 4);
        assert_eq!(out, [3, 4, 5, 6]);
    }

    #[test]
    fn metrics_sum_to_capacity() {
        let mut rb = RingBuffer::<u8>::bounded(5).unwrap();
        let mut out = [0u8; 3];
        for step in 0..20 {
            rb.write(&[step as u8; 2]);
            assert_eq!(rb.available_to_read() + rb.available_to_write(), 5);
            rb.read(&mut out);
            assert_eq!(rb.available_to_read() + rb.available_to_write(), 5);
        }
    }

    #[test]
    fn peek_is_idempotent() {
        let mut rb = RingBuffer::<u8>::bounded(4).unwrap();
        rb.write(&[7, 8, 9]);

        let first: Vec<u8> = rb.peek(10).iter().copied().collect();
        let second: Vec<u8> = rb.peek(10).iter().copied().collect();
        assert_eq!(first, [7, 8, 9]);
        assert_eq!(first, second);
        assert_eq!(rb.available_to_read(), 3);
        assert_eq!(rb.read_cursor(), 0);
    }

    #[test]
    fn peek_exposes_two_segments_across_boundary() {
        let mut rb = RingBuffer::<u8>::bounded(4).unwrap();
        rb.write(&[1, 2, 3]);
        rb.skip(2);
        rb.write(&[4, 5, 6]); // wraps: physical slots 3, 0, 1

        let peek = rb.peek(usize::MAX);
        assert_eq!(peek.first(), &[3, 4]);
        assert_eq!(peek.second(), &[5, 6]);
        assert_eq!(peek.len(), 4);

        let mut out = [0u8; 4];
        assert_eq!(peek.copy_to(&mut out), 4);
        assert_eq!(out, [3, 4, 5, 6]);
    }

    #[test]
    fn peek_respects_max() {
        let mut rb = RingBuffer::<u8>::bounded(8).unwrap();
        rb.write(&[1, 2, 3, 4]);
        let peek = rb.peek(2);
        assert_eq!(peek.len(), 2);
        assert_eq!(peek.first(), &[1, 2]);
        assert!(peek.second().is_empty());
    }

    #[test]
    fn skip_discards_without_copy() {
        let mut rb = RingBuffer::<u8>::bounded(4).unwrap();
        rb.write(&[1, 2, 3, 4]);
        assert_eq!(rb.skip(2), 2);
        assert_eq!(rb.available_to_read(), 2);
        let mut out = [0u8; 4];
        let n = rb.read(&mut out);
        assert_eq!(&out[..n], &[3, 4]);
        // Skipping past the end is clamped.
        rb.write(&[9]);
        assert_eq!(rb.skip(100), 1);
    }

    #[test]
    fn float_elements_roundtrip() {
        let mut rb = RingBuffer::<f64>::bounded(3).unwrap();
        assert_eq!(rb.write(&[0.25, -1.5, 3.75]), 3);
        let mut out = [0.0f64; 3];
        assert_eq!(rb.read(&mut out), 3);
        assert_eq!(out, [0.25, -1.5, 3.75]);
    }

    #[test]
    fn fifo_order_preserved_across_many_wraps() {
        let mut rb = RingBuffer::<u16>::bounded(7).unwrap();
        let mut next_write = 0u16;
        let mut next_read = 0u16;
        let mut out = [0u16; 3];
        for _ in 0..500 {
            let chunk: Vec<u16> = (0..4).map(|i| next_write + i).collect();
            let n = rb.write(&chunk);
            next_write += n as u16;

            let n = rb.read(&mut out);
            for &v in &out[..n] {
                assert_eq!(v, next_read);
                next_read += 1;
            }
        }
    }
}
