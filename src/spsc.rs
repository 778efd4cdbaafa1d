//! Producer/consumer halves for concurrent single-writer/single-reader use.
//!
//! [`RingBuffer::split`] consumes the buffer and hands back exactly one
//! [`Producer`] and one [`Consumer`] sharing the same storage. Neither handle
//! is cloneable, so the write cursor is mutated by one thread and the read
//! cursor by another, and the acquire/release pairing on the cursors makes
//! every published write visible before its cursor advance is observed.
//!
//! Splitting is only available under [`OverflowPolicy::Bounded`]: an
//! overwriting writer destroys slots a concurrent reader may be copying, so
//! overwrite-policy buffers stay exclusive-access.

use std::sync::Arc;

use crate::ring_buffer::{
    Element, OverflowPolicy, Peek, RingBuffer, RingBufferError, RingBufferInner,
};

/// Write half of a split ring buffer. Exactly one exists per buffer.
#[derive(Debug)]
pub struct Producer<T: Element> {
    inner: Arc<RingBufferInner<T>>,
}

/// Read half of a split ring buffer. Exactly one exists per buffer.
#[derive(Debug)]
pub struct Consumer<T: Element> {
    inner: Arc<RingBufferInner<T>>,
}

impl<T: Element> RingBuffer<T> {
    /// Split into a [`Producer`] and [`Consumer`] for use on two threads.
    ///
    /// # Returns
    /// * `Ok((producer, consumer))` for bounded-policy buffers
    /// * `Err(RingBufferError::OverwriteNotSplittable)` otherwise
    pub fn split(self) -> Result<(Producer<T>, Consumer<T>), RingBufferError> {
        if self.policy() == OverflowPolicy::Overwrite {
            return Err(RingBufferError::OverwriteNotSplittable);
        }
        let consumer = Consumer {
            inner: Arc::clone(&self.inner),
        };
        Ok((Producer { inner: self.inner }, consumer))
    }
}

impl<T: Element> Producer<T> {
    /// Write elements from `data`, returning the short count actually
    /// written. Zero means the buffer is full; poll and retry.
    pub fn write(&mut self, data: &[T]) -> usize {
        self.inner.write(data)
    }

    /// All-or-nothing write; fails with [`RingBufferError::BufferFull`]
    /// without writing anything when `data` does not fit.
    pub fn write_all(&mut self, data: &[T]) -> Result<(), RingBufferError> {
        self.inner.write_all(data)
    }

    /// Free element slots at the time of the call. The reader can only
    /// increase this, so it is a safe lower bound for the next write.
    pub fn available_to_write(&self) -> usize {
        self.inner.available_to_write()
    }

    /// Fixed element capacity.
    pub fn capacity(&self) -> usize {
        self.inner.capacity()
    }

    /// True when no free slot remained at the time of the call.
    pub fn is_full(&self) -> bool {
        self.inner.available_to_write() == 0
    }

    /// Absolute count of elements ever written.
    pub fn write_cursor(&self) -> u64 {
        self.inner.write_cursor()
    }
}

impl<T: Element> Consumer<T> {
    /// Read up to `out.len()` elements by copy, returning the count read.
    /// Zero means the buffer was empty; poll again later.
    pub fn read(&mut self, out: &mut [T]) -> usize {
        self.inner.read(out)
    }

    /// Zero-copy view of up to `max` readable elements without consuming
    /// them. The writer only touches slots outside this window until the
    /// read cursor advances, so the view stays stable while borrowed.
    pub fn peek(&self, max: usize) -> Peek<'_, T> {
        let (first, second) = self.inner.peek(max);
        Peek::new(first, second)
    }

    /// Discard up to `max` readable elements, returning the count discarded.
    pub fn skip(&mut self, max: usize) -> usize {
        self.inner.skip(max)
    }

    /// Elements readable at the time of the call. The writer can only
    /// increase this, so it is a safe lower bound for the next read.
    pub fn available_to_read(&self) -> usize {
        self.inner.available_to_read()
    }

    /// Fixed element capacity.
    pub fn capacity(&self) -> usize {
        self.inner.capacity()
    }

    /// True when nothing was readable at the time of the call.
    pub fn is_empty(&self) -> bool {
        self.inner.available_to_read() == 0
    }

    /// Absolute count of elements ever consumed.
    pub fn read_cursor(&self) -> u64 {
        self.inner.read_cursor()
    }
}
