//! # ringpipe - SPSC Ring Buffer for Bulk Numeric Data
//!
//! A fixed-capacity circular buffer designed to sit between a fast producer
//! (e.g. a stream reader) and a consumer (e.g. numeric-array processing)
//! without reallocating memory or blocking either side.
//!
//! ## Design
//!
//! - Single allocation at construction; write/read never allocate
//! - Monotonic 64-bit cursors mapped to physical offsets by modulo capacity
//! - Single-producer, single-consumer; lock-free via acquire/release atomics
//! - Two overflow policies: `Bounded` (short writes signal backpressure) and
//!   `Overwrite` (newest data wins, oldest unread data is dropped)
//! - Short reads and short writes are flow control, not errors
//! - Zero-copy `peek` exposing the readable window as at most two slices
//!
//! ## Example
//!
//! ```
//! use ringpipe::RingBuffer;
//!
//! let mut rb = RingBuffer::<u8>::bounded(4).unwrap();
//!
//! // Producer: the short count on the second write signals backpressure.
//! assert_eq!(rb.write(&[1, 2, 3]), 3);
//! assert_eq!(rb.write(&[4, 5]), 1);
//!
//! // Consumer: reads up to the requested amount, short reads are normal.
//! let mut out = [0u8; 8];
//! let n = rb.read(&mut out);
//! assert_eq!(&out[..n], &[1, 2, 3, 4]);
//! ```
//!
//! For concurrent use, [`RingBuffer::split`] yields a [`Producer`] and a
//! [`Consumer`] that may live on different threads:
//!
//! ```
//! use ringpipe::RingBuffer;
//!
//! let rb = RingBuffer::<f32>::bounded(1024).unwrap();
//! let (mut producer, mut consumer) = rb.split().unwrap();
//!
//! let writer = std::thread::spawn(move || {
//!     let samples = [0.5f32; 64];
//!     producer.write(&samples);
//! });
//! writer.join().unwrap();
//!
//! let mut out = [0.0f32; 64];
//! assert_eq!(consumer.read(&mut out), 64);
//! ```

#![warn(missing_docs)]

mod ring_buffer;
mod spsc;

pub use ring_buffer::{Element, OverflowPolicy, Peek, RingBuffer, RingBufferError};
pub use spsc::{Consumer, Producer};
