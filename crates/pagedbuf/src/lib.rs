//! A growable character buffer that never reallocates what it already holds.
//!
//! [`PagedBuffer`] stores its characters in fixed-size pages. When the page
//! being written fills up, one more page is allocated and the existing pages
//! stay where they are. Growth therefore costs one page-sized allocation at
//! a time, with no doubling and no copying of earlier content.
//!
//! ```rust
//! use pagedbuf::PagedBuffer;
//!
//! let mut buf = PagedBuffer::with(16).kilo().bytes()?;
//! buf.push_str("Hello").push(' ').append_display(42);
//! assert_eq!(buf.as_str(), "Hello 42");
//!
//! let restored = PagedBuffer::from_bytes(&buf.to_bytes()?)?;
//! assert_eq!(restored, buf);
//! # Ok::<(), pagedbuf::BufferError>(())
//! ```
//!
//! The buffer is a plain single-owner value: share it across threads behind
//! a lock, or give each thread its own.

#![no_std]
extern crate alloc;

#[cfg(any(test, feature = "fuzzing"))]
extern crate std;

mod buffer;
mod chars;
mod codec;
mod coords;
mod error;
mod page_size;
mod page_table;
mod search;
mod sequence;

#[cfg(any(test, feature = "fuzzing"))]
pub mod ops;

#[cfg(test)]
mod tests;

pub use buffer::PagedBuffer;
pub use chars::Chars;
pub use error::{BufferError, CorruptState, Result};
pub use page_size::{Amount, PageSize};
pub use sequence::CharSequence;
