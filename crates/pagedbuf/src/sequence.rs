//! Read-only character sequences and how buffers compare against them.

use alloc::string::String;
use core::{
    cmp::Ordering,
    hash::{Hash, Hasher},
};

use crate::PagedBuffer;

/// Anything that can be read as an ordered run of `char`s.
///
/// This is the argument type of [`PagedBuffer::append_range`],
/// [`PagedBuffer::compare_to`] and the search methods, so `str`, `String`,
/// `[char]` and other buffers can be passed interchangeably.
pub trait CharSequence {
    /// Number of `char`s in the sequence.
    fn char_count(&self) -> usize;

    /// The `char`s in order.
    fn char_iter(&self) -> impl Iterator<Item = char>;
}

impl CharSequence for str {
    fn char_count(&self) -> usize {
        self.chars().count()
    }

    fn char_iter(&self) -> impl Iterator<Item = char> {
        self.chars()
    }
}

impl CharSequence for String {
    fn char_count(&self) -> usize {
        self.as_str().char_count()
    }

    fn char_iter(&self) -> impl Iterator<Item = char> {
        self.chars()
    }
}

impl CharSequence for [char] {
    fn char_count(&self) -> usize {
        self.len()
    }

    fn char_iter(&self) -> impl Iterator<Item = char> {
        self.iter().copied()
    }
}

impl CharSequence for PagedBuffer {
    fn char_count(&self) -> usize {
        self.len()
    }

    fn char_iter(&self) -> impl Iterator<Item = char> {
        self.chars()
    }
}

impl<T: CharSequence + ?Sized> CharSequence for &T {
    fn char_count(&self) -> usize {
        (**self).char_count()
    }

    fn char_iter(&self) -> impl Iterator<Item = char> {
        (**self).char_iter()
    }
}

#[allow(clippy::cast_possible_wrap)]
fn signed(len: usize) -> i64 {
    len as i64
}

impl PagedBuffer {
    /// Compares against any character sequence, shorter sequences first.
    ///
    /// When the lengths differ the result is the length difference. Otherwise
    /// it is the code point difference of the first pair of characters that
    /// differ, or `0` when there is none. Only the sign is meaningful for
    /// ordering.
    ///
    /// ```rust
    /// use pagedbuf::PagedBuffer;
    ///
    /// let buf = PagedBuffer::from("abc");
    /// assert_eq!(buf.compare_to("abc"), 0);
    /// assert_eq!(buf.compare_to("ab"), 1);
    /// assert_eq!(buf.compare_to("abe"), -2);
    /// assert!(buf.compare_to("zz") > 0);
    /// ```
    #[must_use]
    pub fn compare_to<S: CharSequence + ?Sized>(&self, other: &S) -> i64 {
        let diff = signed(self.len()) - signed(other.char_count());
        if diff != 0 {
            return diff;
        }
        self.chars()
            .zip(other.char_iter())
            .map(|(a, b)| i64::from(u32::from(a)) - i64::from(u32::from(b)))
            .find(|&diff| diff != 0)
            .unwrap_or(0)
    }
}

/// Buffers are equal when their text is equal; page size and page layout do
/// not matter.
impl PartialEq for PagedBuffer {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.chars().eq(other.chars())
    }
}

impl Eq for PagedBuffer {}

impl PartialOrd for PagedBuffer {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Orders by length first, then by the first differing character, following
/// [`PagedBuffer::compare_to`].
impl Ord for PagedBuffer {
    fn cmp(&self, other: &Self) -> Ordering {
        self.compare_to(other).cmp(&0)
    }
}

/// Hashes the materialized text, so equal buffers hash equal whatever their
/// page size.
impl Hash for PagedBuffer {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_str().hash(state);
    }
}
