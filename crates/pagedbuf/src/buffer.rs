//! The paged character buffer.
//!
//! Growth never copies what was already written: when the page being
//! written fills up, one more fixed-size page is pushed onto the page table
//! and writing continues there.

use alloc::string::{String, ToString};
use core::{cell::OnceCell, fmt, ops::Index};

use bstr::ByteSlice;

use crate::{
    BufferError, CharSequence, PageSize, Result,
    chars::{Chars, for_each_run},
    coords::Coords,
    page_size::Amount,
    page_table::PageTable,
};

/// A mutable sequence of `char`s stored in fixed-size pages.
///
/// Where `String` doubles its allocation and copies everything when it runs
/// out of room, `PagedBuffer` allocates a single new page. Each growth step
/// costs one page-sized allocation, and no single allocation ever has to hold
/// the whole text.
///
/// Positions are counted in `char`s, not bytes.
///
/// # Examples
///
/// ```rust
/// use pagedbuf::PagedBuffer;
///
/// let mut buf = PagedBuffer::new(4)?;
/// buf.push_str("Hello World");
/// assert_eq!(buf.len(), 11);
/// assert_eq!(buf.char_at(6)?, 'W');
///
/// buf.delete(2, 7)?;
/// assert_eq!(buf.as_str(), "Heorld");
/// # Ok::<(), pagedbuf::BufferError>(())
/// ```
#[derive(Clone)]
pub struct PagedBuffer {
    pub(crate) table: PageTable,
    pub(crate) size: usize,
    /// Where the next character goes. Always `Coords::of(size, page_size)`.
    pub(crate) cursor: Coords,
    cache: OnceCell<String>,
}

impl PagedBuffer {
    /// Creates an empty buffer whose pages hold `page_size` characters.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::InvalidArgument`] when `page_size` is zero or
    /// above [`PageSize::MAX`].
    pub fn new(page_size: usize) -> Result<Self> {
        Ok(Self::with_page_size(PageSize::new(page_size)?))
    }

    /// Creates an empty buffer with an already validated page size.
    #[must_use]
    pub fn with_page_size(page_size: PageSize) -> Self {
        Self::from_table(PageTable::new(page_size), 0)
    }

    /// Creates an empty buffer using [`PageSize::DEFAULT`].
    #[must_use]
    pub fn with_default_page_size() -> Self {
        Self::with_page_size(PageSize::DEFAULT)
    }

    /// Starts building a buffer from an amount of memory per page.
    ///
    /// See [`Amount`] for the multipliers and terminal methods.
    pub fn with(amount: usize) -> Amount {
        Amount::new(amount)
    }

    pub(crate) fn from_table(table: PageTable, size: usize) -> Self {
        let cursor = Coords::of(size, table.page_size());
        debug_assert!(table.len() > cursor.page);
        Self {
            table,
            size,
            cursor,
            cache: OnceCell::new(),
        }
    }

    /// Characters per page, fixed at construction.
    #[inline]
    #[must_use]
    pub fn page_size(&self) -> usize {
        self.table.page_size().get()
    }

    /// Number of pages currently allocated, including the page being written.
    #[inline]
    #[must_use]
    pub fn page_count(&self) -> usize {
        self.table.len()
    }

    /// Characters the allocated pages can hold before another page is needed.
    #[inline]
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.table.len() * self.page_size()
    }

    /// Number of characters written.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.size
    }

    /// Whether no characters are written.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Drops the memoized text; every mutation goes through here.
    #[inline]
    fn touch(&mut self) {
        self.cache.take();
    }

    /// Moves the write cursor `len` units along the current page, opening a
    /// new page when this one is full.
    fn advance_cursor(&mut self, len: usize) {
        let page_size = self.table.page_size();
        self.cursor.advance(len, page_size);
        self.size += len;
        if self.cursor.offset == 0 && len > 0 {
            let page = self.table.allocate_next();
            debug_assert_eq!(page, self.cursor.page);
        }
    }

    /// Appends one character.
    pub fn push(&mut self, c: char) -> &mut Self {
        self.touch();
        let Coords { page, offset } = self.cursor;
        self.table.page_mut(page)[offset] = c;
        self.advance_cursor(1);
        self
    }

    /// Appends a slice of characters, block-copying one page-sized chunk at
    /// a time.
    pub fn push_chars(&mut self, chars: &[char]) -> &mut Self {
        if chars.is_empty() {
            return self;
        }
        self.touch();
        let mut rest = chars;
        while !rest.is_empty() {
            let Coords { page, offset } = self.cursor;
            let len = self.cursor.room(self.table.page_size()).min(rest.len());
            let (chunk, tail) = rest.split_at(len);
            self.table.page_mut(page)[offset..offset + len].copy_from_slice(chunk);
            self.advance_cursor(len);
            rest = tail;
        }
        self
    }

    /// Appends the characters of `text`.
    pub fn push_str(&mut self, text: &str) -> &mut Self {
        if text.is_empty() {
            return self;
        }
        self.touch();
        self.fill_from(text.chars());
        self
    }

    /// Appends `text`, or the literal `null` when there is none.
    pub fn append(&mut self, text: Option<&str>) -> &mut Self {
        self.push_str(text.unwrap_or("null"))
    }

    /// Appends the characters `start..end` of `seq`.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::InvalidRange`] when `start > end` and
    /// [`BufferError::IndexOutOfRange`] when `end` is past the end of `seq`.
    /// The buffer is left untouched on error.
    pub fn append_range<S>(&mut self, seq: &S, start: usize, end: usize) -> Result<&mut Self>
    where
        S: CharSequence + ?Sized,
    {
        BufferError::check_range(start, end, seq.char_count())?;
        if start < end {
            self.touch();
            self.fill_from(seq.char_iter().skip(start).take(end - start));
        }
        Ok(self)
    }

    /// Appends the [`Display`](fmt::Display) form of `value`, so
    /// `append_display(12.5)` appends `12.5` and `append_display(true)`
    /// appends `true`.
    ///
    /// The text is rendered in full before anything is appended.
    pub fn append_display<T: fmt::Display>(&mut self, value: T) -> &mut Self {
        let text = value.to_string();
        self.push_str(&text)
    }

    /// Appends a byte string decoded as UTF-8, replacing invalid sequences
    /// with U+FFFD.
    pub fn push_utf8_lossy(&mut self, bytes: &[u8]) -> &mut Self {
        if bytes.is_empty() {
            return self;
        }
        self.touch();
        self.fill_from(bytes.chars());
        self
    }

    /// Writes `chars` page by page: each round fills the rest of the current
    /// page, or stops early when the input runs out.
    fn fill_from(&mut self, chars: impl Iterator<Item = char>) {
        let mut chars = chars.peekable();
        while chars.peek().is_some() {
            let Coords { page, offset } = self.cursor;
            let mut written = 0;
            for (slot, c) in self.table.page_mut(page)[offset..]
                .iter_mut()
                .zip(chars.by_ref())
            {
                *slot = c;
                written += 1;
            }
            self.advance_cursor(written);
        }
    }

    /// The character at `index`, or `None` past the end.
    #[inline]
    #[must_use]
    pub fn get(&self, index: usize) -> Option<char> {
        (index < self.size).then(|| self.table.get(Coords::of(index, self.table.page_size())))
    }

    /// The character at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::IndexOutOfRange`] unless `index < len()`.
    #[inline]
    pub fn char_at(&self, index: usize) -> Result<char> {
        self.get(index).ok_or(BufferError::IndexOutOfRange {
            index,
            len: self.size,
        })
    }

    /// Removes the characters `start..end`, shifting the tail left across page
    /// boundaries and releasing pages that are no longer needed.
    ///
    /// An `end` past the end of the buffer removes everything from `start`.
    /// `start == end` is a no-op for any `start`, including one past `len()`.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::InvalidRange`] when `start > end`, and
    /// [`BufferError::IndexOutOfRange`] when `start < end` and
    /// `start > len()`. The buffer is left untouched on error.
    pub fn delete(&mut self, start: usize, end: usize) -> Result<&mut Self> {
        if start > end {
            return Err(BufferError::InvalidRange { start, end });
        }
        if start == end {
            return Ok(self);
        }
        if start > self.size {
            return Err(BufferError::IndexOutOfRange {
                index: start,
                len: self.size,
            });
        }
        let end = end.min(self.size);
        if start == end {
            return Ok(self);
        }
        self.touch();

        let page_size = self.table.page_size();
        let mut dst = Coords::of(start, page_size);
        let mut src = Coords::of(end, page_size);
        let mut remaining = self.size - end;
        while remaining > 0 {
            // A chunk may cross neither the source nor the destination page,
            // and may not reach past the page being written.
            let len = src
                .room(page_size)
                .min(dst.room(page_size))
                .min(self.cursor.room(page_size))
                .min(remaining);
            self.table.copy_within(src, dst, len);
            src.advance(len, page_size);
            dst.advance(len, page_size);
            remaining -= len;
        }

        self.size -= end - start;
        self.cursor = Coords::of(self.size, page_size);
        self.table.clear_from(self.cursor);
        self.table.discard_after(self.cursor.page);
        Ok(self)
    }

    /// Removes the character at `index`; exactly `delete(index, index + 1)`.
    ///
    /// `delete_at(len())` is therefore a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::IndexOutOfRange`] when `index > len()`.
    pub fn delete_at(&mut self, index: usize) -> Result<&mut Self> {
        self.delete(index, index.saturating_add(1))
    }

    /// Removes everything and releases all pages but a fresh first one.
    pub fn clear(&mut self) -> &mut Self {
        self.touch();
        self.table.reset();
        self.size = 0;
        self.cursor = Coords::default();
        self
    }

    /// Copies `start..end` into a new, independent buffer with the same page
    /// size.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::InvalidRange`] when `start > end` and
    /// [`BufferError::IndexOutOfRange`] when `end > len()`.
    pub fn sub_sequence(&self, start: usize, end: usize) -> Result<PagedBuffer> {
        BufferError::check_range(start, end, self.size)?;
        let mut sub = PagedBuffer::with_page_size(self.table.page_size());
        for c in Chars::new(&self.table, start, end) {
            sub.push(c);
        }
        Ok(sub)
    }

    /// The characters `start..end` as a `String`.
    ///
    /// # Errors
    ///
    /// Same as [`PagedBuffer::sub_sequence`].
    pub fn substring(&self, start: usize, end: usize) -> Result<String> {
        Ok(self.sub_sequence(start, end)?.materialize())
    }

    /// The characters from `start` to the end as a `String`.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::IndexOutOfRange`] when `start > len()`.
    pub fn substring_from(&self, start: usize) -> Result<String> {
        self.substring(start, self.size)
    }

    /// Iterates over the characters in order.
    #[must_use]
    pub fn chars(&self) -> Chars<'_> {
        Chars::new(&self.table, 0, self.size)
    }

    /// The whole content as one flat string.
    ///
    /// The first call after a mutation copies every page into a new `String`;
    /// later calls return the same string until the buffer changes again.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.cache.get_or_init(|| self.materialize())
    }

    fn materialize(&self) -> String {
        let mut out = String::with_capacity(self.size);
        for_each_run(&self.table, 0, self.size, |run| out.extend(run));
        out
    }
}

impl Default for PagedBuffer {
    fn default() -> Self {
        Self::with_default_page_size()
    }
}

impl Index<usize> for PagedBuffer {
    type Output = char;

    /// # Panics
    ///
    /// Panics when `index >= len()`.
    fn index(&self, index: usize) -> &char {
        assert!(
            index < self.size,
            "index {index} out of range for length {}",
            self.size
        );
        let at = Coords::of(index, self.table.page_size());
        &self.table.page(at.page)[at.offset]
    }
}

impl fmt::Display for PagedBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(text) = self.cache.get() {
            return f.write_str(text);
        }
        let mut result = Ok(());
        for_each_run(&self.table, 0, self.size, |run| {
            for &c in run {
                if result.is_ok() {
                    result = fmt::Write::write_char(&mut *f, c);
                }
            }
        });
        result
    }
}

impl fmt::Debug for PagedBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PagedBuffer")
            .field("page_size", &self.page_size())
            .field("len", &self.size)
            .field("pages", &self.table.len())
            .field("text", &self.as_str())
            .finish()
    }
}

impl fmt::Write for PagedBuffer {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.push_str(s);
        Ok(())
    }

    fn write_char(&mut self, c: char) -> fmt::Result {
        self.push(c);
        Ok(())
    }
}

impl Extend<char> for PagedBuffer {
    fn extend<I: IntoIterator<Item = char>>(&mut self, iter: I) {
        let mut iter = iter.into_iter().peekable();
        if iter.peek().is_some() {
            self.touch();
            self.fill_from(iter);
        }
    }
}

impl<'a> Extend<&'a str> for PagedBuffer {
    fn extend<I: IntoIterator<Item = &'a str>>(&mut self, iter: I) {
        for text in iter {
            self.push_str(text);
        }
    }
}

impl FromIterator<char> for PagedBuffer {
    fn from_iter<I: IntoIterator<Item = char>>(iter: I) -> Self {
        let mut buf = Self::default();
        buf.extend(iter);
        buf
    }
}

impl From<&str> for PagedBuffer {
    fn from(text: &str) -> Self {
        let mut buf = Self::default();
        buf.push_str(text);
        buf
    }
}
