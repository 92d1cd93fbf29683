//! Page size configuration.
//!
//! A [`PageSize`] is the number of `char` units every page of a
//! [`PagedBuffer`] holds. It can be given directly, or built up with the
//! [`Amount`] builder returned by [`PagedBuffer::with`]:
//!
//! ```rust
//! use pagedbuf::PagedBuffer;
//!
//! // 8 Ki characters per page, spelled three ways.
//! let a = PagedBuffer::with(8192).chars()?;
//! let b = PagedBuffer::with(8).kilo().chars()?;
//! let c = PagedBuffer::with(32).kilo().bytes()?;
//! assert_eq!(a.page_size(), 8192);
//! assert_eq!(b.page_size(), 8192);
//! assert_eq!(c.page_size(), 8192);
//! # Ok::<(), pagedbuf::BufferError>(())
//! ```

use core::{fmt, mem::size_of, num::NonZeroUsize};

use crate::{BufferError, PagedBuffer, Result};

/// The fixed number of `char` units stored in one page.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PageSize(NonZeroUsize);

impl PageSize {
    /// 8 Ki units: few allocations for bulk text, little waste for short text.
    pub const DEFAULT: PageSize = PageSize(NonZeroUsize::new(8192).unwrap());

    /// Largest accepted page size: 2<sup>28</sup> units, i.e. 1 GiB pages.
    ///
    /// Decoding persisted bytes allocates a page of the declared size before
    /// any unit is read, so the ceiling also bounds what a short, hostile
    /// header can make the decoder allocate.
    pub const MAX: usize = 1 << 28;

    /// Validates `1 <= units <= PageSize::MAX`.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::InvalidArgument`] when `units` is zero or above
    /// [`PageSize::MAX`].
    pub fn new(units: usize) -> Result<Self> {
        if units > Self::MAX {
            return Err(BufferError::InvalidArgument("page size exceeds the maximum page size"));
        }
        NonZeroUsize::new(units)
            .map(PageSize)
            .ok_or(BufferError::InvalidArgument("page size must be greater than zero"))
    }

    /// Units per page.
    #[inline]
    #[must_use]
    pub fn get(self) -> usize {
        self.0.get()
    }
}

impl Default for PageSize {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl TryFrom<usize> for PageSize {
    type Error = BufferError;

    fn try_from(units: usize) -> Result<Self> {
        Self::new(units)
    }
}

impl From<PageSize> for usize {
    fn from(size: PageSize) -> Self {
        size.get()
    }
}

impl fmt::Debug for PageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl fmt::Display for PageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Builder for a page size expressed as an amount of memory.
///
/// Multipliers scale the amount by powers of two; the terminal methods
/// decide whether the amount counts characters or bytes and build the
/// buffer. Overflow and zero-sized pages are reported when the buffer is
/// built, never wrapped silently.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub struct Amount(Result<usize>);

impl Amount {
    pub(crate) fn new(amount: usize) -> Self {
        if amount < 1 {
            return Amount(Err(BufferError::InvalidArgument(
                "amount must be greater than zero",
            )));
        }
        Amount(Ok(amount))
    }

    fn scale(self, shift: u32) -> Self {
        Amount(self.0.and_then(|amount| {
            amount
                .checked_mul(1 << shift)
                .ok_or(BufferError::InvalidArgument("amount overflows usize"))
        }))
    }

    /// Multiplies the amount by 2<sup>10</sup>.
    pub fn kilo(self) -> Self {
        self.scale(10)
    }

    /// Multiplies the amount by 2<sup>20</sup>.
    pub fn mega(self) -> Self {
        self.scale(20)
    }

    /// Multiplies the amount by 2<sup>30</sup>.
    pub fn giga(self) -> Self {
        self.scale(30)
    }

    /// Builds a buffer whose pages hold this many characters.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::InvalidArgument`] for a zero or overflowing
    /// amount, or one above [`PageSize::MAX`].
    pub fn chars(self) -> Result<PagedBuffer> {
        Ok(PagedBuffer::with_page_size(self.page_size_in_chars()?))
    }

    /// Builds a buffer whose pages occupy this many bytes.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::InvalidArgument`] for an overflowing amount,
    /// one too small to hold a single character, or one above
    /// [`PageSize::MAX`] characters.
    pub fn bytes(self) -> Result<PagedBuffer> {
        Ok(PagedBuffer::with_page_size(self.page_size_in_bytes()?))
    }

    /// The page size [`Amount::chars`] would use.
    ///
    /// # Errors
    ///
    /// See [`Amount::chars`].
    pub fn page_size_in_chars(self) -> Result<PageSize> {
        PageSize::new(self.0?)
    }

    /// The page size [`Amount::bytes`] would use.
    ///
    /// # Errors
    ///
    /// See [`Amount::bytes`].
    pub fn page_size_in_bytes(self) -> Result<PageSize> {
        match self.0? / size_of::<char>() {
            0 => Err(BufferError::InvalidArgument("amount is smaller than one character")),
            units => PageSize::new(units),
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[test]
    fn zero_is_rejected() {
        assert_eq!(
            PageSize::new(0),
            Err(BufferError::InvalidArgument("page size must be greater than zero"))
        );
        assert_eq!(PageSize::try_from(1).map(PageSize::get), Ok(1));
        assert_eq!(PageSize::default().get(), 8192);
    }

    #[test]
    fn oversized_pages_are_rejected() {
        assert_eq!(PageSize::new(PageSize::MAX).map(PageSize::get), Ok(1 << 28));
        assert_eq!(
            PageSize::new(PageSize::MAX + 1),
            Err(BufferError::InvalidArgument("page size exceeds the maximum page size"))
        );
        assert_eq!(
            Amount::new(1).giga().page_size_in_chars(),
            Err(BufferError::InvalidArgument("page size exceeds the maximum page size"))
        );
        assert_eq!(
            Amount::new(1).giga().page_size_in_bytes().map(PageSize::get),
            Ok(PageSize::MAX)
        );
    }

    #[rstest]
    #[case(Amount::new(3).chars(), 3)]
    #[case(Amount::new(2).kilo().chars(), 2048)]
    #[case(Amount::new(1).mega().chars(), 1 << 20)]
    #[case(Amount::new(16).kilo().bytes(), 4096)]
    #[case(Amount::new(4).bytes(), 1)]
    #[case(Amount::new(7).bytes(), 1)]
    fn builder_resolves_page_size(#[case] built: Result<PagedBuffer>, #[case] expected: usize) {
        assert_eq!(built.map(|b| b.page_size()), Ok(expected));
    }

    #[test]
    fn builder_reports_invalid_amounts() {
        assert!(matches!(
            Amount::new(0).kilo().chars(),
            Err(BufferError::InvalidArgument(_))
        ));
        assert!(matches!(
            Amount::new(3).bytes(),
            Err(BufferError::InvalidArgument("amount is smaller than one character"))
        ));
        assert!(matches!(
            Amount::new(usize::MAX).kilo().chars(),
            Err(BufferError::InvalidArgument("amount overflows usize"))
        ));
    }
}
