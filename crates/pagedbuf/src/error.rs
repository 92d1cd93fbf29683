use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T, E = BufferError> = core::result::Result<T, E>;

/// Everything that can go wrong when building, editing or decoding a
/// [`PagedBuffer`](crate::PagedBuffer).
///
/// A failed operation never leaves a partially mutated buffer behind.
///
/// The argument errors come in two shapes. [`BufferError::InvalidArgument`]
/// covers a bad scalar argument, and [`BufferError::InvalidRange`] is the
/// same class of caller error for a `start > end` range. Use
/// [`BufferError::is_invalid_argument`] to test for either.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BufferError {
    /// A scalar argument is unusable, e.g. a zero page size.
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),
    /// A range argument has `start > end`. An invalid argument, reported
    /// with both bounds.
    #[error("invalid range: start {start} is greater than end {end}")]
    InvalidRange {
        /// Requested start.
        start: usize,
        /// Requested end.
        end: usize,
    },
    /// An index or range bound lies past the end of the sequence.
    #[error("index {index} out of range for length {len}")]
    IndexOutOfRange {
        /// The offending index or bound.
        index: usize,
        /// Length of the sequence at the time of the call.
        len: usize,
    },
    /// Persisted bytes could not be decoded.
    #[error("corrupt persisted state: {0}")]
    CorruptPersistedState(#[from] CorruptState),
}

/// Why a persisted buffer could not be decoded.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CorruptState {
    /// The input ends before the header or the declared units.
    #[error("truncated input: needed {needed} bytes, found {found}")]
    Truncated {
        /// Bytes the header promises.
        needed: usize,
        /// Bytes actually present.
        found: usize,
    },
    /// The header declares a page size of zero.
    #[error("page size must be greater than zero")]
    ZeroPageSize,
    /// The header declares a page size above [`PageSize::MAX`](crate::PageSize::MAX).
    #[error("page size {0} exceeds the maximum page size")]
    PageSizeTooLarge(u32),
    /// A unit is not a Unicode scalar value.
    #[error("unit {value:#x} at position {position} is not a unicode scalar value")]
    InvalidUnit {
        /// Character position of the unit.
        position: usize,
        /// The raw unit.
        value: u32,
    },
    /// Bytes remain after the declared units.
    #[error("{0} trailing bytes after the last unit")]
    TrailingBytes(usize),
    /// The declared size does not fit in `usize`.
    #[error("size {0} does not fit in memory on this target")]
    SizeOverflow(u32),
}

impl BufferError {
    /// Whether this is a caller argument error, either
    /// [`InvalidArgument`](Self::InvalidArgument) or
    /// [`InvalidRange`](Self::InvalidRange).
    #[must_use]
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument(_) | Self::InvalidRange { .. })
    }

    pub(crate) fn check_range(start: usize, end: usize, len: usize) -> Result<()> {
        if start > end {
            return Err(BufferError::InvalidRange { start, end });
        }
        if end > len {
            return Err(BufferError::IndexOutOfRange { index: end, len });
        }
        Ok(())
    }
}
