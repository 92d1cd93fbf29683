//! Persisted form of a [`PagedBuffer`].
//!
//! The layout is fixed-width and big-endian:
//!
//! | bytes        | content                                  |
//! |--------------|------------------------------------------|
//! | `0..4`       | page size, `u32`                         |
//! | `4..8`       | length in characters (`n`), `u32`        |
//! | `8..8 + 4n`  | `n` characters as `u32` scalar values    |
//!
//! Characters are written page by page with no separator, the last page cut
//! at the write offset. Decoding rebuilds the same page layout, so the
//! decoded buffer continues appending exactly where the original would have.

use alloc::vec::Vec;

use tracing::debug;

use crate::{
    BufferError, CorruptState, PageSize, PagedBuffer, Result, chars::for_each_run,
    coords::Coords, page_table::PageTable,
};

const HEADER_LEN: usize = 8;
const UNIT_LEN: usize = 4;

fn read_u32(bytes: &[u8], at: usize) -> u32 {
    u32::from_be_bytes([bytes[at], bytes[at + 1], bytes[at + 2], bytes[at + 3]])
}

impl PagedBuffer {
    /// Size in bytes of [`PagedBuffer::to_bytes`]'s output.
    #[must_use]
    pub fn encoded_len(&self) -> usize {
        HEADER_LEN + self.size * UNIT_LEN
    }

    /// Appends the persisted form of this buffer to `out`.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::InvalidArgument`] when the page size or the
    /// length does not fit the format's 32-bit fields. Nothing is written in
    /// that case.
    pub fn write_into(&self, out: &mut Vec<u8>) -> Result<()> {
        let page_size = u32::try_from(self.page_size())
            .map_err(|_| BufferError::InvalidArgument("page size exceeds u32::MAX"))?;
        let size = u32::try_from(self.size)
            .map_err(|_| BufferError::InvalidArgument("length exceeds u32::MAX"))?;

        out.reserve(self.encoded_len());
        out.extend_from_slice(&page_size.to_be_bytes());
        out.extend_from_slice(&size.to_be_bytes());
        for_each_run(&self.table, 0, self.size, |run| {
            for &c in run {
                out.extend_from_slice(&u32::from(c).to_be_bytes());
            }
        });
        Ok(())
    }

    /// The persisted form of this buffer.
    ///
    /// # Errors
    ///
    /// See [`PagedBuffer::write_into`].
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut out = Vec::new();
        self.write_into(&mut out)?;
        Ok(out)
    }

    /// Rebuilds a buffer from the output of [`PagedBuffer::to_bytes`].
    ///
    /// Unwritten units of the last page are zero, and the write position is
    /// recomputed from the length and page size.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::CorruptPersistedState`] when the input is
    /// shorter or longer than its header implies, declares a zero page size
    /// or one above [`PageSize::MAX`], or carries a value that is not a
    /// `char`. The first page is allocated after the header checks pass, so a
    /// header alone can still request up to one page of [`PageSize::MAX`]
    /// units.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        decode(bytes).inspect_err(|error| debug!(%error, len = bytes.len(), "rejected persisted buffer"))
    }
}

fn decode(bytes: &[u8]) -> Result<PagedBuffer> {
    if bytes.len() < HEADER_LEN {
        return Err(CorruptState::Truncated {
            needed: HEADER_LEN,
            found: bytes.len(),
        }
        .into());
    }
    let raw_page_size = read_u32(bytes, 0);
    let raw_size = read_u32(bytes, 4);

    if raw_page_size == 0 {
        return Err(CorruptState::ZeroPageSize.into());
    }
    let page_size = usize::try_from(raw_page_size)
        .ok()
        .and_then(|units| PageSize::new(units).ok())
        .ok_or(CorruptState::PageSizeTooLarge(raw_page_size))?;
    let size = usize::try_from(raw_size)
        .ok()
        .filter(|size| size.checked_mul(UNIT_LEN).and_then(|n| n.checked_add(HEADER_LEN)).is_some())
        .ok_or(CorruptState::SizeOverflow(raw_size))?;

    let needed = HEADER_LEN + size * UNIT_LEN;
    if bytes.len() < needed {
        return Err(CorruptState::Truncated {
            needed,
            found: bytes.len(),
        }
        .into());
    }
    if bytes.len() > needed {
        return Err(CorruptState::TrailingBytes(bytes.len() - needed).into());
    }

    // The page the next append writes into must exist, even when the last
    // written page is exactly full.
    let pages = Coords::of(size, page_size).page + 1;
    let mut table = PageTable::with_pages(page_size, pages);
    for (position, unit) in bytes[HEADER_LEN..].chunks_exact(UNIT_LEN).enumerate() {
        let value = read_u32(unit, 0);
        let c = char::from_u32(value).ok_or(CorruptState::InvalidUnit { position, value })?;
        let at = Coords::of(position, page_size);
        table.page_mut(at.page)[at.offset] = c;
    }
    Ok(PagedBuffer::from_table(table, size))
}

#[cfg(any(test, feature = "serde"))]
mod serde_impls {
    use alloc::string::String;

    use serde::{Deserialize, Deserializer, Serialize, Serializer, de};

    use crate::PagedBuffer;

    #[derive(Serialize)]
    struct Repr<'a> {
        page_size: usize,
        text: &'a str,
    }

    #[derive(Deserialize)]
    struct OwnedRepr {
        page_size: usize,
        text: String,
    }

    impl Serialize for PagedBuffer {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            Repr {
                page_size: self.page_size(),
                text: self.as_str(),
            }
            .serialize(serializer)
        }
    }

    impl<'de> Deserialize<'de> for PagedBuffer {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            let repr = OwnedRepr::deserialize(deserializer)?;
            let mut buf = PagedBuffer::new(repr.page_size).map_err(de::Error::custom)?;
            buf.push_str(&repr.text);
            Ok(buf)
        }
    }
}
