use alloc::vec::Vec;

use crate::{CharSequence, PagedBuffer, chars::Chars};

impl PagedBuffer {
    /// Position of the first occurrence of `needle`.
    ///
    /// ```rust
    /// use pagedbuf::PagedBuffer;
    ///
    /// let buf = PagedBuffer::from("Hello World Wow");
    /// assert_eq!(buf.index_of("Wo"), Some(6));
    /// assert_eq!(buf.index_of("wo"), None);
    /// ```
    #[must_use]
    pub fn index_of<S: CharSequence + ?Sized>(&self, needle: &S) -> Option<usize> {
        self.index_of_from(needle, 0)
    }

    /// Position of the first occurrence of `needle` starting at or after
    /// `from`.
    ///
    /// A `from` at or past the end only finds the empty needle, at `len()`.
    #[must_use]
    pub fn index_of_from<S: CharSequence + ?Sized>(&self, needle: &S, from: usize) -> Option<usize> {
        let needle: Vec<char> = needle.char_iter().collect();
        if from >= self.len() {
            return needle.is_empty().then_some(self.len());
        }
        if needle.is_empty() {
            return Some(from);
        }
        let last_start = self.len().checked_sub(needle.len())?;
        (from..=last_start).find(|&at| self.matches_at(at, &needle))
    }

    /// Position of the last occurrence of `needle`.
    #[must_use]
    pub fn last_index_of<S: CharSequence + ?Sized>(&self, needle: &S) -> Option<usize> {
        self.last_index_of_from(needle, self.len())
    }

    /// Position of the last occurrence of `needle` starting at or before
    /// `from`.
    #[must_use]
    pub fn last_index_of_from<S: CharSequence + ?Sized>(
        &self,
        needle: &S,
        from: usize,
    ) -> Option<usize> {
        let needle: Vec<char> = needle.char_iter().collect();
        let from = from.min(self.len().checked_sub(needle.len())?);
        if needle.is_empty() {
            return Some(from);
        }
        (0..=from).rev().find(|&at| self.matches_at(at, &needle))
    }

    fn matches_at(&self, at: usize, needle: &[char]) -> bool {
        Chars::new(&self.table, at, at + needle.len()).eq(needle.iter().copied())
    }
}
