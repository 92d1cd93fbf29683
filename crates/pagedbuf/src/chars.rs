use core::iter::FusedIterator;

use crate::{coords::Coords, page_table::PageTable};

/// Iterator over the characters of a [`PagedBuffer`](crate::PagedBuffer),
/// created by [`PagedBuffer::chars`](crate::PagedBuffer::chars).
#[derive(Clone)]
pub struct Chars<'a> {
    table: &'a PageTable,
    front: Coords,
    remaining: usize,
}

impl<'a> Chars<'a> {
    pub(crate) fn new(table: &'a PageTable, start: usize, end: usize) -> Self {
        Self {
            table,
            front: Coords::of(start, table.page_size()),
            remaining: end - start,
        }
    }

    /// The unread characters of the current page, as one slice.
    fn front_run(&self) -> &'a [char] {
        let table: &'a PageTable = self.table;
        let page = table.page(self.front.page);
        let len = self.remaining.min(page.len() - self.front.offset);
        &page[self.front.offset..self.front.offset + len]
    }
}

impl Iterator for Chars<'_> {
    type Item = char;

    #[inline]
    fn next(&mut self) -> Option<char> {
        if self.remaining == 0 {
            return None;
        }
        let c = self.table.get(self.front);
        self.front.advance(1, self.table.page_size());
        self.remaining -= 1;
        Some(c)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }

    fn fold<B, F>(mut self, init: B, mut f: F) -> B
    where
        F: FnMut(B, char) -> B,
    {
        let mut acc = init;
        while self.remaining > 0 {
            let run = self.front_run();
            for &c in run {
                acc = f(acc, c);
            }
            self.front.advance(run.len(), self.table.page_size());
            self.remaining -= run.len();
        }
        acc
    }
}

impl DoubleEndedIterator for Chars<'_> {
    #[inline]
    fn next_back(&mut self) -> Option<char> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        let page_size = self.table.page_size();
        let back = Coords::of(self.front.position(page_size) + self.remaining, page_size);
        Some(self.table.get(back))
    }
}

impl ExactSizeIterator for Chars<'_> {}

impl FusedIterator for Chars<'_> {}

impl core::fmt::Debug for Chars<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Chars")
            .field("front", &self.front)
            .field("remaining", &self.remaining)
            .finish()
    }
}

/// Calls `f` with each run of consecutive characters in `start..end`, one
/// run per page touched, in order.
pub(crate) fn for_each_run(table: &PageTable, start: usize, end: usize, mut f: impl FnMut(&[char])) {
    let mut chars = Chars::new(table, start, end);
    while chars.remaining > 0 {
        let run = chars.front_run();
        f(run);
        chars.front.advance(run.len(), table.page_size());
        chars.remaining -= run.len();
    }
}
