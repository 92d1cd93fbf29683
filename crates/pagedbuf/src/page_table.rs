use alloc::{boxed::Box, vec, vec::Vec};

use tracing::trace;

use crate::{PageSize, coords::Coords};

/// The ordered directory of fixed-size pages.
///
/// Pages are only ever pushed at the end or dropped from the end; a page is
/// never resized, and growing the directory moves page handles, not their
/// contents.
#[derive(Clone)]
pub(crate) struct PageTable {
    page_size: PageSize,
    pages: Vec<Box<[char]>>,
}

impl PageTable {
    /// A table holding exactly one empty page.
    pub fn new(page_size: PageSize) -> Self {
        Self::with_pages(page_size, 1)
    }

    /// A table holding `count` zero-filled pages (at least one).
    pub fn with_pages(page_size: PageSize, count: usize) -> Self {
        let mut pages = Vec::with_capacity(count.max(1));
        pages.resize_with(count.max(1), || Self::blank(page_size));
        Self { page_size, pages }
    }

    fn blank(page_size: PageSize) -> Box<[char]> {
        vec!['\0'; page_size.get()].into_boxed_slice()
    }

    #[inline]
    pub fn page_size(&self) -> PageSize {
        self.page_size
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    /// Appends one fresh page and returns its index.
    pub fn allocate_next(&mut self) -> usize {
        self.pages.push(Self::blank(self.page_size));
        let index = self.pages.len() - 1;
        trace!(page = index, page_size = self.page_size.get(), "allocated page");
        index
    }

    /// Drops every page after `last`.
    pub fn discard_after(&mut self, last: usize) {
        let keep = last + 1;
        if keep < self.pages.len() {
            trace!(discarded = self.pages.len() - keep, kept = keep, "discarded pages");
            self.pages.truncate(keep);
            self.pages.shrink_to_fit();
        }
    }

    /// Back to a single blank page, releasing everything else.
    pub fn reset(&mut self) {
        trace!(released = self.pages.len(), "reset page table");
        self.pages = vec![Self::blank(self.page_size)];
    }

    #[inline]
    pub fn page(&self, index: usize) -> &[char] {
        &self.pages[index]
    }

    #[inline]
    pub fn page_mut(&mut self, index: usize) -> &mut [char] {
        &mut self.pages[index]
    }

    #[inline]
    pub fn get(&self, at: Coords) -> char {
        self.pages[at.page][at.offset]
    }

    /// Copies `len` units from `src` to `dst`, both within their own page.
    ///
    /// Source and destination may share a page; `dst` must not come after
    /// `src` when they do.
    pub fn copy_within(&mut self, src: Coords, dst: Coords, len: usize) {
        if src.page == dst.page {
            let page = &mut self.pages[dst.page];
            page.copy_within(src.offset..src.offset + len, dst.offset);
        } else {
            let (head, tail) = self.pages.split_at_mut(src.page);
            head[dst.page][dst.offset..dst.offset + len]
                .copy_from_slice(&tail[0][src.offset..src.offset + len]);
        }
    }

    /// Zero-fills the given page from `offset` to its end.
    pub fn clear_from(&mut self, at: Coords) {
        self.pages[at.page][at.offset..].fill('\0');
    }
}
