//! Translation between logical positions and `(page, offset)` coordinates.
//!
//! Every position the buffer stores lives at
//! `pages[position / page_size][position % page_size]`. Keeping that rule
//! here means append, delete and the codec all agree on it.

use crate::PageSize;

/// Where a logical position lives in the page table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) struct Coords {
    pub page: usize,
    pub offset: usize,
}

impl Coords {
    #[inline]
    pub fn of(position: usize, page_size: PageSize) -> Self {
        let page_size = page_size.get();
        Coords {
            page: position / page_size,
            offset: position % page_size,
        }
    }

    #[inline]
    pub fn position(self, page_size: PageSize) -> usize {
        self.page * page_size.get() + self.offset
    }

    /// Units left between `offset` and the end of its page.
    #[inline]
    pub fn room(self, page_size: PageSize) -> usize {
        page_size.get() - self.offset
    }

    /// Moves forward by `len` units, which must not cross more than one page
    /// boundary: landing exactly on the end of a page rolls over to the next.
    #[inline]
    pub fn advance(&mut self, len: usize, page_size: PageSize) {
        debug_assert!(len <= self.room(page_size));
        self.offset += len;
        if self.offset == page_size.get() {
            self.offset = 0;
            self.page += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use quickcheck_macros::quickcheck;
    use rstest::rstest;

    use super::*;

    fn size(units: usize) -> PageSize {
        PageSize::new(units).unwrap()
    }

    #[rstest]
    #[case(0, 4, 0, 0)]
    #[case(3, 4, 0, 3)]
    #[case(4, 4, 1, 0)]
    #[case(11, 4, 2, 3)]
    #[case(5, 1, 5, 0)]
    fn maps_positions(
        #[case] position: usize,
        #[case] page_size: usize,
        #[case] page: usize,
        #[case] offset: usize,
    ) {
        assert_eq!(Coords::of(position, size(page_size)), Coords { page, offset });
    }

    #[test]
    fn advance_rolls_over_at_page_end() {
        let ps = size(4);
        let mut at = Coords::of(2, ps);
        at.advance(1, ps);
        assert_eq!(at, Coords { page: 0, offset: 3 });
        at.advance(1, ps);
        assert_eq!(at, Coords { page: 1, offset: 0 });
        at.advance(4, ps);
        assert_eq!(at, Coords { page: 2, offset: 0 });
    }

    #[quickcheck]
    fn position_is_inverse_of_of(position: u32, page_size: u16) -> bool {
        let ps = size(usize::from(page_size).max(1));
        let position = position as usize;
        let at = Coords::of(position, ps);
        at.offset < ps.get() && at.position(ps) == position
    }
}
