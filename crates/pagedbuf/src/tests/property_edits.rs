use alloc::{string::String, vec::Vec};

use quickcheck::{QuickCheck, TestResult};
use rstest::rstest;

use super::arbitrary::SmallPageSize;
use crate::{
    PagedBuffer,
    ops::{Op, check},
};

fn tests() -> u64 {
    #[cfg(not(any(miri, feature = "test-fast")))]
    let tests = if is_ci::cached() { 10_000 } else { 1_000 };
    #[cfg(any(miri, feature = "test-fast"))]
    let tests = 10;
    tests
}

/// Property: any interleaving of appends and deletes leaves the paged buffer
/// holding exactly what a flat `Vec<char>` holds after the same edits.
#[test]
fn edits_match_flat_model_quickcheck() {
    #[allow(clippy::needless_pass_by_value)]
    fn prop(page_size: SmallPageSize, ops: Vec<Op>) -> TestResult {
        match check(page_size.0, &ops) {
            Ok(()) => TestResult::passed(),
            Err(divergence) => TestResult::error(divergence),
        }
    }

    QuickCheck::new()
        .tests(tests())
        .quickcheck(prop as fn(SmallPageSize, Vec<Op>) -> TestResult);
}

/// Property: deleting any range from any prefix-filled buffer removes exactly
/// that range, whatever the page size. Exercises chunk copies that start and
/// end at every possible offset relative to the write page.
#[test]
fn delete_any_range_quickcheck() {
    #[allow(clippy::needless_pass_by_value)]
    fn prop(page_size: SmallPageSize, len: u8, start: u8, width: u8) -> TestResult {
        let len = usize::from(len % 80);
        let start = usize::from(start) % (len + 1);
        let end = start + usize::from(width % 40);

        let text: String = (0..len).map(|i| char::from(b'a' + (i % 26) as u8)).collect();
        let mut buf = PagedBuffer::new(page_size.0).unwrap();
        buf.push_str(&text);
        buf.delete(start, end).unwrap();

        let mut expected: Vec<char> = text.chars().collect();
        expected.drain(start..end.min(len));
        let expected: String = expected.into_iter().collect();
        TestResult::from_bool(
            buf.as_str() == expected && buf.page_count() == expected.len() / page_size.0 + 1,
        )
    }

    QuickCheck::new()
        .tests(tests())
        .quickcheck(prop as fn(SmallPageSize, u8, u8, u8) -> TestResult);
}

#[rstest]
fn scripted_edits(#[values(1, 2, 3, 7, 8192)] page_size: usize) {
    let ops = [
        Op::PushStr("Hello World".into()),
        Op::Delete { start: 2, end: 7 },
        Op::Push('!'),
        Op::DeleteAt(0),
        Op::PushStr("a longer tail that spans pages".into()),
        Op::Reencode,
        Op::Delete { start: 3, end: 200 },
        Op::Delete { start: 5, end: 1 },
        Op::DeleteAt(3),
        Op::Clear,
        Op::PushStr("ñandú".into()),
        Op::Delete { start: 1, end: 4 },
    ];
    assert_eq!(check(page_size, &ops), Ok(()));
}

#[rstest]
fn boundary_deletes_match_model(#[values(1, 4, 5, 8192)] page_size: usize) {
    let ops = [
        Op::PushStr("Hello".into()),
        Op::DeleteAt(5),
        Op::Delete { start: 9, end: 9 },
        Op::Delete { start: 5, end: 6 },
        Op::DeleteAt(6),
        Op::Delete { start: 7, end: 8 },
        Op::DeleteAt(4),
        Op::Clear,
        Op::DeleteAt(0),
        Op::Delete { start: 3, end: 3 },
    ];
    assert_eq!(check(page_size, &ops), Ok(()));
}

#[test]
fn append_length_is_additive() {
    let mut buf = PagedBuffer::new(3).unwrap();
    for (i, text) in ["", "a", "bcd", "efghijklmnop", "€ü"].into_iter().enumerate() {
        let before = buf.len();
        buf.push_str(text);
        assert_eq!(buf.len(), before + text.chars().count(), "append #{i}");
    }
    let before = buf.len();
    buf.push('z');
    assert_eq!(buf.len(), before + 1);
}

#[test]
fn large_buffer_against_string() {
    let mut buf = PagedBuffer::new(7).unwrap();
    let mut reference = String::new();
    for i in 0..2_000u32 {
        let piece = alloc::format!("{i},");
        buf.push_str(&piece);
        reference.push_str(&piece);
    }
    assert_eq!(buf.as_str(), reference);
    for (i, c) in reference.chars().enumerate().step_by(97) {
        assert_eq!(buf.char_at(i), Ok(c));
    }
    assert_eq!(buf.sub_sequence(0, buf.len()).unwrap().as_str(), reference);
}
