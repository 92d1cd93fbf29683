use alloc::string::String;

use quickcheck::{QuickCheck, TestResult};

use super::arbitrary::SmallPageSize;
use crate::PagedBuffer;

/// Property: decoding the persisted form yields the same text, page size and
/// write position, for any text and page size.
#[test]
fn persisted_roundtrip_quickcheck() {
    #[allow(clippy::needless_pass_by_value)]
    fn prop(page_size: SmallPageSize, text: String, cut: usize) -> TestResult {
        let mut buf = PagedBuffer::new(page_size.0).unwrap();
        buf.push_str(&text);
        let len = buf.len();
        buf.delete(cut % (len + 1), len).unwrap();

        let bytes = buf.to_bytes().unwrap();
        if bytes.len() != buf.encoded_len() {
            return TestResult::error("encoded_len disagrees with to_bytes");
        }
        let decoded = PagedBuffer::from_bytes(&bytes).unwrap();
        TestResult::from_bool(
            decoded == buf
                && decoded.page_size() == buf.page_size()
                && decoded.page_count() == buf.page_count()
                && decoded.cursor == buf.cursor,
        )
    }

    #[cfg(not(any(miri, feature = "test-fast")))]
    let tests = if is_ci::cached() { 10_000 } else { 1_000 };
    #[cfg(any(miri, feature = "test-fast"))]
    let tests = 10;

    QuickCheck::new()
        .tests(tests)
        .quickcheck(prop as fn(SmallPageSize, String, usize) -> TestResult);
}

/// Property: no prefix of a valid encoding decodes successfully.
#[test]
fn truncated_encodings_are_rejected_quickcheck() {
    #[allow(clippy::needless_pass_by_value)]
    fn prop(page_size: SmallPageSize, text: String) -> bool {
        let mut buf = PagedBuffer::new(page_size.0).unwrap();
        buf.push_str(&text);
        let bytes = buf.to_bytes().unwrap();
        (0..bytes.len()).all(|cut| PagedBuffer::from_bytes(&bytes[..cut]).is_err())
    }

    QuickCheck::new()
        .tests(200)
        .quickcheck(prop as fn(SmallPageSize, String) -> bool);
}
