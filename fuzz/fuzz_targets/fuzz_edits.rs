#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use pagedbuf::ops::{Op, check};

#[derive(Debug, Arbitrary)]
struct Script {
    page_size: u8,
    ops: Vec<Op>,
}

fuzz_target!(|script: Script| {
    // Page size 0 is a construction error, not an interesting script.
    let page_size = usize::from(script.page_size.max(1));
    if let Err(divergence) = check(page_size, &script.ops) {
        panic!("page size {page_size}: {divergence}");
    }
});
