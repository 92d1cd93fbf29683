use alloc::{boxed::Box, string::String, vec::Vec};

use quickcheck::{Arbitrary, Gen};

use crate::ops::Op;

/// Indices stay small so that most deletes land inside the text.
fn small_index(g: &mut Gen) -> u16 {
    u16::arbitrary(g) % 48
}

fn short_text(g: &mut Gen) -> String {
    let len = usize::arbitrary(g) % 24;
    (0..len)
        .map(|_| match u8::arbitrary(g) % 4 {
            0 => char::arbitrary(g),
            _ => char::from(b'a' + u8::arbitrary(g) % 26),
        })
        .collect()
}

impl Arbitrary for Op {
    fn arbitrary(g: &mut Gen) -> Self {
        match usize::arbitrary(g) % 16 {
            0..=2 => Op::Push(char::from(b'A' + u8::arbitrary(g) % 26)),
            3..=7 => Op::PushStr(short_text(g)),
            8..=11 => {
                let start = small_index(g);
                let end = start.saturating_add(small_index(g) % 20);
                Op::Delete { start, end }
            }
            12 => Op::Delete {
                start: small_index(g),
                end: small_index(g),
            },
            13 => Op::DeleteAt(small_index(g)),
            14 => Op::Reencode,
            _ => Op::Clear,
        }
    }

    fn shrink(&self) -> Box<dyn Iterator<Item = Self>> {
        match self {
            Op::PushStr(text) => Box::new(text.shrink().map(Op::PushStr)),
            Op::Delete { start, end } => {
                let (start, end) = (*start, *end);
                let mut smaller = Vec::new();
                if start > 0 {
                    smaller.push(Op::Delete { start: start - 1, end });
                }
                if end > start {
                    smaller.push(Op::Delete { start, end: end - 1 });
                }
                Box::new(smaller.into_iter())
            }
            _ => quickcheck::empty_shrinker(),
        }
    }
}

/// A page size biased towards the tiny sizes where page boundaries are hit
/// constantly.
#[derive(Debug, Clone, Copy)]
pub(crate) struct SmallPageSize(pub usize);

impl Arbitrary for SmallPageSize {
    fn arbitrary(g: &mut Gen) -> Self {
        SmallPageSize(match usize::arbitrary(g) % 4 {
            0 => 1,
            1 => 2 + usize::arbitrary(g) % 3,
            2 => 5 + usize::arbitrary(g) % 12,
            _ => 1 + usize::arbitrary(g) % 64,
        })
    }

    fn shrink(&self) -> Box<dyn Iterator<Item = Self>> {
        Box::new(self.0.shrink().filter(|&n| n > 0).map(SmallPageSize))
    }
}
