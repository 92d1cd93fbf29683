//! Scripted edits replayed against both a [`PagedBuffer`] and a flat
//! `Vec<char>` model.
//!
//! Used by the property tests and by the fuzz target; only compiled for
//! tests or with the `fuzzing` feature.

use alloc::{
    format,
    string::{String, ToString},
    vec::Vec,
};

use crate::{BufferError, PagedBuffer, Result};

/// One edit.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "fuzzing", derive(arbitrary::Arbitrary))]
pub enum Op {
    /// Append one character.
    Push(char),
    /// Append a string.
    PushStr(String),
    /// Delete a range.
    Delete {
        /// First index removed.
        start: u16,
        /// One past the last index removed.
        end: u16,
    },
    /// Delete one character.
    DeleteAt(u16),
    /// Remove everything.
    Clear,
    /// Replace the buffer with its own decoded persisted form.
    Reencode,
}

impl Op {
    /// Applies the edit to the paged buffer.
    ///
    /// # Errors
    ///
    /// Whatever the underlying operation reports.
    pub fn apply(&self, buf: &mut PagedBuffer) -> Result<()> {
        match self {
            Op::Push(c) => {
                buf.push(*c);
            }
            Op::PushStr(text) => {
                buf.push_str(text);
            }
            Op::Delete { start, end } => {
                buf.delete(usize::from(*start), usize::from(*end))?;
            }
            Op::DeleteAt(index) => {
                buf.delete_at(usize::from(*index))?;
            }
            Op::Clear => {
                buf.clear();
            }
            Op::Reencode => {
                *buf = PagedBuffer::from_bytes(&buf.to_bytes()?)?;
            }
        }
        Ok(())
    }

    /// Applies the edit to the flat reference model, reporting the same
    /// errors the buffer is expected to.
    ///
    /// # Errors
    ///
    /// The error [`Op::apply`] must produce for the same model state.
    pub fn apply_model(&self, model: &mut Vec<char>) -> Result<()> {
        match self {
            Op::Push(c) => model.push(*c),
            Op::PushStr(text) => model.extend(text.chars()),
            Op::Delete { start, end } => {
                delete_model(model, usize::from(*start), usize::from(*end))?;
            }
            Op::DeleteAt(index) => {
                let index = usize::from(*index);
                delete_model(model, index, index + 1)?;
            }
            Op::Clear => model.clear(),
            Op::Reencode => {}
        }
        Ok(())
    }
}

fn delete_model(model: &mut Vec<char>, start: usize, end: usize) -> Result<()> {
    if start > end {
        return Err(BufferError::InvalidRange { start, end });
    }
    if start == end {
        return Ok(());
    }
    if start > model.len() {
        return Err(BufferError::IndexOutOfRange {
            index: start,
            len: model.len(),
        });
    }
    model.drain(start..end.min(model.len()));
    Ok(())
}

/// Replays `ops` on a fresh buffer with the given page size and on the
/// model, comparing outcome, content and page layout after every step.
///
/// # Errors
///
/// A description of the first divergence.
pub fn check(page_size: usize, ops: &[Op]) -> core::result::Result<(), String> {
    let mut buf = PagedBuffer::new(page_size).map_err(|e| e.to_string())?;
    let mut model = Vec::new();
    for (step, op) in ops.iter().enumerate() {
        let got = op.apply(&mut buf);
        let want = op.apply_model(&mut model);
        if got != want {
            return Err(format!("step {step} {op:?}: got {got:?}, want {want:?}"));
        }
        let text: String = model.iter().collect();
        if buf.as_str() != text || buf.len() != model.len() {
            return Err(format!(
                "step {step} {op:?}: text {:?} (len {}), want {text:?} (len {})",
                buf.as_str(),
                buf.len(),
                model.len()
            ));
        }
        if !buf.chars().eq(model.iter().copied()) || !buf.chars().rev().eq(model.iter().rev().copied()) {
            return Err(format!("step {step} {op:?}: chars() diverged from text"));
        }
        if let Some((index, c)) = model.iter().enumerate().find(|&(i, c)| buf.get(i) != Some(*c)) {
            return Err(format!("step {step} {op:?}: get({index}) = {:?}, want {c:?}", buf.get(index)));
        }
        if buf.page_count() != buf.len() / buf.page_size() + 1 {
            return Err(format!(
                "step {step} {op:?}: {} pages for {} chars of page size {}",
                buf.page_count(),
                buf.len(),
                buf.page_size()
            ));
        }
    }
    Ok(())
}
