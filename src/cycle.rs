//! Rotating through a fixed value list across successive invocations.
//!
//! The cursor is caller-supplied state: index in, next index out. The
//! caller owns it, so nothing in the crate holds state between calls.

use crate::{Error, Result};

/// One step of a rotation: the selected value, the cursor to pass on the
/// next call, and how many values remain before the rotation wraps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CycleStep<'a, T> {
    pub value: &'a T,
    pub next_cursor: usize,
    pub remaining: usize,
}

/// Select the value at `cursor`, wrapping past the end of `values`.
///
/// A cursor at or beyond the end resets to the first value, so callers can
/// feed `next_cursor` back in without bounds-checking it themselves.
pub fn advance<T>(values: &[T], cursor: usize) -> Result<CycleStep<'_, T>> {
    if values.is_empty() {
        return Err(Error::EmptyCycle);
    }
    let index = if cursor >= values.len() { 0 } else { cursor };
    Ok(CycleStep {
        value: &values[index],
        next_cursor: index + 1,
        remaining: values.len() - index - 1,
    })
}
