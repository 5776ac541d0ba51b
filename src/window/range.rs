//! Resolved window of rows

use std::fmt;
use std::ops::RangeInclusive;

/// Inclusive range of rows that must currently be rendered.
///
/// # Invariants
/// - `start_index <= end_index`
/// - `end_index <= data_length - 1` for the data length it was resolved against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Window {
    /// First row to render (inclusive).
    pub start_index: usize,
    /// Last row to render (inclusive).
    pub end_index: usize,
}

impl Window {
    /// Create a new window.
    ///
    /// # Panics
    /// In debug builds, panics if `start_index > end_index`.
    pub fn new(start_index: usize, end_index: usize) -> Self {
        debug_assert!(
            start_index <= end_index,
            "window start {} after end {}",
            start_index,
            end_index
        );
        Self {
            start_index,
            end_index,
        }
    }

    /// Number of rows in the window (never zero).
    pub fn len(&self) -> usize {
        self.end_index - self.start_index + 1
    }

    /// Always false: a window holds at least one row.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Whether `index` is rendered.
    pub fn contains(&self, index: usize) -> bool {
        self.indices().contains(&index)
    }

    /// Row indices in render order.
    pub fn indices(&self) -> RangeInclusive<usize> {
        self.start_index..=self.end_index
    }
}

impl fmt::Display for Window {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}..={}]", self.start_index, self.end_index)
    }
}
