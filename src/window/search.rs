//! Ordered search over row start positions

use crate::cache::RowMetadata;

/// Outcome of searching for an offset among row start positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchResult {
    /// A row starts exactly at the offset.
    Found(usize),
    /// No row starts at the offset; the first row starting after it has this index
    /// (`len` when every row starts before the offset).
    InsertBefore(usize),
}

/// Direction to round an inexact search result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rounding {
    /// Step back to the row that starts before the offset, so a partially scrolled-past
    /// row is still included.
    Down,
    /// Keep the first row that starts after the offset.
    Up,
}

impl SearchResult {
    /// Map to a row index.
    ///
    /// An exact match is returned as-is in both directions.
    ///
    /// # Examples
    ///
    /// ```
    /// use rowcache::window::{Rounding, SearchResult};
    ///
    /// assert_eq!(SearchResult::Found(3).normalize(Rounding::Down), 3);
    /// assert_eq!(SearchResult::InsertBefore(3).normalize(Rounding::Down), 2);
    /// assert_eq!(SearchResult::InsertBefore(3).normalize(Rounding::Up), 3);
    /// assert_eq!(SearchResult::InsertBefore(0).normalize(Rounding::Down), 0);
    /// ```
    pub fn normalize(self, rounding: Rounding) -> usize {
        match (self, rounding) {
            (Self::Found(index), _) => index,
            (Self::InsertBefore(index), Rounding::Down) => index.saturating_sub(1),
            (Self::InsertBefore(index), Rounding::Up) => index,
        }
    }
}

/// Find the first row whose `start_pos + parent_offset >= target`.
///
/// Rows are expected in non-decreasing start order, which holds for estimated layouts
/// and in-order measurement. O(log n).
pub fn search_start_positions(
    entries: &[RowMetadata],
    target: f64,
    parent_offset: f64,
) -> SearchResult {
    let index = entries.partition_point(|row| row.start_pos + parent_offset < target);
    match entries.get(index) {
        Some(row) if row.start_pos + parent_offset == target => SearchResult::Found(index),
        _ => SearchResult::InsertBefore(index),
    }
}
