//! Row placements handed to the rendering layer

use crate::cache::PositionCache;
use crate::window::Window;
use std::fmt;

/// One row of a resolved window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RowPlacement {
    /// Row index in its list.
    pub index: usize,
    /// Position within the list, for absolute placement.
    pub start_pos: f64,
    /// Current height, estimated or measured.
    pub height: f64,
    /// Whether the layout can be trusted; unmeasured rows must report a measurement.
    pub measured: bool,
    /// Parent offset a nested list inside this row resolves with.
    pub nested_offset: f64,
}

impl RowPlacement {
    /// Placements for every row of `window` present in `cache`.
    ///
    /// Indices past the end of a stale cache are skipped.
    pub fn for_window(cache: &PositionCache, window: Window, parent_offset: f64) -> Vec<Self> {
        window
            .indices()
            .filter_map(|index| {
                cache.entry(index).map(|row| Self {
                    index,
                    start_pos: row.start_pos,
                    height: row.height,
                    measured: row.measured,
                    nested_offset: parent_offset + row.start_pos,
                })
            })
            .collect()
    }
}

impl fmt::Display for RowPlacement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{} @{} h={}{}",
            self.index,
            self.start_pos,
            self.height,
            if self.measured { "" } else { " ~" }
        )
    }
}
