//! Visible window computation
//!
//! Pure functions: the same cache and request always give the same window, regardless of
//! which scroll or resize event triggered the call. Callers re-run resolution when the
//! scroll offset, viewport height, data length, or the cache's total height changes, and
//! for nested lists after the ancestor's remeasurement has settled.

use super::range::Window;
use super::search::{search_start_positions, Rounding};
use crate::cache::PositionCache;
use tracing::trace;

/// Fraction of the viewport rendered beyond each edge, in rows of the current estimate.
pub const DEFAULT_OVERSCAN_RATIO: f64 = 0.5;

/// Inputs for one window resolution.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindowRequest {
    /// Scroll offset in the outermost scroll container's coordinate space.
    pub scroll_offset: f64,
    /// Viewport size along the scroll axis; `None` before the first layout.
    pub viewport_height: Option<f64>,
    /// Offset of this list's origin within the scroll container.
    pub parent_offset: f64,
    /// Current number of data rows.
    pub data_length: usize,
    /// Overscan as a fraction of the viewport.
    pub overscan_ratio: f64,
}

impl WindowRequest {
    /// Request for a top-level list with the default overscan.
    pub fn new(scroll_offset: f64, viewport_height: Option<f64>, data_length: usize) -> Self {
        Self {
            scroll_offset,
            viewport_height,
            parent_offset: 0.0,
            data_length,
            overscan_ratio: DEFAULT_OVERSCAN_RATIO,
        }
    }

    /// Translate a nested list into its ancestor's scroll space.
    pub fn with_parent_offset(mut self, parent_offset: f64) -> Self {
        self.parent_offset = parent_offset;
        self
    }

    /// Replace the overscan ratio.
    pub fn with_overscan_ratio(mut self, overscan_ratio: f64) -> Self {
        self.overscan_ratio = overscan_ratio;
        self
    }
}

/// Extra rows rendered past each edge: `ceil(ratio * viewport / estimate)`.
///
/// A non-positive result, or NaN, gives zero rows.
///
/// # Examples
///
/// ```
/// use rowcache::window::overscan_rows;
///
/// assert_eq!(overscan_rows(200.0, 96.0, 0.5), 2);
/// assert_eq!(overscan_rows(200.0, 100.0, 0.5), 1);
/// assert_eq!(overscan_rows(200.0, 100.0, 0.0), 0);
/// ```
pub fn overscan_rows(viewport_height: f64, estimated_row_height: f64, ratio: f64) -> usize {
    let rows = (ratio * viewport_height / estimated_row_height).ceil();
    // `as` saturates: infinity maps to usize::MAX, and max() already turned NaN into 0.
    rows.max(0.0) as usize
}

/// Compute the inclusive window of rows to render.
///
/// Returns `None` when there is nothing to resolve against (unknown or non-finite
/// viewport, no data rows); callers keep their previous window in that case.
///
/// # Algorithm
/// 1. `overscan = ceil(ratio * viewport / estimate)`
/// 2. `start = search(scroll_offset)` rounded down, minus overscan, floored at 0
/// 3. `end = search(scroll_offset + viewport)` rounded up, plus overscan, capped at
///    `data_length - 1`
/// 4. `start` is capped at `end` so a stale cache longer than the data stays valid
///
/// # Examples
///
/// ```
/// use rowcache::cache::{CacheId, PositionCache, RemeasurePolicy};
/// use rowcache::window::{resolve_window, Window, WindowRequest};
///
/// let cache = PositionCache::new(100, 20.0, CacheId::new("list"), RemeasurePolicy::Once)?;
/// let window = resolve_window(&cache, &WindowRequest::new(400.0, Some(100.0), 100));
/// assert_eq!(window, Some(Window::new(17, 28)));
/// # Ok::<(), rowcache::error::CacheError>(())
/// ```
pub fn resolve_window(cache: &PositionCache, request: &WindowRequest) -> Option<Window> {
    let viewport_height = request.viewport_height?;
    if cache.is_empty() || request.data_length == 0 || !viewport_height.is_finite() {
        return None;
    }

    let overscan = overscan_rows(
        viewport_height,
        cache.estimated_row_height(),
        request.overscan_ratio,
    );
    let entries = cache.entries();

    let top = search_start_positions(entries, request.scroll_offset, request.parent_offset)
        .normalize(Rounding::Down);
    let bottom = search_start_positions(
        entries,
        request.scroll_offset + viewport_height,
        request.parent_offset,
    )
    .normalize(Rounding::Up);

    let end_index = bottom.saturating_add(overscan).min(request.data_length - 1);
    let start_index = top.saturating_sub(overscan).min(end_index);

    trace!(
        cache = %cache.id(),
        scroll_offset = request.scroll_offset,
        viewport_height,
        parent_offset = request.parent_offset,
        overscan,
        start_index,
        end_index,
        "Resolved window"
    );
    Some(Window::new(start_index, end_index))
}
