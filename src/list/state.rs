//! Per-list scroll inputs and resolved window

use crate::cache::PositionCache;
use crate::window::{resolve_window, Window, WindowRequest, DEFAULT_OVERSCAN_RATIO};

/// Inputs of one list's window resolution plus the window last resolved from them.
///
/// Setters report whether the value actually changed so callers can skip re-resolution
/// for repeated scroll events at the same offset.
#[derive(Debug, Clone, PartialEq)]
pub struct ListState {
    scroll_offset: f64,
    viewport_height: Option<f64>,
    parent_offset: f64,
    data_length: usize,
    overscan_ratio: f64,
    window: Option<Window>,
}

impl Default for ListState {
    fn default() -> Self {
        Self::new(0, DEFAULT_OVERSCAN_RATIO)
    }
}

impl ListState {
    /// Unscrolled state with an unknown viewport.
    pub fn new(data_length: usize, overscan_ratio: f64) -> Self {
        Self {
            scroll_offset: 0.0,
            viewport_height: None,
            parent_offset: 0.0,
            data_length,
            overscan_ratio,
            window: None,
        }
    }

    /// Returns true if the offset changed.
    pub fn set_scroll_offset(&mut self, scroll_offset: f64) -> bool {
        replace_if_changed(&mut self.scroll_offset, scroll_offset)
    }

    /// Returns true if the viewport changed.
    pub fn set_viewport_height(&mut self, viewport_height: Option<f64>) -> bool {
        replace_if_changed(&mut self.viewport_height, viewport_height)
    }

    /// Returns true if the offset changed.
    pub fn set_parent_offset(&mut self, parent_offset: f64) -> bool {
        replace_if_changed(&mut self.parent_offset, parent_offset)
    }

    /// Returns true if the length changed.
    pub fn set_data_length(&mut self, data_length: usize) -> bool {
        replace_if_changed(&mut self.data_length, data_length)
    }

    /// Current scroll offset.
    pub fn scroll_offset(&self) -> f64 {
        self.scroll_offset
    }

    /// Current viewport, `None` before the first layout.
    pub fn viewport_height(&self) -> Option<f64> {
        self.viewport_height
    }

    /// Offset of this list within the scroll container.
    pub fn parent_offset(&self) -> f64 {
        self.parent_offset
    }

    /// Current data length.
    pub fn data_length(&self) -> usize {
        self.data_length
    }

    /// Overscan as a fraction of the viewport.
    pub fn overscan_ratio(&self) -> f64 {
        self.overscan_ratio
    }

    /// Last resolved window.
    pub fn window(&self) -> Option<Window> {
        self.window
    }

    /// Forget the window, e.g. when the data became empty.
    pub fn clear_window(&mut self) {
        self.window = None;
    }

    /// The request these inputs describe.
    pub fn request(&self) -> WindowRequest {
        WindowRequest::new(self.scroll_offset, self.viewport_height, self.data_length)
            .with_parent_offset(self.parent_offset)
            .with_overscan_ratio(self.overscan_ratio)
    }

    /// Resolve against `cache`, keeping the previous window when resolution is a no-op.
    pub fn resolve(&mut self, cache: &PositionCache) -> Option<Window> {
        if let Some(window) = resolve_window(cache, &self.request()) {
            self.window = Some(window);
        }
        self.window
    }
}

fn replace_if_changed<T: PartialEq>(slot: &mut T, value: T) -> bool {
    if *slot == value {
        return false;
    }
    *slot = value;
    true
}
