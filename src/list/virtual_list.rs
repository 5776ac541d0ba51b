//! VirtualList - a single virtualized list
//!
//! Owns one [`PositionCache`] and the [`ListState`] resolved against it, and exposes the
//! callback surface the rendering layer drives: measurement reports, remeasurement,
//! length resets and the total-height subscription.

use super::placement::RowPlacement;
use super::state::ListState;
use crate::cache::{CacheId, PositionCache, UpdateOutcome};
use crate::config::ResolvedConfig;
use crate::error::CacheError;
use crate::window::Window;
use tracing::trace;

/// One list: cache plus scroll state.
///
/// Every input setter re-resolves the window only when its value changed; the window
/// also re-resolves after a measurement moves the total height and after a length reset.
///
/// # Examples
///
/// ```
/// use rowcache::cache::{CacheId, PositionCache, RemeasurePolicy};
/// use rowcache::list::VirtualList;
/// use rowcache::window::Window;
///
/// let cache = PositionCache::new(5, 100.0, CacheId::new("list"), RemeasurePolicy::Once)?;
/// let mut list = VirtualList::new(cache, 0.5);
///
/// list.set_viewport_height(Some(200.0));
/// list.report_measurement(2, 180.0, 150.0);
/// assert_eq!(list.set_scroll_offset(150.0), Some(Window::new(0, 4)));
/// assert_eq!(list.container_height(), 480.0);
/// # Ok::<(), rowcache::error::CacheError>(())
/// ```
#[derive(Debug)]
pub struct VirtualList {
    cache: PositionCache,
    state: ListState,
}

impl VirtualList {
    /// Wrap `cache`; the data length starts at the cache length.
    pub fn new(cache: PositionCache, overscan_ratio: f64) -> Self {
        let state = ListState::new(cache.len(), overscan_ratio);
        Self { cache, state }
    }

    /// List of `length` rows using the configured estimate, policy and overscan.
    ///
    /// # Errors
    /// Same as [`PositionCache::new`].
    pub fn from_config(
        length: usize,
        id: CacheId,
        config: &ResolvedConfig,
    ) -> Result<Self, CacheError> {
        let cache = PositionCache::new(
            length,
            config.estimated_row_height,
            id,
            config.remeasure_policy,
        )?;
        Ok(Self::new(cache, config.overscan_ratio))
    }

    /// Scroll to `scroll_offset`; returns the current window.
    pub fn set_scroll_offset(&mut self, scroll_offset: f64) -> Option<Window> {
        if self.state.set_scroll_offset(scroll_offset) {
            self.state.resolve(&self.cache);
        }
        self.state.window()
    }

    /// Record the viewport size; `None` while unknown.
    pub fn set_viewport_height(&mut self, viewport_height: Option<f64>) -> Option<Window> {
        if self.state.set_viewport_height(viewport_height) {
            self.state.resolve(&self.cache);
        }
        self.state.window()
    }

    /// Move this list within an outer scroll container.
    pub fn set_parent_offset(&mut self, parent_offset: f64) -> Option<Window> {
        if self.state.set_parent_offset(parent_offset) {
            self.state.resolve(&self.cache);
        }
        self.state.window()
    }

    /// Rows to render, `None` until a viewport is known.
    pub fn window(&self) -> Option<Window> {
        self.state.window()
    }

    /// Placement of every row in the current window.
    pub fn rows(&self) -> Vec<RowPlacement> {
        self.state.window().map_or_else(Vec::new, |window| {
            RowPlacement::for_window(&self.cache, window, self.state.parent_offset())
        })
    }

    /// Space above the first rendered row: its start position, 0 without a window.
    pub fn leading_spacer(&self) -> f64 {
        self.state
            .window()
            .and_then(|window| self.cache.entry(window.start_index))
            .map_or(0.0, |row| row.start_pos)
    }

    /// Height of the scrollable content.
    pub fn container_height(&self) -> f64 {
        self.cache.total_height()
    }

    /// Report a rendered row's measured offset and height.
    ///
    /// Re-resolves the window when the total height moved. Rows at or past the current data
    /// length are ignored, even while the cache still holds entries for them.
    pub fn report_measurement(
        &mut self,
        index: usize,
        start_pos: f64,
        height: f64,
    ) -> UpdateOutcome {
        let data_length = self.state.data_length();
        if index >= data_length {
            trace!(
                cache = %self.cache.id(),
                index,
                data_length,
                "Ignoring measurement past data length"
            );
            return UpdateOutcome::Ignored;
        }
        let outcome = self.cache.update_cache(index, start_pos, height);
        if outcome.total_height_changed().is_some() {
            self.state.resolve(&self.cache);
        }
        outcome
    }

    /// Ask for every row to be measured again.
    pub fn remeasure_all(&mut self) {
        self.cache.remeasure_all();
    }

    /// The data now has `length` rows.
    ///
    /// Zero rows clears the window and leaves the cache in place; the next non-zero reset
    /// then rebuilds every row, since emptying the data is a shrink. Otherwise the cache is
    /// resized.
    ///
    /// # Errors
    /// [`CacheError::InvalidArgument`] for an invalid estimate.
    pub fn reset_length(
        &mut self,
        length: usize,
        estimated_row_height: Option<f64>,
    ) -> Result<Option<Window>, CacheError> {
        if length == 0 {
            self.state.set_data_length(0);
            self.state.clear_window();
            return Ok(None);
        }
        if self.state.data_length() == 0 {
            let estimate = estimated_row_height.unwrap_or(self.cache.estimated_row_height());
            self.cache.reset(Some(length), Some(estimate))?;
        } else {
            self.cache.resize(length, estimated_row_height)?;
        }
        self.state.set_data_length(length);
        Ok(self.state.resolve(&self.cache))
    }

    /// Replace the total-height subscriber.
    pub fn subscribe_total_height<F>(&mut self, callback: F)
    where
        F: FnMut(f64) + Send + 'static,
    {
        self.cache.set_callback(Some(Box::new(callback)));
    }

    /// Detach the total-height subscriber.
    pub fn unsubscribe(&mut self) {
        self.cache.set_callback(None);
    }

    /// The underlying cache.
    pub fn cache(&self) -> &PositionCache {
        &self.cache
    }

    /// The scroll state.
    pub fn state(&self) -> &ListState {
        &self.state
    }
}
