//! NestedList - a hierarchy of virtualized lists
//!
//! Wraps a [`CacheRegistry`] and keeps one [`ListState`] per cache node. Layout runs top
//! down: the root window is resolved first, then every visible row holding a nested list
//! resolves that list's window in the root's scroll space, so ancestor offsets are settled
//! before any child uses them.

use super::placement::RowPlacement;
use super::state::ListState;
use crate::cache::UpdateOutcome;
use crate::error::CacheError;
use crate::registry::{CachePath, CacheRegistry, HierarchyConfig, NestedRows, NodeId};
use crate::window::Window;
use std::collections::HashMap;
use tracing::trace;

/// One list's share of a layout pass.
#[derive(Debug, Clone, PartialEq)]
pub struct ListFrame {
    /// Which list.
    pub path: CachePath,
    /// Nesting level; selects the renderer.
    pub level: usize,
    /// Origin of this list in the root's scroll space.
    pub parent_offset: f64,
    /// Rows to render.
    pub window: Window,
    /// Where to draw them.
    pub rows: Vec<RowPlacement>,
    /// Height of the list's content.
    pub container_height: f64,
}

/// Controller for a nested-list hierarchy.
///
/// `R` is whatever the host uses to render one level's rows; the controller only checks
/// there is one per level and hands it back through [`NestedList::renderer`].
#[derive(Debug)]
pub struct NestedList<R> {
    registry: CacheRegistry,
    renderers: Vec<R>,
    states: HashMap<NodeId, ListState>,
    overscan_ratio: f64,
}

impl<R> NestedList<R> {
    /// Build the cache hierarchy for `data`.
    ///
    /// # Errors
    /// Same as [`CacheRegistry::build`].
    pub fn new<D>(
        data: &D,
        renderers: Vec<R>,
        config: HierarchyConfig,
        overscan_ratio: f64,
    ) -> Result<Self, CacheError>
    where
        D: NestedRows + ?Sized,
    {
        let registry = CacheRegistry::build(data, renderers.as_slice(), config)?;
        Ok(Self {
            registry,
            renderers,
            states: HashMap::new(),
            overscan_ratio,
        })
    }

    /// Resolve every visible list for the given scroll position.
    ///
    /// Frames come in depth-first order: each list is followed by the nested lists of its
    /// visible rows. A list whose viewport is unknown keeps the window it last resolved, so
    /// nothing is returned before the first known viewport and the previous frames are
    /// returned after it.
    pub fn layout(&mut self, scroll_offset: f64, viewport_height: Option<f64>) -> Vec<ListFrame> {
        let mut frames = Vec::new();
        let mut pending = vec![(self.registry.root(), 0.0)];

        while let Some((node, parent_offset)) = pending.pop() {
            let (Some(cache), Some(path), Some(level)) = (
                self.registry.cache(node),
                self.registry.path(node),
                self.registry.level(node),
            ) else {
                continue;
            };

            let overscan_ratio = self.overscan_ratio;
            let state = self
                .states
                .entry(node)
                .or_insert_with(|| ListState::new(cache.len(), overscan_ratio));
            state.set_data_length(cache.len());
            state.set_scroll_offset(scroll_offset);
            state.set_viewport_height(viewport_height);
            state.set_parent_offset(parent_offset);
            let Some(window) = state.resolve(cache) else {
                continue;
            };

            let rows = RowPlacement::for_window(cache, window, parent_offset);
            for row in rows.iter().rev() {
                if let Some(child) = self.registry.child(node, row.index) {
                    pending.push((child, row.nested_offset));
                }
            }
            frames.push(ListFrame {
                path: path.clone(),
                level,
                parent_offset,
                window,
                rows,
                container_height: cache.total_height(),
            });
        }

        trace!(frames = frames.len(), scroll_offset, "Nested layout");
        frames
    }

    /// Report a rendered row's measurement to the list at `path`.
    ///
    /// Unknown paths are stale and ignored.
    pub fn report_measurement(
        &mut self,
        path: &CachePath,
        index: usize,
        start_pos: f64,
        height: f64,
    ) -> UpdateOutcome {
        self.registry
            .report_measurement(path, index, start_pos, height)
    }

    /// Process nested total-height changes.
    ///
    /// Every parent whose nested list changed height has its rows flagged for
    /// remeasurement once; the returned paths tell the rendering layer which lists to
    /// measure again before the next layout.
    pub fn settle(&mut self) -> Vec<CachePath> {
        self.registry.settle()
    }

    /// The list at `path` now has `length` rows; nested lists of removed rows are dropped.
    ///
    /// # Errors
    /// Same as [`CacheRegistry::reset_length`].
    pub fn reset_length(
        &mut self,
        path: &CachePath,
        length: usize,
        estimated_row_height: Option<f64>,
    ) -> Result<(), CacheError> {
        self.registry
            .reset_length(path, length, estimated_row_height)?;
        self.forget_pruned_states();
        Ok(())
    }

    /// Row `row` of the list at `parent` gained a nested list of `length` rows.
    ///
    /// # Errors
    /// Same as [`CacheRegistry::insert_nested`].
    pub fn insert_nested(
        &mut self,
        parent: &CachePath,
        row: usize,
        length: usize,
    ) -> Result<NodeId, CacheError> {
        let id = self.registry.insert_nested(parent, row, length)?;
        self.forget_pruned_states();
        Ok(id)
    }

    /// Renderer for `level`.
    pub fn renderer(&self, level: usize) -> Option<&R> {
        self.renderers.get(level)
    }

    /// The cache hierarchy.
    pub fn registry(&self) -> &CacheRegistry {
        &self.registry
    }

    /// Scroll state of the list at `path`, once it has been laid out.
    pub fn state(&self, path: &CachePath) -> Option<&ListState> {
        self.registry
            .node_id(path)
            .and_then(|id| self.states.get(&id))
    }

    fn forget_pruned_states(&mut self) {
        let registry = &self.registry;
        self.states.retain(|&id, _| registry.cache(id).is_some());
    }
}
