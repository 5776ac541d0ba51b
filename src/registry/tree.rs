//! CacheRegistry - arena of per-node position caches
//!
//! One [`PositionCache`] per list in a nested hierarchy, built depth first from the data
//! shape at construction time. Nodes live in an arena addressed by [`NodeId`]; a
//! `HashMap` resolves [`CachePath`]s to nodes.
//!
//! Every node's total-height subscriber is wired at creation to send on a channel owned by
//! the registry. Pruning a node drops its cache, and with it the sender, so a removed node
//! can never signal. Signals are drained with [`CacheRegistry::drain_remeasure_requests`]
//! or [`CacheRegistry::settle`].

use super::config::HierarchyConfig;
use super::data::NestedRows;
use super::path::CachePath;
use crate::cache::{CacheId, PositionCache, UpdateOutcome};
use crate::error::CacheError;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::mpsc::{self, Receiver, Sender};
use tracing::{debug, trace};

/// Arena index of a cache node.
///
/// Ids are never reused within one registry, so an id held across a prune resolves to
/// nothing instead of to a different node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    /// Raw arena index.
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A nested list's total height changed; its parent should re-measure the row holding it.
#[derive(Debug, Clone, PartialEq)]
pub struct RemeasureRequest {
    /// Path of the list containing the row to re-measure.
    pub parent: CachePath,
    /// Row in `parent` whose nested list changed.
    pub row: usize,
    /// Path of the nested list that signalled.
    pub child: CachePath,
    /// Its new total height.
    pub nested_total_height: f64,
}

#[derive(Debug)]
struct HeightSignal {
    node: NodeId,
    total_height: f64,
}

#[derive(Debug)]
struct CacheNode {
    path: CachePath,
    level: usize,
    cache: PositionCache,
    parent: Option<NodeId>,
    children: BTreeMap<usize, NodeId>,
}

/// Hierarchical map from [`CachePath`] to [`PositionCache`].
///
/// Caches are only reachable by shared reference; every mutation goes through a registry
/// method so the subscriber wiring cannot be replaced from outside.
#[derive(Debug)]
pub struct CacheRegistry {
    nodes: Vec<Option<CacheNode>>,
    index: HashMap<CachePath, NodeId>,
    config: HierarchyConfig,
    signal_tx: Sender<HeightSignal>,
    signal_rx: Receiver<HeightSignal>,
}

impl CacheRegistry {
    /// Build one cache per list in `data`, down to `config.levels` levels.
    ///
    /// Rows whose nested list is missing or empty get no node.
    ///
    /// # Errors
    ///
    /// [`CacheError::Configuration`] when `config` does not match `renderers`;
    /// [`CacheError::InvalidArgument`] when the root list is empty or an estimate is invalid.
    /// Nothing is returned on error.
    ///
    /// # Examples
    ///
    /// ```
    /// use rowcache::registry::{CachePath, CacheRegistry, HierarchyConfig};
    /// use serde_json::json;
    ///
    /// let data = json!([{ "items": [1, 2] }, {}, { "items": [3] }]);
    /// let registry = CacheRegistry::build(&data, &["row", "item"], HierarchyConfig::new(2, "items"))?;
    ///
    /// assert_eq!(registry.len(), 3);
    /// assert!(registry.get(&"0-0".parse()?).is_some());
    /// assert!(registry.get(&CachePath::root().child(1)).is_none());
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn build<D, R>(
        data: &D,
        renderers: &[R],
        config: HierarchyConfig,
    ) -> Result<Self, CacheError>
    where
        D: NestedRows + ?Sized,
    {
        config.validate(renderers.len())?;

        let (signal_tx, signal_rx) = mpsc::channel();
        let mut registry = Self {
            nodes: Vec::new(),
            index: HashMap::new(),
            config,
            signal_tx,
            signal_rx,
        };

        let root = registry.attach(None, CachePath::root(), 0, data.row_count())?;
        registry.build_children(root, data, 0)?;

        debug!(
            nodes = registry.len(),
            levels = registry.config.levels,
            "Cache registry built"
        );
        Ok(registry)
    }

    fn build_children<D>(&mut self, node: NodeId, rows: &D, level: usize) -> Result<(), CacheError>
    where
        D: NestedRows + ?Sized,
    {
        if level + 1 >= self.config.levels {
            return Ok(());
        }
        let Some(key) = self.config.child_key(level).map(str::to_owned) else {
            return Ok(());
        };
        let Some(parent_path) = self.path(node).cloned() else {
            return Ok(());
        };

        for row in 0..rows.row_count() {
            let Some(nested) = rows.nested(row, &key) else {
                continue;
            };
            let length = nested.row_count();
            if length == 0 {
                continue;
            }
            let child = self.attach(Some((node, row)), parent_path.child(row), level + 1, length)?;
            self.build_children(child, nested, level + 1)?;
        }
        Ok(())
    }

    /// Create a node, wire its subscriber to the signal channel and index it.
    fn attach(
        &mut self,
        parent: Option<(NodeId, usize)>,
        path: CachePath,
        level: usize,
        length: usize,
    ) -> Result<NodeId, CacheError> {
        let mut cache = PositionCache::new(
            length,
            self.config.estimated_row_height(level),
            CacheId::new(path.to_string()),
            self.config.remeasure_policy,
        )?;

        let id = NodeId(self.nodes.len());
        let sender = self.signal_tx.clone();
        cache.set_callback(Some(Box::new(move |total_height| {
            // The receiver lives as long as the registry that owns this cache.
            let _ = sender.send(HeightSignal {
                node: id,
                total_height,
            });
        })));

        if let Some((parent_id, row)) = parent {
            if let Some(parent_node) = self.node_mut(parent_id) {
                parent_node.children.insert(row, id);
            }
        }
        self.index.insert(path.clone(), id);
        self.nodes.push(Some(CacheNode {
            path,
            level,
            cache,
            parent: parent.map(|(parent_id, _)| parent_id),
            children: BTreeMap::new(),
        }));
        Ok(id)
    }

    /// The root list's node.
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Number of live nodes.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Always false: the root node exists for the registry's whole life.
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Configuration the registry was built with.
    pub fn config(&self) -> &HierarchyConfig {
        &self.config
    }

    /// Node registered at `path`.
    pub fn node_id(&self, path: &CachePath) -> Option<NodeId> {
        self.index.get(path).copied()
    }

    /// Cache registered at `path`.
    pub fn get(&self, path: &CachePath) -> Option<&PositionCache> {
        self.node_id(path).and_then(|id| self.cache(id))
    }

    /// Cache of node `id`.
    pub fn cache(&self, id: NodeId) -> Option<&PositionCache> {
        self.node(id).map(|node| &node.cache)
    }

    /// Path of node `id`.
    pub fn path(&self, id: NodeId) -> Option<&CachePath> {
        self.node(id).map(|node| &node.path)
    }

    /// Nesting level of node `id`; the root is level 0.
    pub fn level(&self, id: NodeId) -> Option<usize> {
        self.node(id).map(|node| node.level)
    }

    /// Parent of node `id`; `None` for the root or a pruned node.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).and_then(|node| node.parent)
    }

    /// Nested list held by `row` of node `id`.
    pub fn child(&self, id: NodeId, row: usize) -> Option<NodeId> {
        self.node(id)
            .and_then(|node| node.children.get(&row))
            .copied()
    }

    /// `(row, node)` pairs for every nested list under node `id`, in row order.
    pub fn children(&self, id: NodeId) -> impl Iterator<Item = (usize, NodeId)> + '_ {
        self.node(id)
            .into_iter()
            .flat_map(|node| node.children.iter().map(|(&row, &child)| (row, child)))
    }

    /// Every registered path, in no particular order.
    pub fn paths(&self) -> impl Iterator<Item = &CachePath> {
        self.index.keys()
    }

    /// Feed a measurement into the cache at `path`.
    ///
    /// A path with no node is a stale report and is ignored like a stale row index.
    pub fn report_measurement(
        &mut self,
        path: &CachePath,
        index: usize,
        start_pos: f64,
        height: f64,
    ) -> UpdateOutcome {
        match self.node_id(path) {
            Some(id) => self.report_measurement_at(id, index, start_pos, height),
            None => {
                trace!(%path, index, "Ignoring measurement for unregistered path");
                UpdateOutcome::Ignored
            }
        }
    }

    /// Feed a measurement into the cache of node `id`.
    pub fn report_measurement_at(
        &mut self,
        id: NodeId,
        index: usize,
        start_pos: f64,
        height: f64,
    ) -> UpdateOutcome {
        match self.node_mut(id) {
            Some(node) => node.cache.update_cache(index, start_pos, height),
            None => UpdateOutcome::Ignored,
        }
    }

    /// Clear the measured flags of the cache at `path`.
    ///
    /// # Errors
    /// [`CacheError::UnknownPath`] when no node is registered there.
    pub fn remeasure_all(&mut self, path: &CachePath) -> Result<(), CacheError> {
        let node = self.node_mut_by_path(path)?;
        node.cache.remeasure_all();
        Ok(())
    }

    /// Change the row count of the list at `path`.
    ///
    /// Resizes the node's cache (see [`PositionCache::resize`]) and prunes nested nodes
    /// whose row no longer exists.
    ///
    /// # Errors
    /// [`CacheError::UnknownPath`], or [`CacheError::InvalidArgument`] from the resize.
    pub fn reset_length(
        &mut self,
        path: &CachePath,
        length: usize,
        estimated_row_height: Option<f64>,
    ) -> Result<(), CacheError> {
        let node = self.node_mut_by_path(path)?;
        node.cache.resize(length, estimated_row_height)?;

        let stale: Vec<NodeId> = node
            .children
            .range(length..)
            .map(|(_, &child)| child)
            .collect();
        node.children.retain(|&row, _| row < length);

        let pruned: usize = stale.into_iter().map(|child| self.prune(child)).sum();
        if pruned > 0 {
            debug!(%path, length, pruned, "Pruned nested caches");
        }
        Ok(())
    }

    /// Attach a cache for `row` of the list at `parent`, which gained a nested list of
    /// `length` rows after construction. An existing nested cache for that row is replaced.
    ///
    /// # Errors
    /// [`CacheError::UnknownPath`] for an unregistered parent;
    /// [`CacheError::InvalidArgument`] when `row` is out of range, the parent is already at
    /// the innermost level, or `length == 0`.
    pub fn insert_nested(
        &mut self,
        parent: &CachePath,
        row: usize,
        length: usize,
    ) -> Result<NodeId, CacheError> {
        let parent_id = self
            .node_id(parent)
            .ok_or_else(|| CacheError::UnknownPath(parent.clone()))?;
        let (level, parent_len, existing) = match self.node(parent_id) {
            Some(node) => (
                node.level,
                node.cache.len(),
                node.children.get(&row).copied(),
            ),
            None => return Err(CacheError::UnknownPath(parent.clone())),
        };

        if row >= parent_len {
            return Err(CacheError::invalid_argument(format!(
                "row {} is out of range for {} with {} rows",
                row, parent, parent_len
            )));
        }
        if level + 1 >= self.config.levels {
            return Err(CacheError::invalid_argument(format!(
                "{} is at the innermost of {} levels",
                parent, self.config.levels
            )));
        }

        if let Some(existing) = existing {
            self.prune(existing);
        }
        self.attach(Some((parent_id, row)), parent.child(row), level + 1, length)
    }

    /// Collect pending child-to-parent height signals.
    ///
    /// Signals from the root, and from nodes pruned since they signalled, are dropped.
    pub fn drain_remeasure_requests(&mut self) -> Vec<RemeasureRequest> {
        let signals: Vec<HeightSignal> = self.signal_rx.try_iter().collect();
        signals
            .into_iter()
            .filter_map(|signal| {
                let child = self.node(signal.node)?;
                let (parent, row) = child.path.parent()?;
                Some(RemeasureRequest {
                    parent,
                    row,
                    child: child.path.clone(),
                    nested_total_height: signal.total_height,
                })
            })
            .collect()
    }

    /// Drain pending signals and clear the measured flags of every signalled parent, once
    /// per parent.
    ///
    /// Returns the parent paths in the order they were first signalled; their rows must
    /// be re-measured by the rendering layer.
    pub fn settle(&mut self) -> Vec<CachePath> {
        let mut parents: Vec<CachePath> = Vec::new();
        for request in self.drain_remeasure_requests() {
            if !parents.contains(&request.parent) {
                parents.push(request.parent);
            }
        }

        for parent in &parents {
            if let Some(id) = self.node_id(parent) {
                if let Some(node) = self.node_mut(id) {
                    node.cache.remeasure_all();
                }
            }
        }
        if !parents.is_empty() {
            trace!(count = parents.len(), "Parents flagged for remeasurement");
        }
        parents
    }

    /// Remove node `id` and its subtree. Returns the number of nodes removed.
    fn prune(&mut self, id: NodeId) -> usize {
        let Some(node) = self.nodes.get_mut(id.0).and_then(Option::take) else {
            return 0;
        };
        self.index.remove(&node.path);
        if let Some(parent) = node.parent.and_then(|parent| self.node_mut(parent)) {
            parent.children.retain(|_, &mut child| child != id);
        }
        1 + node
            .children
            .into_values()
            .map(|child| self.prune(child))
            .sum::<usize>()
    }

    fn node(&self, id: NodeId) -> Option<&CacheNode> {
        self.nodes.get(id.0).and_then(Option::as_ref)
    }

    fn node_mut(&mut self, id: NodeId) -> Option<&mut CacheNode> {
        self.nodes.get_mut(id.0).and_then(Option::as_mut)
    }

    fn node_mut_by_path(&mut self, path: &CachePath) -> Result<&mut CacheNode, CacheError> {
        let id = self
            .node_id(path)
            .ok_or_else(|| CacheError::UnknownPath(path.clone()))?;
        self.node_mut(id)
            .ok_or_else(|| CacheError::UnknownPath(path.clone()))
    }
}

#[cfg(test)]
#[path = "tree_tests.rs"]
mod tests;
