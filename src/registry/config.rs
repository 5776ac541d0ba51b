//! Hierarchy configuration

use crate::cache::{RemeasurePolicy, DEFAULT_ESTIMATED_ROW_HEIGHT};
use crate::config::ResolvedConfig;
use crate::error::ConfigurationError;

/// A setting given either once for every level or once per level.
#[derive(Debug, Clone, PartialEq)]
pub enum PerLevel<T> {
    /// Broadcast to all levels.
    Uniform(T),
    /// One value per level, outermost first.
    Levels(Vec<T>),
}

impl<T> PerLevel<T> {
    /// Value for `level`, if one exists.
    pub fn get(&self, level: usize) -> Option<&T> {
        match self {
            Self::Uniform(value) => Some(value),
            Self::Levels(values) => values.get(level),
        }
    }

    /// Number of explicit values, `None` for a broadcast value.
    pub fn explicit_len(&self) -> Option<usize> {
        match self {
            Self::Uniform(_) => None,
            Self::Levels(values) => Some(values.len()),
        }
    }
}

impl<T> From<T> for PerLevel<T> {
    fn from(value: T) -> Self {
        Self::Uniform(value)
    }
}

/// Shape of a nested-list hierarchy.
///
/// `child_keys[l]` is the key that reaches a level-`l` row's nested list (level `l + 1`);
/// the innermost level's key is never consulted.
#[derive(Debug, Clone, PartialEq)]
pub struct HierarchyConfig {
    /// Number of list levels, including the root.
    pub levels: usize,
    /// Key extracting each row's nested rows, per level.
    pub child_keys: PerLevel<String>,
    /// Initial row estimate, per level.
    pub estimated_row_heights: PerLevel<f64>,
    /// Policy for every cache in the hierarchy.
    pub remeasure_policy: RemeasurePolicy,
}

impl HierarchyConfig {
    /// `levels` deep, reaching children through `child_key` at every level.
    pub fn new(levels: usize, child_key: impl Into<String>) -> Self {
        Self {
            levels,
            child_keys: PerLevel::Uniform(child_key.into()),
            estimated_row_heights: PerLevel::Uniform(DEFAULT_ESTIMATED_ROW_HEIGHT),
            remeasure_policy: RemeasurePolicy::default(),
        }
    }

    /// Take the estimate and policy from a resolved configuration.
    pub fn with_resolved(mut self, config: &ResolvedConfig) -> Self {
        self.estimated_row_heights = PerLevel::Uniform(config.estimated_row_height);
        self.remeasure_policy = config.remeasure_policy;
        self
    }

    /// Replace the child keys.
    pub fn with_child_keys(mut self, keys: impl Into<PerLevel<String>>) -> Self {
        self.child_keys = keys.into();
        self
    }

    /// Replace the per-level estimates.
    pub fn with_estimated_row_heights(mut self, heights: impl Into<PerLevel<f64>>) -> Self {
        self.estimated_row_heights = heights.into();
        self
    }

    /// Replace the policy.
    pub fn with_remeasure_policy(mut self, policy: RemeasurePolicy) -> Self {
        self.remeasure_policy = policy;
        self
    }

    /// Check the configuration against the number of row renderers supplied.
    ///
    /// # Errors
    /// The first violated constraint, checked in order: level count, renderer count, key
    /// count, height count.
    pub fn validate(&self, renderers: usize) -> Result<(), ConfigurationError> {
        let levels = self.levels;
        if levels == 0 {
            return Err(ConfigurationError::NoLevels);
        }
        if renderers != levels {
            return Err(ConfigurationError::RendererCountMismatch { renderers, levels });
        }
        if let Some(keys) = self.child_keys.explicit_len().filter(|&n| n != levels) {
            return Err(ConfigurationError::KeyCountMismatch { keys, levels });
        }
        if let Some(heights) = self
            .estimated_row_heights
            .explicit_len()
            .filter(|&n| n != levels)
        {
            return Err(ConfigurationError::HeightCountMismatch { heights, levels });
        }
        Ok(())
    }

    pub(crate) fn child_key(&self, level: usize) -> Option<&str> {
        self.child_keys.get(level).map(String::as_str)
    }

    pub(crate) fn estimated_row_height(&self, level: usize) -> f64 {
        self.estimated_row_heights
            .get(level)
            .copied()
            .unwrap_or(DEFAULT_ESTIMATED_ROW_HEIGHT)
    }
}
