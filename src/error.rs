//! Error types for rowcache.
//!
//! Errors use `thiserror` and compose via `?` and `From` conversions.
//!
//! # Error Hierarchy
//!
//! - [`CacheError`] - Top-level error for every fallible cache operation
//!   - [`ConfigurationError`] - Nested-list hierarchy misconfiguration, raised at construction
//!
//! # Recovery Strategy
//!
//! Configuration and argument errors are fatal to the call that raised them: no partially
//! built cache tree is returned. Stale measurement reports are NOT errors; they are silently
//! ignored (see [`UpdateOutcome::Ignored`](crate::cache::UpdateOutcome::Ignored)) because they
//! arise naturally when an asynchronous measurement completes after a data change.

use crate::registry::CachePath;
use thiserror::Error;

/// Top-level error for cache, registry and list operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CacheError {
    /// An argument was outside the accepted domain.
    ///
    /// Raised for a zero row count at create/resize/reset, and for an estimated row height
    /// that is not a finite positive number.
    ///
    /// # Examples
    ///
    /// ```
    /// use rowcache::error::CacheError;
    ///
    /// let err = CacheError::InvalidArgument {
    ///     reason: "length must be greater than zero".to_string(),
    /// };
    /// assert!(err.to_string().contains("length must be greater than zero"));
    /// ```
    #[error("Invalid argument: {reason}")]
    InvalidArgument {
        /// Which constraint was violated.
        reason: String,
    },

    /// The nested-list hierarchy configuration is inconsistent.
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    /// No cache node exists at the given path.
    ///
    /// The registry mirrors the data shape at construction time; paths for rows that had
    /// no nested list (or were pruned by a length reset) resolve to nothing.
    #[error("No cache registered at path {0}")]
    UnknownPath(CachePath),
}

impl CacheError {
    /// Shorthand for [`CacheError::InvalidArgument`].
    pub fn invalid_argument(reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            reason: reason.into(),
        }
    }
}

/// Misconfiguration of a nested-list hierarchy.
///
/// Every variant names the constraint it violates so that the caller can fix the
/// configuration; construction never proceeds past the first violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    /// The hierarchy was configured with zero levels.
    #[error("A nested list needs at least one level")]
    NoLevels,

    /// The number of row renderers differs from the number of levels.
    #[error("Expected one row renderer per level: got {renderers} renderers for {levels} levels")]
    RendererCountMismatch {
        /// Renderers supplied.
        renderers: usize,
        /// Levels configured.
        levels: usize,
    },

    /// A per-level child key array has the wrong length.
    #[error("Expected one child key per level: got {keys} keys for {levels} levels")]
    KeyCountMismatch {
        /// Keys supplied.
        keys: usize,
        /// Levels configured.
        levels: usize,
    },

    /// A per-level estimated row height array has the wrong length.
    #[error(
        "Expected one estimated row height per level: got {heights} heights for {levels} levels"
    )]
    HeightCountMismatch {
        /// Heights supplied.
        heights: usize,
        /// Levels configured.
        levels: usize,
    },
}
