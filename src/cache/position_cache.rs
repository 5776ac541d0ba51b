//! PositionCache - estimated-or-measured row layout for one list
//!
//! Tracks, per row, a start position and height along the scroll axis. Rows begin as a
//! uniform estimate; the rendering layer narrows them toward the truth by reporting
//! measurements through [`PositionCache::update_cache`].
//!
//! # Complexity
//!
//! - `new` / `reset` / shrinking `resize`: O(n)
//! - appending `resize`: O(k) for k appended rows
//! - `update_cache`: O(n - index), the shift over the remaining rows
//! - `remeasure_all`: O(n)
//! - accessors: O(1)

use super::id::CacheId;
use super::policy::RemeasurePolicy;
use super::row::RowMetadata;
use crate::error::CacheError;
use std::fmt;
use tracing::{debug, trace};

/// Row height used when no estimate is supplied.
pub const DEFAULT_ESTIMATED_ROW_HEIGHT: f64 = 100.0;

/// Subscriber invoked with the new total height whenever a measurement changes it.
pub type TotalHeightCallback = Box<dyn FnMut(f64) + Send>;

/// Result of a single [`PositionCache::update_cache`] call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UpdateOutcome {
    /// The report was dropped: stale index, non-finite values, or the row was already
    /// measured under [`RemeasurePolicy::Once`].
    Ignored,
    /// The report was recorded but the total height did not move.
    Unchanged,
    /// The total height moved to the contained value; the subscriber was notified.
    TotalHeightChanged(f64),
}

impl UpdateOutcome {
    /// New total height, if this update changed it.
    pub fn total_height_changed(&self) -> Option<f64> {
        match self {
            Self::TotalHeightChanged(total) => Some(*total),
            _ => None,
        }
    }
}

/// Per-list store of row metadata.
///
/// # Invariants
/// - `entries.len() >= 1`
/// - `total_height == entries[last].start_pos + entries[last].height` after every mutation
/// - after `new`, `reset` or a rebuilding `resize`, entries are contiguous:
///   `start_pos[i] == start_pos[i-1] + height[i-1]`
///
/// Measured rows downstream of an update are never shifted: they hold ground truth, so a
/// measured row may sit out of step with an upstream row measured after it.
///
/// # Ownership
/// Exclusively owned by one list instance and mutated through `&mut self`, so calls are
/// serialized by construction. Dropping the cache drops its subscriber.
pub struct PositionCache {
    entries: Vec<RowMetadata>,
    estimated_row_height: f64,
    total_height: f64,
    id: CacheId,
    policy: RemeasurePolicy,
    on_total_height_changed: Option<TotalHeightCallback>,
}

impl PositionCache {
    /// Create a cache of `length` unmeasured rows spaced `estimated_row_height` apart.
    ///
    /// # Errors
    ///
    /// [`CacheError::InvalidArgument`] if `length == 0` or the estimate is not a finite
    /// positive number.
    ///
    /// # Examples
    ///
    /// ```
    /// use rowcache::cache::{CacheId, PositionCache, RemeasurePolicy};
    ///
    /// let cache = PositionCache::new(5, 100.0, CacheId::new("list"), RemeasurePolicy::Once)?;
    /// assert_eq!(cache.total_height(), 500.0);
    /// assert_eq!(cache.entry(3).map(|row| row.start_pos), Some(300.0));
    /// # Ok::<(), rowcache::error::CacheError>(())
    /// ```
    pub fn new(
        length: usize,
        estimated_row_height: f64,
        id: CacheId,
        policy: RemeasurePolicy,
    ) -> Result<Self, CacheError> {
        validate_length(length)?;
        validate_estimate(estimated_row_height)?;

        let entries = build_entries(length, estimated_row_height);
        let mut cache = Self {
            entries,
            estimated_row_height,
            total_height: 0.0,
            id,
            policy,
            on_total_height_changed: None,
        };
        cache.total_height = cache.compute_total_height();
        Ok(cache)
    }

    /// Record a real measurement for row `index`.
    ///
    /// The row becomes `{start_pos, height, measured: true}` and every later row that is
    /// still unmeasured shifts by the change in `start_pos`. If the total height moves, the
    /// estimate is recomputed as `total / len` and the subscriber is invoked exactly once.
    /// A recomputed estimate that is not positive (every row measured at zero height, say)
    /// leaves the previous estimate in place.
    ///
    /// Stale reports (index out of range), non-finite values, and reports for measured rows
    /// under [`RemeasurePolicy::Once`] are ignored without mutation.
    pub fn update_cache(&mut self, index: usize, start_pos: f64, height: f64) -> UpdateOutcome {
        let Some(current) = self.entries.get(index).copied() else {
            trace!(cache = %self.id, index, len = self.entries.len(), "Ignoring stale measurement");
            return UpdateOutcome::Ignored;
        };

        if !start_pos.is_finite() || !height.is_finite() {
            trace!(cache = %self.id, index, start_pos, height, "Ignoring non-finite measurement");
            return UpdateOutcome::Ignored;
        }

        if !self.policy.accepts(current.measured) {
            trace!(cache = %self.id, index, "Row already measured");
            return UpdateOutcome::Ignored;
        }

        if current.start_pos == start_pos && current.height == height {
            self.entries[index].measured = true;
            return UpdateOutcome::Unchanged;
        }

        let diff = start_pos - current.start_pos;
        self.entries[index] = RowMetadata::measured(start_pos, height);
        if diff != 0.0 {
            for row in self.entries[index + 1..].iter_mut().filter(|row| !row.measured) {
                row.start_pos += diff;
            }
        }

        let total_height = self.compute_total_height();
        if total_height == self.total_height {
            return UpdateOutcome::Unchanged;
        }

        self.total_height = total_height;
        let learned = total_height / self.entries.len() as f64;
        if learned.is_finite() && learned > 0.0 {
            self.estimated_row_height = learned;
        }
        debug!(
            cache = %self.id,
            index,
            total_height,
            estimated_row_height = self.estimated_row_height,
            "Total height changed"
        );

        if let Some(callback) = self.on_total_height_changed.as_mut() {
            callback(total_height);
        }
        UpdateOutcome::TotalHeightChanged(total_height)
    }

    /// Replace the total-height subscriber. `None` detaches it.
    pub fn set_callback(&mut self, callback: Option<TotalHeightCallback>) {
        self.on_total_height_changed = callback;
    }

    /// Whether a total-height subscriber is attached.
    pub fn has_subscriber(&self) -> bool {
        self.on_total_height_changed.is_some()
    }

    /// Clear every row's `measured` flag, keeping positions and heights.
    ///
    /// The next render pass re-reports real measurements without the layout jumping back
    /// to estimates.
    pub fn remeasure_all(&mut self) {
        for row in &mut self.entries {
            row.measured = false;
        }
    }

    /// Change the row count.
    ///
    /// Growing keeps every existing row and appends unmeasured rows after the current end
    /// of the list, spaced by the (possibly replaced) estimate. Shrinking, or passing the
    /// current length, rebuilds every row from the estimate and discards measurements.
    ///
    /// The subscriber is not notified; callers re-resolve their window after a resize.
    ///
    /// # Errors
    ///
    /// [`CacheError::InvalidArgument`] for `length == 0` or an invalid estimate. The cache
    /// is unchanged on error.
    pub fn resize(
        &mut self,
        length: usize,
        estimated_row_height: Option<f64>,
    ) -> Result<(), CacheError> {
        validate_length(length)?;
        if let Some(estimate) = estimated_row_height {
            validate_estimate(estimate)?;
            self.estimated_row_height = estimate;
        }

        let old_length = self.entries.len();
        if length > old_length {
            let estimate = self.estimated_row_height;
            let tail_start = self.compute_total_height();
            self.entries.extend(
                (0..length - old_length)
                    .map(|i| RowMetadata::estimated(tail_start + i as f64 * estimate, estimate)),
            );
        } else {
            self.entries = build_entries(length, self.estimated_row_height);
        }
        self.total_height = self.compute_total_height();

        debug!(
            cache = %self.id,
            old_length,
            length,
            appended = length > old_length,
            total_height = self.total_height,
            "Cache resized"
        );
        Ok(())
    }

    /// Rebuild every row from scratch.
    ///
    /// `length` defaults to the current length; the estimate defaults to
    /// [`DEFAULT_ESTIMATED_ROW_HEIGHT`], not the current estimate. The id is kept.
    ///
    /// # Errors
    ///
    /// [`CacheError::InvalidArgument`] for `length == Some(0)` or an invalid estimate.
    pub fn reset(
        &mut self,
        length: Option<usize>,
        estimated_row_height: Option<f64>,
    ) -> Result<(), CacheError> {
        let length = length.unwrap_or(self.entries.len());
        let estimate = estimated_row_height.unwrap_or(DEFAULT_ESTIMATED_ROW_HEIGHT);
        validate_length(length)?;
        validate_estimate(estimate)?;

        self.estimated_row_height = estimate;
        self.entries = build_entries(length, estimate);
        self.total_height = self.compute_total_height();
        debug!(cache = %self.id, length, estimate, "Cache reset");
        Ok(())
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false for a constructed cache; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All rows in index order.
    pub fn entries(&self) -> &[RowMetadata] {
        &self.entries
    }

    /// Row at `index`, if in range.
    pub fn entry(&self, index: usize) -> Option<&RowMetadata> {
        self.entries.get(index)
    }

    /// End of the last row.
    pub fn total_height(&self) -> f64 {
        self.total_height
    }

    /// Current uniform estimate, `total_height / len` after the latest total change that
    /// left it positive.
    pub fn estimated_row_height(&self) -> f64 {
        self.estimated_row_height
    }

    /// Stable identity.
    pub fn id(&self) -> &CacheId {
        &self.id
    }

    /// Policy applied to measurement reports.
    pub fn policy(&self) -> RemeasurePolicy {
        self.policy
    }

    /// Number of rows currently flagged as measured.
    pub fn measured_count(&self) -> usize {
        self.entries.iter().filter(|row| row.measured).count()
    }

    fn compute_total_height(&self) -> f64 {
        self.entries.last().map_or(0.0, RowMetadata::end_pos)
    }
}

impl fmt::Debug for PositionCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PositionCache")
            .field("id", &self.id)
            .field("len", &self.entries.len())
            .field("total_height", &self.total_height)
            .field("estimated_row_height", &self.estimated_row_height)
            .field("policy", &self.policy)
            .field("has_subscriber", &self.has_subscriber())
            .finish()
    }
}

fn build_entries(length: usize, estimate: f64) -> Vec<RowMetadata> {
    (0..length)
        .map(|i| RowMetadata::estimated(i as f64 * estimate, estimate))
        .collect()
}

fn validate_length(length: usize) -> Result<(), CacheError> {
    if length == 0 {
        return Err(CacheError::invalid_argument(
            "length must be greater than zero",
        ));
    }
    Ok(())
}

fn validate_estimate(estimate: f64) -> Result<(), CacheError> {
    if !estimate.is_finite() || estimate <= 0.0 {
        return Err(CacheError::invalid_argument(format!(
            "estimated row height must be a finite positive number (got {})",
            estimate
        )));
    }
    Ok(())
}
