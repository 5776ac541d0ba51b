//! Measurement acceptance policy

use serde::Deserialize;

/// How a [`PositionCache`](super::PositionCache) treats reports for rows that are already
/// measured.
///
/// A cache is built with exactly one policy and applies it to every report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RemeasurePolicy {
    /// Ignore reports for measured rows. A row is re-read only after
    /// [`remeasure_all`](super::PositionCache::remeasure_all) clears its flag.
    #[default]
    Once,
    /// Accept a report on every render. A report identical to the stored layout only
    /// confirms the row as measured.
    Always,
}

impl RemeasurePolicy {
    /// Whether a report for a row in the given state should be applied.
    pub fn accepts(self, already_measured: bool) -> bool {
        match self {
            Self::Once => !already_measured,
            Self::Always => true,
        }
    }
}
