//! Per-row layout metadata

use std::fmt;

/// Layout metadata for a single row.
///
/// Starts out as a uniform estimate and is narrowed toward the truth once the rendering
/// layer reports a measurement for the row.
///
/// # Invariants
/// - In a freshly built or rebuilt cache, `start_pos[i] = start_pos[i-1] + height[i-1]`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RowMetadata {
    /// Offset from the start of the owning list, along the scroll axis.
    pub start_pos: f64,
    /// Estimated or measured height.
    pub height: f64,
    /// Whether `start_pos`/`height` come from a real measurement.
    pub measured: bool,
}

impl RowMetadata {
    /// Unmeasured row at `start_pos` with the estimated `height`.
    pub fn estimated(start_pos: f64, height: f64) -> Self {
        Self {
            start_pos,
            height,
            measured: false,
        }
    }

    /// Row carrying a real measurement.
    pub fn measured(start_pos: f64, height: f64) -> Self {
        Self {
            start_pos,
            height,
            measured: true,
        }
    }

    /// Offset immediately after this row.
    pub fn end_pos(&self) -> f64 {
        self.start_pos + self.height
    }
}

impl fmt::Display for RowMetadata {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "start={} height={} {}",
            self.start_pos,
            self.height,
            if self.measured { "measured" } else { "estimated" }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn end_pos_is_start_plus_height() {
        let row = RowMetadata::estimated(200.0, 100.0);
        assert_eq!(row.end_pos(), 300.0);
    }

    #[test]
    fn constructors_set_measured_flag() {
        assert!(!RowMetadata::estimated(0.0, 1.0).measured);
        assert!(RowMetadata::measured(0.0, 1.0).measured);
    }

    #[test]
    fn display_shows_state() {
        assert_eq!(
            RowMetadata::measured(180.0, 150.0).to_string(),
            "start=180 height=150 measured"
        );
        assert_eq!(
            RowMetadata::estimated(0.0, 96.5).to_string(),
            "start=0 height=96.5 estimated"
        );
    }
}
