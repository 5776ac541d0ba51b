//! Typed node addresses

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Address of a cache node: the row indices walked from the root list.
///
/// The root is the empty path. The string form prefixes the root sentinel `0` and joins
/// with `-`, so the root is `"0"`, row 3's nested list is `"0-3"`, and row 1 inside that
/// is `"0-3-1"`.
///
/// # Examples
///
/// ```
/// use rowcache::registry::CachePath;
///
/// let path = CachePath::root().child(3).child(1);
/// assert_eq!(path.to_string(), "0-3-1");
/// assert_eq!(path.depth(), 2);
/// assert_eq!("0-3-1".parse::<CachePath>(), Ok(path));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct CachePath(Vec<usize>);

/// Error parsing the string form of a [`CachePath`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParsePathError {
    /// The path does not start with the root sentinel `0`.
    #[error("Cache path must start with the root sentinel \"0\": {0:?}")]
    MissingRoot(String),
    /// A segment is not a row index.
    #[error("Invalid row index {segment:?} in cache path {path:?}")]
    InvalidSegment {
        /// Full input.
        path: String,
        /// Offending segment.
        segment: String,
    },
}

impl CachePath {
    /// The root list.
    pub fn root() -> Self {
        Self(Vec::new())
    }

    /// Path from explicit row indices.
    pub fn from_rows(rows: impl Into<Vec<usize>>) -> Self {
        Self(rows.into())
    }

    /// Path of row `row`'s nested list.
    pub fn child(&self, row: usize) -> Self {
        let mut rows = Vec::with_capacity(self.0.len() + 1);
        rows.extend_from_slice(&self.0);
        rows.push(row);
        Self(rows)
    }

    /// Parent path and the row this node occupies in it; `None` for the root.
    pub fn parent(&self) -> Option<(Self, usize)> {
        let (&row, rest) = self.0.split_last()?;
        Some((Self(rest.to_vec()), row))
    }

    /// Nesting depth: 0 for the root.
    pub fn depth(&self) -> usize {
        self.0.len()
    }

    /// Whether this is the root path.
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// Row indices from the root.
    pub fn rows(&self) -> &[usize] {
        &self.0
    }
}

impl fmt::Display for CachePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("0")?;
        for row in &self.0 {
            write!(f, "-{}", row)?;
        }
        Ok(())
    }
}

impl FromStr for CachePath {
    type Err = ParsePathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut segments = s.split('-');
        if segments.next() != Some("0") {
            return Err(ParsePathError::MissingRoot(s.to_string()));
        }
        segments
            .map(|segment| {
                segment
                    .parse::<usize>()
                    .map_err(|_| ParsePathError::InvalidSegment {
                        path: s.to_string(),
                        segment: segment.to_string(),
                    })
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Self)
    }
}
