//! Cache identity and id generation strategies

use std::fmt;

/// Stable identity of a [`PositionCache`](super::PositionCache).
///
/// Used as a lookup key by embedding layers. Registry-managed caches use their path string
/// (`"0"`, `"0-3"`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CacheId(String);

impl CacheId {
    /// Create an id from any string.
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Get the raw string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CacheId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CacheId {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl From<String> for CacheId {
    fn from(raw: String) -> Self {
        Self(raw)
    }
}

/// Source of ids for caches created without an explicit one.
///
/// Injected into [`CacheFactory`](super::CacheFactory) so that no process-wide counter
/// exists; tests supply a deterministic generator.
pub trait IdGenerator {
    /// Produce the next id.
    fn next_id(&mut self) -> CacheId;
}

impl<F> IdGenerator for F
where
    F: FnMut() -> CacheId,
{
    fn next_id(&mut self) -> CacheId {
        self()
    }
}

/// Monotonic counter producing `"<prefix><n>"`.
///
/// # Examples
///
/// ```
/// use rowcache::cache::{IdGenerator, SequentialIds};
///
/// let mut ids = SequentialIds::with_prefix("list-");
/// assert_eq!(ids.next_id().as_str(), "list-0");
/// assert_eq!(ids.next_id().as_str(), "list-1");
/// ```
#[derive(Debug, Clone, Default)]
pub struct SequentialIds {
    prefix: String,
    next: u64,
}

impl SequentialIds {
    /// Counter starting at 0 with no prefix.
    pub fn new() -> Self {
        Self::default()
    }

    /// Counter starting at 0 with the given prefix.
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: 0,
        }
    }

    /// Continue counting from `start`.
    pub fn starting_at(mut self, start: u64) -> Self {
        self.next = start;
        self
    }
}

impl IdGenerator for SequentialIds {
    fn next_id(&mut self) -> CacheId {
        let id = CacheId(format!("{}{}", self.prefix, self.next));
        self.next += 1;
        id
    }
}
