//! Nested data shape

use serde_json::Value;

/// Read-only view of a list whose rows may hold nested lists.
pub trait NestedRows {
    /// Number of rows in this list.
    fn row_count(&self) -> usize;

    /// The nested list held by row `row` under `key`, if any.
    fn nested(&self, row: usize, key: &str) -> Option<&Self>;
}

/// JSON arrays of objects, the shape list data usually arrives in.
///
/// A non-array value has no rows; a row's nested list is the array stored under `key`.
///
/// # Examples
///
/// ```
/// use rowcache::registry::NestedRows;
/// use serde_json::json;
///
/// let data = json!([{ "items": [1, 2, 3] }, { "title": "no children" }]);
/// assert_eq!(data.row_count(), 2);
/// assert_eq!(data.nested(0, "items").map(|v| v.row_count()), Some(3));
/// assert!(data.nested(1, "items").is_none());
/// ```
impl NestedRows for Value {
    fn row_count(&self) -> usize {
        self.as_array().map_or(0, Vec::len)
    }

    fn nested(&self, row: usize, key: &str) -> Option<&Self> {
        self.as_array()?
            .get(row)?
            .get(key)
            .filter(|nested| nested.is_array())
    }
}
