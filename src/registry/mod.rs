//! Cache registry - one PositionCache per node of a nested-list hierarchy
//!
//! # Module Structure
//!
//! - `path`: CachePath - typed address of a node (sequence of row indices)
//! - `config`: HierarchyConfig, PerLevel - level count, child keys, per-level estimates
//! - `data`: NestedRows - read-only view of the nested data shape
//! - `tree`: CacheRegistry - arena of cache nodes with child-to-parent height signals

pub mod config;
pub mod data;
pub mod path;
pub mod tree;

pub use config::{HierarchyConfig, PerLevel};
pub use data::NestedRows;
pub use path::{CachePath, ParsePathError};
pub use tree::{CacheRegistry, NodeId, RemeasureRequest};
