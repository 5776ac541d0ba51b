//! Window resolution - scroll offset and viewport to the inclusive row range to render
//!
//! # Module Structure
//!
//! - `search`: SearchResult - ordered search over start positions, without sign encoding
//! - `range`: Window - inclusive `[start_index, end_index]` result
//! - `resolver`: resolve_window, WindowRequest, overscan_rows

pub mod range;
pub mod resolver;
pub mod search;

pub use range::Window;
pub use resolver::{overscan_rows, resolve_window, WindowRequest, DEFAULT_OVERSCAN_RATIO};
pub use search::{search_start_positions, Rounding, SearchResult};
