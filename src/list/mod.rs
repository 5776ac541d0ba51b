//! List controllers - the state a rendering layer drives per frame
//!
//! # Module Structure
//!
//! - `state`: ListState - scroll inputs and the last resolved window of one list
//! - `placement`: RowPlacement - where to draw each row in a window
//! - `virtual_list`: VirtualList - one list with its own cache
//! - `nested`: NestedList, ListFrame - a hierarchy of lists over a cache registry

pub mod nested;
pub mod placement;
pub mod state;
pub mod virtual_list;

pub use nested::{ListFrame, NestedList};
pub use placement::RowPlacement;
pub use state::ListState;
pub use virtual_list::VirtualList;
