//! rowcache - position caches and window resolution for virtualized lists
//!
//! Rows of a virtualized list have unknown heights until they are rendered. This crate
//! tracks an estimated-or-measured layout per list, maps a scroll offset and viewport to
//! the inclusive range of rows that must be rendered, and reconciles measurements as they
//! arrive, including for lists nested inside the rows of other lists.
//!
//! Rendering, event wiring and measurement are the host's job; the crate consumes scroll
//! offsets and measurements and produces windows and row placements.
//!
//! # Module Structure
//!
//! - `cache`: PositionCache and its row metadata, policies and id generation
//! - `window`: window resolution over a cache
//! - `registry`: one cache per node of a nested-list hierarchy
//! - `list`: controllers the rendering layer drives per frame
//! - `config`: TOML configuration
//! - `logging`: tracing subscriber setup
//! - `error`: error types

pub mod cache;
pub mod config;
pub mod error;
pub mod list;
pub mod logging;
pub mod registry;
pub mod window;
