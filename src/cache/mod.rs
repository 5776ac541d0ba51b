//! Position cache - per-list row metadata with incremental measurement updates
//!
//! # Module Structure
//!
//! - `row`: RowMetadata - estimated-or-measured position and height of one row
//! - `policy`: RemeasurePolicy - whether a measured row accepts further reports
//! - `position_cache`: PositionCache - the per-list store and its update protocol
//! - `id`: CacheId, IdGenerator, SequentialIds - injectable cache identity
//! - `factory`: CacheFactory - creates caches with shared defaults and an id strategy

pub mod factory;
pub mod id;
pub mod policy;
pub mod position_cache;
pub mod row;

pub use factory::CacheFactory;
pub use id::{CacheId, IdGenerator, SequentialIds};
pub use policy::RemeasurePolicy;
pub use position_cache::{
    PositionCache, TotalHeightCallback, UpdateOutcome, DEFAULT_ESTIMATED_ROW_HEIGHT,
};
pub use row::RowMetadata;
