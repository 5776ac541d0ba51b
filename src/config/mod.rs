//! Configuration module.
//!
//! Settings shared by every cache a host creates: the initial row estimate, the
//! measurement policy, the overscan ratio, and where tracing output goes.

pub mod loader;

pub use loader::{
    default_config_path, default_log_path, load_config_file, load_config_with_precedence,
    merge_config, ConfigError, ConfigFile, ResolvedConfig,
};
