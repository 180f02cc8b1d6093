//! Configuration module.
//!
//! Settings resolve with the precedence chain defaults → config file →
//! environment variables → CLI flags.

pub mod loader;

pub use loader::{
    apply_cli_overrides, apply_env_overrides, default_config_path, load_config,
    load_config_with_precedence, merge_config, ConfigError, ConfigFile, RelaySection,
    ResolvedConfig,
};
