//! Configuration management module for linkrepo
//!
//! Layered configuration loading:
//! 1. `default.toml` - Base default configuration
//! 2. `{environment}.toml` - Environment-specific configuration
//! 3. `local.toml` - Local development overrides (not committed)
//! 4. `LINKREPO_*` environment variables

pub mod environment;
pub mod error;
pub mod loader;
pub mod settings;

pub use environment::Environment;
pub use loader::ConfigLoader;
pub use settings::{DatabaseConfig, ScraperConfig, ServerConfig, SessionConfig, Settings};
