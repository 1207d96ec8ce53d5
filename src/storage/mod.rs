//! Storage for configuration.

pub mod config;
pub mod paths;

pub use config::{
    Config, ConfigSource, ConfigSources, ENV_CONFIG, ENV_FORMAT, ENV_NO_COLOR, ENV_NO_COLOR_STD,
    ENV_PRETTY, ResolvedConfig, ScenarioConfig,
};
pub use paths::AppPaths;
