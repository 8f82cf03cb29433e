//! Configuration file parsing and validation

pub mod linty_toml;

pub use linty_toml::{
    ColorOption, Config, DEFAULT_CONFIG_FILE, DEFAULT_MANIFEST_FILE, IntegrityConfig,
    LanguageSettings, LintyMeta, OutputConfig, OutputFormat,
};
