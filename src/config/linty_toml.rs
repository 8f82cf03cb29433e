//! Parsing and validation for linty.toml configuration files

use crate::error::ConfigError;
use crate::integrity::IntegrityVerifier;
use crate::rules::LanguageDetector;
use crate::types::{GlobPattern, HashAlgorithm, LanguageId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Default configuration file name
pub const DEFAULT_CONFIG_FILE: &str = "linty.toml";

/// Default manifest artifact name
pub const DEFAULT_MANIFEST_FILE: &str = "LINTYCHECK";

/// Engine source files tracked by default, relative to the integrity root
const DEFAULT_TRACKED_FILES: &[&str] = &[
    "src/engine/orchestrator.rs",
    "src/rules/rule.rs",
    "src/rules/registry.rs",
    "src/integrity/manifest.rs",
    "src/integrity/verifier.rs",
];

/// Main configuration struct for linty.toml
///
/// Every section is optional; a missing file is equivalent to an empty one.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// General settings
    #[serde(default)]
    pub linty: LintyMeta,

    /// Per-language path patterns used to detect a target's language
    #[serde(default)]
    pub languages: BTreeMap<LanguageId, LanguageSettings>,

    /// Integrity verification settings
    #[serde(default)]
    pub integrity: IntegrityConfig,

    /// Output configuration
    #[serde(default)]
    pub output: OutputConfig,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Load configuration, falling back to defaults when the file is absent
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::debug!("{} not found, using defaults", path.display());
            return Ok(Self::default());
        }
        Self::load(path)
    }

    /// Parse configuration from a TOML string
    pub fn parse(s: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    fn validate(&self) -> Result<(), ConfigError> {
        self.language_detector()?;
        self.integrity_verifier()?;
        Ok(())
    }

    /// Ordered `(language, patterns)` table for language detection
    ///
    /// Configured languages come first, in identifier order; built-in
    /// defaults follow for languages the configuration does not mention.
    pub fn language_patterns(&self) -> Vec<(LanguageId, Vec<GlobPattern>)> {
        let mut table: Vec<(LanguageId, Vec<GlobPattern>)> = self
            .languages
            .iter()
            .map(|(id, settings)| (id.clone(), settings.patterns.clone()))
            .collect();

        for (id, patterns) in LanguageDetector::default_patterns() {
            if !self.languages.contains_key(&id) {
                table.push((id, patterns));
            }
        }

        table
    }

    /// Builds the language detector described by this configuration
    pub fn language_detector(&self) -> Result<LanguageDetector, ConfigError> {
        LanguageDetector::new(&self.language_patterns())
    }

    /// Builds the integrity verifier described by this configuration
    pub fn integrity_verifier(&self) -> Result<IntegrityVerifier, ConfigError> {
        IntegrityVerifier::new(
            self.integrity.root.clone(),
            self.integrity.files.clone(),
            self.integrity.algorithm,
        )
        .map_err(|e| ConfigError::InvalidValue {
            field: "integrity.files".to_string(),
            message: e.to_string(),
        })
    }
}

/// General settings section
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LintyMeta {
    /// Log progress at info level
    #[serde(default)]
    pub verbose: bool,

    /// Verify engine integrity before every check
    #[serde(default)]
    pub secure: bool,

    /// Directory of custom `<language>.toml` rule sets
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rules_dir: Option<PathBuf>,
}

/// Settings for one language
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LanguageSettings {
    /// Glob patterns matched against the target path
    pub patterns: Vec<GlobPattern>,
}

/// Integrity verification section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IntegrityConfig {
    /// Directory the tracked file names are relative to
    #[serde(default = "default_root")]
    pub root: PathBuf,

    /// Manifest artifact path
    #[serde(default = "default_manifest")]
    pub manifest: PathBuf,

    /// Digest used for manifest entries
    #[serde(default)]
    pub algorithm: HashAlgorithm,

    /// Tracked engine files, in manifest order
    #[serde(default = "default_tracked_files")]
    pub files: Vec<String>,
}

impl Default for IntegrityConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
            manifest: default_manifest(),
            algorithm: HashAlgorithm::default(),
            files: default_tracked_files(),
        }
    }
}

fn default_root() -> PathBuf {
    PathBuf::from(".")
}

fn default_manifest() -> PathBuf {
    PathBuf::from(DEFAULT_MANIFEST_FILE)
}

fn default_tracked_files() -> Vec<String> {
    DEFAULT_TRACKED_FILES.iter().map(|s| s.to_string()).collect()
}

/// Output configuration section
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    /// Output format
    #[serde(default)]
    pub format: OutputFormat,

    /// Color output setting
    #[serde(default)]
    pub color: ColorOption,
}

/// Output format options
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// JSON array of findings
    #[default]
    Json,
    /// Human-readable output
    Human,
}

/// Color output options
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum ColorOption {
    /// Auto-detect based on terminal capabilities
    #[default]
    Auto,
    /// Always use color
    Always,
    /// Never use color
    Never,
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID_CONFIG: &str = r#"
[linty]
verbose = true
secure = true
rules_dir = "linty-rules"

[languages.go]
patterns = ["*.go", "*.go.tmpl"]

[languages.ruby]
patterns = ["*.rb", "Rakefile"]

[integrity]
root = "engine"
manifest = "engine/LINTYCHECK"
algorithm = "blake3"
files = ["core.rs", "rules.rs"]

[output]
format = "human"
color = "never"
"#;

    #[test]
    fn test_valid_config_parsing() {
        let config = Config::parse(VALID_CONFIG).unwrap();

        assert!(config.linty.verbose);
        assert!(config.linty.secure);
        assert_eq!(config.linty.rules_dir, Some(PathBuf::from("linty-rules")));

        assert_eq!(config.languages.len(), 2);
        let go = &config.languages[&LanguageId::new("go").unwrap()];
        assert_eq!(go.patterns.len(), 2);

        assert_eq!(config.integrity.root, PathBuf::from("engine"));
        assert_eq!(config.integrity.manifest, PathBuf::from("engine/LINTYCHECK"));
        assert_eq!(config.integrity.algorithm, HashAlgorithm::Blake3);
        assert_eq!(config.integrity.files, vec!["core.rs", "rules.rs"]);

        assert_eq!(config.output.format, OutputFormat::Human);
        assert_eq!(config.output.color, ColorOption::Never);
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = Config::parse("").unwrap();
        assert_eq!(config, Config::default());
        assert!(!config.linty.secure);
        assert_eq!(config.integrity.manifest, PathBuf::from("LINTYCHECK"));
        assert_eq!(config.integrity.algorithm, HashAlgorithm::Md5);
        assert_eq!(config.integrity.files.len(), DEFAULT_TRACKED_FILES.len());
        assert_eq!(config.output.format, OutputFormat::Json);
    }

    #[test]
    fn test_language_patterns_merge_defaults() {
        let config = Config::parse(VALID_CONFIG).unwrap();
        let patterns = config.language_patterns();
        let ids: Vec<&str> = patterns
            .iter()
            .map(|(id, _)| id.as_str())
            .collect();
        assert_eq!(ids, vec!["go", "ruby", "javascript", "php"]);

        let detector = config.language_detector().unwrap();
        assert_eq!(
            detector.detect(Path::new("Rakefile")).unwrap().as_str(),
            "ruby"
        );
        assert_eq!(
            detector.detect(Path::new("app.js")).unwrap().as_str(),
            "javascript"
        );
    }

    #[test]
    fn test_language_alias_keys_normalize() {
        let config = Config::parse("[languages.JS]\npatterns = [\"*.es6\"]\n").unwrap();
        assert!(
            config
                .languages
                .contains_key(&LanguageId::new("javascript").unwrap())
        );
    }

    #[test]
    fn test_invalid_toml() {
        let result = Config::parse("[linty\nverbose = true");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_unknown_algorithm() {
        let result = Config::parse("[integrity]\nalgorithm = \"sha0\"\n");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_unknown_field_rejected() {
        let result = Config::parse("[linty]\nverbosity = 3\n");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_invalid_glob_pattern() {
        let result = Config::parse("[languages.go]\npatterns = [\"[\"]\n");
        assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
    }

    #[test]
    fn test_empty_tracked_files() {
        let result = Config::parse("[integrity]\nfiles = []\n");
        match result {
            Err(ConfigError::InvalidValue { field, .. }) => assert_eq!(field, "integrity.files"),
            other => panic!("Expected InvalidValue, got {:?}", other),
        }
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let config = Config::load_or_default("/nonexistent/linty.toml").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let result = Config::load("/nonexistent/linty.toml");
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }
}
