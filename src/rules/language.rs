#![forbid(unsafe_code)]

//! Language detection from target file paths

use crate::error::ConfigError;
use crate::types::{GlobPattern, LanguageId};
use globset::{Glob, GlobSet, GlobSetBuilder};
use std::path::Path;

/// Default path patterns for the built-in rule sets
const DEFAULT_PATTERNS: &[(&str, &[&str])] = &[
    ("go", &["*.go"]),
    ("javascript", &["*.js", "*.mjs", "*.cjs", "*.jsx"]),
    ("php", &["*.php"]),
];

/// Maps a target path to a language identifier using glob patterns
///
/// Languages are tested in declaration order; the first whose patterns match
/// the path wins.
pub struct LanguageDetector {
    matchers: Vec<(LanguageId, GlobSet)>,
}

impl LanguageDetector {
    /// Creates a detector from ordered `(language, patterns)` pairs
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if a glob pattern is invalid.
    pub fn new(languages: &[(LanguageId, Vec<GlobPattern>)]) -> Result<Self, ConfigError> {
        let mut matchers = Vec::with_capacity(languages.len());

        for (language, patterns) in languages {
            let mut builder = GlobSetBuilder::new();
            for pattern in patterns {
                let glob = Glob::new(pattern.as_str()).map_err(|e| ConfigError::InvalidValue {
                    field: format!("languages.{}.patterns", language),
                    message: format!("invalid glob '{}': {}", pattern, e),
                })?;
                builder.add(glob);
            }
            let set = builder.build().map_err(|e| ConfigError::InvalidValue {
                field: format!("languages.{}.patterns", language),
                message: e.to_string(),
            })?;
            matchers.push((language.clone(), set));
        }

        Ok(Self { matchers })
    }

    /// The default `(language, patterns)` table for the built-in rule sets
    pub fn default_patterns() -> Vec<(LanguageId, Vec<GlobPattern>)> {
        DEFAULT_PATTERNS
            .iter()
            .filter_map(|(language, patterns)| {
                let id = LanguageId::new(*language)?;
                let globs = patterns.iter().map(|p| GlobPattern::from(*p)).collect();
                Some((id, globs))
            })
            .collect()
    }

    /// Detects the language of a path, or None if no patterns match
    ///
    /// A pattern matches when it matches either the whole path or the bare
    /// file name, so `Rakefile` also detects `tasks/Rakefile`.
    pub fn detect(&self, path: &Path) -> Option<&LanguageId> {
        let file_name = path.file_name().map(Path::new);
        self.matchers
            .iter()
            .find(|(_, set)| {
                set.is_match(path) || file_name.is_some_and(|name| set.is_match(name))
            })
            .map(|(language, _)| language)
    }
}

impl Default for LanguageDetector {
    fn default() -> Self {
        let matchers = Self::default_patterns()
            .into_iter()
            .filter_map(|(language, patterns)| {
                let mut builder = GlobSetBuilder::new();
                for pattern in &patterns {
                    builder.add(Glob::new(pattern.as_str()).ok()?);
                }
                Some((language, builder.build().ok()?))
            })
            .collect();
        Self { matchers }
    }
}

impl std::fmt::Debug for LanguageDetector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LanguageDetector")
            .field(
                "languages",
                &self.matchers.iter().map(|(l, _)| l).collect::<Vec<_>>(),
            )
            .finish()
    }
}
