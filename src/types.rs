#![forbid(unsafe_code)]

//! Core domain types for Linty
//!
//! This module defines the fundamental identifier types shared by the rule
//! registry, the configuration layer and the integrity verifier.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Canonical aliases for language identifiers
const LANGUAGE_ALIASES: &[(&str, &str)] = &[("js", "javascript"), ("golang", "go")];

/// A normalized language (rule set) identifier
///
/// Identifiers are opaque tags: lowercase, non-empty, and made of alphanumeric
/// characters, hyphens, and underscores. Well-known aliases such as `js` are
/// folded into their canonical form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LanguageId(String);

impl LanguageId {
    /// Creates a new LanguageId, normalizing case and aliases
    ///
    /// Returns None if the input is empty or contains invalid characters
    pub fn new(id: impl Into<String>) -> Option<Self> {
        let id = id.into().trim().to_ascii_lowercase();
        if id.is_empty() {
            return None;
        }
        if !id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            return None;
        }

        let canonical = LANGUAGE_ALIASES
            .iter()
            .find(|(alias, _)| *alias == id)
            .map(|(_, canonical)| (*canonical).to_string())
            .unwrap_or(id);

        Some(LanguageId(canonical))
    }

    /// Returns the language ID as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LanguageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for LanguageId {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        LanguageId::new(value.clone()).ok_or_else(|| format!("Invalid language ID '{}'", value))
    }
}

impl From<LanguageId> for String {
    fn from(language: LanguageId) -> Self {
        language.0
    }
}

/// A glob pattern for file matching
///
/// This is a simple wrapper around a string that will be used with the `globset` crate.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GlobPattern(String);

impl GlobPattern {
    /// Creates a new GlobPattern
    pub fn new(pattern: impl Into<String>) -> Self {
        GlobPattern(pattern.into())
    }

    /// Returns the pattern as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GlobPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for GlobPattern {
    fn from(pattern: &str) -> Self {
        GlobPattern(pattern.to_string())
    }
}

/// Digest used for manifest entries
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HashAlgorithm {
    /// 128-bit MD5, the reference digest of the manifest format
    #[default]
    Md5,
    /// 256-bit BLAKE3
    Blake3,
}

impl HashAlgorithm {
    /// Computes the lowercase hex digest of `bytes`
    pub fn hex_digest(self, bytes: &[u8]) -> String {
        match self {
            HashAlgorithm::Md5 => {
                use md5::{Digest, Md5};
                format!("{:x}", Md5::digest(bytes))
            }
            HashAlgorithm::Blake3 => blake3::hash(bytes).to_hex().to_string(),
        }
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HashAlgorithm::Md5 => write!(f, "md5"),
            HashAlgorithm::Blake3 => write!(f, "blake3"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_id_validation() {
        assert!(LanguageId::new("go").is_some());
        assert!(LanguageId::new("objective_c").is_some());
        assert!(LanguageId::new("").is_none());
        assert!(LanguageId::new("   ").is_none());
        assert!(LanguageId::new("c sharp").is_none());
        assert!(LanguageId::new("lang@1").is_none());
    }

    #[test]
    fn test_language_id_normalization() {
        assert_eq!(LanguageId::new("Go").unwrap().as_str(), "go");
        assert_eq!(LanguageId::new(" PHP ").unwrap().as_str(), "php");
        assert_eq!(LanguageId::new("js").unwrap().as_str(), "javascript");
        assert_eq!(LanguageId::new("JS").unwrap().as_str(), "javascript");
        assert_eq!(LanguageId::new("golang").unwrap().as_str(), "go");
    }

    #[test]
    fn test_language_id_serde() {
        let id: LanguageId = serde_json::from_str("\"JS\"").unwrap();
        assert_eq!(id.as_str(), "javascript");
        assert!(serde_json::from_str::<LanguageId>("\"a b\"").is_err());
    }

    #[test]
    fn test_md5_reference_digests() {
        assert_eq!(
            HashAlgorithm::Md5.hex_digest(b""),
            "d41d8cd98f00b204e9800998ecf8427e"
        );
        assert_eq!(
            HashAlgorithm::Md5.hex_digest(b"abc"),
            "900150983cd24fb0d6963f7d28e17f72"
        );
    }

    #[test]
    fn test_blake3_digest_length() {
        let digest = HashAlgorithm::Blake3.hex_digest(b"abc");
        assert_eq!(digest.len(), 64);
        assert_ne!(digest, HashAlgorithm::Blake3.hex_digest(b"abd"));
    }

    #[test]
    fn test_hash_algorithm_default_and_display() {
        assert_eq!(HashAlgorithm::default(), HashAlgorithm::Md5);
        assert_eq!(HashAlgorithm::Md5.to_string(), "md5");
        assert_eq!(HashAlgorithm::Blake3.to_string(), "blake3");
    }
}
