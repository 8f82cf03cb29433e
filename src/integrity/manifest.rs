#![forbid(unsafe_code)]

//! Checksum manifest artifact
//!
//! A manifest is an ordered list of `name|hash` records, one per line, bound
//! to the engine's own source files. It is always written whole, never
//! patched.

use crate::error::IntegrityError;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::info;

/// One tracked engine file and its content hash
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestEntry {
    /// Tracked file name, as declared in the tracked list
    pub name: String,
    /// Lowercase hex digest of the file's raw bytes
    pub hash: String,
}

impl ManifestEntry {
    /// Creates a new ManifestEntry
    pub fn new(name: impl Into<String>, hash: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            hash: hash.into(),
        }
    }
}

/// Ordered set of manifest entries
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Manifest {
    entries: Vec<ManifestEntry>,
}

impl Manifest {
    /// Creates a manifest from entries in their declared order
    pub fn new(entries: Vec<ManifestEntry>) -> Self {
        Self { entries }
    }

    /// Parses manifest text
    ///
    /// Blank lines are skipped. Each other line must be exactly `name|hash`
    /// with both parts non-empty.
    ///
    /// # Errors
    ///
    /// Returns `IntegrityError::MalformedRecord` for the first invalid line.
    pub fn parse(content: &str) -> Result<Self, IntegrityError> {
        let mut entries = Vec::new();

        for (index, raw) in content.lines().enumerate() {
            let record = raw.trim();
            if record.is_empty() {
                continue;
            }

            let malformed = || IntegrityError::MalformedRecord {
                line: index + 1,
                record: record.to_string(),
            };

            let (name, hash) = record.split_once('|').ok_or_else(malformed)?;
            if name.is_empty() || hash.is_empty() || hash.contains('|') {
                return Err(malformed());
            }

            entries.push(ManifestEntry::new(name, hash));
        }

        Ok(Self { entries })
    }

    /// Reads and parses a manifest file
    ///
    /// # Errors
    ///
    /// Returns `IntegrityError::ManifestRead` if the file cannot be read,
    /// otherwise the errors of [`Manifest::parse`].
    pub fn load(path: &Path) -> Result<Self, IntegrityError> {
        let content =
            std::fs::read_to_string(path).map_err(|source| IntegrityError::ManifestRead {
                path: path.to_path_buf(),
                source,
            })?;
        Self::parse(&content)
    }

    /// Renders the manifest: records joined by `\n`, no trailing newline
    pub fn render(&self) -> String {
        self.entries
            .iter()
            .map(|entry| format!("{}|{}", entry.name, entry.hash))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Writes the manifest, replacing any previous file atomically
    ///
    /// The content is written to a temporary file in the destination
    /// directory, then renamed over the destination.
    ///
    /// # Errors
    ///
    /// Returns `IntegrityError::ManifestWrite` if any step fails; the previous
    /// manifest, if any, is left untouched.
    pub fn save(&self, path: &Path) -> Result<(), IntegrityError> {
        let write_error = |source: std::io::Error| IntegrityError::ManifestWrite {
            path: path.to_path_buf(),
            source,
        };

        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let mut file = NamedTempFile::new_in(dir).map_err(write_error)?;
        file.write_all(self.render().as_bytes())
            .map_err(write_error)?;
        file.as_file().sync_all().map_err(write_error)?;
        file.persist(path).map_err(|e| write_error(e.error))?;

        info!(
            path = %path.display(),
            entries = self.entries.len(),
            "manifest written"
        );
        Ok(())
    }

    /// Looks up the entry for a tracked file name
    pub fn get(&self, name: &str) -> Option<&ManifestEntry> {
        self.entries.iter().find(|entry| entry.name == name)
    }

    /// Entries in declared order
    pub fn entries(&self) -> &[ManifestEntry] {
        &self.entries
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when the manifest has no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
