#![forbid(unsafe_code)]

//! Engine integrity verification
//!
//! The IntegrityVerifier hashes a declared list of engine source files and
//! either produces a manifest from them (Generate) or compares them against
//! an existing manifest (Verify). Both flows read and hash every tracked file
//! before producing anything, so a failure never leaves a partial manifest or
//! a partial verdict.

use crate::error::IntegrityError;
use crate::integrity::{Manifest, ManifestEntry};
use crate::types::HashAlgorithm;
use serde::Serialize;
use std::collections::HashSet;
use std::fmt;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// A tracked file whose current state disagrees with the manifest
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Mismatch {
    /// Tracked file name
    pub name: String,
    /// Hash recorded in the manifest, absent when the entry is missing
    pub expected: Option<String>,
    /// Hash of the file on disk, absent when the file is missing
    pub actual: Option<String>,
}

impl fmt::Display for Mismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.expected, &self.actual) {
            (None, _) => write!(f, "{}: no manifest entry", self.name),
            (Some(expected), None) => {
                write!(f, "{}: file missing (expected {})", self.name, expected)
            }
            (Some(expected), Some(actual)) => write!(
                f,
                "{}: checksum mismatch (expected {}, actual {})",
                self.name, expected, actual
            ),
        }
    }
}

/// Hashes tracked engine files and checks them against a manifest
#[derive(Debug, Clone)]
pub struct IntegrityVerifier {
    root: PathBuf,
    tracked: Vec<String>,
    algorithm: HashAlgorithm,
}

impl IntegrityVerifier {
    /// Creates a verifier for `tracked` file names relative to `root`
    ///
    /// # Errors
    ///
    /// Returns `IntegrityError::InvalidTrackedFiles` if the list is empty,
    /// names a file more than once, or contains a name that cannot survive a
    /// manifest round trip (surrounding whitespace, `|`, or a newline).
    pub fn new(
        root: impl Into<PathBuf>,
        tracked: Vec<String>,
        algorithm: HashAlgorithm,
    ) -> Result<Self, IntegrityError> {
        if tracked.is_empty() {
            return Err(IntegrityError::InvalidTrackedFiles(
                "no tracked files declared".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        for name in &tracked {
            if name.trim().is_empty()
                || name.trim() != name
                || name.contains('|')
                || name.contains('\n')
            {
                return Err(IntegrityError::InvalidTrackedFiles(format!(
                    "invalid file name '{}'",
                    name
                )));
            }
            if !seen.insert(name.as_str()) {
                return Err(IntegrityError::InvalidTrackedFiles(format!(
                    "'{}' is listed more than once",
                    name
                )));
            }
        }

        Ok(Self {
            root: root.into(),
            tracked,
            algorithm,
        })
    }

    /// Tracked file names in declared order
    pub fn tracked(&self) -> &[String] {
        &self.tracked
    }

    /// Digest in use
    pub fn algorithm(&self) -> HashAlgorithm {
        self.algorithm
    }

    /// Hashes every tracked file into a new manifest
    ///
    /// # Errors
    ///
    /// Returns `IntegrityError::TrackedFile` if any tracked file cannot be
    /// read; no manifest is produced in that case.
    pub fn generate_manifest(&self) -> Result<Manifest, IntegrityError> {
        let mut entries = Vec::with_capacity(self.tracked.len());

        for name in &self.tracked {
            let path = self.root.join(name);
            let bytes = std::fs::read(&path)
                .map_err(|source| IntegrityError::TrackedFile { path, source })?;
            let hash = self.algorithm.hex_digest(&bytes);
            debug!(file = %name, hash = %hash, "hashed tracked file");
            entries.push(ManifestEntry::new(name.clone(), hash));
        }

        Ok(Manifest::new(entries))
    }

    /// Generates the manifest and writes it to `path`
    ///
    /// # Errors
    ///
    /// Returns the errors of [`IntegrityVerifier::generate_manifest`] and
    /// [`Manifest::save`]. Nothing is written if hashing fails.
    pub fn write_manifest(&self, path: &Path) -> Result<Manifest, IntegrityError> {
        let manifest = self.generate_manifest()?;
        manifest.save(path)?;
        Ok(manifest)
    }

    /// Compares every tracked file against the manifest
    ///
    /// Returns one Mismatch per tracked file that is missing from the
    /// manifest, missing on disk, or hashes differently. An empty result
    /// means the engine is verified. Manifest entries for untracked files are
    /// ignored.
    ///
    /// # Errors
    ///
    /// Returns `IntegrityError::TrackedFile` if a tracked file exists but
    /// cannot be read.
    pub fn verify(&self, manifest: &Manifest) -> Result<Vec<Mismatch>, IntegrityError> {
        let mut mismatches = Vec::new();

        for name in &self.tracked {
            let expected = manifest.get(name).map(|entry| entry.hash.clone());
            let actual = self.hash_if_present(name)?;

            if expected.is_some() && expected == actual {
                continue;
            }

            let mismatch = Mismatch {
                name: name.clone(),
                expected,
                actual,
            };
            warn!("integrity mismatch: {}", mismatch);
            mismatches.push(mismatch);
        }

        for entry in manifest.entries() {
            if !self.tracked.contains(&entry.name) {
                debug!(file = %entry.name, "ignoring manifest entry for untracked file");
            }
        }

        Ok(mismatches)
    }

    /// Loads the manifest at `path` and verifies against it
    ///
    /// # Errors
    ///
    /// Returns the errors of [`Manifest::load`] and
    /// [`IntegrityVerifier::verify`].
    pub fn check(&self, manifest_path: &Path) -> Result<Vec<Mismatch>, IntegrityError> {
        let manifest = Manifest::load(manifest_path)?;
        self.verify(&manifest)
    }

    fn hash_if_present(&self, name: &str) -> Result<Option<String>, IntegrityError> {
        let path = self.root.join(name);
        match std::fs::read(&path) {
            Ok(bytes) => Ok(Some(self.algorithm.hex_digest(&bytes))),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(IntegrityError::TrackedFile { path, source }),
        }
    }
}
