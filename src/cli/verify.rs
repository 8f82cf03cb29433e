//! Integrity commands
//!
//! `linty manifest` regenerates the manifest from the tracked engine files;
//! `linty verify` compares the tracked files against it. Verification is
//! all-or-nothing: any mismatch makes the command fail.

use crate::cli::common::{EXIT_ERROR, EXIT_MISMATCH, EXIT_SUCCESS, load_config};
use crate::config::Config;
use crate::error::{ConfigError, IntegrityError};
use crate::integrity::Mismatch;
use std::path::{Path, PathBuf};

/// Error type specific to the integrity commands
#[derive(Debug, thiserror::Error)]
pub(crate) enum IntegrityCommandError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Integrity error: {0}")]
    Integrity(#[from] IntegrityError),
}

/// Run the manifest command
///
/// # Returns
///
/// Exit code:
/// - 0: Manifest written
/// - 2: Error (configuration, unreadable tracked file, write failure)
pub fn run_manifest(config_path: &Path, output: Option<&Path>) -> i32 {
    match run_manifest_inner(config_path, output) {
        Ok((path, entries)) => {
            eprintln!(
                "{} generated successfully ({} files).",
                path.display(),
                entries
            );
            EXIT_SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            EXIT_ERROR
        }
    }
}

fn run_manifest_inner(
    config_path: &Path,
    output: Option<&Path>,
) -> Result<(PathBuf, usize), IntegrityCommandError> {
    let config = load_config(config_path)?;
    let verifier = config.integrity_verifier()?;
    let path = manifest_path(&config, output);

    let manifest = verifier.write_manifest(&path)?;
    Ok((path, manifest.len()))
}

/// Run the verify command
///
/// # Returns
///
/// Exit code:
/// - 0: Every tracked file matches the manifest
/// - 1: One or more mismatches
/// - 2: Error (configuration, unreadable manifest)
pub fn run_verify(config_path: &Path, manifest: Option<&Path>) -> i32 {
    let result = load_config(config_path)
        .map_err(IntegrityCommandError::from)
        .and_then(|config| verify_engine(&config, manifest));

    match result {
        Ok(mismatches) if mismatches.is_empty() => {
            eprintln!("Integrity verified.");
            EXIT_SUCCESS
        }
        Ok(mismatches) => {
            report_mismatches(&mismatches);
            EXIT_MISMATCH
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            EXIT_ERROR
        }
    }
}

/// Verify the engine files named by the configuration
pub(crate) fn verify_engine(
    config: &Config,
    manifest: Option<&Path>,
) -> Result<Vec<Mismatch>, IntegrityCommandError> {
    let verifier = config.integrity_verifier()?;
    Ok(verifier.check(&manifest_path(config, manifest))?)
}

/// Print one diagnostic per mismatch followed by the verdict
pub(crate) fn report_mismatches(mismatches: &[Mismatch]) {
    for mismatch in mismatches {
        eprintln!("Integrity mismatch: {}", mismatch);
    }
    eprintln!("Integrity check failed. Aborting.");
}

fn manifest_path(config: &Config, over: Option<&Path>) -> PathBuf {
    over.map(Path::to_path_buf)
        .unwrap_or_else(|| config.integrity.manifest.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_config(dir: &Path) -> PathBuf {
        let config = format!(
            "[integrity]\nroot = {:?}\nmanifest = {:?}\nfiles = [\"engine.core\"]\n",
            dir.display().to_string(),
            dir.join("LINTYCHECK").display().to_string()
        );
        let path = dir.join("linty.toml");
        fs::write(&path, config).unwrap();
        path
    }

    #[test]
    fn test_manifest_then_verify() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("engine.core"), "").unwrap();
        let config_path = write_config(temp_dir.path());

        assert_eq!(run_manifest(&config_path, None), EXIT_SUCCESS);
        assert_eq!(
            fs::read_to_string(temp_dir.path().join("LINTYCHECK")).unwrap(),
            "engine.core|d41d8cd98f00b204e9800998ecf8427e"
        );
        assert_eq!(run_verify(&config_path, None), EXIT_SUCCESS);

        fs::write(temp_dir.path().join("engine.core"), "tampered").unwrap();
        assert_eq!(run_verify(&config_path, None), EXIT_MISMATCH);
    }

    #[test]
    fn test_verify_missing_manifest_is_error() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("engine.core"), "").unwrap();
        let config_path = write_config(temp_dir.path());
        assert_eq!(run_verify(&config_path, None), EXIT_ERROR);
    }

    #[test]
    fn test_manifest_missing_tracked_file_is_error() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = write_config(temp_dir.path());
        assert_eq!(run_manifest(&config_path, None), EXIT_ERROR);
        assert!(!temp_dir.path().join("LINTYCHECK").exists());
    }

    #[test]
    fn test_manifest_path_override() {
        let config = Config::default();
        assert_eq!(manifest_path(&config, None), PathBuf::from("LINTYCHECK"));
        assert_eq!(
            manifest_path(&config, Some(Path::new("x/M"))),
            PathBuf::from("x/M")
        );
    }
}
