#![forbid(unsafe_code)]

//! Integrity verification of the engine's own source files

pub mod manifest;
pub mod verifier;

pub use manifest::{Manifest, ManifestEntry};
pub use verifier::{IntegrityVerifier, Mismatch};
