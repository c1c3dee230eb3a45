// src/storage/mod.rs
use std::fs;
use std::path::{Path, PathBuf};

use once_cell::sync::Lazy;
use regex::Regex;

use crate::extractors::ProfileRecord;
use crate::utils::error::ExportError;

// Runs of characters outside the filesystem-safe set collapse to one '_'
static UNSAFE_FILENAME_CHARS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[^A-Za-z0-9._-]+").expect("Failed to compile UNSAFE_FILENAME_CHARS")
});

const FILENAME_PREFIX: &str = "profile_";
const FALLBACK_NAME_TOKEN: &str = "unknown";

pub struct Exporter {
    output_dir: PathBuf,
}

impl Exporter {
    /// Creates a new Exporter with the specified output directory
    pub fn new<P: AsRef<Path>>(output_dir: P) -> Result<Self, ExportError> {
        let output_path = output_dir.as_ref().to_path_buf();

        // Create the output directory if it doesn't exist
        if !output_path.exists() {
            fs::create_dir_all(&output_path).map_err(ExportError::Io)?;
        }

        Ok(Self {
            output_dir: output_path,
        })
    }

    /// Serializes the record as pretty-printed JSON (2-space indentation,
    /// UTF-8) and writes it under a name derived from the record's own
    /// name field.
    pub fn export(&self, record: &ProfileRecord) -> Result<PathBuf, ExportError> {
        let file_path = self.output_dir.join(profile_filename(&record.name));

        let json = serde_json::to_string_pretty(record)
            .map_err(|e| ExportError::Serialization(e.to_string()))?;

        fs::write(&file_path, json).map_err(ExportError::Io)?;

        tracing::info!("Saved profile to {}", file_path.display());

        Ok(file_path)
    }
}

/// Derives `profile_<token>.json` from a display name, keeping only
/// filesystem-safe characters. An empty token falls back to "unknown".
pub fn profile_filename(name: &str) -> String {
    let sanitized = UNSAFE_FILENAME_CHARS.replace_all(name.trim(), "_");
    let token = sanitized.trim_matches('_');
    if token.is_empty() {
        format!("{}{}.json", FILENAME_PREFIX, FALLBACK_NAME_TOKEN)
    } else {
        format!("{}{}.json", FILENAME_PREFIX, token)
    }
}
