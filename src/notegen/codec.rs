//! # Configuration Codec
//!
//! Reads and writes the note map. The on-disk format is picked once from the
//! file extension ([`ConfigFormat::from_path`]) and every read or write goes
//! through that variant:
//!
//! - `.yml` / `.yaml`: YAML via `serde_yaml`
//! - `.json`: pretty-printed JSON via `serde_json`
//!
//! Anything else is rejected with [`NotegenError::FormatUnrecognized`] before
//! the file is touched.
//!
//! Saving replaces the whole file. Optional fields that are unset stay absent
//! in the written output (see [`crate::model`]).

use crate::error::{NotegenError, Result};
use crate::model::NoteCollection;
use std::fs;
use std::path::Path;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Yaml,
    Json,
}

impl ConfigFormat {
    pub fn from_path(path: &Path) -> Result<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("yaml") | Some("yml") => Ok(ConfigFormat::Yaml),
            Some("json") => Ok(ConfigFormat::Json),
            _ => Err(NotegenError::FormatUnrecognized(path.to_path_buf())),
        }
    }

    pub fn decode(self, content: &str) -> Result<NoteCollection> {
        match self {
            ConfigFormat::Yaml => Ok(serde_yaml::from_str(content)?),
            ConfigFormat::Json => Ok(serde_json::from_str(content)?),
        }
    }

    pub fn encode(self, collection: &NoteCollection) -> Result<String> {
        match self {
            ConfigFormat::Yaml => Ok(serde_yaml::to_string(collection)?),
            ConfigFormat::Json => Ok(serde_json::to_string_pretty(collection)?),
        }
    }
}

/// Load the note map at `path`.
pub fn load(path: &Path) -> Result<NoteCollection> {
    let format = ConfigFormat::from_path(path)?;
    if !path.is_file() {
        return Err(NotegenError::ConfigMissing(path.to_path_buf()));
    }
    debug!(?format, path = %path.display(), "loading config");
    let content = fs::read_to_string(path)?;
    format.decode(&content)
}

/// Overwrite `path` with `collection`, in the format its extension names.
pub fn save(path: &Path, collection: &NoteCollection) -> Result<()> {
    let format = ConfigFormat::from_path(path)?;
    debug!(?format, path = %path.display(), "saving config");
    let content = format.encode(collection)?;
    fs::write(path, content)?;
    Ok(())
}
