use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum NotegenError {
    #[error("Config file \"{}\" either does not exist, or is a directory", .0.display())]
    ConfigMissing(PathBuf),

    #[error("Could not determine file type of \"{}\" (expected .yml, .yaml or .json)", .0.display())]
    FormatUnrecognized(PathBuf),

    #[error("Invalid path to notes folder \"{}\": {reason}", .path.display())]
    InvalidTargetPath { path: PathBuf, reason: String },

    #[error("Note \"{0}\" has no characters left after sanitizing its name")]
    EmptyName(String),

    #[error("Note \"{note}\" needs at least 2 language entries to render, found {found}")]
    IndexMissing { note: String, found: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Template error: {0}")]
    Template(#[from] minijinja::Error),
}

impl NotegenError {
    /// Process exit code the CLI should use for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            NotegenError::InvalidTargetPath { .. } => 2,
            _ => 1,
        }
    }
}

pub type Result<T> = std::result::Result<T, NotegenError>;
