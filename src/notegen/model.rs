use crate::error::{NotegenError, Result};
use serde::{Deserialize, Serialize};

/// Whether a build touches the filesystem.
///
/// A dry run makes every decision and emits every message of a real run,
/// but never creates files, never mutates the loaded notes and never saves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunMode {
    #[default]
    Real,
    DryRun,
}

impl RunMode {
    pub fn from_dry_run(dry_run: bool) -> Self {
        if dry_run {
            RunMode::DryRun
        } else {
            RunMode::Real
        }
    }

    pub fn is_dry(self) -> bool {
        self == RunMode::DryRun
    }
}

/// One language's lines of text for a note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Language {
    pub language: String,
    #[serde(default)]
    pub text: Vec<String>,
}

impl Language {
    pub fn new(language: impl Into<String>, text: Vec<String>) -> Self {
        Self {
            language: language.into(),
            text,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guid: Option<String>,
    #[serde(default)]
    pub text: Vec<Language>,
}

impl Note {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            id: None,
            guid: None,
            text: Vec::new(),
        }
    }

    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }

    pub fn with_guid(mut self, guid: impl Into<String>) -> Self {
        self.guid = Some(guid.into());
        self
    }

    pub fn with_language(mut self, language: Language) -> Self {
        self.text.push(language);
        self
    }

    /// Number of lines in the second language entry.
    ///
    /// The note template receives this as `length`, so a note with fewer
    /// than two language entries cannot be rendered.
    pub fn primary_length(&self) -> Result<usize> {
        self.text
            .get(1)
            .map(|lang| lang.text.len())
            .ok_or_else(|| NotegenError::IndexMissing {
                note: self.name.clone(),
                found: self.text.len(),
            })
    }

    pub fn has_language(&self, tag: &str) -> bool {
        self.text.iter().any(|lang| lang.language == tag)
    }
}

/// The whole note map as stored in the configuration file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteCollection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub notes: Vec<Note>,
}
