//! # Render Dispatcher
//!
//! Turns notes into file content using two Jinja-syntax templates rendered by
//! `minijinja`:
//!
//! - `note.dat` receives `note` (the whole [`Note`]) and `length` (line count
//!   of the note's second language entry).
//! - `language.dat` receives `language` (one [`Language`] entry) and `name`
//!   (the owning note's display name).
//!
//! Template syntax is not interpreted here. Template errors are returned
//! unchanged as [`NotegenError::Template`](crate::error::NotegenError).

use crate::error::Result;
use crate::model::{Language, Note};
use minijinja::{context, Environment};
use std::fs;
use std::path::Path;
use tracing::debug;

pub const NOTE_TEMPLATE: &str = "note.dat";
pub const LANGUAGE_TEMPLATE: &str = "language.dat";

const BUILTIN_NOTE: &str = include_str!("../../templates/note.dat");
const BUILTIN_LANGUAGE: &str = include_str!("../../templates/language.dat");

/// The compiled pair of templates used for a build.
pub struct Templates {
    env: Environment<'static>,
}

impl Templates {
    /// Templates shipped with the binary.
    pub fn builtin() -> Result<Self> {
        Self::from_sources(BUILTIN_NOTE, BUILTIN_LANGUAGE)
    }

    /// Load `note.dat` and `language.dat` from `dir`.
    pub fn from_dir(dir: &Path) -> Result<Self> {
        debug!(dir = %dir.display(), "loading templates");
        let note = fs::read_to_string(dir.join(NOTE_TEMPLATE))?;
        let language = fs::read_to_string(dir.join(LANGUAGE_TEMPLATE))?;
        Self::from_sources(note, language)
    }

    pub fn from_sources(note: impl Into<String>, language: impl Into<String>) -> Result<Self> {
        let mut env = Environment::new();
        env.add_template_owned(NOTE_TEMPLATE, note.into())?;
        env.add_template_owned(LANGUAGE_TEMPLATE, language.into())?;
        Ok(Self { env })
    }

    /// Content of `<segment>.dat`.
    pub fn render_note(&self, note: &Note, length: usize) -> Result<String> {
        let template = self.env.get_template(NOTE_TEMPLATE)?;
        Ok(template.render(context! { note => note, length => length })?)
    }

    /// Content of `<language>.dat`.
    pub fn render_language(&self, language: &Language, name: &str) -> Result<String> {
        let template = self.env.get_template(LANGUAGE_TEMPLATE)?;
        Ok(template.render(context! { language => language, name => name })?)
    }
}
