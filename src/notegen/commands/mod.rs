//! # Command Layer
//!
//! The business logic of notegen. Commands take Rust arguments and return a
//! structured [`CmdResult`]; they never print and never exit the process.
//!
//! ## Structured Returns
//!
//! [`CmdResult`] carries:
//! - `messages`: per-note diagnostics with a level (info, success, warning, error)
//! - `directories`: note folders created (or, on a dry run, that would be created)
//! - `files`: files written (or, on a dry run, that would be written)
//! - `saved`: whether the note map was written back
//!
//! Messages are also handed to [`Progress::message`](crate::progress::Progress)
//! as they are raised, so a UI can show them even when the run fails later.
//! The UI layer decides how to present them.
//!
//! ## Testing Strategy
//!
//! Command tests run against temporary directories with a deterministic
//! [`SequenceIdentitySource`](crate::identity::SequenceIdentitySource) so
//! generated IDs and GUIDs can be asserted exactly.
//!
//! ## Command Modules
//!
//! - [`build`]: Repair the note map and materialize the note tree

use std::path::PathBuf;

pub mod build;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub messages: Vec<CmdMessage>,
    pub directories: Vec<PathBuf>,
    pub files: Vec<PathBuf>,
    pub saved: bool,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn warnings(&self) -> impl Iterator<Item = &CmdMessage> {
        self.messages
            .iter()
            .filter(|m| m.level == MessageLevel::Warning)
    }
}
