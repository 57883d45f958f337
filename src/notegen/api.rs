//! # API Facade
//!
//! A thin facade over the command layer and the single entry point for UI
//! clients. It owns the pieces that live for the whole process (the compiled
//! templates and the identity source) and hands them to commands.
//!
//! The facade holds no business logic and does no terminal I/O.
//!
//! ## Generic Over IdentitySource
//!
//! `NotegenApi<S: IdentitySource>` is generic over where new IDs and GUIDs
//! come from:
//! - Production: `NotegenApi<RandomIdentitySource>`
//! - Testing: `NotegenApi<SequenceIdentitySource>`

use crate::commands;
use crate::error::Result;
use crate::identity::{IdentitySource, RandomIdentitySource};
use crate::progress::Progress;
use crate::render::Templates;
use std::path::Path;

pub struct NotegenApi<S: IdentitySource> {
    templates: Templates,
    identity: S,
}

impl NotegenApi<RandomIdentitySource> {
    /// Random identities, templates from `template_dir` or the built-in ones.
    pub fn with_templates_from(template_dir: Option<&Path>) -> Result<Self> {
        let templates = match template_dir {
            Some(dir) => Templates::from_dir(dir)?,
            None => Templates::builtin()?,
        };
        Ok(Self::new(templates, RandomIdentitySource::new()))
    }
}

impl<S: IdentitySource> NotegenApi<S> {
    pub fn new(templates: Templates, identity: S) -> Self {
        Self {
            templates,
            identity,
        }
    }

    pub fn build<P: Progress + ?Sized>(
        &mut self,
        options: &BuildOptions,
        progress: &mut P,
    ) -> Result<commands::CmdResult> {
        commands::build::run(options, &self.templates, &mut self.identity, progress)
    }
}

pub use crate::commands::build::BuildOptions;
pub use crate::commands::{CmdMessage, CmdResult, MessageLevel};
pub use crate::model::RunMode;
