//! # Identity Allocation
//!
//! Every note needs a numeric item ID and a GUID in the rendered output. Notes
//! missing either get one generated on a real run; a dry run only reports
//! what would be generated.
//!
//! Generation goes through the [`IdentitySource`] trait so callers can swap
//! the random default for a deterministic sequence.
//!
//! ## ID ranges
//!
//! - Generated IDs are drawn from `[10000, 65535)`.
//! - IDs above [`ID_MAX`] do not fit Unturned's ID space and get a warning.
//! - IDs below [`ID_MIN_RECOMMENDED`] risk clashing with vanilla items and
//!   get a warning.
//!
//! Neither warning changes the ID. IDs and GUIDs are not checked for
//! duplicates across notes.

use crate::commands::CmdMessage;
use crate::model::{Note, RunMode};
use rand::rngs::ThreadRng;
use rand::Rng;
use std::ops::Range;
use tracing::debug;
use uuid::{Builder, Uuid};

pub const ID_MAX: i64 = 65535;
pub const ID_MIN_RECOMMENDED: i64 = 2000;
pub const GENERATED_ID_RANGE: Range<i64> = 10_000..65_535;

/// Supplies fresh IDs and GUIDs for notes that lack them.
pub trait IdentitySource {
    fn next_id(&mut self) -> i64;

    /// A GUID as 32 lowercase hex characters, no dashes.
    fn next_guid(&mut self) -> String;
}

/// Uniformly random IDs in [`GENERATED_ID_RANGE`] and random v4 GUIDs.
pub struct RandomIdentitySource<R: Rng = ThreadRng> {
    rng: R,
}

impl RandomIdentitySource<ThreadRng> {
    pub fn new() -> Self {
        Self { rng: rand::rng() }
    }
}

impl Default for RandomIdentitySource<ThreadRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> RandomIdentitySource<R> {
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> IdentitySource for RandomIdentitySource<R> {
    fn next_id(&mut self) -> i64 {
        self.rng.random_range(GENERATED_ID_RANGE)
    }

    fn next_guid(&mut self) -> String {
        let bytes: [u8; 16] = self.rng.random();
        format_guid(Builder::from_random_bytes(bytes).into_uuid())
    }
}

/// Consecutive IDs starting at a fixed value, and counter-based GUIDs.
#[derive(Debug, Clone)]
pub struct SequenceIdentitySource {
    next_id: i64,
    guid_counter: u128,
}

impl SequenceIdentitySource {
    pub fn new(first_id: i64) -> Self {
        Self {
            next_id: first_id,
            guid_counter: 0,
        }
    }
}

impl IdentitySource for SequenceIdentitySource {
    fn next_id(&mut self) -> i64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    fn next_guid(&mut self) -> String {
        self.guid_counter += 1;
        format!("{:032x}", self.guid_counter)
    }
}

pub fn format_guid(uuid: Uuid) -> String {
    uuid.simple().to_string()
}

/// Validate and backfill `note.id` and `note.guid`.
///
/// Returns the messages to report for this note. In [`RunMode::DryRun`] the
/// note is never modified.
pub fn reconcile<S: IdentitySource + ?Sized>(
    note: &mut Note,
    mode: RunMode,
    source: &mut S,
) -> Vec<CmdMessage> {
    let mut messages = Vec::new();

    if note.id.is_none() {
        messages.push(CmdMessage::warning(format!(
            "\"{}\" does not have an ID specified",
            note.name
        )));
        if !mode.is_dry() {
            let id = source.next_id();
            debug!(note = %note.name, id, "generated id");
            note.id = Some(id);
            messages.push(CmdMessage::warning(format!(
                "\"{}\" has been randomly assigned the ID {}. You should change this.",
                note.name, id
            )));
        }
    }

    if let Some(id) = note.id {
        if id > ID_MAX {
            messages.push(CmdMessage::warning(format!(
                "\"{}\" has an ID ({}) greater than that allowed by Unturned ({})",
                note.name, id, ID_MAX
            )));
        } else if id < ID_MIN_RECOMMENDED {
            messages.push(CmdMessage::warning(format!(
                "\"{}\" has an ID ({}) less than the recommended minimum ({})",
                note.name, id, ID_MIN_RECOMMENDED
            )));
        }
    }

    if note.guid.is_none() {
        if mode.is_dry() {
            messages.push(CmdMessage::warning(format!(
                "\"{}\" would have a GUID generated",
                note.name
            )));
        } else {
            let guid = source.next_guid();
            debug!(note = %note.name, %guid, "generated guid");
            messages.push(CmdMessage::info(format!(
                "\"{}\" has been assigned the GUID {}",
                note.name, guid
            )));
            note.guid = Some(guid);
        }
    }

    messages
}
