//! # Notegen Architecture
//!
//! Notegen turns a note map (a YAML or JSON file listing in-game notes, each
//! with an item ID, a GUID and per-language text) into a folder tree of `.dat`
//! files for Unturned. While doing so it repairs the map: notes missing an ID
//! or GUID get one generated, and the map is written back.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, prints messages, draws progress        │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Owns templates and the identity source                   │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - The build pass: reconcile, plan, render, write, save     │
//! │  - Returns structured `CmdResult` messages                  │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Building blocks                                            │
//! │  - model, codec, identity, naming, render, progress         │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! From `api.rs` inward nothing writes to stdout/stderr or calls
//! `std::process::exit`. Diagnostics are returned as data, internal decisions
//! are logged through `tracing`.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade
//! - [`commands`]: The build command and its result types
//! - [`model`]: `NoteCollection`, `Note`, `Language`, `RunMode`
//! - [`codec`]: Loading and saving the note map (YAML or JSON)
//! - [`identity`]: ID/GUID validation and generation
//! - [`naming`]: Filesystem-safe folder names and target path checks
//! - [`render`]: Template rendering
//! - [`progress`]: Progress reporting hooks
//! - [`error`]: Error types

pub mod api;
pub mod codec;
pub mod commands;
pub mod error;
pub mod identity;
pub mod model;
pub mod naming;
pub mod progress;
pub mod render;
