//! # CLI Layer
//!
//! One UI client for the notegen library. This is the only place that:
//! - parses arguments (`setup.rs`)
//! - installs logging and dispatches to the API (`commands.rs`)
//! - prints messages and draws progress (`print.rs`, `progress.rs`)
//!
//! Exit codes are decided in `main.rs` from the returned error.

mod commands;
mod print;
mod progress;
mod setup;

pub use commands::run;
