//! Filesystem-safe names for note folders and files.
//!
//! Names are sanitized with the strictest rules among supported platforms
//! (Windows), so a generated tree can be copied anywhere. Distinct notes that
//! sanitize to the same name are not told apart.

use crate::error::{NotegenError, Result};
use std::path::{Component, Path};

/// Longest file name, in bytes, accepted by common filesystems.
pub const MAX_SEGMENT_BYTES: usize = 255;

const INVALID_CHARS: &[char] = &['/', '\\', ':', '*', '?', '"', '<', '>', '|'];

const RESERVED_NAMES: &[&str] = &[
    "CON", "PRN", "AUX", "NUL", "COM1", "COM2", "COM3", "COM4", "COM5", "COM6", "COM7", "COM8",
    "COM9", "LPT1", "LPT2", "LPT3", "LPT4", "LPT5", "LPT6", "LPT7", "LPT8", "LPT9",
];

/// Turn a note's display name into a single legal path segment.
///
/// Trims the name, swaps spaces for underscores, then drops characters no
/// platform accepts in a file name. The result is stable under reapplication:
/// `plan_name(&plan_name(x)) == plan_name(x)`. May return an empty string if
/// nothing usable is left.
pub fn plan_name(raw_name: &str) -> String {
    let spaced = raw_name.trim().replace(' ', "_");
    sanitize_segment(&spaced)
}

fn sanitize_segment(name: &str) -> String {
    let filtered: String = name
        .chars()
        .filter(|c| !c.is_control() && !INVALID_CHARS.contains(c))
        .collect();

    let segment = tidy_ends(truncate_bytes(&filtered, MAX_SEGMENT_BYTES));

    if is_reserved(segment) {
        // the prefix must still fit in the byte limit
        let room = truncate_bytes(segment, MAX_SEGMENT_BYTES - 1);
        return format!("_{}", tidy_ends(room));
    }
    segment.to_string()
}

/// Strip surrounding whitespace and trailing dots until neither remains.
fn tidy_ends(mut s: &str) -> &str {
    loop {
        let next = s.trim().trim_end_matches('.');
        if next.len() == s.len() {
            return s;
        }
        s = next;
    }
}

fn truncate_bytes(s: &str, max: usize) -> &str {
    if s.len() <= max {
        return s;
    }
    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}

fn is_reserved(segment: &str) -> bool {
    let stem = segment.split('.').next().unwrap_or(segment);
    RESERVED_NAMES
        .iter()
        .any(|reserved| reserved.eq_ignore_ascii_case(stem))
}

/// Check that `path` is usable as the root of the generated tree.
///
/// Runs before anything touches the filesystem.
pub fn validate_target_dir(path: &Path) -> Result<()> {
    let invalid = |reason: String| NotegenError::InvalidTargetPath {
        path: path.to_path_buf(),
        reason,
    };

    if path.as_os_str().is_empty() {
        return Err(invalid("path is empty".to_string()));
    }
    if path.as_os_str().as_encoded_bytes().contains(&0) {
        return Err(invalid("path contains a NUL byte".to_string()));
    }

    for component in path.components() {
        let Component::Normal(part) = component else {
            continue;
        };
        if part.len() > MAX_SEGMENT_BYTES {
            return Err(invalid(format!(
                "component is longer than {} bytes",
                MAX_SEGMENT_BYTES
            )));
        }
        if cfg!(windows) {
            let part = part.to_string_lossy();
            if let Some(c) = part
                .chars()
                .find(|c| c.is_control() || INVALID_CHARS.contains(c))
            {
                return Err(invalid(format!("component \"{}\" contains {:?}", part, c)));
            }
        }
    }

    Ok(())
}
