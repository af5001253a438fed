//! Stderr diagnostics shared by validation and rendering.
//!
//! Dropped blocks and contained render failures are reported here so they
//! stay visible without aborting the pass that hit them.

use std::fmt::Display;

/// Print a warning to stderr. The caller keeps going.
pub fn warn(msg: impl Display) {
    eprintln!("WARN: {}", msg);
}

/// Format a message for fatal errors surfaced to the user.
pub fn error_message(msg: impl Display) -> String {
    format!("ERROR: {}", msg)
}
