//! JSON front end for `wiregen`.
//!
//! Schema files are JSON with one extension: any line whose first
//! non-blank characters are `//` is a comment. Comment lines are blanked
//! rather than removed, so parse errors keep pointing at the right line.

mod error;
mod raw;

use wiregen_core::Message;

pub use error::LoadError;

/// Parse one schema document.
pub fn load_message_str(input: &str) -> Result<Message, LoadError> {
    let stripped = strip_comment_lines(input);
    let raw: raw::RawMessage = serde_json::from_str(&stripped)?;
    raw.into_message()
}

/// Blank every line that is a `//` comment.
pub fn strip_comment_lines(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for line in input.lines() {
        if !line.trim_start().starts_with("//") {
            out.push_str(line);
        }
        out.push('\n');
    }
    out
}
