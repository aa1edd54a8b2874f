//! Text edits and their application.
//!
//! Edits are validated before anything is spliced: every range must fall on
//! UTF-8 character boundaries inside the text, and no two edits may overlap.
//! Application walks the edits back-to-front so earlier ranges stay valid
//! while later ones are spliced.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::TextRange;

/// A single replacement of `range` with `replacement` in one file's text.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct TextEdit {
    pub range: TextRange,
    pub replacement: String,
}

impl TextEdit {
    pub fn replace(range: TextRange, replacement: impl Into<String>) -> Self {
        Self { range, replacement: replacement.into() }
    }

    pub fn insert(offset: usize, text: impl Into<String>) -> Self {
        Self { range: TextRange::empty(offset), replacement: text.into() }
    }

    pub fn delete(range: TextRange) -> Self {
        Self { range, replacement: String::new() }
    }
}

#[derive(Debug, Error, Clone, Eq, PartialEq)]
pub enum EditError {
    #[error("invalid range {range} (start past end)")]
    InvalidRange { range: TextRange },
    #[error("range {range} out of bounds for text of length {len}")]
    OutOfBounds { range: TextRange, len: usize },
    #[error("edit boundary at byte {offset} splits a multi-byte character")]
    SplitsCharBoundary { offset: usize },
    #[error("edits overlap: {first} and {second}")]
    Overlapping { first: TextRange, second: TextRange },
}

/// Sorts edits by start offset, drops exact duplicates, and rejects overlaps.
///
/// Touching ranges are fine; an insertion at the boundary of a replacement is
/// not an overlap because ranges are half-open.
pub fn normalize_edits(edits: &mut Vec<TextEdit>) -> Result<(), EditError> {
    edits.sort_by_key(|edit| (edit.range.start, edit.range.end));
    edits.dedup();
    for pair in edits.windows(2) {
        if pair[1].range.start < pair[0].range.end {
            return Err(EditError::Overlapping { first: pair[0].range, second: pair[1].range });
        }
    }
    Ok(())
}

/// Applies `edits` to `text`, producing the edited string.
///
/// The input slice may be in any order; it is normalized first. The original
/// text is never mutated.
pub fn apply_edits(text: &str, edits: &[TextEdit]) -> Result<String, EditError> {
    let mut edits = edits.to_vec();
    normalize_edits(&mut edits)?;
    for edit in &edits {
        validate_range(text, edit.range)?;
    }

    let mut result = text.to_string();
    for edit in edits.iter().rev() {
        result.replace_range(edit.range.start..edit.range.end, &edit.replacement);
    }
    Ok(result)
}

fn validate_range(text: &str, range: TextRange) -> Result<(), EditError> {
    if range.start > range.end {
        return Err(EditError::InvalidRange { range });
    }
    if range.end > text.len() {
        return Err(EditError::OutOfBounds { range, len: text.len() });
    }
    for offset in [range.start, range.end] {
        if !text.is_char_boundary(offset) {
            return Err(EditError::SplitsCharBoundary { offset });
        }
    }
    Ok(())
}
