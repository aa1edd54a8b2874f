//! Shared text primitives for the lathe migration crates.
//!
//! Downstream crates describe every source change as a [`TextEdit`] over a
//! byte [`TextRange`] and materialize changes with [`apply_edits`]. Appliers
//! never mutate in place; they produce a fresh `String` so callers can diff,
//! report, or throw the result away.

use std::fmt;

use serde::{Deserialize, Serialize};

pub mod edit;

pub use edit::{apply_edits, normalize_edits, EditError, TextEdit};

/// Identifier for a source file in a migration batch.
///
/// The wrapped string is whatever the caller keys files by, usually a
/// workspace-relative path. Ordered so batch reports are stable.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct FileId(pub String);

impl FileId {
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Half-open byte range `[start, end)` into a source file.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub struct TextRange {
    pub start: usize,
    pub end: usize,
}

impl TextRange {
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end, "range start {start} past end {end}");
        Self { start, end }
    }

    /// Empty range anchored at `offset`; used for pure insertions.
    pub fn empty(offset: usize) -> Self {
        Self { start: offset, end: offset }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn contains(&self, offset: usize) -> bool {
        self.start <= offset && offset < self.end
    }

    /// True when `other` lies entirely within `self` (boundaries included).
    pub fn contains_range(&self, other: TextRange) -> bool {
        self.start <= other.start && other.end <= self.end
    }
}

impl fmt::Display for TextRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}
