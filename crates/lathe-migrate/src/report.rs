//! Serializable summary of a batch run, for humans and tooling.

use serde::{Deserialize, Serialize};

use crate::batch::{FileResult, MigrationOutcome};
use crate::engine::SkippedCall;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct MigrationReport {
    pub files: Vec<FileReport>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct FileReport {
    pub file: String,
    pub status: FileStatus,
    /// Matched calls left untouched, with their spans in the final text.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub skipped: Vec<SkippedCall>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FileStatus {
    Rewritten { rewrites: usize },
    Unchanged,
    Failed { error: String },
}

impl From<&MigrationOutcome> for MigrationReport {
    fn from(outcome: &MigrationOutcome) -> Self {
        let files = outcome
            .files
            .iter()
            .map(|(file, result)| {
                let (status, skipped) = match result {
                    FileResult::Rewritten(outcome) => (
                        FileStatus::Rewritten { rewrites: outcome.rewrites },
                        outcome.skipped.clone(),
                    ),
                    FileResult::Unchanged { skipped } => (FileStatus::Unchanged, skipped.clone()),
                    FileResult::Failed(error) => {
                        (FileStatus::Failed { error: error.to_string() }, Vec::new())
                    }
                };
                FileReport { file: file.to_string(), status, skipped }
            })
            .collect();
        Self { files }
    }
}
