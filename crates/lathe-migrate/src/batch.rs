//! Parallel driver over an in-memory batch of files.
//!
//! The batch is best effort: one file's failure is recorded in its own
//! result and never aborts the rest. Nothing here touches the filesystem;
//! the caller owns reading and writing.

use std::collections::BTreeMap;

use rayon::prelude::*;

use lathe_core::FileId;
use lathe_resolve::TypeOracle;

use crate::config::MigrationRule;
use crate::engine::{migrate_source, FileOutcome, MigrateError, SkippedCall};

/// Result of one file in a batch run.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum FileResult {
    Rewritten(FileOutcome),
    Unchanged { skipped: Vec<SkippedCall> },
    Failed(MigrateError),
}

/// Outcome of a batch run, keyed by file.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct MigrationOutcome {
    pub files: BTreeMap<FileId, FileResult>,
}

impl MigrationOutcome {
    /// Files whose text changed, paired with their final contents.
    pub fn changed_files(&self) -> impl Iterator<Item = (&FileId, &str)> {
        self.files.iter().filter_map(|(file, result)| match result {
            FileResult::Rewritten(outcome) => Some((file, outcome.text.as_str())),
            _ => None,
        })
    }

    pub fn total_rewrites(&self) -> usize {
        self.files
            .values()
            .map(|result| match result {
                FileResult::Rewritten(outcome) => outcome.rewrites,
                _ => 0,
            })
            .sum()
    }

    pub fn is_noop(&self) -> bool {
        self.files
            .values()
            .all(|result| !matches!(result, FileResult::Rewritten(_)))
    }
}

/// Migrates every file in the batch, in parallel.
pub fn migrate_files(
    rule: &MigrationRule,
    oracle: &(dyn TypeOracle + Sync),
    files: &[(FileId, String)],
) -> MigrationOutcome {
    let results: Vec<(FileId, FileResult)> = files
        .par_iter()
        .map(|(file, source)| {
            let result = match migrate_source(rule, oracle, source) {
                Ok(outcome) if outcome.rewrites > 0 => FileResult::Rewritten(outcome),
                Ok(outcome) => FileResult::Unchanged { skipped: outcome.skipped },
                Err(error) => {
                    tracing::debug!(
                        target = "lathe.migrate",
                        file = %file,
                        error = %error,
                        "failed to migrate file; continuing with the rest of the batch"
                    );
                    FileResult::Failed(error)
                }
            };
            (file.clone(), result)
        })
        .collect();
    MigrationOutcome { files: results.into_iter().collect() }
}
