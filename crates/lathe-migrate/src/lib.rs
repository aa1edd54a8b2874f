//! Migration of legacy assertion calls to a fluent assertion style.
//!
//! The crate rewrites `assertEquals(expected, actual, ...)` invocations into
//! `assertThat(actual)...` chains, one file at a time:
//! - matching proves the declaring type from the receiver chain and the
//!   file's imports; anything unprovable is left alone (`matches_legacy_call`)
//! - classification picks the replacement shape from the argument count and
//!   the resolved argument types (`classify`)
//! - emission splices the original argument text into the fluent chain
//!   (`emit`)
//! - reconciliation settles the import block once per file
//!   (`reconcile_imports`)
//!
//! [`migrate_source`] runs the pipeline for one file, [`migrate_files`] for
//! a batch in parallel. Everything works on in-memory text; the caller owns
//! all I/O.

mod batch;
mod classify;
mod config;
mod emit;
mod engine;
mod matcher;
mod preview;
mod reconcile;
mod report;

pub use batch::{migrate_files, FileResult, MigrationOutcome};
pub use classify::{classify, ArgumentKind, MessageStyle, RewriteShape, UnsupportedShape};
pub use config::{FluentCalls, LegacyCall, MigrationRule};
pub use emit::{emit, Replacement};
pub use engine::{migrate_source, FileOutcome, MigrateError, SkippedCall};
pub use matcher::matches_legacy_call;
pub use preview::{preview_outcome, FilePreview};
pub use reconcile::reconcile_imports;
pub use report::{FileReport, FileStatus, MigrationReport};

pub use lathe_core::{apply_edits, EditError, FileId, TextEdit, TextRange};
pub use lathe_resolve::{LexicalTypeOracle, PrimitiveType, TypeDescriptor, TypeOracle};
