//! Per-file rewrite driver.
//!
//! Rewrites run innermost first: each round rescans the file, rewrites the
//! matched calls whose arguments contain no other rewritable call, applies
//! the edits, and scans again. Import reconciliation happens once, after
//! the last round, so the import block always describes the final text.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use lathe_core::{apply_edits, EditError, FileId, TextEdit, TextRange};
use lathe_resolve::TypeOracle;
use lathe_syntax::{find_method_calls, parse_imports, MethodCall};

use crate::classify::{classify, ArgumentKind};
use crate::config::MigrationRule;
use crate::emit::emit;
use crate::matcher::matches_legacy_call;
use crate::reconcile::reconcile_imports;

#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum MigrateError {
    #[error(transparent)]
    Edit(#[from] EditError),
    #[error("no source registered for {0}")]
    UnknownFile(FileId),
}

/// A matched call left in place because its argument count has no fluent
/// counterpart.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct SkippedCall {
    /// Span of the call in the file's final text.
    pub range: TextRange,
    pub arity: usize,
}

/// Result of migrating one file. `text` equals the input when `rewrites`
/// is zero.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FileOutcome {
    pub text: String,
    pub rewrites: usize,
    pub skipped: Vec<SkippedCall>,
}

/// Rewrites every supported legacy call in `source`.
///
/// Calls with an unsupported argument count are left byte-for-byte intact
/// and reported in [`FileOutcome::skipped`]; they do not stop the calls
/// around or above them from being rewritten. An error from the edit layer
/// abandons the whole file.
pub fn migrate_source(
    rule: &MigrationRule,
    oracle: &dyn TypeOracle,
    source: &str,
) -> Result<FileOutcome, MigrateError> {
    let mut text = source.to_string();
    let mut required: BTreeSet<String> = BTreeSet::new();
    let mut rewrites = 0usize;
    let mut cap = 0usize;
    let mut round = 0usize;

    loop {
        let imports = parse_imports(&text);
        let matched: Vec<MethodCall> = find_method_calls(&text)
            .into_iter()
            .filter(|call| matches_legacy_call(rule, &imports, call))
            .collect();
        if round == 0 {
            // Every round consumes at least one matched call, so the
            // initial count bounds the loop even for degenerate rules.
            cap = matched.len() + 1;
        }
        let rewritable: Vec<MethodCall> = matched
            .into_iter()
            .filter(|call| (2..=4).contains(&call.args.len()))
            .collect();
        if rewritable.is_empty() {
            break;
        }
        if round >= cap {
            tracing::debug!(
                target = "lathe.migrate",
                rounds = round,
                "rewrite rounds exceeded the matched-call bound; stopping"
            );
            break;
        }

        let mut edits = Vec::new();
        for call in innermost(&rewritable) {
            let kinds: Vec<ArgumentKind> = call
                .args
                .iter()
                .map(|arg| ArgumentKind::of(&oracle.resolve_type(&text, *arg)))
                .collect();
            let Ok(shape) = classify(&kinds) else { continue };
            let replacement = emit(rule, shape, call, &text);
            required.extend(replacement.required_members);
            edits.push(TextEdit::replace(call.range, replacement.text));
            rewrites += 1;
        }
        text = apply_edits(&text, &edits)?;
        round += 1;
    }

    if rewrites > 0 {
        let edits = reconcile_imports(rule, &required, &text);
        text = apply_edits(&text, &edits)?;
    }

    // Skip spans are reported against the final text, so the snapshot has
    // to come after import reconciliation shifts the file body.
    let imports = parse_imports(&text);
    let skipped: Vec<SkippedCall> = find_method_calls(&text)
        .into_iter()
        .filter(|call| {
            matches_legacy_call(rule, &imports, call) && !(2..=4).contains(&call.args.len())
        })
        .map(|call| SkippedCall { range: call.range, arity: call.args.len() })
        .collect();
    if !skipped.is_empty() {
        tracing::debug!(
            target = "lathe.migrate",
            calls = skipped.len(),
            "matched calls with unsupported argument counts were left untouched"
        );
    }

    Ok(FileOutcome { text, rewrites, skipped })
}

/// The rewritable calls whose arguments contain no other rewritable call.
fn innermost(rewritable: &[MethodCall]) -> Vec<&MethodCall> {
    rewritable
        .iter()
        .filter(|outer| {
            !rewritable
                .iter()
                .any(|inner| inner.range != outer.range && outer.range.contains_range(inner.range))
        })
        .collect()
}
