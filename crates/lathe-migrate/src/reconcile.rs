//! Import reconciliation after a file's calls have been rewritten.
//!
//! Produces one batch of line-level edits: drop legacy imports that no
//! longer have a reference, add the static imports the replacement text
//! needs. The caller applies the batch in a single pass, so a file never
//! ends up with half of its imports adjusted.

use std::collections::BTreeSet;

use lathe_core::{TextEdit, TextRange};
use lathe_syntax::{contains_identifier, masked, parse_imports, ImportDecl};

use crate::config::MigrationRule;

/// Computes the import edits for `text`, assuming its call rewrites are
/// already present. `required` holds the fully qualified static members
/// the rewritten calls rely on.
///
/// A legacy import is dropped only when its name has no remaining
/// reference outside comments, literals, and the import lines themselves.
/// Wildcard imports are never dropped; other code may resolve through
/// them.
pub fn reconcile_imports(
    rule: &MigrationRule,
    required: &BTreeSet<String>,
    text: &str,
) -> Vec<TextEdit> {
    let block = parse_imports(text);
    let mut search = masked(text);
    for imp in &block.imports {
        blank_range(&mut search, imp.line_range);
    }

    let mut edits = Vec::new();
    let mut surviving: Vec<&ImportDecl> = Vec::new();
    let legacy_member = rule.legacy_static_member();
    for imp in &block.imports {
        let removable = if imp.is_static {
            imp.path == legacy_member && !contains_identifier(&search, &rule.legacy.method)
        } else {
            imp.path == rule.legacy.declaring_type
                && !contains_identifier(&search, rule.legacy_simple_name())
        };
        if removable {
            edits.push(TextEdit::delete(imp.line_range));
        } else {
            surviving.push(imp);
        }
    }

    let additions: Vec<&str> = required
        .iter()
        .map(String::as_str)
        .filter(|member| !covers(&surviving, member))
        .collect();
    if !additions.is_empty() {
        let offset = block.insertion_offset();
        let mut rendered = String::new();
        if offset > 0 && !text[..offset].ends_with('\n') {
            rendered.push('\n');
        }
        for member in additions {
            rendered.push_str(&ImportDecl::render(member, true));
        }
        if block.is_empty() && !text[offset..].starts_with('\n') {
            rendered.push('\n');
        }
        edits.push(TextEdit::insert(offset, rendered));
    }
    edits
}

fn covers(imports: &[&ImportDecl], member: &str) -> bool {
    let owner_star = match member.rfind('.') {
        Some(dot) => format!("{}.*", &member[..dot]),
        None => return false,
    };
    imports
        .iter()
        .any(|imp| imp.is_static && (imp.path == member || imp.path == owner_star))
}

/// Overwrites `range` with spaces, one per byte, so searches skip it
/// without shifting any offset.
fn blank_range(search: &mut String, range: TextRange) {
    let mut spaces = String::with_capacity(range.len());
    for ch in search[range.start..range.end].chars() {
        for _ in 0..ch.len_utf8() {
            spaces.push(' ');
        }
    }
    search.replace_range(range.start..range.end, &spaces);
}
