//! Dry-run previews: unified diffs of what a batch would change.

use std::collections::BTreeMap;

use similar::TextDiff;

use lathe_core::FileId;

use crate::batch::{FileResult, MigrationOutcome};
use crate::engine::MigrateError;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FilePreview {
    pub file: FileId,
    pub original: String,
    pub modified: String,
    pub unified_diff: String,
    pub rewrites: usize,
}

/// Builds one preview per rewritten file, in file order.
///
/// `files` must hold the original text of every rewritten file; it is
/// normally the same slice the batch ran over.
pub fn preview_outcome(
    files: &[(FileId, String)],
    outcome: &MigrationOutcome,
) -> Result<Vec<FilePreview>, MigrateError> {
    let originals: BTreeMap<&FileId, &str> = files
        .iter()
        .map(|(file, text)| (file, text.as_str()))
        .collect();

    let mut previews = Vec::new();
    for (file, result) in &outcome.files {
        let FileResult::Rewritten(rewritten) = result else {
            continue;
        };
        let original = originals
            .get(file)
            .copied()
            .ok_or_else(|| MigrateError::UnknownFile(file.clone()))?;

        let diff = TextDiff::from_lines(original, rewritten.text.as_str());
        let unified_diff = diff
            .unified_diff()
            .context_radius(3)
            .header(&format!("a/{}", file), &format!("b/{}", file))
            .to_string();

        previews.push(FilePreview {
            file: file.clone(),
            original: original.to_string(),
            modified: rewritten.text.clone(),
            unified_diff,
            rewrites: rewritten.rewrites,
        });
    }
    Ok(previews)
}

#[cfg(test)]
mod tests {
    use lathe_resolve::LexicalTypeOracle;

    use crate::batch::migrate_files;
    use crate::config::MigrationRule;
    use crate::engine::FileOutcome;

    use super::*;

    #[test]
    fn previews_cover_only_rewritten_files() {
        let rule = MigrationRule::junit_assert_equals_to_assertj();
        let files = vec![
            (
                FileId::new("src/FooTest.java"),
                "import static org.junit.jupiter.api.Assertions.assertEquals;\nclass FooTest { void m() { assertEquals(expected, actual); } }\n".to_string(),
            ),
            (FileId::new("src/Plain.java"), "class Plain { }\n".to_string()),
        ];
        let outcome = migrate_files(&rule, &LexicalTypeOracle, &files);
        let previews = preview_outcome(&files, &outcome).unwrap();

        assert_eq!(previews.len(), 1);
        let preview = &previews[0];
        assert_eq!(preview.file, FileId::new("src/FooTest.java"));
        assert_eq!(preview.rewrites, 1);
        assert!(preview.unified_diff.contains("--- a/src/FooTest.java"));
        assert!(preview.unified_diff.contains("+++ b/src/FooTest.java"));
        assert!(preview
            .unified_diff
            .contains("-import static org.junit.jupiter.api.Assertions.assertEquals;"));
        assert!(preview
            .unified_diff
            .contains("+import static org.assertj.core.api.Assertions.assertThat;"));
    }

    #[test]
    fn a_rewritten_file_missing_from_the_input_is_an_error() {
        let mut outcome = MigrationOutcome::default();
        outcome.files.insert(
            FileId::new("gone/Missing.java"),
            FileResult::Rewritten(FileOutcome {
                text: "class Missing { }\n".to_string(),
                rewrites: 1,
                skipped: vec![],
            }),
        );
        let err = preview_outcome(&[], &outcome).unwrap_err();
        assert_eq!(err, MigrateError::UnknownFile(FileId::new("gone/Missing.java")));
    }
}
