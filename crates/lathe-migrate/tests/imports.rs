use lathe_migrate::{migrate_source, FileOutcome, LexicalTypeOracle, MigrationRule};
use pretty_assertions::assert_eq;

fn migrate(source: &str) -> FileOutcome {
    let rule = MigrationRule::junit_assert_equals_to_assertj();
    migrate_source(&rule, &LexicalTypeOracle, source).expect("migration should succeed")
}

#[test]
fn the_legacy_import_is_removed_with_its_last_call() {
    let outcome = migrate(
        r#"package com.example;

import static org.junit.jupiter.api.Assertions.assertEquals;

class AccountTest {
    void balance() {
        assertEquals(expected, actual);
    }
}
"#,
    );

    assert!(!outcome.text.contains("org.junit.jupiter.api.Assertions.assertEquals"));
    assert!(outcome
        .text
        .contains("import static org.assertj.core.api.Assertions.assertThat;"));
}

#[test]
fn sibling_static_imports_survive() {
    let outcome = migrate(
        r#"import static org.junit.jupiter.api.Assertions.assertEquals;
import static org.junit.jupiter.api.Assertions.assertTrue;

class AccountTest {
    void m() {
        assertEquals(expected, actual);
        assertTrue(flag);
    }
}
"#,
    );

    assert_eq!(
        outcome.text,
        r#"import static org.junit.jupiter.api.Assertions.assertTrue;
import static org.assertj.core.api.Assertions.assertThat;

class AccountTest {
    void m() {
        assertThat(actual).isEqualTo(expected);
        assertTrue(flag);
    }
}
"#
    );
}

#[test]
fn the_type_import_survives_while_other_members_use_it() {
    let outcome = migrate(
        r#"import org.junit.jupiter.api.Assertions;

class MixedTest {
    void m() {
        Assertions.assertEquals(expected, actual);
        Assertions.assertTrue(flag);
    }
}
"#,
    );

    assert!(outcome.text.contains("import org.junit.jupiter.api.Assertions;"));
    assert!(outcome.text.contains("Assertions.assertTrue(flag);"));
    assert!(outcome.text.contains("assertThat(actual).isEqualTo(expected);"));
}

#[test]
fn a_static_star_import_of_the_legacy_type_is_kept() {
    let outcome = migrate(
        r#"import static org.junit.jupiter.api.Assertions.*;

class StarTest {
    void m() {
        assertEquals(expected, actual);
    }
}
"#,
    );

    assert!(outcome.text.contains("import static org.junit.jupiter.api.Assertions.*;"));
    assert!(outcome
        .text
        .contains("import static org.assertj.core.api.Assertions.assertThat;"));
    assert!(outcome.text.contains("assertThat(actual).isEqualTo(expected);"));
}

#[test]
fn a_static_star_import_of_the_fluent_type_suppresses_additions() {
    let outcome = migrate(
        r#"import static org.assertj.core.api.Assertions.*;
import static org.junit.jupiter.api.Assertions.assertEquals;

class CoveredTest {
    void m() {
        assertEquals(expectedTotal, total, 0.5d);
    }
}
"#,
    );

    assert_eq!(
        outcome.text,
        r#"import static org.assertj.core.api.Assertions.*;

class CoveredTest {
    void m() {
        assertThat(total).isCloseTo(expectedTotal, within(0.5d));
    }
}
"#
    );
}

#[test]
fn a_file_without_imports_gains_a_block_before_the_class() {
    let outcome = migrate(
        r#"class BareTest {
    void m() {
        org.junit.jupiter.api.Assertions.assertEquals(expected, actual);
    }
}
"#,
    );

    assert_eq!(
        outcome.text,
        r#"import static org.assertj.core.api.Assertions.assertThat;

class BareTest {
    void m() {
        assertThat(actual).isEqualTo(expected);
    }
}
"#
    );
}

#[test]
fn a_file_with_no_matches_keeps_every_import_byte() {
    let source = r#"package com.example;

import java.util.List;
import static org.junit.jupiter.api.Assertions.assertTrue;

class UntouchedTest {
    void m() {
        assertTrue(values.isEmpty());
    }
}
"#;

    let outcome = migrate(source);
    assert_eq!(outcome.rewrites, 0);
    assert_eq!(outcome.text, source);
}

#[test]
fn import_lines_with_trailing_comments_are_removed_whole() {
    let outcome = migrate(
        r#"import static org.junit.jupiter.api.Assertions.assertEquals; // migrate me

class CommentedImportTest {
    void m() {
        assertEquals(expected, actual);
    }
}
"#,
    );

    assert!(!outcome.text.contains("migrate me"));
    assert_eq!(
        outcome.text,
        r#"import static org.assertj.core.api.Assertions.assertThat;

class CommentedImportTest {
    void m() {
        assertThat(actual).isEqualTo(expected);
    }
}
"#
    );
}
