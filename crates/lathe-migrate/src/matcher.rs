//! Matching discovered calls against a rule's legacy method.

use lathe_syntax::{ImportBlock, MethodCall, Receiver};

use crate::config::MigrationRule;

/// True when `call` is provably an invocation of the rule's legacy method.
///
/// The declaring type must be provable from the file alone: a fully
/// qualified receiver, a simple-name receiver backed by a matching import,
/// or an unqualified call backed by a static import of the method. Every
/// arity matches; the classifier sorts out supported shapes later.
/// Expression receivers and unprovable names never match, which leaves
/// same-named methods on other types untouched.
pub fn matches_legacy_call(rule: &MigrationRule, imports: &ImportBlock, call: &MethodCall) -> bool {
    if call.name != rule.legacy.method {
        return false;
    }
    match &call.receiver {
        Receiver::Implicit => imports.covers_static_member(&rule.legacy_static_member()),
        Receiver::Path(path) => path_names_legacy_type(rule, imports, path),
        Receiver::Expression => false,
    }
}

fn path_names_legacy_type(rule: &MigrationRule, imports: &ImportBlock, path: &str) -> bool {
    if path == rule.legacy.declaring_type {
        return true;
    }
    if path != rule.legacy_simple_name() {
        return false;
    }
    // `Assertions.assertEquals(..)`: an exact import decides which
    // `Assertions` the simple name is.
    if let Some(exact) = imports
        .imports
        .iter()
        .find(|imp| !imp.is_static && !imp.is_wildcard() && imp.last_segment() == path)
    {
        return exact.path == rule.legacy.declaring_type;
    }
    // Otherwise a wildcard over the legacy package can still prove it.
    let star = format!("{}.*", rule.legacy_package());
    imports.imports.iter().any(|imp| !imp.is_static && imp.path == star)
}

#[cfg(test)]
mod tests {
    use lathe_syntax::{find_method_calls, parse_imports};

    use super::*;

    fn matched_names(rule: &MigrationRule, src: &str) -> Vec<String> {
        let imports = parse_imports(src);
        find_method_calls(src)
            .into_iter()
            .filter(|call| matches_legacy_call(rule, &imports, call))
            .map(|call| call.name)
            .collect()
    }

    #[test]
    fn static_import_proves_unqualified_calls() {
        let rule = MigrationRule::junit_assert_equals_to_assertj();
        let src = "import static org.junit.jupiter.api.Assertions.assertEquals;\nclass T { void m() { assertEquals(a, b); } }";
        assert_eq!(matched_names(&rule, src), vec!["assertEquals"]);
    }

    #[test]
    fn static_wildcard_import_proves_unqualified_calls() {
        let rule = MigrationRule::junit_assert_equals_to_assertj();
        let src = "import static org.junit.jupiter.api.Assertions.*;\nclass T { void m() { assertEquals(a, b); } }";
        assert_eq!(matched_names(&rule, src), vec!["assertEquals"]);
    }

    #[test]
    fn unqualified_call_without_import_does_not_match() {
        let rule = MigrationRule::junit_assert_equals_to_assertj();
        let src = "class T { void m() { assertEquals(a, b); } }";
        assert!(matched_names(&rule, src).is_empty());
    }

    #[test]
    fn simple_name_receiver_needs_the_right_import() {
        let rule = MigrationRule::junit_assert_equals_to_assertj();
        let junit = "import org.junit.jupiter.api.Assertions;\nclass T { void m() { Assertions.assertEquals(a, b); } }";
        assert_eq!(matched_names(&rule, junit), vec!["assertEquals"]);

        let other = "import com.example.Assertions;\nclass T { void m() { Assertions.assertEquals(a, b); } }";
        assert!(matched_names(&rule, other).is_empty());
    }

    #[test]
    fn package_wildcard_import_proves_the_simple_name() {
        let rule = MigrationRule::junit_assert_equals_to_assertj();
        let src = "import org.junit.jupiter.api.*;\nclass T { void m() { Assertions.assertEquals(a, b); } }";
        assert_eq!(matched_names(&rule, src), vec!["assertEquals"]);
    }

    #[test]
    fn exact_import_of_another_type_beats_the_wildcard() {
        let rule = MigrationRule::junit_assert_equals_to_assertj();
        let src = "import org.junit.jupiter.api.*;\nimport com.example.Assertions;\nclass T { void m() { Assertions.assertEquals(a, b); } }";
        assert!(matched_names(&rule, src).is_empty());
    }

    #[test]
    fn fully_qualified_receiver_needs_no_import() {
        let rule = MigrationRule::junit_assert_equals_to_assertj();
        let src = "class T { void m() { org.junit.jupiter.api.Assertions.assertEquals(a, b); } }";
        assert_eq!(matched_names(&rule, src), vec!["assertEquals"]);
    }

    #[test]
    fn expression_receivers_never_match() {
        let rule = MigrationRule::junit_assert_equals_to_assertj();
        let src = "import static org.junit.jupiter.api.Assertions.assertEquals;\nclass T { void m() { helper().assertEquals(a, b); } }";
        assert!(matched_names(&rule, src).is_empty());
    }

    #[test]
    fn other_method_names_never_match() {
        let rule = MigrationRule::junit_assert_equals_to_assertj();
        let src = "import static org.junit.jupiter.api.Assertions.assertTrue;\nclass T { void m() { assertTrue(x); } }";
        assert!(matched_names(&rule, src).is_empty());
    }

    #[test]
    fn every_arity_matches() {
        let rule = MigrationRule::junit_assert_equals_to_assertj();
        let src = "import static org.junit.jupiter.api.Assertions.assertEquals;\nclass T { void m() { assertEquals(a); assertEquals(a, b, c, d, e); } }";
        assert_eq!(matched_names(&rule, src).len(), 2);
    }
}
