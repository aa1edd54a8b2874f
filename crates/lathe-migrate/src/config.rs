//! Migration rules: which legacy call to match and which fluent chain to
//! emit. Rules are plain data, so alternate assertion vocabularies load from
//! configuration without code changes. The JUnit 5 to AssertJ rule ships as
//! a preset.

use serde::{Deserialize, Serialize};

/// The legacy static assertion to replace.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct LegacyCall {
    /// Fully qualified declaring type, e.g. `org.junit.jupiter.api.Assertions`.
    pub declaring_type: String,
    /// Method name. Matching is overload-agnostic; every arity of this name
    /// on the declaring type is considered.
    pub method: String,
}

/// The fluent assertion vocabulary to emit.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct FluentCalls {
    /// Declaring type of the static entry points, e.g.
    /// `org.assertj.core.api.Assertions`.
    pub declaring_type: String,
    /// Entry point wrapping the actual value: `assertThat`.
    pub entry: String,
    /// Exact-equality link: `isEqualTo`.
    pub equality: String,
    /// Tolerance link: `isCloseTo`.
    pub tolerance: String,
    /// Static wrapper for the tolerance value: `within`.
    pub tolerance_wrapper: String,
    /// Message link for eagerly evaluated strings: `as`.
    pub labelled_message: String,
    /// Message link for suppliers and unresolved message types.
    pub deferred_message: String,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct MigrationRule {
    pub legacy: LegacyCall,
    pub fluent: FluentCalls,
}

impl MigrationRule {
    /// JUnit 5 `Assertions.assertEquals` to AssertJ
    /// `assertThat(..).isEqualTo(..)` and friends.
    pub fn junit_assert_equals_to_assertj() -> Self {
        Self {
            legacy: LegacyCall {
                declaring_type: "org.junit.jupiter.api.Assertions".to_string(),
                method: "assertEquals".to_string(),
            },
            fluent: FluentCalls {
                declaring_type: "org.assertj.core.api.Assertions".to_string(),
                entry: "assertThat".to_string(),
                equality: "isEqualTo".to_string(),
                tolerance: "isCloseTo".to_string(),
                tolerance_wrapper: "within".to_string(),
                labelled_message: "as".to_string(),
                deferred_message: "withFailureMessage".to_string(),
            },
        }
    }

    /// Simple name of the legacy declaring type, e.g. `Assertions`.
    pub fn legacy_simple_name(&self) -> &str {
        self.legacy
            .declaring_type
            .rsplit('.')
            .next()
            .unwrap_or(&self.legacy.declaring_type)
    }

    /// Package of the legacy declaring type; empty for unpackaged types.
    pub fn legacy_package(&self) -> &str {
        match self.legacy.declaring_type.rfind('.') {
            Some(dot) => &self.legacy.declaring_type[..dot],
            None => "",
        }
    }

    /// Fully qualified legacy static member, e.g.
    /// `org.junit.jupiter.api.Assertions.assertEquals`.
    pub fn legacy_static_member(&self) -> String {
        format!("{}.{}", self.legacy.declaring_type, self.legacy.method)
    }

    /// Fully qualified entry member the replacement always needs, e.g.
    /// `org.assertj.core.api.Assertions.assertThat`.
    pub fn entry_member(&self) -> String {
        format!("{}.{}", self.fluent.declaring_type, self.fluent.entry)
    }

    /// Fully qualified tolerance wrapper, e.g.
    /// `org.assertj.core.api.Assertions.within`.
    pub fn wrapper_member(&self) -> String {
        format!("{}.{}", self.fluent.declaring_type, self.fluent.tolerance_wrapper)
    }
}
