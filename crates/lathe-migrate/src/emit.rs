//! Rendering fluent replacement text for a classified call.

use lathe_syntax::MethodCall;

use crate::classify::{MessageStyle, RewriteShape};
use crate::config::MigrationRule;

/// Replacement text for one call, plus the static members the new text
/// relies on being imported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Replacement {
    pub text: String,
    pub required_members: Vec<String>,
}

/// Renders the fluent chain for `call` under `shape`.
///
/// Argument text is spliced verbatim, so nested expressions survive
/// untouched. The chain names the actual value before the expected one,
/// the reverse of the legacy argument order.
pub fn emit(rule: &MigrationRule, shape: RewriteShape, call: &MethodCall, text: &str) -> Replacement {
    let fluent = &rule.fluent;
    let expected = call.arg_text(text, 0);
    let actual = call.arg_text(text, 1);
    let mut required = vec![rule.entry_member()];

    let rendered = match shape {
        RewriteShape::Equality => format!(
            "{}({}).{}({})",
            fluent.entry, actual, fluent.equality, expected
        ),
        RewriteShape::MessageEquality(style) => format!(
            "{}({}).{}({}).{}({})",
            fluent.entry,
            actual,
            message_link(rule, style),
            call.arg_text(text, 2),
            fluent.equality,
            expected
        ),
        RewriteShape::Tolerance => {
            required.push(rule.wrapper_member());
            format!(
                "{}({}).{}({}, {}({}))",
                fluent.entry,
                actual,
                fluent.tolerance,
                expected,
                fluent.tolerance_wrapper,
                call.arg_text(text, 2)
            )
        }
        RewriteShape::MessageTolerance(style) => {
            required.push(rule.wrapper_member());
            format!(
                "{}({}).{}({}).{}({}, {}({}))",
                fluent.entry,
                actual,
                message_link(rule, style),
                call.arg_text(text, 2),
                fluent.tolerance,
                expected,
                fluent.tolerance_wrapper,
                call.arg_text(text, 3)
            )
        }
    };

    Replacement {
        text: rendered,
        required_members: required,
    }
}

fn message_link(rule: &MigrationRule, style: MessageStyle) -> &str {
    match style {
        MessageStyle::Labelled => &rule.fluent.labelled_message,
        MessageStyle::Deferred => &rule.fluent.deferred_message,
    }
}
