//! Minimal Java source scanning for the migration engine.
//!
//! Nothing in this crate builds a syntax tree. [`scanner`] produces a flat
//! token stream with byte ranges, [`calls`] walks that stream to discover
//! method-call expressions, and [`imports`] parses the header's import block.
//! [`masked`] blanks comments and literals so textual searches can never
//! match inside them.

pub mod calls;
pub mod imports;
pub mod scanner;

pub use calls::{find_method_calls, MethodCall, Receiver};
pub use imports::{parse_imports, ImportBlock, ImportDecl};
pub use scanner::{masked, tokenize, Token, TokenKind};

/// True when `name` occurs in `text` as a standalone identifier, not as a
/// fragment of a longer one.
///
/// Callers that need to ignore comments and literals should pass
/// [`masked`] text.
pub fn contains_identifier(text: &str, name: &str) -> bool {
    if name.is_empty() {
        return false;
    }
    let mut from = 0;
    while let Some(found) = text[from..].find(name) {
        let start = from + found;
        let end = start + name.len();
        let free_before = text[..start]
            .chars()
            .next_back()
            .map_or(true, |c| !scanner::is_ident_char(c));
        let free_after = text[end..]
            .chars()
            .next()
            .map_or(true, |c| !scanner::is_ident_char(c));
        if free_before && free_after {
            return true;
        }
        from = start + 1;
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identifier_search_respects_word_boundaries() {
        assert!(contains_identifier("assertEquals(a, b)", "assertEquals"));
        assert!(contains_identifier("Assertions.assertEquals(a, b)", "assertEquals"));
        assert!(!contains_identifier("assertEqualsIgnoreCase(a, b)", "assertEquals"));
        assert!(!contains_identifier("myassertEquals(a, b)", "assertEquals"));
        assert!(!contains_identifier("", "assertEquals"));
    }

    #[test]
    fn identifier_search_sees_through_overlapping_prefixes() {
        assert!(contains_identifier("xx x", "x"));
    }
}
