//! Method-call discovery over the token stream.
//!
//! A call candidate is an identifier immediately followed by `(`. The
//! surrounding tokens decide whether it really is an invocation (as opposed
//! to a declaration, annotation, or constructor) and what kind of receiver
//! it has. Nested calls are all reported; ranges of an outer call contain
//! the ranges of the calls in its arguments.

use lathe_core::TextRange;

use crate::scanner::{is_keyword, tokenize, Token, TokenKind};

/// Receiver of a call expression, as far as tokens can tell.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Receiver {
    /// Unqualified: `assertEquals(a, b)`.
    Implicit,
    /// A dotted identifier chain: `Assertions.assertEquals(...)` or the
    /// fully qualified `org.junit.jupiter.api.Assertions.assertEquals(...)`.
    Path(String),
    /// Anything more involved in receiver position: `build().equals(...)`,
    /// `this.check(...)`, `((Foo) x).run(...)`.
    Expression,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MethodCall {
    /// Full span of the call expression, qualifier chain included.
    pub range: TextRange,
    pub receiver: Receiver,
    pub name: String,
    pub name_range: TextRange,
    /// Trimmed span of each top-level argument, in order.
    pub args: Vec<TextRange>,
}

impl MethodCall {
    pub fn arg_text<'a>(&self, text: &'a str, index: usize) -> &'a str {
        let range = self.args[index];
        &text[range.start..range.end]
    }
}

/// Finds every method invocation in `text`, in source order.
///
/// Malformed stretches (unbalanced parentheses, truncated files) simply
/// produce no call for the affected candidate; discovery never fails.
pub fn find_method_calls(text: &str) -> Vec<MethodCall> {
    let tokens = tokenize(text);
    let mut calls = Vec::new();
    for idx in 0..tokens.len() {
        let TokenKind::Ident(name) = tokens[idx].kind else { continue };
        if is_keyword(name) {
            continue;
        }
        if !matches!(tokens.get(idx + 1).map(|t| t.kind), Some(TokenKind::Symbol('('))) {
            continue;
        }
        if let Some(call) = build_call(&tokens, idx, name) {
            calls.push(call);
        }
    }
    calls
}

fn build_call(tokens: &[Token<'_>], name_idx: usize, name: &str) -> Option<MethodCall> {
    let (head_idx, receiver) = classify_receiver(tokens, name_idx);
    if in_non_call_position(tokens, head_idx, matches!(receiver, Receiver::Implicit)) {
        return None;
    }
    let (args, close_idx) = split_arguments(tokens, name_idx + 1)?;
    Some(MethodCall {
        range: TextRange::new(tokens[head_idx].range.start, tokens[close_idx].range.end),
        receiver,
        name: name.to_string(),
        name_range: tokens[name_idx].range,
        args,
    })
}

/// Walks the dotted identifier chain leading into the call name.
///
/// Returns the token index of the chain head (the call name itself when the
/// call is unqualified) together with the receiver classification.
fn classify_receiver<'a>(tokens: &[Token<'a>], name_idx: usize) -> (usize, Receiver) {
    let mut head = name_idx;
    while head >= 2 && tokens[head - 1].kind == TokenKind::Symbol('.') {
        match tokens[head - 2].kind {
            TokenKind::Ident(segment) if !is_keyword(segment) => head -= 2,
            // `this.foo(..)`, `build().foo(..)`, `"x".foo(..)` and the like.
            _ => return (name_idx, Receiver::Expression),
        }
    }
    // A dangling dot with nothing walkable before it is still a receiver.
    if head >= 1 && tokens[head - 1].kind == TokenKind::Symbol('.') {
        return (name_idx, Receiver::Expression);
    }
    if head == name_idx {
        return (name_idx, Receiver::Implicit);
    }
    let mut path = String::new();
    let mut idx = head;
    while idx < name_idx {
        if let TokenKind::Ident(segment) = tokens[idx].kind {
            if !path.is_empty() {
                path.push('.');
            }
            path.push_str(segment);
        }
        idx += 2;
    }
    (head, Receiver::Path(path))
}

/// True when the token before the (chain head of the) candidate shows it is
/// not an invocation: a declaration header, annotation, or `new` expression.
fn in_non_call_position(tokens: &[Token<'_>], head_idx: usize, unqualified: bool) -> bool {
    let Some(prev) = head_idx.checked_sub(1).map(|i| &tokens[i]) else {
        return false;
    };
    match prev.kind {
        TokenKind::Symbol('@') => true,
        TokenKind::Ident("new") => true,
        // `int size(` or `Foo build(` is a declaration, but `return size(`
        // keeps the candidate in expression position.
        TokenKind::Ident(word) if unqualified => !starts_expression(word),
        // `List<String> names(` is a declaration; `() -> names(` is a call
        // in a lambda body.
        TokenKind::Symbol('>') if unqualified => {
            !matches!(
                head_idx.checked_sub(2).map(|i| tokens[i].kind),
                Some(TokenKind::Symbol('-'))
            )
        }
        TokenKind::Symbol(']') if unqualified => true,
        _ => false,
    }
}

fn starts_expression(keyword: &str) -> bool {
    matches!(
        keyword,
        "return" | "throw" | "else" | "case" | "yield" | "do" | "assert"
    )
}

/// Splits the parenthesized argument list starting at the token index of
/// `(`. Returns the argument spans and the index of the closing `)`.
fn split_arguments(tokens: &[Token<'_>], open_idx: usize) -> Option<(Vec<TextRange>, usize)> {
    let mut paren = 1usize;
    let mut square = 0usize;
    let mut curly = 0usize;
    let mut args = Vec::new();
    let mut first: Option<usize> = None;
    let mut last: Option<usize> = None;
    let mut idx = open_idx + 1;

    let flush = |args: &mut Vec<TextRange>, first: Option<usize>, last: Option<usize>| {
        if let (Some(f), Some(l)) = (first, last) {
            args.push(TextRange::new(tokens[f].range.start, tokens[l].range.end));
        }
    };

    while idx < tokens.len() {
        match tokens[idx].kind {
            TokenKind::Symbol('(') => paren += 1,
            TokenKind::Symbol(')') => {
                paren -= 1;
                if paren == 0 {
                    flush(&mut args, first, last);
                    return Some((args, idx));
                }
            }
            TokenKind::Symbol('[') => square += 1,
            TokenKind::Symbol(']') => square = square.saturating_sub(1),
            TokenKind::Symbol('{') => curly += 1,
            TokenKind::Symbol('}') => curly = curly.saturating_sub(1),
            // Type-argument commas are not argument separators. A flat scan
            // can recognize the two forms that occur in argument position:
            // explicit witnesses (`Collections.<String, Integer>emptyMap()`)
            // and constructor type arguments (`new HashMap<String, Integer>()`).
            TokenKind::Symbol('<') if type_arguments_follow(tokens, idx) => {
                let mut angle = 1usize;
                if first.is_none() {
                    first = Some(idx);
                }
                let mut j = idx + 1;
                while j < tokens.len() && angle > 0 {
                    match tokens[j].kind {
                        TokenKind::Symbol('<') => angle += 1,
                        TokenKind::Symbol('>') => angle -= 1,
                        _ => {}
                    }
                    j += 1;
                }
                last = Some(j - 1);
                idx = j;
                continue;
            }
            TokenKind::Symbol(',') if paren == 1 && square == 0 && curly == 0 => {
                flush(&mut args, first, last);
                first = None;
                last = None;
                idx += 1;
                continue;
            }
            _ => {}
        }
        if first.is_none() {
            first = Some(idx);
        }
        last = Some(idx);
        idx += 1;
    }
    // Ran off the end of the file before the list closed.
    None
}

/// True when the `<` at `lt_idx` opens a type-argument list rather than a
/// comparison: it follows a dot, or it follows the type name of a `new`
/// expression (dotted names included).
fn type_arguments_follow(tokens: &[Token<'_>], lt_idx: usize) -> bool {
    match tokens[lt_idx - 1].kind {
        TokenKind::Symbol('.') => true,
        TokenKind::Ident(_) => {
            let mut head = lt_idx - 1;
            while head >= 2
                && tokens[head - 1].kind == TokenKind::Symbol('.')
                && matches!(tokens[head - 2].kind, TokenKind::Ident(_))
            {
                head -= 2;
            }
            head >= 1 && tokens[head - 1].kind == TokenKind::Ident("new")
        }
        _ => false,
    }
}
