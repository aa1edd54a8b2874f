//! Token-level type resolution.
//!
//! The lexical oracle never parses. It classifies literal shapes directly,
//! follows casts and a handful of well-known factory calls, splits simple
//! top-level arithmetic, and resolves lone identifiers by scanning backwards
//! through masked source for a declaration (`double delta`, `final String
//! label`, `Supplier<String> message`). Every dead end is `Unknown`.

use lathe_core::TextRange;
use lathe_syntax::scanner::{is_ident_char, is_ident_start, is_keyword};
use lathe_syntax::masked;

use crate::{PrimitiveType, TypeDescriptor, TypeOracle};

const MAX_RESOLVE_DEPTH: u8 = 4;

#[derive(Clone, Copy, Debug, Default)]
pub struct LexicalTypeOracle;

impl LexicalTypeOracle {
    pub fn new() -> Self {
        Self
    }
}

impl TypeOracle for LexicalTypeOracle {
    fn resolve_type(&self, text: &str, expr: TextRange) -> TypeDescriptor {
        let Some(raw) = fragment_text(text, expr) else {
            return TypeDescriptor::Unknown;
        };
        resolve_fragment(text, expr.start, raw, 0)
    }
}

fn fragment_text(text: &str, expr: TextRange) -> Option<&str> {
    if expr.start > expr.end || expr.end > text.len() {
        return None;
    }
    if !text.is_char_boundary(expr.start) || !text.is_char_boundary(expr.end) {
        return None;
    }
    Some(&text[expr.start..expr.end])
}

fn resolve_fragment(text: &str, ceiling: usize, fragment: &str, depth: u8) -> TypeDescriptor {
    if depth > MAX_RESOLVE_DEPTH {
        return TypeDescriptor::Unknown;
    }
    let frag = strip_outer_parens(fragment.trim());
    if frag.is_empty() {
        return TypeDescriptor::Unknown;
    }

    // Unary sign preserves numeric types and rules everything else out.
    if let Some(rest) = frag.strip_prefix('-').or_else(|| frag.strip_prefix('+')) {
        let inner = resolve_fragment(text, ceiling, rest, depth + 1);
        return if inner.is_numeric() { inner } else { TypeDescriptor::Unknown };
    }

    if frag.starts_with('"') {
        // Covers plain literals, text blocks, and `"prefix" + x` concatenations.
        return TypeDescriptor::class("java.lang.String");
    }
    if frag.starts_with('\'') {
        return TypeDescriptor::Primitive(PrimitiveType::Char);
    }
    if frag == "true" || frag == "false" {
        return TypeDescriptor::Primitive(PrimitiveType::Boolean);
    }
    if frag == "null" {
        return TypeDescriptor::Unknown;
    }
    if let Some(ty) = number_literal(frag) {
        return ty;
    }
    if is_zero_arg_lambda(frag) {
        return TypeDescriptor::class("java.util.function.Supplier");
    }
    if let Some(ty) = cast_expression(frag) {
        return ty;
    }
    if let Some(ty) = factory_call(frag) {
        return ty;
    }
    if let Some((op, left, right)) = split_binary(frag) {
        return combine_binary(
            op,
            resolve_fragment(text, ceiling, left, depth + 1),
            resolve_fragment(text, ceiling, right, depth + 1),
        );
    }
    if is_identifier(frag) {
        return declared_type(text, ceiling, frag);
    }
    TypeDescriptor::Unknown
}

/// Strips parentheses that enclose the entire expression, repeatedly.
fn strip_outer_parens(expr: &str) -> &str {
    let mut current = expr;
    loop {
        let trimmed = current.trim();
        let Some(inner) = trimmed.strip_prefix('(').and_then(|r| r.strip_suffix(')')) else {
            return trimmed;
        };
        // The leading paren must pair with the final one.
        let mut depth = 0i32;
        let mut encloses = true;
        for c in inner.chars() {
            match c {
                '(' => depth += 1,
                ')' => {
                    depth -= 1;
                    if depth < 0 {
                        encloses = false;
                        break;
                    }
                }
                _ => {}
            }
        }
        if !encloses || depth != 0 {
            return trimmed;
        }
        current = inner;
    }
}

fn number_literal(expr: &str) -> Option<TypeDescriptor> {
    let first = expr.chars().next()?;
    if !first.is_ascii_digit() && first != '.' {
        return None;
    }
    let lower = expr.to_ascii_lowercase();
    if lower.starts_with("0x") || lower.starts_with("0b") {
        let digits = lower[2..].strip_suffix('l').unwrap_or(&lower[2..]);
        let long = digits.len() != lower[2..].len();
        if !digits.is_empty() && digits.chars().all(|c| c.is_ascii_hexdigit() || c == '_') {
            let p = if long { PrimitiveType::Long } else { PrimitiveType::Int };
            return Some(TypeDescriptor::Primitive(p));
        }
        return None;
    }

    let mut saw_dot = false;
    let mut saw_exp = false;
    let mut suffix: Option<char> = None;
    let mut prev = '\0';
    for c in expr.chars() {
        if suffix.is_some() {
            return None;
        }
        match c {
            '0'..='9' | '_' => {}
            '.' if !saw_dot && !saw_exp => saw_dot = true,
            'e' | 'E' if !saw_exp && (prev.is_ascii_digit() || prev == '.') => saw_exp = true,
            '+' | '-' if prev == 'e' || prev == 'E' => {}
            'f' | 'F' => suffix = Some('f'),
            'd' | 'D' => suffix = Some('d'),
            'l' | 'L' if !saw_dot && !saw_exp => suffix = Some('l'),
            _ => return None,
        }
        prev = c;
    }
    let p = match suffix {
        Some('f') => PrimitiveType::Float,
        Some('d') => PrimitiveType::Double,
        Some('l') => PrimitiveType::Long,
        _ if saw_dot || saw_exp => PrimitiveType::Double,
        _ => PrimitiveType::Int,
    };
    Some(TypeDescriptor::Primitive(p))
}

/// `() -> ...` is the shape the message-supplier overloads take.
fn is_zero_arg_lambda(expr: &str) -> bool {
    let Some(rest) = expr.strip_prefix('(') else { return false };
    let Some(rest) = rest.trim_start().strip_prefix(')') else { return false };
    rest.trim_start().starts_with("->")
}

fn cast_expression(expr: &str) -> Option<TypeDescriptor> {
    let rest = expr.strip_prefix('(')?;
    let mut depth = 1i32;
    let mut close = None;
    for (i, c) in rest.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth == 0 {
                    close = Some(i);
                    break;
                }
            }
            _ => {}
        }
    }
    let close = close?;
    let target = rest[..close].trim();
    let after = rest[close + 1..].trim_start();
    if after.is_empty() || after.starts_with("->") {
        return None;
    }
    // `(x) * y` is arithmetic, not a cast. A sign after the parens is only a
    // cast when the target is a primitive type keyword: `(double) -x`.
    let first_after = after.chars().next()?;
    if matches!(first_after, '*' | '/' | '%' | '=' | '<' | '>' | '!' | '&' | '|' | '?' | ':' | ',' | '.' | ')' | ';') {
        return None;
    }
    let mapped = type_from_name(target)?;
    if matches!(first_after, '+' | '-')
        && !matches!(mapped, TypeDescriptor::Primitive(_))
    {
        return None;
    }
    Some(mapped)
}

fn factory_call(expr: &str) -> Option<TypeDescriptor> {
    const STRING_MAKERS: [&str; 3] = ["String.format(", "String.valueOf(", "String.join("];
    if STRING_MAKERS.iter().any(|prefix| expr.starts_with(prefix)) || expr.ends_with(".toString()") {
        return Some(TypeDescriptor::class("java.lang.String"));
    }
    if expr.starts_with("Double.valueOf(") {
        return Some(TypeDescriptor::class("java.lang.Double"));
    }
    if expr.starts_with("Float.valueOf(") {
        return Some(TypeDescriptor::class("java.lang.Float"));
    }
    if expr.starts_with("Double.parseDouble(") {
        return Some(TypeDescriptor::Primitive(PrimitiveType::Double));
    }
    if expr.starts_with("Float.parseFloat(") {
        return Some(TypeDescriptor::Primitive(PrimitiveType::Float));
    }
    None
}

/// Finds the top-level binary arithmetic operator to split on: the last
/// additive one, or failing that the last multiplicative one. Works on a
/// masked copy so literal contents cannot fake an operator.
fn split_binary(expr: &str) -> Option<(char, &str, &str)> {
    let mask = masked(expr);
    let mut depth = 0i32;
    let mut additive = None;
    let mut multiplicative = None;
    let mut prev_code = '\0';
    for (i, c) in mask.char_indices() {
        match c {
            '(' | '[' | '{' => depth += 1,
            ')' | ']' | '}' => depth -= 1,
            '+' | '-' if depth == 0 => {
                let binary = is_ident_char(prev_code) || matches!(prev_code, ')' | ']');
                let arrow = c == '-' && mask[i + 1..].starts_with('>');
                // `1e-3`: a sign right after an exponent marker is part of
                // the number.
                let exponent = matches!(prev_code, 'e' | 'E')
                    && mask[..i]
                        .trim_end_matches(['e', 'E'])
                        .chars()
                        .next_back()
                        .is_some_and(|d| d.is_ascii_digit() || d == '.');
                if binary && !arrow && !exponent {
                    additive = Some(i);
                }
            }
            '*' | '/' | '%' if depth == 0 => {
                if is_ident_char(prev_code) || matches!(prev_code, ')' | ']') {
                    multiplicative = Some(i);
                }
            }
            _ => {}
        }
        if !c.is_whitespace() {
            prev_code = c;
        }
    }
    let at = additive.or(multiplicative)?;
    let op = expr[at..].chars().next()?;
    Some((op, &expr[..at], &expr[at + op.len_utf8()..]))
}

fn combine_binary(op: char, lhs: TypeDescriptor, rhs: TypeDescriptor) -> TypeDescriptor {
    if op == '+' && (lhs.is_string() || rhs.is_string()) {
        return TypeDescriptor::class("java.lang.String");
    }
    if lhs.is_floating_point() {
        return lhs;
    }
    if rhs.is_floating_point() {
        return rhs;
    }
    if lhs.is_numeric() && rhs.is_numeric() {
        return TypeDescriptor::Primitive(PrimitiveType::Int);
    }
    TypeDescriptor::Unknown
}

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    let Some(first) = chars.next() else { return false };
    is_ident_start(first) && chars.all(is_ident_char) && !is_keyword(s)
}

/// Scans backwards from `ceiling` for a declaration of `name` and maps its
/// declared type. Comments and literals are masked out first, so a
/// declaration mentioned in a comment never matches.
fn declared_type(text: &str, ceiling: usize, name: &str) -> TypeDescriptor {
    if ceiling > text.len() || !text.is_char_boundary(ceiling) {
        return TypeDescriptor::Unknown;
    }
    let mask = masked(&text[..ceiling]);
    let mut upto = mask.len();
    while let Some(found) = mask[..upto].rfind(name) {
        upto = found;
        let end = found + name.len();
        let free_before = mask[..found]
            .chars()
            .next_back()
            .map_or(true, |c| !is_ident_char(c));
        let free_after = mask[end..].chars().next().map_or(true, |c| !is_ident_char(c));
        if !free_before || !free_after {
            continue;
        }
        let Some(token) = type_token_before(&mask, found) else {
            continue;
        };
        let Some(ty) = type_from_name(&token) else {
            continue;
        };
        match mask[end..].chars().find(|c| !c.is_whitespace()) {
            // A parenthesis after the name makes this a method, not a variable.
            Some('(') => continue,
            // C-style array declarator: `double delta[]`.
            Some('[') => return TypeDescriptor::Unknown,
            _ => return ty,
        }
    }
    TypeDescriptor::Unknown
}

/// Reads the type-looking token that ends just before `name_start`:
/// an identifier, optionally with a generic argument list or array brackets.
fn type_token_before(mask: &str, name_start: usize) -> Option<String> {
    let mut head = mask[..name_start].trim_end();
    let mut array = false;
    while head.ends_with(']') {
        let open = head.rfind('[')?;
        array = true;
        head = head[..open].trim_end();
    }
    if head.ends_with('>') {
        let mut depth = 0i32;
        let mut open = None;
        for (i, c) in head.char_indices().rev() {
            match c {
                '>' => depth += 1,
                '<' => {
                    depth -= 1;
                    if depth == 0 {
                        open = Some(i);
                        break;
                    }
                }
                _ => {}
            }
        }
        head = head[..open?].trim_end();
    }
    let mut start = head.len();
    for (i, c) in head.char_indices().rev() {
        if is_ident_char(c) {
            start = i;
        } else {
            break;
        }
    }
    if start == head.len() {
        return None;
    }
    let token = &head[start..];
    Some(if array { format!("{token}[]") } else { token.to_string() })
}

/// Maps a declared type name to a descriptor. `None` means the token cannot
/// declare anything (a keyword like `return`), so the caller keeps searching.
fn type_from_name(name: &str) -> Option<TypeDescriptor> {
    let ty = match name {
        "boolean" => TypeDescriptor::Primitive(PrimitiveType::Boolean),
        "byte" => TypeDescriptor::Primitive(PrimitiveType::Byte),
        "short" => TypeDescriptor::Primitive(PrimitiveType::Short),
        "int" => TypeDescriptor::Primitive(PrimitiveType::Int),
        "long" => TypeDescriptor::Primitive(PrimitiveType::Long),
        "char" => TypeDescriptor::Primitive(PrimitiveType::Char),
        "float" => TypeDescriptor::Primitive(PrimitiveType::Float),
        "double" => TypeDescriptor::Primitive(PrimitiveType::Double),
        // `var` declares, but the initializer's type is out of reach here.
        "var" => TypeDescriptor::Unknown,
        "String" => TypeDescriptor::class("java.lang.String"),
        "CharSequence" => TypeDescriptor::class("java.lang.CharSequence"),
        "Object" => TypeDescriptor::class("java.lang.Object"),
        "Boolean" => TypeDescriptor::class("java.lang.Boolean"),
        "Byte" => TypeDescriptor::class("java.lang.Byte"),
        "Short" => TypeDescriptor::class("java.lang.Short"),
        "Integer" => TypeDescriptor::class("java.lang.Integer"),
        "Long" => TypeDescriptor::class("java.lang.Long"),
        "Character" => TypeDescriptor::class("java.lang.Character"),
        "Float" => TypeDescriptor::class("java.lang.Float"),
        "Double" => TypeDescriptor::class("java.lang.Double"),
        "Supplier" => TypeDescriptor::class("java.util.function.Supplier"),
        _ if name.ends_with("[]") => TypeDescriptor::Unknown,
        _ if is_keyword(name) => return None,
        _ if is_identifier(name) => TypeDescriptor::Class(name.to_string()),
        _ => return None,
    };
    Some(ty)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn resolve(src: &str, expr: &str) -> TypeDescriptor {
        let start = src.rfind(expr).unwrap_or_else(|| panic!("{expr} not in fixture"));
        LexicalTypeOracle.resolve_type(src, TextRange::new(start, start + expr.len()))
    }

    #[test]
    fn string_literals_and_concatenations() {
        assert!(resolve(r#"f("msg")"#, r#""msg""#).is_string());
        assert!(resolve(r#"f("a" + x)"#, r#""a" + x"#).is_string());
        assert!(resolve("f(x + \" units\")", "x + \" units\"").is_string());
        assert!(resolve("f(\"\"\"\n block\n \"\"\")", "\"\"\"\n block\n \"\"\"").is_string());
    }

    #[test]
    fn numeric_literal_suffixes() {
        assert_eq!(resolve("f(1)", "1"), TypeDescriptor::Primitive(PrimitiveType::Int));
        assert_eq!(resolve("f(12L)", "12L"), TypeDescriptor::Primitive(PrimitiveType::Long));
        assert_eq!(resolve("f(0.5)", "0.5"), TypeDescriptor::Primitive(PrimitiveType::Double));
        assert_eq!(resolve("f(0.5d)", "0.5d"), TypeDescriptor::Primitive(PrimitiveType::Double));
        assert_eq!(resolve("f(2f)", "2f"), TypeDescriptor::Primitive(PrimitiveType::Float));
        assert_eq!(resolve("f(1e-3)", "1e-3"), TypeDescriptor::Primitive(PrimitiveType::Double));
        assert_eq!(resolve("f(1_000)", "1_000"), TypeDescriptor::Primitive(PrimitiveType::Int));
        assert_eq!(resolve("f(0xFF)", "0xFF"), TypeDescriptor::Primitive(PrimitiveType::Int));
    }

    #[test]
    fn negated_values_keep_their_numeric_type() {
        assert_eq!(resolve("f(-0.25)", "-0.25"), TypeDescriptor::Primitive(PrimitiveType::Double));
        let src = "double delta = 0.1; f(-delta);";
        assert_eq!(resolve(src, "-delta"), TypeDescriptor::Primitive(PrimitiveType::Double));
    }

    #[test]
    fn local_declarations_resolve_backwards() {
        let src = "void m() { double delta = 0.1; use(delta); }";
        assert_eq!(resolve(src, "delta"), TypeDescriptor::Primitive(PrimitiveType::Double));
        let src = "void m(float eps) { use(eps); }";
        assert_eq!(resolve(src, "eps"), TypeDescriptor::Primitive(PrimitiveType::Float));
        let src = "void m() { final String label = name(); use(label); }";
        assert!(resolve(src, "label").is_string());
    }

    #[test]
    fn field_constants_resolve_backwards() {
        let src = "class T { private static final double DELTA = 1e-6; void m() { use(DELTA); } }";
        assert_eq!(resolve(src, "DELTA"), TypeDescriptor::Primitive(PrimitiveType::Double));
    }

    #[test]
    fn uses_between_declaration_and_call_are_skipped() {
        let src = "void m() { double d = 0.5; log(d); use(d); }";
        assert_eq!(resolve(src, "d"), TypeDescriptor::Primitive(PrimitiveType::Double));
    }

    #[test]
    fn declarations_in_comments_do_not_count() {
        let src = "void m() { // double ghost = 1.0;\n use(ghost); }";
        assert_eq!(resolve(src, "ghost"), TypeDescriptor::Unknown);
    }

    #[test]
    fn generic_declarations_use_the_base_type() {
        let src = "void m(Supplier<String> message) { use(message); }";
        assert!(resolve(src, "message").is_supplier());
    }

    #[test]
    fn array_declarations_are_not_their_element_type() {
        let src = "void m(double[] samples) { use(samples); }";
        assert_eq!(resolve(src, "samples"), TypeDescriptor::Unknown);
    }

    #[test]
    fn boxed_declarations_resolve_to_java_lang() {
        let src = "void m() { Double boxed = reading(); use(boxed); }";
        assert_eq!(resolve(src, "boxed"), TypeDescriptor::class("java.lang.Double"));
    }

    #[test]
    fn casts_win_over_operand_types() {
        assert_eq!(
            resolve("f((double) ticks)", "(double) ticks"),
            TypeDescriptor::Primitive(PrimitiveType::Double)
        );
        assert!(resolve("f((String) o)", "(String) o").is_string());
    }

    #[test]
    fn parenthesized_groups_are_transparent() {
        assert_eq!(resolve("f((0.5))", "(0.5)"), TypeDescriptor::Primitive(PrimitiveType::Double));
    }

    #[test]
    fn zero_arg_lambdas_are_suppliers() {
        assert!(resolve("f(() -> \"boom\")", "() -> \"boom\"").is_supplier());
        assert_eq!(resolve("f(x -> x)", "x -> x"), TypeDescriptor::Unknown);
    }

    #[test]
    fn factory_calls_have_known_types() {
        assert!(resolve("f(String.format(\"%d\", n))", "String.format(\"%d\", n)").is_string());
        assert!(resolve("f(label.toString())", "label.toString()").is_string());
        assert_eq!(
            resolve("f(Double.valueOf(s))", "Double.valueOf(s)"),
            TypeDescriptor::class("java.lang.Double")
        );
        assert_eq!(
            resolve("f(Double.parseDouble(s))", "Double.parseDouble(s)"),
            TypeDescriptor::Primitive(PrimitiveType::Double)
        );
    }

    #[test]
    fn arithmetic_spreads_floating_point() {
        let src = "double base = 1.0; f(base * 2);";
        assert!(resolve(src, "base * 2").is_floating_point());
        assert!(resolve("f(x * 0.5)", "x * 0.5").is_floating_point());
        assert_eq!(resolve("f(a * b)", "a * b"), TypeDescriptor::Unknown);
    }

    #[test]
    fn unknown_identifiers_and_garbage_stay_unknown() {
        assert_eq!(resolve("use(mystery)", "mystery"), TypeDescriptor::Unknown);
        assert_eq!(resolve("f(a.b.c())", "a.b.c()"), TypeDescriptor::Unknown);
        assert_eq!(resolve("f(null)", "null"), TypeDescriptor::Unknown);
        let out_of_bounds = LexicalTypeOracle.resolve_type("ab", TextRange::new(1, 9));
        assert_eq!(out_of_bounds, TypeDescriptor::Unknown);
    }

    #[test]
    fn unrelated_class_declarations_are_not_floating() {
        let src = "void m() { Duration delta = Duration.ZERO; use(delta); }";
        let ty = resolve(src, "delta");
        assert_eq!(ty, TypeDescriptor::Class("Duration".to_string()));
        assert!(!ty.is_floating_point());
    }
}
