//! Import-block parsing over Java file headers.
//!
//! The parser walks the token stream past an optional `package` declaration
//! and collects the contiguous run of `import` declarations. Each declaration
//! remembers the byte span of its full source line so callers can delete or
//! keep it verbatim, trailing comment and all.

use lathe_core::TextRange;

use crate::scanner::{tokenize, TokenKind};

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ImportDecl {
    pub is_static: bool,
    /// Dotted path as written, e.g. `org.junit.jupiter.api.Assertions` or
    /// `org.assertj.core.api.Assertions.assertThat` or `java.util.*`.
    pub path: String,
    /// Span of the declaration's line(s), trailing newline included.
    pub line_range: TextRange,
}

impl ImportDecl {
    pub fn is_wildcard(&self) -> bool {
        self.path.ends_with(".*")
    }

    /// Final path segment: the member or type name, `*` for wildcards.
    pub fn last_segment(&self) -> &str {
        self.path.rsplit('.').next().unwrap_or(&self.path)
    }

    /// Everything before the final segment; empty for single-segment paths.
    pub fn qualifier(&self) -> &str {
        match self.path.rfind('.') {
            Some(dot) => &self.path[..dot],
            None => "",
        }
    }

    /// Renders the declaration as a fresh source line.
    pub fn render(path: &str, is_static: bool) -> String {
        if is_static {
            format!("import static {path};\n")
        } else {
            format!("import {path};\n")
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ImportBlock {
    /// Span from the first import line through the last one. Zero-length at
    /// the would-be insertion point when the file has no imports.
    pub range: TextRange,
    pub imports: Vec<ImportDecl>,
}

impl ImportBlock {
    pub fn is_empty(&self) -> bool {
        self.imports.is_empty()
    }

    /// Offset where a new import line can be inserted: right after the block,
    /// or at the anchor position for files without imports.
    pub fn insertion_offset(&self) -> usize {
        self.range.end
    }

    pub fn find(&self, is_static: bool, path: &str) -> Option<&ImportDecl> {
        self.imports
            .iter()
            .find(|imp| imp.is_static == is_static && imp.path == path)
    }

    /// True when `member` (a fully qualified static member path) is covered
    /// by an exact static import or a static wildcard over its owner type.
    pub fn covers_static_member(&self, member: &str) -> bool {
        let owner_star = match member.rfind('.') {
            Some(dot) => format!("{}.*", &member[..dot]),
            None => return false,
        };
        self.imports
            .iter()
            .any(|imp| imp.is_static && (imp.path == member || imp.path == owner_star))
    }
}

/// Parses the import block of `text`.
///
/// Malformed headers are handled by stopping at the first declaration that
/// does not scan as an import; everything collected so far is returned.
pub fn parse_imports(text: &str) -> ImportBlock {
    let tokens = tokenize(text);
    let mut idx = 0;
    // Anchor for files without imports: after the package line, or at the
    // start of the first declaration's line (past any header comment).
    let mut anchor = 0usize;

    if matches!(tokens.first().map(|t| t.kind), Some(TokenKind::Ident("package"))) {
        while idx < tokens.len() && tokens[idx].kind != TokenKind::Symbol(';') {
            idx += 1;
        }
        if idx < tokens.len() {
            anchor = line_end(text, tokens[idx].range.end);
            idx += 1;
        }
    } else if let Some(first) = tokens.first() {
        anchor = line_start(text, first.range.start);
    }

    let mut imports = Vec::new();
    while idx < tokens.len() {
        if tokens[idx].kind != TokenKind::Ident("import") {
            break;
        }
        let keyword_start = tokens[idx].range.start;
        idx += 1;
        let is_static = if matches!(tokens.get(idx).map(|t| t.kind), Some(TokenKind::Ident("static"))) {
            idx += 1;
            true
        } else {
            false
        };
        let mut path = String::new();
        let mut terminated = false;
        while idx < tokens.len() {
            match tokens[idx].kind {
                TokenKind::Ident(segment) => path.push_str(segment),
                TokenKind::Symbol('.') => path.push('.'),
                TokenKind::Symbol('*') => path.push('*'),
                TokenKind::Symbol(';') => {
                    terminated = true;
                    idx += 1;
                    break;
                }
                _ => break,
            }
            idx += 1;
        }
        if !terminated || path.is_empty() {
            break;
        }
        let line_range = TextRange::new(
            line_start(text, keyword_start),
            line_end(text, tokens[idx - 1].range.end),
        );
        imports.push(ImportDecl { is_static, path, line_range });
    }

    let range = match (imports.first(), imports.last()) {
        (Some(first), Some(last)) => TextRange::new(first.line_range.start, last.line_range.end),
        _ => TextRange::empty(anchor),
    };
    ImportBlock { range, imports }
}

fn line_start(text: &str, offset: usize) -> usize {
    text[..offset].rfind('\n').map(|at| at + 1).unwrap_or(0)
}

fn line_end(text: &str, offset: usize) -> usize {
    text[offset..]
        .find('\n')
        .map(|at| offset + at + 1)
        .unwrap_or(text.len())
}
