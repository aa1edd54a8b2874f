//! Flat Java token scanner.
//!
//! The scanner skips whitespace and comments, keeps string and character
//! literals as single opaque tokens (text blocks included), and emits every
//! other character as a one-character symbol. That is enough structure for
//! call discovery and import parsing without a real parser.

use lathe_core::TextRange;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TokenKind<'a> {
    /// Identifier or keyword.
    Ident(&'a str),
    /// Any single non-literal punctuation or operator character.
    Symbol(char),
    /// String literal, including `"""` text blocks.
    Str,
    /// Character literal.
    Char,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Token<'a> {
    pub kind: TokenKind<'a>,
    pub range: TextRange,
}

pub fn tokenize(text: &str) -> Vec<Token<'_>> {
    let mut scanner = Scanner { text, pos: 0 };
    let mut tokens = Vec::new();
    while let Some(token) = scanner.next_token() {
        tokens.push(token);
    }
    tokens
}

pub fn is_ident_start(c: char) -> bool {
    c == '_' || c == '$' || c.is_alphabetic()
}

pub fn is_ident_char(c: char) -> bool {
    is_ident_start(c) || c.is_numeric()
}

/// Java reserved words. Contextual keywords (`var`, `yield`, `record`) are
/// legal identifiers and deliberately absent.
pub fn is_keyword(word: &str) -> bool {
    matches!(
        word,
        "abstract"
            | "assert"
            | "boolean"
            | "break"
            | "byte"
            | "case"
            | "catch"
            | "char"
            | "class"
            | "const"
            | "continue"
            | "default"
            | "do"
            | "double"
            | "else"
            | "enum"
            | "extends"
            | "final"
            | "finally"
            | "float"
            | "for"
            | "goto"
            | "if"
            | "implements"
            | "import"
            | "instanceof"
            | "int"
            | "interface"
            | "long"
            | "native"
            | "new"
            | "package"
            | "private"
            | "protected"
            | "public"
            | "return"
            | "short"
            | "static"
            | "strictfp"
            | "super"
            | "switch"
            | "synchronized"
            | "this"
            | "throw"
            | "throws"
            | "transient"
            | "try"
            | "void"
            | "volatile"
            | "while"
    )
}

struct Scanner<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> Scanner<'a> {
    fn rest(&self) -> &'a str {
        &self.text[self.pos..]
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn bump(&mut self) {
        if let Some(c) = self.peek() {
            self.pos += c.len_utf8();
        }
    }

    fn next_token(&mut self) -> Option<Token<'a>> {
        self.skip_trivia();
        let start = self.pos;
        let c = self.peek()?;
        let kind = if is_ident_start(c) {
            self.bump();
            while self.peek().is_some_and(is_ident_char) {
                self.bump();
            }
            TokenKind::Ident(&self.text[start..self.pos])
        } else if c == '"' {
            self.consume_string();
            TokenKind::Str
        } else if c == '\'' {
            self.consume_char_literal();
            TokenKind::Char
        } else {
            self.bump();
            TokenKind::Symbol(c)
        };
        Some(Token { kind, range: TextRange::new(start, self.pos) })
    }

    fn skip_trivia(&mut self) {
        loop {
            match self.peek() {
                Some(c) if c.is_whitespace() => self.bump(),
                Some('/') if self.rest().starts_with("//") => {
                    match self.rest().find('\n') {
                        Some(n) => self.pos += n + 1,
                        None => self.pos = self.text.len(),
                    }
                }
                Some('/') if self.rest().starts_with("/*") => {
                    // An unterminated block comment swallows the rest of the file.
                    match self.rest()[2..].find("*/") {
                        Some(n) => self.pos += n + 4,
                        None => self.pos = self.text.len(),
                    }
                }
                _ => return,
            }
        }
    }

    fn consume_string(&mut self) {
        if self.rest().starts_with("\"\"\"") {
            self.pos += 3;
            while self.pos < self.text.len() {
                if self.rest().starts_with("\"\"\"") {
                    self.pos += 3;
                    return;
                }
                if self.rest().starts_with('\\') {
                    self.bump();
                }
                self.bump();
            }
            return;
        }
        self.bump();
        while let Some(c) = self.peek() {
            match c {
                '\\' => {
                    self.bump();
                    self.bump();
                }
                '"' => {
                    self.bump();
                    return;
                }
                // Unterminated literal; recover at the line break.
                '\n' => return,
                _ => self.bump(),
            }
        }
    }

    fn consume_char_literal(&mut self) {
        self.bump();
        while let Some(c) = self.peek() {
            match c {
                '\\' => {
                    self.bump();
                    self.bump();
                }
                '\'' => {
                    self.bump();
                    return;
                }
                '\n' => return,
                _ => self.bump(),
            }
        }
    }
}

/// Returns a same-length copy of `text` with comments and literal contents
/// replaced by spaces.
///
/// Byte offsets into the mask line up with the original text, so a range
/// found in one is valid in the other. Newlines inside masked regions are
/// preserved.
pub fn masked(text: &str) -> String {
    #[derive(Clone, Copy, PartialEq)]
    enum Mode {
        Code,
        LineComment,
        BlockComment,
        Str,
        TextBlock,
        CharLit,
    }

    let mut out = String::with_capacity(text.len());
    let mut mode = Mode::Code;
    let mut chars = text.char_indices().peekable();

    while let Some((at, c)) = chars.next() {
        match mode {
            Mode::Code => match c {
                '/' if text[at + 1..].starts_with('/') => {
                    mode = Mode::LineComment;
                    blank(&mut out, c);
                }
                '/' if text[at + 1..].starts_with('*') => {
                    mode = Mode::BlockComment;
                    blank(&mut out, c);
                }
                '"' if text[at..].starts_with("\"\"\"") => {
                    mode = Mode::TextBlock;
                    blank(&mut out, c);
                    for _ in 0..2 {
                        if let Some((_, q)) = chars.next() {
                            blank(&mut out, q);
                        }
                    }
                }
                '"' => {
                    mode = Mode::Str;
                    blank(&mut out, c);
                }
                '\'' => {
                    mode = Mode::CharLit;
                    blank(&mut out, c);
                }
                _ => out.push(c),
            },
            Mode::LineComment => {
                if c == '\n' {
                    out.push('\n');
                    mode = Mode::Code;
                } else {
                    blank(&mut out, c);
                }
            }
            Mode::BlockComment => {
                if c == '*' && text[at + 1..].starts_with('/') {
                    blank(&mut out, c);
                    if let Some((_, slash)) = chars.next() {
                        blank(&mut out, slash);
                    }
                    mode = Mode::Code;
                } else if c == '\n' {
                    out.push('\n');
                } else {
                    blank(&mut out, c);
                }
            }
            Mode::Str => match c {
                '\\' => {
                    blank(&mut out, c);
                    if let Some((_, escaped)) = chars.next() {
                        blank(&mut out, escaped);
                    }
                }
                '"' => {
                    blank(&mut out, c);
                    mode = Mode::Code;
                }
                '\n' => {
                    out.push('\n');
                    mode = Mode::Code;
                }
                _ => blank(&mut out, c),
            },
            Mode::TextBlock => match c {
                '\\' => {
                    blank(&mut out, c);
                    if let Some((_, escaped)) = chars.next() {
                        blank(&mut out, escaped);
                    }
                }
                '"' if text[at..].starts_with("\"\"\"") => {
                    blank(&mut out, c);
                    for _ in 0..2 {
                        if let Some((_, q)) = chars.next() {
                            blank(&mut out, q);
                        }
                    }
                    mode = Mode::Code;
                }
                '\n' => out.push('\n'),
                _ => blank(&mut out, c),
            },
            Mode::CharLit => match c {
                '\\' => {
                    blank(&mut out, c);
                    if let Some((_, escaped)) = chars.next() {
                        blank(&mut out, escaped);
                    }
                }
                '\'' => {
                    blank(&mut out, c);
                    mode = Mode::Code;
                }
                '\n' => {
                    out.push('\n');
                    mode = Mode::Code;
                }
                _ => blank(&mut out, c),
            },
        }
    }
    out
}

fn blank(out: &mut String, c: char) {
    for _ in 0..c.len_utf8() {
        out.push(' ');
    }
}
