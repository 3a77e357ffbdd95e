//! The minnow scanner/lexer.
//!
//! Converts source text into a stream of tokens that the parser consumes.
//! Whitespace is returned as `WhitespaceTrivia` and unknown characters as
//! `BadToken`; the parser filters both out.

use crate::token::TokenInfo;
use minnow_ast::syntax_kind::SyntaxKind;
use minnow_core::text::TextSpan;
use minnow_core::Value;
use minnow_diagnostics::DiagnosticBag;

/// The scanner converts minnow source text into tokens.
pub struct Scanner<'a> {
    /// The source text being scanned.
    text: &'a str,
    /// Current byte position in the text.
    pos: usize,
    /// Start of the current token.
    token_start: usize,
    /// The current token kind.
    token: SyntaxKind,
    /// Decoded value of the current literal token.
    token_value: Option<Value>,
    /// Accumulated diagnostics.
    diagnostics: DiagnosticBag,
}

impl<'a> Scanner<'a> {
    /// Create a new scanner for the given source text.
    pub fn new(text: &'a str) -> Self {
        Self {
            text,
            pos: 0,
            token_start: 0,
            token: SyntaxKind::BadToken,
            token_value: None,
            diagnostics: DiagnosticBag::new(),
        }
    }

    /// Get the current token kind.
    #[inline]
    pub fn token(&self) -> SyntaxKind {
        self.token
    }

    /// Get the source text of the current token.
    #[inline]
    pub fn token_text(&self) -> &'a str {
        &self.text[self.token_start..self.pos]
    }

    /// Get the decoded value of the current literal token.
    #[inline]
    pub fn token_value(&self) -> Option<&Value> {
        self.token_value.as_ref()
    }

    /// Get the start position of the current token.
    #[inline]
    pub fn token_start(&self) -> usize {
        self.token_start
    }

    /// Get the current position (end of current token).
    #[inline]
    pub fn token_end(&self) -> usize {
        self.pos
    }

    /// Get the accumulated diagnostics.
    pub fn diagnostics(&self) -> &DiagnosticBag {
        &self.diagnostics
    }

    /// Take the accumulated diagnostics, leaving an empty bag.
    pub fn take_diagnostics(&mut self) -> DiagnosticBag {
        std::mem::take(&mut self.diagnostics)
    }

    /// Get a TokenInfo for the current token.
    pub fn token_info(&self) -> TokenInfo {
        TokenInfo {
            kind: self.token,
            pos: self.token_start as u32,
            end: self.pos as u32,
            text: self.token_text().to_string(),
            value: self.token_value.clone(),
        }
    }

    // ========================================================================
    // Core scanning
    // ========================================================================

    /// Look at the character at the current position without advancing.
    #[inline]
    fn current_char(&self) -> Option<char> {
        self.text[self.pos..].chars().next()
    }

    /// Look at the character after the current one.
    #[inline]
    fn peek_char(&self) -> Option<char> {
        let mut chars = self.text[self.pos..].chars();
        chars.next();
        chars.next()
    }

    /// Whether we've reached the end of the text.
    #[inline]
    fn is_eof(&self) -> bool {
        self.pos >= self.text.len()
    }

    /// Advance past `ch`, which must be the current character.
    #[inline]
    fn bump(&mut self, ch: char) {
        self.pos += ch.len_utf8();
    }

    /// Scan the next token and return its kind.
    pub fn scan(&mut self) -> SyntaxKind {
        self.token_value = None;
        self.token_start = self.pos;

        let Some(ch) = self.current_char() else {
            self.token = SyntaxKind::EndOfFileToken;
            return self.token;
        };

        self.token = match ch {
            '(' => self.single(ch, SyntaxKind::OpenParenToken),
            ')' => self.single(ch, SyntaxKind::CloseParenToken),
            '{' => self.single(ch, SyntaxKind::OpenBraceToken),
            '}' => self.single(ch, SyntaxKind::CloseBraceToken),
            ',' => self.single(ch, SyntaxKind::CommaToken),
            ':' => self.single(ch, SyntaxKind::ColonToken),
            '+' => self.single(ch, SyntaxKind::PlusToken),
            '-' => self.single(ch, SyntaxKind::MinusToken),
            '*' => self.single(ch, SyntaxKind::AsteriskToken),
            '/' => self.single(ch, SyntaxKind::SlashToken),

            '=' => self.with_equals(SyntaxKind::EqualsToken, SyntaxKind::EqualsEqualsToken),
            '!' => self.with_equals(SyntaxKind::ExclamationToken, SyntaxKind::ExclamationEqualsToken),
            '<' => self.with_equals(SyntaxKind::LessThanToken, SyntaxKind::LessThanEqualsToken),
            '>' => self.with_equals(SyntaxKind::GreaterThanToken, SyntaxKind::GreaterThanEqualsToken),
            '&' => self.doubled('&', SyntaxKind::AmpersandAmpersandToken),
            '|' => self.doubled('|', SyntaxKind::BarBarToken),

            '"' => self.scan_string_literal(),
            '0'..='9' => self.scan_number(),
            c if c.is_whitespace() => self.scan_whitespace(),
            c if is_identifier_start(c) => self.scan_identifier(),

            _ => self.bad_character(ch),
        };

        self.token
    }

    // ========================================================================
    // Token-specific scanning methods
    // ========================================================================

    fn single(&mut self, ch: char, kind: SyntaxKind) -> SyntaxKind {
        self.bump(ch);
        kind
    }

    /// `=`, `!`, `<` and `>` optionally followed by `=`.
    fn with_equals(&mut self, plain: SyntaxKind, with_equals: SyntaxKind) -> SyntaxKind {
        if self.peek_char() == Some('=') {
            self.pos += 2;
            with_equals
        } else {
            self.pos += 1;
            plain
        }
    }

    /// `&&` and `||`; a lone `&` or `|` is a bad character.
    fn doubled(&mut self, ch: char, kind: SyntaxKind) -> SyntaxKind {
        if self.peek_char() == Some(ch) {
            self.pos += 2;
            kind
        } else {
            self.bad_character(ch)
        }
    }

    fn bad_character(&mut self, ch: char) -> SyntaxKind {
        self.diagnostics.report_bad_character(self.pos as u32, ch);
        self.bump(ch);
        SyntaxKind::BadToken
    }

    fn scan_whitespace(&mut self) -> SyntaxKind {
        while let Some(ch) = self.current_char() {
            if !ch.is_whitespace() {
                break;
            }
            self.bump(ch);
        }
        SyntaxKind::WhitespaceTrivia
    }

    fn scan_string_literal(&mut self) -> SyntaxKind {
        self.pos += 1; // skip opening quote
        let mut result = String::new();
        loop {
            match self.current_char() {
                None | Some('\r') | Some('\n') => {
                    let span = TextSpan::new(self.token_start as u32, 1);
                    self.diagnostics.report_unterminated_string(span);
                    break;
                }
                Some('"') => {
                    self.pos += 1;
                    if self.current_char() == Some('"') {
                        // Doubled quote is an escaped quote
                        result.push('"');
                        self.pos += 1;
                    } else {
                        break;
                    }
                }
                Some(ch) => {
                    result.push(ch);
                    self.bump(ch);
                }
            }
        }
        self.token_value = Some(Value::String(result));
        SyntaxKind::StringLiteral
    }

    fn scan_number(&mut self) -> SyntaxKind {
        while let Some(ch) = self.current_char() {
            if !ch.is_ascii_digit() {
                break;
            }
            self.pos += 1;
        }

        let text = self.token_text();
        let value = match text.parse::<i64>() {
            Ok(value) => value,
            Err(_) => {
                let span = TextSpan::from_bounds(self.token_start as u32, self.pos as u32);
                self.diagnostics.report_invalid_number(span, text, "int");
                0
            }
        };
        self.token_value = Some(Value::Int(value));
        SyntaxKind::NumericLiteral
    }

    fn scan_identifier(&mut self) -> SyntaxKind {
        while let Some(ch) = self.current_char() {
            if !is_identifier_part(ch) {
                break;
            }
            self.bump(ch);
        }

        // Check if it's a keyword
        SyntaxKind::from_keyword(self.token_text()).unwrap_or(SyntaxKind::Identifier)
    }
}

/// Scan the whole text, returning every token up to and including end of file.
pub fn tokenize(text: &str) -> (Vec<TokenInfo>, DiagnosticBag) {
    let mut scanner = Scanner::new(text);
    let mut tokens = Vec::new();
    loop {
        let kind = scanner.scan();
        tokens.push(scanner.token_info());
        if kind == SyntaxKind::EndOfFileToken {
            break;
        }
    }
    (tokens, scanner.take_diagnostics())
}

/// Check if a character can start an identifier.
fn is_identifier_start(ch: char) -> bool {
    ch == '_' || ch.is_ascii_alphabetic() || (ch as u32 > 0x7F && unicode_xid::UnicodeXID::is_xid_start(ch))
}

/// Check if a character can be part of an identifier.
fn is_identifier_part(ch: char) -> bool {
    ch == '_' || ch.is_ascii_alphanumeric() || (ch as u32 > 0x7F && unicode_xid::UnicodeXID::is_xid_continue(ch))
}
