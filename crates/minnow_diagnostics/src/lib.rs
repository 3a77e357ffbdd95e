//! minnow_diagnostics: Diagnostic messages and error reporting infrastructure.
//!
//! Every problem found in a user program, from a stray character to an
//! argument of the wrong type, becomes a [`Diagnostic`]. Diagnostics carry a
//! span into the fragment's source text, a taxonomy kind, a stable code and
//! the rendered message. They are purely additive: a [`DiagnosticBag`] can
//! only grow.

use minnow_core::text::TextSpan;
use serde::Serialize;
use std::fmt;

/// The taxonomy of recoverable problems.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum DiagnosticKind {
    // Lexical and syntactic
    BadCharacter,
    UnterminatedString,
    InvalidNumber,
    UnexpectedToken,
    NestingTooDeep,
    // Semantic
    UndefinedName,
    VariableAlreadyDeclared,
    CannotAssign,
    CannotConvert,
    UndefinedOperator,
    UndefinedFunction,
    WrongArgumentCount,
    WrongArgumentType,
    ExpressionMustHaveValue,
}

impl DiagnosticKind {
    /// Whether this kind is reported before binding (scanner or parser).
    pub fn is_syntactic(self) -> bool {
        matches!(
            self,
            DiagnosticKind::BadCharacter
                | DiagnosticKind::UnterminatedString
                | DiagnosticKind::InvalidNumber
                | DiagnosticKind::UnexpectedToken
                | DiagnosticKind::NestingTooDeep
        )
    }
}

/// A diagnostic message template with a code and kind.
#[derive(Debug, Clone)]
pub struct DiagnosticMessage {
    /// The diagnostic code (e.g., 1002, 2001).
    pub code: u32,
    /// The taxonomy kind of this diagnostic.
    pub kind: DiagnosticKind,
    /// The message template string. May contain `{0}`, `{1}`, etc. placeholders.
    pub message: &'static str,
}

/// A realized diagnostic with location information and resolved message text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    /// The source text span where this diagnostic occurred.
    pub span: TextSpan,
    /// The taxonomy kind.
    pub kind: DiagnosticKind,
    /// The diagnostic code.
    pub code: u32,
    /// The resolved message text.
    #[serde(rename = "message")]
    pub message_text: String,
}

impl Diagnostic {
    /// Create a new diagnostic at `span` from a message template.
    pub fn new(span: TextSpan, message: &DiagnosticMessage, args: &[&str]) -> Self {
        Self {
            span,
            kind: message.kind,
            code: message.code,
            message_text: format_message(message.message, args),
        }
    }

    /// The code as printed to users, e.g. `MN2001`.
    pub fn code_text(&self) -> String {
        format!("MN{}", self.code)
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "error MN{}: {}", self.code, self.message_text)
    }
}

/// Format a diagnostic message template by replacing `{0}`, `{1}`, etc. with arguments.
pub fn format_message(template: &str, args: &[&str]) -> String {
    let mut result = template.to_string();
    for (i, arg) in args.iter().enumerate() {
        result = result.replace(&format!("{{{}}}", i), arg);
    }
    result
}

/// An append-only bag of diagnostics accumulated by one pipeline stage.
#[derive(Debug, Clone, Default)]
pub struct DiagnosticBag {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticBag {
    pub fn new() -> Self {
        Self {
            diagnostics: Vec::new(),
        }
    }

    pub fn add(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    pub fn extend(&mut self, other: DiagnosticBag) {
        self.diagnostics.extend(other.diagnostics);
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter()
    }

    fn report(&mut self, span: TextSpan, message: &DiagnosticMessage, args: &[&str]) {
        self.add(Diagnostic::new(span, message, args));
    }

    // ========================================================================
    // Lexical and syntactic
    // ========================================================================

    pub fn report_bad_character(&mut self, position: u32, character: char) {
        let span = TextSpan::new(position, character.len_utf8() as u32);
        let text = character.to_string();
        self.report(span, &messages::BAD_CHARACTER, &[&text]);
    }

    pub fn report_unterminated_string(&mut self, span: TextSpan) {
        self.report(span, &messages::UNTERMINATED_STRING_LITERAL, &[]);
    }

    pub fn report_invalid_number(&mut self, span: TextSpan, text: &str, type_name: &str) {
        self.report(span, &messages::INVALID_NUMBER, &[text, type_name]);
    }

    pub fn report_unexpected_token(&mut self, span: TextSpan, actual: &str, expected: &str) {
        self.report(span, &messages::UNEXPECTED_TOKEN, &[actual, expected]);
    }

    pub fn report_nesting_too_deep(&mut self, span: TextSpan, limit: u32) {
        let limit = limit.to_string();
        self.report(span, &messages::NESTING_TOO_DEEP, &[&limit]);
    }

    // ========================================================================
    // Semantic
    // ========================================================================

    pub fn report_undefined_name(&mut self, span: TextSpan, name: &str) {
        self.report(span, &messages::UNDEFINED_NAME, &[name]);
    }

    pub fn report_variable_already_declared(&mut self, span: TextSpan, name: &str) {
        self.report(span, &messages::VARIABLE_ALREADY_DECLARED, &[name]);
    }

    pub fn report_cannot_assign(&mut self, span: TextSpan, name: &str) {
        self.report(span, &messages::CANNOT_ASSIGN, &[name]);
    }

    pub fn report_cannot_convert(&mut self, span: TextSpan, from: &str, to: &str) {
        self.report(span, &messages::CANNOT_CONVERT, &[from, to]);
    }

    pub fn report_undefined_unary_operator(&mut self, span: TextSpan, operator: &str, operand: &str) {
        self.report(span, &messages::UNDEFINED_UNARY_OPERATOR, &[operator, operand]);
    }

    pub fn report_undefined_binary_operator(
        &mut self,
        span: TextSpan,
        operator: &str,
        left: &str,
        right: &str,
    ) {
        self.report(span, &messages::UNDEFINED_BINARY_OPERATOR, &[operator, left, right]);
    }

    pub fn report_undefined_function(&mut self, span: TextSpan, name: &str) {
        self.report(span, &messages::UNDEFINED_FUNCTION, &[name]);
    }

    pub fn report_wrong_argument_count(&mut self, span: TextSpan, name: &str, expected: usize, actual: usize) {
        let expected = expected.to_string();
        let actual = actual.to_string();
        self.report(span, &messages::WRONG_ARGUMENT_COUNT, &[name, &expected, &actual]);
    }

    pub fn report_wrong_argument_type(&mut self, span: TextSpan, parameter: &str, expected: &str, actual: &str) {
        self.report(span, &messages::WRONG_ARGUMENT_TYPE, &[parameter, expected, actual]);
    }

    pub fn report_expression_must_have_value(&mut self, span: TextSpan) {
        self.report(span, &messages::EXPRESSION_MUST_HAVE_VALUE, &[]);
    }
}

impl IntoIterator for DiagnosticBag {
    type Item = Diagnostic;
    type IntoIter = std::vec::IntoIter<Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.diagnostics.into_iter()
    }
}

// ============================================================================
// Diagnostic Messages
// ============================================================================

pub mod messages {
    use super::*;

    macro_rules! diag {
        ($code:expr, $kind:ident, $msg:expr) => {
            DiagnosticMessage { code: $code, kind: DiagnosticKind::$kind, message: $msg }
        };
    }

    // ========================================================================
    // Scanner and parser errors (1000-1099)
    // ========================================================================
    pub const BAD_CHARACTER: DiagnosticMessage = diag!(1001, BadCharacter, "Bad character input: '{0}'.");
    pub const UNTERMINATED_STRING_LITERAL: DiagnosticMessage = diag!(1002, UnterminatedString, "Unterminated string literal.");
    pub const INVALID_NUMBER: DiagnosticMessage = diag!(1003, InvalidNumber, "The number {0} isn't a valid {1}.");
    pub const UNEXPECTED_TOKEN: DiagnosticMessage = diag!(1004, UnexpectedToken, "Unexpected token <{0}>, expected <{1}>.");
    pub const NESTING_TOO_DEEP: DiagnosticMessage = diag!(1005, NestingTooDeep, "Code is nested more than {0} levels deep.");

    // ========================================================================
    // Binder errors (2000-2099)
    // ========================================================================
    pub const UNDEFINED_NAME: DiagnosticMessage = diag!(2001, UndefinedName, "Variable '{0}' doesn't exist.");
    pub const VARIABLE_ALREADY_DECLARED: DiagnosticMessage = diag!(2002, VariableAlreadyDeclared, "Variable '{0}' is already declared.");
    pub const CANNOT_ASSIGN: DiagnosticMessage = diag!(2003, CannotAssign, "Variable '{0}' is read-only and cannot be assigned to.");
    pub const CANNOT_CONVERT: DiagnosticMessage = diag!(2004, CannotConvert, "Cannot convert type '{0}' to '{1}'.");
    pub const UNDEFINED_UNARY_OPERATOR: DiagnosticMessage = diag!(2005, UndefinedOperator, "Unary operator '{0}' is not defined for type '{1}'.");
    pub const UNDEFINED_BINARY_OPERATOR: DiagnosticMessage = diag!(2006, UndefinedOperator, "Binary operator '{0}' is not defined for types '{1}' and '{2}'.");
    pub const UNDEFINED_FUNCTION: DiagnosticMessage = diag!(2007, UndefinedFunction, "Function '{0}' doesn't exist.");
    pub const WRONG_ARGUMENT_COUNT: DiagnosticMessage = diag!(2008, WrongArgumentCount, "Function '{0}' requires {1} arguments but was given {2}.");
    pub const WRONG_ARGUMENT_TYPE: DiagnosticMessage = diag!(2009, WrongArgumentType, "Parameter '{0}' requires a value of type '{1}' but was given a value of type '{2}'.");
    pub const EXPRESSION_MUST_HAVE_VALUE: DiagnosticMessage = diag!(2010, ExpressionMustHaveValue, "Expression must have a value.");
}
