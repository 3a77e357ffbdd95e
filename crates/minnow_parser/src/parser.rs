//! The minnow parser implementation.
//!
//! A recursive descent parser with precedence climbing for binary operators.
//! The whole fragment is tokenized up front; whitespace and bad tokens are
//! dropped before parsing starts. A missing token is fabricated with empty
//! text, so every parse yields a complete tree.

use minnow_ast::node::*;
use minnow_ast::syntax_kind::SyntaxKind;
use minnow_core::text::TextSpan;
use minnow_core::Value;
use minnow_diagnostics::DiagnosticBag;
use minnow_scanner::{tokenize, TokenInfo};

use crate::precedence::{get_binary_operator_precedence, get_unary_operator_precedence, OperatorPrecedence};

/// Maximum nesting of statements, expressions and operator chains. Deeper
/// trees would overflow the stack of the parser, binder or evaluator.
pub const MAX_RECURSION_DEPTH: u32 = 200;

/// The parser produces a CompilationUnit from minnow source text.
pub struct Parser {
    tokens: Vec<TokenInfo>,
    position: usize,
    diagnostics: DiagnosticBag,
    recursion_depth: u32,
    /// Set once the nesting limit is hit; the rest of the fragment is skipped.
    abandoned: bool,
}

impl Parser {
    pub fn new(source_text: &str) -> Self {
        let (tokens, scanner_diagnostics) = tokenize(source_text);
        let tokens: Vec<TokenInfo> = tokens
            .into_iter()
            .filter(|t| !matches!(t.kind, SyntaxKind::WhitespaceTrivia | SyntaxKind::BadToken))
            .collect();

        // Scanner diagnostics come first
        let mut diagnostics = DiagnosticBag::new();
        diagnostics.extend(scanner_diagnostics);

        Self {
            tokens,
            position: 0,
            diagnostics,
            recursion_depth: 0,
            abandoned: false,
        }
    }

    /// Parse one statement followed by end of file.
    pub fn parse_compilation_unit(&mut self) -> CompilationUnit {
        let statement = self.parse_statement();
        let end_of_file_token = self.expect_token(SyntaxKind::EndOfFileToken);
        let span = TextSpan::from_bounds(0, end_of_file_token.span().end());
        CompilationUnit {
            data: NodeData::new(SyntaxKind::CompilationUnit, span),
            statement,
            end_of_file_token,
        }
    }

    pub fn take_diagnostics(&mut self) -> DiagnosticBag {
        std::mem::take(&mut self.diagnostics)
    }

    // ========================================================================
    // Token management
    // ========================================================================

    /// The token `offset` positions ahead; clamps to the end-of-file token.
    fn peek(&self, offset: usize) -> &TokenInfo {
        let index = self.position + offset;
        let last = self.tokens.len() - 1;
        &self.tokens[index.min(last)]
    }

    #[inline]
    fn current(&self) -> &TokenInfo {
        self.peek(0)
    }

    #[inline]
    fn current_token(&self) -> SyntaxKind {
        self.current().kind
    }

    fn next_token(&mut self) -> TokenInfo {
        let token = self.current().clone();
        if self.position < self.tokens.len() {
            self.position += 1;
        }
        token
    }

    fn expect_token(&mut self, kind: SyntaxKind) -> Token {
        if self.current_token() == kind {
            return self.next_token().to_token();
        }

        let current = self.current();
        let span = current.span();
        if self.abandoned {
            return Token::new(kind, TextSpan::empty(span.start), "");
        }
        let actual = current.kind.to_string();
        self.diagnostics.report_unexpected_token(span, &actual, &kind.to_string());
        Token::new(kind, TextSpan::empty(span.start), "")
    }

    // ========================================================================
    // Nesting guard
    // ========================================================================

    /// Enter one nesting level. Past the limit this reports once, skips to
    /// end of file and returns false; later missing tokens are not reported.
    fn enter_nesting(&mut self) -> bool {
        if self.recursion_depth < MAX_RECURSION_DEPTH {
            self.recursion_depth += 1;
            return true;
        }

        if !self.abandoned {
            let span = self.current().span();
            self.diagnostics.report_nesting_too_deep(span, MAX_RECURSION_DEPTH);
            self.abandoned = true;
            self.position = self.tokens.len().saturating_sub(1);
        }
        false
    }

    #[inline]
    fn exit_nesting(&mut self) {
        self.recursion_depth -= 1;
    }

    /// Stand-in for an expression that was not parsed.
    fn missing_expression(&self) -> Expression {
        let identifier = Token::new(SyntaxKind::Identifier, TextSpan::empty(self.current().span().start), "");
        Expression::Name(NameExpression {
            data: NodeData::new(SyntaxKind::NameExpression, identifier.span()),
            identifier,
        })
    }

    // ========================================================================
    // Statement parsing
    // ========================================================================

    fn parse_statement(&mut self) -> Statement {
        if !self.enter_nesting() {
            let expression = self.missing_expression();
            return Statement::Expression(ExpressionStatement {
                data: NodeData::new(SyntaxKind::ExpressionStatement, expression.span()),
                expression,
            });
        }

        let statement = match self.current_token() {
            SyntaxKind::OpenBraceToken => Statement::Block(self.parse_block()),
            SyntaxKind::LetKeyword | SyntaxKind::VarKeyword => self.parse_variable_declaration(),
            SyntaxKind::IfKeyword => self.parse_if_statement(),
            SyntaxKind::WhileKeyword => self.parse_while_statement(),
            SyntaxKind::ForKeyword => self.parse_for_statement(),
            _ => self.parse_expression_statement(),
        };
        self.exit_nesting();
        statement
    }

    fn parse_block(&mut self) -> BlockStatement {
        let open_brace_token = self.expect_token(SyntaxKind::OpenBraceToken);
        let mut statements = Vec::new();

        while self.current_token() != SyntaxKind::EndOfFileToken
            && self.current_token() != SyntaxKind::CloseBraceToken
        {
            let saved_pos = self.position;
            statements.push(self.parse_statement());

            // Error recovery: a statement that consumed nothing would loop
            // forever, so skip the offending token.
            if self.position == saved_pos {
                self.next_token();
            }
        }

        let close_brace_token = self.expect_token(SyntaxKind::CloseBraceToken);
        let span = open_brace_token.span().union(&close_brace_token.span());
        BlockStatement {
            data: NodeData::new(SyntaxKind::BlockStatement, span),
            open_brace_token,
            statements,
            close_brace_token,
        }
    }

    fn parse_variable_declaration(&mut self) -> Statement {
        let expected = if self.current_token() == SyntaxKind::LetKeyword {
            SyntaxKind::LetKeyword
        } else {
            SyntaxKind::VarKeyword
        };
        let keyword = self.expect_token(expected);
        let identifier = self.expect_token(SyntaxKind::Identifier);
        let type_clause = self.parse_optional_type_clause();
        let equals_token = self.expect_token(SyntaxKind::EqualsToken);
        let initializer = self.parse_expression();
        let span = keyword.span().union(&initializer.span());
        Statement::VariableDeclaration(VariableDeclaration {
            data: NodeData::new(SyntaxKind::VariableDeclaration, span),
            keyword,
            identifier,
            type_clause,
            equals_token,
            initializer,
        })
    }

    fn parse_optional_type_clause(&mut self) -> Option<TypeClause> {
        if self.current_token() != SyntaxKind::ColonToken {
            return None;
        }
        let colon_token = self.expect_token(SyntaxKind::ColonToken);
        let identifier = self.expect_token(SyntaxKind::Identifier);
        let span = colon_token.span().union(&identifier.span());
        Some(TypeClause {
            data: NodeData::new(SyntaxKind::TypeClause, span),
            colon_token,
            identifier,
        })
    }

    fn parse_if_statement(&mut self) -> Statement {
        let if_keyword = self.expect_token(SyntaxKind::IfKeyword);
        let condition = self.parse_expression();
        let then_statement = self.parse_statement();
        let else_clause = self.parse_else_clause();
        let end = match &else_clause {
            Some(clause) => clause.data.span,
            None => then_statement.span(),
        };
        let span = if_keyword.span().union(&end);
        Statement::If(IfStatement {
            data: NodeData::new(SyntaxKind::IfStatement, span),
            if_keyword,
            condition,
            then_statement: Box::new(then_statement),
            else_clause,
        })
    }

    fn parse_else_clause(&mut self) -> Option<ElseClause> {
        if self.current_token() != SyntaxKind::ElseKeyword {
            return None;
        }
        let else_keyword = self.expect_token(SyntaxKind::ElseKeyword);
        let else_statement = self.parse_statement();
        let span = else_keyword.span().union(&else_statement.span());
        Some(ElseClause {
            data: NodeData::new(SyntaxKind::ElseClause, span),
            else_keyword,
            else_statement: Box::new(else_statement),
        })
    }

    fn parse_while_statement(&mut self) -> Statement {
        let while_keyword = self.expect_token(SyntaxKind::WhileKeyword);
        let condition = self.parse_expression();
        let body = self.parse_statement();
        let span = while_keyword.span().union(&body.span());
        Statement::While(WhileStatement {
            data: NodeData::new(SyntaxKind::WhileStatement, span),
            while_keyword,
            condition,
            body: Box::new(body),
        })
    }

    fn parse_for_statement(&mut self) -> Statement {
        let for_keyword = self.expect_token(SyntaxKind::ForKeyword);
        let identifier = self.expect_token(SyntaxKind::Identifier);
        let equals_token = self.expect_token(SyntaxKind::EqualsToken);
        let lower_bound = self.parse_expression();
        let to_keyword = self.expect_token(SyntaxKind::ToKeyword);
        let upper_bound = self.parse_expression();
        let body = self.parse_statement();
        let span = for_keyword.span().union(&body.span());
        Statement::For(ForStatement {
            data: NodeData::new(SyntaxKind::ForStatement, span),
            for_keyword,
            identifier,
            equals_token,
            lower_bound,
            to_keyword,
            upper_bound,
            body: Box::new(body),
        })
    }

    fn parse_expression_statement(&mut self) -> Statement {
        let expression = self.parse_expression();
        Statement::Expression(ExpressionStatement {
            data: NodeData::new(SyntaxKind::ExpressionStatement, expression.span()),
            expression,
        })
    }

    // ========================================================================
    // Expression parsing
    // ========================================================================

    fn parse_expression(&mut self) -> Expression {
        if !self.enter_nesting() {
            return self.missing_expression();
        }
        let expression = self.parse_assignment_expression();
        self.exit_nesting();
        expression
    }

    /// `name = expression` is right-associative; anything else is binary.
    fn parse_assignment_expression(&mut self) -> Expression {
        if self.peek(0).kind == SyntaxKind::Identifier && self.peek(1).kind == SyntaxKind::EqualsToken {
            let identifier = self.next_token().to_token();
            let equals_token = self.next_token().to_token();
            let expression = self.parse_expression();
            let span = identifier.span().union(&expression.span());
            return Expression::Assignment(AssignmentExpression {
                data: NodeData::new(SyntaxKind::AssignmentExpression, span),
                identifier,
                equals_token,
                expression: Box::new(expression),
            });
        }

        self.parse_binary_expression(OperatorPrecedence::Lowest)
    }

    fn parse_binary_expression(&mut self, min_precedence: OperatorPrecedence) -> Expression {
        let mut left = self.parse_unary_expression(min_precedence);

        // Each operator in a chain deepens the tree by one level
        let depth = self.recursion_depth;
        loop {
            let precedence = get_binary_operator_precedence(self.current_token());
            if precedence == OperatorPrecedence::Invalid || precedence <= min_precedence {
                break;
            }
            if !self.enter_nesting() {
                break;
            }

            let operator_token = self.next_token().to_token();
            let right = self.parse_binary_expression(precedence);
            let span = left.span().union(&right.span());
            left = Expression::Binary(BinaryExpression {
                data: NodeData::new(SyntaxKind::BinaryExpression, span),
                left: Box::new(left),
                operator_token,
                right: Box::new(right),
            });
        }
        self.recursion_depth = depth;

        left
    }

    fn parse_unary_expression(&mut self, min_precedence: OperatorPrecedence) -> Expression {
        let precedence = get_unary_operator_precedence(self.current_token());
        if precedence == OperatorPrecedence::Invalid || precedence < min_precedence {
            return self.parse_primary_expression();
        }

        if !self.enter_nesting() {
            return self.missing_expression();
        }
        let operator_token = self.next_token().to_token();
        let operand = self.parse_binary_expression(precedence);
        self.exit_nesting();
        let span = operator_token.span().union(&operand.span());
        Expression::Unary(UnaryExpression {
            data: NodeData::new(SyntaxKind::UnaryExpression, span),
            operator_token,
            operand: Box::new(operand),
        })
    }

    fn parse_primary_expression(&mut self) -> Expression {
        match self.current_token() {
            SyntaxKind::OpenParenToken => self.parse_parenthesized_expression(),
            SyntaxKind::TrueKeyword | SyntaxKind::FalseKeyword => self.parse_boolean_literal(),
            SyntaxKind::NumericLiteral | SyntaxKind::StringLiteral => self.parse_literal(),
            SyntaxKind::Identifier if self.peek(1).kind == SyntaxKind::OpenParenToken => {
                self.parse_call_expression()
            }
            _ => self.parse_name_expression(),
        }
    }

    fn parse_parenthesized_expression(&mut self) -> Expression {
        let open_paren_token = self.expect_token(SyntaxKind::OpenParenToken);
        let expression = self.parse_expression();
        let close_paren_token = self.expect_token(SyntaxKind::CloseParenToken);
        let span = open_paren_token.span().union(&close_paren_token.span());
        Expression::Parenthesized(ParenthesizedExpression {
            data: NodeData::new(SyntaxKind::ParenthesizedExpression, span),
            open_paren_token,
            expression: Box::new(expression),
            close_paren_token,
        })
    }

    fn parse_boolean_literal(&mut self) -> Expression {
        let literal_token = self.next_token().to_token();
        let value = Value::Bool(literal_token.kind() == SyntaxKind::TrueKeyword);
        Expression::Literal(LiteralExpression {
            data: NodeData::new(SyntaxKind::LiteralExpression, literal_token.span()),
            literal_token,
            value,
        })
    }

    fn parse_literal(&mut self) -> Expression {
        let info = self.next_token();
        let value = match (&info.value, info.kind) {
            (Some(value), _) => value.clone(),
            (None, SyntaxKind::StringLiteral) => Value::String(String::new()),
            (None, _) => Value::Int(0),
        };
        let literal_token = info.to_token();
        Expression::Literal(LiteralExpression {
            data: NodeData::new(SyntaxKind::LiteralExpression, literal_token.span()),
            literal_token,
            value,
        })
    }

    fn parse_call_expression(&mut self) -> Expression {
        let identifier = self.expect_token(SyntaxKind::Identifier);
        let open_paren_token = self.expect_token(SyntaxKind::OpenParenToken);
        let arguments = self.parse_arguments();
        let close_paren_token = self.expect_token(SyntaxKind::CloseParenToken);
        let span = identifier.span().union(&close_paren_token.span());
        Expression::Call(CallExpression {
            data: NodeData::new(SyntaxKind::CallExpression, span),
            identifier,
            open_paren_token,
            arguments,
            close_paren_token,
        })
    }

    fn parse_arguments(&mut self) -> Vec<Expression> {
        let mut arguments = Vec::new();
        while self.current_token() != SyntaxKind::CloseParenToken
            && self.current_token() != SyntaxKind::EndOfFileToken
        {
            arguments.push(self.parse_expression());
            if self.current_token() != SyntaxKind::CommaToken {
                break;
            }
            self.next_token();
        }
        arguments
    }

    fn parse_name_expression(&mut self) -> Expression {
        let identifier = self.expect_token(SyntaxKind::Identifier);
        Expression::Name(NameExpression {
            data: NodeData::new(SyntaxKind::NameExpression, identifier.span()),
            identifier,
        })
    }
}
