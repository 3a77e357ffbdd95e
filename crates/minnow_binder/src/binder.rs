//! The binder implementation.
//!
//! Walks the syntax tree and builds the bound tree. Handles:
//! - Name resolution through the scope chain
//! - Type inference for declarations
//! - Operator and conversion resolution
//! - Built-in function calls and conversion-by-call syntax
//!
//! Binding never fails. Every problem is reported to the diagnostic bag and
//! replaced with an `Error` expression, and an `Error` operand suppresses any
//! further diagnostic that would only restate the first one.

use crate::bound::*;
use crate::conversion::Conversion;
use crate::operators::{BoundBinaryOperator, BoundUnaryOperator};
use crate::scope::ScopeChain;
use crate::symbol::TypeSymbol;
use minnow_ast::node::*;
use minnow_ast::syntax_kind::SyntaxKind;
use minnow_diagnostics::DiagnosticBag;

/// Converts syntax into bound nodes against a chain of scopes.
pub struct Binder {
    scopes: ScopeChain,
    diagnostics: DiagnosticBag,
}

impl Binder {
    pub fn new(scopes: ScopeChain) -> Self {
        Self {
            scopes,
            diagnostics: DiagnosticBag::new(),
        }
    }

    /// Take diagnostics from the binder.
    pub fn take_diagnostics(&mut self) -> DiagnosticBag {
        std::mem::take(&mut self.diagnostics)
    }

    /// The scope chain in its current state.
    pub fn scopes(&self) -> &ScopeChain {
        &self.scopes
    }

    // ========================================================================
    // Statements
    // ========================================================================

    pub fn bind_statement(&mut self, stmt: &Statement) -> BoundStatement {
        match stmt {
            Statement::Block(node) => self.bind_block_statement(node),
            Statement::VariableDeclaration(node) => self.bind_variable_declaration(node),
            Statement::If(node) => self.bind_if_statement(node),
            Statement::While(node) => self.bind_while_statement(node),
            Statement::For(node) => self.bind_for_statement(node),
            Statement::Expression(node) => self.bind_expression_statement(node),
        }
    }

    fn bind_block_statement(&mut self, node: &BlockStatement) -> BoundStatement {
        self.scopes.push();
        let statements = node.statements.iter().map(|s| self.bind_statement(s)).collect();
        self.scopes.pop();
        BoundStatement::Block(BoundBlockStatement { statements })
    }

    fn bind_variable_declaration(&mut self, node: &VariableDeclaration) -> BoundStatement {
        let is_read_only = node.keyword.kind() == SyntaxKind::LetKeyword;
        let initializer = self.bind_expression(&node.initializer, false);
        let name = &node.identifier;

        let variable = match self.scopes.declare(&name.text, is_read_only, initializer.ty()) {
            Ok(variable) => variable,
            Err(already) => {
                // A fabricated name already has a parse diagnostic
                if !name.is_missing() {
                    self.diagnostics.report_variable_already_declared(name.span(), &name.text);
                }
                already.variable
            }
        };

        BoundStatement::VariableDeclaration(BoundVariableDeclaration { variable, initializer })
    }

    fn bind_if_statement(&mut self, node: &IfStatement) -> BoundStatement {
        let condition = self.bind_expression_of_type(&node.condition, TypeSymbol::Bool);
        let then_statement = self.bind_statement(&node.then_statement);
        let else_statement = node
            .else_clause
            .as_ref()
            .map(|clause| Box::new(self.bind_statement(&clause.else_statement)));
        BoundStatement::If(BoundIfStatement {
            condition,
            then_statement: Box::new(then_statement),
            else_statement,
        })
    }

    fn bind_while_statement(&mut self, node: &WhileStatement) -> BoundStatement {
        let condition = self.bind_expression_of_type(&node.condition, TypeSymbol::Bool);
        let body = self.bind_statement(&node.body);
        BoundStatement::While(BoundWhileStatement {
            condition,
            body: Box::new(body),
        })
    }

    fn bind_for_statement(&mut self, node: &ForStatement) -> BoundStatement {
        // Bounds are bound before the loop variable exists
        let lower_bound = self.bind_expression_of_type(&node.lower_bound, TypeSymbol::Int);
        let upper_bound = self.bind_expression_of_type(&node.upper_bound, TypeSymbol::Int);

        self.scopes.push();
        let variable = match self.scopes.declare(&node.identifier.text, true, TypeSymbol::Int) {
            Ok(variable) => variable,
            Err(already) => already.variable,
        };
        let body = self.bind_statement(&node.body);
        self.scopes.pop();

        BoundStatement::For(BoundForStatement {
            variable,
            lower_bound,
            upper_bound,
            body: Box::new(body),
        })
    }

    fn bind_expression_statement(&mut self, node: &ExpressionStatement) -> BoundStatement {
        let expression = self.bind_expression(&node.expression, true);
        BoundStatement::Expression(BoundExpressionStatement { expression })
    }

    // ========================================================================
    // Expressions
    // ========================================================================

    /// Bind an expression. Unless `can_be_void`, a void result is reported
    /// and replaced with an error.
    pub fn bind_expression(&mut self, expr: &Expression, can_be_void: bool) -> BoundExpression {
        let result = self.bind_expression_internal(expr);
        if !can_be_void && result.ty() == TypeSymbol::Void {
            self.diagnostics.report_expression_must_have_value(expr.span());
            return BoundExpression::Error;
        }
        result
    }

    /// Bind an expression that must have type `target`.
    fn bind_expression_of_type(&mut self, expr: &Expression, target: TypeSymbol) -> BoundExpression {
        let result = self.bind_expression(expr, false);
        let ty = result.ty();
        if ty != target && !ty.is_error() && !target.is_error() {
            self.diagnostics.report_cannot_convert(expr.span(), ty.name(), target.name());
        }
        result
    }

    fn bind_expression_internal(&mut self, expr: &Expression) -> BoundExpression {
        match expr {
            Expression::Literal(node) => BoundExpression::Literal(BoundLiteralExpression {
                value: node.value.clone(),
            }),
            Expression::Name(node) => self.bind_name_expression(node),
            Expression::Unary(node) => self.bind_unary_expression(node),
            Expression::Binary(node) => self.bind_binary_expression(node),
            Expression::Parenthesized(node) => self.bind_expression_internal(&node.expression),
            Expression::Assignment(node) => self.bind_assignment_expression(node),
            Expression::Call(node) => self.bind_call_expression(node),
        }
    }

    fn bind_name_expression(&mut self, node: &NameExpression) -> BoundExpression {
        let name = &node.identifier;

        // The parser fabricated this token and already reported it
        if name.is_missing() {
            return BoundExpression::Error;
        }

        match self.scopes.lookup_variable(&name.text) {
            Some(variable) => BoundExpression::Variable(BoundVariableExpression {
                variable: variable.clone(),
            }),
            None => {
                self.diagnostics.report_undefined_name(name.span(), &name.text);
                BoundExpression::Error
            }
        }
    }

    fn bind_assignment_expression(&mut self, node: &AssignmentExpression) -> BoundExpression {
        let expression = self.bind_expression(&node.expression, false);
        let name = &node.identifier;

        let Some(variable) = self.scopes.lookup_variable(&name.text).cloned() else {
            self.diagnostics.report_undefined_name(name.span(), &name.text);
            return expression;
        };

        if variable.is_read_only {
            self.diagnostics.report_cannot_assign(node.equals_token.span(), &name.text);
        }

        let ty = expression.ty();
        if ty != variable.ty && !ty.is_error() && !variable.ty.is_error() {
            // The assignment is dropped; only the right-hand side remains
            self.diagnostics.report_cannot_convert(node.expression.span(), ty.name(), variable.ty.name());
            return expression;
        }

        BoundExpression::Assignment(BoundAssignmentExpression {
            variable,
            expression: Box::new(expression),
        })
    }

    fn bind_unary_expression(&mut self, node: &UnaryExpression) -> BoundExpression {
        let operand = self.bind_expression(&node.operand, false);
        let operand_type = operand.ty();
        if operand_type.is_error() {
            return BoundExpression::Error;
        }

        let token = &node.operator_token;
        match BoundUnaryOperator::bind(token.kind(), operand_type) {
            Some(operator) => BoundExpression::Unary(BoundUnaryExpression {
                operator,
                operand: Box::new(operand),
            }),
            None => {
                self.diagnostics
                    .report_undefined_unary_operator(token.span(), &token.text, operand_type.name());
                BoundExpression::Error
            }
        }
    }

    fn bind_binary_expression(&mut self, node: &BinaryExpression) -> BoundExpression {
        let left = self.bind_expression(&node.left, false);
        let right = self.bind_expression(&node.right, false);
        let (left_type, right_type) = (left.ty(), right.ty());
        if left_type.is_error() || right_type.is_error() {
            return BoundExpression::Error;
        }

        let token = &node.operator_token;
        match BoundBinaryOperator::bind(token.kind(), left_type, right_type) {
            Some(operator) => BoundExpression::Binary(BoundBinaryExpression {
                left: Box::new(left),
                operator,
                right: Box::new(right),
            }),
            None => {
                self.diagnostics.report_undefined_binary_operator(
                    token.span(),
                    &token.text,
                    left_type.name(),
                    right_type.name(),
                );
                BoundExpression::Error
            }
        }
    }

    fn bind_call_expression(&mut self, node: &CallExpression) -> BoundExpression {
        let name = &node.identifier;

        if node.arguments.len() == 1 {
            if let Some(ty) = TypeSymbol::lookup(&name.text) {
                return self.bind_conversion(&node.arguments[0], ty);
            }
        }

        let arguments: Vec<BoundExpression> =
            node.arguments.iter().map(|arg| self.bind_expression(arg, false)).collect();

        let Some(function) = self.scopes.lookup_function(&name.text).cloned() else {
            self.diagnostics.report_undefined_function(name.span(), &name.text);
            return BoundExpression::Error;
        };

        if arguments.len() != function.parameters.len() {
            self.diagnostics.report_wrong_argument_count(
                node.data.span,
                &function.name,
                function.parameters.len(),
                arguments.len(),
            );
            return BoundExpression::Error;
        }

        let mut has_errors = false;
        for ((argument, syntax), parameter) in arguments.iter().zip(&node.arguments).zip(&function.parameters) {
            let ty = argument.ty();
            if ty == parameter.ty {
                continue;
            }
            if !ty.is_error() {
                self.diagnostics
                    .report_wrong_argument_type(syntax.span(), &parameter.name, parameter.ty.name(), ty.name());
            }
            has_errors = true;
        }
        if has_errors {
            return BoundExpression::Error;
        }

        BoundExpression::Call(BoundCallExpression { function, arguments })
    }

    fn bind_conversion(&mut self, expr: &Expression, ty: TypeSymbol) -> BoundExpression {
        let expression = self.bind_expression(expr, false);
        let from = expression.ty();
        if from.is_error() {
            return BoundExpression::Error;
        }

        let conversion = Conversion::classify(from, ty);
        if !conversion.exists() {
            self.diagnostics.report_cannot_convert(expr.span(), from.name(), ty.name());
            return BoundExpression::Error;
        }
        if conversion.is_identity() {
            return expression;
        }

        BoundExpression::Conversion(BoundConversionExpression {
            ty,
            expression: Box::new(expression),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use minnow_diagnostics::DiagnosticKind;
    use minnow_parser::SyntaxTree;

    fn bind(source: &str) -> (BoundStatement, Vec<DiagnosticKind>) {
        let tree = SyntaxTree::parse(source);
        assert!(tree.diagnostics.is_empty(), "parse errors in {}", source);
        let mut binder = Binder::new(ScopeChain::new(0));
        let statement = binder.bind_statement(&tree.root.statement);
        let kinds = binder.take_diagnostics().iter().map(|d| d.kind).collect();
        (statement, kinds)
    }

    #[test]
    fn test_parenthesized_is_unwrapped() {
        let (statement, diagnostics) = bind("(((1)))");
        assert!(diagnostics.is_empty());
        let BoundStatement::Expression(stmt) = statement else { panic!("expected expression") };
        assert_eq!(stmt.expression.kind(), BoundNodeKind::LiteralExpression);
    }

    #[test]
    fn test_identity_conversion_is_elided() {
        let (statement, _) = bind("int(5)");
        let BoundStatement::Expression(stmt) = statement else { panic!("expected expression") };
        assert_eq!(stmt.expression.kind(), BoundNodeKind::LiteralExpression);
    }

    #[test]
    fn test_error_operand_does_not_cascade() {
        let (_, diagnostics) = bind("-(x + true) * 2");
        assert_eq!(diagnostics, vec![DiagnosticKind::UndefinedName]);
    }

    #[test]
    fn test_void_argument_needs_value() {
        let (_, diagnostics) = bind("write(write(\"a\"))");
        assert_eq!(diagnostics, vec![DiagnosticKind::ExpressionMustHaveValue]);
    }
}
