//! The evaluator implementation.
//!
//! Walks a bound tree once, statement by statement. Operators are executed by
//! their resolved kind; the binder has already guaranteed the operand types,
//! so a value of the wrong kind here is an [`EvalError::TypeMismatch`].

use crate::error::EvalError;
use crate::host::Host;
use minnow_binder::bound::*;
use minnow_binder::{builtins, BoundBinaryOperatorKind, BoundUnaryOperatorKind, TypeSymbol, VariableSymbol};
use minnow_core::Value;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rustc_hash::FxHashMap;
use tracing::trace;

/// The variable store: current value of every variable assigned so far.
pub type Variables = FxHashMap<VariableSymbol, Value>;

pub struct Evaluator<'a> {
    root: &'a BoundStatement,
    variables: &'a mut Variables,
    host: &'a mut dyn Host,
    seed: Option<u64>,
    /// Created on the first call to `rnd`.
    random: Option<StdRng>,
    last_value: Option<Value>,
}

impl<'a> Evaluator<'a> {
    pub fn new(root: &'a BoundStatement, variables: &'a mut Variables, host: &'a mut dyn Host) -> Self {
        Self {
            root,
            variables,
            host,
            seed: None,
            random: None,
            last_value: None,
        }
    }

    /// Seed the source behind `rnd` for reproducible runs.
    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    /// Run the program and return the last value computed by a declaration
    /// or expression statement.
    pub fn evaluate(mut self) -> Result<Option<Value>, EvalError> {
        let root = self.root;
        self.execute_statement(root)?;
        Ok(self.last_value)
    }

    // ========================================================================
    // Statements
    // ========================================================================

    fn execute_statement(&mut self, stmt: &BoundStatement) -> Result<(), EvalError> {
        match stmt {
            BoundStatement::Block(node) => {
                for statement in &node.statements {
                    self.execute_statement(statement)?;
                }
            }
            BoundStatement::VariableDeclaration(node) => {
                let value = self.evaluate_value(&node.initializer)?;
                self.variables.insert(node.variable.clone(), value.clone());
                self.last_value = Some(value);
            }
            BoundStatement::If(node) => {
                if self.evaluate_bool(&node.condition)? {
                    self.execute_statement(&node.then_statement)?;
                } else if let Some(else_statement) = &node.else_statement {
                    self.execute_statement(else_statement)?;
                }
            }
            BoundStatement::While(node) => {
                while self.evaluate_bool(&node.condition)? {
                    self.execute_statement(&node.body)?;
                }
            }
            BoundStatement::For(node) => {
                let lower = self.evaluate_int(&node.lower_bound)?;
                let upper = self.evaluate_int(&node.upper_bound)?;
                for i in lower..=upper {
                    // Read-only to the program, rewritten here each iteration
                    self.variables.insert(node.variable.clone(), Value::Int(i));
                    self.execute_statement(&node.body)?;
                }
            }
            BoundStatement::Expression(node) => {
                self.last_value = self.evaluate_expression(&node.expression)?;
            }
        }
        Ok(())
    }

    // ========================================================================
    // Expressions
    // ========================================================================

    /// Evaluate an expression; only a call to a void function yields `None`.
    fn evaluate_expression(&mut self, expr: &BoundExpression) -> Result<Option<Value>, EvalError> {
        let value = match expr {
            BoundExpression::Literal(node) => node.value.clone(),
            BoundExpression::Variable(node) => match self.variables.get(&node.variable) {
                Some(value) => value.clone(),
                None => {
                    return Err(EvalError::UnassignedVariable {
                        name: node.variable.name.clone(),
                    })
                }
            },
            BoundExpression::Assignment(node) => {
                let value = self.evaluate_value(&node.expression)?;
                self.variables.insert(node.variable.clone(), value.clone());
                value
            }
            BoundExpression::Unary(node) => self.evaluate_unary(node)?,
            BoundExpression::Binary(node) => self.evaluate_binary(node)?,
            BoundExpression::Call(node) => return self.evaluate_call(node),
            BoundExpression::Conversion(node) => {
                let value = self.evaluate_value(&node.expression)?;
                convert(value, node.ty)?
            }
            BoundExpression::Error => return Err(EvalError::ErrorNodeReached),
        };
        Ok(Some(value))
    }

    fn evaluate_value(&mut self, expr: &BoundExpression) -> Result<Value, EvalError> {
        self.evaluate_expression(expr)?.ok_or(EvalError::TypeMismatch {
            expected: "value",
            actual: TypeSymbol::Void.name(),
        })
    }

    fn evaluate_int(&mut self, expr: &BoundExpression) -> Result<i64, EvalError> {
        let value = self.evaluate_value(expr)?;
        expect_int(&value)
    }

    fn evaluate_bool(&mut self, expr: &BoundExpression) -> Result<bool, EvalError> {
        let value = self.evaluate_value(expr)?;
        expect_bool(&value)
    }

    fn evaluate_unary(&mut self, node: &BoundUnaryExpression) -> Result<Value, EvalError> {
        let operand = self.evaluate_value(&node.operand)?;
        let value = match node.operator.kind {
            BoundUnaryOperatorKind::Identity => Value::Int(expect_int(&operand)?),
            BoundUnaryOperatorKind::Negation => Value::Int(expect_int(&operand)?.wrapping_neg()),
            BoundUnaryOperatorKind::LogicalNegation => Value::Bool(!expect_bool(&operand)?),
        };
        Ok(value)
    }

    fn evaluate_binary(&mut self, node: &BoundBinaryExpression) -> Result<Value, EvalError> {
        use BoundBinaryOperatorKind::*;

        // Both sides are always evaluated, `&&` and `||` included
        let left = self.evaluate_value(&node.left)?;
        let right = self.evaluate_value(&node.right)?;

        let value = match node.operator.kind {
            Addition => match (&left, &right) {
                (Value::String(l), Value::String(r)) => Value::String(format!("{}{}", l, r)),
                _ => Value::Int(expect_int(&left)?.wrapping_add(expect_int(&right)?)),
            },
            Subtraction => Value::Int(expect_int(&left)?.wrapping_sub(expect_int(&right)?)),
            Multiplication => Value::Int(expect_int(&left)?.wrapping_mul(expect_int(&right)?)),
            Division => {
                let divisor = expect_int(&right)?;
                if divisor == 0 {
                    return Err(EvalError::DivisionByZero);
                }
                Value::Int(expect_int(&left)?.wrapping_div(divisor))
            }
            LogicalAnd => Value::Bool(expect_bool(&left)? && expect_bool(&right)?),
            LogicalOr => Value::Bool(expect_bool(&left)? || expect_bool(&right)?),
            Equals => Value::Bool(left == right),
            NotEquals => Value::Bool(left != right),
            LessThan => Value::Bool(expect_int(&left)? < expect_int(&right)?),
            LessThanOrEquals => Value::Bool(expect_int(&left)? <= expect_int(&right)?),
            GreaterThan => Value::Bool(expect_int(&left)? > expect_int(&right)?),
            GreaterThanOrEquals => Value::Bool(expect_int(&left)? >= expect_int(&right)?),
        };
        Ok(value)
    }

    fn evaluate_call(&mut self, node: &BoundCallExpression) -> Result<Option<Value>, EvalError> {
        let function = &node.function;

        if *function == *builtins::READ {
            let line = self.host.read_line().unwrap_or_default();
            return Ok(Some(Value::String(line)));
        }

        if *function == *builtins::WRITE {
            let text = match node.arguments.first() {
                Some(argument) => self.evaluate_value(argument)?,
                None => return Err(EvalError::ErrorNodeReached),
            };
            let text = expect_str(&text)?;
            trace!(len = text.len(), "write");
            self.host.write_line(text);
            return Ok(None);
        }

        if *function == *builtins::RND {
            let max = match node.arguments.first() {
                Some(argument) => self.evaluate_int(argument)?,
                None => return Err(EvalError::ErrorNodeReached),
            };
            return self.random_below(max).map(|n| Some(Value::Int(n)));
        }

        Err(EvalError::UnknownFunction {
            name: function.name.clone(),
        })
    }

    /// A uniformly chosen integer in `[0, max)`; `rnd(0)` is 0.
    fn random_below(&mut self, max: i64) -> Result<i64, EvalError> {
        if max < 0 {
            return Err(EvalError::NegativeRandomBound { max });
        }
        if max == 0 {
            return Ok(0);
        }
        let seed = self.seed;
        let random = self.random.get_or_insert_with(|| match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        });
        Ok(random.gen_range(0..max))
    }
}

// ============================================================================
// Runtime value helpers
// ============================================================================

fn expect_int(value: &Value) -> Result<i64, EvalError> {
    value.as_int().ok_or(EvalError::TypeMismatch {
        expected: "int",
        actual: value.kind_name(),
    })
}

fn expect_bool(value: &Value) -> Result<bool, EvalError> {
    value.as_bool().ok_or(EvalError::TypeMismatch {
        expected: "bool",
        actual: value.kind_name(),
    })
}

fn expect_str(value: &Value) -> Result<&str, EvalError> {
    value.as_str().ok_or(EvalError::TypeMismatch {
        expected: "string",
        actual: value.kind_name(),
    })
}

/// Convert a runtime value to `target` using its canonical conversion.
///
/// To `string` formats the value; from `string` parses trimmed text, with
/// `true`/`false` matched case-insensitively.
pub fn convert(value: Value, target: TypeSymbol) -> Result<Value, EvalError> {
    let invalid = |value: String| EvalError::InvalidConversion {
        value,
        target: target.name(),
    };

    match (target, value) {
        (TypeSymbol::String, Value::String(text)) => Ok(Value::String(text)),
        (TypeSymbol::String, other) => Ok(Value::String(other.to_string())),
        (TypeSymbol::Int, Value::Int(n)) => Ok(Value::Int(n)),
        (TypeSymbol::Bool, Value::Bool(b)) => Ok(Value::Bool(b)),
        (TypeSymbol::Int, Value::String(text)) => match text.trim().parse::<i64>() {
            Ok(n) => Ok(Value::Int(n)),
            Err(_) => Err(invalid(text)),
        },
        (TypeSymbol::Bool, Value::String(text)) => parse_bool(text.trim()).map(Value::Bool).ok_or_else(|| invalid(text)),
        (_, other) => Err(invalid(other.to_string())),
    }
}

fn parse_bool(text: &str) -> Option<bool> {
    if text.eq_ignore_ascii_case("true") {
        Some(true)
    } else if text.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}
