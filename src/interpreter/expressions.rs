/*
 * ==========================================================================
 * LOX - A Tree-Walking Interpreter
 * ==========================================================================
 *
 * Expression Evaluation Engine
 * ----------------------------
 * Reduces an `Expr` to a runtime `Value`:
 *
 *  • Literals, grouping and variables
 *  • Assignment
 *  • Unary and binary operators (including the comma operator)
 *  • Short-circuit logic and the ternary conditional
 *  • Calls, property access and `this`
 *
 * Operands are evaluated left to right, and the first runtime error aborts
 * the whole expression.
 *
 * --------------------------------------------------------------------------
 * Author:   Sam Wilcox
 *
 * License:
 * This file is part of the LOX interpreter project.
 *
 * LOX is dual-licensed under the terms of:
 *   - The MIT license
 *   - The Apache License, Version 2.0
 *
 * You may choose either license to govern your use of this software.
 *
 * Unless required by applicable law or agreed to in writing, software
 * distributed under these licenses is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 *
 * ==========================================================================
 */

use std::io::Write;

use crate::ast::Expr;
use crate::error::LoxError;
use crate::interpreter::classes::{get_property, set_property};
use crate::interpreter::display::number_to_string;
use crate::interpreter::environment::EnvRef;
use crate::interpreter::helpers::{is_truthy, number_operand, number_operands};
use crate::interpreter::Interpreter;
use crate::lexer::token::{Token, TokenKind};
use crate::stack;
use crate::value::Value;

impl<W: Write> Interpreter<W> {
    /// Evaluates an expression within `env`.
    pub fn eval_expr(&mut self, expr: &Expr, env: &EnvRef) -> Result<Value, LoxError> {
        stack::guarded(|| {
            match expr {
                Expr::Literal(literal) => Ok(Value::from(literal)),

                Expr::Grouping(inner) => self.eval_expr(inner, env),

                Expr::Variable { name } => env.borrow().get(name),

                Expr::Assign { name, value } => {
                    let value = self.eval_expr(value, env)?;
                    env.borrow_mut().assign(name, value.clone())?;
                    Ok(value)
                }

                Expr::Unary { operator, right } => {
                    let right = self.eval_expr(right, env)?;
                    match operator.kind {
                        TokenKind::Minus => Ok(Value::Number(-number_operand(operator, &right)?)),
                        TokenKind::Bang => Ok(Value::Bool(!is_truthy(&right))),
                        _ => Err(LoxError::type_error(operator, "Unknown unary operator.")),
                    }
                }

                Expr::Binary { left, operator, right } => {
                    let left = self.eval_expr(left, env)?;
                    let right = self.eval_expr(right, env)?;
                    eval_binary(operator, left, right)
                }

                /* ------------------------------------------------------------------
                 * Short-circuit Operators
                 * ---------------------------------------------------------------- */
                Expr::Logical { left, operator, right } => {
                    let left = self.eval_expr(left, env)?;

                    let short_circuits = match operator.kind {
                        TokenKind::Or => is_truthy(&left),
                        _ => !is_truthy(&left),
                    };

                    if short_circuits {
                        Ok(left)
                    } else {
                        self.eval_expr(right, env)
                    }
                }

                Expr::Ternary {
                    condition,
                    then_branch,
                    else_branch,
                    ..
                } => {
                    if is_truthy(&self.eval_expr(condition, env)?) {
                        self.eval_expr(then_branch, env)
                    } else {
                        self.eval_expr(else_branch, env)
                    }
                }

                /* ------------------------------------------------------------------
                 * Calls & Objects
                 * ---------------------------------------------------------------- */
                Expr::Call {
                    callee,
                    paren,
                    arguments,
                } => {
                    let callee = self.eval_expr(callee, env)?;

                    let mut args = Vec::with_capacity(arguments.len());
                    for arg in arguments {
                        args.push(self.eval_expr(arg, env)?);
                    }

                    self.call_value(callee, args, paren)
                }

                Expr::Get { object, name } => {
                    let object = self.eval_expr(object, env)?;
                    get_property(&object, name)
                }

                Expr::Set { object, name, value } => {
                    let object = self.eval_expr(object, env)?;
                    let value = self.eval_expr(value, env)?;
                    set_property(&object, name, value)
                }

                Expr::This { keyword } => env.borrow().get(keyword),
            }
        })
    }
}

/// Applies a binary operator to two evaluated operands.
///
/// # Errors
/// - Division by zero, checked before operand types
/// - Operand types the operator does not accept
pub fn eval_binary(operator: &Token, left: Value, right: Value) -> Result<Value, LoxError> {
    match operator.kind {
        TokenKind::Comma => Ok(right),

        TokenKind::EqualEqual => Ok(Value::Bool(left == right)),
        TokenKind::BangEqual => Ok(Value::Bool(left != right)),

        TokenKind::Plus => add(operator, left, right),

        TokenKind::Slash => {
            if right == Value::Number(0.0) {
                return Err(LoxError::divide_by_zero(operator));
            }
            let (a, b) = number_operands(operator, &left, &right)?;
            Ok(Value::Number(a / b))
        }

        TokenKind::Minus => {
            let (a, b) = number_operands(operator, &left, &right)?;
            Ok(Value::Number(a - b))
        }

        TokenKind::Star => {
            let (a, b) = number_operands(operator, &left, &right)?;
            Ok(Value::Number(a * b))
        }

        TokenKind::Greater => compare(operator, &left, &right, |a, b| a > b),
        TokenKind::GreaterEqual => compare(operator, &left, &right, |a, b| a >= b),
        TokenKind::Less => compare(operator, &left, &right, |a, b| a < b),
        TokenKind::LessEqual => compare(operator, &left, &right, |a, b| a <= b),

        _ => Err(LoxError::type_error(operator, "Unknown binary operator.")),
    }
}

/// `+` adds numbers and concatenates strings. A string on either side turns
/// a number on the other side into its display form.
fn add(operator: &Token, left: Value, right: Value) -> Result<Value, LoxError> {
    match (left, right) {
        (Value::Number(a), Value::Number(b)) => Ok(Value::Number(a + b)),
        (Value::String(a), Value::String(b)) => Ok(Value::String(a + &b)),
        (Value::String(a), Value::Number(b)) => Ok(Value::String(a + &number_to_string(b))),
        (Value::Number(a), Value::String(b)) => Ok(Value::String(number_to_string(a) + &b)),
        _ => Err(LoxError::type_error(
            operator,
            "Operands must be two numbers or two strings.",
        )),
    }
}

fn compare(operator: &Token, left: &Value, right: &Value, op: fn(f64, f64) -> bool) -> Result<Value, LoxError> {
    let (a, b) = number_operands(operator, left, right)?;
    Ok(Value::Bool(op(a, b)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn op(kind: TokenKind, lexeme: &str) -> Token {
        Token::synthetic(kind, lexeme)
    }

    #[test]
    fn plus_mixes_strings_and_numbers() {
        let plus = op(TokenKind::Plus, "+");
        assert_eq!(eval_binary(&plus, "x".into(), 1.0.into()), Ok(Value::from("x1")));
        assert_eq!(eval_binary(&plus, 1.0.into(), "y".into()), Ok(Value::from("1y")));
        assert_eq!(eval_binary(&plus, 2.5.into(), 1.0.into()), Ok(Value::Number(3.5)));

        let err = eval_binary(&plus, true.into(), 1.0.into()).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Type);
        assert_eq!(err.message, "Operands must be two numbers or two strings.");
    }

    #[test]
    fn zero_divisor_wins_over_type_errors() {
        let slash = op(TokenKind::Slash, "/");
        assert_eq!(
            eval_binary(&slash, "a".into(), 0.0.into()).unwrap_err().kind,
            ErrorKind::DivideByZero
        );
        assert_eq!(eval_binary(&slash, 0.0.into(), 1.0.into()), Ok(Value::Number(0.0)));
        assert_eq!(
            eval_binary(&slash, "a".into(), 2.0.into()).unwrap_err().kind,
            ErrorKind::Type
        );
    }

    #[test]
    fn equality_accepts_any_types() {
        let eq = op(TokenKind::EqualEqual, "==");
        assert_eq!(eval_binary(&eq, Value::Nil, Value::Nil), Ok(Value::Bool(true)));
        assert_eq!(eval_binary(&eq, 1.0.into(), "1".into()), Ok(Value::Bool(false)));
    }

    #[test]
    fn comparison_requires_numbers() {
        let less = op(TokenKind::Less, "<");
        assert_eq!(eval_binary(&less, 1.0.into(), 2.0.into()), Ok(Value::Bool(true)));
        assert_eq!(
            eval_binary(&less, "a".into(), "b".into()).unwrap_err().message,
            "Operands must be numbers."
        );
    }

    #[test]
    fn stray_operator_is_a_runtime_type_error() {
        let dot = op(TokenKind::Dot, ".");
        let err = eval_binary(&dot, 1.0.into(), 2.0.into()).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Type);
        assert!(!err.kind.is_syntax());
    }

    #[test]
    fn comma_yields_right_operand() {
        let comma = op(TokenKind::Comma, ",");
        assert_eq!(eval_binary(&comma, 1.0.into(), 2.0.into()), Ok(Value::Number(2.0)));
    }
}
