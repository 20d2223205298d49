/*
 * ==========================================================================
 * LOX - A Tree-Walking Interpreter
 * ==========================================================================
 *
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

use crate::error::LoxError;
use crate::lexer::token::Token;
use crate::value::Value;

/// Determines whether a runtime `Value` is considered **truthy**.
///
/// Used by `if`, `while`, `!`, the ternary operator and the short-circuit
/// operators.
///
/// # Truthiness Rules
/// Only `nil` and `false` are falsy. Everything else is truthy, including
/// `0` and the empty string.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Nil => false,
        Value::Bool(b) => *b,
        _ => true,
    }
}

/// Both operands as numbers, or the type error for `operator`.
pub fn number_operands(operator: &Token, left: &Value, right: &Value) -> Result<(f64, f64), LoxError> {
    match (left, right) {
        (Value::Number(a), Value::Number(b)) => Ok((*a, *b)),
        _ => Err(LoxError::type_error(operator, "Operands must be numbers.")
            .with_help(format!("found {} and {}", left.type_name(), right.type_name()))),
    }
}

/// The operand as a number, or the type error for `operator`.
pub fn number_operand(operator: &Token, operand: &Value) -> Result<f64, LoxError> {
    match operand {
        Value::Number(n) => Ok(*n),
        _ => Err(LoxError::type_error(operator, "Operand must be a number.")
            .with_help(format!("found {}", operand.type_name()))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::lexer::token::TokenKind;

    #[test]
    fn only_nil_and_false_are_falsy() {
        assert!(!is_truthy(&Value::Nil));
        assert!(!is_truthy(&Value::Bool(false)));
        assert!(is_truthy(&Value::Bool(true)));
        assert!(is_truthy(&Value::Number(0.0)));
        assert!(is_truthy(&Value::from("")));
    }

    #[test]
    fn operand_checks_name_the_operator() {
        let minus = Token::synthetic(TokenKind::Minus, "-");

        let err = number_operands(&minus, &Value::Number(1.0), &Value::Nil).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Type);
        assert_eq!(err.lexeme, "-");
        assert_eq!(err.help.as_deref(), Some("found number and nil"));

        assert_eq!(number_operand(&minus, &Value::Number(2.0)), Ok(2.0));
        assert_eq!(
            number_operand(&minus, &Value::from("x")).unwrap_err().message,
            "Operand must be a number."
        );
    }
}
