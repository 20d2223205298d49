/*
 * ==========================================================================
 * LOX - A Tree-Walking Interpreter
 * ==========================================================================
 *
 * Error Model
 *
 * Every failure the interpreter can surface, whether a syntax error collected
 * by the lexer/parser or a runtime error unwinding out of the evaluator, is a
 * `LoxError`. The `kind` discriminates the failure and carries a stable code
 * for diagnostics.
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

use thiserror::Error;

use crate::lexer::token::Token;
use crate::span::Span;

/// Category of a `LoxError`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed source, reported by the lexer or parser.
    Syntax,

    /// Operand of the wrong dynamic type.
    Type,

    /// Right operand of `/` was zero.
    DivideByZero,

    /// Variable read before it was ever given a value.
    Uninitialized,

    /// Undefined variable or property.
    Reference,

    /// `break` / `return` escaping the construct that can consume it.
    Break,

    /// Calling a non-callable, wrong arity, or call depth exhausted.
    Call,

    /// The output sink failed.
    Io,
}

impl ErrorKind {
    /// Stable code printed in diagnostics (`error[E_TYPE]: ...`).
    pub fn code(self) -> &'static str {
        match self {
            ErrorKind::Syntax => "E_SYNTAX",
            ErrorKind::Type => "E_TYPE",
            ErrorKind::DivideByZero => "E_DIVIDE_BY_ZERO",
            ErrorKind::Uninitialized => "E_UNINITIALIZED",
            ErrorKind::Reference => "E_REFERENCE",
            ErrorKind::Break => "E_BREAK",
            ErrorKind::Call => "E_CALL",
            ErrorKind::Io => "E_IO",
        }
    }

    pub fn is_syntax(self) -> bool {
        self == ErrorKind::Syntax
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
#[error("{message}")]
pub struct LoxError {
    pub kind: ErrorKind,

    /// Human-readable error message
    pub message: String,

    /// Primary source location
    pub span: Span,

    /// Source text of the offending token (empty at end of input)
    pub lexeme: String,

    /// Optional note / help text
    pub help: Option<String>,
}

impl LoxError {
    /// Generic constructor
    pub fn new(kind: ErrorKind, message: impl Into<String>, span: Span, lexeme: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            span,
            lexeme: lexeme.into(),
            help: None,
        }
    }

    /// Builds an error located at `token`.
    pub fn at(kind: ErrorKind, token: &Token, message: impl Into<String>) -> Self {
        Self::new(kind, message, token.span, token.lexeme.clone())
    }

    /// Syntax error (lexer or parser)
    pub fn syntax(token: &Token, message: impl Into<String>) -> Self {
        Self::at(ErrorKind::Syntax, token, message)
    }

    /// Type error (invalid operation / operand types)
    pub fn type_error(token: &Token, message: impl Into<String>) -> Self {
        Self::at(ErrorKind::Type, token, message)
    }

    pub fn divide_by_zero(operator: &Token) -> Self {
        Self::at(ErrorKind::DivideByZero, operator, "Divide by zero.")
            .with_help("Check the divisor before dividing.")
    }

    pub fn uninitialized(name: &Token) -> Self {
        Self::at(
            ErrorKind::Uninitialized,
            name,
            format!("Uninitialized variable '{}'.", name.lexeme),
        )
        .with_help("Assign a value to the variable before reading it.")
    }

    /// Reference error (undefined variable, property, etc.)
    pub fn reference_error(token: &Token, message: impl Into<String>) -> Self {
        Self::at(ErrorKind::Reference, token, message)
    }

    pub fn undefined_variable(name: &Token) -> Self {
        Self::reference_error(name, format!("Undefined variable '{}'.", name.lexeme))
    }

    pub fn call_error(token: &Token, message: impl Into<String>) -> Self {
        Self::at(ErrorKind::Call, token, message)
    }

    pub fn break_outside_loop(keyword: &Token) -> Self {
        Self::at(ErrorKind::Break, keyword, "Break statement outside of loop.")
    }

    pub fn return_outside_function(keyword: &Token) -> Self {
        Self::at(ErrorKind::Break, keyword, "Can't return from top-level code.")
    }

    /// The output sink rejected a write.
    pub fn io(error: std::io::Error) -> Self {
        Self::new(ErrorKind::Io, format!("Failed to write output: {error}"), Span::default(), "")
    }

    /// Attach a help message to the error (builder-style).
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    /// ` at 'x'` / ` at end` suffix printed after the diagnostic caret.
    /// Output failures have no source location and get no suffix.
    pub fn location(&self) -> String {
        if self.kind == ErrorKind::Io {
            String::new()
        } else if self.lexeme.is_empty() {
            " at end".to_string()
        } else {
            format!(" at '{}'", self.lexeme)
        }
    }
}
