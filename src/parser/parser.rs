/*
 * ==========================================================================
 * LOX - A Tree-Walking Interpreter
 * ==========================================================================
 *
 * Core Recursive-Descent Parser Entry Point
 *
 * This file defines the primary `Parser` structure and the public `parse()`
 * driver function used to transform a token stream into the statement list
 * of a LOX program.
 *
 * The parsing implementation itself is split across multiple modules:
 * - `statements.rs`   → Declaration and statement grammar
 * - `expressions.rs`  → Expression grammar & operator precedence
 * - `helpers.rs`      → Token matching, consumption and error recovery
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

use crate::ast::Stmt;
use crate::error::LoxError;
use crate::lexer::token::{Token, TokenKind};
use crate::span::Span;

/// Result of a parse: every statement that parsed cleanly, plus every
/// syntax error recorded on the way.
#[derive(Debug)]
pub struct Parsed {
    pub statements: Vec<Stmt>,
    pub errors: Vec<LoxError>,
}

/// The LOX recursive-descent parser.
///
/// The grammar logic is implemented through extension modules
/// (`statements`, `expressions`, `helpers`) via additional `impl Parser`
/// blocks.
pub struct Parser {
    /// Complete list of tokens to be parsed, `Eof`-terminated.
    pub(crate) tokens: Vec<Token>,

    /// Current cursor position within the token stream.
    pub(crate) current: usize,

    /// Syntax errors recorded so far.
    pub(crate) errors: Vec<LoxError>,

    /// Number of class bodies enclosing the cursor; `this` is only legal
    /// when it is non-zero.
    pub(crate) class_depth: usize,
}

/// Public entry point for the parsing phase.
///
/// Never fails: malformed declarations are reported in `Parsed::errors` and
/// skipped, and parsing resumes at the next statement boundary.
///
/// # Pipeline
/// ```text
/// Source → Lexer → Tokens → Parser → AST → Interpreter
/// ```
pub fn parse(tokens: Vec<Token>) -> Parsed {
    let mut parser = Parser::new(tokens);
    let statements = parser.parse();

    Parsed {
        statements,
        errors: parser.errors,
    }
}

impl Parser {
    pub fn new(mut tokens: Vec<Token>) -> Self {
        // The cursor helpers rely on a trailing Eof.
        if tokens.last().map(|t| t.kind) != Some(TokenKind::Eof) {
            let span = tokens.last().map(|t| t.span).unwrap_or_else(|| Span::new(1, 0));
            tokens.push(Token::new(TokenKind::Eof, "", None, span));
        }

        Self {
            tokens,
            current: 0,
            errors: Vec::new(),
            class_depth: 0,
        }
    }

    /// Parses declarations until the `Eof` token is reached.
    pub fn parse(&mut self) -> Vec<Stmt> {
        let mut stmts = Vec::new();

        while !self.is_at_end() {
            if let Some(stmt) = self.declaration() {
                stmts.push(stmt);
            }
        }

        stmts
    }
}
