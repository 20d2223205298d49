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
use crate::lexer::token::{Token, TokenKind};
use crate::parser::parser::Parser;

/// Parse result. `Err` means the error has already been recorded and the
/// caller must unwind to `declaration()`, which resynchronizes.
pub(crate) type ParseResult<T> = Result<T, LoxError>;

impl Parser {
    /// Consumes the current token if it is any of `kinds`.
    pub(crate) fn match_any(&mut self, kinds: &[TokenKind]) -> bool {
        if kinds.iter().any(|&kind| self.check(kind)) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Consumes the current token if it is `kind`.
    pub(crate) fn match_kind(&mut self, kind: TokenKind) -> bool {
        self.match_any(&[kind])
    }

    /// Checks the current token without consuming it.
    pub(crate) fn check(&self, kind: TokenKind) -> bool {
        !self.is_at_end() && self.peek().kind == kind
    }

    /// Consumes a required token, or records `message` and unwinds.
    pub(crate) fn consume(&mut self, kind: TokenKind, message: &str) -> ParseResult<Token> {
        if self.check(kind) {
            return Ok(self.advance().clone());
        }

        let token = self.peek().clone();
        Err(self.error(&token, message))
    }

    /// Advances one token forward (never past `Eof`) and returns the
    /// consumed token.
    pub(crate) fn advance(&mut self) -> &Token {
        if !self.is_at_end() {
            self.current += 1;
        }
        self.previous()
    }

    pub(crate) fn peek(&self) -> &Token {
        &self.tokens[self.current]
    }

    /// Returns the previously consumed token.
    pub(crate) fn previous(&self) -> &Token {
        &self.tokens[self.current.saturating_sub(1)]
    }

    pub(crate) fn is_at_end(&self) -> bool {
        self.peek().kind == TokenKind::Eof
    }

    /// Records a syntax error at `token` and returns it so grammar rules
    /// can unwind with `Err(self.error(..))`.
    pub(crate) fn error(&mut self, token: &Token, message: &str) -> LoxError {
        let error = LoxError::syntax(token, message);
        self.errors.push(error.clone());
        error
    }

    /// Records a syntax error without unwinding; parsing carries on.
    pub(crate) fn report(&mut self, token: &Token, message: &str) {
        self.errors.push(LoxError::syntax(token, message));
    }

    /// Discards tokens until a likely statement boundary: just past a `;`,
    /// or right before a keyword that starts a declaration or statement.
    pub(crate) fn synchronize(&mut self) {
        self.advance();

        while !self.is_at_end() {
            if self.previous().kind == TokenKind::Semicolon {
                return;
            }

            if self.peek().kind.starts_statement() {
                return;
            }

            self.advance();
        }
    }
}
