/*
 * ==========================================================================
 * LOX - A Tree-Walking Interpreter
 * ==========================================================================
 *
 * Token Definitions
 *
 * The scanner emits an ordered, finite sequence of `Token`s terminated by a
 * single `TokenKind::Eof`. The parser consumes them without ever mutating
 * them.
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

use serde::Serialize;
use std::fmt;

use crate::span::Span;

/// Represents the **kind of a lexical token** in LOX.
///
/// # Compiler Pipeline Role
/// ```text
/// Source Code → Lexer → TokenKind → Parser → AST
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TokenKind {
    // Single-character punctuation and operators
    LeftParen,
    RightParen,
    LeftBrace,
    RightBrace,
    Comma,
    Dot,
    Minus,
    Plus,
    Semicolon,
    Slash,
    Star,
    Question,
    Colon,

    // One or two character operators
    Bang,
    BangEqual,
    Equal,
    EqualEqual,
    Greater,
    GreaterEqual,
    Less,
    LessEqual,

    // Literals
    Identifier,
    String,
    Number,

    // Keywords
    And,
    Break,
    Class,
    Else,
    False,
    Fun,
    For,
    If,
    Nil,
    Or,
    Print,
    Return,
    This,
    True,
    Var,
    While,

    /// End-of-input marker, always the **final token**.
    Eof,
}

/// Coarse classification of a `TokenKind`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenCategory {
    Keyword,
    Operator,
    Literal,
    Identifier,
    Punctuation,
    EndOfInput,
}

impl TokenKind {
    pub fn category(self) -> TokenCategory {
        use TokenKind::*;

        match self {
            LeftParen | RightParen | LeftBrace | RightBrace | Comma | Dot | Semicolon => {
                TokenCategory::Punctuation
            }

            Minus | Plus | Slash | Star | Question | Colon | Bang | BangEqual | Equal
            | EqualEqual | Greater | GreaterEqual | Less | LessEqual => TokenCategory::Operator,

            String | Number => TokenCategory::Literal,
            Identifier => TokenCategory::Identifier,

            And | Break | Class | Else | False | Fun | For | If | Nil | Or | Print | Return
            | This | True | Var | While => TokenCategory::Keyword,

            Eof => TokenCategory::EndOfInput,
        }
    }

    /// Kinds that may start a new declaration or statement. The parser
    /// stops discarding tokens at these after a syntax error.
    pub fn starts_statement(self) -> bool {
        matches!(
            self,
            TokenKind::Class
                | TokenKind::Fun
                | TokenKind::Var
                | TokenKind::For
                | TokenKind::If
                | TokenKind::While
                | TokenKind::Print
                | TokenKind::Return
        )
    }
}

/// Compile-time value carried by number and string tokens, and by
/// `Expr::Literal` nodes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Literal {
    Nil,
    Bool(bool),
    Number(f64),
    String(String),
}

/// A **single lexical token** produced by the scanner.
///
/// # Example Tokens
/// ```text
/// var  →  { kind: Var,        lexeme: "var", line: 1 }
/// age  →  { kind: Identifier, lexeme: "age", line: 1 }
/// 42   →  { kind: Number,     lexeme: "42",  literal: Number(42.0) }
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct Token {
    pub kind: TokenKind,

    /// The exact source text that produced this token.
    pub lexeme: String,

    /// Parsed value for `Number` and `String` tokens.
    pub literal: Option<Literal>,

    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, literal: Option<Literal>, span: Span) -> Self {
        Self {
            kind,
            lexeme: lexeme.into(),
            literal,
            span,
        }
    }

    /// A token with no literal and no meaningful position.
    pub fn synthetic(kind: TokenKind, lexeme: impl Into<String>) -> Self {
        Self::new(kind, lexeme, None, Span::default())
    }
}

/// Tokens compare by kind, lexeme and literal. The span is diagnostic
/// metadata and does not take part in structural AST equality.
impl PartialEq for Token {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind && self.lexeme == other.lexeme && self.literal == other.literal
    }
}

impl fmt::Display for Token {
    /// Prints **only the token's lexeme**, which is what users care about
    /// in error messages.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.lexeme)
    }
}
