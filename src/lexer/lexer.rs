/*
 * ==========================================================================
 * LOX - A Tree-Walking Interpreter
 * ==========================================================================
 *
 * Character Scanner
 *
 * Turns raw source text into the token stream consumed by the parser.
 * Lexical errors are collected rather than raised, so a single stray
 * character does not hide the rest of the program's diagnostics.
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

use crate::error::{ErrorKind, LoxError};
use crate::lexer::keywords::keyword;
use crate::lexer::token::{Literal, Token, TokenKind};
use crate::span::Span;

/// Output of a full scan: the token stream (always `Eof`-terminated) and
/// every lexical error encountered along the way.
#[derive(Debug)]
pub struct Scanned {
    pub tokens: Vec<Token>,
    pub errors: Vec<LoxError>,
}

/// Scans `source` into tokens.
pub fn scan(source: &str) -> Scanned {
    let mut lexer = Lexer::new(source);
    lexer.scan_tokens();

    Scanned {
        tokens: lexer.tokens,
        errors: lexer.errors,
    }
}

pub struct Lexer {
    chars: Vec<char>,

    /// First character of the token being scanned.
    start: usize,
    current: usize,

    line: usize,
    line_start: usize,

    /// Position where the current token began.
    start_span: Span,

    pub tokens: Vec<Token>,
    pub errors: Vec<LoxError>,
}

impl Lexer {
    pub fn new(source: &str) -> Self {
        Self {
            chars: source.chars().collect(),
            start: 0,
            current: 0,
            line: 1,
            line_start: 0,
            start_span: Span::new(1, 0),
            tokens: Vec::new(),
            errors: Vec::new(),
        }
    }

    /// Scans the whole input, then appends the `Eof` marker.
    ///
    /// This function **must be called exactly once** per lexer instance.
    pub fn scan_tokens(&mut self) {
        while !self.is_at_end() {
            self.start = self.current;
            self.start_span = Span::new(self.line, self.current - self.line_start);
            self.scan_token();
        }

        let eof_span = Span::new(self.line, self.current - self.line_start);
        self.tokens.push(Token::new(TokenKind::Eof, "", None, eof_span));
    }

    fn scan_token(&mut self) {
        let ch = self.advance();

        match ch {
            // Whitespace
            ' ' | '\r' | '\t' => {}
            '\n' => self.newline(),

            '(' => self.add_token(TokenKind::LeftParen),
            ')' => self.add_token(TokenKind::RightParen),
            '{' => self.add_token(TokenKind::LeftBrace),
            '}' => self.add_token(TokenKind::RightBrace),
            ',' => self.add_token(TokenKind::Comma),
            '.' => self.add_token(TokenKind::Dot),
            '-' => self.add_token(TokenKind::Minus),
            '+' => self.add_token(TokenKind::Plus),
            ';' => self.add_token(TokenKind::Semicolon),
            '*' => self.add_token(TokenKind::Star),
            '?' => self.add_token(TokenKind::Question),
            ':' => self.add_token(TokenKind::Colon),

            '!' => {
                let kind = if self.match_char('=') { TokenKind::BangEqual } else { TokenKind::Bang };
                self.add_token(kind);
            }
            '=' => {
                let kind = if self.match_char('=') { TokenKind::EqualEqual } else { TokenKind::Equal };
                self.add_token(kind);
            }
            '<' => {
                let kind = if self.match_char('=') { TokenKind::LessEqual } else { TokenKind::Less };
                self.add_token(kind);
            }
            '>' => {
                let kind = if self.match_char('=') { TokenKind::GreaterEqual } else { TokenKind::Greater };
                self.add_token(kind);
            }

            // Single-line or block comment
            '/' => {
                if self.match_char('/') {
                    while self.peek() != '\n' && !self.is_at_end() {
                        self.advance();
                    }
                } else if self.match_char('*') {
                    self.block_comment();
                } else {
                    self.add_token(TokenKind::Slash);
                }
            }

            '"' => self.string(),

            c if c.is_ascii_digit() => self.number(),

            c if c.is_ascii_alphabetic() || c == '_' => self.identifier(),

            _ => self.error("Unexpected character."),
        }
    }

    fn string(&mut self) {
        while self.peek() != '"' && !self.is_at_end() {
            if self.advance() == '\n' {
                self.newline();
            }
        }

        if self.is_at_end() {
            self.error("Unterminated string.");
            return;
        }

        self.advance(); // closing quote

        let value: String = self.chars[self.start + 1..self.current - 1].iter().collect();
        self.add_literal(TokenKind::String, Some(Literal::String(value)));
    }

    fn number(&mut self) {
        while self.peek().is_ascii_digit() {
            self.advance();
        }

        if self.peek() == '.' && self.peek_next().is_ascii_digit() {
            self.advance(); // consume '.'
            while self.peek().is_ascii_digit() {
                self.advance();
            }
        }

        let text = self.lexeme();
        match text.parse::<f64>() {
            Ok(n) => self.add_literal(TokenKind::Number, Some(Literal::Number(n))),
            Err(_) => self.error("Invalid number literal."),
        }
    }

    fn identifier(&mut self) {
        while self.peek().is_ascii_alphanumeric() || self.peek() == '_' {
            self.advance();
        }

        let kind = keyword(&self.lexeme()).unwrap_or(TokenKind::Identifier);
        self.add_token(kind);
    }

    fn block_comment(&mut self) {
        while !self.is_at_end() {
            if self.peek() == '*' && self.peek_next() == '/' {
                self.advance();
                self.advance();
                return;
            }

            if self.advance() == '\n' {
                self.newline();
            }
        }

        self.error("Unterminated block comment.");
    }

    fn add_token(&mut self, kind: TokenKind) {
        self.add_literal(kind, None);
    }

    fn add_literal(&mut self, kind: TokenKind, literal: Option<Literal>) {
        let lexeme = self.lexeme();
        self.tokens.push(Token::new(kind, lexeme, literal, self.start_span));
    }

    fn error(&mut self, message: &str) {
        let lexeme = self.lexeme();
        self.errors
            .push(LoxError::new(ErrorKind::Syntax, message, self.start_span, lexeme));
    }

    fn lexeme(&self) -> String {
        self.chars[self.start..self.current].iter().collect()
    }

    fn newline(&mut self) {
        self.line += 1;
        self.line_start = self.current;
    }

    fn match_char(&mut self, expected: char) -> bool {
        if self.is_at_end() || self.chars[self.current] != expected {
            return false;
        }
        self.current += 1;
        true
    }

    fn advance(&mut self) -> char {
        let ch = self.chars[self.current];
        self.current += 1;
        ch
    }

    fn peek(&self) -> char {
        self.chars.get(self.current).copied().unwrap_or('\0')
    }

    fn peek_next(&self) -> char {
        self.chars.get(self.current + 1).copied().unwrap_or('\0')
    }

    fn is_at_end(&self) -> bool {
        self.current >= self.chars.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        scan(source).tokens.into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn scans_operators_and_punctuation() {
        assert_eq!(
            kinds("(){},.-+;/*?: ! != = == > >= < <="),
            vec![
                TokenKind::LeftParen,
                TokenKind::RightParen,
                TokenKind::LeftBrace,
                TokenKind::RightBrace,
                TokenKind::Comma,
                TokenKind::Dot,
                TokenKind::Minus,
                TokenKind::Plus,
                TokenKind::Semicolon,
                TokenKind::Slash,
                TokenKind::Star,
                TokenKind::Question,
                TokenKind::Colon,
                TokenKind::Bang,
                TokenKind::BangEqual,
                TokenKind::Equal,
                TokenKind::EqualEqual,
                TokenKind::Greater,
                TokenKind::GreaterEqual,
                TokenKind::Less,
                TokenKind::LessEqual,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn scans_literals_with_values() {
        let scanned = scan("var answer = 4.5; print \"hi\";");
        assert!(scanned.errors.is_empty());

        let tokens = scanned.tokens;
        assert_eq!(tokens[0].kind, TokenKind::Var);
        assert_eq!(tokens[1].kind, TokenKind::Identifier);
        assert_eq!(tokens[1].lexeme, "answer");
        assert_eq!(tokens[3].literal, Some(Literal::Number(4.5)));
        assert_eq!(tokens[5].kind, TokenKind::Print);
        assert_eq!(tokens[6].lexeme, "\"hi\"");
        assert_eq!(tokens[6].literal, Some(Literal::String("hi".to_string())));
    }

    #[test]
    fn trailing_dot_is_not_part_of_number() {
        assert_eq!(
            kinds("12."),
            vec![TokenKind::Number, TokenKind::Dot, TokenKind::Eof]
        );
    }

    #[test]
    fn tracks_lines_and_columns() {
        let tokens = scan("var a;\n  print a;").tokens;
        let print = &tokens[3];
        assert_eq!(print.kind, TokenKind::Print);
        assert_eq!(print.span, Span::new(2, 2));
    }

    #[test]
    fn skips_comments() {
        assert_eq!(
            kinds("// line\n/* block\n comment */ nil"),
            vec![TokenKind::Nil, TokenKind::Eof]
        );
    }

    #[test]
    fn collects_errors_and_keeps_scanning() {
        let scanned = scan("@ 1 # \"open");
        let messages: Vec<_> = scanned.errors.iter().map(|e| e.message.as_str()).collect();

        assert_eq!(
            messages,
            vec!["Unexpected character.", "Unexpected character.", "Unterminated string."]
        );
        assert_eq!(
            scanned.tokens.iter().map(|t| t.kind).collect::<Vec<_>>(),
            vec![TokenKind::Number, TokenKind::Eof]
        );
    }

    #[test]
    fn keywords_are_not_identifiers() {
        assert_eq!(
            kinds("and break class orchid"),
            vec![TokenKind::And, TokenKind::Break, TokenKind::Class, TokenKind::Identifier, TokenKind::Eof]
        );
    }

    #[test]
    fn tokens_report_their_category() {
        use crate::lexer::token::TokenCategory;

        let categories: Vec<_> = scan("print x + 1;")
            .tokens
            .iter()
            .map(|t| t.kind.category())
            .collect();

        assert_eq!(
            categories,
            vec![
                TokenCategory::Keyword,
                TokenCategory::Identifier,
                TokenCategory::Operator,
                TokenCategory::Literal,
                TokenCategory::Punctuation,
                TokenCategory::EndOfInput,
            ]
        );
    }
}
