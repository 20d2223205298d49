/*
 * ==========================================================================
 * LOX - A Tree-Walking Interpreter
 * ==========================================================================
 *
 * File:     expressions.rs
 * Purpose:  Implements the LOX expression grammar using recursive descent
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
 * --------------------------------------------------------------------------
 *  MODULE OVERVIEW
 * --------------------------------------------------------------------------
 * Parsing order, loosest to tightest:
 *
 *   comma → assignment → ternary → or → and → equality → comparison
 *         → term → factor → unary → call → primary
 *
 * Every binary level is left-associative; assignment and the ternary
 * branches are right-associative.
 *
 * ==========================================================================
 */

use crate::ast::{Expr, Literal};
use crate::lexer::token::TokenKind;
use crate::parser::helpers::ParseResult;
use crate::parser::parser::Parser;
use crate::parser::statements::MAX_ARITY;
use crate::stack;

/// Operators that can only appear between two operands. Seeing one where an
/// expression should start gets a dedicated error.
const BINARY_OPERATORS: &[TokenKind] = &[
    TokenKind::BangEqual,
    TokenKind::EqualEqual,
    TokenKind::Greater,
    TokenKind::GreaterEqual,
    TokenKind::Less,
    TokenKind::LessEqual,
    TokenKind::Minus,
    TokenKind::Plus,
    TokenKind::Slash,
    TokenKind::Star,
];

impl Parser {
    /// expression → comma
    pub fn expression(&mut self) -> ParseResult<Expr> {
        stack::guarded(|| self.comma())
    }

    /// comma → assignment ( "," assignment )*
    fn comma(&mut self) -> ParseResult<Expr> {
        self.binary_level(&[TokenKind::Comma], Self::assignment)
    }

    /// assignment → ( call "." )? IDENTIFIER "=" assignment | ternary
    ///
    /// An invalid target is reported but does not unwind; the left-hand
    /// expression is kept.
    fn assignment(&mut self) -> ParseResult<Expr> {
        stack::guarded(|| {
            let expr = self.ternary()?;

            if self.match_kind(TokenKind::Equal) {
                let equals = self.previous().clone();
                let value = Box::new(self.assignment()?);

                return Ok(match expr {
                    Expr::Variable { name } => Expr::Assign { name, value },
                    Expr::Get { object, name } => Expr::Set { object, name, value },
                    other => {
                        self.report(&equals, "Invalid assignment target.");
                        other
                    }
                });
            }

            Ok(expr)
        })
    }

    /// ternary → or ( "?" ternary ":" ternary )*
    fn ternary(&mut self) -> ParseResult<Expr> {
        stack::guarded(|| {
            let mut expr = self.or()?;

            while self.match_kind(TokenKind::Question) {
                let operator = self.previous().clone();
                let then_branch = self.ternary()?;
                self.consume(TokenKind::Colon, "Expect ':' after '?'.")?;
                let else_branch = self.ternary()?;

                expr = Expr::Ternary {
                    condition: Box::new(expr),
                    operator,
                    then_branch: Box::new(then_branch),
                    else_branch: Box::new(else_branch),
                };
            }

            Ok(expr)
        })
    }

    /// or → and ( "or" and )*
    fn or(&mut self) -> ParseResult<Expr> {
        let mut expr = self.and()?;

        while self.match_kind(TokenKind::Or) {
            let operator = self.previous().clone();
            let right = self.and()?;
            expr = Expr::Logical {
                left: Box::new(expr),
                operator,
                right: Box::new(right),
            };
        }

        Ok(expr)
    }

    /// and → equality ( "and" equality )*
    fn and(&mut self) -> ParseResult<Expr> {
        let mut expr = self.equality()?;

        while self.match_kind(TokenKind::And) {
            let operator = self.previous().clone();
            let right = self.equality()?;
            expr = Expr::Logical {
                left: Box::new(expr),
                operator,
                right: Box::new(right),
            };
        }

        Ok(expr)
    }

    /// equality → comparison ( ( "!=" | "==" ) comparison )*
    fn equality(&mut self) -> ParseResult<Expr> {
        self.binary_level(&[TokenKind::BangEqual, TokenKind::EqualEqual], Self::comparison)
    }

    /// comparison → term ( ( ">" | ">=" | "<" | "<=" ) term )*
    fn comparison(&mut self) -> ParseResult<Expr> {
        self.binary_level(
            &[
                TokenKind::Greater,
                TokenKind::GreaterEqual,
                TokenKind::Less,
                TokenKind::LessEqual,
            ],
            Self::term,
        )
    }

    /// term → factor ( ( "-" | "+" ) factor )*
    fn term(&mut self) -> ParseResult<Expr> {
        self.binary_level(&[TokenKind::Minus, TokenKind::Plus], Self::factor)
    }

    /// factor → unary ( ( "/" | "*" ) unary )*
    fn factor(&mut self) -> ParseResult<Expr> {
        self.binary_level(&[TokenKind::Slash, TokenKind::Star], Self::unary)
    }

    /// Folds `operand ( op operand )*` into a left-associative chain of
    /// `Expr::Binary` nodes.
    fn binary_level(
        &mut self,
        operators: &[TokenKind],
        operand: fn(&mut Self) -> ParseResult<Expr>,
    ) -> ParseResult<Expr> {
        let mut expr = operand(self)?;

        while self.match_any(operators) {
            let operator = self.previous().clone();
            let right = operand(self)?;
            expr = Expr::Binary {
                left: Box::new(expr),
                operator,
                right: Box::new(right),
            };
        }

        Ok(expr)
    }

    /// unary → ( "!" | "-" ) unary | call
    fn unary(&mut self) -> ParseResult<Expr> {
        stack::guarded(|| {
            if self.match_any(&[TokenKind::Bang, TokenKind::Minus]) {
                let operator = self.previous().clone();
                let right = self.unary()?;
                return Ok(Expr::Unary {
                    operator,
                    right: Box::new(right),
                });
            }

            self.call()
        })
    }

    /// call → primary ( "(" arguments? ")" | "." IDENTIFIER )*
    fn call(&mut self) -> ParseResult<Expr> {
        let mut expr = self.primary()?;

        loop {
            if self.match_kind(TokenKind::LeftParen) {
                expr = self.finish_call(expr)?;
            } else if self.match_kind(TokenKind::Dot) {
                let name = self.consume(TokenKind::Identifier, "Expect property name after '.'.")?;
                expr = Expr::Get {
                    object: Box::new(expr),
                    name,
                };
            } else {
                break;
            }
        }

        Ok(expr)
    }

    /// Parses the argument list after `(`.
    ///
    /// Arguments are parsed one level below the comma operator so commas
    /// separate arguments instead of sequencing them.
    fn finish_call(&mut self, callee: Expr) -> ParseResult<Expr> {
        let mut arguments = Vec::new();

        if !self.check(TokenKind::RightParen) {
            let mut reported = false;
            loop {
                if arguments.len() >= MAX_ARITY && !reported {
                    let token = self.peek().clone();
                    self.report(&token, "Can't have more than 255 arguments.");
                    reported = true;
                }

                arguments.push(self.assignment()?);

                if !self.match_kind(TokenKind::Comma) {
                    break;
                }
            }
        }

        let paren = self.consume(TokenKind::RightParen, "Expect ')' after arguments.")?;

        Ok(Expr::Call {
            callee: Box::new(callee),
            paren,
            arguments,
        })
    }

    fn primary(&mut self) -> ParseResult<Expr> {
        if self.match_any(BINARY_OPERATORS) {
            let operator = self.previous().clone();
            return Err(self.error(&operator, "Expect expression before binary operator."));
        }

        if self.match_kind(TokenKind::False) {
            return Ok(Expr::Literal(Literal::Bool(false)));
        }
        if self.match_kind(TokenKind::True) {
            return Ok(Expr::Literal(Literal::Bool(true)));
        }
        if self.match_kind(TokenKind::Nil) {
            return Ok(Expr::Literal(Literal::Nil));
        }

        if self.match_any(&[TokenKind::Number, TokenKind::String]) {
            let literal = self.previous().literal.clone().unwrap_or(Literal::Nil);
            return Ok(Expr::Literal(literal));
        }

        if self.match_kind(TokenKind::This) {
            let keyword = self.previous().clone();
            if self.class_depth == 0 {
                self.report(&keyword, "Can't use 'this' outside of a class.");
            }
            return Ok(Expr::This { keyword });
        }

        if self.match_kind(TokenKind::Identifier) {
            return Ok(Expr::Variable {
                name: self.previous().clone(),
            });
        }

        if self.match_kind(TokenKind::LeftParen) {
            let expr = self.expression()?;
            self.consume(TokenKind::RightParen, "Expect ')' after expression.")?;
            return Ok(Expr::Grouping(Box::new(expr)));
        }

        let token = self.peek().clone();
        Err(self.error(&token, "Expect expression."))
    }
}
