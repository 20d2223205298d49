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

use serde::Serialize;

use crate::lexer::token::{Literal, Token};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Expr {
    Literal(Literal),

    Variable {
        name: Token,
    },

    Assign {
        name: Token,
        value: Box<Expr>,
    },

    Unary {
        operator: Token,
        right: Box<Expr>,
    },

    // Also carries the comma operator: `a, b` yields `b`.
    Binary {
        left: Box<Expr>,
        operator: Token,
        right: Box<Expr>,
    },

    // `and` / `or`
    Logical {
        left: Box<Expr>,
        operator: Token,
        right: Box<Expr>,
    },

    // cond ? then_branch : else_branch
    Ternary {
        condition: Box<Expr>,
        operator: Token,
        then_branch: Box<Expr>,
        else_branch: Box<Expr>,
    },

    Grouping(Box<Expr>),

    Call {
        callee: Box<Expr>,
        /// Closing paren, used to locate call errors.
        paren: Token,
        arguments: Vec<Expr>,
    },

    Get {
        object: Box<Expr>,
        name: Token,
    },

    Set {
        object: Box<Expr>,
        name: Token,
        value: Box<Expr>,
    },

    This {
        keyword: Token,
    },
}
