/*
 * ==========================================================================
 * LOX - A Tree-Walking Interpreter
 * ==========================================================================
 *
 * Abstract Syntax Tree
 *
 * Nodes are created once by the parser and are read-only afterwards. Every
 * node owns its children; nothing is shared or cyclic except function
 * declarations, which are reference counted so runtime function values can
 * point back at them.
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

/// Expression nodes.
pub mod expr;

/// Statement nodes and function declarations.
pub mod stmt;

/// Source-text rendering of a parsed program.
pub mod printer;

pub use crate::lexer::token::Literal;
pub use expr::Expr;
pub use stmt::{FunctionDecl, Stmt};
