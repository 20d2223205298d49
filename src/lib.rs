/*
 * ==========================================================================
 * LOX - A Tree-Walking Interpreter
 * ==========================================================================
 *
 * Library Root
 * ------------
 * The pipeline is three stages, each usable on its own:
 *
 *  - lexer       → source text to tokens
 *  - parser      → tokens to statements, with error recovery
 *  - interpreter → statements to output and side effects
 *
 * `run_source` chains them the way the command-line driver does.
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

pub mod ast;
pub mod diagnostics;
pub mod error;
pub mod globals;
pub mod interpreter;
pub mod lexer;
pub mod parser;
pub mod span;
mod stack;
pub mod value;

use std::io::Write;

pub use error::{ErrorKind, LoxError};
pub use interpreter::{Interpreter, Mode};
pub use value::Value;

/// Scans and parses `source`, collecting the errors of both stages.
pub fn parse_source(source: &str) -> Result<Vec<ast::Stmt>, Vec<LoxError>> {
    let scanned = lexer::scan(source);
    let parsed = parser::parse(scanned.tokens);

    let mut errors = scanned.errors;
    errors.extend(parsed.errors);

    if errors.is_empty() {
        Ok(parsed.statements)
    } else {
        Err(errors)
    }
}

/// Scans, parses and runs `source` on `interpreter`.
///
/// Nothing executes when there is any syntax error; every syntax error is
/// returned. Otherwise the result holds at most the one runtime error that
/// stopped execution.
pub fn run_source<W: Write>(interpreter: &mut Interpreter<W>, source: &str) -> Result<(), Vec<LoxError>> {
    let program = parse_source(source)?;
    interpreter.run(&program).map_err(|err| vec![err])
}
