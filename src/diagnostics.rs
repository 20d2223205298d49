/*
 * ==========================================================================
 * LOX - A Tree-Walking Interpreter
 * ==========================================================================
 *
 * Diagnostic Rendering
 *
 * The driver hands every syntax and runtime error to a `DiagnosticPrinter`,
 * which renders it against the original source with a caret under the
 * offending column.
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

use std::fmt::Write as _;

use crate::error::LoxError;
use crate::span::Span;

/// Renders human-friendly, compiler-style diagnostics for `LoxError`s.
///
/// This printer:
/// - Formats errors with file/line/column information
/// - Displays the offending source line
/// - Highlights the error position using a caret (`^`)
/// - Optionally shows a follow-up hint
pub struct DiagnosticPrinter {
    /// Full source code of the file (or REPL line) being interpreted.
    source: String,

    /// Display name of the source, e.g. `main.lox` or `<repl>`.
    file_name: String,
}

impl DiagnosticPrinter {
    pub fn new(file_name: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            source: source.into(),
        }
    }

    /// Renders a diagnostic to a string.
    ///
    /// # Output Example
    /// ```text
    /// error[E_TYPE]: Operands must be numbers.
    ///   --> example.lox:3:9
    ///    |
    ///  3 | print 1 - "a";
    ///    |         ^ at '-'
    /// help: ...
    /// ```
    pub fn render(&self, error: &LoxError) -> String {
        let Span { line, column } = error.span;

        // Lines are 1-indexed in diagnostics
        let src_line = self
            .source
            .lines()
            .nth(line.saturating_sub(1))
            .unwrap_or("");

        let mut out = String::new();

        let _ = writeln!(
            out,
            "error[{}]: {}\n  --> {}:{}:{}",
            error.kind.code(),
            error.message,
            self.file_name,
            line,
            column + 1
        );
        let _ = writeln!(out, "   |");
        let _ = writeln!(out, "{:>3} | {}", line, src_line);
        let _ = writeln!(out, "   | {}^{}", " ".repeat(column), error.location());

        if let Some(help) = &error.help {
            let _ = writeln!(out, "help: {}", help);
        }

        out
    }

    /// Prints a formatted diagnostic to stderr.
    pub fn print(&self, error: &LoxError) {
        eprint!("{}", self.render(error));
    }

    pub fn print_all(&self, errors: &[LoxError]) {
        for error in errors {
            self.print(error);
        }
    }
}
