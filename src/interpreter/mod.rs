/*
 * ==========================================================================
 * LOX - A Tree-Walking Interpreter
 * ==========================================================================
 *
 * Interpreter Entry & Runtime Bootstrap
 * -------------------------------------
 * This module is the **primary runtime entrypoint**. It is responsible for:
 *
 *  - Creating the global execution environment
 *  - Installing the built-in native functions
 *  - Driving the main statement execution loop
 *  - Rejecting `break` and `return` that escape to the top level
 *
 * All actual evaluation logic is delegated to the following submodules:
 *
 *  - statements.rs  → Statement execution (exec_stmt)
 *  - expressions.rs → Expression evaluation (eval_expr)
 *  - calls.rs       → Function invocation
 *  - classes.rs     → Class & instance behavior
 *  - display.rs     → Value formatting utilities
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

pub mod calls;
pub mod classes;
pub mod display;
pub mod environment;
pub mod expressions;
pub mod helpers;
pub mod statements;

use std::io::Write;
use std::rc::Rc;

use crate::ast::Stmt;
use crate::error::LoxError;
use crate::globals;

use environment::{EnvRef, Environment};
pub use statements::{ExecResult, ExecSignal};

/// How expression statements behave.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Expression statements are evaluated for their side effects only.
    #[default]
    Script,

    /// Expression statements also print their value, like a REPL.
    Interactive,
}

/// A tree-walking evaluator writing program output to `W`.
///
/// Globals persist across calls to `run`, so a REPL can feed one line at a
/// time into the same interpreter.
pub struct Interpreter<W: Write> {
    globals: EnvRef,
    pub(crate) out: W,
    pub(crate) mode: Mode,
    pub(crate) call_depth: usize,
}

impl<W: Write> Interpreter<W> {
    pub fn new(out: W, mode: Mode) -> Self {
        let globals = Environment::global();
        globals::install(&globals);

        Self {
            globals,
            out,
            mode,
            call_depth: 0,
        }
    }

    /// Executes `program` in the global scope.
    ///
    /// Execution stops at the first runtime error. Output written before
    /// the error stays written.
    pub fn run(&mut self, program: &[Stmt]) -> Result<(), LoxError> {
        let globals = self.globals();
        self.call_depth = 0;

        for stmt in program {
            match self.exec_stmt(stmt, &globals)? {
                ExecSignal::None => {}
                ExecSignal::Break(keyword) => return Err(LoxError::break_outside_loop(&keyword)),
                ExecSignal::Return { keyword, .. } => {
                    return Err(LoxError::return_outside_function(&keyword))
                }
            }
        }

        self.out.flush().map_err(LoxError::io)
    }

    pub fn globals(&self) -> EnvRef {
        Rc::clone(&self.globals)
    }

    pub fn into_output(self) -> W {
        self.out
    }
}
