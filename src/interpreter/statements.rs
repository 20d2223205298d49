/*
 * ==========================================================================
 * LOX - A Tree-Walking Interpreter
 * ==========================================================================
 *
 * Statement Execution Engine
 * --------------------------
 * Executes every statement form:
 *
 *  • Expression and print statements
 *  • Variable declarations
 *  • Blocks
 *  • If / while (for loops arrive here already desugared)
 *  • Break and return
 *  • Function and class declarations
 *
 * Non-local exits travel outward as an `ExecSignal` until the loop or call
 * that handles them.
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

use std::io::Write;
use std::rc::Rc;

use crate::ast::Stmt;
use crate::error::LoxError;
use crate::interpreter::calls::LoxFunction;
use crate::interpreter::classes::LoxClass;
use crate::interpreter::environment::{EnvRef, Environment};
use crate::interpreter::helpers::is_truthy;
use crate::interpreter::{Interpreter, Mode};
use crate::lexer::token::Token;
use crate::stack;
use crate::value::Value;

/* ============================================================================
 * Execution Control Signals
 * ============================================================================
 */

/// Internal control flow signal used by the interpreter.
#[derive(Debug, Clone, PartialEq)]
pub enum ExecSignal {
    /// Normal fall-through execution.
    None,

    /// `break` looking for its enclosing loop.
    Break(Token),

    /// Early return from a function.
    Return { keyword: Token, value: Value },
}

pub type ExecResult = Result<ExecSignal, LoxError>;

/* ============================================================================
 * Statement Execution Entry Point
 * ============================================================================
 */

impl<W: Write> Interpreter<W> {
    /// Executes a single statement inside `env`.
    ///
    /// This is the **core dispatch function for all statement execution**.
    pub fn exec_stmt(&mut self, stmt: &Stmt, env: &EnvRef) -> ExecResult {
        stack::guarded(|| {
            match stmt {
                /* ------------------------------------------------------------------
                 * Expression Statement
                 * ---------------------------------------------------------------- */
                Stmt::Expression(expr) => {
                    let value = self.eval_expr(expr, env)?;
                    if self.mode == Mode::Interactive {
                        self.emit(&value)?;
                    }
                    Ok(ExecSignal::None)
                }

                Stmt::Print(expr) => {
                    let value = self.eval_expr(expr, env)?;
                    self.emit(&value)?;
                    Ok(ExecSignal::None)
                }

                /* ------------------------------------------------------------------
                 * Variable Declarations
                 * ---------------------------------------------------------------- */
                Stmt::Var { name, initializer } => {
                    match initializer {
                        Some(init) => {
                            let value = self.eval_expr(init, env)?;
                            env.borrow_mut().define(name.lexeme.clone(), value);
                        }
                        None => env.borrow_mut().declare(name.lexeme.clone()),
                    }
                    Ok(ExecSignal::None)
                }

                Stmt::Block(statements) => self.exec_block(statements, Environment::child(env)),

                /* ------------------------------------------------------------------
                 * Control Flow
                 * ---------------------------------------------------------------- */
                Stmt::If {
                    condition,
                    then_branch,
                    else_branch,
                } => {
                    if is_truthy(&self.eval_expr(condition, env)?) {
                        self.exec_stmt(then_branch, env)
                    } else if let Some(else_branch) = else_branch {
                        self.exec_stmt(else_branch, env)
                    } else {
                        Ok(ExecSignal::None)
                    }
                }

                Stmt::While { condition, body } => {
                    while is_truthy(&self.eval_expr(condition, env)?) {
                        match self.exec_stmt(body, env)? {
                            ExecSignal::None => {}
                            ExecSignal::Break(_) => break,
                            signal @ ExecSignal::Return { .. } => return Ok(signal),
                        }
                    }
                    Ok(ExecSignal::None)
                }

                Stmt::Break { keyword } => Ok(ExecSignal::Break(keyword.clone())),

                Stmt::Return { keyword, value } => {
                    let value = match value {
                        Some(expr) => self.eval_expr(expr, env)?,
                        None => Value::Nil,
                    };
                    Ok(ExecSignal::Return {
                        keyword: keyword.clone(),
                        value,
                    })
                }

                /* ------------------------------------------------------------------
                 * Declarations
                 * ---------------------------------------------------------------- */
                Stmt::Function(decl) => {
                    let function = LoxFunction::new(Rc::clone(decl), Rc::clone(env), false);
                    env.borrow_mut()
                        .define(decl.name.lexeme.clone(), Value::Function(Rc::new(function)));
                    Ok(ExecSignal::None)
                }

                Stmt::Class { name, methods } => {
                    let class = LoxClass::build(name, methods, env);
                    env.borrow_mut()
                        .define(name.lexeme.clone(), Value::Class(Rc::new(class)));
                    Ok(ExecSignal::None)
                }
            }
        })
    }

    /// Runs `statements` in `scope`, stopping at the first signal other
    /// than `None`.
    ///
    /// The scope is dropped afterwards; the caller's own scope handle is
    /// untouched whether the block finishes, breaks, returns or fails.
    pub fn exec_block(&mut self, statements: &[Stmt], scope: EnvRef) -> ExecResult {
        for stmt in statements {
            match self.exec_stmt(stmt, &scope)? {
                ExecSignal::None => {}
                signal => return Ok(signal),
            }
        }
        Ok(ExecSignal::None)
    }

    /// Writes the display form of `value` and a newline to the output sink.
    fn emit(&mut self, value: &Value) -> Result<(), LoxError> {
        writeln!(self.out, "{}", value).map_err(LoxError::io)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::scan;
    use crate::parser::parse;

    fn exec_all(source: &str) -> (Vec<ExecSignal>, String) {
        let parsed = parse(scan(source).tokens);
        assert!(parsed.errors.is_empty(), "unexpected errors: {:?}", parsed.errors);

        let mut interp = Interpreter::new(Vec::new(), Mode::Script);
        let globals = interp.globals();
        let signals = parsed
            .statements
            .iter()
            .map(|stmt| interp.exec_stmt(stmt, &globals).unwrap())
            .collect();

        (signals, String::from_utf8(interp.into_output()).unwrap())
    }

    #[test]
    fn break_inside_loop_is_consumed() {
        let (signals, out) = exec_all("while (true) { print 1; break; print 2; }");
        assert_eq!(signals, vec![ExecSignal::None]);
        assert_eq!(out, "1\n");
    }

    #[test]
    fn break_escapes_an_enclosing_if() {
        let (_, out) = exec_all("var i = 0; while (true) { i = i + 1; if (i == 3) break; } print i;");
        assert_eq!(out, "3\n");
    }

    #[test]
    fn bare_break_surfaces_as_signal() {
        let (signals, _) = exec_all("{ break; }");
        assert!(matches!(signals[0], ExecSignal::Break(_)));
    }

    #[test]
    fn return_carries_its_value_out_of_loops() {
        let (signals, _) = exec_all("while (true) { return 4; }");
        match &signals[0] {
            ExecSignal::Return { value, .. } => assert_eq!(*value, Value::Number(4.0)),
            other => panic!("expected return, got {:?}", other),
        }
    }

    #[test]
    fn block_scope_ends_with_the_block() {
        let (_, out) = exec_all("var a = 1; { var a = 2; print a; } print a;");
        assert_eq!(out, "2\n1\n");
    }

    #[test]
    fn expression_statements_are_silent_in_scripts() {
        let (_, out) = exec_all("1 + 2;");
        assert_eq!(out, "");
    }
}
