/*
 * ==========================================================================
 * LOX - A Tree-Walking Interpreter
 * ==========================================================================
 *
 * Function & Method Invocation
 * ----------------------------
 * Everything callable lives here:
 *
 *  - `LoxFunction`     → user-defined functions, closures and bound methods
 *  - `NativeFunction`  → host functions installed into the global scope
 *  - `call_value`      → the single dispatch point used by call expressions
 *
 * Calling a class is dispatched to `classes.rs`, which constructs the
 * instance and runs its initializer through this module.
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

use std::cell::RefCell;
use std::fmt;
use std::io::Write;
use std::rc::Rc;

use crate::ast::FunctionDecl;
use crate::error::LoxError;
use crate::interpreter::classes::LoxInstance;
use crate::interpreter::environment::{EnvRef, Environment};
use crate::interpreter::statements::ExecSignal;
use crate::interpreter::Interpreter;
use crate::lexer::token::{Token, TokenKind};
use crate::value::Value;

/// Deepest allowed nesting of calls before the interpreter gives up with a
/// stack overflow error.
pub const MAX_CALL_DEPTH: usize = 255;

/* ============================================================================
 * User Functions
 * ============================================================================
 */

/// A function declaration closed over the scope it was declared in.
pub struct LoxFunction {
    pub decl: Rc<FunctionDecl>,
    pub closure: EnvRef,

    /// `init` methods always yield their instance.
    pub is_initializer: bool,
}

impl LoxFunction {
    pub fn new(decl: Rc<FunctionDecl>, closure: EnvRef, is_initializer: bool) -> Self {
        Self {
            decl,
            closure,
            is_initializer,
        }
    }

    pub fn name(&self) -> &str {
        &self.decl.name.lexeme
    }

    pub fn arity(&self) -> usize {
        self.decl.params.len()
    }

    /// Produces a copy of this method whose scope binds `this` to `instance`.
    pub fn bind(&self, instance: Rc<RefCell<LoxInstance>>) -> LoxFunction {
        let scope = Environment::child(&self.closure);
        scope.borrow_mut().define("this", Value::Instance(instance));

        LoxFunction::new(Rc::clone(&self.decl), scope, self.is_initializer)
    }

    /// The instance bound to `this` in an initializer's scope.
    fn bound_this(&self) -> Result<Value, LoxError> {
        self.closure
            .borrow()
            .get(&Token::synthetic(TokenKind::This, "this"))
    }
}

// The closure can reach this function again, so Debug stops at the name.
impl fmt::Debug for LoxFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<fn {}>", self.name())
    }
}

/* ============================================================================
 * Native Functions
 * ============================================================================
 */

/// A host function exposed to LOX code.
pub struct NativeFunction {
    pub name: &'static str,
    pub arity: usize,
    pub func: fn(&[Value]) -> Value,
}

impl NativeFunction {
    pub fn new(name: &'static str, arity: usize, func: fn(&[Value]) -> Value) -> Self {
        Self { name, arity, func }
    }
}

impl fmt::Debug for NativeFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<native fn {}>", self.name)
    }
}

/* ============================================================================
 * Dispatch
 * ============================================================================
 */

impl<W: Write> Interpreter<W> {
    /// Invokes `callee` with already-evaluated arguments.
    ///
    /// `paren` is the closing parenthesis of the call and anchors every
    /// error raised here.
    ///
    /// # Errors
    /// - Calling something that is not a function or class
    /// - Argument count differing from the callee's arity
    /// - Nesting calls deeper than `MAX_CALL_DEPTH`
    /// - Any runtime error raised by the callee's body
    pub fn call_value(&mut self, callee: Value, args: Vec<Value>, paren: &Token) -> Result<Value, LoxError> {
        match callee {
            Value::Function(function) => {
                check_arity(function.arity(), args.len(), paren)?;
                self.enter_call(paren)?;
                let result = self.call_function(&function, args);
                self.call_depth -= 1;
                result
            }

            Value::Native(native) => {
                check_arity(native.arity, args.len(), paren)?;
                Ok((native.func)(&args))
            }

            Value::Class(class) => {
                check_arity(class.arity(), args.len(), paren)?;
                self.enter_call(paren)?;
                let result = self.instantiate(&class, args);
                self.call_depth -= 1;
                result
            }

            _ => Err(LoxError::call_error(paren, "Can only call functions and classes.")),
        }
    }

    /// Runs a function body in a fresh scope nested inside its closure.
    pub(crate) fn call_function(&mut self, function: &LoxFunction, args: Vec<Value>) -> Result<Value, LoxError> {
        let scope = Environment::child(&function.closure);
        {
            let mut scope = scope.borrow_mut();
            for (param, arg) in function.decl.params.iter().zip(args) {
                scope.define(param.lexeme.clone(), arg);
            }
        }

        let returned = match self.exec_block(&function.decl.body, scope)? {
            ExecSignal::None => None,
            ExecSignal::Return { value, .. } => Some(value),
            ExecSignal::Break(keyword) => return Err(LoxError::break_outside_loop(&keyword)),
        };

        if function.is_initializer {
            return function.bound_this();
        }

        Ok(returned.unwrap_or(Value::Nil))
    }

    fn enter_call(&mut self, paren: &Token) -> Result<(), LoxError> {
        if self.call_depth >= MAX_CALL_DEPTH {
            return Err(LoxError::call_error(paren, "Stack overflow."));
        }
        self.call_depth += 1;
        Ok(())
    }
}

fn check_arity(expected: usize, got: usize, paren: &Token) -> Result<(), LoxError> {
    if expected != got {
        return Err(LoxError::call_error(
            paren,
            format!("Expected {} arguments but got {}.", expected, got),
        ));
    }
    Ok(())
}
