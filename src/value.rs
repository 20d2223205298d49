/*
 * ==========================================================================
 * LOX - A Tree-Walking Interpreter
 * ==========================================================================
 *
 * Runtime Values
 *
 * `Value` is the closed set of things an expression can evaluate to. The
 * evaluator discriminates on the variant at runtime; the AST itself is
 * untyped.
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
use std::rc::Rc;

use crate::interpreter::calls::{LoxFunction, NativeFunction};
use crate::interpreter::classes::{LoxClass, LoxInstance};
use crate::lexer::token::Literal;

/// LOX runtime value representation.
///
/// Scalars are held inline; callables, classes and instances are shared
/// through `Rc`, so cloning a `Value` never deep-copies program state.
#[derive(Debug, Clone)]
pub enum Value {
    // Primitive scalars
    Nil,
    Bool(bool),
    Number(f64),
    String(String),

    // User-defined function or bound method
    Function(Rc<LoxFunction>),

    // Host function such as `clock()`
    Native(Rc<NativeFunction>),

    Class(Rc<LoxClass>),

    // Instances are mutable through any alias
    Instance(Rc<RefCell<LoxInstance>>),
}

impl Value {
    /// Name of the dynamic type, used in diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Nil => "nil",
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Function(_) | Value::Native(_) => "function",
            Value::Class(_) => "class",
            Value::Instance(_) => "instance",
        }
    }
}

impl From<&Literal> for Value {
    fn from(literal: &Literal) -> Self {
        match literal {
            Literal::Nil => Value::Nil,
            Literal::Bool(b) => Value::Bool(*b),
            Literal::Number(n) => Value::Number(*n),
            Literal::String(s) => Value::String(s.clone()),
        }
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

/// Equality used by `==` / `!=`.
///
/// `nil` equals only `nil`; scalars compare by value within the same type;
/// functions, classes and instances compare by identity. Values of
/// different types are never equal.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Nil, Value::Nil) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Function(a), Value::Function(b)) => Rc::ptr_eq(a, b),
            (Value::Native(a), Value::Native(b)) => Rc::ptr_eq(a, b),
            (Value::Class(a), Value::Class(b)) => Rc::ptr_eq(a, b),
            (Value::Instance(a), Value::Instance(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}
