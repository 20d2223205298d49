/*
 * ==========================================================================
 * LOX - A Tree-Walking Interpreter
 * ==========================================================================
 *
 * Lexical Scopes
 *
 * An `Environment` maps names to bindings and links to its enclosing scope.
 * Lookup and assignment walk outward until a match or the global scope is
 * exhausted. Blocks and calls create a child scope and simply drop it when
 * they finish; the caller's scope is never swapped out, so there is nothing
 * to restore on any exit path.
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
use std::collections::HashMap;
use std::rc::Rc;

use crate::error::LoxError;
use crate::lexer::token::Token;
use crate::value::Value;

/// Shared handle to a scope.
pub type EnvRef = Rc<RefCell<Environment>>;

#[derive(Debug, Default)]
pub struct Environment {
    /// `None` marks a variable declared without an initializer that has not
    /// been assigned yet.
    values: HashMap<String, Option<Value>>,
    enclosing: Option<EnvRef>,
}

impl Environment {
    pub fn new(enclosing: Option<EnvRef>) -> Self {
        Self {
            values: HashMap::new(),
            enclosing,
        }
    }

    /// A fresh root scope.
    pub fn global() -> EnvRef {
        Rc::new(RefCell::new(Self::new(None)))
    }

    /// A fresh scope nested inside `parent`.
    pub fn child(parent: &EnvRef) -> EnvRef {
        Rc::new(RefCell::new(Self::new(Some(Rc::clone(parent)))))
    }

    /// Binds `name` in this scope, shadowing any outer binding.
    pub fn define(&mut self, name: impl Into<String>, value: Value) {
        self.values.insert(name.into(), Some(value));
    }

    /// Binds `name` in this scope without giving it a value.
    pub fn declare(&mut self, name: impl Into<String>) {
        self.values.insert(name.into(), None);
    }

    /// Reads the innermost binding of `name`.
    ///
    /// # Errors
    /// - Reference error when no scope binds the name
    /// - Uninitialized error when the binding was never given a value
    pub fn get(&self, name: &Token) -> Result<Value, LoxError> {
        match self.values.get(&name.lexeme) {
            Some(Some(value)) => Ok(value.clone()),
            Some(None) => Err(LoxError::uninitialized(name)),
            None => match &self.enclosing {
                Some(parent) => parent.borrow().get(name),
                None => Err(LoxError::undefined_variable(name)),
            },
        }
    }

    /// Overwrites the innermost existing binding of `name`.
    ///
    /// Assignment never creates a binding; an unknown name is a reference
    /// error.
    pub fn assign(&mut self, name: &Token, value: Value) -> Result<(), LoxError> {
        if let Some(slot) = self.values.get_mut(&name.lexeme) {
            *slot = Some(value);
            return Ok(());
        }

        match &self.enclosing {
            Some(parent) => parent.borrow_mut().assign(name, value),
            None => Err(LoxError::undefined_variable(name)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::lexer::token::TokenKind;

    fn name(lexeme: &str) -> Token {
        Token::synthetic(TokenKind::Identifier, lexeme)
    }

    #[test]
    fn child_shadows_without_touching_parent() {
        let global = Environment::global();
        global.borrow_mut().define("a", Value::Number(1.0));

        let block = Environment::child(&global);
        block.borrow_mut().define("a", Value::Number(2.0));

        assert_eq!(block.borrow().get(&name("a")), Ok(Value::Number(2.0)));
        assert_eq!(global.borrow().get(&name("a")), Ok(Value::Number(1.0)));
    }

    #[test]
    fn assignment_walks_to_the_defining_scope() {
        let global = Environment::global();
        global.borrow_mut().define("a", Value::Number(1.0));

        let block = Environment::child(&Environment::child(&global));
        block
            .borrow_mut()
            .assign(&name("a"), Value::from("changed"))
            .unwrap();

        assert_eq!(global.borrow().get(&name("a")), Ok(Value::from("changed")));
    }

    #[test]
    fn unknown_names_are_reference_errors() {
        let global = Environment::global();

        let read = global.borrow().get(&name("missing")).unwrap_err();
        assert_eq!(read.kind, ErrorKind::Reference);
        assert_eq!(read.message, "Undefined variable 'missing'.");

        let write = global
            .borrow_mut()
            .assign(&name("missing"), Value::Nil)
            .unwrap_err();
        assert_eq!(write.kind, ErrorKind::Reference);
    }

    #[test]
    fn declared_but_unassigned_reads_fail() {
        let global = Environment::global();
        global.borrow_mut().declare("a");

        let err = global.borrow().get(&name("a")).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Uninitialized);
        assert_eq!(err.message, "Uninitialized variable 'a'.");

        global.borrow_mut().assign(&name("a"), Value::Nil).unwrap();
        assert_eq!(global.borrow().get(&name("a")), Ok(Value::Nil));
    }
}
