/*
 * ==========================================================================
 * LOX - A Tree-Walking Interpreter
 * ==========================================================================
 *
 * Classes & Instances
 * -------------------
 * Runtime representation of class declarations and the objects they
 * produce:
 *
 *  - Building a `LoxClass` from a parsed declaration
 *  - Instantiation and `init`
 *  - Property reads (fields first, then bound methods)
 *  - Property writes
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
use std::fmt;
use std::io::Write;
use std::rc::Rc;

use crate::ast::FunctionDecl;
use crate::error::LoxError;
use crate::interpreter::calls::LoxFunction;
use crate::interpreter::environment::EnvRef;
use crate::interpreter::Interpreter;
use crate::lexer::token::Token;
use crate::value::Value;

/// Name of the method run when a class is called.
pub const INITIALIZER: &str = "init";

/// ==========================================================================
/// CLASS CONSTRUCTION
/// ==========================================================================

#[derive(Debug)]
pub struct LoxClass {
    pub name: String,
    pub methods: HashMap<String, Rc<LoxFunction>>,
}

impl LoxClass {
    /// Builds a class whose methods close over `env`.
    ///
    /// # Parameters
    /// - `name` - Class name token
    /// - `methods` - Method declarations in source order
    /// - `env` - Scope the class declaration is executed in
    pub fn build(name: &Token, methods: &[Rc<FunctionDecl>], env: &EnvRef) -> Self {
        let methods = methods
            .iter()
            .map(|decl| {
                let is_initializer = decl.name.lexeme == INITIALIZER;
                let method = LoxFunction::new(Rc::clone(decl), Rc::clone(env), is_initializer);
                (decl.name.lexeme.clone(), Rc::new(method))
            })
            .collect();

        Self {
            name: name.lexeme.clone(),
            methods,
        }
    }

    pub fn find_method(&self, name: &str) -> Option<Rc<LoxFunction>> {
        self.methods.get(name).cloned()
    }

    /// A class takes the arguments of its initializer, or none without one.
    pub fn arity(&self) -> usize {
        self.find_method(INITIALIZER)
            .map(|init| init.arity())
            .unwrap_or(0)
    }
}

/// ==========================================================================
/// INSTANCES
/// ==========================================================================

pub struct LoxInstance {
    pub class: Rc<LoxClass>,
    pub fields: HashMap<String, Value>,
}

impl LoxInstance {
    pub fn new(class: Rc<LoxClass>) -> Self {
        Self {
            class,
            fields: HashMap::new(),
        }
    }
}

// Fields may hold the instance itself.
impl fmt::Debug for LoxInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} instance", self.class.name)
    }
}

impl<W: Write> Interpreter<W> {
    /// Creates an instance of `class` and runs `init` on it when present.
    pub(crate) fn instantiate(&mut self, class: &Rc<LoxClass>, args: Vec<Value>) -> Result<Value, LoxError> {
        let instance = Rc::new(RefCell::new(LoxInstance::new(Rc::clone(class))));

        if let Some(init) = class.find_method(INITIALIZER) {
            let bound = init.bind(Rc::clone(&instance));
            self.call_function(&bound, args)?;
        }

        Ok(Value::Instance(instance))
    }
}

/// Reads `name` from `object`.
///
/// Fields shadow methods. Methods come back bound to the instance, so a
/// method pulled off an object still sees the right `this` when called
/// later.
///
/// # Errors
/// - `object` is not an instance
/// - Neither a field nor a method has that name
pub fn get_property(object: &Value, name: &Token) -> Result<Value, LoxError> {
    let instance = match object {
        Value::Instance(instance) => instance,
        _ => return Err(LoxError::type_error(name, "Only instances have properties.")),
    };

    if let Some(value) = instance.borrow().fields.get(&name.lexeme) {
        return Ok(value.clone());
    }

    let method = instance.borrow().class.find_method(&name.lexeme);
    match method {
        Some(method) => Ok(Value::Function(Rc::new(method.bind(Rc::clone(instance))))),
        None => Err(LoxError::reference_error(
            name,
            format!("Undefined property '{}'.", name.lexeme),
        )),
    }
}

/// Writes `value` into the field `name`, creating it when missing.
pub fn set_property(object: &Value, name: &Token, value: Value) -> Result<Value, LoxError> {
    match object {
        Value::Instance(instance) => {
            instance
                .borrow_mut()
                .fields
                .insert(name.lexeme.clone(), value.clone());
            Ok(value)
        }
        _ => Err(LoxError::type_error(name, "Only instances have fields.")),
    }
}
