/*
 * ==========================================================================
 * LOX - A Tree-Walking Interpreter
 * ==========================================================================
 *
 * Global Native Functions
 *
 * Everything installed here is visible to every program before its first
 * statement runs.
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

pub mod clock;

use std::rc::Rc;

use crate::interpreter::calls::NativeFunction;
use crate::interpreter::environment::EnvRef;
use crate::value::Value;

/// Defines every native function in `globals`.
pub fn install(globals: &EnvRef) {
    let natives = [NativeFunction::new("clock", 0, clock::clock)];

    let mut globals = globals.borrow_mut();
    for native in natives {
        globals.define(native.name, Value::Native(Rc::new(native)));
    }
}
