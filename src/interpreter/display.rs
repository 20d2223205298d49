/*
 * =============================================================================
 * LOX - A Tree-Walking Interpreter
 * =============================================================================
 *
 * Value Display
 * -------------
 * The canonical stringify rule, shared by `print`, REPL echo and string
 * concatenation.
 *
 * -----------------------------------------------------------------------------
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
 * =============================================================================
 */

use std::fmt;

use crate::value::Value;

/// ============================================================================
/// value_to_string
/// ============================================================================
/// Converts a runtime `Value` into its **user-visible string form**.
///
/// Examples:
///   - Nil              → "nil"
///   - Number(3.0)      → "3"
///   - Number(2.5)      → "2.5"
///   - String("cat")    → "cat"
///   - Function         → "<fn name>"
///   - Native           → "<native fn>"
///   - Class            → "Cat"
///   - Instance         → "Cat instance"
/// ============================================================================
pub fn value_to_string(val: &Value) -> String {
    match val {
        Value::Nil => "nil".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => number_to_string(*n),
        Value::String(s) => s.clone(),

        Value::Function(f) => format!("<fn {}>", f.name()),
        Value::Native(_) => "<native fn>".to_string(),

        Value::Class(class) => class.name.clone(),
        Value::Instance(instance) => format!("{} instance", instance.borrow().class.name),
    }
}

/// Whole numbers print without a fractional part (`1.0` → `1`).
///
/// Uses Rust's shortest round-trip formatting, which never switches to
/// exponent notation: `1e23` prints as `100000000000000000000000`, not
/// `1.0E23`. Infinities and NaN use their JavaScript-style names.
pub fn number_to_string(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n == f64::INFINITY {
        "Infinity".to_string()
    } else if n == f64::NEG_INFINITY {
        "-Infinity".to_string()
    } else {
        n.to_string()
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&value_to_string(self))
    }
}
