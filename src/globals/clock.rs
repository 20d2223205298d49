/*
 * ==========================================================================
 * LOX - A Tree-Walking Interpreter
 * ==========================================================================
 *
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

use chrono::Utc;

use crate::value::Value;

/// Returns the **current Unix time in seconds**, with millisecond precision.
///
/// # LOX Example
/// ```lox
/// var start = clock();
/// // ... work ...
/// print clock() - start;
/// ```
pub fn clock(_args: &[Value]) -> Value {
    Value::Number(Utc::now().timestamp_millis() as f64 / 1000.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clock_is_seconds_since_epoch() {
        match clock(&[]) {
            // 2020-01-01 in seconds
            Value::Number(n) => assert!(n > 1_577_836_800.0),
            other => panic!("expected number, got {:?}", other),
        }
    }
}
