/*
 * ==========================================================================
 * LOX - A Tree-Walking Interpreter
 * ==========================================================================
 *
 * File:     parser/mod.rs
 * Purpose:  Root module for the LOX recursive-descent parser.
 *
 * This module wires together all parser sub-modules, including:
 *   - Core parser control logic
 *   - Statement parsing
 *   - Expression parsing
 *   - Shared helper utilities
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

/// Core parser orchestration:
/// - Owns the `Parser` struct
/// - Exposes the main `parse(tokens)` entry point
pub mod parser;

/// Declaration and statement parsing:
/// - class / fun / var declarations
/// - if / while / for (desugared) / print / return / break / blocks
pub mod statements;

/// Expression-level parsing:
/// - comma → assignment → ternary → or → and → equality → comparison
///   → term → factor → unary → call → primary
pub mod expressions;

/// Shared parser helpers:
/// - token matching and lookahead
/// - required-token consumption
/// - error recording and resynchronization
pub mod helpers;

/// Re-export the public parse entry point so callers can use:
/// `crate::parser::parse(...)`
pub use parser::{parse, Parsed, Parser};
