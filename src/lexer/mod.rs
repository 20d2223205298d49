/*
 * ==========================================================================
 * LOX - A Tree-Walking Interpreter
 * ==========================================================================
 *
 * File:     lexer/mod.rs
 * Purpose:  Root module for the LOX scanner.
 *
 * This module wires together:
 *   - Token definitions
 *   - Keyword lookup
 *   - The character scanner itself
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

/// Token kinds, literals and the `Token` struct consumed by the parser.
pub mod token;

/// Reserved word table.
pub mod keywords;

/// Character-level scanner.
pub mod lexer;

pub use lexer::{scan, Scanned};
