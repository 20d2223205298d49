/*
 * ==========================================================================
 * LOX - A Tree-Walking Interpreter
 * ==========================================================================
 *
 * Host Stack Guard
 *
 * The parser, the evaluator and the printer all recurse once per level of
 * program nesting. Each recursive entry point runs through `guarded`, which
 * moves onto a fresh heap-allocated stack segment when the current one runs
 * low. Nesting depth is then bounded by memory and `MAX_CALL_DEPTH`, not by
 * the size of the thread the library happens to run on.
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

/// Remaining stack below which a new segment is allocated. Must cover the
/// deepest stretch of frames between two guarded calls (one LOX call is
/// `eval_expr` → `call_value` → `call_function` → `exec_block` →
/// `exec_stmt`).
const RED_ZONE: usize = 256 * 1024;

/// Size of each newly allocated segment.
const SEGMENT_SIZE: usize = 4 * 1024 * 1024;

/// Runs `f`, first switching to a new stack segment if the current one has
/// less than `RED_ZONE` bytes left.
#[inline]
pub(crate) fn guarded<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, SEGMENT_SIZE, f)
}
