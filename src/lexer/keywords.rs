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

use crate::lexer::token::TokenKind;

/// Resolves a scanned word to its reserved `TokenKind`, if it is one.
///
/// Used exclusively by the scanner to distinguish **user-defined
/// identifiers** from **language keywords**. Any future keyword must be
/// added here.
///
/// # Examples
/// ```text
/// while   -> Some(TokenKind::While)
/// print   -> Some(TokenKind::Print)
/// counter -> None
/// ```
pub fn keyword(word: &str) -> Option<TokenKind> {
    let kind = match word {
        "and" => TokenKind::And,
        "break" => TokenKind::Break,
        "class" => TokenKind::Class,
        "else" => TokenKind::Else,
        "false" => TokenKind::False,
        "for" => TokenKind::For,
        "fun" => TokenKind::Fun,
        "if" => TokenKind::If,
        "nil" => TokenKind::Nil,
        "or" => TokenKind::Or,
        "print" => TokenKind::Print,
        "return" => TokenKind::Return,
        "this" => TokenKind::This,
        "true" => TokenKind::True,
        "var" => TokenKind::Var,
        "while" => TokenKind::While,
        _ => return None,
    };

    Some(kind)
}
