/*
 * ==========================================================================
 * LOX - A Tree-Walking Interpreter
 * ==========================================================================
 *
 * Statement-Level Parsing Logic
 *
 * This file contains the grammar rules for **declarations and statements**:
 * - Class declarations (`class`)
 * - Function declarations (`fun`) and methods
 * - Variables (`var`)
 * - Control flow (`if`, `while`, `for`, `break`, `return`)
 * - `print`, blocks and expression statements
 *
 * `declaration()` is also the recovery point of the parser: any rule below
 * it that fails unwinds here, the parser resynchronizes, and the next
 * declaration is parsed as if nothing happened.
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

use std::rc::Rc;

use crate::ast::{Expr, FunctionDecl, Literal, Stmt};
use crate::lexer::token::TokenKind;
use crate::parser::helpers::ParseResult;
use crate::parser::parser::Parser;
use crate::stack;

/// Upper bound on call arguments and function parameters.
pub(crate) const MAX_ARITY: usize = 255;

impl Parser {
    /// Parses one declaration, recovering from syntax errors.
    ///
    /// Returns `None` when the declaration was malformed; the error has been
    /// recorded and the cursor sits at the next statement boundary.
    pub fn declaration(&mut self) -> Option<Stmt> {
        stack::guarded(|| {
            let result = if self.match_kind(TokenKind::Class) {
                self.class_declaration()
            } else if self.match_kind(TokenKind::Fun) {
                self.function("function").map(Stmt::Function)
            } else if self.match_kind(TokenKind::Var) {
                self.var_declaration()
            } else {
                self.statement()
            };

            match result {
                Ok(stmt) => Some(stmt),
                Err(_) => {
                    self.synchronize();
                    None
                }
            }
        })
    }

    /// class → "class" IDENTIFIER "{" function* "}"
    fn class_declaration(&mut self) -> ParseResult<Stmt> {
        let name = self.consume(TokenKind::Identifier, "Expect class name.")?;
        self.consume(TokenKind::LeftBrace, "Expect '{' before class body.")?;

        self.class_depth += 1;
        let methods = self.class_body();
        self.class_depth -= 1;

        let methods = methods?;
        self.consume(TokenKind::RightBrace, "Expect '}' after class body.")?;

        Ok(Stmt::Class { name, methods })
    }

    fn class_body(&mut self) -> ParseResult<Vec<Rc<FunctionDecl>>> {
        let mut methods = Vec::new();
        while !self.check(TokenKind::RightBrace) && !self.is_at_end() {
            methods.push(self.function("method")?);
        }
        Ok(methods)
    }

    /// function → IDENTIFIER "(" parameters? ")" block
    ///
    /// `kind` is `"function"` or `"method"` and only shapes error messages.
    fn function(&mut self, kind: &str) -> ParseResult<Rc<FunctionDecl>> {
        let name = self.consume(TokenKind::Identifier, &format!("Expect {kind} name."))?;
        self.consume(TokenKind::LeftParen, &format!("Expect '(' after {kind} name."))?;

        let mut params = Vec::new();
        if !self.check(TokenKind::RightParen) {
            let mut reported = false;
            loop {
                if params.len() >= MAX_ARITY && !reported {
                    let token = self.peek().clone();
                    self.report(&token, "Can't have more than 255 parameters.");
                    reported = true;
                }

                params.push(self.consume(TokenKind::Identifier, "Expect parameter name.")?);

                if !self.match_kind(TokenKind::Comma) {
                    break;
                }
            }
        }
        self.consume(TokenKind::RightParen, "Expect ')' after parameters.")?;

        self.consume(TokenKind::LeftBrace, &format!("Expect '{{' before {kind} body."))?;
        let body = self.block()?;

        Ok(Rc::new(FunctionDecl { name, params, body }))
    }

    /// varDecl → "var" IDENTIFIER ( "=" expression )? ";"
    fn var_declaration(&mut self) -> ParseResult<Stmt> {
        let name = self.consume(TokenKind::Identifier, "Expect variable name.")?;

        let initializer = if self.match_kind(TokenKind::Equal) {
            Some(self.expression()?)
        } else {
            None
        };

        self.consume(TokenKind::Semicolon, "Expect ';' after variable declaration.")?;
        Ok(Stmt::Var { name, initializer })
    }

    /// Dispatches on the leading token of a non-declaration statement,
    /// falling back to an expression statement.
    fn statement(&mut self) -> ParseResult<Stmt> {
        stack::guarded(|| {
            if self.match_kind(TokenKind::Break) {
                return self.break_statement();
            }
            if self.match_kind(TokenKind::For) {
                return self.for_statement();
            }
            if self.match_kind(TokenKind::While) {
                return self.while_statement();
            }
            if self.match_kind(TokenKind::If) {
                return self.if_statement();
            }
            if self.match_kind(TokenKind::Print) {
                return self.print_statement();
            }
            if self.match_kind(TokenKind::Return) {
                return self.return_statement();
            }
            if self.match_kind(TokenKind::LeftBrace) {
                return Ok(Stmt::Block(self.block()?));
            }

            self.expression_statement()
        })
    }

    fn break_statement(&mut self) -> ParseResult<Stmt> {
        let keyword = self.previous().clone();
        self.consume(TokenKind::Semicolon, "Expect ';' after 'break'.")?;
        Ok(Stmt::Break { keyword })
    }

    /// Desugars
    /// ```text
    /// for (init; cond; incr) body
    /// ```
    /// into
    /// ```text
    /// { init; while (cond) { body; incr; } }
    /// ```
    /// The inner block only exists when there is an increment, the outer one
    /// only when there is an initializer; a missing condition is `true`.
    fn for_statement(&mut self) -> ParseResult<Stmt> {
        self.consume(TokenKind::LeftParen, "Expect '(' after 'for'.")?;

        let initializer = if self.match_kind(TokenKind::Semicolon) {
            None
        } else if self.match_kind(TokenKind::Var) {
            Some(self.var_declaration()?)
        } else {
            Some(self.expression_statement()?)
        };

        let condition = if !self.check(TokenKind::Semicolon) {
            Some(self.expression()?)
        } else {
            None
        };
        self.consume(TokenKind::Semicolon, "Expect ';' after loop condition.")?;

        let increment = if !self.check(TokenKind::RightParen) {
            Some(self.expression()?)
        } else {
            None
        };
        self.consume(TokenKind::RightParen, "Expect ')' after for clauses.")?;

        let mut body = self.statement()?;

        if let Some(increment) = increment {
            body = Stmt::Block(vec![body, Stmt::Expression(increment)]);
        }

        body = Stmt::While {
            condition: condition.unwrap_or(Expr::Literal(Literal::Bool(true))),
            body: Box::new(body),
        };

        if let Some(initializer) = initializer {
            body = Stmt::Block(vec![initializer, body]);
        }

        Ok(body)
    }

    fn while_statement(&mut self) -> ParseResult<Stmt> {
        self.consume(TokenKind::LeftParen, "Expect '(' after 'while'.")?;
        let condition = self.expression()?;
        self.consume(TokenKind::RightParen, "Expect ')' after condition.")?;
        let body = self.statement()?;

        Ok(Stmt::While {
            condition,
            body: Box::new(body),
        })
    }

    /// ifStmt → "if" "(" expression ")" statement ( "else" statement )?
    ///
    /// A dangling `else` binds to the nearest `if`.
    fn if_statement(&mut self) -> ParseResult<Stmt> {
        self.consume(TokenKind::LeftParen, "Expect '(' after 'if'.")?;
        let condition = self.expression()?;
        self.consume(TokenKind::RightParen, "Expect ')' after if condition.")?;

        let then_branch = Box::new(self.statement()?);
        let else_branch = if self.match_kind(TokenKind::Else) {
            Some(Box::new(self.statement()?))
        } else {
            None
        };

        Ok(Stmt::If {
            condition,
            then_branch,
            else_branch,
        })
    }

    fn print_statement(&mut self) -> ParseResult<Stmt> {
        let value = self.expression()?;
        self.consume(TokenKind::Semicolon, "Expect ';' after value.")?;
        Ok(Stmt::Print(value))
    }

    fn return_statement(&mut self) -> ParseResult<Stmt> {
        let keyword = self.previous().clone();

        let value = if !self.check(TokenKind::Semicolon) {
            Some(self.expression()?)
        } else {
            None
        };

        self.consume(TokenKind::Semicolon, "Expect ';' after return value.")?;
        Ok(Stmt::Return { keyword, value })
    }

    fn expression_statement(&mut self) -> ParseResult<Stmt> {
        let expr = self.expression()?;
        self.consume(TokenKind::Semicolon, "Expect ';' after expression.")?;
        Ok(Stmt::Expression(expr))
    }

    /// Parses the statements of a block whose `{` was already consumed.
    ///
    /// Each inner declaration recovers on its own, so one bad statement
    /// inside a block does not discard its siblings.
    pub(crate) fn block(&mut self) -> ParseResult<Vec<Stmt>> {
        let mut statements = Vec::new();

        while !self.check(TokenKind::RightBrace) && !self.is_at_end() {
            if let Some(stmt) = self.declaration() {
                statements.push(stmt);
            }
        }

        self.consume(TokenKind::RightBrace, "Expect '}' after block.")?;
        Ok(statements)
    }
}

#[cfg(test)]
mod tests {
    use crate::ast::{Expr, Literal, Stmt};
    use crate::lexer::scan;
    use crate::lexer::token::TokenKind;
    use crate::parser::parse;

    fn parse_source(source: &str) -> crate::parser::Parsed {
        parse(scan(source).tokens)
    }

    fn messages(source: &str) -> Vec<String> {
        parse_source(source)
            .errors
            .into_iter()
            .map(|e| e.message)
            .collect()
    }

    #[test]
    fn desugars_full_for_loop() {
        let parsed = parse_source("for (var i = 0; i < 3; i = i + 1) print i;");
        assert!(parsed.errors.is_empty());

        let Stmt::Block(outer) = &parsed.statements[0] else {
            panic!("expected outer block, got {:?}", parsed.statements[0]);
        };
        assert!(matches!(outer[0], Stmt::Var { .. }));

        let Stmt::While { condition, body } = &outer[1] else {
            panic!("expected while, got {:?}", outer[1]);
        };
        assert!(matches!(condition, Expr::Binary { .. }));

        let Stmt::Block(inner) = body.as_ref() else {
            panic!("expected inner block, got {:?}", body);
        };
        assert!(matches!(inner[0], Stmt::Print(_)));
        assert!(matches!(inner[1], Stmt::Expression(Expr::Assign { .. })));
    }

    #[test]
    fn desugars_empty_for_loop_to_bare_while_true() {
        let parsed = parse_source("for (;;) break;");
        assert!(parsed.errors.is_empty());

        match &parsed.statements[0] {
            Stmt::While { condition, body } => {
                assert_eq!(condition, &Expr::Literal(Literal::Bool(true)));
                assert!(matches!(body.as_ref(), Stmt::Break { .. }));
            }
            other => panic!("expected while, got {:?}", other),
        }
    }

    #[test]
    fn parses_class_with_methods() {
        let parsed = parse_source("class Cat { init(name) { this.name = name; } meow() { print \"meow\"; } }");
        assert!(parsed.errors.is_empty());

        match &parsed.statements[0] {
            Stmt::Class { name, methods } => {
                assert_eq!(name.lexeme, "Cat");
                let names: Vec<_> = methods.iter().map(|m| m.name.lexeme.as_str()).collect();
                assert_eq!(names, vec!["init", "meow"]);
                assert_eq!(methods[0].params.len(), 1);
            }
            other => panic!("expected class, got {:?}", other),
        }
    }

    #[test]
    fn else_binds_to_nearest_if() {
        let parsed = parse_source("if (a) if (b) print 1; else print 2;");

        match &parsed.statements[0] {
            Stmt::If { then_branch, else_branch, .. } => {
                assert!(else_branch.is_none());
                assert!(matches!(
                    then_branch.as_ref(),
                    Stmt::If { else_branch: Some(_), .. }
                ));
            }
            other => panic!("expected if, got {:?}", other),
        }
    }

    #[test]
    fn recovers_from_two_independent_errors() {
        let parsed = parse_source("var a = ;\nprint 1;\nvar = 2;\nprint 2;");

        assert_eq!(parsed.errors.len(), 2);
        assert_eq!(parsed.errors[0].message, "Expect expression.");
        assert_eq!(parsed.errors[1].message, "Expect variable name.");
        assert_eq!(parsed.statements.len(), 2);
        assert!(parsed.statements.iter().all(|s| matches!(s, Stmt::Print(_))));
    }

    #[test]
    fn resynchronizes_at_statement_keyword() {
        let parsed = parse_source("print (1 + ;\nwhile (false) print 3;");

        assert_eq!(parsed.errors.len(), 1);
        assert_eq!(parsed.statements.len(), 1);
        assert!(matches!(parsed.statements[0], Stmt::While { .. }));
    }

    #[test]
    fn recovers_inside_blocks() {
        let parsed = parse_source("{ print ; print 1; }");

        assert_eq!(parsed.errors.len(), 1);
        match &parsed.statements[0] {
            Stmt::Block(inner) => assert_eq!(inner.len(), 1),
            other => panic!("expected block, got {:?}", other),
        }
    }

    #[test]
    fn reports_missing_semicolons() {
        assert_eq!(messages("print 1"), vec!["Expect ';' after value."]);
        assert_eq!(messages("1 + 2"), vec!["Expect ';' after expression."]);
        assert_eq!(messages("break"), vec!["Expect ';' after 'break'."]);
        assert_eq!(messages("var x = 1"), vec!["Expect ';' after variable declaration."]);
    }

    #[test]
    fn caps_parameter_lists_without_aborting() {
        let params: Vec<String> = (0..260).map(|i| format!("p{i}")).collect();
        let source = format!("fun big({}) {{ print 1; }} print 2;", params.join(", "));
        let parsed = parse_source(&source);

        assert_eq!(parsed.errors.len(), 1);
        assert_eq!(parsed.errors[0].message, "Can't have more than 255 parameters.");
        assert_eq!(parsed.errors[0].lexeme, "p255");

        match &parsed.statements[0] {
            Stmt::Function(decl) => assert_eq!(decl.params.len(), 260),
            other => panic!("expected function, got {:?}", other),
        }
        assert!(matches!(parsed.statements[1], Stmt::Print(_)));
    }

    #[test]
    fn error_at_end_has_empty_lexeme() {
        let parsed = parse_source("print");
        assert_eq!(parsed.errors.len(), 1);
        assert_eq!(parsed.errors[0].lexeme, "");
        assert_eq!(parsed.errors[0].location(), " at end");
    }

    #[test]
    fn return_keeps_keyword_token() {
        let parsed = parse_source("fun f() { return; }");
        let Stmt::Function(decl) = &parsed.statements[0] else {
            panic!("expected function");
        };
        match &decl.body[0] {
            Stmt::Return { keyword, value } => {
                assert_eq!(keyword.kind, TokenKind::Return);
                assert!(value.is_none());
            }
            other => panic!("expected return, got {:?}", other),
        }
    }
}
