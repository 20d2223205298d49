/*
 * ==========================================================================
 * LOX - A Tree-Walking Interpreter
 * ==========================================================================
 *
 * AST Printer
 *
 * Renders a parsed program back into LOX source. Grouping nodes are kept in
 * the tree, so printing operators without extra parentheses reproduces the
 * original structure, and re-parsing the output yields an equal AST.
 * Desugared `for` loops come back out as their `while` form.
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

use crate::ast::{Expr, FunctionDecl, Literal, Stmt};
use crate::lexer::token::TokenKind;
use crate::stack;

const INDENT: &str = "    ";

/// Renders every statement of `program`, one top-level statement per line.
pub fn print_program(program: &[Stmt]) -> String {
    let mut printer = Printer::default();
    for stmt in program {
        printer.statement(stmt);
    }
    printer.out
}

/// Renders a single expression.
pub fn print_expr(expr: &Expr) -> String {
    stack::guarded(|| {
        match expr {
            Expr::Literal(literal) => print_literal(literal),
            Expr::Variable { name } => name.lexeme.clone(),
            Expr::Assign { name, value } => format!("{} = {}", name.lexeme, print_expr(value)),
            Expr::Unary { operator, right } => format!("{}{}", operator.lexeme, print_expr(right)),

            Expr::Binary { left, operator, right } if operator.kind == TokenKind::Comma => {
                format!("{}, {}", print_expr(left), print_expr(right))
            }

            Expr::Binary { left, operator, right } | Expr::Logical { left, operator, right } => {
                format!("{} {} {}", print_expr(left), operator.lexeme, print_expr(right))
            }

            Expr::Ternary {
                condition,
                then_branch,
                else_branch,
                ..
            } => format!(
                "{} ? {} : {}",
                print_expr(condition),
                print_expr(then_branch),
                print_expr(else_branch)
            ),

            Expr::Grouping(inner) => format!("({})", print_expr(inner)),

            Expr::Call { callee, arguments, .. } => {
                let args: Vec<String> = arguments.iter().map(print_expr).collect();
                format!("{}({})", print_expr(callee), args.join(", "))
            }

            Expr::Get { object, name } => format!("{}.{}", print_expr(object), name.lexeme),

            Expr::Set { object, name, value } => {
                format!("{}.{} = {}", print_expr(object), name.lexeme, print_expr(value))
            }

            Expr::This { .. } => "this".to_string(),
        }
    })
}

fn print_literal(literal: &Literal) -> String {
    match literal {
        Literal::Nil => "nil".to_string(),
        Literal::Bool(b) => b.to_string(),
        Literal::Number(n) => n.to_string(),
        Literal::String(s) => format!("\"{}\"", s),
    }
}

#[derive(Default)]
struct Printer {
    out: String,
    depth: usize,
}

impl Printer {
    fn statement(&mut self, stmt: &Stmt) {
        self.indent();
        self.inline(stmt);
        self.out.push('\n');
    }

    fn indent(&mut self) {
        for _ in 0..self.depth {
            self.out.push_str(INDENT);
        }
    }

    /// Writes `stmt` at the current position, without leading indentation
    /// or a trailing newline.
    fn inline(&mut self, stmt: &Stmt) {
        stack::guarded(|| {
            match stmt {
                Stmt::Expression(expr) => {
                    self.out.push_str(&print_expr(expr));
                    self.out.push(';');
                }

                Stmt::Print(expr) => {
                    self.out.push_str("print ");
                    self.out.push_str(&print_expr(expr));
                    self.out.push(';');
                }

                Stmt::Var { name, initializer } => {
                    self.out.push_str("var ");
                    self.out.push_str(&name.lexeme);
                    if let Some(init) = initializer {
                        self.out.push_str(" = ");
                        self.out.push_str(&print_expr(init));
                    }
                    self.out.push(';');
                }

                Stmt::Block(statements) => self.block(statements),

                Stmt::If {
                    condition,
                    then_branch,
                    else_branch,
                } => {
                    self.out.push_str(&format!("if ({}) ", print_expr(condition)));
                    self.inline(then_branch);
                    if let Some(else_branch) = else_branch {
                        self.out.push_str(" else ");
                        self.inline(else_branch);
                    }
                }

                Stmt::While { condition, body } => {
                    self.out.push_str(&format!("while ({}) ", print_expr(condition)));
                    self.inline(body);
                }

                Stmt::Break { .. } => self.out.push_str("break;"),

                Stmt::Function(decl) => {
                    self.out.push_str("fun ");
                    self.function(decl);
                }

                Stmt::Return { value, .. } => match value {
                    Some(value) => self.out.push_str(&format!("return {};", print_expr(value))),
                    None => self.out.push_str("return;"),
                },

                Stmt::Class { name, methods } => {
                    self.out.push_str(&format!("class {} {{\n", name.lexeme));
                    self.depth += 1;
                    for method in methods {
                        self.indent();
                        self.function(method);
                        self.out.push('\n');
                    }
                    self.depth -= 1;
                    self.indent();
                    self.out.push('}');
                }
            }
        })
    }

    fn function(&mut self, decl: &FunctionDecl) {
        let params: Vec<&str> = decl.params.iter().map(|p| p.lexeme.as_str()).collect();
        self.out
            .push_str(&format!("{}({}) ", decl.name.lexeme, params.join(", ")));
        self.block(&decl.body);
    }

    fn block(&mut self, statements: &[Stmt]) {
        self.out.push_str("{\n");
        self.depth += 1;
        for stmt in statements {
            self.statement(stmt);
        }
        self.depth -= 1;
        self.indent();
        self.out.push('}');
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::scan;
    use crate::parser::parse;
    use indoc::indoc;

    fn parse_ok(source: &str) -> Vec<Stmt> {
        let parsed = parse(scan(source).tokens);
        assert!(parsed.errors.is_empty(), "unexpected errors: {:?}", parsed.errors);
        parsed.statements
    }

    #[test]
    fn prints_expressions_in_source_form() {
        let program = parse_ok("a = (1 + 2) * -b, c ? d : e or f;");
        assert_eq!(print_program(&program), "a = (1 + 2) * -b, c ? d : e or f;\n");
    }

    #[test]
    fn prints_nested_blocks_with_indentation() {
        let program = parse_ok("if (x) { print 1; } else print 2;");
        assert_eq!(
            print_program(&program),
            "if (x) {\n    print 1;\n} else print 2;\n"
        );
    }

    #[test]
    fn reparsing_printed_program_yields_equal_tree() {
        let source = indoc! {r#"
            var greeting = "hi";
            fun add(a, b) { return a + b; }
            class Point {
                init(x, y) { this.x = x; this.y = y; }
                sum() { return this.x + this.y; }
            }
            for (var i = 0; i < 3; i = i + 1) {
                if (i == 1) break;
                print add(i, 2.5) >= 3 and !false;
            }
            while (true) { print greeting, nil; break; }
            var p = Point(1, 2);
            p.x = p.sum() / 2;
            print p.x == 1.5 ? "yes" : "no";
        "#};

        let first = parse_ok(source);
        let printed = print_program(&first);
        let second = parse_ok(&printed);

        assert_eq!(first, second);
    }
}
