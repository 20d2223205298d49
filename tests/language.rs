use indoc::indoc;
use lox::{run_source, ErrorKind, Interpreter, LoxError, Mode};

fn run_in(mode: Mode, src: &str) -> (String, Result<(), Vec<LoxError>>) {
    let mut interpreter = Interpreter::new(Vec::new(), mode);
    let result = run_source(&mut interpreter, src);
    let out = String::from_utf8(interpreter.into_output()).expect("output is UTF-8");
    (out, result)
}

fn assert_output(src: &str, expected: &str) {
    let (out, result) = run_in(Mode::Script, src);
    if let Err(errors) = result {
        panic!("program failed:\n{src}\nErrors: {errors:?}");
    }
    assert_eq!(out, expected, "program:\n{src}");
}

fn assert_failure(src: &str, kind: ErrorKind, message: &str) -> String {
    let (out, result) = run_in(Mode::Script, src);
    let errors = result.expect_err("program should fail");
    assert_eq!(errors.len(), 1, "errors: {errors:?}");
    assert_eq!(errors[0].kind, kind);
    assert_eq!(errors[0].message, message);
    out
}

#[test]
fn multiplication_binds_tighter_than_addition() {
    assert_output("print 1 + 2 * 3;", "7\n");
    assert_output("print (1 + 2) * 3;", "9\n");
    assert_output("print -2 - -3;", "1\n");
}

#[test]
fn comma_operator_runs_left_to_right_and_yields_last() {
    assert_output("print (1, 2, 3);", "3\n");
    assert_output(
        indoc! {"
            var a = 0;
            var b = (a = a + 1, a = a * 10, a);
            print b;
        "},
        "10\n",
    );
}

#[test]
fn plus_concatenates_numbers_with_strings() {
    assert_output(r#"print "x" + 1;"#, "x1\n");
    assert_output(r#"print 1.0 + "y";"#, "1y\n");
    assert_output(r#"print "a" + "b";"#, "ab\n");
    assert_failure(
        r#"print "a" + nil;"#,
        ErrorKind::Type,
        "Operands must be two numbers or two strings.",
    );
}

#[test]
fn division_by_zero_is_reported() {
    assert_failure("print 1 / 0;", ErrorKind::DivideByZero, "Divide by zero.");
    assert_output("print 0 / 1;", "0\n");
    assert_output("print 7 / 2;", "3.5\n");
}

#[test]
fn logical_operators_return_operands() {
    assert_output(r#"print false or "a";"#, "a\n");
    assert_output(r#"print 0 and "b";"#, "b\n");
    assert_output(r#"print nil and "b";"#, "nil\n");
    assert_output(r#"print "x" or undefined;"#, "x\n");
}

#[test]
fn ternary_evaluates_only_the_chosen_branch() {
    assert_output(r#"print true ? "yes" : 1 / 0;"#, "yes\n");
    assert_output("print nil ? 1 : false ? 2 : 3;", "3\n");
}

#[test]
fn blocks_shadow_and_assign_outer_bindings() {
    assert_output(
        indoc! {"
            var a = 1;
            { var a = 2; print a; }
            print a;
            { a = 3; }
            print a;
        "},
        "2\n1\n3\n",
    );
}

#[test]
fn reading_uninitialized_variable_fails() {
    assert_failure(
        "var a; print a + 1;",
        ErrorKind::Uninitialized,
        "Uninitialized variable 'a'.",
    );
    assert_failure("var a; print -a;", ErrorKind::Uninitialized, "Uninitialized variable 'a'.");
    assert_failure(
        "var a; print a ? 1 : 2;",
        ErrorKind::Uninitialized,
        "Uninitialized variable 'a'.",
    );
    let out = assert_failure(
        "var a; fun id(x) { print \"called\"; return x; } print id(a);",
        ErrorKind::Uninitialized,
        "Uninitialized variable 'a'.",
    );
    assert_eq!(out, "");
    assert_output("var a = nil; print a;", "nil\n");
    assert_output("var a; a = 2; print a;", "2\n");
}

#[test]
fn undefined_variable_fails() {
    assert_failure("print nope;", ErrorKind::Reference, "Undefined variable 'nope'.");
    assert_failure("nope = 1;", ErrorKind::Reference, "Undefined variable 'nope'.");
}

#[test]
fn break_outside_loop_is_an_error() {
    assert_failure("break;", ErrorKind::Break, "Break statement outside of loop.");
    assert_failure("{ break; }", ErrorKind::Break, "Break statement outside of loop.");
    assert_failure(
        "fun f() { break; } while (true) { f(); }",
        ErrorKind::Break,
        "Break statement outside of loop.",
    );
}

#[test]
fn inner_break_leaves_outer_loop_running() {
    assert_output(
        indoc! {"
            for (var i = 0; i < 3; i = i + 1) {
                for (var j = 0; j < 10; j = j + 1) {
                    if (j == 1) break;
                    print i;
                }
            }
        "},
        "0\n1\n2\n",
    );
}

#[test]
fn top_level_return_is_an_error() {
    assert_failure("return 1;", ErrorKind::Break, "Can't return from top-level code.");
}

#[test]
fn syntax_errors_are_all_reported_and_nothing_runs() {
    let (out, result) = run_in(
        Mode::Script,
        indoc! {"
            print 1;
            var = 2;
            print 3;
            print (4;
            print 5;
        "},
    );

    let errors = result.expect_err("program should not parse");
    assert_eq!(out, "");
    assert_eq!(errors.len(), 2);
    assert!(errors.iter().all(|err| err.kind == ErrorKind::Syntax));
    assert_eq!(errors[0].message, "Expect variable name.");
    assert_eq!(errors[0].span.line, 2);
    assert_eq!(errors[1].message, "Expect ')' after expression.");
    assert_eq!(errors[1].span.line, 4);
}

#[test]
fn runtime_error_stops_execution_after_earlier_output() {
    let out = assert_failure(
        r#"print "before"; print -"x"; print "after";"#,
        ErrorKind::Type,
        "Operand must be a number.",
    );
    assert_eq!(out, "before\n");
}

#[test]
fn functions_and_closures() {
    assert_output(
        indoc! {"
            fun makeCounter() {
                var count = 0;
                fun increment() {
                    count = count + 1;
                    return count;
                }
                return increment;
            }
            var counter = makeCounter();
            counter();
            print counter();
            print makeCounter;
        "},
        "2\n<fn makeCounter>\n",
    );
}

#[test]
fn recursion_and_early_return() {
    assert_output(
        indoc! {"
            fun fib(n) {
                if (n < 2) return n;
                return fib(n - 1) + fib(n - 2);
            }
            print fib(15);
            fun first() { while (true) { return \"done\"; } }
            print first();
            fun nothing() {}
            print nothing();
        "},
        "610\ndone\nnil\n",
    );
}

#[test]
fn call_errors() {
    assert_failure(
        r#""str"();"#,
        ErrorKind::Call,
        "Can only call functions and classes.",
    );
    assert_failure(
        "fun f(a, b) {} f(1);",
        ErrorKind::Call,
        "Expected 2 arguments but got 1.",
    );
}

#[test]
fn unbounded_recursion_overflows_cleanly() {
    assert_failure("fun f() { f(); } f();", ErrorKind::Call, "Stack overflow.");
}

#[test]
fn recursion_just_under_the_call_cap_succeeds() {
    assert_output(
        "fun f(n) { if (n > 0) return f(n - 1); return 0; } print f(250);",
        "0\n",
    );
}

#[test]
fn deeply_nested_source_parses_and_runs() {
    let depth = 1_500;

    let parens = format!("print {}1{};", "(".repeat(depth), ")".repeat(depth));
    assert_output(&parens, "1\n");

    let negations = format!("print {}true;", "!".repeat(depth));
    assert_output(&negations, "true\n");

    let blocks = format!("{}print 2;{}", "{".repeat(depth), "}".repeat(depth));
    assert_output(&blocks, "2\n");
}

#[test]
fn classes_with_fields_methods_and_init() {
    assert_output(
        indoc! {r#"
            class Point {
                init(x, y) {
                    this.x = x;
                    this.y = y;
                }
                sum() { return this.x + this.y; }
            }
            var p = Point(1, 2);
            print p.sum();
            p.x = 10;
            var sum = p.sum;
            print sum();
            print p;
            print Point;
            print p.init(5, 5) == p;
        "#},
        "3\n12\nPoint instance\nPoint\ntrue\n",
    );
}

#[test]
fn property_errors() {
    assert_failure(
        "class A {} print A().missing;",
        ErrorKind::Reference,
        "Undefined property 'missing'.",
    );
    assert_failure("var a = 1; print a.b;", ErrorKind::Type, "Only instances have properties.");
    assert_failure("var a = 1; a.b = 2;", ErrorKind::Type, "Only instances have fields.");
}

#[test]
fn natives_are_installed() {
    assert_output("print clock() > 0;", "true\n");
    assert_output("print clock;", "<native fn>\n");
}

#[test]
fn interactive_mode_echoes_expression_statements() {
    let mut interpreter = Interpreter::new(Vec::new(), Mode::Interactive);
    run_source(&mut interpreter, "var a = 40;").unwrap();
    run_source(&mut interpreter, "a + 2;").unwrap();
    run_source(&mut interpreter, "print a;").unwrap();

    let errors = run_source(&mut interpreter, "a +;").unwrap_err();
    assert_eq!(errors.len(), 1);
    run_source(&mut interpreter, r#""still" + " alive";"#).unwrap();

    let out = String::from_utf8(interpreter.into_output()).unwrap();
    assert_eq!(out, "42\n40\nstill alive\n");
}

#[test]
fn runtime_error_inside_block_restores_outer_scope() {
    let mut interpreter = Interpreter::new(Vec::new(), Mode::Script);
    run_source(&mut interpreter, "var a = 1;").unwrap();

    let errors = run_source(&mut interpreter, r#"{ var a = 2; print -"x"; }"#).unwrap_err();
    assert_eq!(errors[0].kind, ErrorKind::Type);

    run_source(&mut interpreter, "print a;").unwrap();
    run_source(&mut interpreter, "a = 3; print a;").unwrap();

    let out = String::from_utf8(interpreter.into_output()).unwrap();
    assert_eq!(out, "1\n3\n");
}
