#[cfg(test)]
mod interpreter_tests {
    use loxwalk as lox;

    use lox::ast::{BinaryOp, UnaryOp};
    use lox::error::RuntimeErrorKind;
    use lox::ops;
    use lox::output::SharedBuffer;
    use lox::report::{CollectingReporter, Diagnostic, Phase};
    use lox::value::Value;
    use lox::{Lox, RunOutcome};

    fn run_with_input(source: &str, input: &'static [u8]) -> (RunOutcome, String, Vec<Diagnostic>) {
        let out = SharedBuffer::new();
        let mut lox = Lox::with_io(CollectingReporter::new(), out.clone(), input);
        let outcome = lox.run(source);

        (outcome, out.contents(), lox.reporter().diagnostics.clone())
    }

    fn run(source: &str) -> (RunOutcome, String, Vec<Diagnostic>) {
        run_with_input(source, b"")
    }

    /// Output of a program that must complete.
    fn output(source: &str) -> String {
        let (outcome, out, diagnostics) = run(source);
        assert!(outcome.completed, "program failed: {:?}", diagnostics);
        out
    }

    /// The runtime error message of a program that must fail at runtime.
    fn runtime_error(source: &str) -> String {
        let (outcome, _, diagnostics) = run(source);
        assert!(outcome.had_runtime_error, "expected a runtime error");
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].phase, Phase::Runtime);
        diagnostics[0].message.clone()
    }

    // ───────────────────────────── operators ──────────────────────────────

    #[test]
    fn test_int_division_truncates_toward_zero() {
        let v = ops::binary(BinaryOp::Divide, &Value::Int(-7), &Value::Int(2)).unwrap();
        assert_eq!(v, Value::Int(-3));
    }

    #[test]
    fn test_mixed_operands_promote_to_float() {
        let v = ops::binary(BinaryOp::Add, &Value::Int(1), &Value::Float(0.5)).unwrap();
        assert!(matches!(v, Value::Float(f) if f == 1.5));
    }

    #[test]
    fn test_zero_divisor_of_either_type_is_an_error() {
        for divisor in [Value::Int(0), Value::Float(0.0)] {
            let err = ops::binary(BinaryOp::Divide, &Value::Int(1), &divisor).unwrap_err();
            assert_eq!(err.kind, RuntimeErrorKind::DivisionByZero);

            let err = ops::binary(BinaryOp::Modulo, &Value::Float(1.0), &divisor).unwrap_err();
            assert_eq!(err.kind, RuntimeErrorKind::DivisionByZero);
        }
    }

    #[test]
    fn test_bitwise_rejects_floats() {
        let err = ops::binary(BinaryOp::BitAnd, &Value::Float(1.0), &Value::Int(1)).unwrap_err();
        assert_eq!(err.kind, RuntimeErrorKind::Type);

        let err = ops::unary(UnaryOp::BitNot, &Value::Float(1.0)).unwrap_err();
        assert_eq!(err.kind, RuntimeErrorKind::Type);
    }

    #[test]
    fn test_integer_overflow_wraps() {
        let v = ops::binary(BinaryOp::Add, &Value::Int(i64::MAX), &Value::Int(1)).unwrap();
        assert_eq!(v, Value::Int(i64::MIN));
    }

    #[test]
    fn test_arithmetic_output() {
        assert_eq!(
            output("print(7 / 2); print(7.0 / 2); print(2.0 * 3); print(-7 % 3); print(1 + 2.5);"),
            "3\n3.5\n6\n-1\n3.5\n"
        );
    }

    #[test]
    fn test_float_display_is_plain() {
        assert_eq!(
            output("print(0.1 + 0.2); print(10.0 ** 20); print(-0.5);"),
            "0.30000000000000004\n100000000000000000000\n-0.5\n"
        );
    }

    #[test]
    fn test_bitwise_output() {
        assert_eq!(
            output("print(6 & 3); print(6 | 3); print(6 ^ 3); print(~0); print(1 << 4); print(-16 >> 2);"),
            "2\n7\n5\n-1\n16\n-4\n"
        );
        assert_eq!(runtime_error("print(1.5 | 1);"), "Operands must be integers.");
    }

    #[test]
    fn test_string_concatenation() {
        assert_eq!(output("print(\"foo\" + \"bar\");"), "foobar\n");
        assert_eq!(
            runtime_error("print(\"a\" + 1);"),
            "Operands must be two numbers or two strings."
        );
        assert_eq!(runtime_error("print(-\"a\");"), "Operand must be a number.");
        assert_eq!(runtime_error("print(\"a\" < 1);"), "Operands must be numbers.");
    }

    #[test]
    fn test_equality_and_truthiness() {
        assert_eq!(
            output(
                "print(1 == 1.0); print(nil == false); print(\"a\" == \"a\"); \
                 print([1] == [1]); var l = [1]; print(l == l); \
                 print(!0); print(!nil); if (\"\") print(\"yes\");"
            ),
            "false\nfalse\ntrue\nfalse\ntrue\nfalse\ntrue\nyes\n"
        );
    }

    #[test]
    fn test_int_and_float_are_never_equal() {
        assert_eq!(
            output("print(1 == 1.0); print(1 != 1.0); print(2.0 == 2.0); print(1 <= 1.0);"),
            "false\ntrue\ntrue\ntrue\n"
        );
        assert_ne!(Value::Int(1), Value::Float(1.0));
    }

    #[test]
    fn test_list_containing_itself_prints() {
        assert_eq!(
            output("var l = [1]; l.push(l); print(l); print(str(l)); print([l, 2]);"),
            "[1,[...]]\n[1,[...]]\n[[1,[...]],2]\n"
        );
    }

    #[test]
    fn test_shared_list_is_not_a_cycle() {
        assert_eq!(
            output("var a = [1]; var b = [a, a]; print(b);"),
            "[[1],[1]]\n"
        );
    }

    #[test]
    fn test_logical_operators_return_operands() {
        assert_eq!(
            output("print(nil or \"x\"); print(1 and 2); print(false and undefined());"),
            "x\n2\nfalse\n"
        );
    }

    #[test]
    fn test_compound_assignment_on_variables() {
        assert_eq!(
            output(
                "var x = 5; x += 2; x *= 3; print(x); x **= 2; print(x); \
                 x /= 2; print(x); x %= 7; print(x); x -= 0.5; print(x); \
                 var b = 12; b &= 10; b |= 1; b ^= 3; b <<= 2; b >>= 1; print(b);"
            ),
            "21\n441\n220\n3\n2.5\n20\n"
        );
    }

    #[test]
    fn test_compound_assignment_on_locals_and_fields() {
        let source = r#"
            class Box { init() { this.n = 1; } }
            fun f() {
                var total = 10;
                { total += 5; }
                var b = Box();
                b.n += total;
                return b.n;
            }
            print(f());
        "#;

        assert_eq!(output(source), "16\n");
    }

    #[test]
    fn test_assignment_is_an_expression() {
        assert_eq!(output("var a; var b; a = b = 3; print(a + b);"), "6\n");
        assert_eq!(output("var a = 1; print(a += 4);"), "5\n");
    }

    // ───────────────────────────── variables ──────────────────────────────

    #[test]
    fn test_undefined_variable() {
        assert_eq!(runtime_error("print(y);"), "Undefined variable 'y'.");
        assert_eq!(runtime_error("y = 1;"), "Undefined variable 'y'.");
    }

    #[test]
    fn test_closures_bind_statically() {
        let source = r#"
            var a = "global";
            {
                fun show() { print(a); }
                show();
                var a = "block";
                show();
            }
        "#;

        assert_eq!(output(source), "global\nglobal\n");
    }

    #[test]
    fn test_block_scoping_and_shadowing() {
        assert_eq!(
            output("var a = 1; { var a = 2; { var a = 3; print(a); } print(a); } print(a);"),
            "3\n2\n1\n"
        );
    }

    // ───────────────────────────── calls ──────────────────────────────────

    #[test]
    fn test_call_errors() {
        assert_eq!(runtime_error("\"x\"();"), "Can only call functions and classes.");
        assert_eq!(
            runtime_error("fun f(a, b) {} f(1);"),
            "Expected 2 arguments but got 1."
        );
        assert_eq!(runtime_error("clock(1);"), "Expected 0 arguments but got 1.");
    }

    #[test]
    fn test_return_unwinds_loops() {
        let source = r#"
            fun find(limit) {
                for (var i = 0; i < 100; i += 1) {
                    while (true) {
                        if (i == limit) return i * 10;
                        break_out();
                    }
                }
            }
            fun break_out() {}
            print(find(0));
        "#;

        assert_eq!(output(source), "0\n");
    }

    #[test]
    fn test_function_without_return_yields_nil() {
        assert_eq!(output("fun f() {} print(f());"), "nil\n");
    }

    // ───────────────────────────── built-ins ──────────────────────────────

    #[test]
    fn test_type_names() {
        let source = r#"
            class A {}
            fun f() {}
            print(type(1)); print(type(1.5)); print(type("s")); print(type(true));
            print(type(nil)); print(type([1])); print(type(A)); print(type(A()));
            print(type(f)); print(type(print));
        "#;

        assert_eq!(
            output(source),
            "<int>\n<float>\n<str>\n<bool>\n<nil>\n<list>\n<class A>\n<A instance>\n<fun f>\n<native function: print>\n"
        );
    }

    #[test]
    fn test_display_forms() {
        assert_eq!(
            output("class A {} fun f() {} print(f); print(A); print(A()); print(clock); print([1, \"a\", nil]);"),
            "<fun f>\n<class A>\nA instance\n<native function: clock>\n[1,a,nil]\n"
        );
    }

    #[test]
    fn test_conversions() {
        assert_eq!(
            output("print(int(\"42\") + 1); print(int(3.9)); print(float(\"2.5\")); print(float(2)); print(str(12) + \"!\");"),
            "43\n3\n2.5\n2\n12!\n"
        );
        assert_eq!(
            runtime_error("int(\"abc\");"),
            "Can not convert argument to integer."
        );
        assert_eq!(runtime_error("float(nil);"), "Can not convert argument to float.");
    }

    #[test]
    fn test_clock_returns_seconds() {
        assert_eq!(output("print(type(clock())); print(clock() > 1000000000);"), "<float>\ntrue\n");
    }

    #[test]
    fn test_readline() {
        let (outcome, out, _) = run_with_input(
            "var n = readline(\"name? \"); print(\"hi \" + n); print(readline(\"> \"));",
            b"alice\r\n",
        );

        assert!(outcome.completed);
        assert_eq!(out, "name? hi alice\n> nil\n");
    }

    // ───────────────────────────── lists ──────────────────────────────────

    #[test]
    fn test_list_methods() {
        let source = r#"
            var xs = list();
            xs.push(1); xs.push(2); xs.push(3);
            print(xs.len());
            print(xs.pop());
            xs.set_at(0, "a");
            print(xs.get_at(0));
            print(xs);
            xs.push(4);
            print(xs.slice(1, 3));
            xs.clear();
            print(xs.len());
        "#;

        assert_eq!(output(source), "3\n3\na\n[a,2]\n[2,4]\n0\n");
    }

    #[test]
    fn test_list_indexing_sugar() {
        let source = r#"
            var xs = [10, 20, 30];
            print(xs[1]);
            xs[1] = 5;
            xs[0] += 1;
            print(xs);
            print(xs(2));
        "#;

        assert_eq!(output(source), "20\n[11,5,30]\n30\n");
    }

    #[test]
    fn test_list_errors() {
        assert_eq!(runtime_error("[1, 2][5];"), "Index 5 is out of range.");
        assert_eq!(runtime_error("[1][-1];"), "Index -1 is out of range.");
        assert_eq!(runtime_error("[1][\"0\"];"), "Index should be an integer.");
        assert_eq!(runtime_error("list().pop();"), "List is empty.");
        assert_eq!(
            runtime_error("[1, 2].slice(1, 1);"),
            "slice: first index should be smaller than second index."
        );
        assert_eq!(
            runtime_error("[1, 2].slice(0, 3);"),
            "slice: parameters are not in valid range."
        );
        assert_eq!(
            runtime_error("var xs = [1]; xs.size = 2;"),
            "Can't set attribute for builtin classes."
        );
        assert_eq!(runtime_error("[1].foo;"), "Undefined property 'foo'.");
    }

    // ───────────────────────────── sessions ───────────────────────────────

    #[test]
    fn test_runtime_error_stops_remaining_statements() {
        let (outcome, out, diagnostics) = run("print(1);\nprint(x);\nprint(2);");

        assert!(!outcome.completed);
        assert!(outcome.had_runtime_error);
        assert!(!outcome.had_static_error);
        assert_eq!(out, "1\n");
        assert_eq!(diagnostics[0].line, 2);
    }

    #[test]
    fn test_static_error_prevents_execution() {
        let (outcome, out, diagnostics) = run("print(1);\nvar = 2;");

        assert!(outcome.had_static_error);
        assert!(!outcome.had_runtime_error);
        assert_eq!(out, "");
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].phase, Phase::Parse);
    }

    #[test]
    fn test_globals_persist_and_scope_is_restored_after_error() {
        let out = SharedBuffer::new();
        let mut lox = Lox::with_io(CollectingReporter::new(), out.clone(), &b""[..]);

        assert!(lox.run("var a = 1; fun f() { var a = 2; { return missing; } }").completed);
        assert!(lox.run("f();").had_runtime_error);
        assert!(lox.run("print(a); fun g() { return a; } print(g());").completed);

        assert_eq!(out.take(), "1\n1\n");
        assert_eq!(lox.reporter().count(Phase::Runtime), 1);
    }
}
