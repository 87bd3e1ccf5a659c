#[cfg(test)]
mod parser_tests {
    use loxwalk as lox;

    use lox::ast::*;
    use lox::ast_printer::AstPrinter;
    use lox::error::LoxError;
    use lox::parser::Parser;
    use lox::scanner::Scanner;

    fn parse(source: &str) -> Result<Vec<Stmt>, Vec<LoxError>> {
        let (tokens, errors) = Scanner::new(source).scan_all();
        assert!(errors.is_empty(), "unexpected lexical errors: {:?}", errors);

        Parser::new(&tokens).parse()
    }

    fn print(source: &str) -> Vec<String> {
        parse(source)
            .expect("program should parse")
            .iter()
            .map(AstPrinter::print_stmt)
            .collect()
    }

    fn errors(source: &str) -> Vec<String> {
        parse(source)
            .expect_err("program should not parse")
            .iter()
            .map(|e| e.to_string())
            .collect()
    }

    #[test]
    fn test_precedence_multiplication_over_addition() {
        assert_eq!(print("2 + 3 * 4;"), ["(; (+ 2 (* 3 4)))"]);
    }

    #[test]
    fn test_power_is_right_associative() {
        assert_eq!(print("2 ** 3 ** 2;"), ["(; (** 2 (** 3 2)))"]);
    }

    #[test]
    fn test_unary_minus_wraps_power() {
        assert_eq!(print("-2 ** 2;"), ["(; (- (** 2 2)))"]);
        assert_eq!(print("(-2) ** 2;"), ["(; (** (group (- 2)) 2))"]);
    }

    #[test]
    fn test_bitwise_levels() {
        assert_eq!(
            print("a | b ^ c & d << 1 + 2;"),
            ["(; (| a (^ b (& c (<< d (+ 1 2))))))"]
        );
        assert_eq!(print("1 < 2 == true;"), ["(; (== (< 1 2) true))"]);
    }

    #[test]
    fn test_logical_and_binds_tighter_than_or() {
        assert_eq!(print("a or b and c;"), ["(; (or a (and b c)))"]);
    }

    #[test]
    fn test_binary_levels_are_left_associative() {
        assert_eq!(print("8 - 4 - 2;"), ["(; (- (- 8 4) 2))"]);
        assert_eq!(print("8 % 3 / 2;"), ["(; (/ (% 8 3) 2))"]);
    }

    #[test]
    fn test_assignment_targets() {
        assert_eq!(print("a = b = 1;"), ["(; (= a (= b 1)))"]);
        assert_eq!(print("a.b.c += 2;"), ["(; (+= (. (. a b) c) 2))"]);
        assert_eq!(print("xs[1] <<= 2;"), ["(; (<<= (index xs 1) 2))"]);
    }

    #[test]
    fn test_compound_assignment_keeps_operator() {
        let statements = parse("x **= 2;").unwrap();

        match &statements[0] {
            Stmt::Expression(Expr::Assign { name, operator, .. }) => {
                assert_eq!(name.name, "x");
                assert_eq!(*operator, AssignOp::Compound(BinaryOp::Power));
            }
            other => panic!("unexpected statement: {:?}", other),
        }
    }

    #[test]
    fn test_invalid_assignment_target() {
        assert_eq!(
            errors("1 + 2 = 3;"),
            ["[line 1] Error at '=': Invalid assignment target."]
        );
        assert_eq!(
            errors("f() = 3;"),
            ["[line 1] Error at '=': Invalid assignment target."]
        );
    }

    #[test]
    fn test_call_postfix_chain() {
        assert_eq!(
            print("a.b(1)[2].c();"),
            ["(; (call (. (index (call (. a b) 1) 2) c)))"]
        );
    }

    #[test]
    fn test_list_literal() {
        assert_eq!(print("[1, \"two\", [3.5]];"), ["(; (list 1 two (list 3.5)))"]);
        assert_eq!(print("[];"), ["(; (list))"]);
    }

    #[test]
    fn test_for_desugars_to_while() {
        assert_eq!(
            print("for (var i = 0; i < 3; i += 1) f(i);"),
            ["(block (var i 0) (while (< i 3) (block (; (call f i)) (; (+= i 1)))))"]
        );
        assert_eq!(print("for (;;) g();"), ["(while true (; (call g)))"]);
    }

    #[test]
    fn test_class_with_superclass() {
        assert_eq!(
            print("class B < A { init(x) { this.x = x; } get() { return super.get(); } }"),
            ["(class B < A (fun init (x) (; (= (. this x) x))) (fun get () (return (call (super get)))))"]
        );
    }

    #[test]
    fn test_missing_semicolon_reports_location() {
        assert_eq!(
            errors("var a = 1"),
            ["[line 1] Error at end: Expect ';' after variable declaration."]
        );
        assert_eq!(
            errors("print(1) print(2);"),
            ["[line 1] Error at 'print': Expect ';' after expression."]
        );
    }

    #[test]
    fn test_recovery_reports_each_bad_statement_once() {
        let errs = errors("var = 1;\nvar ok = 2;\nfun (a) {}\nok = 3;");

        assert_eq!(
            errs,
            [
                "[line 1] Error at '=': Expect variable name.",
                "[line 3] Error at '(': Expect function name.",
            ]
        );
    }

    #[test]
    fn test_recovery_keeps_well_formed_statements() {
        let (tokens, _) = Scanner::new("var x = ;\nprint(1);").scan_all();
        let mut parser = Parser::new(&tokens);

        let statements = parser.parse_recovering();

        assert_eq!(parser.errors().len(), 1);
        assert_eq!(statements.len(), 1);
        assert_eq!(AstPrinter::print_stmt(&statements[0]), "(; (call print 1))");
    }

    #[test]
    fn test_errors_inside_block_do_not_cascade() {
        let errs = errors("{ var a = ; var b = 2; }\nvar c = 3;");
        assert_eq!(errs, ["[line 1] Error at ';': Expect expression."]);
    }

    #[test]
    fn test_bracket_call_takes_one_argument() {
        assert_eq!(
            errors("xs[1, 2];"),
            ["[line 1] Error at '2': Can't have more than 1 argument."]
        );
    }

    #[test]
    fn test_parameter_limit_is_soft() {
        let params: Vec<String> = (0..256).map(|i| format!("p{}", i)).collect();
        let source = format!("fun f({}) {{}}\nvar after = 1;", params.join(", "));

        let errs = errors(&source);
        assert_eq!(errs, ["[line 1] Error at 'p255': Can't have more than 255 parameters."]);
    }

    #[test]
    fn test_ids_are_unique_and_continue_from_first_id() {
        let (tokens, _) = Scanner::new("a = b + c;").scan_all();
        let mut parser = Parser::new(&tokens).with_first_id(10);
        let statements = parser.parse().unwrap();

        assert_eq!(parser.next_id(), 13);

        match &statements[0] {
            Stmt::Expression(Expr::Assign { id, value, .. }) => {
                assert_eq!(*id, 10);
                match value.as_ref() {
                    Expr::Binary { left, right, .. } => {
                        assert!(matches!(left.as_ref(), Expr::Variable { id: 11, .. }));
                        assert!(matches!(right.as_ref(), Expr::Variable { id: 12, .. }));
                    }
                    other => panic!("unexpected expression: {:?}", other),
                }
            }
            other => panic!("unexpected statement: {:?}", other),
        }
    }

    #[test]
    fn test_ast_serializes_to_json() {
        let statements = parse("var x = 1;").unwrap();
        let json = serde_json::to_string(&statements).unwrap();

        assert!(json.contains("\"Var\""));
        assert!(json.contains("\"Int\":1"));
    }
}
