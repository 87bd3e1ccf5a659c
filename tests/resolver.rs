#[cfg(test)]
mod resolver_tests {
    use loxwalk as lox;

    use lox::interpreter::Interpreter;
    use lox::output::SharedBuffer;
    use lox::parser::Parser;
    use lox::resolver::Resolver;
    use lox::scanner::Scanner;

    /// Resolve `source`, returning the rendered resolve errors.
    fn resolve(source: &str) -> Vec<String> {
        let (tokens, lex_errors) = Scanner::new(source).scan_all();
        assert!(lex_errors.is_empty());

        let statements = Parser::new(&tokens).parse().expect("program should parse");

        let mut interpreter = Interpreter::with_io(Box::new(SharedBuffer::new()), Box::new(&b""[..]));
        let result = Resolver::new(&mut interpreter).resolve(&statements);

        match result {
            Ok(()) => Vec::new(),
            Err(errors) => errors.iter().map(|e| e.to_string()).collect(),
        }
    }

    #[test]
    fn test_valid_program_has_no_errors() {
        let source = r#"
            var global = 1;
            fun outer() {
                var a = global;
                fun inner() { return a; }
                return inner;
            }
            class A { init() { this.x = 1; } get() { return this.x; } }
            class B < A { get() { return super.get() + 1; } }
        "#;

        assert!(resolve(source).is_empty());
    }

    #[test]
    fn test_read_in_own_initializer() {
        assert_eq!(
            resolve("{ var a = 1; { var a = a; } }"),
            ["[line 1] Error at 'a': Can't read local variable in its own initializer."]
        );
    }

    #[test]
    fn test_global_self_reference_is_allowed() {
        assert!(resolve("var a = a;").is_empty());
    }

    #[test]
    fn test_duplicate_local_declaration() {
        assert_eq!(
            resolve("fun f() { var x = 1; var x = 2; }"),
            ["[line 1] Error at 'x': Already a variable with this name in this scope."]
        );
        assert_eq!(
            resolve("fun f(a, a) {}"),
            ["[line 1] Error at 'a': Already a variable with this name in this scope."]
        );
        assert!(resolve("var x = 1; var x = 2;").is_empty());
    }

    #[test]
    fn test_return_outside_function() {
        assert_eq!(
            resolve("return 1;"),
            ["[line 1] Error at 'return': Can't return from top-level code."]
        );
    }

    #[test]
    fn test_return_value_from_initializer() {
        assert_eq!(
            resolve("class A { init() { return 1; } }"),
            ["[line 1] Error at 'return': Can't return a value from an initializer."]
        );
        assert!(resolve("class A { init() { return; } }").is_empty());
    }

    #[test]
    fn test_this_outside_class() {
        assert_eq!(
            resolve("fun f() { return this; }"),
            ["[line 1] Error at 'this': Can't use 'this' outside of a class."]
        );
    }

    #[test]
    fn test_super_misuse() {
        assert_eq!(
            resolve("super.f();"),
            ["[line 1] Error at 'super': Can't use 'super' outside of a class."]
        );
        assert_eq!(
            resolve("class A { f() { super.f(); } }"),
            ["[line 1] Error at 'super': Can't use 'super' in a class with no superclass."]
        );
    }

    #[test]
    fn test_class_inheriting_from_itself() {
        assert_eq!(
            resolve("class A < A {}"),
            ["[line 1] Error at 'A': A class can't inherit from itself."]
        );
    }

    #[test]
    fn test_all_errors_are_collected() {
        let source = "return 1;\nfun f() { var y = 1; var y = 2; }\nprint(this);";
        let errors = resolve(source);

        assert_eq!(
            errors,
            [
                "[line 1] Error at 'return': Can't return from top-level code.",
                "[line 2] Error at 'y': Already a variable with this name in this scope.",
                "[line 3] Error at 'this': Can't use 'this' outside of a class.",
            ]
        );
    }
}
