#[cfg(test)]
mod scanner_tests {
    use loxwalk as lox;

    use lox::error::LoxError;
    use lox::scanner::*;
    use lox::token::*;

    fn assert_token_sequence(source: &str, expected: &[(TokenType, &str)]) {
        let scanner = Scanner::new(source);
        let tokens: Vec<_> = scanner.filter_map(Result::ok).collect();

        assert_eq!(tokens.len(), expected.len());

        for (actual, (expected_type, expected_lexeme)) in tokens.iter().zip(expected.iter()) {
            assert_eq!(actual.token_type, *expected_type);
            assert_eq!(actual.lexeme, *expected_lexeme);
        }
    }

    fn assert_token_matches(
        result: &Result<Token, LoxError>,
        expected_type: TokenType,
        expected_lexeme: &str,
    ) {
        match result {
            Ok(token) => {
                assert_eq!(
                    token.token_type, expected_type,
                    "Expected token type {:?}, got {:?}",
                    expected_type, token.token_type
                );
                assert_eq!(
                    token.lexeme, expected_lexeme,
                    "Expected lexeme '{}', got '{}'",
                    expected_lexeme, token.lexeme
                );
            }
            Err(e) => panic!("Expected token but got error: {}", e),
        }
    }

    #[test]
    fn test_scanner_01_symbols() {
        assert_token_sequence(
            "({*.,+*})",
            &[
                (TokenType::LEFT_PAREN, "("),
                (TokenType::LEFT_BRACE, "{"),
                (TokenType::STAR, "*"),
                (TokenType::DOT, "."),
                (TokenType::COMMA, ","),
                (TokenType::PLUS, "+"),
                (TokenType::STAR, "*"),
                (TokenType::RIGHT_BRACE, "}"),
                (TokenType::RIGHT_PAREN, ")"),
                (TokenType::EOF, ""),
            ],
        );
    }

    #[test]
    fn test_scanner_02_compound_operators() {
        assert_token_sequence(
            "** **= *= <<= >> >= ~ & |= ^ % %= /=",
            &[
                (TokenType::STAR_STAR, "**"),
                (TokenType::STAR_STAR_EQUAL, "**="),
                (TokenType::STAR_EQUAL, "*="),
                (TokenType::SHIFT_LEFT_EQUAL, "<<="),
                (TokenType::SHIFT_RIGHT, ">>"),
                (TokenType::GREATER_EQUAL, ">="),
                (TokenType::BIT_NOT, "~"),
                (TokenType::BIT_AND, "&"),
                (TokenType::BIT_OR_EQUAL, "|="),
                (TokenType::BIT_XOR, "^"),
                (TokenType::PERCENT, "%"),
                (TokenType::PERCENT_EQUAL, "%="),
                (TokenType::SLASH_EQUAL, "/="),
                (TokenType::EOF, ""),
            ],
        );
    }

    #[test]
    fn test_scanner_03_keywords_and_comments() {
        assert_token_sequence(
            "class Foo < Bar { // trailing comment\n init() { return this; } }",
            &[
                (TokenType::CLASS, "class"),
                (TokenType::IDENTIFIER, "Foo"),
                (TokenType::LESS, "<"),
                (TokenType::IDENTIFIER, "Bar"),
                (TokenType::LEFT_BRACE, "{"),
                (TokenType::IDENTIFIER, "init"),
                (TokenType::LEFT_PAREN, "("),
                (TokenType::RIGHT_PAREN, ")"),
                (TokenType::LEFT_BRACE, "{"),
                (TokenType::RETURN, "return"),
                (TokenType::THIS, "this"),
                (TokenType::SEMICOLON, ";"),
                (TokenType::RIGHT_BRACE, "}"),
                (TokenType::RIGHT_BRACE, "}"),
                (TokenType::EOF, ""),
            ],
        );
    }

    #[test]
    fn test_mixed_literals_with_lines() {
        let source = "+-/*123.321 \n 999 abc122 \"this is a string\nok?\"";
        let (tokens, errors) = Scanner::new(source).scan_all();

        assert!(errors.is_empty());

        let kinds: Vec<&str> = tokens.iter().map(|t| t.token_type.name()).collect();
        assert_eq!(
            kinds,
            ["PLUS", "MINUS", "SLASH", "STAR", "FLOAT", "INT", "IDENTIFIER", "STRING", "EOF"]
        );

        let lines: Vec<usize> = tokens.iter().map(|t| t.line).collect();
        assert_eq!(lines, [1, 1, 1, 1, 1, 2, 2, 3, 3]);

        assert!(matches!(tokens[4].token_type, TokenType::FLOAT(n) if n == 123.321));
        assert!(matches!(tokens[5].token_type, TokenType::INT(999)));
        assert!(
            matches!(&tokens[7].token_type, TokenType::STRING(s) if s == "this is a string\nok?")
        );
    }

    #[test]
    fn test_number_kinds() {
        let (tokens, _) = Scanner::new("1 1.5 2. .5").scan_all();

        assert!(matches!(tokens[0].token_type, TokenType::INT(1)));
        assert!(matches!(tokens[1].token_type, TokenType::FLOAT(n) if n == 1.5));
        // "2." is an int followed by a dot; ".5" is a dot followed by an int.
        assert!(matches!(tokens[2].token_type, TokenType::INT(2)));
        assert_eq!(tokens[3].token_type, TokenType::DOT);
        assert_eq!(tokens[4].token_type, TokenType::DOT);
        assert!(matches!(tokens[5].token_type, TokenType::INT(5)));
    }

    #[test]
    fn test_string_escapes() {
        let (tokens, errors) = Scanner::new(r#""a\tb\\c\"d\n""#).scan_all();

        assert!(errors.is_empty());
        assert!(matches!(&tokens[0].token_type, TokenType::STRING(s) if s == "a\tb\\c\"d\n"));
    }

    #[test]
    fn test_unknown_escape_reports_and_continues() {
        let (tokens, errors) = Scanner::new(r#""a\qb" 1"#).scan_all();

        assert_eq!(errors.len(), 1);
        assert!(errors[0].to_string().contains("Unknown escape sequence"));
        assert!(matches!(tokens.last().map(|t| &t.token_type), Some(TokenType::EOF)));
        assert!(tokens.iter().any(|t| matches!(t.token_type, TokenType::INT(1))));
    }

    #[test]
    fn test_unterminated_string() {
        let (tokens, errors) = Scanner::new("var s = \"abc\n").scan_all();

        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].to_string(), "[line 2] Error: Unterminated string.");
        assert_eq!(tokens.last().map(|t| t.line), Some(2));
    }

    #[test]
    fn test_unexpected_chars_token_sequence() {
        let source = ",.$(#";
        let results: Vec<_> = Scanner::new(source).collect();

        // COMMA, DOT, error '$', LEFT_PAREN, error '#', EOF
        assert_eq!(results.len(), 6, "Expected 6 items in result");

        assert_token_matches(&results[0], TokenType::COMMA, ",");
        assert_token_matches(&results[1], TokenType::DOT, ".");
        assert_token_matches(&results[3], TokenType::LEFT_PAREN, "(");
        assert_token_matches(&results[5], TokenType::EOF, "");

        let errors: Vec<String> = results
            .iter()
            .filter_map(|r| r.as_ref().err())
            .map(|e| e.to_string())
            .collect();

        assert_eq!(
            errors,
            [
                "[line 1] Error: Unexpected character: $",
                "[line 1] Error: Unexpected character: #",
            ]
        );
    }

    #[test]
    fn test_eof_emitted_once() {
        let mut scanner = Scanner::new("");

        assert_token_matches(&scanner.next().unwrap(), TokenType::EOF, "");
        assert!(scanner.next().is_none());
        assert!(scanner.next().is_none());
    }

    #[test]
    fn test_relexing_joined_lexemes_is_stable() {
        let source = "fun add(a, b) { return a + b * 2.5; }\nvar xs = [1, 2];\nxs[0] <<= 3;";
        let (tokens, errors) = Scanner::new(source).scan_all();
        assert!(errors.is_empty());

        let rebuilt: Vec<&str> = tokens.iter().map(|t| t.lexeme).collect();
        let rebuilt = rebuilt.join(" ");
        let (again, errors) = Scanner::new(&rebuilt).scan_all();
        assert!(errors.is_empty());

        assert_eq!(tokens.len(), again.len());
        for (a, b) in tokens.iter().zip(again.iter()) {
            assert_eq!(a.token_type, b.token_type);
            assert_eq!(a.lexeme, b.lexeme);
        }
    }

    #[test]
    fn test_token_display() {
        let (tokens, _) = Scanner::new("42 3.0 \"hi\" foo").scan_all();
        let shown: Vec<String> = tokens.iter().map(|t| t.to_string()).collect();

        assert_eq!(
            shown,
            [
                "INT 42 42",
                "FLOAT 3.0 3.0",
                "STRING \"hi\" hi",
                "IDENTIFIER foo null",
                "EOF  null",
            ]
        );
    }
}
