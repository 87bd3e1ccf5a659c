use log::debug;
use serde::Serialize;
use std::fmt;
use std::mem;

/// The different kinds of tokens recognized by the scanner.
///
/// Variants without data represent punctuation, operator or keyword tokens.
/// `STRING(String)`, `INT(i64)` and `FLOAT(f64)` carry their literal values.
/// `IDENTIFIER` is used for user‑defined names.
/// `EOF` marks the end of input.
#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Serialize)]
pub enum TokenType {
    /// '('
    LEFT_PAREN,

    /// ')'
    RIGHT_PAREN,

    /// '{'
    LEFT_BRACE,

    /// '}'
    RIGHT_BRACE,

    /// '['
    LEFT_BRACKET,

    /// ']'
    RIGHT_BRACKET,

    /// ','
    COMMA,

    /// '.'
    DOT,

    /// ';'
    SEMICOLON,

    /// '-'
    MINUS,

    /// '-='
    MINUS_EQUAL,

    /// '+'
    PLUS,

    /// '+='
    PLUS_EQUAL,

    /// '/'
    SLASH,

    /// '/='
    SLASH_EQUAL,

    /// '*'
    STAR,

    /// '*='
    STAR_EQUAL,

    /// '**'
    STAR_STAR,

    /// '**='
    STAR_STAR_EQUAL,

    /// '%'
    PERCENT,

    /// '%='
    PERCENT_EQUAL,

    /// '!'
    BANG,

    /// '!='
    BANG_EQUAL,

    /// '='
    EQUAL,

    /// '=='
    EQUAL_EQUAL,

    /// '>'
    GREATER,

    /// '>='
    GREATER_EQUAL,

    /// '<'
    LESS,

    /// '<='
    LESS_EQUAL,

    /// '~'
    BIT_NOT,

    /// '&'
    BIT_AND,

    /// '&='
    BIT_AND_EQUAL,

    /// '|'
    BIT_OR,

    /// '|='
    BIT_OR_EQUAL,

    /// '^'
    BIT_XOR,

    /// '^='
    BIT_XOR_EQUAL,

    /// '<<'
    SHIFT_LEFT,

    /// '<<='
    SHIFT_LEFT_EQUAL,

    /// '>>'
    SHIFT_RIGHT,

    /// '>>='
    SHIFT_RIGHT_EQUAL,

    /// A user‑defined identifier
    IDENTIFIER,

    /// A string literal (escapes already processed, no quotes)
    STRING(String),

    /// An integer literal (no fractional part in the source)
    INT(i64),

    /// A float literal (`.` followed by at least one digit)
    FLOAT(f64),

    /// 'and'
    AND,

    /// 'class'
    CLASS,

    /// 'else'
    ELSE,

    /// 'false'
    FALSE,

    /// 'fun'
    FUN,

    /// 'for'
    FOR,

    /// 'if'
    IF,

    /// 'nil'
    NIL,

    /// 'or'
    OR,

    /// 'return'
    RETURN,

    /// 'super'
    SUPER,

    /// 'this'
    THIS,

    /// 'true'
    TRUE,

    /// 'var'
    VAR,

    /// 'while'
    WHILE,

    /// End‑of‑file marker
    EOF,
}

impl TokenType {
    /// Variant name without payload, as printed by `tokenize`.
    pub fn name(&self) -> &'static str {
        match self {
            TokenType::LEFT_PAREN => "LEFT_PAREN",
            TokenType::RIGHT_PAREN => "RIGHT_PAREN",
            TokenType::LEFT_BRACE => "LEFT_BRACE",
            TokenType::RIGHT_BRACE => "RIGHT_BRACE",
            TokenType::LEFT_BRACKET => "LEFT_BRACKET",
            TokenType::RIGHT_BRACKET => "RIGHT_BRACKET",
            TokenType::COMMA => "COMMA",
            TokenType::DOT => "DOT",
            TokenType::SEMICOLON => "SEMICOLON",
            TokenType::MINUS => "MINUS",
            TokenType::MINUS_EQUAL => "MINUS_EQUAL",
            TokenType::PLUS => "PLUS",
            TokenType::PLUS_EQUAL => "PLUS_EQUAL",
            TokenType::SLASH => "SLASH",
            TokenType::SLASH_EQUAL => "SLASH_EQUAL",
            TokenType::STAR => "STAR",
            TokenType::STAR_EQUAL => "STAR_EQUAL",
            TokenType::STAR_STAR => "STAR_STAR",
            TokenType::STAR_STAR_EQUAL => "STAR_STAR_EQUAL",
            TokenType::PERCENT => "PERCENT",
            TokenType::PERCENT_EQUAL => "PERCENT_EQUAL",
            TokenType::BANG => "BANG",
            TokenType::BANG_EQUAL => "BANG_EQUAL",
            TokenType::EQUAL => "EQUAL",
            TokenType::EQUAL_EQUAL => "EQUAL_EQUAL",
            TokenType::GREATER => "GREATER",
            TokenType::GREATER_EQUAL => "GREATER_EQUAL",
            TokenType::LESS => "LESS",
            TokenType::LESS_EQUAL => "LESS_EQUAL",
            TokenType::BIT_NOT => "BIT_NOT",
            TokenType::BIT_AND => "BIT_AND",
            TokenType::BIT_AND_EQUAL => "BIT_AND_EQUAL",
            TokenType::BIT_OR => "BIT_OR",
            TokenType::BIT_OR_EQUAL => "BIT_OR_EQUAL",
            TokenType::BIT_XOR => "BIT_XOR",
            TokenType::BIT_XOR_EQUAL => "BIT_XOR_EQUAL",
            TokenType::SHIFT_LEFT => "SHIFT_LEFT",
            TokenType::SHIFT_LEFT_EQUAL => "SHIFT_LEFT_EQUAL",
            TokenType::SHIFT_RIGHT => "SHIFT_RIGHT",
            TokenType::SHIFT_RIGHT_EQUAL => "SHIFT_RIGHT_EQUAL",
            TokenType::IDENTIFIER => "IDENTIFIER",
            TokenType::STRING(_) => "STRING",
            TokenType::INT(_) => "INT",
            TokenType::FLOAT(_) => "FLOAT",
            TokenType::AND => "AND",
            TokenType::CLASS => "CLASS",
            TokenType::ELSE => "ELSE",
            TokenType::FALSE => "FALSE",
            TokenType::FUN => "FUN",
            TokenType::FOR => "FOR",
            TokenType::IF => "IF",
            TokenType::NIL => "NIL",
            TokenType::OR => "OR",
            TokenType::RETURN => "RETURN",
            TokenType::SUPER => "SUPER",
            TokenType::THIS => "THIS",
            TokenType::TRUE => "TRUE",
            TokenType::VAR => "VAR",
            TokenType::WHILE => "WHILE",
            TokenType::EOF => "EOF",
        }
    }
}

impl PartialEq for TokenType {
    /// Two TokenTypes are equal if they share the same variant
    /// (ignoring any inner data). Uses `mem::discriminant` to compare.
    fn eq(&self, other: &Self) -> bool {
        mem::discriminant(self) == mem::discriminant(other)
    }
}

/// A scanned token, including its type, the original lexeme,
/// and the line number where it was found.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Token<'a> {
    /// The category of this token.
    pub token_type: TokenType,

    /// The exact substring from the source that produced this token.
    pub lexeme: &'a str,

    /// 1‑based line number in the source (the line the token *ends* on).
    pub line: usize,
}

impl<'a> Token<'a> {
    /// Create a new Token with the given type, lexeme, and line.
    pub fn new(token_type: TokenType, lexeme: &'a str, line: usize) -> Self {
        debug!(
            "Creating new token: type={:?}, lexeme={}, line={}",
            token_type, lexeme, line
        );

        Self {
            token_type,
            lexeme,
            line,
        }
    }

    /// Location suffix used by parse diagnostics: ` at end` or ` at 'x'`.
    pub fn location(&self) -> String {
        if matches!(self.token_type, TokenType::EOF) {
            " at end".to_string()
        } else {
            format!(" at '{}'", self.lexeme)
        }
    }
}

impl<'a> fmt::Display for Token<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} ", self.token_type.name(), self.lexeme)?;

        match &self.token_type {
            TokenType::STRING(s) => f.write_str(s),
            TokenType::INT(n) => {
                let mut buf = itoa::Buffer::new();
                f.write_str(buf.format(*n))
            }
            // 3.0 → "3.0", 3.14 → "3.14"
            TokenType::FLOAT(n) if n.fract() == 0.0 => write!(f, "{:.1}", n),
            TokenType::FLOAT(n) => write!(f, "{}", n),
            _ => f.write_str("null"),
        }
    }
}
