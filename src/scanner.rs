//! Module `scanner` implements a one‑pass, streaming lexer.
//!
//! It transforms a source string into a sequence of `Token<'a>`s, skipping
//! whitespace and comments, and emitting exactly one `EOF` token at the end.
//! Designed as a `FusedIterator`, it can be chained safely with other iterator
//! adapters.
//!
//! # Public API
//!
//! - `Scanner::new(src: &'a str) -> Scanner<'a>`
//!   Create a new lexer over the input buffer.
//!
//! - `impl Iterator for Scanner<'a>`
//!   Yields `Result<Token<'a>, LoxError>` on each `.next()`. Errors never stop
//!   the scan: after an `Err` the following calls keep producing tokens, so one
//!   pass reports every lexical problem in the file.
//!
//! - `Scanner::scan_all(self)` drains the iterator into tokens and errors.
//!
//! # Token Recognition
//!
//! - Single‑character tokens: `(`, `)`, `{`, `}`, `[`, `]`, `,`, `.`, `;`, `~`.
//! - Operators with one‑byte lookahead: `!=`, `==`, `<=`, `>=`, `+=`, `-=`,
//!   `*=`, `/=`, `%=`, `&=`, `|=`, `^=`, and two‑byte lookahead for `**=`,
//!   `<<=`, `>>=`.
//! - String literals: `"` … `"`, multi‑line, escapes `\\ \" \n \r \t`.
//! - Numeric literals: a `.` followed by a digit makes a `FLOAT`, anything
//!   else is an `INT`.
//! - Identifiers/keywords: alphanumeric/_ sequences, resolved via a
//!   perfect‑hash `KEYWORDS` map.
//!
//! # Performance
//!
//! - Bulk comment skipping via `memchr` for rapid new‑line search.
//! - Zero‑allocation lexeme slicing: tokens reference the original buffer.

use crate::error::LoxError;
use crate::token::{Token, TokenType};
use log::{debug, info};
use memchr::memchr;
use phf::phf_map;
use std::collections::VecDeque;
use std::iter::FusedIterator;

// ─────────────────────────────────────────────────────────────────────────────
// Static keyword map (compile‑time perfect hash)
// ─────────────────────────────────────────────────────────────────────────────

static KEYWORDS: phf::Map<&'static [u8], TokenType> = phf_map! {
    b"and"    => TokenType::AND,
    b"class"  => TokenType::CLASS,
    b"else"   => TokenType::ELSE,
    b"false"  => TokenType::FALSE,
    b"fun"    => TokenType::FUN,
    b"for"    => TokenType::FOR,
    b"if"     => TokenType::IF,
    b"nil"    => TokenType::NIL,
    b"or"     => TokenType::OR,
    b"return" => TokenType::RETURN,
    b"super"  => TokenType::SUPER,
    b"this"   => TokenType::THIS,
    b"true"   => TokenType::TRUE,
    b"var"    => TokenType::VAR,
    b"while"  => TokenType::WHILE,
};

/// A single pass **scanner / lexer** that converts source text into a
/// sequence of [`Token`]s.  The lifetime `'a` ties every emitted token’s
/// `lexeme` slice back to the original source buffer.
pub struct Scanner<'a> {
    src: &'a str,                // entire source file
    start: usize,                // index of the *first* byte of the current lexeme
    curr: usize,                 // index *one past* the last byte examined
    line: usize,                 // 1‑based line counter (\n increments)
    pending: Option<TokenType>,  // recognised token kind waiting to be emitted
    ready: Option<Token<'a>>,    // built token held back behind queued errors
    errors: VecDeque<LoxError>,  // diagnostics raised while scanning a lexeme
}

impl<'a> Scanner<'a> {
    /// Create a new lexer over `src`.
    #[inline]
    pub fn new(src: &'a str) -> Self {
        info!("Scanner created over {} bytes", src.len());

        Self {
            src,
            start: 0,
            curr: 0,
            line: 1,
            pending: None,
            ready: None,
            errors: VecDeque::new(),
        }
    }

    /// Run the scanner to completion, splitting tokens from diagnostics.
    pub fn scan_all(self) -> (Vec<Token<'a>>, Vec<LoxError>) {
        let mut tokens = Vec::new();
        let mut errors = Vec::new();

        for item in self {
            match item {
                Ok(token) => tokens.push(token),
                Err(e) => errors.push(e),
            }
        }

        info!(
            "Scan finished: {} token(s), {} error(s)",
            tokens.len(),
            errors.len()
        );

        (tokens, errors)
    }

    // ───────────────────────────── primitive helpers ────────────────────────

    #[inline(always)]
    fn bytes(&self) -> &'a [u8] {
        self.src.as_bytes()
    }

    /// Return the length of the input.
    #[inline(always)]
    fn len(&self) -> usize {
        self.src.len()
    }

    /// Are we at (or past) the end of input?
    #[inline(always)]
    fn is_at_end(&self) -> bool {
        self.curr >= self.len()
    }

    /// Advance one byte and return it.  *Panics* if called at EOF – higher‑level
    /// code always guards with [`is_at_end`].
    #[inline(always)]
    fn advance(&mut self) -> u8 {
        let b = self.bytes()[self.curr];
        self.curr += 1;
        b
    }

    /// Peek at the current byte without consuming it.  Returns `0` if past EOF
    /// to avoid branching at call‑site.
    #[inline(always)]
    fn peek(&self) -> u8 {
        if self.is_at_end() {
            0
        } else {
            self.bytes()[self.curr]
        }
    }

    /// Peek one byte beyond [`peek`].  Safe at EOF.
    #[inline(always)]
    fn peek_next(&self) -> u8 {
        if self.curr + 1 >= self.len() {
            0
        } else {
            self.bytes()[self.curr + 1]
        }
    }

    /// Conditionally consume a byte **iff** it matches `expected`.
    #[inline(always)]
    fn match_byte(&mut self, expected: u8) -> bool {
        if !self.is_at_end() && self.peek() == expected {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Skip UTF‑8 continuation bytes so `curr` lands on a char boundary.
    #[inline(always)]
    fn skip_continuation(&mut self) {
        while !self.is_at_end() && (self.peek() & 0b1100_0000) == 0b1000_0000 {
            self.advance();
        }
    }

    /// `plain` or, when followed by `=`, `with_equal`.
    #[inline(always)]
    fn either(&mut self, with_equal: TokenType, plain: TokenType) -> TokenType {
        if self.match_byte(b'=') {
            with_equal
        } else {
            plain
        }
    }

    fn error(&mut self, message: String) {
        self.errors.push_back(LoxError::lex(self.line, message));
    }

    // ───────────────────────────── core lexing ─────────────────────────────

    /// Scan a *single* lexeme starting at `self.curr`.  If the lexeme produces
    /// an actual token the kind is stored in `self.pending`.  Whitespace and
    /// comments leave `pending = None`; problems are queued in `self.errors`.
    fn scan_token(&mut self) {
        let b = self.advance();

        let tt = match b {
            // ── single‑character punctuators ──────────────────────────────
            b'(' => TokenType::LEFT_PAREN,
            b')' => TokenType::RIGHT_PAREN,
            b'{' => TokenType::LEFT_BRACE,
            b'}' => TokenType::RIGHT_BRACE,
            b'[' => TokenType::LEFT_BRACKET,
            b']' => TokenType::RIGHT_BRACKET,
            b',' => TokenType::COMMA,
            b'.' => TokenType::DOT,
            b';' => TokenType::SEMICOLON,
            b'~' => TokenType::BIT_NOT,

            // ── operators with an optional '=' suffix ─────────────────────
            b'-' => self.either(TokenType::MINUS_EQUAL, TokenType::MINUS),
            b'+' => self.either(TokenType::PLUS_EQUAL, TokenType::PLUS),
            b'%' => self.either(TokenType::PERCENT_EQUAL, TokenType::PERCENT),
            b'!' => self.either(TokenType::BANG_EQUAL, TokenType::BANG),
            b'=' => self.either(TokenType::EQUAL_EQUAL, TokenType::EQUAL),
            b'&' => self.either(TokenType::BIT_AND_EQUAL, TokenType::BIT_AND),
            b'|' => self.either(TokenType::BIT_OR_EQUAL, TokenType::BIT_OR),
            b'^' => self.either(TokenType::BIT_XOR_EQUAL, TokenType::BIT_XOR),

            // ── doubled operators (**, <<, >>) ───────────────────────────
            b'*' => {
                if self.match_byte(b'*') {
                    self.either(TokenType::STAR_STAR_EQUAL, TokenType::STAR_STAR)
                } else {
                    self.either(TokenType::STAR_EQUAL, TokenType::STAR)
                }
            }

            b'<' => {
                if self.match_byte(b'<') {
                    self.either(TokenType::SHIFT_LEFT_EQUAL, TokenType::SHIFT_LEFT)
                } else {
                    self.either(TokenType::LESS_EQUAL, TokenType::LESS)
                }
            }

            b'>' => {
                if self.match_byte(b'>') {
                    self.either(TokenType::SHIFT_RIGHT_EQUAL, TokenType::SHIFT_RIGHT)
                } else {
                    self.either(TokenType::GREATER_EQUAL, TokenType::GREATER)
                }
            }

            // ── whitespace / newline ─────────────────────────────────────
            b' ' | b'\r' | b'\t' => return,

            b'\n' => {
                self.line += 1;
                return;
            }

            // ── comments (// … until newline) ────────────────────────────
            b'/' => {
                if self.match_byte(b'/') {
                    // Fast‑forward to next newline using `memchr`.  The newline
                    // itself is left for the line counter.
                    if let Some(pos) = memchr(b'\n', &self.bytes()[self.curr..]) {
                        self.curr += pos;
                    } else {
                        self.curr = self.len();
                    }

                    return;
                }

                self.either(TokenType::SLASH_EQUAL, TokenType::SLASH)
            }

            b'"' => match self.parse_string() {
                Some(tt) => tt,
                None => return,
            },

            b'0'..=b'9' => match self.parse_number() {
                Some(tt) => tt,
                None => return,
            },

            b'a'..=b'z' | b'A'..=b'Z' | b'_' => self.parse_identifier(),

            // ── unexpected character ─────────────────────────────────────
            _ => {
                self.skip_continuation();
                let src: &'a str = self.src;
                let ch = &src[self.start..self.curr];
                self.error(format!("Unexpected character: {}", ch));
                return;
            }
        };

        self.pending = Some(tt);
    }

    /// Parse a double‑quoted string literal, processing escapes.
    ///
    /// * `self.start` still points to the opening `"`.
    /// * On success `self.curr` points **past** the closing `"`.
    fn parse_string(&mut self) -> Option<TokenType> {
        let mut value = String::new();
        let mut segment = self.curr;

        while !self.is_at_end() && self.peek() != b'"' {
            match self.peek() {
                b'\\' => {
                    value.push_str(&self.src[segment..self.curr]);
                    self.advance();

                    if self.is_at_end() {
                        self.error("String has a stray escape character: '\\'".to_string());
                        return None;
                    }

                    match self.advance() {
                        b'\\' => value.push('\\'),
                        b'"' => value.push('"'),
                        b'n' => value.push('\n'),
                        b'r' => value.push('\r'),
                        b't' => value.push('\t'),
                        other => {
                            if other == b'\n' {
                                self.line += 1;
                            }
                            let escape_start = self.curr - 1;
                            self.skip_continuation();
                            let escaped = self.src[escape_start..self.curr].to_string();
                            self.error(format!("Unknown escape sequence: '\\{}'", escaped));
                        }
                    }

                    segment = self.curr;
                }

                b'\n' => {
                    self.line += 1;
                    self.advance();
                }

                _ => {
                    self.advance();
                }
            }
        }

        if self.is_at_end() {
            self.error("Unterminated string.".to_string());
            return None;
        }

        value.push_str(&self.src[segment..self.curr]);
        self.advance(); // consume closing quote

        Some(TokenType::STRING(value))
    }

    /// Parse a numeric literal (`123`, `3.14`).  The fraction decides the kind.
    fn parse_number(&mut self) -> Option<TokenType> {
        while self.peek().is_ascii_digit() {
            self.advance();
        }

        let mut is_float = false;

        if self.peek() == b'.' && self.peek_next().is_ascii_digit() {
            is_float = true;
            self.advance(); // consume "."

            while self.peek().is_ascii_digit() {
                self.advance();
            }
        }

        let text: &str = &self.src[self.start..self.curr];

        if is_float {
            match text.parse::<f64>() {
                Ok(n) => Some(TokenType::FLOAT(n)),
                Err(_) => {
                    self.error(format!("Could not convert literal number to float: {}", text));
                    None
                }
            }
        } else {
            match text.parse::<i64>() {
                Ok(n) => Some(TokenType::INT(n)),
                Err(_) => {
                    self.error(format!("Could not convert literal number to int: {}", text));
                    None
                }
            }
        }
    }

    /// Parse an identifier and decide if it is a **keyword** or a generic
    /// `IDENTIFIER` token.
    fn parse_identifier(&mut self) -> TokenType {
        while {
            let c: u8 = self.peek();
            c.is_ascii_alphanumeric() || c == b'_'
        } {
            self.advance();
        }

        let slice: &[u8] = &self.bytes()[self.start..self.curr];

        KEYWORDS
            .get(slice)
            .cloned()
            .unwrap_or(TokenType::IDENTIFIER)
    }
}

// ───────────────────────── Iterator implementation ─────────────────────────

impl<'a> Iterator for Scanner<'a> {
    type Item = Result<Token<'a>, LoxError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            // 1. Diagnostics of the last lexeme come before its token.
            if let Some(e) = self.errors.pop_front() {
                return Some(Err(e));
            }

            if let Some(token) = self.ready.take() {
                return Some(Ok(token));
            }

            // 2. EOF guard – emit exactly one EOF then terminate.
            if self.curr > self.len() {
                return None;
            }

            if self.curr == self.len() {
                self.curr += 1; // ensure fused semantics
                return Some(Ok(Token::new(TokenType::EOF, "", self.line)));
            }

            // 3. Reset per‑token state and scan.
            self.start = self.curr;
            self.pending = None;
            self.scan_token();

            // 4. If a real token was recognised, stage it.
            if let Some(tt) = self.pending.take() {
                let src: &'a str = self.src;
                let lex: &'a str = &src[self.start..self.curr];
                debug!("Scanned token ({:?}) on line {}", tt, self.line);

                self.ready = Some(Token::new(tt, lex, self.line));
            }
        }
    }
}

impl<'a> FusedIterator for Scanner<'a> {}
