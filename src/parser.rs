/*!
Recursive‑descent parser producing the [`ast`](crate::ast) statement list.

Time & Space Complexity
-----------------------
* **n** = number of tokens (including the sole EOF).

| Phase / function              | Cost | Rationale                                              |
|-------------------------------|-----:|--------------------------------------------------------|
| `Parser::parse` main loop     | Θ(n) | Each token is consumed once via `advance()`.           |
| Individual productions        | O(1) per token | Stream‑oriented; no extra scans.             |
| Error recovery `synchronize()`| O(k) | Discards tokens ≤ next statement boundary (`k ≤ n`).   |

Call‑stack depth grows with syntactic nesting (≪ n in practice).

### Logging Policy

| Location                     | Level  | Purpose                                   |
|------------------------------|--------|-------------------------------------------|
| `Parser::new`, `parse`       | `info` | Lifecycle milestones.                     |
| `declaration`, `statement`   | `debug`| High‑level descent into grammar branches. |
| Error paths (`consume`, etc.)| `debug`| Context before returning structured error.|

--------------------------------------------------------------------------------
Grammar (EBNF)
--------------

```text
program        → declaration* EOF ;
declaration    → classDecl | funDecl | varDecl | statement ;
classDecl      → "class" IDENT ( "<" IDENT )? "{" function* "}" ;
funDecl        → "fun" function ;
varDecl        → "var" IDENT ( "=" expression )? ";" ;
statement      → exprStmt | forStmt | ifStmt | returnStmt | whileStmt | block ;
forStmt        → "for" "(" ( varDecl | exprStmt | ";" )
                 expression? ";" expression? ")" statement ;
block          → "{" declaration* "}" ;
function       → IDENT "(" parameters? ")" block ;

expression     → assignment ;
assignment     → ( call "." )? IDENT ASSIGN_OP assignment
               | call "[" expression "]" ASSIGN_OP assignment
               | logic_or ;
logic_or       → logic_and ( "or" logic_and )* ;
logic_and      → equality ( "and" equality )* ;
equality       → comparison ( ( "!=" | "==" ) comparison )* ;
comparison     → bit_or ( ( ">" | ">=" | "<" | "<=" ) bit_or )* ;
bit_or         → bit_xor ( "|" bit_xor )* ;
bit_xor        → bit_and ( "^" bit_and )* ;
bit_and        → bit_shift ( "&" bit_shift )* ;
bit_shift      → additive ( ( "<<" | ">>" ) additive )* ;
additive       → multiplicative ( ( "-" | "+" ) multiplicative )* ;
multiplicative → unary ( ( "/" | "*" | "%" ) unary )* ;
unary          → ( "!" | "-" | "~" ) unary | power ;
power          → call ( "**" unary )? ;
call           → primary ( "(" arguments? ")" | "[" arguments? "]" | "." IDENT )* ;
primary        → INT | FLOAT | STRING | "true" | "false" | "nil" | "this"
               | IDENT | "(" expression ")" | "[" arguments? "]"
               | "super" "." IDENT ;
```

`-2 ** 2` therefore parses as `-(2 ** 2)`, and `**` is right‑associative
because its right operand re‑enters `unary`.
*/

use std::rc::Rc;

use crate::ast::{
    AssignOp, BinaryOp, CallStyle, Expr, ExprId, FunctionDecl, Identifier, LiteralValue,
    LogicalOp, Stmt, UnaryOp,
};
use crate::error::{LoxError, Result};
use crate::token::{Token, TokenType};

use log::{debug, info};

const MAX_ARGUMENTS: usize = 255;

/// Top‑level parser over an immutable slice of tokens.
pub struct Parser<'a> {
    tokens: &'a [Token<'a>],
    current: usize,
    next_id: ExprId,
    errors: Vec<LoxError>,
}

impl<'a> Parser<'a> {
    /// Construct a new parser.  `tokens` must end with an `EOF` token.
    pub fn new(tokens: &'a [Token<'a>]) -> Self {
        info!("Parser created with {} tokens", tokens.len());

        Self {
            tokens,
            current: 0,
            next_id: 0,
            errors: Vec::new(),
        }
    }

    /// Start numbering resolvable nodes at `id`, so several programs can be
    /// fed to one interpreter without their identities colliding.
    pub fn with_first_id(mut self, id: ExprId) -> Self {
        self.next_id = id;
        self
    }

    /// The first id not handed out yet.
    pub fn next_id(&self) -> ExprId {
        self.next_id
    }

    // ───────────────────────── public API ─────────────────────────

    /// Parse an entire program.  Every syntax error is collected; the
    /// statement list is only returned when there were none.
    pub fn parse(&mut self) -> std::result::Result<Vec<Stmt>, Vec<LoxError>> {
        info!("Beginning parse phase");

        let statements = self.parse_recovering();

        if self.errors.is_empty() {
            Ok(statements)
        } else {
            Err(std::mem::take(&mut self.errors))
        }
    }

    /// Parse as much as possible, keeping the statements that survived
    /// error recovery.  Diagnostics are available from [`Parser::errors`].
    pub fn parse_recovering(&mut self) -> Vec<Stmt> {
        let mut statements: Vec<Stmt> = Vec::new();

        while !self.is_at_end() {
            if let Some(stmt) = self.declaration() {
                statements.push(stmt);
            }
        }

        info!(
            "Parsed {} statement(s) with {} error(s)",
            statements.len(),
            self.errors.len()
        );

        statements
    }

    pub fn errors(&self) -> &[LoxError] {
        &self.errors
    }

    // ──────────────────────── declaration rules ───────────────────

    /// The recovery boundary: a failed declaration is reported, the token
    /// stream is resynchronised, and parsing resumes.
    fn declaration(&mut self) -> Option<Stmt> {
        debug!("Entering declaration");

        let result = if self.matches(TokenType::CLASS) {
            self.class_declaration()
        } else if self.matches(TokenType::FUN) {
            self.function("function").map(Stmt::Function)
        } else if self.matches(TokenType::VAR) {
            self.var_declaration()
        } else {
            self.statement()
        };

        match result {
            Ok(stmt) => Some(stmt),
            Err(e) => {
                debug!("Parse debug: {}", e);
                self.errors.push(e);
                self.synchronize();
                None
            }
        }
    }

    fn class_declaration(&mut self) -> Result<Stmt> {
        let name = self.identifier("Expect class name.")?;

        let superclass = if self.matches(TokenType::LESS) {
            let superclass_name = self.identifier("Expect superclass name.")?;

            Some(Expr::Variable {
                id: self.fresh_id(),
                name: superclass_name,
            })
        } else {
            None
        };

        self.consume(TokenType::LEFT_BRACE, "Expect '{' before class body.")?;

        let mut methods: Vec<Rc<FunctionDecl>> = Vec::new();

        while !self.check(TokenType::RIGHT_BRACE) && !self.is_at_end() {
            methods.push(self.function("method")?);
        }

        self.consume(TokenType::RIGHT_BRACE, "Expect '}' after class body.")?;

        Ok(Stmt::Class {
            name,
            superclass,
            methods,
        })
    }

    /// `kind` is "function" or "method"; it only flavours the messages.
    fn function(&mut self, kind: &str) -> Result<Rc<FunctionDecl>> {
        let name = self.identifier(&format!("Expect {} name.", kind))?;

        self.consume(
            TokenType::LEFT_PAREN,
            &format!("Expect '(' after {} name.", kind),
        )?;

        let mut params: Vec<Identifier> = Vec::new();

        if !self.check(TokenType::RIGHT_PAREN) {
            loop {
                if params.len() >= MAX_ARGUMENTS {
                    // Reported, but not worth abandoning the declaration.
                    let token = self.peek();
                    self.errors.push(LoxError::parse(
                        token.line,
                        token.location(),
                        "Can't have more than 255 parameters.",
                    ));
                }

                params.push(self.identifier("Expect parameter name.")?);

                if !self.matches(TokenType::COMMA) {
                    break;
                }
            }
        }

        self.consume(TokenType::RIGHT_PAREN, "Expect ')' after parameters.")?;
        self.consume(
            TokenType::LEFT_BRACE,
            &format!("Expect '{{' before {} body.", kind),
        )?;

        let body = self.block()?;

        Ok(Rc::new(FunctionDecl { name, params, body }))
    }

    fn var_declaration(&mut self) -> Result<Stmt> {
        let name = self.identifier("Expect variable name.")?;

        let initializer: Option<Expr> = if self.matches(TokenType::EQUAL) {
            Some(self.expression()?)
        } else {
            None
        };

        self.consume(
            TokenType::SEMICOLON,
            "Expect ';' after variable declaration.",
        )?;

        Ok(Stmt::Var { name, initializer })
    }

    // ───────────────────────── statement rules ────────────────────

    fn statement(&mut self) -> Result<Stmt> {
        debug!("Entering statement at line {}", self.peek().line);

        if self.matches(TokenType::FOR) {
            self.for_statement()
        } else if self.matches(TokenType::IF) {
            self.if_statement()
        } else if self.matches(TokenType::WHILE) {
            self.while_statement()
        } else if self.matches(TokenType::RETURN) {
            self.return_statement()
        } else if self.matches(TokenType::LEFT_BRACE) {
            Ok(Stmt::Block(self.block()?))
        } else {
            self.expression_statement()
        }
    }

    /// `for` has no node of its own: it becomes
    /// `{ init; while (cond) { body; increment; } }`.
    fn for_statement(&mut self) -> Result<Stmt> {
        self.consume(TokenType::LEFT_PAREN, "Expect '(' after 'for'.")?;

        let initializer = if self.matches(TokenType::SEMICOLON) {
            None
        } else if self.matches(TokenType::VAR) {
            Some(self.var_declaration()?)
        } else {
            Some(self.expression_statement()?)
        };

        let condition = if !self.check(TokenType::SEMICOLON) {
            self.expression()?
        } else {
            Expr::Literal(LiteralValue::True)
        };
        self.consume(TokenType::SEMICOLON, "Expect ';' after loop condition.")?;

        let increment = if !self.check(TokenType::RIGHT_PAREN) {
            Some(self.expression()?)
        } else {
            None
        };
        self.consume(TokenType::RIGHT_PAREN, "Expect ')' after for clauses.")?;

        let mut body = self.statement()?;

        if let Some(increment) = increment {
            body = Stmt::Block(vec![body, Stmt::Expression(increment)]);
        }

        body = Stmt::While {
            condition,
            body: Box::new(body),
        };

        if let Some(initializer) = initializer {
            body = Stmt::Block(vec![initializer, body]);
        }

        Ok(body)
    }

    fn expression_statement(&mut self) -> Result<Stmt> {
        let expr: Expr = self.expression()?;
        self.consume(TokenType::SEMICOLON, "Expect ';' after expression.")?;
        Ok(Stmt::Expression(expr))
    }

    fn if_statement(&mut self) -> Result<Stmt> {
        self.consume(TokenType::LEFT_PAREN, "Expect '(' after 'if'.")?;
        let condition: Expr = self.expression()?;
        self.consume(TokenType::RIGHT_PAREN, "Expect ')' after if condition.")?;

        let then_branch: Box<Stmt> = Box::new(self.statement()?);
        let else_branch: Option<Box<Stmt>> = if self.matches(TokenType::ELSE) {
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

    fn while_statement(&mut self) -> Result<Stmt> {
        self.consume(TokenType::LEFT_PAREN, "Expect '(' after 'while'.")?;
        let condition: Expr = self.expression()?;
        self.consume(TokenType::RIGHT_PAREN, "Expect ')' after condition.")?;
        let body: Box<Stmt> = Box::new(self.statement()?);

        Ok(Stmt::While { condition, body })
    }

    fn return_statement(&mut self) -> Result<Stmt> {
        let keyword = Self::to_identifier(self.previous());
        let value: Option<Expr> = if !self.check(TokenType::SEMICOLON) {
            Some(self.expression()?)
        } else {
            None
        };

        self.consume(TokenType::SEMICOLON, "Expect ';' after return value.")?;
        Ok(Stmt::Return { keyword, value })
    }

    fn block(&mut self) -> Result<Vec<Stmt>> {
        let mut statements: Vec<Stmt> = Vec::new();

        while !self.check(TokenType::RIGHT_BRACE) && !self.is_at_end() {
            if let Some(stmt) = self.declaration() {
                statements.push(stmt);
            }
        }

        self.consume(TokenType::RIGHT_BRACE, "Expect '}' after block.")?;
        Ok(statements)
    }

    // ─────────────────────── expression rules ─────────────────────

    fn expression(&mut self) -> Result<Expr> {
        self.assignment()
    }

    fn assignment(&mut self) -> Result<Expr> {
        let expr: Expr = self.logical_or()?;

        let operator = match assign_op(&self.peek().token_type) {
            Some(op) => op,
            None => return Ok(expr),
        };

        let equals: &Token<'a> = self.advance();
        let value = Box::new(self.assignment()?);

        match expr {
            Expr::Variable { id, name } => Ok(Expr::Assign {
                id,
                name,
                operator,
                value,
            }),

            Expr::Get { object, name } => Ok(Expr::Set {
                object,
                name,
                operator,
                value,
            }),

            Expr::Call {
                callee,
                style: CallStyle::Brackets,
                line,
                arguments,
            } => Ok(Expr::IndexSet {
                object: callee,
                arguments,
                operator,
                line,
                value,
            }),

            _ => {
                debug!("Invalid assignment target at line {}", equals.line);

                Err(LoxError::parse(
                    equals.line,
                    equals.location(),
                    "Invalid assignment target.",
                ))
            }
        }
    }

    fn logical_or(&mut self) -> Result<Expr> {
        let mut expr: Expr = self.logical_and()?;

        while self.matches(TokenType::OR) {
            let right: Expr = self.logical_and()?;

            expr = Expr::Logical {
                left: Box::new(expr),
                operator: LogicalOp::Or,
                right: Box::new(right),
            };
        }

        Ok(expr)
    }

    fn logical_and(&mut self) -> Result<Expr> {
        let mut expr: Expr = self.equality()?;

        while self.matches(TokenType::AND) {
            let right: Expr = self.equality()?;

            expr = Expr::Logical {
                left: Box::new(expr),
                operator: LogicalOp::And,
                right: Box::new(right),
            };
        }

        Ok(expr)
    }

    /// One left‑associative precedence level: `operand ( op operand )*`.
    fn binary_level(
        &mut self,
        operators: &[(TokenType, BinaryOp)],
        operand: fn(&mut Self) -> Result<Expr>,
    ) -> Result<Expr> {
        let mut expr: Expr = operand(self)?;

        'outer: loop {
            for (token_type, operator) in operators {
                if self.check(token_type.clone()) {
                    let line = self.advance().line;
                    let right: Expr = operand(self)?;

                    expr = Expr::Binary {
                        left: Box::new(expr),
                        operator: *operator,
                        line,
                        right: Box::new(right),
                    };

                    continue 'outer;
                }
            }

            return Ok(expr);
        }
    }

    fn equality(&mut self) -> Result<Expr> {
        self.binary_level(
            &[
                (TokenType::BANG_EQUAL, BinaryOp::NotEqual),
                (TokenType::EQUAL_EQUAL, BinaryOp::Equal),
            ],
            Self::comparison,
        )
    }

    fn comparison(&mut self) -> Result<Expr> {
        self.binary_level(
            &[
                (TokenType::GREATER, BinaryOp::Greater),
                (TokenType::GREATER_EQUAL, BinaryOp::GreaterEqual),
                (TokenType::LESS, BinaryOp::Less),
                (TokenType::LESS_EQUAL, BinaryOp::LessEqual),
            ],
            Self::bit_or,
        )
    }

    fn bit_or(&mut self) -> Result<Expr> {
        self.binary_level(&[(TokenType::BIT_OR, BinaryOp::BitOr)], Self::bit_xor)
    }

    fn bit_xor(&mut self) -> Result<Expr> {
        self.binary_level(&[(TokenType::BIT_XOR, BinaryOp::BitXor)], Self::bit_and)
    }

    fn bit_and(&mut self) -> Result<Expr> {
        self.binary_level(&[(TokenType::BIT_AND, BinaryOp::BitAnd)], Self::bit_shift)
    }

    fn bit_shift(&mut self) -> Result<Expr> {
        self.binary_level(
            &[
                (TokenType::SHIFT_LEFT, BinaryOp::ShiftLeft),
                (TokenType::SHIFT_RIGHT, BinaryOp::ShiftRight),
            ],
            Self::additive,
        )
    }

    fn additive(&mut self) -> Result<Expr> {
        self.binary_level(
            &[
                (TokenType::MINUS, BinaryOp::Subtract),
                (TokenType::PLUS, BinaryOp::Add),
            ],
            Self::multiplicative,
        )
    }

    fn multiplicative(&mut self) -> Result<Expr> {
        self.binary_level(
            &[
                (TokenType::SLASH, BinaryOp::Divide),
                (TokenType::STAR, BinaryOp::Multiply),
                (TokenType::PERCENT, BinaryOp::Modulo),
            ],
            Self::unary,
        )
    }

    fn unary(&mut self) -> Result<Expr> {
        let operator = match self.peek().token_type {
            TokenType::BANG => Some(UnaryOp::Not),
            TokenType::MINUS => Some(UnaryOp::Negate),
            TokenType::BIT_NOT => Some(UnaryOp::BitNot),
            _ => None,
        };

        if let Some(operator) = operator {
            let line = self.advance().line;
            let right: Expr = self.unary()?;

            return Ok(Expr::Unary {
                operator,
                line,
                right: Box::new(right),
            });
        }

        self.power()
    }

    fn power(&mut self) -> Result<Expr> {
        let expr: Expr = self.call()?;

        if self.matches(TokenType::STAR_STAR) {
            let line = self.previous().line;
            let right: Expr = self.unary()?;

            return Ok(Expr::Binary {
                left: Box::new(expr),
                operator: BinaryOp::Power,
                line,
                right: Box::new(right),
            });
        }

        Ok(expr)
    }

    fn call(&mut self) -> Result<Expr> {
        let mut expr: Expr = self.primary()?;

        loop {
            if self.matches(TokenType::LEFT_PAREN) {
                let (arguments, line) =
                    self.arguments(TokenType::RIGHT_PAREN, ")", Some(MAX_ARGUMENTS))?;

                expr = Expr::Call {
                    callee: Box::new(expr),
                    style: CallStyle::Parens,
                    line,
                    arguments,
                };
            } else if self.matches(TokenType::LEFT_BRACKET) {
                let (arguments, line) = self.arguments(TokenType::RIGHT_BRACKET, "]", Some(1))?;

                expr = Expr::Call {
                    callee: Box::new(expr),
                    style: CallStyle::Brackets,
                    line,
                    arguments,
                };
            } else if self.matches(TokenType::DOT) {
                let name = self.identifier("Expect property name after '.'.")?;

                expr = Expr::Get {
                    object: Box::new(expr),
                    name,
                };
            } else {
                break;
            }
        }

        Ok(expr)
    }

    /// Comma‑separated expressions up to `closing`.  Exceeding `limit` is
    /// reported but does not abort the parse.
    fn arguments(
        &mut self,
        closing: TokenType,
        closing_text: &str,
        limit: Option<usize>,
    ) -> Result<(Vec<Expr>, usize)> {
        let mut arguments: Vec<Expr> = Vec::new();

        if !self.check(closing.clone()) {
            loop {
                if let Some(limit) = limit {
                    if arguments.len() == limit {
                        let token = self.peek();
                        let noun = if limit == 1 { "argument" } else { "arguments" };

                        self.errors.push(LoxError::parse(
                            token.line,
                            token.location(),
                            format!("Can't have more than {} {}.", limit, noun),
                        ));
                    }
                }

                arguments.push(self.expression()?);

                if !self.matches(TokenType::COMMA) {
                    break;
                }
            }
        }

        let closing_token = self.consume(
            closing,
            &format!("Expect '{}' after arguments.", closing_text),
        )?;

        Ok((arguments, closing_token.line))
    }

    fn primary(&mut self) -> Result<Expr> {
        let token: &Token<'a> = self.peek();

        let literal = match &token.token_type {
            TokenType::FALSE => Some(LiteralValue::False),
            TokenType::TRUE => Some(LiteralValue::True),
            TokenType::NIL => Some(LiteralValue::Nil),
            TokenType::INT(n) => Some(LiteralValue::Int(*n)),
            TokenType::FLOAT(n) => Some(LiteralValue::Float(*n)),
            TokenType::STRING(s) => Some(LiteralValue::Str(s.clone())),
            _ => None,
        };

        if let Some(literal) = literal {
            self.advance();
            return Ok(Expr::Literal(literal));
        }

        if self.matches(TokenType::IDENTIFIER) {
            return Ok(Expr::Variable {
                id: self.fresh_id(),
                name: Self::to_identifier(self.previous()),
            });
        }

        if self.matches(TokenType::LEFT_PAREN) {
            let expr: Expr = self.expression()?;

            self.consume(TokenType::RIGHT_PAREN, "Expect ')' after expression.")?;

            return Ok(Expr::Grouping(Box::new(expr)));
        }

        if self.matches(TokenType::LEFT_BRACKET) {
            let (elements, line) = self.arguments(TokenType::RIGHT_BRACKET, "]", None)?;

            return Ok(Expr::List { line, elements });
        }

        if self.matches(TokenType::THIS) {
            return Ok(Expr::This {
                id: self.fresh_id(),
                keyword: Self::to_identifier(self.previous()),
            });
        }

        if self.matches(TokenType::SUPER) {
            let keyword = Self::to_identifier(self.previous());

            self.consume(TokenType::DOT, "Expect '.' after 'super'.")?;
            let method = self.identifier("Expect superclass method name.")?;

            return Ok(Expr::Super {
                id: self.fresh_id(),
                keyword,
                method,
            });
        }

        debug!("No expression at line {}", token.line);

        Err(LoxError::parse(
            token.line,
            token.location(),
            "Expect expression.",
        ))
    }

    // ────────────────────── utility helpers ───────────────────────

    fn fresh_id(&mut self) -> ExprId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    fn to_identifier(token: &Token<'_>) -> Identifier {
        Identifier {
            name: token.lexeme.to_string(),
            line: token.line,
        }
    }

    fn identifier(&mut self, message: &str) -> Result<Identifier> {
        let token = self.consume(TokenType::IDENTIFIER, message)?;
        Ok(Self::to_identifier(token))
    }

    #[inline(always)]
    fn matches(&mut self, ttype: TokenType) -> bool {
        if self.check(ttype) {
            self.advance();

            return true;
        }

        false
    }

    #[inline(always)]
    fn consume(&mut self, ttype: TokenType, message: &str) -> Result<&'a Token<'a>> {
        if self.check(ttype) {
            return Ok(self.advance());
        }

        let token = self.peek();
        debug!("consume failed at line {}: {}", token.line, message);

        Err(LoxError::parse(token.line, token.location(), message))
    }

    #[inline(always)]
    fn check(&self, ttype: TokenType) -> bool {
        if self.is_at_end() {
            return false;
        }

        self.peek().token_type == ttype
    }

    #[inline(always)]
    fn advance(&mut self) -> &'a Token<'a> {
        if !self.is_at_end() {
            self.current += 1;
        }

        self.previous()
    }

    #[inline(always)]
    fn is_at_end(&self) -> bool {
        matches!(self.peek().token_type, TokenType::EOF)
    }

    #[inline(always)]
    fn peek(&self) -> &'a Token<'a> {
        &self.tokens[self.current]
    }

    #[inline(always)]
    fn previous(&self) -> &'a Token<'a> {
        &self.tokens[self.current - 1]
    }

    /// Discards tokens until it thinks it is at a statement boundary.
    fn synchronize(&mut self) {
        self.advance(); // skip the token that caused the error

        while !self.is_at_end() {
            if matches!(self.previous().token_type, TokenType::SEMICOLON) {
                return;
            }

            match self.peek().token_type {
                TokenType::CLASS
                | TokenType::FUN
                | TokenType::VAR
                | TokenType::FOR
                | TokenType::IF
                | TokenType::WHILE
                | TokenType::RETURN => return,
                _ => {}
            }

            self.advance();
        }
    }
}

/// Assignment‑kind tokens and the operator they combine with.
fn assign_op(token_type: &TokenType) -> Option<AssignOp> {
    let op = match token_type {
        TokenType::EQUAL => return Some(AssignOp::Assign),
        TokenType::PLUS_EQUAL => BinaryOp::Add,
        TokenType::MINUS_EQUAL => BinaryOp::Subtract,
        TokenType::STAR_EQUAL => BinaryOp::Multiply,
        TokenType::SLASH_EQUAL => BinaryOp::Divide,
        TokenType::PERCENT_EQUAL => BinaryOp::Modulo,
        TokenType::STAR_STAR_EQUAL => BinaryOp::Power,
        TokenType::BIT_OR_EQUAL => BinaryOp::BitOr,
        TokenType::BIT_XOR_EQUAL => BinaryOp::BitXor,
        TokenType::BIT_AND_EQUAL => BinaryOp::BitAnd,
        TokenType::SHIFT_LEFT_EQUAL => BinaryOp::ShiftLeft,
        TokenType::SHIFT_RIGHT_EQUAL => BinaryOp::ShiftRight,
        _ => return None,
    };

    Some(AssignOp::Compound(op))
}
