//! Abstract syntax tree shared by the resolver and the interpreter.
//!
//! Both node families are closed sum types.  Nodes that the resolver binds to
//! a scope (`Variable`, `Assign`, `This`, `Super`) carry an [`ExprId`] handed
//! out by the parser; the resolved‑locals map is keyed by that id, so the two
//! passes agree on node identity without comparing addresses.

use serde::Serialize;
use std::fmt;
use std::rc::Rc;

/// Stable identity of a resolvable expression node.
pub type ExprId = usize;

/// A name as it appeared in the source, detached from the token buffer so the
/// AST can outlive the scanner.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Identifier {
    pub name: String,
    pub line: usize,
}

/// A **literal constant** that appears directly in the source code.
///
/// These variants are the *terminal leaves* of the expression tree.  The
/// parser copies the value at parse‑time so the AST can outlive the lexer’s
/// token buffer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum LiteralValue {
    Int(i64),

    Float(f64),

    /// String literal without surrounding quotes.
    Str(String),

    True,

    False,

    Nil,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum UnaryOp {
    /// `-`
    Negate,
    /// `!`
    Not,
    /// `~`
    BitNot,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BinaryOp {
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulo,
    Power,
    Equal,
    NotEqual,
    Less,
    LessEqual,
    Greater,
    GreaterEqual,
    BitOr,
    BitXor,
    BitAnd,
    ShiftLeft,
    ShiftRight,
}

impl BinaryOp {
    pub fn symbol(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Subtract => "-",
            BinaryOp::Multiply => "*",
            BinaryOp::Divide => "/",
            BinaryOp::Modulo => "%",
            BinaryOp::Power => "**",
            BinaryOp::Equal => "==",
            BinaryOp::NotEqual => "!=",
            BinaryOp::Less => "<",
            BinaryOp::LessEqual => "<=",
            BinaryOp::Greater => ">",
            BinaryOp::GreaterEqual => ">=",
            BinaryOp::BitOr => "|",
            BinaryOp::BitXor => "^",
            BinaryOp::BitAnd => "&",
            BinaryOp::ShiftLeft => "<<",
            BinaryOp::ShiftRight => ">>",
        }
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl UnaryOp {
    pub fn symbol(self) -> &'static str {
        match self {
            UnaryOp::Negate => "-",
            UnaryOp::Not => "!",
            UnaryOp::BitNot => "~",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LogicalOp {
    And,
    Or,
}

/// `=` or one of the compound forms, which keep the operator they combine
/// with instead of being desugared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AssignOp {
    Assign,
    Compound(BinaryOp),
}

impl fmt::Display for AssignOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssignOp::Assign => f.write_str("="),
            AssignOp::Compound(op) => write!(f, "{}=", op),
        }
    }
}

/// Whether a call was written `f(...)` or with indexing sugar `f[...]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CallStyle {
    Parens,
    Brackets,
}

/// **Abstract‑Syntax‑Tree node** representing every kind of *expression*.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Expr {
    /// A literal constant: number, string, `true`, `false`, or `nil`.
    Literal(LiteralValue),

    /// Prefix unary operator expression
    /// *Example:* `!isReady` or `-42`
    Unary {
        operator: UnaryOp,
        line: usize,
        right: Box<Expr>,
    },

    /// Infix binary operator expression
    /// *Example:* `a + b`, `x <= y`
    Binary {
        left: Box<Expr>,
        operator: BinaryOp,
        line: usize,
        right: Box<Expr>,
    },

    /// Short‑circuiting logical operators `and` / `or`.
    Logical {
        left: Box<Expr>,
        operator: LogicalOp,
        right: Box<Expr>,
    },

    /// Parenthesised sub‑expression: `"(" expression ")"`.
    Grouping(Box<Expr>),

    /// Variable access ‑ resolves to the identifier’s current value at runtime.
    Variable { id: ExprId, name: Identifier },

    /// Assignment expression: `identifier ("=" | "+=" | …) expression`
    Assign {
        id: ExprId,
        name: Identifier,
        operator: AssignOp,
        value: Box<Expr>,
    },

    /// Function‑ or method‑call expression, or `[...]` indexing sugar.
    Call {
        callee: Box<Expr>,
        style: CallStyle,
        /// Line of the closing `)` / `]`, retained for error reporting.
        line: usize,
        arguments: Vec<Expr>,
    },

    /// List literal `[a, b, c]`.
    List { line: usize, elements: Vec<Expr> },

    /// object.property
    Get { object: Box<Expr>, name: Identifier },

    /// object.property (op)= value
    Set {
        object: Box<Expr>,
        name: Identifier,
        operator: AssignOp,
        value: Box<Expr>,
    },

    /// object[index] (op)= value
    IndexSet {
        object: Box<Expr>,
        arguments: Vec<Expr>,
        operator: AssignOp,
        line: usize,
        value: Box<Expr>,
    },

    /// The 'this' keyword inside a method.
    This { id: ExprId, keyword: Identifier },

    /// `super.method`
    Super {
        id: ExprId,
        keyword: Identifier,
        method: Identifier,
    },
}

/// A function or method declaration.  Shared behind an `Rc` so closures can
/// keep it alive after the statement list is gone.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FunctionDecl {
    pub name: Identifier,

    /// Parameter names (arity ≤ 255).
    pub params: Vec<Identifier>,

    pub body: Vec<Stmt>,
}

/// **Abstract‑Syntax‑Tree node** for *statements*.  A program is a sequence
/// of these nodes returned by [`Parser::parse`](crate::parser::Parser::parse).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Stmt {
    /// Stand‑alone expression terminated by a semicolon.
    Expression(Expr),

    /// Variable declaration: `"var" IDENT ("=" initializer)? ";"`.
    Var {
        name: Identifier,
        initializer: Option<Expr>,
    },

    /// Braced scope containing zero or more declarations/statements.
    Block(Vec<Stmt>),

    /// `if` / `else` conditional.
    If {
        condition: Expr,
        then_branch: Box<Stmt>,
        else_branch: Option<Box<Stmt>>,
    },

    /// `while` loop; `for` loops are desugared into this.
    While { condition: Expr, body: Box<Stmt> },

    /// Function declaration ‑ becomes a first‑class callable value.
    Function(Rc<FunctionDecl>),

    /// `return` statement inside a function body.
    Return {
        keyword: Identifier,

        /// Absent ⇒ `nil` is returned.
        value: Option<Expr>,
    },

    Class {
        name: Identifier,
        /// Always an `Expr::Variable` when present.
        superclass: Option<Expr>,
        methods: Vec<Rc<FunctionDecl>>,
    },
}
