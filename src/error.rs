//! Centralised error hierarchy for the **Lox interpreter**.
//!
//! Static failures (scanner, parser, resolver) are values of [`LoxError`]; they
//! are collected per phase and handed to a [`Reporter`](crate::report::Reporter).
//! Evaluation failures are [`RuntimeError`]s, which unwind through every call
//! frame up to the top-level interpret loop.
//!
//! The module **does not** print diagnostics itself.

use std::fmt;
use std::io;
use thiserror::Error;

use log::info;

/// Canonical static error type used by the front end.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum LoxError {
    /// Lexical (scanner) error with source line information.
    #[error("[line {line}] Error: {message}")]
    Lex {
        /// Human‑readable description.
        message: String,

        /// 1‑based line where the error occurred.
        line: usize,
    },

    /// Syntactic (parser) error.
    #[error("[line {line}] Error{location}: {message}")]
    Parse {
        message: String,
        line: usize,
        /// ` at 'lexeme'` or ` at end`, empty when unknown.
        location: String,
    },

    /// Static‑analysis or resolution failure (e.g. early‑binding errors).
    #[error("[line {line}] Error{location}: {message}")]
    Resolve {
        message: String,
        line: usize,
        location: String,
    },

    /// Wrapper around `std::io::Error` (transparent).  Enables `?` on I/O ops.
    #[error(transparent)]
    Io(#[from] io::Error),

    /// UTF‑8 decoding failure when ingesting external text.
    #[error(transparent)]
    Utf8(#[from] std::str::Utf8Error),
}

impl LoxError {
    /// Helper constructor for the **scanner**.
    pub fn lex<S: Into<String>>(line: usize, msg: S) -> Self {
        let message: String = msg.into();

        info!("Creating Lex error: line={}, msg={}", line, message);

        LoxError::Lex { message, line }
    }

    /// Helper constructor for the **parser**.
    pub fn parse<S: Into<String>>(line: usize, location: String, msg: S) -> Self {
        let message: String = msg.into();

        info!("Creating Parse error: line={}, msg={}", line, message);

        LoxError::Parse {
            message,
            line,
            location,
        }
    }

    /// Helper constructor for the **resolver**.
    pub fn resolve<S: Into<String>>(line: usize, lexeme: &str, msg: S) -> Self {
        let message: String = msg.into();

        info!("Creating Resolve error: line={}, msg={}", line, message);

        LoxError::Resolve {
            message,
            line,
            location: format!(" at '{}'", lexeme),
        }
    }

    /// Source line of a front‑end error, `0` for I/O failures.
    pub fn line(&self) -> usize {
        match self {
            LoxError::Lex { line, .. }
            | LoxError::Parse { line, .. }
            | LoxError::Resolve { line, .. } => *line,
            LoxError::Io(_) | LoxError::Utf8(_) => 0,
        }
    }

    /// The bare message, without line decoration.
    pub fn message(&self) -> String {
        match self {
            LoxError::Lex { message, .. }
            | LoxError::Parse { message, .. }
            | LoxError::Resolve { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}

/// Crate‑wide `Result` alias for the static phases.
pub type Result<T> = std::result::Result<T, LoxError>;

/// Category of a [`RuntimeError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuntimeErrorKind {
    /// Operand of the wrong type (e.g. non‑number for `-`, float for `|`).
    Type,
    DivisionByZero,
    UndefinedVariable,
    UndefinedProperty,
    NotCallable,
    /// Argument count did not match the callee's arity.
    Arity,
    /// Index or range outside a list's bounds.
    Index,
    /// A string that does not denote a number, etc.
    Conversion,
    /// Failure of the print / readline streams.
    Io,
}

impl fmt::Display for RuntimeErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RuntimeErrorKind::Type => "type error",
            RuntimeErrorKind::DivisionByZero => "division by zero",
            RuntimeErrorKind::UndefinedVariable => "undefined variable",
            RuntimeErrorKind::UndefinedProperty => "undefined property",
            RuntimeErrorKind::NotCallable => "not callable",
            RuntimeErrorKind::Arity => "arity mismatch",
            RuntimeErrorKind::Index => "index error",
            RuntimeErrorKind::Conversion => "conversion error",
            RuntimeErrorKind::Io => "io error",
        };

        f.write_str(name)
    }
}

/// Runtime evaluation error, fatal to the current top‑level statement.
#[derive(Debug, Clone, Error, PartialEq)]
#[error("[line {line}] Runtime error: {message}")]
pub struct RuntimeError {
    pub kind: RuntimeErrorKind,
    pub message: String,
    pub line: usize,
}

impl RuntimeError {
    pub fn new<S: Into<String>>(kind: RuntimeErrorKind, line: usize, msg: S) -> Self {
        Self {
            kind,
            message: msg.into(),
            line,
        }
    }
}

/// A failure raised by an operator helper or a built‑in, before the
/// interpreter knows which source line to blame.
#[derive(Debug, Clone, Error, PartialEq)]
#[error("{message}")]
pub struct ValueError {
    pub kind: RuntimeErrorKind,
    pub message: String,
}

impl ValueError {
    pub fn new<S: Into<String>>(kind: RuntimeErrorKind, msg: S) -> Self {
        Self {
            kind,
            message: msg.into(),
        }
    }

    pub fn type_error<S: Into<String>>(msg: S) -> Self {
        Self::new(RuntimeErrorKind::Type, msg)
    }

    pub fn index<S: Into<String>>(msg: S) -> Self {
        Self::new(RuntimeErrorKind::Index, msg)
    }

    /// Attach the source line of the operator or call site.
    pub fn at(self, line: usize) -> RuntimeError {
        RuntimeError {
            kind: self.kind,
            message: self.message,
            line,
        }
    }
}
