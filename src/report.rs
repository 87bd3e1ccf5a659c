//! Diagnostic sinks.
//!
//! The core never prints errors itself; it hands every static error and the
//! first uncaught runtime error to a [`Reporter`] supplied by the embedder.

use log::debug;

use crate::error::{LoxError, RuntimeError};

pub trait Reporter {
    /// A lexical, syntax or resolution error.  Called once per error.
    fn static_error(&mut self, error: &LoxError);

    /// The runtime error that stopped the program.
    fn runtime_error(&mut self, error: &RuntimeError);
}

/// Writes every diagnostic to stderr.
#[derive(Debug, Default)]
pub struct ConsoleReporter;

impl Reporter for ConsoleReporter {
    fn static_error(&mut self, error: &LoxError) {
        eprintln!("{}", error);
    }

    fn runtime_error(&mut self, error: &RuntimeError) {
        eprintln!("{}", error);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Lex,
    Parse,
    Resolve,
    Runtime,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub phase: Phase,
    pub line: usize,
    pub message: String,
}

/// Keeps diagnostics in memory, in the order they were reported.
#[derive(Debug, Default)]
pub struct CollectingReporter {
    pub diagnostics: Vec<Diagnostic>,
}

impl CollectingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<&str> {
        self.diagnostics
            .iter()
            .map(|d| d.message.as_str())
            .collect()
    }

    pub fn count(&self, phase: Phase) -> usize {
        self.diagnostics.iter().filter(|d| d.phase == phase).count()
    }
}

impl Reporter for CollectingReporter {
    fn static_error(&mut self, error: &LoxError) {
        let phase = match error {
            LoxError::Lex { .. } => Phase::Lex,
            LoxError::Resolve { .. } => Phase::Resolve,
            _ => Phase::Parse,
        };

        debug!("Collected {:?} diagnostic: {}", phase, error);

        self.diagnostics.push(Diagnostic {
            phase,
            line: error.line(),
            message: error.message(),
        });
    }

    fn runtime_error(&mut self, error: &RuntimeError) {
        debug!("Collected runtime diagnostic: {}", error);

        self.diagnostics.push(Diagnostic {
            phase: Phase::Runtime,
            line: error.line,
            message: error.message.clone(),
        });
    }
}
