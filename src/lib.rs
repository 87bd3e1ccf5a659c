//! `loxwalk`: a tree‑walking interpreter for Lox with ints, floats, lists,
//! bitwise operators and compound assignment.
//!
//! Pipeline: [`scanner`] → [`parser`] → [`resolver`] → [`interpreter`].
//! [`Lox`] drives the phases and routes every diagnostic to a
//! [`Reporter`](report::Reporter).

pub mod ast;
pub mod ast_printer;
pub mod builtins;
pub mod callable;
pub mod environment;
pub mod error;
pub mod interpreter;
pub mod ops;
pub mod output;
pub mod parser;
pub mod report;
pub mod resolver;
pub mod scanner;
pub mod token;
pub mod value;

use std::io::{BufRead, Write};

use log::info;
use serde::Serialize;

use crate::ast::ExprId;
use crate::interpreter::Interpreter;
use crate::parser::Parser;
use crate::report::{ConsoleReporter, Reporter};
use crate::resolver::Resolver;
use crate::scanner::Scanner;

/// What happened to one program.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct RunOutcome {
    /// Every statement ran.
    pub completed: bool,
    /// A lexical, syntax or resolution error kept the program from running.
    pub had_static_error: bool,
    /// Execution stopped at an uncaught runtime error.
    pub had_runtime_error: bool,
}

impl RunOutcome {
    fn static_error() -> Self {
        Self {
            had_static_error: true,
            ..Self::default()
        }
    }
}

/// Program driver.  Globals survive between calls to [`Lox::run`], so a
/// sequence of runs behaves like one long session.
pub struct Lox<R: Reporter> {
    interpreter: Interpreter,
    reporter: R,
    next_id: ExprId,
}

impl<R: Reporter> Lox<R> {
    /// A driver printing to stdout and reading from stdin.
    pub fn new(reporter: R) -> Self {
        Self {
            interpreter: Interpreter::new(),
            reporter,
            next_id: 0,
        }
    }

    /// A driver with an explicit print sink and `readline` source.
    pub fn with_io<W, I>(reporter: R, output: W, input: I) -> Self
    where
        W: Write + 'static,
        I: BufRead + 'static,
    {
        Self {
            interpreter: Interpreter::with_io(Box::new(output), Box::new(input)),
            reporter,
            next_id: 0,
        }
    }

    pub fn reporter(&self) -> &R {
        &self.reporter
    }

    /// Scan, parse, resolve and interpret `source`.  Each static phase
    /// reports all of its errors; a phase with errors stops the pipeline.
    pub fn run(&mut self, source: &str) -> RunOutcome {
        info!("Running program of {} bytes", source.len());

        let (tokens, lex_errors) = Scanner::new(source).scan_all();
        if !lex_errors.is_empty() {
            for e in &lex_errors {
                self.reporter.static_error(e);
            }
            return RunOutcome::static_error();
        }

        let mut parser = Parser::new(&tokens).with_first_id(self.next_id);
        let parsed = parser.parse();
        self.next_id = parser.next_id();

        let statements = match parsed {
            Ok(statements) => statements,
            Err(errors) => {
                for e in &errors {
                    self.reporter.static_error(e);
                }
                return RunOutcome::static_error();
            }
        };

        if let Err(errors) = Resolver::new(&mut self.interpreter).resolve(&statements) {
            for e in &errors {
                self.reporter.static_error(e);
            }
            return RunOutcome::static_error();
        }

        match self.interpreter.interpret(&statements) {
            Ok(()) => RunOutcome {
                completed: true,
                ..RunOutcome::default()
            },
            Err(e) => {
                self.reporter.runtime_error(&e);
                RunOutcome {
                    had_runtime_error: true,
                    ..RunOutcome::default()
                }
            }
        }
    }
}

/// Run `source` once with console I/O and stderr diagnostics.
pub fn run(source: &str) -> RunOutcome {
    Lox::new(ConsoleReporter).run(source)
}
