use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser as ClapParser;
use clap::Subcommand;
use env_logger::Builder;
use log::{debug, info};
use memmap2::Mmap;

use loxwalk::ast_printer::AstPrinter;
use loxwalk::error::LoxError;
use loxwalk::parser::Parser;
use loxwalk::report::ConsoleReporter;
use loxwalk::scanner::Scanner;
use loxwalk::token::Token;
use loxwalk::Lox;

#[derive(ClapParser, Debug)]
#[command(version, about = "Tree-walking Lox interpreter", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    commands: Commands,

    /// Enable logging to app.log
    #[arg(long, global = true)]
    log: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Tokenizes input from a file, printing each token
    Tokenize {
        filename: Option<PathBuf>,

        /// Print the tokens as a JSON array
        #[arg(long)]
        json: bool,
    },

    /// Parses input from a file and prints each statement in prefix form
    Parse {
        filename: Option<PathBuf>,

        /// Print the syntax tree as JSON
        #[arg(long)]
        json: bool,
    },

    /// Runs input from a file as a Lox program
    Run { filename: Option<PathBuf> },
}

/// Reads a source file through a read-only memory map.
fn read_file(filename: &Path) -> Result<String> {
    info!("Reading file: {:?}", filename);

    let file = File::open(filename)
        .map_err(LoxError::from)
        .with_context(|| format!("Failed to open file {:?}", filename))?;

    let len = file
        .metadata()
        .with_context(|| format!("Failed to stat file {:?}", filename))?
        .len();

    // Zero-length mappings are rejected on some platforms.
    if len == 0 {
        return Ok(String::new());
    }

    // SAFETY: the map is read-only and dropped before this function returns.
    let map = unsafe { Mmap::map(&file) }
        .with_context(|| format!("Failed to map file {:?}", filename))?;

    let text = std::str::from_utf8(&map)
        .map_err(LoxError::from)
        .with_context(|| format!("File {:?} is not valid UTF-8", filename))?;

    info!("Read {} bytes from {:?}", len, filename);

    Ok(text.to_owned())
}

fn init_logger() -> Result<()> {
    // Create or open the log file
    let log_file = File::create("app.log").context("Failed to create app.log")?;

    Builder::new()
        .format(|buf, record| {
            // Strip 'loxwalk::' from module path
            let module = record
                .module_path()
                .unwrap_or("<unnamed>")
                .strip_prefix("loxwalk::")
                .unwrap_or(record.module_path().unwrap_or("<unnamed>"));
            writeln!(
                buf,
                "[{}:{}] - {}",
                module,
                record.line().unwrap_or(0),
                record.args()
            )
        })
        .target(env_logger::Target::Pipe(Box::new(log_file)))
        .filter(None, log::LevelFilter::Debug)
        .init();

    info!("Logger initialized, writing to app.log");
    Ok(())
}

fn no_input(subcommand: &str) -> ! {
    info!("No filepath provided for {}", subcommand);
    println!("No input filepath was provided. Exiting...");
    std::process::exit(0);
}

fn tokenize(source: &str, json: bool) -> Result<()> {
    let mut tokens: Vec<Token<'_>> = Vec::new();
    let mut tokenized = true;

    for item in Scanner::new(source) {
        match item {
            Ok(token) => {
                if json {
                    tokens.push(token);
                } else {
                    println!("{}", token);
                }
            }
            Err(e) => {
                tokenized = false;
                debug!("Tokenization debug: {}", e);
                eprintln!("{}", e);
            }
        }
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&tokens)?);
    }

    if !tokenized {
        debug!("Tokenization failed, exiting with code 65");
        std::process::exit(65);
    }

    info!("Tokenization completed successfully");
    Ok(())
}

fn parse(source: &str, json: bool) -> Result<()> {
    let (tokens, lex_errors) = Scanner::new(source).scan_all();

    if !lex_errors.is_empty() {
        for e in &lex_errors {
            eprintln!("{}", e);
        }
        std::process::exit(65);
    }

    let mut parser = Parser::new(&tokens);

    match parser.parse() {
        Ok(statements) => {
            info!("Parsed {} statements", statements.len());

            if json {
                println!("{}", serde_json::to_string_pretty(&statements)?);
            } else {
                for stmt in &statements {
                    println!("{}", AstPrinter::print_stmt(stmt));
                }
            }
        }

        Err(errors) => {
            for e in &errors {
                debug!("Parse debug: {}", e);
                eprintln!("{}", e);
            }
            std::process::exit(65);
        }
    }

    Ok(())
}

fn main() -> Result<()> {
    let args: Cli = Cli::parse();

    // Initialize logger only if --log flag is provided
    if args.log {
        init_logger()?;
    } else {
        env_logger::Builder::new()
            .filter_level(log::LevelFilter::Off)
            .init();
    }

    info!("CLI arguments: {:?}", args);

    match args.commands {
        Commands::Tokenize { filename, json } => {
            let filename = filename.unwrap_or_else(|| no_input("Tokenize"));
            info!("Running Tokenize subcommand");
            tokenize(&read_file(&filename)?, json)?;
        }

        Commands::Parse { filename, json } => {
            let filename = filename.unwrap_or_else(|| no_input("Parse"));
            info!("Running Parse subcommand");
            parse(&read_file(&filename)?, json)?;
        }

        Commands::Run { filename } => {
            let filename = filename.unwrap_or_else(|| no_input("Run"));
            info!("Running Run subcommand");

            let source = read_file(&filename)?;
            let outcome = Lox::new(ConsoleReporter).run(&source);

            debug!("Run outcome: {:?}", outcome);

            if outcome.had_static_error {
                std::process::exit(65);
            }
            if outcome.had_runtime_error {
                std::process::exit(70);
            }

            info!("Program executed successfully");
        }
    }

    Ok(())
}
