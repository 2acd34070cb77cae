use clap::{Parser, Subcommand};
use llxml_lexer::Scanner;
use llxml_parser::{Node, ParserOptions, SyntaxError};
use std::path::Path;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "llxml")]
#[command(about = "Check, inspect and format XML-like markup")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Maximum element nesting depth
    #[arg(long, global = true, default_value_t = ParserOptions::DEFAULT_MAX_DEPTH)]
    max_depth: usize,

    /// Log parser activity to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Check a markup file for syntax errors
    Check {
        /// Input markup file
        path: String,
    },

    /// Print the parsed tree of a markup file
    Dump {
        /// Input markup file
        path: String,

        /// Print the token stream instead of the tree
        #[arg(long)]
        tokens: bool,
    },

    /// Reformat a markup file
    Fmt {
        /// Input markup file
        path: String,

        /// Spaces per nesting level
        #[arg(long, default_value_t = 2)]
        indent: usize,

        /// Overwrite the file instead of printing to stdout
        #[arg(long)]
        write: bool,
    },
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let options = ParserOptions {
        max_depth: cli.max_depth,
    };

    match cli.command {
        Command::Check { path } => cmd_check(&path, options),
        Command::Dump { path, tokens } => cmd_dump(&path, tokens, options),
        Command::Fmt {
            path,
            indent,
            write,
        } => cmd_fmt(&path, indent, write, options),
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.into()))
        .with_writer(std::io::stderr)
        .init();
}

fn read_source(path: &str) -> String {
    let p = Path::new(path);
    if !p.exists() {
        eprintln!("Error: file not found: {path}");
        std::process::exit(1);
    }
    match std::fs::read_to_string(p) {
        Ok(source) => source,
        Err(e) => {
            eprintln!("Error reading {path}: {e}");
            std::process::exit(1);
        }
    }
}

fn parse_or_exit(path: &str, source: &str, options: ParserOptions) -> Node {
    tracing::debug!(path, max_depth = options.max_depth, "parsing");
    match llxml_parser::Parser::parse_with(source, options) {
        Ok(root) => root,
        Err(e) => {
            report(path, &e);
            std::process::exit(1);
        }
    }
}

fn report(path: &str, e: &SyntaxError) {
    eprintln!("{path}:{}:{}: {}", e.line, e.column, e.message);
}

fn cmd_check(path: &str, options: ParserOptions) {
    let source = read_source(path);
    parse_or_exit(path, &source, options);
    eprintln!("OK: {path}");
}

fn cmd_dump(path: &str, tokens: bool, options: ParserOptions) {
    let source = read_source(path);

    if tokens {
        match Scanner::tokenize(&source) {
            Ok(tokens) => {
                for token in tokens {
                    println!("{:<8} {}", token.span.to_string(), token.kind);
                }
            }
            Err(e) => {
                report(path, &SyntaxError::from(e));
                std::process::exit(1);
            }
        }
        return;
    }

    let root = parse_or_exit(path, &source, options);
    println!("{root:#?}");
}

fn cmd_fmt(path: &str, indent: usize, write: bool, options: ParserOptions) {
    let source = read_source(path);
    let root = parse_or_exit(path, &source, options);

    let output = match llxml_writer::render_pretty(&root, indent) {
        Ok(output) => output,
        Err(e) => {
            eprintln!("{path}: {e}");
            std::process::exit(1);
        }
    };

    if !write {
        print!("{output}");
        return;
    }

    if output == source {
        eprintln!("Unchanged: {path}");
        return;
    }
    if let Err(e) = std::fs::write(path, &output) {
        eprintln!("Error writing {path}: {e}");
        std::process::exit(1);
    }
    eprintln!("Formatted: {path}");
}
