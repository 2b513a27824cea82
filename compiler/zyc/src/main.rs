//! Zygo CLI
//!
//! Tokenizer front end: `lex` a file or expression, or run the line REPL.

use std::io::{self, IsTerminal};

use zyc::commands::{lex_source, run_repl};
use zyc::{init_tracing, Command, Config};

fn main() {
    init_tracing();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let config = match Config::from_args(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {e}");
            eprintln!();
            print_usage();
            std::process::exit(2);
        }
    };
    tracing::debug!(?config, "configuration");

    match config.command {
        Command::Help => print_usage(),
        Command::Version => println!("zyc {}", env!("CARGO_PKG_VERSION")),
        Command::Lex => {
            let Some(source) = config.source() else {
                print_usage();
                std::process::exit(2);
            };
            match lex_source(&source, config.exit_on_fail) {
                Ok(0) => {}
                Ok(errors) => {
                    eprintln!("{errors} lex error(s)");
                    std::process::exit(1);
                }
                Err(e) => {
                    eprintln!("error: {e}");
                    std::process::exit(1);
                }
            }
        }
        Command::Repl => {
            let stdin = io::stdin();
            let quiet = config.quiet || !stdin.is_terminal();
            if !quiet {
                println!(
                    "zygo tokenizer {}; one token per line, Ctrl-D to exit",
                    env!("CARGO_PKG_VERSION")
                );
            }
            let result = run_repl(stdin.lock(), io::stdout().lock(), quiet, config.exit_on_fail);
            if let Err(e) = result {
                eprintln!("error: {e}");
                std::process::exit(1);
            }
        }
    }
}

fn print_usage() {
    println!("Usage: zyc [options] [command]");
    println!();
    println!("Commands:");
    println!("  repl                 Tokenize stdin line by line (default)");
    println!("  lex <file>           Tokenize a file and print its tokens");
    println!("  lex -c <expr>        Tokenize an expression");
    println!("  help                 Show this help message");
    println!("  version              Show version information");
    println!();
    println!("Options:");
    println!("  -c <expr>            Expression to tokenize (implies lex)");
    println!("  --quiet              No banner or prompts");
    println!("  --exitonfail         Stop at the first lex error");
    println!();
    println!("Logging:");
    println!("  ZY_LOG=<filter>      Enable tracing, e.g. ZY_LOG=zy_lexer=trace");
}
