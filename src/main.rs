//! CLI tool to inspect and check nginx-style configuration files.

use std::fs::File;
use std::io::{self, BufReader, Write};
use std::process::ExitCode;

use nginx_lexer::{CharSource, LexError, Scanner, TokenKind};

fn main() -> ExitCode {
    init_tracing();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 || args[1] == "--help" || args[1] == "-h" {
        eprintln!("Usage: nginx-lexer <command> [files...]");
        eprintln!();
        eprintln!("Commands:");
        eprintln!("  tokens  Print the token stream of each file");
        eprintln!("  check   Check that each file tokenizes cleanly");
        eprintln!();
        eprintln!("Use - to read from standard input.");
        eprintln!("Set RUST_LOG=nginx_lexer=trace to log every token.");
        eprintln!();
        eprintln!("Examples:");
        eprintln!("  nginx-lexer tokens nginx.conf");
        eprintln!("  cat nginx.conf | nginx-lexer check -");
        return ExitCode::from(2);
    }

    let command = args[1].as_str();
    let files = &args[2..];

    if command != "tokens" && command != "check" {
        eprintln!("Unknown command: {command}");
        return ExitCode::from(2);
    }

    if files.is_empty() {
        eprintln!("Error: no files specified");
        return ExitCode::from(2);
    }

    let mut had_error = false;

    for path in files {
        let result = if path == "-" {
            let stdin = io::stdin().lock();
            run(command, Scanner::from_reader(stdin).with_file("<stdin>"))
        } else {
            match File::open(path) {
                Ok(file) => run(
                    command,
                    Scanner::from_reader(BufReader::new(file)).with_file(path.as_str()),
                ),
                Err(e) => {
                    eprintln!("{path}: {e}");
                    had_error = true;
                    continue;
                }
            }
        };

        match result {
            Ok(count) if command == "check" => {
                eprintln!("{path}: ok ({count} token(s))");
            }
            Ok(_) => {}
            Err(e) => {
                eprintln!("{e}");
                had_error = true;
            }
        }
    }

    if had_error {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

/// Drain the scanner, printing tokens for `tokens`. Returns the number
/// of tokens scanned, not counting `EndOfInput`.
fn run<S: CharSource>(command: &str, mut scanner: Scanner<S>) -> Result<usize, LexError> {
    let print = command == "tokens";
    let mut stdout = io::stdout().lock();
    let mut count = 0;

    loop {
        let tok = scanner.scan_next()?;
        if tok.is(TokenKind::EndOfInput) {
            return Ok(count);
        }
        count += 1;
        if print {
            // stdout closed early (e.g. piped into head): stop quietly.
            if writeln!(
                stdout,
                "{}:{}\t{}\t{:?}",
                tok.span.line, tok.span.column, tok.kind, tok.literal
            )
            .is_err()
            {
                return Ok(count);
            }
        }
    }
}

/// Install a stderr subscriber when `RUST_LOG` is set.
fn init_tracing() {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    if std::env::var("RUST_LOG").is_ok() {
        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_writer(io::stderr)
                    .with_target(true)
                    .with_level(true),
            )
            .with(EnvFilter::from_default_env())
            .init();
    }
}
