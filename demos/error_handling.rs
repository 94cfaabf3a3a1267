//! Demonstrate error handling for invalid configuration input.

use nginx_lexer::{LexErrorKind, Scanner, tokenize};

fn main() {
    // Unterminated quoted string
    match tokenize("server {\n\treturn 200 \"unclosed;\n}\n") {
        Ok(tokens) => println!("Tokenized OK (unexpected): {} token(s)", tokens.len()),
        Err(e) => {
            println!("Lex error: {e}");
            println!("  Kind: {:?}", e.kind);
            println!("  Location: line {}, column {}", e.span.line, e.span.column);
        }
    }

    println!();

    // Invalid UTF-8 from a byte stream
    let bytes: &[u8] = b"listen \xFF;";
    let mut scanner = Scanner::from_reader(bytes).with_file("broken.conf");
    match scanner.scan_all() {
        Ok(tokens) => println!("Tokenized OK (unexpected): {} token(s)", tokens.len()),
        Err(e) => {
            println!("Lex error: {e}");
            if let LexErrorKind::Io { kind, .. } = &e.kind {
                println!("  I/O kind: {kind:?}");
            }
        }
    }
}
