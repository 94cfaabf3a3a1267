//! Streaming tokenizer for nginx-style configuration files.
//!
//! Turns configuration text into a flat sequence of typed tokens
//! (keywords, variables, quoted strings, comments, braces and
//! semicolons) with line/column positions, ready for a parser that
//! builds the directive tree.
//!
//! # Quick start
//!
//! ## Tokenize a string
//!
//! ```
//! use nginx_lexer::{tokenize, TokenKind};
//!
//! let tokens = tokenize("server { listen 80; }").unwrap();
//! let kinds: Vec<_> = tokens.iter().map(|t| t.kind).collect();
//! assert_eq!(kinds, [
//!     TokenKind::Keyword,
//!     TokenKind::BlockStart,
//!     TokenKind::Keyword,
//!     TokenKind::Keyword,
//!     TokenKind::Semicolon,
//!     TokenKind::BlockEnd,
//! ]);
//! ```
//!
//! ## Pull tokens from a reader
//!
//! ```
//! use nginx_lexer::{Scanner, TokenKind};
//!
//! let input: &[u8] = b"root \"/var/www\";\n";
//! let mut scanner = Scanner::from_reader(input).with_file("site.conf");
//! loop {
//!     let tok = scanner.scan_next().unwrap();
//!     if tok.is(TokenKind::EndOfInput) {
//!         break;
//!     }
//!     println!("{}: {}", tok.span, tok.literal);
//! }
//! ```

// Allow noisy pedantic lints that don't add value for
// a library crate.
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions
)]

pub mod cursor;
pub mod lexer;
pub mod token;

pub use cursor::{CharSource, ReaderSource};
pub use lexer::{LexError, LexErrorKind, Scanner, tokenize};
pub use token::{Span, Token, TokenKind};
