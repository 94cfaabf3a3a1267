#![allow(dead_code)]

use nginx_lexer::{Token, TokenKind, tokenize};

/// Tokenize and return `(kind, literal)` pairs.
pub fn lex(input: &str) -> Vec<(TokenKind, String)> {
    tokenize(input)
        .unwrap_or_else(|e| panic!("tokenize failed: {e}\n--- input ---\n{input}"))
        .into_iter()
        .map(|t| (t.kind, t.literal))
        .collect()
}

/// Shorthand for building expected `(kind, literal)` pairs.
pub fn tok(kind: TokenKind, literal: &str) -> (TokenKind, String) {
    (kind, literal.to_string())
}

/// Line and column of each token.
pub fn positions(tokens: &[Token]) -> Vec<(usize, usize)> {
    tokens
        .iter()
        .map(|t| (t.line(), t.column()))
        .collect()
}
