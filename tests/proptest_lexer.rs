//! Property-based tests with proptest.
//!
//! Generate inputs from small building blocks (words, separators,
//! quoted strings) and check the scanner recovers them with the right
//! kinds and positions.

use nginx_lexer::{Scanner, TokenKind, tokenize};
use proptest::prelude::*;

// -- Strategies --

/// Unquoted word: never starts with `#`, `$` or a quote, and contains
/// no terminator or `}`.
fn word() -> impl Strategy<Value = String> {
    "[a-z0-9_./:-][a-z0-9_./:=-]{0,15}".prop_map(|s| s)
}

/// A directive line: name and arguments.
fn line() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(word(), 0..=4)
}

/// Escape `value` so it can be wrapped in `delimiter`.
fn quote(value: &str, delimiter: char) -> String {
    let mut out = String::new();
    out.push(delimiter);
    for ch in value.chars() {
        if ch == delimiter || ch == '\\' {
            out.push('\\');
        }
        out.push(ch);
    }
    out.push(delimiter);
    out
}

proptest! {
    #[test]
    fn whitespace_only_yields_nothing(input in "[ \t\r\n]{0,40}") {
        let tokens = tokenize(&input).expect("tokenize");
        prop_assert!(tokens.is_empty());
    }

    #[test]
    fn words_and_semicolon(words in prop::collection::vec(word(), 1..=6)) {
        let input = format!("{};", words.join(" "));
        let tokens = tokenize(&input).expect("tokenize");

        prop_assert_eq!(tokens.len(), words.len() + 1);
        for (tok, word) in tokens.iter().zip(&words) {
            prop_assert_eq!(tok.kind, TokenKind::Keyword);
            prop_assert_eq!(&tok.literal, word);
        }
        prop_assert_eq!(tokens[words.len()].kind, TokenKind::Semicolon);
    }

    #[test]
    fn positions_follow_layout(lines in prop::collection::vec(line(), 0..=6)) {
        let input = lines
            .iter()
            .map(|words| words.join(" "))
            .collect::<Vec<_>>()
            .join("\n");

        let mut expected = Vec::new();
        for (i, words) in lines.iter().enumerate() {
            let mut column = 1;
            for word in words {
                expected.push((word.clone(), i + 1, column));
                column += word.len() + 1;
            }
        }

        let actual: Vec<_> = tokenize(&input)
            .expect("tokenize")
            .into_iter()
            .map(|t| (t.literal, t.span.line, t.span.column))
            .collect();
        prop_assert_eq!(actual, expected);
    }

    #[test]
    fn quoted_strings_decode(
        value in any::<String>(),
        delimiter in prop::sample::select(vec!['"', '\'', '`']),
    ) {
        let input = format!("set {};", quote(&value, delimiter));
        let tokens = tokenize(&input).expect("tokenize");

        prop_assert_eq!(tokens.len(), 3);
        prop_assert_eq!(tokens[1].kind, TokenKind::QuotedString);
        prop_assert_eq!(&tokens[1].literal, &value);
        prop_assert_eq!(tokens[2].kind, TokenKind::Semicolon);
    }

    #[test]
    fn unclosed_quote_always_errors(
        value in "[a-z \\n;{}]{0,20}",
        delimiter in prop::sample::select(vec!['"', '\'', '`']),
    ) {
        let input = format!("x {delimiter}{value}");
        prop_assert!(tokenize(&input).is_err());
    }

    #[test]
    fn peek_char_does_not_move(input in "\\PC{0,20}", peeks in 1usize..6) {
        let mut scanner = Scanner::new(&input);
        let first = scanner.peek_char().expect("peek");
        let pos = scanner.position();
        for _ in 0..peeks {
            prop_assert_eq!(scanner.peek_char().expect("peek"), first);
            prop_assert_eq!(&scanner.position(), &pos);
        }
        prop_assert_eq!(first, input.chars().next());
    }

    #[test]
    fn reader_and_string_agree(input in "[a-z {};#$\"\\n ]{0,60}") {
        let from_str = tokenize(&input);
        let from_reader = Scanner::from_reader(input.as_bytes()).scan_all();
        prop_assert_eq!(from_str, from_reader);
    }
}
