use std::fmt;
use std::io::{self, BufRead};
use std::str::Chars;

use tracing::{debug, trace};

use crate::cursor::{CharSource, Cursor, Position, ReaderSource};
use crate::token::{Span, Token, TokenKind};

/// Classifies a lexer error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LexErrorKind {
    /// Input ended before the closing delimiter of a quoted string.
    UnterminatedString { delimiter: char },
    /// The character source failed, including invalid UTF-8.
    Io {
        kind: io::ErrorKind,
        message: String,
    },
}

impl fmt::Display for LexErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnterminatedString { delimiter } => {
                write!(
                    f,
                    "unterminated quoted string, \
                     expected closing {delimiter}"
                )
            }
            Self::Io { message, .. } => {
                write!(f, "read error: {message}")
            }
        }
    }
}

/// Error produced during lexing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind} at {}", location(.span))]
pub struct LexError {
    pub kind: LexErrorKind,
    pub span: Span,
}

fn location(span: &Span) -> String {
    match &span.file {
        Some(file) => format!("{file}, line {}, column {}", span.line, span.column),
        None => format!("line {}, column {}", span.line, span.column),
    }
}

/// Tokenize a configuration source string.
///
/// The result excludes the trailing `EndOfInput` token.
///
/// # Errors
///
/// Returns `LexError` if a quoted string is not closed.
pub fn tokenize(input: &str) -> Result<Vec<Token>, LexError> {
    Scanner::new(input).scan_all()
}

/// Pull-based tokenizer over a character source.
///
/// Each call to [`Scanner::scan_next`] consumes input irreversibly and
/// yields exactly one token. Once an error is returned the scanner is
/// poisoned and keeps returning that error.
#[derive(Debug)]
pub struct Scanner<S> {
    cursor: Cursor<S>,
    file: Option<String>,
    latest: Option<Token>,
    failed: Option<LexError>,
    finished: bool,
}

impl<'a> Scanner<Chars<'a>> {
    /// Scanner over an in-memory string.
    #[must_use]
    pub fn new(input: &'a str) -> Self {
        Self::from_source(input.chars())
    }
}

impl<R: BufRead> Scanner<ReaderSource<R>> {
    /// Scanner over a UTF-8 byte stream.
    pub const fn from_reader(reader: R) -> Self {
        Self::from_source(ReaderSource::new(reader))
    }
}

impl<S: CharSource> Scanner<S> {
    /// Scanner over any character source.
    pub const fn from_source(source: S) -> Self {
        Self {
            cursor: Cursor::new(source),
            file: None,
            latest: None,
            failed: None,
            finished: false,
        }
    }

    /// Attach a source name to every span this scanner reports.
    #[must_use]
    pub fn with_file(mut self, file: impl Into<String>) -> Self {
        self.file = Some(file.into());
        self
    }

    /// The token most recently returned by `scan_next`.
    pub const fn latest(&self) -> Option<&Token> {
        self.latest.as_ref()
    }

    /// Location of the next unconsumed character.
    pub fn position(&self) -> Span {
        self.span_at(self.cursor.position())
    }

    /// Look at the next character without consuming it.
    ///
    /// # Errors
    ///
    /// Returns `LexError` if the source fails to produce a character.
    pub fn peek_char(&mut self) -> Result<Option<char>, LexError> {
        if let Some(err) = &self.failed {
            return Err(err.clone());
        }
        self.peek().inspect_err(|err| self.poison(err))
    }

    /// The last character consumed, if it has not been pushed back.
    pub fn peek_prev(&self) -> Option<char> {
        self.cursor.peek_prev()
    }

    /// Advance past the next token and return it.
    ///
    /// At end of input this returns an `EndOfInput` token, and keeps
    /// doing so on further calls.
    ///
    /// # Errors
    ///
    /// Returns `LexError` on an unterminated quoted string or when the
    /// source cannot be read. The same error is returned by every
    /// later call.
    pub fn scan_next(&mut self) -> Result<Token, LexError> {
        if let Some(err) = &self.failed {
            return Err(err.clone());
        }

        match self.next_token() {
            Ok(tok) => {
                trace!(
                    kind = %tok.kind,
                    line = tok.span.line,
                    column = tok.span.column,
                    "scanned token"
                );
                self.latest = Some(tok.clone());
                Ok(tok)
            }
            Err(err) => {
                self.poison(&err);
                Err(err)
            }
        }
    }

    fn poison(&mut self, err: &LexError) {
        debug!(error = %err, "scanner stopped");
        self.failed = Some(err.clone());
    }

    /// Scan the rest of the input, excluding the `EndOfInput` token.
    ///
    /// # Errors
    ///
    /// Returns the first `LexError` encountered.
    pub fn scan_all(&mut self) -> Result<Vec<Token>, LexError> {
        let mut tokens = Vec::new();
        loop {
            let tok = self.scan_next()?;
            if tok.is(TokenKind::EndOfInput) {
                break;
            }
            tokens.push(tok);
        }
        Ok(tokens)
    }

    fn next_token(&mut self) -> Result<Token, LexError> {
        self.skip_whitespace()?;

        let start = self.cursor.position();
        let Some(ch) = self.peek()? else {
            return Ok(self.token_at(TokenKind::EndOfInput, String::new(), start));
        };

        match ch {
            ';' => self.single(TokenKind::Semicolon),
            '{' => self.single(TokenKind::BlockStart),
            '}' => self.single(TokenKind::BlockEnd),
            '#' => self.scan_comment(),
            '$' => self.scan_word(TokenKind::Variable),
            '"' | '\'' | '`' => self.scan_quoted_string(ch),
            c if !is_space(c) => self.scan_word(TokenKind::Keyword),
            _ => self.single(TokenKind::Illegal),
        }
    }

    fn single(&mut self, kind: TokenKind) -> Result<Token, LexError> {
        let start = self.cursor.position();
        let literal = self.read()?.map(String::from).unwrap_or_default();
        Ok(self.token_at(kind, literal, start))
    }

    fn skip_whitespace(&mut self) -> Result<(), LexError> {
        while let Some(ch) = self.read()? {
            if !is_space(ch) {
                self.cursor.unread();
                break;
            }
        }
        Ok(())
    }

    fn scan_comment(&mut self) -> Result<Token, LexError> {
        let start = self.cursor.position();
        let literal = self.read_until(is_end_of_line)?;
        Ok(self.token_at(TokenKind::Comment, literal, start))
    }

    /// Keywords and variables share a terminator set. `}` is not in it.
    fn scan_word(&mut self, kind: TokenKind) -> Result<Token, LexError> {
        let start = self.cursor.position();
        let literal = self.read_until(is_keyword_terminator)?;
        Ok(self.token_at(kind, literal, start))
    }

    fn scan_quoted_string(&mut self, delimiter: char) -> Result<Token, LexError> {
        let start = self.cursor.position();
        self.read()?; // opening delimiter

        let mut value = String::new();
        loop {
            let Some(ch) = self.read()? else {
                return Err(self.error_at(
                    LexErrorKind::UnterminatedString { delimiter },
                    start,
                ));
            };

            if ch == '\\' {
                if let Some(decoded) = self.peek()?.and_then(|next| unescape(next, delimiter)) {
                    self.read()?;
                    value.push(decoded);
                    continue;
                }
            }

            if ch == delimiter {
                break;
            }
            value.push(ch);
        }

        Ok(self.token_at(TokenKind::QuotedString, value, start))
    }

    /// Consume one character, then everything up to (not including)
    /// the first character matching `until`.
    fn read_until(&mut self, until: fn(char) -> bool) -> Result<String, LexError> {
        let mut buf = String::new();
        if let Some(first) = self.read()? {
            buf.push(first);
        }

        while let Some(ch) = self.read()? {
            if until(ch) {
                self.cursor.unread();
                break;
            }
            buf.push(ch);
        }
        Ok(buf)
    }

    fn read(&mut self) -> Result<Option<char>, LexError> {
        let pos = self.cursor.position();
        self.cursor.read().map_err(|e| self.io_error(&e, pos))
    }

    fn peek(&mut self) -> Result<Option<char>, LexError> {
        let pos = self.cursor.position();
        self.cursor.peek().map_err(|e| self.io_error(&e, pos))
    }

    fn io_error(&self, err: &io::Error, pos: Position) -> LexError {
        self.error_at(
            LexErrorKind::Io {
                kind: err.kind(),
                message: err.to_string(),
            },
            pos,
        )
    }

    fn error_at(&self, kind: LexErrorKind, pos: Position) -> LexError {
        LexError {
            kind,
            span: self.span_at(pos),
        }
    }

    fn token_at(&self, kind: TokenKind, literal: String, pos: Position) -> Token {
        Token {
            kind,
            literal,
            span: self.span_at(pos),
        }
    }

    fn span_at(&self, pos: Position) -> Span {
        Span {
            file: self.file.clone(),
            line: pos.line,
            column: pos.column,
        }
    }
}

impl<S: CharSource> Iterator for Scanner<S> {
    type Item = Result<Token, LexError>;

    /// Yields every token up to and including `EndOfInput`, or up to
    /// and including the first error.
    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        let result = self.scan_next();
        self.finished = match &result {
            Ok(tok) => tok.is(TokenKind::EndOfInput),
            Err(_) => true,
        };
        Some(result)
    }
}

/// Decoded form of `\<next>` inside a string closed by `delimiter`.
fn unescape(next: char, delimiter: char) -> Option<char> {
    match next {
        'n' => Some('\n'),
        't' => Some('\t'),
        'r' => Some('\r'),
        '\\' => Some('\\'),
        c if c == delimiter => Some(delimiter),
        _ => None,
    }
}

const fn is_end_of_line(ch: char) -> bool {
    ch == '\r' || ch == '\n'
}

const fn is_space(ch: char) -> bool {
    ch == ' ' || ch == '\t' || is_end_of_line(ch)
}

const fn is_keyword_terminator(ch: char) -> bool {
    is_space(ch) || ch == '{' || ch == ';'
}
