use std::fmt;

/// Source location for error reporting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub file: Option<String>,
    pub line: usize,
    pub column: usize,
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.file {
            Some(file) => write!(f, "{file}:{}:{}", self.line, self.column),
            None => write!(f, "{}:{}", self.line, self.column),
        }
    }
}

/// Token kinds produced by the scanner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// End of the input. Always the last token.
    EndOfInput,
    /// Directive terminator `;`.
    Semicolon,
    /// Opening brace `{`.
    BlockStart,
    /// Closing brace `}`.
    BlockEnd,
    /// Comment (`# ...`), up to the end of the line.
    Comment,
    /// Variable reference (`$name`).
    Variable,
    /// Quoted string, delimited by `"`, `'` or a backtick.
    QuotedString,
    /// Unquoted word: directive names and bare arguments.
    Keyword,
    /// A single character no other rule accepts.
    Illegal,
}

impl TokenKind {
    /// Name of the kind as shown in diagnostics.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::EndOfInput => "EndOfInput",
            Self::Semicolon => "Semicolon",
            Self::BlockStart => "BlockStart",
            Self::BlockEnd => "BlockEnd",
            Self::Comment => "Comment",
            Self::Variable => "Variable",
            Self::QuotedString => "QuotedString",
            Self::Keyword => "Keyword",
            Self::Illegal => "Illegal",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A single token with its kind, decoded text, and source location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub literal: String,
    pub span: Span,
}

impl Token {
    /// Returns true if the token is of the given kind.
    #[must_use]
    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }

    /// Line of the token's first character.
    #[must_use]
    pub const fn line(&self) -> usize {
        self.span.line
    }

    /// Column of the token's first character.
    #[must_use]
    pub const fn column(&self) -> usize {
        self.span.column
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}({:?})@{}:{}",
            self.kind, self.literal, self.span.line, self.span.column
        )
    }
}
