//! Character sources and the one-character pushback cursor.

use std::io::{self, BufRead};
use std::str;

/// A sequential, non-seekable supply of characters.
///
/// `Ok(None)` signals that the source is exhausted. Any
/// `Iterator<Item = char>` is a source; byte streams go through
/// [`ReaderSource`].
pub trait CharSource {
    fn next_char(&mut self) -> io::Result<Option<char>>;
}

impl<I> CharSource for I
where
    I: Iterator<Item = char>,
{
    fn next_char(&mut self) -> io::Result<Option<char>> {
        Ok(self.next())
    }
}

/// Decodes UTF-8 characters from a buffered reader, one at a time.
#[derive(Debug)]
pub struct ReaderSource<R> {
    reader: R,
}

impl<R: BufRead> ReaderSource<R> {
    /// Wraps `reader`; nothing is read until the first character is requested.
    pub const fn new(reader: R) -> Self {
        Self { reader }
    }

    /// Returns the underlying reader.
    pub fn into_inner(self) -> R {
        self.reader
    }
}

impl<R: BufRead> CharSource for ReaderSource<R> {
    fn next_char(&mut self) -> io::Result<Option<char>> {
        let lead = {
            let available = self.reader.fill_buf()?;
            match available.first() {
                Some(&byte) => byte,
                None => return Ok(None),
            }
        };
        self.reader.consume(1);

        let width = utf8_width(lead).ok_or_else(|| invalid_utf8(lead))?;
        let mut buf = [lead, 0, 0, 0];
        self.reader.read_exact(&mut buf[1..width])?;

        let decoded = str::from_utf8(&buf[..width])
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        Ok(decoded.chars().next())
    }
}

/// Encoded length of a UTF-8 sequence, from its leading byte.
const fn utf8_width(lead: u8) -> Option<usize> {
    match lead {
        0x00..=0x7F => Some(1),
        0xC2..=0xDF => Some(2),
        0xE0..=0xEF => Some(3),
        0xF0..=0xF4 => Some(4),
        _ => None,
    }
}

fn invalid_utf8(lead: u8) -> io::Error {
    io::Error::new(
        io::ErrorKind::InvalidData,
        format!("invalid UTF-8 leading byte 0x{lead:02X}"),
    )
}

/// Line and column of the next character to be read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    const fn start() -> Self {
        Self { line: 1, column: 1 }
    }

    const fn advance(self, ch: char) -> Self {
        if ch == '\n' {
            Self {
                line: self.line + 1,
                column: 1,
            }
        } else {
            Self {
                line: self.line,
                column: self.column + 1,
            }
        }
    }
}

/// The last character handed out, and where the cursor stood before it.
#[derive(Debug, Clone, Copy)]
struct Consumed {
    ch: char,
    before: Position,
}

/// Reads characters from a [`CharSource`] with a single pushback slot.
///
/// `unread` restores the exact position recorded before the last read,
/// so pushing back a newline also rolls the line counter back.
#[derive(Debug)]
pub struct Cursor<S> {
    source: S,
    pos: Position,
    pushback: Option<char>,
    last: Option<Consumed>,
}

impl<S: CharSource> Cursor<S> {
    /// Cursor at line 1, column 1 of `source`.
    pub const fn new(source: S) -> Self {
        Self {
            source,
            pos: Position::start(),
            pushback: None,
            last: None,
        }
    }

    /// Position of the next character to be read.
    pub const fn position(&self) -> Position {
        self.pos
    }

    /// Consumes the next character. `Ok(None)` at end of input.
    pub fn read(&mut self) -> io::Result<Option<char>> {
        let next = match self.pushback.take() {
            Some(ch) => Some(ch),
            None => self.source.next_char()?,
        };

        self.last = next.map(|ch| Consumed {
            ch,
            before: self.pos,
        });
        if let Some(ch) = next {
            self.pos = self.pos.advance(ch);
        }
        Ok(next)
    }

    /// Pushes the last read character back.
    ///
    /// Returns `false` and leaves the cursor untouched when there is
    /// nothing to push back: nothing was read yet, the last read hit
    /// end of input, or the character was already pushed back.
    pub fn unread(&mut self) -> bool {
        match self.last.take() {
            Some(consumed) => {
                self.pushback = Some(consumed.ch);
                self.pos = consumed.before;
                true
            }
            None => false,
        }
    }

    /// Returns the next character without consuming it.
    pub fn peek(&mut self) -> io::Result<Option<char>> {
        let next = self.read()?;
        if next.is_some() {
            self.unread();
        }
        Ok(next)
    }

    /// Returns the most recently consumed character, if it has not
    /// been pushed back.
    pub fn peek_prev(&self) -> Option<char> {
        self.last.map(|consumed| consumed.ch)
    }
}
