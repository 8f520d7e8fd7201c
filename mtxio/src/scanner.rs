//! Line and token scanner shared by the text grammars
//!
//! Holds one line of input at a time and tracks the line number and byte
//! offset so that errors can point at the offending input.

use std::io::{BufRead, ErrorKind};

use mtxio_core::constants::bracket;

use crate::error::{Error, Result};

/// Lexical token of the bracketed grammars
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Open,
    Close,
    Comma,
    Semicolon,
    /// Any run of characters that is neither whitespace nor punctuation
    Atom(String),
}

impl Token {
    pub(crate) fn describe(&self) -> String {
        match self {
            Token::Open => format!("'{}'", bracket::OPEN),
            Token::Close => format!("'{}'", bracket::CLOSE),
            Token::Comma => format!("'{}'", bracket::COMMA),
            Token::Semicolon => format!("'{}'", bracket::SEMICOLON),
            Token::Atom(text) => format!("{text:?}"),
        }
    }
}

fn is_punct(c: char) -> bool {
    matches!(
        c,
        bracket::OPEN | bracket::CLOSE | bracket::COMMA | bracket::SEMICOLON
    )
}

/// Incremental reader over a buffered text stream
pub struct TextScanner<R> {
    reader: R,
    line: String,
    cursor: usize,
    line_no: usize,
    line_start: u64,
    peeked: Option<Token>,
}

impl<R: BufRead> TextScanner<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line: String::new(),
            cursor: 0,
            line_no: 0,
            line_start: 0,
            peeked: None,
        }
    }

    /// Line number of the current line, 1-based
    pub fn line_no(&self) -> usize {
        self.line_no
    }

    /// Byte offset of the cursor from the start of the stream
    pub fn offset(&self) -> u64 {
        self.line_start + self.cursor as u64
    }

    /// Build an input error pointing at the cursor
    pub fn error(&self, err: impl Into<Error>) -> Error {
        err.into().at(self.line_no, self.offset())
    }

    fn fill_line(&mut self) -> Result<bool> {
        self.line_start += self.line.len() as u64;
        self.line.clear();
        self.cursor = 0;
        let n = match self.reader.read_line(&mut self.line) {
            Ok(n) => n,
            Err(e) if e.kind() == ErrorKind::InvalidData => {
                return Err(Error::invalid_at(
                    "stream is not valid UTF-8",
                    self.line_no + 1,
                    self.line_start,
                ))
            }
            Err(e) => return Err(e.into()),
        };
        if n == 0 {
            return Ok(false);
        }
        self.line_no += 1;
        Ok(true)
    }

    /// Advance to the next non-blank line
    ///
    /// Returns `false` at end of stream. The line is then available
    /// through [`TextScanner::record`] and counts as fully consumed.
    pub fn advance_record(&mut self) -> Result<bool> {
        self.peeked = None;
        loop {
            if !self.fill_line()? {
                return Ok(false);
            }
            if !self.line.trim().is_empty() {
                return Ok(true);
            }
        }
    }

    /// The current record with surrounding whitespace removed
    pub fn record(&self) -> &str {
        self.line.trim()
    }

    /// Whitespace-separated fields of the current record
    pub fn fields(&self) -> std::str::SplitWhitespace<'_> {
        self.line.split_whitespace()
    }

    /// Look at the next token without consuming it
    pub fn peek_token(&mut self) -> Result<Option<&Token>> {
        if self.peeked.is_none() {
            self.peeked = self.scan_token()?;
        }
        Ok(self.peeked.as_ref())
    }

    /// Consume the next token, `None` at end of stream
    pub fn next_token(&mut self) -> Result<Option<Token>> {
        match self.peeked.take() {
            Some(token) => Ok(Some(token)),
            None => self.scan_token(),
        }
    }

    /// Consume the next token and require it to equal `expected`
    pub fn expect(&mut self, expected: Token) -> Result<()> {
        match self.next_token()? {
            Some(token) if token == expected => Ok(()),
            Some(token) => Err(self.error(Error::invalid(format!(
                "expected {}, found {}",
                expected.describe(),
                token.describe()
            )))),
            None => Err(self.error(Error::invalid(format!(
                "expected {}, found end of stream",
                expected.describe()
            )))),
        }
    }

    fn scan_token(&mut self) -> Result<Option<Token>> {
        loop {
            let rest = &self.line[self.cursor..];
            let trimmed = rest.trim_start();
            self.cursor += rest.len() - trimmed.len();
            let Some(c) = trimmed.chars().next() else {
                if !self.fill_line()? {
                    return Ok(None);
                }
                continue;
            };
            if is_punct(c) {
                self.cursor += c.len_utf8();
                let token = match c {
                    bracket::OPEN => Token::Open,
                    bracket::CLOSE => Token::Close,
                    bracket::COMMA => Token::Comma,
                    _ => Token::Semicolon,
                };
                return Ok(Some(token));
            }
            let len = trimmed
                .find(|c: char| c.is_whitespace() || is_punct(c))
                .unwrap_or(trimmed.len());
            let atom = trimmed[..len].to_string();
            self.cursor += len;
            return Ok(Some(Token::Atom(atom)));
        }
    }

    pub fn into_inner(self) -> R {
        self.reader
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_records_skip_blank_lines() {
        let mut scanner = TextScanner::new(Cursor::new("2 2 M\n\n  \n1 1 5\n"));
        assert!(scanner.advance_record().unwrap());
        assert_eq!(scanner.record(), "2 2 M");
        assert!(scanner.advance_record().unwrap());
        assert_eq!(scanner.fields().collect::<Vec<_>>(), vec!["1", "1", "5"]);
        assert_eq!(scanner.line_no(), 4);
        assert!(!scanner.advance_record().unwrap());
    }

    #[test]
    fn test_tokens_span_lines() {
        let mut scanner = TextScanner::new(Cursor::new("[[1, -2],\n [3,4]]"));
        let mut tokens = Vec::new();
        while let Some(token) = scanner.next_token().unwrap() {
            tokens.push(token);
        }
        let atom = |s: &str| Token::Atom(s.to_string());
        assert_eq!(
            tokens,
            vec![
                Token::Open,
                Token::Open,
                atom("1"),
                Token::Comma,
                atom("-2"),
                Token::Close,
                Token::Comma,
                Token::Open,
                atom("3"),
                Token::Comma,
                atom("4"),
                Token::Close,
                Token::Close,
            ]
        );
    }

    #[test]
    fn test_peek_does_not_consume() {
        let mut scanner = TextScanner::new(Cursor::new("[a; b]"));
        assert_eq!(scanner.peek_token().unwrap(), Some(&Token::Open));
        assert_eq!(scanner.next_token().unwrap(), Some(Token::Open));
        assert_eq!(
            scanner.next_token().unwrap(),
            Some(Token::Atom("a".to_string()))
        );
        assert_eq!(scanner.next_token().unwrap(), Some(Token::Semicolon));
    }

    #[test]
    fn test_errors_carry_position() {
        let mut scanner = TextScanner::new(Cursor::new("\n[1 2\n"));
        scanner.expect(Token::Open).unwrap();
        let err = scanner.expect(Token::Close).unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid matrix input at line 2 (byte 3): expected ']', found \"1\""
        );
    }
}
