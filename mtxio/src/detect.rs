//! Format detection by consume-and-replay
//!
//! The detector reads the smallest prefix that identifies the encoding:
//! the bitmap signature, or else the first non-blank line. Those bytes
//! are handed back in a [`Detection`] so the selected grammar sees the
//! stream from its very first byte.
//!
//! A first line longer than the limit is judged from what was read: a
//! `[[` opening is Maple, a `;` makes a bracketed row Matlab, any other
//! bracketed row is read to its end, and a coordinate header is judged
//! from its complete tokens.

use std::io::{BufRead, Chain, Cursor, Read};

use mtxio_core::constants::{bracket, SIGNATURE_LEN};
use mtxio_core::validation::{has_bitmap_signature, header_shape};
use mtxio_core::FormatTag;
use tracing::{debug, trace};

use crate::error::{Error, Result};

/// Outcome of a successful detection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Detection {
    pub tag: FormatTag,
    /// Bytes consumed from the stream while detecting
    pub prefix: Vec<u8>,
}

impl Detection {
    /// Re-attach the consumed prefix in front of the remaining stream
    pub fn replay<R: BufRead>(self, rest: R) -> Chain<Cursor<Vec<u8>>, R> {
        Cursor::new(self.prefix).chain(rest)
    }
}

/// Identifies the encoding of a stream from its leading bytes
#[derive(Debug, Clone, Copy)]
pub struct FormatDetector {
    limit: usize,
}

impl FormatDetector {
    /// Detector that stops gathering its first line after `limit` bytes
    pub fn new(limit: usize) -> Self {
        Self {
            limit: limit.max(SIGNATURE_LEN),
        }
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Detect the encoding of `reader`
    ///
    /// On success the stream has been advanced past [`Detection::prefix`];
    /// on failure the consumed bytes are lost.
    pub fn detect<R: BufRead>(&self, reader: &mut R) -> Result<Detection> {
        let mut prefix = Vec::with_capacity(SIGNATURE_LEN);
        reader
            .by_ref()
            .take(SIGNATURE_LEN as u64)
            .read_to_end(&mut prefix)?;
        if has_bitmap_signature(&prefix) {
            debug!("detected bitmap container signature");
            return Ok(Detection {
                tag: FormatTag::Bitmap,
                prefix,
            });
        }

        let mut eof = prefix.len() < SIGNATURE_LEN;
        loop {
            if let Some(line) = first_line(&prefix, eof) {
                let tag = classify_line(line).ok_or(Error::UnrecognisedFormat)?;
                debug!(format = %tag, consumed = prefix.len(), "detected text format");
                return Ok(Detection { tag, prefix });
            }
            if eof {
                trace!(consumed = prefix.len(), "no header line found");
                return Err(Error::UnrecognisedFormat);
            }
            if prefix.len() >= self.limit {
                return detect_long_line(reader, prefix);
            }
            let budget = (self.limit - prefix.len()) as u64;
            let n = reader.by_ref().take(budget).read_until(b'\n', &mut prefix)?;
            eof = n == 0;
        }
    }
}

impl Default for FormatDetector {
    fn default() -> Self {
        Self::new(mtxio_core::constants::DEFAULT_DETECT_LIMIT)
    }
}

/// Classify a first line that overran the detection limit
fn detect_long_line<R: BufRead>(reader: &mut R, mut prefix: Vec<u8>) -> Result<Detection> {
    let start = prefix
        .iter()
        .position(|b| !b.is_ascii_whitespace())
        .unwrap_or(prefix.len());
    let head = &prefix[start..];
    let tag = if head.first() == Some(&(bracket::OPEN as u8)) {
        let body = head[1..].iter().find(|b| !b.is_ascii_whitespace());
        if body == Some(&(bracket::OPEN as u8)) {
            Some(FormatTag::Maple)
        } else if head.contains(&(bracket::SEMICOLON as u8)) {
            Some(FormatTag::Matlab)
        } else {
            // Sage and Matlab differ only at the end of the row.
            reader.read_until(b'\n', &mut prefix)?;
            first_line(&prefix, true).and_then(classify_line)
        }
    } else {
        classify_tokens(head)
    };
    let tag = tag.ok_or(Error::UnrecognisedFormat)?;
    debug!(format = %tag, consumed = prefix.len(), "detected text format from long line");
    Ok(Detection { tag, prefix })
}

/// Coordinate header shape from the complete tokens of a truncated line
fn classify_tokens(head: &[u8]) -> Option<FormatTag> {
    let text = match std::str::from_utf8(head) {
        Ok(text) => text,
        Err(e) => std::str::from_utf8(&head[..e.valid_up_to()]).ok()?,
    };
    let complete = match text.rfind(|c: char| c.is_ascii_whitespace()) {
        Some(end) => &text[..end],
        None => "",
    };
    coordinate_header(complete)
}

/// First non-blank line of `prefix`, if it is complete
///
/// A trailing line without newline counts as complete only at end of
/// stream.
fn first_line(prefix: &[u8], eof: bool) -> Option<&[u8]> {
    let mut rest = prefix;
    while !rest.is_empty() {
        let (line, next, complete) = match rest.iter().position(|&b| b == b'\n') {
            Some(pos) => (&rest[..pos], &rest[pos + 1..], true),
            None => (rest, &rest[rest.len()..], eof),
        };
        if !line.iter().all(u8::is_ascii_whitespace) {
            return complete.then_some(line);
        }
        rest = next;
    }
    None
}

/// Map a header or first row onto a text format
pub fn classify_line(line: &[u8]) -> Option<FormatTag> {
    let line = std::str::from_utf8(line).ok()?.trim();
    if let Some(body) = line.strip_prefix(bracket::OPEN) {
        let tag = if body.trim_start().starts_with(bracket::OPEN) {
            FormatTag::Maple
        } else if line.ends_with(bracket::CLOSE) && !line.contains(bracket::SEMICOLON) {
            FormatTag::Sage
        } else {
            FormatTag::Matlab
        };
        return Some(tag);
    }
    coordinate_header(line)
}

fn coordinate_header(line: &str) -> Option<FormatTag> {
    match header_shape(line.split_whitespace())? {
        (2, true) => Some(FormatTag::Guillaume),
        (3, false) => Some(FormatTag::OneBased),
        (2, false) => Some(FormatTag::Turner),
        _ => None,
    }
}
