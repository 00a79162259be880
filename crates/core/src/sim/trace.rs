//! Trace Reader.
//!
//! A trace is a text file with one access per line:
//!
//! ```text
//! 0x1fffff50 r
//! 0x1fffff58 w
//! ```
//!
//! The address is hexadecimal with a `0x` prefix. An operation character of `r` is a
//! read; any other character is a write. Blank lines are skipped.

use std::fs::File;
use std::io::{BufRead, BufReader, Lines};
use std::path::Path;

use crate::common::{AccessKind, TraceError};

/// One parsed trace line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraceRecord {
    /// Byte address accessed.
    pub address: u32,
    /// Read or write.
    pub kind: AccessKind,
}

impl TraceRecord {
    /// Read record for `address`.
    pub const fn read(address: u32) -> Self {
        Self {
            address,
            kind: AccessKind::Read,
        }
    }

    /// Write record for `address`.
    pub const fn write(address: u32) -> Self {
        Self {
            address,
            kind: AccessKind::Write,
        }
    }
}

/// Parses one trace line.
///
/// # Arguments
///
/// * `line` - The raw line.
/// * `line_no` - 1-based line number, used in errors.
///
/// # Returns
///
/// `Ok(None)` for a blank line, `Ok(Some(record))` for an access.
///
/// # Errors
///
/// `TraceError::Malformed` if the address is missing, lacks the `0x` prefix, is not
/// 32-bit hexadecimal, or is not followed by an operation character.
pub fn parse_line(line: &str, line_no: usize) -> Result<Option<TraceRecord>, TraceError> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    let malformed = || TraceError::Malformed {
        line: line_no,
        content: trimmed.to_owned(),
    };

    let mut fields = trimmed.split_whitespace();
    let address = fields
        .next()
        .and_then(|field| field.strip_prefix("0x").or_else(|| field.strip_prefix("0X")))
        .and_then(|hex| u32::from_str_radix(hex, 16).ok())
        .ok_or_else(malformed)?;
    let op = fields
        .next()
        .and_then(|field| field.chars().next())
        .ok_or_else(malformed)?;

    Ok(Some(TraceRecord {
        address,
        kind: AccessKind::from_op(op),
    }))
}

/// Streaming iterator over the records of a trace.
#[derive(Debug)]
pub struct TraceReader<R> {
    lines: Lines<R>,
    line_no: usize,
}

impl<R: BufRead> TraceReader<R> {
    /// Wraps a buffered reader.
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            line_no: 0,
        }
    }
}

impl TraceReader<BufReader<File>> {
    /// Opens a trace file.
    ///
    /// # Errors
    ///
    /// `TraceError::Io` if the file cannot be opened.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, TraceError> {
        Ok(Self::new(BufReader::new(File::open(path)?)))
    }
}

impl<R: BufRead> Iterator for TraceReader<R> {
    type Item = Result<TraceRecord, TraceError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let line = match self.lines.next()? {
                Ok(line) => line,
                Err(e) => return Some(Err(TraceError::Io(e))),
            };
            self.line_no += 1;
            match parse_line(&line, self.line_no) {
                Ok(None) => {}
                Ok(Some(record)) => return Some(Ok(record)),
                Err(e) => return Some(Err(e)),
            }
        }
    }
}

/// Parses a whole trace from a reader, stopping at the first bad line.
///
/// # Errors
///
/// The first `TraceError` encountered.
pub fn parse_trace<R: BufRead>(reader: R) -> Result<Vec<TraceRecord>, TraceError> {
    TraceReader::new(reader).collect()
}

/// Reads and parses a trace file.
///
/// # Errors
///
/// `TraceError::Io` if the file cannot be read, `TraceError::Malformed` for a bad line.
pub fn load_trace(path: impl AsRef<Path>) -> Result<Vec<TraceRecord>, TraceError> {
    TraceReader::open(path)?.collect()
}
