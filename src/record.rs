//! Input records, and checking them against a [`KeySpec`]
//!
//! A [`Record`] is one line of input, broken into fields.
//! ```
//! use csort::record::Record;
//! let rec = Record::from_line(b"one,two,,four", b',');
//! assert_eq!(rec.len(), 4);
//! assert_eq!(rec.get(1), b"two");
//! assert_eq!(rec.get(2), b"");
//! assert_eq!(rec.get(9), b"");
//! ```

use crate::keyspec::KeySpec;
use crate::num::parse_f64;
use crate::util::{chomp, Result};
use memchr::memchr_iter;
use std::fmt;
use std::io::{BufRead, Write};

/// Reasons an input record is rejected
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum RecordError {
    /// fewer fields than the largest column in the spec
    TooFewColumns {
        /// fields in the record
        found: usize,
        /// fields required
        needed: usize,
    },
    /// a numeric column is not a number
    NotNumeric {
        /// 1-based column number
        column: usize,
    },
}

impl fmt::Display for RecordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooFewColumns { found, needed } => {
                write!(f, "too few columns specified, found {} but need {}", found, needed)
            }
            Self::NotNumeric { column } => {
                write!(f, "can't convert column {} into a floating point", column)
            }
        }
    }
}

impl std::error::Error for RecordError {}

/// pointers into a line, simulating a slice without the ownership issues
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct FieldSlice {
    begin: usize,
    end: usize,
}

/// A line of input, broken into fields.
/// `line` has no trailing newline.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    line: Vec<u8>,
    parts: Vec<FieldSlice>,
}

impl Record {
    /// make a new, empty Record
    #[must_use]
    pub const fn new() -> Self {
        Self { line: Vec::new(), parts: Vec::new() }
    }
    /// make a Record from a line, split on `delim`
    #[must_use]
    pub fn from_line(line: &[u8], delim: u8) -> Self {
        let mut r = Self { line: chomp(line).to_vec(), parts: Vec::new() };
        r.split(delim);
        r
    }
    /// How many fields in the record
    #[must_use]
    pub fn len(&self) -> usize {
        self.parts.len()
    }
    /// true for an empty line
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }
    /// the whole line, without newline
    #[must_use]
    pub fn line(&self) -> &[u8] {
        &self.line
    }
    /// Get one field, 0-based. Return an empty field if index is too big.
    #[must_use]
    pub fn get(&self, index: usize) -> &[u8] {
        match self.parts.get(index) {
            Some(p) => &self.line[p.begin..p.end],
            None => &self.line[0..0],
        }
    }
    /// Iterator over fields in the record
    pub fn iter(&self) -> impl Iterator<Item = &[u8]> + '_ {
        self.parts.iter().map(move |p| &self.line[p.begin..p.end])
    }
    /// Read a new line, should generally be followed by `split`.
    /// Return true at end of file.
    pub fn read<T: BufRead>(&mut self, f: &mut T) -> Result<bool> {
        self.line.clear();
        self.parts.clear();
        let sz = f.read_until(b'\n', &mut self.line)?;
        if sz == 0 {
            return Ok(true);
        }
        let len = chomp(&self.line).len();
        self.line.truncate(len);
        Ok(false)
    }
    /// split the line into fields.
    /// A delimiter at the very end does not start another field.
    pub fn split(&mut self, delim: u8) {
        self.parts.clear();
        let mut begin = 0;
        for end in memchr_iter(delim, &self.line) {
            self.parts.push(FieldSlice { begin, end });
            begin = end + 1;
        }
        if begin != self.line.len() {
            self.parts.push(FieldSlice { begin, end: self.line.len() });
        }
    }
    /// write the fields, joined by `delim`, with a newline
    pub fn write(&self, w: &mut impl Write, delim: u8) -> Result<()> {
        for (i, x) in self.iter().enumerate() {
            if i > 0 {
                w.write_all(&[delim])?;
            }
            w.write_all(x)?;
        }
        w.write_all(b"\n")?;
        Ok(())
    }
    /// Check the record against the spec, returning the first problem found.
    pub fn validate(&self, spec: &KeySpec) -> Result<()> {
        for check in CHECKS {
            check(self, spec)?;
        }
        Ok(())
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", String::from_utf8_lossy(&self.line))
    }
}

type Check = fn(&Record, &KeySpec) -> core::result::Result<(), RecordError>;

/// record checks, in the order they are applied
const CHECKS: &[Check] = &[check_column_count, check_numeric];

/// every column named in the spec must exist
fn check_column_count(rec: &Record, spec: &KeySpec) -> core::result::Result<(), RecordError> {
    if rec.len() < spec.max_column() {
        Err(RecordError::TooFewColumns { found: rec.len(), needed: spec.max_column() })
    } else {
        Ok(())
    }
}

/// numeric columns must hold numbers
fn check_numeric(rec: &Record, spec: &KeySpec) -> core::result::Result<(), RecordError> {
    for k in spec.numeric_keys() {
        if parse_f64(rec.get(k.index())).is_none() {
            return Err(RecordError::NotNumeric { column: k.column });
        }
    }
    Ok(())
}
