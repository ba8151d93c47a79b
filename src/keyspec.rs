//! Sort specifications, which say which columns to sort on, and how.
//!
//! A specification is a comma separated list of keys, highest priority first.
//! Each key is a 1-based column number, optionally preceded by `-` (descending)
//! or `+` (ascending, the default), optionally followed by `f`
//! (compare as floating point rather than as text).
//!
//! ```
//! use csort::keyspec::{Direction, KeyKind, KeySpec};
//! let spec: KeySpec = "2,-1f,3".parse()?;
//! assert_eq!(spec.len(), 3);
//! assert_eq!(spec.max_column(), 3);
//! assert_eq!(spec[1].column, 1);
//! assert_eq!(spec[1].direction, Direction::Descending);
//! assert_eq!(spec[1].kind, KeyKind::Numeric);
//! assert_eq!(spec.to_string(), "2,-1f,3");
//! # Ok::<(), csort::util::Error>(())
//! ```

use memchr::memmem;
use std::fmt;
use std::str::FromStr;

/// which way to sort a column
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub enum Direction {
    /// smallest first
    #[default]
    Ascending,
    /// largest first
    Descending,
}

/// how to compare the values in a column
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub enum KeyKind {
    /// compare the bytes, ignoring spaces
    #[default]
    Lexicographic,
    /// compare as floating point numbers
    Numeric,
}

/// Reasons a sort specification is rejected
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum SpecError {
    /// spec ends with a comma
    TrailingComma,
    /// spec starts with a comma
    LeadingComma,
    /// spec has ",,"
    DoubleComma,
    /// a key does not start with a number, or the spec is empty
    NoColumn,
    /// column numbers start at 1
    ColumnZero,
    /// something other than `f` follows the column number
    BadFormat,
    /// the same column appears in more than one key
    Duplicate,
}

impl fmt::Display for SpecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            Self::TrailingComma => "cannot have a comma at the end",
            Self::LeadingComma => "cannot have a comma at the beginning",
            Self::DoubleComma => "cannot have two commas in a row",
            Self::NoColumn => "no column number specified",
            Self::ColumnZero => "cannot sort on column 0",
            Self::BadFormat => "incorrect column format",
            Self::Duplicate => "duplicate columns specified",
        };
        f.write_str(msg)
    }
}

impl std::error::Error for SpecError {}

/// One key of a [`KeySpec`]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct SortKey {
    /// 1-based column number, never zero
    pub column: usize,
    /// ascending or descending
    pub direction: Direction,
    /// text or number
    pub kind: KeyKind,
}

impl SortKey {
    /// new key. `column` is 1-based; a zero column is caught by [`KeySpec::new`]
    #[must_use]
    pub const fn new(column: usize, direction: Direction, kind: KeyKind) -> Self {
        Self { column, direction, kind }
    }
    /// 0-based index of the column.
    /// A key built by hand with column zero reads the first column;
    /// keys that come through a [`KeySpec`] never have column zero.
    #[must_use]
    pub const fn index(&self) -> usize {
        self.column.saturating_sub(1)
    }
    /// is this a descending key
    #[must_use]
    pub const fn is_descending(&self) -> bool {
        matches!(self.direction, Direction::Descending)
    }
    /// is this a numeric key
    #[must_use]
    pub const fn is_numeric(&self) -> bool {
        matches!(self.kind, KeyKind::Numeric)
    }

    /// parse one comma-free token, like `-3f`
    fn parse_token(token: &str) -> Result<Self, SpecError> {
        let t = token.trim_start_matches(|c: char| c.is_ascii_whitespace());
        let (direction, rest) = if let Some(x) = t.strip_prefix('-') {
            (Direction::Descending, x)
        } else if let Some(x) = t.strip_prefix('+') {
            (Direction::Ascending, x)
        } else {
            (Direction::Ascending, t)
        };
        let digits = rest.bytes().take_while(u8::is_ascii_digit).count();
        if digits == 0 {
            return Err(SpecError::NoColumn);
        }
        let column = rest[..digits].parse::<u32>().map_err(|_| SpecError::NoColumn)? as usize;
        if column == 0 {
            return Err(SpecError::ColumnZero);
        }
        let kind = match rest[digits..].trim_matches(|c: char| c.is_ascii_whitespace()) {
            "" => KeyKind::Lexicographic,
            "f" => KeyKind::Numeric,
            _ => return Err(SpecError::BadFormat),
        };
        Ok(Self::new(column, direction, kind))
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_descending() {
            f.write_str("-")?;
        }
        write!(f, "{}", self.column)?;
        if self.is_numeric() {
            f.write_str("f")?;
        }
        Ok(())
    }
}

/// Ordered list of [`SortKey`], first key has the highest priority.
/// Never empty, and no column appears twice.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeySpec {
    keys: Vec<SortKey>,
    max_column: usize,
}

impl KeySpec {
    /// new from a list of keys, checking the list is usable
    pub fn new(keys: Vec<SortKey>) -> Result<Self, SpecError> {
        if keys.is_empty() {
            return Err(SpecError::NoColumn);
        }
        if keys.iter().any(|k| k.column == 0) {
            return Err(SpecError::ColumnZero);
        }
        let mut cols: Vec<usize> = keys.iter().map(|k| k.column).collect();
        cols.sort_unstable();
        if cols.windows(2).any(|w| w[0] == w[1]) {
            return Err(SpecError::Duplicate);
        }
        let max_column = cols[cols.len() - 1];
        Ok(Self { keys, max_column })
    }
    /// the keys, in priority order
    #[must_use]
    pub fn keys(&self) -> &[SortKey] {
        &self.keys
    }
    /// iterate over the keys, in priority order
    pub fn iter(&self) -> std::slice::Iter<'_, SortKey> {
        self.keys.iter()
    }
    /// number of keys
    #[must_use]
    pub fn len(&self) -> usize {
        self.keys.len()
    }
    /// always false, but required by clippy
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
    /// largest column number used, which is the fewest columns a record may have
    #[must_use]
    pub const fn max_column(&self) -> usize {
        self.max_column
    }
    /// the numeric keys, in priority order
    pub fn numeric_keys(&self) -> impl Iterator<Item = &SortKey> + '_ {
        self.keys.iter().filter(|k| k.is_numeric())
    }
}

impl std::ops::Index<usize> for KeySpec {
    type Output = SortKey;
    fn index(&self, pos: usize) -> &Self::Output {
        &self.keys[pos]
    }
}

impl<'a> IntoIterator for &'a KeySpec {
    type Item = &'a SortKey;
    type IntoIter = std::slice::Iter<'a, SortKey>;

    fn into_iter(self) -> Self::IntoIter {
        self.keys.iter()
    }
}

impl FromStr for KeySpec {
    type Err = SpecError;

    fn from_str(spec: &str) -> Result<Self, SpecError> {
        let bytes = spec.as_bytes();
        if bytes.is_empty() {
            return Err(SpecError::NoColumn);
        }
        if bytes[bytes.len() - 1] == b',' {
            return Err(SpecError::TrailingComma);
        }
        if bytes[0] == b',' {
            return Err(SpecError::LeadingComma);
        }
        if memmem::find(bytes, b",,").is_some() {
            return Err(SpecError::DoubleComma);
        }
        let mut keys = Vec::new();
        for token in spec.split(',') {
            keys.push(SortKey::parse_token(token)?);
        }
        Self::new(keys)
    }
}

impl fmt::Display for KeySpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, k) in self.keys.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{}", k)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bad(spec: &str) -> SpecError {
        spec.parse::<KeySpec>().unwrap_err()
    }

    #[test]
    fn simple() {
        let s: KeySpec = "2,-1f,3".parse().unwrap();
        assert_eq!(
            s.keys(),
            [
                SortKey::new(2, Direction::Ascending, KeyKind::Lexicographic),
                SortKey::new(1, Direction::Descending, KeyKind::Numeric),
                SortKey::new(3, Direction::Ascending, KeyKind::Lexicographic),
            ]
        );
        assert_eq!(s.max_column(), 3);
        assert_eq!(s.numeric_keys().count(), 1);
    }

    #[test]
    fn signs_and_space() {
        let s: KeySpec = "+4f, -2 , 7 f".parse().unwrap();
        assert_eq!(s.to_string(), "4f,-2,7f");
        assert_eq!(s.max_column(), 7);
        let s: KeySpec = "12".parse().unwrap();
        assert_eq!(s.max_column(), 12);
        assert_eq!(s[0].index(), 11);
    }

    #[test]
    fn rejections() {
        assert_eq!(bad(""), SpecError::NoColumn);
        assert_eq!(bad("1,"), SpecError::TrailingComma);
        assert_eq!(bad(","), SpecError::TrailingComma);
        assert_eq!(bad(",1"), SpecError::LeadingComma);
        assert_eq!(bad("1,,2"), SpecError::DoubleComma);
        assert_eq!(bad("x"), SpecError::NoColumn);
        assert_eq!(bad("f"), SpecError::NoColumn);
        assert_eq!(bad("1,-"), SpecError::NoColumn);
        assert_eq!(bad("1, ,2"), SpecError::NoColumn);
        assert_eq!(bad("--1"), SpecError::NoColumn);
        assert_eq!(bad("99999999999"), SpecError::NoColumn);
        assert_eq!(bad("0"), SpecError::ColumnZero);
        assert_eq!(bad("-0f"), SpecError::ColumnZero);
        assert_eq!(bad("2,0x"), SpecError::ColumnZero);
        assert_eq!(bad("1x"), SpecError::BadFormat);
        assert_eq!(bad("1ff"), SpecError::BadFormat);
        assert_eq!(bad("1f2"), SpecError::BadFormat);
        assert_eq!(bad("1 2"), SpecError::BadFormat);
        assert_eq!(bad("1.5"), SpecError::BadFormat);
        assert_eq!(bad("1,1"), SpecError::Duplicate);
        assert_eq!(bad("1,-1f"), SpecError::Duplicate);
        assert_eq!(bad("3,2,1,2f"), SpecError::Duplicate);
    }

    #[test]
    fn first_problem_wins() {
        // format problems in an early key are reported before duplicates
        assert_eq!(bad("1,1,x"), SpecError::NoColumn);
        assert_eq!(bad("1,1x,1"), SpecError::BadFormat);
        assert_eq!(bad(",1,,"), SpecError::TrailingComma);
    }

    #[test]
    fn from_keys() {
        assert_eq!(KeySpec::new(Vec::new()), Err(SpecError::NoColumn));
        let k = SortKey::new(0, Direction::Ascending, KeyKind::Numeric);
        assert_eq!(KeySpec::new(vec![k]), Err(SpecError::ColumnZero));
        let k = SortKey::new(5, Direction::Descending, KeyKind::Numeric);
        let s = KeySpec::new(vec![k]).unwrap();
        assert_eq!(s.to_string(), "-5f");
    }

    #[test]
    fn round_trip() {
        let rng = fastrand::Rng::with_seed(7);
        for _ in 0..500 {
            let mut cols: Vec<usize> = (1..=20).collect();
            rng.shuffle(&mut cols);
            let n = rng.usize(1..8);
            let keys = cols[..n]
                .iter()
                .map(|&c| {
                    let d = if rng.bool() { Direction::Descending } else { Direction::Ascending };
                    let k = if rng.bool() { KeyKind::Numeric } else { KeyKind::Lexicographic };
                    SortKey::new(c, d, k)
                })
                .collect();
            let spec = KeySpec::new(keys).unwrap();
            let again: KeySpec = spec.to_string().parse().unwrap();
            assert_eq!(spec, again);
        }
    }
}
