//! Tools for comparing records
//!
//! Each [`SortKey`] compares one column of two records, and a [`KeySpec`]
//! tries its keys in priority order until one of them finds a difference.
//!
//! ```
//! use csort::prelude::*;
//! let spec: KeySpec = "2f,-1".parse()?;
//! let a = Record::from_line(b"x,10", b',');
//! let b = Record::from_line(b"y,2", b',');
//! let c = Record::from_line(b"z,2.0", b',');
//! assert_eq!(spec.comp(&a, &b), Ordering::Greater);
//! assert_eq!(spec.comp(&b, &c), Ordering::Greater);
//! assert!(spec.less(&c, &b));
//! # Ok::<(), csort::util::Error>(())
//! ```

use crate::keyspec::{KeyKind, KeySpec, SortKey};
use crate::num::{f64_value, fcmp};
use crate::record::Record;
use memchr::memchr;
use std::borrow::Cow;
use std::cmp::Ordering;

/// Remove every space from a field. Other whitespace is kept.
#[must_use]
pub fn strip_spaces(field: &[u8]) -> Cow<'_, [u8]> {
    if memchr(b' ', field).is_none() {
        Cow::Borrowed(field)
    } else {
        Cow::Owned(field.iter().copied().filter(|&ch| ch != b' ').collect())
    }
}

/// compare two fields as text, ignoring spaces
#[must_use]
pub fn text_cmp(left: &[u8], right: &[u8]) -> Ordering {
    strip_spaces(left).cmp(&strip_spaces(right))
}

/// compare two fields as floating point
#[must_use]
pub fn num_cmp(left: &[u8], right: &[u8]) -> Ordering {
    fcmp(f64_value(left), f64_value(right))
}

impl SortKey {
    /// reverse the ordering if this is a descending key
    #[must_use]
    pub const fn reverse(&self, x: Ordering) -> Ordering {
        if self.is_descending() {
            x.reverse()
        } else {
            x
        }
    }
    /// compare two fields under this key
    #[must_use]
    pub fn comp_fields(&self, left: &[u8], right: &[u8]) -> Ordering {
        let x = match self.kind {
            KeyKind::Numeric => num_cmp(left, right),
            KeyKind::Lexicographic => text_cmp(left, right),
        };
        self.reverse(x)
    }
    /// compare this key's column of two records
    #[must_use]
    pub fn comp(&self, left: &Record, right: &Record) -> Ordering {
        self.comp_fields(left.get(self.index()), right.get(self.index()))
    }
}

impl KeySpec {
    /// Compare two records, key by key. Equal only if every key is equal.
    #[must_use]
    pub fn comp(&self, left: &Record, right: &Record) -> Ordering {
        for k in self {
            let x = k.comp(left, right);
            if x != Ordering::Equal {
                return x;
            }
        }
        Ordering::Equal
    }
    /// does `left` sort strictly before `right`
    #[must_use]
    pub fn less(&self, left: &Record, right: &Record) -> bool {
        self.comp(left, right) == Ordering::Less
    }
    /// are the records equivalent under every key
    #[must_use]
    pub fn equal(&self, left: &Record, right: &Record) -> bool {
        self.comp(left, right) == Ordering::Equal
    }
}
