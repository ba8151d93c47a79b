//! Read, check, sort and write a set of records
//!
//! ```
//! use csort::prelude::*;
//! let config = SortConfig::new("-2f,1".parse()?);
//! let mut input: &[u8] = b"a,1\nb,10\nc,1\n";
//! let mut out = Vec::new();
//! let stats = config.sort(&mut input, &mut out)?;
//! assert_eq!(out, b"b,10\na,1\nc,1\n");
//! assert_eq!(stats.accepted, 3);
//! # Ok::<(), csort::util::Error>(())
//! ```

use crate::keyspec::KeySpec;
use crate::record::Record;
use crate::util::{prerr, Error, Result};
use std::io::{BufRead, Write};

/// What happened during a sort
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct SortStats {
    /// lines read
    pub lines: usize,
    /// records kept for sorting
    pub accepted: usize,
    /// records dropped because they failed a check
    pub rejected: usize,
}

/// All the accepted records, held in memory until sorted
#[derive(Debug, Clone, Default)]
pub struct RecordSet {
    records: Vec<Record>,
}

impl RecordSet {
    /// new
    #[must_use]
    pub const fn new() -> Self {
        Self { records: Vec::new() }
    }
    /// add a record
    pub fn push(&mut self, r: Record) {
        self.records.push(r);
    }
    /// number of records
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }
    /// no records?
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
    /// the records, in their current order
    #[must_use]
    pub fn records(&self) -> &[Record] {
        &self.records
    }
    /// Sort by the spec. Stable, so fully tied records keep their input order.
    pub fn sort(&mut self, spec: &KeySpec) {
        self.records.sort_by(|a, b| spec.comp(a, b));
    }
    /// true if no record sorts before the one preceding it
    #[must_use]
    pub fn is_sorted(&self, spec: &KeySpec) -> bool {
        self.records.windows(2).all(|w| !spec.less(&w[1], &w[0]))
    }
    /// write each record, fields joined by `delim`
    pub fn write(&self, w: &mut impl Write, delim: u8) -> Result<()> {
        for r in &self.records {
            r.write(w, delim)?;
        }
        Ok(())
    }
}

impl FromIterator<Record> for RecordSet {
    fn from_iter<I: IntoIterator<Item = Record>>(iter: I) -> Self {
        Self { records: iter.into_iter().collect() }
    }
}

/// Settings for a sort run
#[derive(Debug, Clone)]
pub struct SortConfig {
    /// how to compare
    pub spec: KeySpec,
    /// field delimiter
    pub delim: u8,
}

impl SortConfig {
    /// new, with comma delimiter
    #[must_use]
    pub const fn new(spec: KeySpec) -> Self {
        Self { spec, delim: b',' }
    }
    /// Read every line, keeping the records that pass their checks.
    /// Each rejected record is reported to stderr, with its line number.
    pub fn read(&self, r: &mut impl BufRead) -> Result<(RecordSet, SortStats)> {
        let mut set = RecordSet::new();
        let mut stats = SortStats::default();
        let mut rec = Record::new();
        loop {
            if rec.read(r)? {
                break;
            }
            stats.lines += 1;
            rec.split(self.delim);
            match rec.validate(&self.spec) {
                Ok(()) => {
                    stats.accepted += 1;
                    set.push(rec.clone());
                }
                Err(Error::Record(e)) => {
                    stats.rejected += 1;
                    prerr(&[format!("Error: {} (line {})", e, stats.lines).as_bytes()])?;
                }
                Err(e) => return Err(e),
            }
        }
        Ok((set, stats))
    }
    /// read, sort and write
    pub fn sort(&self, r: &mut impl BufRead, w: &mut impl Write) -> Result<SortStats> {
        let (mut set, stats) = self.read(r)?;
        set.sort(&self.spec);
        set.write(w, self.delim)?;
        Ok(stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(spec: &str, input: &str) -> (String, SortStats) {
        let config = SortConfig::new(spec.parse().unwrap());
        let mut out = Vec::new();
        let stats = config.sort(&mut input.as_bytes(), &mut out).unwrap();
        (String::from_utf8(out).unwrap(), stats)
    }

    #[test]
    fn basic() {
        assert_eq!(run("1", "b,2\na,1\n").0, "a,1\nb,2\n");
        assert_eq!(run("-1", "b,2\na,1\n").0, "b,2\na,1\n");
        assert_eq!(run("2f", "x,10\ny,2\n").0, "y,2\nx,10\n");
        assert_eq!(run("2", "x,10\ny,2\n").0, "x,10\ny,2\n");
    }

    #[test]
    fn drops_bad_records() {
        let (out, stats) = run("2f", "a,3\nshort\nb,1\nc,zz\nd,2");
        assert_eq!(out, "b,1\nd,2\na,3\n");
        assert_eq!(stats, SortStats { lines: 5, accepted: 3, rejected: 2 });
    }

    #[test]
    fn stable_ties() {
        let (out, _) = run("1", "a,3\nb,1\na,1\na,2\n");
        assert_eq!(out, "a,3\na,1\na,2\nb,1\n");
        let (out, _) = run("1, -2f", "a,3\nb,1\na,1\na, 3.0\n");
        assert_eq!(out, "a,3\na, 3.0\na,1\nb,1\n");
    }

    #[test]
    fn empty_input() {
        let (out, stats) = run("3", "");
        assert_eq!(out, "");
        assert_eq!(stats, SortStats::default());
        let (out, stats) = run("1", "\n\n");
        assert_eq!(out, "");
        assert_eq!(stats.rejected, 2);
    }

    #[test]
    fn idempotent() {
        let rng = fastrand::Rng::with_seed(1);
        let spec: KeySpec = "3f,-1,2".parse().unwrap();
        for _ in 0..20 {
            let mut set: RecordSet = (0..50)
                .map(|_| {
                    let line = format!(
                        "{},{},{}",
                        rng.alphabetic(),
                        rng.u8(b'a'..=b'c') as char,
                        rng.i32(-5..5)
                    );
                    Record::from_line(line.as_bytes(), b',')
                })
                .collect();
            set.sort(&spec);
            assert!(set.is_sorted(&spec));
            let once = set.clone();
            set.sort(&spec);
            assert_eq!(set.records(), once.records());
        }
    }
}
