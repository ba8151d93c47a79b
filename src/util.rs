//! Misc utility stuff

use crate::keyspec::SpecError;
use crate::record::RecordError;
use flate2::read::MultiGzDecoder;
use fs_err as fs;
use std::error;
use std::fmt;
use std::io::{self, BufRead, Read, Write};
use std::ops::{Deref, DerefMut};

/// Shorthand for returning an error Result
#[macro_export]
macro_rules! err {
    ($e:literal) => {Err($crate::util::Error::Error($e.to_string()))};
    ($e:expr) => {Err($crate::util::Error::Error($e))};
    ($($e:expr),+) => {Err($crate::util::Error::Error(format!($($e),+)))}
}
pub use err;
// Shorthand for implementing a pass-through error
macro_rules! err_type {
    ($x:path, $i:path) => {
        impl From<$x> for Error {
            fn from(kind: $x) -> Error {
                $i(kind)
            }
        }
    };
}

/// Various errors
#[derive(Debug)]
#[non_exhaustive]
pub enum Error {
    /// Custom csort error
    Error(String),
    /// the sort specification was rejected
    Spec(SpecError),
    /// an input record was rejected
    Record(RecordError),
    /// wrong command line
    Usage(String),
    /// pass through ParseIntError
    ParseIntError(std::num::ParseIntError),
    /// pass through io::Error
    IoError(std::io::Error),
    /// not really an error, e.g. --help was printed
    NoError,
    /// be an error, but don't report anything
    Silent,
}
/// Result type for csort
pub type Result<T> = core::result::Result<T, Error>;
impl error::Error for Error {}

impl Error {
    /// return true if this error should be treated as not an error
    pub fn suppress(&self) -> bool {
        match self {
            Error::IoError(err) => err.kind() == io::ErrorKind::BrokenPipe,
            Error::NoError => true,
            _ => false,
        }
    }
    /// return true if this error should be treated as an error, but silently
    pub const fn silent(&self) -> bool {
        matches!(self, Error::Silent)
    }
}

err_type!(SpecError, Error::Spec);
err_type!(RecordError, Error::Record);
err_type!(std::io::Error, Error::IoError);
err_type!(std::num::ParseIntError, Error::ParseIntError);

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Error(s) => write!(f, "{}", s)?,
            Error::Spec(s) => write!(f, "{}", s)?,
            Error::Record(s) => write!(f, "{}", s)?,
            Error::Usage(s) => write!(f, "{}", s)?,
            Error::ParseIntError(s) => write!(f, "ParseIntError : {}", s)?,
            Error::IoError(s) => write!(f, "IoError : {}", s)?,
            Error::NoError => write!(f, "NoError")?,
            Error::Silent => write!(f, "Silent")?,
        }
        Ok(())
    }
}

/// Input file. Wrapped in a struct so I can implement Debug.
pub struct Infile(pub io::BufReader<Box<dyn Read>>);

impl Infile {
    /// new
    pub fn new(f: io::BufReader<Box<dyn Read>>) -> Self {
        Self(f)
    }
}

impl fmt::Debug for Infile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Infile").finish()
    }
}

impl Deref for Infile {
    type Target = io::BufReader<Box<dyn Read>>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for Infile {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

/// Output file type
pub type Outfile = io::BufWriter<Box<dyn Write>>;

/// Buffered standard output, where sorted records go
#[must_use]
pub fn get_writer() -> Outfile {
    io::BufWriter::new(Box::new(io::stdout()))
}

// should return Cow<>
fn unescape_vec(data: &[u8]) -> Vec<u8> {
    let mut ret: Vec<u8> = Vec::with_capacity(data.len());
    let mut last_was_slash = false;
    for x in data {
        if last_was_slash {
            ret.push(match x {
                b'n' => b'\n',
                b't' => b'\t',
                b's' => b' ',
                ch => *ch,
            });
            last_was_slash = false;
        } else if x == &b'\\' {
            last_was_slash = true;
        } else {
            ret.push(*x);
        }
    }
    if last_was_slash {
        ret.push(b'\\');
    }
    ret
}

/// Make an Infile from a file name.
/// "-" is stdin, "<<text" is the literal text, with \n and \t escapes.
/// gzipped input is decompressed.
pub fn get_reader(name: &str) -> Result<Infile> {
    let inner: Box<dyn Read> = {
        if name == "-" {
            Box::new(io::stdin())
        } else if let Some(stripped) = name.strip_prefix("<<") {
            Box::new(io::Cursor::new(unescape_vec(stripped.as_bytes())))
        } else {
            Box::new(fs::File::open(name)?)
        }
    };
    let mut outer = io::BufReader::new(inner);
    let start = outer.fill_buf()?;
    if start.starts_with(&[0x1fu8, 0x8bu8, 0x08u8]) {
        outer = io::BufReader::new(Box::new(MultiGzDecoder::new(outer)));
    }
    Ok(Infile::new(outer))
}

/// print a bunch of u8 to stderr, adding a newline
pub fn prerr(data: &[&[u8]]) -> Result<()> {
    let mut e = io::stderr().lock();
    for x in data {
        e.write_all(x)?;
    }
    e.write_all(b"\n")?;
    Ok(())
}

/// remove trailing end of line characters
pub fn chomp(mut x: &[u8]) -> &[u8] {
    while let Some((last, rest)) = x.split_last() {
        if *last != b'\n' && *last != b'\r' {
            break;
        }
        x = rest;
    }
    x
}

/// trim leading whitespace
pub fn skip_leading_white(mut x: &[u8]) -> &[u8] {
    while let Some((first, rest)) = x.split_first() {
        if !first.is_ascii_whitespace() {
            break;
        }
        x = rest;
    }
    x
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chomping() {
        assert_eq!(chomp(b"abc\n"), b"abc");
        assert_eq!(chomp(b"abc\r\n"), b"abc");
        assert_eq!(chomp(b"abc"), b"abc");
        assert_eq!(chomp(b"\n"), b"");
        assert_eq!(chomp(b""), b"");
    }

    #[test]
    fn white() {
        assert_eq!(skip_leading_white(b"  \tabc "), b"abc ");
        assert_eq!(skip_leading_white(b"   "), b"");
    }

    #[test]
    fn inline_reader() -> Result<()> {
        let mut f = get_reader("<<a,1\\nb,2\\n")?;
        let mut body = Vec::new();
        f.read_to_end(&mut body)?;
        assert_eq!(body, b"a,1\nb,2\n");
        Ok(())
    }

    #[test]
    fn gzip_reader() -> Result<()> {
        use flate2::write::GzEncoder;
        use flate2::Compression;
        let mut enc = GzEncoder::new(Vec::new(), Compression::default());
        enc.write_all(b"x,10\ny,2\n")?;
        let zipped = enc.finish()?;
        let tmp = tempfile::NamedTempFile::new()?;
        fs::write(tmp.path(), &zipped)?;
        let mut f = get_reader(&tmp.path().to_string_lossy())?;
        let mut body = Vec::new();
        f.read_to_end(&mut body)?;
        assert_eq!(body, b"x,10\ny,2\n");
        Ok(())
    }

    #[test]
    fn suppression() {
        let e = Error::IoError(io::Error::new(io::ErrorKind::BrokenPipe, "pipe"));
        assert!(e.suppress());
        assert!(Error::NoError.suppress());
        assert!(!Error::Silent.suppress());
        assert!(Error::Silent.silent());
        let e: Result<()> = err!("bad {}", 3);
        assert_eq!(e.unwrap_err().to_string(), "bad 3");
    }
}
