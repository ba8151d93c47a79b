//! The prelude

#[doc(inline)]
pub use crate::keyspec::{Direction, KeyKind, KeySpec, SortKey, SpecError};
#[doc(inline)]
pub use crate::record::{Record, RecordError};
#[doc(inline)]
pub use crate::sort::{RecordSet, SortConfig, SortStats};
#[doc(inline)]
pub use crate::util::{err, get_reader, get_writer, prerr, Error, Result};

#[doc(inline)]
pub use std::cmp::Ordering;
#[doc(inline)]
pub use std::io::{BufRead, Read, Write};
#[doc(inline)]
pub use std::str::FromStr;
