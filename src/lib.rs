//! The command line tool `csort` sorts lines of comma separated fields
//! by a list of column keys, each ascending or descending, text or numeric.
//! The associated library holds the parts: [keyspec] for the key list,
//! [record] for splitting and checking lines, [comp] for comparing them
//! and [sort] to put it all together.

#![warn(
    absolute_paths_not_starting_with_crate,
    explicit_outlives_requirements,
    keyword_idents,
    noop_method_call,
    rust_2021_incompatible_closure_captures,
    rust_2021_incompatible_or_patterns,
    rust_2021_prefixes_incompatible_syntax,
    rust_2021_prelude_collisions,
    missing_debug_implementations,
    missing_docs,
    rust_2018_idioms,
    trivial_numeric_casts,
    trivial_casts,
    unreachable_pub,
    unused_lifetimes,
    unused_extern_crates,
    unused_qualifications,

//    clippy::all,
//    clippy::restriction,
//    clippy::pedantic,
    clippy::nursery,
    clippy::cargo,
)]
#![allow(clippy::multiple_crate_versions)]
#![allow(clippy::redundant_pub_crate)]

pub mod comp;
pub mod keyspec;
pub mod num;
pub mod prelude;
pub mod record;
pub mod sort;
pub mod tooltest;
pub mod util;
