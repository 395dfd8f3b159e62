//! The command line tool `urlsort` sorts lines of text by the parts of the URL on each line.
//! Lines are ordered by domain (with its labels reversed, so `www.example.com` sorts as
//! `com.example.www`), then port, scheme, path, query and fragment.
//! The library does the key extraction and comparison, so others can sort URLs the same way.

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
    unsafe_code,
    unused_lifetimes,
    unused_extern_crates,
    unused_qualifications,

//    clippy::all,
//    clippy::pedantic,
    clippy::nursery,
    clippy::cargo,
)]
#![allow(clippy::multiple_crate_versions)]
#![allow(clippy::redundant_pub_crate)]

pub mod comp;
pub mod domain;
pub mod key;
pub mod port;
pub mod prelude;
pub mod sort;
pub mod url;
pub mod util;

pub use util::{Error, Result};
