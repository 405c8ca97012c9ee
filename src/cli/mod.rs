//! Command-line domain — public API.
//!
//! Turns the raw argument list into an immutable [`Options`] value.
//! Parsing itself is delegated to `clap`; this module owns the mapping
//! from clap's errors onto [`ParseError`] so callers see stable messages.

mod args;

pub use args::{parse_args, Options, Parsed, ParseError};
