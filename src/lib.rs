//! cwfetch - fetch and filter AWS CloudWatch log events from the command line.
//!
//! The crate splits into a pure core and thin I/O edges:
//!
//! - [`time_range`] resolves the optional start/end/duration flags into an
//!   absolute epoch-millisecond query window.
//! - [`projection`] prunes a decoded log message down to a caller-supplied
//!   list of dotted field selectors, recursively at any depth.
//! - [`record`] decomposes one retrieved event into metadata attributes plus
//!   a message document and renders it as a text line or a YAML document.
//! - [`client`] wraps the CloudWatch Logs SDK and drives the paginated
//!   FilterLogEvents loop.
//! - [`cli`] and [`output`] are the flag surface and the stdout/file sinks.
//!
//! The core modules perform no I/O and hold no global state; everything they
//! need arrives as an argument, which keeps them deterministic under test.

#![warn(clippy::all, rust_2018_idioms)]

pub mod cli;
pub mod client;
pub mod output;
pub mod projection;
pub mod record;
pub mod time_range;
