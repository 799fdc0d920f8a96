#![forbid(unsafe_code)]
#![deny(
    warnings,
    dead_code,
    unused,
    unused_imports,
    unused_must_use,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]
#![allow(clippy::redundant_pub_crate)]

//! Command-line front end for tutorial acquisition and containerised runs.
//!
//! Layout:
//! - `cli.rs`: argument parsing, configuration layering, and dispatch
//! - `commands/`: command handlers grouped by concern
//! - `errors.rs`: exit-code aware error type
//! - `output.rs`: renderers for table and JSON output
//! - `main.rs`: thin entrypoint delegating to `run()`

pub(crate) mod cli;
pub(crate) mod commands;
pub(crate) mod errors;
pub(crate) mod output;

pub use cli::run;
