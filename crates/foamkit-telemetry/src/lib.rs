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

//! Logging primitives shared across the foamkit workspace.
//!
//! Layout: `init.rs` (global subscriber installation), `capture.rs` (scoped,
//! in-memory log sinks), `lines.rs` (newline splitting for byte streams),
//! `error.rs` (telemetry errors).

pub mod capture;
pub mod error;
pub mod init;
pub mod lines;

pub use capture::{CaptureWriter, LogCapture};
pub use error::{Result, TelemetryError};
pub use init::{DEFAULT_LOG_LEVEL, LogFormat, LoggingConfig, build_sha, init_logging};
pub use lines::LineBuffer;
