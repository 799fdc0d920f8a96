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
#![allow(clippy::module_name_repetitions)]

//! Runs `OpenFOAM` utilities and solvers inside Docker containers.
//!
//! Layout: `runner.rs` (container lifecycle), `executor.rs` (process seam),
//! `error.rs` (failure taxonomy).

pub mod error;
pub mod executor;
pub mod runner;

pub use error::{RunnerError, RunnerResult};
pub use executor::{CommandExecutor, DockerCli, ProcessOutput};
pub use runner::FoamRunner;
