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

//! Acquisition of `OpenFOAM` tutorial cases.
//!
//! A request is satisfied by the cheapest available tier: an existing case in
//! the target directory, a copy of the system installation, or a per-file
//! HTTP download. Either the target ends up fully populated or the attempt
//! leaves nothing behind.
//!
//! Layout: `acquire.rs` (fallback chain), `fetch.rs` (transport seam),
//! `transfer.rs` (per-file outcomes), `tree.rs` (copy and rollback).

pub mod acquire;
pub mod error;
pub mod fetch;
pub mod transfer;
mod tree;

pub use acquire::{Acquisition, AcquisitionSource, TutorialAcquirer};
pub use error::{TutorialError, TutorialResult};
pub use fetch::{FetchError, Fetcher, HttpFetcher};
pub use transfer::{TransferOutcome, TransferRecord};
