//! Command handlers grouped by concern.

pub(crate) mod config;
pub(crate) mod runner;
pub(crate) mod tutorial;
