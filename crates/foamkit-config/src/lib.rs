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

//! Typed configuration for tutorial acquisition, container runs, and logging.
//!
//! Layout: `defaults.rs` (built-in constants), `model.rs` (typed settings),
//! `validate.rs` (field validation), `loader.rs` (file + environment layering).

pub mod defaults;
pub mod error;
pub mod loader;
pub mod model;
pub mod validate;

pub use defaults::{MARKER_FILE, REQUIRED_DIRS};
pub use error::{ConfigError, ConfigResult};
pub use loader::{ENV_PREFIX, load, load_with};
pub use model::{
    ConfigDocument, DockerSettings, FoamkitConfig, LoggingSettings, ManifestEntry,
    TutorialDocument, TutorialSettings,
};
pub use validate::validate_document;
