//! Built-in defaults for the cavity tutorial and the `OpenFOAM` container.
//!
//! # Design
//! - Keep every hard-coded location in one place; everything here is
//!   overridable through [`crate::FoamkitConfig`].

/// Relative path whose presence marks a tutorial case as complete.
pub const MARKER_FILE: &str = "system/controlDict";

/// Case subdirectories created before downloading.
pub const REQUIRED_DIRS: [&str; 3] = ["0", "constant", "system"];

/// Files making up the lid-driven cavity case, relative to the case root.
pub const CAVITY_FILES: [&str; 7] = [
    "system/controlDict",
    "system/fvSchemes",
    "system/fvSolution",
    "system/blockMeshDict",
    "0/U",
    "0/p",
    "constant/transportProperties",
];

/// Cavity tutorial shipped by the `openfoam-examples` system package.
pub const SYSTEM_TUTORIAL_PATH: &str =
    "/usr/share/doc/openfoam-examples/examples/incompressible/icoFoam/cavity/cavity";

/// Raw-file root of the cavity tutorial in the ESI `OpenFOAM` repository.
pub const TUTORIAL_BASE_URL: &str = "https://develop.openfoam.com/Development/openfoam/-/raw/master/tutorials/incompressible/icoFoam/cavity/cavity/";

/// Container image providing an `OpenFOAM` installation.
pub const DOCKER_IMAGE: &str = "opencfd/openfoam-default:2406";

/// Mount point of the case directory inside the container.
pub const CONTAINER_WORKDIR: &str = "/home/openfoam/project";

/// Environment script sourced before each container command.
pub const OPENFOAM_BASHRC: &str = "/usr/lib/openfoam/openfoam*/etc/bashrc";

/// Default log level.
pub const LOG_LEVEL: &str = "info";

/// Default log format; `auto` picks by build profile.
pub const LOG_FORMAT: &str = "auto";
