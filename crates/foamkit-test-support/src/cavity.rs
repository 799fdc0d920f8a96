//! Lid-driven cavity case trees for acquisition and runner tests.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use walkdir::WalkDir;

/// Minimal stand-ins for the seven cavity tutorial files.
pub const CAVITY_CASE: [(&str, &str); 7] = [
    (
        "system/controlDict",
        "application icoFoam;\nstartFrom startTime;\nendTime 0.5;\ndeltaT 0.005;\n",
    ),
    (
        "system/fvSchemes",
        "ddtSchemes { default Euler; }\ngradSchemes { default Gauss linear; }\n",
    ),
    (
        "system/fvSolution",
        "solvers { p { solver PCG; tolerance 1e-06; } }\nPISO { nCorrectors 2; }\n",
    ),
    (
        "system/blockMeshDict",
        "scale 0.1;\nblocks ( hex (0 1 2 3 4 5 6 7) (20 20 1) simpleGrading (1 1 1) );\n",
    ),
    (
        "0/U",
        "dimensions [0 1 -1 0 0 0 0];\ninternalField uniform (0 0 0);\n",
    ),
    ("0/p", "dimensions [0 2 -2 0 0 0 0];\ninternalField uniform 0;\n"),
    ("constant/transportProperties", "nu 0.01;\n"),
];

/// Write the cavity case beneath `root`, creating directories as needed.
///
/// # Errors
///
/// Returns any IO error raised while writing.
pub fn write_cavity_case(root: &Path) -> io::Result<()> {
    for (relative, contents) in CAVITY_CASE {
        let path = root.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, contents)?;
    }
    Ok(())
}

/// One file or directory observed by [`tree_snapshot`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeEntry {
    /// Path relative to the snapshot root.
    pub path: PathBuf,
    /// Size in bytes (zero for directories).
    pub len: u64,
    /// Last modification time, when the platform reports one.
    pub modified: Option<SystemTime>,
}

/// Sorted listing of everything beneath `root`, used to assert a call made
/// no filesystem changes.
///
/// # Errors
///
/// Returns an IO error if the tree cannot be traversed.
pub fn tree_snapshot(root: &Path) -> io::Result<Vec<TreeEntry>> {
    let mut entries = Vec::new();
    for entry in WalkDir::new(root).min_depth(1).sort_by_file_name() {
        let entry = entry.map_err(io::Error::other)?;
        let metadata = entry.metadata().map_err(io::Error::other)?;
        let path = entry
            .path()
            .strip_prefix(root)
            .map_err(io::Error::other)?
            .to_path_buf();
        entries.push(TreeEntry {
            path,
            len: if metadata.is_dir() { 0 } else { metadata.len() },
            modified: metadata.modified().ok(),
        });
    }
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_cavity_case_creates_every_file() -> io::Result<()> {
        let temp = tempfile::TempDir::new()?;
        write_cavity_case(temp.path())?;
        let snapshot = tree_snapshot(temp.path())?;
        let files = snapshot.iter().filter(|entry| entry.len > 0).count();
        assert_eq!(files, 7);
        assert_eq!(snapshot.len(), 10);
        Ok(())
    }
}
