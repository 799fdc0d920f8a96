//! Filesystem helpers: tree copy and rollback of partially written output.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::error::{TutorialError, TutorialResult};

/// Tracks what an acquisition created or replaced beneath its target so a
/// failed attempt can restore the target exactly as it was found.
#[derive(Debug)]
pub(crate) struct CreatedPaths {
    root: PathBuf,
    root_existed: bool,
    entries: Vec<PathBuf>,
    originals: Vec<(PathBuf, Vec<u8>)>,
}

impl CreatedPaths {
    pub(crate) fn snapshot(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
            root_existed: root.exists(),
            entries: Vec::new(),
            originals: Vec::new(),
        }
    }

    /// `create_dir_all` that remembers the outermost directory it created.
    pub(crate) fn ensure_dir(&mut self, path: &Path) -> io::Result<()> {
        if path.is_dir() {
            return Ok(());
        }
        let outermost = path
            .ancestors()
            .take_while(|ancestor| !ancestor.as_os_str().is_empty() && !ancestor.exists())
            .last()
            .map(Path::to_path_buf);
        fs::create_dir_all(path)?;
        if let Some(created) = outermost {
            self.entries.push(created);
        }
        Ok(())
    }

    /// Write `contents` to `path`, remembering the file if it is new or
    /// keeping its previous bytes if it is replaced.
    pub(crate) fn write_file(&mut self, path: &Path, contents: &[u8]) -> io::Result<()> {
        self.preserve(path)?;
        fs::write(path, contents)
    }

    /// Copy `source` to `path` under the same bookkeeping as [`Self::write_file`].
    pub(crate) fn copy_file(&mut self, source: &Path, path: &Path) -> io::Result<()> {
        self.preserve(path)?;
        fs::copy(source, path).map(|_| ())
    }

    fn preserve(&mut self, path: &Path) -> io::Result<()> {
        if !path.exists() {
            self.entries.push(path.to_path_buf());
            return Ok(());
        }
        let known = self.entries.iter().any(|entry| path.starts_with(entry))
            || self.originals.iter().any(|(original, _)| original == path);
        if !known {
            let previous = fs::read(path)?;
            self.originals.push((path.to_path_buf(), previous));
        }
        Ok(())
    }

    /// Undo the attempt: remove the root if this attempt created it, otherwise
    /// remove every new entry and put replaced files back.
    pub(crate) fn rollback(self) {
        if !self.root_existed {
            remove_path(&self.root);
            return;
        }
        for entry in self.entries.iter().rev() {
            remove_path(entry);
        }
        for (path, contents) in &self.originals {
            match fs::write(path, contents) {
                Ok(()) => debug!(path = %path.display(), "restored replaced tutorial file"),
                Err(error) => {
                    warn!(path = %path.display(), error = %error, "failed to restore replaced tutorial file");
                }
            }
        }
    }
}

fn remove_path(path: &Path) {
    let result = match fs::symlink_metadata(path) {
        Ok(metadata) if metadata.is_dir() => fs::remove_dir_all(path),
        Ok(_) => fs::remove_file(path),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(err) => Err(err),
    };
    match result {
        Ok(()) => debug!(path = %path.display(), "removed partial tutorial output"),
        Err(error) => {
            warn!(path = %path.display(), error = %error, "failed to remove partial tutorial output");
        }
    }
}

/// Copy the contents of `source` into `destination`, preserving structure.
pub(crate) fn copy_contents(
    source: &Path,
    destination: &Path,
    created: &mut CreatedPaths,
) -> TutorialResult<()> {
    created
        .ensure_dir(destination)
        .map_err(|err| TutorialError::io("create_target", destination, err))?;

    for entry in WalkDir::new(source)
        .min_depth(1)
        .follow_links(true)
        .sort_by_file_name()
    {
        let entry = entry.map_err(|err| TutorialError::walkdir("copy_tree", source, err))?;
        let Ok(relative) = entry.path().strip_prefix(source) else {
            continue;
        };
        let target_path = destination.join(relative);
        if entry.file_type().is_dir() {
            created
                .ensure_dir(&target_path)
                .map_err(|err| TutorialError::io("create_dir", &target_path, err))?;
        } else {
            created
                .copy_file(entry.path(), &target_path)
                .map_err(|err| TutorialError::io("copy_file", &target_path, err))?;
        }
    }
    Ok(())
}
