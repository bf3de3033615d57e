use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum NavError {
    #[error("cannot read directory {}", path.display())]
    DirectoryUnreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// One immediate child of a listed directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub name: String,
    pub path: PathBuf,
    pub is_dir: bool,
}

impl Entry {
    fn from_path(path: PathBuf) -> Self {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        let is_dir = path.is_dir();
        Self { name, path, is_dir }
    }
}

/// Lists the immediate children of `dir`, sorted lexicographically by full
/// path. Rebuilt wholesale on every navigation; never patched in place.
pub fn read_dir(dir: &Path) -> Result<Vec<Entry>, NavError> {
    let mut entries: Vec<Entry> = fs::read_dir(dir)
        .map_err(|source| NavError::DirectoryUnreadable {
            path: dir.to_path_buf(),
            source,
        })?
        .filter_map(|e| e.ok())
        .map(|e| Entry::from_path(e.path()))
        .collect();

    entries.sort_by(|a, b| a.path.cmp(&b.path));

    Ok(entries)
}
