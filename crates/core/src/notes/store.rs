//! File listing for note folders.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use super::NoteIndexError;

/// A markdown file found under a note folder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteFile {
    /// Path relative to the store root.
    pub path: PathBuf,
    /// File name without folders or extension.
    pub basename: String,
}

impl NoteFile {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let basename =
            path.file_stem().map(|s| s.to_string_lossy().into_owned()).unwrap_or_default();
        Self { path, basename }
    }
}

/// Read access to the folders notes live in.
pub trait FileStore {
    /// Whether `folder` (relative to the store root) exists.
    fn folder_exists(&self, folder: &Path) -> bool;

    /// Every note file under `folder`, recursively, in a stable order.
    fn list_files(&self, folder: &Path) -> Result<Vec<NoteFile>, NoteIndexError>;
}

/// [`FileStore`] over a directory on disk.
#[derive(Debug, Clone)]
pub struct FsFileStore {
    root: PathBuf,
}

impl FsFileStore {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl FileStore for FsFileStore {
    fn folder_exists(&self, folder: &Path) -> bool {
        self.root.join(folder).is_dir()
    }

    fn list_files(&self, folder: &Path) -> Result<Vec<NoteFile>, NoteIndexError> {
        let base = self.root.join(folder);
        let mut files = Vec::new();

        for entry in WalkDir::new(&base)
            .follow_links(false)
            .into_iter()
            .filter_entry(|e| e.depth() == 0 || !is_hidden(e))
        {
            let entry =
                entry.map_err(|e| NoteIndexError::WalkError(base.display().to_string(), e))?;

            let path = entry.path();
            if !entry.file_type().is_file() || !is_markdown_file(path) {
                continue;
            }
            let relative = path.strip_prefix(&self.root).unwrap_or(path);
            files.push(NoteFile::new(relative));
        }

        files.sort_by(|a, b| a.path.cmp(&b.path));
        Ok(files)
    }
}

fn is_hidden(entry: &walkdir::DirEntry) -> bool {
    entry.file_name().to_string_lossy().starts_with('.')
}

fn is_markdown_file(path: &Path) -> bool {
    path.extension().and_then(|e| e.to_str()).is_some_and(|e| e == "md")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn create_test_vault() -> TempDir {
        let dir = TempDir::new().unwrap();
        let root = dir.path();

        fs::create_dir_all(root.join("Daily/archive")).unwrap();
        fs::write(root.join("Daily/2021-01-01.md"), "").unwrap();
        fs::write(root.join("Daily/archive/2020-12-31.md"), "").unwrap();
        fs::write(root.join("Daily/readme.txt"), "").unwrap();

        fs::create_dir(root.join("Daily/.trash")).unwrap();
        fs::write(root.join("Daily/.trash/2021-01-03.md"), "").unwrap();

        dir
    }

    #[test]
    fn test_list_files_recursive_markdown_only() {
        let vault = create_test_vault();
        let store = FsFileStore::new(vault.path());
        let files = store.list_files(Path::new("Daily")).unwrap();

        let names: Vec<_> = files.iter().map(|f| f.basename.as_str()).collect();
        assert_eq!(names, vec!["2021-01-01", "2020-12-31"]);
        assert_eq!(files[1].path, PathBuf::from("Daily/archive/2020-12-31.md"));
    }

    #[test]
    fn test_list_files_at_root() {
        let vault = create_test_vault();
        fs::write(vault.path().join("inbox.md"), "").unwrap();
        let store = FsFileStore::new(vault.path());
        let files = store.list_files(Path::new("")).unwrap();
        assert_eq!(files.len(), 3);
        assert_eq!(files[2].path, PathBuf::from("inbox.md"));
    }

    #[test]
    fn test_folder_exists() {
        let vault = create_test_vault();
        let store = FsFileStore::new(vault.path());
        assert!(store.folder_exists(Path::new("Daily")));
        assert!(store.folder_exists(Path::new("")));
        assert!(!store.folder_exists(Path::new("Weekly")));
    }

    #[test]
    fn test_note_file_basename() {
        let file = NoteFile::new("Weekly/2021-W07.md");
        assert_eq!(file.basename, "2021-W07");
    }
}
