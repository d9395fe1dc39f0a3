//! Index of existing notes keyed by dateUID.

use std::collections::HashMap;
use std::path::Path;

use chrono::DateTime;
use chrono_tz::Tz;

use super::{FileStore, NoteFile, NoteIndexError};
use crate::granularity::Granularity;
use crate::matcher::DateMatcher;

/// Every note of one granularity, keyed by the dateUID of its period.
#[derive(Debug, Clone)]
pub struct NoteIndex {
    granularity: Granularity,
    notes: HashMap<String, NoteFile>,
}

impl NoteIndex {
    /// Walk the configured folder for `granularity` and index every file
    /// whose name matches the configured format.
    ///
    /// When two files name the same period, the one later in path order
    /// wins.
    ///
    /// # Errors
    ///
    /// [`NoteIndexError::FolderMissing`] when the folder does not exist, or
    /// the store's error when listing fails.
    pub fn build(
        matcher: &DateMatcher,
        store: &impl FileStore,
        granularity: Granularity,
    ) -> Result<Self, NoteIndexError> {
        let folder = matcher.settings().folder(granularity);
        let folder_path = Path::new(folder.trim_matches('/'));
        if !store.folder_exists(folder_path) {
            return Err(NoteIndexError::FolderMissing { granularity, folder });
        }

        let files = store.list_files(folder_path)?;
        let scanned = files.len();
        let mut notes = HashMap::new();
        for file in files {
            if let Some(uid) = matcher.uid_from_filename(&file.basename, granularity) {
                notes.insert(uid, file);
            }
        }

        tracing::debug!(
            %granularity,
            folder = %folder,
            scanned,
            indexed = notes.len(),
            "note index built"
        );
        Ok(Self { granularity, notes })
    }

    #[must_use]
    pub fn granularity(&self) -> Granularity {
        self.granularity
    }

    /// The note for the period containing `point`, if one exists.
    #[must_use]
    pub fn get(&self, matcher: &DateMatcher, point: DateTime<Tz>) -> Option<&NoteFile> {
        self.notes.get(&matcher.date_uid(point, self.granularity))
    }

    #[must_use]
    pub fn get_uid(&self, uid: &str) -> Option<&NoteFile> {
        self.notes.get(uid)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.notes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    /// Entries sorted by dateUID.
    #[must_use]
    pub fn entries(&self) -> Vec<(&str, &NoteFile)> {
        let mut entries: Vec<_> = self.notes.iter().map(|(k, v)| (k.as_str(), v)).collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));
        entries
    }
}
