//! Finding existing periodic notes on disk.

mod index;
mod store;

use thiserror::Error;

use crate::granularity::Granularity;

pub use index::NoteIndex;
pub use store::{FileStore, FsFileStore, NoteFile};

#[derive(Debug, Error)]
pub enum NoteIndexError {
    #[error("failed to find {granularity} notes folder: {folder}")]
    FolderMissing { granularity: Granularity, folder: String },

    #[error("failed to walk notes folder {0}: {1}")]
    WalkError(String, #[source] walkdir::Error),
}
