#![deny(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! Periodic note dates: format parsing, dateUIDs and note lookup.

pub mod calendar;
pub mod config;
pub mod format;
pub mod granularity;
pub mod matcher;
pub mod notes;
pub mod settings;
pub mod uid;

pub use calendar::{Calendar, Clock, FixedClock, SystemClock, WeekConvention};
pub use format::{DateFormat, ParseMode};
pub use granularity::Granularity;
pub use matcher::DateMatcher;
pub use notes::{FileStore, FsFileStore, NoteFile, NoteIndex, NoteIndexError};
pub use settings::{PeriodicNoteSettings, SettingsProvider, SettingsSource, StaticSettings};
pub use uid::date_uid;

#[must_use]
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
