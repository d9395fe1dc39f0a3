//! List command implementation.

use std::path::Path;

use periodic_notes_core::{DateMatcher, Granularity, NoteFile, NoteIndex};
use serde::Serialize;
use tabled::{Table, Tabled, settings::Style};
use tracing::error;

use crate::ListArgs;

#[derive(Tabled)]
struct NoteRow {
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Path")]
    path: String,
    #[tabled(rename = "UID")]
    uid: String,
}

/// Note entry for JSON output.
#[derive(Debug, Serialize)]
struct NoteOutput {
    uid: String,
    date: String,
    path: String,
}

impl NoteOutput {
    fn new(matcher: &DateMatcher, granularity: Granularity, uid: &str, note: &NoteFile) -> Self {
        let date = matcher
            .date_from_filename(&note.basename, granularity)
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_default();
        Self { uid: uid.to_string(), date, path: note.path.display().to_string() }
    }
}

pub fn run(config: Option<&Path>, profile: Option<&str>, args: &ListArgs) {
    let rc = super::load(config, profile);
    let matcher = rc.matcher();
    let store = rc.file_store();

    let index = match NoteIndex::build(&matcher, &store, args.granularity) {
        Ok(index) => index,
        Err(e) => {
            error!("{e}");
            std::process::exit(1);
        }
    };

    let notes: Vec<NoteOutput> = index
        .entries()
        .into_iter()
        .map(|(uid, note)| NoteOutput::new(&matcher, args.granularity, uid, note))
        .collect();

    if args.json {
        match serde_json::to_string_pretty(&notes) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                error!("Failed to serialize notes: {e}");
                std::process::exit(1);
            }
        }
        return;
    }

    if notes.is_empty() {
        println!("(no {} notes found)", args.granularity);
        return;
    }

    let rows: Vec<NoteRow> = notes
        .into_iter()
        .map(|n| NoteRow { date: n.date, path: n.path, uid: n.uid })
        .collect();
    let count = rows.len();
    let table = Table::new(&rows).with(Style::rounded()).to_string();
    println!("{table}");
    println!("-- {count} {} notes --", args.granularity);
}
