//! CSV archive export for the gut moment journal.
//!
//! Flattens a user's moment journal into an append-only CSV and archives
//! the source JSONL atomically so nothing is lost if the export dies
//! half-way.

use crate::journal::Journal;
use crate::{GutMoment, Result};
use chrono::{DateTime, Utc};
use std::fs::OpenOptions;
use std::path::Path;

/// A row in the CSV output
#[derive(Debug, serde::Serialize)]
struct CsvRow {
    id: String,
    logged_at: String,
    bristol: Option<u8>,
    bloating: bool,
    gas: bool,
    cramping: bool,
    nausea: bool,
    urgency: Option<String>,
    pain: Option<u8>,
    duration_minutes: Option<u32>,
    incomplete_evacuation: Option<bool>,
}

impl From<&GutMoment> for CsvRow {
    fn from(moment: &GutMoment) -> Self {
        CsvRow {
            id: moment.id.to_string(),
            logged_at: moment.logged_at.to_rfc3339(),
            bristol: moment.bristol.map(|b| b.value()),
            bloating: moment.symptoms.bloating,
            gas: moment.symptoms.gas,
            cramping: moment.symptoms.cramping,
            nausea: moment.symptoms.nausea,
            urgency: moment.urgency.map(|u| format!("{:?}", u).to_lowercase()),
            pain: moment.pain.map(|p| p.value()),
            duration_minutes: moment.duration_minutes,
            incomplete_evacuation: moment.incomplete_evacuation,
        }
    }
}

/// Export a user's moment journal to CSV and archive the journal.
///
/// 1. Reads every moment from the JSONL journal
/// 2. Appends them to the CSV (writing headers only when the file is new)
/// 3. Syncs the CSV to disk
/// 4. Renames the JSONL to `.processed` (never deletes)
///
/// Returns the number of moments exported. An empty journal is a no-op.
pub fn export_moments_csv(journal: &Journal, user: &str, csv_path: &Path) -> Result<usize> {
    let moments = journal.moments_since(user, DateTime::<Utc>::MIN_UTC)?;

    if moments.is_empty() {
        tracing::info!("No moments to export for user {}", user);
        return Ok(0);
    }

    if let Some(parent) = csv_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let file = OpenOptions::new().create(true).append(true).open(csv_path)?;
    let needs_headers = file.metadata()?.len() == 0;

    let mut writer = csv::WriterBuilder::new()
        .has_headers(needs_headers)
        .from_writer(file);

    // Oldest first reads better in an archive
    for moment in moments.iter().rev() {
        writer.serialize(CsvRow::from(moment))?;
    }

    writer.flush()?;
    let file = writer
        .into_inner()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;
    file.sync_all()?;

    // CSV is durable, safe to archive the journal
    let source = journal.moments_path(user);
    let processed = source.with_extension("jsonl.processed");
    std::fs::rename(&source, &processed)?;

    tracing::info!("Exported {} moments for user {} to {:?}", moments.len(), user, csv_path);
    Ok(moments.len())
}
