//! CSV export of session history and body stats.
//!
//! Sessions are flattened to one row per set so the file opens cleanly in a
//! spreadsheet. Files are written from scratch and synced before returning.

use crate::{BodyStats, Result, WorkoutSession};
use std::fs::File;
use std::path::Path;

const SET_HEADERS: [&str; 9] = [
    "session_id",
    "date",
    "plan",
    "exercise_id",
    "set_number",
    "weight",
    "reps",
    "set_completed",
    "session_completed",
];

const BODY_HEADERS: [&str; 3] = ["date", "weight", "waist"];

/// A row in the session CSV output (one per set)
#[derive(Debug, serde::Serialize)]
struct SetRow<'a> {
    session_id: &'a str,
    date: String,
    plan: &'a str,
    exercise_id: &'a str,
    set_number: usize,
    weight: f64,
    reps: u32,
    set_completed: bool,
    session_completed: bool,
}

/// A row in the body stats CSV output
#[derive(Debug, serde::Serialize)]
struct BodyRow {
    date: String,
    weight: f64,
    waist: Option<f64>,
}

impl From<&BodyStats> for BodyRow {
    fn from(stats: &BodyStats) -> Self {
        BodyRow {
            date: stats.date.format("%Y-%m-%d").to_string(),
            weight: stats.weight,
            waist: (stats.waist > 0.0).then_some(stats.waist),
        }
    }
}

/// Write every set of every session to `path`, returning the row count
pub fn export_sessions_csv(sessions: &[WorkoutSession], path: &Path) -> Result<usize> {
    let mut writer = create_writer(path, &SET_HEADERS)?;
    let mut rows = 0;

    for session in sessions {
        let date = session.date.format("%Y-%m-%d").to_string();
        for log in &session.exercises {
            for (index, set) in log.sets.iter().enumerate() {
                writer.serialize(SetRow {
                    session_id: &session.id,
                    date: date.clone(),
                    plan: session.plan_id.as_str(),
                    exercise_id: &log.exercise_id,
                    set_number: index + 1,
                    weight: set.weight,
                    reps: set.reps,
                    set_completed: set.completed,
                    session_completed: session.completed,
                })?;
                rows += 1;
            }
        }
    }

    finish(writer)?;
    tracing::info!("Exported {} set rows to {:?}", rows, path);
    Ok(rows)
}

/// Write all body measurements to `path`, sorted by date
pub fn export_body_stats_csv(stats: &[BodyStats], path: &Path) -> Result<usize> {
    let mut sorted: Vec<&BodyStats> = stats.iter().collect();
    sorted.sort_by_key(|s| s.date);

    let mut writer = create_writer(path, &BODY_HEADERS)?;
    for entry in &sorted {
        writer.serialize(BodyRow::from(*entry))?;
    }

    finish(writer)?;
    tracing::info!("Exported {} body stat rows to {:?}", sorted.len(), path);
    Ok(sorted.len())
}

/// Open `path` and write the header row, so empty exports still carry one
fn create_writer(path: &Path, headers: &[&str]) -> Result<csv::Writer<File>> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let file = File::create(path)?;
    let mut writer = csv::WriterBuilder::new().has_headers(false).from_writer(file);
    writer.write_record(headers)?;
    Ok(writer)
}

/// Flush and sync to disk
fn finish(mut writer: csv::Writer<File>) -> Result<()> {
    writer.flush()?;
    let file = writer
        .into_inner()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e.to_string()))?;
    file.sync_all()?;
    Ok(())
}
