//! CSV export of the session history.
//!
//! Flattens the history log into one row per logged exercise so the data
//! can leave the app (spreadsheets, other trackers). Records with
//! unparseable payloads are skipped with a warning, same as the metrics
//! scans.

use crate::types::HistoryLog;
use crate::Result;
use std::path::Path;

/// A row in the CSV output
#[derive(Debug, serde::Serialize)]
struct CsvRow {
    program: String,
    timestamp: String,
    exercise: String,
    sets: u32,
    weight: f64,
    reps: String,
    note: String,
    date: String,
}

/// Write the full history to a CSV file, one row per logged exercise
///
/// Returns the number of rows written. The target file is truncated, not
/// appended: the export is a snapshot of the whole history.
pub fn export_history_csv(history: &HistoryLog, path: &Path) -> Result<usize> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let mut writer = csv::Writer::from_path(path)?;
    let mut rows = 0;

    for (program, records) in history {
        for record in records {
            let Some(logged) = record.logged_data() else {
                tracing::warn!("Skipping unparseable session payload in '{}'", program);
                continue;
            };
            for (exercise, entry) in logged {
                writer.serialize(CsvRow {
                    program: program.clone(),
                    timestamp: record.timestamp.to_rfc3339(),
                    exercise,
                    sets: entry.sets,
                    weight: entry.weight,
                    reps: entry.reps.join("/"),
                    note: entry.note,
                    date: entry.date,
                })?;
                rows += 1;
            }
        }
    }

    writer.flush()?;
    tracing::info!("Exported {} rows to {:?}", rows, path);
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ExerciseLogEntry, SessionRecord};
    use chrono::Utc;
    use std::collections::BTreeMap;

    fn history_with_one_session() -> HistoryLog {
        let mut logged = BTreeMap::new();
        logged.insert(
            "Push Ups".to_string(),
            ExerciseLogEntry {
                sets: 3,
                weight: 0.0,
                reps: vec!["10".into(), "8".into(), "8".into()],
                note: "solid".into(),
                date: "2024-01-15".into(),
            },
        );
        let record = SessionRecord::new(Utc::now(), &logged).unwrap();
        let mut history = HistoryLog::new();
        history.insert("AI".into(), vec![record]);
        history
    }

    #[test]
    fn test_export_writes_one_row_per_exercise() {
        let temp_dir = tempfile::tempdir().unwrap();
        let csv_path = temp_dir.path().join("history.csv");

        let rows = export_history_csv(&history_with_one_session(), &csv_path).unwrap();
        assert_eq!(rows, 1);

        let contents = std::fs::read_to_string(&csv_path).unwrap();
        assert!(contents.starts_with("program,timestamp,exercise"));
        assert!(contents.contains("Push Ups"));
        assert!(contents.contains("10/8/8"));
    }

    #[test]
    fn test_export_skips_malformed_payloads() {
        let temp_dir = tempfile::tempdir().unwrap();
        let csv_path = temp_dir.path().join("history.csv");

        let mut history = history_with_one_session();
        history.get_mut("AI").unwrap().push(SessionRecord {
            timestamp: Utc::now(),
            data: "garbage".into(),
        });

        let rows = export_history_csv(&history, &csv_path).unwrap();
        assert_eq!(rows, 1);
    }

    #[test]
    fn test_export_empty_history() {
        let temp_dir = tempfile::tempdir().unwrap();
        let csv_path = temp_dir.path().join("history.csv");
        let rows = export_history_csv(&HistoryLog::new(), &csv_path).unwrap();
        assert_eq!(rows, 0);
        assert!(csv_path.exists());
    }
}
