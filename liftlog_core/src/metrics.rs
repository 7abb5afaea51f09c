//! History-derived metrics: streaks, personal bests and weekly activity.
//!
//! All three aggregations scan the history log and tolerate malformed
//! session payloads by skipping them; nothing in here can fail.

use crate::types::{ExerciseLogEntry, HistoryLog};
use std::collections::BTreeMap;

/// One weekday bucket in the weekly activity summary
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WeekdayCount {
    pub day: String,
    pub count: u32,
}

/// Current "streak" shown on the dashboard.
///
/// Despite the name this is the total number of session records across all
/// programs, with no gap detection. That is the established behavior and
/// callers depend on it; do not replace it with a consecutive-day count
/// without revising the dashboard semantics.
pub fn streak(history: &HistoryLog) -> usize {
    history.values().map(|records| records.len()).sum()
}

/// Best logged entry per exercise, by highest weight
///
/// Scans every session record's payload; records that fail to parse are
/// skipped silently and the remaining records still contribute. Ties keep
/// the first entry found.
pub fn personal_bests(history: &HistoryLog) -> BTreeMap<String, ExerciseLogEntry> {
    let mut bests: BTreeMap<String, ExerciseLogEntry> = BTreeMap::new();

    for record in history.values().flatten() {
        let Some(logged) = record.logged_data() else {
            tracing::debug!("Skipping session record with unparseable payload");
            continue;
        };
        for (name, entry) in logged {
            match bests.get(&name) {
                Some(prev) if entry.weight <= prev.weight => {}
                _ => {
                    bests.insert(name, entry);
                }
            }
        }
    }

    bests
}

/// Session counts bucketed by weekday label
///
/// Buckets by the weekday abbreviation of each record's timestamp only, so
/// sessions on Mondays weeks apart merge into one "Mon" bucket. Bucket
/// order is first-occurrence order, not a fixed Sun-Sat layout.
pub fn weekly_activity(history: &HistoryLog) -> Vec<WeekdayCount> {
    let mut buckets: Vec<WeekdayCount> = Vec::new();

    for record in history.values().flatten() {
        let day = record.timestamp.format("%a").to_string();
        match buckets.iter_mut().find(|b| b.day == day) {
            Some(bucket) => bucket.count += 1,
            None => buckets.push(WeekdayCount { day, count: 1 }),
        }
    }

    buckets
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SessionRecord;
    use chrono::{DateTime, Utc};

    fn record_at(ts: &str, data: &str) -> SessionRecord {
        SessionRecord {
            timestamp: ts.parse::<DateTime<Utc>>().unwrap(),
            data: data.to_string(),
        }
    }

    fn entry_json(weight: f64, reps: &[&str]) -> String {
        let reps: Vec<String> = reps.iter().map(|r| r.to_string()).collect();
        serde_json::json!({
            "sets": reps.len(),
            "weight": weight,
            "reps": reps,
            "note": "",
            "date": "2024-01-15",
        })
        .to_string()
    }

    #[test]
    fn test_streak_counts_total_sessions_across_programs() {
        let mut history = HistoryLog::new();
        history.insert(
            "AI".into(),
            vec![
                record_at("2024-01-01T10:00:00Z", "{}"),
                record_at("2024-03-01T10:00:00Z", "{}"),
            ],
        );
        history.insert(
            "CrossFit".into(),
            vec![record_at("2024-02-01T10:00:00Z", "{}")],
        );
        // Not consecutive days: still 3
        assert_eq!(streak(&history), 3);
    }

    #[test]
    fn test_personal_bests_keeps_highest_weight() {
        let data_20 = format!(r#"{{"Push Ups": {}}}"#, entry_json(20.0, &["10"]));
        let data_35 = format!(r#"{{"Push Ups": {}}}"#, entry_json(35.0, &["8"]));

        // Either insertion order yields the same winner
        for (first, second) in [(&data_20, &data_35), (&data_35, &data_20)] {
            let mut history = HistoryLog::new();
            history.insert(
                "AI".into(),
                vec![
                    record_at("2024-01-01T10:00:00Z", first),
                    record_at("2024-01-08T10:00:00Z", second),
                ],
            );
            let bests = personal_bests(&history);
            assert_eq!(bests["Push Ups"].weight, 35.0);
        }
    }

    #[test]
    fn test_personal_bests_ties_keep_first_found() {
        let early = format!(r#"{{"Plank": {}}}"#, entry_json(10.0, &["1"]));
        let late = format!(r#"{{"Plank": {}}}"#, entry_json(10.0, &["2"]));
        let mut history = HistoryLog::new();
        history.insert(
            "AI".into(),
            vec![
                record_at("2024-01-01T10:00:00Z", &early),
                record_at("2024-01-08T10:00:00Z", &late),
            ],
        );
        let bests = personal_bests(&history);
        assert_eq!(bests["Plank"].reps, vec!["1".to_string()]);
    }

    #[test]
    fn test_personal_bests_skips_malformed_payloads() {
        let good = format!(r#"{{"Deadlifts": {}}}"#, entry_json(135.0, &["5"]));
        let mut history = HistoryLog::new();
        history.insert(
            "AI".into(),
            vec![
                record_at("2024-01-01T10:00:00Z", "not json at all"),
                record_at("2024-01-08T10:00:00Z", &good),
            ],
        );
        let bests = personal_bests(&history);
        assert_eq!(bests.len(), 1);
        assert_eq!(bests["Deadlifts"].weight, 135.0);
    }

    #[test]
    fn test_weekly_activity_merges_same_weekday_across_weeks() {
        let mut history = HistoryLog::new();
        // Three different Mondays
        history.insert(
            "AI".into(),
            vec![
                record_at("2024-01-01T10:00:00Z", "{}"),
                record_at("2024-01-08T10:00:00Z", "{}"),
                record_at("2024-01-15T10:00:00Z", "{}"),
            ],
        );
        let buckets = weekly_activity(&history);
        assert_eq!(
            buckets,
            vec![WeekdayCount {
                day: "Mon".into(),
                count: 3
            }]
        );
    }

    #[test]
    fn test_weekly_activity_first_occurrence_order() {
        let mut history = HistoryLog::new();
        history.insert(
            "AI".into(),
            vec![
                record_at("2024-01-03T10:00:00Z", "{}"), // Wed
                record_at("2024-01-01T10:00:00Z", "{}"), // Mon
                record_at("2024-01-10T10:00:00Z", "{}"), // Wed
            ],
        );
        let buckets = weekly_activity(&history);
        let days: Vec<_> = buckets.iter().map(|b| b.day.as_str()).collect();
        assert_eq!(days, vec!["Wed", "Mon"]);
        assert_eq!(buckets[0].count, 2);
    }

    #[test]
    fn test_empty_history() {
        let history = HistoryLog::new();
        assert_eq!(streak(&history), 0);
        assert!(personal_bests(&history).is_empty());
        assert!(weekly_activity(&history).is_empty());
    }
}
