//! Live session state tracking.
//!
//! A `SessionTracker` holds the mutable view-model for one active workout:
//! per-exercise completion and skip flags plus the values the user types in
//! as they go. Nothing here touches storage; completing a session emits a
//! record and an updated last-used map for the caller to persist.

use crate::types::*;
use crate::{Error, Result};
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;

/// Integer value of the leading digit run, 0 when there is none
fn leading_u32(value: &str) -> u32 {
    let trimmed = value.trim();
    let end = trimmed
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(trimmed.len());
    trimmed[..end].parse().unwrap_or(0)
}

/// Fields settable through `record_field`
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogField {
    Sets,
    Weight,
    Note,
}

/// Result of completing a session: the record to append to history and the
/// last-used map with this session's entries overlaid.
#[derive(Clone, Debug)]
pub struct SessionOutcome {
    pub program_key: String,
    pub record: SessionRecord,
    pub last_used: LastUsedMap,
}

/// Mutable per-session view-model over a workout plan
#[derive(Clone, Debug)]
pub struct SessionTracker {
    program_key: String,
    plan: WorkoutPlan,
    checked: Vec<Vec<bool>>,
    skipped: Vec<Vec<bool>>,
    entries: BTreeMap<String, ExerciseLogEntry>,
}

impl SessionTracker {
    /// Start a session over a plan, prefilling entries from the last-used map
    pub fn new(program_key: impl Into<String>, plan: WorkoutPlan, last_used: &LastUsedMap) -> Self {
        let checked = plan
            .sections
            .iter()
            .map(|s| vec![false; s.exercises.len()])
            .collect();
        let skipped = plan
            .sections
            .iter()
            .map(|s| vec![false; s.exercises.len()])
            .collect();

        let mut entries = BTreeMap::new();
        for ex in plan.exercises() {
            if let Some(prev) = last_used.get(&ex.name) {
                entries.insert(ex.name.clone(), prev.clone());
            }
        }

        Self {
            program_key: program_key.into(),
            plan,
            checked,
            skipped,
            entries,
        }
    }

    pub fn plan(&self) -> &WorkoutPlan {
        &self.plan
    }

    pub fn entry(&self, name: &str) -> Option<&ExerciseLogEntry> {
        self.entries.get(name)
    }

    pub fn is_checked(&self, section: usize, exercise: usize) -> bool {
        self.checked
            .get(section)
            .and_then(|s| s.get(exercise))
            .copied()
            .unwrap_or(false)
    }

    pub fn is_skipped(&self, section: usize, exercise: usize) -> bool {
        self.skipped
            .get(section)
            .and_then(|s| s.get(exercise))
            .copied()
            .unwrap_or(false)
    }

    /// Flip the completion flag. Out-of-range indices are a no-op.
    pub fn toggle_complete(&mut self, section: usize, exercise: usize) {
        if let Some(flag) = self
            .checked
            .get_mut(section)
            .and_then(|s| s.get_mut(exercise))
        {
            *flag = !*flag;
        }
    }

    /// Flip the skip flag. Independent of the completion flag: an exercise
    /// can be both skipped and checked.
    pub fn toggle_skip(&mut self, section: usize, exercise: usize) {
        if let Some(flag) = self
            .skipped
            .get_mut(section)
            .and_then(|s| s.get_mut(exercise))
        {
            *flag = !*flag;
        }
    }

    /// Record a field value for an exercise
    ///
    /// Numeric fields never reject input: anything unparseable becomes 0,
    /// and set counts read only the leading digit run ("4.5" logs 4 sets).
    /// Setting `Sets` destructively resets the rep list to `sets` empty
    /// strings, discarding whatever was entered before. This matches the
    /// historical behavior of changing the set count: never a
    /// resize-preserving update.
    pub fn record_field(&mut self, name: &str, field: LogField, value: &str) {
        let entry = self.entries.entry(name.to_string()).or_default();
        match field {
            LogField::Sets => {
                let sets = leading_u32(value);
                entry.sets = sets;
                entry.reps = vec![String::new(); sets as usize];
            }
            LogField::Weight => {
                entry.weight = value.trim().parse::<f64>().unwrap_or(0.0);
            }
            LogField::Note => {
                entry.note = value.to_string();
            }
        }
    }

    /// Record the rep count for one set. Out-of-range index is a no-op.
    pub fn record_rep(&mut self, name: &str, index: usize, value: &str) {
        if let Some(entry) = self.entries.get_mut(name) {
            if let Some(slot) = entry.reps.get_mut(index) {
                *slot = value.to_string();
            } else {
                tracing::debug!("Rep index {} out of range for '{}'", index, name);
            }
        }
    }

    /// Append an ad-hoc exercise to the first section
    ///
    /// Deliberately restricted to section 0; there is no general
    /// add-to-any-section capability.
    pub fn add_exercise(&mut self, name: &str) {
        match self.plan.sections.first_mut() {
            Some(first) => {
                first.exercises.push(PlannedExercise::unprescribed(name));
                self.checked[0].push(false);
                self.skipped[0].push(false);
            }
            None => {
                tracing::warn!("Cannot add '{}': plan has no sections", name);
            }
        }
    }

    fn counts(&self) -> (usize, usize, usize) {
        let mut total = 0;
        let mut skipped = 0;
        let mut completed = 0;
        for (si, section) in self.checked.iter().enumerate() {
            for (ei, &checked) in section.iter().enumerate() {
                total += 1;
                if self.skipped[si][ei] {
                    skipped += 1;
                } else if checked {
                    completed += 1;
                }
            }
        }
        (total, skipped, completed)
    }

    /// Completion percentage: skipped exercises leave the denominator
    pub fn progress(&self) -> u32 {
        let (total, skipped, completed) = self.counts();
        let denominator = total - skipped;
        if denominator == 0 {
            return 0;
        }
        (100.0 * completed as f64 / denominator as f64).round() as u32
    }

    /// Whether every non-skipped exercise has been checked off
    pub fn all_done(&self) -> bool {
        let (total, skipped, completed) = self.counts();
        completed == total - skipped
    }

    /// Complete the session
    ///
    /// Rejected while any non-skipped exercise is unchecked. On success,
    /// builds a log entry per exercise from the current field state (date =
    /// now), emits the session record for the caller to append, and emits
    /// the last-used map with the new entries overlaid per exercise. The
    /// caller is responsible for appending the record exactly once.
    pub fn complete_session(
        &self,
        now: DateTime<Utc>,
        last_used: &LastUsedMap,
    ) -> Result<SessionOutcome> {
        if !self.all_done() {
            return Err(Error::Session(
                "session has unchecked exercises".to_string(),
            ));
        }

        let date = now.format("%Y-%m-%d").to_string();
        let mut logged = BTreeMap::new();
        for ex in self.plan.exercises() {
            let mut entry = self.entries.get(&ex.name).cloned().unwrap_or_default();
            entry.date = date.clone();
            logged.insert(ex.name.clone(), entry);
        }

        let record = SessionRecord::new(now, &logged)?;

        let mut merged = last_used.clone();
        for (name, entry) in &logged {
            merged.insert(name.clone(), entry.clone());
        }

        tracing::info!(
            "Session '{}' complete: {} exercises logged",
            self.program_key,
            logged.len()
        );

        Ok(SessionOutcome {
            program_key: self.program_key.clone(),
            record,
            last_used: merged,
        })
    }
}
