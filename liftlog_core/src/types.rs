//! Core domain types for the LiftLog system.
//!
//! This module defines the fundamental types used throughout the system:
//! - Exercise definitions and their metadata
//! - User context (goal, equipment, injuries, session length)
//! - Workout plans, sections and planned exercises
//! - Logged entries, session records and history

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ============================================================================
// Exercise Metadata
// ============================================================================

/// Body parts an exercise loads (and that injuries are declared against)
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum BodyPart {
    Shoulders,
    Back,
    Legs,
    Chest,
    Arms,
    Core,
}

/// Category of an exercise in the catalog
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ExerciseCategory {
    Warmup,
    Strength,
    Cardio,
    Core,
    Rehab,
}

/// Minimum equipment an exercise requires
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum EquipmentClass {
    Bodyweight,
    Dumbbell,
    FullGym,
}

/// An exercise definition (e.g., "Kettlebell Swing")
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ExerciseDefinition {
    pub name: String,
    pub body_parts: Vec<BodyPart>,
    pub category: ExerciseCategory,
    pub equipment: EquipmentClass,
    /// Prescribed duration for time-based exercises (planks, runs, ...)
    pub duration_seconds: Option<u32>,
}

// ============================================================================
// User Context
// ============================================================================

/// Equipment the user has access to
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Equipment {
    Bodyweight,
    Dumbbells,
    FullGym,
}

/// Training goal declared by the user
///
/// Stored as a plain string so documents written by older clients with goals
/// we don't know about still load; unknown goals fall through to the
/// generator's fallback selection.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(from = "String", into = "String")]
pub enum Goal {
    FatLoss,
    MuscleGain,
    Strength,
    Endurance,
    Other(String),
}

impl From<String> for Goal {
    fn from(s: String) -> Self {
        match s.to_lowercase().as_str() {
            "fat_loss" => Goal::FatLoss,
            "muscle_gain" => Goal::MuscleGain,
            "strength" => Goal::Strength,
            "endurance" => Goal::Endurance,
            other => Goal::Other(other.to_string()),
        }
    }
}

impl From<Goal> for String {
    fn from(goal: Goal) -> Self {
        match goal {
            Goal::FatLoss => "fat_loss".into(),
            Goal::MuscleGain => "muscle_gain".into(),
            Goal::Strength => "strength".into(),
            Goal::Endurance => "endurance".into(),
            Goal::Other(s) => s,
        }
    }
}

/// Session length preference
///
/// Persisted as the minute count string ("15"/"30"/"45"), matching the
/// preference documents written by earlier clients. Anything else parses as
/// the 30-minute default.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(from = "String", into = "String")]
pub enum SessionLength {
    Min15,
    Min30,
    Min45,
}

impl SessionLength {
    pub fn minutes(&self) -> u32 {
        match self {
            SessionLength::Min15 => 15,
            SessionLength::Min30 => 30,
            SessionLength::Min45 => 45,
        }
    }
}

impl Default for SessionLength {
    fn default() -> Self {
        SessionLength::Min30
    }
}

impl From<String> for SessionLength {
    fn from(s: String) -> Self {
        match s.trim() {
            "15" => SessionLength::Min15,
            "45" => SessionLength::Min45,
            _ => SessionLength::Min30,
        }
    }
}

impl From<SessionLength> for String {
    fn from(len: SessionLength) -> Self {
        len.minutes().to_string()
    }
}

/// Persisted user preferences (the `preferences` collection document)
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Preferences {
    pub goal: Goal,
    pub equipment: Equipment,
    #[serde(default, rename = "sessionLength")]
    pub session_length: SessionLength,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            goal: Goal::FatLoss,
            equipment: Equipment::Bodyweight,
            session_length: SessionLength::Min30,
        }
    }
}

/// Runtime context for the workout generator
#[derive(Clone, Debug)]
pub struct UserContext {
    pub injuries: Vec<BodyPart>,
    pub equipment: Equipment,
    pub goal: Goal,
    pub session_length: SessionLength,
}

impl UserContext {
    pub fn new(prefs: Preferences, injuries: Vec<BodyPart>) -> Self {
        Self {
            injuries,
            equipment: prefs.equipment,
            goal: prefs.goal,
            session_length: prefs.session_length,
        }
    }
}

// ============================================================================
// Workout Plan Types
// ============================================================================

/// An exercise instance within a generated plan
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PlannedExercise {
    pub name: String,
    pub sets: u32,
    pub reps: u32,
    pub rest_seconds: u32,
    pub target_weight: f64,
    pub duration_seconds: Option<u32>,
}

impl PlannedExercise {
    /// An unprescribed exercise: values stay 0 until the user logs them
    pub fn unprescribed(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sets: 0,
            reps: 0,
            rest_seconds: 30,
            target_weight: 0.0,
            duration_seconds: None,
        }
    }
}

/// A named group of exercises within a plan
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Section {
    pub name: String,
    pub exercises: Vec<PlannedExercise>,
}

/// A generated workout plan. Ephemeral: only logged results are persisted.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct WorkoutPlan {
    pub title: String,
    pub sections: Vec<Section>,
}

impl WorkoutPlan {
    /// Iterate every planned exercise across all sections, in plan order
    pub fn exercises(&self) -> impl Iterator<Item = &PlannedExercise> {
        self.sections.iter().flat_map(|s| s.exercises.iter())
    }
}

// ============================================================================
// Logged Data and History
// ============================================================================

/// Per-exercise logged values for one session
///
/// `reps` holds one raw input string per set; setting the set count resets
/// the whole list (see the session tracker).
#[derive(Clone, Debug, Serialize, Deserialize, Default, PartialEq)]
pub struct ExerciseLogEntry {
    #[serde(default)]
    pub sets: u32,
    #[serde(default)]
    pub weight: f64,
    #[serde(default)]
    pub reps: Vec<String>,
    #[serde(default)]
    pub note: String,
    #[serde(default)]
    pub date: String,
}

/// Most recently logged metrics per exercise name
pub type LastUsedMap = BTreeMap<String, ExerciseLogEntry>;

/// An immutable record of one completed session
///
/// The logged data rides along as a JSON-encoded payload string; records
/// with payloads we can't parse still count for streaks and weekly activity
/// but contribute nothing to personal bests.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SessionRecord {
    pub timestamp: DateTime<Utc>,
    pub data: String,
}

impl SessionRecord {
    pub fn new(
        timestamp: DateTime<Utc>,
        logged: &BTreeMap<String, ExerciseLogEntry>,
    ) -> crate::Result<Self> {
        Ok(Self {
            timestamp,
            data: serde_json::to_string(logged)?,
        })
    }

    /// Parse the logged payload; None if the payload is malformed
    pub fn logged_data(&self) -> Option<BTreeMap<String, ExerciseLogEntry>> {
        serde_json::from_str(&self.data).ok()
    }
}

/// Append-only record of completed sessions, grouped by program key
pub type HistoryLog = BTreeMap<String, Vec<SessionRecord>>;
