//! Typed access to a user's persisted documents.
//!
//! Wraps the document store with the four collections the core uses:
//! history, last-used exercise metrics, preferences and injuries. Missing
//! documents load as empty defaults; documents that exist but fail to
//! decode are logged and treated the same way.

use crate::store::{self, DocumentStore};
use crate::types::*;
use crate::{Result, SessionOutcome};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Shape of the `injuries` collection document
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct InjuryDocument {
    #[serde(default)]
    pub types: Vec<BodyPart>,
}

/// A user's documents, keyed by their stable user id
pub struct UserProfile<'a, S: DocumentStore + ?Sized> {
    store: &'a S,
    user_id: String,
}

impl<'a, S: DocumentStore + ?Sized> UserProfile<'a, S> {
    pub fn new(store: &'a S, user_id: impl Into<String>) -> Self {
        Self {
            store,
            user_id: user_id.into(),
        }
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    fn load_or_default<T: DeserializeOwned + Default>(&self, collection: &str) -> Result<T> {
        match self.store.get(collection, &self.user_id)? {
            None => Ok(T::default()),
            Some(value) => match serde_json::from_value(value) {
                Ok(decoded) => Ok(decoded),
                Err(e) => {
                    tracing::warn!(
                        "Document {}/{} did not decode: {}. Using empty default.",
                        collection,
                        self.user_id,
                        e
                    );
                    Ok(T::default())
                }
            },
        }
    }

    fn save<T: Serialize>(&self, collection: &str, value: &T) -> Result<()> {
        let document = serde_json::to_value(value)?;
        self.store.put(collection, &self.user_id, &document)
    }

    // ------------------------------------------------------------------
    // History
    // ------------------------------------------------------------------

    pub fn load_history(&self) -> Result<HistoryLog> {
        self.load_or_default(store::HISTORY)
    }

    /// Append a completed session to history and overwrite the last-used map
    ///
    /// History is append-only: existing records are never edited or removed,
    /// only a new record is pushed onto the program's list. The whole
    /// document is written back, so concurrent writers resolve as
    /// last-write-wins at document granularity.
    pub fn record_session(&self, outcome: &SessionOutcome) -> Result<HistoryLog> {
        let mut history = self.load_history()?;
        history
            .entry(outcome.program_key.clone())
            .or_default()
            .push(outcome.record.clone());
        self.save(store::HISTORY, &history)?;
        self.save_last_used(&outcome.last_used)?;
        tracing::info!(
            "Recorded session for '{}' ({} total sessions)",
            outcome.program_key,
            history.values().map(Vec::len).sum::<usize>()
        );
        Ok(history)
    }

    // ------------------------------------------------------------------
    // Last-used exercise metrics
    // ------------------------------------------------------------------

    pub fn load_last_used(&self) -> Result<LastUsedMap> {
        self.load_or_default(store::EXERCISE_DATA)
    }

    pub fn save_last_used(&self, last_used: &LastUsedMap) -> Result<()> {
        self.save(store::EXERCISE_DATA, last_used)
    }

    // ------------------------------------------------------------------
    // Preferences
    // ------------------------------------------------------------------

    /// Load preferences; None means the user hasn't completed onboarding
    pub fn load_preferences(&self) -> Result<Option<Preferences>> {
        match self.store.get(store::PREFERENCES, &self.user_id)? {
            None => Ok(None),
            Some(value) => match serde_json::from_value(value) {
                Ok(prefs) => Ok(Some(prefs)),
                Err(e) => {
                    tracing::warn!("Preferences did not decode: {}. Treating as unset.", e);
                    Ok(None)
                }
            },
        }
    }

    pub fn save_preferences(&self, prefs: &Preferences) -> Result<()> {
        self.save(store::PREFERENCES, prefs)
    }

    pub fn clear_preferences(&self) -> Result<()> {
        self.store.delete(store::PREFERENCES, &self.user_id)
    }

    // ------------------------------------------------------------------
    // Injuries
    // ------------------------------------------------------------------

    pub fn load_injuries(&self) -> Result<Vec<BodyPart>> {
        let doc: InjuryDocument = self.load_or_default(store::INJURIES)?;
        Ok(doc.types)
    }

    pub fn save_injuries(&self, injuries: &[BodyPart]) -> Result<()> {
        self.save(
            store::INJURIES,
            &InjuryDocument {
                types: injuries.to_vec(),
            },
        )
    }

    /// Assemble the generator context from stored preferences and injuries
    ///
    /// Returns None until preferences exist: the adaptive generator needs an
    /// explicit goal/equipment choice, there is no silent default profile.
    pub fn load_context(&self) -> Result<Option<UserContext>> {
        let Some(prefs) = self.load_preferences()? else {
            return Ok(None);
        };
        let injuries = self.load_injuries()?;
        Ok(Some(UserContext::new(prefs, injuries)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{LogField, SessionTracker};
    use crate::store::MemoryStore;
    use crate::types::{PlannedExercise, Section, WorkoutPlan};
    use chrono::Utc;

    fn plan() -> WorkoutPlan {
        WorkoutPlan {
            title: "Test".into(),
            sections: vec![Section {
                name: "Main Session".into(),
                exercises: vec![PlannedExercise::unprescribed("Push Ups")],
            }],
        }
    }

    #[test]
    fn test_missing_documents_load_as_defaults() {
        let store = MemoryStore::new();
        let profile = UserProfile::new(&store, "u1");

        assert!(profile.load_history().unwrap().is_empty());
        assert!(profile.load_last_used().unwrap().is_empty());
        assert!(profile.load_preferences().unwrap().is_none());
        assert!(profile.load_injuries().unwrap().is_empty());
        assert!(profile.load_context().unwrap().is_none());
    }

    #[test]
    fn test_preferences_roundtrip_and_clear() {
        let store = MemoryStore::new();
        let profile = UserProfile::new(&store, "u1");

        let prefs = Preferences {
            goal: Goal::Strength,
            equipment: Equipment::Dumbbells,
            session_length: SessionLength::Min45,
        };
        profile.save_preferences(&prefs).unwrap();

        let loaded = profile.load_preferences().unwrap().unwrap();
        assert_eq!(loaded.goal, Goal::Strength);
        assert_eq!(loaded.equipment, Equipment::Dumbbells);
        assert_eq!(loaded.session_length, SessionLength::Min45);

        profile.clear_preferences().unwrap();
        assert!(profile.load_preferences().unwrap().is_none());
    }

    #[test]
    fn test_injuries_document_shape() {
        let store = MemoryStore::new();
        let profile = UserProfile::new(&store, "u1");
        profile
            .save_injuries(&[BodyPart::Shoulders, BodyPart::Legs])
            .unwrap();

        // Stored in the historical { "types": [...] } shape
        let raw = store.get(store::INJURIES, "u1").unwrap().unwrap();
        assert_eq!(raw["types"][0], "shoulders");

        let loaded = profile.load_injuries().unwrap();
        assert_eq!(loaded, vec![BodyPart::Shoulders, BodyPart::Legs]);
    }

    #[test]
    fn test_record_session_appends_and_updates_last_used() {
        let store = MemoryStore::new();
        let profile = UserProfile::new(&store, "u1");

        for expected_count in 1..=2 {
            let mut tracker = SessionTracker::new("AI", plan(), &profile.load_last_used().unwrap());
            tracker.record_field("Push Ups", LogField::Weight, "15");
            tracker.toggle_complete(0, 0);
            let outcome = tracker
                .complete_session(Utc::now(), &profile.load_last_used().unwrap())
                .unwrap();

            let history = profile.record_session(&outcome).unwrap();
            assert_eq!(history["AI"].len(), expected_count);
        }

        let last_used = profile.load_last_used().unwrap();
        assert_eq!(last_used["Push Ups"].weight, 15.0);
    }

    #[test]
    fn test_undecodable_document_treated_as_default() {
        let store = MemoryStore::new();
        store
            .put(store::HISTORY, "u1", &serde_json::json!([1, 2, 3]))
            .unwrap();
        let profile = UserProfile::new(&store, "u1");
        assert!(profile.load_history().unwrap().is_empty());
    }
}
