#![forbid(unsafe_code)]

//! Core domain model and business logic for the LiftLog workout tracker.
//!
//! This crate provides:
//! - Domain types (exercises, plans, sessions, preferences)
//! - Exercise catalog and fixed program templates
//! - Workout generation (program, adaptive, CrossFit-style)
//! - Session state tracking
//! - History metrics (streak, personal bests, weekly activity)
//! - Persistence (document store, user profile, CSV export)

pub mod types;
pub mod error;
pub mod catalog;
pub mod programs;
pub mod generator;
pub mod session;
pub mod metrics;
pub mod store;
pub mod profile;
pub mod identity;
pub mod config;
pub mod logging;
pub mod export;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use catalog::{build_default_catalog, get_default_catalog, Catalog};
pub use programs::{generate_program_workout, program_keys};
pub use generator::{generate_adaptive_workout, generate_crossfit_workout, WodStyle};
pub use session::{LogField, SessionOutcome, SessionTracker};
pub use metrics::{personal_bests, streak, weekly_activity, WeekdayCount};
pub use store::{DocumentStore, FsDocumentStore, MemoryStore};
pub use profile::{InjuryDocument, UserProfile};
pub use identity::{IdentityProvider, StaticIdentity};
pub use config::Config;
pub use export::export_history_csv;
