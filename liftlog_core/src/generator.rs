//! Workout generation from the catalog and user context.
//!
//! Two generators live here:
//! - the adaptive generator, which filters the catalog by declared injuries,
//!   available equipment and training goal;
//! - the CrossFit generator, which draws a random movement set for one of
//!   the AMRAP/RFT/EMOM styles.
//!
//! Both are pure: the only nondeterminism is the caller-supplied Rng.

use crate::catalog::Catalog;
use crate::types::*;
use rand::seq::SliceRandom;
use rand::Rng;

const ADAPTIVE_TITLE: &str = "AI Generated Workout";
const COOL_DOWN_STRETCH: &str = "Quad Stretch";
const CROSSFIT_WARMUP: &str = "Jumping Jacks";
const REHAB_CAP: usize = 2;

/// CrossFit workout style
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WodStyle {
    Amrap,
    Rft,
    Emom,
}

impl WodStyle {
    pub fn section_name(&self) -> &'static str {
        match self {
            WodStyle::Amrap => "AMRAP",
            WodStyle::Rft => "RFT",
            WodStyle::Emom => "EMOM",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            WodStyle::Amrap => "AMRAP 20 - As Many Rounds As Possible",
            WodStyle::Rft => "5 Rounds For Time",
            WodStyle::Emom => "EMOM 16 - Every Minute On the Minute",
        }
    }
}

fn equipment_allows(context: Equipment, class: EquipmentClass) -> bool {
    match context {
        Equipment::FullGym => true,
        Equipment::Dumbbells => class != EquipmentClass::FullGym,
        Equipment::Bodyweight => class == EquipmentClass::Bodyweight,
    }
}

fn hits_injury(def: &ExerciseDefinition, injuries: &[BodyPart]) -> bool {
    def.body_parts.iter().any(|bp| injuries.contains(bp))
}

fn seeded_weight(last_used: &LastUsedMap, name: &str) -> f64 {
    last_used.get(name).map(|e| e.weight).unwrap_or(0.0)
}

fn planned(
    def: &ExerciseDefinition,
    sets: u32,
    reps: u32,
    rest_seconds: u32,
    target_weight: f64,
) -> PlannedExercise {
    PlannedExercise {
        name: def.name.clone(),
        sets,
        reps,
        rest_seconds,
        target_weight,
        duration_seconds: def.duration_seconds,
    }
}

/// Push a section onto the plan unless it has no exercises.
///
/// A plan must never contain an empty section: when filtering leaves
/// nothing, the section is omitted entirely.
fn push_section(sections: &mut Vec<Section>, name: &str, exercises: Vec<PlannedExercise>) {
    if exercises.is_empty() {
        tracing::debug!("Omitting empty section '{}'", name);
        return;
    }
    sections.push(Section {
        name: name.to_string(),
        exercises,
    });
}

/// Rehab candidates for the declared injuries
///
/// First matches per injury in injury-list order, capped at two, never the
/// same exercise twice.
fn rehab_candidates<'a>(catalog: &'a Catalog, injuries: &[BodyPart]) -> Vec<&'a ExerciseDefinition> {
    let mut picked: Vec<&ExerciseDefinition> = Vec::new();
    for injury in injuries {
        for def in catalog.in_category(ExerciseCategory::Rehab) {
            if picked.len() >= REHAB_CAP {
                return picked;
            }
            if def.body_parts.contains(injury) && !picked.iter().any(|p| p.name == def.name) {
                picked.push(def);
            }
        }
    }
    picked
}

/// Generate an adaptive workout from the user's context
///
/// Filters the catalog by injuries and equipment, selects a main set by
/// goal, and assembles sections in fixed order: Warm-up, Main Session,
/// Bonus Round (45-minute sessions only), Rehab, Cool-down. Sections left
/// empty by filtering are omitted. Weights are seeded from the last-used
/// metrics; everything else comes from the rule table below.
pub fn generate_adaptive_workout(
    ctx: &UserContext,
    last_used: &LastUsedMap,
    catalog: &Catalog,
) -> WorkoutPlan {
    let eligible: Vec<&ExerciseDefinition> = catalog
        .exercises
        .iter()
        .filter(|def| {
            def.category != ExerciseCategory::Rehab
                && !hits_injury(def, &ctx.injuries)
                && equipment_allows(ctx.equipment, def.equipment)
        })
        .collect();

    tracing::debug!(
        "{} of {} catalog exercises eligible for goal {:?}",
        eligible.len(),
        catalog.exercises.len(),
        ctx.goal
    );

    // Main set selection by goal. Strength forces 4x6; everything else
    // takes the 3x12 default.
    let main_set: Vec<PlannedExercise> = match &ctx.goal {
        Goal::FatLoss | Goal::Endurance => eligible
            .iter()
            .filter(|d| d.category == ExerciseCategory::Cardio || d.duration_seconds.is_some())
            .map(|d| planned(d, 3, 12, 60, seeded_weight(last_used, &d.name)))
            .collect(),
        Goal::MuscleGain => eligible
            .iter()
            .filter(|d| d.category == ExerciseCategory::Strength)
            .take(5)
            .map(|d| planned(d, 3, 12, 60, seeded_weight(last_used, &d.name)))
            .collect(),
        Goal::Strength => eligible
            .iter()
            .filter(|d| d.category == ExerciseCategory::Strength)
            .map(|d| planned(d, 4, 6, 60, seeded_weight(last_used, &d.name)))
            .collect(),
        Goal::Other(_) => eligible
            .iter()
            .take(5)
            .map(|d| planned(d, 3, 12, 60, seeded_weight(last_used, &d.name)))
            .collect(),
    };

    let mut sections = Vec::new();

    // Warm-up: the first warmup-category exercise still eligible
    let warmup: Vec<PlannedExercise> = eligible
        .iter()
        .filter(|d| d.category == ExerciseCategory::Warmup)
        .take(1)
        .map(|d| {
            let mut ex = planned(d, 3, 15, 30, 0.0);
            ex.duration_seconds = Some(30);
            ex
        })
        .collect();
    push_section(&mut sections, "Warm-up", warmup);

    // Bonus round for long sessions: eligible leftovers not in the main set
    let bonus: Vec<PlannedExercise> = if ctx.session_length == SessionLength::Min45 {
        eligible
            .iter()
            .filter(|d| !main_set.iter().any(|m| m.name == d.name))
            .take(3)
            .map(|d| planned(d, 2, 15, 30, seeded_weight(last_used, &d.name)))
            .collect()
    } else {
        Vec::new()
    };

    push_section(&mut sections, "Main Session", main_set);
    push_section(&mut sections, "Bonus Round", bonus);

    let rehab: Vec<PlannedExercise> = rehab_candidates(catalog, &ctx.injuries)
        .iter()
        .map(|d| planned(d, 2, 10, 30, 0.0))
        .collect();
    push_section(&mut sections, "Rehab", rehab);

    push_section(
        &mut sections,
        "Cool-down",
        vec![PlannedExercise {
            name: COOL_DOWN_STRETCH.to_string(),
            sets: 2,
            reps: 10,
            rest_seconds: 30,
            target_weight: 0.0,
            duration_seconds: None,
        }],
    );

    WorkoutPlan {
        title: ADAPTIVE_TITLE.to_string(),
        sections,
    }
}

/// Generate a CrossFit-style workout
///
/// Picks one of the three styles uniformly, shuffles the injury-safe pool
/// and takes four movements. The randomness source is injected so callers
/// (and tests) control determinism.
pub fn generate_crossfit_workout<R: Rng>(
    injuries: &[BodyPart],
    catalog: &Catalog,
    rng: &mut R,
) -> WorkoutPlan {
    let style = *[WodStyle::Amrap, WodStyle::Rft, WodStyle::Emom]
        .choose(rng)
        .unwrap_or(&WodStyle::Amrap);

    let mut safe: Vec<&ExerciseDefinition> = catalog
        .exercises
        .iter()
        .filter(|def| def.category != ExerciseCategory::Rehab && !hits_injury(def, injuries))
        .collect();
    safe.shuffle(rng);

    tracing::debug!("{} safe movements for {:?} WOD", safe.len(), style);

    let movements: Vec<PlannedExercise> = safe
        .iter()
        .take(4)
        .map(|d| planned(d, 3, 12, 45, 0.0))
        .collect();

    let mut sections = Vec::new();

    push_section(
        &mut sections,
        "Warm-up",
        vec![PlannedExercise {
            name: CROSSFIT_WARMUP.to_string(),
            sets: 3,
            reps: 15,
            rest_seconds: 30,
            target_weight: 0.0,
            duration_seconds: None,
        }],
    );

    push_section(&mut sections, style.section_name(), movements);

    let rehab: Vec<PlannedExercise> = rehab_candidates(catalog, injuries)
        .iter()
        .map(|d| planned(d, 2, 10, 30, 0.0))
        .collect();
    push_section(&mut sections, "Rehab", rehab);

    push_section(
        &mut sections,
        "Cool-down",
        vec![PlannedExercise {
            name: COOL_DOWN_STRETCH.to_string(),
            sets: 2,
            reps: 10,
            rest_seconds: 30,
            target_weight: 0.0,
            duration_seconds: None,
        }],
    );

    WorkoutPlan {
        title: style.title().to_string(),
        sections,
    }
}
