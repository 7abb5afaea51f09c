//! Hand-authored static workout programs.
//!
//! Each program is a fixed, ordered list of section templates
//! (Movement Prep → Dynamic Warm-Up → Power → Strength → Resistance →
//! ESD → Cool Down). The ordering is a contract, not derived, and the
//! program table here is the only place this data lives.

use crate::types::{PlannedExercise, Section, WorkoutPlan};
use crate::{Error, Result};
use once_cell::sync::Lazy;

struct ProgramTemplate {
    key: &'static str,
    title: &'static str,
    sections: Vec<(&'static str, Vec<&'static str>)>,
}

static PROGRAMS: Lazy<Vec<ProgramTemplate>> = Lazy::new(|| {
    vec![
        ProgramTemplate {
            key: "Day 1",
            title: "Resistance Day A",
            sections: vec![
                (
                    "Movement Prep",
                    vec![
                        "Leg Extension Hip Bridge March",
                        "Stability Ball Shoulder T's",
                        "Stability Ball Shoulder W's",
                        "Stability Ball Shoulder L's",
                        "Stability Ball Shoulder Y's",
                    ],
                ),
                (
                    "Dynamic Warm-Up",
                    vec!["Stationary Inchworm", "Alternating Quads Stretch"],
                ),
                (
                    "Power",
                    vec!["Kettlebell Swing", "Linear Rapid Response Jumps"],
                ),
                (
                    "Strength",
                    vec![
                        "Stability Ball Trunk Rollout",
                        "Barbell Deadlift",
                        "Barbell Bench Press",
                        "Kettlebell Goblet Bulgarian Split Squat",
                    ],
                ),
                (
                    "Resistance",
                    vec!["1 Arm Seated Cable Row", "Lying Dumbbell Triceps Extension"],
                ),
                ("ESD (Energy System Development)", vec!["Rower"]),
                (
                    "Cool Down",
                    vec!["Cobra Pose", "Passive Lying Hip Abductors Stretch"],
                ),
            ],
        },
        ProgramTemplate {
            key: "Day 2",
            title: "Resistance Day B",
            sections: vec![
                (
                    "Movement Prep",
                    vec![
                        "Back Lying Mini Band Hip Internal",
                        "Stability Ball Shoulder L's",
                        "Stability Ball Shoulder Y's",
                    ],
                ),
                (
                    "Dynamic Warm-Up",
                    vec!["Alternative Reverse Lunge", "Toe Touch to Deep Squat"],
                ),
                (
                    "Power",
                    vec![
                        "Perpendicular Med Ball Hip Toss",
                        "Lateral Rapid Response Jumps",
                    ],
                ),
                (
                    "Strength",
                    vec![
                        "Barbell Back Squat",
                        "1 Arm Kettlebell Farmer's Carry",
                        "Neutral Grip Pull Up",
                        "1 Leg Dumbbell Hip Hinge",
                    ],
                ),
                (
                    "Resistance",
                    vec!["Half Kneel 1-Arm Landmine Press", "Dumbbell Biceps Curl"],
                ),
                ("ESD (Energy System Development)", vec!["Fan Bike"]),
                (
                    "Cool Down",
                    vec!["Passive 90/90 Glutes Stretch", "Active Lats Stretch"],
                ),
            ],
        },
        ProgramTemplate {
            key: "Day 3",
            title: "Resistance Day C",
            sections: vec![
                (
                    "Movement Prep",
                    vec![
                        "Side Lying Mini Band Hip External",
                        "Beast Plank",
                        "Tall Kneel Kettlebell Halo",
                    ],
                ),
                (
                    "Dynamic Warm-Up",
                    vec!["Alternative Forward Lunge", "Alternative Lateral Lunge"],
                ),
                ("Power", vec!["Med Ball Slam", "Pogo Hop"]),
                (
                    "Strength",
                    vec![
                        "Barbell Hip Hinge",
                        "Lateral Beast Crawl",
                        "Dumbbell Incline Bench Press",
                        "Kettlebell Front Rack Lateral Squat",
                    ],
                ),
                (
                    "Resistance",
                    vec!["Alternating Dumbbell Bent Over Row", "Cable Pallof Press"],
                ),
                ("ESD (Energy System Development)", vec!["Ski Erg"]),
                (
                    "Cool Down",
                    vec![
                        "Passive Half Kneel Quads Stretch",
                        "Passive Triceps/Lats Stretch",
                    ],
                ),
            ],
        },
        ProgramTemplate {
            key: "Day 4",
            title: "Alactic Power Intervals",
            sections: vec![
                (
                    "Movement Prep",
                    vec![
                        "Foam Roll Calves",
                        "Foam Roll Hamstrings",
                        "Foam Roll Quadriceps",
                        "Foam Roll Hip Flexors",
                        "Foam Roll Lats",
                    ],
                ),
                (
                    "Dynamic Warm-Up",
                    vec![
                        "Mini Band Hip Flexion",
                        "Mini Band Hip Extension",
                        "Treadmill Butt Kick",
                        "Treadmill Lateral Shuffle",
                        "Treadmill High Knee Run",
                    ],
                ),
                (
                    "ESD (Energy System Development)",
                    vec!["Curve Treadmill", "Battle Rope Double Arm Slam"],
                ),
                (
                    "Cool Down",
                    vec![
                        "Passive Half Kneel Quads Stretch",
                        "Passive Straight Leg Hamstrings Stretch",
                        "Child's Pose",
                    ],
                ),
            ],
        },
    ]
});

/// List the available program keys, in declaration order
pub fn program_keys() -> Vec<&'static str> {
    PROGRAMS.iter().map(|p| p.key).collect()
}

/// Build the workout plan for a hand-authored program
///
/// Returns the program's fixed section list unmodified, with unprescribed
/// per-exercise defaults (sets/reps/weight all 0) until the user logs
/// values.
pub fn generate_program_workout(program_key: &str) -> Result<WorkoutPlan> {
    let template = PROGRAMS
        .iter()
        .find(|p| p.key == program_key)
        .ok_or_else(|| Error::UnknownProgram(program_key.to_string()))?;

    tracing::debug!("Building static program plan for '{}'", program_key);

    let sections = template
        .sections
        .iter()
        .map(|(name, names)| Section {
            name: (*name).to_string(),
            exercises: names
                .iter()
                .map(|n| PlannedExercise::unprescribed(*n))
                .collect(),
        })
        .collect();

    Ok(WorkoutPlan {
        title: template.title.to_string(),
        sections,
    })
}
