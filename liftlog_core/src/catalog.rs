//! Default exercise catalog.
//!
//! The catalog is the single source of truth for exercise metadata: every
//! generator rule filters against it. Iteration order is the declaration
//! order below, which selection rules like "first 5 strength exercises"
//! depend on.

use crate::types::*;
use once_cell::sync::Lazy;

/// Cached default catalog - built once and reused across all operations
static DEFAULT_CATALOG: Lazy<Catalog> = Lazy::new(build_default_catalog_internal);

/// The complete ordered catalog of exercise definitions
#[derive(Clone, Debug)]
pub struct Catalog {
    pub exercises: Vec<ExerciseDefinition>,
}

/// Get a reference to the cached default catalog
pub fn get_default_catalog() -> &'static Catalog {
    &DEFAULT_CATALOG
}

/// Builds the default catalog with the built-in exercise definitions
///
/// **Note**: For production use, prefer `get_default_catalog()` which returns
/// a cached reference. This function is retained for testing and custom
/// catalog creation.
pub fn build_default_catalog() -> Catalog {
    build_default_catalog_internal()
}

fn exercise(
    name: &str,
    body_parts: &[BodyPart],
    category: ExerciseCategory,
    equipment: EquipmentClass,
    duration_seconds: Option<u32>,
) -> ExerciseDefinition {
    ExerciseDefinition {
        name: name.to_string(),
        body_parts: body_parts.to_vec(),
        category,
        equipment,
        duration_seconds,
    }
}

fn build_default_catalog_internal() -> Catalog {
    use BodyPart::*;
    use EquipmentClass as Eq;
    use ExerciseCategory as Cat;

    let exercises = vec![
        // ====================================================================
        // Adaptive-mode pool
        // ====================================================================
        exercise("Jumping Jacks", &[Legs, Arms], Cat::Warmup, Eq::Bodyweight, Some(30)),
        exercise("Push Ups", &[Chest, Shoulders, Arms], Cat::Strength, Eq::Bodyweight, None),
        exercise("Dumbbell Squats", &[Legs], Cat::Strength, Eq::Dumbbell, None),
        exercise("Kettlebell Swing", &[Legs, Back], Cat::Strength, Eq::FullGym, None),
        exercise("Plank", &[Core], Cat::Core, Eq::Bodyweight, Some(30)),
        exercise("Mountain Climbers", &[Core, Legs], Cat::Cardio, Eq::Bodyweight, Some(30)),
        exercise("Bicep Curls", &[Arms], Cat::Strength, Eq::Dumbbell, None),
        exercise("Leg Press", &[Legs], Cat::Strength, Eq::FullGym, None),
        exercise("Treadmill Run", &[Legs], Cat::Cardio, Eq::FullGym, Some(300)),
        // ====================================================================
        // CrossFit pool
        // ====================================================================
        exercise("Burpees", &[Legs, Chest, Arms], Cat::Cardio, Eq::Bodyweight, None),
        exercise("Thrusters", &[Legs, Shoulders], Cat::Strength, Eq::FullGym, None),
        exercise("Wall Balls", &[Legs, Shoulders], Cat::Strength, Eq::FullGym, None),
        exercise("Box Jumps", &[Legs], Cat::Cardio, Eq::Bodyweight, None),
        exercise("Double Unders", &[Legs, Arms], Cat::Cardio, Eq::Bodyweight, None),
        exercise("Pull-Ups", &[Back, Arms, Shoulders], Cat::Strength, Eq::Bodyweight, None),
        exercise("Deadlifts", &[Back, Legs], Cat::Strength, Eq::FullGym, None),
        exercise("Rowing (calories)", &[Back, Arms, Legs], Cat::Cardio, Eq::FullGym, None),
        exercise("Handstand Push-Ups", &[Shoulders, Arms], Cat::Strength, Eq::Bodyweight, None),
        exercise("Overhead Squats", &[Legs, Shoulders], Cat::Strength, Eq::FullGym, None),
        exercise("Sit-Ups", &[Core], Cat::Core, Eq::Bodyweight, None),
        // ====================================================================
        // Rehab pool
        // ====================================================================
        exercise("Rotator Cuff Stretch", &[Shoulders], Cat::Rehab, Eq::Bodyweight, None),
        exercise("Pendulum Swing", &[Shoulders], Cat::Rehab, Eq::Bodyweight, None),
        exercise("Quad Stretch", &[Legs], Cat::Rehab, Eq::Bodyweight, None),
        exercise("Hamstring Stretch", &[Legs], Cat::Rehab, Eq::Bodyweight, None),
    ];

    Catalog { exercises }
}

impl Catalog {
    /// Look up an exercise by name
    pub fn lookup(&self, name: &str) -> Option<&ExerciseDefinition> {
        self.exercises.iter().find(|e| e.name == name)
    }

    /// Body parts an exercise loads
    ///
    /// Exercises absent from the catalog (user-added ad-hoc entries with no
    /// metadata) report an empty set, i.e. are assumed safe. This is an
    /// explicit policy, not an oversight.
    pub fn body_parts_of(&self, name: &str) -> &[BodyPart] {
        self.lookup(name).map(|e| e.body_parts.as_slice()).unwrap_or(&[])
    }

    /// Iterate exercises in a fixed category, preserving catalog order
    pub fn in_category(
        &self,
        category: ExerciseCategory,
    ) -> impl Iterator<Item = &ExerciseDefinition> {
        self.exercises.iter().filter(move |e| e.category == category)
    }

    /// Validate the catalog for consistency and completeness
    ///
    /// Returns a list of validation errors, or empty Vec if valid.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        let mut seen = std::collections::HashSet::new();

        for def in &self.exercises {
            if def.name.is_empty() {
                errors.push("Exercise has empty name".to_string());
            }
            if !seen.insert(def.name.as_str()) {
                errors.push(format!("Duplicate exercise name '{}'", def.name));
            }
            if def.category == ExerciseCategory::Rehab && def.body_parts.is_empty() {
                errors.push(format!(
                    "Rehab exercise '{}' names no body part and can never be selected",
                    def.name
                ));
            }
        }

        // Each category the generator draws from must be represented
        for (category, label) in [
            (ExerciseCategory::Warmup, "warmup"),
            (ExerciseCategory::Strength, "strength"),
            (ExerciseCategory::Cardio, "cardio"),
            (ExerciseCategory::Rehab, "rehab"),
        ] {
            if self.in_category(category).next().is_none() {
                errors.push(format!("Catalog has no {} exercises", label));
            }
        }

        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_loads() {
        let catalog = build_default_catalog();
        assert_eq!(catalog.exercises.len(), 24);
        // 9 adaptive-pool + 11 CrossFit-pool + 4 rehab
        assert_eq!(catalog.in_category(ExerciseCategory::Rehab).count(), 4);
    }

    #[test]
    fn test_default_catalog_validates() {
        let catalog = build_default_catalog();
        let errors = catalog.validate();
        assert!(
            errors.is_empty(),
            "Default catalog has validation errors: {:?}",
            errors
        );
    }

    #[test]
    fn test_lookup() {
        let catalog = build_default_catalog();
        let def = catalog.lookup("Push Ups").unwrap();
        assert_eq!(def.category, ExerciseCategory::Strength);
        assert_eq!(def.equipment, EquipmentClass::Bodyweight);
        assert!(def.body_parts.contains(&BodyPart::Chest));
    }

    #[test]
    fn test_unknown_exercise_assumed_safe() {
        let catalog = build_default_catalog();
        assert!(catalog.body_parts_of("My Custom Move").is_empty());
    }

    #[test]
    fn test_rehab_pool_covers_shoulders_and_legs() {
        let catalog = build_default_catalog();
        let rehab: Vec<_> = catalog.in_category(ExerciseCategory::Rehab).collect();
        assert!(rehab.iter().any(|e| e.body_parts.contains(&BodyPart::Shoulders)));
        assert!(rehab.iter().any(|e| e.body_parts.contains(&BodyPart::Legs)));
    }

    #[test]
    fn test_duplicate_name_fails_validation() {
        let mut catalog = build_default_catalog();
        let dup = catalog.exercises[0].clone();
        catalog.exercises.push(dup);
        assert!(!catalog.validate().is_empty());
    }
}
