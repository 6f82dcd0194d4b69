//! Default weekly plan catalog.
//!
//! This module provides the built-in training schedule: one plan per
//! training day, each with its ordered exercises and default targets.

use crate::types::*;
use chrono::{Datelike, Local, NaiveDate};
use once_cell::sync::Lazy;
use std::collections::HashSet;

/// The complete weekly schedule, in declaration order
#[derive(Clone, Debug)]
pub struct Catalog {
    pub plans: Vec<DayPlan>,
}

/// Cached default catalog - built once and reused across all operations
static DEFAULT_CATALOG: Lazy<Catalog> = Lazy::new(build_default_catalog);

/// Get a reference to the cached default catalog
pub fn get_default_catalog() -> &'static Catalog {
    &DEFAULT_CATALOG
}

/// All plans of the default catalog, in declaration order (not weekday order)
pub fn list_plans() -> &'static [DayPlan] {
    &DEFAULT_CATALOG.plans
}

/// The plan scheduled on a weekday (0 = Sunday), or None on rest days
pub fn plan_for_weekday(weekday: u8) -> Option<&'static DayPlan> {
    DEFAULT_CATALOG.plan_for_weekday(weekday)
}

/// Look up a plan of the default catalog by id
pub fn plan_by_id(id: PlanId) -> Option<&'static DayPlan> {
    DEFAULT_CATALOG.plan_by_id(id)
}

/// The plan scheduled for a calendar date
pub fn plan_for_date(date: NaiveDate) -> Option<&'static DayPlan> {
    plan_for_weekday(weekday_number(date))
}

/// The plan scheduled for the current local date
pub fn today_plan() -> Option<&'static DayPlan> {
    plan_for_date(Local::now().date_naive())
}

/// Weekday number of a date, 0 = Sunday .. 6 = Saturday
pub fn weekday_number(date: NaiveDate) -> u8 {
    date.weekday().num_days_from_sunday() as u8
}

/// Builds the default catalog
///
/// **Note**: For production use, prefer `get_default_catalog()` which returns a
/// cached reference. This function is retained for testing and custom catalogs.
pub fn build_default_catalog() -> Catalog {
    let plans = vec![
        DayPlan {
            id: PlanId::UpperStrength,
            name: "Upper Strength".into(),
            day: 1,
            exercises: vec![
                exercise("bench-press", "Bench Press", MuscleGroup::Chest, 4, "5"),
                exercise("pull-ups", "Pull-Ups", MuscleGroup::Back, 4, "6"),
                exercise("overhead-press", "Overhead Press", MuscleGroup::Shoulders, 3, "6"),
                exercise("barbell-rows", "Barbell Rows", MuscleGroup::Back, 3, "8"),
                exercise("plank", "Plank", MuscleGroup::Core, 3, "45s"),
            ],
        },
        DayPlan {
            id: PlanId::LowerHypertrophy,
            name: "Lower Hypertrophy".into(),
            day: 2,
            exercises: vec![
                exercise(
                    "bulgarian-split-squats",
                    "Bulgarian Split Squats",
                    MuscleGroup::Legs,
                    3,
                    "10/leg",
                ),
                exercise("romanian-deadlift", "Romanian Deadlift", MuscleGroup::Legs, 3, "10"),
                exercise("leg-press", "Leg Press", MuscleGroup::Legs, 3, "12"),
                exercise("calf-raises", "Calf Raises", MuscleGroup::Legs, 3, "15"),
                exercise("incline-walk", "Incline Walk", MuscleGroup::Cardio, 1, "20min"),
            ],
        },
        DayPlan {
            id: PlanId::UpperHypertrophy,
            name: "Upper Hypertrophy".into(),
            day: 4,
            exercises: vec![
                exercise("incline-db-press", "Incline DB Press", MuscleGroup::Chest, 3, "10"),
                exercise("lat-pulldown", "Lat Pulldown", MuscleGroup::Back, 3, "10"),
                exercise("lateral-raises", "Lateral Raises", MuscleGroup::Shoulders, 3, "12"),
                exercise("seated-rows", "Seated Rows", MuscleGroup::Back, 3, "10"),
                exercise(
                    "curls-triceps",
                    "Curls + Triceps Superset",
                    MuscleGroup::Arms,
                    3,
                    "12",
                ),
            ],
        },
        DayPlan {
            id: PlanId::LowerStrength,
            name: "Lower Strength".into(),
            day: 5,
            exercises: vec![
                exercise("back-squats", "Back Squats", MuscleGroup::Legs, 4, "5"),
                exercise("romanian-deadlift-2", "Romanian Deadlift", MuscleGroup::Legs, 3, "6"),
                exercise("walking-lunges", "Walking Lunges", MuscleGroup::Legs, 3, "10/leg"),
                exercise(
                    "hanging-knee-raises",
                    "Hanging Knee Raises",
                    MuscleGroup::Core,
                    3,
                    "12",
                ),
            ],
        },
    ];

    Catalog { plans }
}

fn exercise(id: &str, name: &str, muscle_group: MuscleGroup, sets: u32, reps: &str) -> Exercise {
    Exercise {
        id: id.into(),
        name: name.into(),
        muscle_group,
        default_sets: sets,
        default_reps: reps.into(),
    }
}

impl Catalog {
    pub fn plan_for_weekday(&self, weekday: u8) -> Option<&DayPlan> {
        self.plans.iter().find(|p| p.day == weekday)
    }

    pub fn plan_by_id(&self, id: PlanId) -> Option<&DayPlan> {
        self.plans.iter().find(|p| p.id == id)
    }

    /// Validate the catalog for consistency and completeness
    ///
    /// Returns a list of validation errors, or empty Vec if valid.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        let mut seen_plans = HashSet::new();
        let mut seen_days = HashSet::new();

        for plan in &self.plans {
            if !seen_plans.insert(plan.id) {
                errors.push(format!("Plan '{}' is declared more than once", plan.id));
            }
            if plan.day > 6 {
                errors.push(format!("Plan '{}' has invalid weekday {}", plan.id, plan.day));
            } else if !seen_days.insert(plan.day) {
                errors.push(format!(
                    "Plan '{}' shares weekday {} with another plan",
                    plan.id, plan.day
                ));
            }
            if plan.name.is_empty() {
                errors.push(format!("Plan '{}' has empty name", plan.id));
            }
            if plan.exercises.is_empty() {
                errors.push(format!("Plan '{}' has no exercises", plan.id));
            }

            let mut seen_exercises = HashSet::new();
            for exercise in &plan.exercises {
                if exercise.id.is_empty() {
                    errors.push(format!("Plan '{}' has an exercise with empty ID", plan.id));
                }
                if !seen_exercises.insert(exercise.id.as_str()) {
                    errors.push(format!(
                        "Plan '{}': exercise '{}' appears more than once",
                        plan.id, exercise.id
                    ));
                }
                if exercise.name.is_empty() {
                    errors.push(format!(
                        "Plan '{}': exercise '{}' has empty name",
                        plan.id, exercise.id
                    ));
                }
                if exercise.default_sets == 0 {
                    errors.push(format!(
                        "Plan '{}': exercise '{}' has zero default sets",
                        plan.id, exercise.id
                    ));
                }
            }
        }

        errors
    }
}
