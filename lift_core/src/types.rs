//! Core domain types for liftlog.
//!
//! This module defines the fundamental types used throughout the system:
//! - Plans and their exercises (static catalog data)
//! - Set, exercise and session logs (recorded performance)
//! - Body measurements

use crate::{Error, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Weekday display names, indexed by weekday number (0 = Sunday)
pub const WEEKDAY_NAMES: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

/// Parse a `YYYY-MM-DD` calendar date
pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").map_err(|_| Error::InvalidDate(s.into()))
}

// ============================================================================
// Plan Types
// ============================================================================

/// Identifier of a day plan in the weekly schedule
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum PlanId {
    UpperStrength,
    LowerHypertrophy,
    UpperHypertrophy,
    LowerStrength,
}

impl PlanId {
    pub const ALL: [PlanId; 4] = [
        PlanId::UpperStrength,
        PlanId::LowerHypertrophy,
        PlanId::UpperHypertrophy,
        PlanId::LowerStrength,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PlanId::UpperStrength => "upper-strength",
            PlanId::LowerHypertrophy => "lower-hypertrophy",
            PlanId::UpperHypertrophy => "upper-hypertrophy",
            PlanId::LowerStrength => "lower-strength",
        }
    }
}

impl fmt::Display for PlanId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PlanId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_lowercase();
        PlanId::ALL
            .into_iter()
            .find(|id| id.as_str() == wanted)
            .ok_or_else(|| Error::UnknownPlan(s.into()))
    }
}

/// Muscle group an exercise primarily trains
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum MuscleGroup {
    Chest,
    Back,
    Shoulders,
    Arms,
    Legs,
    Core,
    Cardio,
}

/// An exercise in a day plan with its default targets
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Exercise {
    pub id: String,
    pub name: String,
    pub muscle_group: MuscleGroup,
    pub default_sets: u32,
    /// Rep target as written in the plan; may be `"45s"`, `"20min"` or `"10/leg"`
    pub default_reps: String,
}

/// A named plan scheduled on one weekday
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DayPlan {
    pub id: PlanId,
    pub name: String,
    /// Weekday number, 0 = Sunday .. 6 = Saturday
    pub day: u8,
    pub exercises: Vec<Exercise>,
}

impl DayPlan {
    /// Look up an exercise of this plan by id
    pub fn exercise(&self, exercise_id: &str) -> Option<&Exercise> {
        self.exercises.iter().find(|e| e.id == exercise_id)
    }

    /// Total number of sets prescribed by the plan's defaults
    pub fn total_sets(&self) -> u32 {
        self.exercises.iter().map(|e| e.default_sets).sum()
    }

    /// Display name of the weekday this plan is scheduled on
    pub fn weekday_name(&self) -> &'static str {
        WEEKDAY_NAMES
            .get(usize::from(self.day))
            .copied()
            .unwrap_or("Unscheduled")
    }
}

// ============================================================================
// Log Types (persisted)
// ============================================================================

/// One performed set
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct SetLog {
    #[serde(default)]
    pub reps: u32,
    #[serde(default)]
    pub weight: f64,
    #[serde(default)]
    pub completed: bool,
}

impl SetLog {
    pub fn volume(&self) -> f64 {
        self.weight * f64::from(self.reps)
    }
}

/// The sets logged for one exercise, in set order
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseLog {
    pub exercise_id: String,
    pub sets: Vec<SetLog>,
}

/// One recorded workout: a plan performed on a calendar date
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct WorkoutSession {
    /// `{planId}-{YYYY-MM-DD}`
    pub id: String,
    pub date: NaiveDate,
    #[serde(rename = "dayType")]
    pub plan_id: PlanId,
    pub exercises: Vec<ExerciseLog>,
    pub completed: bool,
}

impl WorkoutSession {
    /// Deterministic session id for a plan on a date
    pub fn id_for(plan_id: PlanId, date: NaiveDate) -> String {
        format!("{}-{}", plan_id, date.format("%Y-%m-%d"))
    }

    /// Find the log for an exercise in this session
    pub fn exercise_log(&self, exercise_id: &str) -> Option<&ExerciseLog> {
        self.exercises.iter().find(|e| e.exercise_id == exercise_id)
    }
}

/// A dated body measurement; at most one per date
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct BodyStats {
    pub date: NaiveDate,
    pub weight: f64,
    /// Waist measurement, 0 when not recorded
    #[serde(default)]
    pub waist: f64,
}

/// Partial update applied to a single set
#[derive(Clone, Debug, Default)]
pub struct SetInput {
    pub weight: Option<f64>,
    pub reps: Option<u32>,
    pub completed: Option<bool>,
}
