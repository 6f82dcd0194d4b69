//! Session lifecycle: starting a session from a plan and recording sets.
//!
//! A session's sets are editable until it is finished; after that every
//! mutation is rejected with [`Error::SessionCompleted`].

use crate::{
    DayPlan, Error, ExerciseLog, Result, SetInput, SetLog, WorkoutSession,
};
use chrono::NaiveDate;

/// Leading integer of a rep target, `parseInt`-style
///
/// `"10/leg"` → 10, `"45s"` → 45, `"20min"` → 20, anything without leading
/// digits → 0.
pub fn leading_reps(target: &str) -> u32 {
    let digits: String = target
        .trim_start()
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().unwrap_or(0)
}

/// Clamp a measurement to a storable value (0 when negative or non-finite)
pub fn sanitize_weight(weight: f64) -> f64 {
    if weight.is_finite() && weight >= 0.0 {
        weight
    } else {
        0.0
    }
}

/// Coerce user-entered weight to a safe value (0 when not a non-negative number)
///
/// Decimal weights such as `"62.5"` are kept.
pub fn coerce_weight(input: &str) -> f64 {
    input.trim().parse::<f64>().map(sanitize_weight).unwrap_or(0.0)
}

/// Coerce user-entered reps to their leading integer (`"8.5"` → 8, `"-1"` → 0)
pub fn coerce_reps(input: &str) -> u32 {
    leading_reps(input)
}

impl WorkoutSession {
    /// Initialise an in-progress session for `plan` on `date`
    ///
    /// Each exercise gets `default_sets` sets pre-filled with the leading
    /// integer of its rep target, zero weight, not completed.
    pub fn start(plan: &DayPlan, date: NaiveDate) -> Self {
        let exercises = plan
            .exercises
            .iter()
            .map(|exercise| {
                let reps = leading_reps(&exercise.default_reps);
                ExerciseLog {
                    exercise_id: exercise.id.clone(),
                    sets: (0..exercise.default_sets)
                        .map(|_| SetLog {
                            reps,
                            weight: 0.0,
                            completed: false,
                        })
                        .collect(),
                }
            })
            .collect();

        tracing::debug!("Started session for {} on {}", plan.id, date);

        Self {
            id: Self::id_for(plan.id, date),
            date,
            plan_id: plan.id,
            exercises,
            completed: false,
        }
    }

    /// Apply a partial update to one set (0-indexed)
    pub fn record_set(
        &mut self,
        exercise_id: &str,
        set_index: usize,
        input: SetInput,
    ) -> Result<&SetLog> {
        let set = self.set_mut(exercise_id, set_index)?;
        if let Some(weight) = input.weight {
            set.weight = sanitize_weight(weight);
        }
        if let Some(reps) = input.reps {
            set.reps = reps;
        }
        if let Some(completed) = input.completed {
            set.completed = completed;
        }
        Ok(set)
    }

    /// Flip the completed flag of one set, returning the new value
    pub fn toggle_set(&mut self, exercise_id: &str, set_index: usize) -> Result<bool> {
        let set = self.set_mut(exercise_id, set_index)?;
        set.completed = !set.completed;
        Ok(set.completed)
    }

    /// Mark the session completed, freezing its sets
    pub fn finish(&mut self) -> Result<()> {
        if self.completed {
            return Err(Error::SessionCompleted(self.id.clone()));
        }
        self.completed = true;
        tracing::info!("Finished session {}", self.id);
        Ok(())
    }

    fn set_mut(&mut self, exercise_id: &str, set_index: usize) -> Result<&mut SetLog> {
        if self.completed {
            return Err(Error::SessionCompleted(self.id.clone()));
        }

        let session_id = &self.id;
        let log = self
            .exercises
            .iter_mut()
            .find(|e| e.exercise_id == exercise_id)
            .ok_or_else(|| Error::UnknownExercise {
                session_id: session_id.clone(),
                exercise_id: exercise_id.to_string(),
            })?;

        let available = log.sets.len();
        log.sets.get_mut(set_index).ok_or_else(|| Error::SetOutOfRange {
            exercise_id: exercise_id.to_string(),
            set_number: set_index + 1,
            available,
        })
    }
}
