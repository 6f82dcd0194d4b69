//! Derived statistics over session history.
//!
//! Everything here is a pure function of a slice of sessions and, where
//! relevant, the caller's notion of "today". The session store wraps these
//! with its persisted collection and the local clock.

use crate::{SetLog, WorkoutSession};
use chrono::{Datelike, Duration, NaiveDate};
use std::collections::{BTreeMap, HashSet};

/// Maximum number of days the streak scan looks back
pub const STREAK_WINDOW_DAYS: i64 = 30;

/// Default number of dates shown by the volume history
pub const DEFAULT_VOLUME_DAYS: usize = 10;

/// Sum of weight × reps over every set, completed or not
pub fn total_volume(session: &WorkoutSession) -> f64 {
    session
        .exercises
        .iter()
        .flat_map(|e| e.sets.iter())
        .map(SetLog::volume)
        .sum()
}

/// Number of sets flagged completed
pub fn completed_set_count(session: &WorkoutSession) -> usize {
    session
        .exercises
        .iter()
        .flat_map(|e| e.sets.iter())
        .filter(|s| s.completed)
        .count()
}

/// Number of sets in the session
pub fn total_set_count(session: &WorkoutSession) -> usize {
    session.exercises.iter().map(|e| e.sets.len()).sum()
}

/// Completed sets as a rounded percentage of all sets (0 for an empty session)
pub fn progress_percent(session: &WorkoutSession) -> u32 {
    let total = total_set_count(session);
    if total == 0 {
        return 0;
    }
    ((completed_set_count(session) as f64 / total as f64) * 100.0).round() as u32
}

/// Consecutive days with a completed session, scanning back from `today`
///
/// Today is optional: a missing session today neither counts nor breaks
/// the streak. The first missing day before today ends the scan. The result
/// never exceeds [`STREAK_WINDOW_DAYS`].
pub fn current_streak(sessions: &[WorkoutSession], today: NaiveDate) -> u32 {
    let completed_dates: HashSet<NaiveDate> = sessions
        .iter()
        .filter(|s| s.completed)
        .map(|s| s.date)
        .collect();

    if completed_dates.is_empty() {
        return 0;
    }

    let mut streak = 0;
    for offset in 0..STREAK_WINDOW_DAYS {
        let day = today - Duration::days(offset);
        if completed_dates.contains(&day) {
            streak += 1;
        } else if offset > 0 {
            break;
        }
    }

    tracing::debug!("Current streak as of {}: {} days", today, streak);
    streak
}

/// Most recent Sunday on or before `today`
pub fn week_start(today: NaiveDate) -> NaiveDate {
    today - Duration::days(i64::from(today.weekday().num_days_from_sunday()))
}

/// Completed sessions dated on or after the start of `today`'s week
pub fn sessions_this_week(sessions: &[WorkoutSession], today: NaiveDate) -> usize {
    let start = week_start(today);
    sessions
        .iter()
        .filter(|s| s.completed && s.date >= start)
        .count()
}

/// Most recent completed session for a plan
///
/// Among sessions sharing the latest date, the one later in `sessions`
/// order wins.
pub fn last_completed<'a>(
    sessions: &'a [WorkoutSession],
    plan_id: crate::PlanId,
) -> Option<&'a WorkoutSession> {
    sessions
        .iter()
        .filter(|s| s.completed && s.plan_id == plan_id)
        .max_by_key(|s| s.date)
}

/// The set at `set_index` of an exercise in a previous session
pub fn previous_set<'a>(
    previous: Option<&'a WorkoutSession>,
    exercise_id: &str,
    set_index: usize,
) -> Option<&'a SetLog> {
    previous?.exercise_log(exercise_id)?.sets.get(set_index)
}

/// Completed sessions, newest first
pub fn completed_newest_first(sessions: &[WorkoutSession]) -> Vec<WorkoutSession> {
    let mut history: Vec<WorkoutSession> =
        sessions.iter().filter(|s| s.completed).cloned().collect();
    // Stable sort keeps storage order within a date; reverse so later records lead
    history.reverse();
    history.sort_by(|a, b| b.date.cmp(&a.date));
    history
}

/// Volume of completed sessions summed per date, ascending, last `limit` dates
pub fn volume_by_date(sessions: &[WorkoutSession], limit: usize) -> Vec<(NaiveDate, f64)> {
    let mut by_date: BTreeMap<NaiveDate, f64> = BTreeMap::new();
    for session in sessions.iter().filter(|s| s.completed) {
        *by_date.entry(session.date).or_insert(0.0) += total_volume(session);
    }

    let skip = by_date.len().saturating_sub(limit);
    by_date.into_iter().skip(skip).collect()
}
