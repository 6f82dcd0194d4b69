//! Session store: persisted sessions and body stats plus derived statistics.
//!
//! Each collection is a JSON list under its own key. Every command is a full
//! read-modify-write of one key; every query reads fresh and returns owned
//! copies. Unreadable storage degrades to an empty collection.

use crate::session::sanitize_weight;
use crate::stats;
use crate::storage::StorageBackend;
use crate::{BodyStats, PlanId, Result, SetLog, WorkoutSession};
use chrono::{Local, NaiveDate};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Storage key of the workout session list
pub const SESSIONS_KEY: &str = "workout-tracker-workouts";

/// Storage key of the body stats list
pub const BODY_STATS_KEY: &str = "workout-tracker-body-stats";

/// Owner of the persisted session and body-stat collections
pub struct SessionStore<B: StorageBackend> {
    backend: B,
}

impl<B: StorageBackend> SessionStore<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    // ------------------------------------------------------------------------
    // Sessions
    // ------------------------------------------------------------------------

    /// All stored sessions in storage order
    pub fn list_sessions(&self) -> Vec<WorkoutSession> {
        self.read_list(SESSIONS_KEY)
    }

    /// Insert or replace a session by id
    ///
    /// An existing record keeps its position; a new one is appended. Set
    /// weights that are negative or not finite are stored as 0.
    pub fn save_session(&mut self, session: &WorkoutSession) -> Result<()> {
        let mut record = session.clone();
        for set in record.exercises.iter_mut().flat_map(|e| e.sets.iter_mut()) {
            set.weight = sanitize_weight(set.weight);
        }

        let mut sessions = self.list_sessions();
        match sessions.iter().position(|s| s.id == record.id) {
            Some(index) => {
                tracing::debug!("Replacing session {} at position {}", record.id, index);
                sessions[index] = record;
            }
            None => sessions.push(record),
        }
        self.write_list(SESSIONS_KEY, &sessions)?;
        tracing::info!("Saved session {} ({} stored)", session.id, sessions.len());
        Ok(())
    }

    /// Look up a stored session by id
    pub fn session(&self, id: &str) -> Option<WorkoutSession> {
        self.list_sessions().into_iter().find(|s| s.id == id)
    }

    /// Look up the session for a plan on a date
    pub fn session_on(&self, plan_id: PlanId, date: NaiveDate) -> Option<WorkoutSession> {
        self.session(&WorkoutSession::id_for(plan_id, date))
    }

    /// Most recent completed session for a plan
    ///
    /// Among sessions sharing the latest date, the later stored record wins.
    pub fn last_completed_session_for_plan(&self, plan_id: PlanId) -> Option<WorkoutSession> {
        let sessions = self.list_sessions();
        stats::last_completed(&sessions, plan_id).cloned()
    }

    /// Completed sessions, newest first
    pub fn completed_history(&self) -> Vec<WorkoutSession> {
        stats::completed_newest_first(&self.list_sessions())
    }

    // ------------------------------------------------------------------------
    // Body stats
    // ------------------------------------------------------------------------

    /// All stored body measurements in storage order
    pub fn list_body_stats(&self) -> Vec<BodyStats> {
        self.read_list(BODY_STATS_KEY)
    }

    /// Insert or replace the measurement for `entry.date`
    pub fn upsert_body_stats(&mut self, entry: &BodyStats) -> Result<()> {
        let record = BodyStats {
            date: entry.date,
            weight: sanitize_weight(entry.weight),
            waist: sanitize_weight(entry.waist),
        };

        let mut all = self.list_body_stats();
        match all.iter().position(|s| s.date == record.date) {
            Some(index) => all[index] = record,
            None => all.push(record),
        }
        self.write_list(BODY_STATS_KEY, &all)?;
        tracing::info!("Saved body stats for {}", entry.date);
        Ok(())
    }

    // ------------------------------------------------------------------------
    // Derived statistics
    // ------------------------------------------------------------------------

    /// Streak of consecutive training days ending today (today optional)
    pub fn current_streak(&self) -> u32 {
        self.current_streak_on(Local::now().date_naive())
    }

    pub fn current_streak_on(&self, today: NaiveDate) -> u32 {
        stats::current_streak(&self.list_sessions(), today)
    }

    /// Completed sessions since the most recent Sunday
    pub fn sessions_this_week(&self) -> usize {
        self.sessions_this_week_on(Local::now().date_naive())
    }

    pub fn sessions_this_week_on(&self, today: NaiveDate) -> usize {
        stats::sessions_this_week(&self.list_sessions(), today)
    }

    /// Set at the same position in the last completed session of the plan
    pub fn previous_set(
        &self,
        plan_id: PlanId,
        exercise_id: &str,
        set_index: usize,
    ) -> Option<SetLog> {
        let previous = self.last_completed_session_for_plan(plan_id);
        stats::previous_set(previous.as_ref(), exercise_id, set_index).cloned()
    }

    /// Weight lifted at the same set position last time, 0 when unknown
    pub fn previous_weight(&self, plan_id: PlanId, exercise_id: &str, set_index: usize) -> f64 {
        self.previous_set(plan_id, exercise_id, set_index)
            .map(|s| s.weight)
            .unwrap_or(0.0)
    }

    /// Completed volume per date for the last `limit` dates, oldest first
    pub fn volume_by_date(&self, limit: usize) -> Vec<(NaiveDate, f64)> {
        stats::volume_by_date(&self.list_sessions(), limit)
    }

    // ------------------------------------------------------------------------
    // Persistence
    // ------------------------------------------------------------------------

    /// Read a JSON list, skipping records that fail to decode
    fn read_list<T: DeserializeOwned>(&self, key: &str) -> Vec<T> {
        let bytes = match self.backend.load(key) {
            Ok(Some(bytes)) => bytes,
            Ok(None) => return Vec::new(),
            Err(e) => {
                tracing::warn!("Unable to read '{}': {}. Treating as empty.", key, e);
                return Vec::new();
            }
        };

        let raw: Vec<serde_json::Value> = match serde_json::from_slice(&bytes) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!("Failed to parse '{}': {}. Treating as empty.", key, e);
                return Vec::new();
            }
        };

        let mut items = Vec::with_capacity(raw.len());
        for (index, value) in raw.into_iter().enumerate() {
            match serde_json::from_value::<T>(value) {
                Ok(item) => items.push(item),
                Err(e) => {
                    tracing::warn!("Skipping record {} of '{}': {}", index, key, e);
                }
            }
        }

        tracing::debug!("Read {} records from '{}'", items.len(), key);
        items
    }

    fn write_list<T: Serialize>(&mut self, key: &str, items: &[T]) -> Result<()> {
        let bytes = serde_json::to_vec(items)?;
        self.backend.save(key, &bytes)
    }
}
