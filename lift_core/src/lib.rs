#![forbid(unsafe_code)]

//! Core domain model and business logic for liftlog.
//!
//! This crate provides:
//! - Domain types (plans, exercises, set/exercise/session logs, body stats)
//! - The static weekly plan catalog
//! - Session lifecycle (start, record sets, finish)
//! - Persistence behind a key-value backend, and the session store
//! - Derived statistics (streak, weekly count, volume, previous performance)
//! - CSV export

pub mod types;
pub mod error;
pub mod catalog;
pub mod config;
pub mod logging;
pub mod storage;
pub mod session;
pub mod stats;
pub mod store;
pub mod export;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use catalog::{list_plans, plan_by_id, plan_for_date, plan_for_weekday, today_plan};
pub use config::Config;
pub use session::{coerce_reps, coerce_weight};
pub use stats::total_volume;
pub use storage::{DetachedBackend, FileBackend, MemoryBackend, StorageBackend};
pub use store::SessionStore;
