//! Integration tests for the liftlog binary.
//!
//! These tests verify end-to-end behavior including:
//! - Plan display and rest days
//! - Session start, set recording and finishing
//! - History, streak and previous-performance display
//! - Body stats and CSV export

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const SESSIONS_FILE: &str = "workout-tracker-workouts.json";
const BODY_STATS_FILE: &str = "workout-tracker-body-stats.json";

// 2024-03-04 is a Monday (upper-strength), 2024-03-06 a Wednesday (rest)
const MONDAY: &str = "2024-03-04";
const TUESDAY: &str = "2024-03-05";
const WEDNESDAY: &str = "2024-03-06";
const NEXT_MONDAY: &str = "2024-03-11";

/// Helper to create a test data directory
fn setup_test_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp dir")
}

/// CLI pointed at an isolated data and config directory, with "today" fixed
fn cli(data_dir: &Path, date: &str) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("liftlog"));
    cmd.env("XDG_CONFIG_HOME", data_dir.join("config"))
        .arg("--data-dir")
        .arg(data_dir)
        .arg("--date")
        .arg(date);
    cmd
}

fn read_sessions(data_dir: &Path) -> Vec<serde_json::Value> {
    let content = fs::read_to_string(data_dir.join(SESSIONS_FILE)).expect("Failed to read sessions");
    serde_json::from_str(&content).expect("Sessions file is not a JSON list")
}

fn log_set(data_dir: &Path, date: &str, plan: &str, exercise: &str, set: &str, weight: &str) {
    cli(data_dir, date)
        .args(["set", plan, exercise, set, "--weight", weight, "--reps", "5", "--done"])
        .assert()
        .success();
}

#[test]
fn test_cli_help() {
    Command::new(assert_cmd::cargo::cargo_bin!("liftlog"))
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Weekly strength plan and workout log"));
}

#[test]
fn test_default_command_shows_todays_plan() {
    let temp_dir = setup_test_dir();

    cli(temp_dir.path(), MONDAY)
        .assert()
        .success()
        .stdout(predicate::str::contains("Monday"))
        .stdout(predicate::str::contains("Upper Strength"))
        .stdout(predicate::str::contains("17 sets"))
        .stdout(predicate::str::contains("Not started"));
}

#[test]
fn test_rest_day() {
    let temp_dir = setup_test_dir();

    cli(temp_dir.path(), WEDNESDAY)
        .arg("today")
        .assert()
        .success()
        .stdout(predicate::str::contains("Rest day"));

    // Nothing is written just by looking
    assert!(!temp_dir.path().join(SESSIONS_FILE).exists());
}

#[test]
fn test_plans_lists_schedule() {
    let temp_dir = setup_test_dir();

    cli(temp_dir.path(), TUESDAY)
        .arg("plans")
        .assert()
        .success()
        .stdout(predicate::str::contains("Upper Strength"))
        .stdout(predicate::str::contains("Lower Hypertrophy (lower-hypertrophy) ← today"))
        .stdout(predicate::str::contains("Upper Hypertrophy"))
        .stdout(predicate::str::contains("Lower Strength"))
        .stdout(predicate::str::contains("3 × 10/leg"));
}

#[test]
fn test_start_creates_session() {
    let temp_dir = setup_test_dir();

    cli(temp_dir.path(), MONDAY)
        .args(["start", "upper-strength"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Started Upper Strength"));

    let sessions = read_sessions(temp_dir.path());
    assert_eq!(sessions.len(), 1);
    assert_eq!(sessions[0]["id"], "upper-strength-2024-03-04");
    assert_eq!(sessions[0]["date"], MONDAY);
    assert_eq!(sessions[0]["dayType"], "upper-strength");
    assert_eq!(sessions[0]["completed"], false);
    assert_eq!(sessions[0]["exercises"][0]["sets"].as_array().unwrap().len(), 4);
    assert_eq!(sessions[0]["exercises"][4]["sets"][0]["reps"], 45);
}

#[test]
fn test_start_twice_keeps_one_session() {
    let temp_dir = setup_test_dir();

    cli(temp_dir.path(), MONDAY)
        .args(["start", "upper-strength"])
        .assert()
        .success();
    log_set(temp_dir.path(), MONDAY, "upper-strength", "bench-press", "1", "60");

    cli(temp_dir.path(), MONDAY)
        .args(["start", "upper-strength"])
        .assert()
        .success()
        .stdout(predicate::str::contains("already started"));

    let sessions = read_sessions(temp_dir.path());
    assert_eq!(sessions.len(), 1);
    assert_eq!(sessions[0]["exercises"][0]["sets"][0]["weight"], 60.0);
}

#[test]
fn test_set_records_values() {
    let temp_dir = setup_test_dir();

    cli(temp_dir.path(), MONDAY)
        .args(["set", "upper-strength", "bench-press", "2", "--weight", "62.5", "--reps", "4", "--done"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Set 2 of bench-press: 62.5 kg × 4 ✓"));

    let sessions = read_sessions(temp_dir.path());
    let set = &sessions[0]["exercises"][0]["sets"][1];
    assert_eq!(set["weight"], 62.5);
    assert_eq!(set["reps"], 4);
    assert_eq!(set["completed"], true);
}

#[test]
fn test_set_coerces_invalid_numbers() {
    let temp_dir = setup_test_dir();

    cli(temp_dir.path(), MONDAY)
        .args(["set", "upper-strength", "pull-ups", "1", "--weight", "heavy", "--reps", "-3"])
        .assert()
        .success();

    let sessions = read_sessions(temp_dir.path());
    let set = &sessions[0]["exercises"][1]["sets"][0];
    assert_eq!(set["weight"], 0.0);
    assert_eq!(set["reps"], 0);
}

#[test]
fn test_set_out_of_range_fails() {
    let temp_dir = setup_test_dir();

    cli(temp_dir.path(), MONDAY)
        .args(["set", "upper-strength", "plank", "4", "--done"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("SetOutOfRange"));

    cli(temp_dir.path(), MONDAY)
        .args(["set", "upper-strength", "back-squats", "1", "--done"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("UnknownExercise"));
}

#[test]
fn test_unknown_plan_fails() {
    let temp_dir = setup_test_dir();

    cli(temp_dir.path(), MONDAY)
        .args(["start", "push-day"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("UnknownPlan"));
}

#[test]
fn test_finish_then_history() {
    let temp_dir = setup_test_dir();

    log_set(temp_dir.path(), MONDAY, "upper-strength", "bench-press", "1", "60");

    cli(temp_dir.path(), MONDAY)
        .args(["finish", "upper-strength"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Workout finished: Upper Strength"))
        .stdout(predicate::str::contains("1/17 sets"))
        .stdout(predicate::str::contains("volume 300 kg"))
        .stdout(predicate::str::contains("Streak: 1 days"));

    cli(temp_dir.path(), MONDAY)
        .arg("history")
        .assert()
        .success()
        .stdout(predicate::str::contains("Mon Mar 4"))
        .stdout(predicate::str::contains("Upper Strength"))
        .stdout(predicate::str::contains("Bench Press"))
        .stdout(predicate::str::contains("+1 more"));

    let sessions = read_sessions(temp_dir.path());
    assert_eq!(sessions[0]["completed"], true);
}

#[test]
fn test_finished_session_is_frozen() {
    let temp_dir = setup_test_dir();

    cli(temp_dir.path(), MONDAY)
        .args(["start", "upper-strength"])
        .assert()
        .success();
    cli(temp_dir.path(), MONDAY)
        .args(["finish", "upper-strength"])
        .assert()
        .success();

    cli(temp_dir.path(), MONDAY)
        .args(["set", "upper-strength", "bench-press", "1", "--weight", "80"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("SessionCompleted"));

    cli(temp_dir.path(), MONDAY)
        .args(["start", "upper-strength"])
        .assert()
        .success()
        .stdout(predicate::str::contains("already finished"));
}

#[test]
fn test_history_empty() {
    let temp_dir = setup_test_dir();

    cli(temp_dir.path(), MONDAY)
        .arg("history")
        .assert()
        .success()
        .stdout(predicate::str::contains("No workouts yet"));
}

#[test]
fn test_show_includes_previous_performance() {
    let temp_dir = setup_test_dir();

    log_set(temp_dir.path(), MONDAY, "upper-strength", "bench-press", "1", "60");
    cli(temp_dir.path(), MONDAY)
        .args(["finish", "upper-strength"])
        .assert()
        .success();

    cli(temp_dir.path(), NEXT_MONDAY)
        .args(["start", "upper-strength"])
        .assert()
        .success();

    cli(temp_dir.path(), NEXT_MONDAY)
        .args(["show", "upper-strength"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Bench Press (4 × 5)"))
        .stdout(predicate::str::contains("(last: 60×5)"));

    cli(temp_dir.path(), NEXT_MONDAY)
        .args(["set", "upper-strength", "bench-press", "1", "--weight", "62.5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Last time: 60 kg × 5"));
}

#[test]
fn test_stats_streak_and_week() {
    let temp_dir = setup_test_dir();

    for (date, plan) in [(MONDAY, "upper-strength"), (TUESDAY, "lower-hypertrophy")] {
        cli(temp_dir.path(), date)
            .args(["start", plan])
            .assert()
            .success();
        cli(temp_dir.path(), date)
            .args(["finish", plan])
            .assert()
            .success();
    }

    cli(temp_dir.path(), WEDNESDAY)
        .arg("stats")
        .assert()
        .success()
        .stdout(predicate::str::contains("Streak:    2 days"))
        .stdout(predicate::str::contains("This week: 2 workouts"))
        .stdout(predicate::str::contains("03-05"));
}

#[test]
fn test_body_log_and_list() {
    let temp_dir = setup_test_dir();

    cli(temp_dir.path(), MONDAY)
        .args(["body", "log", "82.4", "--waist", "90"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Logged 82.4 kg for 2024-03-04"));

    // Same date replaces the earlier entry
    cli(temp_dir.path(), MONDAY)
        .args(["body", "log", "82.1"])
        .assert()
        .success();

    cli(temp_dir.path(), TUESDAY)
        .args(["body", "log", "81.9"])
        .assert()
        .success();

    cli(temp_dir.path(), TUESDAY)
        .args(["body", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2024-03-04  82.1 kg"))
        .stdout(predicate::str::contains("2024-03-05  81.9 kg"));

    let content = fs::read_to_string(temp_dir.path().join(BODY_STATS_FILE)).unwrap();
    let stats: Vec<serde_json::Value> = serde_json::from_str(&content).unwrap();
    assert_eq!(stats.len(), 2);
    assert_eq!(stats[0]["waist"], 0.0);
}

#[test]
fn test_body_log_rejects_non_numeric_weight() {
    let temp_dir = setup_test_dir();

    cli(temp_dir.path(), MONDAY)
        .args(["body", "log", "lots"])
        .assert()
        .failure();

    assert!(!temp_dir.path().join(BODY_STATS_FILE).exists());
}

#[test]
fn test_export_writes_csv_files() {
    let temp_dir = setup_test_dir();
    let out_dir = temp_dir.path().join("export");

    log_set(temp_dir.path(), MONDAY, "upper-strength", "bench-press", "1", "60");
    cli(temp_dir.path(), MONDAY)
        .args(["body", "log", "82"])
        .assert()
        .success();

    cli(temp_dir.path(), MONDAY)
        .arg("export")
        .arg("--out")
        .arg(&out_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported 17 sets"))
        .stdout(predicate::str::contains("Exported 1 body stats"));

    let sessions_csv = fs::read_to_string(out_dir.join("sessions.csv")).unwrap();
    assert!(sessions_csv.starts_with("session_id,date,plan,exercise_id,set_number"));
    assert!(sessions_csv.contains("upper-strength-2024-03-04,2024-03-04,upper-strength,bench-press,1,60.0,5,true,false"));

    let body_csv = fs::read_to_string(out_dir.join("body_stats.csv")).unwrap();
    assert!(body_csv.contains("2024-03-04,82.0,"));
}

#[test]
fn test_invalid_date_fails() {
    let temp_dir = setup_test_dir();

    cli(temp_dir.path(), "03/04/2024")
        .arg("today")
        .assert()
        .failure()
        .stderr(predicate::str::contains("InvalidDate"));
}
