use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use lift_core::catalog::{get_default_catalog, weekday_number};
use lift_core::export::{export_body_stats_csv, export_sessions_csv};
use lift_core::stats::{completed_set_count, progress_percent, total_set_count};
use lift_core::*;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "liftlog")]
#[command(about = "Weekly strength plan and workout log", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Override data directory
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Treat this date (YYYY-MM-DD) as today
    #[arg(long, global = true)]
    date: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show today's plan, streak and weekly count (default)
    Today,

    /// Show the weekly schedule
    Plans,

    /// Start today's session for a plan
    Start {
        /// Plan id (e.g. upper-strength)
        plan: String,
    },

    /// Record weight, reps or completion for one set
    Set {
        /// Plan id (e.g. upper-strength)
        plan: String,

        /// Exercise id (e.g. bench-press)
        exercise: String,

        /// Set number, starting at 1
        set_number: usize,

        /// Weight used
        #[arg(long, allow_hyphen_values = true)]
        weight: Option<String>,

        /// Reps performed
        #[arg(long, allow_hyphen_values = true)]
        reps: Option<String>,

        /// Mark the set completed
        #[arg(long, conflicts_with = "undone")]
        done: bool,

        /// Mark the set not completed
        #[arg(long)]
        undone: bool,
    },

    /// Show the session for a plan with last time's numbers
    Show {
        /// Plan id (e.g. upper-strength)
        plan: String,
    },

    /// Finish the session for a plan
    Finish {
        /// Plan id (e.g. upper-strength)
        plan: String,
    },

    /// List completed sessions, newest first
    History,

    /// Show streak, weekly count and volume per training day
    Stats,

    /// Log or list body measurements
    Body {
        #[command(subcommand)]
        action: BodyCommand,
    },

    /// Export sessions and body stats to CSV
    Export {
        /// Output directory
        #[arg(long)]
        out: PathBuf,
    },
}

#[derive(Subcommand)]
enum BodyCommand {
    /// Record today's body weight (replaces an earlier entry for the same date)
    Log {
        /// Body weight
        weight: String,

        /// Waist measurement
        #[arg(long)]
        waist: Option<String>,
    },

    /// List recorded measurements, oldest first
    List,
}

struct App {
    store: SessionStore<FileBackend>,
    today: NaiveDate,
    config: Config,
}

fn main() -> Result<()> {
    // Initialize logging
    lift_core::logging::init();

    let cli = Cli::parse();

    let config = Config::load()?;
    let data_dir = cli
        .data_dir
        .unwrap_or_else(|| config.data.data_dir.clone());
    let today = match cli.date.as_deref() {
        Some(date) => parse_date(date)?,
        None => Local::now().date_naive(),
    };

    let errors = get_default_catalog().validate();
    if !errors.is_empty() {
        eprintln!("Catalog validation errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        return Err(Error::CatalogValidation("Invalid catalog".into()));
    }

    tracing::debug!("Using data dir {:?}, today = {}", data_dir, today);

    let mut app = App {
        store: SessionStore::new(FileBackend::new(data_dir)),
        today,
        config,
    };

    match cli.command {
        None | Some(Commands::Today) => cmd_today(&app),
        Some(Commands::Plans) => cmd_plans(&app),
        Some(Commands::Start { plan }) => cmd_start(&mut app, &plan),
        Some(Commands::Set {
            plan,
            exercise,
            set_number,
            weight,
            reps,
            done,
            undone,
        }) => {
            let input = SetInput {
                weight: weight.as_deref().map(coerce_weight),
                reps: reps.as_deref().map(coerce_reps),
                completed: match (done, undone) {
                    (true, _) => Some(true),
                    (_, true) => Some(false),
                    _ => None,
                },
            };
            cmd_set(&mut app, &plan, &exercise, set_number, input)
        }
        Some(Commands::Show { plan }) => cmd_show(&app, &plan),
        Some(Commands::Finish { plan }) => cmd_finish(&mut app, &plan),
        Some(Commands::History) => cmd_history(&app),
        Some(Commands::Stats) => cmd_stats(&app),
        Some(Commands::Body { action }) => match action {
            BodyCommand::Log { weight, waist } => {
                cmd_body_log(&mut app, &weight, waist.as_deref())
            }
            BodyCommand::List => cmd_body_list(&app),
        },
        Some(Commands::Export { out }) => cmd_export(&app, out),
    }
}

fn resolve_plan(plan: &str) -> Result<&'static DayPlan> {
    let id: PlanId = plan.parse()?;
    plan_by_id(id).ok_or_else(|| Error::UnknownPlan(plan.into()))
}

fn cmd_today(app: &App) -> Result<()> {
    let weekday = WEEKDAY_NAMES[usize::from(weekday_number(app.today))];
    println!("{} {}", weekday, app.today.format("%Y-%m-%d"));
    println!(
        "Streak: {} days · This week: {} workouts",
        app.store.current_streak_on(app.today),
        app.store.sessions_this_week_on(app.today)
    );
    println!();

    let Some(plan) = plan_for_date(app.today) else {
        println!("Rest day. Recover and come back tomorrow.");
        return Ok(());
    };

    println!("Today: {} ({})", plan.name, plan.id);
    println!(
        "  {} exercises · {} sets",
        plan.exercises.len(),
        plan.total_sets()
    );

    match app.store.session_on(plan.id, app.today) {
        Some(session) if session.completed => println!("  ✓ Completed"),
        Some(session) => println!("  In progress: {}%", progress_percent(&session)),
        None => println!("  Not started. Run `liftlog start {}`", plan.id),
    }

    Ok(())
}

fn cmd_plans(app: &App) -> Result<()> {
    let today = weekday_number(app.today);
    for plan in list_plans() {
        let marker = if plan.day == today { " ← today" } else { "" };
        println!(
            "{:<10} {} ({}){}",
            plan.weekday_name(),
            plan.name,
            plan.id,
            marker
        );
        for exercise in &plan.exercises {
            println!(
                "             {} × {}  {}",
                exercise.default_sets, exercise.default_reps, exercise.name
            );
        }
    }
    Ok(())
}

fn cmd_start(app: &mut App, plan: &str) -> Result<()> {
    let plan = resolve_plan(plan)?;

    if let Some(existing) = app.store.session_on(plan.id, app.today) {
        if existing.completed {
            println!("{} is already finished for {}.", plan.name, app.today);
        } else {
            println!("{} already started for {}.", plan.name, app.today);
        }
        return Ok(());
    }

    let session = WorkoutSession::start(plan, app.today);
    app.store.save_session(&session)?;
    println!("✓ Started {} ({} sets)", plan.name, plan.total_sets());
    Ok(())
}

fn cmd_set(
    app: &mut App,
    plan: &str,
    exercise_id: &str,
    set_number: usize,
    input: SetInput,
) -> Result<()> {
    let plan = resolve_plan(plan)?;
    let mut session = app
        .store
        .session_on(plan.id, app.today)
        .unwrap_or_else(|| WorkoutSession::start(plan, app.today));

    let Some(set_index) = set_number.checked_sub(1) else {
        return Err(Error::SetOutOfRange {
            exercise_id: exercise_id.into(),
            set_number,
            available: session
                .exercise_log(exercise_id)
                .map(|log| log.sets.len())
                .unwrap_or(0),
        });
    };

    let set = session.record_set(exercise_id, set_index, input)?.clone();
    app.store.save_session(&session)?;

    println!(
        "Set {} of {}: {} {} × {}{}",
        set_number,
        exercise_id,
        fmt_weight(set.weight),
        app.config.units.weight,
        set.reps,
        if set.completed { " ✓" } else { "" }
    );
    if let Some(previous) = app.store.previous_set(plan.id, exercise_id, set_index) {
        if previous.weight > 0.0 {
            println!(
                "  Last time: {} {} × {}",
                fmt_weight(previous.weight),
                app.config.units.weight,
                previous.reps
            );
        }
    }
    Ok(())
}

fn cmd_show(app: &App, plan: &str) -> Result<()> {
    let plan = resolve_plan(plan)?;
    let unit = app.config.units.weight;

    let Some(session) = app.store.session_on(plan.id, app.today) else {
        println!("No {} session for {}.", plan.name, app.today);
        println!("Run `liftlog start {}` to begin.", plan.id);
        return Ok(());
    };

    println!(
        "{} · {} · {}%{}",
        plan.name,
        session.date,
        progress_percent(&session),
        if session.completed { " · completed" } else { "" }
    );

    for exercise in &plan.exercises {
        println!();
        println!("{} ({} × {})", exercise.name, exercise.default_sets, exercise.default_reps);
        let Some(log) = session.exercise_log(&exercise.id) else {
            continue;
        };
        for (index, set) in log.sets.iter().enumerate() {
            let previous = app
                .store
                .previous_set(plan.id, &exercise.id, index)
                .filter(|p| p.weight > 0.0)
                .map(|p| format!("  (last: {}×{})", fmt_weight(p.weight), p.reps))
                .unwrap_or_default();
            println!(
                "  [{}] {}  {:>6} {} × {:<3}{}",
                if set.completed { "x" } else { " " },
                index + 1,
                fmt_weight(set.weight),
                unit,
                set.reps,
                previous
            );
        }
    }

    Ok(())
}

fn cmd_finish(app: &mut App, plan: &str) -> Result<()> {
    let plan = resolve_plan(plan)?;
    let Some(mut session) = app.store.session_on(plan.id, app.today) else {
        println!("No {} session for {} to finish.", plan.name, app.today);
        return Ok(());
    };

    session.finish()?;
    app.store.save_session(&session)?;

    println!("✓ Workout finished: {}", plan.name);
    println!(
        "  {}/{} sets · volume {} {}",
        completed_set_count(&session),
        total_set_count(&session),
        fmt_weight(total_volume(&session)),
        app.config.units.weight
    );
    println!(
        "  Streak: {} days",
        app.store.current_streak_on(app.today)
    );
    Ok(())
}

fn cmd_history(app: &App) -> Result<()> {
    const EXERCISES_SHOWN: usize = 4;

    let history = app.store.completed_history();
    if history.is_empty() {
        println!("No workouts yet. Start your first one with `liftlog start <plan>`.");
        return Ok(());
    }

    let catalog = get_default_catalog();
    for session in &history {
        let plan = catalog.plan_by_id(session.plan_id);
        println!(
            "{}  {}  volume {} {} · {} sets done",
            session.date.format("%a %b %-d"),
            plan.map(|p| p.name.as_str()).unwrap_or(session.plan_id.as_str()),
            fmt_weight(total_volume(session)),
            app.config.units.weight,
            completed_set_count(session)
        );
        for log in session.exercises.iter().take(EXERCISES_SHOWN) {
            let name = plan
                .and_then(|p| p.exercise(&log.exercise_id))
                .map(|e| e.name.as_str())
                .unwrap_or(log.exercise_id.as_str());
            let done = log.sets.iter().filter(|s| s.completed).count();
            println!("    {:<28} {}/{}", name, done, log.sets.len());
        }
        if session.exercises.len() > EXERCISES_SHOWN {
            println!(
                "    +{} more",
                session.exercises.len() - EXERCISES_SHOWN
            );
        }
    }
    Ok(())
}

fn cmd_stats(app: &App) -> Result<()> {
    const BAR_WIDTH: f64 = 30.0;

    println!("Streak:    {} days", app.store.current_streak_on(app.today));
    println!("This week: {} workouts", app.store.sessions_this_week_on(app.today));

    let volume = app.store.volume_by_date(app.config.progress.volume_days);
    if volume.is_empty() {
        return Ok(());
    }

    let max = volume
        .iter()
        .map(|(_, v)| *v)
        .fold(1.0_f64, f64::max);
    println!();
    println!("Volume ({}):", app.config.units.weight);
    for (date, total) in &volume {
        let bar = "█".repeat(((total / max) * BAR_WIDTH).round() as usize);
        println!("  {}  {:<30} {}", date.format("%m-%d"), bar, fmt_weight(*total));
    }
    Ok(())
}

fn cmd_body_log(app: &mut App, weight: &str, waist: Option<&str>) -> Result<()> {
    let weight = coerce_weight(weight);
    if weight <= 0.0 {
        return Err(Error::Other("Body weight must be a positive number".into()));
    }

    let entry = BodyStats {
        date: app.today,
        weight,
        waist: waist.map(coerce_weight).unwrap_or(0.0),
    };
    app.store.upsert_body_stats(&entry)?;

    println!(
        "✓ Logged {} {} for {}",
        fmt_weight(entry.weight),
        app.config.units.weight,
        entry.date
    );
    Ok(())
}

fn cmd_body_list(app: &App) -> Result<()> {
    let mut stats = app.store.list_body_stats();
    if stats.is_empty() {
        println!("No body stats recorded.");
        return Ok(());
    }

    stats.sort_by_key(|s| s.date);
    let unit = app.config.units.weight;
    for entry in &stats {
        let waist = if entry.waist > 0.0 {
            format!("  waist {}", fmt_weight(entry.waist))
        } else {
            String::new()
        };
        println!("{}  {} {}{}", entry.date, fmt_weight(entry.weight), unit, waist);
    }
    Ok(())
}

fn cmd_export(app: &App, out: PathBuf) -> Result<()> {
    let sessions_path = out.join("sessions.csv");
    let body_path = out.join("body_stats.csv");

    let sets = export_sessions_csv(&app.store.list_sessions(), &sessions_path)?;
    let stats = export_body_stats_csv(&app.store.list_body_stats(), &body_path)?;

    println!("✓ Exported {} sets to {}", sets, sessions_path.display());
    println!("✓ Exported {} body stats to {}", stats, body_path.display());
    Ok(())
}

/// Whole numbers without a trailing `.0`
fn fmt_weight(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{:.0}", value)
    } else {
        format!("{}", value)
    }
}

