use clap::{Parser, Subcommand};
use liftlog_core::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::io::{self, Write};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "liftlog")]
#[command(about = "Workout planning and tracking system", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Override data directory
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Override user id
    #[arg(long, global = true)]
    user: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// List the fixed program templates
    Programs,

    /// Print a program template without starting a session
    Show {
        /// Program key (e.g. "Day 1")
        program: String,
    },

    /// Generate a workout plan and print it without starting a session
    Generate {
        /// Generate a CrossFit-style workout instead of an adaptive one
        #[arg(long)]
        crossfit: bool,

        /// Seed the random generator (CrossFit workouts only)
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Run a workout session and log the results (default)
    Start {
        /// Program key; omit for an adaptive workout
        program: Option<String>,

        /// Run a CrossFit-style workout
        #[arg(long, conflicts_with = "program")]
        crossfit: bool,

        /// Seed the random generator (CrossFit workouts only)
        #[arg(long)]
        seed: Option<u64>,

        /// Auto-complete (for testing) - mark every exercise done
        #[arg(long)]
        auto_complete: bool,
    },

    /// Show streak, weekly activity and personal bests
    Stats,

    /// Show or update training preferences
    Prefs {
        /// Set the goal (fat_loss, muscle_gain, strength, endurance)
        #[arg(long)]
        goal: Option<String>,

        /// Set available equipment (bodyweight, dumbbells, full_gym)
        #[arg(long)]
        equipment: Option<String>,

        /// Set preferred session length in minutes (15, 30, 45)
        #[arg(long)]
        minutes: Option<String>,

        /// Clear stored preferences
        #[arg(long, conflicts_with_all = ["goal", "equipment", "minutes"])]
        clear: bool,
    },

    /// Show or update declared injuries
    Injuries {
        /// Comma-separated body parts (shoulders,back,legs,chest,arms,core)
        #[arg(long)]
        set: Option<String>,

        /// Clear all declared injuries
        #[arg(long, conflicts_with = "set")]
        clear: bool,
    },

    /// Export the session history to CSV
    Export {
        /// Output path (defaults to history.csv in the data directory)
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    // Initialize logging
    liftlog_core::logging::init();

    let cli = Cli::parse();

    // Determine data directory and user identity
    let config = Config::load()?;
    let data_dir = cli.data_dir.unwrap_or_else(|| config.data.data_dir.clone());
    let user_id = cli.user.unwrap_or_else(|| config.user.id.clone());
    let identity = StaticIdentity::new(user_id);
    let user_id = identity.current_user_id()?;

    let store = FsDocumentStore::new(&data_dir);
    let profile = UserProfile::new(&store, user_id);

    match cli.command {
        Some(Commands::Programs) => cmd_programs(),
        Some(Commands::Show { program }) => cmd_show(&program),
        Some(Commands::Generate { crossfit, seed }) => cmd_generate(&profile, crossfit, seed),
        Some(Commands::Start {
            program,
            crossfit,
            seed,
            auto_complete,
        }) => cmd_start(&profile, program, crossfit, seed, auto_complete),
        Some(Commands::Stats) => cmd_stats(&profile),
        Some(Commands::Prefs {
            goal,
            equipment,
            minutes,
            clear,
        }) => cmd_prefs(&profile, goal, equipment, minutes, clear),
        Some(Commands::Injuries { set, clear }) => cmd_injuries(&profile, set, clear),
        Some(Commands::Export { out }) => {
            cmd_export(&profile, out.unwrap_or_else(|| data_dir.join("history.csv")))
        }
        None => cmd_start(&profile, None, false, None, false),
    }
}

fn cmd_programs() -> Result<()> {
    println!("Available programs:");
    for key in program_keys() {
        println!("  {}", key);
    }
    println!("\nStart one with: liftlog start \"<program>\"");
    Ok(())
}

fn cmd_show(program: &str) -> Result<()> {
    let plan = generate_program_workout(program)?;
    display_plan(&plan);
    Ok(())
}

fn cmd_generate<S: DocumentStore>(
    profile: &UserProfile<S>,
    crossfit: bool,
    seed: Option<u64>,
) -> Result<()> {
    let plan = build_generated_plan(profile, crossfit, seed)?;
    display_plan(&plan);
    println!("[Preview only - not logging a session]");
    Ok(())
}

fn cmd_start<S: DocumentStore>(
    profile: &UserProfile<S>,
    program: Option<String>,
    crossfit: bool,
    seed: Option<u64>,
    auto_complete: bool,
) -> Result<()> {
    let (key, plan) = match program {
        Some(ref key) => (key.clone(), generate_program_workout(key)?),
        None => {
            let plan = build_generated_plan(profile, crossfit, seed)?;
            (plan.title.clone(), plan)
        }
    };

    let last_used = profile.load_last_used()?;
    let mut tracker = SessionTracker::new(key, plan, &last_used);

    display_plan(tracker.plan());

    if auto_complete {
        let layout: Vec<usize> = tracker
            .plan()
            .sections
            .iter()
            .map(|s| s.exercises.len())
            .collect();
        for (si, count) in layout.iter().enumerate() {
            for ei in 0..*count {
                tracker.toggle_complete(si, ei);
            }
        }
    } else {
        run_session(&mut tracker)?;
    }

    if !tracker.all_done() {
        println!("\nSession abandoned - nothing was logged.");
        return Ok(());
    }

    let outcome = tracker.complete_session(chrono::Utc::now(), &last_used)?;
    profile.record_session(&outcome)?;

    println!("\n✓ Session logged! ({}% complete)", tracker.progress());
    Ok(())
}

/// Walk the plan exercise by exercise, prompting for each one
fn run_session(tracker: &mut SessionTracker) -> Result<()> {
    let layout: Vec<(String, Vec<String>)> = tracker
        .plan()
        .sections
        .iter()
        .map(|s| {
            (
                s.name.clone(),
                s.exercises.iter().map(|e| e.name.clone()).collect(),
            )
        })
        .collect();

    for (si, (section, exercises)) in layout.iter().enumerate() {
        println!("\n── {} ──", section);
        for (ei, name) in exercises.iter().enumerate() {
            match prompt_exercise(name)? {
                ExerciseAction::Done => tracker.toggle_complete(si, ei),
                ExerciseAction::Skip => tracker.toggle_skip(si, ei),
                ExerciseAction::DoneWithWeight(weight) => {
                    tracker.record_field(name, LogField::Weight, &weight);
                    tracker.toggle_complete(si, ei);
                }
            }
        }
    }

    Ok(())
}

enum ExerciseAction {
    Done,
    Skip,
    DoneWithWeight(String),
}

fn prompt_exercise(name: &str) -> Result<ExerciseAction> {
    println!("  {}", name);
    println!("    Press Enter when done, 's' to skip, 'w <weight>' to log a weight");
    print!("  > ");
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    let input = input.trim();

    let action = if input.eq_ignore_ascii_case("s") {
        ExerciseAction::Skip
    } else if let Some(weight) = input.strip_prefix("w ") {
        ExerciseAction::DoneWithWeight(weight.trim().to_string())
    } else {
        ExerciseAction::Done
    };

    Ok(action)
}

fn cmd_stats<S: DocumentStore>(profile: &UserProfile<S>) -> Result<()> {
    let history = profile.load_history()?;

    println!("Streak: {} sessions", streak(&history));

    let activity = weekly_activity(&history);
    if !activity.is_empty() {
        println!("\nWeekly activity:");
        for bucket in activity {
            println!("  {:>3}: {}", bucket.day, bucket.count);
        }
    }

    let bests = personal_bests(&history);
    if bests.is_empty() {
        println!("\nNo personal bests yet - log a session first.");
    } else {
        println!("\nPersonal bests:");
        for (name, entry) in bests {
            println!("  {}: {} ({})", name, entry.weight, entry.date);
        }
    }

    Ok(())
}

fn cmd_prefs<S: DocumentStore>(
    profile: &UserProfile<S>,
    goal: Option<String>,
    equipment: Option<String>,
    minutes: Option<String>,
    clear: bool,
) -> Result<()> {
    if clear {
        profile.clear_preferences()?;
        println!("Preferences cleared.");
        return Ok(());
    }

    if goal.is_none() && equipment.is_none() && minutes.is_none() {
        match profile.load_preferences()? {
            Some(prefs) => {
                println!("Goal:      {}", String::from(prefs.goal));
                println!("Equipment: {:?}", prefs.equipment);
                println!("Session:   {} minutes", prefs.session_length.minutes());
            }
            None => println!("No preferences set. Use --goal/--equipment/--minutes."),
        }
        return Ok(());
    }

    let mut prefs = profile.load_preferences()?.unwrap_or_default();
    if let Some(goal) = goal {
        prefs.goal = Goal::from(goal);
    }
    if let Some(equipment) = equipment {
        prefs.equipment = parse_equipment(&equipment)?;
    }
    if let Some(minutes) = minutes {
        prefs.session_length = SessionLength::from(minutes);
    }
    profile.save_preferences(&prefs)?;
    println!("Preferences saved.");
    Ok(())
}

fn cmd_injuries<S: DocumentStore>(
    profile: &UserProfile<S>,
    set: Option<String>,
    clear: bool,
) -> Result<()> {
    if clear {
        profile.save_injuries(&[])?;
        println!("Injuries cleared.");
        return Ok(());
    }

    match set {
        Some(list) => {
            let mut injuries = Vec::new();
            for part in list.split(',').filter(|p| !p.trim().is_empty()) {
                injuries.push(parse_body_part(part.trim())?);
            }
            profile.save_injuries(&injuries)?;
            println!("Injuries saved: {:?}", injuries);
        }
        None => {
            let injuries = profile.load_injuries()?;
            if injuries.is_empty() {
                println!("No injuries declared.");
            } else {
                println!("Injuries: {:?}", injuries);
            }
        }
    }
    Ok(())
}

fn cmd_export<S: DocumentStore>(profile: &UserProfile<S>, out: PathBuf) -> Result<()> {
    let history = profile.load_history()?;
    let rows = export_history_csv(&history, &out)?;
    println!("✓ Exported {} rows", rows);
    println!("  CSV: {}", out.display());
    Ok(())
}

/// Build an adaptive or CrossFit plan from the stored profile
fn build_generated_plan<S: DocumentStore>(
    profile: &UserProfile<S>,
    crossfit: bool,
    seed: Option<u64>,
) -> Result<WorkoutPlan> {
    let catalog = get_default_catalog();

    if crossfit {
        let injuries = profile.load_injuries()?;
        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        return Ok(generate_crossfit_workout(&injuries, catalog, &mut rng));
    }

    let ctx = profile.load_context()?.ok_or_else(|| {
        Error::Config("no preferences set - run 'liftlog prefs --goal ...' first".to_string())
    })?;
    Ok(generate_adaptive_workout(&ctx, &profile.load_last_used()?, catalog))
}

fn display_plan(plan: &WorkoutPlan) {
    println!("\n╭─────────────────────────────────────────╮");
    println!("│  {}", plan.title);
    println!("╰─────────────────────────────────────────╯");

    for section in &plan.sections {
        println!("\n  {}", section.name);
        for ex in &section.exercises {
            let prescription = if let Some(seconds) = ex.duration_seconds {
                format!("{} x {} sec", ex.sets, seconds)
            } else if ex.sets > 0 {
                format!("{} x {}", ex.sets, ex.reps)
            } else {
                "log your own".to_string()
            };
            if ex.target_weight > 0.0 {
                println!(
                    "    → {} ({}, rest {}s, last {} lbs)",
                    ex.name, prescription, ex.rest_seconds, ex.target_weight
                );
            } else {
                println!("    → {} ({}, rest {}s)", ex.name, prescription, ex.rest_seconds);
            }
        }
    }
    println!();
}

fn parse_equipment(value: &str) -> Result<Equipment> {
    match value.to_lowercase().as_str() {
        "bodyweight" => Ok(Equipment::Bodyweight),
        "dumbbells" => Ok(Equipment::Dumbbells),
        "full_gym" | "fullgym" | "gym" => Ok(Equipment::FullGym),
        other => Err(Error::Config(format!(
            "unknown equipment '{}' (expected bodyweight, dumbbells or full_gym)",
            other
        ))),
    }
}

fn parse_body_part(value: &str) -> Result<BodyPart> {
    match value.to_lowercase().as_str() {
        "shoulders" => Ok(BodyPart::Shoulders),
        "back" => Ok(BodyPart::Back),
        "legs" => Ok(BodyPart::Legs),
        "chest" => Ok(BodyPart::Chest),
        "arms" => Ok(BodyPart::Arms),
        "core" => Ok(BodyPart::Core),
        other => Err(Error::Config(format!("unknown body part '{}'", other))),
    }
}
