mod commands;
mod config;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::commands::{
    cmd_export, cmd_food_list, cmd_food_lookup, cmd_meal_diary, cmd_meal_log, cmd_progress,
    cmd_user_goals, cmd_user_show, cmd_user_start, cmd_water_add, cmd_water_show,
    cmd_weight_history, cmd_weight_log, cmd_workout_log, cmd_workout_show, require_user,
};
use crate::config::Config;
use fitbot_core::models::UpdateGoals;
use fitbot_core::service::FitnessService;

#[derive(Parser)]
#[command(
    name = "fitbot",
    version,
    about = "A personal fitness tracker: meals, water, workouts and body weight"
)]
struct Cli {
    /// Path to the SQLite database (default: platform data directory)
    #[arg(long, global = true, env = "FITBOT_DB", value_name = "PATH")]
    db: Option<PathBuf>,
    /// User ID to act as
    #[arg(short, long, global = true, env = "FITBOT_USER", value_name = "ID")]
    user: Option<i64>,
    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Register a user and manage daily goals
    User {
        #[command(subcommand)]
        command: UserCommands,
    },
    /// Browse the built-in food table
    Food {
        #[command(subcommand)]
        command: FoodCommands,
    },
    /// Log meals and show the food diary
    Meal {
        #[command(subcommand)]
        command: MealCommands,
    },
    /// Track water intake
    Water {
        #[command(subcommand)]
        command: WaterCommands,
    },
    /// Track workouts
    Workout {
        #[command(subcommand)]
        command: WorkoutCommands,
    },
    /// Track body weight
    Weight {
        #[command(subcommand)]
        command: WeightCommands,
    },
    /// Show daily progress against goals (defaults to today)
    Progress {
        /// Date (YYYY-MM-DD or today/yesterday/tomorrow, default: today)
        date: Option<String>,
    },
    /// Export everything recorded for the user
    Export {
        /// Export the meal diary as CSV instead of JSON
        #[arg(long)]
        csv: bool,
    },
}

#[derive(Subcommand)]
enum UserCommands {
    /// Register a user (does nothing if the user already exists)
    Start {
        /// User ID
        user_id: i64,
        /// Username
        #[arg(long)]
        username: Option<String>,
        /// Display name
        #[arg(long)]
        name: Option<String>,
    },
    /// Show the user and their goals
    Show,
    /// Change daily goals; omitted values stay as they are
    Goals {
        /// Daily calories (kcal)
        #[arg(long)]
        calories: Option<i64>,
        /// Daily water (ml)
        #[arg(long)]
        water: Option<i64>,
        /// Daily protein (g)
        #[arg(long)]
        protein: Option<i64>,
        /// Daily carbohydrates (g)
        #[arg(long)]
        carbs: Option<i64>,
        /// Daily fat (g)
        #[arg(long)]
        fat: Option<i64>,
    },
}

#[derive(Subcommand)]
enum FoodCommands {
    /// List the food table
    List {
        /// Search query to filter foods
        #[arg(short, long)]
        search: Option<String>,
        /// Only foods in this category: proteins, carbs, fats, vegetables, fruits
        #[arg(short, long)]
        category: Option<String>,
    },
    /// Show nutrition for a quantity of food without logging it
    Lookup {
        /// Food name (e.g. "oatmeal", "chicken_breast")
        food: String,
        /// Amount in grams (e.g. "150" or "150g")
        grams: String,
    },
}

#[derive(Subcommand)]
enum MealCommands {
    /// Log a meal
    Log {
        /// Meal type: breakfast, lunch, dinner, snack
        meal: String,
        /// Food name (e.g. "oatmeal", "chicken_breast")
        food: String,
        /// Amount in grams (e.g. "150" or "150g")
        grams: String,
        /// Date (YYYY-MM-DD or today/yesterday/tomorrow, default: today)
        #[arg(long)]
        date: Option<String>,
    },
    /// Show the itemised food diary with totals
    Diary {
        /// Date (YYYY-MM-DD or today/yesterday/tomorrow, default: today)
        date: Option<String>,
    },
}

#[derive(Subcommand)]
enum WaterCommands {
    /// Log water intake
    Add {
        /// Amount in milliliters
        ml: i64,
        /// Date (YYYY-MM-DD or today/yesterday/tomorrow, default: today)
        #[arg(long)]
        date: Option<String>,
    },
    /// Show water intake for a day
    Show {
        /// Date (YYYY-MM-DD or today/yesterday/tomorrow, default: today)
        date: Option<String>,
    },
}

#[derive(Subcommand)]
enum WorkoutCommands {
    /// Log a workout
    Log {
        /// Workout type: cardio, strength, stretching
        workout_type: String,
        /// Duration in minutes
        minutes: i64,
        /// Exercise names (e.g. running squats bench_press)
        #[arg(required = true)]
        exercises: Vec<String>,
        /// Date (YYYY-MM-DD or today/yesterday/tomorrow, default: today)
        #[arg(long)]
        date: Option<String>,
    },
    /// Show workouts for a day
    Show {
        /// Date (YYYY-MM-DD or today/yesterday/tomorrow, default: today)
        date: Option<String>,
    },
}

#[derive(Subcommand)]
enum WeightCommands {
    /// Log a weight entry in kg
    Log {
        /// Weight in kg
        kg: f64,
        /// Date (YYYY-MM-DD or today/yesterday/tomorrow, default: today)
        #[arg(long)]
        date: Option<String>,
    },
    /// Show recent weight entries, newest first
    History {
        /// Number of entries to show
        #[arg(short, long, default_value = "7", value_parser = clap::value_parser!(u32).range(1..))]
        limit: u32,
    },
}

fn main() {
    init_logging();
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

/// Logs go to stderr so `--json` output on stdout stays parseable.
fn init_logging() {
    let filter = EnvFilter::try_from_env("FITBOT_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let json = cli.json;
    let db_override = cli.db;
    let user = cli.user;

    // Opened per command; the food table is static and needs no database.
    let open = || -> Result<FitnessService> {
        let config = Config::load(db_override.clone())?;
        tracing::debug!(db = %config.db_path.display(), "opening database");
        FitnessService::new(&config.db_path)
    };

    match cli.command {
        Commands::Food { command } => match command {
            FoodCommands::List { search, category } => {
                cmd_food_list(search.as_deref(), category.as_deref(), json)
            }
            FoodCommands::Lookup { food, grams } => cmd_food_lookup(&food, &grams, json),
        },
        Commands::User { command } => match command {
            UserCommands::Start {
                user_id,
                username,
                name,
            } => cmd_user_start(&open()?, user_id, username.as_deref(), name.as_deref(), json),
            UserCommands::Show => cmd_user_show(&open()?, require_user(user)?, json),
            UserCommands::Goals {
                calories,
                water,
                protein,
                carbs,
                fat,
            } => {
                let update = UpdateGoals {
                    calories,
                    water_ml: water,
                    protein_g: protein,
                    carbs_g: carbs,
                    fat_g: fat,
                };
                cmd_user_goals(&open()?, require_user(user)?, &update, json)
            }
        },
        Commands::Meal { command } => {
            let user_id = require_user(user)?;
            let svc = open()?;
            match command {
                MealCommands::Log {
                    meal,
                    food,
                    grams,
                    date,
                } => cmd_meal_log(&svc, user_id, &meal, &food, &grams, date, json),
                MealCommands::Diary { date } => cmd_meal_diary(&svc, user_id, date, json),
            }
        }
        Commands::Water { command } => {
            let user_id = require_user(user)?;
            let svc = open()?;
            match command {
                WaterCommands::Add { ml, date } => cmd_water_add(&svc, user_id, ml, date, json),
                WaterCommands::Show { date } => cmd_water_show(&svc, user_id, date, json),
            }
        }
        Commands::Workout { command } => {
            let user_id = require_user(user)?;
            let svc = open()?;
            match command {
                WorkoutCommands::Log {
                    workout_type,
                    minutes,
                    exercises,
                    date,
                } => cmd_workout_log(&svc, user_id, &workout_type, minutes, exercises, date, json),
                WorkoutCommands::Show { date } => cmd_workout_show(&svc, user_id, date, json),
            }
        }
        Commands::Weight { command } => {
            let user_id = require_user(user)?;
            let svc = open()?;
            match command {
                WeightCommands::Log { kg, date } => cmd_weight_log(&svc, user_id, kg, date, json),
                WeightCommands::History { limit } => {
                    cmd_weight_history(&svc, user_id, limit, json)
                }
            }
        }
        Commands::Progress { date } => cmd_progress(&open()?, require_user(user)?, date, json),
        Commands::Export { csv } => cmd_export(&open()?, require_user(user)?, csv),
    }
}
