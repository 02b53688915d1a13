use anyhow::Result;
use std::process;
use tabled::{
    Table, Tabled,
    settings::{Alignment, Modify, Style, object::Columns},
};

use fitbot_core::service::FitnessService;

use super::helpers::{parse_date, truncate};

pub(crate) fn cmd_workout_log(
    svc: &FitnessService,
    user_id: i64,
    workout_type: &str,
    minutes: i64,
    exercises: Vec<String>,
    date: Option<String>,
    json: bool,
) -> Result<()> {
    let date = parse_date(date)?;
    let entry = svc.log_workout_on(user_id, date, workout_type, exercises, minutes)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&entry)?);
    } else {
        println!(
            "Logged {} workout ({} min) for {}: {}",
            entry.workout_type,
            entry.duration_min,
            entry.date,
            entry.exercises.join(", ")
        );
    }
    Ok(())
}

pub(crate) fn cmd_workout_show(
    svc: &FitnessService,
    user_id: i64,
    date: Option<String>,
    json: bool,
) -> Result<()> {
    let date = parse_date(date)?;
    let workouts = svc.daily_workouts(user_id, date)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&workouts)?);
        return Ok(());
    }

    if workouts.is_empty() {
        eprintln!("No workouts logged for {}", date.format("%Y-%m-%d"));
        process::exit(2);
    }

    #[derive(Tabled)]
    struct WorkoutRow {
        #[tabled(rename = "ID")]
        id: i64,
        #[tabled(rename = "Type")]
        workout_type: String,
        #[tabled(rename = "Minutes")]
        minutes: i64,
        #[tabled(rename = "Exercises")]
        exercises: String,
    }

    let rows: Vec<WorkoutRow> = workouts
        .iter()
        .map(|w| WorkoutRow {
            id: w.id,
            workout_type: w.workout_type.clone(),
            minutes: w.duration_min,
            exercises: truncate(&w.exercises.join(", "), 40),
        })
        .collect();

    let table = Table::new(&rows)
        .with(Style::rounded())
        .with(Modify::new(Columns::single(2)).with(Alignment::right()))
        .to_string();
    println!("{table}");

    let total: i64 = workouts.iter().map(|w| w.duration_min).sum();
    println!("\n  {} workouts, {total} min total", workouts.len());
    Ok(())
}
