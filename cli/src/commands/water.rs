use anyhow::Result;
use serde::Serialize;

use fitbot_core::models::{WaterEntry, percent_of};
use fitbot_core::service::FitnessService;

use super::helpers::{parse_date, progress_bar};

pub(crate) fn cmd_water_add(
    svc: &FitnessService,
    user_id: i64,
    amount_ml: i64,
    date: Option<String>,
    json: bool,
) -> Result<()> {
    let date = parse_date(date)?;
    let entry = svc.log_water_on(user_id, date, amount_ml)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&entry)?);
        return Ok(());
    }

    let total = svc.daily_water(user_id, date)?;
    println!(
        "Logged {} ml of water for {}. Total today: {total} ml",
        entry.amount_ml, entry.date
    );
    Ok(())
}

pub(crate) fn cmd_water_show(
    svc: &FitnessService,
    user_id: i64,
    date: Option<String>,
    json: bool,
) -> Result<()> {
    #[derive(Serialize)]
    struct WaterDay {
        date: String,
        total_ml: i64,
        goal_ml: i64,
        entries: Vec<WaterEntry>,
    }

    let date = parse_date(date)?;
    let total_ml = svc.daily_water(user_id, date)?;
    let goal_ml = svc
        .get_user(user_id)?
        .map(|u| u.goals)
        .unwrap_or_default()
        .water_ml;
    let entries = svc.daily_water_entries(user_id, date)?;
    let date = date.format("%Y-%m-%d").to_string();

    if json {
        let day = WaterDay {
            date,
            total_ml,
            goal_ml,
            entries,
        };
        println!("{}", serde_json::to_string_pretty(&day)?);
        return Ok(());
    }

    #[allow(clippy::cast_precision_loss)]
    let pct = percent_of(total_ml as f64, goal_ml);
    println!("=== Water {date} ===\n");
    for e in &entries {
        println!("  + {} ml", e.amount_ml);
    }
    if !entries.is_empty() {
        println!();
    }
    println!("  {} {total_ml} / {goal_ml} ml ({pct:.0}%)", progress_bar(pct));
    Ok(())
}
