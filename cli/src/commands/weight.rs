use anyhow::Result;
use std::process;
use tabled::{
    Table, Tabled,
    settings::{Alignment, Modify, Style, object::Columns},
};

use fitbot_core::service::FitnessService;

use super::helpers::{no_neg_zero, parse_date};

pub(crate) fn cmd_weight_log(
    svc: &FitnessService,
    user_id: i64,
    weight_kg: f64,
    date: Option<String>,
    json: bool,
) -> Result<()> {
    let date = parse_date(date)?;
    let entry = svc.log_weight_on(user_id, date, weight_kg)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&entry)?);
    } else {
        println!("Logged {:.1} kg for {}", entry.weight_kg, entry.date);
    }
    Ok(())
}

pub(crate) fn cmd_weight_history(
    svc: &FitnessService,
    user_id: i64,
    limit: u32,
    json: bool,
) -> Result<()> {
    let entries = svc.weight_history(user_id, Some(i64::from(limit)))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    if entries.is_empty() {
        eprintln!("No weight entries found");
        process::exit(2);
    }

    #[derive(Tabled)]
    struct WeightRow {
        #[tabled(rename = "ID")]
        id: i64,
        #[tabled(rename = "Date")]
        date: String,
        #[tabled(rename = "kg")]
        kg: String,
        #[tabled(rename = "Change")]
        change: String,
    }

    // Entries are newest first; the change is relative to the next older one.
    let rows: Vec<WeightRow> = entries
        .iter()
        .enumerate()
        .map(|(i, e)| WeightRow {
            id: e.id,
            date: e.date.clone(),
            kg: format!("{:.1}", e.weight_kg),
            change: entries.get(i + 1).map_or_else(String::new, |older| {
                format!("{:+.1}", no_neg_zero(e.weight_kg - older.weight_kg))
            }),
        })
        .collect();

    let table = Table::new(&rows)
        .with(Style::rounded())
        .with(Modify::new(Columns::new(2..4)).with(Alignment::right()))
        .to_string();
    println!("{table}");
    Ok(())
}
