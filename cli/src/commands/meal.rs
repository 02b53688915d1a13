use anyhow::Result;
use std::process;
use tabled::{
    Table, Tabled,
    settings::{Alignment, Modify, Style, object::Columns},
};

use fitbot_core::service::FitnessService;

use super::helpers::{json_error, no_neg_zero, parse_date, parse_grams, truncate};

pub(crate) fn cmd_meal_log(
    svc: &FitnessService,
    user_id: i64,
    meal: &str,
    food: &str,
    grams: &str,
    date: Option<String>,
    json: bool,
) -> Result<()> {
    let grams = parse_grams(grams)?;
    let date = parse_date(date)?;

    let Some(entry) = svc.log_meal_on(user_id, date, meal, food, grams)? else {
        let msg = format!("Food '{food}' not found. Try `fitbot food list`");
        if json {
            println!("{}", json_error(&msg));
        } else {
            eprintln!("{msg}");
        }
        process::exit(2);
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&entry)?);
    } else {
        println!(
            "Logged {:.0}g {} ({}) for {}: {} kcal | P:{:.1}g C:{:.1}g F:{:.1}g",
            entry.grams,
            entry.food_name,
            entry.meal_type,
            entry.date,
            entry.calories,
            entry.protein,
            entry.carbs,
            entry.fat
        );
    }
    Ok(())
}

pub(crate) fn cmd_meal_diary(
    svc: &FitnessService,
    user_id: i64,
    date: Option<String>,
    json: bool,
) -> Result<()> {
    let date = parse_date(date)?;
    let diary = svc.food_diary(user_id, date)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&diary)?);
        return Ok(());
    }

    if diary.meals.is_empty() {
        let date = &diary.date;
        eprintln!("No meals logged for {date}");
        process::exit(2);
    }

    #[derive(Tabled)]
    struct MealRow {
        #[tabled(rename = "ID")]
        id: i64,
        #[tabled(rename = "Meal")]
        meal: String,
        #[tabled(rename = "Food")]
        food: String,
        #[tabled(rename = "Grams")]
        grams: String,
        #[tabled(rename = "Cal")]
        calories: String,
        #[tabled(rename = "P")]
        protein: String,
        #[tabled(rename = "C")]
        carbs: String,
        #[tabled(rename = "F")]
        fat: String,
    }

    let rows: Vec<MealRow> = diary
        .meals
        .iter()
        .map(|m| MealRow {
            id: m.id,
            meal: m.meal_type.clone(),
            food: truncate(&m.food_name, 25),
            grams: format!("{:.0}", m.grams),
            calories: m.calories.to_string(),
            protein: format!("{:.1}", m.protein),
            carbs: format!("{:.1}", m.carbs),
            fat: format!("{:.1}", m.fat),
        })
        .collect();

    println!("=== Food diary {} ===\n", diary.date);
    let table = Table::new(&rows)
        .with(Style::rounded())
        .with(Modify::new(Columns::new(3..8)).with(Alignment::right()))
        .to_string();
    println!("{table}");

    let t = &diary.totals;
    println!(
        "\n  Total: {} kcal | P:{:.1}g C:{:.1}g F:{:.1}g ({} entries)",
        t.calories,
        no_neg_zero(t.protein),
        no_neg_zero(t.carbs),
        no_neg_zero(t.fat),
        t.meal_count
    );
    Ok(())
}
