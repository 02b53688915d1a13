use anyhow::{Context, Result, anyhow};
use serde::Serialize;

use crate::db::Database;
use crate::models::{ExportData, MealEntry};

pub const EXPORT_VERSION: i64 = 1;

/// Everything recorded for one user, oldest entries first.
pub fn export_user(db: &Database, user_id: i64) -> Result<ExportData> {
    Ok(ExportData {
        version: EXPORT_VERSION,
        exported_at: chrono::Utc::now().to_rfc3339(),
        user_id,
        user: db.get_user(user_id)?,
        meals: db.get_all_meals(user_id)?,
        water: db.get_all_water(user_id)?,
        workouts: db.get_all_workouts(user_id)?,
        weight: db.get_all_weight(user_id)?,
    })
}

#[derive(Serialize)]
struct MealCsvRow<'a> {
    #[serde(rename = "Date")]
    date: &'a str,
    #[serde(rename = "Meal")]
    meal: &'a str,
    #[serde(rename = "Food Name")]
    food_name: &'a str,
    #[serde(rename = "Grams")]
    grams: f64,
    #[serde(rename = "Calories")]
    calories: i64,
    #[serde(rename = "Protein (g)")]
    protein: f64,
    #[serde(rename = "Carbohydrates (g)")]
    carbs: f64,
    #[serde(rename = "Fat (g)")]
    fat: f64,
}

/// Render a meal diary as CSV with a header row.
pub fn meals_to_csv(meals: &[MealEntry]) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(Vec::new());
    for m in meals {
        wtr.serialize(MealCsvRow {
            date: &m.date,
            meal: &m.meal_type,
            food_name: &m.food_name,
            grams: m.grams,
            calories: m.calories,
            protein: m.protein,
            carbs: m.carbs,
            fat: m.fat,
        })
        .context("Failed to write CSV row")?;
    }
    let bytes = wtr
        .into_inner()
        .map_err(|e| anyhow!("Failed to finish CSV output: {}", e.error()))?;
    String::from_utf8(bytes).context("CSV output is not valid UTF-8")
}
