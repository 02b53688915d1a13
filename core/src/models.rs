use anyhow::{Result, bail};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::nutrition::DailyTotals;

pub const DEFAULT_CALORIES_GOAL: i64 = 1800;
pub const DEFAULT_WATER_GOAL_ML: i64 = 2000;
pub const DEFAULT_PROTEIN_GOAL_G: i64 = 120;
pub const DEFAULT_CARBS_GOAL_G: i64 = 150;
pub const DEFAULT_FAT_GOAL_G: i64 = 60;

pub const MEAL_TYPES: &[&str] = &["breakfast", "lunch", "dinner", "snack"];

pub const WORKOUT_TYPES: &[&str] = &["cardio", "strength", "stretching"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Goals {
    pub calories: i64,
    pub water_ml: i64,
    pub protein_g: i64,
    pub carbs_g: i64,
    pub fat_g: i64,
}

impl Default for Goals {
    fn default() -> Self {
        Self {
            calories: DEFAULT_CALORIES_GOAL,
            water_ml: DEFAULT_WATER_GOAL_ML,
            protein_g: DEFAULT_PROTEIN_GOAL_G,
            carbs_g: DEFAULT_CARBS_GOAL_G,
            fat_g: DEFAULT_FAT_GOAL_G,
        }
    }
}

/// Partial goal change; `None` fields keep their current value.
#[derive(Debug, Clone, Default)]
pub struct UpdateGoals {
    pub calories: Option<i64>,
    pub water_ml: Option<i64>,
    pub protein_g: Option<i64>,
    pub carbs_g: Option<i64>,
    pub fat_g: Option<i64>,
}

impl UpdateGoals {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.calories.is_none()
            && self.water_ml.is_none()
            && self.protein_g.is_none()
            && self.carbs_g.is_none()
            && self.fat_g.is_none()
    }

    #[must_use]
    pub fn apply(&self, current: Goals) -> Goals {
        Goals {
            calories: self.calories.unwrap_or(current.calories),
            water_ml: self.water_ml.unwrap_or(current.water_ml),
            protein_g: self.protein_g.unwrap_or(current.protein_g),
            carbs_g: self.carbs_g.unwrap_or(current.carbs_g),
            fat_g: self.fat_g.unwrap_or(current.fat_g),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub user_id: i64,
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub goals: Goals,
    pub created_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MealEntry {
    pub id: i64,
    #[serde(default)]
    pub uuid: String,
    pub user_id: i64,
    pub meal_type: String,
    pub food_name: String,
    pub grams: f64,
    pub calories: i64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
    pub date: String,
    pub created_at: String,
}

#[derive(Debug, Clone)]
pub struct NewMealEntry {
    pub date: NaiveDate,
    pub meal_type: String,
    pub food_name: String,
    pub grams: f64,
    pub calories: i64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WaterEntry {
    pub id: i64,
    #[serde(default)]
    pub uuid: String,
    pub user_id: i64,
    pub amount_ml: i64,
    pub date: String,
    pub created_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkoutEntry {
    pub id: i64,
    #[serde(default)]
    pub uuid: String,
    pub user_id: i64,
    pub workout_type: String,
    pub exercises: Vec<String>,
    pub duration_min: i64,
    pub date: String,
    pub created_at: String,
}

#[derive(Debug, Clone)]
pub struct NewWorkoutEntry {
    pub date: NaiveDate,
    pub workout_type: String,
    pub exercises: Vec<String>,
    pub duration_min: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeightEntry {
    pub id: i64,
    #[serde(default)]
    pub uuid: String,
    pub user_id: i64,
    pub weight_kg: f64,
    pub date: String,
    pub created_at: String,
}

// --- Report types ---

/// A day's itemised meals (creation order) and their totals.
#[derive(Debug, Clone, Serialize)]
pub struct FoodDiary {
    pub user_id: i64,
    pub date: String,
    pub meals: Vec<MealEntry>,
    pub totals: DailyTotals,
}

/// Everything recorded for one user on one date, measured against their goals.
#[derive(Debug, Clone, Serialize)]
pub struct DailyProgress {
    pub user_id: i64,
    pub date: String,
    pub totals: DailyTotals,
    pub water_ml: i64,
    pub workout_count: usize,
    pub workout_minutes: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latest_weight_kg: Option<f64>,
    pub goals: Goals,
}

impl DailyProgress {
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn water_progress_pct(&self) -> f64 {
        percent_of(self.water_ml as f64, self.goals.water_ml)
    }

    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn calorie_progress_pct(&self) -> f64 {
        percent_of(self.totals.calories as f64, self.goals.calories)
    }

    #[must_use]
    pub fn calories_remaining(&self) -> i64 {
        self.goals.calories - self.totals.calories
    }
}

/// `value` as a percentage of `goal`; 0 when the goal is not positive.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn percent_of(value: f64, goal: i64) -> f64 {
    if goal <= 0 {
        return 0.0;
    }
    value / goal as f64 * 100.0
}

// --- Export types ---

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportData {
    pub version: i64,
    pub exported_at: String,
    pub user_id: i64,
    #[serde(default)]
    pub user: Option<User>,
    pub meals: Vec<MealEntry>,
    pub water: Vec<WaterEntry>,
    pub workouts: Vec<WorkoutEntry>,
    pub weight: Vec<WeightEntry>,
}

// --- Validation ---

pub fn validate_meal_type(meal: &str) -> Result<String> {
    let lower = meal.trim().to_lowercase();
    if MEAL_TYPES.contains(&lower.as_str()) {
        Ok(lower)
    } else {
        bail!(
            "Invalid meal type '{meal}'. Must be one of: {}",
            MEAL_TYPES.join(", ")
        )
    }
}

pub fn validate_workout_type(workout: &str) -> Result<String> {
    let lower = workout.trim().to_lowercase();
    if WORKOUT_TYPES.contains(&lower.as_str()) {
        Ok(lower)
    } else {
        bail!(
            "Invalid workout type '{workout}'. Must be one of: {}",
            WORKOUT_TYPES.join(", ")
        )
    }
}

pub fn validate_goals(goals: &Goals) -> Result<()> {
    if goals.calories <= 0 {
        bail!("Calorie goal must be greater than 0");
    }
    if goals.water_ml <= 0 {
        bail!("Water goal must be greater than 0");
    }
    if goals.protein_g < 0 || goals.carbs_g < 0 || goals.fat_g < 0 {
        bail!("Macro goals must not be negative");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn progress(water_ml: i64, calories: i64) -> DailyProgress {
        DailyProgress {
            user_id: 1,
            date: "2024-01-15".to_string(),
            totals: DailyTotals {
                calories,
                ..DailyTotals::default()
            },
            water_ml,
            workout_count: 0,
            workout_minutes: 0,
            latest_weight_kg: None,
            goals: Goals::default(),
        }
    }

    #[test]
    fn test_valid_meal_types() {
        assert_eq!(validate_meal_type("breakfast").unwrap(), "breakfast");
        assert_eq!(validate_meal_type("lunch").unwrap(), "lunch");
        assert_eq!(validate_meal_type("dinner").unwrap(), "dinner");
        assert_eq!(validate_meal_type("snack").unwrap(), "snack");
    }

    #[test]
    fn test_invalid_meal_type() {
        assert!(validate_meal_type("brunch").is_err());
        assert!(validate_meal_type("").is_err());
    }

    #[test]
    fn test_meal_type_case_insensitive() {
        assert_eq!(validate_meal_type("Lunch").unwrap(), "lunch");
        assert_eq!(validate_meal_type("BREAKFAST").unwrap(), "breakfast");
    }

    #[test]
    fn test_workout_types() {
        assert_eq!(validate_workout_type("Cardio").unwrap(), "cardio");
        assert_eq!(validate_workout_type("strength").unwrap(), "strength");
        assert!(validate_workout_type("yoga").is_err());
    }

    #[test]
    fn test_default_goals() {
        let goals = Goals::default();
        assert_eq!(goals.calories, 1800);
        assert_eq!(goals.water_ml, 2000);
        assert_eq!(goals.protein_g, 120);
        assert_eq!(goals.carbs_g, 150);
        assert_eq!(goals.fat_g, 60);
    }

    #[test]
    fn test_update_goals_apply() {
        let update = UpdateGoals {
            calories: Some(2200),
            water_ml: Some(2500),
            ..UpdateGoals::default()
        };
        assert!(!update.is_empty());
        let goals = update.apply(Goals::default());
        assert_eq!(goals.calories, 2200);
        assert_eq!(goals.water_ml, 2500);
        assert_eq!(goals.protein_g, 120);
        assert!(UpdateGoals::default().is_empty());
    }

    #[test]
    fn test_validate_goals() {
        assert!(validate_goals(&Goals::default()).is_ok());
        let bad = Goals {
            calories: 0,
            ..Goals::default()
        };
        assert!(validate_goals(&bad).is_err());
        let bad = Goals {
            fat_g: -1,
            ..Goals::default()
        };
        assert!(validate_goals(&bad).is_err());
    }

    #[test]
    fn test_water_progress() {
        assert!((progress(500, 0).water_progress_pct() - 25.0).abs() < 1e-9);
        assert!((progress(0, 0).water_progress_pct()).abs() < 1e-9);
        assert!((progress(3000, 0).water_progress_pct() - 150.0).abs() < 1e-9);
    }

    #[test]
    fn test_calorie_progress_and_remaining() {
        let p = progress(0, 900);
        assert!((p.calorie_progress_pct() - 50.0).abs() < 1e-9);
        assert_eq!(p.calories_remaining(), 900);
        assert_eq!(progress(0, 2000).calories_remaining(), -200);
    }

    #[test]
    fn test_percent_of_zero_goal() {
        assert!(percent_of(100.0, 0).abs() < f64::EPSILON);
    }
}
