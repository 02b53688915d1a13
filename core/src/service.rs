use std::path::Path;

use anyhow::{Result, bail};
use chrono::{Local, NaiveDate};
use tracing::info;

use crate::db::Database;
use crate::export;
use crate::models::{
    DailyProgress, ExportData, FoodDiary, MealEntry, NewMealEntry, NewWorkoutEntry, UpdateGoals,
    User, WaterEntry, WeightEntry, WorkoutEntry, validate_goals, validate_meal_type,
    validate_workout_type,
};
use crate::nutrition::{self, DailyTotals};

pub struct FitnessService {
    db: Database,
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

impl FitnessService {
    pub fn new(db_path: &Path) -> Result<Self> {
        let db = Database::open(db_path)?;
        Ok(Self { db })
    }

    pub fn new_in_memory() -> Result<Self> {
        let db = Database::open_in_memory()?;
        Ok(Self { db })
    }

    #[must_use]
    pub fn from_database(db: Database) -> Self {
        Self { db }
    }

    // --- Users ---

    pub fn register_user(
        &self,
        user_id: i64,
        username: Option<&str>,
        first_name: Option<&str>,
    ) -> Result<User> {
        self.db.add_user(user_id, username, first_name)
    }

    pub fn get_user(&self, user_id: i64) -> Result<Option<User>> {
        self.db.get_user(user_id)
    }

    pub fn update_goals(&self, user_id: i64, update: &UpdateGoals) -> Result<User> {
        let Some(user) = self.db.get_user(user_id)? else {
            bail!("User {user_id} is not registered. Run `fitbot user start {user_id}` first");
        };
        let goals = update.apply(user.goals);
        validate_goals(&goals)?;
        self.db.update_goals(user_id, &goals)
    }

    // --- Meals ---

    /// Log `grams` of a food from the built-in table for today.
    ///
    /// Returns `Ok(None)` when the food name is not in the table; nothing is
    /// written in that case.
    pub fn log_meal(
        &self,
        user_id: i64,
        meal_type: &str,
        food_name: &str,
        grams: f64,
    ) -> Result<Option<MealEntry>> {
        self.log_meal_on(user_id, today(), meal_type, food_name, grams)
    }

    pub fn log_meal_on(
        &self,
        user_id: i64,
        date: NaiveDate,
        meal_type: &str,
        food_name: &str,
        grams: f64,
    ) -> Result<Option<MealEntry>> {
        let meal_type = validate_meal_type(meal_type)?;
        if !grams.is_finite() {
            bail!("Meal amount must be a finite number of grams");
        }
        let Some(n) = nutrition::calculate(food_name, grams) else {
            info!(user_id, food = food_name, "food not found");
            return Ok(None);
        };
        let entry = self.db.add_meal(
            user_id,
            &NewMealEntry {
                date,
                meal_type,
                food_name: n.food_name.to_string(),
                grams,
                calories: n.calories,
                protein: n.protein,
                carbs: n.carbs,
                fat: n.fat,
            },
        )?;
        Ok(Some(entry))
    }

    pub fn food_diary(&self, user_id: i64, date: NaiveDate) -> Result<FoodDiary> {
        let meals = self.db.get_daily_meals(user_id, date)?;
        let totals = DailyTotals::from_meals(&meals);
        Ok(FoodDiary {
            user_id,
            date: date.format("%Y-%m-%d").to_string(),
            meals,
            totals,
        })
    }

    // --- Water ---

    pub fn log_water(&self, user_id: i64, amount_ml: i64) -> Result<WaterEntry> {
        self.log_water_on(user_id, today(), amount_ml)
    }

    pub fn log_water_on(&self, user_id: i64, date: NaiveDate, amount_ml: i64) -> Result<WaterEntry> {
        if amount_ml <= 0 {
            bail!("Water amount must be greater than 0 ml");
        }
        self.db.add_water(user_id, amount_ml, date)
    }

    pub fn daily_water(&self, user_id: i64, date: NaiveDate) -> Result<i64> {
        self.db.get_daily_water(user_id, date)
    }

    pub fn daily_water_entries(&self, user_id: i64, date: NaiveDate) -> Result<Vec<WaterEntry>> {
        self.db.get_daily_water_entries(user_id, date)
    }

    // --- Workouts ---

    pub fn log_workout(
        &self,
        user_id: i64,
        workout_type: &str,
        exercises: Vec<String>,
        duration_min: i64,
    ) -> Result<WorkoutEntry> {
        self.log_workout_on(user_id, today(), workout_type, exercises, duration_min)
    }

    pub fn log_workout_on(
        &self,
        user_id: i64,
        date: NaiveDate,
        workout_type: &str,
        exercises: Vec<String>,
        duration_min: i64,
    ) -> Result<WorkoutEntry> {
        let workout_type = validate_workout_type(workout_type)?;
        if duration_min <= 0 {
            bail!("Workout duration must be greater than 0 minutes");
        }
        let exercises: Vec<String> = exercises
            .iter()
            .map(|e| e.trim().replace('_', " "))
            .filter(|e| !e.is_empty())
            .collect();
        self.db.add_workout(
            user_id,
            &NewWorkoutEntry {
                date,
                workout_type,
                exercises,
                duration_min,
            },
        )
    }

    pub fn daily_workouts(&self, user_id: i64, date: NaiveDate) -> Result<Vec<WorkoutEntry>> {
        self.db.get_daily_workouts(user_id, date)
    }

    // --- Weight ---

    pub fn log_weight(&self, user_id: i64, weight_kg: f64) -> Result<WeightEntry> {
        self.log_weight_on(user_id, today(), weight_kg)
    }

    pub fn log_weight_on(&self, user_id: i64, date: NaiveDate, weight_kg: f64) -> Result<WeightEntry> {
        if !weight_kg.is_finite() || weight_kg <= 0.0 {
            bail!("Weight must be a number greater than 0");
        }
        self.db.add_weight(user_id, weight_kg, date)
    }

    pub fn weight_history(&self, user_id: i64, limit: Option<i64>) -> Result<Vec<WeightEntry>> {
        self.db.get_weight_history(user_id, limit)
    }

    // --- Reports ---

    /// Calories, water, workouts and latest weight for one date. Unknown users
    /// are measured against the default goals.
    pub fn daily_progress(&self, user_id: i64, date: NaiveDate) -> Result<DailyProgress> {
        let meals = self.db.get_daily_meals(user_id, date)?;
        let water_ml = self.db.get_daily_water(user_id, date)?;
        let workouts = self.db.get_daily_workouts(user_id, date)?;
        let latest_weight_kg = self.db.get_latest_weight(user_id)?.map(|w| w.weight_kg);
        let goals = self
            .db
            .get_user(user_id)?
            .map(|u| u.goals)
            .unwrap_or_default();

        Ok(DailyProgress {
            user_id,
            date: date.format("%Y-%m-%d").to_string(),
            totals: DailyTotals::from_meals(&meals),
            water_ml,
            workout_count: workouts.len(),
            workout_minutes: workouts.iter().map(|w| w.duration_min).sum(),
            latest_weight_kg,
            goals,
        })
    }

    // --- Export ---

    pub fn export_user(&self, user_id: i64) -> Result<ExportData> {
        export::export_user(&self.db, user_id)
    }

    pub fn export_meals_csv(&self, user_id: i64) -> Result<String> {
        let meals = self.db.get_all_meals(user_id)?;
        export::meals_to_csv(&meals)
    }
}
