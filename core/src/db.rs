use std::path::Path;

use anyhow::{Context, Result, bail};
use chrono::{Local, NaiveDate};
use rusqlite::{Connection, params, types::Type};
use tracing::debug;
use uuid::Uuid;

use crate::models::{
    Goals, MealEntry, NewMealEntry, NewWorkoutEntry, User, WaterEntry, WeightEntry, WorkoutEntry,
};

const SCHEMA_VERSION: i64 = 1;

pub struct Database {
    conn: Connection,
}

fn date_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

impl Database {
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open database: {}", path.display()))?;
        let db = Database { conn };
        db.migrate()?;
        Ok(db)
    }

    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let db = Database { conn };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&self) -> Result<()> {
        let version: i64 = self
            .conn
            .pragma_query_value(None, "user_version", |row| row.get(0))?;

        if version < 1 {
            self.conn.execute_batch(
                "CREATE TABLE IF NOT EXISTS users (
                    user_id INTEGER PRIMARY KEY,
                    username TEXT,
                    first_name TEXT,
                    calories_goal INTEGER NOT NULL DEFAULT 1800,
                    water_goal INTEGER NOT NULL DEFAULT 2000,
                    protein_goal INTEGER NOT NULL DEFAULT 120,
                    carbs_goal INTEGER NOT NULL DEFAULT 150,
                    fat_goal INTEGER NOT NULL DEFAULT 60,
                    created_at TEXT NOT NULL
                );

                CREATE TABLE IF NOT EXISTS meals (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    uuid TEXT NOT NULL UNIQUE,
                    user_id INTEGER NOT NULL,
                    meal_type TEXT NOT NULL,
                    food_name TEXT NOT NULL,
                    grams REAL NOT NULL,
                    calories INTEGER NOT NULL,
                    protein REAL NOT NULL,
                    carbs REAL NOT NULL,
                    fat REAL NOT NULL,
                    meal_date TEXT NOT NULL,
                    created_at TEXT NOT NULL
                );

                CREATE TABLE IF NOT EXISTS water (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    uuid TEXT NOT NULL UNIQUE,
                    user_id INTEGER NOT NULL,
                    amount_ml INTEGER NOT NULL,
                    drink_date TEXT NOT NULL,
                    created_at TEXT NOT NULL
                );

                CREATE TABLE IF NOT EXISTS workouts (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    uuid TEXT NOT NULL UNIQUE,
                    user_id INTEGER NOT NULL,
                    workout_type TEXT NOT NULL,
                    exercises TEXT NOT NULL,
                    duration_min INTEGER NOT NULL,
                    workout_date TEXT NOT NULL,
                    created_at TEXT NOT NULL
                );

                CREATE TABLE IF NOT EXISTS weight (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    uuid TEXT NOT NULL UNIQUE,
                    user_id INTEGER NOT NULL,
                    weight_kg REAL NOT NULL,
                    weight_date TEXT NOT NULL,
                    created_at TEXT NOT NULL
                );

                CREATE INDEX IF NOT EXISTS idx_meals_user_date ON meals(user_id, meal_date);
                CREATE INDEX IF NOT EXISTS idx_water_user_date ON water(user_id, drink_date);
                CREATE INDEX IF NOT EXISTS idx_workouts_user_date ON workouts(user_id, workout_date);
                CREATE INDEX IF NOT EXISTS idx_weight_user_date ON weight(user_id, weight_date);

                PRAGMA user_version = 1;",
            )?;
        }

        debug!(from = version, to = SCHEMA_VERSION, "database schema ready");
        Ok(())
    }

    // --- Row mapping helpers ---

    // Expects: user_id, username, first_name, calories_goal, water_goal,
    // protein_goal, carbs_goal, fat_goal, created_at
    fn user_from_row(row: &rusqlite::Row) -> rusqlite::Result<User> {
        Ok(User {
            user_id: row.get(0)?,
            username: row.get(1)?,
            first_name: row.get(2)?,
            goals: Goals {
                calories: row.get(3)?,
                water_ml: row.get(4)?,
                protein_g: row.get(5)?,
                carbs_g: row.get(6)?,
                fat_g: row.get(7)?,
            },
            created_at: row.get(8)?,
        })
    }

    // Expects: id, uuid, user_id, meal_type, food_name, grams, calories,
    // protein, carbs, fat, meal_date, created_at
    fn meal_from_row(row: &rusqlite::Row) -> rusqlite::Result<MealEntry> {
        Ok(MealEntry {
            id: row.get(0)?,
            uuid: row.get(1)?,
            user_id: row.get(2)?,
            meal_type: row.get(3)?,
            food_name: row.get(4)?,
            grams: row.get(5)?,
            calories: row.get(6)?,
            protein: row.get(7)?,
            carbs: row.get(8)?,
            fat: row.get(9)?,
            date: row.get(10)?,
            created_at: row.get(11)?,
        })
    }

    fn water_from_row(row: &rusqlite::Row) -> rusqlite::Result<WaterEntry> {
        Ok(WaterEntry {
            id: row.get(0)?,
            uuid: row.get(1)?,
            user_id: row.get(2)?,
            amount_ml: row.get(3)?,
            date: row.get(4)?,
            created_at: row.get(5)?,
        })
    }

    fn workout_from_row(row: &rusqlite::Row) -> rusqlite::Result<WorkoutEntry> {
        let exercises_json: String = row.get(4)?;
        let exercises: Vec<String> = serde_json::from_str(&exercises_json)
            .map_err(|e| rusqlite::Error::FromSqlConversionFailure(4, Type::Text, Box::new(e)))?;
        Ok(WorkoutEntry {
            id: row.get(0)?,
            uuid: row.get(1)?,
            user_id: row.get(2)?,
            workout_type: row.get(3)?,
            exercises,
            duration_min: row.get(5)?,
            date: row.get(6)?,
            created_at: row.get(7)?,
        })
    }

    fn weight_from_row(row: &rusqlite::Row) -> rusqlite::Result<WeightEntry> {
        Ok(WeightEntry {
            id: row.get(0)?,
            uuid: row.get(1)?,
            user_id: row.get(2)?,
            weight_kg: row.get(3)?,
            date: row.get(4)?,
            created_at: row.get(5)?,
        })
    }

    // --- Users ---

    /// Register a user. A repeated call for an existing id leaves the stored
    /// row untouched and returns it.
    pub fn add_user(
        &self,
        user_id: i64,
        username: Option<&str>,
        first_name: Option<&str>,
    ) -> Result<User> {
        let now = Local::now().to_rfc3339();
        let inserted = self.conn.execute(
            "INSERT OR IGNORE INTO users (user_id, username, first_name, created_at)
             VALUES (?1, ?2, ?3, ?4)",
            params![user_id, username, first_name, now],
        )?;
        if inserted > 0 {
            debug!(user_id, "user registered");
        }
        self.get_user(user_id)?
            .context("User not found after insert")
    }

    pub fn get_user(&self, user_id: i64) -> Result<Option<User>> {
        let mut stmt = self.conn.prepare(
            "SELECT user_id, username, first_name, calories_goal, water_goal,
                    protein_goal, carbs_goal, fat_goal, created_at
             FROM users WHERE user_id = ?1",
        )?;
        let mut rows = stmt.query(params![user_id])?;
        if let Some(row) = rows.next()? {
            Ok(Some(Self::user_from_row(row)?))
        } else {
            Ok(None)
        }
    }

    pub fn update_goals(&self, user_id: i64, goals: &Goals) -> Result<User> {
        let rows = self.conn.execute(
            "UPDATE users SET calories_goal = ?1, water_goal = ?2, protein_goal = ?3,
                    carbs_goal = ?4, fat_goal = ?5
             WHERE user_id = ?6",
            params![
                goals.calories,
                goals.water_ml,
                goals.protein_g,
                goals.carbs_g,
                goals.fat_g,
                user_id,
            ],
        )?;
        if rows == 0 {
            bail!("User {user_id} not found");
        }
        debug!(user_id, "goals updated");
        self.get_user(user_id)?
            .context("User not found after update")
    }

    // --- Meals ---

    pub fn add_meal(&self, user_id: i64, entry: &NewMealEntry) -> Result<MealEntry> {
        let now = Local::now().to_rfc3339();
        let uuid = Uuid::new_v4().to_string();
        let date_str = date_key(entry.date);
        self.conn.execute(
            "INSERT INTO meals (uuid, user_id, meal_type, food_name, grams, calories, protein, carbs, fat, meal_date, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
            params![
                uuid,
                user_id,
                entry.meal_type,
                entry.food_name,
                entry.grams,
                entry.calories,
                entry.protein,
                entry.carbs,
                entry.fat,
                date_str,
                now,
            ],
        )?;
        let id = self.conn.last_insert_rowid();
        debug!(user_id, date = %date_str, food = %entry.food_name, calories = entry.calories, "meal logged");
        self.get_meal(id)
    }

    pub fn get_meal(&self, id: i64) -> Result<MealEntry> {
        self.conn
            .query_row(
                "SELECT id, uuid, user_id, meal_type, food_name, grams, calories, protein, carbs, fat, meal_date, created_at
                 FROM meals WHERE id = ?1",
                params![id],
                Self::meal_from_row,
            )
            .context("Meal entry not found")
    }

    /// Meals for one user on one date, in the order they were logged.
    pub fn get_daily_meals(&self, user_id: i64, date: NaiveDate) -> Result<Vec<MealEntry>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, uuid, user_id, meal_type, food_name, grams, calories, protein, carbs, fat, meal_date, created_at
             FROM meals
             WHERE user_id = ?1 AND meal_date = ?2
             ORDER BY id",
        )?;
        let meals = stmt
            .query_map(params![user_id, date_key(date)], Self::meal_from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(meals)
    }

    pub fn get_all_meals(&self, user_id: i64) -> Result<Vec<MealEntry>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, uuid, user_id, meal_type, food_name, grams, calories, protein, carbs, fat, meal_date, created_at
             FROM meals WHERE user_id = ?1
             ORDER BY meal_date, id",
        )?;
        let meals = stmt
            .query_map(params![user_id], Self::meal_from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(meals)
    }

    // --- Water ---

    pub fn add_water(&self, user_id: i64, amount_ml: i64, date: NaiveDate) -> Result<WaterEntry> {
        let now = Local::now().to_rfc3339();
        let uuid = Uuid::new_v4().to_string();
        let date_str = date_key(date);
        self.conn.execute(
            "INSERT INTO water (uuid, user_id, amount_ml, drink_date, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![uuid, user_id, amount_ml, date_str, now],
        )?;
        let id = self.conn.last_insert_rowid();
        debug!(user_id, date = %date_str, amount_ml, "water logged");
        self.conn
            .query_row(
                "SELECT id, uuid, user_id, amount_ml, drink_date, created_at FROM water WHERE id = ?1",
                params![id],
                Self::water_from_row,
            )
            .context("Water entry not found")
    }

    /// Total milliliters for one user on one date; 0 when nothing was logged.
    pub fn get_daily_water(&self, user_id: i64, date: NaiveDate) -> Result<i64> {
        let total: i64 = self.conn.query_row(
            "SELECT COALESCE(SUM(amount_ml), 0) FROM water WHERE user_id = ?1 AND drink_date = ?2",
            params![user_id, date_key(date)],
            |row| row.get(0),
        )?;
        Ok(total)
    }

    pub fn get_daily_water_entries(&self, user_id: i64, date: NaiveDate) -> Result<Vec<WaterEntry>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, uuid, user_id, amount_ml, drink_date, created_at
             FROM water WHERE user_id = ?1 AND drink_date = ?2
             ORDER BY id",
        )?;
        let entries = stmt
            .query_map(params![user_id, date_key(date)], Self::water_from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(entries)
    }

    pub fn get_all_water(&self, user_id: i64) -> Result<Vec<WaterEntry>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, uuid, user_id, amount_ml, drink_date, created_at
             FROM water WHERE user_id = ?1
             ORDER BY drink_date, id",
        )?;
        let entries = stmt
            .query_map(params![user_id], Self::water_from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(entries)
    }

    // --- Workouts ---

    pub fn add_workout(&self, user_id: i64, entry: &NewWorkoutEntry) -> Result<WorkoutEntry> {
        let now = Local::now().to_rfc3339();
        let uuid = Uuid::new_v4().to_string();
        let date_str = date_key(entry.date);
        let exercises = serde_json::to_string(&entry.exercises)?;
        self.conn.execute(
            "INSERT INTO workouts (uuid, user_id, workout_type, exercises, duration_min, workout_date, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                uuid,
                user_id,
                entry.workout_type,
                exercises,
                entry.duration_min,
                date_str,
                now,
            ],
        )?;
        let id = self.conn.last_insert_rowid();
        debug!(user_id, date = %date_str, workout_type = %entry.workout_type, "workout logged");
        self.conn
            .query_row(
                "SELECT id, uuid, user_id, workout_type, exercises, duration_min, workout_date, created_at
                 FROM workouts WHERE id = ?1",
                params![id],
                Self::workout_from_row,
            )
            .context("Workout entry not found")
    }

    pub fn get_daily_workouts(&self, user_id: i64, date: NaiveDate) -> Result<Vec<WorkoutEntry>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, uuid, user_id, workout_type, exercises, duration_min, workout_date, created_at
             FROM workouts WHERE user_id = ?1 AND workout_date = ?2
             ORDER BY id",
        )?;
        let entries = stmt
            .query_map(params![user_id, date_key(date)], Self::workout_from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(entries)
    }

    pub fn get_all_workouts(&self, user_id: i64) -> Result<Vec<WorkoutEntry>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, uuid, user_id, workout_type, exercises, duration_min, workout_date, created_at
             FROM workouts WHERE user_id = ?1
             ORDER BY workout_date, id",
        )?;
        let entries = stmt
            .query_map(params![user_id], Self::workout_from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(entries)
    }

    // --- Weight ---

    pub fn add_weight(&self, user_id: i64, weight_kg: f64, date: NaiveDate) -> Result<WeightEntry> {
        let now = Local::now().to_rfc3339();
        let uuid = Uuid::new_v4().to_string();
        let date_str = date_key(date);
        self.conn.execute(
            "INSERT INTO weight (uuid, user_id, weight_kg, weight_date, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![uuid, user_id, weight_kg, date_str, now],
        )?;
        let id = self.conn.last_insert_rowid();
        debug!(user_id, date = %date_str, weight_kg, "weight logged");
        self.conn
            .query_row(
                "SELECT id, uuid, user_id, weight_kg, weight_date, created_at FROM weight WHERE id = ?1",
                params![id],
                Self::weight_from_row,
            )
            .context("Weight entry not found")
    }

    /// Most recent weight entries first. `None` returns the full history.
    pub fn get_weight_history(&self, user_id: i64, limit: Option<i64>) -> Result<Vec<WeightEntry>> {
        // SQLite treats a negative LIMIT as unbounded
        let limit = limit.unwrap_or(-1);
        let mut stmt = self.conn.prepare(
            "SELECT id, uuid, user_id, weight_kg, weight_date, created_at
             FROM weight WHERE user_id = ?1
             ORDER BY weight_date DESC, id DESC
             LIMIT ?2",
        )?;
        let entries = stmt
            .query_map(params![user_id, limit], Self::weight_from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(entries)
    }

    pub fn get_latest_weight(&self, user_id: i64) -> Result<Option<WeightEntry>> {
        Ok(self.get_weight_history(user_id, Some(1))?.into_iter().next())
    }

    pub fn get_all_weight(&self, user_id: i64) -> Result<Vec<WeightEntry>> {
        let mut entries = self.get_weight_history(user_id, None)?;
        entries.reverse();
        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    fn sample_meal(date: NaiveDate, calories: i64) -> NewMealEntry {
        NewMealEntry {
            date,
            meal_type: "lunch".to_string(),
            food_name: "chicken breast".to_string(),
            grams: 150.0,
            calories,
            protein: 46.5,
            carbs: 0.0,
            fat: 5.4,
        }
    }

    #[test]
    fn test_add_and_get_user() {
        let db = Database::open_in_memory().unwrap();
        let user = db.add_user(42, Some("jdoe"), Some("Jane")).unwrap();

        assert_eq!(user.user_id, 42);
        assert_eq!(user.username.as_deref(), Some("jdoe"));
        assert_eq!(user.first_name.as_deref(), Some("Jane"));
        assert_eq!(user.goals, Goals::default());

        let fetched = db.get_user(42).unwrap().unwrap();
        assert_eq!(fetched.first_name.as_deref(), Some("Jane"));
    }

    #[test]
    fn test_add_user_is_idempotent() {
        let db = Database::open_in_memory().unwrap();
        db.add_user(42, Some("jdoe"), Some("Jane")).unwrap();
        let again = db.add_user(42, Some("other"), Some("Someone Else")).unwrap();

        // Original name is kept
        assert_eq!(again.first_name.as_deref(), Some("Jane"));
        assert_eq!(again.username.as_deref(), Some("jdoe"));

        let count: i64 = db
            .conn
            .query_row("SELECT COUNT(*) FROM users WHERE user_id = 42", [], |row| {
                row.get(0)
            })
            .unwrap();
        assert_eq!(count, 1);
    }

    #[test]
    fn test_get_user_missing() {
        let db = Database::open_in_memory().unwrap();
        assert!(db.get_user(7).unwrap().is_none());
    }

    #[test]
    fn test_update_goals() {
        let db = Database::open_in_memory().unwrap();
        db.add_user(1, None, None).unwrap();
        let goals = Goals {
            calories: 2100,
            ..Goals::default()
        };
        let user = db.update_goals(1, &goals).unwrap();
        assert_eq!(user.goals.calories, 2100);
        assert_eq!(user.goals.water_ml, 2000);
    }

    #[test]
    fn test_update_goals_unknown_user() {
        let db = Database::open_in_memory().unwrap();
        assert!(db.update_goals(99, &Goals::default()).is_err());
    }

    #[test]
    fn test_daily_meals_sum_to_600() {
        let db = Database::open_in_memory().unwrap();
        for cal in [100, 200, 300] {
            db.add_meal(1, &sample_meal(day(15), cal)).unwrap();
        }
        let meals = db.get_daily_meals(1, day(15)).unwrap();
        let total: i64 = meals.iter().map(|m| m.calories).sum();
        assert_eq!(total, 600);
    }

    #[test]
    fn test_daily_meals_keep_insertion_order() {
        let db = Database::open_in_memory().unwrap();
        for cal in [300, 100, 200] {
            db.add_meal(1, &sample_meal(day(15), cal)).unwrap();
        }
        let cals: Vec<i64> = db
            .get_daily_meals(1, day(15))
            .unwrap()
            .iter()
            .map(|m| m.calories)
            .collect();
        assert_eq!(cals, vec![300, 100, 200]);
    }

    #[test]
    fn test_daily_meals_filter_by_user_and_date() {
        let db = Database::open_in_memory().unwrap();
        db.add_meal(1, &sample_meal(day(15), 100)).unwrap();
        db.add_meal(1, &sample_meal(day(16), 200)).unwrap();
        db.add_meal(2, &sample_meal(day(15), 400)).unwrap();

        let meals = db.get_daily_meals(1, day(15)).unwrap();
        assert_eq!(meals.len(), 1);
        assert_eq!(meals[0].calories, 100);
        assert_eq!(meals[0].date, "2024-01-15");

        assert!(db.get_daily_meals(3, day(15)).unwrap().is_empty());
    }

    #[test]
    fn test_meal_fields_roundtrip() {
        let db = Database::open_in_memory().unwrap();
        let meal = db.add_meal(1, &sample_meal(day(15), 248)).unwrap();
        assert!(meal.id > 0);
        assert!(!meal.uuid.is_empty());
        assert_eq!(meal.meal_type, "lunch");
        assert_eq!(meal.food_name, "chicken breast");
        assert!((meal.grams - 150.0).abs() < f64::EPSILON);
        assert!((meal.protein - 46.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_daily_water() {
        let db = Database::open_in_memory().unwrap();
        assert_eq!(db.get_daily_water(1, day(15)).unwrap(), 0);

        db.add_water(1, 200, day(15)).unwrap();
        db.add_water(1, 300, day(15)).unwrap();
        db.add_water(1, 500, day(16)).unwrap();
        db.add_water(2, 1000, day(15)).unwrap();

        assert_eq!(db.get_daily_water(1, day(15)).unwrap(), 500);
        assert_eq!(db.get_daily_water(1, day(16)).unwrap(), 500);
        assert_eq!(db.get_daily_water_entries(1, day(15)).unwrap().len(), 2);
    }

    #[test]
    fn test_workout_exercises_roundtrip() {
        let db = Database::open_in_memory().unwrap();
        let entry = db
            .add_workout(
                1,
                &NewWorkoutEntry {
                    date: day(15),
                    workout_type: "strength".to_string(),
                    exercises: vec!["squats".to_string(), "bench press".to_string()],
                    duration_min: 45,
                },
            )
            .unwrap();
        assert_eq!(entry.exercises, vec!["squats", "bench press"]);
        assert_eq!(entry.duration_min, 45);

        let day_workouts = db.get_daily_workouts(1, day(15)).unwrap();
        assert_eq!(day_workouts.len(), 1);
        assert_eq!(day_workouts[0].workout_type, "strength");
        assert!(db.get_daily_workouts(1, day(16)).unwrap().is_empty());
    }

    #[test]
    fn test_weight_history_newest_first() {
        let db = Database::open_in_memory().unwrap();
        db.add_weight(1, 80.0, day(10)).unwrap();
        db.add_weight(1, 79.5, day(12)).unwrap();
        db.add_weight(1, 79.0, day(11)).unwrap();
        db.add_weight(2, 60.0, day(13)).unwrap();

        let history = db.get_weight_history(1, None).unwrap();
        let dates: Vec<&str> = history.iter().map(|w| w.date.as_str()).collect();
        assert_eq!(dates, vec!["2024-01-12", "2024-01-11", "2024-01-10"]);

        let limited = db.get_weight_history(1, Some(2)).unwrap();
        assert_eq!(limited.len(), 2);

        let latest = db.get_latest_weight(1).unwrap().unwrap();
        assert!((latest.weight_kg - 79.5).abs() < f64::EPSILON);

        assert!(db.get_latest_weight(3).unwrap().is_none());
    }

    #[test]
    fn test_weight_same_day_appends() {
        let db = Database::open_in_memory().unwrap();
        db.add_weight(1, 80.0, day(10)).unwrap();
        db.add_weight(1, 79.8, day(10)).unwrap();

        let history = db.get_weight_history(1, None).unwrap();
        assert_eq!(history.len(), 2);
        // Later entry on the same date comes first
        assert!((history[0].weight_kg - 79.8).abs() < f64::EPSILON);
    }

    #[test]
    fn test_get_all_for_export() {
        let db = Database::open_in_memory().unwrap();
        db.add_meal(1, &sample_meal(day(16), 100)).unwrap();
        db.add_meal(1, &sample_meal(day(15), 200)).unwrap();
        db.add_water(1, 250, day(15)).unwrap();
        db.add_weight(1, 80.0, day(16)).unwrap();
        db.add_weight(1, 81.0, day(15)).unwrap();

        let meals = db.get_all_meals(1).unwrap();
        assert_eq!(meals[0].date, "2024-01-15");
        assert_eq!(db.get_all_water(1).unwrap().len(), 1);
        assert!(db.get_all_workouts(1).unwrap().is_empty());

        // Oldest first for export
        let weight = db.get_all_weight(1).unwrap();
        assert_eq!(weight[0].date, "2024-01-15");
    }

    #[test]
    fn test_reopen_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fitbot.db");
        {
            let db = Database::open(&path).unwrap();
            db.add_user(5, None, Some("Sam")).unwrap();
            db.add_water(5, 300, day(15)).unwrap();
        }
        let db = Database::open(&path).unwrap();
        assert_eq!(db.get_user(5).unwrap().unwrap().first_name.as_deref(), Some("Sam"));
        assert_eq!(db.get_daily_water(5, day(15)).unwrap(), 300);
    }
}
