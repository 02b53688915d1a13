use std::fmt;
use std::str::FromStr;

use anyhow::bail;
use serde::Serialize;

use crate::models::MealEntry;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FoodCategory {
    Proteins,
    Carbs,
    Fats,
    Vegetables,
    Fruits,
}

impl FoodCategory {
    pub const ALL: [FoodCategory; 5] = [
        FoodCategory::Proteins,
        FoodCategory::Carbs,
        FoodCategory::Fats,
        FoodCategory::Vegetables,
        FoodCategory::Fruits,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            FoodCategory::Proteins => "proteins",
            FoodCategory::Carbs => "carbs",
            FoodCategory::Fats => "fats",
            FoodCategory::Vegetables => "vegetables",
            FoodCategory::Fruits => "fruits",
        }
    }
}

impl fmt::Display for FoodCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FoodCategory {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        match FoodCategory::ALL.iter().find(|c| c.as_str() == lower) {
            Some(c) => Ok(*c),
            None => {
                let all: Vec<&str> = FoodCategory::ALL.iter().map(|c| c.as_str()).collect();
                bail!("Invalid food category '{s}'. Must be one of: {}", all.join(", "))
            }
        }
    }
}

/// Macro-nutrient profile of one food, per 100 g.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct FoodRecord {
    pub name: &'static str,
    pub category: FoodCategory,
    pub aliases: &'static [&'static str],
    pub calories_per_100g: f64,
    pub protein_per_100g: f64,
    pub carbs_per_100g: f64,
    pub fat_per_100g: f64,
}

const fn food(
    category: FoodCategory,
    name: &'static str,
    aliases: &'static [&'static str],
    calories: f64,
    protein: f64,
    carbs: f64,
    fat: f64,
) -> FoodRecord {
    FoodRecord {
        name,
        category,
        aliases,
        calories_per_100g: calories,
        protein_per_100g: protein,
        carbs_per_100g: carbs,
        fat_per_100g: fat,
    }
}

/// The built-in food table, grouped by category. Order matters for
/// partial-name matches: the first record that matches wins, so more common
/// foods come first within a group.
pub static FOODS: &[FoodRecord] = &[
    food(FoodCategory::Proteins, "chicken breast", &["chicken"], 165.0, 31.0, 0.0, 3.6),
    food(FoodCategory::Proteins, "turkey breast", &["turkey"], 135.0, 30.0, 0.0, 1.0),
    food(FoodCategory::Proteins, "salmon", &[], 208.0, 20.0, 0.0, 13.0),
    food(FoodCategory::Proteins, "cod", &["white fish"], 82.0, 18.0, 0.0, 0.7),
    food(FoodCategory::Proteins, "tuna", &[], 132.0, 28.0, 0.0, 1.0),
    food(FoodCategory::Proteins, "egg", &["eggs"], 155.0, 13.0, 1.1, 11.0),
    food(FoodCategory::Proteins, "cottage cheese", &["curd"], 98.0, 11.0, 3.4, 4.3),
    food(FoodCategory::Proteins, "greek yogurt", &["yogurt"], 59.0, 10.0, 3.6, 0.4),
    food(FoodCategory::Proteins, "milk", &[], 42.0, 3.4, 5.0, 1.0),
    food(FoodCategory::Proteins, "cheddar cheese", &["cheese"], 403.0, 25.0, 1.3, 33.0),
    food(FoodCategory::Carbs, "oatmeal", &["oats", "porridge"], 389.0, 17.0, 66.0, 6.9),
    food(FoodCategory::Carbs, "buckwheat", &[], 343.0, 13.0, 72.0, 3.4),
    food(FoodCategory::Carbs, "brown rice", &[], 111.0, 2.6, 23.0, 0.9),
    food(FoodCategory::Carbs, "white rice", &["rice"], 130.0, 2.7, 28.0, 0.3),
    food(FoodCategory::Carbs, "potato", &["potatoes"], 77.0, 2.0, 17.0, 0.1),
    food(FoodCategory::Carbs, "whole wheat bread", &["bread"], 247.0, 13.0, 41.0, 3.4),
    food(FoodCategory::Carbs, "lentils", &[], 116.0, 9.0, 20.0, 0.4),
    food(FoodCategory::Fats, "almonds", &["nuts"], 579.0, 21.0, 22.0, 50.0),
    food(FoodCategory::Fats, "walnuts", &[], 654.0, 15.0, 14.0, 65.0),
    food(FoodCategory::Fats, "avocado", &[], 160.0, 2.0, 8.5, 14.7),
    food(FoodCategory::Fats, "olive oil", &[], 884.0, 0.0, 0.0, 100.0),
    food(FoodCategory::Fats, "sunflower seeds", &["seeds"], 584.0, 21.0, 20.0, 51.0),
    food(FoodCategory::Vegetables, "broccoli", &[], 34.0, 2.8, 7.0, 0.4),
    food(FoodCategory::Vegetables, "spinach", &[], 23.0, 2.9, 3.6, 0.4),
    food(FoodCategory::Vegetables, "carrot", &["carrots"], 41.0, 0.9, 10.0, 0.2),
    food(FoodCategory::Vegetables, "cucumber", &["cucumbers"], 15.0, 0.7, 3.6, 0.1),
    food(FoodCategory::Vegetables, "tomato", &["tomatoes"], 18.0, 0.9, 3.9, 0.2),
    food(FoodCategory::Fruits, "apple", &["apples"], 52.0, 0.3, 14.0, 0.2),
    food(FoodCategory::Fruits, "banana", &["bananas"], 89.0, 1.1, 23.0, 0.3),
    food(FoodCategory::Fruits, "orange", &["oranges"], 47.0, 0.9, 12.0, 0.1),
    food(FoodCategory::Fruits, "blueberries", &["berries"], 57.0, 0.7, 14.0, 0.3),
];

/// Nutrition of a concrete quantity of one food.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Nutrition {
    pub food_name: &'static str,
    pub grams: f64,
    pub calories: i64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
}

fn normalize(query: &str) -> String {
    query.trim().to_lowercase().replace('_', " ")
}

fn round1(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}

impl FoodRecord {
    fn names(&self) -> impl Iterator<Item = &'static str> {
        std::iter::once(self.name).chain(self.aliases.iter().copied())
    }

    /// Scale the per-100 g profile to `grams`. Calories are rounded to whole
    /// kcal, macros to one decimal.
    #[must_use]
    pub fn scale(&self, grams: f64) -> Nutrition {
        let factor = grams / 100.0;
        Nutrition {
            food_name: self.name,
            grams,
            calories: (self.calories_per_100g * factor).round() as i64,
            protein: round1(self.protein_per_100g * factor),
            carbs: round1(self.carbs_per_100g * factor),
            fat: round1(self.fat_per_100g * factor),
        }
    }
}

/// Find a food by name.
///
/// An exact name or alias match wins. Otherwise the first record (in table
/// order) whose name or alias contains the query, or is contained in it, is
/// returned, so "grilled salmon" and "salm" both resolve to salmon.
#[must_use]
pub fn lookup_food(query: &str) -> Option<&'static FoodRecord> {
    let q = normalize(query);
    if q.is_empty() {
        return None;
    }
    FOODS
        .iter()
        .find(|f| f.names().any(|n| n == q))
        .or_else(|| {
            FOODS
                .iter()
                .find(|f| f.names().any(|n| n.contains(&q) || q.contains(n)))
        })
}

/// Nutrition for `grams` of the named food, or `None` if the food is unknown.
/// Zero and negative quantities are scaled like any other.
#[must_use]
pub fn calculate(food_name: &str, grams: f64) -> Option<Nutrition> {
    lookup_food(food_name).map(|f| f.scale(grams))
}

/// All foods whose name or alias contains `query`, in table order.
#[must_use]
pub fn search_foods(query: &str) -> Vec<&'static FoodRecord> {
    let q = normalize(query);
    FOODS
        .iter()
        .filter(|f| f.names().any(|n| n.contains(&q)))
        .collect()
}

/// Foods in one category, in table order.
#[must_use]
pub fn foods_in_category(category: FoodCategory) -> Vec<&'static FoodRecord> {
    FOODS.iter().filter(|f| f.category == category).collect()
}

/// Summed macros of a set of meal entries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct DailyTotals {
    pub calories: i64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
    pub meal_count: usize,
}

impl DailyTotals {
    pub fn from_meals<'a>(meals: impl IntoIterator<Item = &'a MealEntry>) -> Self {
        meals.into_iter().fold(Self::default(), |mut acc, m| {
            acc.calories += m.calories;
            acc.protein += m.protein;
            acc.carbs += m.carbs;
            acc.fat += m.fat;
            acc.meal_count += 1;
            acc
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meal(calories: i64, protein: f64, carbs: f64, fat: f64) -> MealEntry {
        MealEntry {
            id: 0,
            uuid: String::new(),
            user_id: 1,
            meal_type: "lunch".to_string(),
            food_name: "test".to_string(),
            grams: 100.0,
            calories,
            protein,
            carbs,
            fat,
            date: "2024-01-15".to_string(),
            created_at: String::new(),
        }
    }

    #[test]
    fn test_oatmeal_100g() {
        let n = calculate("oatmeal", 100.0).unwrap();
        assert_eq!(n.food_name, "oatmeal");
        assert_eq!(n.calories, 389);
        assert!((n.protein - 17.0).abs() < 1e-9);
        assert!((n.carbs - 66.0).abs() < 1e-9);
        assert!((n.fat - 6.9).abs() < 1e-9);
    }

    #[test]
    fn test_oatmeal_50g() {
        let n = calculate("oatmeal", 50.0).unwrap();
        // 194.5 rounds away from zero
        assert_eq!(n.calories, 195);
        assert!((n.protein - 8.5).abs() < 1e-9);
        assert!((n.carbs - 33.0).abs() < 1e-9);
        // 3.45 to one decimal
        assert!((n.fat - 3.45).abs() <= 0.05 + 1e-9);
    }

    #[test]
    #[allow(clippy::cast_precision_loss)]
    fn test_scaling_is_linear_for_every_food() {
        for f in FOODS {
            let base = f.scale(100.0);
            for grams in [0.0, 1.0, 37.0, 50.0, 150.0, 250.0, 1000.0] {
                let n = f.scale(grams);
                let k = grams / 100.0;
                let expected_cal = base.calories as f64 * k;
                assert!(
                    (n.calories as f64 - expected_cal).abs() <= 0.5 + 1e-9,
                    "{} {grams}g calories",
                    f.name
                );
                assert!((n.protein - base.protein * k).abs() <= 0.05 + 1e-9);
                assert!((n.carbs - base.carbs * k).abs() <= 0.05 + 1e-9);
                assert!((n.fat - base.fat * k).abs() <= 0.05 + 1e-9);
            }
        }
    }

    #[test]
    fn test_unknown_food_not_found() {
        for grams in [0.0, 100.0, 250.0, -10.0] {
            assert!(calculate("pizza", grams).is_none());
        }
        assert!(calculate("", 100.0).is_none());
        assert!(calculate("   ", 100.0).is_none());
    }

    #[test]
    fn test_zero_and_negative_grams_are_scaled() {
        let zero = calculate("banana", 0.0).unwrap();
        assert_eq!(zero.calories, 0);
        assert!(zero.protein.abs() < 1e-9);

        let neg = calculate("banana", -100.0).unwrap();
        assert_eq!(neg.calories, -89);
    }

    #[test]
    fn test_lookup_case_and_underscores() {
        assert_eq!(lookup_food("OATMEAL").unwrap().name, "oatmeal");
        assert_eq!(lookup_food("  Chicken_Breast ").unwrap().name, "chicken breast");
    }

    #[test]
    fn test_lookup_alias() {
        assert_eq!(lookup_food("oats").unwrap().name, "oatmeal");
        assert_eq!(lookup_food("rice").unwrap().name, "white rice");
    }

    #[test]
    fn test_lookup_partial() {
        // Query contained in a name
        assert_eq!(lookup_food("salm").unwrap().name, "salmon");
        // Name contained in the query
        assert_eq!(lookup_food("grilled salmon").unwrap().name, "salmon");
        // Exact match beats an earlier partial match
        assert_eq!(lookup_food("brown rice").unwrap().name, "brown rice");
    }

    #[test]
    fn test_table_names_are_normalized_and_unique() {
        let mut seen = std::collections::HashSet::new();
        for f in FOODS {
            for n in f.names() {
                assert_eq!(n, normalize(n), "{n} is not normalized");
                assert!(seen.insert(n), "duplicate food name {n}");
            }
        }
    }

    #[test]
    fn test_search_foods() {
        let names: Vec<_> = search_foods("rice").iter().map(|f| f.name).collect();
        assert_eq!(names, vec!["brown rice", "white rice"]);
        assert!(search_foods("pizza").is_empty());
        assert_eq!(search_foods("").len(), FOODS.len());
    }

    #[test]
    fn test_daily_totals_empty() {
        let totals = DailyTotals::from_meals(&[]);
        assert_eq!(totals, DailyTotals::default());
        assert_eq!(totals.calories, 0);
        assert_eq!(totals.meal_count, 0);
    }

    #[test]
    fn test_daily_totals_sum() {
        let meals = vec![
            meal(100, 1.5, 10.0, 0.5),
            meal(200, 2.5, 20.0, 1.0),
            meal(300, 3.0, 30.0, 1.5),
        ];
        let totals = DailyTotals::from_meals(&meals);
        assert_eq!(totals.calories, 600);
        assert!((totals.protein - 7.0).abs() < 1e-9);
        assert!((totals.carbs - 60.0).abs() < 1e-9);
        assert!((totals.fat - 3.0).abs() < 1e-9);
        assert_eq!(totals.meal_count, 3);
    }

    #[test]
    fn test_daily_totals_order_independent() {
        let meals = vec![
            meal(389, 17.0, 66.0, 6.9),
            meal(165, 31.0, 0.0, 3.6),
            meal(52, 0.3, 14.0, 0.2),
        ];
        let forward = DailyTotals::from_meals(&meals);
        let reversed = DailyTotals::from_meals(meals.iter().rev());
        let rotated = DailyTotals::from_meals(meals[1..].iter().chain(&meals[..1]));

        for other in [reversed, rotated] {
            assert_eq!(forward.calories, other.calories);
            assert!((forward.protein - other.protein).abs() < 1e-9);
            assert!((forward.carbs - other.carbs).abs() < 1e-9);
            assert!((forward.fat - other.fat).abs() < 1e-9);
        }
    }

    #[test]
    fn test_every_category_has_foods() {
        for c in FoodCategory::ALL {
            assert!(!foods_in_category(c).is_empty(), "{c} is empty");
        }
        let total: usize = FoodCategory::ALL
            .iter()
            .map(|c| foods_in_category(*c).len())
            .sum();
        assert_eq!(total, FOODS.len());
    }

    #[test]
    fn test_foods_in_category() {
        let fruits: Vec<_> = foods_in_category(FoodCategory::Fruits)
            .iter()
            .map(|f| f.name)
            .collect();
        assert_eq!(fruits, vec!["apple", "banana", "orange", "blueberries"]);
        assert_eq!(lookup_food("salmon").unwrap().category, FoodCategory::Proteins);
    }

    #[test]
    fn test_parse_category() {
        assert_eq!("Fats".parse::<FoodCategory>().unwrap(), FoodCategory::Fats);
        assert_eq!(" carbs ".parse::<FoodCategory>().unwrap(), FoodCategory::Carbs);
        assert!("sweets".parse::<FoodCategory>().is_err());
        assert_eq!(FoodCategory::Vegetables.to_string(), "vegetables");
    }
}
