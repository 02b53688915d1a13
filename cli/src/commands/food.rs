use anyhow::Result;
use std::process;

use fitbot_core::nutrition::{self, FOODS, FoodCategory, FoodRecord};

use super::helpers::{json_error, parse_grams, print_food_table};

pub(crate) fn cmd_food_list(search: Option<&str>, category: Option<&str>, json: bool) -> Result<()> {
    let category = category.map(str::parse::<FoodCategory>).transpose()?;
    let foods = filter_foods(search, category);

    if json {
        println!("{}", serde_json::to_string_pretty(&foods)?);
        return Ok(());
    }

    if foods.is_empty() {
        eprintln!("No foods found.");
        process::exit(2);
    }

    print_food_table(&foods);
    Ok(())
}

pub(crate) fn cmd_food_lookup(food: &str, grams: &str, json: bool) -> Result<()> {
    let grams = parse_grams(grams)?;
    let Some(n) = nutrition::calculate(food, grams) else {
        let msg = format!("Food '{food}' not found. Try `fitbot food list`");
        if json {
            println!("{}", json_error(&msg));
        } else {
            eprintln!("{msg}");
        }
        process::exit(2);
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&n)?);
    } else {
        println!(
            "{} ({:.0}g): {} kcal | P:{:.1}g C:{:.1}g F:{:.1}g",
            n.food_name, n.grams, n.calories, n.protein, n.carbs, n.fat
        );
    }
    Ok(())
}

fn filter_foods(search: Option<&str>, category: Option<FoodCategory>) -> Vec<&'static FoodRecord> {
    let foods: Vec<&'static FoodRecord> = match search {
        Some(q) => nutrition::search_foods(q),
        None => FOODS.iter().collect(),
    };
    match category {
        Some(c) => foods.into_iter().filter(|f| f.category == c).collect(),
        None => foods,
    }
}
