use anyhow::{Result, bail};
use std::process;

use fitbot_core::models::{Goals, UpdateGoals, User};
use fitbot_core::service::FitnessService;

use super::helpers::json_error;

pub(crate) fn cmd_user_start(
    svc: &FitnessService,
    user_id: i64,
    username: Option<&str>,
    first_name: Option<&str>,
    json: bool,
) -> Result<()> {
    let existed = svc.get_user(user_id)?.is_some();
    let user = svc.register_user(user_id, username, first_name)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&user)?);
        return Ok(());
    }

    let name = display_name(&user);
    if existed {
        println!("Welcome back, {name}! (user {user_id})");
    } else {
        println!("Welcome, {name}! Registered user {user_id}.");
    }
    print_goals(&user.goals);
    Ok(())
}

pub(crate) fn cmd_user_show(svc: &FitnessService, user_id: i64, json: bool) -> Result<()> {
    let Some(user) = svc.get_user(user_id)? else {
        let msg = format!("User {user_id} is not registered");
        if json {
            println!("{}", json_error(&msg));
        } else {
            eprintln!("{msg}");
        }
        process::exit(2);
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&user)?);
        return Ok(());
    }

    println!("User {} ({})", user.user_id, display_name(&user));
    if let Some(ref username) = user.username {
        println!("  Username: @{username}");
    }
    println!("  Since:    {}", user.created_at);
    print_goals(&user.goals);
    Ok(())
}

pub(crate) fn cmd_user_goals(
    svc: &FitnessService,
    user_id: i64,
    update: &UpdateGoals,
    json: bool,
) -> Result<()> {
    if update.is_empty() {
        bail!("Nothing to change. Pass at least one of --calories, --water, --protein, --carbs, --fat");
    }
    let user = svc.update_goals(user_id, update)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&user.goals)?);
    } else {
        println!("Goals updated for user {user_id}.");
        print_goals(&user.goals);
    }
    Ok(())
}

fn display_name(user: &User) -> &str {
    user.first_name
        .as_deref()
        .or(user.username.as_deref())
        .unwrap_or("friend")
}

fn print_goals(goals: &Goals) {
    println!("  Daily goals:");
    println!("    Calories: {} kcal", goals.calories);
    println!("    Water:    {} ml", goals.water_ml);
    println!(
        "    Macros:   P:{}g C:{}g F:{}g",
        goals.protein_g, goals.carbs_g, goals.fat_g
    );
}
