use anyhow::Result;

use fitbot_core::service::FitnessService;

use super::helpers::{no_neg_zero, parse_date, progress_bar};

pub(crate) fn cmd_progress(
    svc: &FitnessService,
    user_id: i64,
    date: Option<String>,
    json: bool,
) -> Result<()> {
    let date = parse_date(date)?;
    let p = svc.daily_progress(user_id, date)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&p)?);
        return Ok(());
    }

    let t = &p.totals;
    let g = &p.goals;
    let cal_pct = p.calorie_progress_pct();
    let water_pct = p.water_progress_pct();

    println!("=== Progress {} ===\n", p.date);
    println!(
        "  Calories {} {} / {} kcal ({cal_pct:.0}%)",
        progress_bar(cal_pct),
        t.calories,
        g.calories
    );
    let remaining = p.calories_remaining();
    if remaining >= 0 {
        println!("           {remaining} kcal remaining");
    } else {
        println!("           {} kcal over goal", -remaining);
    }
    println!(
        "  Water    {} {} / {} ml ({water_pct:.0}%)",
        progress_bar(water_pct),
        p.water_ml,
        g.water_ml
    );
    println!(
        "  Macros   P:{:.1}/{}g C:{:.1}/{}g F:{:.1}/{}g",
        no_neg_zero(t.protein),
        g.protein_g,
        no_neg_zero(t.carbs),
        g.carbs_g,
        no_neg_zero(t.fat),
        g.fat_g
    );
    println!(
        "  Workouts {} ({} min)",
        p.workout_count, p.workout_minutes
    );
    if let Some(kg) = p.latest_weight_kg {
        println!("  Weight   {kg:.1} kg (latest)");
    }
    Ok(())
}
