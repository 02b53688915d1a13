use anyhow::Result;

use fitbot_core::service::FitnessService;

pub(crate) fn cmd_export(svc: &FitnessService, user_id: i64, csv: bool) -> Result<()> {
    if csv {
        print!("{}", svc.export_meals_csv(user_id)?);
    } else {
        let data = svc.export_user(user_id)?;
        println!("{}", serde_json::to_string_pretty(&data)?);
    }
    Ok(())
}
