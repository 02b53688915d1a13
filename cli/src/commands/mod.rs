mod export;
mod food;
mod helpers;
mod meal;
mod progress;
mod user;
mod water;
mod weight;
mod workout;

pub(crate) use export::cmd_export;
pub(crate) use food::{cmd_food_list, cmd_food_lookup};
pub(crate) use helpers::require_user;
pub(crate) use meal::{cmd_meal_diary, cmd_meal_log};
pub(crate) use progress::cmd_progress;
pub(crate) use user::{cmd_user_goals, cmd_user_show, cmd_user_start};
pub(crate) use water::{cmd_water_add, cmd_water_show};
pub(crate) use weight::{cmd_weight_history, cmd_weight_log};
pub(crate) use workout::{cmd_workout_log, cmd_workout_show};
