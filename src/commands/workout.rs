use anyhow::Result;
use colored::Colorize;
use fithub::{
    models::WorkoutWeek,
    normalize::normalize_workout_week,
    payload::SaveWorkoutRequest,
    summary::{DayCard, EmptyState, summarize_workout_week, workout_has_content},
    types::{Lang, emit},
};

use super::{Ctx, print_card, read_json};
use crate::cli::WorkoutCmd;

pub fn print_days(cards: &[DayCard], week: &WorkoutWeek, lang: Lang) {
    if cards.is_empty() {
        let empty = EmptyState::from_content(workout_has_content(week));
        println!("  {}", empty.message(lang).dimmed());
        return;
    }
    for card in cards {
        print_card(&card.title, &card.lines, "");
    }
}

pub async fn handle(cmd: WorkoutCmd, ctx: &Ctx) -> Result<()> {
    match cmd {
        WorkoutCmd::Normalize { input, request } => {
            let week = normalize_workout_week(&read_json(&input.file)?);
            // always JSON, regardless of --json
            let out = if request {
                serde_json::to_string_pretty(&SaveWorkoutRequest { week: &week })?
            } else {
                serde_json::to_string_pretty(&week)?
            };
            println!("{out}");
        }

        WorkoutCmd::Show { input } => {
            let week = normalize_workout_week(&read_json(&input.file)?);
            let cards = summarize_workout_week(&week, ctx.lang);
            emit(ctx.fmt, &cards, || {
                println!("{}", "Workout week:".cyan().bold());
                print_days(&cards, &week, ctx.lang);
            });
        }
    }

    Ok(())
}
