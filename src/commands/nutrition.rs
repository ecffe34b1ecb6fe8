use anyhow::Result;
use colored::Colorize;
use fithub::{
    models::NutritionWeek,
    normalize::{normalize_nutrition_week, parse_nutrition_text},
    payload::{GenerateNutritionRequest, SaveNutritionRequest},
    summary::{
        EmptyState, MealCard, nutrition_has_content, nutrition_item_line,
        summarize_nutrition_week,
    },
    types::{Lang, WeekDay, emit},
    utils::array,
};

use super::{Ctx, print_card, read_json};
use crate::cli::NutritionCmd;

pub fn print_meals(cards: &[MealCard], week: &NutritionWeek, day: WeekDay, lang: Lang) {
    println!("{} {}", "Meals".cyan().bold(), format!("({})", day.label(lang)).dimmed());
    if cards.is_empty() {
        let empty = EmptyState::from_content(nutrition_has_content(week));
        println!("  {}", empty.message(lang).dimmed());
        return;
    }
    for card in cards {
        print_card(&card.title, &card.lines, "—");
    }
}

pub async fn handle(cmd: NutritionCmd, ctx: &Ctx) -> Result<()> {
    match cmd {
        NutritionCmd::Normalize { input, request } => {
            let raw = read_json(&input.file)?;
            let week = normalize_nutrition_week(&raw);
            let out = if request {
                serde_json::to_string_pretty(&SaveNutritionRequest {
                    week: &week,
                    supplements: array(raw.get("supplements")),
                })?
            } else {
                serde_json::to_string_pretty(&week)?
            };
            println!("{out}");
        }

        NutritionCmd::Show { input, day } => {
            let week = normalize_nutrition_week(&read_json(&input.file)?);
            let day = ctx.day_or_today(day);
            let cards = summarize_nutrition_week(&week, day, ctx.lang);
            emit(ctx.fmt, &cards, || print_meals(&cards, &week, day, ctx.lang));
        }

        NutritionCmd::Parse { content } => {
            let items = parse_nutrition_text(&content);
            emit(ctx.fmt, &items, || {
                if items.is_empty() {
                    println!("{}", "(no items)".dimmed());
                }
                for (i, item) in items.iter().enumerate() {
                    println!(
                        " {} • {}",
                        (i + 1).to_string().yellow(),
                        nutrition_item_line(item, ctx.lang)
                    );
                }
            });
        }

        NutritionCmd::Targets {
            calories,
            protein,
            carbs,
            fat,
        } => {
            let req = GenerateNutritionRequest::new(calories, protein, carbs, fat)?;
            println!("{}", serde_json::to_string_pretty(&req)?);
        }
    }

    Ok(())
}
