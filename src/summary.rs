//! Canonical week → read-only display cards.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::{
    models::{
        BlockItem, CardioSession, CardioType, Exercise, NutritionEntry, NutritionWeek,
        StructuredDay, WorkoutWeek,
    },
    types::{Lang, WeekDay},
};

/// Meals shown per day on the nutrition card.
pub const MEALS_PER_CARD: usize = 3;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayCard {
    pub key: WeekDay,
    pub title: String,
    pub lines: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MealCard {
    pub key: String,
    pub title: String,
    pub lines: Vec<String>,
}

struct Labels {
    unnamed: &'static str,
    superset: &'static str,
    food: &'static str,
    minutes: &'static str,
}

fn labels(lang: Lang) -> Labels {
    match lang {
        Lang::En => Labels {
            unnamed: "Unnamed",
            superset: "[Superset] ",
            food: "Food",
            minutes: "min",
        },
        Lang::Tr => Labels {
            unnamed: "İsimsiz",
            superset: "[Süperset] ",
            food: "Besin",
            minutes: "dk",
        },
    }
}

fn exercise_line(name: &str, e: &Exercise) -> String {
    let base = format!("{} {}x{}", name, e.sets, e.reps).trim().to_string();
    if e.notes.is_empty() {
        base
    } else {
        format!("{} • {}", base, e.notes)
    }
}

/// Flattens a day into summary lines: warm-up first, then each block's
/// exercises and superset members in order.
pub fn workout_day_lines(day: &StructuredDay, lang: Lang) -> Vec<String> {
    let l = labels(lang);
    let named = |e: &Exercise| -> String {
        let name = if e.name.is_empty() { l.unnamed } else { e.name.as_str() };
        exercise_line(name, e)
    };

    // Warm-up entries without a name are skipped rather than placeholdered.
    let mut lines: Vec<String> = day
        .warmup
        .items
        .iter()
        .filter(|e| !e.name.is_empty())
        .map(|e| exercise_line(&e.name, e))
        .collect();

    for block in &day.blocks {
        for item in &block.items {
            match item {
                BlockItem::Exercise(e) => lines.push(named(e)),
                BlockItem::Superset(s) => lines.extend(
                    s.items
                        .iter()
                        .map(|e| format!("{}{}", l.superset, named(e))),
                ),
                BlockItem::Other(_) => {}
            }
        }
    }
    lines
}

/// One card per day with at least one line, mon→sun.
pub fn summarize_workout_week(week: &WorkoutWeek, lang: Lang) -> Vec<DayCard> {
    week.iter()
        .filter_map(|(key, day)| {
            let day = day.as_ref()?;
            let lines = workout_day_lines(day, lang);
            if lines.is_empty() {
                return None;
            }
            let title = if day.scheduled_time.is_empty() {
                key.label(lang).to_string()
            } else {
                format!("{} {}", key.label(lang), day.scheduled_time)
            };
            Some(DayCard { key, title, lines })
        })
        .collect()
}

/// True iff some day renders at least one line. Callers use this to tell
/// "no program" apart from "program without exercises".
pub fn workout_has_content(week: &WorkoutWeek) -> bool {
    week.iter().any(|(_, day)| {
        day.as_ref()
            .is_some_and(|d| !workout_day_lines(d, Lang::default()).is_empty())
    })
}

fn json_text(v: Option<&Value>) -> String {
    match v {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => "0".to_string(),
    }
}

fn food_line(item: &Map<String, Value>, lang: Lang) -> String {
    let name = ["name_tr", "name_en", "name"]
        .iter()
        .find_map(|k| item.get(*k).and_then(Value::as_str).filter(|s| !s.is_empty()))
        .unwrap_or(labels(lang).food);
    format!(
        "{} {}g • {} kcal",
        name,
        json_text(item.get("grams")),
        json_text(item.get("calories"))
    )
}

pub fn nutrition_item_line(item: &NutritionEntry, lang: Lang) -> String {
    match item {
        NutritionEntry::Text(s) => s.clone(),
        NutritionEntry::Item(o) => food_line(o, lang),
    }
}

/// Up to [`MEALS_PER_CARD`] meal cards for `day`, in stored order.
pub fn summarize_nutrition_week(
    week: &NutritionWeek,
    day: WeekDay,
    lang: Lang,
) -> Vec<MealCard> {
    week.get(day)
        .iter()
        .take(MEALS_PER_CARD)
        .enumerate()
        .map(|(idx, meal)| MealCard {
            key: format!("{}-{}", meal.kind, idx),
            title: if meal.time.is_empty() {
                meal.kind.clone()
            } else {
                format!("{} {}", meal.kind, meal.time)
            },
            lines: meal
                .items
                .iter()
                .map(|i| nutrition_item_line(i, lang))
                .filter(|s| !s.is_empty())
                .collect(),
        })
        .collect()
}

/// True iff any day holds a meal, even one without items. A program of
/// empty meals is still a draft, not "no program".
pub fn nutrition_has_content(week: &NutritionWeek) -> bool {
    week.iter().any(|(_, meals)| !meals.is_empty())
}

pub fn cardio_type_label(t: &CardioType, lang: Lang) -> &str {
    match (lang, t) {
        (_, CardioType::Other(s)) => s,
        (Lang::Tr, known) => known.wire(),
        (Lang::En, CardioType::Running) => "Running",
        (Lang::En, CardioType::Walking) => "Walking",
        (Lang::En, CardioType::Cycling) => "Cycling",
        (Lang::En, CardioType::Hiit) => "HIIT",
        (Lang::En, CardioType::JumpRope) => "Jump rope",
        (Lang::En, CardioType::Swimming) => "Swimming",
    }
}

pub fn cardio_lines(sessions: &[CardioSession], lang: Lang) -> Vec<String> {
    let l = labels(lang);
    sessions
        .iter()
        .map(|s| {
            format!(
                "{} • {} • {} {}",
                s.day_of_week.label(lang),
                cardio_type_label(&s.cardio_type, lang),
                s.duration_min,
                l.minutes
            )
        })
        .collect()
}

/// What to show when a card has no lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptyState {
    /// Nothing has been programmed yet.
    NoProgram,
    /// A program exists, but this view of it has nothing to list.
    NothingToShow,
}

impl EmptyState {
    pub fn from_content(has_content: bool) -> Self {
        if has_content {
            Self::NothingToShow
        } else {
            Self::NoProgram
        }
    }

    pub fn message(self, lang: Lang) -> &'static str {
        match (self, lang) {
            (Self::NoProgram, Lang::En) => "No program yet.",
            (Self::NoProgram, Lang::Tr) => "Henüz program yok.",
            (Self::NothingToShow, Lang::En) => "A program exists but has nothing to show here.",
            (Self::NothingToShow, Lang::Tr) => {
                "Program mevcut ancak burada gösterilecek öğe yok."
            }
        }
    }
}
