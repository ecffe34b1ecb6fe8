//! Typed views over the backend's fetch results and write bodies.

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::{
    models::{CardioSession, NutritionWeek, WorkoutWeek},
    normalize::{normalize_cardio_sessions, normalize_nutrition_week, normalize_workout_week},
    utils::{array, opt_text},
};

/// Program ids arrive as numbers or strings; both are kept as text.
fn program_id(v: Option<&Value>) -> Option<String> {
    opt_text(v)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LatestWorkout {
    pub program_id: Option<String>,
    pub week: WorkoutWeek,
    pub generated_by: Option<String>,
}

impl LatestWorkout {
    /// `None` unless the payload carries a `week`.
    pub fn from_value(raw: &Value) -> Option<Self> {
        let week = raw.get("week").filter(|w| !w.is_null())?;
        Some(Self {
            program_id: program_id(raw.get("program_id")),
            week: normalize_workout_week(week),
            generated_by: opt_text(raw.get("generated_by")).or_else(|| opt_text(raw.get("source"))),
        })
    }

    pub fn is_ai_generated(&self) -> bool {
        self.generated_by.as_deref() == Some("ai")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LatestNutrition {
    pub program_id: Option<String>,
    pub week: NutritionWeek,
    pub generated_by: Option<String>,
    pub supplements: Vec<Value>,
}

impl LatestNutrition {
    pub fn from_value(raw: &Value) -> Option<Self> {
        let week = raw.get("week").filter(|w| !w.is_null())?;
        Some(Self {
            program_id: program_id(raw.get("program_id")),
            week: normalize_nutrition_week(week),
            generated_by: opt_text(raw.get("generated_by")),
            supplements: array(raw.get("supplements")).to_vec(),
        })
    }

    pub fn is_ai_generated(&self) -> bool {
        self.generated_by.as_deref() == Some("ai")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LatestCardio {
    pub program_id: String,
    pub sessions: Vec<CardioSession>,
    pub is_active: bool,
}

impl LatestCardio {
    /// `None` unless the payload names a program.
    pub fn from_value(raw: &Value) -> Option<Self> {
        Some(Self {
            program_id: program_id(raw.get("program_id"))?,
            sessions: normalize_cardio_sessions(raw.get("sessions").unwrap_or(&Value::Null)),
            is_active: raw.get("is_active").and_then(Value::as_bool).unwrap_or(false),
        })
    }
}

/// The student's currently assigned programs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActivePrograms {
    pub workout_program_id: Option<String>,
    pub nutrition_program_id: Option<String>,
    pub cardio_program_id: Option<String>,
    pub workout: WorkoutWeek,
    pub nutrition: NutritionWeek,
    pub supplements: Vec<Value>,
}

impl ActivePrograms {
    pub fn from_value(raw: &Value) -> Self {
        let workout_program = raw.get("workout_program");
        let nutrition_program = raw.get("nutrition_program");
        Self {
            workout_program_id: workout_program.and_then(|p| {
                program_id(p.get("id")).or_else(|| program_id(p.get("program_id")))
            }),
            nutrition_program_id: nutrition_program.and_then(|p| program_id(p.get("id"))),
            cardio_program_id: raw.get("cardio_program").and_then(|p| program_id(p.get("id"))),
            workout: normalize_workout_week(raw),
            nutrition: normalize_nutrition_week(raw),
            supplements: array(nutrition_program.and_then(|p| p.get("supplements"))).to_vec(),
        }
    }
}

/// Badge shown on a program card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ProgramStatus {
    Active,
    Draft { ai_generated: bool },
    Empty,
}

impl ProgramStatus {
    /// The latest program is active only when it *is* the assigned one;
    /// otherwise it is a draft if it has anything in it.
    pub fn classify(
        latest_id: Option<&str>,
        active_id: Option<&str>,
        has_content: bool,
        ai_generated: bool,
    ) -> Self {
        match (latest_id, active_id) {
            (Some(l), Some(a)) if l == a => Self::Active,
            _ if has_content => Self::Draft { ai_generated },
            _ => Self::Empty,
        }
    }

    pub fn for_cardio(latest: Option<&LatestCardio>) -> Self {
        match latest {
            Some(c) if c.is_active => Self::Active,
            Some(_) => Self::Draft {
                ai_generated: false,
            },
            None => Self::Empty,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SaveWorkoutRequest<'a> {
    pub week: &'a WorkoutWeek,
}

#[derive(Debug, Serialize)]
pub struct SaveNutritionRequest<'a> {
    pub week: &'a NutritionWeek,
    pub supplements: &'a [Value],
}

#[derive(Debug, Serialize)]
pub struct SaveCardioRequest<'a> {
    pub sessions: &'a [CardioSession],
}

#[derive(Debug, Error, PartialEq)]
pub enum TargetsError {
    #[error("missing target `{0}`: all four macro targets are required")]
    Missing(&'static str),
}

/// Body for asking the backend to generate a nutrition program.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenerateNutritionRequest {
    pub target_calories: f64,
    pub target_protein: f64,
    pub target_carbs: f64,
    pub target_fat: f64,
}

impl GenerateNutritionRequest {
    /// A zero target counts as missing.
    pub fn new(
        calories: Option<f64>,
        protein: Option<f64>,
        carbs: Option<f64>,
        fat: Option<f64>,
    ) -> Result<Self, TargetsError> {
        let req = |v: Option<f64>, name| v.filter(|x| *x != 0.0).ok_or(TargetsError::Missing(name));
        Ok(Self {
            target_calories: req(calories, "calories")?,
            target_protein: req(protein, "protein")?,
            target_carbs: req(carbs, "carbs")?,
            target_fat: req(fat, "fat")?,
        })
    }
}
