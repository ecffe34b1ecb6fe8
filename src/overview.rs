use serde::Serialize;
use serde_json::Value;

use crate::{
    models::{CardioSession, NutritionWeek, WorkoutWeek},
    payload::{ActivePrograms, LatestCardio, LatestNutrition, LatestWorkout, ProgramStatus},
    summary::{nutrition_has_content, workout_has_content},
};

/// Everything the programs tab shows for one student, built from whichever
/// payloads are available.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProgramsOverview {
    pub workout_week: WorkoutWeek,
    pub workout_status: ProgramStatus,
    pub workout_program_id: Option<String>,
    pub nutrition_week: NutritionWeek,
    pub nutrition_status: ProgramStatus,
    pub nutrition_program_id: Option<String>,
    pub supplements: Vec<Value>,
    pub cardio_sessions: Vec<CardioSession>,
    pub cardio_status: ProgramStatus,
    pub cardio_program_id: Option<String>,
}

impl ProgramsOverview {
    /// The latest saved programs win; the active-programs bundle fills in
    /// whatever has no latest payload.
    pub fn assemble(
        active: Option<&Value>,
        workout: Option<&Value>,
        nutrition: Option<&Value>,
        cardio: Option<&Value>,
    ) -> Self {
        let active = active.map(ActivePrograms::from_value);
        let workout = workout.and_then(LatestWorkout::from_value);
        let nutrition = nutrition.and_then(LatestNutrition::from_value);
        let cardio = cardio.and_then(LatestCardio::from_value);

        let active_workout_id = active.as_ref().and_then(|a| a.workout_program_id.clone());
        let active_nutrition_id = active.as_ref().and_then(|a| a.nutrition_program_id.clone());

        let (workout_week, workout_program_id, workout_ai) = match workout {
            Some(w) => {
                let ai = w.is_ai_generated();
                (w.week, w.program_id, ai)
            }
            None => (
                active.as_ref().map(|a| a.workout.clone()).unwrap_or_default(),
                active_workout_id.clone(),
                false,
            ),
        };
        let workout_status = ProgramStatus::classify(
            workout_program_id.as_deref(),
            active_workout_id.as_deref(),
            workout_has_content(&workout_week),
            workout_ai,
        );

        let (nutrition_week, nutrition_program_id, supplements, nutrition_ai) = match nutrition {
            Some(n) => {
                let ai = n.is_ai_generated();
                (n.week, n.program_id, n.supplements, ai)
            }
            None => match &active {
                Some(a) => (
                    a.nutrition.clone(),
                    active_nutrition_id.clone(),
                    a.supplements.clone(),
                    false,
                ),
                None => (NutritionWeek::default(), None, Vec::new(), false),
            },
        };
        let nutrition_status = ProgramStatus::classify(
            nutrition_program_id.as_deref(),
            active_nutrition_id.as_deref(),
            nutrition_has_content(&nutrition_week),
            nutrition_ai,
        );

        let cardio_status = ProgramStatus::for_cardio(cardio.as_ref());
        let (cardio_sessions, cardio_program_id) = match cardio {
            Some(c) => (c.sessions, Some(c.program_id)),
            None => (
                Vec::new(),
                active.as_ref().and_then(|a| a.cardio_program_id.clone()),
            ),
        };

        Self {
            workout_week,
            workout_status,
            workout_program_id,
            nutrition_week,
            nutrition_status,
            nutrition_program_id,
            supplements,
            cardio_sessions,
            cardio_status,
            cardio_program_id,
        }
    }
}
