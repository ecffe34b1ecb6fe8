//! Backend payload → canonical week.
//!
//! Every entry point takes a borrowed `serde_json::Value` and returns a fresh
//! structure; nothing here fails. Fragments of the wrong shape degrade to the
//! field's default instead of rejecting the payload.

use std::cmp::Ordering;

use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::{
    models::{
        Block, BlockItem, CardioSession, CardioType, DEFAULT_BLOCK_TITLE, DEFAULT_MEAL_TYPE,
        DisplayValue, Exercise, Meal, NutritionEntry, NutritionWeek, StructuredDay, Superset,
        Warmup, Week, WorkoutWeek,
    },
    types::{WeekDay, best_day_suggestion},
    utils::{array, count, extra_fields, is_truthy, opt_text, stringify, text},
};

const DAY_FIELDS: &[&str] = &[
    "title",
    "kcal",
    "coach_note",
    "scheduled_time",
    "warmup",
    "blocks",
];
const WARMUP_FIELDS: &[&str] = &["duration_min", "items"];
const EXERCISE_FIELDS: &[&str] = &["type", "name", "sets", "reps", "notes"];
const SUPERSET_FIELDS: &[&str] = &["type", "items"];
const MEAL_FIELDS: &[&str] = &[
    "type",
    "meal_type",
    "time",
    "items",
    "content",
    "day",
    "day_of_week",
];

/// The workout shapes the backend is known to send.
#[derive(Debug, PartialEq)]
pub enum WorkoutPayload<'a> {
    Missing,
    /// `{ mon: ..., tue: ..., ... }`, each day an exercise list or a
    /// structured day.
    DayKeyed(&'a Map<String, Value>),
    /// Flat `workout_days` / `workout_exercises` tables.
    Legacy {
        days: &'a [Value],
        exercises: &'a [Value],
    },
}

impl<'a> WorkoutPayload<'a> {
    pub fn classify(raw: &'a Value) -> Self {
        let Some(obj) = raw.as_object() else {
            return Self::Missing;
        };

        // Fetch results and the active-programs bundle carry the week one
        // level down.
        let nested = [
            obj.get("week"),
            obj.get("workout_program").and_then(|p| p.get("week")),
            obj.get("workout_week"),
        ];
        if let Some(week) = nested.into_iter().flatten().find_map(Value::as_object) {
            return Self::DayKeyed(week);
        }

        if obj.contains_key("workout_days") || obj.contains_key("workout_exercises") {
            return Self::Legacy {
                days: array(obj.get("workout_days")),
                exercises: array(obj.get("workout_exercises")),
            };
        }

        Self::DayKeyed(obj)
    }
}

/// Canonical workout week from any accepted payload shape. Every day is
/// either `None` or a structured day with at least one block.
pub fn normalize_workout_week(raw: &Value) -> WorkoutWeek {
    match WorkoutPayload::classify(raw) {
        WorkoutPayload::Missing => WorkoutWeek::default(),
        WorkoutPayload::DayKeyed(map) => {
            ignore_unknown_day_keys(map);
            Week::from_fn(|d| workout_day(map.get(d.key())))
        }
        WorkoutPayload::Legacy { days, exercises } => from_legacy_tables(days, exercises),
    }
}

fn ignore_unknown_day_keys(map: &Map<String, Value>) {
    for key in map.keys() {
        if !WeekDay::ALL.iter().any(|d| d.key() == key) {
            debug!(key = %key, "ignoring non-day key in week payload");
        }
    }
}

fn workout_day(v: Option<&Value>) -> Option<StructuredDay> {
    match v? {
        Value::Array(list) => Some(StructuredDay {
            blocks: vec![Block {
                title: DEFAULT_BLOCK_TITLE.to_string(),
                items: list
                    .iter()
                    .map(|x| match x.as_object() {
                        Some(o) => BlockItem::Exercise(exercise(o)),
                        None => {
                            debug!(item = %x, "reading non-object day entry as unnamed exercise");
                            BlockItem::Exercise(Exercise::default())
                        }
                    })
                    .collect(),
            }],
            ..StructuredDay::default()
        }),
        Value::Object(o) => Some(structured_day(o)),
        _ => None,
    }
}

/// Fills every missing field of a structured day with its default while
/// keeping everything already present.
pub fn structured_day(o: &Map<String, Value>) -> StructuredDay {
    StructuredDay {
        title: text(o.get("title")),
        kcal: DisplayValue::from_value(o.get("kcal")),
        coach_note: text(o.get("coach_note")),
        scheduled_time: text(o.get("scheduled_time")),
        warmup: warmup(o.get("warmup")),
        blocks: blocks(o.get("blocks")),
        extra: extra_fields(o, DAY_FIELDS),
    }
}

fn warmup(v: Option<&Value>) -> Warmup {
    let Some(o) = v.and_then(Value::as_object) else {
        return Warmup::default();
    };
    Warmup {
        duration_min: DisplayValue::from_value(o.get("duration_min")),
        items: exercises(o.get("items")),
        extra: extra_fields(o, WARMUP_FIELDS),
    }
}

fn blocks(v: Option<&Value>) -> Vec<Block> {
    let list = array(v);
    if list.is_empty() {
        return vec![Block::default()];
    }

    list.iter()
        .map(|b| Block {
            title: match b.get("title") {
                None | Some(Value::Null) => DEFAULT_BLOCK_TITLE.to_string(),
                t => text(t),
            },
            items: array(b.get("items")).iter().map(block_item).collect(),
        })
        .collect()
}

fn block_item(v: &Value) -> BlockItem {
    let Some(o) = v.as_object() else {
        return BlockItem::Other(v.clone());
    };
    match o.get("type").and_then(Value::as_str) {
        Some("exercise") => BlockItem::Exercise(exercise(o)),
        Some("superset") => BlockItem::Superset(Superset {
            items: exercises(o.get("items")),
            extra: extra_fields(o, SUPERSET_FIELDS),
        }),
        _ => BlockItem::Other(v.clone()),
    }
}

fn exercises(v: Option<&Value>) -> Vec<Exercise> {
    array(v)
        .iter()
        .filter_map(|x| {
            let o = x.as_object();
            if o.is_none() {
                debug!(item = %x, "dropping non-object exercise entry");
            }
            o
        })
        .map(exercise)
        .collect()
}

fn exercise(o: &Map<String, Value>) -> Exercise {
    Exercise {
        name: opt_text(o.get("name"))
            .or_else(|| opt_text(o.get("exercise_name")))
            .unwrap_or_default(),
        sets: count(o.get("sets")),
        reps: text(o.get("reps")),
        notes: text(o.get("notes")),
        extra: extra_fields(o, EXERCISE_FIELDS),
    }
}

fn from_legacy_tables(days: &[Value], exercises: &[Value]) -> WorkoutWeek {
    let mut day_ids: Vec<(&Value, WeekDay)> = Vec::new();
    for d in days {
        let name = text(d.get("day_of_week"));
        let Some(day) = WeekDay::from_name(&name) else {
            warn_unknown_day(&name, "workout day");
            continue;
        };
        match d.get("id").filter(|id| !id.is_null()) {
            Some(id) => day_ids.push((id, day)),
            None => debug!(day = %day, "skipping workout day row without an id"),
        }
    }

    let mut week = WorkoutWeek::default();
    for e in exercises {
        let Some(day_id) = e.get("workout_day_id").filter(|id| !id.is_null()) else {
            continue;
        };
        // Later rows with the same id win, like a map insert.
        let Some(day) = day_ids
            .iter()
            .rev()
            .find(|(id, _)| *id == day_id)
            .map(|(_, d)| *d)
        else {
            debug!(workout_day_id = %day_id, "exercise references an unmapped day");
            continue;
        };

        let slot = week.get_mut(day).get_or_insert_with(StructuredDay::default);
        if let Some(first) = slot.blocks.first_mut() {
            first.items.push(BlockItem::Exercise(Exercise {
                name: text(e.get("exercise_name")),
                sets: count(e.get("sets")),
                reps: text(e.get("reps")),
                notes: text(e.get("notes")),
                extra: Map::new(),
            }));
        }
    }
    week
}

fn warn_unknown_day(name: &str, what: &str) {
    if name.trim().is_empty() {
        debug!("dropping {what} without a day name");
        return;
    }
    match best_day_suggestion(name) {
        Some(suggestion) => {
            warn!(day = name, suggestion, "dropping {what}: unrecognized day name")
        }
        None => warn!(day = name, "dropping {what}: unrecognized day name"),
    }
}

/// The nutrition shapes the backend is known to send.
#[derive(Debug, PartialEq)]
pub enum NutritionPayload<'a> {
    Missing,
    DayKeyed(&'a Map<String, Value>),
    /// Flat meal rows; each applies to its `day`, or to every day without one.
    MealList(&'a [Value]),
}

impl<'a> NutritionPayload<'a> {
    pub fn classify(raw: &'a Value) -> Self {
        match raw {
            Value::Array(list) => Self::MealList(list),
            Value::Object(obj) => {
                if let Some(week) = obj.get("week").and_then(Value::as_object) {
                    return Self::DayKeyed(week);
                }
                if let Some(Value::Array(meals)) = obj.get("meals") {
                    return Self::MealList(meals);
                }
                if let Some(week) = obj
                    .get("nutrition_program")
                    .and_then(|p| p.get("week"))
                    .and_then(Value::as_object)
                {
                    return Self::DayKeyed(week);
                }
                Self::DayKeyed(obj)
            }
            _ => Self::Missing,
        }
    }
}

pub fn normalize_nutrition_week(raw: &Value) -> NutritionWeek {
    match NutritionPayload::classify(raw) {
        NutritionPayload::Missing => NutritionWeek::default(),
        NutritionPayload::DayKeyed(map) => {
            ignore_unknown_day_keys(map);
            Week::from_fn(|d| {
                sorted_by_order_index(array(map.get(d.key())))
                    .into_iter()
                    .filter_map(Value::as_object)
                    .map(meal)
                    .collect()
            })
        }
        NutritionPayload::MealList(rows) => from_meal_rows(rows),
    }
}

fn from_meal_rows(rows: &[Value]) -> NutritionWeek {
    let mut week = NutritionWeek::default();
    for row in sorted_by_order_index(rows) {
        let Some(o) = row.as_object() else {
            continue;
        };
        let day_name = opt_text(o.get("day")).or_else(|| opt_text(o.get("day_of_week")));
        match day_name {
            None => {
                let m = meal(o);
                for d in WeekDay::ALL {
                    week.get_mut(d).push(m.clone());
                }
            }
            Some(name) => match WeekDay::from_name(&name) {
                Some(d) => week.get_mut(d).push(meal(o)),
                None => warn_unknown_day(&name, "meal"),
            },
        }
    }
    week
}

fn order_index(v: &Value) -> Option<f64> {
    match v.get("order_index")? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Stable sort on `order_index`; rows without one go last.
fn sorted_by_order_index(rows: &[Value]) -> Vec<&Value> {
    let mut out: Vec<&Value> = rows.iter().collect();
    out.sort_by(|a, b| match (order_index(a), order_index(b)) {
        (Some(x), Some(y)) => x.total_cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
    out
}

fn meal(o: &Map<String, Value>) -> Meal {
    let items = match o.get("items") {
        Some(list @ Value::Array(_)) => parse_nutrition_content(list),
        _ => o
            .get("content")
            .map(parse_nutrition_content)
            .unwrap_or_default(),
    };
    Meal {
        kind: opt_text(o.get("meal_type"))
            .or_else(|| opt_text(o.get("type")))
            .unwrap_or_else(|| DEFAULT_MEAL_TYPE.to_string()),
        time: text(o.get("time")),
        items,
        extra: extra_fields(o, MEAL_FIELDS),
    }
}

/// Turns a raw meal `content` field into items. Priority: array, JSON
/// array text, newline-separated, comma-separated, single item.
pub fn parse_nutrition_content(content: &Value) -> Vec<NutritionEntry> {
    if !is_truthy(content) {
        return Vec::new();
    }
    match content {
        Value::Array(list) => list
            .iter()
            .map(|x| match x {
                Value::Object(o) => NutritionEntry::Item(o.clone()),
                other => NutritionEntry::Text(stringify(other)),
            })
            .collect(),
        Value::Object(o) => vec![NutritionEntry::Item(o.clone())],
        other => parse_nutrition_text(&stringify(other)),
    }
}

pub fn parse_nutrition_text(raw: &str) -> Vec<NutritionEntry> {
    let s = raw.trim();
    if s.is_empty() {
        return Vec::new();
    }

    if s.starts_with('[') {
        match serde_json::from_str::<Value>(s) {
            Ok(list @ Value::Array(_)) => return parse_nutrition_content(&list),
            Ok(_) => {}
            Err(e) => debug!("meal content looks like JSON but is not: {e}"),
        }
    }

    let split_on = |sep: char| -> Vec<NutritionEntry> {
        s.split(sep)
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(NutritionEntry::from)
            .collect()
    };

    if s.contains('\n') {
        split_on('\n')
    } else if s.contains(',') {
        split_on(',')
    } else {
        vec![NutritionEntry::from(s)]
    }
}

/// Cardio sessions from a bare list or a `{ sessions: [...] }` envelope.
pub fn normalize_cardio_sessions(raw: &Value) -> Vec<CardioSession> {
    let rows = match raw {
        Value::Array(list) => list.as_slice(),
        Value::Object(o) => array(o.get("sessions")),
        _ => &[],
    };
    rows.iter().filter_map(cardio_session).collect()
}

fn cardio_session(v: &Value) -> Option<CardioSession> {
    let o = v.as_object()?;
    let name = text(o.get("day_of_week"));
    let Some(day) = WeekDay::from_name(&name) else {
        warn_unknown_day(&name, "cardio session");
        return None;
    };
    Some(CardioSession {
        day_of_week: day,
        cardio_type: CardioType::from_wire(&text(o.get("cardio_type"))),
        duration_min: count(o.get("duration_min")),
        notes: text(o.get("notes")),
    })
}

/// One session per day, the last one given for a day winning, mon→sun.
pub fn dedupe_sessions_by_day(sessions: &[CardioSession]) -> Vec<CardioSession> {
    let mut by_day: Week<Option<&CardioSession>> = Week::default();
    for s in sessions {
        *by_day.get_mut(s.day_of_week) = Some(s);
    }
    by_day.iter().filter_map(|(_, s)| s.cloned()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn first_block_items(week: &WorkoutWeek, day: WeekDay) -> Vec<BlockItem> {
        week.get(day).as_ref().unwrap().blocks[0].items.clone()
    }

    #[test]
    fn missing_payload_yields_all_null_week() {
        let empty = WorkoutWeek::default();
        assert_eq!(normalize_workout_week(&Value::Null), empty);
        assert_eq!(normalize_workout_week(&json!("nonsense")), empty);
        assert_eq!(normalize_workout_week(&json!({})), empty);
        assert!(empty.iter().all(|(_, d)| d.is_none()));
    }

    #[test]
    fn legacy_tables_fill_the_first_block() {
        let raw = json!({
            "workout_days": [{"id": 1, "day_of_week": "Wednesday"}],
            "workout_exercises": [
                {"workout_day_id": 1, "exercise_name": "Squat", "sets": 4, "reps": "5"}
            ]
        });
        let week = normalize_workout_week(&raw);

        let wed = serde_json::to_value(&first_block_items(&week, WeekDay::Wed)[0]).unwrap();
        assert_eq!(
            wed,
            json!({"type": "exercise", "name": "Squat", "sets": 4, "reps": "5", "notes": ""})
        );
        for (day, slot) in week.iter() {
            if day != WeekDay::Wed {
                assert!(slot.is_none(), "{day} should be empty");
            }
        }
    }

    #[test]
    fn legacy_keeps_source_order_and_drops_unknown_days() {
        let raw = json!({
            "workout_days": [
                {"id": "a", "day_of_week": "MONDAY"},
                {"id": "b", "day_of_week": "Pazartesi"},
                {"id": null, "day_of_week": "Friday"}
            ],
            "workout_exercises": [
                {"workout_day_id": "a", "exercise_name": "Bench", "sets": "3", "reps": 8},
                {"workout_day_id": "b", "exercise_name": "Lost"},
                {"workout_day_id": "a", "exercise_name": "Row", "notes": "slow"},
                {"workout_day_id": 99, "exercise_name": "Orphan"}
            ]
        });
        let week = normalize_workout_week(&raw);
        let items = first_block_items(&week, WeekDay::Mon);

        let names: Vec<_> = items
            .iter()
            .map(|i| match i {
                BlockItem::Exercise(e) => (e.name.as_str(), e.sets, e.reps.as_str()),
                _ => panic!("expected exercise"),
            })
            .collect();
        assert_eq!(names, vec![("Bench", 3, "8"), ("Row", 0, "")]);
        assert!(week.fri.is_none());
        assert_eq!(week.iter().filter(|(_, d)| d.is_some()).count(), 1);
    }

    #[test]
    fn array_days_become_a_single_workout_block() {
        let raw = json!({
            "mon": [{"name": "Leg Press", "sets": 4, "reps": "10"}, {"name": "Curl"}],
            "tue": [],
            "wed": "rest",
            "funday": [{"name": "Ignored"}]
        });
        let week = normalize_workout_week(&raw);

        let mon = week.mon.as_ref().unwrap();
        assert_eq!(mon.blocks.len(), 1);
        assert_eq!(mon.blocks[0].title, DEFAULT_BLOCK_TITLE);
        assert_eq!(
            mon.blocks[0].items[1],
            BlockItem::Exercise(Exercise::new("Curl", 0, ""))
        );

        // An empty list is still a scheduled day.
        let tue = week.tue.as_ref().unwrap();
        assert_eq!(tue.blocks, vec![Block::default()]);
        assert!(week.wed.is_none());
    }

    #[test]
    fn array_days_keep_non_object_entries_as_unnamed_exercises() {
        let week = normalize_workout_week(&json!({"thu": ["Burpees", {"name": "Jump"}, null]}));
        let items = first_block_items(&week, WeekDay::Thu);

        assert_eq!(
            items,
            vec![
                BlockItem::Exercise(Exercise::default()),
                BlockItem::Exercise(Exercise::new("Jump", 0, "")),
                BlockItem::Exercise(Exercise::default()),
            ]
        );
    }

    #[test]
    fn legacy_day_without_id_is_skipped_after_name_resolution() {
        let raw = json!({
            "workout_days": [
                {"id": null, "day_of_week": "Sunday"},
                {"day_of_week": "Someday"}
            ],
            "workout_exercises": [{"workout_day_id": null, "exercise_name": "Stray"}]
        });
        assert_eq!(normalize_workout_week(&raw), WorkoutWeek::default());
    }

    #[test]
    fn structured_day_gets_missing_warmup_without_losing_fields() {
        let raw = json!({
            "thu": {
                "title": "Push",
                "kcal": 450,
                "scheduled_time": "18:00",
                "focus": "chest",
                "blocks": [{"title": "Main", "items": [
                    {"type": "exercise", "name": "Bench", "sets": 5, "reps": "5"}
                ]}]
            }
        });
        let week = normalize_workout_week(&raw);
        let thu = week.thu.as_ref().unwrap();

        assert_eq!(thu.warmup, Warmup::default());
        assert_eq!(
            serde_json::to_value(&thu.warmup).unwrap(),
            json!({"duration_min": "", "items": []})
        );
        assert_eq!(thu.title, "Push");
        assert_eq!(thu.kcal.to_string(), "450");
        assert_eq!(thu.scheduled_time, "18:00");
        assert_eq!(thu.extra.get("focus"), Some(&json!("chest")));
        assert_eq!(thu.blocks[0].title, "Main");
    }

    #[test]
    fn malformed_blocks_are_forced_into_shape() {
        let raw = json!({
            "sat": {
                "warmup": {"duration_min": "10", "items": "jog"},
                "blocks": [
                    {"items": {"not": "a list"}},
                    null,
                    {"title": "Finisher", "items": [{"type": "circuit", "rounds": 3}, 7]}
                ]
            },
            "sun": {"blocks": []}
        });
        let week = normalize_workout_week(&raw);
        let sat = week.sat.as_ref().unwrap();

        assert!(sat.warmup.items.is_empty());
        assert_eq!(sat.warmup.duration_min.to_string(), "10");
        assert_eq!(sat.blocks.len(), 3);
        assert_eq!(sat.blocks[0].title, DEFAULT_BLOCK_TITLE);
        assert!(sat.blocks[0].items.is_empty());
        assert_eq!(sat.blocks[1], Block::default());
        assert_eq!(
            sat.blocks[2].items,
            vec![
                BlockItem::Other(json!({"type": "circuit", "rounds": 3})),
                BlockItem::Other(json!(7)),
            ]
        );

        assert_eq!(week.sun.as_ref().unwrap().blocks, vec![Block::default()]);
    }

    #[test]
    fn envelopes_are_unwrapped() {
        let latest = json!({"program_id": 7, "week": {"fri": [{"name": "Deadlift"}]}});
        assert!(normalize_workout_week(&latest).fri.is_some());

        let active = json!({"workout_program": {"id": 3, "week": {"mon": {"title": "A"}}}});
        assert_eq!(normalize_workout_week(&active).mon.unwrap().title, "A");
    }

    #[test]
    fn every_normalized_day_has_a_block() {
        let raw = json!({
            "mon": {}, "tue": [], "wed": {"blocks": "x"}, "thu": null,
            "fri": {"blocks": [{}]}, "sat": 3, "sun": {"warmup": null}
        });
        let week = normalize_workout_week(&raw);
        for (_, day) in week.iter() {
            if let Some(day) = day {
                assert!(!day.blocks.is_empty());
            }
        }
    }

    #[test]
    fn normalizing_is_idempotent() {
        let inputs = [
            json!({
                "mon": [{"name": "Squat", "sets": 5, "reps": 5, "tempo": "3-1-1"}],
                "wed": {
                    "title": "Pull",
                    "kcal": "~400",
                    "coach_note": "Easy",
                    "warmup": {
                        "duration_min": 8,
                        "items": [{"exercise_name": "Band pull", "sets": 2}]
                    },
                    "blocks": [{"title": "B1", "items": [
                        {
                            "type": "superset",
                            "label": "A",
                            "items": [{"name": "A", "sets": 3, "reps": "10"}]
                        },
                        {"type": "exercise", "name": "", "exercise_name": "Row"},
                        {"type": "mystery"},
                        null
                    ]}]
                }
            }),
            json!({
                "workout_days": [{"id": 1, "day_of_week": "tue"}],
                "workout_exercises": [{"workout_day_id": 1, "exercise_name": "Dip"}]
            }),
            Value::Null,
        ];

        for raw in inputs {
            let once = normalize_workout_week(&raw);
            let twice = normalize_workout_week(&serde_json::to_value(&once).unwrap());
            assert_eq!(twice, once);
        }
    }

    #[test]
    fn input_is_not_mutated() {
        let raw = json!({"mon": [{"name": "Squat"}]});
        let before = raw.clone();
        let _ = normalize_workout_week(&raw);
        let _ = normalize_nutrition_week(&raw);
        assert_eq!(raw, before);
    }

    fn t(s: &str) -> NutritionEntry {
        NutritionEntry::from(s)
    }

    #[test]
    fn content_parsing_follows_priority_chain() {
        let parse = |v: Value| parse_nutrition_content(&v);

        assert_eq!(parse(json!("a\nb")), vec![t("a"), t("b")]);
        assert_eq!(parse(json!("a,b")), vec![t("a"), t("b")]);
        assert_eq!(parse(json!(r#"["x","y"]"#)), vec![t("x"), t("y")]);
        assert_eq!(parse(json!("single")), vec![t("single")]);
        // Newline wins over comma.
        assert_eq!(
            parse(json!("rice, beans\n chicken ")),
            vec![t("rice, beans"), t("chicken")]
        );
        // Broken JSON falls through to the comma split.
        assert_eq!(parse(json!("[oats, milk")), vec![t("[oats"), t("milk")]);
    }

    #[test]
    fn content_arrays_keep_objects_and_stringify_the_rest() {
        let items = parse_nutrition_content(&json!([
            {"name_en": "Oats", "grams": 80},
            42,
            null,
            "banana"
        ]));
        assert!(matches!(&items[0], NutritionEntry::Item(o) if o["grams"] == json!(80)));
        assert_eq!(items[1], t("42"));
        assert_eq!(items[2], t("null"));
        assert_eq!(items[3], t("banana"));

        assert!(parse_nutrition_content(&json!(null)).is_empty());
        assert!(parse_nutrition_content(&json!("")).is_empty());
        assert!(parse_nutrition_content(&json!(0)).is_empty());
    }

    #[test]
    fn meal_rows_spread_to_days_and_sort_by_order_index() {
        let raw = json!({"meals": [
            {"meal_type": "Dinner", "order_index": 3, "content": "Salmon\nRice"},
            {"meal_type": "Snack", "content": "Nuts"},
            {"meal_type": "Breakfast", "time": "08:00", "order_index": 1, "content": "Oats, Milk"},
            {"meal_type": "Cheat", "day": "Saturday", "order_index": 2, "content": "Pizza"},
            {"meal_type": "Ghost", "day": "Someday", "content": "?"}
        ]});
        let week = normalize_nutrition_week(&raw);

        let kinds = |d: WeekDay| -> Vec<String> {
            week.get(d).iter().map(|m| m.kind.clone()).collect()
        };
        assert_eq!(kinds(WeekDay::Mon), vec!["Breakfast", "Dinner", "Snack"]);
        assert_eq!(kinds(WeekDay::Sat), vec!["Breakfast", "Cheat", "Dinner", "Snack"]);
        assert_eq!(week.mon[0].time, "08:00");
        assert_eq!(week.mon[0].items, vec![t("Oats"), t("Milk")]);
        assert_eq!(week.mon[0].extra.get("order_index"), Some(&json!(1)));
    }

    #[test]
    fn day_keyed_nutrition_week_passes_through() {
        let raw = json!({"week": {
            "mon": [
                {"type": "Lunch", "items": [
                    "Chicken bowl",
                    {"name_tr": "Pilav", "grams": 150, "calories": 200}
                ]},
                "garbage"
            ],
            "tue": "nope"
        }});
        let week = normalize_nutrition_week(&raw);
        assert_eq!(week.mon.len(), 1);
        assert_eq!(week.mon[0].kind, "Lunch");
        assert_eq!(week.mon[0].items.len(), 2);
        assert!(week.tue.is_empty());
        assert_eq!(normalize_nutrition_week(&Value::Null), NutritionWeek::default());
    }

    #[test]
    fn cardio_sessions_resolve_days_and_defaults() {
        let raw = json!({"sessions": [
            {"day_of_week": "mon", "cardio_type": "HIIT", "duration_min": "20"},
            {"day_of_week": "Tuesday", "duration_min": 35.5, "notes": "zone 2"},
            {"day_of_week": "someday", "cardio_type": "Yüzme"},
            {"day_of_week": "mon", "cardio_type": "Bisiklet", "duration_min": 45}
        ]});
        let sessions = normalize_cardio_sessions(&raw);
        assert_eq!(sessions.len(), 3);
        assert_eq!(sessions[0].cardio_type, CardioType::Hiit);
        assert_eq!(sessions[0].duration_min, 20);
        assert_eq!(sessions[1].cardio_type, CardioType::Running);
        assert_eq!(sessions[1].duration_min, 35);

        let deduped = dedupe_sessions_by_day(&sessions);
        assert_eq!(deduped.len(), 2);
        assert_eq!(deduped[0].day_of_week, WeekDay::Mon);
        assert_eq!(deduped[0].cardio_type, CardioType::Cycling);
        assert_eq!(deduped[1].day_of_week, WeekDay::Tue);
    }

    #[test]
    fn classify_picks_one_shape() {
        let legacy = json!({"workout_days": [], "workout_exercises": []});
        assert!(matches!(
            WorkoutPayload::classify(&legacy),
            WorkoutPayload::Legacy { .. }
        ));
        assert_eq!(WorkoutPayload::classify(&json!([])), WorkoutPayload::Missing);
        assert!(matches!(
            NutritionPayload::classify(&json!([])),
            NutritionPayload::MealList(_)
        ));
        assert_eq!(NutritionPayload::classify(&json!(1)), NutritionPayload::Missing);
    }
}
