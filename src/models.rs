use std::fmt::Display;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Number, Value};

use crate::{normalize, types::WeekDay};

/// Title given to the block a day gets when it has none.
pub const DEFAULT_BLOCK_TITLE: &str = "Workout Block";
pub const DEFAULT_MEAL_TYPE: &str = "Meal";

/// Seven day slots, serialized as an object keyed `mon`..`sun` in that order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Week<T> {
    pub mon: T,
    pub tue: T,
    pub wed: T,
    pub thu: T,
    pub fri: T,
    pub sat: T,
    pub sun: T,
}

impl<T> Week<T> {
    pub fn from_fn(mut f: impl FnMut(WeekDay) -> T) -> Self {
        Self {
            mon: f(WeekDay::Mon),
            tue: f(WeekDay::Tue),
            wed: f(WeekDay::Wed),
            thu: f(WeekDay::Thu),
            fri: f(WeekDay::Fri),
            sat: f(WeekDay::Sat),
            sun: f(WeekDay::Sun),
        }
    }

    pub fn get(&self, day: WeekDay) -> &T {
        match day {
            WeekDay::Mon => &self.mon,
            WeekDay::Tue => &self.tue,
            WeekDay::Wed => &self.wed,
            WeekDay::Thu => &self.thu,
            WeekDay::Fri => &self.fri,
            WeekDay::Sat => &self.sat,
            WeekDay::Sun => &self.sun,
        }
    }

    pub fn get_mut(&mut self, day: WeekDay) -> &mut T {
        match day {
            WeekDay::Mon => &mut self.mon,
            WeekDay::Tue => &mut self.tue,
            WeekDay::Wed => &mut self.wed,
            WeekDay::Thu => &mut self.thu,
            WeekDay::Fri => &mut self.fri,
            WeekDay::Sat => &mut self.sat,
            WeekDay::Sun => &mut self.sun,
        }
    }

    /// Days in mon→sun order.
    pub fn iter(&self) -> impl Iterator<Item = (WeekDay, &T)> {
        WeekDay::ALL.into_iter().map(move |d| (d, self.get(d)))
    }
}

pub type WorkoutWeek = Week<Option<StructuredDay>>;
pub type NutritionWeek = Week<Vec<Meal>>;

// Deserializing goes through the normalizer, so any payload shape the
// backend sends yields a canonical week instead of an error.
impl<'de> Deserialize<'de> for Week<Option<StructuredDay>> {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        let raw = Value::deserialize(d)?;
        Ok(normalize::normalize_workout_week(&raw))
    }
}

impl<'de> Deserialize<'de> for Week<Vec<Meal>> {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        let raw = Value::deserialize(d)?;
        Ok(normalize::normalize_nutrition_week(&raw))
    }
}

/// A loosely typed display field the backend sends as text or as a number.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum DisplayValue {
    Text(String),
    Number(Number),
}

impl Default for DisplayValue {
    fn default() -> Self {
        Self::Text(String::new())
    }
}

impl DisplayValue {
    pub fn from_value(v: Option<&Value>) -> Self {
        match v {
            Some(Value::String(s)) => Self::Text(s.clone()),
            Some(Value::Number(n)) => Self::Number(n.clone()),
            _ => Self::default(),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Text(s) if s.is_empty())
    }
}

impl Display for DisplayValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text(s) => write!(f, "{s}"),
            Self::Number(n) => write!(f, "{n}"),
        }
    }
}

/// One scheduled workout day: warm-up plus ordered blocks.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StructuredDay {
    pub title: String,
    pub kcal: DisplayValue,
    pub coach_note: String,
    pub scheduled_time: String,
    pub warmup: Warmup,
    /// Never empty once normalized.
    pub blocks: Vec<Block>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for StructuredDay {
    fn default() -> Self {
        Self {
            title: String::new(),
            kcal: DisplayValue::default(),
            coach_note: String::new(),
            scheduled_time: String::new(),
            warmup: Warmup::default(),
            blocks: vec![Block::default()],
            extra: Map::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Warmup {
    pub duration_min: DisplayValue,
    pub items: Vec<Exercise>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Block {
    pub title: String,
    pub items: Vec<BlockItem>,
}

impl Default for Block {
    fn default() -> Self {
        Self {
            title: DEFAULT_BLOCK_TITLE.to_string(),
            items: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Exercise {
    pub name: String,
    pub sets: u32,
    pub reps: String,
    pub notes: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Exercise {
    pub fn new(name: impl Into<String>, sets: u32, reps: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sets,
            reps: reps.into(),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Superset {
    pub items: Vec<Exercise>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// An entry in a workout block. Items whose `type` is neither `exercise`
/// nor `superset` are carried through untouched.
#[derive(Debug, Clone, PartialEq)]
pub enum BlockItem {
    Exercise(Exercise),
    Superset(Superset),
    Other(Value),
}

#[derive(Serialize)]
struct Tagged<'a, T> {
    #[serde(rename = "type")]
    kind: &'static str,
    #[serde(flatten)]
    inner: &'a T,
}

impl Serialize for BlockItem {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Exercise(e) => Tagged {
                kind: "exercise",
                inner: e,
            }
            .serialize(s),
            Self::Superset(ss) => Tagged {
                kind: "superset",
                inner: ss,
            }
            .serialize(s),
            Self::Other(v) => v.serialize(s),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Meal {
    #[serde(rename = "type")]
    pub kind: String,
    pub time: String,
    pub items: Vec<NutritionEntry>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A meal item: free text, or a structured food record (`name_tr`,
/// `name_en`, `grams`, `calories`, ...) passed through as-is.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum NutritionEntry {
    Text(String),
    Item(Map<String, Value>),
}

impl From<&str> for NutritionEntry {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CardioType {
    Running,
    Walking,
    Cycling,
    Hiit,
    JumpRope,
    Swimming,
    Other(String),
}

impl CardioType {
    pub fn from_wire(s: &str) -> Self {
        match s.trim() {
            "" | "Koşu" => Self::Running,
            "Yürüyüş" => Self::Walking,
            "Bisiklet" => Self::Cycling,
            "HIIT" => Self::Hiit,
            "İp Atlama" => Self::JumpRope,
            "Yüzme" => Self::Swimming,
            other => Self::Other(other.to_string()),
        }
    }

    /// The string the backend stores.
    pub fn wire(&self) -> &str {
        match self {
            Self::Running => "Koşu",
            Self::Walking => "Yürüyüş",
            Self::Cycling => "Bisiklet",
            Self::Hiit => "HIIT",
            Self::JumpRope => "İp Atlama",
            Self::Swimming => "Yüzme",
            Self::Other(s) => s,
        }
    }
}

impl Serialize for CardioType {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(self.wire())
    }
}

impl<'de> Deserialize<'de> for CardioType {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        let s = String::deserialize(d)?;
        Ok(Self::from_wire(&s))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardioSession {
    pub day_of_week: WeekDay,
    pub cardio_type: CardioType,
    pub duration_min: u32,
    #[serde(default)]
    pub notes: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn week_serializes_in_day_order_with_nulls() {
        let week: WorkoutWeek = Week::default();
        let out = serde_json::to_string(&week).unwrap();
        assert_eq!(
            out,
            r#"{"mon":null,"tue":null,"wed":null,"thu":null,"fri":null,"sat":null,"sun":null}"#
        );
    }

    #[test]
    fn block_items_carry_their_type_tag() {
        let item = BlockItem::Exercise(Exercise::new("Squat", 4, "5"));
        assert_eq!(
            serde_json::to_value(&item).unwrap(),
            json!({"type": "exercise", "name": "Squat", "sets": 4, "reps": "5", "notes": ""})
        );

        let other = BlockItem::Other(json!({"type": "circuit", "rounds": 3}));
        assert_eq!(
            serde_json::to_value(&other).unwrap(),
            json!({"type": "circuit", "rounds": 3})
        );
    }

    #[test]
    fn cardio_types_keep_unknown_wire_strings() {
        assert_eq!(CardioType::from_wire("HIIT"), CardioType::Hiit);
        assert_eq!(CardioType::from_wire(""), CardioType::Running);
        assert_eq!(CardioType::from_wire("Rowing").wire(), "Rowing");
        assert_eq!(
            serde_json::to_value(CardioType::JumpRope).unwrap(),
            json!("İp Atlama")
        );
    }

    #[test]
    fn weeks_deserialize_through_the_normalizer() {
        let workout: WorkoutWeek = serde_json::from_value(json!({
            "workout_days": [{"id": 3, "day_of_week": "Tuesday"}],
            "workout_exercises": [{"workout_day_id": 3, "exercise_name": "Dip", "sets": 3}]
        }))
        .unwrap();
        let tue = workout.tue.as_ref().unwrap();
        assert_eq!(
            tue.blocks[0].items,
            vec![BlockItem::Exercise(Exercise::new("Dip", 3, ""))]
        );
        assert!(workout.mon.is_none());

        let nutrition: NutritionWeek =
            serde_json::from_value(json!([{"meal_type": "Snack", "content": "Apple"}])).unwrap();
        assert_eq!(nutrition.sun[0].kind, "Snack");
        assert_eq!(nutrition.sun[0].items, vec![NutritionEntry::from("Apple")]);

        let garbage: WorkoutWeek = serde_json::from_value(json!(42)).unwrap();
        assert_eq!(garbage, WorkoutWeek::default());
    }

    #[test]
    fn cardio_sessions_read_back_their_own_output() {
        let session: CardioSession = serde_json::from_value(json!({
            "day_of_week": "sat",
            "cardio_type": "Bisiklet",
            "duration_min": 45
        }))
        .unwrap();
        assert_eq!(session.day_of_week, WeekDay::Sat);
        assert_eq!(session.cardio_type, CardioType::Cycling);
        assert_eq!(session.notes, "");
    }

    #[test]
    fn display_values_render_text_or_number() {
        assert_eq!(DisplayValue::from_value(Some(&json!(450))).to_string(), "450");
        assert_eq!(DisplayValue::from_value(Some(&json!("~500"))).to_string(), "~500");
        assert!(DisplayValue::from_value(Some(&json!(null))).is_empty());
    }
}
