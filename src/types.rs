use once_cell::sync::Lazy;
use std::{
    collections::BTreeMap,
    fmt::Display,
    fs,
    path::Path,
    str::FromStr,
};
use strsim::jaro_winkler;

use anyhow::{Context, Result, anyhow};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ValueEnum, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum WeekDay {
    Mon,
    Tue,
    Wed,
    Thu,
    Fri,
    Sat,
    Sun,
}

impl WeekDay {
    /// Every day in display order.
    pub const ALL: [WeekDay; 7] = [
        Self::Mon,
        Self::Tue,
        Self::Wed,
        Self::Thu,
        Self::Fri,
        Self::Sat,
        Self::Sun,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Self::Mon => "mon",
            Self::Tue => "tue",
            Self::Wed => "wed",
            Self::Thu => "thu",
            Self::Fri => "fri",
            Self::Sat => "sat",
            Self::Sun => "sun",
        }
    }

    /// Resolves a free-text day name ("Wednesday", "WED", "wed") by
    /// case-insensitive prefix. Returns `None` for anything else.
    pub fn from_name<S: AsRef<str>>(name: S) -> Option<WeekDay> {
        let s = name.as_ref().trim().to_lowercase();
        Self::ALL.into_iter().find(|d| s.starts_with(d.key()))
    }

    pub fn label(self, lang: Lang) -> &'static str {
        match lang {
            Lang::En => match self {
                Self::Mon => "Mon",
                Self::Tue => "Tue",
                Self::Wed => "Wed",
                Self::Thu => "Thu",
                Self::Fri => "Fri",
                Self::Sat => "Sat",
                Self::Sun => "Sun",
            },
            Lang::Tr => match self {
                Self::Mon => "Pzt",
                Self::Tue => "Sal",
                Self::Wed => "Çar",
                Self::Thu => "Per",
                Self::Fri => "Cum",
                Self::Sat => "Cmt",
                Self::Sun => "Paz",
            },
        }
    }
}

impl Display for WeekDay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}

pub static DAY_NAMES: Lazy<Vec<(&'static str, WeekDay)>> = Lazy::new(|| {
    vec![
        ("monday", WeekDay::Mon),
        ("tuesday", WeekDay::Tue),
        ("wednesday", WeekDay::Wed),
        ("thursday", WeekDay::Thu),
        ("friday", WeekDay::Fri),
        ("saturday", WeekDay::Sat),
        ("sunday", WeekDay::Sun),
    ]
});

/// Return the closest full day name for a name that failed to resolve,
/// if similarity ≥ 0.80 *and* clearly better than the runner-up.
pub fn best_day_suggestion(input: &str) -> Option<&'static str> {
    let inp = input.trim().to_lowercase();
    if inp.is_empty() {
        return None;
    }

    let mut scores: Vec<(&'static str, f64)> = DAY_NAMES
        .iter()
        .map(|(name, _)| (*name, jaro_winkler(&inp, name)))
        .collect();

    // Highest score first.
    scores.sort_by(|a, b| b.1.total_cmp(&a.1));

    let (best, best_score) = scores[0];
    let second_score = scores.get(1).map(|(_, s)| *s).unwrap_or(0.0);

    const MIN_SCORE: f64 = 0.80;
    const GAP: f64 = 0.02;

    if best_score >= MIN_SCORE && best_score - second_score >= GAP {
        Some(best)
    } else {
        None
    }
}

/// Label language for summaries. Normalized data is language-neutral.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Lang {
    #[default]
    En,
    Tr,
}

impl FromStr for Lang {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "en" => Ok(Self::En),
            "tr" => Ok(Self::Tr),
            other => Err(anyhow!("unknown language `{other}` (expected `en` or `tr`)")),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFmt {
    Pretty,
    Json,
}

/// Prints `data` as JSON, or runs `pretty` for the coloured rendering.
pub fn emit<T: Serialize, F: FnOnce()>(fmt: OutputFmt, data: &T, pretty: F) {
    match fmt {
        OutputFmt::Json => match serde_json::to_string_pretty(data) {
            Ok(s) => println!("{s}"),
            Err(e) => tracing::error!("failed to serialize output: {e}"),
        },
        OutputFmt::Pretty => pretty(),
    }
}

/// Flat key/value settings stored as TOML.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Config {
    pub map: BTreeMap<String, String>,
}

pub const CONFIG_KEYS: [&str; 3] = ["lang", "db_path", "day"];

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = fs::read_to_string(path)
            .with_context(|| format!("reading config `{}`", path.display()))?;
        toml::from_str(&raw).with_context(|| format!("parsing config `{}`", path.display()))
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)
                .with_context(|| format!("creating config directory `{}`", dir.display()))?;
        }
        let raw = toml::to_string(self)?;
        fs::write(path, raw).with_context(|| format!("writing config `{}`", path.display()))
    }

    pub fn lang(&self) -> Result<Option<Lang>> {
        self.map.get("lang").map(|s| s.parse()).transpose()
    }

    pub fn day(&self) -> Result<Option<WeekDay>> {
        match self.map.get("day") {
            None => Ok(None),
            Some(s) => WeekDay::from_name(s)
                .map(Some)
                .ok_or_else(|| anyhow!("config key `day` has unknown value `{s}`")),
        }
    }

    pub fn db_path(&self) -> Option<&str> {
        self.map.get("db_path").map(String::as_str)
    }
}
