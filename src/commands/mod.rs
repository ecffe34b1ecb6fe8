use std::{
    fs,
    io::{self, Read},
    path::PathBuf,
};

use anyhow::{Context, Result};
use chrono::{Datelike, Local, Weekday};
use colored::Colorize;
use fithub::types::{Lang, OutputFmt, WeekDay};
use serde_json::Value;

pub mod cardio;
pub mod config;
pub mod nutrition;
pub mod student;
pub mod workout;

/// Settings resolved from flags and config, shared by every command.
pub struct Ctx {
    pub fmt: OutputFmt,
    pub lang: Lang,
    pub day: Option<WeekDay>,
    pub db_path: PathBuf,
}

impl Ctx {
    /// `--day`, then config `day`, then today.
    pub fn day_or_today(&self, flag: Option<WeekDay>) -> WeekDay {
        flag.or(self.day).unwrap_or_else(today)
    }
}

pub fn config_path() -> Result<PathBuf> {
    dirs::config_dir()
        .map(|d| d.join("fithub").join("config.toml"))
        .context("Could not determine config directory")
}

fn today() -> WeekDay {
    match Local::now().weekday() {
        Weekday::Mon => WeekDay::Mon,
        Weekday::Tue => WeekDay::Tue,
        Weekday::Wed => WeekDay::Wed,
        Weekday::Thu => WeekDay::Thu,
        Weekday::Fri => WeekDay::Fri,
        Weekday::Sat => WeekDay::Sat,
        Weekday::Sun => WeekDay::Sun,
    }
}

/// Reads a JSON payload from `file`, or stdin for `-`.
pub fn read_json(file: &str) -> Result<Value> {
    let raw = if file == "-" {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .context("reading payload from stdin")?;
        buf
    } else {
        fs::read_to_string(file).with_context(|| format!("cannot open file `{file}`"))?
    };
    serde_json::from_str(&raw).with_context(|| format!("`{file}` is not valid JSON"))
}

/// Prints a card header followed by its lines, or a dimmed placeholder.
pub fn print_card(title: &str, lines: &[String], empty: &str) {
    println!("{}", title.cyan().bold());
    if lines.is_empty() {
        println!("  {}", empty.dimmed());
    }
    for line in lines {
        println!("  • {line}");
    }
}
