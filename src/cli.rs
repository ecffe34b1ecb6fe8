use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use fithub::{
    storage::SnapshotKind,
    types::{Lang, WeekDay},
};

#[derive(Parser)]
#[command(name = "fithub", version, about = "Normalize and summarize weekly training programs")]
#[command(arg_required_else_help = true)]
pub struct Cli {
    /// Emit machine-readable JSON instead of colorful text.
    #[arg(global = true, long)]
    pub json: bool,

    /// Label language for summaries (overrides config `lang`)
    #[arg(global = true, long, value_enum)]
    pub lang: Option<Lang>,

    /// Snapshot database path (overrides config `db_path`)
    #[arg(global = true, long)]
    pub db: Option<PathBuf>,

    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Workout week payloads
    #[command(subcommand, visible_alias = "w")]
    Workout(WorkoutCmd),

    /// Nutrition week payloads
    #[command(subcommand, visible_alias = "n")]
    Nutrition(NutritionCmd),

    /// Cardio session payloads
    #[command(subcommand, visible_alias = "c")]
    Cardio(CardioCmd),

    /// Stored student snapshots
    #[command(subcommand, visible_alias = "s")]
    Student(StudentCmd),

    /// View or edit fithub config
    #[command(subcommand)]
    Config(ConfigCmd),
}

/// A JSON payload read from a file, or from stdin when given `-`.
#[derive(Args)]
pub struct Input {
    #[arg(value_name = "FILE", default_value = "-")]
    pub file: String,
}

#[derive(Subcommand)]
pub enum WorkoutCmd {
    /// Print the canonical seven-day week
    #[command(visible_alias = "norm")]
    Normalize {
        #[command(flatten)]
        input: Input,

        /// Wrap the week in the body used to save a program
        #[arg(long)]
        request: bool,
    },

    /// Show one card per programmed day
    #[command(visible_alias = "s")]
    Show {
        #[command(flatten)]
        input: Input,
    },
}

#[derive(Subcommand)]
pub enum NutritionCmd {
    /// Print the canonical seven-day meal week
    #[command(visible_alias = "norm")]
    Normalize {
        #[command(flatten)]
        input: Input,

        /// Wrap the week in the body used to save a program
        #[arg(long)]
        request: bool,
    },

    /// Show the meals of one day
    #[command(visible_alias = "s")]
    Show {
        #[command(flatten)]
        input: Input,

        /// Day to show (defaults to config `day`, then today)
        #[arg(short, long, value_enum)]
        day: Option<WeekDay>,
    },

    /// Split a free-text meal content string into items
    #[command(visible_alias = "p")]
    Parse {
        /// Raw content, e.g. "2 eggs, toast" or a JSON array
        content: String,
    },

    /// Build the request body for generating a program from macro targets
    Targets {
        #[arg(long)]
        calories: Option<f64>,

        #[arg(long)]
        protein: Option<f64>,

        #[arg(long)]
        carbs: Option<f64>,

        #[arg(long)]
        fat: Option<f64>,
    },
}

#[derive(Subcommand)]
pub enum CardioCmd {
    /// Print the canonical session list
    #[command(visible_alias = "norm")]
    Normalize {
        #[command(flatten)]
        input: Input,

        /// Keep only the last session given for each day
        #[arg(long)]
        dedupe: bool,

        /// Wrap the sessions in the body used to save a program
        #[arg(long)]
        request: bool,
    },

    /// List sessions as readable lines
    #[command(visible_alias = "s")]
    Show {
        #[command(flatten)]
        input: Input,
    },
}

#[derive(Subcommand)]
pub enum StudentCmd {
    /// Store a fetched payload for a student
    #[command(visible_alias = "i")]
    Import {
        student: String,

        #[arg(value_enum)]
        kind: SnapshotKind,

        #[command(flatten)]
        input: Input,
    },

    /// List students with stored snapshots
    #[command(visible_alias = "l")]
    List,

    /// Show a student's programs tab
    #[command(visible_alias = "s")]
    Show {
        student: String,

        /// Day for the nutrition card (defaults to config `day`, then today)
        #[arg(short, long, value_enum)]
        day: Option<WeekDay>,
    },

    /// Delete stored snapshots (all kinds unless one is given)
    #[command(visible_alias = "d")]
    Drop {
        student: String,

        #[arg(value_enum)]
        kind: Option<SnapshotKind>,
    },
}

#[derive(Subcommand)]
pub enum ConfigCmd {
    /// Show all config keys
    List,

    /// Get the value of a key
    Get { key: String },

    /// Set or override a key
    Set { key: String, val: String },

    /// Remove a key
    Unset { key: String },
}
