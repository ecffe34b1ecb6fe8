use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands};
use fithub::types::{Config, OutputFmt};
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;

const DEFAULT_DB: &str = "fithub.db";

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config_path = commands::config_path()?;

    if let Commands::Config(cmd) = cli.cmd {
        return commands::config::handle(cmd, &config_path).await;
    }

    let cfg = Config::load(&config_path)?;
    let ctx = commands::Ctx {
        fmt: if cli.json {
            OutputFmt::Json
        } else {
            OutputFmt::Pretty
        },
        lang: match cli.lang {
            Some(l) => l,
            None => cfg.lang()?.unwrap_or_default(),
        },
        day: cfg.day()?,
        db_path: cli
            .db
            .or_else(|| cfg.db_path().map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DB)),
    };
    tracing::debug!(db = %ctx.db_path.display(), lang = ?ctx.lang, "resolved settings");

    match cli.cmd {
        Commands::Workout(cmd) => commands::workout::handle(cmd, &ctx).await,
        Commands::Nutrition(cmd) => commands::nutrition::handle(cmd, &ctx).await,
        Commands::Cardio(cmd) => commands::cardio::handle(cmd, &ctx).await,
        Commands::Student(cmd) => commands::student::handle(cmd, &ctx)
            .await
            .with_context(|| format!("using snapshot database `{}`", ctx.db_path.display())),
        Commands::Config(_) => Ok(()),
    }
}
