use std::path::Path;

use anyhow::{Result, bail};
use colored::Colorize;
use fithub::types::{CONFIG_KEYS, Config, Lang, WeekDay, best_day_suggestion};

use crate::cli::ConfigCmd;

fn validate(key: &str, val: &str) -> Result<()> {
    match key {
        "lang" => {
            val.parse::<Lang>()?;
        }
        "day" if WeekDay::from_name(val).is_none() => match best_day_suggestion(val) {
            Some(s) => bail!("unknown day `{val}`, did you mean `{s}`?"),
            None => bail!("unknown day `{val}`"),
        },
        _ => {}
    }
    Ok(())
}

pub async fn handle(cmd: ConfigCmd, config_path: &Path) -> Result<()> {
    let mut cfg = Config::load(config_path)?;

    match cmd {
        ConfigCmd::List => {
            if cfg.map.is_empty() {
                println!("{}", "(no config set)".dimmed());
            } else {
                println!("{}", "Config:".cyan().bold());
                for (k, v) in &cfg.map {
                    println!("  {} = {}", k.green(), v);
                }
            }
        }

        ConfigCmd::Get { key } => match cfg.map.get(&key) {
            Some(val) => println!("{}", val),
            None => println!("{} key `{}` not found", "warning:".yellow().bold(), key),
        },

        ConfigCmd::Set { key, val } => {
            if !CONFIG_KEYS.contains(&key.as_str()) {
                bail!(
                    "unknown config key `{key}` (expected one of: {})",
                    CONFIG_KEYS.join(", ")
                );
            }
            validate(&key, &val)?;
            cfg.map.insert(key.clone(), val.clone());
            cfg.save(config_path)?;
            println!("{} set `{}` = `{}`", "info:".blue().bold(), key.green(), val);
        }

        ConfigCmd::Unset { key } => {
            if cfg.map.remove(&key).is_some() {
                cfg.save(config_path)?;
                println!("{} removed `{}`", "info:".blue().bold(), key.green());
            } else {
                println!("{} key `{}` not found", "warning:".yellow().bold(), key);
            }
        }
    }

    Ok(())
}
