use anyhow::Result;
use colored::Colorize;
use fithub::{
    models::CardioSession,
    normalize::{dedupe_sessions_by_day, normalize_cardio_sessions},
    payload::SaveCardioRequest,
    summary::{EmptyState, cardio_lines},
    types::{Lang, emit},
};

use super::{Ctx, read_json};
use crate::cli::CardioCmd;

pub fn print_sessions(sessions: &[CardioSession], empty: EmptyState, lang: Lang) {
    println!("{}", "Cardio:".cyan().bold());
    if sessions.is_empty() {
        println!("  {}", empty.message(lang).dimmed());
    }
    for (s, line) in sessions.iter().zip(cardio_lines(sessions, lang)) {
        if s.notes.is_empty() {
            println!("  • {line}");
        } else {
            println!("  • {line} {}", format!("({})", s.notes).dimmed());
        }
    }
}

pub async fn handle(cmd: CardioCmd, ctx: &Ctx) -> Result<()> {
    match cmd {
        CardioCmd::Normalize {
            input,
            dedupe,
            request,
        } => {
            let mut sessions = normalize_cardio_sessions(&read_json(&input.file)?);
            if dedupe {
                sessions = dedupe_sessions_by_day(&sessions);
            }
            let out = if request {
                serde_json::to_string_pretty(&SaveCardioRequest {
                    sessions: &sessions,
                })?
            } else {
                serde_json::to_string_pretty(&sessions)?
            };
            println!("{out}");
        }

        CardioCmd::Show { input } => {
            let sessions = normalize_cardio_sessions(&read_json(&input.file)?);
            emit(ctx.fmt, &sessions, || {
                print_sessions(&sessions, EmptyState::NoProgram, ctx.lang)
            });
        }
    }

    Ok(())
}
