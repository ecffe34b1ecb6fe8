use anyhow::{Result, bail};
use colored::Colorize;
use fithub::{
    db,
    overview::ProgramsOverview,
    payload::ProgramStatus,
    storage::{SnapshotKind, drop_snapshots, get_snapshot, list_students, put_snapshot},
    summary::{EmptyState, summarize_nutrition_week, summarize_workout_week},
    types::emit,
    utils::stringify,
};
use itertools::Itertools;
use serde::Serialize;
use sqlx::SqlitePool;

use super::{Ctx, cardio::print_sessions, nutrition::print_meals, read_json, workout::print_days};
use crate::cli::StudentCmd;

fn badge(status: ProgramStatus) -> String {
    match status {
        ProgramStatus::Active => "active".green().bold().to_string(),
        ProgramStatus::Draft { ai_generated: true } => "draft · ai".yellow().bold().to_string(),
        ProgramStatus::Draft { ai_generated: false } => "draft".yellow().bold().to_string(),
        ProgramStatus::Empty => "empty".dimmed().to_string(),
    }
}

fn section(title: &str, status: ProgramStatus, id: Option<&str>) {
    let id = id.map(|i| format!("#{i}").dimmed().to_string()).unwrap_or_default();
    println!("\n{} [{}] {}", title.cyan().bold(), badge(status), id);
}

async fn load_overview(pool: &SqlitePool, student: &str) -> Result<ProgramsOverview> {
    let mut payloads = Vec::with_capacity(4);
    for kind in [
        SnapshotKind::Active,
        SnapshotKind::Workout,
        SnapshotKind::Nutrition,
        SnapshotKind::Cardio,
    ] {
        payloads.push(get_snapshot(pool, student, kind).await?.map(|s| s.payload));
    }
    if payloads.iter().all(Option::is_none) {
        bail!("no snapshots stored for student `{student}`");
    }
    Ok(ProgramsOverview::assemble(
        payloads[0].as_ref(),
        payloads[1].as_ref(),
        payloads[2].as_ref(),
        payloads[3].as_ref(),
    ))
}

#[derive(Serialize)]
struct DropJson<'a> {
    student_id: &'a str,
    removed: u64,
}

pub async fn handle(cmd: StudentCmd, ctx: &Ctx) -> Result<()> {
    let pool = db::open(&ctx.db_path).await?;

    match cmd {
        StudentCmd::Import {
            student,
            kind,
            input,
        } => {
            let payload = read_json(&input.file)?;
            put_snapshot(&pool, &student, kind, &payload).await?;
            tracing::info!(%student, %kind, "snapshot stored");
            println!(
                "{} stored {} snapshot for `{}`",
                "ok:".green().bold(),
                kind.to_string().bold(),
                student
            );
        }

        StudentCmd::List => {
            let rows = list_students(&pool).await?;
            emit(ctx.fmt, &rows, || {
                if rows.is_empty() {
                    println!("{}", "  (no students found)".dimmed());
                    return;
                }
                println!("{}", "Students:".cyan().bold());
                let id_w = rows.iter().map(|r| r.student_id.len()).max().unwrap_or(1);
                for r in &rows {
                    println!(
                        " {} {} {} {}",
                        format!("{:<id_w$}", r.student_id).bold(),
                        "|".blue(),
                        r.kinds.iter().join(", "),
                        format!("fetched {}", r.last_fetched.format("%Y-%m-%d %H:%M")).dimmed(),
                    );
                }
            });
        }

        StudentCmd::Show { student, day } => {
            let o = load_overview(&pool, &student).await?;
            let day = ctx.day_or_today(day);
            let lang = ctx.lang;
            emit(ctx.fmt, &o, || {
                println!("{} {}", "Student".cyan().bold(), student.bold());

                section("Workout", o.workout_status, o.workout_program_id.as_deref());
                print_days(&summarize_workout_week(&o.workout_week, lang), &o.workout_week, lang);

                section("Nutrition", o.nutrition_status, o.nutrition_program_id.as_deref());
                let meals = summarize_nutrition_week(&o.nutrition_week, day, lang);
                print_meals(&meals, &o.nutrition_week, day, lang);
                if !o.supplements.is_empty() {
                    println!(
                        "{} {}",
                        "Supplements:".cyan(),
                        o.supplements.iter().map(stringify).join(", ")
                    );
                }

                section("Cardio", o.cardio_status, o.cardio_program_id.as_deref());
                let empty = EmptyState::from_content(o.cardio_status != ProgramStatus::Empty);
                print_sessions(&o.cardio_sessions, empty, lang);
            });
        }

        StudentCmd::Drop { student, kind } => {
            let removed = drop_snapshots(&pool, &student, kind).await?;
            emit(
                ctx.fmt,
                &DropJson {
                    student_id: &student,
                    removed,
                },
                || {
                    if removed == 0 {
                        println!(
                            "{} nothing stored for `{}`",
                            "warning:".yellow().bold(),
                            student
                        );
                    } else {
                        println!(
                            "{} removed {} snapshot(s) for `{}`",
                            "info:".blue().bold(),
                            removed,
                            student.green()
                        );
                    }
                },
            );
        }
    }

    Ok(())
}
