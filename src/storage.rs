use std::fmt::Display;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::ValueEnum;
use itertools::Itertools;
use serde::Serialize;
use serde_json::Value;
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

/// Which backend fetch a stored payload came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SnapshotKind {
    /// The active-programs bundle.
    Active,
    Workout,
    Nutrition,
    Cardio,
}

impl SnapshotKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Workout => "workout",
            Self::Nutrition => "nutrition",
            Self::Cardio => "cardio",
        }
    }

    fn parse(s: &str) -> Option<Self> {
        Self::value_variants()
            .iter()
            .copied()
            .find(|k| k.as_str() == s)
    }
}

impl Display for SnapshotKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub student_id: String,
    pub kind: SnapshotKind,
    pub payload: Value,
    pub fetched_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct StudentRow {
    pub student_id: String,
    pub kinds: Vec<SnapshotKind>,
    pub last_fetched: DateTime<Utc>,
}

fn parse_time(raw: &str) -> Result<DateTime<Utc>> {
    Ok(DateTime::parse_from_rfc3339(raw)
        .with_context(|| format!("bad timestamp `{raw}` in snapshots table"))?
        .with_timezone(&Utc))
}

/// Stores `payload` as the latest fetch of `kind` for the student, replacing
/// whatever was there.
pub async fn put_snapshot(
    pool: &SqlitePool,
    student_id: &str,
    kind: SnapshotKind,
    payload: &Value,
) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO snapshots (id, student_id, kind, payload, fetched_at)
        VALUES (?1, ?2, ?3, ?4, ?5)
        ON CONFLICT (student_id, kind) DO UPDATE SET
            id         = excluded.id,
            payload    = excluded.payload,
            fetched_at = excluded.fetched_at
        "#,
    )
    .bind(Uuid::new_v4().to_string())
    .bind(student_id)
    .bind(kind.as_str())
    .bind(serde_json::to_string(payload)?)
    .bind(Utc::now().to_rfc3339())
    .execute(pool)
    .await
    .with_context(|| format!("saving {kind} snapshot for student `{student_id}`"))?;
    Ok(())
}

pub async fn get_snapshot(
    pool: &SqlitePool,
    student_id: &str,
    kind: SnapshotKind,
) -> Result<Option<Snapshot>> {
    let row = sqlx::query(
        r#"
        SELECT payload, fetched_at
        FROM   snapshots
        WHERE  student_id = ?1 AND kind = ?2
        "#,
    )
    .bind(student_id)
    .bind(kind.as_str())
    .fetch_optional(pool)
    .await?;

    let Some(row) = row else {
        return Ok(None);
    };
    let payload: String = row.get("payload");
    let fetched_at: String = row.get("fetched_at");
    Ok(Some(Snapshot {
        student_id: student_id.to_string(),
        kind,
        payload: serde_json::from_str(&payload)
            .with_context(|| format!("corrupt {kind} snapshot for student `{student_id}`"))?,
        fetched_at: parse_time(&fetched_at)?,
    }))
}

/// Every student with at least one snapshot, ordered by id.
pub async fn list_students(pool: &SqlitePool) -> Result<Vec<StudentRow>> {
    let rows = sqlx::query(
        r#"
        SELECT student_id, kind, fetched_at
        FROM   snapshots
        ORDER  BY student_id, kind
        "#,
    )
    .fetch_all(pool)
    .await?;

    let mut out = Vec::new();
    for (student_id, group) in &rows
        .iter()
        .chunk_by(|r| r.get::<String, _>("student_id"))
    {
        let mut kinds = Vec::new();
        let mut last_fetched: Option<DateTime<Utc>> = None;
        for r in group {
            if let Some(k) = SnapshotKind::parse(&r.get::<String, _>("kind")) {
                kinds.push(k);
            }
            let t = parse_time(&r.get::<String, _>("fetched_at"))?;
            last_fetched = Some(last_fetched.map_or(t, |prev| prev.max(t)));
        }
        kinds.sort();
        if let Some(last_fetched) = last_fetched {
            out.push(StudentRow {
                student_id,
                kinds,
                last_fetched,
            });
        }
    }
    Ok(out)
}

/// Removes one kind, or every snapshot of the student. Returns rows deleted.
pub async fn drop_snapshots(
    pool: &SqlitePool,
    student_id: &str,
    kind: Option<SnapshotKind>,
) -> Result<u64> {
    let res = match kind {
        Some(k) => {
            sqlx::query("DELETE FROM snapshots WHERE student_id = ?1 AND kind = ?2")
                .bind(student_id)
                .bind(k.as_str())
                .execute(pool)
                .await?
        }
        None => {
            sqlx::query("DELETE FROM snapshots WHERE student_id = ?1")
                .bind(student_id)
                .execute(pool)
                .await?
        }
    };
    Ok(res.rows_affected())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db;
    use serde_json::json;

    #[tokio::test]
    async fn import_replaces_the_previous_payload() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let pool = db::open(&dir.path().join("test.db")).await?;

        put_snapshot(&pool, "42", SnapshotKind::Workout, &json!({"week": {"mon": []}})).await?;
        put_snapshot(&pool, "42", SnapshotKind::Workout, &json!({"week": {"tue": []}})).await?;

        let snap = get_snapshot(&pool, "42", SnapshotKind::Workout)
            .await?
            .expect("snapshot stored");
        assert_eq!(snap.payload, json!({"week": {"tue": []}}));
        assert!(get_snapshot(&pool, "42", SnapshotKind::Cardio).await?.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn lists_and_drops_students() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let pool = db::open(&dir.path().join("test.db")).await?;

        put_snapshot(&pool, "b", SnapshotKind::Cardio, &json!({})).await?;
        put_snapshot(&pool, "a", SnapshotKind::Workout, &json!({})).await?;
        put_snapshot(&pool, "a", SnapshotKind::Active, &json!({})).await?;

        let students = list_students(&pool).await?;
        let ids: Vec<_> = students.iter().map(|s| s.student_id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
        assert_eq!(
            students[0].kinds,
            vec![SnapshotKind::Active, SnapshotKind::Workout]
        );

        assert_eq!(drop_snapshots(&pool, "a", Some(SnapshotKind::Workout)).await?, 1);
        assert_eq!(drop_snapshots(&pool, "a", None).await?, 1);
        assert_eq!(list_students(&pool).await?.len(), 1);
        Ok(())
    }
}
