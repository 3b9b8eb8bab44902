use anyhow::Context;
use chrono::{Datelike, Duration, NaiveDate, Utc};
use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::models::{DailyAnalysis, DailyLog, LegacyMetrics, RawAnswers, RiskLevel, RotatingTopic};
use crate::scoring;

pub async fn init_db(pool: &PgPool) -> anyhow::Result<()> {
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}

/// Inserts one check-in. Returns false when that date already has a log;
/// logs are append-only and one-per-day.
pub async fn insert_log(pool: &PgPool, log: &DailyLog) -> anyhow::Result<bool> {
    let flags: Vec<String> = log
        .analysis
        .flags
        .iter()
        .map(|flag| flag.as_str().to_string())
        .collect();

    let result = sqlx::query(
        r#"
        INSERT INTO burnout_checkin.daily_logs
        (id, recorded_on, core_q1, core_q2, core_q3, core_q4,
         rotating_q5, rotating_q6, rotating_type,
         total_score, risk_level, flags,
         energy, mood, workload, sleep_hours, notes)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17)
        ON CONFLICT (recorded_on) DO NOTHING
        "#,
    )
    .bind(log.id)
    .bind(log.recorded_on)
    .bind(log.answers.core_q1 as i16)
    .bind(log.answers.core_q2 as i16)
    .bind(log.answers.core_q3 as i16)
    .bind(log.answers.core_q4 as i16)
    .bind(log.answers.rotating_q5 as i16)
    .bind(log.answers.rotating_q6 as i16)
    .bind(&log.answers.rotating_type)
    .bind(log.analysis.total_score as i16)
    .bind(log.analysis.risk_level.as_str())
    .bind(&flags)
    .bind(log.legacy.energy as i16)
    .bind(log.legacy.mood as i16)
    .bind(log.legacy.workload as i16)
    .bind(log.legacy.sleep_hours)
    .bind(&log.notes)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

pub async fn fetch_logs(pool: &PgPool, since_date: NaiveDate) -> anyhow::Result<Vec<DailyLog>> {
    let rows = sqlx::query(
        r#"
        SELECT id, recorded_on, core_q1, core_q2, core_q3, core_q4,
               rotating_q5, rotating_q6, rotating_type,
               total_score, risk_level, flags,
               energy, mood, workload, sleep_hours, notes
        FROM burnout_checkin.daily_logs
        WHERE recorded_on >= $1
        ORDER BY recorded_on DESC
        "#,
    )
    .bind(since_date)
    .fetch_all(pool)
    .await?;

    let mut logs = Vec::new();
    for row in rows {
        let risk_label: String = row.get("risk_level");
        let risk_level = RiskLevel::from_label(&risk_label)
            .with_context(|| format!("unknown risk level in store: {risk_label}"))?;

        let flag_labels: Vec<String> = row.get("flags");
        let mut flags = Vec::new();
        for label in &flag_labels {
            let flag = crate::models::Flag::from_label(label)
                .with_context(|| format!("unknown flag in store: {label}"))?;
            flags.push(flag);
        }

        let answers = RawAnswers::new(
            row.get::<i16, _>("core_q1") as u8,
            row.get::<i16, _>("core_q2") as u8,
            row.get::<i16, _>("core_q3") as u8,
            row.get::<i16, _>("core_q4") as u8,
            row.get::<i16, _>("rotating_q5") as u8,
            row.get::<i16, _>("rotating_q6") as u8,
            row.get::<String, _>("rotating_type"),
        )?;

        logs.push(DailyLog {
            id: row.get("id"),
            recorded_on: row.get("recorded_on"),
            answers,
            analysis: DailyAnalysis {
                total_score: row.get::<i16, _>("total_score") as u8,
                risk_level,
                flags,
            },
            legacy: LegacyMetrics {
                energy: row.get::<i16, _>("energy") as u8,
                mood: row.get::<i16, _>("mood") as u8,
                workload: row.get::<i16, _>("workload") as u8,
                sleep_hours: row.get("sleep_hours"),
            },
            notes: row.get("notes"),
        });
    }

    Ok(logs)
}

pub async fn seed(pool: &PgPool) -> anyhow::Result<usize> {
    let today = Utc::now().date_naive();
    let samples: Vec<(i64, [u8; 6], &str)> = vec![
        (6, [0, 1, 0, 1, 1, 0], "Quiet day, got outside at lunch"),
        (5, [1, 1, 1, 1, 0, 1], "Sprint planning ran long"),
        (4, [2, 2, 1, 2, 1, 1], "Woke up twice thinking about the release"),
        (3, [2, 2, 2, 2, 2, 1], "Back-to-back meetings, skipped lunch"),
        (2, [3, 2, 3, 3, 3, 2], "Release slipped, on call all evening"),
        (1, [1, 1, 1, 2, 1, 1], "Better after handing off the pager"),
    ];

    let mut inserted = 0usize;
    for (days_ago, scores, note) in samples {
        let date = today - Duration::days(days_ago);
        let topic = RotatingTopic::for_weekday(date.weekday());
        let answers = RawAnswers::new(
            scores[0], scores[1], scores[2], scores[3], scores[4], scores[5],
            topic.as_str(),
        )?;
        let log = build_log(date, answers, note.to_string());
        if insert_log(pool, &log).await? {
            inserted += 1;
        }
    }

    Ok(inserted)
}

/// Bulk-loads historical check-ins. Derived fields (score, tier, flags,
/// legacy metrics) are always recomputed from the raw answers.
pub async fn import_csv(pool: &PgPool, csv_path: &std::path::Path) -> anyhow::Result<usize> {
    #[derive(serde::Deserialize)]
    struct CsvRow {
        recorded_on: NaiveDate,
        core_q1: u8,
        core_q2: u8,
        core_q3: u8,
        core_q4: u8,
        rotating_q5: u8,
        rotating_q6: u8,
        rotating_type: Option<String>,
        notes: Option<String>,
    }

    let mut reader = csv::Reader::from_path(csv_path)?;
    let mut inserted = 0usize;

    for result in reader.deserialize::<CsvRow>() {
        let row = result?;
        let rotating_type = row.rotating_type.unwrap_or_else(|| {
            RotatingTopic::for_weekday(row.recorded_on.weekday())
                .as_str()
                .to_string()
        });

        let answers = RawAnswers::new(
            row.core_q1,
            row.core_q2,
            row.core_q3,
            row.core_q4,
            row.rotating_q5,
            row.rotating_q6,
            rotating_type,
        )
        .with_context(|| format!("row for {}", row.recorded_on))?;

        let log = build_log(row.recorded_on, answers, row.notes.unwrap_or_default());
        if insert_log(pool, &log).await? {
            inserted += 1;
        }
    }

    Ok(inserted)
}

/// Full data reset. The only way a log ever leaves the store.
pub async fn reset(pool: &PgPool) -> anyhow::Result<u64> {
    let result = sqlx::query("DELETE FROM burnout_checkin.daily_logs")
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}

pub fn build_log(recorded_on: NaiveDate, answers: RawAnswers, notes: String) -> DailyLog {
    let analysis = scoring::calculate_daily_analysis(&answers);
    let legacy = scoring::map_to_legacy_scale(&answers);
    DailyLog {
        id: Uuid::new_v4(),
        recorded_on,
        answers,
        analysis,
        legacy,
        notes,
    }
}
