use std::path::PathBuf;

use anyhow::Context;
use chrono::{Datelike, NaiveDate, Utc};
use clap::{Parser, Subcommand};
use sqlx::postgres::PgPoolOptions;

mod db;
mod export;
mod models;
mod report;
mod scoring;

use models::{RawAnswers, RotatingTopic};

#[derive(Parser)]
#[command(name = "burnout-checkin")]
#[command(about = "Daily burnout check-in tracker", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create or upgrade the database schema
    InitDb,
    /// Load realistic seed data
    Seed,
    /// Record today's check-in (six answers, each 0-3)
    Checkin {
        #[arg(long, value_parser = clap::value_parser!(u8).range(0..=3))]
        q1: u8,
        #[arg(long, value_parser = clap::value_parser!(u8).range(0..=3))]
        q2: u8,
        #[arg(long, value_parser = clap::value_parser!(u8).range(0..=3))]
        q3: u8,
        #[arg(long, value_parser = clap::value_parser!(u8).range(0..=3))]
        q4: u8,
        #[arg(long, value_parser = clap::value_parser!(u8).range(0..=3))]
        q5: u8,
        #[arg(long, value_parser = clap::value_parser!(u8).range(0..=3))]
        q6: u8,
        #[arg(long)]
        notes: Option<String>,
        /// Check-in date, defaults to today
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Import historical check-ins from a CSV file
    Import {
        #[arg(long)]
        csv: PathBuf,
    },
    /// List recent check-ins with score, tier, and flags
    History {
        #[arg(long, default_value_t = 30)]
        since_days: i64,
        #[arg(long, default_value_t = 14)]
        limit: usize,
    },
    /// Generate a markdown trend report
    Report {
        #[arg(long, default_value_t = 30)]
        since_days: i64,
        #[arg(long, default_value = "report.md")]
        out: PathBuf,
    },
    /// Write recent logs as JSON for the AI analysis service
    Export {
        #[arg(long, default_value_t = 30)]
        since_days: i64,
        #[arg(long, default_value = "logs.json")]
        out: PathBuf,
    },
    /// Delete all recorded check-ins
    Reset {
        #[arg(long)]
        confirm: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let database_url = std::env::var("DATABASE_URL")
        .context("DATABASE_URL must be set to a Postgres instance")?;

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await
        .context("failed to connect to Postgres")?;

    match cli.command {
        Commands::InitDb => {
            db::init_db(&pool).await?;
            println!("Schema ready.");
        }
        Commands::Seed => {
            let inserted = db::seed(&pool).await?;
            println!("Seeded {inserted} check-ins.");
        }
        Commands::Checkin {
            q1,
            q2,
            q3,
            q4,
            q5,
            q6,
            notes,
            date,
        } => {
            let date = date.unwrap_or_else(|| Utc::now().date_naive());
            let topic = RotatingTopic::for_weekday(date.weekday());
            let answers = RawAnswers::new(q1, q2, q3, q4, q5, q6, topic.as_str())?;
            let log = db::build_log(date, answers, notes.unwrap_or_default());

            if !db::insert_log(&pool, &log).await? {
                println!("Already checked in on {date}. Nothing recorded.");
                return Ok(());
            }

            println!(
                "Recorded {date} ({}): score {} / 18, tier {}",
                topic.as_str(),
                log.analysis.total_score,
                log.analysis.risk_level.as_str()
            );
            if log.analysis.flags.is_empty() {
                println!("No flags raised.");
            } else {
                for flag in &log.analysis.flags {
                    println!("- flag: {}", flag.as_str());
                }
            }
        }
        Commands::Import { csv } => {
            let inserted = db::import_csv(&pool, &csv).await?;
            println!("Inserted {inserted} check-ins from {}.", csv.display());
        }
        Commands::History { since_days, limit } => {
            let since_date = scoring::cutoff_date(since_days);
            let logs = db::fetch_logs(&pool, since_date).await?;

            if logs.is_empty() {
                println!("No check-ins found for this window.");
                return Ok(());
            }

            println!("Check-ins since {since_date}:");
            for log in logs.iter().take(limit) {
                let flags: Vec<&str> = log.analysis.flags.iter().map(|f| f.as_str()).collect();
                println!(
                    "- {} score {} / 18, tier {}, flags [{}]",
                    log.recorded_on,
                    log.analysis.total_score,
                    log.analysis.risk_level.as_str(),
                    flags.join(", ")
                );
            }
        }
        Commands::Report { since_days, out } => {
            let since_date = scoring::cutoff_date(since_days);
            let logs = db::fetch_logs(&pool, since_date).await?;
            let report = report::build_report(since_days, since_date, &logs);
            std::fs::write(&out, report)?;
            println!("Report written to {}.", out.display());
        }
        Commands::Export { since_days, out } => {
            let since_date = scoring::cutoff_date(since_days);
            let logs = db::fetch_logs(&pool, since_date).await?;
            let json = export::build_export(&logs)?;
            std::fs::write(&out, json)?;
            println!("Exported {} logs to {}.", logs.len(), out.display());
        }
        Commands::Reset { confirm } => {
            if !confirm {
                println!("Refusing to delete without --confirm.");
                return Ok(());
            }
            let deleted = db::reset(&pool).await?;
            println!("Deleted {deleted} check-ins.");
        }
    }

    Ok(())
}
