use std::fmt::Write;

use chrono::{Datelike, Duration, NaiveDate};

use crate::models::{DailyLog, Flag, FlagSummary, RiskLevel, WeekTrend};

const ALL_TIERS: [RiskLevel; 4] = [
    RiskLevel::BurnoutZone,
    RiskLevel::AtRisk,
    RiskLevel::Managing,
    RiskLevel::Thriving,
];

const ALL_FLAGS: [Flag; 7] = [
    Flag::SevereExhaustion,
    Flag::SleepCrisis,
    Flag::PhysicalDepletion,
    Flag::AcuteDread,
    Flag::ChronicRumination,
    Flag::ExhaustionSpiral,
    Flag::RotatingFactorCrisis,
];

pub fn summarize_tiers(logs: &[DailyLog]) -> Vec<(RiskLevel, usize)> {
    ALL_TIERS
        .iter()
        .map(|tier| {
            let count = logs
                .iter()
                .filter(|log| log.analysis.risk_level == *tier)
                .count();
            (*tier, count)
        })
        .collect()
}

pub fn summarize_flags(logs: &[DailyLog]) -> Vec<FlagSummary> {
    let mut summaries: Vec<FlagSummary> = ALL_FLAGS
        .iter()
        .filter_map(|flag| {
            let count = logs
                .iter()
                .filter(|log| log.analysis.flags.contains(flag))
                .count();
            (count > 0).then_some(FlagSummary { flag: *flag, count })
        })
        .collect();

    summaries.sort_by(|a, b| b.count.cmp(&a.count));
    summaries
}

/// Groups logs by ISO week (Monday start) and averages the chart metrics.
pub fn weekly_trends(logs: &[DailyLog]) -> Vec<WeekTrend> {
    let mut map: std::collections::HashMap<NaiveDate, Vec<&DailyLog>> =
        std::collections::HashMap::new();

    for log in logs {
        let week_start = log.recorded_on
            - Duration::days(log.recorded_on.weekday().num_days_from_monday() as i64);
        map.entry(week_start).or_default().push(log);
    }

    let mut trends: Vec<WeekTrend> = map
        .into_iter()
        .map(|(week_start, week_logs)| {
            let n = week_logs.len() as f64;
            WeekTrend {
                week_start,
                checkin_count: week_logs.len(),
                avg_score: week_logs
                    .iter()
                    .map(|l| l.analysis.total_score as f64)
                    .sum::<f64>()
                    / n,
                avg_energy: week_logs.iter().map(|l| l.legacy.energy as f64).sum::<f64>() / n,
                avg_mood: week_logs.iter().map(|l| l.legacy.mood as f64).sum::<f64>() / n,
                avg_workload: week_logs
                    .iter()
                    .map(|l| l.legacy.workload as f64)
                    .sum::<f64>()
                    / n,
                avg_sleep_hours: week_logs.iter().map(|l| l.legacy.sleep_hours).sum::<f64>() / n,
            }
        })
        .collect();

    trends.sort_by_key(|trend| trend.week_start);
    trends
}

pub fn build_report(since_days: i64, cutoff: NaiveDate, logs: &[DailyLog]) -> String {
    let tiers = summarize_tiers(logs);
    let flags = summarize_flags(logs);
    let trends = weekly_trends(logs);

    let mut output = String::new();

    let _ = writeln!(output, "# Burnout Check-in Report");
    let _ = writeln!(
        output,
        "Last {} days (check-ins since {})",
        since_days, cutoff
    );
    let _ = writeln!(output);
    let _ = writeln!(output, "## Risk Tier Mix");

    if logs.is_empty() {
        let _ = writeln!(output, "No check-ins recorded for this window.");
    } else {
        for (tier, count) in tiers {
            let _ = writeln!(output, "- {}: {} days", tier.as_str(), count);
        }
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Flag Frequency");

    if flags.is_empty() {
        let _ = writeln!(output, "No flags raised in this window.");
    } else {
        for summary in flags.iter() {
            let _ = writeln!(output, "- {}: {} days", summary.flag.as_str(), summary.count);
        }
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Weekly Averages");

    if trends.is_empty() {
        let _ = writeln!(output, "No check-ins recorded for this window.");
    } else {
        for trend in trends.iter() {
            let _ = writeln!(
                output,
                "- week of {}: score {:.1}, energy {:.1}, mood {:.1}, workload {:.1}, sleep {:.1}h ({} check-ins)",
                trend.week_start,
                trend.avg_score,
                trend.avg_energy,
                trend.avg_mood,
                trend.avg_workload,
                trend.avg_sleep_hours,
                trend.checkin_count
            );
        }
    }

    let mut recent: Vec<&DailyLog> = logs.iter().filter(|log| !log.notes.is_empty()).collect();
    recent.sort_by(|a, b| b.recorded_on.cmp(&a.recorded_on));

    let _ = writeln!(output);
    let _ = writeln!(output, "## Recent Notes");

    if recent.is_empty() {
        let _ = writeln!(output, "No notes recorded for this window.");
    } else {
        for log in recent.iter().take(5) {
            let _ = writeln!(
                output,
                "- {} ({}): {}",
                log.recorded_on,
                log.analysis.risk_level.as_str(),
                log.notes
            );
        }
    }

    output
}
