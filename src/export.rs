use serde::Serialize;
use uuid::Uuid;

use crate::models::{DailyLog, Flag, RawAnswers, RiskLevel};

/// One log in the wire shape the AI-analysis service expects. Field names
/// stay camelCase to match the consumer's existing schema.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportLog {
    pub id: Uuid,
    pub date: String,
    pub total_score: u8,
    pub risk_level: RiskLevel,
    pub answers: RawAnswers,
    pub flags: Vec<Flag>,
    pub energy: u8,
    pub mood: u8,
    pub workload: u8,
    pub sleep_hours: f64,
    pub notes: String,
}

impl From<&DailyLog> for ExportLog {
    fn from(log: &DailyLog) -> Self {
        Self {
            id: log.id,
            date: log.recorded_on.to_string(),
            total_score: log.analysis.total_score,
            risk_level: log.analysis.risk_level,
            answers: log.answers.clone(),
            flags: log.analysis.flags.clone(),
            energy: log.legacy.energy,
            mood: log.legacy.mood,
            workload: log.legacy.workload,
            sleep_hours: log.legacy.sleep_hours,
            notes: log.notes.clone(),
        }
    }
}

pub fn build_export(logs: &[DailyLog]) -> anyhow::Result<String> {
    let payload: Vec<ExportLog> = logs.iter().map(ExportLog::from).collect();
    let json = serde_json::to_string_pretty(&payload)?;
    Ok(json)
}
