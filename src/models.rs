use chrono::{NaiveDate, Weekday};
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScoringError {
    #[error("invalid input: {field} is {value}, answers must be between 0 and 3")]
    InvalidInput { field: &'static str, value: u8 },
}

/// One day's raw questionnaire answers. Each score is 0 (best) to 3 (worst).
///
/// The four core questions are asked every day; the two rotating questions
/// change topic by weekday. `rotating_type` records which topic ran that day
/// and is never scored.
#[derive(Debug, Clone, Serialize)]
pub struct RawAnswers {
    pub core_q1: u8,
    pub core_q2: u8,
    pub core_q3: u8,
    pub core_q4: u8,
    pub rotating_q5: u8,
    pub rotating_q6: u8,
    pub rotating_type: String,
}

impl RawAnswers {
    pub fn new(
        core_q1: u8,
        core_q2: u8,
        core_q3: u8,
        core_q4: u8,
        rotating_q5: u8,
        rotating_q6: u8,
        rotating_type: impl Into<String>,
    ) -> Result<Self, ScoringError> {
        let fields = [
            ("core_q1", core_q1),
            ("core_q2", core_q2),
            ("core_q3", core_q3),
            ("core_q4", core_q4),
            ("rotating_q5", rotating_q5),
            ("rotating_q6", rotating_q6),
        ];
        for (field, value) in fields {
            if value > 3 {
                return Err(ScoringError::InvalidInput { field, value });
            }
        }

        Ok(Self {
            core_q1,
            core_q2,
            core_q3,
            core_q4,
            rotating_q5,
            rotating_q6,
            rotating_type: rotating_type.into(),
        })
    }
}

/// Risk tier derived from the total score, ordered by severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskLevel {
    Thriving,
    Managing,
    AtRisk,
    BurnoutZone,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Thriving => "THRIVING",
            RiskLevel::Managing => "MANAGING",
            RiskLevel::AtRisk => "AT_RISK",
            RiskLevel::BurnoutZone => "BURNOUT_ZONE",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "THRIVING" => Some(RiskLevel::Thriving),
            "MANAGING" => Some(RiskLevel::Managing),
            "AT_RISK" => Some(RiskLevel::AtRisk),
            "BURNOUT_ZONE" => Some(RiskLevel::BurnoutZone),
            _ => None,
        }
    }
}

/// A specific concerning answer pattern, independent of the risk tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Flag {
    SevereExhaustion,
    SleepCrisis,
    PhysicalDepletion,
    AcuteDread,
    ChronicRumination,
    ExhaustionSpiral,
    RotatingFactorCrisis,
}

impl Flag {
    pub fn as_str(&self) -> &'static str {
        match self {
            Flag::SevereExhaustion => "severe_exhaustion",
            Flag::SleepCrisis => "sleep_crisis",
            Flag::PhysicalDepletion => "physical_depletion",
            Flag::AcuteDread => "acute_dread",
            Flag::ChronicRumination => "chronic_rumination",
            Flag::ExhaustionSpiral => "exhaustion_spiral",
            Flag::RotatingFactorCrisis => "rotating_factor_crisis",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "severe_exhaustion" => Some(Flag::SevereExhaustion),
            "sleep_crisis" => Some(Flag::SleepCrisis),
            "physical_depletion" => Some(Flag::PhysicalDepletion),
            "acute_dread" => Some(Flag::AcuteDread),
            "chronic_rumination" => Some(Flag::ChronicRumination),
            "exhaustion_spiral" => Some(Flag::ExhaustionSpiral),
            "rotating_factor_crisis" => Some(Flag::RotatingFactorCrisis),
            _ => None,
        }
    }
}

/// Rotating question topic, one per weekday.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RotatingTopic {
    Reward,
    Workload,
    Control,
    Meaning,
    Community,
    Fairness,
    Physical,
}

impl RotatingTopic {
    pub fn for_weekday(weekday: Weekday) -> Self {
        match weekday {
            Weekday::Sun => RotatingTopic::Reward,
            Weekday::Mon => RotatingTopic::Workload,
            Weekday::Tue => RotatingTopic::Control,
            Weekday::Wed => RotatingTopic::Meaning,
            Weekday::Thu => RotatingTopic::Community,
            Weekday::Fri => RotatingTopic::Fairness,
            Weekday::Sat => RotatingTopic::Physical,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RotatingTopic::Reward => "Reward",
            RotatingTopic::Workload => "Workload",
            RotatingTopic::Control => "Control",
            RotatingTopic::Meaning => "Meaning",
            RotatingTopic::Community => "Community",
            RotatingTopic::Fairness => "Fairness",
            RotatingTopic::Physical => "Physical",
        }
    }
}

#[derive(Debug, Clone)]
pub struct DailyAnalysis {
    pub total_score: u8,
    pub risk_level: RiskLevel,
    pub flags: Vec<Flag>,
}

/// The older 1-10 / hours representation kept for chart compatibility.
#[derive(Debug, Clone)]
pub struct LegacyMetrics {
    pub energy: u8,
    pub mood: u8,
    pub workload: u8,
    pub sleep_hours: f64,
}

#[derive(Debug, Clone)]
pub struct DailyLog {
    pub id: Uuid,
    pub recorded_on: NaiveDate,
    pub answers: RawAnswers,
    pub analysis: DailyAnalysis,
    pub legacy: LegacyMetrics,
    pub notes: String,
}

#[derive(Debug, Clone)]
pub struct FlagSummary {
    pub flag: Flag,
    pub count: usize,
}

#[derive(Debug, Clone)]
pub struct WeekTrend {
    pub week_start: NaiveDate,
    pub checkin_count: usize,
    pub avg_score: f64,
    pub avg_energy: f64,
    pub avg_mood: f64,
    pub avg_workload: f64,
    pub avg_sleep_hours: f64,
}
