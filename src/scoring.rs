use chrono::{Duration, NaiveDate, Utc};

use crate::models::{DailyAnalysis, Flag, LegacyMetrics, RawAnswers, RiskLevel};

/// Scores one check-in: total, risk tier, and behavioral flags.
///
/// Flags and the risk tier are independent computations. A combo flag can
/// fire on a day whose total still lands in the THRIVING tier.
pub fn calculate_daily_analysis(answers: &RawAnswers) -> DailyAnalysis {
    let total_score = answers.core_q1
        + answers.core_q2
        + answers.core_q3
        + answers.core_q4
        + answers.rotating_q5
        + answers.rotating_q6;

    let risk_level = risk_level_for(total_score);

    // Check order fixed so the flag list is reproducible.
    let mut flags = Vec::new();
    if answers.core_q1 >= 3 {
        flags.push(Flag::SevereExhaustion);
    }
    if answers.core_q4 >= 3 {
        flags.push(Flag::SleepCrisis);
    }
    if answers.core_q1 >= 2 && answers.core_q4 >= 2 {
        flags.push(Flag::PhysicalDepletion);
    }
    if answers.core_q3 >= 3 {
        flags.push(Flag::AcuteDread);
    }
    if answers.core_q2 >= 3 {
        flags.push(Flag::ChronicRumination);
    }
    if answers.core_q1 >= 2 && answers.core_q2 >= 2 {
        flags.push(Flag::ExhaustionSpiral);
    }
    if answers.rotating_q5 >= 3 {
        flags.push(Flag::RotatingFactorCrisis);
    }

    DailyAnalysis {
        total_score,
        risk_level,
        flags,
    }
}

pub fn risk_level_for(total_score: u8) -> RiskLevel {
    match total_score {
        14.. => RiskLevel::BurnoutZone,
        10..=13 => RiskLevel::AtRisk,
        5..=9 => RiskLevel::Managing,
        _ => RiskLevel::Thriving,
    }
}

/// Maps the 0-3 answers back onto the legacy 1-10 / hours chart scales.
pub fn map_to_legacy_scale(answers: &RawAnswers) -> LegacyMetrics {
    // Q1 and Q3 invert: 0 (good) -> 10, 3 (bad) -> 1. Q2 runs direct.
    let energy = (10i8 - answers.core_q1 as i8 * 3).max(1) as u8;
    let mood = (10i8 - answers.core_q3 as i8 * 3).max(1) as u8;
    let workload = (1 + answers.core_q2 * 3).min(10);

    // Discrete lookup, not a linear formula.
    let sleep_hours = match answers.core_q4 {
        0 => 8.0,
        1 => 7.0,
        2 => 5.5,
        _ => 4.0,
    };

    LegacyMetrics {
        energy,
        mood,
        workload,
        sleep_hours,
    }
}

pub fn cutoff_date(since_days: i64) -> NaiveDate {
    Utc::now().date_naive() - Duration::days(since_days.max(1))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn answers(q1: u8, q2: u8, q3: u8, q4: u8, q5: u8, q6: u8) -> RawAnswers {
        RawAnswers::new(q1, q2, q3, q4, q5, q6, "Workload").unwrap()
    }

    #[test]
    fn total_is_sum_of_all_six_answers() {
        let analysis = calculate_daily_analysis(&answers(0, 1, 0, 0, 0, 0));
        assert_eq!(analysis.total_score, 1);
        assert_eq!(analysis.risk_level, RiskLevel::Thriving);
        assert!(analysis.flags.is_empty());
    }

    #[test]
    fn managing_starts_at_five() {
        let analysis = calculate_daily_analysis(&answers(1, 1, 1, 1, 1, 0));
        assert_eq!(analysis.total_score, 5);
        assert_eq!(analysis.risk_level, RiskLevel::Managing);
        assert!(analysis.flags.is_empty());
    }

    #[test]
    fn tier_boundaries_sit_at_5_10_and_14() {
        assert_eq!(risk_level_for(0), RiskLevel::Thriving);
        assert_eq!(risk_level_for(4), RiskLevel::Thriving);
        assert_eq!(risk_level_for(5), RiskLevel::Managing);
        assert_eq!(risk_level_for(9), RiskLevel::Managing);
        assert_eq!(risk_level_for(10), RiskLevel::AtRisk);
        assert_eq!(risk_level_for(13), RiskLevel::AtRisk);
        assert_eq!(risk_level_for(14), RiskLevel::BurnoutZone);
        assert_eq!(risk_level_for(18), RiskLevel::BurnoutZone);
    }

    #[test]
    fn tier_never_drops_as_score_rises() {
        for total in 0..18u8 {
            assert!(risk_level_for(total) <= risk_level_for(total + 1));
        }
    }

    #[test]
    fn bad_week_fires_every_flag_except_rumination() {
        let analysis = calculate_daily_analysis(&answers(3, 2, 3, 3, 3, 2));
        assert_eq!(analysis.total_score, 16);
        assert_eq!(analysis.risk_level, RiskLevel::BurnoutZone);
        // core_q2 is 2, so chronic_rumination stays off.
        assert_eq!(
            analysis.flags,
            vec![
                Flag::SevereExhaustion,
                Flag::SleepCrisis,
                Flag::PhysicalDepletion,
                Flag::AcuteDread,
                Flag::ExhaustionSpiral,
                Flag::RotatingFactorCrisis,
            ]
        );
    }

    #[test]
    fn combo_flag_fires_even_in_thriving_tier() {
        let analysis = calculate_daily_analysis(&answers(2, 2, 0, 0, 0, 0));
        assert_eq!(analysis.total_score, 4);
        assert_eq!(analysis.risk_level, RiskLevel::Thriving);
        assert_eq!(analysis.flags, vec![Flag::ExhaustionSpiral]);
    }

    #[test]
    fn flags_toggle_independently() {
        let base = calculate_daily_analysis(&answers(0, 0, 0, 3, 0, 0));
        assert_eq!(base.flags, vec![Flag::SleepCrisis]);

        // Raising q5 past its threshold adds only the rotating flag.
        let bumped = calculate_daily_analysis(&answers(0, 0, 0, 3, 3, 0));
        assert_eq!(bumped.flags, vec![Flag::SleepCrisis, Flag::RotatingFactorCrisis]);
    }

    #[test]
    fn scoring_is_idempotent() {
        let input = answers(2, 1, 3, 2, 0, 1);
        let first = calculate_daily_analysis(&input);
        let second = calculate_daily_analysis(&input);
        assert_eq!(first.total_score, second.total_score);
        assert_eq!(first.risk_level, second.risk_level);
        assert_eq!(first.flags, second.flags);
    }

    #[test]
    fn legacy_scale_inverts_energy_and_mood() {
        let legacy = map_to_legacy_scale(&answers(3, 0, 3, 2, 0, 0));
        assert_eq!(legacy.energy, 1);
        assert_eq!(legacy.mood, 1);
        assert_eq!(legacy.workload, 1);
        assert_eq!(legacy.sleep_hours, 5.5);
    }

    #[test]
    fn legacy_scale_stays_in_range() {
        for q in 0..=3u8 {
            let legacy = map_to_legacy_scale(&answers(q, q, q, q, q, q));
            assert!((1..=10).contains(&legacy.energy));
            assert!((1..=10).contains(&legacy.mood));
            assert!((1..=10).contains(&legacy.workload));
            assert!([4.0, 5.5, 7.0, 8.0].contains(&legacy.sleep_hours));
        }
    }

    #[test]
    fn sleep_hours_uses_the_discrete_lookup() {
        assert_eq!(map_to_legacy_scale(&answers(0, 0, 0, 0, 0, 0)).sleep_hours, 8.0);
        assert_eq!(map_to_legacy_scale(&answers(0, 0, 0, 1, 0, 0)).sleep_hours, 7.0);
        assert_eq!(map_to_legacy_scale(&answers(0, 0, 0, 2, 0, 0)).sleep_hours, 5.5);
        assert_eq!(map_to_legacy_scale(&answers(0, 0, 0, 3, 0, 0)).sleep_hours, 4.0);
    }

    #[test]
    fn workload_caps_at_ten() {
        let legacy = map_to_legacy_scale(&answers(0, 3, 0, 0, 0, 0));
        assert_eq!(legacy.workload, 10);
    }

    #[test]
    fn answers_outside_range_are_rejected() {
        let err = RawAnswers::new(0, 4, 0, 0, 0, 0, "Control").unwrap_err();
        assert_eq!(
            err,
            crate::models::ScoringError::InvalidInput {
                field: "core_q2",
                value: 4
            }
        );
    }

    #[test]
    fn cutoff_date_respects_since_days() {
        let cutoff = cutoff_date(14);
        let expected = Utc::now().date_naive() - Duration::days(14);
        assert_eq!(cutoff, expected);
    }
}
