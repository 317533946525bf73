//! @acp:module "RICE Scoring"
//! @acp:summary "Pure RICE score calculation"
//! @acp:domain cli
//! @acp:layer logic

/// Calculate a RICE score: `(reach × impact × confidence) / effort`
///
/// `confidence` is a fraction in `[0, 1]`, not a percentage. An effort of
/// zero scores 0 instead of dividing by zero.
pub fn score(reach: f64, impact: f64, confidence: f64, effort: f64) -> f64 {
    if effort == 0.0 {
        return 0.0;
    }
    (reach * impact * confidence) / effort
}

/// Round to two decimal places, ties to even
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_documented_example() {
        assert_close(round2(score(80.0, 2.0, 0.9, 3.0)), 48.0);
    }

    #[test]
    fn test_push_notifications_example() {
        assert_close(round2(score(70.0, 2.0, 0.95, 2.0)), 66.5);
    }

    #[test]
    fn test_zero_effort_scores_zero() {
        for reach in [0.0, 50.0, 100.0] {
            for impact in [0.25, 0.5, 1.0, 2.0, 3.0] {
                assert_eq!(score(reach, impact, 1.0, 0.0), 0.0);
            }
        }
    }

    #[test]
    fn test_zero_confidence_scores_zero() {
        assert_eq!(score(100.0, 3.0, 0.0, 1.0), 0.0);
    }

    #[test]
    fn test_round2() {
        assert_close(round2(12.3456), 12.35);
        assert_close(round2(12.344), 12.34);
        assert_close(round2(1.0 / 3.0), 0.33);
        assert_eq!(round2(0.0), 0.0);
    }

    #[test]
    fn test_round2_ties_go_to_even() {
        assert_eq!(round2(0.125), 0.12);
        assert_eq!(round2(0.375), 0.38);
    }
}
