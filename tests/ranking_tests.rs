//! Scoring and ranking tests
//!
//! Worked examples, the zero-effort guard and ordering guarantees of the
//! ranked view.

use pretty_assertions::assert_eq;

use rice::rank::{top, CHART_LIMIT};
use rice::{rank, round2, score, summarize, top_breakdown, Impact, Project, ProjectDraft};

fn scored(name: &str, reach: u8, impact: Impact, confidence: u8, effort: f64) -> Project {
    Project::from_draft(ProjectDraft::new(name, reach, impact, confidence, effort).unwrap())
}

// =============================================================================
// Scoring
// =============================================================================

mod scoring_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_worked_example() {
        let project = scored("Example", 80, Impact::High, 90, 3.0);
        assert_eq!(project.score, 48.0);
    }

    #[test]
    fn test_push_notifications() {
        let project = scored("Push Notifications", 70, Impact::High, 95, 2.0);
        assert_eq!(project.score, 66.5);
    }

    #[test]
    fn test_formula_over_input_grid() {
        for reach in [0u8, 1, 33, 50, 99, 100] {
            for impact in Impact::ALL {
                for confidence in [0u8, 10, 55, 100] {
                    for effort in [0.1, 0.5, 2.0, 7.3, 100.0] {
                        let project = scored("p", reach, impact, confidence, effort);
                        let expected = round2(
                            f64::from(reach) * impact.value() * (f64::from(confidence) / 100.0)
                                / effort,
                        );
                        assert_eq!(project.score, expected);
                    }
                }
            }
        }
    }

    #[test]
    fn test_exact_tie_rounds_to_even() {
        let project = scored("Tie", 1, Impact::Minimal, 50, 1.0);
        assert_eq!(project.score, 0.12);
    }

    #[test]
    fn test_zero_effort_guard() {
        for impact in Impact::ALL {
            assert_eq!(score(100.0, impact.value(), 1.0, 0.0), 0.0);
        }
    }

    #[test]
    fn test_score_is_fixed_at_creation() {
        let mut project = scored("Fixed", 50, Impact::Medium, 80, 2.0);
        assert_eq!(project.score, 20.0);
        project.effort = 4.0;
        assert_eq!(project.score, 20.0);
    }
}

// =============================================================================
// Ranking and summaries
// =============================================================================

mod ranking_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_examples_rank_with_stable_ties() {
        let ranked = rank(&Project::examples());
        let names: Vec<&str> = ranked.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["Push Notifications", "Mobile App Redesign", "Dark Mode"]
        );
    }

    #[test]
    fn test_ranking_is_a_permutation() {
        let input: Vec<Project> = (0..25u8)
            .map(|i| scored(&format!("p{}", i), (i * 7) % 101, Impact::ALL[usize::from(i % 5)], 60, 1.0 + f64::from(i % 4)))
            .collect();
        let ranked = rank(&input);
        assert_eq!(ranked.len(), input.len());
        assert!(ranked.windows(2).all(|w| w[0].score >= w[1].score));
        for project in &input {
            assert!(ranked.contains(project));
        }
    }

    #[test]
    fn test_summary_of_examples() {
        let summary = summarize(&Project::examples()).unwrap();
        assert_eq!(summary.count, 3);
        assert_eq!(summary.max_score, 66.5);
        assert_eq!(round2(summary.mean_score), 46.17);
        assert_eq!(summary.total_effort, 9.0);
    }

    #[test]
    fn test_breakdown_of_top_project() {
        let ranked = rank(&Project::examples());
        let breakdown = top_breakdown(&ranked).unwrap();
        assert_eq!(breakdown.project, "Push Notifications");
        assert_eq!(breakdown.reach, 70.0);
        assert_eq!(breakdown.impact, 40.0);
        assert_eq!(breakdown.confidence, 95.0);
        assert_eq!(breakdown.effort, 10.0);
    }

    #[test]
    fn test_chart_takes_top_ten() {
        let many: Vec<Project> = (1..=12u8)
            .map(|i| scored(&format!("p{}", i), i, Impact::Medium, 100, 1.0))
            .collect();
        let ranked = rank(&many);
        let charted = top(&ranked, CHART_LIMIT);
        assert_eq!(charted.len(), 10);
        assert_eq!(charted[0].name, "p12");
        assert_eq!(charted[9].name, "p3");
    }
}
