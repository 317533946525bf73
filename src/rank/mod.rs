//! @acp:module "Ranking"
//! @acp:summary "Score ordering, summary metrics and top-project breakdown"
//! @acp:domain cli
//! @acp:layer logic

use serde::Serialize;

use crate::project::Project;

/// Number of projects shown in the score distribution chart
pub const CHART_LIMIT: usize = 10;

/// Aggregate metrics over a project list
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub count: usize,
    pub max_score: f64,
    pub mean_score: f64,
    pub total_effort: f64,
}

/// Display-scaled components of the top project
///
/// Impact is multiplied by 20 and effort by 5 so every axis lands on a
/// 0-100 range next to reach and confidence.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Breakdown {
    pub project: String,
    pub reach: f64,
    pub impact: f64,
    pub confidence: f64,
    pub effort: f64,
}

impl Breakdown {
    pub const AXES: [&'static str; 4] = ["Reach (%)", "Impact (×20)", "Confidence (%)", "Effort (×5)"];

    /// Axis values in [`Breakdown::AXES`] order
    pub fn values(&self) -> [f64; 4] {
        [self.reach, self.impact, self.confidence, self.effort]
    }
}

/// Sort by score, highest first; equal scores keep their stored order
pub fn rank(projects: &[Project]) -> Vec<Project> {
    let mut ranked = projects.to_vec();
    ranked.sort_by(|a, b| b.score.total_cmp(&a.score));
    ranked
}

/// The first `n` projects of an already ranked list
pub fn top(ranked: &[Project], n: usize) -> &[Project] {
    &ranked[..ranked.len().min(n)]
}

pub fn summarize(projects: &[Project]) -> Option<Summary> {
    if projects.is_empty() {
        return None;
    }
    let count = projects.len();
    let total_score: f64 = projects.iter().map(|p| p.score).sum();
    let max_score = projects
        .iter()
        .map(|p| p.score)
        .fold(f64::NEG_INFINITY, f64::max);
    Some(Summary {
        count,
        max_score,
        mean_score: total_score / count as f64,
        total_effort: projects.iter().map(|p| p.effort).sum(),
    })
}

/// Breakdown of the first project in `ranked`
pub fn top_breakdown(ranked: &[Project]) -> Option<Breakdown> {
    ranked.first().map(|top| Breakdown {
        project: top.name.clone(),
        reach: f64::from(top.reach),
        impact: top.impact.value() * 20.0,
        confidence: f64::from(top.confidence),
        effort: top.effort * 5.0,
    })
}
