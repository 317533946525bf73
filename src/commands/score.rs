//! @acp:module "Score Command"
//! @acp:summary "Compute a RICE score without storing it"
//! @acp:domain cli
//! @acp:layer handler

use anyhow::Result;
use console::style;

use super::output::format_number;
use crate::project::{Impact, Project, ProjectDraft};

/// Options for the score command
#[derive(Debug, Clone)]
pub struct ScoreOptions {
    pub reach: u8,
    pub impact: Impact,
    pub confidence: u8,
    pub effort: f64,
    /// Output as JSON
    pub json: bool,
}

/// Execute the score command
pub fn execute_score(options: ScoreOptions) -> Result<()> {
    let draft = ProjectDraft::new(
        "score",
        options.reach,
        options.impact,
        options.confidence,
        options.effort,
    )?;
    let project = Project::from_draft(draft);

    if options.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({
                "reach": project.reach,
                "impact": project.impact,
                "confidence": project.confidence,
                "effort": project.effort,
                "score": project.score,
            }))?
        );
        return Ok(());
    }

    println!(
        "RICE = ({} × {} × {}) / {} = {}",
        project.reach,
        format_number(project.impact.value()),
        format_number(f64::from(project.confidence) / 100.0),
        format_number(project.effort),
        style(format!("{:.2}", project.score)).cyan().bold()
    );
    Ok(())
}
