//! @acp:module "Output Formatting"
//! @acp:summary "Terminal rendering for rankings, charts and summaries"
//! @acp:domain cli
//! @acp:layer presentation
//!
//! Every renderer returns a `String` so commands decide where it goes and
//! tests can inspect it.

use std::time::Duration;

use console::{pad_str, style, Alignment};
use indicatif::{ProgressBar, ProgressStyle};

use crate::project::Project;
use crate::rank::{Breakdown, Summary};
use crate::store::{Availability, HEADER};

/// Width of the longest bar in charts, in terminal columns
pub const BAR_WIDTH: usize = 40;

/// Run `f` behind a spinner; the spinner is removed when `f` returns
pub fn with_spinner<T>(message: &str, f: impl FnOnce() -> T) -> T {
    let spinner = ProgressBar::new_spinner();
    if let Ok(spinner_style) = ProgressStyle::with_template("{spinner:.cyan} {msg}") {
        spinner.set_style(spinner_style);
    }
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(80));
    let result = f();
    spinner.finish_and_clear();
    result
}

/// One-line store status shown before user content
pub fn connection_banner(availability: &Availability) -> String {
    match availability {
        Availability::Live { backend } => {
            format!("{} Store connected ({})", style("✓").green(), backend)
        }
        Availability::Unavailable { .. } => format!(
            "{} Store not configured. Projects will only be saved for this session.",
            style("!").yellow()
        ),
    }
}

/// Format a number without trailing zeros (2 → "2", 0.25 → "0.25")
pub fn format_number(value: f64) -> String {
    format!("{}", value)
}

/// Ranking table with a 1-based rank column
pub fn render_table(ranked: &[Project]) -> String {
    let name_width = ranked
        .iter()
        .map(|p| console::measure_text_width(&p.name))
        .chain(std::iter::once(HEADER[0].len()))
        .max()
        .unwrap_or(HEADER[0].len());
    let rank_width = ranked.len().to_string().len().max(4);

    let mut out = String::new();
    let header = format!(
        "{}  {}  {:>9}  {:>6}  {:>14}  {:>15}  {:>10}",
        pad_str("Rank", rank_width, Alignment::Right, None),
        pad_str(HEADER[0], name_width, Alignment::Left, None),
        HEADER[1],
        HEADER[2],
        HEADER[3],
        HEADER[4],
        HEADER[5],
    );
    out.push_str(&format!("{}\n", style(&header).bold()));
    out.push_str(&format!("{}\n", "─".repeat(console::measure_text_width(&header))));

    for (index, project) in ranked.iter().enumerate() {
        out.push_str(&format!(
            "{:>rank_width$}  {}  {:>9}  {:>6}  {:>14}  {:>15}  {:>10}\n",
            index + 1,
            pad_str(&project.name, name_width, Alignment::Left, None),
            project.reach,
            format_number(project.impact.value()),
            project.confidence,
            format_number(project.effort),
            style(format!("{:.2}", project.score)).cyan(),
        ));
    }
    out
}

/// Horizontal bar chart of scores, highest first, bars scaled to the top score
pub fn render_score_chart(projects: &[Project]) -> String {
    let max_score = projects.iter().map(|p| p.score).fold(0.0_f64, f64::max);
    let label_width = projects
        .iter()
        .map(|p| console::measure_text_width(&p.name))
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    for project in projects {
        let len = if max_score > 0.0 {
            ((project.score / max_score) * BAR_WIDTH as f64).round() as usize
        } else {
            0
        };
        out.push_str(&format!(
            "{} │{} {:.2}\n",
            pad_str(&project.name, label_width, Alignment::Right, None),
            style("█".repeat(len)).cyan(),
            project.score
        ));
    }
    out
}

pub fn render_summary(summary: &Summary) -> String {
    format!(
        "  Total Projects:     {}\n  Highest RICE Score: {:.2}\n  Average RICE Score: {:.2}\n  Total Effort:       {:.1} months\n",
        summary.count, summary.max_score, summary.mean_score, summary.total_effort
    )
}

/// Component bars for the top project on a 0-100 axis
pub fn render_breakdown(breakdown: &Breakdown) -> String {
    let label_width = Breakdown::AXES
        .iter()
        .map(|a| console::measure_text_width(a))
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    for (axis, value) in Breakdown::AXES.iter().zip(breakdown.values()) {
        let clipped = value.clamp(0.0, 100.0);
        let len = ((clipped / 100.0) * BAR_WIDTH as f64).round() as usize;
        out.push_str(&format!(
            "{} │{}{} {}\n",
            pad_str(axis, label_width, Alignment::Right, None),
            style("█".repeat(len)).green(),
            " ".repeat(BAR_WIDTH - len),
            format_number(value)
        ));
    }
    out
}

/// Formula explainer with the worked example
pub fn render_explainer() -> String {
    let mut out = String::new();
    out.push_str("RICE scores a project on four criteria:\n");
    out.push_str("  Reach:      How many people will this impact? (0-100%)\n");
    out.push_str("  Impact:     How much will it impact each person? (0.25, 0.5, 1, 2, 3)\n");
    out.push_str("  Confidence: How confident are you in your estimates? (0-100%)\n");
    out.push_str("  Effort:     How much work is required? (person-months)\n\n");
    out.push_str(&format!(
        "  {}\n\n",
        style("RICE = (Reach × Impact × Confidence) / Effort").bold()
    ));
    out.push_str("Example:\n");
    out.push_str("  Reach: 80% of users (80)\n");
    out.push_str("  Impact: High impact (2)\n");
    out.push_str("  Confidence: 90% confident (0.9)\n");
    out.push_str("  Effort: 3 person-months\n\n");
    out.push_str("  RICE Score = (80 × 2 × 0.9) / 3 = 48\n");
    out
}

pub fn section(title: &str) -> String {
    format!("\n{}\n", style(title).bold().underlined())
}
