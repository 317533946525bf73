//! @acp:module "List Command"
//! @acp:summary "Show a user's ranked projects, charts and summary"
//! @acp:domain cli
//! @acp:layer handler

use anyhow::Result;
use console::style;
use serde::Serialize;

use super::output::{
    connection_banner, render_breakdown, render_explainer, render_score_chart, render_summary,
    render_table, section, with_spinner,
};
use crate::config::Config;
use crate::project::Project;
use crate::rank::{top, Breakdown, Summary, CHART_LIMIT};
use crate::session::Session;
use crate::store::ProjectStore;

/// Options for the list command
#[derive(Debug, Clone)]
pub struct ListOptions {
    /// User whose projects are shown
    pub user: String,
    /// Output as JSON
    pub json: bool,
}

/// Machine-readable view of a user's projects
#[derive(Debug, Serialize)]
pub struct ListReport<'a> {
    pub user: &'a str,
    pub persisted: bool,
    /// Why the list is not backed by the store, when it is not
    pub warning: Option<&'a str>,
    pub projects: Vec<Project>,
    pub summary: Option<Summary>,
    pub breakdown: Option<Breakdown>,
}

impl<'a> ListReport<'a> {
    pub fn new(session: &'a Session) -> Self {
        Self {
            user: session.user().as_str(),
            persisted: session.warning().is_none(),
            warning: session.warning(),
            projects: session.ranked(),
            summary: session.summary(),
            breakdown: session.breakdown(),
        }
    }
}

/// Execute the list command
pub fn execute_list(options: ListOptions, config: &Config, store: &ProjectStore) -> Result<()> {
    let user = config.user(&options.user)?;
    let session = with_spinner("Loading projects...", || Session::begin(store, user));

    if options.json {
        println!("{}", serde_json::to_string_pretty(&ListReport::new(&session))?);
        return Ok(());
    }

    println!("{}", connection_banner(&store.availability()));
    print_view(&session);
    Ok(())
}

/// Full human-readable view, shared with the interactive session
pub fn print_view(session: &Session) {
    println!("{}", style(format!("Welcome, {}!", session.user())).bold());
    if let Some(warning) = session.warning() {
        println!("{} {}", style("!").yellow(), warning);
    }

    if session.is_empty() {
        print_empty_view();
        return;
    }

    let ranked = session.ranked();
    print!("{}", section("Project Rankings"));
    print!("{}", render_table(&ranked));

    print!("{}", section("RICE Score Distribution"));
    print!("{}", render_score_chart(top(&ranked, CHART_LIMIT)));

    if let Some(summary) = session.summary() {
        print!("{}", section("Summary Statistics"));
        print!("{}", render_summary(&summary));
    }

    if let Some(breakdown) = session.breakdown() {
        print!(
            "{}",
            section(&format!("RICE Components for Top Project: {}", breakdown.project))
        );
        print!("{}", render_breakdown(&breakdown));
    }
}

fn print_empty_view() {
    println!(
        "{} No projects yet. Add your first one with 'rice add'.",
        style("→").cyan()
    );
    print!("{}", section("How RICE Works"));
    print!("{}", render_explainer());
    print!("{}", section("Example Projects"));
    print!("{}", render_table(&Project::examples()));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StoreConfig;
    use crate::project::{Impact, ProjectDraft};

    #[test]
    fn test_report_carries_load_failure() {
        let dir = tempfile::tempdir().unwrap();
        let document = dir.path().join("team.json");
        std::fs::write(&document, "{ not json").unwrap();
        let store = ProjectStore::new(StoreConfig::local(document.to_string_lossy()));
        let config = Config::default();

        let session = Session::begin(&store, config.user("Jonas").unwrap());
        let report = serde_json::to_value(ListReport::new(&session)).unwrap();

        assert_eq!(report["persisted"], false);
        assert!(report["projects"].as_array().unwrap().is_empty());
        let warning = report["warning"].as_str().unwrap();
        assert!(warning.contains("team.json"), "unexpected warning: {warning}");
    }

    #[test]
    fn test_report_of_durable_list_has_no_warning() {
        let store = ProjectStore::new(StoreConfig::memory());
        let config = Config::default();
        let mut session = Session::begin(&store, config.user("Hanne").unwrap());
        let draft = ProjectDraft::new("Dark Mode", 40, Impact::Medium, 90, 1.0).unwrap();
        assert!(session.add(&store, draft).is_durable());

        let report = serde_json::to_value(ListReport::new(&session)).unwrap();
        assert_eq!(report["persisted"], true);
        assert!(report["warning"].is_null());
        assert_eq!(report["projects"][0]["name"], "Dark Mode");
    }
}
