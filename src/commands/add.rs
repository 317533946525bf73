//! @acp:module "Add Command"
//! @acp:summary "Score a new project and append it to a user's list"
//! @acp:domain cli
//! @acp:layer handler

use anyhow::{bail, Result};
use console::style;

use super::output::{render_table, with_spinner};
use crate::config::Config;
use crate::project::{Impact, ProjectDraft};
use crate::session::Session;
use crate::store::{ProjectStore, StoreOutcome};

/// Options for the add command
#[derive(Debug, Clone)]
pub struct AddOptions {
    pub user: String,
    pub name: String,
    /// Percentage of the audience reached
    pub reach: u8,
    pub impact: Impact,
    /// Confidence percentage
    pub confidence: u8,
    /// Person-months
    pub effort: f64,
}

/// Execute the add command
pub fn execute_add(options: AddOptions, config: &Config, store: &ProjectStore) -> Result<()> {
    // Validate before touching the store
    let user = config.user(&options.user)?;
    let draft = ProjectDraft::new(
        options.name,
        options.reach,
        options.impact,
        options.confidence,
        options.effort,
    )?;

    let (session, outcome) = with_spinner("Saving project...", || {
        let mut session = Session::begin(store, user);
        let outcome = session.add(store, draft);
        (session, outcome)
    });

    let project = match outcome {
        StoreOutcome::Failed(err) => {
            eprintln!("{} Failed to save project: {}", style("✗").red(), err);
            bail!("project was not saved");
        }
        StoreOutcome::Ephemeral { value, reason } => {
            println!(
                "{} Store not configured ({}). Projects will only be saved for this session.",
                style("!").yellow(),
                reason
            );
            value
        }
        StoreOutcome::Durable(value) => value,
    };

    println!(
        "{} Added '{}' with RICE score: {:.2}",
        style("✓").green(),
        project.name,
        project.score
    );
    println!();
    print!("{}", render_table(&session.ranked()));
    Ok(())
}
