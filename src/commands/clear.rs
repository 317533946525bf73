//! @acp:module "Clear Command"
//! @acp:summary "Remove every project of a user"
//! @acp:domain cli
//! @acp:layer handler

use anyhow::{bail, Result};
use console::style;
use dialoguer::{theme::ColorfulTheme, Confirm};

use super::output::with_spinner;
use crate::config::Config;
use crate::project::UserId;
use crate::session::Session;
use crate::store::{ProjectStore, StoreOutcome};

/// Options for the clear command
#[derive(Debug, Clone)]
pub struct ClearOptions {
    pub user: String,
    /// Skip the confirmation prompt
    pub yes: bool,
}

/// Execute the clear command
pub fn execute_clear(options: ClearOptions, config: &Config, store: &ProjectStore) -> Result<()> {
    let user = config.user(&options.user)?;

    if !options.yes && !confirm_clear(&user)? {
        println!("{} Nothing cleared", style("→").cyan());
        return Ok(());
    }

    let outcome = with_spinner("Clearing projects...", || {
        let mut session = Session::begin(store, user.clone());
        session.clear(store)
    });
    report_clear(&user, outcome)
}

pub(crate) fn confirm_clear(user: &UserId) -> Result<bool> {
    Ok(Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt(format!("Clear all projects for {}?", user))
        .default(false)
        .interact()?)
}

pub(crate) fn report_clear(user: &UserId, outcome: StoreOutcome<()>) -> Result<()> {
    match outcome {
        StoreOutcome::Failed(err) => {
            eprintln!("{} Failed to clear projects: {}", style("✗").red(), err);
            bail!("projects were not cleared");
        }
        StoreOutcome::Ephemeral { reason, .. } => {
            println!(
                "{} Cleared projects for {} in this session only ({})",
                style("!").yellow(),
                user,
                reason
            );
        }
        StoreOutcome::Durable(()) => {
            println!("{} Cleared all projects for {}", style("✓").green(), user);
        }
    }
    Ok(())
}
