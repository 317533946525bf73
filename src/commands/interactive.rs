//! @acp:module "Session Command"
//! @acp:summary "Interactive add/clear/view loop over one store connection"
//! @acp:domain cli
//! @acp:layer handler
//!
//! Keeps a single `ProjectStore` for the whole loop, so with no store
//! configured the projects added here stay visible until the loop exits.

use anyhow::Result;
use console::style;
use dialoguer::{theme::ColorfulTheme, Input, Select};

use super::clear::{confirm_clear, report_clear};
use super::list::print_view;
use super::output::{connection_banner, with_spinner};
use crate::config::Config;
use crate::project::{Impact, ProjectDraft, UserId, EFFORT_RANGE};
use crate::session::Session;
use crate::store::{ProjectStore, StoreOutcome};

/// Options for the interactive session
#[derive(Debug, Clone, Default)]
pub struct SessionOptions {
    /// Start with this user selected
    pub user: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    View,
    Add,
    Clear,
    SwitchUser,
    Quit,
}

impl Action {
    const ALL: [Action; 5] = [
        Action::View,
        Action::Add,
        Action::Clear,
        Action::SwitchUser,
        Action::Quit,
    ];

    fn label(&self) -> &'static str {
        match self {
            Action::View => "View rankings",
            Action::Add => "Add new project",
            Action::Clear => "Clear all projects",
            Action::SwitchUser => "Switch user",
            Action::Quit => "Quit",
        }
    }
}

/// Execute the interactive session
pub fn execute_session(options: SessionOptions, config: &Config, store: &ProjectStore) -> Result<()> {
    println!("{}", style("RICE Prioritization Calculator").bold());
    println!("{}\n", connection_banner(&store.availability()));

    let mut user = match options.user {
        Some(name) => config.user(&name)?,
        None => select_user(config)?,
    };
    print_view(&Session::begin(store, user.clone()));

    loop {
        let labels: Vec<&str> = Action::ALL.iter().map(|a| a.label()).collect();
        let choice = Select::with_theme(&ColorfulTheme::default())
            .with_prompt(format!("{} - what next?", user))
            .items(&labels)
            .default(0)
            .interact()?;

        // Every action starts from a freshly loaded session
        match Action::ALL[choice] {
            Action::View => {
                let session = with_spinner("Loading projects...", || {
                    Session::begin(store, user.clone())
                });
                print_view(&session);
            }
            Action::Add => add_project(store, &user)?,
            Action::Clear => {
                if confirm_clear(&user)? {
                    let outcome = with_spinner("Clearing projects...", || {
                        Session::begin(store, user.clone()).clear(store)
                    });
                    // a failed clear is reported and the loop continues
                    if let Err(err) = report_clear(&user, outcome) {
                        tracing::debug!("clear failed: {}", err);
                    }
                }
            }
            Action::SwitchUser => {
                user = select_user(config)?;
                print_view(&Session::begin(store, user.clone()));
            }
            Action::Quit => break,
        }
    }

    Ok(())
}

fn select_user(config: &Config) -> Result<UserId> {
    let choice = Select::with_theme(&ColorfulTheme::default())
        .with_prompt("Select user")
        .items(&config.users)
        .default(0)
        .interact()?;
    Ok(config.user(&config.users[choice])?)
}

fn add_project(store: &ProjectStore, user: &UserId) -> Result<()> {
    let theme = ColorfulTheme::default();

    let name: String = Input::with_theme(&theme)
        .with_prompt("Project name")
        .allow_empty(true)
        .interact_text()?;
    if name.trim().is_empty() {
        println!("{} Please enter a project name", style("✗").red());
        return Ok(());
    }

    let reach: u8 = Input::with_theme(&theme)
        .with_prompt("Reach (%)")
        .default(50)
        .validate_with(|v: &u8| percent_check(*v))
        .interact_text()?;

    let impact_labels: Vec<String> = Impact::ALL.iter().map(|i| i.to_string()).collect();
    let impact_choice = Select::with_theme(&theme)
        .with_prompt("Impact")
        .items(&impact_labels)
        .default(2)
        .interact()?;
    let impact = Impact::ALL[impact_choice];

    let confidence: u8 = Input::with_theme(&theme)
        .with_prompt("Confidence (%)")
        .default(80)
        .validate_with(|v: &u8| percent_check(*v))
        .interact_text()?;

    let (min, max) = EFFORT_RANGE;
    let effort: f64 = Input::with_theme(&theme)
        .with_prompt("Effort (person-months)")
        .default(2.0)
        .validate_with(move |v: &f64| {
            if (min..=max).contains(v) {
                Ok(())
            } else {
                Err(format!("must be between {} and {}", min, max))
            }
        })
        .interact_text()?;

    let draft = match ProjectDraft::new(name, reach, impact, confidence, effort) {
        Ok(draft) => draft,
        Err(err) => {
            println!("{} {}", style("✗").red(), err);
            return Ok(());
        }
    };

    let (session, outcome) = with_spinner("Saving project...", || {
        let mut session = Session::begin(store, user.clone());
        let outcome = session.add(store, draft);
        (session, outcome)
    });

    match outcome {
        StoreOutcome::Failed(err) => {
            println!("{} Failed to save project: {}", style("✗").red(), err);
        }
        StoreOutcome::Durable(project) | StoreOutcome::Ephemeral { value: project, .. } => {
            println!(
                "{} Added '{}' with RICE score: {:.2}",
                style("✓").green(),
                project.name,
                project.score
            );
            print_view(&session);
        }
    }
    Ok(())
}

fn percent_check(value: u8) -> std::result::Result<(), String> {
    if value <= 100 {
        Ok(())
    } else {
        Err("must be between 0 and 100".to_string())
    }
}
