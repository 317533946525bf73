//! @acp:module "Init Command"
//! @acp:summary "Write a .rice.config.json for the backing store"
//! @acp:domain cli
//! @acp:layer handler
//!
//! Implements `rice init`. Without `--yes` the store settings are asked for
//! interactively; flags given on the command line skip their prompt.

use std::path::PathBuf;

use anyhow::{bail, Result};
use console::style;
use dialoguer::{theme::ColorfulTheme, Input, Select};

use crate::config::{BackendKind, Config, StoreConfig, DEFAULT_DOCUMENT};

/// Options for the init command
#[derive(Debug, Clone, Default)]
pub struct InitOptions {
    /// Config file to write
    pub path: PathBuf,
    /// Force overwrite existing config
    pub force: bool,
    pub backend: Option<BackendKind>,
    /// Credentials bundle for the sheets backend
    pub credentials: Option<PathBuf>,
    /// Document URL, path or name
    pub document: Option<String>,
    /// Replace the default roster
    pub users: Vec<String>,
    /// Skip interactive prompts
    pub yes: bool,
}

/// Execute the init command
pub fn execute_init(options: InitOptions) -> Result<()> {
    if options.path.exists() && !options.force {
        eprintln!(
            "{} Config file already exists. Use --force to overwrite.",
            style("✗").red()
        );
        bail!("{} already exists", options.path.display());
    }

    let mut config = Config::default();
    if !options.users.is_empty() {
        config.users = options.users.clone();
    }

    config.store = if options.yes || options.backend.is_some() {
        store_from_options(&options)
    } else {
        run_interactive_init(&options)?
    };

    config.save(&options.path)?;
    println!(
        "{} Created {}",
        style("✓").green(),
        options.path.display()
    );

    println!("\n{}", style("Next steps:").bold());
    println!("  1. Run {} to check the store", style("rice status").cyan());
    println!(
        "  2. Run {} to score your first project",
        style("rice add --user <NAME> --name <PROJECT>").cyan()
    );

    Ok(())
}

fn store_from_options(options: &InitOptions) -> StoreConfig {
    let backend = options.backend.unwrap_or(BackendKind::Local);
    let document = match backend {
        BackendKind::Local => Some(
            options
                .document
                .clone()
                .unwrap_or_else(|| DEFAULT_DOCUMENT.to_string()),
        ),
        _ => options.document.clone(),
    };
    StoreConfig {
        backend: Some(backend),
        credentials: options.credentials.clone(),
        document,
    }
}

fn run_interactive_init(options: &InitOptions) -> Result<StoreConfig> {
    println!("{} RICE Store Setup\n", style("→").cyan());

    let backends = [BackendKind::Local, BackendKind::Sheets, BackendKind::Memory];
    let labels = [
        "local  - JSON workbook on this machine",
        "sheets - Google Sheets (needs an access token bundle)",
        "memory - nothing is kept after the command exits",
    ];
    let choice = Select::with_theme(&ColorfulTheme::default())
        .with_prompt("Where should projects be stored?")
        .items(&labels)
        .default(0)
        .interact()?;
    let backend = backends[choice];

    let mut store = StoreConfig {
        backend: Some(backend),
        credentials: options.credentials.clone(),
        document: options.document.clone(),
    };

    match backend {
        BackendKind::Local => {
            let document: String = Input::with_theme(&ColorfulTheme::default())
                .with_prompt("Workbook name or path")
                .default(DEFAULT_DOCUMENT.to_string())
                .interact_text()?;
            store.document = Some(document);
        }
        BackendKind::Sheets => {
            if store.credentials.is_none() {
                let path: String = Input::with_theme(&ColorfulTheme::default())
                    .with_prompt("Credentials bundle path")
                    .interact_text()?;
                store.credentials = Some(PathBuf::from(path));
            }
            let document: String = Input::with_theme(&ColorfulTheme::default())
                .with_prompt("Spreadsheet URL or name")
                .default(DEFAULT_DOCUMENT.to_string())
                .interact_text()?;
            store.document = (document != DEFAULT_DOCUMENT).then_some(document);
        }
        BackendKind::Memory => {
            println!(
                "{} Projects will only live as long as one command or session",
                style("!").yellow()
            );
        }
    }

    Ok(store)
}
