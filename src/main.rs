#![forbid(unsafe_code)]
//! RICE Command Line Interface

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use console::style;
use tracing_subscriber::EnvFilter;

use rice::commands::{
    execute_add, execute_clear, execute_init, execute_list, execute_score, execute_session,
    execute_status, execute_users, AddOptions, ClearOptions, InitOptions, ListOptions,
    ScoreOptions, SessionOptions,
};
use rice::config::CONFIG_FILE;
use rice::{BackendKind, Config, Impact, ProjectStore};

#[derive(Parser)]
#[command(name = "rice")]
#[command(about = "RICE prioritization calculator - score, rank and store projects per user")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file path
    #[arg(short, long, global = true, default_value = CONFIG_FILE)]
    config: PathBuf,

    #[command(flatten)]
    store: StoreArgs,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Store settings that override the config file
#[derive(clap::Args)]
struct StoreArgs {
    /// Store backend (sheets, local, memory)
    #[arg(long, global = true, env = "RICE_BACKEND")]
    backend: Option<String>,

    /// Credentials bundle for the sheets backend
    #[arg(long, global = true, env = "RICE_CREDENTIALS")]
    credentials: Option<PathBuf>,

    /// Document URL, path or name
    #[arg(long, global = true, env = "RICE_DOCUMENT")]
    document: Option<String>,
}

impl StoreArgs {
    fn backend(&self) -> anyhow::Result<Option<BackendKind>> {
        Ok(self
            .backend
            .as_deref()
            .map(str::parse::<BackendKind>)
            .transpose()?)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Write a config file for the backing store
    Init {
        /// Force overwrite existing config
        #[arg(short, long)]
        force: bool,

        /// Users on the roster (can specify multiple)
        #[arg(long = "user")]
        users: Vec<String>,

        /// Skip interactive prompts (use defaults + CLI args)
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Score a project and add it to a user's list
    Add {
        /// User who owns the project
        #[arg(short, long, env = "RICE_USER")]
        user: String,

        /// Project name
        #[arg(short, long)]
        name: String,

        /// Percentage of the audience reached (0-100)
        #[arg(long, default_value_t = 50)]
        reach: u8,

        /// Impact: minimal, low, medium, high, massive (or 0.25, 0.5, 1, 2, 3)
        #[arg(long, default_value = "medium")]
        impact: String,

        /// Confidence in the estimates, percent (0-100)
        #[arg(long, default_value_t = 80)]
        confidence: u8,

        /// Effort in person-months (0.1-100)
        #[arg(long, default_value_t = 2.0)]
        effort: f64,
    },

    /// Show a user's ranked projects
    List {
        /// User whose projects are shown
        #[arg(short, long, env = "RICE_USER")]
        user: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Remove all projects of a user
    Clear {
        /// User whose projects are removed
        #[arg(short, long, env = "RICE_USER")]
        user: String,

        /// Do not ask for confirmation
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Compute a RICE score without storing it
    Score {
        #[arg(long)]
        reach: u8,

        #[arg(long)]
        impact: String,

        #[arg(long)]
        confidence: u8,

        #[arg(long)]
        effort: f64,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List the users on the roster
    Users {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Check whether the backing store is reachable
    Status,

    /// Interactive add/clear/view session
    Session {
        /// Start with this user selected
        #[arg(short, long, env = "RICE_USER")]
        user: Option<String>,
    },
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "rice=debug" } else { "error" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn load_config(path: &Path, overrides: &StoreArgs) -> anyhow::Result<Config> {
    let mut config = Config::load_or_default(path)?;

    if let Some(backend) = overrides.backend()? {
        config.store.backend = Some(backend);
    }
    if let Some(credentials) = &overrides.credentials {
        config.store.credentials = Some(credentials.clone());
    }
    if let Some(document) = &overrides.document {
        config.store.document = Some(document.clone());
    }
    Ok(config)
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(err) = run(cli) {
        eprintln!("{} {:#}", style("✗").red(), err);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let command = match cli.command {
        Commands::Init { force, users, yes } => {
            let options = InitOptions {
                path: cli.config,
                force,
                backend: cli.store.backend()?,
                credentials: cli.store.credentials,
                document: cli.store.document,
                users,
                yes,
            };
            return execute_init(options);
        }
        command => command,
    };

    let config = load_config(&cli.config, &cli.store)?;
    let store = ProjectStore::new(config.store.clone());

    match command {
        Commands::Add { user, name, reach, impact, confidence, effort } => {
            let options = AddOptions {
                user,
                name,
                reach,
                impact: impact.parse::<Impact>()?,
                confidence,
                effort,
            };
            execute_add(options, &config, &store)?;
        }

        Commands::List { user, json } => {
            let options = ListOptions { user, json };
            execute_list(options, &config, &store)?;
        }

        Commands::Clear { user, yes } => {
            let options = ClearOptions { user, yes };
            execute_clear(options, &config, &store)?;
        }

        Commands::Score { reach, impact, confidence, effort, json } => {
            let options = ScoreOptions {
                reach,
                impact: impact.parse::<Impact>()?,
                confidence,
                effort,
                json,
            };
            execute_score(options)?;
        }

        Commands::Users { json } => execute_users(&config, json)?,

        Commands::Status => execute_status(&config, &store)?,

        Commands::Session { user } => {
            let options = SessionOptions { user };
            execute_session(options, &config, &store)?;
        }

        // returned above
        Commands::Init { .. } => {}
    }

    Ok(())
}
