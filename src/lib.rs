#![forbid(unsafe_code)]

//! @acp:module "RICE Library"
//! @acp:summary "RICE scoring, ranking and per-user project persistence"
//! @acp:domain cli
//! @acp:layer api
//! @acp:stability stable
//!
//! # RICE - Prioritization Calculator
//!
//! Scores projects with the RICE formula
//! `(Reach × Impact × Confidence) / Effort`, ranks them, and keeps one
//! project list per user in a spreadsheet-like store.
//!
//! ## Features
//!
//! - **Scoring**: pure RICE computation with a zero-effort guard
//! - **Ranking**: stable score ordering, summary metrics, top-project breakdown
//! - **Persistence**: Google Sheets, local JSON workbook, or in-memory backends
//! - **Graceful degradation**: session-only storage when the store is unavailable
//!
//! ## Example
//!
//! ```rust,no_run
//! use rice::{Config, Impact, ProjectDraft, ProjectStore, Session};
//!
//! fn main() -> anyhow::Result<()> {
//!     let config = Config::default();
//!     let store = ProjectStore::new(config.store.clone());
//!     let user = config.user("Jonas")?;
//!
//!     let mut session = Session::begin(&store, user);
//!     let draft = ProjectDraft::new("Push Notifications", 70, Impact::High, 95, 2.0)?;
//!     session.add(&store, draft);
//!
//!     for (rank, project) in session.ranked().iter().enumerate() {
//!         println!("{}. {} ({:.2})", rank + 1, project.name, project.score);
//!     }
//!     Ok(())
//! }
//! ```

pub mod commands;
pub mod config;
pub mod error;
pub mod project;
pub mod rank;
pub mod session;
pub mod store;

// Re-exports
pub use config::{BackendKind, Config, StoreConfig};
pub use error::{Result, RiceError};
pub use project::{round2, score, Impact, Project, ProjectDraft, UserId};
pub use rank::{rank, summarize, top_breakdown, Breakdown, Summary};
pub use session::Session;
pub use store::{Availability, ProjectStore, StoreError, StoreOutcome, HEADER};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
