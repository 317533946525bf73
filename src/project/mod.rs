//! @acp:module "Projects"
//! @acp:summary "Project records, impact levels and RICE scoring"
//! @acp:domain cli
//! @acp:layer model
//!
//! A project is scored once, when it is created from a validated
//! [`ProjectDraft`]; the rounded score is stored with the record and never
//! recomputed.

pub mod scoring;
pub mod types;

pub use scoring::{round2, score};
pub use types::{Impact, Project, ProjectDraft, UserId, EFFORT_RANGE};
