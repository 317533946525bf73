//! @acp:module "Commands"
//! @acp:summary "CLI command implementations"
//! @acp:domain cli
//! @acp:layer handler
//!
//! Provides implementations for all CLI commands.
//! Each command is in its own submodule for maintainability.

pub mod add;
pub mod clear;
pub mod init;
pub mod interactive;
pub mod list;
pub mod output;
pub mod score;
pub mod status;
pub mod users;

pub use add::{execute_add, AddOptions};
pub use clear::{execute_clear, ClearOptions};
pub use init::{execute_init, InitOptions};
pub use interactive::{execute_session, SessionOptions};
pub use list::{execute_list, print_view, ListOptions, ListReport};
pub use output::{
    connection_banner, format_number, render_breakdown, render_explainer, render_score_chart,
    render_summary, render_table, with_spinner,
};
pub use score::{execute_score, ScoreOptions};
pub use status::execute_status;
pub use users::execute_users;
