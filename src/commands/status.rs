//! @acp:module "Status Command"
//! @acp:summary "Report whether the backing store is reachable"
//! @acp:domain cli
//! @acp:layer handler

use anyhow::Result;
use console::style;

use super::output::connection_banner;
use crate::config::Config;
use crate::store::{Availability, ProjectStore};

/// Execute the status command
pub fn execute_status(config: &Config, store: &ProjectStore) -> Result<()> {
    let availability = store.availability();
    println!("{}", connection_banner(&availability));

    let backend = config
        .store
        .backend
        .map(|b| b.to_string())
        .unwrap_or_else(|| "none".to_string());
    println!("  Backend:  {}", backend);
    println!("  Document: {}", config.store.document_or_default());
    if let Some(credentials) = &config.store.credentials {
        println!("  Credentials: {}", credentials.display());
    }
    if let Availability::Unavailable { reason } = availability {
        println!("  Reason:   {}", style(reason).yellow());
    }
    Ok(())
}
