//! @acp:module "Users Command"
//! @acp:summary "List the configured roster"
//! @acp:domain cli
//! @acp:layer handler

use anyhow::Result;
use console::style;

use crate::config::Config;

/// Execute the users command
pub fn execute_users(config: &Config, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(&config.users)?);
        return Ok(());
    }
    println!("{}", style("Users:").bold());
    for user in &config.users {
        println!("  {}", user);
    }
    Ok(())
}
