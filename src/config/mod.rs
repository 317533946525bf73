//! @acp:module "Configuration"
//! @acp:summary "Roster and store configuration loading and defaults"
//! @acp:domain cli
//! @acp:layer config

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, RiceError};
use crate::project::UserId;

/// Default config file name, looked up in the working directory
pub const CONFIG_FILE: &str = ".rice.config.json";

/// Document opened when no locator is configured
pub const DEFAULT_DOCUMENT: &str = "RICE Calculator Data";

/// @acp:summary "Main RICE configuration structure"
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Users that may own a project table
    #[serde(default = "default_users")]
    pub users: Vec<String>,

    /// Backing store settings
    #[serde(default)]
    pub store: StoreConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            users: default_users(),
            store: StoreConfig::default(),
        }
    }
}

impl Config {
    /// @acp:summary "Load config from a .rice.config.json file"
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;
        if config.users.is_empty() {
            return Err(RiceError::validation("users", "the roster must name at least one user"));
        }
        Ok(config)
    }

    /// @acp:summary "Save config to a file"
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// @acp:summary "Load config, or defaults when the file does not exist"
    ///
    /// A file that exists but cannot be parsed is still an error.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::debug!("{} not found, using defaults", path.display());
            return Ok(Self::default());
        }
        Self::load(path)
    }

    /// Resolve a user name against the roster
    pub fn user(&self, name: &str) -> Result<UserId> {
        UserId::from_roster(name, &self.users)
    }
}

fn default_users() -> Vec<String> {
    ["Jonas", "Hanne", "Ferenc", "Rolf"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

/// Store backend selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// Google Sheets over its REST API
    Sheets,
    /// JSON workbook file on disk
    Local,
    /// Process-local, lost on exit
    Memory,
}

impl BackendKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            BackendKind::Sheets => "sheets",
            BackendKind::Local => "local",
            BackendKind::Memory => "memory",
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BackendKind {
    type Err = RiceError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "sheets" | "gsheets" | "google" => Ok(BackendKind::Sheets),
            "local" | "file" => Ok(BackendKind::Local),
            "memory" | "mem" => Ok(BackendKind::Memory),
            _ => Err(RiceError::UnknownBackend(s.to_string())),
        }
    }
}

/// @acp:summary "Backing store settings"
///
/// Nothing here is required. A missing backend, missing sheets credentials
/// or a local backend without a document all leave the store unavailable,
/// and projects are kept for the current process only.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoreConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backend: Option<BackendKind>,

    /// Credential bundle for the sheets backend
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credentials: Option<PathBuf>,

    /// Document URL, id, path or name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document: Option<String>,
}

impl StoreConfig {
    pub fn sheets(credentials: impl Into<PathBuf>, document: Option<String>) -> Self {
        Self {
            backend: Some(BackendKind::Sheets),
            credentials: Some(credentials.into()),
            document,
        }
    }

    pub fn local(document: impl Into<String>) -> Self {
        Self {
            backend: Some(BackendKind::Local),
            credentials: None,
            document: Some(document.into()),
        }
    }

    pub fn memory() -> Self {
        Self {
            backend: Some(BackendKind::Memory),
            ..Self::default()
        }
    }

    /// Configured document locator, or the shared default name
    pub fn document_or_default(&self) -> &str {
        self.document.as_deref().unwrap_or(DEFAULT_DOCUMENT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_roster() {
        let config = Config::default();
        assert_eq!(config.users, vec!["Jonas", "Hanne", "Ferenc", "Rolf"]);
        assert_eq!(config.store.backend, None);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: Config = serde_json::from_str(r#"{"store": {"backend": "local", "document": "rice.json"}}"#).unwrap();
        assert_eq!(config.users.len(), 4);
        assert_eq!(config.store, StoreConfig::local("rice.json"));
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        let config = Config {
            users: vec!["Ada".to_string()],
            store: StoreConfig::sheets("creds.json", None),
        };
        config.save(&path).unwrap();
        assert_eq!(Config::load(&path).unwrap(), config);
    }

    #[test]
    fn test_load_or_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);

        assert_eq!(Config::load_or_default(&path).unwrap(), Config::default());

        std::fs::write(&path, r#"{"users": ["Ada"]}"#).unwrap();
        assert_eq!(Config::load_or_default(&path).unwrap().users, vec!["Ada"]);

        std::fs::write(&path, "{ not json").unwrap();
        assert!(Config::load_or_default(&path).is_err());
    }

    #[test]
    fn test_empty_roster_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, r#"{"users": []}"#).unwrap();
        assert!(Config::load(&path).is_err());
    }

    #[test]
    fn test_backend_from_str() {
        assert_eq!("Sheets".parse::<BackendKind>().unwrap(), BackendKind::Sheets);
        assert_eq!("file".parse::<BackendKind>().unwrap(), BackendKind::Local);
        assert!("sqlite".parse::<BackendKind>().is_err());
    }

    #[test]
    fn test_document_default() {
        assert_eq!(StoreConfig::default().document_or_default(), DEFAULT_DOCUMENT);
    }
}
