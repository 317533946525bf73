//! @acp:module "Project Store"
//! @acp:summary "Per-user project persistence with session-only fallback"
//! @acp:domain storage
//! @acp:layer service
//!
//! Each user owns one worksheet in a shared document. Saves rewrite the
//! whole worksheet (last write wins). When no store can be reached, the
//! same operations run against a process-local [`MemoryBackend`] and report
//! [`StoreOutcome::Ephemeral`].

pub mod backend;
pub mod local;
pub mod memory;
pub mod row;
pub mod sheets;

use std::cell::OnceCell;
use std::fmt;

use thiserror::Error;
use tracing::{debug, info, warn};

pub use backend::{Backend, Cell, Workbook};
pub use local::LocalBackend;
pub use memory::MemoryBackend;
pub use row::HEADER;
pub use sheets::{SheetsBackend, SheetsCredentials};

use crate::config::{BackendKind, StoreConfig, DEFAULT_DOCUMENT};
use crate::project::{Project, UserId};

/// Size of a newly created user worksheet
pub const SHEET_ROWS: usize = 1000;
pub const SHEET_COLS: usize = 10;

/// Errors raised by the backing store
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Cannot open document '{document}': {message}")]
    Document { document: String, message: String },

    #[error("Cannot create worksheet '{title}': {message}")]
    Worksheet { title: String, message: String },

    #[error("Error reading worksheet '{title}': {message}")]
    Read { title: String, message: String },

    #[error("Row {row} of worksheet '{title}' is malformed: {message}")]
    Row {
        title: String,
        row: usize,
        message: String,
    },

    #[error("Error saving worksheet '{title}': {message}")]
    Write { title: String, message: String },

    #[error("Credentials error: {0}")]
    Credentials(String),

    #[error("HTTP error: {0}")]
    Http(String),

    #[error("{0}")]
    Backend(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result of a store operation
#[derive(Debug)]
pub enum StoreOutcome<T> {
    /// Read from or written to the configured store
    Durable(T),
    /// The store is unavailable; the value lives in this process only
    Ephemeral { value: T, reason: String },
    /// The store was reachable but the operation failed
    Failed(StoreError),
}

impl<T> StoreOutcome<T> {
    pub fn is_success(&self) -> bool {
        !matches!(self, StoreOutcome::Failed(_))
    }

    pub fn is_durable(&self) -> bool {
        matches!(self, StoreOutcome::Durable(_))
    }

    pub fn error(&self) -> Option<&StoreError> {
        match self {
            StoreOutcome::Failed(err) => Some(err),
            _ => None,
        }
    }

    pub fn into_value(self) -> Option<T> {
        match self {
            StoreOutcome::Durable(value) | StoreOutcome::Ephemeral { value, .. } => Some(value),
            StoreOutcome::Failed(_) => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> StoreOutcome<U> {
        match self {
            StoreOutcome::Durable(value) => StoreOutcome::Durable(f(value)),
            StoreOutcome::Ephemeral { value, reason } => StoreOutcome::Ephemeral {
                value: f(value),
                reason,
            },
            StoreOutcome::Failed(err) => StoreOutcome::Failed(err),
        }
    }
}

impl StoreOutcome<Vec<Project>> {
    /// Loaded projects, or none when the load failed
    pub fn into_projects(self) -> Vec<Project> {
        self.into_value().unwrap_or_default()
    }
}

/// Whether the configured store can be used
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Availability {
    Live { backend: &'static str },
    Unavailable { reason: String },
}

impl fmt::Display for Availability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Availability::Live { backend } => write!(f, "connected ({})", backend),
            Availability::Unavailable { reason } => write!(f, "unavailable ({})", reason),
        }
    }
}

/// Outcome of connecting to the configured store
pub enum Connection {
    Live(Box<dyn Backend>),
    Unavailable { reason: String },
}

impl fmt::Debug for Connection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Connection::Live(backend) => f.debug_tuple("Live").field(&backend.name()).finish(),
            Connection::Unavailable { reason } => f
                .debug_struct("Unavailable")
                .field("reason", reason)
                .finish(),
        }
    }
}

/// Establish a store session; never fails hard
pub fn connect(config: &StoreConfig) -> Connection {
    let unavailable = |reason: String| {
        warn!("Store unavailable: {}", reason);
        Connection::Unavailable { reason }
    };

    match config.backend {
        None => unavailable("no store configured".to_string()),
        Some(BackendKind::Memory) => Connection::Live(Box::new(MemoryBackend::new())),
        Some(BackendKind::Local) => match &config.document {
            Some(_) => Connection::Live(Box::new(LocalBackend::default())),
            None => unavailable("local store has no document configured".to_string()),
        },
        Some(BackendKind::Sheets) => {
            let Some(path) = &config.credentials else {
                return unavailable("no credentials configured".to_string());
            };
            match SheetsCredentials::load(path) {
                Ok(credentials) => {
                    info!("Authorized sheets client from {}", path.display());
                    Connection::Live(Box::new(SheetsBackend::new(credentials)))
                }
                Err(err) => unavailable(err.to_string()),
            }
        }
    }
}

/// A user's worksheet inside an opened document
pub struct UserTable<'a> {
    workbook: Box<dyn Workbook + 'a>,
    title: String,
}

impl UserTable<'_> {
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Every data row as a project, in stored order
    pub fn read_projects(&mut self) -> Result<Vec<Project>, StoreError> {
        let rows = self.workbook.rows(&self.title).map_err(|e| StoreError::Read {
            title: self.title.clone(),
            message: e.to_string(),
        })?;
        rows.iter()
            .enumerate()
            .skip(1)
            .map(|(index, cells)| {
                row::from_row(cells).map_err(|message| StoreError::Row {
                    title: self.title.clone(),
                    row: index + 1,
                    message,
                })
            })
            .collect()
    }

    /// Replace the worksheet with the header followed by `projects`
    pub fn rewrite(&mut self, projects: &[Project]) -> Result<(), StoreError> {
        let title = self.title.clone();
        let write_err = |e: StoreError| StoreError::Write {
            title: title.clone(),
            message: e.to_string(),
        };
        self.workbook.clear(&self.title).map_err(write_err)?;
        self.workbook
            .append_row(&self.title, &row::header_row())
            .map_err(write_err)?;
        let rows: Vec<Vec<Cell>> = projects.iter().map(row::to_row).collect();
        self.workbook.append_rows(&self.title, &rows).map_err(write_err)
    }
}

/// @acp:summary "Loads and saves per-user project lists"
///
/// The connection is made on first use and kept for the lifetime of the
/// store value.
pub struct ProjectStore {
    config: StoreConfig,
    connection: OnceCell<Connection>,
    ephemeral: MemoryBackend,
}

impl ProjectStore {
    pub fn new(config: StoreConfig) -> Self {
        Self {
            config,
            connection: OnceCell::new(),
            ephemeral: MemoryBackend::new(),
        }
    }

    /// Use an already constructed backend instead of connecting
    pub fn with_backend(backend: Box<dyn Backend>, document: Option<String>) -> Self {
        Self {
            config: StoreConfig {
                document,
                ..StoreConfig::default()
            },
            connection: OnceCell::from(Connection::Live(backend)),
            ephemeral: MemoryBackend::new(),
        }
    }

    pub fn connect(&self) -> &Connection {
        self.connection.get_or_init(|| connect(&self.config))
    }

    pub fn availability(&self) -> Availability {
        match self.connect() {
            Connection::Live(backend) => Availability::Live {
                backend: backend.name(),
            },
            Connection::Unavailable { reason } => Availability::Unavailable {
                reason: reason.clone(),
            },
        }
    }

    /// Backend to use, plus the reason when it is the session-only fallback
    fn target(&self) -> (&dyn Backend, Option<&str>) {
        match self.connect() {
            Connection::Live(backend) => (&**backend, None),
            Connection::Unavailable { reason } => {
                let fallback: &dyn Backend = &self.ephemeral;
                (fallback, Some(reason.as_str()))
            }
        }
    }

    fn document(&self) -> &str {
        match self.connect() {
            Connection::Live(_) => self.config.document_or_default(),
            Connection::Unavailable { .. } => DEFAULT_DOCUMENT,
        }
    }

    /// Open the shared document and find or create the user's worksheet
    ///
    /// Document and worksheet failures are both returned as errors; nothing
    /// here is swallowed.
    pub fn resolve_user_table(&self, user: &UserId) -> Result<UserTable<'_>, StoreError> {
        let (backend, _) = self.target();
        let document = self.document();
        let title = user.as_str().to_string();

        let mut workbook = backend.open(document).map_err(|e| StoreError::Document {
            document: document.to_string(),
            message: e.to_string(),
        })?;
        let exists = workbook.has_sheet(&title).map_err(|e| StoreError::Document {
            document: document.to_string(),
            message: e.to_string(),
        })?;
        if !exists {
            let worksheet_err = |e: StoreError| StoreError::Worksheet {
                title: title.clone(),
                message: e.to_string(),
            };
            workbook
                .add_sheet(&title, SHEET_ROWS, SHEET_COLS)
                .map_err(worksheet_err)?;
            workbook
                .append_row(&title, &row::header_row())
                .map_err(worksheet_err)?;
            info!("Created worksheet '{}' in '{}'", title, document);
        }
        Ok(UserTable { workbook, title })
    }

    /// Load the user's projects in stored order
    pub fn load(&self, user: &UserId) -> StoreOutcome<Vec<Project>> {
        let result = self
            .resolve_user_table(user)
            .and_then(|mut table| table.read_projects());
        match result {
            Ok(projects) => {
                debug!("Loaded {} project(s) for {}", projects.len(), user);
                self.outcome(projects)
            }
            Err(err) => {
                warn!("Load for {} failed: {}", user, err);
                StoreOutcome::Failed(err)
            }
        }
    }

    /// Rewrite the user's worksheet with `projects`
    pub fn save(&self, user: &UserId, projects: &[Project]) -> StoreOutcome<()> {
        let result = self
            .resolve_user_table(user)
            .and_then(|mut table| table.rewrite(projects));
        match result {
            Ok(()) => {
                debug!("Saved {} project(s) for {}", projects.len(), user);
                self.outcome(())
            }
            Err(err) => {
                warn!("Save for {} failed: {}", user, err);
                StoreOutcome::Failed(err)
            }
        }
    }

    /// Replace the user's list with an empty one, keeping the header
    pub fn clear(&self, user: &UserId) -> StoreOutcome<()> {
        self.save(user, &[])
    }

    fn outcome<T>(&self, value: T) -> StoreOutcome<T> {
        match self.target() {
            (_, None) => StoreOutcome::Durable(value),
            (_, Some(reason)) => StoreOutcome::Ephemeral {
                value,
                reason: reason.to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::project::{Impact, ProjectDraft};

    fn user(name: &str) -> UserId {
        Config::default().user(name).unwrap()
    }

    fn project(name: &str) -> Project {
        Project::from_draft(ProjectDraft::new(name, 80, Impact::High, 90, 3.0).unwrap())
    }

    #[test]
    fn test_unconfigured_store_is_unavailable() {
        let store = ProjectStore::new(StoreConfig::default());
        assert!(matches!(
            store.availability(),
            Availability::Unavailable { .. }
        ));
    }

    #[test]
    fn test_sheets_without_credentials_is_unavailable() {
        let config = StoreConfig {
            backend: Some(BackendKind::Sheets),
            ..StoreConfig::default()
        };
        let store = ProjectStore::new(config);
        assert_eq!(
            store.availability(),
            Availability::Unavailable {
                reason: "no credentials configured".to_string()
            }
        );
    }

    #[test]
    fn test_missing_credentials_file_is_unavailable() {
        let store = ProjectStore::new(StoreConfig::sheets("/nonexistent/creds.json", None));
        assert!(matches!(
            store.availability(),
            Availability::Unavailable { .. }
        ));
    }

    #[test]
    fn test_new_worksheet_gets_header() {
        let store = ProjectStore::new(StoreConfig::memory());
        let jonas = user("Jonas");
        let mut table = store.resolve_user_table(&jonas).unwrap();
        assert_eq!(table.title(), "Jonas");
        assert!(table.read_projects().unwrap().is_empty());
        drop(table);

        // resolving again must not add a second header
        let mut table = store.resolve_user_table(&jonas).unwrap();
        let rows = table.workbook.rows("Jonas").unwrap();
        assert_eq!(rows, vec![row::header_row()]);
    }

    #[test]
    fn test_memory_store_is_durable_within_process() {
        let store = ProjectStore::new(StoreConfig::memory());
        let hanne = user("Hanne");
        assert!(store.save(&hanne, &[project("a")]).is_durable());
        let loaded = store.load(&hanne);
        assert!(loaded.is_durable());
        assert_eq!(loaded.into_projects(), vec![project("a")]);
    }

    #[test]
    fn test_unavailable_store_keeps_projects_for_session() {
        let store = ProjectStore::new(StoreConfig::default());
        let rolf = user("Rolf");

        let saved = store.save(&rolf, &[project("a")]);
        assert!(saved.is_success());
        assert!(matches!(saved, StoreOutcome::Ephemeral { .. }));
        assert_eq!(store.load(&rolf).into_projects(), vec![project("a")]);

        let restarted = ProjectStore::new(StoreConfig::default());
        assert!(restarted.load(&rolf).into_projects().is_empty());
    }

    #[test]
    fn test_users_do_not_share_tables() {
        let store = ProjectStore::new(StoreConfig::memory());
        store.save(&user("Jonas"), &[project("a")]);
        assert!(store.load(&user("Ferenc")).into_projects().is_empty());
    }

    #[test]
    fn test_outcome_helpers() {
        let failed: StoreOutcome<Vec<Project>> =
            StoreOutcome::Failed(StoreError::Backend("boom".to_string()));
        assert!(!failed.is_success());
        assert_eq!(failed.error().map(|e| e.to_string()), Some("boom".to_string()));
        assert!(failed.into_projects().is_empty());

        let ephemeral = StoreOutcome::Ephemeral {
            value: 2,
            reason: "offline".to_string(),
        };
        assert_eq!(ephemeral.map(|v| v * 2).into_value(), Some(4));
    }
}
