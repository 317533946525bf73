//! @acp:module "Local Backend"
//! @acp:summary "JSON workbook files on disk"
//! @acp:domain storage
//! @acp:layer storage
//!
//! One file per document. Every mutation rewrites the file through a
//! temporary sibling and a rename, so a crash never leaves a torn workbook.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::backend::{missing_sheet, Backend, Cell, Grid, StoreResult, Workbook};

/// Directory used for documents given by name rather than path
pub fn default_root() -> PathBuf {
    dirs::data_dir()
        .map(|d| d.join("rice"))
        .unwrap_or_else(|| PathBuf::from(".rice"))
}

/// Workbooks stored as JSON files
#[derive(Debug, Clone)]
pub struct LocalBackend {
    root: PathBuf,
}

impl LocalBackend {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// File path for a locator: explicit paths are kept, names go under the root
    pub fn resolve(&self, locator: &str) -> PathBuf {
        let path = Path::new(locator);
        let is_path = path.extension().is_some_and(|ext| ext == "json")
            || path.components().count() > 1;
        if is_path {
            path.to_path_buf()
        } else {
            self.root.join(format!("{}.json", locator))
        }
    }
}

impl Default for LocalBackend {
    fn default() -> Self {
        Self::new(default_root())
    }
}

/// On-disk workbook layout
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct LocalDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    sheets: BTreeMap<String, Grid>,
}

impl Backend for LocalBackend {
    fn name(&self) -> &'static str {
        "local"
    }

    fn open(&self, locator: &str) -> StoreResult<Box<dyn Workbook + '_>> {
        let path = self.resolve(locator);
        let document = if path.exists() {
            let content = std::fs::read_to_string(&path)?;
            serde_json::from_str(&content)?
        } else {
            tracing::info!("Creating local workbook {}", path.display());
            let document = LocalDocument::default();
            write_atomic(&path, &document)?;
            document
        };
        Ok(Box::new(LocalWorkbook { path, document }))
    }
}

struct LocalWorkbook {
    path: PathBuf,
    document: LocalDocument,
}

impl LocalWorkbook {
    fn sheet_mut(&mut self, title: &str) -> StoreResult<&mut Grid> {
        self.document
            .sheets
            .get_mut(title)
            .ok_or_else(|| missing_sheet(title))
    }

    fn flush(&mut self) -> StoreResult<()> {
        self.document.updated_at = Some(Utc::now());
        write_atomic(&self.path, &self.document)
    }
}

impl Workbook for LocalWorkbook {
    fn has_sheet(&mut self, title: &str) -> StoreResult<bool> {
        Ok(self.document.sheets.contains_key(title))
    }

    fn add_sheet(&mut self, title: &str, rows: usize, cols: usize) -> StoreResult<()> {
        self.document
            .sheets
            .insert(title.to_string(), Grid::new(rows, cols));
        self.flush()
    }

    fn rows(&mut self, title: &str) -> StoreResult<Vec<Vec<Cell>>> {
        Ok(self.sheet_mut(title)?.non_empty_rows())
    }

    fn clear(&mut self, title: &str) -> StoreResult<()> {
        self.sheet_mut(title)?.values.clear();
        self.flush()
    }

    fn append_row(&mut self, title: &str, row: &[Cell]) -> StoreResult<()> {
        self.sheet_mut(title)?.push(row);
        self.flush()
    }

    fn append_rows(&mut self, title: &str, rows: &[Vec<Cell>]) -> StoreResult<()> {
        let grid = self.sheet_mut(title)?;
        for row in rows {
            grid.push(row);
        }
        self.flush()
    }
}

fn write_atomic(path: &Path, document: &LocalDocument) -> StoreResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let tmp = path.with_extension("json.tmp");
    std::fs::write(&tmp, serde_json::to_string_pretty(document)?)?;
    std::fs::rename(&tmp, path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_resolve_locator() {
        let backend = LocalBackend::new("/data/rice");
        assert_eq!(
            backend.resolve("RICE Calculator Data"),
            PathBuf::from("/data/rice/RICE Calculator Data.json")
        );
        assert_eq!(backend.resolve("team.json"), PathBuf::from("team.json"));
        assert_eq!(backend.resolve("store/team"), PathBuf::from("store/team"));
    }

    #[test]
    fn test_open_creates_file() {
        let dir = tempfile::tempdir().unwrap();
        let backend = LocalBackend::new(dir.path());
        backend.open("Team").unwrap();
        assert!(dir.path().join("Team.json").exists());
    }

    #[test]
    fn test_rows_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let backend = LocalBackend::new(dir.path());
        {
            let mut book = backend.open("Team").unwrap();
            book.add_sheet("Hanne", 1000, 10).unwrap();
            book.append_rows("Hanne", &[vec![json!("Project")], vec![json!("Dark Mode")]])
                .unwrap();
        }
        let mut book = backend.open("Team").unwrap();
        assert_eq!(book.rows("Hanne").unwrap().len(), 2);
        assert!(!dir.path().join("Team.json.tmp").exists());
    }

    #[test]
    fn test_corrupt_file_fails_to_open() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("Team.json"), "not json").unwrap();
        let backend = LocalBackend::new(dir.path());
        assert!(backend.open("Team").is_err());
    }
}
