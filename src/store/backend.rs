//! @acp:module "Store Backends"
//! @acp:summary "Document and worksheet traits implemented by each store"
//! @acp:domain storage
//! @acp:layer interface

use super::StoreError;

/// A single worksheet cell
pub type Cell = serde_json::Value;

pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// A tabular service that hosts documents
pub trait Backend {
    /// Short name shown in status output
    fn name(&self) -> &'static str;

    /// Open a document by locator (URL, id, path or name)
    fn open(&self, locator: &str) -> StoreResult<Box<dyn Workbook + '_>>;
}

/// An opened document holding titled worksheets
pub trait Workbook {
    fn has_sheet(&mut self, title: &str) -> StoreResult<bool>;

    /// Add an empty worksheet sized `rows` × `cols`
    fn add_sheet(&mut self, title: &str, rows: usize, cols: usize) -> StoreResult<()>;

    /// Every non-empty row, header included
    fn rows(&mut self, title: &str) -> StoreResult<Vec<Vec<Cell>>>;

    /// Remove every row, header included
    fn clear(&mut self, title: &str) -> StoreResult<()>;

    fn append_row(&mut self, title: &str, row: &[Cell]) -> StoreResult<()>;

    fn append_rows(&mut self, title: &str, rows: &[Vec<Cell>]) -> StoreResult<()> {
        for row in rows {
            self.append_row(title, row)?;
        }
        Ok(())
    }
}

/// In-memory worksheet shared by the memory and local backends
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Grid {
    #[serde(default)]
    pub rows: usize,
    #[serde(default)]
    pub cols: usize,
    #[serde(default)]
    pub values: Vec<Vec<Cell>>,
}

impl Grid {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            values: Vec::new(),
        }
    }

    /// Append a row, growing the sheet like a spreadsheet would
    pub fn push(&mut self, row: &[Cell]) {
        self.values.push(row.to_vec());
        self.rows = self.rows.max(self.values.len());
        self.cols = self.cols.max(row.len());
    }

    pub fn non_empty_rows(&self) -> Vec<Vec<Cell>> {
        self.values
            .iter()
            .filter(|row| row.iter().any(|cell| !is_blank(cell)))
            .cloned()
            .collect()
    }
}

pub(crate) fn is_blank(cell: &Cell) -> bool {
    match cell {
        Cell::Null => true,
        Cell::String(s) => s.trim().is_empty(),
        _ => false,
    }
}

pub(crate) fn missing_sheet(title: &str) -> StoreError {
    StoreError::Backend(format!("worksheet '{}' not found", title))
}
