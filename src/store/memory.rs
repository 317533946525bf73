//! @acp:module "Memory Backend"
//! @acp:summary "Process-local workbooks for session-only storage"
//! @acp:domain storage
//! @acp:layer storage

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::collections::HashMap;

use super::backend::{missing_sheet, Backend, Cell, Grid, StoreResult, Workbook};

type Sheets = BTreeMap<String, Grid>;

/// Documents kept in memory for the lifetime of this value
#[derive(Debug, Default)]
pub struct MemoryBackend {
    documents: RefCell<HashMap<String, Sheets>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Backend for MemoryBackend {
    fn name(&self) -> &'static str {
        "memory"
    }

    fn open(&self, locator: &str) -> StoreResult<Box<dyn Workbook + '_>> {
        self.documents
            .borrow_mut()
            .entry(locator.to_string())
            .or_default();
        Ok(Box::new(MemoryWorkbook {
            documents: &self.documents,
            key: locator.to_string(),
        }))
    }
}

struct MemoryWorkbook<'a> {
    documents: &'a RefCell<HashMap<String, Sheets>>,
    key: String,
}

impl MemoryWorkbook<'_> {
    fn with_sheet<T>(&self, title: &str, f: impl FnOnce(&mut Grid) -> T) -> StoreResult<T> {
        let mut documents = self.documents.borrow_mut();
        documents
            .get_mut(&self.key)
            .and_then(|sheets| sheets.get_mut(title))
            .map(f)
            .ok_or_else(|| missing_sheet(title))
    }
}

impl Workbook for MemoryWorkbook<'_> {
    fn has_sheet(&mut self, title: &str) -> StoreResult<bool> {
        Ok(self
            .documents
            .borrow()
            .get(&self.key)
            .is_some_and(|sheets| sheets.contains_key(title)))
    }

    fn add_sheet(&mut self, title: &str, rows: usize, cols: usize) -> StoreResult<()> {
        self.documents
            .borrow_mut()
            .entry(self.key.clone())
            .or_default()
            .insert(title.to_string(), Grid::new(rows, cols));
        Ok(())
    }

    fn rows(&mut self, title: &str) -> StoreResult<Vec<Vec<Cell>>> {
        self.with_sheet(title, |grid| grid.non_empty_rows())
    }

    fn clear(&mut self, title: &str) -> StoreResult<()> {
        self.with_sheet(title, |grid| grid.values.clear())
    }

    fn append_row(&mut self, title: &str, row: &[Cell]) -> StoreResult<()> {
        self.with_sheet(title, |grid| grid.push(row))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_documents_are_shared_between_opens() {
        let backend = MemoryBackend::new();
        {
            let mut book = backend.open("doc").unwrap();
            book.add_sheet("Jonas", 1000, 10).unwrap();
            book.append_row("Jonas", &[json!("a"), json!(1)]).unwrap();
        }
        let mut book = backend.open("doc").unwrap();
        assert!(book.has_sheet("Jonas").unwrap());
        assert_eq!(book.rows("Jonas").unwrap(), vec![vec![json!("a"), json!(1)]]);

        let mut other = backend.open("other").unwrap();
        assert!(!other.has_sheet("Jonas").unwrap());
    }

    #[test]
    fn test_missing_sheet_errors() {
        let backend = MemoryBackend::new();
        let mut book = backend.open("doc").unwrap();
        assert!(book.rows("Nobody").is_err());
        assert!(book.append_row("Nobody", &[]).is_err());
    }

    #[test]
    fn test_clear_removes_rows() {
        let backend = MemoryBackend::new();
        let mut book = backend.open("doc").unwrap();
        book.add_sheet("Rolf", 10, 6).unwrap();
        book.append_rows("Rolf", &[vec![json!("x")], vec![json!("y")]]).unwrap();
        book.clear("Rolf").unwrap();
        assert!(book.rows("Rolf").unwrap().is_empty());
    }
}
