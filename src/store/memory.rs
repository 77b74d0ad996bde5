use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use super::{remove_at, Row, StoreError, TableStore};

/// In-process table store. Tables that were never written read as empty.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RefCell<HashMap<String, Vec<Row>>>,
    fail_appends: Cell<bool>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a table, replacing whatever it held.
    pub fn with_table<R, C>(self, name: &str, rows: R) -> Self
    where
        R: IntoIterator<Item = C>,
        C: IntoIterator,
        C::Item: Into<String>,
    {
        let rows = rows
            .into_iter()
            .map(|row| row.into_iter().map(Into::into).collect())
            .collect();
        self.tables.borrow_mut().insert(name.to_string(), rows);
        self
    }

    /// Make every later append fail, to exercise partial-failure paths.
    pub fn fail_appends(&self, fail: bool) {
        self.fail_appends.set(fail);
    }

    pub fn rows(&self, table: &str) -> Vec<Row> {
        self.tables.borrow().get(table).cloned().unwrap_or_default()
    }
}

impl TableStore for MemoryStore {
    fn read_rows(&self, table: &str) -> Result<Vec<Row>, StoreError> {
        Ok(self.rows(table))
    }

    fn append_row(&self, table: &str, row: &[String]) -> Result<(), StoreError> {
        if self.fail_appends.get() {
            return Err(StoreError::Status {
                status: 503,
                body: "append rejected".to_string(),
            });
        }
        self.tables
            .borrow_mut()
            .entry(table.to_string())
            .or_default()
            .push(row.to_vec());
        Ok(())
    }

    fn delete_row(&self, table: &str, row_index: usize) -> Result<(), StoreError> {
        let mut tables = self.tables.borrow_mut();
        let rows = tables.entry(table.to_string()).or_default();
        remove_at(rows, table, row_index)
    }
}
