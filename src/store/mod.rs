//! Row-oriented table storage.
//!
//! Every backend exposes the same three operations: whole-table read,
//! append, and positional delete with later rows shifting up.

pub mod file;
pub mod memory;
pub mod sheets;

use std::rc::Rc;

use thiserror::Error;

pub use file::FileStore;
pub use memory::MemoryStore;
pub use sheets::SheetsStore;

pub const ALPHABET_TABLE: &str = "Alphabet";
pub const ACCOUNTS_TABLE: &str = "Accounts";

pub type Row = Vec<String>;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Store returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Malformed store data: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Row {index} out of range for table '{table}' ({len} rows)")]
    RowOutOfRange { table: String, index: usize, len: usize },
    #[error("Unknown table: {0}")]
    UnknownTable(String),
    #[error("No access token configured")]
    MissingCredentials,
    #[error("No spreadsheet id configured")]
    MissingSpreadsheetId,
    #[error("Invalid API base URL: {0}")]
    InvalidUrl(String),
}

pub trait TableStore {
    /// Read every row of `table` in stored order.
    fn read_rows(&self, table: &str) -> Result<Vec<Row>, StoreError>;

    fn append_row(&self, table: &str, row: &[String]) -> Result<(), StoreError>;

    /// Remove exactly one row; rows after `row_index` move up by one.
    fn delete_row(&self, table: &str, row_index: usize) -> Result<(), StoreError>;
}

impl<T: TableStore + ?Sized> TableStore for Rc<T> {
    fn read_rows(&self, table: &str) -> Result<Vec<Row>, StoreError> {
        (**self).read_rows(table)
    }

    fn append_row(&self, table: &str, row: &[String]) -> Result<(), StoreError> {
        (**self).append_row(table, row)
    }

    fn delete_row(&self, table: &str, row_index: usize) -> Result<(), StoreError> {
        (**self).delete_row(table, row_index)
    }
}

/// Shared positional delete for the backends that hold rows in a `Vec`.
pub(crate) fn remove_at(rows: &mut Vec<Row>, table: &str, index: usize) -> Result<(), StoreError> {
    if index >= rows.len() {
        return Err(StoreError::RowOutOfRange {
            table: table.to_string(),
            index,
            len: rows.len(),
        });
    }
    rows.remove(index);
    Ok(())
}
