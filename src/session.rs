//! Process-wide handle to the backing store, built once and passed by reference.

use tracing::debug;

use crate::config::{Backend, Config};
use crate::error::Result;
use crate::store::{FileStore, Row, SheetsStore, TableStore};

pub struct Session {
    store: Box<dyn TableStore>,
}

impl Session {
    pub fn open(config: &Config) -> Result<Self> {
        let store: Box<dyn TableStore> = match config.store.backend {
            Backend::Sheets => Box::new(SheetsStore::new(&config.store.sheets)?),
            Backend::File => Box::new(FileStore::new(&config.store.file.path)),
        };
        debug!(backend = ?config.store.backend, "session opened");
        Ok(Self { store })
    }

    pub fn with_store(store: impl TableStore + 'static) -> Self {
        Self {
            store: Box::new(store),
        }
    }

    pub fn read_rows(&self, table: &str) -> Result<Vec<Row>> {
        Ok(self.store.read_rows(table)?)
    }

    pub fn delete_row(&self, table: &str, row_index: usize) -> Result<()> {
        Ok(self.store.delete_row(table, row_index)?)
    }

    /// Direct store access for callers that need the raw `StoreError`.
    pub fn store(&self) -> &dyn TableStore {
        self.store.as_ref()
    }
}
