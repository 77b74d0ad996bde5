use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;
use tracing::debug;

use super::{remove_at, Row, StoreError, TableStore};

#[derive(Debug, Default, Serialize, Deserialize)]
struct Document {
    #[serde(default)]
    tables: BTreeMap<String, Vec<Row>>,
}

/// Local JSON file holding every table. A missing file is an empty store.
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn load(&self) -> Result<Document, StoreError> {
        let file = match File::open(&self.path) {
            Ok(f) => f,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Document::default()),
            Err(e) => return Err(e.into()),
        };
        Ok(serde_json::from_reader(BufReader::new(file))?)
    }

    fn save(&self, doc: &Document) -> Result<(), StoreError> {
        let parent_dir = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        fs::create_dir_all(parent_dir)?;

        let temp_file = NamedTempFile::new_in(parent_dir)?;
        {
            let mut writer = BufWriter::new(&temp_file);
            serde_json::to_writer_pretty(&mut writer, doc)?;
            writer.flush()?;
        }
        temp_file.persist(&self.path).map_err(|e| e.error)?;
        Ok(())
    }
}

impl TableStore for FileStore {
    fn read_rows(&self, table: &str) -> Result<Vec<Row>, StoreError> {
        let mut doc = self.load()?;
        let rows = doc.tables.remove(table).unwrap_or_default();
        debug!(table, rows = rows.len(), path = %self.path.display(), "read table");
        Ok(rows)
    }

    fn append_row(&self, table: &str, row: &[String]) -> Result<(), StoreError> {
        let mut doc = self.load()?;
        doc.tables.entry(table.to_string()).or_default().push(row.to_vec());
        self.save(&doc)?;
        debug!(table, "appended row");
        Ok(())
    }

    fn delete_row(&self, table: &str, row_index: usize) -> Result<(), StoreError> {
        let mut doc = self.load()?;
        let rows = doc.tables.entry(table.to_string()).or_default();
        remove_at(rows, table, row_index)?;
        self.save(&doc)?;
        debug!(table, row_index, "deleted row");
        Ok(())
    }
}
