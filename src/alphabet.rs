//! Character-to-word lookup table used by password derivation.

use tracing::{debug, warn};

use crate::error::Result;
use crate::session::Session;
use crate::store::{Row, ALPHABET_TABLE};

/// Key that holds the tag template, e.g. `"code-$-x"`.
pub const TAG_KEY: &str = "tag";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AlphabetTable {
    entries: Vec<(String, String)>,
}

impl AlphabetTable {
    /// Read the whole `Alphabet` table once.
    pub fn load(session: &Session) -> Result<Self> {
        let rows = session.read_rows(ALPHABET_TABLE)?;
        let table = Self::from_rows(rows);
        debug!(entries = table.len(), "alphabet loaded");
        Ok(table)
    }

    /// Rows with fewer than two cells have no value and are dropped.
    pub fn from_rows(rows: impl IntoIterator<Item = Row>) -> Self {
        let mut entries = Vec::new();
        for (index, row) in rows.into_iter().enumerate() {
            let mut cells = row.into_iter();
            match (cells.next(), cells.next()) {
                (Some(key), Some(value)) => entries.push((key, value)),
                (Some(key), None) => warn!(index, key = %key, "alphabet row has no value, skipping"),
                _ => {}
            }
        }
        Self { entries }
    }

    pub fn from_pairs<K: Into<String>, V: Into<String>>(pairs: impl IntoIterator<Item = (K, V)>) -> Self {
        Self {
            entries: pairs.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }

    /// First entry whose key equals `key` ignoring case.
    pub fn lookup(&self, key: &str) -> Option<&str> {
        let wanted = key.to_lowercase();
        self.entries
            .iter()
            .find(|(k, _)| k.to_lowercase() == wanted)
            .map(|(_, v)| v.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn row(cells: &[&str]) -> Row {
        cells.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn test_lookup_ignores_case_first_wins() {
        let table = AlphabetTable::from_pairs([("A", "apple"), ("a", "avocado"), ("Tag", "t-$")]);
        assert_eq!(table.lookup("a"), Some("apple"));
        assert_eq!(table.lookup("A"), Some("apple"));
        assert_eq!(table.lookup("TAG"), Some("t-$"));
        assert_eq!(table.lookup("b"), None);
    }

    #[test]
    fn test_empty_table_misses() {
        let table = AlphabetTable::default();
        assert!(table.is_empty());
        assert_eq!(table.lookup("tag"), None);
    }

    #[test]
    fn test_short_rows_dropped() {
        let table = AlphabetTable::from_rows(vec![
            row(&["a", "apple"]),
            row(&["b"]),
            row(&[]),
            row(&["c", "cherry", "extra"]),
        ]);
        assert_eq!(table.len(), 2);
        assert_eq!(table.lookup("b"), None);
        assert_eq!(table.lookup("c"), Some("cherry"));
    }

    #[test]
    fn test_empty_value_is_a_hit() {
        let table = AlphabetTable::from_rows(vec![row(&["x", ""])]);
        assert_eq!(table.lookup("x"), Some(""));
    }

    #[test]
    fn test_load_from_session() {
        let store = MemoryStore::new().with_table(ALPHABET_TABLE, vec![vec!["tag", "w$"], vec!["z", "zebra"]]);
        let session = Session::with_store(store);
        let table = AlphabetTable::load(&session).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.lookup("Z"), Some("zebra"));
    }
}
