//! Account row layout and field parsing

use serde::{Deserialize, Serialize};

use crate::derive::DEFAULT_MAX_LENGTH;
use crate::error::{Error, Result};

pub const NAME: usize = 0;
pub const EMAIL: usize = 1;
pub const MAX_LENGTH: usize = 2;
pub const DASHLESS: usize = 3;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct AccountRecord {
    pub name: String,
    pub email: String,
    pub max_length: usize,
    pub dashless: bool,
}

/// Parse stored `"true"`/`"false"` in any case. Blank means unset.
pub fn parse_bool(field: &'static str, text: &str) -> Result<Option<bool>> {
    match text.trim().to_lowercase().as_str() {
        "" => Ok(None),
        "true" => Ok(Some(true)),
        "false" => Ok(Some(false)),
        _ => Err(Error::InvalidField {
            field,
            value: text.to_string(),
        }),
    }
}

pub fn parse_max_length(text: &str) -> Result<Option<usize>> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    trimmed.parse().map(Some).map_err(|_| Error::InvalidField {
        field: "maxLength",
        value: text.to_string(),
    })
}

impl AccountRecord {
    /// Sheets drop trailing blank cells, so missing cells take defaults.
    pub fn from_row(row: &[String]) -> Result<Self> {
        let cell = |i: usize| row.get(i).map(String::as_str).unwrap_or("");
        Ok(Self {
            name: cell(NAME).to_string(),
            email: cell(EMAIL).to_string(),
            max_length: parse_max_length(cell(MAX_LENGTH))?.unwrap_or(DEFAULT_MAX_LENGTH),
            dashless: parse_bool("dashless", cell(DASHLESS))?.unwrap_or(false),
        })
    }

    pub fn to_row(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            self.email.clone(),
            self.max_length.to_string(),
            self.dashless.to_string(),
        ]
    }
}

/// Case-insensitive "starts with"; empty names never match.
pub(crate) fn name_matches_prefix(name: &str, prefix: &str) -> bool {
    !name.is_empty() && name.to_lowercase().starts_with(&prefix.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn test_parse_bool() {
        assert_eq!(parse_bool("dashless", "true").unwrap(), Some(true));
        assert_eq!(parse_bool("dashless", "TRUE").unwrap(), Some(true));
        assert_eq!(parse_bool("dashless", " False ").unwrap(), Some(false));
        assert_eq!(parse_bool("dashless", "").unwrap(), None);
        assert!(matches!(
            parse_bool("dashless", "yes"),
            Err(Error::InvalidField { field: "dashless", .. })
        ));
    }

    #[test]
    fn test_parse_max_length() {
        assert_eq!(parse_max_length("12").unwrap(), Some(12));
        assert_eq!(parse_max_length(" 255 ").unwrap(), Some(255));
        assert_eq!(parse_max_length("").unwrap(), None);
        assert!(parse_max_length("-3").is_err());
        assert!(parse_max_length("12.5").is_err());
        assert!(matches!(
            parse_max_length("lots"),
            Err(Error::InvalidField { field: "maxLength", ref value }) if value == "lots"
        ));
    }

    #[test]
    fn test_from_row() {
        let record = AccountRecord::from_row(&row(&["github", "me@x.io", "16", "TRUE"])).unwrap();
        assert_eq!(
            record,
            AccountRecord {
                name: "github".into(),
                email: "me@x.io".into(),
                max_length: 16,
                dashless: true,
            }
        );
    }

    #[test]
    fn test_from_short_row_uses_defaults() {
        let record = AccountRecord::from_row(&row(&["bank"])).unwrap();
        assert_eq!(record.email, "");
        assert_eq!(record.max_length, DEFAULT_MAX_LENGTH);
        assert!(!record.dashless);
    }

    #[test]
    fn test_from_row_rejects_junk() {
        assert!(AccountRecord::from_row(&row(&["bank", "", "x", "false"])).is_err());
        assert!(AccountRecord::from_row(&row(&["bank", "", "10", "maybe"])).is_err());
    }

    #[test]
    fn test_row_round_trip() {
        let record = AccountRecord {
            name: "mail".into(),
            email: "a@b".into(),
            max_length: 20,
            dashless: false,
        };
        assert_eq!(record.to_row(), row(&["mail", "a@b", "20", "false"]));
        assert_eq!(AccountRecord::from_row(&record.to_row()).unwrap(), record);
    }

    #[test]
    fn test_prefix_match() {
        assert!(name_matches_prefix("Alice", "ali"));
        assert!(name_matches_prefix("alice", "ALICE"));
        assert!(!name_matches_prefix("alice", "alicia"));
        assert!(!name_matches_prefix("", ""));
    }
}
