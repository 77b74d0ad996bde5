use thiserror::Error;

use crate::store::StoreError;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Alphabet table has no 'tag' template")]
    MissingTagTemplate,
    #[error("Alphabet table has no entry for '{key}'")]
    MissingCharacterMapping { key: String },
    #[error("Cannot find account matching '{name}'")]
    AccountNotFound { name: String },
    #[error("Account name already exists: '{existing}'")]
    DuplicateAccount { existing: String },
    #[error("Backing store error: {0}")]
    BackingStore(#[from] StoreError),
    #[error("Account '{name}' was deleted but could not be re-created: {source}")]
    OverrideIncomplete {
        name: String,
        #[source]
        source: StoreError,
    },
    #[error("Invalid {field} value: '{value}'")]
    InvalidField { field: &'static str, value: String },
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Clipboard error: {0}")]
    Clipboard(String),
}

/// Reserved for argument errors; clap exits with this code on its own.
pub const EXIT_INVALID_OPTION: u8 = 2;

impl Error {
    pub fn exit_code(&self) -> u8 {
        match self {
            Error::MissingTagTemplate | Error::MissingCharacterMapping { .. } => 3,
            Error::AccountNotFound { .. } => 4,
            Error::DuplicateAccount { .. } => 5,
            Error::BackingStore(_) => 6,
            Error::OverrideIncomplete { .. } => 7,
            Error::InvalidField { .. } => 8,
            Error::Config(_) => 9,
            Error::Clipboard(_) => 10,
        }
    }
}
