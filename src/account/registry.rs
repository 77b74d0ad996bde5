//! Account registry over the `Accounts` table

use tracing::{error, info};

use super::record::{name_matches_prefix, AccountRecord, NAME};
use crate::alphabet::AlphabetTable;
use crate::derive::{derivation_key, derive_password};
use crate::error::{Error, Result};
use crate::session::Session;
use crate::store::{Row, ACCOUNTS_TABLE};

/// What `find_by_prefix` does when nothing matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OnMissing {
    /// Return `AccountNotFound`.
    Fail,
    /// Return `Ok(None)`; used by `create` to check for an existing match.
    Ignore,
}

pub struct AccountRegistry<'a> {
    session: &'a Session,
    alphabet: &'a AlphabetTable,
}

impl<'a> AccountRegistry<'a> {
    pub fn new(session: &'a Session, alphabet: &'a AlphabetTable) -> Self {
        Self { session, alphabet }
    }

    /// First account, in stored order, whose name starts with `prefix`
    /// ignoring case, together with its row index.
    pub fn find_by_prefix(&self, prefix: &str, on_missing: OnMissing) -> Result<Option<(AccountRecord, usize)>> {
        match self.locate(prefix, on_missing)? {
            Some((row, index)) => Ok(Some((AccountRecord::from_row(&row)?, index))),
            None => Ok(None),
        }
    }

    /// Raw matching row and its index. Fields are left unparsed so a row with
    /// a bad cell can still be deleted or replaced.
    fn locate(&self, prefix: &str, on_missing: OnMissing) -> Result<Option<(Row, usize)>> {
        let rows = self.session.read_rows(ACCOUNTS_TABLE)?;
        let found = rows
            .into_iter()
            .enumerate()
            .find(|(_, row)| name_matches_prefix(row_name(row), prefix));
        match (found, on_missing) {
            (Some((index, row)), _) => Ok(Some((row, index))),
            (None, OnMissing::Fail) => Err(Error::AccountNotFound {
                name: prefix.to_string(),
            }),
            (None, OnMissing::Ignore) => Ok(None),
        }
    }

    /// Append a new account and return it with its password.
    ///
    /// With `overwrite`, an existing prefix match is deleted first. The delete
    /// and append are two separate store calls; if the append fails the old
    /// row is already gone and `OverrideIncomplete` is returned. Running the
    /// same create again finishes the job.
    pub fn create(&self, record: AccountRecord, overwrite: bool) -> Result<(AccountRecord, String)> {
        if record.name.trim().is_empty() {
            return Err(Error::InvalidField {
                field: "name",
                value: record.name,
            });
        }
        let password = self.password_for(&record)?;

        let mut replaced = false;
        if let Some((existing, index)) = self.locate(&record.name, OnMissing::Ignore)? {
            let existing = row_name(&existing);
            if !overwrite {
                return Err(Error::DuplicateAccount {
                    existing: existing.to_string(),
                });
            }
            self.session.delete_row(ACCOUNTS_TABLE, index)?;
            info!(name = %existing, index, "removed account for override");
            replaced = true;
        }

        if let Err(source) = self.session.store().append_row(ACCOUNTS_TABLE, &record.to_row()) {
            if replaced {
                error!(name = %record.name, error = %source, "account deleted but not re-created");
                return Err(Error::OverrideIncomplete {
                    name: record.name,
                    source,
                });
            }
            return Err(source.into());
        }
        info!(name = %record.name, "account created");
        Ok((record, password))
    }

    pub fn get(&self, prefix: &str) -> Result<(AccountRecord, String)> {
        let (record, _) = self
            .find_by_prefix(prefix, OnMissing::Fail)?
            .ok_or_else(|| Error::AccountNotFound {
                name: prefix.to_string(),
            })?;
        let password = self.password_for(&record)?;
        Ok((record, password))
    }

    /// Remove the matching row and return its name and index; later rows
    /// shift up by one. Only the name cell is read.
    pub fn delete(&self, prefix: &str) -> Result<(String, usize)> {
        let (row, index) = self
            .locate(prefix, OnMissing::Fail)?
            .ok_or_else(|| Error::AccountNotFound {
                name: prefix.to_string(),
            })?;
        self.session.delete_row(ACCOUNTS_TABLE, index)?;
        let name = row_name(&row).to_string();
        info!(name = %name, index, "account deleted");
        Ok((name, index))
    }

    pub fn password_for(&self, record: &AccountRecord) -> Result<String> {
        derive_password(
            derivation_key(&record.name),
            record.max_length,
            record.dashless,
            self.alphabet,
        )
    }
}

fn row_name(row: &Row) -> &str {
    row.get(NAME).map(String::as_str).unwrap_or("")
}
