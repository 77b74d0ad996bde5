use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{Error, Result};
use crate::store::ACCOUNTS_TABLE;

pub const DEFAULT_CONFIG_FILE: &str = "sheetpass.toml";
pub const CONFIG_ENV: &str = "SHEETPASS_CONFIG";
pub const TOKEN_ENV: &str = "SHEETPASS_ACCESS_TOKEN";

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Config {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub clipboard: ClipboardConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    #[default]
    Sheets,
    File,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct StoreConfig {
    #[serde(default)]
    pub backend: Backend,
    #[serde(default)]
    pub sheets: SheetsConfig,
    #[serde(default)]
    pub file: FileConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct SheetsConfig {
    pub spreadsheet_id: String,
    /// Read when `spreadsheet_id` is empty; first line holds the id.
    pub spreadsheet_id_file: Option<PathBuf>,
    pub access_token: String,
    pub api_base: String,
    pub timeout_secs: u64,
    /// Numeric sheet id per table name, needed for row deletes.
    pub sheet_ids: HashMap<String, i64>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct FileConfig {
    pub path: PathBuf,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct ClipboardConfig {
    /// Program and arguments; the password is written to its stdin.
    pub command: Vec<String>,
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            store: StoreConfig::default(),
            clipboard: ClipboardConfig::default(),
        }
    }
}

impl Default for SheetsConfig {
    fn default() -> Self {
        Self {
            spreadsheet_id: String::new(),
            spreadsheet_id_file: None,
            access_token: String::new(),
            api_base: "https://sheets.googleapis.com".to_string(),
            timeout_secs: 30,
            sheet_ids: HashMap::from([(ACCOUNTS_TABLE.to_string(), 0)]),
        }
    }
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("sheetpass.json"),
        }
    }
}

impl Default for ClipboardConfig {
    fn default() -> Self {
        let command: &[&str] = if cfg!(target_os = "macos") {
            &["pbcopy"]
        } else if cfg!(target_os = "windows") {
            &["clip"]
        } else {
            &["xclip", "-selection", "clipboard"]
        };
        Self {
            command: command.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Where a loaded `Config` came from. Logged once tracing is installed,
/// since the log level itself comes from the config.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    File(PathBuf),
    /// No file at this path.
    Defaults(PathBuf),
}

impl ConfigSource {
    pub fn log(&self) {
        match self {
            ConfigSource::File(path) => info!("Config loaded from {}", path.display()),
            ConfigSource::Defaults(path) => {
                info!("Config file not found at '{}'. Using defaults.", path.display())
            }
        }
    }
}

impl Config {
    pub fn parse(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| Error::Config(e.to_string()))
    }

    /// Load `path`, or defaults when it does not exist. A file that exists but
    /// fails to parse is an error.
    pub fn load_or_default(path: &Path) -> Result<(Self, ConfigSource)> {
        if !path.exists() {
            return Ok((Self::default(), ConfigSource::Defaults(path.to_path_buf())));
        }
        let text = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))?;
        let config = Self::parse(&text)
            .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))?;
        Ok((config, ConfigSource::File(path.to_path_buf())))
    }

    /// `--config`, then `$SHEETPASS_CONFIG`, then `sheetpass.toml`.
    pub fn resolve_path(explicit: Option<&Path>) -> PathBuf {
        match explicit {
            Some(p) => p.to_path_buf(),
            None => std::env::var_os(CONFIG_ENV)
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE)),
        }
    }

    /// Fill values that live outside the config file.
    pub fn apply_overrides(&mut self, token: Option<String>) -> Result<()> {
        let sheets = &mut self.store.sheets;
        if let Some(token) = token.filter(|t| !t.is_empty()) {
            sheets.access_token = token;
        }
        if sheets.spreadsheet_id.is_empty() {
            if let Some(file) = &sheets.spreadsheet_id_file {
                let text = std::fs::read_to_string(file)
                    .map_err(|e| Error::Config(format!("{}: {}", file.display(), e)))?;
                sheets.spreadsheet_id = text.lines().next().unwrap_or("").trim().to_string();
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.log_level, "warn");
        assert_eq!(config.store.backend, Backend::Sheets);
        assert_eq!(config.store.sheets.sheet_ids.get("Accounts"), Some(&0));
        assert_eq!(config.store.sheets.timeout_secs, 30);
        assert!(!config.clipboard.command.is_empty());
    }

    #[test]
    fn test_parse_partial_file() {
        let config = Config::parse(
            r#"
            log_level = "debug"
            [store]
            backend = "file"
            [store.file]
            path = "/tmp/pw.json"
            [store.sheets]
            spreadsheet_id = "abc"
            [store.sheets.sheet_ids]
            Accounts = 42
            "#,
        )
        .unwrap();
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.store.backend, Backend::File);
        assert_eq!(config.store.file.path, PathBuf::from("/tmp/pw.json"));
        assert_eq!(config.store.sheets.spreadsheet_id, "abc");
        assert_eq!(config.store.sheets.sheet_ids.get("Accounts"), Some(&42));
        assert_eq!(config.store.sheets.api_base, "https://sheets.googleapis.com");
    }

    #[test]
    fn test_bad_backend_is_error() {
        let err = Config::parse("[store]\nbackend = \"ftp\"\n").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("none.toml");
        let (config, source) = Config::load_or_default(&path).unwrap();
        assert_eq!(config.store.backend, Backend::Sheets);
        assert_eq!(source, ConfigSource::Defaults(path));
    }

    #[test]
    fn test_existing_file_reports_source() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sheetpass.toml");
        std::fs::write(&path, "log_level = \"debug\"\n").unwrap();
        let (config, source) = Config::load_or_default(&path).unwrap();
        assert_eq!(config.log_level, "debug");
        assert_eq!(source, ConfigSource::File(path.clone()));

        std::fs::write(&path, "log_level = [").unwrap();
        assert!(matches!(Config::load_or_default(&path), Err(Error::Config(_))));
    }

    #[test]
    fn test_overrides() {
        let dir = tempfile::tempdir().unwrap();
        let id_file = dir.path().join("spreadsheetID.txt");
        std::fs::write(&id_file, "sheet-from-file\nignored\n").unwrap();

        let mut config = Config::default();
        config.store.sheets.access_token = "from-config".to_string();
        config.store.sheets.spreadsheet_id_file = Some(id_file);
        config.apply_overrides(Some("from-env".to_string())).unwrap();
        assert_eq!(config.store.sheets.access_token, "from-env");
        assert_eq!(config.store.sheets.spreadsheet_id, "sheet-from-file");

        let mut config = Config::default();
        config.store.sheets.access_token = "from-config".to_string();
        config.apply_overrides(Some(String::new())).unwrap();
        assert_eq!(config.store.sheets.access_token, "from-config");
    }
}
