use std::fmt;
use std::path::PathBuf;

/// Default location of the local ledger document.
pub const DEFAULT_DATA_FILE: &str = "budget_data.json";

/// Default name of the hosted table holding one row per record.
pub const DEFAULT_TABLE: &str = "budget_records";

pub const ENV_DATA_FILE: &str = "KAKEIBO_DATA_FILE";
pub const ENV_SERVICE_URL: &str = "SUPABASE_URL";
pub const ENV_SERVICE_KEY: &str = "SUPABASE_KEY";

/// Where the ledger lives. Decided once at startup.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// JSON document used when no remote table is configured
    pub data_file: PathBuf,
    /// Hosted table credentials; `None` selects the local file
    pub remote: Option<RemoteConfig>,
}

impl StoreConfig {
    /// Local-file configuration.
    pub fn local(data_file: impl Into<PathBuf>) -> Self {
        Self {
            data_file: data_file.into(),
            remote: None,
        }
    }

    pub fn with_remote(mut self, remote: Option<RemoteConfig>) -> Self {
        self.remote = remote;
        self
    }

    /// Build the configuration from raw settings (flags or environment).
    /// The remote table is selected only when both the service URL and the
    /// service key are present and non-blank.
    pub fn from_settings(
        data_file: impl Into<PathBuf>,
        url: Option<&str>,
        key: Option<&str>,
        table: &str,
    ) -> Self {
        Self::local(data_file).with_remote(RemoteConfig::from_parts(url, key, table))
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::local(DEFAULT_DATA_FILE)
    }
}

/// Credentials and table name for the hosted backend.
#[derive(Clone, PartialEq, Eq)]
pub struct RemoteConfig {
    pub url: String,
    pub key: String,
    pub table: String,
}

impl RemoteConfig {
    /// Returns `None` unless both URL and key are given and non-blank.
    pub fn from_parts(url: Option<&str>, key: Option<&str>, table: &str) -> Option<Self> {
        let url = url.map(str::trim).filter(|v| !v.is_empty())?;
        let key = key.map(str::trim).filter(|v| !v.is_empty())?;

        Some(Self {
            url: url.to_string(),
            key: key.to_string(),
            table: table.to_string(),
        })
    }
}

impl fmt::Debug for RemoteConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RemoteConfig")
            .field("url", &self.url)
            .field("key", &"<redacted>")
            .field("table", &self.table)
            .finish()
    }
}
