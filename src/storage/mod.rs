mod config;
mod json_file;
#[cfg(feature = "remote")]
mod remote_table;

use std::future::Future;

use anyhow::Result;

use crate::domain::Record;

pub use config::*;
pub use json_file::*;
#[cfg(feature = "remote")]
pub use remote_table::*;

/// Persistence capability shared by every ledger backend.
///
/// `load` on a store that was never written returns an empty list rather
/// than an error.
pub trait LedgerBackend {
    /// All persisted records in insertion order.
    fn load(&self) -> impl Future<Output = Result<Vec<Record>>> + Send;

    /// Durably add one record after the existing ones.
    fn append(&self, record: &Record) -> impl Future<Output = Result<()>> + Send;

    /// Durably remove every record. Irreversible.
    fn clear(&self) -> impl Future<Output = Result<()>> + Send;
}

/// The backend chosen at startup.
#[derive(Debug, Clone)]
pub enum LedgerStore {
    File(JsonFileBackend),
    #[cfg(feature = "remote")]
    Remote(RemoteTableBackend),
}

impl LedgerStore {
    /// Select the backend from configuration: the hosted table when its
    /// credentials are present, the local JSON file otherwise.
    pub fn open(config: &StoreConfig) -> Result<Self> {
        match &config.remote {
            #[cfg(feature = "remote")]
            Some(remote) => {
                tracing::debug!(url = %remote.url, table = %remote.table, "using remote table backend");
                Ok(Self::Remote(RemoteTableBackend::new(remote)?))
            }
            #[cfg(not(feature = "remote"))]
            Some(_) => {
                tracing::debug!(
                    "remote credentials set but remote support is not compiled in, using local file"
                );
                Ok(Self::file(&config.data_file))
            }
            None => Ok(Self::file(&config.data_file)),
        }
    }

    pub fn file(path: impl Into<std::path::PathBuf>) -> Self {
        let backend = JsonFileBackend::new(path);
        tracing::debug!(path = %backend.path().display(), "using local file backend");
        Self::File(backend)
    }

    /// Short name of the active backend, for display.
    pub fn backend_name(&self) -> &'static str {
        match self {
            LedgerStore::File(_) => "file",
            #[cfg(feature = "remote")]
            LedgerStore::Remote(_) => "remote",
        }
    }
}

impl LedgerBackend for LedgerStore {
    async fn load(&self) -> Result<Vec<Record>> {
        match self {
            LedgerStore::File(backend) => backend.load().await,
            #[cfg(feature = "remote")]
            LedgerStore::Remote(backend) => backend.load().await,
        }
    }

    async fn append(&self, record: &Record) -> Result<()> {
        match self {
            LedgerStore::File(backend) => backend.append(record).await,
            #[cfg(feature = "remote")]
            LedgerStore::Remote(backend) => backend.append(record).await,
        }
    }

    async fn clear(&self) -> Result<()> {
        match self {
            LedgerStore::File(backend) => backend.clear().await,
            #[cfg(feature = "remote")]
            LedgerStore::Remote(backend) => backend.clear().await,
        }
    }
}
