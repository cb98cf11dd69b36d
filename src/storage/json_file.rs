use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tokio::fs;

use crate::domain::Record;

use super::LedgerBackend;

const TMP_SUFFIX: &str = "tmp";

/// On-disk shape of the local ledger: a single object holding every record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LedgerDocument {
    #[serde(default)]
    pub records: Vec<Record>,
}

/// Ledger stored as one JSON document, rewritten in full on every change.
#[derive(Debug, Clone)]
pub struct JsonFileBackend {
    path: PathBuf,
}

impl JsonFileBackend {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the document. A missing file is an empty ledger.
    async fn read_document(&self) -> Result<LedgerDocument> {
        let data = match fs::read_to_string(&self.path).await {
            Ok(data) => data,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "ledger file not found, starting empty");
                return Ok(LedgerDocument::default());
            }
            Err(err) => {
                return Err(err)
                    .with_context(|| format!("Failed to read {}", self.path.display()));
            }
        };

        serde_json::from_str(&data)
            .with_context(|| format!("Failed to parse ledger file {}", self.path.display()))
    }

    /// Replace the document. Writes a sibling temp file and renames it over the
    /// target so the previous contents stay intact until the new ones are complete.
    async fn write_document(&self, document: &LedgerDocument) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .await
                    .with_context(|| format!("Failed to create {}", parent.display()))?;
            }
        }

        let json = serde_json::to_string_pretty(document)?;
        let tmp = tmp_path(&self.path);
        fs::write(&tmp, json)
            .await
            .with_context(|| format!("Failed to write {}", tmp.display()))?;
        fs::rename(&tmp, &self.path)
            .await
            .with_context(|| format!("Failed to replace {}", self.path.display()))?;
        Ok(())
    }
}

impl LedgerBackend for JsonFileBackend {
    async fn load(&self) -> Result<Vec<Record>> {
        Ok(self.read_document().await?.records)
    }

    async fn append(&self, record: &Record) -> Result<()> {
        let mut document = self.read_document().await?;
        document.records.push(record.clone());
        self.write_document(&document).await?;

        tracing::debug!(
            path = %self.path.display(),
            count = document.records.len(),
            "appended record to ledger file"
        );
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        self.write_document(&LedgerDocument::default()).await?;
        tracing::info!(path = %self.path.display(), "cleared ledger file");
        Ok(())
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}
