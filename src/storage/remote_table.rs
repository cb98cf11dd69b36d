use anyhow::{Context, Result};
use reqwest::{Client, Method, RequestBuilder, StatusCode};

use crate::domain::Record;

use super::{LedgerBackend, RemoteConfig};

/// REST prefix of the hosted database's table API.
const REST_PATH: &str = "rest/v1";

/// Identifier column assumed on the remote table, used for ordering and clear-all.
const ID_COLUMN: &str = "id";

/// Ledger stored as rows of a hosted table, one row per record.
///
/// Every call is a single HTTP request. Failures are returned to the caller
/// as-is: there is no retry and no fallback to the local file.
#[derive(Clone)]
pub struct RemoteTableBackend {
    client: Client,
    endpoint: String,
    key: String,
}

impl RemoteTableBackend {
    pub fn new(config: &RemoteConfig) -> Result<Self> {
        let client = Client::builder()
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self::with_client(config, client))
    }

    /// Use a preconfigured client (proxy settings, timeouts, ...).
    pub fn with_client(config: &RemoteConfig, client: Client) -> Self {
        Self {
            client,
            endpoint: table_endpoint(&config.url, &config.table),
            key: config.key.clone(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn request(&self, method: Method) -> RequestBuilder {
        self.client
            .request(method, &self.endpoint)
            .header("apikey", &self.key)
            .bearer_auth(&self.key)
    }
}

impl LedgerBackend for RemoteTableBackend {
    async fn load(&self) -> Result<Vec<Record>> {
        let order = format!("{}.asc", ID_COLUMN);
        let response = self
            .request(Method::GET)
            .query(&[("select", "*"), ("order", order.as_str())])
            .send()
            .await
            .with_context(|| format!("Failed to reach remote table {}", self.endpoint))?;

        if response.status() == StatusCode::NOT_FOUND {
            tracing::warn!(endpoint = %self.endpoint, "remote table not found, treating as empty");
            return Ok(Vec::new());
        }

        let records: Vec<Record> = response
            .error_for_status()
            .context("Remote table rejected select")?
            .json()
            .await
            .context("Failed to decode remote rows")?;

        tracing::debug!(count = records.len(), "loaded records from remote table");
        Ok(records)
    }

    async fn append(&self, record: &Record) -> Result<()> {
        self.request(Method::POST)
            .header("Prefer", "return=minimal")
            .json(record)
            .send()
            .await
            .with_context(|| format!("Failed to reach remote table {}", self.endpoint))?
            .error_for_status()
            .context("Remote table rejected insert")?;

        tracing::debug!(date = %record.date, category = %record.category, "inserted remote row");
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        self.request(Method::DELETE)
            .query(&[(ID_COLUMN, "not.is.null")])
            .send()
            .await
            .with_context(|| format!("Failed to reach remote table {}", self.endpoint))?
            .error_for_status()
            .context("Remote table rejected delete")?;

        tracing::info!(endpoint = %self.endpoint, "cleared remote table");
        Ok(())
    }
}

impl std::fmt::Debug for RemoteTableBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RemoteTableBackend")
            .field("endpoint", &self.endpoint)
            .finish_non_exhaustive()
    }
}

/// `https://host/` + `budget_records` -> `https://host/rest/v1/budget_records`
fn table_endpoint(base_url: &str, table: &str) -> String {
    format!("{}/{}/{}", base_url.trim_end_matches('/'), REST_PATH, table)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_endpoint() {
        assert_eq!(
            table_endpoint("https://abc.supabase.co", "budget_records"),
            "https://abc.supabase.co/rest/v1/budget_records"
        );
        assert_eq!(
            table_endpoint("https://abc.supabase.co/", "budget_records"),
            "https://abc.supabase.co/rest/v1/budget_records"
        );
    }

    #[test]
    fn test_backend_endpoint_from_config() {
        let config =
            RemoteConfig::from_parts(Some("https://abc.supabase.co/"), Some("k"), "ledger")
                .unwrap();
        let backend = RemoteTableBackend::with_client(&config, Client::new());
        assert_eq!(backend.endpoint(), "https://abc.supabase.co/rest/v1/ledger");
    }
}
