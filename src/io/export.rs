use anyhow::Result;
use std::io::Write;

use crate::application::LedgerService;
use crate::storage::LedgerDocument;

/// Output formats understood by [`Exporter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl std::str::FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "json" => Ok(ExportFormat::Json),
            other => Err(format!("unknown export format '{other}', expected csv or json")),
        }
    }
}

/// Exporter for converting ledger records to CSV or JSON
pub struct Exporter<'a> {
    service: &'a LedgerService,
}

impl<'a> Exporter<'a> {
    pub fn new(service: &'a LedgerService) -> Self {
        Self { service }
    }

    /// Export records to CSV (`date,category,amount`). Returns the row count.
    pub async fn export_csv<W: Write>(&self, writer: W) -> Result<usize> {
        let records = self.service.records().await?;
        let mut csv_writer = csv::Writer::from_writer(writer);

        csv_writer.write_record(["date", "category", "amount"])?;
        for record in &records {
            csv_writer.write_record(&[
                record.date.format("%Y-%m-%d").to_string(),
                record.category.clone(),
                record.amount.to_string(),
            ])?;
        }

        csv_writer.flush()?;
        Ok(records.len())
    }

    /// Export records as the same JSON document the file backend writes.
    pub async fn export_json<W: Write>(&self, mut writer: W) -> Result<usize> {
        let document = LedgerDocument {
            records: self.service.records().await?,
        };

        serde_json::to_writer_pretty(&mut writer, &document)?;
        writeln!(writer)?;
        writer.flush()?;
        Ok(document.records.len())
    }

    /// Export in the given format. Returns the row count.
    pub async fn export<W: Write>(&self, format: ExportFormat, writer: W) -> Result<usize> {
        match format {
            ExportFormat::Csv => self.export_csv(writer).await,
            ExportFormat::Json => self.export_json(writer).await,
        }
    }
}
