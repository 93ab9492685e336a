//! Tabular export of collected records (XLSX, CSV, JSON).

use crate::config::{Config, OutputFormat};
use crate::error::ExportError;
use crate::firmy::models::{or_not_available, BusinessRecord};
use rust_xlsxwriter::Workbook;
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use tracing::{debug, info};

/// Exported column order.
pub const COLUMNS: [&str; 8] = [
    "Original_Address",
    "Company",
    "Address",
    "Description",
    "Phone",
    "Email",
    "Website",
    "Detail_Link",
];

/// Spreadsheet convention that keeps a cell as text.
pub const TEXT_MARKER: char = '\'';

/// One output row. Field order matches [`COLUMNS`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportRow {
    #[serde(rename = "Original_Address")]
    pub original_address: String,
    #[serde(rename = "Company")]
    pub company: String,
    #[serde(rename = "Address")]
    pub address: String,
    #[serde(rename = "Description")]
    pub description: String,
    #[serde(rename = "Phone")]
    pub phone: String,
    #[serde(rename = "Email")]
    pub email: String,
    #[serde(rename = "Website")]
    pub website: String,
    #[serde(rename = "Detail_Link")]
    pub detail_link: String,
}

impl ExportRow {
    /// Flattens a record; missing fields become `N/A`.
    pub fn from_record(record: &BusinessRecord, phone_text_marker: bool) -> Self {
        let phone = match record.phone.as_deref() {
            Some(phone) if phone_text_marker => format!("{TEXT_MARKER}{phone}"),
            other => or_not_available(other),
        };

        Self {
            original_address: record.original_address.clone(),
            company: or_not_available(record.company.as_deref()),
            address: or_not_available(record.address.as_deref()),
            description: or_not_available(record.description.as_deref()),
            phone,
            email: or_not_available(record.email.as_deref()),
            website: or_not_available(record.website.as_deref()),
            detail_link: or_not_available(record.detail_link.as_deref()),
        }
    }

    /// Values in [`COLUMNS`] order.
    pub fn values(&self) -> [&str; 8] {
        [
            self.original_address.as_str(),
            self.company.as_str(),
            self.address.as_str(),
            self.description.as_str(),
            self.phone.as_str(),
            self.email.as_str(),
            self.website.as_str(),
            self.detail_link.as_str(),
        ]
    }
}

/// What an export call did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    Written { path: PathBuf, rows: usize },
    /// Nothing to export; no file was touched.
    Skipped,
}

/// Writes records to a file in the configured format.
pub struct Exporter {
    path: PathBuf,
    format: OutputFormat,
    phone_text_marker: bool,
}

impl Exporter {
    pub fn new(path: impl Into<PathBuf>, format: OutputFormat) -> Self {
        Self { path: path.into(), format, phone_text_marker: true }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.output, config.format).phone_text_marker(config.phone_text_marker)
    }

    /// Enables or disables the leading `'` on phone numbers.
    pub fn phone_text_marker(mut self, enabled: bool) -> Self {
        self.phone_text_marker = enabled;
        self
    }

    /// Writes all records, overwriting the output file.
    ///
    /// An empty slice writes nothing and returns [`ExportOutcome::Skipped`].
    pub fn export(&self, records: &[BusinessRecord]) -> Result<ExportOutcome, ExportError> {
        if records.is_empty() {
            info!("No results were found to export");
            return Ok(ExportOutcome::Skipped);
        }

        let rows: Vec<ExportRow> = records
            .iter()
            .map(|record| ExportRow::from_record(record, self.phone_text_marker))
            .collect();

        match self.format {
            OutputFormat::Xlsx => self.write_xlsx(&rows)?,
            OutputFormat::Csv => self.write_csv(&rows, self.create()?)?,
            OutputFormat::Json => self.write_json(&rows, self.create()?)?,
        }

        debug!("Wrote {} rows to {}", rows.len(), self.path.display());
        Ok(ExportOutcome::Written { path: self.path.clone(), rows: rows.len() })
    }

    fn create(&self) -> Result<BufWriter<File>, ExportError> {
        let file = File::create(&self.path).map_err(|source| self.io_error(source))?;
        Ok(BufWriter::new(file))
    }

    /// Single sheet: header row, then one row per record, no index column.
    fn write_xlsx(&self, rows: &[ExportRow]) -> Result<(), ExportError> {
        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();

        for (col, header) in (0u16..).zip(COLUMNS) {
            sheet.write_string(0, col, header)?;
        }
        for (row, record) in (1u32..).zip(rows) {
            for (col, value) in (0u16..).zip(record.values()) {
                sheet.write_string(row, col, value)?;
            }
        }

        workbook.save(&self.path)?;
        Ok(())
    }

    fn write_csv<W: Write>(&self, rows: &[ExportRow], writer: W) -> Result<(), ExportError> {
        let mut csv = csv::Writer::from_writer(writer);
        for row in rows {
            csv.serialize(row)?;
        }
        csv.flush().map_err(|source| self.io_error(source))
    }

    fn write_json<W: Write>(&self, rows: &[ExportRow], mut writer: W) -> Result<(), ExportError> {
        serde_json::to_writer_pretty(&mut writer, rows)?;
        writer.flush().map_err(|source| self.io_error(source))
    }

    fn io_error(&self, source: std::io::Error) -> ExportError {
        ExportError::Io { path: self.path.clone(), source }
    }
}
