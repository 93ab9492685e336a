//! Error types for fetching, scraping runs and export.

use crate::firmy::models::BusinessRecord;
use std::path::PathBuf;
use thiserror::Error;

/// Transport-level failure talking to the directory.
///
/// HTTP error statuses are not represented here: they come back as a
/// [`Page`](crate::firmy::client::Page) and are handled by the extractor.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("failed to set up HTTP client")]
    Setup {
        #[source]
        source: wreq::Error,
    },

    #[error("request to {url} failed")]
    Request {
        url: String,
        #[source]
        source: wreq::Error,
    },

    #[error("failed to read response body from {url}")]
    Body {
        url: String,
        #[source]
        source: wreq::Error,
    },
}

/// Why a scraping run did not complete.
#[derive(Debug, Error)]
pub enum ScrapeError {
    /// The address list does not exist. Raised before any network activity.
    #[error("input file not found: {}", path.display())]
    MissingInput { path: PathBuf },

    #[error(transparent)]
    Client(#[from] FetchError),

    #[error("failed to read input file {}", path.display())]
    ReadInput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A transport failure stopped the run. `partial` holds every record
    /// completed before the failure, including earlier businesses of the
    /// failing address.
    #[error("run interrupted at address {index} ({address})")]
    Interrupted {
        index: usize,
        address: String,
        #[source]
        source: FetchError,
        partial: Vec<BusinessRecord>,
    },

    #[error(transparent)]
    Export(#[from] ExportError),
}

impl ScrapeError {
    /// Records collected before the failure, if any survive.
    pub fn partial_records(&self) -> &[BusinessRecord] {
        match self {
            ScrapeError::Interrupted { partial, .. } => partial,
            _ => &[],
        }
    }
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to write {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write CSV row")]
    Csv(#[from] csv::Error),

    #[error("failed to serialize JSON output")]
    Json(#[from] serde_json::Error),

    #[error("failed to write spreadsheet")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),
}
