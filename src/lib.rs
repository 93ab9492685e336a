//! firmy-scraper - Sequential firmy.cz business directory scraper
//!
//! Searches the directory for each input address, follows every listing to
//! its detail page for contact details, and exports the merged records to a
//! spreadsheet file.

pub mod commands;
pub mod config;
pub mod error;
pub mod export;
pub mod firmy;
pub mod input;
pub mod pacing;

pub use config::Config;
pub use error::{ExportError, FetchError, ScrapeError};
pub use firmy::models::{BusinessRecord, ContactDetails, Listing};
