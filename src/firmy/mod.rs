//! firmy.cz-specific modules for HTTP client, page schema, parsing, and data models.

pub mod client;
pub mod extractor;
pub mod models;
pub mod parser;
pub mod selectors;

pub use client::{DirectoryFetch, FirmyClient, Page};
pub use extractor::{search_url, Extractor};
pub use models::{BusinessRecord, ContactDetails, Listing, NOT_AVAILABLE};
pub use parser::Parser;
