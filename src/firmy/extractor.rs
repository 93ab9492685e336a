//! Search and detail extraction: fetch a page, check its status, parse it.

use crate::error::FetchError;
use crate::firmy::client::DirectoryFetch;
use crate::firmy::models::{ContactDetails, Listing};
use crate::firmy::parser::Parser;
use tracing::{info, warn};

/// Builds the search URL for an address.
///
/// Spaces become `+`; every other character is passed through untouched.
pub fn search_url(base_url: &str, address: &str) -> String {
    format!("{}/?q={}", base_url.trim_end_matches('/'), address.replace(' ', "+"))
}

/// Runs searches and detail lookups against one directory client.
pub struct Extractor<'a, C: DirectoryFetch + ?Sized> {
    client: &'a C,
    parser: Parser,
}

impl<'a, C: DirectoryFetch + ?Sized> Extractor<'a, C> {
    pub fn new(client: &'a C) -> Self {
        Self { client, parser: Parser::new(client.base_url()) }
    }

    /// Searches the directory for businesses at `address`.
    ///
    /// A non-200 response yields no listings. Transport failures propagate.
    pub async fn search_businesses(&self, address: &str) -> Result<Vec<Listing>, FetchError> {
        let url = search_url(self.client.base_url(), address);
        info!("Searching: {}", url);

        let page = self.client.fetch(&url).await?;
        if !page.is_ok() {
            warn!(
                "Failed to fetch search results for {}. HTTP status: {}",
                address, page.status
            );
            return Ok(Vec::new());
        }

        Ok(self.parser.parse_search(&page.body))
    }

    /// Fetches phone, email and website from a detail page.
    ///
    /// A non-200 response yields empty contact details. Transport failures
    /// propagate.
    pub async fn fetch_contact_details(&self, url: &str) -> Result<ContactDetails, FetchError> {
        let page = self.client.fetch(url).await?;
        if !page.is_ok() {
            warn!("Failed to fetch details from {}. HTTP status: {}", url, page.status);
            return Ok(ContactDetails::default());
        }

        Ok(self.parser.parse_detail(&page.body))
    }
}
