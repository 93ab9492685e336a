//! HTML parser for firmy.cz search results and detail pages.

use crate::firmy::models::{ContactDetails, Listing};
use crate::firmy::selectors::{detail, search};
use scraper::{ElementRef, Html};
use tracing::{debug, trace};

/// Parser for firmy.cz HTML pages.
pub struct Parser {
    base_url: String,
}

impl Parser {
    /// Creates a parser that resolves relative links against `base_url`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self { base_url: base_url.into().trim_end_matches('/').to_string() }
    }

    /// Parses a search results page into listings, in page order.
    pub fn parse_search(&self, html: &str) -> Vec<Listing> {
        let document = Html::parse_document(html);

        let listings: Vec<Listing> = document
            .select(&search::LISTING)
            .map(|element| {
                let listing = self.parse_listing(element);
                trace!(
                    "Parsed listing: {} -> {}",
                    listing.company.as_deref().unwrap_or("?"),
                    listing.detail_link.as_deref().unwrap_or("?")
                );
                listing
            })
            .collect();

        debug!("Parsed {} listings", listings.len());
        listings
    }

    /// Parses contact details from a business detail page.
    pub fn parse_detail(&self, html: &str) -> ContactDetails {
        let document = Html::parse_document(html);

        let phone = document
            .select(&detail::PHONE_BLOCK)
            .next()
            .and_then(|block| block.select(&detail::PHONE_NUMBER).next())
            .map(element_text);

        // Placeholder links are dropped, not replaced by a later anchor
        let website = document
            .select(&detail::WEBSITE)
            .next()
            .and_then(|e| e.value().attr("href"))
            .filter(|href| !href.contains(detail::WEBSITE_PLACEHOLDER))
            .map(String::from);

        let email = document
            .select(&detail::EMAIL)
            .next()
            .and_then(|e| e.value().attr("href"))
            .map(|href| href.strip_prefix(detail::EMAIL_SCHEME).unwrap_or(href).to_string());

        ContactDetails { phone, email, website }
    }

    /// Parses a single listing container.
    fn parse_listing(&self, element: ElementRef) -> Listing {
        let title = element
            .select(&search::HEADING)
            .next()
            .and_then(|heading| heading.select(&search::COMPANY_TITLE).next());

        let company = title.map(element_text);

        let address = element.select(&search::ADDRESS).next().map(element_text);

        let description = element.select(&search::DESCRIPTION).next().map(element_text);

        let detail_link = title
            .and_then(|e| e.value().attr(search::DETAIL_LINK_ATTR))
            .map(|href| self.absolute_url(href));

        Listing { company, address, description, detail_link }
    }

    /// Prefixes relative links with the base URL.
    pub fn absolute_url(&self, href: &str) -> String {
        if href.starts_with("http") {
            href.to_string()
        } else {
            format!("{}{}", self.base_url, href)
        }
    }
}

/// Collects and trims all text beneath an element.
fn element_text(element: ElementRef) -> String {
    element.text().collect::<String>().trim().to_string()
}
