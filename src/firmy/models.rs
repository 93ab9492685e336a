//! Data models for directory listings, contact details and merged records.

/// Placeholder for any field that could not be extracted.
pub const NOT_AVAILABLE: &str = "N/A";

/// A business summary from a search results page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Listing {
    /// Company name
    pub company: Option<String>,
    /// Street address as shown on the listing
    pub address: Option<String>,
    /// Short description
    pub description: Option<String>,
    /// Absolute URL of the detail page
    pub detail_link: Option<String>,
}

/// Contact fields from a detail page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactDetails {
    /// Primary phone number, without any export formatting
    pub phone: Option<String>,
    /// Email address without the `mailto:` scheme
    pub email: Option<String>,
    /// Company website
    pub website: Option<String>,
}

impl ContactDetails {
    /// Returns true if no contact field was found.
    pub fn is_empty(&self) -> bool {
        self.phone.is_none() && self.email.is_none() && self.website.is_none()
    }
}

/// One business found for one input address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BusinessRecord {
    /// The input address whose search produced this record
    pub original_address: String,
    pub company: Option<String>,
    pub address: Option<String>,
    pub description: Option<String>,
    pub detail_link: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub website: Option<String>,
}

impl BusinessRecord {
    /// Creates a record from a listing, with no contact details yet.
    pub fn new(original_address: impl Into<String>, listing: Listing) -> Self {
        Self {
            original_address: original_address.into(),
            company: listing.company,
            address: listing.address,
            description: listing.description,
            detail_link: listing.detail_link,
            phone: None,
            email: None,
            website: None,
        }
    }

    /// Merges contact details into the record.
    pub fn with_contact(mut self, contact: ContactDetails) -> Self {
        self.phone = contact.phone;
        self.email = contact.email;
        self.website = contact.website;
        self
    }
}

/// Renders an optional field, falling back to [`NOT_AVAILABLE`].
pub fn or_not_available(value: Option<&str>) -> String {
    value.unwrap_or(NOT_AVAILABLE).to_string()
}
