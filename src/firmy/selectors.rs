//! CSS selectors and markers for firmy.cz HTML parsing.
//!
//! Every structural marker the scraper depends on lives here. When the site
//! changes its markup, update this file and the fixtures under
//! `tests/fixtures/`, nothing else.

use scraper::Selector;
use std::sync::LazyLock;

/// Selectors for the search results page (`/?q=...`).
pub mod search {
    use super::*;

    /// Listing container, one per business summary.
    pub static LISTING: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse("div.premiseBox").unwrap());

    /// Heading that wraps the company link. Only the first one counts.
    pub static HEADING: LazyLock<Selector> = LazyLock::new(|| Selector::parse("h3").unwrap());

    /// Company name anchor, looked up inside [`HEADING`].
    pub static COMPANY_TITLE: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse("a.companyTitle").unwrap());

    /// Street address anchor.
    pub static ADDRESS: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse("a.address").unwrap());

    /// Short business description.
    pub static DESCRIPTION: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse("div.description").unwrap());

    /// Attribute on [`COMPANY_TITLE`] holding the detail page link.
    pub static DETAIL_LINK_ATTR: &str = "href";
}

/// Selectors for a business detail page.
pub mod detail {
    use super::*;

    /// Primary phone block.
    pub static PHONE_BLOCK: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse("div.value.detailPhone.detailPhonePrimary").unwrap());

    /// Origin phone number, looked up inside [`PHONE_BLOCK`].
    pub static PHONE_NUMBER: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse("span[data-dot='origin-phone-number']").unwrap());

    /// Company website anchor.
    pub static WEBSITE: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse("a.detailWebUrl").unwrap());

    /// Any anchor pointing at an email address.
    pub static EMAIL: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse("a[href^='mailto:']").unwrap());

    /// Prefix stripped from [`EMAIL`] hrefs.
    pub static EMAIL_SCHEME: &str = "mailto:";

    /// Website hrefs containing this are placeholders, not real links.
    pub static WEBSITE_PLACEHOLDER: &str = "##";
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Html;

    #[test]
    fn test_selectors_compile() {
        let _ = &*search::LISTING;
        let _ = &*search::HEADING;
        let _ = &*search::COMPANY_TITLE;
        let _ = &*search::ADDRESS;
        let _ = &*search::DESCRIPTION;
        let _ = &*detail::PHONE_BLOCK;
        let _ = &*detail::PHONE_NUMBER;
        let _ = &*detail::WEBSITE;
        let _ = &*detail::EMAIL;
    }

    #[test]
    fn test_listing_selector_matching() {
        let html = Html::parse_document(
            r#"<div class="premiseBox">
                <h3><a class="companyTitle" href="/detail/1">Pekárna</a></h3>
            </div>
            <div class="premiseBox"></div>
            <div class="premise">not a listing</div>"#,
        );

        let listings: Vec<_> = html.select(&search::LISTING).collect();
        assert_eq!(listings.len(), 2);

        let title = listings[0].select(&search::COMPANY_TITLE).next().unwrap();
        assert_eq!(title.value().attr(search::DETAIL_LINK_ATTR), Some("/detail/1"));
    }

    #[test]
    fn test_phone_block_requires_all_classes() {
        let html = Html::parse_document(
            r#"<div class="value detailPhone">secondary</div>
            <div class="value detailPhone detailPhonePrimary">primary</div>"#,
        );

        let blocks: Vec<_> = html.select(&detail::PHONE_BLOCK).collect();
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].text().collect::<String>(), "primary");
    }

    #[test]
    fn test_email_selector_matches_prefix_only() {
        let html = Html::parse_document(
            r#"<a href="https://example.cz/mailto:x">web</a>
            <a href="mailto:info@example.cz">mail</a>"#,
        );

        let emails: Vec<_> = html.select(&detail::EMAIL).collect();
        assert_eq!(emails.len(), 1);
        assert_eq!(emails[0].value().attr("href"), Some("mailto:info@example.cz"));
    }
}
