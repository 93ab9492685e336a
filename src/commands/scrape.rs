//! Scrape command: addresses in, spreadsheet out.

use crate::config::Config;
use crate::error::{FetchError, ScrapeError};
use crate::export::{ExportOutcome, Exporter};
use crate::firmy::{BusinessRecord, DirectoryFetch, Extractor, FirmyClient};
use crate::input::load_addresses;
use crate::pacing::{DelayPolicy, Pacer, RandomDelay};
use tracing::{debug, error, info, warn};

/// Outcome of a completed run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    /// Number of input addresses processed
    pub addresses: usize,
    /// Number of records collected across all addresses
    pub businesses: usize,
    pub export: ExportOutcome,
}

/// Runs the full pipeline for every address in the input file.
pub struct ScrapeCommand {
    config: Config,
}

impl ScrapeCommand {
    /// Creates a new scrape command.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Executes the run with a real HTTP client and randomized delays.
    pub async fn execute(&self) -> Result<Report, ScrapeError> {
        let client = FirmyClient::new(&self.config)?;
        let pacer = RandomDelay::new(self.config.delay_min_ms, self.config.delay_max_ms);

        self.execute_with(&client, &pacer).await
    }

    /// Executes the run with a provided client and pacer (for testing).
    ///
    /// The address list is read before any request is made. If the run is
    /// interrupted and `export_partial` is set, the records collected so far
    /// are exported before the error is returned.
    pub async fn execute_with<C, P>(&self, client: &C, pacer: &P) -> Result<Report, ScrapeError>
    where
        C: DirectoryFetch,
        P: Pacer,
    {
        let addresses = load_addresses(&self.config.input)?;
        info!("Found {} addresses to process", addresses.len());

        let exporter = Exporter::from_config(&self.config);

        let records = match self.scrape_addresses(client, pacer, &addresses).await {
            Ok(records) => records,
            Err(err) => {
                if self.config.export_partial {
                    export_partial(&exporter, err.partial_records());
                }
                return Err(err);
            }
        };

        let export = exporter.export(&records)?;

        Ok(Report { addresses: addresses.len(), businesses: records.len(), export })
    }

    /// Scrapes every address in order, pausing between them.
    pub async fn scrape_addresses<C, P>(
        &self,
        client: &C,
        pacer: &P,
        addresses: &[String],
    ) -> Result<Vec<BusinessRecord>, ScrapeError>
    where
        C: DirectoryFetch,
        P: Pacer,
    {
        let extractor = Extractor::new(client);
        let policy = DelayPolicy::from_trailing(self.config.trailing_delay);
        let total = addresses.len();

        let mut records: Vec<BusinessRecord> = Vec::new();

        for (index, address) in addresses.iter().enumerate() {
            info!("Processing address {}/{}: {}", index + 1, total, address);

            let before = records.len();
            if let Err(source) = scrape_address(&extractor, address, &mut records).await {
                return Err(ScrapeError::Interrupted {
                    index: index + 1,
                    address: address.clone(),
                    source,
                    partial: records,
                });
            }

            info!("Found {} businesses at this address", records.len() - before);

            if policy.pause_after(index, total) {
                pacer.pause().await;
            }
        }

        Ok(records)
    }
}

/// Searches one address and enriches each listing from its detail page.
///
/// Each record is pushed onto `records` as soon as it is complete, so a
/// failure partway through keeps the businesses already processed.
async fn scrape_address<C>(
    extractor: &Extractor<'_, C>,
    address: &str,
    records: &mut Vec<BusinessRecord>,
) -> Result<(), FetchError>
where
    C: DirectoryFetch + ?Sized,
{
    let listings = extractor.search_businesses(address).await?;
    records.reserve(listings.len());

    for listing in listings {
        let mut record = BusinessRecord::new(address, listing);

        if let Some(link) = record.detail_link.clone() {
            let contact = extractor.fetch_contact_details(&link).await?;
            if contact.is_empty() {
                debug!("No contact details on {}", link);
            }
            record = record.with_contact(contact);
        } else {
            debug!("No detail link for {:?}, skipping contact lookup", record.company);
        }

        records.push(record);
    }

    Ok(())
}

fn export_partial(exporter: &Exporter, partial: &[BusinessRecord]) {
    match exporter.export(partial) {
        Ok(ExportOutcome::Written { path, rows }) => {
            warn!("Run interrupted; exported {} partial results to {}", rows, path.display());
        }
        Ok(ExportOutcome::Skipped) => {}
        Err(e) => error!("Failed to export partial results: {}", e),
    }
}
