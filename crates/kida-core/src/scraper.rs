//! Main scraper API for KIDA
//!
//! Provides the high-level API combining the HTTP client, form builders
//! and page parsers. A search posts its form once, reads the pagination
//! bar of the first page, then walks every result page in order.

use std::time::Duration;

use crate::client::{ClientConfig, KidaClient};
use crate::error::{KidaError, Result};
use crate::parser::{parse_pagination, parse_species_page};
use crate::query::{build_element_query, build_species_query};
use crate::types::{ChargeFilter, QueryParams, SearchType, SpeciesTable};
use crate::url::{ELEMENT_SEARCH, SPECIES_SEARCH, build_search_url};

/// Main scraper API for KIDA
///
/// Every query re-fetches all of its pages; nothing is cached between calls.
pub struct KidaScraper {
    client: KidaClient,
}

impl KidaScraper {
    /// Create a new scraper with default configuration
    ///
    /// # Errors
    /// Returns error if HTTP client initialization fails
    pub fn new() -> Result<Self> {
        let client = KidaClient::new()?;
        Ok(Self { client })
    }

    /// Create a new scraper with custom client configuration
    ///
    /// # Errors
    /// Returns error if HTTP client initialization fails
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        let client = KidaClient::with_config(config)?;
        Ok(Self { client })
    }

    /// Search species by name using the configured timeout
    ///
    /// # Example
    /// ```no_run
    /// # async fn example() -> kida_core::Result<()> {
    /// use kida_core::{KidaScraper, SearchType};
    /// let scraper = KidaScraper::new()?;
    /// let table = scraper.query_species("H2O", SearchType::Common).await?;
    /// for row in table.rows() {
    ///     println!("{} {} ({})", row.formula, row.name, row.state);
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn query_species(&self, name: &str, search_type: SearchType) -> Result<SpeciesTable> {
        self.query_species_with_timeout(name, search_type, self.client.default_timeout())
            .await
    }

    /// Search species by name
    ///
    /// # Arguments
    /// * `name` - Species name, case sensitive (e.g., "H2O")
    /// * `search_type` - Match mode; not sent to the server
    /// * `timeout` - Applied to every request of the search
    ///
    /// # Errors
    /// - `InvalidQuery` if name is empty or whitespace only
    /// - `TransportError` if any request fails or times out
    /// - `ParseError` if a page does not have the expected layout
    pub async fn query_species_with_timeout(
        &self,
        name: &str,
        search_type: SearchType,
        timeout: Duration,
    ) -> Result<SpeciesTable> {
        validate_name(name, "Species")?;
        let params = build_species_query(name, search_type);
        self.search(SPECIES_SEARCH, &params, timeout).await
    }

    /// Search species containing an element using the configured timeout
    pub async fn query_element(&self, name: &str, charges: &ChargeFilter) -> Result<SpeciesTable> {
        self.query_element_with_timeout(name, charges, self.client.default_timeout())
            .await
    }

    /// Search species containing an element
    ///
    /// # Arguments
    /// * `name` - Element name (e.g., "Fe")
    /// * `charges` - Ionization states to include
    /// * `timeout` - Applied to every request of the search
    ///
    /// # Errors
    /// - `InvalidQuery` if name is empty or whitespace only
    /// - `TransportError` if any request fails or times out
    /// - `ParseError` if a page does not have the expected layout
    pub async fn query_element_with_timeout(
        &self,
        name: &str,
        charges: &ChargeFilter,
        timeout: Duration,
    ) -> Result<SpeciesTable> {
        validate_name(name, "Element")?;
        let params = build_element_query(name, charges);
        self.search(ELEMENT_SEARCH, &params, timeout).await
    }

    /// Reaction search
    ///
    /// Not supported: always returns `None` and never touches the network.
    pub fn query_reaction(&self, name: &str, search_type: &str) -> Option<SpeciesTable> {
        log::warn!(
            "Reaction search is not supported (name={}, type={}) - returning no result",
            name,
            search_type
        );
        None
    }

    /// Collect every page of a result set
    ///
    /// Reads the pagination bar of `first_page`, then fetches pages
    /// `1..=last_page` one after another and concatenates their columns.
    /// The first page is fetched again through its page URL.
    ///
    /// # Errors
    /// Any transport or parse failure aborts the walk; rows gathered
    /// from earlier pages are dropped.
    pub async fn scrape_pages(&self, first_page: &str, timeout: Duration) -> Result<SpeciesTable> {
        let pagination = parse_pagination(first_page)?;
        let urls = pagination.page_urls(self.client.base_url());
        log::debug!("Result set spans {} page(s)", urls.len());

        let mut table = SpeciesTable::default();
        for (index, url) in urls.iter().enumerate() {
            log::debug!("Fetching page {}/{}: {}", index + 1, urls.len(), url);
            let html = self.client.fetch(url, timeout).await?;
            let page = parse_species_page(&html)?;
            log::debug!("Page {}: {} species", index + 1, page.len());
            table.append(page);
        }

        log::info!(
            "Scrape complete - {} species over {} page(s)",
            table.len(),
            urls.len()
        );
        Ok(table)
    }

    async fn search(
        &self,
        endpoint: &str,
        params: &QueryParams,
        timeout: Duration,
    ) -> Result<SpeciesTable> {
        let url = build_search_url(self.client.base_url(), endpoint);
        let first_page = self.client.post_form(&url, params, timeout).await?;
        self.scrape_pages(&first_page, timeout).await
    }
}

fn validate_name(name: &str, what: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(KidaError::InvalidQuery(format!(
            "{} name cannot be empty",
            what
        )));
    }
    Ok(())
}
