//! KIDA Client Core Library
//!
//! Provides an async API for species searches against KIDA, the KInetic
//! Database for Astrochemistry.
//!
//! # Overview
//!
//! This crate provides a complete scraping solution for KIDA with:
//! - Form builders for species-by-name and species-by-element searches
//! - A rate-limited HTTP client
//! - HTML parsers for the pagination bar and the species result table
//! - A high-level API that walks every result page and returns one table
//!
//! # Example
//!
//! ```no_run
//! use kida_core::{Charge, ChargeFilter, KidaScraper, Result, SearchType};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let scraper = KidaScraper::new()?;
//!
//!     // Species by name
//!     let water = scraper.query_species("H2O", SearchType::Common).await?;
//!     for row in water.rows() {
//!         println!("{}\t{}\t{}\t{}", row.formula, row.name, row.state, row.detail);
//!     }
//!
//!     // Cations containing iron
//!     let iron = scraper
//!         .query_element("Fe", &ChargeFilter::only(Charge::Positive))
//!         .await?;
//!     println!("{} iron cations", iron.len());
//!
//!     Ok(())
//! }
//! ```
//!
//! # Pagination
//!
//! Results are spread over numbered pages. The scraper reads the "last
//! page" link on the first page and fetches every page in order; a
//! failure on any page fails the whole search.

mod client;
mod error;
pub mod parser;
mod query;
mod scraper;
mod types;
pub mod url;

// Re-export client types
pub use client::{ClientConfig, KidaClient, RateLimiter};

// Re-export error types
pub use error::{KidaError, Result};

// Re-export parser functions
pub use parser::{parse_pagination, parse_species_page};

// Re-export form builders
pub use query::{build_element_query, build_species_query, charge_params, encode_form};

// Re-export main scraper API
pub use scraper::KidaScraper;

// Re-export data types
pub use types::{
    Charge, ChargeFilter, Pagination, QueryParams, SearchType, SpeciesRow, SpeciesTable,
};

// Re-export URL helpers for convenience
pub use url::{build_search_url, parse_pagination_href};
