//! HTML parsers for KIDA result pages
//!
//! Contains modules for the pagination bar and the species result table.

pub mod pagination;
pub mod species;

pub use pagination::parse_pagination;
pub use species::parse_species_page;

use scraper::Selector;

use crate::error::{KidaError, Result};

/// Compiles a CSS selector, mapping failures to `ParseError`
pub(crate) fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| KidaError::ParseError(format!("Invalid selector: {:?}", e)))
}
