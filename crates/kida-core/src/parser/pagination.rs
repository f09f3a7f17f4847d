//! Pagination parser for KIDA result pages
//!
//! Finds the "last page" link of a result set and turns it into
//! a [`Pagination`] descriptor.

use scraper::Html;

use super::selector;
use crate::error::{KidaError, Result};
use crate::types::Pagination;
use crate::url::parse_pagination_href;

/// Parses the pagination bar of a first result page
///
/// Takes the last link target inside the `pagination-element` spans.
///
/// # Errors
/// Returns `ParseError` if the page has no pagination links (this is how
/// a search without results looks) or the last link is malformed.
pub fn parse_pagination(html: &str) -> Result<Pagination> {
    let document = Html::parse_document(html);
    let link_selector = selector("span.pagination-element[href], span.pagination-element [href]")?;

    let last_href = document
        .select(&link_selector)
        .filter_map(|element| element.value().attr("href"))
        .last()
        .ok_or_else(|| KidaError::ParseError("pagination element not found".to_string()))?;

    parse_pagination_href(last_href.trim())
}
