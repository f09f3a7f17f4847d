//! URL helpers for KIDA
//!
//! Endpoint constants, search URL construction and parsing of
//! pagination links.

use crate::error::{KidaError, Result};
use crate::types::Pagination;

/// Root of the KIDA web interface
pub const KIDA_BASE_URL: &str = "http://kida.obs.u-bordeaux1.fr";

/// Species-by-name search endpoint
pub const SPECIES_SEARCH: &str = "results_species/l/";

/// Species-by-element search endpoint
pub const ELEMENT_SEARCH: &str = "results_species_contains/l/";

/// Reaction search endpoint (not queried)
pub const REACTION_SEARCH: &str = "search_reaction/l/";

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Joins the base URL and an endpoint path with a single `/`
///
/// # Example
/// ```
/// use kida_core::url::{build_search_url, KIDA_BASE_URL, SPECIES_SEARCH};
/// let url = build_search_url(KIDA_BASE_URL, SPECIES_SEARCH);
/// assert_eq!(url, "http://kida.obs.u-bordeaux1.fr/results_species/l/");
/// ```
pub fn build_search_url(base_url: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

/// Parses the target of a "last page" link into a [`Pagination`]
///
/// The link must split on `/` into exactly four segments: an ignored
/// prefix, the search type, the last page number and a suffix.
///
/// # Errors
/// `ParseError` if the segment count is not four or the page number
/// is not a positive integer.
///
/// # Example
/// ```
/// use kida_core::url::parse_pagination_href;
/// let pagination = parse_pagination_href("/results_species/7/abc").unwrap();
/// assert_eq!(pagination.last_page, 7);
/// assert_eq!(pagination.search_type, "results_species");
/// assert_eq!(pagination.suffix, "abc");
/// ```
pub fn parse_pagination_href(href: &str) -> Result<Pagination> {
    let segments: Vec<&str> = href.split('/').collect();

    let [_, search_type, last_page, suffix] = segments.as_slice() else {
        return Err(KidaError::ParseError(format!(
            "pagination link '{}' has {} segments, expected 4",
            href,
            segments.len()
        )));
    };

    let last_page: u32 = last_page.trim().parse().map_err(|_| {
        KidaError::ParseError(format!(
            "pagination link '{}' has non-numeric page '{}'",
            href, last_page
        ))
    })?;

    if last_page == 0 {
        return Err(KidaError::ParseError(format!(
            "pagination link '{}' points at page 0",
            href
        )));
    }

    Ok(Pagination {
        last_page,
        search_type: search_type.to_string(),
        suffix: suffix.to_string(),
    })
}
