//! Core data types for the KIDA client
//!
//! Contains the search criteria, pagination descriptor and the
//! column-oriented species table returned by every species search.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::KidaError;

/// Ordered form parameters; keys may repeat and order is wire order
pub type QueryParams = Vec<(String, String)>;

/// How a species name should be matched by the server
///
/// Only informational: the species search form carries the name alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchType {
    /// Common name or formula, isomers included
    #[default]
    Common,
    /// Exact formula
    Exact,
    /// IUPAC International Chemical Identifier
    Inchi,
}

impl SearchType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SearchType::Common => "common",
            SearchType::Exact => "exact",
            SearchType::Inchi => "inchi",
        }
    }
}

impl fmt::Display for SearchType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SearchType {
    type Err = KidaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "common" => Ok(SearchType::Common),
            "exact" => Ok(SearchType::Exact),
            "inchi" => Ok(SearchType::Inchi),
            other => Err(KidaError::InvalidQuery(format!(
                "unknown search type '{}'",
                other
            ))),
        }
    }
}

/// Ionization state used to filter element searches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Charge {
    Positive,
    Negative,
    Neutral,
}

impl Charge {
    /// Every charge, in the order the search form expects them
    pub const ALL: [Charge; 3] = [Charge::Positive, Charge::Negative, Charge::Neutral];

    /// Form field name for this charge
    pub fn as_str(&self) -> &'static str {
        match self {
            Charge::Positive => "positive",
            Charge::Negative => "negative",
            Charge::Neutral => "neutral",
        }
    }

    fn index(self) -> usize {
        match self {
            Charge::Positive => 0,
            Charge::Negative => 1,
            Charge::Neutral => 2,
        }
    }
}

impl fmt::Display for Charge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Charge {
    type Err = KidaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "positive" => Ok(Charge::Positive),
            "negative" => Ok(Charge::Negative),
            "neutral" => Ok(Charge::Neutral),
            other => Err(KidaError::InvalidQuery(format!("unknown charge '{}'", other))),
        }
    }
}

/// Set of charges to include in an element search
///
/// Defaults to all three charges.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChargeFilter {
    present: [bool; 3],
}

impl ChargeFilter {
    /// Filter matching every charge
    pub fn all() -> Self {
        Self { present: [true; 3] }
    }

    /// Empty filter
    pub fn none() -> Self {
        Self { present: [false; 3] }
    }

    /// Filter containing a single charge
    pub fn only(charge: Charge) -> Self {
        Self::none().with(charge)
    }

    /// Returns the filter with `charge` added
    pub fn with(mut self, charge: Charge) -> Self {
        self.present[charge.index()] = true;
        self
    }

    pub fn contains(&self, charge: Charge) -> bool {
        self.present[charge.index()]
    }

    pub fn is_empty(&self) -> bool {
        self.present.iter().all(|p| !p)
    }
}

impl Default for ChargeFilter {
    fn default() -> Self {
        Self::all()
    }
}

impl FromIterator<Charge> for ChargeFilter {
    fn from_iter<I: IntoIterator<Item = Charge>>(iter: I) -> Self {
        iter.into_iter().fold(Self::none(), ChargeFilter::with)
    }
}

/// Page layout discovered from the "last page" navigation link
///
/// Every page of a result set lives at
/// `{base}/{search_type}/{page_number}/{suffix}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pagination {
    /// Number of the last page, at least 1
    pub last_page: u32,
    /// Search-type path segment shared by all pages
    pub search_type: String,
    /// Trailing path segment shared by all pages
    pub suffix: String,
}

impl Pagination {
    /// URL of a single page
    pub fn page_url(&self, base_url: &str, page: u32) -> String {
        format!(
            "{}/{}/{}/{}",
            base_url.trim_end_matches('/'),
            self.search_type,
            page,
            self.suffix
        )
    }

    /// URLs of pages `1..=last_page`, in page order
    pub fn page_urls(&self, base_url: &str) -> Vec<String> {
        (1..=self.last_page)
            .map(|page| self.page_url(base_url, page))
            .collect()
    }
}

/// Species search results as four aligned columns
///
/// Index `i` of every column describes the same species row. Used for
/// a single parsed page as well as for the result aggregated over all pages.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeciesTable {
    /// Links to the species detail pages
    pub details: Vec<String>,

    /// Chemical formulas (e.g., "H2O")
    pub formulas: Vec<String>,

    /// Display names (e.g., "Water")
    pub names: Vec<String>,

    /// Ionization / energy states
    pub states: Vec<String>,
}

/// One aligned row borrowed from a [`SpeciesTable`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpeciesRow<'a> {
    pub detail: &'a str,
    pub formula: &'a str,
    pub name: &'a str,
    pub state: &'a str,
}

impl SpeciesTable {
    /// Number of rows
    pub fn len(&self) -> usize {
        self.details.len()
    }

    pub fn is_empty(&self) -> bool {
        self.details.is_empty()
    }

    /// Moves every row of `other` after the rows of `self`
    pub fn append(&mut self, mut other: SpeciesTable) {
        self.details.append(&mut other.details);
        self.formulas.append(&mut other.formulas);
        self.names.append(&mut other.names);
        self.states.append(&mut other.states);
    }

    /// Iterates rows in order
    pub fn rows(&self) -> impl Iterator<Item = SpeciesRow<'_>> {
        self.details
            .iter()
            .zip(&self.formulas)
            .zip(&self.names)
            .zip(&self.states)
            .map(|(((detail, formula), name), state)| SpeciesRow {
                detail,
                formula,
                name,
                state,
            })
    }

    /// Consumes the table into its four columns
    pub fn into_columns(self) -> (Vec<String>, Vec<String>, Vec<String>, Vec<String>) {
        (self.details, self.formulas, self.names, self.states)
    }
}
