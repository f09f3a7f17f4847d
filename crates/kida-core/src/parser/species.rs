//! Species result table parser for KIDA
//!
//! One result page holds three kinds of cells per species row: a details
//! link, two `species_name` cells (formula then state) and one
//! `species_desc` cell holding the display name.

use scraper::Html;

use super::selector;
use crate::error::{KidaError, Result};
use crate::types::SpeciesTable;

/// Parses one species result page into four aligned columns
///
/// # Arguments
/// * `html` - Raw HTML of a single result page
///
/// # Returns
/// A [`SpeciesTable`] with one entry per species row, empty if the
/// page holds no rows
///
/// # Errors
/// Returns `ParseError` if the cell counts do not line up, i.e. unless
/// `details == descriptions == name cells / 2`
pub fn parse_species_page(html: &str) -> Result<SpeciesTable> {
    let document = Html::parse_document(html);

    let details_selector =
        selector("span.species_details[href], span.species_details [href]")?;
    let name_selector = selector("td.species_name")?;
    let desc_selector = selector("td.species_desc")?;

    let details: Vec<String> = document
        .select(&details_selector)
        .filter_map(|element| element.value().attr("href"))
        .map(|href| href.trim().to_string())
        .collect();

    let name_cells: Vec<String> = document
        .select(&name_selector)
        .map(|cell| cell_text(&cell))
        .collect();

    let names: Vec<String> = document
        .select(&desc_selector)
        .map(|cell| cell_text(&cell))
        .collect();

    if name_cells.len() % 2 != 0
        || details.len() != names.len()
        || details.len() != name_cells.len() / 2
    {
        return Err(KidaError::ParseError(format!(
            "misaligned species columns: {} detail links, {} descriptions, {} name cells",
            details.len(),
            names.len(),
            name_cells.len()
        )));
    }

    // formula and state alternate in the name column
    let (formulas, states): (Vec<_>, Vec<_>) = name_cells
        .chunks_exact(2)
        .map(|pair| (pair[0].clone(), pair[1].clone()))
        .unzip();

    Ok(SpeciesTable {
        details,
        formulas,
        names,
        states,
    })
}

fn cell_text(cell: &scraper::ElementRef) -> String {
    cell.text().collect::<String>().trim().to_string()
}
