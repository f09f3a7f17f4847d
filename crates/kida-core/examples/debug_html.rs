//! Debug script to inspect the HTML of a KIDA species search
//!
//! Run with: cargo run --example debug_html -p kida-core -- H2O

use std::time::Duration;

use kida_core::url::{KIDA_BASE_URL, SPECIES_SEARCH};
use kida_core::{
    KidaClient, SearchType, build_search_url, build_species_query, parse_pagination,
    parse_species_page,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let name = std::env::args().nth(1).unwrap_or_else(|| "H2O".to_string());
    let client = KidaClient::new()?;

    println!("Posting species search for '{}'...\n", name);

    let url = build_search_url(KIDA_BASE_URL, SPECIES_SEARCH);
    let params = build_species_query(&name, SearchType::Common);
    let html = client.post_form(&url, &params, Duration::from_secs(30)).await?;

    // Save HTML to file for inspection
    std::fs::write("debug_species.html", &html)?;
    println!("HTML saved to debug_species.html");

    match parse_pagination(&html) {
        Ok(pagination) => println!("Pagination: {:?}", pagination),
        Err(e) => println!("Pagination not found: {}", e),
    }

    match parse_species_page(&html) {
        Ok(table) => println!("First page holds {} species", table.len()),
        Err(e) => println!("Species table did not parse: {}", e),
    }

    Ok(())
}
