//! Command-line frontend for KIDA species searches.
//!
//! ```text
//! kida species H2O [--search-type exact] [--timeout 30] [--json]
//! kida element Fe [--charge positive,neutral] [--json]
//! kida payload element Fe --charge negative
//! ```

use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use kida_core::url::{DEFAULT_TIMEOUT_SECS, KIDA_BASE_URL};
use kida_core::{
    Charge, ChargeFilter, ClientConfig, KidaScraper, SearchType, SpeciesTable,
    build_element_query, build_species_query, encode_form,
};

#[derive(Parser)]
#[command(name = "kida", about = "Search species in the KIDA astrochemistry database")]
struct Cli {
    /// Root URL of the KIDA server
    #[arg(long, global = true, default_value = KIDA_BASE_URL)]
    base_url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search species by name
    Species {
        #[command(flatten)]
        species: SpeciesArgs,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Search species containing an element
    Element {
        #[command(flatten)]
        element: ElementArgs,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Print the form body a search would post, without sending it
    Payload {
        #[command(subcommand)]
        search: PayloadCommands,
    },
}

#[derive(Subcommand)]
enum PayloadCommands {
    /// Species-by-name form
    Species(SpeciesArgs),
    /// Species-by-element form
    Element(ElementArgs),
}

#[derive(Args)]
struct SpeciesArgs {
    /// Species name, case sensitive (e.g. H2O)
    name: String,
    /// Match mode: common, exact or inchi
    #[arg(long, default_value = "common")]
    search_type: SearchType,
}

#[derive(Args)]
struct ElementArgs {
    /// Element name (e.g. Fe)
    name: String,
    /// Charges to include; all when omitted
    #[arg(long, value_delimiter = ',')]
    charge: Vec<Charge>,
}

impl ElementArgs {
    fn charges(&self) -> ChargeFilter {
        if self.charge.is_empty() {
            ChargeFilter::all()
        } else {
            self.charge.iter().copied().collect()
        }
    }
}

#[derive(Args)]
struct OutputArgs {
    /// Request timeout in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    timeout: u64,
    /// Print the result table as JSON
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init();
    let cli = Cli::parse();

    let scraper = || {
        KidaScraper::with_config(ClientConfig {
            base_url: cli.base_url.clone(),
            ..ClientConfig::default()
        })
    };

    match &cli.command {
        Commands::Species { species, output } => {
            let table = scraper()?
                .query_species_with_timeout(
                    &species.name,
                    species.search_type,
                    Duration::from_secs(output.timeout),
                )
                .await?;
            print_table(&table, output.json)?;
        }
        Commands::Element { element, output } => {
            let table = scraper()?
                .query_element_with_timeout(
                    &element.name,
                    &element.charges(),
                    Duration::from_secs(output.timeout),
                )
                .await?;
            print_table(&table, output.json)?;
        }
        Commands::Payload { search } => {
            let params = match search {
                PayloadCommands::Species(args) => build_species_query(&args.name, args.search_type),
                PayloadCommands::Element(args) => build_element_query(&args.name, &args.charges()),
            };
            println!("{}", encode_form(&params));
        }
    }

    Ok(())
}

fn print_table(table: &SpeciesTable, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    if json {
        println!("{}", serde_json::to_string_pretty(table)?);
        return Ok(());
    }

    if table.is_empty() {
        println!("No species found.");
        return Ok(());
    }

    let formula_width = column_width(&table.formulas, "FORMULA");
    let name_width = column_width(&table.names, "NAME");
    let state_width = column_width(&table.states, "STATE");

    println!(
        "{:<fw$}  {:<nw$}  {:<sw$}  DETAILS",
        "FORMULA",
        "NAME",
        "STATE",
        fw = formula_width,
        nw = name_width,
        sw = state_width
    );
    println!("{}", "-".repeat(formula_width + name_width + state_width + 15));

    for row in table.rows() {
        println!(
            "{:<fw$}  {:<nw$}  {:<sw$}  {}",
            row.formula,
            row.name,
            row.state,
            row.detail,
            fw = formula_width,
            nw = name_width,
            sw = state_width
        );
    }

    println!("\n{} species", table.len());
    log::debug!("Printed {} rows", table.len());
    Ok(())
}

fn column_width(column: &[String], header: &str) -> usize {
    column
        .iter()
        .map(|value| value.chars().count())
        .chain(std::iter::once(header.len()))
        .max()
        .unwrap_or(header.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_species_command() {
        let cli = Cli::try_parse_from(["kida", "species", "H2O", "--search-type", "exact", "--json"])
            .expect("arguments should parse");
        match cli.command {
            Commands::Species { species, output } => {
                assert_eq!(species.name, "H2O");
                assert_eq!(species.search_type, SearchType::Exact);
                assert!(output.json);
                assert_eq!(output.timeout, DEFAULT_TIMEOUT_SECS);
            }
            _ => panic!("Expected species command"),
        }
        assert_eq!(cli.base_url, KIDA_BASE_URL);
    }

    #[test]
    fn test_parse_element_charges() {
        let cli = Cli::try_parse_from(["kida", "element", "Fe", "--charge", "positive,neutral"])
            .expect("arguments should parse");
        match cli.command {
            Commands::Element { element, .. } => {
                let charges = element.charges();
                assert!(charges.contains(Charge::Positive));
                assert!(!charges.contains(Charge::Negative));
                assert!(charges.contains(Charge::Neutral));
            }
            _ => panic!("Expected element command"),
        }
    }

    #[test]
    fn test_element_charges_default_to_all() {
        let args = ElementArgs {
            name: "C".to_string(),
            charge: Vec::new(),
        };
        assert_eq!(args.charges(), ChargeFilter::all());
    }

    #[test]
    fn test_parse_rejects_unknown_search_type() {
        let result = Cli::try_parse_from(["kida", "species", "H2O", "--search-type", "fuzzy"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_column_width() {
        let column = vec!["H2O".to_string(), "CH3OH".to_string()];
        assert_eq!(column_width(&column, "FORMULA"), 7);
        assert_eq!(column_width(&column, "F"), 5);
        assert_eq!(column_width(&[], "NAME"), 4);
    }
}
