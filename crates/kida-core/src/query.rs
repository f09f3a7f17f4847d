//! Search form builders
//!
//! Turns search criteria into the ordered form parameters posted to KIDA.

use crate::types::{Charge, ChargeFilter, QueryParams, SearchType};

/// Form field carrying the species or element name
pub const NAME_FIELD: &str = "species_input_name";

/// Flag value sent for a charge included in the filter
pub const CHARGE_PRESENT: &str = "ok";

/// Builds the form for a species-by-name search
///
/// The search type does not reach the form; the server only receives the name.
///
/// # Example
/// ```
/// use kida_core::{build_species_query, SearchType};
/// let params = build_species_query("H2O", SearchType::Exact);
/// assert_eq!(params, vec![("species_input_name".to_string(), "H2O".to_string())]);
/// ```
pub fn build_species_query(name: &str, _search_type: SearchType) -> QueryParams {
    vec![(NAME_FIELD.to_string(), name.to_string())]
}

/// Builds the form for a species-by-element search
///
/// The name pair is followed by one pair per charge, always in the order
/// positive, negative, neutral.
pub fn build_element_query(name: &str, charges: &ChargeFilter) -> QueryParams {
    let mut params = vec![(NAME_FIELD.to_string(), name.to_string())];
    params.extend(charge_params(charges));
    params
}

/// Encodes a charge filter as three `(charge, flag)` pairs
///
/// The flag is `"ok"` for charges in the filter and empty otherwise.
pub fn charge_params(charges: &ChargeFilter) -> QueryParams {
    Charge::ALL
        .iter()
        .map(|&charge| {
            let flag = if charges.contains(charge) {
                CHARGE_PRESENT
            } else {
                ""
            };
            (charge.as_str().to_string(), flag.to_string())
        })
        .collect()
}

/// Encodes parameters as an `application/x-www-form-urlencoded` body
///
/// # Example
/// ```
/// use kida_core::encode_form;
/// let body = encode_form(&[("species_input_name".to_string(), "C+".to_string())]);
/// assert_eq!(body, "species_input_name=C%2B");
/// ```
pub fn encode_form(params: &[(String, String)]) -> String {
    params
        .iter()
        .map(|(key, value)| {
            format!(
                "{}={}",
                urlencoding::encode(key),
                urlencoding::encode(value)
            )
        })
        .collect::<Vec<_>>()
        .join("&")
}
