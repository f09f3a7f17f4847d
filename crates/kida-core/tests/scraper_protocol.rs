//! End-to-end tests of the search protocol against a mock KIDA server

use std::time::Duration;

use kida_core::{Charge, ChargeFilter, ClientConfig, KidaError, KidaScraper, SearchType};
use wiremock::matchers::{body_string, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn scraper_for(base_url: String) -> KidaScraper {
    KidaScraper::with_config(ClientConfig {
        base_url,
        timeout_secs: 5,
        requests_per_second: 0.0,
    })
    .expect("client should build")
}

fn first_page(last_href: &str) -> String {
    format!(
        r#"<html><body>
            <table><tr><td>ignored</td></tr></table>
            <div class="pagination">
                <span class="pagination-element"><a href="/ignored/1/first">1</a></span>
                <span class="pagination-element"><a href="{}">Last</a></span>
            </div>
        </body></html>"#,
        last_href
    )
}

fn result_page(rows: &[(&str, &str, &str, &str)]) -> String {
    let rows: Vec<String> = rows
        .iter()
        .map(|(detail, formula, state, desc)| {
            format!(
                r#"<tr>
                    <td><span class="species_details"><a href="{}">Details</a></span></td>
                    <td class="species_name">{}</td>
                    <td class="species_name">{}</td>
                    <td class="species_desc">
                        {}
                    </td>
                </tr>"#,
                detail, formula, state, desc
            )
        })
        .collect();
    format!("<html><body><table>{}</table></body></html>", rows.join("\n"))
}

async fn mount_page(server: &MockServer, page_path: &str, body: String) {
    Mock::given(method("GET"))
        .and(path(page_path))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .expect(1)
        .mount(server)
        .await;
}

async fn requested_paths(server: &MockServer) -> Vec<String> {
    server
        .received_requests()
        .await
        .expect("request recording is enabled")
        .iter()
        .map(|request| request.url.path().to_string())
        .collect()
}

#[tokio::test]
async fn test_page_urls_follow_last_page_link() {
    let server = MockServer::start().await;
    for page in 1..=3 {
        mount_page(
            &server,
            &format!("/results_species/l/{}/foo", page),
            result_page(&[]),
        )
        .await;
    }

    let scraper = scraper_for(format!("{}/results_species", server.uri()));
    let table = scraper
        .scrape_pages(&first_page("x/l/3/foo"), Duration::from_secs(5))
        .await
        .unwrap();

    assert!(table.is_empty());
    assert_eq!(
        requested_paths(&server).await,
        vec![
            "/results_species/l/1/foo",
            "/results_species/l/2/foo",
            "/results_species/l/3/foo",
        ]
    );
}

#[tokio::test]
async fn test_query_species_aggregates_pages_in_order() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/results_species/l/"))
        .and(header("content-type", "application/x-www-form-urlencoded"))
        .and(body_string("species_input_name=H2O"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(first_page("/results_species/2/abc")),
        )
        .expect(1)
        .mount(&server)
        .await;

    mount_page(
        &server,
        "/results_species/1/abc",
        result_page(&[
            ("/species/1", "H2O", "ground", "Water"),
            ("/species/2", "HDO", "ground", "Semi-heavy water"),
        ]),
    )
    .await;
    mount_page(
        &server,
        "/results_species/2/abc",
        result_page(&[
            ("/species/3", "H2O+", "ground", "Water cation"),
            ("/species/4", "H3O+", "excited", "Hydronium"),
        ]),
    )
    .await;

    let scraper = scraper_for(server.uri());
    let table = scraper
        .query_species("H2O", SearchType::Inchi)
        .await
        .unwrap();

    assert_eq!(table.len(), 4);
    assert_eq!(
        table.details,
        vec!["/species/1", "/species/2", "/species/3", "/species/4"]
    );
    assert_eq!(table.formulas, vec!["H2O", "HDO", "H2O+", "H3O+"]);
    assert_eq!(
        table.names,
        vec!["Water", "Semi-heavy water", "Water cation", "Hydronium"]
    );
    assert_eq!(table.states, vec!["ground", "ground", "ground", "excited"]);

    assert_eq!(
        requested_paths(&server).await,
        vec![
            "/results_species/l/",
            "/results_species/1/abc",
            "/results_species/2/abc",
        ]
    );
}

#[tokio::test]
async fn test_query_element_posts_charge_flags() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/results_species_contains/l/"))
        .and(body_string(
            "species_input_name=Fe&positive=ok&negative=&neutral=ok",
        ))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(first_page("/results_species_contains/1/fe")),
        )
        .expect(1)
        .mount(&server)
        .await;

    mount_page(
        &server,
        "/results_species_contains/1/fe",
        result_page(&[
            ("/species/10", "Fe", "ground", "Iron"),
            ("/species/11", "Fe+", "ground", "Iron cation"),
        ]),
    )
    .await;

    let scraper = scraper_for(server.uri());
    let charges = ChargeFilter::only(Charge::Positive).with(Charge::Neutral);
    let table = scraper.query_element("Fe", &charges).await.unwrap();

    assert_eq!(table.formulas, vec!["Fe", "Fe+"]);
    assert_eq!(table.names, vec!["Iron", "Iron cation"]);
}

#[tokio::test]
async fn test_timeout_on_second_page_discards_first_page() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/results_species/l/"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(first_page("/results_species/2/abc")),
        )
        .mount(&server)
        .await;

    mount_page(
        &server,
        "/results_species/1/abc",
        result_page(&[("/species/1", "CO", "ground", "Carbon monoxide")]),
    )
    .await;

    Mock::given(method("GET"))
        .and(path("/results_species/2/abc"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(result_page(&[("/species/2", "CO2", "ground", "Carbon dioxide")]))
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&server)
        .await;

    let scraper = scraper_for(server.uri());
    let result = scraper
        .query_species_with_timeout("CO", SearchType::Common, Duration::from_millis(300))
        .await;

    match result {
        Err(KidaError::TransportError(e)) => assert!(e.is_timeout()),
        other => panic!("Expected TransportError, got {:?}", other),
    }
}

#[tokio::test]
async fn test_malformed_page_is_parse_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/results_species/l/"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(first_page("/results_species/1/abc")),
        )
        .mount(&server)
        .await;

    // two detail links but one description
    let broken = r#"<html><body><table><tr>
        <td><span class="species_details"><a href="/species/1">Details</a></span></td>
        <td><span class="species_details"><a href="/species/2">Details</a></span></td>
        <td class="species_name">OH</td>
        <td class="species_name">ground</td>
        <td class="species_name">OH+</td>
        <td class="species_name">ground</td>
        <td class="species_desc">Hydroxyl</td>
    </tr></table></body></html>"#;
    mount_page(&server, "/results_species/1/abc", broken.to_string()).await;

    let scraper = scraper_for(server.uri());
    let result = scraper.query_species("OH", SearchType::Common).await;
    assert!(matches!(result, Err(KidaError::ParseError(_))));
}

#[tokio::test]
async fn test_search_without_results_is_parse_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/results_species/l/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("<html><body><p>No species found</p></body></html>"),
        )
        .expect(1)
        .mount(&server)
        .await;

    let scraper = scraper_for(server.uri());
    let result = scraper.query_species("Unobtainium", SearchType::Exact).await;

    assert!(matches!(result, Err(KidaError::ParseError(_))));
    assert_eq!(requested_paths(&server).await, vec!["/results_species/l/"]);
}

#[tokio::test]
async fn test_search_endpoint_error_status_is_transport_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/results_species/l/"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&server)
        .await;

    let scraper = scraper_for(server.uri());
    let result = scraper.query_species("H2O", SearchType::Common).await;

    match result {
        Err(KidaError::TransportError(e)) => {
            assert_eq!(e.status(), Some(reqwest::StatusCode::SERVICE_UNAVAILABLE));
        }
        other => panic!("Expected TransportError, got {:?}", other),
    }
}

#[tokio::test]
async fn test_query_reaction_makes_no_request() {
    let server = MockServer::start().await;
    let scraper = scraper_for(server.uri());

    assert!(scraper.query_reaction("X", "exact").is_none());
    assert!(requested_paths(&server).await.is_empty());
}
