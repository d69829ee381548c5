//! reqwest-backed fetcher against a local mock server
use std::time::Duration;

use product_scraper_lib::application::EcommerceScraper;
use product_scraper_lib::domain::Currency;
use product_scraper_lib::infrastructure::config::ScraperConfig;
use product_scraper_lib::infrastructure::http_client::{
    FetchError, HttpClient, HttpClientConfig, PageFetcher,
};
use product_scraper_lib::infrastructure::scraping_utils::RequestHeaders;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn headers() -> RequestHeaders {
    let mut headers = RequestHeaders::new();
    headers.insert("User-Agent", "product-scraper-test/1.0".to_string());
    headers.insert("Accept-Language", "en-US,en;q=0.5".to_string());
    headers
}

fn client() -> HttpClient {
    HttpClient::with_config(HttpClientConfig::default()).unwrap()
}

#[tokio::test]
async fn fetches_body_and_sends_headers() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/dp/B000"))
        .and(header("User-Agent", "product-scraper-test/1.0"))
        .and(header("Accept-Language", "en-US,en;q=0.5"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<h1>Desk Lamp</h1>"))
        .expect(1)
        .mount(&server)
        .await;

    let url = format!("{}/dp/B000", server.uri());
    let page = client()
        .get(&url, &headers(), Duration::from_secs(5))
        .await
        .unwrap();

    assert_eq!(page.status, 200);
    assert_eq!(page.body, "<h1>Desk Lamp</h1>");
}

#[tokio::test]
async fn error_status_is_a_failed_fetch() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let url = format!("{}/missing", server.uri());
    let error = client()
        .get(&url, &headers(), Duration::from_secs(5))
        .await
        .unwrap_err();

    assert_eq!(error, FetchError::Status { status: 404, url });
}

#[tokio::test]
async fn redirects_are_followed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/old"))
        .respond_with(
            ResponseTemplate::new(301).insert_header("Location", format!("{}/new", server.uri())),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/new"))
        .respond_with(ResponseTemplate::new(200).set_body_string("moved here"))
        .mount(&server)
        .await;

    let page = client()
        .get(&format!("{}/old", server.uri()), &headers(), Duration::from_secs(5))
        .await
        .unwrap();

    assert_eq!(page.status, 200);
    assert!(page.final_url.ends_with("/new"));
    assert_eq!(page.body, "moved here");
}

#[tokio::test]
async fn slow_response_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(3)))
        .mount(&server)
        .await;

    let error = client()
        .get(&format!("{}/slow", server.uri()), &headers(), Duration::from_millis(200))
        .await
        .unwrap_err();

    assert!(matches!(error, FetchError::Timeout { .. }), "{error:?}");
}

#[tokio::test]
async fn scraper_retries_against_live_server() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/item/42"))
        .respond_with(ResponseTemplate::new(500))
        .expect(2)
        .mount(&server)
        .await;

    let config = ScraperConfig {
        retries: 2,
        retry_delay_min_seconds: 0.0,
        retry_delay_max_seconds: 0.0,
        ..ScraperConfig::default()
    };
    let mut scraper = EcommerceScraper::new(config).unwrap();
    let url = format!("{}/item/42", server.uri());

    let record = scraper.scrape_product(&url).await;

    assert!(!record.success);
    let error = record.error.unwrap();
    assert!(error.starts_with("error loading page: HTTP error 500"), "{error}");
    assert_eq!(record.site, url.trim_start_matches("http://").split('/').next().unwrap());
}

#[tokio::test]
async fn latin1_page_is_decoded_from_content_type() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/producto/7"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            b"<html><body><h1>Caf\xE9 molido</h1><p class=\"cost\">7,50 EUR</p></body></html>"
                .to_vec(),
            "text/html; charset=iso-8859-1",
        ))
        .mount(&server)
        .await;

    let config = ScraperConfig {
        retries: 1,
        ..ScraperConfig::default()
    };
    let mut scraper = EcommerceScraper::new(config).unwrap();
    let record = scraper
        .scrape_product(&format!("{}/producto/7", server.uri()))
        .await;

    assert!(record.success, "{:?}", record.error);
    assert_eq!(record.title.as_deref(), Some("Café molido"));
    assert_eq!(record.price.as_deref(), Some("7,50 EUR"));
    assert_eq!(record.currency, Some(Currency::Eur));
}
