//! Integration tests for the market results service.
//!
//! These drive the public router end to end against a mock source page.
//! Run with: cargo test --test integration

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use chrono::{NaiveDate, NaiveDateTime};
use pretty_assertions::assert_eq;
use tower::ServiceExt;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use market_results::api::{create_router, AppState, NO_DATA_MESSAGE};
use market_results::config::Config;
use market_results::market::FixedClock;
use market_results::scrape::{ResultsScraper, ScrapedEntry};

/// A page using both layouts, with one unknown market and one empty result.
const MIXED_PAGE: &str = r#"
<html>
  <body>
    <div class="tkt-val">
      <div><h4>SRIDEVI</h4><span>388-95-500</span></div>
      <div><h4>Kalyan</h4><span>1450513</span></div>
      <div><h4>MAIN BAZAR</h4><span>111-11-111</span></div>
    </div>
    <div class="lv-mc"><span>MILAN NIGHT</span><span></span></div>
    <div class="lv-mc"><span>kalyan</span><span>1450513</span></div>
    <div class="lv-mc"><span>Madhur Night</span><span>678-12-345</span></div>
  </body>
</html>
"#;

fn at(h: u32, m: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 10, 19)
        .unwrap()
        .and_hms_opt(h, m, 0)
        .unwrap()
}

fn entry(market: &str, number: &str) -> ScrapedEntry {
    ScrapedEntry {
        market_name: market.to_string(),
        winning_number: number.to_string(),
    }
}

async fn source(status: u16, body: &str) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(status).set_body_string(body))
        .mount(&server)
        .await;
    server
}

fn app(server: &MockServer, now: NaiveDateTime, dedupe: bool) -> Router {
    let config = Config {
        source_url: format!("{}/", server.uri()),
        dedupe_results: dedupe,
        ..Config::default()
    };
    let scraper = ResultsScraper::new(&config)
        .unwrap()
        .with_clock(FixedClock(now));
    create_router(AppState::new(scraper))
}

async fn get_results(app: Router) -> (StatusCode, String) {
    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/results")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(body.to_vec()).unwrap())
}

#[tokio::test]
async fn mixed_page_is_matched_and_redacted_per_market() {
    let server = source(200, MIXED_PAGE).await;
    let (status, body) = get_results(app(&server, at(16, 0), false)).await;

    assert_eq!(status, StatusCode::OK);
    let entries: Vec<ScrapedEntry> = serde_json::from_str(&body).unwrap();
    assert_eq!(
        entries,
        vec![
            entry("SRIDEVI", "388-95-500"),
            entry("Kalyan", "145-0"),
            entry("kalyan", "145-0"),
            entry("Madhur Night", "***-**-***"),
        ]
    );
}

#[tokio::test]
async fn dedupe_keeps_first_occurrence() {
    let server = source(200, MIXED_PAGE).await;
    let (status, body) = get_results(app(&server, at(23, 30), true)).await;

    assert_eq!(status, StatusCode::OK);
    let entries: Vec<ScrapedEntry> = serde_json::from_str(&body).unwrap();
    assert_eq!(
        entries,
        vec![
            entry("SRIDEVI", "388-95-500"),
            entry("Kalyan", "1450513"),
            entry("Madhur Night", "678-12-345"),
        ]
    );
}

#[tokio::test]
async fn every_failure_mode_returns_the_same_error() {
    let expected = serde_json::json!({ "error": NO_DATA_MESSAGE }).to_string();

    for (status, body) in [
        (200, "<html><body>no results today</body></html>"),
        (403, "forbidden"),
        (500, "oops"),
    ] {
        let server = source(status, body).await;
        let (got_status, got_body) = get_results(app(&server, at(18, 0), false)).await;

        assert_eq!(got_status, StatusCode::INTERNAL_SERVER_ERROR, "upstream {status}");
        assert_eq!(got_body, expected, "upstream {status}");
    }
}

#[tokio::test]
async fn each_request_fetches_the_source_again() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"<div class="tkt-val"><div><h4>KALYAN</h4><span>1237</span></div></div>"#,
        ))
        .expect(2)
        .mount(&server)
        .await;

    let app = app(&server, at(18, 0), false);
    let (first, _) = get_results(app.clone()).await;
    let (second, _) = get_results(app).await;

    assert_eq!(first, StatusCode::OK);
    assert_eq!(second, StatusCode::OK);
}

#[tokio::test]
async fn cors_preflight_allows_any_origin() {
    let server = source(200, MIXED_PAGE).await;
    let response = app(&server, at(18, 0), false)
        .oneshot(
            Request::builder()
                .method(Method::OPTIONS)
                .uri("/api/results")
                .header(header::ORIGIN, "https://client.example")
                .header(header::ACCESS_CONTROL_REQUEST_METHOD, "GET")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert!(response.status().is_success());
    assert_eq!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .unwrap(),
        "*"
    );
}
