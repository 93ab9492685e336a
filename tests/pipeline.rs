//! End-to-end runs against a mock directory server.

use async_trait::async_trait;
use firmy_scraper::commands::ScrapeCommand;
use firmy_scraper::config::{Config, OutputFormat};
use firmy_scraper::export::{ExportOutcome, COLUMNS};
use firmy_scraper::firmy::FirmyClient;
use firmy_scraper::pacing::Pacer;
use firmy_scraper::ScrapeError;
use std::path::Path;
use std::sync::atomic::{AtomicU32, Ordering};
use tempfile::TempDir;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[derive(Default)]
struct CountingPacer {
    calls: AtomicU32,
}

#[async_trait]
impl Pacer for CountingPacer {
    async fn pause(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

fn listing(name: &str, href: &str) -> String {
    format!(
        r#"<div class="premiseBox">
            <h3><a class="companyTitle" href="{href}">{name}</a></h3>
            <a class="address">Praha 1</a>
            <div class="description">{name} popis</div>
        </div>"#
    )
}

fn detail(phone: &str, web: &str, email: &str) -> String {
    format!(
        r#"<div class="value detailPhone detailPhonePrimary">
            <span data-dot="origin-phone-number">{phone}</span>
        </div>
        <a class="detailWebUrl" href="{web}">web</a>
        <a href="mailto:{email}">{email}</a>"#
    )
}

async fn mount_html(server: &MockServer, route: &str, q: Option<&str>, status: u16, body: String) {
    let mut mock = Mock::given(method("GET")).and(path(route));
    if let Some(q) = q {
        mock = mock.and(query_param("q", q));
    }
    mock.respond_with(ResponseTemplate::new(status).set_body_string(body)).mount(server).await;
}

fn make_config(server: &MockServer, dir: &TempDir, addresses: &str) -> Config {
    let input = dir.path().join("places.txt");
    std::fs::write(&input, addresses).unwrap();

    Config {
        base_url: server.uri(),
        input,
        output: dir.path().join("output.csv"),
        format: OutputFormat::Csv,
        delay_min_ms: 0,
        delay_max_ms: 0,
        ..Config::default()
    }
}

fn read_rows(path: &Path) -> (Vec<String>, Vec<Vec<String>>) {
    let mut reader = csv::Reader::from_path(path).unwrap();
    let headers = reader.headers().unwrap().iter().map(String::from).collect();
    let rows = reader
        .records()
        .map(|r| r.unwrap().iter().map(String::from).collect())
        .collect();
    (headers, rows)
}

#[tokio::test]
async fn test_two_addresses_one_empty() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();

    let search = format!("{}{}", listing("Kavárna", "/detail/1"), listing("Pekárna", "/detail/2"));
    mount_html(&server, "/", Some("Praha 1"), 200, search).await;
    mount_html(&server, "/", Some("Brno"), 200, "<html><body></body></html>".into()).await;
    mount_html(
        &server,
        "/detail/1",
        None,
        200,
        detail("601 234 567", "https://kavarna.cz", "info@kavarna.cz"),
    )
    .await;
    mount_html(&server, "/detail/2", None, 200, detail("777 000 111", "##", "info@pekarna.cz"))
        .await;

    let config = make_config(&server, &dir, "Praha 1\nBrno\n");
    let client = FirmyClient::new(&config).unwrap();
    let pacer = CountingPacer::default();

    let report = ScrapeCommand::new(config).execute_with(&client, &pacer).await.unwrap();

    assert_eq!(report.addresses, 2);
    assert_eq!(report.businesses, 2);
    let output = dir.path().join("output.csv");
    assert_eq!(report.export, ExportOutcome::Written { path: output.clone(), rows: 2 });

    // Paused once, between the two addresses
    assert_eq!(pacer.calls.load(Ordering::SeqCst), 1);

    let (headers, rows) = read_rows(&output);
    assert_eq!(headers, COLUMNS);
    assert_eq!(rows.len(), 2);
    assert!(rows.iter().all(|row| row[0] == "Praha 1"));

    assert_eq!(rows[0][1], "Kavárna");
    assert_eq!(rows[0][4], "'601 234 567");
    assert_eq!(rows[0][5], "info@kavarna.cz");
    assert_eq!(rows[0][6], "https://kavarna.cz");
    assert_eq!(rows[0][7], format!("{}/detail/1", server.uri()));

    assert_eq!(rows[1][1], "Pekárna");
    assert_eq!(rows[1][6], "N/A");
}

#[tokio::test]
async fn test_search_error_status_continues() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();

    mount_html(&server, "/", Some("Ostrava"), 503, "Service Unavailable".into()).await;
    mount_html(&server, "/", Some("Plzeň"), 200, listing("Pivovar", "/detail/7")).await;
    mount_html(&server, "/detail/7", None, 404, "Nenalezeno".into()).await;

    let config = make_config(&server, &dir, "Ostrava\nPlzeň\n");
    let client = FirmyClient::new(&config).unwrap();
    let pacer = CountingPacer::default();

    let report = ScrapeCommand::new(config).execute_with(&client, &pacer).await.unwrap();
    assert_eq!(report.businesses, 1);

    let (_, rows) = read_rows(&dir.path().join("output.csv"));
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0][0], "Plzeň");
    assert_eq!(rows[0][1], "Pivovar");
    // Detail page failed: contact fields stay empty
    assert_eq!(rows[0][4..7], ["N/A", "N/A", "N/A"]);
}

#[tokio::test]
async fn test_no_results_writes_nothing() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();

    mount_html(&server, "/", None, 200, "<html></html>".into()).await;

    let config = make_config(&server, &dir, "Brno\n");
    let client = FirmyClient::new(&config).unwrap();
    let pacer = CountingPacer::default();

    let report = ScrapeCommand::new(config).execute_with(&client, &pacer).await.unwrap();

    assert_eq!(report.businesses, 0);
    assert_eq!(report.export, ExportOutcome::Skipped);
    assert!(!dir.path().join("output.csv").exists());
    assert_eq!(pacer.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_missing_input_makes_no_requests() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();

    let config = Config {
        base_url: server.uri(),
        input: dir.path().join("places.txt"),
        output: dir.path().join("output.csv"),
        ..Config::default()
    };

    let err = ScrapeCommand::new(config).execute().await.unwrap_err();

    assert!(matches!(err, ScrapeError::MissingInput { .. }));
    let requests = server.received_requests().await.unwrap();
    assert!(requests.is_empty());
    assert!(!dir.path().join("output.csv").exists());
}
