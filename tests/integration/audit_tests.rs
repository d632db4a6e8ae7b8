//! Integration tests for the audit pipeline
//!
//! These tests use wiremock to stand up mock HTTP servers and drive the
//! walk, probe, and report phases end-to-end.

use refwalk::config::{Config, CrawlConfig, ReportConfig};
use refwalk::crawler::{build_http_client, run_audit, CrawlEngine, VisitState};
use refwalk::probe::{probe_address, ProbeStatus};
use refwalk::report::write_report;
use refwalk::url::KeyPolicy;
use url::Url;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates an audit configuration with timeouts suited to mock servers
fn create_test_config() -> Config {
    Config {
        crawl: CrawlConfig {
            timeout_ms: 5_000,
            connect_timeout_ms: 2_000,
            concurrency: 4,
            distinct_queries: false,
        },
        report: ReportConfig::default(),
    }
}

/// Wraps an HTML body in a 200 response with an HTML content type
fn html_page(body: &str) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .set_body_string(body)
        .insert_header("content-type", "text/html")
}

/// Yields a local address with nothing listening behind it
///
/// An ephemeral port is bound just long enough to learn its number, then
/// released again, so connecting to it is refused.
fn unreachable_address() -> String {
    let listener =
        std::net::TcpListener::bind("127.0.0.1:0").expect("Failed to bind ephemeral port");
    let port = listener
        .local_addr()
        .expect("Failed to read listener address")
        .port();
    drop(listener);
    format!("http://127.0.0.1:{}", port)
}

#[tokio::test]
async fn test_walk_discovers_relative_and_absolute_links() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    // Index links to one page relatively and one by fully qualified address
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html_page(&format!(
            r#"<html><body>
            <a href="/about">About</a>
            <a href="{}/contact">Contact</a>
            </body></html>"#,
            base_url
        )))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/about"))
        .respond_with(html_page("<html><body>About us</body></html>"))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/contact"))
        .respond_with(html_page("<html><body>Contact us</body></html>"))
        .mount(&mock_server)
        .await;

    let config = create_test_config();
    let client = build_http_client(&config.crawl).expect("Failed to build HTTP client");
    let seed = Url::parse(&format!("{}/", base_url)).expect("Failed to parse seed");

    let engine = CrawlEngine::new(client, seed, KeyPolicy::PathOnly)
        .expect("Failed to create engine");
    let registry = engine.walk().await;

    assert_eq!(registry.page_keys(), vec!["/", "/about", "/contact"]);
}

#[tokio::test]
async fn test_walk_stays_on_seed_host() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    // Index links to a page on a host the audit must never touch
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html_page(
            r#"<html><body>
            <a href="/about">About</a>
            <a href="http://other.test/x">Elsewhere</a>
            </body></html>"#,
        ))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/about"))
        .respond_with(html_page("<html><body>About us</body></html>"))
        .mount(&mock_server)
        .await;

    let config = create_test_config();
    let client = build_http_client(&config.crawl).expect("Failed to build HTTP client");
    let seed = Url::parse(&format!("{}/", base_url)).expect("Failed to parse seed");

    let engine = CrawlEngine::new(client, seed, KeyPolicy::PathOnly)
        .expect("Failed to create engine");
    let registry = engine.walk().await;

    // The foreign address was never admitted, so it was never fetched
    assert_eq!(registry.page_keys(), vec!["/", "/about"]);
}

#[tokio::test]
async fn test_walk_survives_link_cycles() {
    let mock_server = MockServer::start().await;

    // Two pages linking to each other; each may be fetched exactly once
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html_page(
            r#"<html><body><a href="/loop">Loop</a></body></html>"#,
        ))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/loop"))
        .respond_with(html_page(
            r#"<html><body><a href="/">Back</a></body></html>"#,
        ))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = create_test_config();
    let client = build_http_client(&config.crawl).expect("Failed to build HTTP client");
    let seed = Url::parse(&format!("{}/", mock_server.uri())).expect("Failed to parse seed");

    let engine = CrawlEngine::new(client, seed, KeyPolicy::PathOnly)
        .expect("Failed to create engine");
    let registry = engine.walk().await;

    assert_eq!(registry.page_keys(), vec!["/", "/loop"]);

    // Wiremock verifies the expect(1) counts when the mock server drops
}

#[tokio::test]
async fn test_duplicate_targets_admitted_once() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    // The same target appears once relatively and once fully qualified
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html_page(&format!(
            r#"<html><body>
            <a href="/dup">One</a>
            <a href="{}/dup">Two</a>
            </body></html>"#,
            base_url
        )))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/dup"))
        .respond_with(html_page("<html><body>Only once</body></html>"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = create_test_config();
    let client = build_http_client(&config.crawl).expect("Failed to build HTTP client");
    let seed = Url::parse(&format!("{}/", base_url)).expect("Failed to parse seed");

    let engine = CrawlEngine::new(client, seed, KeyPolicy::PathOnly)
        .expect("Failed to create engine");
    let registry = engine.walk().await;

    assert_eq!(registry.page_keys(), vec!["/", "/dup"]);
}

#[tokio::test]
async fn test_error_page_links_are_still_discovered() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html_page(
            r#"<html><body><a href="/missing">Missing</a></body></html>"#,
        ))
        .mount(&mock_server)
        .await;

    // An error page whose markup still carries a link
    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(
            ResponseTemplate::new(404)
                .set_body_string(r#"<html><body>Not here, try <a href="/recovered">this</a></body></html>"#)
                .insert_header("content-type", "text/html"),
        )
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/recovered"))
        .respond_with(html_page("<html><body>Found</body></html>"))
        .mount(&mock_server)
        .await;

    let config = create_test_config();
    let client = build_http_client(&config.crawl).expect("Failed to build HTTP client");
    let seed = Url::parse(&format!("{}/", mock_server.uri())).expect("Failed to parse seed");

    let engine = CrawlEngine::new(client, seed, KeyPolicy::PathOnly)
        .expect("Failed to create engine");
    let registry = engine.walk().await;

    assert_eq!(registry.page_keys(), vec!["/", "/missing", "/recovered"]);
}

#[tokio::test]
async fn test_dead_link_does_not_end_the_walk() {
    let mock_server = MockServer::start().await;

    // A same-host address whose port refuses connections
    let dead_base = unreachable_address();

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html_page(&format!(
            r#"<html><body>
            <a href="{}/gone">Dead</a>
            <a href="/after">After</a>
            </body></html>"#,
            dead_base
        )))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/after"))
        .respond_with(html_page("<html><body>Still here</body></html>"))
        .mount(&mock_server)
        .await;

    let config = create_test_config();
    let client = build_http_client(&config.crawl).expect("Failed to build HTTP client");
    let seed = Url::parse(&format!("{}/", mock_server.uri())).expect("Failed to parse seed");

    let engine = CrawlEngine::new(client, seed, KeyPolicy::PathOnly)
        .expect("Failed to create engine");
    let registry = engine.walk().await;

    // The dead page stays admitted, contributes no links, and the walk
    // carries on to the pages listed after it
    assert_eq!(registry.page_keys(), vec!["/", "/after", "/gone"]);
    for key in registry.page_keys() {
        assert_eq!(registry.state_of(&key), Some(VisitState::Fetched));
    }
}

#[tokio::test]
async fn test_probe_classifies_by_served_status() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    let cases = [
        ("/ok", 200u16, true),
        ("/no-content", 204, true),
        ("/multiple-choices", 300, false),
        ("/missing", 404, false),
        ("/errored", 500, false),
    ];

    for (route, served, _) in &cases {
        Mock::given(method("GET"))
            .and(path(*route))
            .respond_with(ResponseTemplate::new(*served))
            .mount(&mock_server)
            .await;
    }

    let config = create_test_config();
    let client = build_http_client(&config.crawl).expect("Failed to build HTTP client");

    for (route, served, expect_success) in &cases {
        let address =
            Url::parse(&format!("{}{}", base_url, route)).expect("Failed to parse address");
        let status = probe_address(&client, &address).await;

        assert_eq!(status, ProbeStatus::Http(*served));
        assert_eq!(
            status.is_success(),
            *expect_success,
            "status {} classified wrongly",
            served
        );
    }
}

#[tokio::test]
async fn test_probe_reports_dead_server_as_unreachable() {
    let dead_base = unreachable_address();

    let config = create_test_config();
    let client = build_http_client(&config.crawl).expect("Failed to build HTTP client");
    let address = Url::parse(&format!("{}/", dead_base)).expect("Failed to parse address");

    let status = probe_address(&client, &address).await;

    assert!(matches!(status, ProbeStatus::Unreachable(_)));
    assert!(!status.is_success());
}

#[tokio::test]
async fn test_full_audit_end_to_end() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    // Index links to /a, /b and a foreign host; /a links back into the cycle
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html_page(&format!(
            r#"<html><body>
            <a href="/a">A</a>
            <a href="{}/b">B</a>
            <a href="http://other.test/x">Elsewhere</a>
            </body></html>"#,
            base_url
        )))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/a"))
        .respond_with(html_page(
            r#"<html><body><a href="/">Home</a> <a href="/b">B</a></body></html>"#,
        ))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/b"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let config = create_test_config();
    let client = build_http_client(&config.crawl).expect("Failed to build HTTP client");
    let seed = Url::parse(&format!("{}/", base_url)).expect("Failed to parse seed");

    let report = run_audit(&client, &seed, &config)
        .await
        .expect("Audit failed");

    let keys: Vec<&str> = report.entries.iter().map(|e| e.page_key.as_str()).collect();
    assert_eq!(keys, vec!["/", "/a", "/b"]);

    assert_eq!(report.success_count(), 2);
    assert_eq!(report.failure_count(), 1);

    let broken: Vec<&str> = report.failures().map(|e| e.page_key.as_str()).collect();
    assert_eq!(broken, vec!["/b"]);

    // Every probed address was re-qualified against the seed
    for entry in &report.entries {
        assert!(entry.address.as_str().starts_with(&base_url));
    }

    // Persist the report and check both streams landed in the right files
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let report_config = ReportConfig {
        success_path: dir
            .path()
            .join("valid-links.txt")
            .to_string_lossy()
            .into_owned(),
        failure_path: dir
            .path()
            .join("broken-links.txt")
            .to_string_lossy()
            .into_owned(),
    };
    write_report(&report, &report_config).expect("Failed to write report");

    let valid = std::fs::read_to_string(&report_config.success_path)
        .expect("Failed to read success stream");
    assert!(valid.contains(&format!("{}/ - 200", base_url)));
    assert!(valid.contains(&format!("{}/a - 200", base_url)));
    assert!(valid.contains("Total valid: 2 at "));

    let broken = std::fs::read_to_string(&report_config.failure_path)
        .expect("Failed to read failure stream");
    assert!(broken.contains(&format!("{}/b - 404", base_url)));
    assert!(!broken.contains("other.test"));
    assert!(broken.contains("Total broken: 1 at "));
}

#[tokio::test]
async fn test_audit_reports_are_deterministic() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html_page(
            r#"<html><body>
            <a href="/gamma">G</a>
            <a href="/alpha">A</a>
            <a href="/beta">B</a>
            </body></html>"#,
        ))
        .mount(&mock_server)
        .await;

    for route in ["/alpha", "/beta", "/gamma"] {
        Mock::given(method("GET"))
            .and(path(route))
            .respond_with(html_page("<html><body>Leaf</body></html>"))
            .mount(&mock_server)
            .await;
    }

    let config = create_test_config();
    let client = build_http_client(&config.crawl).expect("Failed to build HTTP client");
    let seed = Url::parse(&format!("{}/", mock_server.uri())).expect("Failed to parse seed");

    let first = run_audit(&client, &seed, &config)
        .await
        .expect("First audit failed");
    let second = run_audit(&client, &seed, &config)
        .await
        .expect("Second audit failed");

    // Same site, same ordered report
    assert_eq!(first.entries, second.entries);

    let keys: Vec<&str> = first.entries.iter().map(|e| e.page_key.as_str()).collect();
    assert_eq!(keys, vec!["/", "/alpha", "/beta", "/gamma"]);
}

#[tokio::test]
async fn test_unreachable_seed_is_reported_broken() {
    let dead_base = unreachable_address();

    let config = create_test_config();
    let client = build_http_client(&config.crawl).expect("Failed to build HTTP client");
    let seed = Url::parse(&format!("{}/", dead_base)).expect("Failed to parse seed");

    let report = run_audit(&client, &seed, &config)
        .await
        .expect("Audit failed");

    assert_eq!(report.entries.len(), 1);
    assert_eq!(report.entries[0].page_key, "/");
    assert!(matches!(
        report.entries[0].status,
        ProbeStatus::Unreachable(_)
    ));
    assert_eq!(report.failure_count(), 1);
}

#[tokio::test]
async fn test_distinct_queries_widen_page_identity() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html_page(
            r#"<html><body>
            <a href="/search?q=a">First</a>
            <a href="/search?q=b">Second</a>
            </body></html>"#,
        ))
        .mount(&mock_server)
        .await;

    // Matches /search under any query string
    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(html_page("<html><body>Results</body></html>"))
        .mount(&mock_server)
        .await;

    let mut config = create_test_config();
    config.crawl.distinct_queries = true;

    let client = build_http_client(&config.crawl).expect("Failed to build HTTP client");
    let seed = Url::parse(&format!("{}/", mock_server.uri())).expect("Failed to parse seed");

    let report = run_audit(&client, &seed, &config)
        .await
        .expect("Audit failed");

    let keys: Vec<&str> = report.entries.iter().map(|e| e.page_key.as_str()).collect();
    assert_eq!(keys, vec!["/", "/search?q=a", "/search?q=b"]);
    assert_eq!(report.success_count(), 3);
}
