//! HTTP behavior against a mock prediction service.

use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};

use phishguard::api::{ApiClient, ApiError, GENERIC_FAILURE_MESSAGE, UNREACHABLE_MESSAGE};
use phishguard::config::ApiConfig;
use phishguard::engine::Engine;
use phishguard::history::HistoryStore;
use phishguard::render::Verdict;
use serde_json::json;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client(server: &MockServer) -> ApiClient {
    ApiClient::new(&ApiConfig {
        base_url: server.uri(),
        ..ApiConfig::default()
    })
    .expect("api client")
}

fn temp_history() -> (PathBuf, HistoryStore) {
    static SEQ: AtomicU64 = AtomicU64::new(0);
    let n = SEQ.fetch_add(1, Ordering::Relaxed);
    let dir = std::env::temp_dir().join(format!("phishguard-api-test-{}-{n}", std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    let store = HistoryStore::new(dir.join("scanHistory.json"));
    (dir, store)
}

#[tokio::test]
async fn scan_posts_url_and_parses_verdict() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/predict"))
        .and(body_json(json!({"url": "https://example.com"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "url": "https://example.com",
            "is_phishing": 0,
            "confidence": 0.12,
            "analysis_time_ms": 42
        })))
        .expect(1)
        .mount(&server)
        .await;

    let result = client(&server).scan("https://example.com").await.expect("scan");
    assert!(!result.is_phishing);
    assert_eq!(result.confidence, 0.12);
    assert_eq!(result.analysis_time_ms, Some(42.0));
}

#[tokio::test]
async fn detail_error_is_shown_verbatim() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/predict"))
        .respond_with(
            ResponseTemplate::new(422).set_body_json(json!({"detail": "URL tidak valid"})),
        )
        .mount(&server)
        .await;

    let err = client(&server).scan("https://x").await.unwrap_err();
    assert!(matches!(err, ApiError::Detail { status: 422, .. }));
    assert_eq!(err.to_string(), "URL tidak valid");
}

#[tokio::test]
async fn error_without_detail_is_generic() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/predict"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let err = client(&server).scan("https://x").await.unwrap_err();
    assert!(matches!(err, ApiError::Failed { status: Some(500), .. }));
    assert_eq!(err.to_string(), GENERIC_FAILURE_MESSAGE);
}

#[tokio::test]
async fn non_json_success_body_is_generic_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/predict"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
        .mount(&server)
        .await;

    let err = client(&server).scan("https://x").await.unwrap_err();
    assert_eq!(err.to_string(), GENERIC_FAILURE_MESSAGE);
}

#[tokio::test]
async fn unreachable_backend_maps_to_transport_error() {
    let api = ApiClient::new(&ApiConfig {
        base_url: "http://127.0.0.1:9".to_string(),
        ..ApiConfig::default()
    })
    .expect("api client");
    let err = api.scan("https://x").await.unwrap_err();
    assert!(matches!(err, ApiError::Unreachable { .. }));
    assert_eq!(err.to_string(), UNREACHABLE_MESSAGE);
}

#[tokio::test]
async fn education_fetches_both_endpoints_with_language() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/info/phishing"))
        .and(query_param("lang", "id"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "categories": [{
                "type": "Email phishing",
                "description": "Fake emails",
                "indicators": ["Urgent tone"],
                "examples": ["Your account is locked"]
            }]
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/info/mitigation"))
        .and(query_param("lang", "id"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "individual": [{"title": "Enable 2FA", "description": "", "steps": ["Open settings"]}],
            "organization": []
        })))
        .mount(&server)
        .await;

    let feed = client(&server).fetch_education().await.expect("education");
    assert_eq!(feed.categories.len(), 1);
    assert_eq!(feed.categories[0].category_type, "Email phishing");
    assert_eq!(feed.mitigations.individual[0].steps, vec!["Open settings"]);
}

#[tokio::test]
async fn education_fails_when_either_endpoint_fails() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/info/phishing"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"categories": []})))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/info/mitigation"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let api = client(&server);
    assert!(api.fetch_education().await.is_err());
    let feed = api.fetch_education_or_empty().await;
    assert!(feed.categories.is_empty());
    assert!(feed.mitigations.is_empty());
}

#[tokio::test]
async fn submit_records_history_only_on_success() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/predict"))
        .and(body_json(json!({"url": "https://paypa1.test"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "url": "https://paypa1.test",
            "is_phishing": true,
            "confidence": 0.93
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/v1/predict"))
        .and(body_json(json!({"url": "https://broken.test"})))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let (dir, store) = temp_history();
    let engine = Engine::new(client(&server), Some(store.clone()));

    assert!(engine.submit("   ").await.expect("blank").is_none());

    let outcome = engine
        .submit("  paypa1.test ")
        .await
        .expect("submit")
        .expect("outcome");
    assert_eq!(outcome.url, "https://paypa1.test");
    assert_eq!(outcome.view.verdict, Verdict::Phishing);
    assert_eq!(outcome.history.as_ref().map(Vec::len), Some(1));

    assert!(engine.submit("broken.test").await.is_err());
    let stored = store.load();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].url, "https://paypa1.test");

    let again = engine.rescan(1).await.expect("rescan");
    assert_eq!(again.url, "https://paypa1.test");
    assert_eq!(store.load().len(), 1);

    let replay = engine.replay(1).expect("replay");
    assert_eq!(replay.confidence, "93%");

    let _ = std::fs::remove_dir_all(dir);
}

#[tokio::test(flavor = "multi_thread")]
async fn cli_scan_end_to_end() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/predict"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "url": "https://example.com",
            "is_phishing": 0,
            "confidence": 0.12,
            "analysis_time_ms": 42,
            "features": {"is_https": 1}
        })))
        .mount(&server)
        .await;

    let (home, _) = temp_history();
    std::fs::create_dir_all(&home).expect("create home");
    let base = server.uri();
    let home_for_cmd = home.clone();
    let out = tokio::task::spawn_blocking(move || {
        std::process::Command::new(env!("CARGO_BIN_EXE_phishguard"))
            .env("HOME", &home_for_cmd)
            .env_remove("PHISHGUARD_CONFIG")
            .env_remove("PHISHGUARD_HISTORY_PATH")
            .env_remove("PHISHGUARD_HISTORY_ENABLED")
            .env("PHISHGUARD_API_BASE_URL", &base)
            .args(["scan", "example.com"])
            .output()
            .expect("run phishguard")
    })
    .await
    .expect("join");

    assert!(
        out.status.success(),
        "stderr={}",
        String::from_utf8_lossy(&out.stderr)
    );
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.starts_with("SAFE URL  https://example.com"));
    assert!(stdout.contains("confidence: 12%"));
    assert!(stdout.contains("analysis time: 42 ms"));
    assert!(stdout.contains("HTTPS"));

    let history = std::fs::read_to_string(home.join(".config/phishguard/scanHistory.json"))
        .expect("history written");
    let v: serde_json::Value = serde_json::from_str(&history).expect("parse history");
    assert_eq!(v[0]["url"], "https://example.com");

    let _ = std::fs::remove_dir_all(home);
}
