//! HTTP client against a one-shot local server.

use greenlint_core::api::{AnalyzeRequest, Language};
use greenlint_core::{ApiError, Config, HttpApi, SustainabilityApi};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

const DASHBOARD_BODY: &str = r#"{
    "total_optimizations": 1,
    "total_kwh_saved": 0.012,
    "total_co2_saved": 0.0046,
    "total_eur_saved": 0.003,
    "sustainability_score": 100.0,
    "history": [{
        "id": 7,
        "timestamp": "2026-03-01 10:15:00",
        "filename": "src/sort.cpp",
        "language": "cpp",
        "patterns_found": 1,
        "energy_before": 35.0,
        "energy_after": 0.0,
        "savings_kwh": 0.012,
        "savings_co2_kg": 0.0046,
        "savings_eur": 0.003
    }]
}"#;

/// Accept one connection, answer it with `status` and `body`, and hand back
/// the raw request that was received.
async fn serve_once(status: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base_url = format!("http://{}", listener.local_addr().unwrap());

    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let request = read_request(&mut socket).await;
        let response = format!(
            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status,
            body.len(),
            body
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        socket.shutdown().await.ok();
        request
    });

    (base_url, handle)
}

async fn read_request(socket: &mut tokio::net::TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];
    loop {
        let n = socket.read(&mut chunk).await.unwrap();
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
        if let Some(end) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            let head = String::from_utf8_lossy(&buf[..end]).to_lowercase();
            let body_len = head
                .lines()
                .find_map(|line| line.strip_prefix("content-length:"))
                .and_then(|v| v.trim().parse::<usize>().ok())
                .unwrap_or(0);
            if buf.len() >= end + 4 + body_len {
                break;
            }
        }
    }
    String::from_utf8_lossy(&buf).into_owned()
}

fn client(base_url: &str) -> HttpApi {
    HttpApi::new(base_url, &Config::default()).unwrap()
}

fn sample_request() -> AnalyzeRequest {
    AnalyzeRequest {
        filename: "input.cpp".to_string(),
        code: "int main() { return 0; }".to_string(),
        language: Language::Cpp,
    }
}

#[tokio::test]
async fn test_dashboard_decodes_aggregate() {
    let (base_url, server) = serve_once("200 OK", DASHBOARD_BODY).await;
    let api = client(&format!("{}/", base_url));

    let aggregate = api.dashboard().await.unwrap();
    let request = server.await.unwrap();

    assert!(request.starts_with("GET /api/dashboard HTTP/1.1"));
    assert_eq!(aggregate.total_optimizations, 1);
    assert_eq!(aggregate.history[0].id, 7);
    assert_eq!(aggregate.history[0].date_label(), "2026-03-01");
    assert!(aggregate.history[0].original_code().is_none());
}

#[tokio::test]
async fn test_non_success_status_is_an_error() {
    let (base_url, server) = serve_once("500 Internal Server Error", r#"{"detail":"boom"}"#).await;
    let api = client(&base_url);

    let err = api.dashboard().await.unwrap_err();
    server.await.unwrap();

    assert_eq!(
        err,
        ApiError::Status {
            status: 500,
            endpoint: "/api/dashboard".to_string(),
        }
    );
}

#[tokio::test]
async fn test_analyze_posts_json_body() {
    let body = r#"{
        "filename": "input.cpp",
        "patterns": [],
        "total_energy_score": 100.0,
        "optimized_energy_score": 100.0,
        "estimated_kwh": 0.0,
        "estimated_co2_kg": 0.0,
        "estimated_cost_eur": 0.0
    }"#;
    let (base_url, server) = serve_once("200 OK", body).await;
    let api = client(&base_url);

    let result = api.analyze(&sample_request()).await.unwrap();
    let request = server.await.unwrap();

    assert!(request.starts_with("POST /api/analyze HTTP/1.1"));
    assert!(request.contains(r#""language":"cpp""#));
    assert!(request.contains(r#""filename":"input.cpp""#));
    assert!(!result.has_patterns());
    assert_eq!(result.carbon_intensity_gco2_kwh, 0.0);
}

#[tokio::test]
async fn test_inverted_line_range_is_rejected() {
    let body = r#"{
        "filename": "input.cpp",
        "patterns": [{
            "pattern_id": "nested_loop",
            "name": "Nested Loop",
            "severity": "high",
            "line_start": 12,
            "line_end": 4,
            "description": "O(n^2)",
            "suggestion": "Use a hash map",
            "estimated_energy_cost": 8.0,
            "estimated_energy_saved": 6.0
        }],
        "total_energy_score": 40.0,
        "optimized_energy_score": 90.0,
        "estimated_kwh": 0.01,
        "estimated_co2_kg": 0.004,
        "estimated_cost_eur": 0.002
    }"#;
    let (base_url, server) = serve_once("200 OK", body).await;
    let api = client(&base_url);

    let err = api.analyze(&sample_request()).await.unwrap_err();
    server.await.unwrap();

    assert!(matches!(err, ApiError::Decode { .. }));
    assert_eq!(err.endpoint(), "/api/analyze");
}

#[tokio::test]
async fn test_malformed_body_is_a_decode_error() {
    let (base_url, server) = serve_once("200 OK", r#"{"total_optimizations": "#).await;
    let api = client(&base_url);

    let err = api.dashboard().await.unwrap_err();
    server.await.unwrap();

    assert!(matches!(err, ApiError::Decode { .. }));
    assert_eq!(err.status(), None);
}

#[tokio::test]
async fn test_unreachable_service_is_a_transport_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base_url = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);
    let api = client(&base_url);

    let err = api.health().await.unwrap_err();

    assert!(matches!(err, ApiError::Transport { .. }));
    assert_eq!(err.endpoint(), "/api/health");
}
