use std::io::Write;
use std::net::TcpListener;
use std::time::Duration;

use reqwest::Client;
use tempfile::NamedTempFile;
use tokio::time::{sleep, timeout};

/// Find an available port
fn get_available_port() -> u16 {
    TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port()
}

/// Create a minimal valid config
fn minimal_config(port: u16) -> String {
    format!(
        r#"
[server]
host = "127.0.0.1"
port = {}

[processor]
max_concurrent_workers = 3
"#,
        port
    )
}

fn write_config(content: &str) -> NamedTempFile {
    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file.write_all(content.as_bytes()).unwrap();
    temp_file.flush().unwrap();
    temp_file
}

/// Spawn the server and return a handle
async fn spawn_server(config_path: &std::path::Path) -> tokio::process::Child {
    tokio::process::Command::new(env!("CARGO_BIN_EXE_watermark"))
        .env("WATERMARK_CONFIG", config_path)
        .env("RUST_LOG", "error") // Quiet logs during tests
        .kill_on_drop(true)
        .spawn()
        .expect("Failed to spawn server")
}

/// Wait for server to be ready
async fn wait_for_server(port: u16, max_attempts: u32) -> bool {
    let client = Client::new();
    for _ in 0..max_attempts {
        if client
            .get(format!("http://127.0.0.1:{}/api/v1/health", port))
            .send()
            .await
            .is_ok()
        {
            return true;
        }
        sleep(Duration::from_millis(50)).await;
    }
    false
}

#[tokio::test]
async fn test_health_endpoint() {
    let port = get_available_port();
    let temp_file = write_config(&minimal_config(port));

    let mut server = spawn_server(temp_file.path()).await;
    assert!(
        wait_for_server(port, 40).await,
        "Server did not start in time"
    );

    let client = Client::new();
    let response = client
        .get(format!("http://127.0.0.1:{}/api/v1/health", port))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let json: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(json["status"], "ok");

    server.kill().await.ok();
}

#[tokio::test]
async fn test_config_endpoint_reflects_file() {
    let port = get_available_port();
    let temp_file = write_config(&minimal_config(port));

    let mut server = spawn_server(temp_file.path()).await;
    assert!(
        wait_for_server(port, 40).await,
        "Server did not start in time"
    );

    let client = Client::new();
    let response = client
        .get(format!("http://127.0.0.1:{}/api/v1/config", port))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let json: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(json["server"]["port"], port);
    assert_eq!(json["processor"]["max_concurrent_workers"], 3);
    assert_eq!(json["processor"]["queue_capacity"], 10_000);

    server.kill().await.ok();
}

#[tokio::test]
async fn test_watermark_round_trip_over_http() {
    let port = get_available_port();
    let temp_file = write_config(&minimal_config(port));

    let mut server = spawn_server(temp_file.path()).await;
    assert!(
        wait_for_server(port, 40).await,
        "Server did not start in time"
    );

    let client = Client::new();
    let ticket: u64 = client
        .post(format!("http://127.0.0.1:{}/api/v1/watermark/create", port))
        .json(&serde_json::json!({
            "title": "Earth",
            "author": { "firstName": "Ikaro", "lastName": "EStinmpoutsm" },
            "topic": "Media"
        }))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse ticket");
    assert_eq!(ticket, 1);

    let mut watermark = None;
    for _ in 0..40 {
        let response = client
            .get(format!(
                "http://127.0.0.1:{}/api/v1/watermark/get?ticket={}",
                port, ticket
            ))
            .send()
            .await
            .expect("Failed to send request");
        if response.status().is_success() {
            watermark = Some(response.json::<serde_json::Value>().await.unwrap());
            break;
        }
        sleep(Duration::from_millis(50)).await;
    }

    let watermark = watermark.expect("Watermark never became available");
    assert_eq!(watermark["content"], "Book");
    assert_eq!(watermark["topic"], "Media");

    server.kill().await.ok();
}

#[tokio::test]
async fn test_missing_config_file_exits_with_error() {
    let result = timeout(
        Duration::from_secs(5),
        tokio::process::Command::new(env!("CARGO_BIN_EXE_watermark"))
            .env("WATERMARK_CONFIG", "/nonexistent/config.toml")
            .env("RUST_LOG", "error")
            .output(),
    )
    .await
    .expect("Command timed out")
    .expect("Failed to execute command");

    assert!(!result.status.success());
}

#[tokio::test]
async fn test_invalid_config_exits_with_error() {
    let temp_file = write_config(
        r#"
[processor]
max_concurrent_workers = 0
"#,
    );

    let result = timeout(
        Duration::from_secs(5),
        tokio::process::Command::new(env!("CARGO_BIN_EXE_watermark"))
            .env("WATERMARK_CONFIG", temp_file.path())
            .env("RUST_LOG", "error")
            .output(),
    )
    .await
    .expect("Command timed out")
    .expect("Failed to execute command");

    assert!(!result.status.success());
}
