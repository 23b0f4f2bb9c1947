use once_cell::sync::Lazy;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::net::TcpListener;
use std::process::{Child, Command, Stdio};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tokio::time::sleep;

const ADMIN_TOKEN: &str = "integration-test-token";

#[derive(Debug, Deserialize)]
struct Envelope<T> {
    success: bool,
    data: Option<T>,
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct DateRecord {
    date: String,
    opening_time: String,
    closing_time: String,
    special_note: String,
    is_enabled: bool,
}

#[derive(Debug, Deserialize)]
struct RangeSummary {
    total: u32,
    saved: u32,
    errors: u32,
}

struct TestServer {
    base_url: String,
    child: Child,
}

impl Drop for TestServer {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

static TEST_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));
static SERVER: Lazy<Mutex<Option<Arc<TestServer>>>> = Lazy::new(|| Mutex::new(None));

#[cfg(unix)]
mod cleanup {
    use std::sync::atomic::{AtomicI32, Ordering};
    use std::sync::Once;

    static REGISTER: Once = Once::new();
    static PID: AtomicI32 = AtomicI32::new(0);

    pub fn register(pid: u32) {
        REGISTER.call_once(|| {
            PID.store(pid as i32, Ordering::SeqCst);
            unsafe {
                libc::atexit(on_exit);
            }
        });
    }

    extern "C" fn on_exit() {
        let pid = PID.load(Ordering::SeqCst);
        if pid > 0 {
            unsafe {
                libc::kill(pid, libc::SIGTERM);
            }
        }
    }
}

fn pick_free_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind random port");
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    port
}

fn unique_db_path() -> String {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let mut path = std::env::temp_dir();
    path.push(format!("openhours_http_{}_{}.db", std::process::id(), nanos));
    path.to_string_lossy().to_string()
}

async fn wait_until_ready(base_url: &str) {
    let client = Client::new();
    let deadline = Instant::now() + Duration::from_secs(5);
    loop {
        if let Ok(resp) = client.get(format!("{base_url}/api/settings")).send().await {
            if resp.status().is_success() {
                return;
            }
        }
        if Instant::now() > deadline {
            panic!("server did not become ready");
        }
        sleep(Duration::from_millis(100)).await;
    }
}

async fn spawn_server() -> TestServer {
    let port = pick_free_port();
    let db_path = unique_db_path();
    let child = Command::new(env!("CARGO_BIN_EXE_openhours"))
        .env("PORT", port.to_string())
        .env("DB_PATH", db_path)
        .env("ADMIN_TOKEN", ADMIN_TOKEN)
        .env("RUST_LOG", "info")
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .spawn()
        .expect("failed to spawn server");

    #[cfg(unix)]
    cleanup::register(child.id());

    let base_url = format!("http://127.0.0.1:{port}");
    wait_until_ready(&base_url).await;

    TestServer { base_url, child }
}

async fn shared_server() -> Arc<TestServer> {
    let mut guard = SERVER.lock().await;
    if let Some(server) = guard.as_ref() {
        return Arc::clone(server);
    }
    let server = Arc::new(spawn_server().await);
    *guard = Some(Arc::clone(&server));
    server
}

async fn save_date(
    client: &Client,
    base_url: &str,
    date: &str,
    opening: &str,
    closing: &str,
    note: &str,
    enabled: bool,
) -> reqwest::Response {
    client
        .post(format!("{base_url}/api/dates"))
        .bearer_auth(ADMIN_TOKEN)
        .json(&serde_json::json!({
            "date": date,
            "opening_time": opening,
            "closing_time": closing,
            "special_note": note,
            "is_enabled": enabled,
        }))
        .send()
        .await
        .unwrap()
}

async fn envelope<T: DeserializeOwned>(response: reqwest::Response) -> Envelope<T> {
    response.json().await.unwrap()
}

#[tokio::test]
async fn http_save_then_get_round_trips() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let response = save_date(
        &client,
        &server.base_url,
        "2031-05-12",
        "09:00",
        "17:30",
        "Street fair",
        true,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let saved: Envelope<DateRecord> = envelope(response).await;
    assert!(saved.success);
    assert_eq!(saved.data.unwrap().date, "2031-05-12");

    let response = client
        .get(format!("{}/api/dates/2031-05-12", server.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let fetched: Envelope<DateRecord> = envelope(response).await;
    let record = fetched.data.unwrap();
    assert_eq!(record.opening_time, "09:00");
    assert_eq!(record.closing_time, "17:30");
    assert_eq!(record.special_note, "Street fair");
    assert!(record.is_enabled);
}

#[tokio::test]
async fn http_save_is_an_upsert() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    save_date(&client, &server.base_url, "2032-03-10", "09:00", "17:00", "", true).await;
    save_date(&client, &server.base_url, "2032-03-10", "11:00", "22:00", "", true).await;

    let response = client
        .get(format!(
            "{}/api/dates?year=2032&month=3&enabled_only=false",
            server.base_url
        ))
        .send()
        .await
        .unwrap();
    let listed: Envelope<Vec<DateRecord>> = envelope(response).await;
    let records = listed.data.unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].opening_time, "11:00");
    assert_eq!(records[0].closing_time, "22:00");
}

#[tokio::test]
async fn http_rejects_inverted_hours() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let response = save_date(
        &client,
        &server.base_url,
        "2033-01-01",
        "18:00",
        "10:00",
        "",
        true,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Envelope<DateRecord> = envelope(response).await;
    assert!(!body.success);
    assert!(body.message.unwrap().contains("after opening"));

    // Nothing was persisted.
    let response = client
        .get(format!("{}/api/dates/2033-01-01", server.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn http_rejects_malformed_date_and_time() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let response = save_date(&client, &server.base_url, "2024-13-01", "09:00", "17:00", "", true).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = save_date(&client, &server.base_url, "2024-01-01", "25:61", "26:00", "", true).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn http_writes_require_the_bearer_token() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let payload = serde_json::json!({
        "date": "2034-01-01",
        "opening_time": "09:00",
        "closing_time": "17:00",
    });

    let response = client
        .post(format!("{}/api/dates", server.base_url))
        .json(&payload)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = client
        .post(format!("{}/api/dates", server.base_url))
        .bearer_auth("wrong-token")
        .json(&payload)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    // Rejected before the store was touched.
    let response = client
        .get(format!("{}/api/dates/2034-01-01", server.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn http_delete_missing_date_is_not_found() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let response = client
        .delete(format!("{}/api/dates/2035-06-01", server.base_url))
        .bearer_auth(ADMIN_TOKEN)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body: Envelope<DateRecord> = envelope(response).await;
    assert!(!body.success);
}

#[tokio::test]
async fn http_delete_then_get_is_gone() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    save_date(&client, &server.base_url, "2036-02-02", "09:00", "17:00", "", true).await;

    let response = client
        .delete(format!("{}/api/dates/2036-02-02", server.base_url))
        .bearer_auth(ADMIN_TOKEN)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = client
        .get(format!("{}/api/dates/2036-02-02", server.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn http_enabled_only_filter_excludes_disabled_records() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    save_date(&client, &server.base_url, "2037-07-01", "09:00", "17:00", "", true).await;
    save_date(&client, &server.base_url, "2037-07-02", "09:00", "17:00", "Holiday", false).await;

    let response = client
        .get(format!("{}/api/dates?year=2037&month=7", server.base_url))
        .send()
        .await
        .unwrap();
    let enabled_only: Envelope<Vec<DateRecord>> = envelope(response).await;
    let records = enabled_only.data.unwrap();
    assert_eq!(records.len(), 1);
    assert!(records.iter().all(|record| record.is_enabled));

    let response = client
        .get(format!(
            "{}/api/dates?year=2037&month=7&enabled_only=false",
            server.base_url
        ))
        .send()
        .await
        .unwrap();
    let all: Envelope<Vec<DateRecord>> = envelope(response).await;
    assert_eq!(all.data.unwrap().len(), 2);
}

#[tokio::test]
async fn http_range_apply_saves_every_date() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let response = client
        .post(format!("{}/api/dates/range", server.base_url))
        .bearer_auth(ADMIN_TOKEN)
        .json(&serde_json::json!({
            "start_date": "2038-08-01",
            "end_date": "2038-08-05",
            "opening_time": "08:30",
            "closing_time": "16:00",
            "special_note": "Summer schedule",
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body: Envelope<RangeSummary> = envelope(response).await;
    let summary = body.data.unwrap();
    assert_eq!(summary.total, 5);
    assert_eq!(summary.saved, 5);
    assert_eq!(summary.errors, 0);

    let response = client
        .get(format!(
            "{}/api/dates?year=2038&month=8&enabled_only=false",
            server.base_url
        ))
        .send()
        .await
        .unwrap();
    let listed: Envelope<Vec<DateRecord>> = envelope(response).await;
    let records = listed.data.unwrap();
    assert_eq!(records.len(), 5);
    assert!(records.iter().all(|record| record.opening_time == "08:30"));
}

#[tokio::test]
async fn http_range_apply_rejects_inverted_window() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let response = client
        .post(format!("{}/api/dates/range", server.base_url))
        .bearer_auth(ADMIN_TOKEN)
        .json(&serde_json::json!({
            "start_date": "2039-01-10",
            "end_date": "2039-01-01",
            "opening_time": "09:00",
            "closing_time": "17:00",
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn http_settings_are_public_and_secret_free() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let response = client
        .get(format!("{}/api/settings", server.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let text = response.text().await.unwrap();
    assert!(text.contains("\"colors\""));
    assert!(text.contains("\"defaults\""));
    assert!(!text.contains(ADMIN_TOKEN));

    let body: Envelope<serde_json::Value> = serde_json::from_str(&text).unwrap();
    assert!(body.success);
    let data = body.data.unwrap();
    assert_eq!(data["defaults"]["opening_time"], "10:00");
    assert_eq!(data["colors"]["enabled_bg"], "#4CAF50");
}

#[tokio::test]
async fn http_widget_pages_render() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    for path in ["/", "/calendar?year=2040&month=1&months=2", "/list", "/admin"] {
        let response = client
            .get(format!("{}{path}", server.base_url))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK, "page {path}");
        let text = response.text().await.unwrap();
        assert!(text.contains("<!DOCTYPE html>"), "page {path}");
    }
}
