use axum::{
    Json, Router,
    http::StatusCode,
    routing::{get, post},
};
use daily_devotional::models::{
    CompleteResponse, DevotionalView, ProgressState, ToggleResponse,
};
use once_cell::sync::Lazy;
use reqwest::{Client, header::USER_AGENT};
use serde_json::{Value, json};
use std::net::{SocketAddr, TcpListener};
use std::process::{Child, Command, Stdio};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tokio::time::sleep;

const FIREFOX: &str = "Mozilla/5.0 (X11; Linux x86_64; rv:121.0) Gecko/20100101 Firefox/121.0";

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
static ANALYTICS_HITS: Lazy<std::sync::Mutex<Vec<String>>> =
    Lazy::new(|| std::sync::Mutex::new(Vec::new()));
static SLOW_SOURCE_HITS: Lazy<std::sync::Mutex<Vec<String>>> =
    Lazy::new(|| std::sync::Mutex::new(Vec::new()));
static SLOW_ROWS_CALLS: AtomicUsize = AtomicUsize::new(0);

/// Sheet and analytics stand-ins. Runs on its own thread so it outlives
/// each test's runtime.
static STUB: Lazy<String> = Lazy::new(|| {
    let (tx, rx) = std::sync::mpsc::channel::<SocketAddr>();
    std::thread::spawn(move || {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .expect("stub runtime");
        runtime.block_on(async move {
            let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
                .await
                .expect("bind stub");
            tx.send(listener.local_addr().unwrap()).unwrap();
            axum::serve(listener, stub_router()).await.unwrap();
        });
    });
    format!("http://{}", rx.recv().expect("stub address"))
});

fn sheet_rows() -> Value {
    json!([
        {
            "date": "3/15/2024",
            "title": "Walking in Grace",
            "scriptures": "Ephesians 2:8-10",
            "message": "By grace you have been saved."
        },
        {
            "date": "2024-03-16",
            "title": "Living Hope",
            "scriptures": "1 Peter 1:3",
            "message": "A living hope."
        },
        {
            "date": "March 17, 2024",
            "title": "Faith that Works",
            "scriptures": "James 2:14-26",
            "message": "Faith without works is dead."
        },
        { "date": "someday", "title": "Broken row", "scriptures": "", "message": "" }
    ])
}

fn stub_router() -> Router {
    Router::new()
        .route("/rows", get(|| async { Json(sheet_rows()) }))
        .route(
            "/slow-rows",
            get(|| async {
                // The first fetch lands after the user has already moved on.
                if SLOW_ROWS_CALLS.fetch_add(1, Ordering::SeqCst) == 0 {
                    sleep(Duration::from_millis(1500)).await;
                }
                Json(sheet_rows())
            }),
        )
        .route(
            "/broken",
            get(|| async { Json(json!({ "error": "sheet not found" })) }),
        )
        .route(
            "/hits",
            post(|body: String| async move {
                ANALYTICS_HITS.lock().unwrap().push(body);
                StatusCode::OK
            }),
        )
        .route(
            "/slow-hits",
            post(|body: String| async move {
                SLOW_SOURCE_HITS.lock().unwrap().push(body);
                StatusCode::OK
            }),
        )
        .route(
            "/failing-hits",
            post(|| async { StatusCode::INTERNAL_SERVER_ERROR }),
        )
}

#[cfg(unix)]
mod cleanup {
    use std::sync::Mutex;
    use std::sync::Once;

    static REGISTER: Once = Once::new();
    static PIDS: Mutex<Vec<i32>> = Mutex::new(Vec::new());

    pub fn register(pid: u32) {
        if let Ok(mut pids) = PIDS.lock() {
            pids.push(pid as i32);
        }
        REGISTER.call_once(|| unsafe {
            libc::atexit(on_exit);
        });
    }

    extern "C" fn on_exit() {
        if let Ok(pids) = PIDS.lock() {
            for pid in pids.iter().copied().filter(|pid| *pid > 0) {
                unsafe {
                    libc::kill(pid, libc::SIGTERM);
                }
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

fn unique_data_path() -> String {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let mut path = std::env::temp_dir();
    path.push(format!("daily_devotional_http_{}_{}.json", std::process::id(), nanos));
    path.to_string_lossy().to_string()
}

async fn wait_until_ready(base_url: &str) {
    let client = Client::new();
    let deadline = Instant::now() + Duration::from_secs(3);
    loop {
        if let Ok(resp) = client.get(format!("{base_url}/")).send().await {
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

async fn spawn_server(source_path: &str, analytics_path: &str) -> TestServer {
    let stub = STUB.as_str();
    let port = pick_free_port();
    let child = Command::new(env!("CARGO_BIN_EXE_daily_devotional"))
        .env("PORT", port.to_string())
        .env("APP_DATA_PATH", unique_data_path())
        .env("DEVOTIONAL_SOURCE_URL", format!("{stub}{source_path}"))
        .env("DEVOTIONAL_ANALYTICS_URL", format!("{stub}{analytics_path}"))
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
    let server = Arc::new(spawn_server("/rows", "/hits").await);
    *guard = Some(Arc::clone(&server));
    server
}

async fn load(client: &Client, server: &TestServer, date: &str) -> DevotionalView {
    client
        .get(format!("{}/api/devotional?date={date}", server.base_url))
        .header(USER_AGENT, FIREFOX)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap()
}

async fn navigate(client: &Client, server: &TestServer, body: Value) -> reqwest::Response {
    client
        .post(format!("{}/api/navigate", server.base_url))
        .json(&body)
        .send()
        .await
        .unwrap()
}

async fn toggle(
    client: &Client,
    server: &TestServer,
    date: &str,
    index: usize,
) -> reqwest::Response {
    client
        .post(format!("{}/api/checklist/toggle", server.base_url))
        .json(&json!({ "date": date, "index": index }))
        .send()
        .await
        .unwrap()
}

async fn complete(client: &Client, server: &TestServer, date: &str) -> reqwest::Response {
    client
        .post(format!("{}/api/complete", server.base_url))
        .json(&json!({ "date": date }))
        .send()
        .await
        .unwrap()
}

async fn wait_for_hit(
    hits: &std::sync::Mutex<Vec<String>>,
    matches: impl Fn(&str) -> bool,
) {
    let deadline = Instant::now() + Duration::from_secs(3);
    loop {
        if hits.lock().unwrap().iter().any(|body| matches(body)) {
            return;
        }
        if Instant::now() > deadline {
            panic!("expected analytics hit never arrived");
        }
        sleep(Duration::from_millis(50)).await;
    }
}

#[tokio::test]
async fn http_resolves_each_date_encoding() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let view = load(&client, &server, "2024-03-15").await;
    assert_eq!(view.date, "2024-03-15");
    assert_eq!(view.display_date, "Friday, March 15, 2024");
    assert_eq!(view.devotional.as_ref().unwrap().title, "Walking in Grace");
    let progress = view.progress.expect("checklist for a found devotional");
    assert_eq!(progress.checklist.len(), 10);
    assert_eq!(progress.checklist[0].checked, None);

    let view = load(&client, &server, "2024-03-16").await;
    assert_eq!(view.devotional.unwrap().title, "Living Hope");
}

#[tokio::test]
async fn http_missing_date_suppresses_checklist() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let view = load(&client, &server, "2024-04-01").await;
    assert!(view.devotional.is_none());
    assert!(view.progress.is_none());
}

#[tokio::test]
async fn http_rejects_malformed_dates() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let resp = client
        .get(format!("{}/api/devotional?date=3/15/2024", server.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let resp = toggle(&client, &server, "tomorrow", 1).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn http_checklist_flow_to_completion() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();
    let date = "2024-03-17";

    let view = load(&client, &server, date).await;
    assert_eq!(view.devotional.unwrap().title, "Faith that Works");
    assert_eq!(view.progress.unwrap().state, ProgressState::NotStarted);

    let resp = toggle(&client, &server, date, 0).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    for index in 1..=8 {
        let resp: ToggleResponse =
            toggle(&client, &server, date, index).await.json().await.unwrap();
        assert!(!resp.entered_ready);
        assert_eq!(resp.progress.state, ProgressState::InProgress);
    }

    let resp = complete(&client, &server, date).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);

    let resp: ToggleResponse = toggle(&client, &server, date, 9).await.json().await.unwrap();
    assert!(resp.entered_ready);
    assert_eq!(resp.progress.percent, 100);
    assert!(resp.progress.can_complete);

    let resp = complete(&client, &server, date).await;
    assert!(resp.status().is_success());
    let done: CompleteResponse = resp.json().await.unwrap();
    assert!(done.progress.completed);
    assert!(!done.progress.can_complete);
    assert_eq!(done.progress.state, ProgressState::Completed);

    wait_for_hit(&ANALYTICS_HITS, |body| {
        body.contains("devotional_date=2024-03-17") && body.contains("action=completed")
    })
    .await;

    // Completing twice is harmless.
    assert!(complete(&client, &server, date).await.status().is_success());

    let resp: ToggleResponse = toggle(&client, &server, date, 4).await.json().await.unwrap();
    assert_eq!(resp.progress.percent, 89);
    assert_eq!(resp.progress.state, ProgressState::Completed);
    assert!(!resp.progress.can_complete);

    let view = load(&client, &server, date).await;
    let progress = view.progress.unwrap();
    assert!(progress.completed);
    assert_eq!(progress.checklist[4].checked, Some(false));
    assert_eq!(progress.checklist[5].checked, Some(true));
}

#[tokio::test]
async fn http_navigation_moves_the_current_date() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    load(&client, &server, "2024-03-15").await;

    let view: DevotionalView = navigate(&client, &server, json!({ "action": "next" }))
        .await
        .json()
        .await
        .unwrap();
    assert_eq!(view.date, "2024-03-16");
    assert_eq!(view.devotional.unwrap().title, "Living Hope");

    navigate(&client, &server, json!({ "action": "prev" })).await;
    let view: DevotionalView = navigate(&client, &server, json!({ "action": "prev" }))
        .await
        .json()
        .await
        .unwrap();
    assert_eq!(view.date, "2024-03-14");
    assert!(view.devotional.is_none());

    let view: DevotionalView =
        navigate(&client, &server, json!({ "action": "jump", "date": "2024-03-17" }))
            .await
            .json()
            .await
            .unwrap();
    assert_eq!(view.date, "2024-03-17");

    // An empty jump keeps the current date.
    let view: DevotionalView = navigate(&client, &server, json!({ "action": "jump", "date": "" }))
        .await
        .json()
        .await
        .unwrap();
    assert_eq!(view.date, "2024-03-17");

    let resp = navigate(&client, &server, json!({ "action": "jump", "date": "17/03/2024" })).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let resp = navigate(&client, &server, json!({ "action": "sideways" })).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let page = client
        .get(format!("{}/", server.base_url))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(page.contains("let currentDate = '2024-03-17';"));
}

#[tokio::test]
async fn http_reports_views_to_analytics() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    load(&client, &server, "2024-03-16").await;

    wait_for_hit(&ANALYTICS_HITS, |body| {
        body.contains("devotional_date=2024-03-16")
            && body.contains("action=viewed")
            && body.contains("device=Firefox")
    })
    .await;
}

#[tokio::test]
async fn http_source_failure_shows_fallback_message() {
    let server = spawn_server("/broken", "/hits").await;
    let client = Client::new();

    let resp = client
        .get(format!("{}/api/devotional?date=2024-03-15", server.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);
    assert_eq!(resp.text().await.unwrap(), "Could not load daily devotional data.");
}

#[tokio::test]
async fn http_failing_analytics_leaves_state_alone() {
    let server = spawn_server("/rows", "/failing-hits").await;
    let client = Client::new();
    let date = "2024-03-15";

    let view = load(&client, &server, date).await;
    assert_eq!(view.devotional.unwrap().title, "Walking in Grace");

    for index in 1..=9 {
        let resp = toggle(&client, &server, date, index).await;
        assert!(resp.status().is_success());
    }

    let resp = complete(&client, &server, date).await;
    assert!(resp.status().is_success());
    let done: CompleteResponse = resp.json().await.unwrap();
    assert!(done.progress.completed);

    // Give the failed reports time to land before reading state back.
    sleep(Duration::from_millis(300)).await;

    let progress = load(&client, &server, date).await.progress.unwrap();
    assert_eq!(progress.percent, 100);
    assert!(progress.completed);
    assert_eq!(progress.state, ProgressState::Completed);
}

#[tokio::test]
async fn http_stale_load_is_discarded() {
    let server = spawn_server("/slow-rows", "/slow-hits").await;
    let client = Client::new();

    let first_url = format!("{}/api/devotional?date=2024-03-15", server.base_url);
    let first_client = client.clone();
    let first = tokio::spawn(async move { first_client.get(first_url).send().await.unwrap() });

    // Let the first load take its ticket and start the slow fetch.
    sleep(Duration::from_millis(300)).await;

    let resp = navigate(&client, &server, json!({ "action": "jump", "date": "2024-03-16" })).await;
    assert!(resp.status().is_success());
    let view: DevotionalView = resp.json().await.unwrap();
    assert_eq!(view.date, "2024-03-16");
    assert_eq!(view.devotional.unwrap().title, "Living Hope");

    let stale = first.await.unwrap();
    assert_eq!(stale.status(), StatusCode::CONFLICT);

    wait_for_hit(&SLOW_SOURCE_HITS, |body| body.contains("devotional_date=2024-03-16")).await;
    sleep(Duration::from_millis(200)).await;
    assert!(
        !SLOW_SOURCE_HITS
            .lock()
            .unwrap()
            .iter()
            .any(|body| body.contains("devotional_date=2024-03-15"))
    );

    let page = client
        .get(format!("{}/", server.base_url))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(page.contains("let currentDate = '2024-03-16';"));
}
