use chrono::Local;
use daily_devotional::{
    AppState, JsonFileStore, Settings, analytics::AnalyticsClient, router,
    source::DevotionalSource,
};
use std::net::SocketAddr;
use tokio::fs;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let settings = Settings::from_env();
    if let Some(parent) = settings
        .data_path
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
    {
        fs::create_dir_all(parent).await?;
    }

    let store = JsonFileStore::open(&settings.data_path).await;
    info!("state file at {}", store.path().display());

    let client = reqwest::Client::builder()
        .timeout(settings.http_timeout)
        .build()?;
    let source = DevotionalSource::new(client.clone(), settings.source_url.clone());
    let analytics = AnalyticsClient::new(client, settings.analytics_url.clone());
    info!(
        source = source.url(),
        analytics = analytics.is_enabled(),
        "devotional source configured"
    );

    let state = AppState::new(Box::new(store), Local::now().date_naive(), source, analytics);
    let app = router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], settings.port));
    info!("listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
