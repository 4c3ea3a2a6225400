use std::{env, path::PathBuf, time::Duration};

pub const DEFAULT_SHEET_ID: &str = "1dC6pjjA_fW_1ZzAQjGX04WSa1c7aryG8leR4U1aB76o";
pub const DEFAULT_SHEET_NAME: &str = "Devotionals";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_DATA_PATH: &str = "data/state.json";
const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub port: u16,
    pub data_path: PathBuf,
    pub source_url: String,
    /// `None` disables analytics.
    pub analytics_url: Option<String>,
    pub http_timeout: Duration,
}

impl Settings {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let port = non_empty("PORT")
            .and_then(|value| value.parse::<u16>().ok())
            .unwrap_or(DEFAULT_PORT);

        let data_path = non_empty("APP_DATA_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_PATH));

        let source_url = non_empty("DEVOTIONAL_SOURCE_URL").unwrap_or_else(|| {
            let sheet_id =
                non_empty("DEVOTIONAL_SHEET_ID").unwrap_or_else(|| DEFAULT_SHEET_ID.to_string());
            let sheet_name = non_empty("DEVOTIONAL_SHEET_NAME")
                .unwrap_or_else(|| DEFAULT_SHEET_NAME.to_string());
            format!("https://opensheet.vercel.app/{sheet_id}/{sheet_name}")
        });

        let http_timeout = non_empty("HTTP_TIMEOUT_SECS")
            .and_then(|value| value.parse::<u64>().ok())
            .map(Duration::from_secs)
            .unwrap_or(Duration::from_secs(DEFAULT_TIMEOUT_SECS));

        Self {
            port,
            data_path,
            source_url,
            analytics_url: non_empty("DEVOTIONAL_ANALYTICS_URL"),
            http_timeout,
        }
    }
}
