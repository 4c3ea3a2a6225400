use crate::models::DevotionalRecord;
use reqwest::Client;
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("devotional source request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("devotional source returned invalid data: {0}")]
    InvalidData(String),
}

/// Read-only client for the devotional sheet. Fetched once per date change,
/// never cached.
#[derive(Debug, Clone)]
pub struct DevotionalSource {
    client: Client,
    url: String,
}

impl DevotionalSource {
    pub fn new(client: Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub async fn fetch_records(&self) -> Result<Vec<DevotionalRecord>, FetchError> {
        let body: Value = self
            .client
            .get(&self.url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        parse_records(body)
    }
}

/// Anything other than an array of record objects fails the whole request.
pub fn parse_records(body: Value) -> Result<Vec<DevotionalRecord>, FetchError> {
    if !body.is_array() {
        return Err(FetchError::InvalidData(format!(
            "expected an array of rows, got {}",
            kind(&body)
        )));
    }
    serde_json::from_value(body).map_err(|err| FetchError::InvalidData(err.to_string()))
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
