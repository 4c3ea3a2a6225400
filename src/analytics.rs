use crate::dates::canonical;
use chrono::NaiveDate;
use reqwest::Client;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Device {
    Mobile,
    Tablet,
    Chrome,
    Firefox,
    Safari,
    Edge,
    Other,
}

impl Device {
    pub fn as_str(self) -> &'static str {
        match self {
            Device::Mobile => "Mobile",
            Device::Tablet => "Tablet",
            Device::Chrome => "Chrome",
            Device::Firefox => "Firefox",
            Device::Safari => "Safari",
            Device::Edge => "Edge",
            Device::Other => "Other",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalyticsAction {
    Viewed,
    Completed,
}

impl AnalyticsAction {
    pub fn as_str(self) -> &'static str {
        match self {
            AnalyticsAction::Viewed => "viewed",
            AnalyticsAction::Completed => "completed",
        }
    }
}

/// Coarse device bucket. Form factor wins over browser, and Safari only
/// counts when the agent does not also claim Chrome.
pub fn classify_device(user_agent: &str) -> Device {
    let ua = user_agent.to_ascii_lowercase();
    let has = |needle: &str| ua.contains(needle);

    if has("mobi") || has("android") {
        Device::Mobile
    } else if has("ipad") || has("tablet") {
        Device::Tablet
    } else if has("chrome") {
        Device::Chrome
    } else if has("firefox") {
        Device::Firefox
    } else if has("safari") {
        Device::Safari
    } else if has("edge") {
        Device::Edge
    } else {
        Device::Other
    }
}

/// Fire-and-forget telemetry. Failures are logged and dropped.
#[derive(Debug, Clone)]
pub struct AnalyticsClient {
    client: Client,
    url: Option<String>,
}

impl AnalyticsClient {
    pub fn new(client: Client, url: Option<String>) -> Self {
        Self { client, url }
    }

    pub fn is_enabled(&self) -> bool {
        self.url.is_some()
    }

    pub fn report(&self, date: NaiveDate, action: AnalyticsAction, device: Device) {
        let Some(url) = self.url.clone() else {
            debug!(action = action.as_str(), "analytics disabled");
            return;
        };

        let client = self.client.clone();
        let form = form_fields(date, action, device);
        tokio::spawn(async move {
            let result = client
                .post(&url)
                .form(&form)
                .send()
                .await
                .and_then(|resp| resp.error_for_status());
            if let Err(err) = result {
                warn!("analytics failed: {err}");
            }
        });
    }
}

pub fn form_fields(
    date: NaiveDate,
    action: AnalyticsAction,
    device: Device,
) -> [(&'static str, String); 3] {
    [
        ("devotional_date", canonical(date)),
        ("action", action.as_str().to_string()),
        ("device", device.as_str().to_string()),
    ]
}
