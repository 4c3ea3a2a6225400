use crate::analytics::AnalyticsClient;
use crate::navigation::Navigator;
use crate::source::DevotionalSource;
use crate::storage::KeyValueStore;
use chrono::NaiveDate;
use std::sync::Arc;
use tokio::sync::Mutex;

pub type SharedStore = Arc<Mutex<Box<dyn KeyValueStore + Send>>>;

#[derive(Clone)]
pub struct AppState {
    pub store: SharedStore,
    pub navigator: Arc<Mutex<Navigator>>,
    pub source: DevotionalSource,
    pub analytics: AnalyticsClient,
}

impl AppState {
    pub fn new(
        store: Box<dyn KeyValueStore + Send>,
        today: NaiveDate,
        source: DevotionalSource,
        analytics: AnalyticsClient,
    ) -> Self {
        Self {
            store: Arc::new(Mutex::new(store)),
            navigator: Arc::new(Mutex::new(Navigator::new(today))),
            source,
            analytics,
        }
    }
}
