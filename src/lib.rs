pub mod analytics;
pub mod app;
pub mod config;
pub mod dates;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod navigation;
pub mod progress;
pub mod source;
pub mod state;
pub mod storage;
pub mod ui;
pub mod view;

pub use app::router;
pub use config::Settings;
pub use state::AppState;
pub use storage::{JsonFileStore, KeyValueStore, MemoryStore};
