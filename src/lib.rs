pub mod api;
pub mod catalog;
pub mod config;
pub mod error;
pub mod probe;
pub mod telemetry;

use std::sync::Arc;
use config::Config;
use probe::fetcher::Fetcher;

/// Application state that will be shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub fetcher: Arc<dyn Fetcher>,
}
