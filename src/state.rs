//! Shared application state for all routes. Settings are immutable after startup.

use crate::config::Settings;
use crate::store::{PgRecordSource, RecordSource};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<Settings>,
    pub source: Arc<dyn RecordSource>,
}

impl AppState {
    /// State backed by the configured PostgreSQL database.
    pub fn new(settings: Settings) -> Self {
        let settings = Arc::new(settings);
        let source = Arc::new(PgRecordSource::new(settings.clone()));
        AppState { settings, source }
    }

    pub fn with_source(settings: Settings, source: Arc<dyn RecordSource>) -> Self {
        AppState {
            settings: Arc::new(settings),
            source,
        }
    }
}
