use crate::config::Settings;
use search_collector::SearchProvider;
use std::sync::Arc;

/// Built once at startup; read-only afterwards.
#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<Settings>,
    pub search_provider: Arc<dyn SearchProvider>,
}
