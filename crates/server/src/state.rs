use std::sync::Arc;
use marquee_core::{Config, MovieSource, SanitizedConfig};

/// Shared application state
pub struct AppState {
    config: Config,
    source: Arc<dyn MovieSource>,
}

impl AppState {
    pub fn new(config: Config, source: Arc<dyn MovieSource>) -> Self {
        Self { config, source }
    }

    pub fn sanitized_config(&self) -> SanitizedConfig {
        SanitizedConfig::from(&self.config)
    }

    pub fn source(&self) -> &dyn MovieSource {
        self.source.as_ref()
    }

    /// (page_size, max_pages) for computing total pages in responses
    pub fn page_limits(&self) -> (u32, u32) {
        (self.config.search.page_size, self.config.search.max_pages)
    }
}
