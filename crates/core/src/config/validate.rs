use super::{types::Config, ConfigError};

/// Validate configuration
/// Currently validates:
/// - API key is non-empty
/// - Server port is not 0
/// - Page size, page cap and staleness window are at least 1
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.api.api_key.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "api.api_key cannot be empty".to_string(),
        ));
    }

    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "server.port cannot be 0".to_string(),
        ));
    }

    if config.search.page_size == 0 {
        return Err(ConfigError::ValidationError(
            "search.page_size must be at least 1".to_string(),
        ));
    }

    if config.search.max_pages == 0 {
        return Err(ConfigError::ValidationError(
            "search.max_pages must be at least 1".to_string(),
        ));
    }

    if config.cache.staleness_mins == 0 {
        return Err(ConfigError::ValidationError(
            "cache.staleness_mins must be at least 1".to_string(),
        ));
    }

    Ok(())
}
