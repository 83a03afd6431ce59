use super::{types::Config, ConfigError};

/// Validate a loaded configuration before any operation runs.
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.catalog.base_url.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "catalog.base_url must not be empty".to_string(),
        ));
    }

    if config.catalog.timeout_secs == 0 {
        return Err(ConfigError::ValidationError(
            "catalog.timeout_secs must be at least 1".to_string(),
        ));
    }

    if let Some(max_pages) = config.catalog.max_pages {
        if max_pages < 1 {
            return Err(ConfigError::ValidationError(
                "catalog.max_pages must be at least 1".to_string(),
            ));
        }
    }

    let pacing = &config.download.pacing;
    if pacing.min_delay_secs < 0.0 || pacing.max_delay_secs < 0.0 {
        return Err(ConfigError::ValidationError(
            "download.pacing delays must not be negative".to_string(),
        ));
    }
    if pacing.min_delay_secs > pacing.max_delay_secs {
        return Err(ConfigError::ValidationError(format!(
            "download.pacing.min_delay_secs ({}) exceeds max_delay_secs ({})",
            pacing.min_delay_secs, pacing.max_delay_secs
        )));
    }

    Ok(())
}
