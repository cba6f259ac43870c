use super::{types::Config, ConfigError};

/// Validate configuration
/// Currently validates:
/// - Server port is not 0
/// - Upstream timeout is positive
/// - Cache TTL is positive
///
/// An empty Prowlarr host or API key is allowed: the user may fill them in
/// from the plugin settings later.
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "server.port cannot be 0".to_string(),
        ));
    }

    if config.prowlarr.timeout_ms == 0 {
        return Err(ConfigError::ValidationError(
            "prowlarr.timeout_ms must be greater than 0".to_string(),
        ));
    }

    if config.cache.ttl_secs == 0 {
        return Err(ConfigError::ValidationError(
            "cache.ttl_secs must be greater than 0".to_string(),
        ));
    }

    Ok(())
}
