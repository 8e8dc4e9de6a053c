use crate::config::types::{ArchiveConfig, HarvestConfig};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &HarvestConfig) -> Result<(), ConfigError> {
    validate_domain(&config.domain)?;

    if config.concurrency < 1 {
        return Err(ConfigError::Validation(format!(
            "concurrency must be >= 1, got {}",
            config.concurrency
        )));
    }

    validate_archive_config(&config.archive)?;
    Ok(())
}

/// Validates the target domain
///
/// The domain is interpolated into the index query as `<domain>/robots.txt`,
/// so it must be a bare host (optionally with a path prefix), not a URL.
fn validate_domain(domain: &str) -> Result<(), ConfigError> {
    if domain.trim().is_empty() {
        return Err(ConfigError::Validation(
            "domain cannot be empty".to_string(),
        ));
    }

    if domain.chars().any(char::is_whitespace) {
        return Err(ConfigError::Validation(format!(
            "domain must not contain whitespace, got '{}'",
            domain
        )));
    }

    if domain.contains("://") {
        return Err(ConfigError::Validation(format!(
            "domain must not include a URL scheme, got '{}'",
            domain
        )));
    }

    Ok(())
}

/// Validates archive endpoints and HTTP settings
fn validate_archive_config(config: &ArchiveConfig) -> Result<(), ConfigError> {
    validate_endpoint("cdx_url", &config.cdx_url)?;
    validate_endpoint("snapshot_url", &config.snapshot_url)?;

    if config.timeout.is_zero() {
        return Err(ConfigError::Validation(
            "timeout must be greater than zero".to_string(),
        ));
    }

    if config.user_agent.is_empty() {
        return Err(ConfigError::Validation(
            "user_agent cannot be empty".to_string(),
        ));
    }

    Ok(())
}

fn validate_endpoint(name: &str, value: &str) -> Result<(), ConfigError> {
    let url = Url::parse(value)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid {}: {}", name, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "{} must use http or https, got '{}'",
            name, value
        )));
    }

    Ok(())
}
