//! Observability (structured logging)
//!
//! holoform emits `tracing` events from the mapper and the schema providers.
//! Hosts that do not install their own subscriber can call [`init`].

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize the logging stack
///
/// Sets up:
/// - Pretty formatting in debug builds, JSON formatting in release builds
/// - Environment-based log level filtering (`RUST_LOG`)
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed.
///
/// # Example
///
/// ```rust,no_run
/// use holoform::observability;
///
/// # fn main() -> anyhow::Result<()> {
/// observability::init()?;
/// tracing::info!("Form generation ready");
/// # Ok(())
/// # }
/// ```
pub fn init() -> anyhow::Result<()> {
    init_with(&ObservabilityConfig::default())
}

/// Initialize the logging stack with explicit settings
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed.
pub fn init_with(config: &ObservabilityConfig) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.default_directive()));

    #[cfg(debug_assertions)]
    {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().pretty())
            .try_init()?;
    }

    #[cfg(not(debug_assertions))]
    {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().json())
            .try_init()?;
    }

    tracing::debug!(service = %config.service_name, "Observability initialized");
    Ok(())
}

/// Observability configuration
#[derive(Debug, Clone)]
pub struct ObservabilityConfig {
    /// Service name attached to startup events
    pub service_name: String,

    /// Default to trace-level holoform output when `RUST_LOG` is unset
    pub verbose: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            service_name: "holoform".to_string(),
            verbose: cfg!(debug_assertions),
        }
    }
}

impl ObservabilityConfig {
    /// Create new observability config
    #[must_use]
    pub fn new(service_name: impl Into<String>) -> Self {
        Self {
            service_name: service_name.into(),
            ..Default::default()
        }
    }

    /// Enable trace-level holoform output by default
    #[must_use]
    pub const fn with_verbose(mut self) -> Self {
        self.verbose = true;
        self
    }

    /// Filter directive used when `RUST_LOG` is unset
    #[must_use]
    pub const fn default_directive(&self) -> &'static str {
        if self.verbose {
            "debug,holoform=trace"
        } else {
            "info"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ObservabilityConfig::default();
        assert_eq!(config.service_name, "holoform");
        assert_eq!(config.verbose, cfg!(debug_assertions));
    }

    #[test]
    fn test_builder() {
        let config = ObservabilityConfig::new("crm").with_verbose();

        assert_eq!(config.service_name, "crm");
        assert!(config.verbose);
        assert_eq!(config.default_directive(), "debug,holoform=trace");
    }

    #[test]
    fn test_quiet_directive() {
        let config = ObservabilityConfig {
            service_name: "crm".into(),
            verbose: false,
        };
        assert_eq!(config.default_directive(), "info");
    }
}
