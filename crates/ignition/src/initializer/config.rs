//! Locations and default search scope for one initializer.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::opener::ResolutionContext;

/// Errors raised while reading an [`InitializerConfig`] document.
#[derive(Debug, Error)]
pub enum InitializerConfigError {
    /// The document is not a valid initializer configuration.
    #[error("invalid initializer configuration: {0}")]
    Parse(#[source] serde_json::Error),
}

/// Where an initializer finds its resources.
///
/// Either location may be absent, which skips that stage. The default
/// context is used for the provider stage when the caller supplies none,
/// and always for the configuration stage.
///
/// # Example
///
/// ```
/// use ignition::{InitializerConfig, ResolutionContext};
///
/// let config = InitializerConfig::new()
///     .with_provider_location("classpath:providers.json")
///     .with_default_context(ResolutionContext::new().with_root("/usr/share/app"));
///
/// assert_eq!(config.provider_location(), Some("classpath:providers.json"));
/// assert_eq!(config.configuration_location(), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InitializerConfig {
    #[serde(default)]
    provider_location: Option<String>,
    #[serde(default)]
    configuration_location: Option<String>,
    #[serde(default)]
    default_context: Option<ResolutionContext>,
}

impl InitializerConfig {
    /// Creates a configuration with both stages disabled.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            provider_location: None,
            configuration_location: None,
            default_context: None,
        }
    }

    /// Reads a configuration from a JSON document.
    ///
    /// # Errors
    ///
    /// Returns [`InitializerConfigError::Parse`] if the document is
    /// malformed or names unknown fields.
    pub fn from_json_str(text: &str) -> Result<Self, InitializerConfigError> {
        serde_json::from_str(text).map_err(InitializerConfigError::Parse)
    }

    /// Sets the provider resource location.
    #[must_use]
    pub fn with_provider_location(mut self, location: impl Into<String>) -> Self {
        self.provider_location = Some(location.into());
        self
    }

    /// Sets the configuration resource location.
    #[must_use]
    pub fn with_configuration_location(mut self, location: impl Into<String>) -> Self {
        self.configuration_location = Some(location.into());
        self
    }

    /// Sets the fallback resolution context.
    #[must_use]
    pub fn with_default_context(mut self, context: ResolutionContext) -> Self {
        self.default_context = Some(context);
        self
    }

    /// Returns the provider resource location, if any.
    #[must_use]
    pub fn provider_location(&self) -> Option<&str> {
        self.provider_location.as_deref()
    }

    /// Returns the configuration resource location, if any.
    #[must_use]
    pub fn configuration_location(&self) -> Option<&str> {
        self.configuration_location.as_deref()
    }

    /// Returns the fallback resolution context, if any.
    #[must_use]
    pub const fn default_context(&self) -> Option<&ResolutionContext> {
        self.default_context.as_ref()
    }
}
