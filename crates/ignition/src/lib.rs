//! Partial-failure-tolerant bootstrap loading.
//!
//! The `ignition` crate loads optional resources during application startup:
//! a provider file, whose entries are registered into a shared
//! [`ProviderRegistry`], and a configuration file, whose directives are
//! applied to [`SharedSettings`]. Any resource may be missing, unreadable,
//! or malformed. Initialization carries on regardless and records each
//! problem as a [`BootstrapFailure`] for the caller to inspect afterwards.
//!
//! # Architecture
//!
//! [`UrlInitializer`] owns the two-stage load sequence and its
//! [`FailureLog`]. It reaches its collaborators through two traits:
//! [`ResourceOpener`] turns location strings into byte streams (see
//! [`FileOpener`]), and [`ConfigurationProcessor`] consumes configuration
//! streams (see [`DirectiveProcessor`]). Locations and the default
//! [`ResolutionContext`] come from an [`InitializerConfig`].
//!
//! # Example
//!
//! ```rust,no_run
//! use ignition::{
//!     DirectiveProcessor, FileOpener, Initializer, InitializerConfig, ProviderRegistry,
//!     ResolutionContext, SharedSettings, UrlInitializer,
//! };
//!
//! let registry = ProviderRegistry::new();
//! let settings = SharedSettings::new();
//! let config = InitializerConfig::new()
//!     .with_provider_location("classpath:providers.json")
//!     .with_configuration_location("classpath:bootstrap.json")
//!     .with_default_context(ResolutionContext::new().with_root("/usr/share/app"));
//!
//! let mut initializer = UrlInitializer::new(
//!     config,
//!     FileOpener,
//!     DirectiveProcessor::new(settings.clone()),
//!     registry.clone(),
//! );
//! initializer.initialize_default();
//!
//! for failure in initializer.failures() {
//!     eprintln!("bootstrap: {failure}");
//! }
//! ```

pub mod configuration;
pub mod error;
pub mod failure;
pub mod initializer;
pub mod opener;
pub mod provider;
pub mod registry;

#[cfg(test)]
mod tests;

pub use self::configuration::{
    ConfigurationProcessor, Directive, DirectiveProcessor, Settings, SharedSettings,
};
pub use self::error::{BootstrapFailure, FailureKind};
pub use self::failure::FailureLog;
pub use self::initializer::{
    Initializer, InitializerConfig, InitializerConfigError, UrlInitializer,
};
pub use self::opener::{FileOpener, ResolutionContext, ResourceOpener, ResourceStream};
pub use self::provider::{ProviderEntry, ProviderFileLoader, ProviderKind};
pub use self::registry::ProviderRegistry;
