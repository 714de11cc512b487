//! Bootstrap initializers.
//!
//! An [`Initializer`] loads optional external resources during startup and
//! never fails outright: every problem is recorded and exposed through
//! [`Initializer::failures`]. [`UrlInitializer`] is the location-based
//! implementation. It runs two independent stages:
//!
//! 1. **Providers.** The provider location is opened with the caller's
//!    resolution context (or the configured default), decoded by
//!    [`ProviderFileLoader`], and registered in the shared
//!    [`ProviderRegistry`].
//! 2. **Configuration.** The configuration location is opened with the
//!    configured default context, never the caller's, and handed to a
//!    [`ConfigurationProcessor`].
//!
//! A failure in the first stage does not prevent the second from running.
//! Failures are appended in discovery order and are never reset: calling
//! [`Initializer::initialize`] again appends the new run's failures after
//! the previous ones.

mod config;


use tracing::{debug, warn};

use crate::configuration::ConfigurationProcessor;
use crate::error::BootstrapFailure;
use crate::failure::FailureLog;
use crate::opener::{ResolutionContext, ResourceOpener};
use crate::provider::ProviderFileLoader;
use crate::registry::ProviderRegistry;

pub use self::config::{InitializerConfig, InitializerConfigError};

/// Tracing target for initializer runs.
const INITIALIZER_TARGET: &str = "ignition::initializer";

/// A bootstrap step that loads optional resources without aborting startup.
pub trait Initializer {
    /// Runs the load sequence, resolving the provider resource with
    /// `context` or the implementation's default when `None`.
    fn initialize(&mut self, context: Option<&ResolutionContext>);

    /// Runs the load sequence with the implementation's default context.
    fn initialize_default(&mut self) {
        self.initialize(None);
    }

    /// Returns every failure recorded so far, oldest first.
    fn failures(&self) -> &[BootstrapFailure];
}

/// Loads a provider resource and a configuration resource by location.
///
/// # Example
///
/// ```
/// use ignition::{
///     DirectiveProcessor, FileOpener, Initializer, InitializerConfig, ProviderRegistry,
///     UrlInitializer,
/// };
///
/// let config = InitializerConfig::new().with_provider_location("/nonexistent/providers.json");
/// let mut initializer = UrlInitializer::new(
///     config,
///     FileOpener,
///     DirectiveProcessor::default(),
///     ProviderRegistry::new(),
/// );
///
/// initializer.initialize_default();
/// assert_eq!(initializer.failures().len(), 1);
/// ```
#[derive(Debug)]
pub struct UrlInitializer<O, P> {
    config: InitializerConfig,
    opener: O,
    processor: P,
    registry: ProviderRegistry,
    failures: FailureLog,
}

impl<O, P> UrlInitializer<O, P> {
    /// Creates an initializer with an empty failure log.
    #[must_use]
    pub const fn new(
        config: InitializerConfig,
        opener: O,
        processor: P,
        registry: ProviderRegistry,
    ) -> Self {
        Self {
            config,
            opener,
            processor,
            registry,
            failures: FailureLog::new(),
        }
    }

    /// Returns the locations and default context in use.
    #[must_use]
    pub const fn config(&self) -> &InitializerConfig {
        &self.config
    }

    /// Returns the resource opener.
    #[must_use]
    pub const fn opener(&self) -> &O {
        &self.opener
    }

    /// Returns the registry providers are loaded into.
    #[must_use]
    pub const fn registry(&self) -> &ProviderRegistry {
        &self.registry
    }

    /// Returns the accumulated failure log.
    #[must_use]
    pub const fn failure_log(&self) -> &FailureLog {
        &self.failures
    }
}

impl<O: ResourceOpener, P: ConfigurationProcessor> Initializer for UrlInitializer<O, P> {
    fn initialize(&mut self, context: Option<&ResolutionContext>) {
        let default_context = self.config.default_context();
        let provider_context = context.or(default_context);
        let recorded = self.failures.len();

        if let Some(location) = self.config.provider_location() {
            let failures = load_providers(&self.opener, &self.registry, location, provider_context);
            self.failures.merge(failures);
        }
        if let Some(location) = self.config.configuration_location() {
            let failures =
                load_configuration(&self.opener, &self.processor, location, default_context);
            self.failures.merge(failures);
        }

        debug!(
            target: INITIALIZER_TARGET,
            new_failures = self.failures.len() - recorded,
            total_failures = self.failures.len(),
            "initializer run complete"
        );
    }

    fn failures(&self) -> &[BootstrapFailure] {
        self.failures.as_slice()
    }
}

fn load_providers(
    opener: &impl ResourceOpener,
    registry: &ProviderRegistry,
    location: &str,
    context: Option<&ResolutionContext>,
) -> Vec<BootstrapFailure> {
    let stream = match opener.open(location, context) {
        Ok(Some(stream)) => stream,
        Ok(None) => {
            warn!(
                target: INITIALIZER_TARGET,
                location,
                "no input stream created for provider resource"
            );
            return vec![BootstrapFailure::EmptyResource {
                location: location.to_owned(),
            }];
        }
        Err(failure) => {
            warn!(
                target: INITIALIZER_TARGET,
                location,
                error = %failure,
                "could not open provider resource"
            );
            return vec![failure];
        }
    };

    debug!(target: INITIALIZER_TARGET, location, "loading providers");
    let loader = match ProviderFileLoader::load(location, stream) {
        Ok(loader) => loader,
        Err(failure) => {
            warn!(
                target: INITIALIZER_TARGET,
                location,
                error = %failure,
                "could not load provider file"
            );
            return vec![failure];
        }
    };
    let registered = registry.add_loader(&loader);
    let mut failures = loader.into_failures();
    match registered {
        Ok(count) => debug!(
            target: INITIALIZER_TARGET,
            location,
            registered = count,
            rejected = failures.len(),
            "registered providers"
        ),
        Err(failure) => {
            warn!(
                target: INITIALIZER_TARGET,
                location,
                error = %failure,
                "could not register providers"
            );
            failures.push(failure);
        }
    }
    failures
}

fn load_configuration(
    opener: &impl ResourceOpener,
    processor: &impl ConfigurationProcessor,
    location: &str,
    context: Option<&ResolutionContext>,
) -> Vec<BootstrapFailure> {
    match opener.open(location, context) {
        Ok(Some(stream)) => {
            debug!(target: INITIALIZER_TARGET, location, "processing configuration");
            processor.process(location, stream)
        }
        Ok(None) => {
            warn!(
                target: INITIALIZER_TARGET,
                location,
                "no input stream created for configuration resource"
            );
            vec![BootstrapFailure::EmptyResource {
                location: location.to_owned(),
            }]
        }
        Err(failure) => {
            warn!(
                target: INITIALIZER_TARGET,
                location,
                error = %failure,
                "could not open configuration resource"
            );
            vec![failure]
        }
    }
}
