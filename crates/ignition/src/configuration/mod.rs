//! Configuration directives applied during bootstrap.
//!
//! A configuration resource is a JSON object whose keys name directives:
//!
//! ```json
//! {
//!   "reply_timeout_ms": 10000,
//!   "keep_alive_interval_ms": 60000,
//!   "startup": ["roster", "presence"],
//!   "disabled": ["legacy-auth"]
//! }
//! ```
//!
//! The [`ConfigurationProcessor`] trait is the seam initializers call;
//! [`DirectiveProcessor`] applies directives to [`SharedSettings`]. Each
//! directive is applied on its own, so one bad value does not block the
//! rest.

mod directive;


use std::collections::BTreeSet;
use std::io::Read;
use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration;

use serde_json::Value;
use tracing::debug;

use crate::error::BootstrapFailure;
use crate::opener::ResourceStream;

pub use self::directive::Directive;

/// Tracing target for configuration processing.
const CONFIGURATION_TARGET: &str = "ignition::configuration";

/// Default time to wait for a reply before giving up.
pub const DEFAULT_REPLY_TIMEOUT: Duration = Duration::from_millis(5_000);

/// Default interval between keep-alive probes.
pub const DEFAULT_KEEP_ALIVE_INTERVAL: Duration = Duration::from_millis(30_000);

/// Consumes a configuration stream and reports what went wrong.
///
/// Implementations return their failures rather than writing into the
/// initializer's log; the initializer merges them in order.
pub trait ConfigurationProcessor {
    /// Processes the configuration read from `stream`.
    ///
    /// `location` identifies the stream in failure records.
    fn process(&self, location: &str, stream: ResourceStream) -> Vec<BootstrapFailure>;
}

impl<T: ConfigurationProcessor + ?Sized> ConfigurationProcessor for &T {
    fn process(&self, location: &str, stream: ResourceStream) -> Vec<BootstrapFailure> {
        (**self).process(location, stream)
    }
}

/// Values produced by configuration directives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    reply_timeout: Duration,
    keep_alive_interval: Duration,
    startup: Vec<String>,
    disabled: BTreeSet<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            reply_timeout: DEFAULT_REPLY_TIMEOUT,
            keep_alive_interval: DEFAULT_KEEP_ALIVE_INTERVAL,
            startup: Vec::new(),
            disabled: BTreeSet::new(),
        }
    }
}

impl Settings {
    /// Returns how long to wait for a reply.
    #[must_use]
    pub const fn reply_timeout(&self) -> Duration {
        self.reply_timeout
    }

    /// Returns the keep-alive probe interval.
    #[must_use]
    pub const fn keep_alive_interval(&self) -> Duration {
        self.keep_alive_interval
    }

    /// Returns the components to start, in declaration order.
    #[must_use]
    pub fn startup(&self) -> &[String] {
        &self.startup
    }

    /// Returns `true` if `feature` was disabled by configuration.
    #[must_use]
    pub fn is_disabled(&self, feature: &str) -> bool {
        self.disabled.contains(feature)
    }

    /// Returns the disabled features in sorted order.
    pub fn disabled(&self) -> impl Iterator<Item = &str> {
        self.disabled.iter().map(String::as_str)
    }
}

/// Cloneable handle to settings shared across the bootstrap.
#[derive(Debug, Clone, Default)]
pub struct SharedSettings {
    inner: Arc<RwLock<Settings>>,
}

impl SharedSettings {
    /// Creates a handle holding default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of the current settings.
    #[must_use]
    pub fn snapshot(&self) -> Settings {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn update<T>(&self, f: impl FnOnce(&mut Settings) -> T) -> T {
        let mut settings = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        f(&mut settings)
    }
}

/// Applies JSON configuration directives to [`SharedSettings`].
///
/// # Example
///
/// ```
/// use std::io::Cursor;
/// use std::time::Duration;
///
/// use ignition::{ConfigurationProcessor, DirectiveProcessor, SharedSettings};
///
/// let settings = SharedSettings::new();
/// let processor = DirectiveProcessor::new(settings.clone());
/// let json = r#"{"reply_timeout_ms": 250, "colour": "blue"}"#;
/// let failures = processor.process("cfg.json", Box::new(Cursor::new(json)));
///
/// assert_eq!(failures.len(), 1);
/// assert_eq!(settings.snapshot().reply_timeout(), Duration::from_millis(250));
/// ```
#[derive(Debug, Clone, Default)]
pub struct DirectiveProcessor {
    settings: SharedSettings,
}

impl DirectiveProcessor {
    /// Creates a processor writing into `settings`.
    #[must_use]
    pub const fn new(settings: SharedSettings) -> Self {
        Self { settings }
    }

    /// Returns the settings handle this processor writes into.
    #[must_use]
    pub const fn settings(&self) -> &SharedSettings {
        &self.settings
    }
}

impl ConfigurationProcessor for DirectiveProcessor {
    fn process(&self, location: &str, mut stream: ResourceStream) -> Vec<BootstrapFailure> {
        let mut text = String::new();
        if let Err(err) = stream.read_to_string(&mut text) {
            return vec![BootstrapFailure::read_stream(location, err)];
        }
        let directives = match parse_document(&text) {
            Ok(directives) => directives,
            Err(failure) => return vec![failure],
        };

        let failures: Vec<BootstrapFailure> = self.settings.update(|settings| {
            directives
                .into_iter()
                .filter_map(|(name, value)| directive::apply(settings, &name, &value).err())
                .collect()
        });
        debug!(
            target: CONFIGURATION_TARGET,
            location,
            failures = failures.len(),
            "processed configuration directives"
        );
        failures
    }
}

fn parse_document(text: &str) -> Result<serde_json::Map<String, Value>, BootstrapFailure> {
    let document: Value =
        serde_json::from_str(text).map_err(|err| BootstrapFailure::ConfigurationFile {
            message: err.to_string(),
        })?;
    match document {
        Value::Object(directives) => Ok(directives),
        _ => Err(BootstrapFailure::ConfigurationFile {
            message: String::from("expected an object of directives"),
        }),
    }
}
