//! Failure records collected while bootstrapping.
//!
//! Every problem encountered by an initializer is captured as a
//! [`BootstrapFailure`] rather than returned to the caller. The enum is
//! `Clone` so failure logs can be copied out for reporting; I/O errors are
//! wrapped in `Arc` for the same reason and to satisfy the
//! `result_large_err` Clippy lint.

use std::io::ErrorKind;
use std::sync::Arc;

use thiserror::Error;

/// Broad classification of a [`BootstrapFailure`].
///
/// # Example
///
/// ```
/// use ignition::{BootstrapFailure, FailureKind};
///
/// let failure = BootstrapFailure::EmptyResource {
///     location: "classpath:providers.json".into(),
/// };
/// assert_eq!(failure.kind(), FailureKind::EmptyResult);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    /// A location could not be turned into a byte stream.
    Resolution,
    /// The opener completed without producing a stream or an error.
    EmptyResult,
    /// Resource content was malformed.
    Parse,
    /// Any other failure raised after a stream was opened.
    Unexpected,
}

impl FailureKind {
    /// Returns the canonical string representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Resolution => "resolution",
            Self::EmptyResult => "empty_result",
            Self::Parse => "parse",
            Self::Unexpected => "unexpected",
        }
    }
}

impl std::fmt::Display for FailureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single failure recorded during initialization.
#[derive(Debug, Clone, Error)]
pub enum BootstrapFailure {
    /// The location string could not be interpreted.
    #[error("invalid resource location '{location}': {message}")]
    InvalidLocation {
        /// Location as supplied.
        location: String,
        /// Why the location was rejected.
        message: String,
    },

    /// No resource exists at the location.
    #[error("resource '{location}' not found")]
    ResourceNotFound {
        /// Location as supplied.
        location: String,
    },

    /// The opener returned neither a stream nor an error.
    #[error("no input stream created for '{location}'")]
    EmptyResource {
        /// Location as supplied.
        location: String,
    },

    /// The opener hit an I/O error before producing a stream.
    #[error("I/O error opening '{location}': {source}")]
    Io {
        /// Location being read.
        location: String,
        /// Underlying I/O error.
        #[source]
        source: Arc<std::io::Error>,
    },

    /// A stream was opened but reading its content failed.
    #[error("failed reading '{location}': {source}")]
    ReadStream {
        /// Location the stream was opened from.
        location: String,
        /// Underlying I/O error.
        #[source]
        source: Arc<std::io::Error>,
    },

    /// The provider document as a whole could not be parsed.
    #[error("malformed provider file: {message}")]
    ProviderFile {
        /// Description of the parse failure.
        message: String,
    },

    /// One provider entry was rejected; the remaining entries still load.
    #[error("provider entry {index} rejected: {message}")]
    ProviderEntry {
        /// Zero-based position of the entry in the document.
        index: usize,
        /// Why the entry was rejected.
        message: String,
    },

    /// The provider registry could not accept new entries.
    #[error("provider registry unavailable: {message}")]
    Registry {
        /// Description of the registry failure.
        message: String,
    },

    /// The configuration document as a whole could not be parsed.
    #[error("malformed configuration file: {message}")]
    ConfigurationFile {
        /// Description of the parse failure.
        message: String,
    },

    /// The configuration named a directive that is not understood.
    #[error("unknown directive '{name}'")]
    UnknownDirective {
        /// Directive name.
        name: String,
    },

    /// A known directive carried a value of the wrong shape.
    #[error("invalid value for directive '{name}': {message}")]
    InvalidDirective {
        /// Directive name.
        name: String,
        /// What was wrong with the value.
        message: String,
    },
}

impl BootstrapFailure {
    /// Builds an [`Io`](Self::Io) failure for `location`.
    #[must_use]
    pub fn io(location: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            location: location.into(),
            source: Arc::new(source),
        }
    }

    /// Builds a [`ReadStream`](Self::ReadStream) failure for `location`.
    #[must_use]
    pub fn read_stream(location: impl Into<String>, source: std::io::Error) -> Self {
        Self::ReadStream {
            location: location.into(),
            source: Arc::new(source),
        }
    }

    /// Classifies the failure.
    ///
    /// Content that is not valid text counts as a parse failure; any other
    /// error reading an opened stream is unexpected.
    #[must_use]
    pub fn kind(&self) -> FailureKind {
        match self {
            Self::InvalidLocation { .. } | Self::ResourceNotFound { .. } | Self::Io { .. } => {
                FailureKind::Resolution
            }
            Self::EmptyResource { .. } => FailureKind::EmptyResult,
            Self::ProviderFile { .. }
            | Self::ProviderEntry { .. }
            | Self::ConfigurationFile { .. }
            | Self::UnknownDirective { .. }
            | Self::InvalidDirective { .. } => FailureKind::Parse,
            Self::ReadStream { source, .. } if source.kind() == ErrorKind::InvalidData => {
                FailureKind::Parse
            }
            Self::ReadStream { .. } | Self::Registry { .. } => FailureKind::Unexpected,
        }
    }
}
