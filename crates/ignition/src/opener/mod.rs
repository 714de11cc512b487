//! Turning location strings into byte streams.
//!
//! A [`ResourceOpener`] resolves a location string, optionally guided by a
//! [`ResolutionContext`], into a readable [`ResourceStream`]. Initializers
//! only ever talk to this trait; [`FileOpener`] is the filesystem-backed
//! implementation used in production.

mod file;


use std::io::Read;

use camino::{Utf8Path, Utf8PathBuf};
use serde::{Deserialize, Serialize};

use crate::error::BootstrapFailure;

pub use self::file::{BUNDLED_PREFIX, FileOpener};

/// Readable byte stream produced by a [`ResourceOpener`].
pub type ResourceStream = Box<dyn Read + Send>;

/// Search scope used to resolve bundled (`classpath:`) locations.
///
/// Roots are consulted in order and the first match wins.
///
/// # Example
///
/// ```
/// use ignition::ResolutionContext;
///
/// let context = ResolutionContext::new()
///     .with_root("/usr/share/app")
///     .with_root("/opt/app/resources");
/// assert_eq!(context.search_roots().len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolutionContext {
    #[serde(default)]
    search_roots: Vec<Utf8PathBuf>,
}

impl ResolutionContext {
    /// Creates a context with no search roots.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            search_roots: Vec::new(),
        }
    }

    /// Creates a context from an ordered list of roots.
    #[must_use]
    pub const fn from_roots(search_roots: Vec<Utf8PathBuf>) -> Self {
        Self { search_roots }
    }

    /// Appends a search root.
    #[must_use]
    pub fn with_root(mut self, root: impl Into<Utf8PathBuf>) -> Self {
        self.search_roots.push(root.into());
        self
    }

    /// Returns the search roots in lookup order.
    #[must_use]
    pub fn search_roots(&self) -> &[Utf8PathBuf] {
        &self.search_roots
    }

    /// Iterates over `root/relative` candidates in lookup order.
    pub fn candidates<'a>(
        &'a self,
        relative: &'a Utf8Path,
    ) -> impl Iterator<Item = Utf8PathBuf> + 'a {
        self.search_roots.iter().map(move |root| root.join(relative))
    }
}

/// Resolves location strings into byte streams.
///
/// Three outcomes are distinguished: a stream, a failure, or `Ok(None)` when
/// the opener completed without producing either. Initializers record the
/// last case as [`BootstrapFailure::EmptyResource`].
///
/// # Example
///
/// ```
/// use ignition::{BootstrapFailure, ResolutionContext, ResourceOpener, ResourceStream};
///
/// struct InlineOpener(&'static str);
///
/// impl ResourceOpener for InlineOpener {
///     fn open(
///         &self,
///         _location: &str,
///         _context: Option<&ResolutionContext>,
///     ) -> Result<Option<ResourceStream>, BootstrapFailure> {
///         Ok(Some(Box::new(std::io::Cursor::new(self.0.as_bytes()))))
///     }
/// }
/// ```
pub trait ResourceOpener {
    /// Opens `location`, resolving it with `context` when one is given.
    ///
    /// # Errors
    ///
    /// Returns a resolution failure when the location is malformed, does
    /// not exist, or cannot be read.
    fn open(
        &self,
        location: &str,
        context: Option<&ResolutionContext>,
    ) -> Result<Option<ResourceStream>, BootstrapFailure>;
}

impl<T: ResourceOpener + ?Sized> ResourceOpener for &T {
    fn open(
        &self,
        location: &str,
        context: Option<&ResolutionContext>,
    ) -> Result<Option<ResourceStream>, BootstrapFailure> {
        (**self).open(location, context)
    }
}
