//! Filesystem-backed resource opener.
//!
//! Supported location forms:
//!
//! - `classpath:<relative path>` is searched for under each root of the
//!   [`ResolutionContext`] in order;
//! - `file:` URLs are opened from their local path;
//! - anything that does not parse as a URL is treated as a filesystem path.
//!
//! Other URL schemes are rejected.

use std::fs::File;
use std::io::{BufReader, ErrorKind};
use std::path::PathBuf;

use camino::{Utf8Component, Utf8Path, Utf8PathBuf};
use tracing::debug;
use url::Url;

use super::{ResolutionContext, ResourceOpener, ResourceStream};
use crate::error::BootstrapFailure;

/// Tracing target for resource opening.
const OPENER_TARGET: &str = "ignition::opener";

/// Prefix marking a location that is resolved against search roots.
pub const BUNDLED_PREFIX: &str = "classpath:";

/// Opens resources from the local filesystem.
///
/// `FileOpener` always yields either a stream or a failure; it never
/// returns `Ok(None)`.
///
/// # Example
///
/// ```no_run
/// use ignition::{FileOpener, ResolutionContext, ResourceOpener};
///
/// let context = ResolutionContext::new().with_root("/usr/share/app");
/// let stream = FileOpener.open("classpath:providers.json", Some(&context));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct FileOpener;

impl ResourceOpener for FileOpener {
    fn open(
        &self,
        location: &str,
        context: Option<&ResolutionContext>,
    ) -> Result<Option<ResourceStream>, BootstrapFailure> {
        let path = resolve(location, context)?;
        debug!(
            target: OPENER_TARGET,
            location,
            path = %path.display(),
            "opening resource"
        );
        let file = File::open(&path).map_err(|err| match err.kind() {
            ErrorKind::NotFound => BootstrapFailure::ResourceNotFound {
                location: location.to_owned(),
            },
            _ => BootstrapFailure::io(location, err),
        })?;
        Ok(Some(Box::new(BufReader::new(file))))
    }
}

fn resolve(
    location: &str,
    context: Option<&ResolutionContext>,
) -> Result<PathBuf, BootstrapFailure> {
    if let Some(relative) = location.strip_prefix(BUNDLED_PREFIX) {
        return resolve_bundled(location, Utf8Path::new(relative), context);
    }
    match Url::parse(location) {
        // Single-letter schemes are Windows drive letters, not URLs.
        Ok(url) if url.scheme().len() > 1 => path_from_url(location, &url),
        _ => Ok(PathBuf::from(location)),
    }
}

fn path_from_url(location: &str, url: &Url) -> Result<PathBuf, BootstrapFailure> {
    if url.scheme() != "file" {
        return Err(BootstrapFailure::InvalidLocation {
            location: location.to_owned(),
            message: format!("unsupported scheme '{}'", url.scheme()),
        });
    }
    url.to_file_path()
        .map_err(|()| BootstrapFailure::InvalidLocation {
            location: location.to_owned(),
            message: String::from("file URL does not name a local path"),
        })
}

fn resolve_bundled(
    location: &str,
    relative: &Utf8Path,
    context: Option<&ResolutionContext>,
) -> Result<PathBuf, BootstrapFailure> {
    validate_relative(location, relative)?;
    let Some(scope) = context else {
        debug!(
            target: OPENER_TARGET,
            location,
            "no resolution context for bundled resource"
        );
        return Err(BootstrapFailure::ResourceNotFound {
            location: location.to_owned(),
        });
    };
    scope
        .candidates(relative)
        .find(|candidate| candidate.is_file())
        .map(Utf8PathBuf::into_std_path_buf)
        .ok_or_else(|| BootstrapFailure::ResourceNotFound {
            location: location.to_owned(),
        })
}

fn validate_relative(location: &str, relative: &Utf8Path) -> Result<(), BootstrapFailure> {
    let invalid = |message: &str| BootstrapFailure::InvalidLocation {
        location: location.to_owned(),
        message: message.to_owned(),
    };
    if relative.as_str().trim().is_empty() {
        return Err(invalid("bundled location names no resource"));
    }
    if relative.is_absolute() {
        return Err(invalid("bundled location must be relative"));
    }
    if relative
        .components()
        .any(|component| matches!(component, Utf8Component::ParentDir))
    {
        return Err(invalid("bundled location must not leave its search root"));
    }
    Ok(())
}
