//! Decoding provider files into accepted entries and per-entry failures.

use std::io::Read;

use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use super::ProviderEntry;
use crate::error::BootstrapFailure;

/// Tracing target for provider file decoding.
const LOADER_TARGET: &str = "ignition::provider";

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct ProviderDocument {
    #[serde(default)]
    providers: Vec<Value>,
}

/// Parsed contents of one provider file.
///
/// Construction fails only when the document as a whole is unreadable or
/// not a provider document. Individual entries that fail to decode or
/// validate are collected in [`failures`](Self::failures) in document order.
///
/// # Example
///
/// ```
/// use ignition::ProviderFileLoader;
///
/// let json = r#"{"providers": [
///     {"element": "query", "namespace": "jabber:iq:version", "kind": "iq", "handler": "version"},
///     {"element": "", "namespace": "urn:x", "kind": "extension", "handler": "x"}
/// ]}"#;
/// let loader = ProviderFileLoader::parse(json).expect("provider document parses");
/// assert_eq!(loader.entries().len(), 1);
/// assert_eq!(loader.failures().len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ProviderFileLoader {
    entries: Vec<ProviderEntry>,
    failures: Vec<BootstrapFailure>,
}

impl ProviderFileLoader {
    /// Reads and decodes a provider document from `reader`.
    ///
    /// # Errors
    ///
    /// Returns [`BootstrapFailure::ReadStream`] if the stream cannot be read, or
    /// [`BootstrapFailure::ProviderFile`] if it is not a provider document.
    pub fn load(location: &str, mut reader: impl Read) -> Result<Self, BootstrapFailure> {
        let mut text = String::new();
        reader
            .read_to_string(&mut text)
            .map_err(|err| BootstrapFailure::read_stream(location, err))?;
        Self::parse(&text)
    }

    /// Decodes a provider document held in memory.
    ///
    /// # Errors
    ///
    /// Returns [`BootstrapFailure::ProviderFile`] if `text` is not a
    /// provider document.
    pub fn parse(text: &str) -> Result<Self, BootstrapFailure> {
        let document = parse_document(text)?;

        let mut loader = Self::default();
        for (index, raw) in document.providers.into_iter().enumerate() {
            match decode_entry(index, raw) {
                Ok(entry) => loader.entries.push(entry),
                Err(failure) => loader.failures.push(failure),
            }
        }
        debug!(
            target: LOADER_TARGET,
            accepted = loader.entries.len(),
            rejected = loader.failures.len(),
            "decoded provider file"
        );
        Ok(loader)
    }

    /// Returns the accepted provider entries in document order.
    #[must_use]
    pub fn entries(&self) -> &[ProviderEntry] {
        &self.entries
    }

    /// Returns the per-entry failures in document order.
    #[must_use]
    pub fn failures(&self) -> &[BootstrapFailure] {
        &self.failures
    }

    /// Consumes the loader, returning its per-entry failures.
    #[must_use]
    pub fn into_failures(self) -> Vec<BootstrapFailure> {
        self.failures
    }
}

fn parse_document(text: &str) -> Result<ProviderDocument, BootstrapFailure> {
    let malformed = |err: serde_json::Error| BootstrapFailure::ProviderFile {
        message: err.to_string(),
    };
    let document: Value = serde_json::from_str(text).map_err(malformed)?;
    if !document.is_object() {
        return Err(BootstrapFailure::ProviderFile {
            message: String::from("expected an object with a providers list"),
        });
    }
    serde_json::from_value(document).map_err(malformed)
}

fn decode_entry(index: usize, raw: Value) -> Result<ProviderEntry, BootstrapFailure> {
    let entry: ProviderEntry =
        serde_json::from_value(raw).map_err(|err| BootstrapFailure::ProviderEntry {
            index,
            message: err.to_string(),
        })?;
    if let Some(field) = entry.blank_field() {
        return Err(BootstrapFailure::ProviderEntry {
            index,
            message: format!("{field} must not be empty"),
        });
    }
    Ok(entry)
}
