//! Provider declarations and the provider file loader.
//!
//! A provider binds a handler to one category of incoming structured content,
//! identified by an element name and a namespace. Providers are declared in
//! bulk in a JSON provider file:
//!
//! ```json
//! {
//!   "providers": [
//!     { "element": "query", "namespace": "jabber:iq:version",
//!       "kind": "iq", "handler": "version" }
//!   ]
//! }
//! ```
//!
//! [`ProviderFileLoader`] decodes each entry independently so that one
//! malformed declaration is reported without discarding its neighbours.

mod loader;

#[cfg(test)]
mod tests;

use serde::{Deserialize, Serialize};

pub use self::loader::ProviderFileLoader;

/// Category of content a provider handles.
///
/// # Example
///
/// ```
/// use ignition::ProviderKind;
///
/// assert_eq!(ProviderKind::Extension.as_str(), "extension");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderKind {
    /// Handles request/response payloads.
    Iq,
    /// Handles extension elements embedded in other content.
    Extension,
}

impl ProviderKind {
    /// Returns the canonical string representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Iq => "iq",
            Self::Extension => "extension",
        }
    }
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One provider declaration.
///
/// # Example
///
/// ```
/// use ignition::{ProviderEntry, ProviderKind};
///
/// let entry = ProviderEntry::new("query", "jabber:iq:version", ProviderKind::Iq, "version");
/// assert_eq!(entry.blank_field(), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderEntry {
    element: String,
    namespace: String,
    kind: ProviderKind,
    handler: String,
}

impl ProviderEntry {
    /// Creates a provider declaration.
    #[must_use]
    pub fn new(
        element: impl Into<String>,
        namespace: impl Into<String>,
        kind: ProviderKind,
        handler: impl Into<String>,
    ) -> Self {
        Self {
            element: element.into(),
            namespace: namespace.into(),
            kind,
            handler: handler.into(),
        }
    }

    /// Returns the name of the first blank identifying field, if any.
    #[must_use]
    pub fn blank_field(&self) -> Option<&'static str> {
        [
            ("element", &self.element),
            ("namespace", &self.namespace),
            ("handler", &self.handler),
        ]
        .into_iter()
        .find(|(_, value)| value.trim().is_empty())
        .map(|(field, _)| field)
    }

    /// Returns the element name.
    #[must_use]
    pub const fn element(&self) -> &str {
        self.element.as_str()
    }

    /// Returns the namespace.
    #[must_use]
    pub const fn namespace(&self) -> &str {
        self.namespace.as_str()
    }

    /// Returns the provider category.
    #[must_use]
    pub const fn kind(&self) -> ProviderKind {
        self.kind
    }

    /// Returns the handler name.
    #[must_use]
    pub const fn handler(&self) -> &str {
        self.handler.as_str()
    }
}
