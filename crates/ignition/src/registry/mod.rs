//! Shared registry of loaded providers.
//!
//! The [`ProviderRegistry`] is a cloneable handle: every clone sees the same
//! provider table. The bootstrap process creates one registry and hands a
//! clone to each initializer. Entries are keyed by kind, element, and
//! namespace; a later registration for the same key replaces the earlier
//! one.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use tracing::debug;

use crate::error::BootstrapFailure;
use crate::provider::{ProviderEntry, ProviderFileLoader, ProviderKind};

/// Tracing target for registry updates.
const REGISTRY_TARGET: &str = "ignition::registry";

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct ProviderKey {
    kind: ProviderKind,
    element: String,
    namespace: String,
}

impl ProviderKey {
    fn of(entry: &ProviderEntry) -> Self {
        Self {
            kind: entry.kind(),
            element: entry.element().to_owned(),
            namespace: entry.namespace().to_owned(),
        }
    }
}

/// Process-wide table of registered providers.
///
/// Writes take an internal lock for the duration of one
/// [`add_loader`](Self::add_loader) call. Reads recover the table from a
/// poisoned lock; writes report it as [`BootstrapFailure::Registry`].
///
/// # Example
///
/// ```
/// use ignition::{ProviderFileLoader, ProviderKind, ProviderRegistry};
///
/// let registry = ProviderRegistry::new();
/// let loader = ProviderFileLoader::parse(
///     r#"{"providers": [{"element": "ping", "namespace": "urn:xmpp:ping",
///         "kind": "iq", "handler": "ping"}]}"#,
/// )
/// .expect("provider document parses");
/// registry
///     .add_loader(&loader)
///     .expect("registry accepts providers");
/// assert!(registry.get(ProviderKind::Iq, "ping", "urn:xmpp:ping").is_some());
/// ```
#[derive(Debug, Clone, Default)]
pub struct ProviderRegistry {
    providers: Arc<RwLock<HashMap<ProviderKey, ProviderEntry>>>,
}

impl ProviderRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers every accepted entry of `loader`, returning how many were
    /// added.
    ///
    /// # Errors
    ///
    /// Returns [`BootstrapFailure::Registry`] if the registry lock was
    /// poisoned by a panicking writer.
    pub fn add_loader(&self, loader: &ProviderFileLoader) -> Result<usize, BootstrapFailure> {
        let mut providers = self
            .providers
            .write()
            .map_err(|err| BootstrapFailure::Registry {
                message: err.to_string(),
            })?;
        for entry in loader.entries() {
            if providers
                .insert(ProviderKey::of(entry), entry.clone())
                .is_some()
            {
                debug!(
                    target: REGISTRY_TARGET,
                    kind = %entry.kind(),
                    element = entry.element(),
                    namespace = entry.namespace(),
                    "replacing previously registered provider"
                );
            }
        }
        Ok(loader.entries().len())
    }

    /// Looks up a provider by kind, element name, and namespace.
    #[must_use]
    pub fn get(&self, kind: ProviderKind, element: &str, namespace: &str) -> Option<ProviderEntry> {
        let key = ProviderKey {
            kind,
            element: element.to_owned(),
            namespace: namespace.to_owned(),
        };
        self.read(|providers| providers.get(&key).cloned())
    }

    /// Returns all providers of the given kind, ordered by namespace then
    /// element.
    #[must_use]
    pub fn find_by_kind(&self, kind: ProviderKind) -> Vec<ProviderEntry> {
        self.collect(|entry| entry.kind() == kind)
    }

    /// Returns all providers registered under `namespace`, ordered by kind
    /// then element.
    #[must_use]
    pub fn find_by_namespace(&self, namespace: &str) -> Vec<ProviderEntry> {
        self.collect(|entry| entry.namespace() == namespace)
    }

    /// Returns the number of registered providers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.read(HashMap::len)
    }

    /// Returns `true` when no providers are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.read(HashMap::is_empty)
    }

    fn read<T>(&self, f: impl FnOnce(&HashMap<ProviderKey, ProviderEntry>) -> T) -> T {
        let providers = self
            .providers
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        f(&providers)
    }

    fn collect(&self, predicate: impl Fn(&ProviderEntry) -> bool) -> Vec<ProviderEntry> {
        let mut matches: Vec<ProviderEntry> = self.read(|providers| {
            providers
                .values()
                .filter(|entry| predicate(entry))
                .cloned()
                .collect()
        });
        matches.sort_by(|a, b| {
            (a.kind(), a.namespace(), a.element()).cmp(&(b.kind(), b.namespace(), b.element()))
        });
        matches
    }
}

#[cfg(test)]
impl ProviderRegistry {
    /// Poisons the table lock by panicking while holding it.
    pub(crate) fn poison(&self) {
        let handle = self.clone();
        let outcome = std::thread::spawn(move || {
            let _guard = handle.providers.write();
            panic!("poisoning provider registry");
        })
        .join();
        assert!(outcome.is_err(), "poisoning thread should panic");
    }
}
