//! Crate-level integration tests and shared test doubles.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::io::Cursor;

use camino::Utf8PathBuf;
use tempfile::TempDir;

use crate::configuration::{DirectiveProcessor, SharedSettings};
use crate::error::{BootstrapFailure, FailureKind};
use crate::initializer::{Initializer, InitializerConfig, UrlInitializer};
use crate::opener::{FileOpener, ResolutionContext, ResourceOpener, ResourceStream};
use crate::provider::ProviderKind;
use crate::registry::ProviderRegistry;


/// What a [`ScriptedOpener`] does for one location.
#[derive(Clone)]
pub(crate) enum OpenOutcome {
    Content(String),
    Nothing,
    Fail(BootstrapFailure),
}

impl OpenOutcome {
    pub(crate) fn content(text: impl Into<String>) -> Self {
        Self::Content(text.into())
    }
}

/// One recorded call to [`ScriptedOpener::open`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct OpenCall {
    pub(crate) location: String,
    pub(crate) context: Option<ResolutionContext>,
}

/// Opener returning pre-configured outcomes and recording every call.
///
/// Locations without a scripted outcome fail with `ResourceNotFound`.
#[derive(Default)]
pub(crate) struct ScriptedOpener {
    outcomes: HashMap<String, OpenOutcome>,
    calls: RefCell<Vec<OpenCall>>,
}

impl ScriptedOpener {
    pub(crate) fn with(mut self, location: &str, outcome: OpenOutcome) -> Self {
        self.outcomes.insert(location.to_owned(), outcome);
        self
    }

    pub(crate) fn calls(&self) -> Vec<OpenCall> {
        self.calls.borrow().clone()
    }

    pub(crate) fn context_for(&self, location: &str) -> Option<ResolutionContext> {
        self.calls
            .borrow()
            .iter()
            .find(|call| call.location == location)
            .and_then(|call| call.context.clone())
    }
}

impl ResourceOpener for ScriptedOpener {
    fn open(
        &self,
        location: &str,
        context: Option<&ResolutionContext>,
    ) -> Result<Option<ResourceStream>, BootstrapFailure> {
        self.calls.borrow_mut().push(OpenCall {
            location: location.to_owned(),
            context: context.cloned(),
        });
        match self.outcomes.get(location) {
            Some(OpenOutcome::Content(text)) => Ok(Some(Box::new(Cursor::new(text.clone())))),
            Some(OpenOutcome::Nothing) => Ok(None),
            Some(OpenOutcome::Fail(failure)) => Err(failure.clone()),
            None => Err(BootstrapFailure::ResourceNotFound {
                location: location.to_owned(),
            }),
        }
    }
}

pub(crate) const TWO_PROVIDERS: &str = r#"{"providers": [
    {"element": "query", "namespace": "jabber:iq:version", "kind": "iq", "handler": "version"},
    {"element": "delay", "namespace": "urn:xmpp:delay", "kind": "extension", "handler": "delay"}
]}"#;

fn utf8(dir: &TempDir) -> Utf8PathBuf {
    Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("temp dir is UTF-8")
}

#[test]
fn end_to_end_with_bundled_resources() {
    let resources = TempDir::new().expect("create resource root");
    fs::write(resources.path().join("providers.json"), TWO_PROVIDERS).expect("write providers");
    fs::write(
        resources.path().join("bootstrap.json"),
        r#"{"startup": ["roster"], "colour": "blue"}"#,
    )
    .expect("write configuration");

    let registry = ProviderRegistry::new();
    let settings = SharedSettings::new();
    let config = InitializerConfig::new()
        .with_provider_location("classpath:providers.json")
        .with_configuration_location("classpath:bootstrap.json")
        .with_default_context(ResolutionContext::new().with_root(utf8(&resources)));
    let mut initializer = UrlInitializer::new(
        config,
        FileOpener,
        DirectiveProcessor::new(settings.clone()),
        registry.clone(),
    );

    initializer.initialize_default();

    assert_eq!(registry.len(), 2);
    assert!(
        registry
            .get(ProviderKind::Iq, "query", "jabber:iq:version")
            .is_some()
    );
    assert_eq!(settings.snapshot().startup(), ["roster"]);
    assert_eq!(initializer.failures().len(), 1);
    assert!(matches!(
        initializer.failures().first(),
        Some(BootstrapFailure::UnknownDirective { name }) if name == "colour"
    ));
}

#[test]
fn end_to_end_with_missing_resources_never_fails_outright() {
    let empty_root = TempDir::new().expect("create empty root");
    let config = InitializerConfig::new()
        .with_provider_location("classpath:providers.json")
        .with_configuration_location("classpath:bootstrap.json")
        .with_default_context(ResolutionContext::new().with_root(utf8(&empty_root)));
    let registry = ProviderRegistry::new();
    let mut initializer = UrlInitializer::new(
        config,
        FileOpener,
        DirectiveProcessor::default(),
        registry.clone(),
    );

    initializer.initialize_default();

    assert!(registry.is_empty());
    assert_eq!(initializer.failures().len(), 2);
    assert!(
        initializer
            .failures()
            .iter()
            .all(|failure| matches!(failure, BootstrapFailure::ResourceNotFound { .. }))
    );
}

#[test]
fn undecodable_provider_file_is_not_a_resolution_failure() {
    let resources = TempDir::new().expect("create resource root");
    fs::write(resources.path().join("providers.json"), [0xff, 0xfe, b'{'])
        .expect("write providers");
    let config = InitializerConfig::new()
        .with_provider_location("classpath:providers.json")
        .with_default_context(ResolutionContext::from_roots(vec![utf8(&resources)]));
    let registry = ProviderRegistry::new();
    let mut initializer = UrlInitializer::new(
        config,
        FileOpener,
        DirectiveProcessor::default(),
        registry.clone(),
    );

    initializer.initialize_default();

    assert!(registry.is_empty());
    let kinds: Vec<FailureKind> = initializer
        .failures()
        .iter()
        .map(BootstrapFailure::kind)
        .collect();
    assert_eq!(kinds, vec![FailureKind::Parse]);
}

#[test]
fn initializers_can_be_driven_through_the_trait_object() {
    let opener = ScriptedOpener::default().with("providers.json", OpenOutcome::Nothing);
    let config = InitializerConfig::new().with_provider_location("providers.json");
    let mut initializers: Vec<Box<dyn Initializer + '_>> = vec![Box::new(UrlInitializer::new(
        config,
        &opener,
        DirectiveProcessor::default(),
        ProviderRegistry::new(),
    ))];

    for initializer in &mut initializers {
        initializer.initialize_default();
    }
    let failures: usize = initializers.iter().map(|i| i.failures().len()).sum();
    assert_eq!(failures, 1);
    assert_eq!(opener.calls().len(), 1);
}
