//! Unit tests for provider declarations and the provider file loader.

use std::io::{self, Read};

use rstest::rstest;

use super::*;
use crate::error::{BootstrapFailure, FailureKind};

fn entry_indices(loader: &ProviderFileLoader) -> Vec<usize> {
    loader
        .failures()
        .iter()
        .map(|failure| match failure {
            BootstrapFailure::ProviderEntry { index, .. } => *index,
            other => panic!("unexpected failure: {other}"),
        })
        .collect()
}

struct BrokenReader;

impl Read for BrokenReader {
    fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
        Err(io::Error::other("device unplugged"))
    }
}

// ---------------------------------------------------------------------------
// ProviderEntry
// ---------------------------------------------------------------------------

#[test]
fn provider_kind_deserialises_snake_case() {
    let kind: ProviderKind = serde_json::from_str("\"extension\"").expect("parse kind");
    assert_eq!(kind, ProviderKind::Extension);
}

#[rstest]
#[case::element(ProviderEntry::new(" ", "urn:x", ProviderKind::Iq, "h"), Some("element"))]
#[case::namespace(ProviderEntry::new("x", "", ProviderKind::Iq, "h"), Some("namespace"))]
#[case::handler(ProviderEntry::new("x", "urn:x", ProviderKind::Iq, ""), Some("handler"))]
#[case::valid(ProviderEntry::new("x", "urn:x", ProviderKind::Iq, "h"), None)]
fn blank_field_names_first_blank(
    #[case] entry: ProviderEntry,
    #[case] expected: Option<&'static str>,
) {
    assert_eq!(entry.blank_field(), expected);
}

// ---------------------------------------------------------------------------
// ProviderFileLoader
// ---------------------------------------------------------------------------

#[test]
fn well_formed_file_loads_every_entry() {
    let loader = ProviderFileLoader::parse(
        r#"{"providers": [
            {"element": "query", "namespace": "jabber:iq:version", "kind": "iq", "handler": "version"},
            {"element": "delay", "namespace": "urn:xmpp:delay", "kind": "extension", "handler": "delay"}
        ]}"#,
    )
    .expect("parse provider file");
    assert!(loader.failures().is_empty());
    let elements: Vec<&str> = loader.entries().iter().map(ProviderEntry::element).collect();
    assert_eq!(elements, vec!["query", "delay"]);
}

#[test]
fn malformed_entries_are_reported_in_document_order() {
    let loader = ProviderFileLoader::parse(
        r#"{"providers": [
            {"element": "query", "namespace": "jabber:iq:version", "kind": "iq", "handler": "version"},
            {"element": "a", "namespace": "urn:a", "kind": "unknown", "handler": "a"},
            "not an object",
            {"element": "b", "namespace": "urn:b", "kind": "iq", "handler": "b"},
            {"element": "c", "namespace": "  ", "kind": "iq", "handler": "c"}
        ]}"#,
    )
    .expect("parse provider file");
    assert_eq!(loader.entries().len(), 2);
    assert_eq!(entry_indices(&loader), vec![1, 2, 4]);
}

#[test]
fn blank_field_failure_names_the_field() {
    let loader = ProviderFileLoader::parse(
        r#"{"providers": [{"element": "c", "namespace": "", "kind": "iq", "handler": "c"}]}"#,
    )
    .expect("parse provider file");
    let failure = loader.failures().first().expect("one failure");
    assert!(failure.to_string().contains("namespace must not be empty"));
}

#[test]
fn document_without_providers_is_empty() {
    let loader = ProviderFileLoader::parse("{}").expect("parse empty document");
    assert!(loader.entries().is_empty());
    assert!(loader.failures().is_empty());
}

#[rstest]
#[case::not_json("<providers/>")]
#[case::wrong_shape(r#"{"providers": 3}"#)]
#[case::truncated(r#"{"providers": ["#)]
#[case::misnamed_key(
    r#"{"provider": [{"element": "p", "namespace": "urn:p", "kind": "iq", "handler": "p"}]}"#
)]
#[case::array("[]")]
#[case::null("null")]
fn malformed_document_is_a_single_failure(#[case] text: &str) {
    let err = ProviderFileLoader::parse(text).expect_err("document should be rejected");
    assert!(matches!(err, BootstrapFailure::ProviderFile { .. }));
}

#[test]
fn load_reads_from_stream() {
    let json = r#"{"providers": [{"element": "p", "namespace": "urn:p", "kind": "iq", "handler": "p"}]}"#;
    let loader =
        ProviderFileLoader::load("providers.json", json.as_bytes()).expect("load from stream");
    assert_eq!(loader.entries().len(), 1);
}

#[test]
fn load_reports_read_errors_against_location() {
    let err = ProviderFileLoader::load("providers.json", BrokenReader)
        .expect_err("read error should fail");
    assert!(matches!(err, BootstrapFailure::ReadStream { .. }));
    assert_eq!(err.kind(), FailureKind::Unexpected);
    assert!(err.to_string().contains("providers.json"));
}

#[test]
fn undecodable_content_is_a_parse_failure() {
    let bytes: &[u8] = &[0xff, 0xfe, b'{'];
    let err = ProviderFileLoader::load("providers.json", bytes)
        .expect_err("invalid UTF-8 should fail");
    assert!(matches!(err, BootstrapFailure::ReadStream { .. }));
    assert_eq!(err.kind(), FailureKind::Parse);
}

#[test]
fn into_failures_yields_entry_failures() {
    let loader = ProviderFileLoader::parse(
        r#"{"providers": [{"element": "", "namespace": "urn:a", "kind": "iq", "handler": "a"}]}"#,
    )
    .expect("parse provider file");
    assert_eq!(loader.into_failures().len(), 1);
}
