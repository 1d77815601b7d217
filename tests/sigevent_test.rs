//! Tests for report delivery to a sigevent-style endpoint.

mod common;

use std::time::Duration;

use common::mock_server::query;
use common::MockSigevent;
use palette_core::Severity;
use palette_validate::models::{ReportContext, ReportTags};
use palette_validate::services::{ReportEmitter, SigeventEmitter};
use pretty_assertions::assert_eq;

fn emitter(url: &str) -> SigeventEmitter {
    SigeventEmitter::new(url, ReportTags::default(), Duration::from_secs(2))
        .expect("Failed to build emitter")
}

#[tokio::test]
async fn test_report_fields() {
    let server = MockSigevent::start().await;
    server.accept_events().await;

    let ctx = ReportContext::new("mrfgen-01", Some("/data/colormap.xml".to_string()));
    emitter(&server.events_url())
        .emit(Severity::Error, "Summary:\nMatched colors: 1\n", &ctx)
        .await;

    let events = server.events().await;
    assert_eq!(events.len(), 1);
    let event = &events[0];
    assert_eq!(query(event, "type").as_deref(), Some("ERROR"));
    assert_eq!(
        query(event, "description").as_deref(),
        Some("Summary:\nMatched colors: 1\n")
    );
    assert_eq!(query(event, "computer").as_deref(), Some("mrfgen-01"));
    assert_eq!(query(event, "source").as_deref(), Some("ONEARTH"));
    assert_eq!(query(event, "format").as_deref(), Some("TEXT"));
    assert_eq!(query(event, "category").as_deref(), Some("MRFGEN"));
    assert_eq!(query(event, "provider").as_deref(), Some("GIBS"));
    assert_eq!(query(event, "data").as_deref(), Some("/data/colormap.xml"));
}

#[tokio::test]
async fn test_report_without_document_omits_data() {
    let server = MockSigevent::start().await;
    server.accept_events().await;

    let ctx = ReportContext::new("mrfgen-01", None);
    emitter(&server.events_url())
        .emit(Severity::Info, "ok", &ctx)
        .await;

    let events = server.events().await;
    assert_eq!(events.len(), 1);
    assert_eq!(query(&events[0], "data"), None);
}

#[tokio::test]
async fn test_long_description_truncated() {
    let server = MockSigevent::start().await;
    server.accept_events().await;

    let ctx = ReportContext::new("h", None);
    emitter(&server.events_url())
        .emit(Severity::Warn, &"w".repeat(1000), &ctx)
        .await;

    let events = server.events().await;
    let description = query(&events[0], "description").unwrap();
    assert_eq!(description.chars().count(), 256);
    assert!(description.ends_with("..."));
}

#[tokio::test]
async fn test_trailing_slash_and_question_mark_stripped() {
    let server = MockSigevent::start().await;
    server.expect_severity("INFO", 1).await;

    let url = format!("{}/?", server.events_url());
    let sigevent = emitter(&url);
    assert_eq!(sigevent.endpoint(), server.events_url());

    sigevent
        .emit(Severity::Info, "ok", &ReportContext::new("h", None))
        .await;
}

#[tokio::test]
async fn test_server_error_is_swallowed() {
    let server = MockSigevent::start().await;
    server.reject_events(500).await;

    emitter(&server.events_url())
        .emit(Severity::Error, "boom", &ReportContext::new("h", None))
        .await;

    assert_eq!(server.events().await.len(), 1);
}
