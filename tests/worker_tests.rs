//! Worker host integration tests.
//!
//! These tests drive the worker through its async handle the way a UI
//! would: process raw files, init, search, filter, re-init.

mod common;

use rust_ccg_search::index::{IndexManifest, MemorySource};
use rust_ccg_search::query::{FilterSet, SearchMode};
use rust_ccg_search::worker::{IndexOrigin, WorkerHost};
use rust_ccg_search::{CatalogError, EngineConfig, InitOptions};

fn spawn(source: MemorySource) -> WorkerHost {
    common::init_logging();
    WorkerHost::spawn(EngineConfig::default(), source).unwrap()
}

// =============================================================================
// Request flow
// =============================================================================

#[tokio::test]
async fn test_full_flow() {
    let host = spawn(MemorySource::new());
    let worker = host.handle();

    let processed = worker
        .process_raw_data(vec![common::booster_file()])
        .await
        .unwrap();
    assert_eq!(processed.all_cards.len(), 5);

    let origin = worker
        .init(processed.all_cards.clone(), InitOptions::new().with_game("ws"))
        .await
        .unwrap();
    assert_eq!(origin, IndexOrigin::Built);
    assert_eq!(worker.card_count().await.unwrap(), 5);

    worker
        .search_by_keyword(Some("fire".into()), SearchMode::Precise)
        .await
        .unwrap();
    let red = worker
        .filter_by_attributes(FilterSet::new().with_color("Red"))
        .await
        .unwrap();
    assert_eq!(red.len(), 3);

    // Filtering again over the same working set gives the same answer.
    let again = worker
        .filter_by_attributes(FilterSet::new().with_color("Red"))
        .await
        .unwrap();
    assert_eq!(red, again);
}

#[tokio::test]
async fn test_process_raw_data_does_not_need_init() {
    let host = spawn(MemorySource::new());
    let worker = host.handle();

    let processed = worker
        .process_raw_data(common::alpha_beta_files())
        .await
        .unwrap();
    assert_eq!(processed.all_cards.len(), 3);

    let err = worker.card_count().await.unwrap_err();
    assert!(matches!(err, CatalogError::NotReady));
}

#[tokio::test]
async fn test_process_raw_data_reports_shape_errors() {
    let host = spawn(MemorySource::new());
    let bad = rust_ccg_search::RawFile::new("S1", serde_json::json!("not an object"));
    let err = host.handle().process_raw_data(vec![bad]).await.unwrap_err();
    assert!(matches!(err, CatalogError::Shape { .. }));
}

#[tokio::test]
async fn test_reinit_replaces_catalog() {
    let host = spawn(MemorySource::new());
    let worker = host.handle();

    let booster = worker
        .process_raw_data(vec![common::booster_file()])
        .await
        .unwrap();
    let alpha_beta = worker
        .process_raw_data(common::alpha_beta_files())
        .await
        .unwrap();

    worker.init(booster.all_cards, InitOptions::new()).await.unwrap();
    worker
        .search_by_keyword(Some("fire".into()), SearchMode::Fuzzy)
        .await
        .unwrap();

    worker.init(alpha_beta.all_cards, InitOptions::new()).await.unwrap();
    assert_eq!(worker.card_count().await.unwrap(), 3);
    // The working set from before re-init is gone.
    let all = worker.filter_by_attributes(FilterSet::default()).await.unwrap();
    assert_eq!(all.len(), 3);
}

#[tokio::test]
async fn test_exported_index_reimports() {
    let source = MemorySource::new();
    let host = spawn(source.clone());
    let worker = host.handle();

    let cards = worker
        .process_raw_data(vec![common::booster_file()])
        .await
        .unwrap()
        .all_cards;
    worker.init(cards.clone(), InitOptions::new()).await.unwrap();

    let parts = worker.export_index().await.unwrap();
    let manifest = IndexManifest::for_parts("v1", "abcd1234", &parts);
    manifest.publish(parts, &source);

    let mut options = InitOptions::new().with_version("v1");
    options.index_files = Some(manifest.files);
    let origin = worker.init(cards, options).await.unwrap();
    assert_eq!(origin, IndexOrigin::Imported);

    worker
        .search_by_keyword(Some("tidal".into()), SearchMode::Precise)
        .await
        .unwrap();
    let found = worker.filter_by_attributes(FilterSet::default()).await.unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id, "BD/W01-003");
}

#[tokio::test]
async fn test_handles_share_one_engine() {
    let host = spawn(MemorySource::new());
    let a = host.handle();
    let b = a.clone();

    let cards = a
        .process_raw_data(common::alpha_beta_files())
        .await
        .unwrap()
        .all_cards;
    a.init(cards, InitOptions::new()).await.unwrap();
    b.search_by_keyword(Some("alpha".into()), SearchMode::Precise)
        .await
        .unwrap();

    // The search issued through `b` narrows what `a` sees.
    let found = a.filter_by_attributes(FilterSet::default()).await.unwrap();
    let ids: Vec<_> = found.iter().map(|c| c.id.as_str()).collect();
    assert_eq!(ids, vec!["S1/001"]);
}

// =============================================================================
// Lifecycle
// =============================================================================

#[tokio::test]
async fn test_calls_after_terminate() {
    let mut host = spawn(MemorySource::new());
    let worker = host.handle();
    worker
        .init(Vec::new(), InitOptions::new())
        .await
        .unwrap();

    host.terminate();
    let err = worker
        .search_by_keyword(None, SearchMode::Precise)
        .await
        .unwrap_err();
    assert!(matches!(err, CatalogError::WorkerGone));
}

#[tokio::test]
async fn test_drop_terminates() {
    let host = spawn(MemorySource::new());
    let worker = host.handle();
    drop(host);
    let err = worker.card_count().await.unwrap_err();
    assert!(matches!(err, CatalogError::WorkerGone));
}
