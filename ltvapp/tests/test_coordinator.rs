use ltvapp::{CatalogEvent, Coordinator, CycleOutcome, Preferences, UpdateState};
use ltvcache::CacheStore;
use ltvcatalog::{Channel, Playlist};
use ltvsources::{SourceDescriptor, SourceErrorKind, SourcesReader};
use std::collections::BTreeSet;
use std::path::PathBuf;
use tempfile::TempDir;

fn write_source(dir: &TempDir, file: &str, payload: &str) -> PathBuf {
    let path = dir.path().join(file);
    std::fs::write(&path, payload).unwrap();
    path
}

fn coordinator(
    cache_dir: &TempDir,
    sources: Vec<SourceDescriptor>,
    preferences: Preferences,
) -> Coordinator {
    Coordinator::new(
        SourcesReader::new().unwrap(),
        CacheStore::new(cache_dir.path()).unwrap(),
        sources,
        preferences,
    )
}

fn json_category(name: &str, channels: &[(&str, &str)]) -> String {
    let channels: Vec<String> = channels
        .iter()
        .map(|(n, u)| format!(r#"{{"name": "{n}", "stream_url": "{u}"}}"#))
        .collect();
    format!(
        r#"{{"categories": [{{"name": "{name}", "channels": [{}]}}]}}"#,
        channels.join(", ")
    )
}

#[tokio::test]
async fn test_overlapping_categories_merge_into_one() {
    let files = tempfile::tempdir().unwrap();
    let cache = tempfile::tempdir().unwrap();

    let one = write_source(
        &files,
        "one.json",
        &json_category("News", &[("ChA", "http://example.org/a"), ("ChB", "http://example.org/b")]),
    );
    let two = write_source(
        &files,
        "two.json",
        &json_category("News", &[("ChC", "http://example.org/c")]),
    );

    let coordinator = coordinator(
        &cache,
        vec![SourceDescriptor::local(one), SourceDescriptor::local(two)],
        Preferences::default(),
    );
    let mut events = coordinator.subscribe();

    let outcome = coordinator.request_update(false).await;
    let CycleOutcome::Loaded { errors } = outcome else {
        panic!("expected Loaded, got {outcome:?}");
    };
    assert!(errors.is_empty());
    assert_eq!(coordinator.state(), UpdateState::Loaded);

    let Ok(CatalogEvent::CatalogReady(catalog)) = events.try_recv() else {
        panic!("expected CatalogReady event");
    };

    // one merged category; completion order decides channel order, so
    // assert the multiset rather than the sequence
    assert_eq!(catalog.categories.len(), 1);
    assert_eq!(catalog.categories[0].name, "News");
    let names: BTreeSet<_> = catalog.categories[0]
        .channels
        .iter()
        .map(|c| c.name.as_str())
        .collect();
    assert_eq!(names, BTreeSet::from(["ChA", "ChB", "ChC"]));
    assert_eq!(catalog.categories[0].channels.len(), 3);

    // successful cycle persisted the snapshot
    assert!(coordinator.cache().has_catalog());
}

#[tokio::test]
async fn test_total_failure_keeps_previous_snapshot() {
    let cache = tempfile::tempdir().unwrap();

    // seed a snapshot from an earlier successful cycle
    let store = CacheStore::new(cache.path()).unwrap();
    let previous = Playlist::new(vec![ltvcatalog::Category::with_channels(
        "News",
        vec![Channel::new("ChA", "http://example.org/a")],
    )]);
    store.write_catalog(&previous).unwrap();

    let coordinator = coordinator(
        &cache,
        vec![
            SourceDescriptor::local("/nonexistent/one.m3u"),
            SourceDescriptor::local("/nonexistent/two.m3u"),
        ],
        Preferences::default(),
    );
    let mut events = coordinator.subscribe();

    let outcome = coordinator.request_update(false).await;
    let CycleOutcome::TotalFailure { cache_available } = outcome else {
        panic!("expected TotalFailure, got {outcome:?}");
    };
    assert!(cache_available);
    assert_eq!(coordinator.state(), UpdateState::TotalFailure);

    // one error event per failing source, then the blocking prompt
    let mut source_errors = 0;
    let mut total_failures = 0;
    while let Ok(event) = events.try_recv() {
        match event {
            CatalogEvent::SourceErrored { kind, .. } => {
                assert_eq!(kind, SourceErrorKind::Transport);
                source_errors += 1;
            }
            CatalogEvent::TotalFailure { cache_available } => {
                assert!(cache_available);
                total_failures += 1;
            }
            CatalogEvent::CatalogReady(_) => panic!("no catalog should be ready"),
        }
    }
    assert_eq!(source_errors, 2);
    assert_eq!(total_failures, 1);

    // the snapshot survived and the fallback serves it
    assert_eq!(store.read_catalog().unwrap(), previous);
    let fallback = coordinator.load_cached_catalog().unwrap();
    assert_eq!(fallback.categories[0].name, "News");
}

#[tokio::test]
async fn test_partial_failure_still_loads() {
    let files = tempfile::tempdir().unwrap();
    let cache = tempfile::tempdir().unwrap();

    let good = write_source(
        &files,
        "good.json",
        &json_category("News", &[("ChA", "http://example.org/a")]),
    );

    let coordinator = coordinator(
        &cache,
        vec![
            SourceDescriptor::local(good),
            SourceDescriptor::local("/nonexistent/bad.m3u"),
        ],
        Preferences::default(),
    );

    let CycleOutcome::Loaded { errors } = coordinator.request_update(false).await else {
        panic!("expected Loaded");
    };
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].kind, SourceErrorKind::Transport);
    assert_eq!(coordinator.state(), UpdateState::PartialWithErrors);
}

#[tokio::test]
async fn test_vanished_favorite_is_dropped_silently() {
    let files = tempfile::tempdir().unwrap();
    let cache = tempfile::tempdir().unwrap();

    let source = write_source(
        &files,
        "list.json",
        &json_category("News", &[("ChA", "http://example.org/a")]),
    );

    let coordinator = coordinator(
        &cache,
        vec![SourceDescriptor::local(source)],
        Preferences::default(),
    );

    // favorite a channel no source delivers anymore
    coordinator
        .cache()
        .insert_or_update_favorite(&Channel::new("Gone", "http://example.org/gone"))
        .unwrap();

    let CycleOutcome::Loaded { errors } = coordinator.request_update(false).await else {
        panic!("expected Loaded");
    };
    assert!(errors.is_empty());

    let catalog = coordinator.load_cached_catalog().unwrap();
    assert!(catalog.categories.iter().all(|c| !c.is_favorites()));
}

#[tokio::test]
async fn test_resolved_favorites_lead_the_catalog() {
    let files = tempfile::tempdir().unwrap();
    let cache = tempfile::tempdir().unwrap();

    let source = write_source(
        &files,
        "list.json",
        &json_category("News", &[("ChA", "http://example.org/a"), ("ChB", "http://example.org/b")]),
    );

    let coordinator = coordinator(
        &cache,
        vec![SourceDescriptor::local(source)],
        Preferences::default(),
    );
    coordinator
        .cache()
        .insert_or_update_favorite(&Channel::new("ChB", "http://example.org/b"))
        .unwrap();
    let mut events = coordinator.subscribe();

    assert!(matches!(
        coordinator.request_update(false).await,
        CycleOutcome::Loaded { .. }
    ));

    let Ok(CatalogEvent::CatalogReady(catalog)) = events.try_recv() else {
        panic!("expected CatalogReady event");
    };
    assert!(catalog.categories[0].is_favorites());
    assert_eq!(catalog.categories[0].channels[0].name, "ChB");

    // derived favorites never reach the snapshot
    let snapshot = coordinator.cache().read_catalog().unwrap();
    assert!(snapshot.categories.iter().all(|c| !c.is_favorites()));
}

#[tokio::test]
async fn test_empty_stream_urls_trimmed_before_delivery() {
    let files = tempfile::tempdir().unwrap();
    let cache = tempfile::tempdir().unwrap();

    let payload = r#"{
        "categories": [
            {"name": "News", "channels": [
                {"name": "ChA", "stream_url": "http://example.org/a"},
                {"name": "Dead", "stream_url": ""}
            ]},
            {"name": "Husk", "channels": [{"name": "Empty", "stream_url": ""}]}
        ]
    }"#;
    let source = write_source(&files, "list.json", payload);

    let coordinator = coordinator(
        &cache,
        vec![SourceDescriptor::local(source)],
        Preferences::default(),
    );
    let mut events = coordinator.subscribe();

    assert!(matches!(
        coordinator.request_update(false).await,
        CycleOutcome::Loaded { .. }
    ));

    let Ok(CatalogEvent::CatalogReady(catalog)) = events.try_recv() else {
        panic!("expected CatalogReady event");
    };
    assert_eq!(catalog.categories.len(), 1);
    assert_eq!(catalog.categories[0].name, "News");
    assert_eq!(catalog.categories[0].channels.len(), 1);
}

#[tokio::test]
async fn test_use_cache_short_circuits_fetch() {
    let cache = tempfile::tempdir().unwrap();

    let store = CacheStore::new(cache.path()).unwrap();
    let snapshot = Playlist::new(vec![ltvcatalog::Category::with_channels(
        "News",
        vec![Channel::new("ChA", "http://example.org/a")],
    )]);
    store.write_catalog(&snapshot).unwrap();

    // every configured source would fail; the cache hit must win
    let coordinator = coordinator(
        &cache,
        vec![SourceDescriptor::local("/nonexistent/one.m3u")],
        Preferences::default(),
    );

    let CycleOutcome::Loaded { errors } = coordinator.request_update(true).await else {
        panic!("expected Loaded from cache");
    };
    assert!(errors.is_empty());
    assert_eq!(coordinator.state(), UpdateState::Loaded);
}

#[tokio::test]
async fn test_use_cache_miss_degrades_to_fetch() {
    let files = tempfile::tempdir().unwrap();
    let cache = tempfile::tempdir().unwrap();

    let source = write_source(
        &files,
        "list.json",
        &json_category("News", &[("ChA", "http://example.org/a")]),
    );

    let coordinator = coordinator(
        &cache,
        vec![SourceDescriptor::local(source)],
        Preferences::default(),
    );

    let CycleOutcome::Loaded { errors } = coordinator.request_update(true).await else {
        panic!("expected Loaded from fetch");
    };
    assert!(errors.is_empty());
    assert!(coordinator.cache().has_catalog());
}

#[tokio::test]
async fn test_sort_preferences_applied_on_finalize() {
    let files = tempfile::tempdir().unwrap();
    let cache = tempfile::tempdir().unwrap();

    let payload = r#"{
        "categories": [
            {"name": "sports", "channels": [
                {"name": "Zeta", "stream_url": "http://example.org/z"},
                {"name": "alpha", "stream_url": "http://example.org/al"}
            ]},
            {"name": "Movies", "channels": [{"name": "M", "stream_url": "http://example.org/m"}]}
        ]
    }"#;
    let source = write_source(&files, "list.json", payload);

    let coordinator = coordinator(
        &cache,
        vec![SourceDescriptor::local(source)],
        Preferences {
            sort_category: true,
            sort_channel: true,
            ..Preferences::default()
        },
    );
    let mut events = coordinator.subscribe();

    assert!(matches!(
        coordinator.request_update(false).await,
        CycleOutcome::Loaded { .. }
    ));

    let Ok(CatalogEvent::CatalogReady(catalog)) = events.try_recv() else {
        panic!("expected CatalogReady event");
    };
    let categories: Vec<_> = catalog.categories.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(categories, ["Movies", "sports"]);
    let channels: Vec<_> = catalog.categories[1]
        .channels
        .iter()
        .map(|c| c.name.as_str())
        .collect();
    assert_eq!(channels, ["alpha", "Zeta"]);
}

#[tokio::test]
async fn test_toggle_favorite_round_trip() {
    let cache = tempfile::tempdir().unwrap();
    let coordinator = coordinator(&cache, Vec::new(), Preferences::default());

    let channel = Channel::new("ChA", "http://example.org/a");
    assert!(coordinator.toggle_favorite(&channel).unwrap());
    assert!(coordinator.cache().is_favorite(&channel.identity()));
    assert!(!coordinator.toggle_favorite(&channel).unwrap());
    assert!(!coordinator.cache().is_favorite(&channel.identity()));

    let locked = Channel {
        can_favorite: false,
        ..Channel::new("Locked", "http://example.org/l")
    };
    assert!(coordinator.toggle_favorite(&locked).is_err());
}
