mod common;

use std::collections::HashMap;

use axum::http::{Method, StatusCode};
use metrics_util::debugging::{DebugValue, DebuggingRecorder};

use blog_api::cache::{
    CATEGORIES_CACHE_KEY, METRIC_CACHE_HIT_TOTAL, METRIC_CACHE_MISS_TOTAL, TtlStore,
};

use common::{MemoryStore, app, send};

#[tokio::test]
async fn cache_paths_emit_expected_metric_keys() {
    let recorder = DebuggingRecorder::new();
    let snapshotter = recorder.snapshotter();
    recorder
        .install()
        .expect("debug metrics recorder should install in this test process");

    // Category listing through the API: one miss, then one hit.
    let store = MemoryStore::seeded();
    let app = app(&store);
    let first = send(&app, Method::GET, "/v1/categories", None).await;
    let second = send(&app, Method::GET, "/v1/categories", None).await;
    assert_eq!(first.status, StatusCode::OK);
    assert_eq!(second.status, StatusCode::OK);

    // A standalone store labelled with its own name.
    let scratch: TtlStore<u32, u32> = TtlStore::new("scratch");
    assert!(scratch.get(&1).is_none());

    let mut counters: HashMap<(String, String), u64> = HashMap::new();
    for (composite_key, _, _, value) in snapshotter.snapshot().into_vec() {
        let key = composite_key.key();
        let label = key
            .labels()
            .find(|label| label.key() == "cache")
            .map(|label| label.value().to_string())
            .unwrap_or_default();
        if let DebugValue::Counter(count) = value {
            counters.insert((key.name().to_string(), label), count);
        }
    }

    let count = |metric: &str, cache: &str| {
        counters
            .get(&(metric.to_string(), cache.to_string()))
            .copied()
    };

    assert_eq!(count(METRIC_CACHE_MISS_TOTAL, CATEGORIES_CACHE_KEY), Some(1));
    assert_eq!(count(METRIC_CACHE_HIT_TOTAL, CATEGORIES_CACHE_KEY), Some(1));
    assert_eq!(count(METRIC_CACHE_MISS_TOTAL, "scratch"), Some(1));
    assert_eq!(count(METRIC_CACHE_HIT_TOTAL, "scratch"), None);
    assert_eq!(store.category_reads(), 1);
}
