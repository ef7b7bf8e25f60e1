use std::sync::Arc;

use arc_swap::ArcSwapOption;
use chrono::{DateTime, Utc};
use tracing::debug;

use crate::error::{EstimateError, Result};

use super::provider::CatalogSource;
use super::types::ModelPrice;

/// Wall-clock source used for staleness checks
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// The catalog as fetched at one point in time. Never mutated once built.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogSnapshot {
    models: Vec<ModelPrice>,
    fetched_at: DateTime<Utc>,
}

impl CatalogSnapshot {
    pub fn new(models: Vec<ModelPrice>, fetched_at: DateTime<Utc>) -> Self {
        Self { models, fetched_at }
    }

    pub fn models(&self) -> &[ModelPrice] {
        &self.models
    }

    pub fn fetched_at(&self) -> DateTime<Utc> {
        self.fetched_at
    }

    /// Case-sensitive exact match on the provider-qualified id
    pub fn find(&self, id: &str) -> Option<&ModelPrice> {
        self.models.iter().find(|m| m.id == id)
    }
}

/// Memoizes a [`CatalogSource`] for `ttl_seconds`.
///
/// Refreshes swap the whole snapshot pointer, so concurrent readers see
/// either the old catalog or the new one.
pub struct CatalogCache {
    source: Box<dyn CatalogSource>,
    clock: Box<dyn Clock>,
    ttl_seconds: i64,
    snapshot: ArcSwapOption<CatalogSnapshot>,
}

impl CatalogCache {
    pub fn new(source: Box<dyn CatalogSource>, ttl_seconds: i64) -> Self {
        Self::with_clock(source, ttl_seconds, Box::new(SystemClock))
    }

    pub fn with_clock(
        source: Box<dyn CatalogSource>,
        ttl_seconds: i64,
        clock: Box<dyn Clock>,
    ) -> Self {
        Self {
            source,
            clock,
            ttl_seconds,
            snapshot: ArcSwapOption::empty(),
        }
    }

    pub fn ttl_seconds(&self) -> i64 {
        self.ttl_seconds
    }

    fn is_fresh(&self, snapshot: &CatalogSnapshot, now: DateTime<Utc>) -> bool {
        if self.ttl_seconds <= 0 {
            return false;
        }
        let age = now.signed_duration_since(snapshot.fetched_at);
        age.num_milliseconds() <= self.ttl_seconds.saturating_mul(1000)
    }

    /// Current snapshot, fetching a new one when absent or stale.
    pub fn get_catalog(&self) -> Result<Arc<CatalogSnapshot>> {
        let now = self.clock.now();
        if let Some(snapshot) = self.snapshot.load_full() {
            if self.is_fresh(&snapshot, now) {
                debug!(
                    models = snapshot.models.len(),
                    age_secs = now.signed_duration_since(snapshot.fetched_at).num_seconds(),
                    "model catalog cache hit"
                );
                return Ok(snapshot);
            }
            debug!(ttl_secs = self.ttl_seconds, "model catalog cache stale");
        } else {
            debug!("model catalog cache empty");
        }
        self.refresh()
    }

    /// Fetch unconditionally and replace the snapshot. On failure the previous
    /// snapshot stays in place and the error is returned.
    pub fn refresh(&self) -> Result<Arc<CatalogSnapshot>> {
        let models = self.source.fetch()?;
        let snapshot = Arc::new(CatalogSnapshot::new(models, self.clock.now()));
        self.snapshot.store(Some(Arc::clone(&snapshot)));
        Ok(snapshot)
    }

    pub fn find_model(&self, id: &str) -> Result<ModelPrice> {
        let catalog = self.get_catalog()?;
        catalog
            .find(id)
            .cloned()
            .ok_or_else(|| EstimateError::ModelNotFound {
                model: id.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CatalogFetchError;
    use chrono::{Duration, TimeZone};
    use rust_decimal_macros::dec;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingSource {
        calls: Arc<AtomicUsize>,
        fail: bool,
    }

    impl CatalogSource for CountingSource {
        fn fetch(&self) -> std::result::Result<Vec<ModelPrice>, CatalogFetchError> {
            let n = self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(CatalogFetchError::Status {
                    url: "http://test/models".to_string(),
                    status: 500,
                });
            }
            Ok(vec![ModelPrice {
                id: "openai/gpt-4o-mini".to_string(),
                name: format!("fetch #{n}"),
                provider: "OpenAI".to_string(),
                context_window: 128_000,
                input_price_per_million: dec!(0.15),
                output_price_per_million: dec!(0.6),
                cached_input_price_per_million: Some(dec!(0.075)),
            }])
        }
    }

    struct ManualClock(Arc<Mutex<DateTime<Utc>>>);

    impl Clock for ManualClock {
        fn now(&self) -> DateTime<Utc> {
            *self.0.lock().unwrap()
        }
    }

    fn fixture(ttl: i64) -> (CatalogCache, Arc<AtomicUsize>, Arc<Mutex<DateTime<Utc>>>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let now = Arc::new(Mutex::new(Utc.with_ymd_and_hms(2025, 1, 15, 12, 0, 0).unwrap()));
        let cache = CatalogCache::with_clock(
            Box::new(CountingSource {
                calls: Arc::clone(&calls),
                fail: false,
            }),
            ttl,
            Box::new(ManualClock(Arc::clone(&now))),
        );
        (cache, calls, now)
    }

    #[test]
    fn second_call_within_ttl_is_served_from_cache() {
        let (cache, calls, now) = fixture(3600);
        let first = cache.get_catalog().unwrap();
        *now.lock().unwrap() += Duration::seconds(3600);
        let second = cache.get_catalog().unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn call_after_ttl_refetches() {
        let (cache, calls, now) = fixture(3600);
        cache.get_catalog().unwrap();
        *now.lock().unwrap() += Duration::seconds(3601);
        let refreshed = cache.get_catalog().unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(refreshed.models()[0].name, "fetch #1");
    }

    #[test]
    fn non_positive_ttl_always_refetches() {
        for ttl in [0, -5] {
            let (cache, calls, _) = fixture(ttl);
            cache.get_catalog().unwrap();
            cache.get_catalog().unwrap();
            assert_eq!(calls.load(Ordering::SeqCst), 2);
        }
    }

    #[test]
    fn find_model_exact_match() {
        let (cache, _, _) = fixture(3600);
        let model = cache.find_model("openai/gpt-4o-mini").unwrap();
        assert_eq!(model.input_price_per_million, dec!(0.15));
    }

    #[test]
    fn find_model_is_case_sensitive() {
        let (cache, _, _) = fixture(3600);
        let err = cache.find_model("OpenAI/GPT-4o-mini").unwrap_err();
        assert!(matches!(err, EstimateError::ModelNotFound { .. }));
    }

    #[test]
    fn find_model_unknown_id_is_not_found() {
        let (cache, _, _) = fixture(3600);
        let err = cache.find_model("gpt-4o-mini").unwrap_err();
        match err {
            EstimateError::ModelNotFound { model } => assert_eq!(model, "gpt-4o-mini"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn fetch_failure_propagates_once() {
        let calls = Arc::new(AtomicUsize::new(0));
        let cache = CatalogCache::new(
            Box::new(CountingSource {
                calls: Arc::clone(&calls),
                fail: true,
            }),
            3600,
        );
        let err = cache.find_model("openai/gpt-4o-mini").unwrap_err();
        assert!(matches!(
            err,
            EstimateError::CatalogFetch(CatalogFetchError::Status { status: 500, .. })
        ));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn refresh_ignores_ttl() {
        let (cache, calls, _) = fixture(3600);
        cache.get_catalog().unwrap();
        cache.refresh().unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn snapshot_records_fetch_time() {
        let (cache, _, now) = fixture(3600);
        let expected = *now.lock().unwrap();
        assert_eq!(cache.get_catalog().unwrap().fetched_at(), expected);
    }
}
