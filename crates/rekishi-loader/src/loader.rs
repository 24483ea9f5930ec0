//! Fetch-then-parse dataset loading with last-request-wins semantics.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use rekishi_core::parser::{parse_dataset, RowPolicy, SkippedRow};
use rekishi_core::Dataset;

use crate::error::LoadError;
use crate::source::DatasetSource;

/// A successfully loaded dataset.
#[derive(Debug, Clone)]
pub struct LoadedDataset {
    pub dataset: Arc<Dataset>,
    /// Rows dropped under [`RowPolicy::Skip`].
    pub skipped: Vec<SkippedRow>,
    /// Where the text came from.
    pub source: String,
    pub loaded_at: DateTime<Utc>,
    /// The load request this result belongs to.
    pub ticket: u64,
}

/// Loads datasets from a [`DatasetSource`].
///
/// Every call to [`load`](Self::load) takes a new ticket. When a load finishes
/// after a newer one was started, its result is discarded and
/// [`LoadError::Superseded`] is returned instead, so only the most recent
/// request can ever install a dataset.
pub struct DatasetLoader {
    source: Arc<dyn DatasetSource>,
    policy: RowPolicy,
    latest: AtomicU64,
}

impl DatasetLoader {
    pub fn new(source: Arc<dyn DatasetSource>) -> Self {
        Self {
            source,
            policy: RowPolicy::default(),
            latest: AtomicU64::new(0),
        }
    }

    pub fn with_row_policy(mut self, policy: RowPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn row_policy(&self) -> RowPolicy {
        self.policy
    }

    pub fn source_location(&self) -> String {
        self.source.location()
    }

    /// Ticket of the most recently started load (0 before the first).
    pub fn latest_ticket(&self) -> u64 {
        self.latest.load(Ordering::SeqCst)
    }

    /// Fetch and parse the dataset.
    pub async fn load(&self) -> Result<LoadedDataset, LoadError> {
        let ticket = self.latest.fetch_add(1, Ordering::SeqCst) + 1;
        let source = self.source.location();
        tracing::info!(ticket, source = %source, "loading dataset");

        let outcome = match self.source.fetch().await {
            Ok(text) => parse_dataset(&text, self.policy).map_err(LoadError::from),
            Err(e) => Err(e),
        };

        let latest = self.latest_ticket();
        if latest != ticket {
            tracing::info!(ticket, latest, "discarding superseded dataset load");
            return Err(LoadError::Superseded { ticket, latest });
        }

        let parsed = outcome.inspect_err(|e| {
            tracing::warn!(ticket, source = %source, error = %e, "dataset load failed");
        })?;

        tracing::info!(
            ticket,
            records = parsed.dataset.len(),
            eras = parsed.dataset.eras().len(),
            skipped = parsed.skipped.len(),
            "dataset loaded"
        );

        Ok(LoadedDataset {
            dataset: Arc::new(parsed.dataset),
            skipped: parsed.skipped,
            source,
            loaded_at: Utc::now(),
            ticket,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::mock::MockSource;

    const OLD: &str = "person,year,event,relation,era\nOda,1582,HonnojiIncident,retainer,Sengoku\n";
    const NEW: &str = "\
person,year,event,relation,era
Oda,1582,HonnojiIncident,retainer,Sengoku
Tokugawa,1603,Shogunate,founder,Edo
";

    #[tokio::test]
    async fn load_parses_dataset() {
        let loader = DatasetLoader::new(Arc::new(MockSource::with_fixed_body(NEW)));
        let loaded = loader.load().await.unwrap();
        assert_eq!(loaded.dataset.len(), 2);
        assert_eq!(loaded.ticket, 1);
        assert_eq!(loaded.source, "mock://dataset");
        assert!(loaded.skipped.is_empty());
    }

    #[tokio::test]
    async fn sequential_loads_all_succeed() {
        let loader = DatasetLoader::new(Arc::new(MockSource::with_fixed_body(OLD)));
        assert_eq!(loader.load().await.unwrap().ticket, 1);
        assert_eq!(loader.load().await.unwrap().ticket, 2);
        assert_eq!(loader.latest_ticket(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn slow_stale_load_is_discarded() {
        let source = MockSource::with_fixed_body("")
            .then_respond(Duration::from_millis(500), OLD)
            .then_respond(Duration::from_millis(10), NEW);
        let loader = DatasetLoader::new(Arc::new(source));

        let (first, second) = tokio::join!(loader.load(), loader.load());

        let err = first.unwrap_err();
        assert!(err.is_superseded());
        assert!(matches!(err, LoadError::Superseded { ticket: 1, latest: 2 }));

        let loaded = second.unwrap();
        assert_eq!(loaded.ticket, 2);
        assert_eq!(loaded.dataset.len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn stale_failure_is_also_discarded() {
        let source = MockSource::with_fixed_body("")
            .then_fail(Duration::from_millis(300), "connection reset")
            .then_respond(Duration::from_millis(10), NEW);
        let loader = DatasetLoader::new(Arc::new(source));

        let (first, second) = tokio::join!(loader.load(), loader.load());
        assert!(first.unwrap_err().is_superseded());
        assert!(second.is_ok());
    }

    #[tokio::test]
    async fn transport_failure_installs_nothing() {
        let source = MockSource::with_fixed_body(OLD).then_fail(Duration::ZERO, "unreachable");
        let loader = DatasetLoader::new(Arc::new(source));

        let err = loader.load().await.unwrap_err();
        assert!(matches!(err, LoadError::Network(_)));

        // Retrying picks up the default body.
        assert_eq!(loader.load().await.unwrap().dataset.len(), 1);
    }

    #[tokio::test]
    async fn row_policy_is_applied() {
        let text = "person,year,event,relation,era\nOda,1582\nTokugawa,1603,Shogunate,founder,Edo\n";

        let strict = DatasetLoader::new(Arc::new(MockSource::with_fixed_body(text)));
        let err = strict.load().await.unwrap_err();
        assert!(matches!(err, LoadError::Parse(_)));

        let lenient = DatasetLoader::new(Arc::new(MockSource::with_fixed_body(text)))
            .with_row_policy(RowPolicy::Skip);
        let loaded = lenient.load().await.unwrap();
        assert_eq!(loaded.dataset.len(), 1);
        assert_eq!(loaded.skipped.len(), 1);
        assert_eq!(loaded.skipped[0].line, 2);
    }
}
