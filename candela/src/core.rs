use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

use candela_core::{
    CacheStore, CandelaError, Interval, NaiveDateTime, NoopObserver, PageProvider,
    QueryDescriptor, QueryDescriptorBuilder, ResponseFormat, SyncConfig, SyncEvent, SyncObserver,
};
use candela_store::MemoryStore;
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;

/// Synchronizes cached candle buckets with a remote page provider.
pub struct Synchronizer {
    pub(crate) provider: Arc<dyn PageProvider>,
    pub(crate) store: Arc<dyn CacheStore>,
    pub(crate) observer: Arc<dyn SyncObserver>,
    pub(crate) cfg: SyncConfig,
    symbol_locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

/// Builder for constructing a `Synchronizer`.
pub struct SynchronizerBuilder {
    provider: Option<Arc<dyn PageProvider>>,
    store: Option<Arc<dyn CacheStore>>,
    observer: Arc<dyn SyncObserver>,
    cfg: SyncConfig,
}

impl Default for SynchronizerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SynchronizerBuilder {
    /// Create a new builder with defaults.
    ///
    /// - No provider; one must be set via [`provider`](Self::provider).
    /// - In-process store unless [`store`](Self::store) is called; nothing
    ///   survives the process in that case.
    /// - Events are discarded unless an observer is set.
    #[must_use]
    pub fn new() -> Self {
        Self {
            provider: None,
            store: None,
            observer: Arc::new(NoopObserver),
            cfg: SyncConfig::default(),
        }
    }

    /// Remote source of candle pages.
    #[must_use]
    pub fn provider(mut self, provider: Arc<dyn PageProvider>) -> Self {
        self.provider = Some(provider);
        self
    }

    /// Durable store for cache documents.
    #[must_use]
    pub fn store(mut self, store: Arc<dyn CacheStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Sink for progress events.
    #[must_use]
    pub fn observer(mut self, observer: Arc<dyn SyncObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// Defaults used by [`Synchronizer::query`].
    #[must_use]
    pub const fn config(mut self, cfg: SyncConfig) -> Self {
        self.cfg = cfg;
        self
    }

    /// Page size used by [`Synchronizer::query`].
    #[must_use]
    pub const fn page_size(mut self, page_size: u32) -> Self {
        self.cfg.page_size = page_size;
        self
    }

    /// Wire format used by [`Synchronizer::query`].
    #[must_use]
    pub const fn format(mut self, format: ResponseFormat) -> Self {
        self.cfg.format = format;
        self
    }

    /// Build the `Synchronizer`.
    ///
    /// # Errors
    /// Returns `InvalidArg` if no provider was set or the configured page size
    /// is zero.
    pub fn build(self) -> Result<Synchronizer, CandelaError> {
        let provider = self.provider.ok_or_else(|| {
            CandelaError::InvalidArg("no provider set; add one via provider(...)".to_string())
        })?;
        if self.cfg.page_size == 0 {
            return Err(CandelaError::InvalidArg("page size must be positive".into()));
        }
        Ok(Synchronizer {
            provider,
            store: self
                .store
                .unwrap_or_else(|| Arc::new(MemoryStore::new())),
            observer: self.observer,
            cfg: self.cfg,
            symbol_locks: Mutex::new(HashMap::new()),
        })
    }
}

impl Synchronizer {
    /// Start building a new `Synchronizer`.
    #[must_use]
    pub fn builder() -> SynchronizerBuilder {
        SynchronizerBuilder::new()
    }

    /// Defaults applied by [`query`](Self::query).
    #[must_use]
    pub const fn config(&self) -> &SyncConfig {
        &self.cfg
    }

    /// Build a descriptor with this synchronizer's page size and format.
    ///
    /// # Errors
    /// Returns `InvalidArg` for a blank symbol or `start > end`.
    pub fn query(
        &self,
        symbol: &str,
        start: NaiveDateTime,
        end: NaiveDateTime,
        interval: Interval,
    ) -> Result<QueryDescriptor, CandelaError> {
        QueryDescriptorBuilder::with_config(symbol, &self.cfg)
            .range(start, end)
            .interval(interval)
            .build()
    }

    pub(crate) fn emit(&self, event: &SyncEvent<'_>) {
        self.observer.on_event(event);
    }

    /// Lock serializing read-modify-write cycles on one symbol's document.
    pub(crate) async fn symbol_lock(&self, symbol: &str) -> Arc<Mutex<()>> {
        let mut locks = self.symbol_locks.lock().await;
        Arc::clone(locks.entry(symbol.to_string()).or_default())
    }

    /// Race `fut` against cancellation; cancellation wins ties.
    pub(crate) async fn until_cancelled<T, Fut>(
        cancel: &CancellationToken,
        fut: Fut,
    ) -> Result<T, CandelaError>
    where
        Fut: Future<Output = Result<T, CandelaError>>,
    {
        tokio::select! {
            biased;
            () = cancel.cancelled() => Err(CandelaError::Cancelled),
            res = fut => res,
        }
    }
}
