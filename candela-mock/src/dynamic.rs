use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use candela_core::{CandelaError, CandleMap, ConnectorKey, PageProvider, QueryDescriptor};

use crate::fixtures;

/// Instruction for how `fetch_page` should behave for a given symbol.
#[derive(Debug, Clone)]
pub enum MockBehavior {
    /// Return the provided page for every request, whatever the range.
    Return(CandleMap),
    /// Serve generated bars, like `MockProvider`.
    Generated,
    /// Fail immediately with the provided error.
    Fail(CandelaError),
    /// Serve generated bars for the first `n` calls, then fail.
    FailAfter(usize, CandelaError),
    /// Never complete (simulate a stalled connection).
    Hang,
}

#[derive(Default)]
struct InternalState {
    rules: HashMap<String, MockBehavior>,
    requests: HashMap<String, Vec<QueryDescriptor>>,
}

/// Controller handle used by tests to drive the dynamic mock from the outside.
pub struct DynamicMockController {
    state: Arc<Mutex<InternalState>>,
}

impl DynamicMockController {
    /// Set the `fetch_page` behavior for a symbol.
    pub async fn set_behavior(&self, symbol: impl Into<String>, behavior: MockBehavior) {
        let mut guard = self.state.lock().await;
        guard.rules.insert(symbol.into(), behavior);
    }

    /// Requests received for a symbol, in call order.
    pub async fn requests(&self, symbol: &str) -> Vec<QueryDescriptor> {
        let guard = self.state.lock().await;
        guard.requests.get(symbol).cloned().unwrap_or_default()
    }

    /// Clear all behaviors and recorded requests.
    pub async fn clear_all(&self) {
        let mut guard = self.state.lock().await;
        guard.rules.clear();
        guard.requests.clear();
    }
}

/// Provider whose behavior per symbol is set through a [`DynamicMockController`].
///
/// Symbols without a rule get generated bars.
pub struct DynamicMockProvider {
    key: ConnectorKey,
    state: Arc<Mutex<InternalState>>,
}

impl DynamicMockProvider {
    /// Create a provider and its controller.
    #[must_use]
    pub fn new_with_controller(name: &'static str) -> (Arc<Self>, DynamicMockController) {
        let state = Arc::new(Mutex::new(InternalState::default()));
        let provider = Arc::new(Self {
            key: ConnectorKey::new(name),
            state: Arc::clone(&state),
        });
        (provider, DynamicMockController { state })
    }
}

#[async_trait]
impl PageProvider for DynamicMockProvider {
    fn key(&self) -> ConnectorKey {
        self.key
    }

    async fn fetch_page(&self, query: &QueryDescriptor) -> Result<CandleMap, CandelaError> {
        let (behavior, served) = {
            let mut guard = self.state.lock().await;
            let log = guard.requests.entry(query.symbol().to_string()).or_default();
            log.push(query.clone());
            let served = log.len() - 1;
            let behavior = guard.rules.get(query.symbol()).cloned();
            (behavior, served)
        };

        match behavior.unwrap_or(MockBehavior::Generated) {
            MockBehavior::Return(page) => Ok(page),
            MockBehavior::Fail(e) => Err(e),
            MockBehavior::FailAfter(n, e) if served >= n => Err(e),
            MockBehavior::Generated | MockBehavior::FailAfter(..) => {
                let limit = usize::try_from(query.page_size()).unwrap_or(usize::MAX);
                Ok(fixtures::newest_first(
                    query.start(),
                    query.end(),
                    query.interval().duration(),
                    limit,
                    |_| false,
                ))
            }
            MockBehavior::Hang => {
                std::future::pending::<()>().await;
                unreachable!()
            }
        }
    }
}
