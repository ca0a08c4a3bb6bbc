use candela_core::PageProvider;
use std::sync::Arc;

#[must_use]
pub fn get_provider() -> Arc<dyn PageProvider> {
    if std::env::var("CANDELA_EXAMPLES_USE_MOCK").is_ok() {
        println!("--- (Using Mock Provider for CI) ---");
        return Arc::new(candela_mock::MockProvider::new());
    }
    match candela_twelvedata::TwelveDataConnector::from_env() {
        Ok(connector) => Arc::new(connector),
        Err(e) => {
            println!("--- ({e}; falling back to Mock Provider) ---");
            Arc::new(candela_mock::MockProvider::new())
        }
    }
}

pub fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("candela=debug")),
        )
        .try_init();
}
