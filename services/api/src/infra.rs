use chrono::NaiveDate;
use metrics_exporter_prometheus::PrometheusHandle;
use rentroll::config::PortfolioConfig;
use rentroll::dashboard::fixtures;
use rentroll::portfolio::{InMemoryPortfolioStore, PortfolioService, RepositoryError};
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

pub(crate) type InMemoryPortfolioService = PortfolioService<InMemoryPortfolioStore>;

/// Service over an empty store; the dashboard shows the demo portfolio until records exist.
pub(crate) fn empty_portfolio(config: PortfolioConfig) -> InMemoryPortfolioService {
    PortfolioService::new(Arc::new(InMemoryPortfolioStore::default()), config)
}

/// Service whose store holds every demo fixture row as live data.
pub(crate) fn seeded_portfolio(
    config: PortfolioConfig,
) -> Result<InMemoryPortfolioService, RepositoryError> {
    let store = InMemoryPortfolioStore::seeded(fixtures::demo_snapshot())?;
    Ok(PortfolioService::new(Arc::new(store), config))
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}
