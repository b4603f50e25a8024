//! Dashboard statistics derived from the whole portfolio.
//!
//! Aggregation is pure: callers read a [`PortfolioSnapshot`] from the store and hand it
//! over. A snapshot without properties is treated as an uninitialized deployment and
//! the fixture portfolio is aggregated instead.

pub mod fixtures;
mod metrics;
mod report;

use serde::Serialize;

use crate::portfolio::domain::{Lease, MaintenanceRequest, Payment, Property, Tenant};

pub use metrics::{DashboardMetrics, DataQualityWarning};
pub use report::{PortfolioReport, ReportError};

/// Entity lists read from the store for one aggregation call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PortfolioSnapshot {
    pub properties: Vec<Property>,
    pub tenants: Vec<Tenant>,
    pub leases: Vec<Lease>,
    pub payments: Vec<Payment>,
    pub maintenance_requests: Vec<MaintenanceRequest>,
}

impl PortfolioSnapshot {
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }
}

/// Where the aggregated figures came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DataSource {
    Live,
    Demo,
}

/// Runs `aggregate` over `live`, or over the fixture portfolio when `live` is empty.
pub fn with_demo_fallback<T>(
    live: &PortfolioSnapshot,
    aggregate: impl FnOnce(&PortfolioSnapshot, DataSource) -> T,
) -> T {
    if live.is_empty() {
        aggregate(&fixtures::demo_snapshot(), DataSource::Demo)
    } else {
        aggregate(live, DataSource::Live)
    }
}

pub fn dashboard_metrics(live: &PortfolioSnapshot) -> DashboardMetrics {
    with_demo_fallback(live, DashboardMetrics::compute)
}

pub fn portfolio_report(live: &PortfolioSnapshot) -> PortfolioReport {
    with_demo_fallback(live, PortfolioReport::compute)
}
