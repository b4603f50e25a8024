use serde::Serialize;
use tracing::warn;

use super::{DataSource, PortfolioSnapshot};
use crate::portfolio::domain::{LeaseStatus, Money, PaymentStatus};

/// Headline figures for the dashboard cards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardMetrics {
    pub total_properties: usize,
    pub occupied_properties: usize,
    pub vacant_properties: usize,
    pub monthly_revenue: Money,
    pub overdue_payments: Money,
    pub open_requests: usize,
    pub data_source: DataSource,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub data_quality: Vec<DataQualityWarning>,
}

/// Inconsistencies noticed while aggregating; reported, never fatal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DataQualityWarning {
    /// More ACTIVE leases than properties; vacancy was clamped to zero.
    #[serde(rename_all = "camelCase")]
    OccupancyExceedsInventory {
        occupied_properties: usize,
        total_properties: usize,
    },
}

impl DashboardMetrics {
    pub fn compute(snapshot: &PortfolioSnapshot, data_source: DataSource) -> Self {
        let total_properties = snapshot.properties.len();

        let (occupied_properties, monthly_revenue) = active_rent_roll(snapshot);

        let overdue_payments = snapshot
            .payments
            .iter()
            .filter(|payment| payment.status == PaymentStatus::Late)
            .map(|payment| payment.amount)
            .sum();

        let open_requests = snapshot
            .maintenance_requests
            .iter()
            .filter(|request| request.status.is_open())
            .count();

        let mut data_quality = Vec::new();
        let vacant_properties = match total_properties.checked_sub(occupied_properties) {
            Some(vacant) => vacant,
            None => {
                warn!(
                    occupied_properties,
                    total_properties,
                    ?data_source,
                    "active leases exceed property count; clamping vacancy to zero"
                );
                data_quality.push(DataQualityWarning::OccupancyExceedsInventory {
                    occupied_properties,
                    total_properties,
                });
                0
            }
        };

        Self {
            total_properties,
            occupied_properties,
            vacant_properties,
            monthly_revenue,
            overdue_payments,
            open_requests,
            data_source,
            data_quality,
        }
    }
}

/// Count of ACTIVE leases and the rent they bring in each month.
pub(super) fn active_rent_roll(snapshot: &PortfolioSnapshot) -> (usize, Money) {
    snapshot
        .leases
        .iter()
        .filter(|lease| lease.status == LeaseStatus::Active)
        .fold((0, Money::zero()), |(count, rent), lease| {
            (count + 1, rent + lease.monthly_rent)
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::{dashboard_metrics, fixtures};
    use crate::portfolio::domain::MaintenanceStatus;
    use rust_decimal::Decimal;
    use serde_json::json;

    fn live_snapshot() -> PortfolioSnapshot {
        fixtures::demo_snapshot()
    }

    #[test]
    fn revenue_is_the_exact_sum_of_active_rents() {
        let metrics = DashboardMetrics::compute(&live_snapshot(), DataSource::Live);
        assert_eq!(metrics.monthly_revenue, Money::from_cents(820_000));
        assert_eq!(metrics.monthly_revenue.to_string(), "8200.00");
        assert_eq!(
            metrics.vacant_properties + metrics.occupied_properties,
            metrics.total_properties
        );
    }

    #[test]
    fn overdue_counts_only_late_payments() {
        let metrics = DashboardMetrics::compute(&live_snapshot(), DataSource::Live);
        assert_eq!(metrics.overdue_payments, Money::from_cents(220_000));
    }

    #[test]
    fn open_requests_cover_pending_and_in_progress() {
        let mut snapshot = live_snapshot();
        let statuses: Vec<_> = snapshot
            .maintenance_requests
            .iter()
            .map(|request| request.status)
            .collect();
        assert_eq!(
            statuses,
            [
                MaintenanceStatus::InProgress,
                MaintenanceStatus::Pending,
                MaintenanceStatus::Completed,
                MaintenanceStatus::Pending,
            ]
        );
        assert_eq!(
            DashboardMetrics::compute(&snapshot, DataSource::Live).open_requests,
            3
        );

        snapshot.maintenance_requests[0].status = MaintenanceStatus::Completed;
        assert_eq!(
            DashboardMetrics::compute(&snapshot, DataSource::Live).open_requests,
            2
        );
    }

    #[test]
    fn ended_and_upcoming_leases_do_not_count_as_occupied() {
        let mut snapshot = live_snapshot();
        snapshot.leases[0].status = LeaseStatus::Ended;
        snapshot.leases[1].status = LeaseStatus::Upcoming;

        let metrics = DashboardMetrics::compute(&snapshot, DataSource::Live);
        assert_eq!(metrics.occupied_properties, 1);
        assert_eq!(metrics.vacant_properties, 3);
        assert_eq!(metrics.monthly_revenue, Money::from_cents(320_000));
    }

    #[test]
    fn huge_rents_saturate_instead_of_overflowing() {
        let mut snapshot = live_snapshot();
        for lease in &mut snapshot.leases {
            lease.monthly_rent = Money::new(Decimal::MAX);
        }
        for payment in &mut snapshot.payments {
            payment.status = PaymentStatus::Late;
            payment.amount = Money::new(Decimal::MAX);
        }

        let metrics = DashboardMetrics::compute(&snapshot, DataSource::Live);
        assert_eq!(metrics.occupied_properties, 3);
        assert_eq!(metrics.monthly_revenue, Money::new(Decimal::MAX));
        assert_eq!(metrics.overdue_payments, Money::new(Decimal::MAX));
    }

    #[test]
    fn excess_occupancy_clamps_vacancy_and_flags_it() {
        let mut snapshot = live_snapshot();
        snapshot.properties.truncate(2);

        let metrics = DashboardMetrics::compute(&snapshot, DataSource::Live);
        assert_eq!(metrics.total_properties, 2);
        assert_eq!(metrics.occupied_properties, 3);
        assert_eq!(metrics.vacant_properties, 0);
        assert_eq!(
            metrics.data_quality,
            vec![DataQualityWarning::OccupancyExceedsInventory {
                occupied_properties: 3,
                total_properties: 2,
            }]
        );
    }

    #[test]
    fn empty_snapshot_falls_back_to_demo_portfolio() {
        let metrics = dashboard_metrics(&PortfolioSnapshot::default());
        assert_eq!(metrics.data_source, DataSource::Demo);
        assert_eq!(metrics.total_properties, 4);
        assert_eq!(metrics.occupied_properties, 3);
        assert_eq!(metrics.vacant_properties, 1);
        assert_eq!(metrics.monthly_revenue.to_string(), "8200.00");
        assert_eq!(metrics.overdue_payments.to_string(), "2200.00");
        assert_eq!(metrics.open_requests, 3);
    }

    #[test]
    fn leases_without_properties_still_use_the_demo_portfolio() {
        let mut snapshot = live_snapshot();
        snapshot.properties.clear();

        let metrics = dashboard_metrics(&snapshot);
        assert_eq!(metrics.data_source, DataSource::Demo);
        assert_eq!(metrics.total_properties, 4);
    }

    #[test]
    fn serializes_with_dashboard_field_names() {
        let metrics = dashboard_metrics(&PortfolioSnapshot::default());
        assert_eq!(
            serde_json::to_value(&metrics).unwrap(),
            json!({
                "totalProperties": 4,
                "occupiedProperties": 3,
                "vacantProperties": 1,
                "monthlyRevenue": "8200.00",
                "overduePayments": "2200.00",
                "openRequests": 3,
                "dataSource": "demo"
            })
        );
    }

    #[test]
    fn data_quality_warnings_serialize_with_a_kind_tag() {
        let warning = DataQualityWarning::OccupancyExceedsInventory {
            occupied_properties: 5,
            total_properties: 3,
        };
        assert_eq!(
            serde_json::to_value(&warning).unwrap(),
            json!({
                "kind": "occupancy_exceeds_inventory",
                "occupiedProperties": 5,
                "totalProperties": 3
            })
        );
    }
}
