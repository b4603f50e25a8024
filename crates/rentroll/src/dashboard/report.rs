use rust_decimal::Decimal;
use serde::Serialize;

use super::metrics::active_rent_roll;
use super::{DataSource, PortfolioSnapshot};
use crate::portfolio::domain::{Money, PaymentStatus};

/// Financial overview backing the reports page and its CSV export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioReport {
    /// Sum of PAID payments.
    pub collected_revenue: Money,
    /// Rent owed each month across ACTIVE leases.
    pub monthly_potential: Money,
    pub average_rent: Money,
    /// Whole percent, capped at 100.
    pub occupancy_rate: u32,
    pub total_properties: usize,
    pub total_tenants: usize,
    pub data_source: DataSource,
}

#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("failed to write report csv: {0}")]
    Csv(#[from] csv::Error),
    #[error("failed to flush report csv: {0}")]
    Flush(String),
    #[error("report csv was not valid utf-8")]
    Encoding(#[from] std::string::FromUtf8Error),
}

impl PortfolioReport {
    pub fn compute(snapshot: &PortfolioSnapshot, data_source: DataSource) -> Self {
        let total_properties = snapshot.properties.len();
        let (occupied_properties, monthly_potential) = active_rent_roll(snapshot);

        let collected_revenue = snapshot
            .payments
            .iter()
            .filter(|payment| payment.status == PaymentStatus::Paid)
            .map(|payment| payment.amount)
            .sum();

        let average_rent = match Decimal::from(total_properties) {
            count if count.is_zero() => Money::zero(),
            count => {
                let total: Money = snapshot
                    .properties
                    .iter()
                    .map(|property| property.rent_amount)
                    .sum();
                Money::new(total.amount() / count)
            }
        };

        Self {
            collected_revenue,
            monthly_potential,
            average_rent,
            occupancy_rate: occupancy_rate(occupied_properties, total_properties),
            total_properties,
            total_tenants: snapshot.tenants.len(),
            data_source,
        }
    }

    /// Two-column `metric,value` export.
    pub fn to_csv(&self) -> Result<String, ReportError> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.write_record(["metric", "value"])?;

        let source = match self.data_source {
            DataSource::Live => "live",
            DataSource::Demo => "demo",
        };
        let rows = [
            ("collected_revenue", self.collected_revenue.to_string()),
            ("monthly_potential", self.monthly_potential.to_string()),
            ("average_rent", self.average_rent.to_string()),
            ("occupancy_rate_pct", self.occupancy_rate.to_string()),
            ("total_properties", self.total_properties.to_string()),
            ("total_tenants", self.total_tenants.to_string()),
            ("data_source", source.to_string()),
        ];
        for (metric, value) in rows {
            writer.write_record([metric, value.as_str()])?;
        }

        let bytes = writer
            .into_inner()
            .map_err(|err| ReportError::Flush(err.error().to_string()))?;
        Ok(String::from_utf8(bytes)?)
    }
}

/// Rounded half-up; occupancy above inventory reads as 100.
fn occupancy_rate(occupied: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    let occupied = occupied.min(total) as u64;
    let total = total as u64;
    ((occupied * 200 + total) / (total * 2)) as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::{fixtures, portfolio_report};

    #[test]
    fn demo_report_matches_reports_page_figures() {
        let report = portfolio_report(&PortfolioSnapshot::default());
        assert_eq!(report.data_source, DataSource::Demo);
        assert_eq!(report.collected_revenue.to_string(), "6000.00");
        assert_eq!(report.monthly_potential.to_string(), "8200.00");
        assert_eq!(report.average_rent.to_string(), "2462.50");
        assert_eq!(report.occupancy_rate, 75);
        assert_eq!(report.total_tenants, 3);
    }

    #[test]
    fn occupancy_rounds_half_up_and_caps() {
        assert_eq!(occupancy_rate(0, 0), 0);
        assert_eq!(occupancy_rate(1, 3), 33);
        assert_eq!(occupancy_rate(2, 3), 67);
        assert_eq!(occupancy_rate(1, 8), 13);
        assert_eq!(occupancy_rate(5, 3), 100);
    }

    #[test]
    fn average_rent_rounds_to_cents() {
        let mut snapshot = fixtures::demo_snapshot();
        snapshot.properties.truncate(3);
        snapshot.properties[2].rent_amount = Money::from_cents(100_001);
        let report = PortfolioReport::compute(&snapshot, DataSource::Live);
        // (2800.00 + 2200.00 + 1000.01) / 3 = 2000.003...
        assert_eq!(report.average_rent.to_string(), "2000.00");
    }

    #[test]
    fn over_occupied_portfolio_reports_full_occupancy() {
        let mut snapshot = fixtures::demo_snapshot();
        snapshot.properties.truncate(2);
        let report = PortfolioReport::compute(&snapshot, DataSource::Live);
        assert_eq!(report.total_properties, 2);
        assert_eq!(report.occupancy_rate, 100);
        assert_eq!(report.monthly_potential.to_string(), "8200.00");
    }

    #[test]
    fn huge_rents_saturate_in_the_report() {
        let mut snapshot = fixtures::demo_snapshot();
        for property in &mut snapshot.properties {
            property.rent_amount = Money::new(Decimal::MAX);
        }
        for lease in &mut snapshot.leases {
            lease.monthly_rent = Money::new(Decimal::MAX);
        }
        let report = PortfolioReport::compute(&snapshot, DataSource::Live);
        assert_eq!(report.monthly_potential, Money::new(Decimal::MAX));
        assert!(report.average_rent.is_positive());
        assert!(report.to_csv().is_ok());
    }

    #[test]
    fn csv_export_lists_one_metric_per_row() {
        let report = portfolio_report(&PortfolioSnapshot::default());
        let csv = report.to_csv().expect("csv renders");
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], "metric,value");
        assert!(lines.contains(&"monthly_potential,8200.00"));
        assert!(lines.contains(&"occupancy_rate_pct,75"));
        assert_eq!(lines.last(), Some(&"data_source,demo"));
        assert_eq!(lines.len(), 8);
    }
}
