use crate::infra::{empty_portfolio, seeded_portfolio, InMemoryPortfolioService};
use chrono::{Local, NaiveDate};
use clap::Args;
use rentroll::config::PortfolioConfig;
use rentroll::dashboard::{DashboardMetrics, DataQualityWarning, DataSource, PortfolioReport};
use rentroll::error::AppError;
use rentroll::portfolio::{
    EntityId, Lease, LeaseDraft, LeaseStatus, MaintenanceRequest, Payment, PortfolioError,
    Property, RecordKind, Tenant, TenantDraft,
};

#[derive(Args, Debug, Default)]
pub(crate) struct DashboardArgs {
    /// Date used to decide which LATE payments are overdue (defaults to today)
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) today: Option<NaiveDate>,
    /// Print the metrics and report as JSON instead of text
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Lease start date for the activated lease (defaults to today)
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) today: Option<NaiveDate>,
}

pub(crate) fn run_dashboard(args: DashboardArgs) -> Result<(), AppError> {
    let DashboardArgs { today, json } = args;
    let today = today.unwrap_or_else(|| Local::now().date_naive());

    let service = empty_portfolio(PortfolioConfig::default());
    let metrics = service.dashboard_metrics()?;
    let report = service.report()?;

    if json {
        let payload = serde_json::json!({
            "metrics": metrics,
            "report": report,
        });
        match serde_json::to_string_pretty(&payload) {
            Ok(rendered) => println!("{rendered}"),
            Err(err) => println!("Dashboard payload unavailable: {err}"),
        }
        return Ok(());
    }

    println!("Portfolio dashboard");
    render_metrics(&metrics);
    render_report(&report);

    let overdue = service.overdue_payments(today)?;
    render_overdue(&overdue, today);
    let urgent = service.high_priority_requests()?;
    render_high_priority(&urgent);

    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let start = args.today.unwrap_or_else(|| Local::now().date_naive());
    let service = seeded_portfolio(PortfolioConfig {
        demo_listings: false,
    })?;

    println!("Lease activation demo");
    let walkthrough = activate_vacant_property(&service, start)?;

    println!(
        "\nNew lease {} on {} for {} ({} to {}, {}/month)",
        walkthrough.lease.id,
        walkthrough.property.address,
        walkthrough.tenant.name,
        walkthrough.lease.start_date,
        walkthrough.lease.end_date,
        walkthrough.lease.monthly_rent
    );

    println!("\nBefore activation (lease UPCOMING)");
    render_metrics(&walkthrough.before);
    println!("\nAfter activation (lease ACTIVE)");
    render_metrics(&walkthrough.after);

    println!(
        "\nOccupancy {} -> {} | monthly revenue {} -> {}",
        walkthrough.before.occupied_properties,
        walkthrough.after.occupied_properties,
        walkthrough.before.monthly_revenue,
        walkthrough.after.monthly_revenue
    );

    Ok(())
}

pub(crate) struct ActivationWalkthrough {
    pub(crate) property: Property,
    pub(crate) tenant: Tenant,
    pub(crate) lease: Lease,
    pub(crate) before: DashboardMetrics,
    pub(crate) after: DashboardMetrics,
}

/// Signs an UPCOMING lease on the first property without an active lease, then activates it.
pub(crate) fn activate_vacant_property(
    service: &InMemoryPortfolioService,
    start: NaiveDate,
) -> Result<ActivationWalkthrough, AppError> {
    let leases = service.list::<Lease>()?;
    let property = service
        .list::<Property>()?
        .into_iter()
        .rev()
        .find(|property| {
            !leases
                .iter()
                .any(|lease| lease.property_id == property.id && lease.status == LeaseStatus::Active)
        })
        .ok_or_else(|| PortfolioError::NotFound {
            kind: RecordKind::Property,
            id: EntityId::from("vacant"),
        })?;

    let tenant: Tenant = service.create(TenantDraft {
        name: Some("Priya Natarajan".to_string()),
        email: Some("priya.natarajan@email.com".to_string()),
        phone: Some("(555) 234-5678".to_string()),
        user_id: None,
    })?;

    let end = start
        .checked_add_months(chrono::Months::new(12))
        .and_then(|day| day.pred_opt())
        .unwrap_or(start);
    let lease: Lease = service.create(LeaseDraft {
        property_id: Some(property.id.clone()),
        tenant_id: Some(tenant.id.clone()),
        start_date: Some(start),
        end_date: Some(end),
        monthly_rent: Some(property.rent_amount.amount()),
        status: Some(LeaseStatus::Upcoming),
    })?;
    let before = service.dashboard_metrics()?;

    let lease = service.update::<Lease>(
        &lease.id,
        LeaseDraft {
            status: Some(LeaseStatus::Active),
            ..LeaseDraft::default()
        },
    )?;
    let after = service.dashboard_metrics()?;

    Ok(ActivationWalkthrough {
        property,
        tenant,
        lease,
        before,
        after,
    })
}

fn render_metrics(metrics: &DashboardMetrics) {
    let source = match metrics.data_source {
        DataSource::Live => "live records",
        DataSource::Demo => "demo portfolio (no properties stored yet)",
    };
    println!("Data source: {source}");
    println!(
        "- Properties: {} total | {} occupied | {} vacant",
        metrics.total_properties, metrics.occupied_properties, metrics.vacant_properties
    );
    println!("- Monthly revenue: {}", metrics.monthly_revenue);
    println!("- Overdue payments: {}", metrics.overdue_payments);
    println!("- Open maintenance requests: {}", metrics.open_requests);
    for warning in &metrics.data_quality {
        match warning {
            DataQualityWarning::OccupancyExceedsInventory {
                occupied_properties,
                total_properties,
            } => println!(
                "! {occupied_properties} active leases across {total_properties} properties; vacancy clamped to 0"
            ),
        }
    }
}

fn render_report(report: &PortfolioReport) {
    println!("\nFinancial overview");
    println!("- Collected revenue: {}", report.collected_revenue);
    println!("- Monthly potential: {}", report.monthly_potential);
    println!("- Average rent: {}", report.average_rent);
    println!("- Occupancy rate: {}%", report.occupancy_rate);
    println!("- Tenants: {}", report.total_tenants);
}

fn render_overdue(payments: &[Payment], today: NaiveDate) {
    if payments.is_empty() {
        println!("\nOverdue payments as of {today}: none");
        return;
    }
    println!("\nOverdue payments as of {today}");
    for payment in payments {
        println!(
            "- {} on lease {}: {} due {}",
            payment.id, payment.lease_id, payment.amount, payment.due_date
        );
    }
}

fn render_high_priority(requests: &[MaintenanceRequest]) {
    if requests.is_empty() {
        println!("\nHigh priority maintenance: none");
        return;
    }
    println!("\nHigh priority maintenance");
    for request in requests {
        println!(
            "- {} at {} (reported {}): {}",
            request.id,
            request.property_id,
            request.reported_date.date_naive(),
            request.description
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn activation_moves_one_property_from_vacant_to_occupied() {
        let service = seeded_portfolio(PortfolioConfig::default()).expect("seeded");
        let start = NaiveDate::from_ymd_opt(2025, 2, 1).expect("valid");

        let walkthrough = activate_vacant_property(&service, start).expect("walkthrough runs");

        assert_eq!(walkthrough.property.id, EntityId::from("prop-4"));
        assert_eq!(walkthrough.lease.status, LeaseStatus::Active);
        assert_eq!(
            walkthrough.lease.end_date,
            NaiveDate::from_ymd_opt(2026, 1, 31).expect("valid")
        );
        assert_eq!(walkthrough.before.occupied_properties, 3);
        assert_eq!(walkthrough.after.occupied_properties, 4);
        assert_eq!(walkthrough.after.vacant_properties, 0);
        assert_eq!(walkthrough.before.monthly_revenue.to_string(), "8200.00");
        assert_eq!(walkthrough.after.monthly_revenue.to_string(), "9850.00");
    }

    #[test]
    fn dashboard_command_runs_against_an_empty_store() {
        let args = DashboardArgs {
            today: NaiveDate::from_ymd_opt(2025, 1, 15),
            json: false,
        };
        run_dashboard(args).expect("dashboard renders");
    }
}
