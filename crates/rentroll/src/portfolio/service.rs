use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use tracing::info;

use super::domain::{EntityId, MaintenanceRequest, Payment, PaymentStatus, RecordKind};
use super::repository::{PortfolioStore, RepositoryError};
use super::resource::{Reference, Resource};
use super::validation::ValidationErrors;
use crate::config::PortfolioConfig;
use crate::dashboard::{
    self, DashboardMetrics, PortfolioReport, PortfolioSnapshot, ReportError,
};

/// Service composing validation, reference checks and the entity store.
pub struct PortfolioService<S> {
    store: Arc<S>,
    config: PortfolioConfig,
}

impl<S> PortfolioService<S>
where
    S: PortfolioStore + 'static,
{
    pub fn new(store: Arc<S>, config: PortfolioConfig) -> Self {
        Self { store, config }
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// All rows, newest first. Empty tables may be answered with demo rows.
    pub fn list<E: Resource>(&self) -> Result<Vec<E>, PortfolioError> {
        let mut rows = E::repository(self.store.as_ref()).list()?;
        if rows.is_empty() && self.config.demo_listings {
            rows = E::demo_rows();
        }
        rows.sort_by(|a, b| b.created_at().cmp(&a.created_at()));
        Ok(rows)
    }

    pub fn get<E: Resource>(&self, id: &EntityId) -> Result<E, PortfolioError> {
        E::repository(self.store.as_ref())
            .fetch(id)?
            .ok_or_else(|| PortfolioError::NotFound {
                kind: E::KIND,
                id: id.clone(),
            })
    }

    /// Validate `draft` and insert it under a freshly generated id.
    pub fn create<E: Resource>(&self, draft: E::Draft) -> Result<E, PortfolioError> {
        let record = E::from_draft(draft, EntityId::generate(), Utc::now())?;
        self.check_references(&record.references())?;

        let stored = E::repository(self.store.as_ref()).insert(record)?;
        info!(kind = %E::KIND, id = %stored.id(), "record created");
        Ok(stored)
    }

    /// Merge `patch` into the stored record; the merged record is validated before writing.
    pub fn update<E: Resource>(&self, id: &EntityId, patch: E::Draft) -> Result<E, PortfolioError> {
        let mut record: E = self.get(id)?;
        let before = record.references();

        let now = Utc::now();
        record.apply_patch(patch, now)?;
        record.touch(now);

        let changed: Vec<Reference> = record
            .references()
            .into_iter()
            .filter(|reference| !before.contains(reference))
            .collect();
        self.check_references(&changed)?;

        let stored = E::repository(self.store.as_ref()).update(record)?;
        info!(kind = %E::KIND, id = %stored.id(), "record updated");
        Ok(stored)
    }

    pub fn delete<E: Resource>(&self, id: &EntityId) -> Result<(), PortfolioError> {
        E::repository(self.store.as_ref()).delete(id)?;
        info!(kind = %E::KIND, %id, "record deleted");
        Ok(())
    }

    /// LATE payments whose due date is before `today`, latest due date first.
    pub fn overdue_payments(&self, today: NaiveDate) -> Result<Vec<Payment>, PortfolioError> {
        let mut overdue: Vec<Payment> = self
            .store
            .payments()
            .list()?
            .into_iter()
            .filter(|payment| payment.status == PaymentStatus::Late && payment.due_date < today)
            .collect();

        if overdue.is_empty() && self.config.demo_listings {
            overdue = dashboard::fixtures::demo_payments()
                .into_iter()
                .filter(|payment| payment.status == PaymentStatus::Late)
                .collect();
        }
        overdue.sort_by(|a, b| b.due_date.cmp(&a.due_date));
        Ok(overdue)
    }

    /// Open HIGH priority requests, most recently reported first.
    pub fn high_priority_requests(&self) -> Result<Vec<MaintenanceRequest>, PortfolioError> {
        let mut requests: Vec<MaintenanceRequest> = self
            .store
            .maintenance_requests()
            .list()?
            .into_iter()
            .filter(MaintenanceRequest::is_high_priority)
            .collect();

        if requests.is_empty() && self.config.demo_listings {
            requests = dashboard::fixtures::demo_maintenance_requests()
                .into_iter()
                .filter(MaintenanceRequest::is_high_priority)
                .collect();
        }
        requests.sort_by(|a, b| b.reported_date.cmp(&a.reported_date));
        Ok(requests)
    }

    /// Reads every table the aggregator needs. Each read is independent.
    pub fn snapshot(&self) -> Result<PortfolioSnapshot, PortfolioError> {
        Ok(PortfolioSnapshot {
            properties: self.store.properties().list()?,
            tenants: self.store.tenants().list()?,
            leases: self.store.leases().list()?,
            payments: self.store.payments().list()?,
            maintenance_requests: self.store.maintenance_requests().list()?,
        })
    }

    /// Dashboard figures; an unreachable store is an error, never a demo answer.
    pub fn dashboard_metrics(&self) -> Result<DashboardMetrics, PortfolioError> {
        let snapshot = self.snapshot()?;
        Ok(dashboard::dashboard_metrics(&snapshot))
    }

    pub fn report(&self) -> Result<PortfolioReport, PortfolioError> {
        let snapshot = self.snapshot()?;
        Ok(dashboard::portfolio_report(&snapshot))
    }

    fn check_references(&self, references: &[Reference]) -> Result<(), PortfolioError> {
        let mut errors = ValidationErrors::default();
        for reference in references {
            if !self.store.contains(reference.target, &reference.id)? {
                errors.push(
                    reference.field,
                    format!(
                        "{} {} does not exist",
                        reference.target.label().to_lowercase(),
                        reference.id
                    ),
                );
            }
        }
        Ok(errors.finish(())?)
    }
}

/// Error raised by the portfolio service.
#[derive(Debug, thiserror::Error)]
pub enum PortfolioError {
    #[error(transparent)]
    Validation(#[from] ValidationErrors),
    #[error("{kind} not found")]
    NotFound { kind: RecordKind, id: EntityId },
    #[error("{kind} with {key} already exists")]
    Conflict { kind: RecordKind, key: String },
    #[error("store unavailable: {0}")]
    StoreUnavailable(String),
    #[error(transparent)]
    Report(#[from] ReportError),
}

impl From<RepositoryError> for PortfolioError {
    fn from(value: RepositoryError) -> Self {
        match value {
            RepositoryError::NotFound { kind, id } => Self::NotFound { kind, id },
            RepositoryError::Conflict { kind, key } => Self::Conflict { kind, key },
            RepositoryError::DuplicateId { kind, id } => Self::Conflict {
                kind,
                key: format!("id {id}"),
            },
            RepositoryError::Unavailable(reason) => Self::StoreUnavailable(reason),
        }
    }
}
