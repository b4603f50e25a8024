use std::sync::Arc;

use axum::response::Response;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde_json::Value;

use crate::config::PortfolioConfig;
use crate::dashboard::fixtures;
use crate::portfolio::domain::{
    Document, EntityId, Lease, LeaseStatus, MaintenanceRequest, Payment, Property, Tenant,
};
use crate::portfolio::drafts::{LeaseDraft, PropertyDraft, TenantDraft};
use crate::portfolio::memory::InMemoryPortfolioStore;
use crate::portfolio::repository::{EntityRepository, PortfolioStore, RepositoryError};
use crate::portfolio::{portfolio_router, PortfolioService};

pub(super) fn demo_config() -> PortfolioConfig {
    PortfolioConfig {
        demo_listings: true,
    }
}

pub(super) fn live_only_config() -> PortfolioConfig {
    PortfolioConfig {
        demo_listings: false,
    }
}

pub(super) fn empty_service(config: PortfolioConfig) -> PortfolioService<InMemoryPortfolioStore> {
    PortfolioService::new(Arc::new(InMemoryPortfolioStore::default()), config)
}

pub(super) fn seeded_service() -> PortfolioService<InMemoryPortfolioStore> {
    let store = InMemoryPortfolioStore::seeded(fixtures::demo_snapshot()).expect("fixtures seed");
    PortfolioService::new(Arc::new(store), live_only_config())
}

pub(super) fn router_with_service(service: PortfolioService<InMemoryPortfolioStore>) -> axum::Router {
    portfolio_router(Arc::new(service))
}

pub(super) fn property_draft() -> PropertyDraft {
    PropertyDraft {
        address: Some("742 Evergreen Terrace".to_string()),
        city: Some("Springfield".to_string()),
        state: Some("IL".to_string()),
        zip_code: Some("62704".to_string()),
        bedrooms: Some(3),
        bathrooms: Some(Decimal::new(15, 1)),
        rent_amount: Some(Decimal::new(195_000, 2)),
        description: None,
        image_url: None,
    }
}

pub(super) fn tenant_draft(email: &str) -> TenantDraft {
    TenantDraft {
        name: Some("Dana Whitfield".to_string()),
        email: Some(email.to_string()),
        phone: Some("(555) 010-2030".to_string()),
        user_id: None,
    }
}

/// Upcoming lease on the vacant fixture property.
pub(super) fn upcoming_lease_draft() -> LeaseDraft {
    LeaseDraft {
        property_id: Some(EntityId::from("prop-4")),
        tenant_id: Some(EntityId::from("tenant-1")),
        start_date: Some(NaiveDate::from_ymd_opt(2025, 2, 1).expect("valid")),
        end_date: Some(NaiveDate::from_ymd_opt(2026, 1, 31).expect("valid")),
        monthly_rent: Some(Decimal::new(165_000, 2)),
        status: Some(LeaseStatus::Upcoming),
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

pub(super) async fn read_text_body(response: Response) -> String {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    String::from_utf8(body.to_vec()).expect("utf-8 body")
}

/// Table that fails every call, standing in for an unreachable database.
pub(super) struct OfflineTable;

impl<E> EntityRepository<E> for OfflineTable {
    fn list(&self) -> Result<Vec<E>, RepositoryError> {
        Err(offline())
    }

    fn fetch(&self, _id: &EntityId) -> Result<Option<E>, RepositoryError> {
        Err(offline())
    }

    fn insert(&self, _record: E) -> Result<E, RepositoryError> {
        Err(offline())
    }

    fn update(&self, _record: E) -> Result<E, RepositoryError> {
        Err(offline())
    }

    fn delete(&self, _id: &EntityId) -> Result<(), RepositoryError> {
        Err(offline())
    }
}

fn offline() -> RepositoryError {
    RepositoryError::Unavailable("database offline".to_string())
}

pub(super) struct UnavailableStore {
    table: OfflineTable,
}

impl Default for UnavailableStore {
    fn default() -> Self {
        Self {
            table: OfflineTable,
        }
    }
}

impl PortfolioStore for UnavailableStore {
    fn properties(&self) -> &dyn EntityRepository<Property> {
        &self.table
    }

    fn tenants(&self) -> &dyn EntityRepository<Tenant> {
        &self.table
    }

    fn leases(&self) -> &dyn EntityRepository<Lease> {
        &self.table
    }

    fn payments(&self) -> &dyn EntityRepository<Payment> {
        &self.table
    }

    fn maintenance_requests(&self) -> &dyn EntityRepository<MaintenanceRequest> {
        &self.table
    }

    fn documents(&self) -> &dyn EntityRepository<Document> {
        &self.table
    }
}

pub(super) fn unavailable_service() -> PortfolioService<UnavailableStore> {
    PortfolioService::new(Arc::new(UnavailableStore::default()), demo_config())
}
