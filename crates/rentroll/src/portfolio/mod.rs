//! Property portfolio records: properties, tenants, leases, payments, maintenance
//! requests and documents.
//!
//! Records enter through [`PortfolioService`], which validates drafts and checks
//! references before anything reaches a [`PortfolioStore`]. [`portfolio_router`] exposes
//! the service over HTTP.

pub(crate) mod dates;
pub mod domain;
pub mod drafts;
pub mod memory;
pub mod repository;
pub mod resource;
pub mod router;
pub mod service;
pub mod validation;

pub use domain::{
    Document, EntityId, Lease, LeaseStatus, MaintenancePriority, MaintenanceRequest,
    MaintenanceStatus, Money, Payment, PaymentStatus, Property, RecordKind, Tenant,
};
pub use drafts::{
    DocumentDraft, LeaseDraft, MaintenanceRequestDraft, PaymentDraft, PropertyDraft, TenantDraft,
};
pub use memory::{InMemoryPortfolioStore, InMemoryRepository};
pub use repository::{Entity, EntityRepository, PortfolioStore, RepositoryError};
pub use resource::{Reference, Resource};
pub use router::portfolio_router;
pub use service::{PortfolioError, PortfolioService};
pub use validation::{FieldError, ValidationErrors};

#[cfg(test)]
mod tests;
