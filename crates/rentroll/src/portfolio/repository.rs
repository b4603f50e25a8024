use chrono::{DateTime, Utc};

use super::domain::{
    Document, EntityId, Lease, MaintenanceRequest, Payment, Property, RecordKind, Tenant,
};

/// Common accessors the store needs from every record.
pub trait Entity {
    const KIND: RecordKind;

    fn id(&self) -> &EntityId;

    fn created_at(&self) -> DateTime<Utc>;

    /// Natural key that must stay unique across the table, if the record has one.
    fn unique_key(&self) -> Option<String> {
        None
    }
}

/// Storage abstraction for a single record family.
pub trait EntityRepository<E>: Send + Sync {
    fn list(&self) -> Result<Vec<E>, RepositoryError>;
    fn fetch(&self, id: &EntityId) -> Result<Option<E>, RepositoryError>;
    fn insert(&self, record: E) -> Result<E, RepositoryError>;
    fn update(&self, record: E) -> Result<E, RepositoryError>;
    fn delete(&self, id: &EntityId) -> Result<(), RepositoryError>;
}

/// The relational store as seen by the service: one repository per table.
///
/// Referential integrity and cascades are the backend's business; the service only
/// checks that referenced rows exist before writing.
pub trait PortfolioStore: Send + Sync {
    fn properties(&self) -> &dyn EntityRepository<Property>;
    fn tenants(&self) -> &dyn EntityRepository<Tenant>;
    fn leases(&self) -> &dyn EntityRepository<Lease>;
    fn payments(&self) -> &dyn EntityRepository<Payment>;
    fn maintenance_requests(&self) -> &dyn EntityRepository<MaintenanceRequest>;
    fn documents(&self) -> &dyn EntityRepository<Document>;

    fn contains(&self, kind: RecordKind, id: &EntityId) -> Result<bool, RepositoryError> {
        let found = match kind {
            RecordKind::Property => self.properties().fetch(id)?.is_some(),
            RecordKind::Tenant => self.tenants().fetch(id)?.is_some(),
            RecordKind::Lease => self.leases().fetch(id)?.is_some(),
            RecordKind::Payment => self.payments().fetch(id)?.is_some(),
            RecordKind::MaintenanceRequest => self.maintenance_requests().fetch(id)?.is_some(),
            RecordKind::Document => self.documents().fetch(id)?.is_some(),
        };
        Ok(found)
    }
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("{kind} {id} already exists")]
    DuplicateId { kind: RecordKind, id: EntityId },
    #[error("{kind} with {key} already exists")]
    Conflict { kind: RecordKind, key: String },
    #[error("{kind} {id} not found")]
    NotFound { kind: RecordKind, id: EntityId },
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

impl Entity for Property {
    const KIND: RecordKind = RecordKind::Property;

    fn id(&self) -> &EntityId {
        &self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

impl Entity for Tenant {
    const KIND: RecordKind = RecordKind::Tenant;

    fn id(&self) -> &EntityId {
        &self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn unique_key(&self) -> Option<String> {
        Some(format!("email {}", self.email.to_ascii_lowercase()))
    }
}

impl Entity for Lease {
    const KIND: RecordKind = RecordKind::Lease;

    fn id(&self) -> &EntityId {
        &self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

impl Entity for Payment {
    const KIND: RecordKind = RecordKind::Payment;

    fn id(&self) -> &EntityId {
        &self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

impl Entity for MaintenanceRequest {
    const KIND: RecordKind = RecordKind::MaintenanceRequest;

    fn id(&self) -> &EntityId {
        &self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

impl Entity for Document {
    const KIND: RecordKind = RecordKind::Document;

    fn id(&self) -> &EntityId {
        &self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
