use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::domain::{
    Document, EntityId, Lease, MaintenanceRequest, Payment, Property, RecordKind, Tenant,
};
use super::drafts::{
    DocumentDraft, LeaseDraft, MaintenanceRequestDraft, PaymentDraft, PropertyDraft, TenantDraft,
};
use super::repository::{Entity, EntityRepository, PortfolioStore};
use super::validation::ValidationErrors;
use crate::dashboard::fixtures;

/// Foreign key held by a record, named after the payload field that carries it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference {
    pub field: &'static str,
    pub target: RecordKind,
    pub id: EntityId,
}

/// Ties a record type to its table, its request payload, and its demo rows so the
/// service and router can stay generic over record families.
pub trait Resource: Entity + Serialize + Clone + Send + Sync + 'static {
    type Draft: DeserializeOwned + Send + 'static;

    fn repository<S: PortfolioStore + ?Sized>(store: &S) -> &dyn EntityRepository<Self>;

    fn from_draft(
        draft: Self::Draft,
        id: EntityId,
        now: DateTime<Utc>,
    ) -> Result<Self, ValidationErrors>;

    fn apply_patch(&mut self, patch: Self::Draft, now: DateTime<Utc>)
        -> Result<(), ValidationErrors>;

    fn touch(&mut self, now: DateTime<Utc>);

    fn references(&self) -> Vec<Reference> {
        Vec::new()
    }

    /// Rows served from an empty listing when demo listings are enabled.
    fn demo_rows() -> Vec<Self> {
        Vec::new()
    }
}

impl Resource for Property {
    type Draft = PropertyDraft;

    fn repository<S: PortfolioStore + ?Sized>(store: &S) -> &dyn EntityRepository<Self> {
        store.properties()
    }

    fn from_draft(
        draft: PropertyDraft,
        id: EntityId,
        now: DateTime<Utc>,
    ) -> Result<Self, ValidationErrors> {
        draft.into_property(id, now)
    }

    fn apply_patch(&mut self, patch: PropertyDraft, _now: DateTime<Utc>) -> Result<(), ValidationErrors> {
        patch.apply_to(self)
    }

    fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now;
    }

    fn demo_rows() -> Vec<Self> {
        fixtures::demo_properties()
    }
}

impl Resource for Tenant {
    type Draft = TenantDraft;

    fn repository<S: PortfolioStore + ?Sized>(store: &S) -> &dyn EntityRepository<Self> {
        store.tenants()
    }

    fn from_draft(
        draft: TenantDraft,
        id: EntityId,
        now: DateTime<Utc>,
    ) -> Result<Self, ValidationErrors> {
        draft.into_tenant(id, now)
    }

    fn apply_patch(&mut self, patch: TenantDraft, _now: DateTime<Utc>) -> Result<(), ValidationErrors> {
        patch.apply_to(self)
    }

    fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now;
    }

    fn demo_rows() -> Vec<Self> {
        fixtures::demo_tenants()
    }
}

impl Resource for Lease {
    type Draft = LeaseDraft;

    fn repository<S: PortfolioStore + ?Sized>(store: &S) -> &dyn EntityRepository<Self> {
        store.leases()
    }

    fn from_draft(draft: LeaseDraft, id: EntityId, now: DateTime<Utc>) -> Result<Self, ValidationErrors> {
        draft.into_lease(id, now)
    }

    fn apply_patch(&mut self, patch: LeaseDraft, _now: DateTime<Utc>) -> Result<(), ValidationErrors> {
        patch.apply_to(self)
    }

    fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now;
    }

    fn references(&self) -> Vec<Reference> {
        vec![
            Reference {
                field: "propertyId",
                target: RecordKind::Property,
                id: self.property_id.clone(),
            },
            Reference {
                field: "tenantId",
                target: RecordKind::Tenant,
                id: self.tenant_id.clone(),
            },
        ]
    }

    fn demo_rows() -> Vec<Self> {
        fixtures::demo_leases()
    }
}

impl Resource for Payment {
    type Draft = PaymentDraft;

    fn repository<S: PortfolioStore + ?Sized>(store: &S) -> &dyn EntityRepository<Self> {
        store.payments()
    }

    fn from_draft(
        draft: PaymentDraft,
        id: EntityId,
        now: DateTime<Utc>,
    ) -> Result<Self, ValidationErrors> {
        draft.into_payment(id, now)
    }

    fn apply_patch(&mut self, patch: PaymentDraft, _now: DateTime<Utc>) -> Result<(), ValidationErrors> {
        patch.apply_to(self)
    }

    fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now;
    }

    fn references(&self) -> Vec<Reference> {
        vec![Reference {
            field: "leaseId",
            target: RecordKind::Lease,
            id: self.lease_id.clone(),
        }]
    }

    fn demo_rows() -> Vec<Self> {
        fixtures::demo_payments()
    }
}

impl Resource for MaintenanceRequest {
    type Draft = MaintenanceRequestDraft;

    fn repository<S: PortfolioStore + ?Sized>(store: &S) -> &dyn EntityRepository<Self> {
        store.maintenance_requests()
    }

    fn from_draft(
        draft: MaintenanceRequestDraft,
        id: EntityId,
        now: DateTime<Utc>,
    ) -> Result<Self, ValidationErrors> {
        draft.into_request(id, now)
    }

    fn apply_patch(
        &mut self,
        patch: MaintenanceRequestDraft,
        now: DateTime<Utc>,
    ) -> Result<(), ValidationErrors> {
        patch.apply_to(self, now)
    }

    fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now;
    }

    fn references(&self) -> Vec<Reference> {
        vec![
            Reference {
                field: "propertyId",
                target: RecordKind::Property,
                id: self.property_id.clone(),
            },
            Reference {
                field: "tenantId",
                target: RecordKind::Tenant,
                id: self.tenant_id.clone(),
            },
        ]
    }

    fn demo_rows() -> Vec<Self> {
        fixtures::demo_maintenance_requests()
    }
}

impl Resource for Document {
    type Draft = DocumentDraft;

    fn repository<S: PortfolioStore + ?Sized>(store: &S) -> &dyn EntityRepository<Self> {
        store.documents()
    }

    fn from_draft(
        draft: DocumentDraft,
        id: EntityId,
        now: DateTime<Utc>,
    ) -> Result<Self, ValidationErrors> {
        draft.into_document(id, now)
    }

    fn apply_patch(&mut self, patch: DocumentDraft, _now: DateTime<Utc>) -> Result<(), ValidationErrors> {
        patch.apply_to(self)
    }

    fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now;
    }

    fn references(&self) -> Vec<Reference> {
        vec![Reference {
            field: "leaseId",
            target: RecordKind::Lease,
            id: self.lease_id.clone(),
        }]
    }
}
