use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use super::domain::{
    Document, EntityId, Lease, MaintenanceRequest, Payment, Property, Tenant,
};
use super::repository::{Entity, EntityRepository, PortfolioStore, RepositoryError};
use crate::dashboard::PortfolioSnapshot;

/// Mutex-guarded table keyed by record id.
pub struct InMemoryRepository<E> {
    records: Arc<Mutex<HashMap<EntityId, E>>>,
}

impl<E> Default for InMemoryRepository<E> {
    fn default() -> Self {
        Self {
            records: Arc::new(Mutex::new(HashMap::new())),
        }
    }
}

impl<E> Clone for InMemoryRepository<E> {
    fn clone(&self) -> Self {
        Self {
            records: Arc::clone(&self.records),
        }
    }
}

impl<E: Entity> InMemoryRepository<E> {
    fn table(&self) -> Result<MutexGuard<'_, HashMap<EntityId, E>>, RepositoryError> {
        self.records
            .lock()
            .map_err(|_| RepositoryError::Unavailable(format!("{} table lock poisoned", E::KIND)))
    }

    fn ensure_unique(
        table: &HashMap<EntityId, E>,
        record: &E,
    ) -> Result<(), RepositoryError> {
        let Some(key) = record.unique_key() else {
            return Ok(());
        };
        let taken = table
            .values()
            .any(|other| other.id() != record.id() && other.unique_key().as_ref() == Some(&key));
        if taken {
            Err(RepositoryError::Conflict { kind: E::KIND, key })
        } else {
            Ok(())
        }
    }
}

impl<E> EntityRepository<E> for InMemoryRepository<E>
where
    E: Entity + Clone + Send + Sync,
{
    fn list(&self) -> Result<Vec<E>, RepositoryError> {
        Ok(self.table()?.values().cloned().collect())
    }

    fn fetch(&self, id: &EntityId) -> Result<Option<E>, RepositoryError> {
        Ok(self.table()?.get(id).cloned())
    }

    fn insert(&self, record: E) -> Result<E, RepositoryError> {
        let mut table = self.table()?;
        if table.contains_key(record.id()) {
            return Err(RepositoryError::DuplicateId {
                kind: E::KIND,
                id: record.id().clone(),
            });
        }
        Self::ensure_unique(&table, &record)?;
        table.insert(record.id().clone(), record.clone());
        Ok(record)
    }

    fn update(&self, record: E) -> Result<E, RepositoryError> {
        let mut table = self.table()?;
        if !table.contains_key(record.id()) {
            return Err(RepositoryError::NotFound {
                kind: E::KIND,
                id: record.id().clone(),
            });
        }
        Self::ensure_unique(&table, &record)?;
        table.insert(record.id().clone(), record.clone());
        Ok(record)
    }

    fn delete(&self, id: &EntityId) -> Result<(), RepositoryError> {
        match self.table()?.remove(id) {
            Some(_) => Ok(()),
            None => Err(RepositoryError::NotFound {
                kind: E::KIND,
                id: id.clone(),
            }),
        }
    }
}

/// Process-local entity store used by the server and the CLI demos.
#[derive(Default, Clone)]
pub struct InMemoryPortfolioStore {
    properties: InMemoryRepository<Property>,
    tenants: InMemoryRepository<Tenant>,
    leases: InMemoryRepository<Lease>,
    payments: InMemoryRepository<Payment>,
    maintenance_requests: InMemoryRepository<MaintenanceRequest>,
    documents: InMemoryRepository<Document>,
}

impl InMemoryPortfolioStore {
    /// Store pre-populated with every row of `snapshot`.
    pub fn seeded(snapshot: PortfolioSnapshot) -> Result<Self, RepositoryError> {
        let store = Self::default();
        for property in snapshot.properties {
            store.properties.insert(property)?;
        }
        for tenant in snapshot.tenants {
            store.tenants.insert(tenant)?;
        }
        for lease in snapshot.leases {
            store.leases.insert(lease)?;
        }
        for payment in snapshot.payments {
            store.payments.insert(payment)?;
        }
        for request in snapshot.maintenance_requests {
            store.maintenance_requests.insert(request)?;
        }
        Ok(store)
    }
}

impl PortfolioStore for InMemoryPortfolioStore {
    fn properties(&self) -> &dyn EntityRepository<Property> {
        &self.properties
    }

    fn tenants(&self) -> &dyn EntityRepository<Tenant> {
        &self.tenants
    }

    fn leases(&self) -> &dyn EntityRepository<Lease> {
        &self.leases
    }

    fn payments(&self) -> &dyn EntityRepository<Payment> {
        &self.payments
    }

    fn maintenance_requests(&self) -> &dyn EntityRepository<MaintenanceRequest> {
        &self.maintenance_requests
    }

    fn documents(&self) -> &dyn EntityRepository<Document> {
        &self.documents
    }
}
