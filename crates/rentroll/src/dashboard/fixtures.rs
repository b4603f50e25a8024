//! Demo portfolio shown on a fresh deployment.
//!
//! Rows are kept as immutable seed tables and materialized on every call.

use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};
use rust_decimal::Decimal;

use super::PortfolioSnapshot;
use crate::portfolio::domain::{
    EntityId, Lease, LeaseStatus, MaintenancePriority, MaintenanceRequest, MaintenanceStatus,
    Money, Payment, PaymentStatus, Property, Tenant,
};

type Day = (i32, u32, u32);

struct PropertySeed {
    id: &'static str,
    address: &'static str,
    zip_code: &'static str,
    bedrooms: u32,
    /// Tenths of a bathroom.
    bathrooms: i64,
    rent_cents: i64,
    description: &'static str,
    listed: Day,
}

struct TenantSeed {
    id: &'static str,
    name: &'static str,
    email: &'static str,
    phone: &'static str,
    joined: Day,
}

struct LeaseSeed {
    id: &'static str,
    property_id: &'static str,
    tenant_id: &'static str,
    start: Day,
    end: Day,
    rent_cents: i64,
    signed: Day,
}

struct PaymentSeed {
    id: &'static str,
    lease_id: &'static str,
    amount_cents: i64,
    paid: Option<Day>,
    due: Day,
    status: PaymentStatus,
    stripe_payment_id: Option<&'static str>,
    created: Day,
    updated: Day,
}

struct MaintenanceSeed {
    id: &'static str,
    property_id: &'static str,
    tenant_id: &'static str,
    description: &'static str,
    status: MaintenanceStatus,
    priority: MaintenancePriority,
    reported: Day,
    completed: Option<Day>,
    updated: Day,
}

const PROPERTIES: [PropertySeed; 4] = [
    PropertySeed {
        id: "prop-1",
        address: "2847 Maple Grove Avenue",
        zip_code: "78704",
        bedrooms: 3,
        bathrooms: 25,
        rent_cents: 280_000,
        description: "Modern townhouse with updated kitchen, hardwood floors, and private patio. Near downtown district.",
        listed: (2024, 1, 15),
    },
    PropertySeed {
        id: "prop-2",
        address: "1534 Pine Street Unit 4B",
        zip_code: "78701",
        bedrooms: 2,
        bathrooms: 20,
        rent_cents: 220_000,
        description: "Downtown loft with city views, exposed brick, and in-unit laundry. Walking distance to restaurants.",
        listed: (2024, 2, 1),
    },
    PropertySeed {
        id: "prop-3",
        address: "8921 Cedar Hills Drive",
        zip_code: "78759",
        bedrooms: 4,
        bathrooms: 30,
        rent_cents: 320_000,
        description: "Spacious family home with large backyard, two-car garage, and excellent school district.",
        listed: (2024, 3, 10),
    },
    PropertySeed {
        id: "prop-4",
        address: "456 Oak Boulevard",
        zip_code: "78702",
        bedrooms: 1,
        bathrooms: 10,
        rent_cents: 165_000,
        description: "Cozy studio apartment with modern amenities, perfect for professionals. Close to tech district.",
        listed: (2024, 4, 5),
    },
];

const TENANTS: [TenantSeed; 3] = [
    TenantSeed {
        id: "tenant-1",
        name: "Sarah Johnson",
        email: "sarah.johnson@email.com",
        phone: "(512) 555-0123",
        joined: (2024, 1, 20),
    },
    TenantSeed {
        id: "tenant-2",
        name: "Michael Chen",
        email: "michael.chen@email.com",
        phone: "(512) 555-0456",
        joined: (2024, 2, 5),
    },
    TenantSeed {
        id: "tenant-3",
        name: "Emily Rodriguez",
        email: "emily.rodriguez@email.com",
        phone: "(512) 555-0789",
        joined: (2024, 3, 15),
    },
];

const LEASES: [LeaseSeed; 3] = [
    LeaseSeed {
        id: "lease-1",
        property_id: "prop-1",
        tenant_id: "tenant-1",
        start: (2024, 2, 1),
        end: (2025, 1, 31),
        rent_cents: 280_000,
        signed: (2024, 1, 25),
    },
    LeaseSeed {
        id: "lease-2",
        property_id: "prop-2",
        tenant_id: "tenant-2",
        start: (2024, 3, 1),
        end: (2025, 2, 28),
        rent_cents: 220_000,
        signed: (2024, 2, 10),
    },
    LeaseSeed {
        id: "lease-3",
        property_id: "prop-3",
        tenant_id: "tenant-3",
        start: (2024, 4, 1),
        end: (2025, 3, 31),
        rent_cents: 320_000,
        signed: (2024, 3, 20),
    },
];

const PAYMENTS: [PaymentSeed; 4] = [
    PaymentSeed {
        id: "payment-1",
        lease_id: "lease-1",
        amount_cents: 280_000,
        paid: Some((2024, 12, 1)),
        due: (2024, 12, 1),
        status: PaymentStatus::Paid,
        stripe_payment_id: Some("pi_demo_001"),
        created: (2024, 12, 1),
        updated: (2024, 12, 1),
    },
    PaymentSeed {
        id: "payment-2",
        lease_id: "lease-2",
        amount_cents: 220_000,
        paid: None,
        due: (2024, 12, 1),
        status: PaymentStatus::Late,
        stripe_payment_id: None,
        created: (2024, 11, 25),
        updated: (2024, 12, 15),
    },
    PaymentSeed {
        id: "payment-3",
        lease_id: "lease-3",
        amount_cents: 320_000,
        paid: Some((2024, 12, 3)),
        due: (2024, 12, 1),
        status: PaymentStatus::Paid,
        stripe_payment_id: Some("pi_demo_002"),
        created: (2024, 12, 3),
        updated: (2024, 12, 3),
    },
    PaymentSeed {
        id: "payment-4",
        lease_id: "lease-1",
        amount_cents: 280_000,
        paid: None,
        due: (2025, 1, 1),
        status: PaymentStatus::Due,
        stripe_payment_id: None,
        created: (2024, 12, 20),
        updated: (2024, 12, 20),
    },
];

const MAINTENANCE: [MaintenanceSeed; 4] = [
    MaintenanceSeed {
        id: "maint-1",
        property_id: "prop-1",
        tenant_id: "tenant-1",
        description: "Kitchen faucet is dripping constantly. Needs repair or replacement.",
        status: MaintenanceStatus::InProgress,
        priority: MaintenancePriority::Medium,
        reported: (2024, 12, 10),
        completed: None,
        updated: (2024, 12, 12),
    },
    MaintenanceSeed {
        id: "maint-2",
        property_id: "prop-2",
        tenant_id: "tenant-2",
        description: "Heating system not working properly. Temperature inconsistent throughout apartment.",
        status: MaintenanceStatus::Pending,
        priority: MaintenancePriority::High,
        reported: (2024, 12, 15),
        completed: None,
        updated: (2024, 12, 15),
    },
    MaintenanceSeed {
        id: "maint-3",
        property_id: "prop-3",
        tenant_id: "tenant-3",
        description: "Washing machine making loud noise during spin cycle.",
        status: MaintenanceStatus::Completed,
        priority: MaintenancePriority::Low,
        reported: (2024, 11, 20),
        completed: Some((2024, 11, 25)),
        updated: (2024, 11, 25),
    },
    MaintenanceSeed {
        id: "maint-4",
        property_id: "prop-1",
        tenant_id: "tenant-1",
        description: "Front door lock sticking, difficult to open/close.",
        status: MaintenanceStatus::Pending,
        priority: MaintenancePriority::High,
        reported: (2024, 12, 18),
        completed: None,
        updated: (2024, 12, 18),
    },
];

fn date((year, month, day): Day) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

fn midnight(day: Day) -> DateTime<Utc> {
    Utc.from_utc_datetime(&date(day).and_time(NaiveTime::default()))
}

pub fn demo_properties() -> Vec<Property> {
    PROPERTIES
        .iter()
        .map(|seed| Property {
            id: EntityId::from(seed.id),
            address: seed.address.to_string(),
            city: "Austin".to_string(),
            state: "TX".to_string(),
            zip_code: seed.zip_code.to_string(),
            bedrooms: seed.bedrooms,
            bathrooms: Decimal::new(seed.bathrooms, 1),
            rent_amount: Money::from_cents(seed.rent_cents),
            description: Some(seed.description.to_string()),
            image_url: None,
            created_at: midnight(seed.listed),
            updated_at: midnight(seed.listed),
        })
        .collect()
}

pub fn demo_tenants() -> Vec<Tenant> {
    TENANTS
        .iter()
        .map(|seed| Tenant {
            id: EntityId::from(seed.id),
            name: seed.name.to_string(),
            email: seed.email.to_string(),
            phone: Some(seed.phone.to_string()),
            user_id: None,
            created_at: midnight(seed.joined),
            updated_at: midnight(seed.joined),
        })
        .collect()
}

/// Every demo lease is ACTIVE.
pub fn demo_leases() -> Vec<Lease> {
    LEASES
        .iter()
        .map(|seed| Lease {
            id: EntityId::from(seed.id),
            property_id: EntityId::from(seed.property_id),
            tenant_id: EntityId::from(seed.tenant_id),
            start_date: date(seed.start),
            end_date: date(seed.end),
            monthly_rent: Money::from_cents(seed.rent_cents),
            status: LeaseStatus::Active,
            created_at: midnight(seed.signed),
            updated_at: midnight(seed.signed),
        })
        .collect()
}

pub fn demo_payments() -> Vec<Payment> {
    PAYMENTS
        .iter()
        .map(|seed| Payment {
            id: EntityId::from(seed.id),
            lease_id: EntityId::from(seed.lease_id),
            amount: Money::from_cents(seed.amount_cents),
            payment_date: seed.paid.map(date),
            due_date: date(seed.due),
            status: seed.status,
            stripe_payment_id: seed.stripe_payment_id.map(str::to_string),
            created_at: midnight(seed.created),
            updated_at: midnight(seed.updated),
        })
        .collect()
}

pub fn demo_maintenance_requests() -> Vec<MaintenanceRequest> {
    MAINTENANCE
        .iter()
        .map(|seed| MaintenanceRequest {
            id: EntityId::from(seed.id),
            property_id: EntityId::from(seed.property_id),
            tenant_id: EntityId::from(seed.tenant_id),
            description: seed.description.to_string(),
            status: seed.status,
            priority: seed.priority,
            reported_date: midnight(seed.reported),
            completed_date: seed.completed.map(midnight),
            created_at: midnight(seed.reported),
            updated_at: midnight(seed.updated),
        })
        .collect()
}

pub fn demo_snapshot() -> PortfolioSnapshot {
    PortfolioSnapshot {
        properties: demo_properties(),
        tenants: demo_tenants(),
        leases: demo_leases(),
        payments: demo_payments(),
        maintenance_requests: demo_maintenance_requests(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn fixture_references_resolve() {
        let snapshot = demo_snapshot();
        let properties: HashSet<_> = snapshot.properties.iter().map(|p| &p.id).collect();
        let tenants: HashSet<_> = snapshot.tenants.iter().map(|t| &t.id).collect();
        let leases: HashSet<_> = snapshot.leases.iter().map(|l| &l.id).collect();

        for lease in &snapshot.leases {
            assert!(properties.contains(&lease.property_id));
            assert!(tenants.contains(&lease.tenant_id));
            assert!(lease.start_date <= lease.end_date);
        }
        for payment in &snapshot.payments {
            assert!(leases.contains(&payment.lease_id));
            if payment.status == PaymentStatus::Paid {
                assert!(payment.payment_date.is_some());
            }
        }
        for request in &snapshot.maintenance_requests {
            assert!(properties.contains(&request.property_id));
            if request.status == MaintenanceStatus::Completed {
                assert!(request.completed_date.is_some());
            }
        }
    }

    #[test]
    fn fixture_dates_are_real_calendar_days() {
        let epoch = NaiveDate::default();
        assert!(demo_leases().iter().all(|lease| lease.end_date != epoch));
        assert_eq!(
            demo_payments()[1].due_date,
            NaiveDate::from_ymd_opt(2024, 12, 1).unwrap()
        );
    }

    #[test]
    fn fixture_amounts_keep_two_decimals() {
        let rents: Vec<String> = demo_properties()
            .iter()
            .map(|property| property.rent_amount.to_string())
            .collect();
        assert_eq!(rents, ["2800.00", "2200.00", "3200.00", "1650.00"]);
    }
}
