use std::fmt;
use std::iter::Sum;
use std::ops::Add;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use uuid::Uuid;

/// Identifier wrapper shared by every portfolio record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(pub String);

impl EntityId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EntityId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Fixed-point currency amount, always carried with two fractional digits.
///
/// Serialized as a decimal string (`"2800.00"`) so clients never round-trip
/// through binary floating point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(Decimal);

impl Money {
    pub const SCALE: u32 = 2;

    pub fn new(amount: Decimal) -> Self {
        let mut amount = amount.round_dp(Self::SCALE);
        amount.rescale(Self::SCALE);
        Self(amount)
    }

    pub fn from_cents(cents: i64) -> Self {
        Self(Decimal::new(cents, Self::SCALE))
    }

    /// Largest amount a `decimal(10,2)` column holds.
    pub fn ceiling() -> Self {
        Self::from_cents(9_999_999_999)
    }

    pub fn zero() -> Self {
        Self::from_cents(0)
    }

    pub fn amount(self) -> Decimal {
        self.0
    }

    pub fn is_positive(self) -> bool {
        self.0 > Decimal::ZERO
    }
}

impl Default for Money {
    fn default() -> Self {
        Self::zero()
    }
}

impl Add for Money {
    type Output = Money;

    /// Saturates at the largest representable amount instead of overflowing.
    fn add(self, rhs: Money) -> Money {
        Money::new(self.0.saturating_add(rhs.0))
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::zero(), Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Money {
        iter.copied().sum()
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        <Decimal as Deserialize>::deserialize(deserializer).map(Money::new)
    }
}

/// Record families held by the entity store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    Property,
    Tenant,
    Lease,
    Payment,
    MaintenanceRequest,
    Document,
}

impl RecordKind {
    pub const fn label(self) -> &'static str {
        match self {
            RecordKind::Property => "Property",
            RecordKind::Tenant => "Tenant",
            RecordKind::Lease => "Lease",
            RecordKind::Payment => "Payment",
            RecordKind::MaintenanceRequest => "Maintenance request",
            RecordKind::Document => "Document",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LeaseStatus {
    #[default]
    Upcoming,
    Active,
    Ended,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    Paid,
    #[default]
    Due,
    Late,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MaintenanceStatus {
    #[default]
    Pending,
    InProgress,
    Completed,
}

impl MaintenanceStatus {
    /// Pending and in-progress requests still need attention.
    pub const fn is_open(self) -> bool {
        matches!(self, MaintenanceStatus::Pending | MaintenanceStatus::InProgress)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MaintenancePriority {
    Low,
    #[default]
    Medium,
    High,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    pub id: EntityId,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub bedrooms: u32,
    /// Half-bath granularity, e.g. `2.5`.
    pub bathrooms: Decimal,
    pub rent_amount: Money,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tenant {
    pub id: EntityId,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    /// Identity-provider account linked to this tenant, if any.
    pub user_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lease {
    pub id: EntityId,
    pub property_id: EntityId,
    pub tenant_id: EntityId,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub monthly_rent: Money,
    pub status: LeaseStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    pub id: EntityId,
    pub lease_id: EntityId,
    pub amount: Money,
    pub payment_date: Option<NaiveDate>,
    pub due_date: NaiveDate,
    pub status: PaymentStatus,
    /// Gateway reference; the gateway itself is not integrated.
    pub stripe_payment_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceRequest {
    pub id: EntityId,
    pub property_id: EntityId,
    pub tenant_id: EntityId,
    pub description: String,
    pub status: MaintenanceStatus,
    pub priority: MaintenancePriority,
    pub reported_date: DateTime<Utc>,
    pub completed_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl MaintenanceRequest {
    pub fn is_high_priority(&self) -> bool {
        self.priority == MaintenancePriority::High && self.status.is_open()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub id: EntityId,
    pub lease_id: EntityId,
    pub file_name: String,
    pub file_url: String,
    pub document_type: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
