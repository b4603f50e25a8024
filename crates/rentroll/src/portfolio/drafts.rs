//! Request payloads for creating and partially updating records.
//!
//! One draft type serves both verbs: on create every required field must be present,
//! on update only the supplied fields are checked and merged, then the merged record's
//! cross-field invariants are re-checked.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;

use super::dates::{deserialize_optional_date, deserialize_optional_timestamp};
use super::domain::{
    Document, EntityId, Lease, LeaseStatus, MaintenancePriority, MaintenanceRequest,
    MaintenanceStatus, Payment, PaymentStatus, Property, Tenant,
};
use super::validation::ValidationErrors;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyDraft {
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
    pub bedrooms: Option<i64>,
    pub bathrooms: Option<Decimal>,
    pub rent_amount: Option<Decimal>,
    pub description: Option<String>,
    pub image_url: Option<String>,
}

impl PropertyDraft {
    pub fn into_property(
        self,
        id: EntityId,
        now: DateTime<Utc>,
    ) -> Result<Property, ValidationErrors> {
        let mut errors = ValidationErrors::default();
        let address = errors.required_text("address", self.address);
        let city = errors.required_text("city", self.city);
        let state = errors.required_text("state", self.state);
        let zip_code = errors.required_text("zipCode", self.zip_code);
        let bedrooms = errors
            .required("bedrooms", self.bedrooms)
            .and_then(|value| errors.bedrooms("bedrooms", value));
        let bathrooms = errors
            .required("bathrooms", self.bathrooms)
            .and_then(|value| errors.bathrooms("bathrooms", value));
        let rent_amount = errors
            .required("rentAmount", self.rent_amount)
            .and_then(|value| errors.money("rentAmount", value));

        match (address, city, state, zip_code, bedrooms, bathrooms, rent_amount) {
            (
                Some(address),
                Some(city),
                Some(state),
                Some(zip_code),
                Some(bedrooms),
                Some(bathrooms),
                Some(rent_amount),
            ) if errors.is_empty() => Ok(Property {
                id,
                address,
                city,
                state,
                zip_code,
                bedrooms,
                bathrooms,
                rent_amount,
                description: ValidationErrors::optional_text(self.description),
                image_url: ValidationErrors::optional_text(self.image_url),
                created_at: now,
                updated_at: now,
            }),
            _ => Err(errors),
        }
    }

    pub fn apply_to(self, property: &mut Property) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::default();
        if let Some(address) = self.address.and_then(|v| errors.text("address", v)) {
            property.address = address;
        }
        if let Some(city) = self.city.and_then(|v| errors.text("city", v)) {
            property.city = city;
        }
        if let Some(state) = self.state.and_then(|v| errors.text("state", v)) {
            property.state = state;
        }
        if let Some(zip_code) = self.zip_code.and_then(|v| errors.text("zipCode", v)) {
            property.zip_code = zip_code;
        }
        if let Some(bedrooms) = self.bedrooms.and_then(|v| errors.bedrooms("bedrooms", v)) {
            property.bedrooms = bedrooms;
        }
        if let Some(bathrooms) = self.bathrooms.and_then(|v| errors.bathrooms("bathrooms", v)) {
            property.bathrooms = bathrooms;
        }
        if let Some(rent) = self.rent_amount.and_then(|v| errors.money("rentAmount", v)) {
            property.rent_amount = rent;
        }
        if self.description.is_some() {
            property.description = ValidationErrors::optional_text(self.description);
        }
        if self.image_url.is_some() {
            property.image_url = ValidationErrors::optional_text(self.image_url);
        }
        errors.finish(())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TenantDraft {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub user_id: Option<String>,
}

impl TenantDraft {
    pub fn into_tenant(self, id: EntityId, now: DateTime<Utc>) -> Result<Tenant, ValidationErrors> {
        let mut errors = ValidationErrors::default();
        let name = errors.required_text("name", self.name);
        let email = errors
            .required("email", self.email)
            .and_then(|value| errors.email("email", value));

        match (name, email) {
            (Some(name), Some(email)) if errors.is_empty() => Ok(Tenant {
                id,
                name,
                email,
                phone: ValidationErrors::optional_text(self.phone),
                user_id: ValidationErrors::optional_text(self.user_id),
                created_at: now,
                updated_at: now,
            }),
            _ => Err(errors),
        }
    }

    pub fn apply_to(self, tenant: &mut Tenant) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::default();
        if let Some(name) = self.name.and_then(|v| errors.text("name", v)) {
            tenant.name = name;
        }
        if let Some(email) = self.email.and_then(|v| errors.email("email", v)) {
            tenant.email = email;
        }
        if self.phone.is_some() {
            tenant.phone = ValidationErrors::optional_text(self.phone);
        }
        if self.user_id.is_some() {
            tenant.user_id = ValidationErrors::optional_text(self.user_id);
        }
        errors.finish(())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaseDraft {
    pub property_id: Option<EntityId>,
    pub tenant_id: Option<EntityId>,
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    pub start_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    pub end_date: Option<NaiveDate>,
    pub monthly_rent: Option<Decimal>,
    pub status: Option<LeaseStatus>,
}

impl LeaseDraft {
    pub fn into_lease(self, id: EntityId, now: DateTime<Utc>) -> Result<Lease, ValidationErrors> {
        let mut errors = ValidationErrors::default();
        let property_id = errors.required("propertyId", self.property_id);
        let tenant_id = errors.required("tenantId", self.tenant_id);
        let start_date = errors.required("startDate", self.start_date);
        let end_date = errors.required("endDate", self.end_date);
        let monthly_rent = errors
            .required("monthlyRent", self.monthly_rent)
            .and_then(|value| errors.money("monthlyRent", value));

        match (property_id, tenant_id, start_date, end_date, monthly_rent) {
            (Some(property_id), Some(tenant_id), Some(start_date), Some(end_date), Some(rent))
                if errors.is_empty() =>
            {
                let lease = Lease {
                    id,
                    property_id,
                    tenant_id,
                    start_date,
                    end_date,
                    monthly_rent: rent,
                    status: self.status.unwrap_or_default(),
                    created_at: now,
                    updated_at: now,
                };
                check_lease(&lease)?;
                Ok(lease)
            }
            _ => Err(errors),
        }
    }

    pub fn apply_to(self, lease: &mut Lease) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::default();
        if let Some(property_id) = self.property_id {
            lease.property_id = property_id;
        }
        if let Some(tenant_id) = self.tenant_id {
            lease.tenant_id = tenant_id;
        }
        if let Some(start_date) = self.start_date {
            lease.start_date = start_date;
        }
        if let Some(end_date) = self.end_date {
            lease.end_date = end_date;
        }
        if let Some(rent) = self.monthly_rent.and_then(|v| errors.money("monthlyRent", v)) {
            lease.monthly_rent = rent;
        }
        if let Some(status) = self.status {
            lease.status = status;
        }
        errors.finish(())?;
        check_lease(lease)
    }
}

fn check_lease(lease: &Lease) -> Result<(), ValidationErrors> {
    if lease.start_date > lease.end_date {
        return Err(ValidationErrors::single(
            "endDate",
            "must not be earlier than startDate",
        ));
    }
    Ok(())
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentDraft {
    pub lease_id: Option<EntityId>,
    pub amount: Option<Decimal>,
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    pub payment_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    pub due_date: Option<NaiveDate>,
    pub status: Option<PaymentStatus>,
    pub stripe_payment_id: Option<String>,
}

impl PaymentDraft {
    pub fn into_payment(
        self,
        id: EntityId,
        now: DateTime<Utc>,
    ) -> Result<Payment, ValidationErrors> {
        let mut errors = ValidationErrors::default();
        let lease_id = errors.required("leaseId", self.lease_id);
        let amount = errors
            .required("amount", self.amount)
            .and_then(|value| errors.money("amount", value));
        let due_date = errors.required("dueDate", self.due_date);

        match (lease_id, amount, due_date) {
            (Some(lease_id), Some(amount), Some(due_date)) if errors.is_empty() => {
                let payment = Payment {
                    id,
                    lease_id,
                    amount,
                    payment_date: self.payment_date,
                    due_date,
                    status: self.status.unwrap_or_default(),
                    stripe_payment_id: ValidationErrors::optional_text(self.stripe_payment_id),
                    created_at: now,
                    updated_at: now,
                };
                check_payment(&payment)?;
                Ok(payment)
            }
            _ => Err(errors),
        }
    }

    pub fn apply_to(self, payment: &mut Payment) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::default();
        if let Some(lease_id) = self.lease_id {
            payment.lease_id = lease_id;
        }
        if let Some(amount) = self.amount.and_then(|v| errors.money("amount", v)) {
            payment.amount = amount;
        }
        if let Some(payment_date) = self.payment_date {
            payment.payment_date = Some(payment_date);
        }
        if let Some(due_date) = self.due_date {
            payment.due_date = due_date;
        }
        if let Some(status) = self.status {
            payment.status = status;
        }
        if self.stripe_payment_id.is_some() {
            payment.stripe_payment_id = ValidationErrors::optional_text(self.stripe_payment_id);
        }
        errors.finish(())?;
        check_payment(payment)
    }
}

fn check_payment(payment: &Payment) -> Result<(), ValidationErrors> {
    if payment.status == PaymentStatus::Paid && payment.payment_date.is_none() {
        return Err(ValidationErrors::single(
            "paymentDate",
            "is required when status is PAID",
        ));
    }
    Ok(())
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceRequestDraft {
    pub property_id: Option<EntityId>,
    pub tenant_id: Option<EntityId>,
    pub description: Option<String>,
    pub status: Option<MaintenanceStatus>,
    pub priority: Option<MaintenancePriority>,
    #[serde(default, deserialize_with = "deserialize_optional_timestamp")]
    pub completed_date: Option<DateTime<Utc>>,
}

impl MaintenanceRequestDraft {
    /// `reportedDate` is always the creation time; a COMPLETED request without a
    /// completion time is stamped with `now`.
    pub fn into_request(
        self,
        id: EntityId,
        now: DateTime<Utc>,
    ) -> Result<MaintenanceRequest, ValidationErrors> {
        let mut errors = ValidationErrors::default();
        let property_id = errors.required("propertyId", self.property_id);
        let tenant_id = errors.required("tenantId", self.tenant_id);
        let description = errors.required_text("description", self.description);

        match (property_id, tenant_id, description) {
            (Some(property_id), Some(tenant_id), Some(description)) if errors.is_empty() => {
                let mut request = MaintenanceRequest {
                    id,
                    property_id,
                    tenant_id,
                    description,
                    status: self.status.unwrap_or_default(),
                    priority: self.priority.unwrap_or_default(),
                    reported_date: now,
                    completed_date: self.completed_date,
                    created_at: now,
                    updated_at: now,
                };
                stamp_completion(&mut request, now);
                Ok(request)
            }
            _ => Err(errors),
        }
    }

    pub fn apply_to(
        self,
        request: &mut MaintenanceRequest,
        now: DateTime<Utc>,
    ) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::default();
        if let Some(property_id) = self.property_id {
            request.property_id = property_id;
        }
        if let Some(tenant_id) = self.tenant_id {
            request.tenant_id = tenant_id;
        }
        if let Some(description) = self.description.and_then(|v| errors.text("description", v)) {
            request.description = description;
        }
        if let Some(status) = self.status {
            request.status = status;
        }
        if let Some(priority) = self.priority {
            request.priority = priority;
        }
        if let Some(completed_date) = self.completed_date {
            request.completed_date = Some(completed_date);
        }
        stamp_completion(request, now);
        errors.finish(())
    }
}

fn stamp_completion(request: &mut MaintenanceRequest, now: DateTime<Utc>) {
    if request.status == MaintenanceStatus::Completed && request.completed_date.is_none() {
        request.completed_date = Some(now);
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentDraft {
    pub lease_id: Option<EntityId>,
    pub file_name: Option<String>,
    pub file_url: Option<String>,
    pub document_type: Option<String>,
}

impl DocumentDraft {
    pub fn into_document(
        self,
        id: EntityId,
        now: DateTime<Utc>,
    ) -> Result<Document, ValidationErrors> {
        let mut errors = ValidationErrors::default();
        let lease_id = errors.required("leaseId", self.lease_id);
        let file_name = errors.required_text("fileName", self.file_name);
        let file_url = errors.required_text("fileUrl", self.file_url);
        let document_type = errors.required_text("documentType", self.document_type);

        match (lease_id, file_name, file_url, document_type) {
            (Some(lease_id), Some(file_name), Some(file_url), Some(document_type))
                if errors.is_empty() =>
            {
                Ok(Document {
                    id,
                    lease_id,
                    file_name,
                    file_url,
                    document_type,
                    created_at: now,
                    updated_at: now,
                })
            }
            _ => Err(errors),
        }
    }

    pub fn apply_to(self, document: &mut Document) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::default();
        if let Some(lease_id) = self.lease_id {
            document.lease_id = lease_id;
        }
        if let Some(file_name) = self.file_name.and_then(|v| errors.text("fileName", v)) {
            document.file_name = file_name;
        }
        if let Some(file_url) = self.file_url.and_then(|v| errors.text("fileUrl", v)) {
            document.file_url = file_url;
        }
        if let Some(kind) = self.document_type.and_then(|v| errors.text("documentType", v)) {
            document.document_type = kind;
        }
        errors.finish(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::portfolio::domain::Money;
    use serde_json::json;

    fn now() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2025-01-10T09:00:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    #[test]
    fn property_draft_reports_every_missing_field() {
        let errors = PropertyDraft::default()
            .into_property(EntityId::from("p"), now())
            .expect_err("empty draft rejected");
        for field in [
            "address",
            "city",
            "state",
            "zipCode",
            "bedrooms",
            "bathrooms",
            "rentAmount",
        ] {
            assert!(errors.has_field(field), "missing error for {field}");
        }
    }

    #[test]
    fn property_draft_parses_client_payload() {
        let draft: PropertyDraft = serde_json::from_value(json!({
            "address": " 2847 Maple Grove Avenue ",
            "city": "Austin",
            "state": "TX",
            "zipCode": "78704",
            "bedrooms": 3,
            "bathrooms": "2.5",
            "rentAmount": "2800",
            "description": ""
        }))
        .unwrap();
        let property = draft
            .into_property(EntityId::from("p"), now())
            .expect("valid draft");
        assert_eq!(property.address, "2847 Maple Grove Avenue");
        assert_eq!(property.rent_amount, Money::from_cents(280_000));
        assert_eq!(property.rent_amount.to_string(), "2800.00");
        assert_eq!(property.bathrooms.to_string(), "2.5");
        assert_eq!(property.description, None);
    }

    #[test]
    fn lease_dates_must_be_ordered() {
        let draft: LeaseDraft = serde_json::from_value(json!({
            "propertyId": "prop-1",
            "tenantId": "tenant-1",
            "startDate": "2025-02-01",
            "endDate": "2025-01-31",
            "monthlyRent": "2800.00"
        }))
        .unwrap();
        let errors = draft
            .into_lease(EntityId::from("l"), now())
            .expect_err("inverted dates rejected");
        assert!(errors.has_field("endDate"));
    }

    #[test]
    fn lease_status_defaults_to_upcoming() {
        let draft: LeaseDraft = serde_json::from_value(json!({
            "propertyId": "prop-1",
            "tenantId": "tenant-1",
            "startDate": "2025-02-01",
            "endDate": "2025-02-01",
            "monthlyRent": 1650
        }))
        .unwrap();
        let lease = draft.into_lease(EntityId::from("l"), now()).unwrap();
        assert_eq!(lease.status, LeaseStatus::Upcoming);
    }

    #[test]
    fn paid_payments_need_a_payment_date() {
        let draft: PaymentDraft = serde_json::from_value(json!({
            "leaseId": "lease-1",
            "amount": "2800.00",
            "dueDate": "2025-01-01",
            "status": "PAID"
        }))
        .unwrap();
        let errors = draft
            .into_payment(EntityId::from("pay"), now())
            .expect_err("paid without date rejected");
        assert!(errors.has_field("paymentDate"));
    }

    #[test]
    fn marking_paid_accepts_browser_timestamp() {
        let draft: PaymentDraft = serde_json::from_value(json!({
            "leaseId": "lease-1",
            "amount": "2800.00",
            "dueDate": "2025-01-01"
        }))
        .unwrap();
        let mut payment = draft.into_payment(EntityId::from("pay"), now()).unwrap();

        let patch: PaymentDraft = serde_json::from_value(json!({
            "status": "PAID",
            "paymentDate": "2025-01-03T18:22:10.512Z"
        }))
        .unwrap();
        patch.apply_to(&mut payment).expect("patch applies");
        assert_eq!(payment.status, PaymentStatus::Paid);
        assert_eq!(payment.payment_date, NaiveDate::from_ymd_opt(2025, 1, 3));
    }

    #[test]
    fn completing_a_request_stamps_completion_time() {
        let draft: MaintenanceRequestDraft = serde_json::from_value(json!({
            "propertyId": "prop-1",
            "tenantId": "tenant-1",
            "description": "Front door lock sticking"
        }))
        .unwrap();
        let mut request = draft.into_request(EntityId::from("m"), now()).unwrap();
        assert_eq!(request.status, MaintenanceStatus::Pending);
        assert_eq!(request.priority, MaintenancePriority::Medium);
        assert_eq!(request.completed_date, None);

        let patch = MaintenanceRequestDraft {
            status: Some(MaintenanceStatus::Completed),
            ..Default::default()
        };
        patch.apply_to(&mut request, now()).unwrap();
        assert_eq!(request.completed_date, Some(now()));
    }

    #[test]
    fn blank_patch_values_are_rejected() {
        let mut document = DocumentDraft {
            lease_id: Some(EntityId::from("lease-1")),
            file_name: Some("lease.pdf".to_string()),
            file_url: Some("https://files.example.com/lease.pdf".to_string()),
            document_type: Some("LEASE".to_string()),
        }
        .into_document(EntityId::from("d"), now())
        .unwrap();

        let patch = DocumentDraft {
            file_name: Some("   ".to_string()),
            ..Default::default()
        };
        let errors = patch.apply_to(&mut document).expect_err("blank name rejected");
        assert!(errors.has_field("fileName"));
        assert_eq!(document.file_name, "lease.pdf");
    }
}
