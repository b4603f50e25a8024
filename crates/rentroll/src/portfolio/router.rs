use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use chrono::Utc;
use serde_json::json;
use tracing::error;

use crate::dashboard::{DashboardMetrics, PortfolioReport};

use super::domain::{
    Document, EntityId, Lease, MaintenanceRequest, Payment, Property, Tenant,
};
use super::repository::PortfolioStore;
use super::resource::Resource;
use super::service::{PortfolioError, PortfolioService};
use super::validation::ValidationErrors;

type SharedService<S> = Arc<PortfolioService<S>>;

/// Router exposing CRUD for every record family plus the dashboard endpoints.
pub fn portfolio_router<S>(service: SharedService<S>) -> Router
where
    S: PortfolioStore + 'static,
{
    Router::new()
        .merge(resource_routes::<S, Property>("/api/properties"))
        .merge(resource_routes::<S, Tenant>("/api/tenants"))
        .merge(resource_routes::<S, Lease>("/api/leases"))
        .merge(resource_routes::<S, Payment>("/api/payments"))
        .merge(resource_routes::<S, MaintenanceRequest>("/api/maintenance-requests"))
        .merge(resource_routes::<S, Document>("/api/documents"))
        .route("/api/dashboard/metrics", get(dashboard_handler::<S>))
        .route("/api/payments/overdue", get(overdue_handler::<S>))
        .route(
            "/api/maintenance-requests/high-priority",
            get(high_priority_handler::<S>),
        )
        .route("/api/reports/summary", get(report_handler::<S>))
        .route("/api/reports/export", get(export_handler::<S>))
        .with_state(service)
}

fn resource_routes<S, E>(path: &str) -> Router<SharedService<S>>
where
    S: PortfolioStore + 'static,
    E: Resource,
{
    Router::new()
        .route(path, get(list_handler::<S, E>).post(create_handler::<S, E>))
        .route(
            &format!("{path}/:id"),
            get(fetch_handler::<S, E>)
                .put(update_handler::<S, E>)
                .delete(delete_handler::<S, E>),
        )
}

pub(crate) async fn list_handler<S, E>(
    State(service): State<SharedService<S>>,
) -> Result<Json<Vec<E>>, PortfolioError>
where
    S: PortfolioStore + 'static,
    E: Resource,
{
    Ok(Json(service.list::<E>()?))
}

pub(crate) async fn fetch_handler<S, E>(
    State(service): State<SharedService<S>>,
    Path(id): Path<String>,
) -> Result<Json<E>, PortfolioError>
where
    S: PortfolioStore + 'static,
    E: Resource,
{
    Ok(Json(service.get::<E>(&EntityId(id))?))
}

pub(crate) async fn create_handler<S, E>(
    State(service): State<SharedService<S>>,
    payload: Result<Json<E::Draft>, JsonRejection>,
) -> Result<(StatusCode, Json<E>), PortfolioError>
where
    S: PortfolioStore + 'static,
    E: Resource,
{
    let Json(draft) = payload.map_err(rejected_body)?;
    let record = service.create::<E>(draft)?;
    Ok((StatusCode::CREATED, Json(record)))
}

pub(crate) async fn update_handler<S, E>(
    State(service): State<SharedService<S>>,
    Path(id): Path<String>,
    payload: Result<Json<E::Draft>, JsonRejection>,
) -> Result<Json<E>, PortfolioError>
where
    S: PortfolioStore + 'static,
    E: Resource,
{
    let Json(patch) = payload.map_err(rejected_body)?;
    Ok(Json(service.update::<E>(&EntityId(id), patch)?))
}

pub(crate) async fn delete_handler<S, E>(
    State(service): State<SharedService<S>>,
    Path(id): Path<String>,
) -> Result<StatusCode, PortfolioError>
where
    S: PortfolioStore + 'static,
    E: Resource,
{
    service.delete::<E>(&EntityId(id))?;
    Ok(StatusCode::NO_CONTENT)
}

pub(crate) async fn dashboard_handler<S>(
    State(service): State<SharedService<S>>,
) -> Result<Json<DashboardMetrics>, PortfolioError>
where
    S: PortfolioStore + 'static,
{
    Ok(Json(service.dashboard_metrics()?))
}

pub(crate) async fn overdue_handler<S>(
    State(service): State<SharedService<S>>,
) -> Result<Json<Vec<Payment>>, PortfolioError>
where
    S: PortfolioStore + 'static,
{
    let today = Utc::now().date_naive();
    Ok(Json(service.overdue_payments(today)?))
}

pub(crate) async fn high_priority_handler<S>(
    State(service): State<SharedService<S>>,
) -> Result<Json<Vec<MaintenanceRequest>>, PortfolioError>
where
    S: PortfolioStore + 'static,
{
    Ok(Json(service.high_priority_requests()?))
}

pub(crate) async fn report_handler<S>(
    State(service): State<SharedService<S>>,
) -> Result<Json<PortfolioReport>, PortfolioError>
where
    S: PortfolioStore + 'static,
{
    Ok(Json(service.report()?))
}

pub(crate) async fn export_handler<S>(
    State(service): State<SharedService<S>>,
) -> Result<Response, PortfolioError>
where
    S: PortfolioStore + 'static,
{
    let csv = service.report()?.to_csv()?;
    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"portfolio-report.csv\"",
            ),
        ],
        csv,
    )
        .into_response())
}

fn rejected_body(rejection: JsonRejection) -> PortfolioError {
    PortfolioError::Validation(ValidationErrors::single("body", rejection.body_text()))
}

impl IntoResponse for PortfolioError {
    fn into_response(self) -> Response {
        match self {
            PortfolioError::Validation(errors) => {
                let payload = json!({
                    "message": "Invalid data",
                    "errors": errors.errors(),
                });
                (StatusCode::BAD_REQUEST, Json(payload)).into_response()
            }
            PortfolioError::NotFound { kind, .. } => {
                let payload = json!({ "message": format!("{kind} not found") });
                (StatusCode::NOT_FOUND, Json(payload)).into_response()
            }
            PortfolioError::Conflict { .. } => {
                let payload = json!({ "message": self.to_string() });
                (StatusCode::CONFLICT, Json(payload)).into_response()
            }
            PortfolioError::StoreUnavailable(ref reason) => {
                error!(%reason, "portfolio store unavailable");
                let payload = json!({ "message": "Portfolio store unavailable" });
                (StatusCode::BAD_GATEWAY, Json(payload)).into_response()
            }
            PortfolioError::Report(ref err) => {
                error!(error = %err, "failed to render portfolio report");
                let payload = json!({ "message": "Failed to render report" });
                (StatusCode::INTERNAL_SERVER_ERROR, Json(payload)).into_response()
            }
        }
    }
}
