use crate::config::ConfigError;
use crate::portfolio::{PortfolioError, RepositoryError};
use crate::telemetry::TelemetryError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Io(std::io::Error),
    Server(axum::Error),
    Store(RepositoryError),
    Portfolio(PortfolioError),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Io(err) => write!(f, "io error: {}", err),
            AppError::Server(err) => write!(f, "server error: {}", err),
            AppError::Store(err) => write!(f, "store error: {}", err),
            AppError::Portfolio(err) => write!(f, "portfolio error: {}", err),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Io(err) => Some(err),
            AppError::Server(err) => Some(err),
            AppError::Store(err) => Some(err),
            AppError::Portfolio(err) => Some(err),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Portfolio(err) => err.into_response(),
            AppError::Store(err) => PortfolioError::from(err).into_response(),
            other => {
                let body = Json(json!({ "message": other.to_string() }));
                (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
            }
        }
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<axum::Error> for AppError {
    fn from(value: axum::Error) -> Self {
        Self::Server(value)
    }
}

impl From<RepositoryError> for AppError {
    fn from(value: RepositoryError) -> Self {
        Self::Store(value)
    }
}

impl From<PortfolioError> for AppError {
    fn from(value: PortfolioError) -> Self {
        Self::Portfolio(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::portfolio::{EntityId, RecordKind};

    #[test]
    fn store_errors_keep_their_http_mapping() {
        let missing = AppError::from(RepositoryError::NotFound {
            kind: RecordKind::Lease,
            id: EntityId::from("lease-9"),
        });
        assert_eq!(missing.into_response().status(), StatusCode::NOT_FOUND);

        let offline = AppError::from(RepositoryError::Unavailable("offline".to_string()));
        assert_eq!(offline.into_response().status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn process_errors_are_internal() {
        let err = AppError::from(std::io::Error::new(std::io::ErrorKind::AddrInUse, "busy"));
        assert_eq!(err.to_string(), "io error: busy");
        assert_eq!(
            err.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
