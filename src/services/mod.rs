//! Business operations invoked by the routes.
//!
//! Services receive the session user explicitly, enforce capabilities and
//! talk to the backend through the [`EntityStore`](crate::api::EntityStore)
//! and [`PageSource`](crate::listing::PageSource) seams.

use thiserror::Error;

use crate::api::errors::ApiError;
use crate::domain::maintenance::MaintenanceStatus;
use crate::domain::types::TypeConstraintError;
use crate::forms::FormError;

pub mod auth;
pub mod dashboard;
pub mod entity;
pub mod list;
pub mod maintenance;
pub mod search;
pub mod vehicles;
pub mod workshops;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("unauthorized")]
    Unauthorized,

    #[error("not found")]
    NotFound,

    /// User-facing validation message.
    #[error("{0}")]
    Form(String),

    #[error(transparent)]
    Api(ApiError),

    #[error(transparent)]
    TypeConstraint(#[from] TypeConstraintError),

    #[error("cannot move from {from} to {to}")]
    InvalidTransition {
        from: MaintenanceStatus,
        to: MaintenanceStatus,
    },
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl From<ApiError> for ServiceError {
    fn from(err: ApiError) -> Self {
        if err.is_not_found() {
            ServiceError::NotFound
        } else if err.is_unauthorized() {
            ServiceError::Unauthorized
        } else {
            ServiceError::Api(err)
        }
    }
}

impl From<serde_json::Error> for ServiceError {
    fn from(err: serde_json::Error) -> Self {
        ServiceError::Api(ApiError::from(err))
    }
}

impl From<FormError> for ServiceError {
    fn from(err: FormError) -> Self {
        let message = match err {
            FormError::Validation(_) => "Revise los campos del formulario.".to_string(),
            FormError::InvalidEmail => "Email inválido.".to_string(),
            FormError::InvalidPlate => "Placa inválida.".to_string(),
            FormError::InvalidVehicleId => "Vehículo inválido.".to_string(),
            FormError::InvalidClientId => "Cliente inválido.".to_string(),
            FormError::InvalidWorkshopId => "Taller inválido.".to_string(),
            FormError::InvalidStatus(status) => format!("Estado desconocido: {status}."),
        };
        ServiceError::Form(message)
    }
}

#[cfg(test)]
mod tests {
    use reqwest::StatusCode;

    use super::*;

    #[test]
    fn backend_statuses_map_to_service_errors() {
        let not_found = ApiError::Status {
            status: StatusCode::NOT_FOUND,
            message: "missing".to_string(),
        };
        assert!(matches!(
            ServiceError::from(not_found),
            ServiceError::NotFound
        ));

        let forbidden = ApiError::Status {
            status: StatusCode::FORBIDDEN,
            message: "no".to_string(),
        };
        assert!(matches!(
            ServiceError::from(forbidden),
            ServiceError::Unauthorized
        ));

        let server = ApiError::Status {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: "boom".to_string(),
        };
        assert_eq!(
            ServiceError::from(server).to_string(),
            "fetch failed: 500 Internal Server Error: boom"
        );
    }
}
