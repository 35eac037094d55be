use crate::db::DatabaseError;
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde_json::json;
use thiserror::Error;
use tracing::{error, warn};

pub const DUPLICATE_CATEGORY_MESSAGE: &str = "Categoria já existe";
pub const PRODUCT_NOT_FOUND_MESSAGE: &str = "Produto não encontrado";
pub const UNAVAILABLE_MESSAGE: &str = "Banco de dados indisponível";

#[derive(Error, Debug)]
pub enum Error {
    #[error("configuration error: {0}")]
    ConfigurationError(#[from] ConfigurationError),
    #[error("socket address parsing error: {0}")]
    SocketAddressParsingError(#[from] std::net::AddrParseError),
    #[error("io error: {0}")]
    IoError(#[from] std::io::Error),
    #[error(transparent)]
    AppErrors(#[from] AppErrors),
}

#[derive(Error, Debug)]
pub enum ConfigurationError {
    #[error("unknown database type")]
    UnknownDatabaseType,
    #[error("relational database settings are incomplete")]
    MissingDatabaseSettings,
    #[error("{0} is not a supported environment. Use either `dev` or `prod`.")]
    UnknownEnvironment(String),
    #[error("invalid port: {0}")]
    InvalidPort(String),
    #[error("unknown locale: {0}")]
    UnknownLocale(String),
    #[error("failed to read configuration: {0}")]
    Source(#[from] config::ConfigError),
}

/// Request-level failures, rendered as `{"error": "..."}` bodies.
#[derive(Error, Debug)]
pub enum AppErrors {
    #[error("database error: {0}")]
    DatabaseError(#[from] DatabaseError),
    #[error("validation error: {0}")]
    ValidationError(#[from] validator::ValidationErrors),
    #[error("configuration error: {0}")]
    ConfigurationError(#[from] ConfigurationError),
    #[error("invalid request body: {0}")]
    InvalidBody(#[from] JsonRejection),
    #[error("invalid path: {0}")]
    InvalidPath(#[from] PathRejection),
}

impl AppErrors {
    fn status_and_message(&self) -> (StatusCode, String) {
        match self {
            AppErrors::DatabaseError(DatabaseError::DuplicateCategory) => {
                (StatusCode::BAD_REQUEST, DUPLICATE_CATEGORY_MESSAGE.to_string())
            }
            AppErrors::DatabaseError(DatabaseError::ProductNotFound(_)) => {
                (StatusCode::NOT_FOUND, PRODUCT_NOT_FOUND_MESSAGE.to_string())
            }
            AppErrors::DatabaseError(
                DatabaseError::Unavailable | DatabaseError::RetriesExhausted { .. },
            ) => (
                StatusCode::SERVICE_UNAVAILABLE,
                UNAVAILABLE_MESSAGE.to_string(),
            ),
            AppErrors::ValidationError(errors) => {
                let message = errors
                    .field_errors()
                    .values()
                    .flat_map(|errors| errors.iter())
                    .filter_map(|error| error.message.as_ref().map(|m| m.to_string()))
                    .next()
                    .unwrap_or_else(|| "Dados inválidos".to_string());
                (StatusCode::BAD_REQUEST, message)
            }
            AppErrors::InvalidBody(rejection) => (rejection.status(), rejection.body_text()),
            AppErrors::InvalidPath(rejection) => (rejection.status(), rejection.body_text()),
            AppErrors::DatabaseError(_) | AppErrors::ConfigurationError(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Erro interno do servidor".to_string(),
            ),
        }
    }
}

impl IntoResponse for AppErrors {
    fn into_response(self) -> Response {
        let (status, message) = self.status_and_message();
        if status.is_server_error() {
            error!("request failed: {self}");
        } else {
            warn!("request rejected: {self}");
        }
        (status, Json(json!({ "error": message }))).into_response()
    }
}
