use std::sync::Arc;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde::Serialize;
use tracing::error;
use crate::catalog::domain::CatalogService;
use crate::core::command::CommandError;

#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<dyn CatalogService>,
}

impl AppState {
    pub fn new(catalog: Box<dyn CatalogService>) -> AppState {
        AppState {
            catalog: Arc::from(catalog),
        }
    }
}

// ServerError is the single place where failures become an HTTP status and JSON body
#[derive(Debug, PartialEq)]
pub struct ServerError {
    pub status: StatusCode,
    pub message: String,
    pub errors: Vec<String>,
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: ErrorDetail<'a>,
}

#[derive(Serialize)]
struct ErrorDetail<'a> {
    status: u16,
    message: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    errors: Option<&'a [String]>,
}

impl ServerError {
    pub fn new(status: StatusCode, message: &str) -> Self {
        ServerError { status, message: message.to_string(), errors: vec![] }
    }

    pub fn not_found() -> Self {
        ServerError::new(StatusCode::NOT_FOUND, "Not Found")
    }

    fn internal(err: &CommandError) -> Self {
        error!(error = %err, "unexpected failure");
        ServerError::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: ErrorDetail {
                status: self.status.as_u16(),
                message: self.message.as_str(),
                errors: Some(self.errors.as_slice()).filter(|errors| !errors.is_empty()),
            },
        };
        (self.status, Json(body)).into_response()
    }
}

pub fn json_to_server_error(err: JsonRejection) -> ServerError {
    ServerError::from(CommandError::Serialization { message: err.body_text() })
}

pub fn query_to_server_error(err: QueryRejection) -> ServerError {
    ServerError::from(CommandError::Serialization { message: err.body_text() })
}

pub async fn fallback() -> ServerError {
    ServerError::not_found()
}

impl From<CommandError> for ServerError {
    fn from(err: CommandError) -> Self {
        match err {
            CommandError::Validation { message, errors } => {
                ServerError { status: StatusCode::BAD_REQUEST, message, errors }
            }
            CommandError::ImmutableField { message } => {
                ServerError::new(StatusCode::BAD_REQUEST, message.as_str())
            }
            CommandError::Serialization { message } => {
                ServerError::new(StatusCode::BAD_REQUEST, message.as_str())
            }
            CommandError::NotFound { message } => {
                ServerError::new(StatusCode::NOT_FOUND, message.as_str())
            }
            CommandError::DuplicateKey { message } => {
                ServerError::new(StatusCode::CONFLICT, message.as_str())
            }
            CommandError::Runtime { retryable: true, .. } => {
                error!(error = %err, "store unavailable");
                ServerError::new(StatusCode::SERVICE_UNAVAILABLE, "Service Unavailable")
            }
            CommandError::Runtime { .. } | CommandError::Database { .. } => {
                ServerError::internal(&err)
            }
        }
    }
}
