use async_trait::async_trait;
use thiserror::Error;
use crate::core::library::LibraryError;

#[derive(Debug, Error)]
pub enum CommandError {
    #[error("{message} {reason_code:?} {retryable}")]
    Database {
        message: String,
        reason_code: Option<String>,
        retryable: bool,
    },
    #[error("{message}")]
    DuplicateKey {
        message: String,
    },
    #[error("{message}")]
    ImmutableField {
        message: String,
    },
    #[error("{message}")]
    NotFound {
        message: String,
    },
    #[error("{message} {reason_code:?} {retryable}")]
    Runtime {
        message: String,
        reason_code: Option<String>,
        retryable: bool,
    },
    #[error("{message}")]
    Serialization {
        message: String,
    },
    #[error("{message} {errors:?}")]
    Validation {
        message: String,
        errors: Vec<String>,
    },
}

impl CommandError {
    pub fn immutable_field(field: &str) -> CommandError {
        CommandError::ImmutableField { message: format!("Not allowed to update {}", field.to_uppercase()) }
    }

    pub fn validation(errors: Vec<String>) -> CommandError {
        CommandError::Validation { message: "Bad Request".to_string(), errors }
    }
}

#[async_trait]
pub trait Command<Request, Response> {
    async fn execute(&self, req: Request) -> Result<Response, CommandError>;
}

impl From<LibraryError> for CommandError {
    fn from(other: LibraryError) -> Self {
        match other {
            LibraryError::Database { message, reason_code, retryable } => {
                CommandError::Database { message, reason_code, retryable }
            }
            LibraryError::DuplicateKey { message } => {
                CommandError::DuplicateKey { message }
            }
            LibraryError::NotFound { message } => {
                CommandError::NotFound { message }
            }
            LibraryError::CurrentlyUnavailable { message, reason_code, retryable } => {
                CommandError::Runtime { message, reason_code, retryable }
            }
            LibraryError::Validation { message, errors } => {
                CommandError::Validation { message, errors }
            }
            LibraryError::Serialization { message } => {
                CommandError::Serialization { message }
            }
            LibraryError::Runtime { message, reason_code } => {
                CommandError::Runtime { message, reason_code, retryable: false }
            }
        }
    }
}

impl From<serde_json::Error> for CommandError {
    fn from(err: serde_json::Error) -> Self {
        CommandError::from(LibraryError::from(err))
    }
}
