use thiserror::Error;

#[derive(Debug, Error)]
pub enum LibraryError {
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
    NotFound {
        message: String,
    },
    // The store could not be reached (pool exhausted, connection dropped). The caller can
    // retry the same request with or without a backoff.
    #[error("{message} {reason_code:?} {retryable}")]
    CurrentlyUnavailable {
        message: String,
        reason_code: Option<String>,
        retryable: bool,
    },
    #[error("{message} {errors:?}")]
    Validation {
        message: String,
        errors: Vec<String>,
    },
    #[error("{message}")]
    Serialization {
        message: String,
    },
    #[error("{message} {reason_code:?}")]
    Runtime {
        message: String,
        reason_code: Option<String>,
    },
}

impl LibraryError {
    pub fn database(message: &str, reason_code: Option<String>, retryable: bool) -> LibraryError {
        LibraryError::Database { message: message.to_string(), reason_code, retryable }
    }

    pub fn duplicate_key(message: &str) -> LibraryError {
        LibraryError::DuplicateKey { message: message.to_string() }
    }

    pub fn not_found(message: &str) -> LibraryError {
        LibraryError::NotFound { message: message.to_string() }
    }

    pub fn unavailable(message: &str, reason_code: Option<String>, retryable: bool) -> LibraryError {
        LibraryError::CurrentlyUnavailable { message: message.to_string(), reason_code, retryable }
    }

    pub fn validation(message: &str, errors: Vec<String>) -> LibraryError {
        LibraryError::Validation { message: message.to_string(), errors }
    }

    pub fn serialization(message: &str) -> LibraryError {
        LibraryError::Serialization { message: message.to_string() }
    }

    pub fn runtime(message: &str, reason_code: Option<String>) -> LibraryError {
        LibraryError::Runtime { message: message.to_string(), reason_code }
    }
}

impl From<std::io::Error> for LibraryError {
    fn from(err: std::io::Error) -> Self {
        LibraryError::runtime(
            format!("io {:?}", err).as_str(), None)
    }
}

impl From<serde_json::Error> for LibraryError {
    fn from(err: serde_json::Error) -> Self {
        LibraryError::serialization(
            format!("serde json parsing {}", err).as_str())
    }
}

/// A specialized Result type for the store and domain layers.
pub type LibraryResult<T> = Result<T, LibraryError>;
