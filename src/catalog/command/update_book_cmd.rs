use std::sync::Arc;
use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use tracing::warn;
use crate::books::dto::{BookDto, BookPatch};
use crate::books::schema::{normalize, UPDATE_BOOK_SCHEMA, validate, Validation};
use crate::catalog::domain::CatalogService;
use crate::core::command::{Command, CommandError};

const IMMUTABLE_FIELD: &str = "isbn";

pub(crate) struct UpdateBookCommand {
    catalog_service: Arc<dyn CatalogService>,
}

impl UpdateBookCommand {
    pub(crate) fn new(catalog_service: Arc<dyn CatalogService>) -> Self {
        Self {
            catalog_service,
        }
    }
}

#[derive(Debug)]
pub(crate) struct UpdateBookCommandRequest {
    pub isbn: String,
    pub payload: Value,
}

impl UpdateBookCommandRequest {
    pub fn new(isbn: &str, payload: Value) -> Self {
        Self {
            isbn: isbn.to_string(),
            payload,
        }
    }

    // isbn is checked before the schema so the caller always sees the fixed message
    pub fn build_patch(self) -> Result<(String, BookPatch), CommandError> {
        if self.payload.get(IMMUTABLE_FIELD).is_some() {
            warn!(isbn = %self.isbn, "rejected isbn change");
            return Err(CommandError::immutable_field(IMMUTABLE_FIELD));
        }
        if let Validation::Invalid(errors) = validate(&self.payload, &UPDATE_BOOK_SCHEMA) {
            warn!(isbn = %self.isbn, ?errors, "rejected book update");
            return Err(CommandError::validation(errors));
        }
        let patch = serde_json::from_value(normalize(self.payload, &UPDATE_BOOK_SCHEMA))?;
        Ok((self.isbn, patch))
    }
}

#[derive(Debug, Serialize)]
pub struct UpdateBookCommandResponse {
    pub book: BookDto,
}

impl UpdateBookCommandResponse {
    pub fn new(book: BookDto) -> Self {
        Self {
            book,
        }
    }
}

#[async_trait]
impl Command<UpdateBookCommandRequest, UpdateBookCommandResponse> for UpdateBookCommand {
    async fn execute(&self, req: UpdateBookCommandRequest) -> Result<UpdateBookCommandResponse, CommandError> {
        let (isbn, patch) = req.build_patch()?;
        self.catalog_service.update_book(isbn.as_str(), &patch)
            .await.map_err(CommandError::from).map(UpdateBookCommandResponse::new)
    }
}
