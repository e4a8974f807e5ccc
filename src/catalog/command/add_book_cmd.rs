use std::sync::Arc;
use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use tracing::warn;
use crate::books::dto::{BookDto, NewBook};
use crate::books::schema::{NEW_BOOK_SCHEMA, normalize, validate, Validation};
use crate::catalog::domain::CatalogService;
use crate::core::command::{Command, CommandError};

pub(crate) struct AddBookCommand {
    catalog_service: Arc<dyn CatalogService>,
}

impl AddBookCommand {
    pub(crate) fn new(catalog_service: Arc<dyn CatalogService>) -> Self {
        Self {
            catalog_service,
        }
    }
}

#[derive(Debug)]
pub(crate) struct AddBookCommandRequest {
    pub(crate) payload: Value,
}

impl AddBookCommandRequest {
    pub fn new(payload: Value) -> Self {
        Self {
            payload,
        }
    }

    // the payload only becomes a NewBook after it passed the new book schema
    pub fn build_book(self) -> Result<NewBook, CommandError> {
        if let Validation::Invalid(errors) = validate(&self.payload, &NEW_BOOK_SCHEMA) {
            warn!(?errors, "rejected new book");
            return Err(CommandError::validation(errors));
        }
        Ok(serde_json::from_value(normalize(self.payload, &NEW_BOOK_SCHEMA))?)
    }
}

#[derive(Debug, Serialize)]
pub struct AddBookCommandResponse {
    pub book: BookDto,
}

impl AddBookCommandResponse {
    pub fn new(book: BookDto) -> Self {
        Self {
            book,
        }
    }
}

#[async_trait]
impl Command<AddBookCommandRequest, AddBookCommandResponse> for AddBookCommand {
    async fn execute(&self, req: AddBookCommandRequest) -> Result<AddBookCommandResponse, CommandError> {
        let book = req.build_book()?;
        self.catalog_service.add_book(book).await.map_err(CommandError::from).map(AddBookCommandResponse::new)
    }
}
