pub mod service;

use async_trait::async_trait;
use crate::books::domain::filter::BookFilter;
use crate::books::dto::{BookDto, BookPatch, NewBook};
use crate::core::library::LibraryResult;

#[async_trait]
pub trait CatalogService: Sync + Send {
    async fn add_book(&self, book: NewBook) -> LibraryResult<BookDto>;
    async fn remove_book(&self, isbn: &str) -> LibraryResult<()>;
    async fn update_book(&self, isbn: &str, patch: &BookPatch) -> LibraryResult<BookDto>;
    async fn find_book_by_isbn(&self, isbn: &str) -> LibraryResult<BookDto>;
    async fn find_books(&self, filter: &BookFilter) -> LibraryResult<Vec<BookDto>>;
}
