use async_trait::async_trait;
use tracing::debug;
use crate::books::domain::filter::BookFilter;
use crate::books::domain::model::BookEntity;
use crate::books::dto::{BookDto, BookPatch, NewBook};
use crate::books::repository::BookRepository;
use crate::catalog::domain::CatalogService;
use crate::core::library::LibraryResult;

pub(crate) struct CatalogServiceImpl {
    book_repository: Box<dyn BookRepository>,
}

impl CatalogServiceImpl {
    pub(crate) fn new(book_repository: Box<dyn BookRepository>) -> Self {
        Self {
            book_repository,
        }
    }
}

#[async_trait]
impl CatalogService for CatalogServiceImpl {
    async fn add_book(&self, book: NewBook) -> LibraryResult<BookDto> {
        debug!(isbn = %book.isbn, "adding book");
        let created = self.book_repository.create(&BookEntity::from(book)).await?;
        Ok(BookDto::from(&created))
    }

    async fn remove_book(&self, isbn: &str) -> LibraryResult<()> {
        debug!(isbn, "removing book");
        self.book_repository.delete(isbn).await.map(|_| ())
    }

    async fn update_book(&self, isbn: &str, patch: &BookPatch) -> LibraryResult<BookDto> {
        debug!(isbn, ?patch, "updating book");
        self.book_repository.update(isbn, patch).await.map(|b| BookDto::from(&b))
    }

    async fn find_book_by_isbn(&self, isbn: &str) -> LibraryResult<BookDto> {
        self.book_repository.get(isbn).await.map(|b| BookDto::from(&b))
    }

    async fn find_books(&self, filter: &BookFilter) -> LibraryResult<Vec<BookDto>> {
        let records = self.book_repository.query(filter).await?;
        debug!(?filter, count = records.len(), "found books");
        Ok(records.iter().map(BookDto::from).collect())
    }
}
