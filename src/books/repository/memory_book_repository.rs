use std::cmp::Ordering;
use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::books::domain::filter::BookFilter;
use crate::books::domain::model::BookEntity;
use crate::books::dto::BookPatch;
use crate::books::repository::{book_already_exists, book_not_found, BookRepository};
use crate::core::domain::Identifiable;
use crate::core::library::LibraryResult;
use crate::core::repository::Repository;

// In-process store keyed by isbn, used for tests and the `memory` store mode.
#[derive(Debug, Default)]
pub struct InMemoryBookRepository {
    books: RwLock<BTreeMap<String, BookEntity>>,
}

impl InMemoryBookRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Repository<BookEntity, BookPatch, BookFilter> for InMemoryBookRepository {
    async fn create(&self, entity: &BookEntity) -> LibraryResult<BookEntity> {
        let mut books = self.books.write().await;
        if books.contains_key(&entity.id()) {
            return Err(book_already_exists(&entity.isbn));
        }
        books.insert(entity.id(), entity.clone());
        Ok(entity.clone())
    }

    async fn update(&self, id: &str, patch: &BookPatch) -> LibraryResult<BookEntity> {
        let mut books = self.books.write().await;
        let book = books.get_mut(id).ok_or_else(|| book_not_found(id))?;
        book.apply(patch);
        Ok(book.clone())
    }

    async fn get(&self, id: &str) -> LibraryResult<BookEntity> {
        self.books.read().await.get(id).cloned().ok_or_else(|| book_not_found(id))
    }

    async fn delete(&self, id: &str) -> LibraryResult<usize> {
        self.books.write().await.remove(id).map(|_| 1).ok_or_else(|| book_not_found(id))
    }

    async fn query(&self, predicate: &BookFilter) -> LibraryResult<Vec<BookEntity>> {
        let books = self.books.read().await;
        let mut records: Vec<BookEntity> = books.values()
            .filter(|book| predicate.matches(book))
            .cloned()
            .collect();
        records.sort_by(listing_order);
        Ok(records)
    }
}

impl BookRepository for InMemoryBookRepository {}

// case-insensitive title first, then exact title and isbn to break ties
fn listing_order(a: &BookEntity, b: &BookEntity) -> Ordering {
    a.title.to_lowercase().cmp(&b.title.to_lowercase())
        .then_with(|| a.title.cmp(&b.title))
        .then_with(|| a.isbn.cmp(&b.isbn))
}
