pub mod memory_book_repository;
pub mod pg_book_repository;

use crate::books::domain::filter::BookFilter;
use crate::books::domain::model::BookEntity;
use crate::books::dto::BookPatch;
use crate::core::library::LibraryError;
use crate::core::repository::Repository;

pub trait BookRepository: Repository<BookEntity, BookPatch, BookFilter> {}

pub(crate) fn book_not_found(isbn: &str) -> LibraryError {
    LibraryError::not_found(format!("There is no book with an isbn '{}'", isbn).as_str())
}

pub(crate) fn book_already_exists(isbn: &str) -> LibraryError {
    LibraryError::duplicate_key(format!("A book with isbn '{}' already exists", isbn).as_str())
}
