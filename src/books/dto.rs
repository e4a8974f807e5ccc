use serde::{Deserialize, Serialize};
use crate::books::domain::model::BookEntity;

// BookDto is a data transfer object for Catalog service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookDto {
    pub isbn: String,
    pub amazon_url: String,
    pub author: String,
    pub language: String,
    pub pages: i32,
    pub publisher: String,
    pub title: String,
    pub year: i32,
}

// NewBook is the typed create payload, only built from a body that passed the new book schema
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NewBook {
    pub isbn: String,
    pub amazon_url: String,
    pub author: String,
    pub language: String,
    pub pages: i32,
    pub publisher: String,
    pub title: String,
    pub year: i32,
}

// BookPatch carries the fields supplied on update; isbn is deliberately absent
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BookPatch {
    pub amazon_url: Option<String>,
    pub author: Option<String>,
    pub language: Option<String>,
    pub pages: Option<i32>,
    pub publisher: Option<String>,
    pub title: Option<String>,
    pub year: Option<i32>,
}

impl BookPatch {
    pub fn is_empty(&self) -> bool {
        self == &BookPatch::default()
    }
}

impl From<&BookEntity> for BookDto {
    fn from(other: &BookEntity) -> Self {
        Self {
            isbn: other.isbn.to_string(),
            amazon_url: other.amazon_url.to_string(),
            author: other.author.to_string(),
            language: other.language.to_string(),
            pages: other.pages,
            publisher: other.publisher.to_string(),
            title: other.title.to_string(),
            year: other.year,
        }
    }
}

impl From<NewBook> for BookEntity {
    fn from(other: NewBook) -> Self {
        Self {
            isbn: other.isbn,
            amazon_url: other.amazon_url,
            author: other.author,
            language: other.language,
            pages: other.pages,
            publisher: other.publisher,
            title: other.title,
            year: other.year,
        }
    }
}
