use serde::{Deserialize, Serialize};
use crate::books::dto::BookPatch;
use crate::core::domain::Identifiable;

// BookEntity is a row of the books table; isbn is the primary key and never changes
// once the row exists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookEntity {
    pub isbn: String,
    pub amazon_url: String,
    pub author: String,
    pub language: String,
    pub pages: i32,
    pub publisher: String,
    pub title: String,
    pub year: i32,
}

impl BookEntity {
    // merges the supplied fields of a patch, leaving the others untouched
    pub fn apply(&mut self, patch: &BookPatch) {
        if let Some(amazon_url) = &patch.amazon_url {
            self.amazon_url = amazon_url.clone();
        }
        if let Some(author) = &patch.author {
            self.author = author.clone();
        }
        if let Some(language) = &patch.language {
            self.language = language.clone();
        }
        if let Some(pages) = patch.pages {
            self.pages = pages;
        }
        if let Some(publisher) = &patch.publisher {
            self.publisher = publisher.clone();
        }
        if let Some(title) = &patch.title {
            self.title = title.clone();
        }
        if let Some(year) = patch.year {
            self.year = year;
        }
    }
}

impl Identifiable for BookEntity {
    fn id(&self) -> String {
        self.isbn.to_string()
    }
}
