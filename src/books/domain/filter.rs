use std::collections::HashMap;
use crate::books::domain::model::BookEntity;
use crate::core::library::{LibraryError, LibraryResult};

/// Explicit filter for listing books. Every supplied criterion must hold.
///
/// `title` and `author` are case-insensitive substring matches, `language`, `publisher`
/// and `year` are exact matches.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookFilter {
    pub title: Option<String>,
    pub author: Option<String>,
    pub language: Option<String>,
    pub publisher: Option<String>,
    pub year: Option<i32>,
}

impl BookFilter {
    // builds a filter from raw query parameters; unknown keys are dropped here so they never
    // reach query construction
    pub fn from_query(params: &HashMap<String, String>) -> LibraryResult<Self> {
        let mut filter = BookFilter::default();
        let mut errors = vec![];
        for (key, value) in params {
            match key.as_str() {
                "title" => filter.title = Some(value.clone()),
                "author" => filter.author = Some(value.clone()),
                "language" => filter.language = Some(value.clone()),
                "publisher" => filter.publisher = Some(value.clone()),
                "year" => match value.trim().parse::<i32>() {
                    Ok(year) => filter.year = Some(year),
                    Err(_) => errors.push(format!("query.year is not of a type(s) integer: {:?}", value)),
                },
                _ => {}
            }
        }
        if !errors.is_empty() {
            return Err(LibraryError::validation("Bad Request", errors));
        }
        Ok(filter)
    }

    pub fn is_empty(&self) -> bool {
        self == &BookFilter::default()
    }

    pub fn matches(&self, book: &BookEntity) -> bool {
        contains_ignore_case(&book.title, self.title.as_deref()) &&
            contains_ignore_case(&book.author, self.author.as_deref()) &&
            self.language.as_ref().map_or(true, |language| &book.language == language) &&
            self.publisher.as_ref().map_or(true, |publisher| &book.publisher == publisher) &&
            self.year.map_or(true, |year| book.year == year)
    }
}

fn contains_ignore_case(haystack: &str, needle: Option<&str>) -> bool {
    match needle {
        Some(needle) => haystack.to_lowercase().contains(&needle.to_lowercase()),
        None => true,
    }
}
