use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Postgres, QueryBuilder, Row};

use crate::books::domain::filter::BookFilter;
use crate::books::domain::model::BookEntity;
use crate::books::dto::BookPatch;
use crate::books::repository::{book_already_exists, book_not_found, BookRepository};
use crate::core::library::{LibraryError, LibraryResult};
use crate::core::repository::Repository;

const COLUMNS: &str = "isbn, amazon_url, author, language, pages, publisher, title, year";

// byte-wise "C" collation keeps the order independent of the database locale and equal to
// the in-memory store
const ORDER_BY: &str = r#" ORDER BY lower(title) COLLATE "C", title COLLATE "C", isbn COLLATE "C""#;

#[derive(Debug)]
pub struct PgBookRepository {
    pool: PgPool,
    table_name: String,
}

impl PgBookRepository {
    pub fn new(pool: PgPool, table_name: &str) -> Self {
        Self {
            pool,
            table_name: table_name.to_string(),
        }
    }
}

#[async_trait]
impl Repository<BookEntity, BookPatch, BookFilter> for PgBookRepository {
    async fn create(&self, entity: &BookEntity) -> LibraryResult<BookEntity> {
        let sql = format!("INSERT INTO {} ({}) VALUES ($1, $2, $3, $4, $5, $6, $7, $8) RETURNING {}",
                          self.table_name, COLUMNS, COLUMNS);
        let row = sqlx::query(&sql)
            .bind(&entity.isbn)
            .bind(&entity.amazon_url)
            .bind(&entity.author)
            .bind(&entity.language)
            .bind(entity.pages)
            .bind(&entity.publisher)
            .bind(&entity.title)
            .bind(entity.year)
            .fetch_one(&self.pool)
            .await
            .map_err(|err| match LibraryError::from(err) {
                LibraryError::DuplicateKey { .. } => book_already_exists(&entity.isbn),
                other => other,
            })?;
        Ok(map_to_book(&row)?)
    }

    async fn update(&self, id: &str, patch: &BookPatch) -> LibraryResult<BookEntity> {
        if patch.is_empty() {
            return self.get(id).await;
        }
        let row = update_query(&self.table_name, id, patch)
            .build()
            .fetch_optional(&self.pool)
            .await?;
        match row {
            Some(row) => Ok(map_to_book(&row)?),
            None => Err(book_not_found(id)),
        }
    }

    async fn get(&self, id: &str) -> LibraryResult<BookEntity> {
        let sql = format!("SELECT {} FROM {} WHERE isbn = $1", COLUMNS, self.table_name);
        let row = sqlx::query(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        match row {
            Some(row) => Ok(map_to_book(&row)?),
            None => Err(book_not_found(id)),
        }
    }

    async fn delete(&self, id: &str) -> LibraryResult<usize> {
        let sql = format!("DELETE FROM {} WHERE isbn = $1", self.table_name);
        let res = sqlx::query(&sql)
            .bind(id)
            .execute(&self.pool)
            .await?;
        if res.rows_affected() == 0 {
            return Err(book_not_found(id));
        }
        Ok(res.rows_affected() as usize)
    }

    async fn query(&self, predicate: &BookFilter) -> LibraryResult<Vec<BookEntity>> {
        let rows = select_query(&self.table_name, predicate)
            .build()
            .fetch_all(&self.pool)
            .await?;
        rows.iter().map(|row| map_to_book(row).map_err(LibraryError::from)).collect()
    }
}

impl BookRepository for PgBookRepository {}

fn select_query(table_name: &str, filter: &BookFilter) -> QueryBuilder<'static, Postgres> {
    let mut builder = QueryBuilder::new(format!("SELECT {} FROM {}", COLUMNS, table_name));
    let mut sep = " WHERE ";
    if let Some(title) = &filter.title {
        builder.push(sep).push("title ILIKE ").push_bind(like_pattern(title));
        sep = " AND ";
    }
    if let Some(author) = &filter.author {
        builder.push(sep).push("author ILIKE ").push_bind(like_pattern(author));
        sep = " AND ";
    }
    if let Some(language) = &filter.language {
        builder.push(sep).push("language = ").push_bind(language.clone());
        sep = " AND ";
    }
    if let Some(publisher) = &filter.publisher {
        builder.push(sep).push("publisher = ").push_bind(publisher.clone());
        sep = " AND ";
    }
    if let Some(year) = filter.year {
        builder.push(sep).push("year = ").push_bind(year);
    }
    builder.push(ORDER_BY);
    builder
}

// Callers must not pass an empty patch, it would render an empty SET clause.
fn update_query(table_name: &str, isbn: &str, patch: &BookPatch) -> QueryBuilder<'static, Postgres> {
    let mut builder = QueryBuilder::new(format!("UPDATE {} SET ", table_name));
    {
        let mut fields = builder.separated(", ");
        if let Some(amazon_url) = &patch.amazon_url {
            fields.push("amazon_url = ").push_bind_unseparated(amazon_url.clone());
        }
        if let Some(author) = &patch.author {
            fields.push("author = ").push_bind_unseparated(author.clone());
        }
        if let Some(language) = &patch.language {
            fields.push("language = ").push_bind_unseparated(language.clone());
        }
        if let Some(pages) = patch.pages {
            fields.push("pages = ").push_bind_unseparated(pages);
        }
        if let Some(publisher) = &patch.publisher {
            fields.push("publisher = ").push_bind_unseparated(publisher.clone());
        }
        if let Some(title) = &patch.title {
            fields.push("title = ").push_bind_unseparated(title.clone());
        }
        if let Some(year) = patch.year {
            fields.push("year = ").push_bind_unseparated(year);
        }
    }
    builder.push(" WHERE isbn = ").push_bind(isbn.to_string());
    builder.push(format!(" RETURNING {}", COLUMNS));
    builder
}

fn like_pattern(value: &str) -> String {
    let escaped = value
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{}%", escaped)
}

fn map_to_book(row: &PgRow) -> Result<BookEntity, sqlx::Error> {
    Ok(BookEntity {
        isbn: row.try_get("isbn")?,
        amazon_url: row.try_get("amazon_url")?,
        author: row.try_get("author")?,
        language: row.try_get("language")?,
        pages: row.try_get("pages")?,
        publisher: row.try_get("publisher")?,
        title: row.try_get("title")?,
        year: row.try_get("year")?,
    })
}
