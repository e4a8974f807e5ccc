use std::collections::HashMap;
use axum::{
    extract::{Path, Query, State},
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use serde_json::Value;
use tower_http::trace::TraceLayer;
use crate::catalog::command::add_book_cmd::{AddBookCommand, AddBookCommandRequest, AddBookCommandResponse};
use crate::catalog::command::get_book_cmd::{GetBookCommand, GetBookCommandRequest, GetBookCommandResponse};
use crate::catalog::command::list_books_cmd::{ListBooksCommand, ListBooksCommandRequest, ListBooksCommandResponse};
use crate::catalog::command::remove_book_cmd::{RemoveBookCommand, RemoveBookCommandRequest, RemoveBookCommandResponse};
use crate::catalog::command::update_book_cmd::{UpdateBookCommand, UpdateBookCommandRequest, UpdateBookCommandResponse};
use crate::core::command::Command;
use crate::core::controller::{AppState, fallback, json_to_server_error, query_to_server_error, ServerError};

/// Routes for books, relative to the mount point:
///
/// - `GET /` => `{books: [book, ...]}`
/// - `GET /:isbn` => `{book: book}`
/// - `POST /` => `201 {book: newBook}`
/// - `PUT /:isbn` => `{book: updatedBook}`
/// - `DELETE /:isbn` => `{message: "Book deleted"}`
pub fn book_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(find_books).post(add_book))
        .route("/:isbn",
               get(find_book_by_isbn).put(update_book).delete(remove_book))
}

pub fn app(state: AppState) -> Router {
    Router::new()
        .nest("/books", book_routes())
        .fallback(fallback)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub(crate) async fn find_books(
    State(state): State<AppState>,
    params: Result<Query<HashMap<String, String>>, QueryRejection>) -> Result<Json<ListBooksCommandResponse>, ServerError> {
    let Query(params) = params.map_err(query_to_server_error)?;
    let res = ListBooksCommand::new(state.catalog).execute(ListBooksCommandRequest::new(params)).await?;
    Ok(Json(res))
}

pub(crate) async fn find_book_by_isbn(
    State(state): State<AppState>,
    Path(isbn): Path<String>) -> Result<Json<GetBookCommandResponse>, ServerError> {
    let req = GetBookCommandRequest::new(isbn);
    let res = GetBookCommand::new(state.catalog).execute(req).await?;
    Ok(Json(res))
}

pub(crate) async fn add_book(
    State(state): State<AppState>,
    json: Result<Json<Value>, JsonRejection>) -> Result<(StatusCode, Json<AddBookCommandResponse>), ServerError> {
    let Json(payload) = json.map_err(json_to_server_error)?;
    let res = AddBookCommand::new(state.catalog).execute(AddBookCommandRequest::new(payload)).await?;
    Ok((StatusCode::CREATED, Json(res)))
}

pub(crate) async fn update_book(
    State(state): State<AppState>,
    Path(isbn): Path<String>,
    json: Result<Json<Value>, JsonRejection>) -> Result<Json<UpdateBookCommandResponse>, ServerError> {
    let Json(payload) = json.map_err(json_to_server_error)?;
    let req = UpdateBookCommandRequest::new(isbn.as_str(), payload);
    let res = UpdateBookCommand::new(state.catalog).execute(req).await?;
    Ok(Json(res))
}

pub(crate) async fn remove_book(
    State(state): State<AppState>,
    Path(isbn): Path<String>) -> Result<Json<RemoveBookCommandResponse>, ServerError> {
    let req = RemoveBookCommandRequest::new(isbn);
    let res = RemoveBookCommand::new(state.catalog).execute(req).await?;
    Ok(Json(res))
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{header, Method, Request, StatusCode};
    use axum::Router;
    use serde_json::{json, Value};
    use tower::ServiceExt;
    use crate::catalog::controller::{app, book_routes};
    use crate::catalog::factory;
    use crate::core::controller::AppState;
    use crate::core::domain::Configuration;

    async fn test_state() -> AppState {
        let svc = factory::create_catalog_service(&Configuration::new("test")).await
            .expect("should build catalog service");
        AppState::new(svc)
    }

    async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(json) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };
        let res = app.clone().oneshot(builder.body(body).unwrap()).await.unwrap();
        let status = res.status();
        let bytes = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes).unwrap() };
        (status, value)
    }

    fn soul_of_science() -> Value {
        json!({
            "isbn": "0691161518",
            "amazon_url": "http://a.co/x",
            "author": "M. Lightman",
            "language": "english",
            "pages": 264,
            "publisher": "Princeton",
            "title": "Soul of Science",
            "year": 2014
        })
    }

    #[tokio::test]
    async fn test_should_run_book_lifecycle() {
        let app = app(test_state().await);

        let (status, body) = send(&app, Method::POST, "/books", Some(soul_of_science())).await;
        assert_eq!(StatusCode::CREATED, status);
        assert_eq!(json!({"book": soul_of_science()}), body);

        let (status, body) = send(&app, Method::GET, "/books/0691161518", None).await;
        assert_eq!(StatusCode::OK, status);
        assert_eq!(json!({"book": soul_of_science()}), body);

        let (status, body) = send(&app, Method::PUT, "/books/0691161518", Some(json!({"pages": 300}))).await;
        assert_eq!(StatusCode::OK, status);
        let mut expected = soul_of_science();
        expected["pages"] = json!(300);
        assert_eq!(json!({"book": expected}), body);

        let (status, body) = send(&app, Method::DELETE, "/books/0691161518", None).await;
        assert_eq!(StatusCode::OK, status);
        assert_eq!(json!({"message": "Book deleted"}), body);

        let (status, body) = send(&app, Method::GET, "/books/0691161518", None).await;
        assert_eq!(StatusCode::NOT_FOUND, status);
        assert_eq!(404, body["error"]["status"]);
    }

    #[tokio::test]
    async fn test_should_serve_routes_at_root() {
        let routes = book_routes().with_state(test_state().await);

        let (status, _) = send(&routes, Method::POST, "/", Some(soul_of_science())).await;
        assert_eq!(StatusCode::CREATED, status);
        let (status, body) = send(&routes, Method::GET, "/", None).await;
        assert_eq!(StatusCode::OK, status);
        assert_eq!(json!({"books": [soul_of_science()]}), body);
    }

    #[tokio::test]
    async fn test_should_list_books_with_filters() {
        let app = app(test_state().await);
        let mut other = soul_of_science();
        other["isbn"] = json!("0000000001");
        other["title"] = json!("Another Book");
        other["year"] = json!(1999);
        let _ = send(&app, Method::POST, "/books", Some(soul_of_science())).await;
        let _ = send(&app, Method::POST, "/books", Some(other)).await;

        let (status, body) = send(&app, Method::GET, "/books", None).await;
        assert_eq!(StatusCode::OK, status);
        assert_eq!(2, body["books"].as_array().unwrap().len());
        assert_eq!("Another Book", body["books"][0]["title"]);

        let (_, body) = send(&app, Method::GET, "/books?title=soul", None).await;
        assert_eq!(vec![soul_of_science()], body["books"].as_array().unwrap().clone());

        let (_, body) = send(&app, Method::GET, "/books?year=1999&unknown=1", None).await;
        assert_eq!("0000000001", body["books"][0]["isbn"]);

        let (_, body) = send(&app, Method::GET, "/books?author=nobody", None).await;
        assert_eq!(json!({"books": []}), body);

        let (status, body) = send(&app, Method::GET, "/books?year=soon", None).await;
        assert_eq!(StatusCode::BAD_REQUEST, status);
        assert_eq!(1, body["error"]["errors"].as_array().unwrap().len());
    }

    #[tokio::test]
    async fn test_should_accept_integral_numbers() {
        let app = app(test_state().await);
        let req = Request::builder()
            .method(Method::POST)
            .uri("/books")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"isbn": "0691161518", "amazon_url": "http://a.co/x", "author": "M. Lightman",
                "language": "english", "pages": 264.0, "publisher": "Princeton",
                "title": "Soul of Science", "year": 2014e0}"#))
            .unwrap();
        let res = app.clone().oneshot(req).await.unwrap();
        assert_eq!(StatusCode::CREATED, res.status());

        let (status, body) = send(&app, Method::PUT, "/books/0691161518", Some(json!({"pages": 300.0}))).await;
        assert_eq!(StatusCode::OK, status);
        assert_eq!(json!(300), body["book"]["pages"]);
        assert_eq!(json!(2014), body["book"]["year"]);

        let req = Request::builder()
            .method(Method::PUT)
            .uri("/books/0691161518")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"year": 2e3}"#))
            .unwrap();
        let res = app.clone().oneshot(req).await.unwrap();
        assert_eq!(StatusCode::OK, res.status());
        let (_, body) = send(&app, Method::GET, "/books/0691161518", None).await;
        assert_eq!(json!(2000), body["book"]["year"]);
        assert_eq!(json!(300), body["book"]["pages"]);
    }

    #[tokio::test]
    async fn test_should_reject_invalid_new_book() {
        let app = app(test_state().await);
        let mut book = soul_of_science();
        book.as_object_mut().unwrap().remove("title");

        let (status, body) = send(&app, Method::POST, "/books", Some(book)).await;
        assert_eq!(StatusCode::BAD_REQUEST, status);
        assert_eq!(json!({"error": {
            "status": 400,
            "message": "Bad Request",
            "errors": ["instance requires property \"title\""],
        }}), body);
    }

    #[tokio::test]
    async fn test_should_reject_duplicate_isbn() {
        let app = app(test_state().await);

        let _ = send(&app, Method::POST, "/books", Some(soul_of_science())).await;
        let (status, body) = send(&app, Method::POST, "/books", Some(soul_of_science())).await;
        assert_eq!(StatusCode::CONFLICT, status);
        assert_eq!(409, body["error"]["status"]);
    }

    #[tokio::test]
    async fn test_should_reject_isbn_update() {
        let app = app(test_state().await);
        let _ = send(&app, Method::POST, "/books", Some(soul_of_science())).await;

        let (status, body) = send(&app, Method::PUT, "/books/0691161518", Some(json!({"isbn": "x", "pages": 1}))).await;
        assert_eq!(StatusCode::BAD_REQUEST, status);
        assert_eq!(json!({"error": {"status": 400, "message": "Not allowed to update ISBN"}}), body);

        let (_, body) = send(&app, Method::GET, "/books/0691161518", None).await;
        assert_eq!(264, body["book"]["pages"]);
    }

    #[tokio::test]
    async fn test_should_reject_invalid_update() {
        let app = app(test_state().await);
        let _ = send(&app, Method::POST, "/books", Some(soul_of_science())).await;

        let (status, body) = send(&app, Method::PUT, "/books/0691161518", Some(json!({"year": "2014"}))).await;
        assert_eq!(StatusCode::BAD_REQUEST, status);
        assert_eq!(json!(["instance.year is not of a type(s) integer"]), body["error"]["errors"]);
    }

    #[tokio::test]
    async fn test_should_keep_book_for_empty_update() {
        let app = app(test_state().await);
        let _ = send(&app, Method::POST, "/books", Some(soul_of_science())).await;

        let (status, body) = send(&app, Method::PUT, "/books/0691161518", Some(json!({}))).await;
        assert_eq!(StatusCode::OK, status);
        assert_eq!(json!({"book": soul_of_science()}), body);
    }

    #[tokio::test]
    async fn test_should_not_find_missing_books() {
        let app = app(test_state().await);

        let (status, body) = send(&app, Method::GET, "/books/missing", None).await;
        assert_eq!(StatusCode::NOT_FOUND, status);
        assert_eq!("There is no book with an isbn 'missing'", body["error"]["message"]);

        let (status, _) = send(&app, Method::PUT, "/books/missing", Some(json!({"pages": 1}))).await;
        assert_eq!(StatusCode::NOT_FOUND, status);

        let (status, _) = send(&app, Method::DELETE, "/books/missing", None).await;
        assert_eq!(StatusCode::NOT_FOUND, status);
    }

    #[tokio::test]
    async fn test_should_reject_malformed_json() {
        let app = app(test_state().await);
        let req = Request::builder()
            .method(Method::POST)
            .uri("/books")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{\"isbn\":"))
            .unwrap();
        let res = app.oneshot(req).await.unwrap();
        assert_eq!(StatusCode::BAD_REQUEST, res.status());
    }

    #[tokio::test]
    async fn test_should_answer_unknown_routes() {
        let app = app(test_state().await);

        let (status, body) = send(&app, Method::GET, "/authors", None).await;
        assert_eq!(StatusCode::NOT_FOUND, status);
        assert_eq!(json!({"error": {"status": 404, "message": "Not Found"}}), body);
    }
}
