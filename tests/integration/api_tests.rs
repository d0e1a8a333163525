//! API integration tests

use axum::{
    body::{to_bytes, Body},
    http::{Method, Request, StatusCode},
    Router,
};
use biblio_server::{
    api::create_router,
    config::AppConfig,
    models::book::{sample_books, Book},
    repository::{BookCatalog, Repository},
    AppState,
};
use serde_json::{json, Value};
use tokio_test::assert_ok;
use tower::ServiceExt;

fn app_with(books: Vec<Book>) -> Router {
    let catalog = BookCatalog::with_books(books).expect("seed books must be unique");
    create_router(AppState::new(AppConfig::default(), Repository::new(catalog)))
}

fn empty_app() -> Router {
    app_with(Vec::new())
}

async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string())),
        None => builder.body(Body::empty()),
    }
    .unwrap();
    send_request(app, request).await
}

async fn send_request(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = assert_ok!(app.clone().oneshot(request).await);
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

fn new_book(isbn: &str) -> Value {
    json!({
        "isbn": isbn,
        "title": "Harry Potter y la Piedra Filosofal",
        "author": "J.K. Rowling",
        "publication_year": 1997,
        "total_pages": 309,
        "is_available": true
    })
}

async fn list_books(app: &Router, query: &str) -> Value {
    let (status, body) = send(app, Method::GET, &format!("/api/v1/books{}", query), None).await;
    assert_eq!(status, StatusCode::OK);
    body
}

fn listed_isbns(body: &Value) -> Vec<String> {
    body["books"]
        .as_array()
        .unwrap()
        .iter()
        .map(|b| b["isbn"].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn test_health_check() {
    let app = app_with(sample_books());
    let (status, body) = send(&app, Method::GET, "/api/v1/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["books"], 4);
}

#[tokio::test]
async fn test_index_lists_endpoints_and_summary() {
    let app = app_with(sample_books());
    let (status, body) = send(&app, Method::GET, "/", None).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["endpoints"].as_array().unwrap().len() >= 8);
    assert_eq!(body["catalog"], json!({"total": 4, "available": 3, "on_loan": 1}));
}

#[tokio::test]
async fn test_list_books_in_insertion_order() {
    let app = empty_app();
    for isbn in ["978-0-000000-03", "978-0-000000-01", "978-0-000000-02"] {
        let (status, _) = send(&app, Method::POST, "/api/v1/books", Some(new_book(isbn))).await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, body) = send(&app, Method::GET, "/api/v1/books", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 3);
    assert_eq!(
        listed_isbns(&body),
        vec!["978-0-000000-03", "978-0-000000-01", "978-0-000000-02"]
    );
}

#[tokio::test]
async fn test_create_duplicate_isbn_conflicts() {
    let app = app_with(sample_books());
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/v1/books",
        Some(new_book("978-0-307-47472-3")),
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "ItemAlreadyExists");

    let (_, body) = send(&app, Method::GET, "/api/v1/books/978-0-307-47472-3", None).await;
    assert_eq!(body["title"], "Cien Años de Soledad");
}

#[tokio::test]
async fn test_create_invalid_payload() {
    let app = empty_app();
    let mut book = new_book("978-0-439-70818-8");
    book["publication_year"] = json!(3000);

    let (status, body) = send(&app, Method::POST, "/api/v1/books", Some(book)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "BadValue");

    let (_, body) = send(&app, Method::GET, "/api/v1/books", None).await;
    assert_eq!(body["total"], 0);
}

#[tokio::test]
async fn test_create_defaults_to_available() {
    let app = empty_app();
    let mut book = new_book("978-0-439-70818-8");
    book.as_object_mut().unwrap().remove("is_available");

    let (status, body) = send(&app, Method::POST, "/api/v1/books", Some(book)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["is_available"], true);
}

#[tokio::test]
async fn test_missing_isbn_is_not_found() {
    let app = app_with(sample_books());
    let uri = "/api/v1/books/000-missing";

    let (status, body) = send(&app, Method::GET, uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "NoSuchItem");

    let (status, _) = send(&app, Method::PATCH, uri, Some(json!({"title": "X"}))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let replacement = json!({
        "title": "X", "author": "Y", "publication_year": 2000, "total_pages": 1,
        "is_available": true
    });
    let (status, _) = send(&app, Method::PUT, uri, Some(replacement)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, Method::DELETE, uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, Method::POST, &format!("{}/loan", uri), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, Method::POST, &format!("{}/return", uri), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, body) = send(&app, Method::GET, "/api/v1/books", None).await;
    assert_eq!(body["total"], 4);
}

#[tokio::test]
async fn test_replace_book() {
    let app = app_with(sample_books());
    let (status, body) = send(
        &app,
        Method::PUT,
        "/api/v1/books/978-0-452-28423-4",
        Some(json!({
            "isbn": "ignored",
            "title": "Nineteen Eighty-Four",
            "author": "George Orwell",
            "publication_year": 1949,
            "total_pages": 336,
            "is_available": true
        })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "isbn": "978-0-452-28423-4",
            "title": "Nineteen Eighty-Four",
            "author": "George Orwell",
            "publication_year": 1949,
            "total_pages": 336,
            "is_available": true
        })
    );
}

#[tokio::test]
async fn test_replace_without_availability_keeps_book_on_loan() {
    let app = app_with(sample_books());
    let uri = "/api/v1/books/978-0-15-601219-1";
    let (_, before) = send(&app, Method::GET, uri, None).await;
    assert_eq!(before["is_available"], false);

    let (status, body) = send(
        &app,
        Method::PUT,
        uri,
        Some(json!({
            "title": "El Principito",
            "author": "Antoine de Saint-Exupéry",
            "publication_year": 1943,
            "total_pages": 96
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "BadValue");

    let (_, after) = send(&app, Method::GET, uri, None).await;
    assert_eq!(after, before);

    let on_loan = list_books(&app, "?availability=on_loan").await;
    assert_eq!(listed_isbns(&on_loan), vec!["978-0-15-601219-1"]);
}

#[tokio::test]
async fn test_malformed_json_body_is_bad_value() {
    let app = empty_app();
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/v1/books")
        .header("content-type", "application/json")
        .body(Body::from("{\"isbn\": "))
        .unwrap();

    let (status, body) = send_request(&app, request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "BadValue");
    assert_eq!(body["code"], 18);

    let (_, body) = send(&app, Method::GET, "/api/v1/books", None).await;
    assert_eq!(body["total"], 0);
}

#[tokio::test]
async fn test_partial_update_keeps_other_fields() {
    let app = app_with(sample_books());
    let uri = "/api/v1/books/978-0-06-093434-7";
    let (_, before) = send(&app, Method::GET, uri, None).await;

    let patch = json!({"total_pages": 1000});
    let (status, after) = send(&app, Method::PATCH, uri, Some(patch)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(after["total_pages"], 1000);
    for field in ["isbn", "title", "author", "publication_year", "is_available"] {
        assert_eq!(after[field], before[field], "{} changed", field);
    }

    let (status, _) = send(&app, Method::PATCH, uri, Some(json!({"title": ""}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_loan_return_lifecycle() {
    let app = empty_app();
    let book = json!({
        "isbn": "A1-0000000",
        "title": "T",
        "author": "Au",
        "publication_year": 2000,
        "total_pages": 100,
        "is_available": true
    });
    let (status, _) = send(&app, Method::POST, "/api/v1/books", Some(book)).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(&app, Method::POST, "/api/v1/books/A1-0000000/loan", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["is_available"], false);

    let (status, body) = send(&app, Method::POST, "/api/v1/books/A1-0000000/loan", None).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "ItemNotAvailable");

    let (status, body) = send(&app, Method::POST, "/api/v1/books/A1-0000000/return", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["is_available"], true);

    let (status, body) = send(&app, Method::POST, "/api/v1/books/A1-0000000/return", None).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "ItemNotBorrowed");

    let (status, body) = send(&app, Method::DELETE, "/api/v1/books/A1-0000000", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, Value::Null);

    let (status, _) = send(&app, Method::GET, "/api/v1/books/A1-0000000", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_availability_filters_partition_listing() {
    let app = app_with(sample_books());
    let all = list_books(&app, "").await;
    let available = list_books(&app, "?availability=available").await;
    let on_loan = list_books(&app, "?availability=on_loan").await;

    assert_eq!(listed_isbns(&on_loan), vec!["978-0-15-601219-1"]);
    assert_eq!(
        listed_isbns(&available),
        vec!["978-0-307-47472-3", "978-0-06-093434-7", "978-0-452-28423-4"]
    );

    let mut merged = listed_isbns(&available);
    merged.extend(listed_isbns(&on_loan));
    merged.sort();
    let mut everything = listed_isbns(&all);
    everything.sort();
    assert_eq!(merged, everything);
}

#[tokio::test]
async fn test_unknown_availability_filter_rejected() {
    let app = app_with(sample_books());
    let (status, body) = send(&app, Method::GET, "/api/v1/books?availability=lost", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "BadValue");
}

#[tokio::test]
async fn test_openapi_document_served() {
    let app = empty_app();
    let (status, body) = send(&app, Method::GET, "/api-docs/openapi.json", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"]["/books/{isbn}/loan"].is_object());
}
