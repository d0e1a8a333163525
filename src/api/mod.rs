//! API handlers for Biblio REST endpoints

pub mod books;
pub mod extract;
pub mod health;
pub mod loans;
pub mod openapi;

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use utoipa::ToSchema;

use crate::{services::catalog::CatalogSummary, AppState};

/// Create the application router with all routes
pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // API v1 routes
    let api_v1 = Router::new()
        // Health check
        .route("/health", get(health::health_check))
        // Books (catalog)
        .route("/books", get(books::list_books).post(books::create_book))
        .route(
            "/books/:isbn",
            get(books::get_book)
                .put(books::replace_book)
                .patch(books::update_book)
                .delete(books::delete_book),
        )
        // Loans
        .route("/books/:isbn/loan", post(loans::loan_book))
        .route("/books/:isbn/return", post(loans::return_book))
        .with_state(state.clone());

    Router::new()
        .route("/", get(index))
        .with_state(state)
        .nest("/api/v1", api_v1)
        .merge(openapi::create_openapi_router())
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(cors)
}

/// Entry point description
#[derive(Serialize, ToSchema)]
pub struct IndexResponse {
    pub name: String,
    pub version: String,
    /// Swagger UI location
    pub documentation: String,
    /// `METHOD path` pairs served under /api/v1
    pub endpoints: Vec<EndpointInfo>,
    pub catalog: CatalogSummary,
}

#[derive(Serialize, ToSchema)]
pub struct EndpointInfo {
    pub route: String,
    pub description: String,
}

const ENDPOINTS: &[(&str, &str)] = &[
    ("GET /api/v1/books", "List all books (filter with ?availability=available|on_loan)"),
    ("GET /api/v1/books/{isbn}", "Get one book"),
    ("POST /api/v1/books", "Add a book"),
    ("PUT /api/v1/books/{isbn}", "Replace a book"),
    ("PATCH /api/v1/books/{isbn}", "Partially update a book"),
    ("DELETE /api/v1/books/{isbn}", "Remove a book"),
    ("POST /api/v1/books/{isbn}/loan", "Lend a book out"),
    ("POST /api/v1/books/{isbn}/return", "Return a lent book"),
];

/// API index, served at the root outside the `/api/v1` prefix
pub async fn index(State(state): State<AppState>) -> Json<IndexResponse> {
    Json(IndexResponse {
        name: "Biblio API".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        documentation: "/swagger-ui".to_string(),
        endpoints: ENDPOINTS
            .iter()
            .map(|(route, description)| EndpointInfo {
                route: route.to_string(),
                description: description.to_string(),
            })
            .collect(),
        catalog: state.services.catalog.summary().await,
    })
}
