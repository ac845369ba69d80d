use axum::http::{header, HeaderValue, Method};
use axum::routing::{get, put};
use axum::Router;
use tower_http::cors::{AllowOrigin, CorsLayer};

use crate::db::TodoStore;
use crate::handlers;

/// Builds the router. Unsupported verbs on a known route get a 405 with an
/// `Allow` header from the method router; preflight requests are answered
/// by the CORS layer.
pub fn app(store: TodoStore, cors: CorsLayer) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route(
            "/todos",
            get(handlers::list_todos).post(handlers::create_todo),
        )
        .route(
            "/todos/:id",
            put(handlers::update_todo).delete(handlers::delete_todo),
        )
        .layer(cors)
        .with_state(store)
}

/// `*` allows any origin; anything else is read as a comma-separated
/// allow-list.
pub fn cors_layer(allow_origin: &str) -> CorsLayer {
    let origin = if allow_origin.trim() == "*" {
        AllowOrigin::any()
    } else {
        AllowOrigin::list(
            allow_origin
                .split(',')
                .filter_map(|o| o.trim().parse::<HeaderValue>().ok()),
        )
    };

    CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE])
}
