//! API route configuration.

use crate::api::handlers::{
    create_link_handler, delete_link_by_code_handler, delete_link_handler, get_link_handler,
    list_links_handler, update_link_handler,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{delete, get},
};

/// Link management routes, nested under `/api`.
///
/// # Endpoints
///
/// - `POST   /links`              - Create a short link
/// - `GET    /links`              - List links (paginated, newest first)
/// - `GET    /links/{id}`         - Fetch a link by id
/// - `PUT    /links/{id}`         - Replace caption and/or destination
/// - `DELETE /links/{id}`         - Delete a link by id
/// - `DELETE /links/code/{code}`  - Delete a link by short code
pub fn link_routes() -> Router<AppState> {
    Router::new()
        .route("/links", get(list_links_handler).post(create_link_handler))
        .route(
            "/links/{id}",
            get(get_link_handler)
                .put(update_link_handler)
                .delete(delete_link_handler),
        )
        .route("/links/code/{code}", delete(delete_link_by_code_handler))
}
