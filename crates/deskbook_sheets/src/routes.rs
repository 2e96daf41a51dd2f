// --- File: crates/deskbook_sheets/src/routes.rs ---

use crate::handlers::{book_desk_handler, health_handler, profile_handler, DeskState};
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

/// Creates a router containing all desk booking routes.
/// The caller decides which ledger backs `state` and where the router is nested.
pub fn routes(state: Arc<DeskState>) -> Router {
    Router::new()
        .route("/book", post(book_desk_handler))
        .route("/profile", get(profile_handler))
        .route("/health", get(health_handler))
        .with_state(state)
}
