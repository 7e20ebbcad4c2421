//! Central route table for the internal-data namespace.

use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;

use crate::shared::state::AppState;
use crate::{listing, session, tickets};

pub fn configure_api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/internal/login", post(session::login))
        .route("/api/internal/session", get(session::session_info))
        .route("/api/internal/logout", post(session::logout))
        .route("/api/internal/tickets", get(listing::list_tickets))
        .route("/api/internal/tickets/:id", get(tickets::get_ticket))
        .route(
            "/api/internal/tickets/:id/attachments",
            get(tickets::list_ticket_attachments),
        )
        .route("/api/internal/users", get(listing::list_users))
        .route("/api/internal/organizations", get(listing::list_organizations))
        .route("/api/internal/views", get(listing::list_views))
        .route("/api/internal/triggers", get(listing::list_triggers))
        .route(
            "/api/internal/trigger-categories",
            get(listing::list_trigger_categories),
        )
        .route("/api/internal/macros", get(listing::list_macros))
}
