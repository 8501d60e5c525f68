// Library crate for DevShelf
// Exports modules for use by the server binary and tests

pub mod config;
pub mod error;
pub mod handlers;
pub mod middlewares;
pub mod models;
pub mod repositories;
pub mod services;
pub mod state;

use axum::{
    middleware,
    routing::{delete, get, post, put},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::handlers::{
    create_comment, create_project, create_reply, delete_comment, delete_project, delete_reply,
    get_project, list_comments, list_projects, list_replies, login, me, register, update_comment,
    update_project, update_reply,
};
use crate::middlewares::auth_middleware;
use crate::state::AppState;

/// Build the application router with the given state
pub fn build_router(state: AppState) -> Router {
    // Protected routes (require authentication)
    let protected_routes = Router::new()
        // Auth routes
        .route("/api/auth/me", get(me))
        // Project routes
        .route("/api/projects", post(create_project))
        .route("/api/projects/{id}", put(update_project))
        .route("/api/projects/{id}", delete(delete_project))
        // Comment routes
        .route("/api/comments", get(list_comments))
        .route("/api/comments", post(create_comment))
        .route("/api/comments/{id}", put(update_comment))
        .route("/api/comments/{id}", delete(delete_comment))
        // Reply routes
        .route("/api/replies", get(list_replies))
        .route("/api/replies", post(create_reply))
        .route("/api/replies/{id}", put(update_reply))
        .route("/api/replies/{id}", delete(delete_reply))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    Router::new()
        .route("/", get(|| async { "DevShelf API" }))
        // Public auth routes
        .route("/api/auth/register", post(register))
        .route("/api/auth/login", post(login))
        // Public project reads
        .route("/api/projects", get(list_projects))
        .route("/api/projects/{id}", get(get_project))
        // Protected routes
        .merge(protected_routes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
