//! Route definitions for the TMS HTTP API.

use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware as axum_middleware,
    routing::{get, patch, post},
};
use tower_http::services::ServeDir;

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the Axum router with every route and the auth gate.
///
/// Protected routes sit behind [`middleware::auth::require_auth`]; the
/// configured avatar directory is served read-only at its mount path.
pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.server.body_limit_bytes;
    let avatars = ServeDir::new(&state.config.avatar.directory);
    let mount = format!("/{}", state.config.avatar.mount_path.trim_matches('/'));

    Router::new()
        .merge(public_routes())
        .merge(protected_routes(state.clone()))
        .nest_service(&mount, avatars)
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}

/// Routes reachable without a token.
fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/login", post(handlers::auth::login))
        .route("/users", post(handlers::user::register))
        .route("/health", get(handlers::health::health))
}

/// Routes that require a verified token.
fn protected_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/current-user", get(handlers::user::current_user))
        .route("/private", get(handlers::auth::private))
        .route(
            "/users/update-avatar",
            patch(handlers::user::update_avatar),
        )
        .route_layer(axum_middleware::from_fn_with_state(
            state,
            middleware::auth::require_auth,
        ))
}
