//! Axum router configuration for gate endpoints.

use axum::{
    middleware,
    routing::{delete, get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::adapters::http::middleware::admin_auth_middleware;

use super::handlers::{
    delete_subscription, health, list_subscriptions, login, logout, recent_audit_entries,
    request_access, upsert_subscription, GateAppState,
};

/// Routes open to anyone.
///
/// - `POST /whitelist` - Request access
/// - `GET /health` - Liveness
pub fn public_routes() -> Router<GateAppState> {
    Router::new()
        .route("/whitelist", post(request_access))
        .route("/health", get(health))
}

/// Administrator routes, to be mounted at `/admin`.
///
/// Everything except `POST /login` requires a session token.
pub fn admin_routes(state: &GateAppState) -> Router<GateAppState> {
    Router::new()
        .route("/logout", post(logout))
        .route("/subscriptions", get(list_subscriptions).post(upsert_subscription))
        .route("/subscriptions/:identity", delete(delete_subscription))
        .route("/log", get(recent_audit_entries))
        .route_layer(middleware::from_fn_with_state(
            state.admin_sessions.clone(),
            admin_auth_middleware,
        ))
        .route("/login", post(login))
}

/// Create the complete application router with request tracing.
///
/// # Example
///
/// ```ignore
/// let app = app_router(state);
/// let listener = tokio::net::TcpListener::bind(addr).await?;
/// axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>()).await?;
/// ```
pub fn app_router(state: GateAppState) -> Router {
    Router::new()
        .merge(public_routes())
        .nest("/admin", admin_routes(&state))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
