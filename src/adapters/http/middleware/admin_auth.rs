//! Administrator authentication middleware.
//!
//! Admin routes require `Authorization: Bearer <token>` where the token was
//! issued by a successful login and has not been logged out.
//!
//! ```text
//! Request → admin_auth_middleware → injects AdminToken into extensions
//!                                          ↓
//!                                  Handler reads Extension<AdminToken>
//! ```

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::gate::dto::ErrorResponse;
use crate::application::AdminSessionHandler;
use crate::domain::foundation::ErrorCode;

/// Token of the authenticated administrator session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminToken(pub String);

/// Rejects requests without a live administrator session.
pub async fn admin_auth_middleware(
    State(sessions): State<Arc<AdminSessionHandler>>,
    mut request: Request,
    next: Next,
) -> Response {
    let token = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string);

    match token {
        Some(token) if sessions.is_authorized(&token).await => {
            request.extensions_mut().insert(AdminToken(token));
            next.run(request).await
        }
        _ => {
            let error = ErrorResponse::new(
                ErrorCode::Unauthorized.to_string(),
                "Administrator login required",
            );
            (StatusCode::UNAUTHORIZED, Json(error)).into_response()
        }
    }
}
