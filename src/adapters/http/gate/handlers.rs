//! HTTP handlers for gate endpoints.
//!
//! These handlers connect Axum routes to application layer command/query handlers.

use std::sync::Arc;

use axum::extract::{FromRef, Json, Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;

use crate::adapters::http::middleware::{AdminToken, OriginResolver, RequestOrigin};
use crate::application::{
    AccessDecision, AdminSessionError, AdminSessionHandler, DeleteSubscriptionCommand,
    DeleteSubscriptionHandler, ListSubscriptionsHandler, ListSubscriptionsQuery,
    RecentAuditEntriesHandler, RecentAuditEntriesQuery, RequestAccessCommand, RequestAccessHandler,
    StoreLock, UpsertSubscriptionCommand, UpsertSubscriptionHandler,
};
use crate::domain::foundation::ErrorCode;
use crate::domain::subscription::SubscriptionError;
use crate::ports::{AccessGateway, AuditLog, Clock, GatewayError, IdentityVerifier, SubscriptionStore};

use super::dto::{
    AccessRequest, AccessResponse, AccessStatus, AuditLogQuery, AuditLogResponse,
    DeleteSubscriptionResponse, ErrorResponse, LoginRequest, LoginResponse,
    SaveSubscriptionResponse, SubscriptionListResponse, SubscriptionView, UpsertSubscriptionRequest,
};

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared application state containing all dependencies.
///
/// Cloned for each request; every dependency is behind an `Arc`.
#[derive(Clone)]
pub struct GateAppState {
    pub store: Arc<dyn SubscriptionStore>,
    pub audit_log: Arc<dyn AuditLog>,
    pub gateway: Arc<dyn AccessGateway>,
    pub verifier: Arc<dyn IdentityVerifier>,
    pub clock: Arc<dyn Clock>,
    pub admin_sessions: Arc<AdminSessionHandler>,
    pub origin_resolver: OriginResolver,
    pub lock: StoreLock,
}

impl GateAppState {
    /// Create handlers on demand from the shared state.
    pub fn request_access_handler(&self) -> RequestAccessHandler {
        RequestAccessHandler::new(
            self.store.clone(),
            self.audit_log.clone(),
            self.gateway.clone(),
            self.verifier.clone(),
            self.clock.clone(),
            self.lock.clone(),
        )
    }

    pub fn upsert_subscription_handler(&self) -> UpsertSubscriptionHandler {
        UpsertSubscriptionHandler::new(
            self.store.clone(),
            self.audit_log.clone(),
            self.clock.clone(),
            self.lock.clone(),
        )
    }

    pub fn delete_subscription_handler(&self) -> DeleteSubscriptionHandler {
        DeleteSubscriptionHandler::new(
            self.store.clone(),
            self.audit_log.clone(),
            self.clock.clone(),
            self.lock.clone(),
        )
    }

    pub fn list_subscriptions_handler(&self) -> ListSubscriptionsHandler {
        ListSubscriptionsHandler::new(self.store.clone(), self.lock.clone())
    }

    pub fn recent_audit_entries_handler(&self) -> RecentAuditEntriesHandler {
        RecentAuditEntriesHandler::new(self.audit_log.clone())
    }
}

impl FromRef<GateAppState> for OriginResolver {
    fn from_ref(state: &GateAppState) -> Self {
        state.origin_resolver
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Public Endpoints
// ════════════════════════════════════════════════════════════════════════════════

/// GET /health
pub async fn health() -> &'static str {
    "ok"
}

/// Header carrying the upstream verifier's attestation.
pub const ATTESTATION_HEADER: &str = "x-gate-attestation";

/// POST /whitelist - Request access for an identity
///
/// 202 while pending, 200 once granted, 403 if unverified, 502 if the grant
/// itself failed.
pub async fn request_access(
    State(state): State<GateAppState>,
    RequestOrigin(origin): RequestOrigin,
    headers: HeaderMap,
    Json(request): Json<AccessRequest>,
) -> Result<impl IntoResponse, GateApiError> {
    let handler = state.request_access_handler();
    let cmd = RequestAccessCommand {
        identity: request.identity,
        attestation: headers
            .get(ATTESTATION_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
        origin,
    };

    let result = handler.handle(cmd).await?;

    let (status, access) = match result.decision {
        AccessDecision::Pending => (StatusCode::ACCEPTED, AccessStatus::Pending),
        AccessDecision::Granted => (StatusCode::OK, AccessStatus::Granted),
        AccessDecision::GrantFailed(e) => return Err(e.into()),
    };

    let response = AccessResponse {
        identity: result.identity.into(),
        status: access,
    };
    Ok((status, Json(response)))
}

/// POST /admin/login - Open an administrator session
pub async fn login(
    State(state): State<GateAppState>,
    RequestOrigin(origin): RequestOrigin,
    Json(request): Json<LoginRequest>,
) -> Result<impl IntoResponse, GateApiError> {
    let session = state.admin_sessions.login(&request.password, &origin).await?;
    Ok(Json(LoginResponse {
        token: session.token,
    }))
}

// ════════════════════════════════════════════════════════════════════════════════
// Admin Endpoints (behind admin_auth_middleware)
// ════════════════════════════════════════════════════════════════════════════════

/// POST /admin/logout - Close the current session
pub async fn logout(
    State(state): State<GateAppState>,
    RequestOrigin(origin): RequestOrigin,
    Extension(AdminToken(token)): Extension<AdminToken>,
) -> Result<impl IntoResponse, GateApiError> {
    state.admin_sessions.logout(&token, &origin).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /admin/subscriptions - List all subscriptions
pub async fn list_subscriptions(
    State(state): State<GateAppState>,
) -> Result<impl IntoResponse, GateApiError> {
    let records = state
        .list_subscriptions_handler()
        .handle(ListSubscriptionsQuery)
        .await?;

    Ok(Json(SubscriptionListResponse {
        subscriptions: records.into_iter().map(SubscriptionView::from).collect(),
    }))
}

/// POST /admin/subscriptions - Create or overwrite a subscription
pub async fn upsert_subscription(
    State(state): State<GateAppState>,
    RequestOrigin(origin): RequestOrigin,
    Json(request): Json<UpsertSubscriptionRequest>,
) -> Result<impl IntoResponse, GateApiError> {
    let handler = state.upsert_subscription_handler();
    let cmd = UpsertSubscriptionCommand {
        identity: request.identity,
        payment_date: request.payment_date,
        duration_days: request.duration_days,
        active: request.active,
        origin,
    };

    let result = handler.handle(cmd).await?;

    let status = if result.created {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    Ok((
        status,
        Json(SaveSubscriptionResponse {
            subscription: result.record.into(),
            created: result.created,
        }),
    ))
}

/// DELETE /admin/subscriptions/:identity - Delete a subscription
pub async fn delete_subscription(
    State(state): State<GateAppState>,
    RequestOrigin(origin): RequestOrigin,
    Path(identity): Path<String>,
) -> Result<impl IntoResponse, GateApiError> {
    let handler = state.delete_subscription_handler();
    let result = handler
        .handle(DeleteSubscriptionCommand { identity, origin })
        .await?;

    Ok(Json(DeleteSubscriptionResponse {
        removed: result.removed,
    }))
}

/// GET /admin/log?limit=N - Recent audit entries, newest first
pub async fn recent_audit_entries(
    State(state): State<GateAppState>,
    Query(query): Query<AuditLogQuery>,
) -> Result<impl IntoResponse, GateApiError> {
    let entries = state
        .recent_audit_entries_handler()
        .handle(RecentAuditEntriesQuery { limit: query.limit })
        .await?;

    Ok(Json(AuditLogResponse { entries }))
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

/// API error type that converts application errors to HTTP responses.
#[derive(Debug)]
pub enum GateApiError {
    Subscription(SubscriptionError),
    Admin(AdminSessionError),
    Gateway(GatewayError),
}

impl From<SubscriptionError> for GateApiError {
    fn from(err: SubscriptionError) -> Self {
        Self::Subscription(err)
    }
}

impl From<AdminSessionError> for GateApiError {
    fn from(err: AdminSessionError) -> Self {
        Self::Admin(err)
    }
}

impl From<GatewayError> for GateApiError {
    fn from(err: GatewayError) -> Self {
        Self::Gateway(err)
    }
}

impl IntoResponse for GateApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, code, message) = match &self {
            GateApiError::Subscription(e) => {
                let status = match e.code() {
                    ErrorCode::Forbidden => StatusCode::FORBIDDEN,
                    _ if e.is_retryable() => StatusCode::SERVICE_UNAVAILABLE,
                    _ => StatusCode::BAD_REQUEST,
                };
                (status, e.code(), e.to_string())
            }
            GateApiError::Admin(AdminSessionError::InvalidCredentials) => (
                StatusCode::UNAUTHORIZED,
                ErrorCode::Unauthorized,
                "Invalid administrator credentials".to_string(),
            ),
            GateApiError::Admin(e) => (StatusCode::SERVICE_UNAVAILABLE, e.code(), e.to_string()),
            GateApiError::Gateway(e) => (StatusCode::BAD_GATEWAY, ErrorCode::GatewayFailed, e.to_string()),
        };

        if status.is_server_error() {
            tracing::warn!(status = %status, error = %message, "Request failed");
        }

        (status, Json(ErrorResponse::new(code.to_string(), message))).into_response()
    }
}
