//! AdminSessionHandler - Administrator login, logout and authorization.
//!
//! Sessions are opaque random tokens held in memory; they do not survive a
//! restart and lapse a fixed time after login.

use secrecy::{ExposeSecret, SecretString};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use subtle::ConstantTimeEq;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::audit::{AuditAction, AuditEvent};
use crate::domain::foundation::{ErrorCode, Timestamp};
use crate::ports::{AuditLog, Clock, StorageError};

/// Errors from admin session operations.
#[derive(Debug, thiserror::Error)]
pub enum AdminSessionError {
    #[error("Invalid administrator credentials")]
    InvalidCredentials,

    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl AdminSessionError {
    pub fn code(&self) -> ErrorCode {
        match self {
            AdminSessionError::InvalidCredentials => ErrorCode::Unauthorized,
            AdminSessionError::Storage(_) => ErrorCode::StorageUnavailable,
        }
    }
}

/// An authenticated administrator session.
#[derive(Debug, Clone)]
pub struct AdminSession {
    pub token: String,
}

/// Handler for administrator sessions.
pub struct AdminSessionHandler {
    password: SecretString,
    audit_log: Arc<dyn AuditLog>,
    clock: Arc<dyn Clock>,
    ttl: Duration,
    /// Token -> issued at
    sessions: RwLock<HashMap<String, Timestamp>>,
}

impl AdminSessionHandler {
    pub fn new(
        password: SecretString,
        audit_log: Arc<dyn AuditLog>,
        clock: Arc<dyn Clock>,
        ttl: Duration,
    ) -> Self {
        Self {
            password,
            audit_log,
            clock,
            ttl,
            sessions: RwLock::new(HashMap::new()),
        }
    }

    /// Check `password` and open a session.
    ///
    /// Both outcomes are audited.
    pub async fn login(&self, password: &str, origin: &str) -> Result<AdminSession, AdminSessionError> {
        let expected = self.password.expose_secret().as_bytes();
        let matches: bool = password.as_bytes().ct_eq(expected).into();

        if !matches {
            tracing::warn!(origin = %origin, "Administrator login failed");
            self.audit_log
                .append(AuditEvent::new(AuditAction::LoginFailed), origin)
                .await?;
            return Err(AdminSessionError::InvalidCredentials);
        }

        self.audit_log
            .append(AuditEvent::new(AuditAction::LoginSuccess), origin)
            .await?;

        let token = Uuid::new_v4().to_string();
        let now = self.clock.now();
        let mut sessions = self.sessions.write().await;
        sessions.retain(|_, issued_at| !self.is_stale(*issued_at, now));
        sessions.insert(token.clone(), now);
        drop(sessions);
        tracing::info!(origin = %origin, "Administrator logged in");

        Ok(AdminSession { token })
    }

    /// Revoke `token`.
    ///
    /// Returns false, without auditing, if the token was not a live session.
    pub async fn logout(&self, token: &str, origin: &str) -> Result<bool, AdminSessionError> {
        let now = self.clock.now();
        match self.sessions.write().await.remove(token) {
            Some(issued_at) if !self.is_stale(issued_at, now) => {}
            _ => return Ok(false),
        }

        self.audit_log
            .append(AuditEvent::new(AuditAction::Logout), origin)
            .await?;
        tracing::info!(origin = %origin, "Administrator logged out");
        Ok(true)
    }

    /// Returns true if `token` belongs to a live session.
    ///
    /// A lapsed token is evicted.
    pub async fn is_authorized(&self, token: &str) -> bool {
        let now = self.clock.now();
        match self.sessions.read().await.get(token) {
            None => return false,
            Some(issued_at) if !self.is_stale(*issued_at, now) => return true,
            Some(_) => {}
        }

        self.sessions.write().await.remove(token);
        tracing::debug!("Administrator session lapsed");
        false
    }

    fn is_stale(&self, issued_at: Timestamp, now: Timestamp) -> bool {
        now.as_datetime()
            .signed_duration_since(*issued_at.as_datetime())
            .to_std()
            .is_ok_and(|elapsed| elapsed >= self.ttl)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::clock::FixedClock;
    use crate::adapters::storage::InMemoryAuditLog;
    use chrono::NaiveDate;

    const TTL: Duration = Duration::from_secs(60 * 60);

    fn setup_with_clock() -> (Arc<FixedClock>, Arc<InMemoryAuditLog>, AdminSessionHandler) {
        let clock = Arc::new(FixedClock::on(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()));
        let audit_log = Arc::new(InMemoryAuditLog::new(clock.clone()));
        let handler = AdminSessionHandler::new(
            SecretString::new("correct-horse".to_string()),
            audit_log.clone(),
            clock.clone(),
            TTL,
        );
        (clock, audit_log, handler)
    }

    fn setup() -> (Arc<InMemoryAuditLog>, AdminSessionHandler) {
        let (_clock, audit_log, handler) = setup_with_clock();
        (audit_log, handler)
    }

    #[tokio::test]
    async fn login_with_correct_password_opens_session() {
        let (audit_log, handler) = setup();

        let session = handler.login("correct-horse", "10.0.0.1").await.unwrap();

        assert!(handler.is_authorized(&session.token).await);
        let entries = audit_log.entries().await;
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].action, AuditAction::LoginSuccess);
        assert_eq!(entries[0].origin, "10.0.0.1");
    }

    #[tokio::test]
    async fn login_with_wrong_password_is_rejected_and_audited() {
        let (audit_log, handler) = setup();

        let result = handler.login("correct-horsf", "10.0.0.2").await;

        assert!(matches!(result, Err(AdminSessionError::InvalidCredentials)));
        assert_eq!(audit_log.entries().await[0].action, AuditAction::LoginFailed);
    }

    #[tokio::test]
    async fn prefix_of_password_is_rejected() {
        let (_audit_log, handler) = setup();

        assert!(handler.login("correct", "10.0.0.2").await.is_err());
        assert!(handler.login("", "10.0.0.2").await.is_err());
    }

    #[tokio::test]
    async fn each_login_gets_a_distinct_token() {
        let (_audit_log, handler) = setup();

        let first = handler.login("correct-horse", "a").await.unwrap();
        let second = handler.login("correct-horse", "a").await.unwrap();

        assert_ne!(first.token, second.token);
    }

    #[tokio::test]
    async fn logout_revokes_session() {
        let (audit_log, handler) = setup();
        let session = handler.login("correct-horse", "10.0.0.1").await.unwrap();

        assert!(handler.logout(&session.token, "10.0.0.1").await.unwrap());

        assert!(!handler.is_authorized(&session.token).await);
        assert_eq!(audit_log.entries().await[1].action, AuditAction::Logout);
    }

    #[tokio::test]
    async fn logout_of_unknown_token_is_noop() {
        let (audit_log, handler) = setup();

        assert!(!handler.logout("not-a-token", "10.0.0.1").await.unwrap());
        assert!(audit_log.is_empty().await);
    }

    #[tokio::test]
    async fn session_lapses_after_ttl() {
        let (clock, _audit_log, handler) = setup_with_clock();
        let session = handler.login("correct-horse", "10.0.0.1").await.unwrap();

        clock.advance(chrono::Duration::minutes(59));
        assert!(handler.is_authorized(&session.token).await);

        clock.advance(chrono::Duration::minutes(1));
        assert!(!handler.is_authorized(&session.token).await);
        assert!(handler.sessions.read().await.is_empty());
    }

    #[tokio::test]
    async fn login_evicts_lapsed_sessions() {
        let (clock, _audit_log, handler) = setup_with_clock();
        let stale = handler.login("correct-horse", "a").await.unwrap();
        clock.advance_days(1);

        let fresh = handler.login("correct-horse", "a").await.unwrap();

        let sessions = handler.sessions.read().await;
        assert_eq!(sessions.len(), 1);
        assert!(sessions.contains_key(&fresh.token));
        assert!(!sessions.contains_key(&stale.token));
    }

    #[tokio::test]
    async fn logout_of_lapsed_session_is_not_audited() {
        let (clock, audit_log, handler) = setup_with_clock();
        let session = handler.login("correct-horse", "a").await.unwrap();
        clock.advance_days(1);

        assert!(!handler.logout(&session.token, "a").await.unwrap());
        assert_eq!(audit_log.len().await, 1);
    }

    #[tokio::test]
    async fn unknown_token_is_not_authorized() {
        let (_audit_log, handler) = setup();

        assert!(!handler.is_authorized("").await);
    }

    #[test]
    fn error_codes() {
        assert_eq!(AdminSessionError::InvalidCredentials.code(), ErrorCode::Unauthorized);
    }
}
