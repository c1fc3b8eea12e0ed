//! Subscription Gate server entry point.

use std::net::SocketAddr;
use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use subscription_gate::adapters::{gateway, verifier, FileAuditLog, FileSubscriptionStore, SystemClock};
use subscription_gate::adapters::http::{app_router, GateAppState, OriginResolver};
use subscription_gate::application::{AdminSessionHandler, StoreLock};
use subscription_gate::config::AppConfig;
use subscription_gate::ports::{AuditLog, Clock};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    config.validate()?;

    init_tracing(&config);

    let clock: Arc<dyn Clock> = Arc::new(SystemClock::new());
    let audit_log: Arc<dyn AuditLog> = Arc::new(FileAuditLog::new(&config.storage.audit_log_path, clock.clone()));
    let store = Arc::new(FileSubscriptionStore::new(
        &config.storage.subscriptions_path,
        clock.clone(),
        audit_log.clone(),
    ));

    let state = GateAppState {
        store,
        audit_log: audit_log.clone(),
        gateway: gateway::from_config(&config.gateway),
        verifier: verifier::from_config(&config.verifier),
        clock: clock.clone(),
        admin_sessions: Arc::new(AdminSessionHandler::new(
            config.admin.password.clone(),
            audit_log,
            clock,
            config.admin.session_ttl(),
        )),
        origin_resolver: OriginResolver::new(config.server.trust_forwarded_for),
        lock: StoreLock::new(),
    };

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(
        %addr,
        subscriptions = %config.storage.subscriptions_path.display(),
        audit_log = %config.storage.audit_log_path.display(),
        gateway = ?config.gateway.kind,
        verifier = ?config.verifier.kind,
        "Subscription gate listening"
    );

    axum::serve(
        listener,
        app_router(state).into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("Subscription gate stopped");
    Ok(())
}

fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.server.log_level));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    if config.is_production() {
        builder.json().init();
    } else {
        builder.init();
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
