//! Audit origin resolution.
//!
//! The origin is the first `X-Forwarded-For` entry when the deployment sits
//! behind a trusted proxy, otherwise the socket peer address, otherwise
//! `unknown`.

use async_trait::async_trait;
use axum::extract::{ConnectInfo, FromRef, FromRequestParts};
use axum::http::request::Parts;
use axum::http::HeaderMap;
use std::convert::Infallible;
use std::net::SocketAddr;

use crate::domain::audit::UNKNOWN_ORIGIN;

const FORWARDED_FOR: &str = "x-forwarded-for";

/// Resolves the audit origin of a request.
#[derive(Debug, Clone, Copy, Default)]
pub struct OriginResolver {
    trust_forwarded_for: bool,
}

impl OriginResolver {
    pub fn new(trust_forwarded_for: bool) -> Self {
        Self {
            trust_forwarded_for,
        }
    }

    pub fn resolve(&self, headers: &HeaderMap, peer: Option<SocketAddr>) -> String {
        if self.trust_forwarded_for {
            let forwarded = headers
                .get(FORWARDED_FOR)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.split(',').next())
                .map(str::trim)
                .filter(|v| !v.is_empty());
            if let Some(first) = forwarded {
                return first.to_string();
            }
        }

        peer.map(|addr| addr.ip().to_string())
            .unwrap_or_else(|| UNKNOWN_ORIGIN.to_string())
    }
}

/// Extractor yielding the resolved audit origin of the current request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestOrigin(pub String);

#[async_trait]
impl<S> FromRequestParts<S> for RequestOrigin
where
    S: Send + Sync,
    OriginResolver: FromRef<S>,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let resolver = OriginResolver::from_ref(state);
        let peer = parts
            .extensions
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ConnectInfo(addr)| *addr);
        Ok(RequestOrigin(resolver.resolve(&parts.headers, peer)))
    }
}
