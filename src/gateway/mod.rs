//! Capability interface to the external authentication provider.
//!
//! The provider owns credential verification, password hashing, session
//! issuance, and per-caller rate limiting; this crate only forwards
//! requests and classifies the results.

pub mod client;

pub use self::client::HttpAuthGateway;

use crate::auth::{
    credentials::{SignInCredentials, SignUpCredentials},
    outcome::RedirectSignal,
};
use async_trait::async_trait;
use axum::http::{header::COOKIE, HeaderMap};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use thiserror::Error;

/// Fixed window the provider enforces per caller.
pub const RATE_LIMIT_WINDOW_SECONDS: u64 = 60;
/// Attempts allowed inside one window.
pub const RATE_LIMIT_MAX_ATTEMPTS: u32 = 10;

/// Identity payload returned by the provider on success.
#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct GatewayUser {
    pub id: String,
    pub email: String,
    pub name: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub email_verified: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Result of a provider call: the authenticated user, if any, plus the
/// session cookies the provider issued for this response cycle.
#[derive(Debug, Default)]
pub struct GatewaySession {
    pub user: Option<GatewayUser>,
    pub set_cookies: Vec<String>,
}

/// Caller context forwarded to the provider with each attempt.
#[derive(Debug, Default, Clone)]
pub struct RequestContext {
    pub client_ip: Option<String>,
    pub cookie: Option<String>,
}

impl RequestContext {
    /// Extract the forwardable parts of an incoming request.
    #[must_use]
    pub fn from_headers(headers: &HeaderMap) -> Self {
        Self {
            client_ip: extract_client_ip(headers),
            cookie: headers
                .get(COOKIE)
                .and_then(|value| value.to_str().ok())
                .map(str::to_string),
        }
    }
}

/// Client IP from common proxy headers, used by the provider's rate limiter.
fn extract_client_ip(headers: &HeaderMap) -> Option<String> {
    let forwarded = headers
        .get("x-forwarded-for")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(',').next())
        .map(str::trim)
        .filter(|value| !value.is_empty());

    if forwarded.is_some() {
        return forwarded.map(str::to_string);
    }

    headers
        .get("x-real-ip")
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

#[derive(Debug, Error)]
pub enum GatewayError {
    /// Control-flow transfer, not a failure. Must propagate untouched.
    #[error("{0}")]
    Redirect(RedirectSignal),
    #[error("Too many attempts, limit is {RATE_LIMIT_MAX_ATTEMPTS} per {RATE_LIMIT_WINDOW_SECONDS} seconds")]
    RateLimited,
    #[error("{0}")]
    Provider(String),
    #[error(transparent)]
    Transport(#[from] reqwest::Error),
}

/// The two operations the provider exposes. Injected as a trait object so
/// the flow can run against a test double.
#[async_trait]
pub trait AuthGateway: Send + Sync {
    async fn sign_in_email(
        &self,
        credentials: &SignInCredentials,
        context: &RequestContext,
    ) -> Result<GatewaySession, GatewayError>;

    async fn sign_up_email(
        &self,
        credentials: &SignUpCredentials,
        context: &RequestContext,
    ) -> Result<GatewaySession, GatewayError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn forwarded_for_takes_the_first_hop() {
        let mut headers = HeaderMap::new();
        headers.insert(
            "x-forwarded-for",
            HeaderValue::from_static("203.0.113.7, 10.0.0.1"),
        );
        headers.insert("x-real-ip", HeaderValue::from_static("10.0.0.2"));

        assert_eq!(
            extract_client_ip(&headers),
            Some("203.0.113.7".to_string())
        );
    }

    #[test]
    fn real_ip_is_the_fallback() {
        let mut headers = HeaderMap::new();
        headers.insert("x-real-ip", HeaderValue::from_static("10.0.0.2"));

        assert_eq!(extract_client_ip(&headers), Some("10.0.0.2".to_string()));
    }

    #[test]
    fn no_proxy_headers_means_no_ip() {
        assert_eq!(extract_client_ip(&HeaderMap::new()), None);
    }

    #[test]
    fn context_carries_the_cookie_header() {
        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, HeaderValue::from_static("session=abc"));

        let context = RequestContext::from_headers(&headers);
        assert_eq!(context.cookie, Some("session=abc".to_string()));
        assert_eq!(context.client_ip, None);
    }
}
