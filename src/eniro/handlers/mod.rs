pub mod health;
pub use self::health::health;

pub mod sign_up;
pub use self::sign_up::sign_up;

pub mod sign_in;
pub use self::sign_in::sign_in;

// common wire shape and response helpers for the auth handlers
use crate::auth::Identity;
use axum::{
    http::{
        header::{LOCATION, SET_COOKIE},
        HeaderMap, StatusCode,
    },
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tracing::error;
use utoipa::ToSchema;

/// Caller-facing result of a sign-in or sign-up attempt.
///
/// Validation failures carry only `error`; provider outcomes always carry
/// `status`. Callers must check for either shape.
#[derive(ToSchema, Serialize, Debug, Default)]
pub struct AuthReply {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<Identity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl AuthReply {
    #[must_use]
    pub fn success(user: Option<Identity>) -> Self {
        Self {
            status: Some(true),
            user,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            status: Some(false),
            error: Some(error.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn invalid(error: impl Into<String>) -> Self {
        Self {
            error: Some(error.into()),
            ..Self::default()
        }
    }
}

/// Answer the control transfer: once this is the response, nothing after
/// it runs for this attempt.
pub(crate) fn see_other(location: &str, set_cookies: &[String]) -> Response {
    let mut headers = HeaderMap::new();

    match location.parse() {
        Ok(value) => {
            headers.insert(LOCATION, value);
        }
        Err(err) => {
            error!("Invalid redirect destination {location}: {err}");

            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    }

    append_cookies(&mut headers, set_cookies);

    (StatusCode::SEE_OTHER, headers).into_response()
}

/// Forward the session cookies the provider issued for this response.
pub(crate) fn append_cookies(headers: &mut HeaderMap, set_cookies: &[String]) {
    for cookie in set_cookies {
        match cookie.parse() {
            Ok(value) => {
                headers.append(SET_COOKIE, value);
            }
            Err(err) => error!("Dropping malformed provider cookie: {err}"),
        }
    }
}
