//! HTTP client for the authentication provider.

use super::{AuthGateway, GatewayError, GatewaySession, GatewayUser, RequestContext};
use crate::{
    auth::{
        credentials::{SignInCredentials, SignUpCredentials},
        outcome::RedirectSignal,
    },
    cli::globals::GlobalArgs,
};
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use reqwest::{
    header::{COOKIE, SET_COOKIE},
    Client, Response, StatusCode,
};
use secrecy::{ExposeSecret, SecretString};
use serde_json::{json, Value};
use tracing::debug;
use url::Url;

static APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"),);

pub struct HttpAuthGateway {
    base_url: String,
    token: SecretString,
    client: Client,
}

impl HttpAuthGateway {
    /// Build a client for the provider reachable at `globals.gateway_url`.
    pub fn new(globals: &GlobalArgs) -> Result<Self> {
        let client = Client::builder().user_agent(APP_USER_AGENT).build()?;

        Ok(Self {
            base_url: globals.gateway_url.clone(),
            token: globals.gateway_token.clone(),
            client,
        })
    }

    async fn post(
        &self,
        endpoint: &str,
        payload: Value,
        context: &RequestContext,
    ) -> Result<GatewaySession, GatewayError> {
        let url = endpoint_url(&self.base_url, endpoint)
            .map_err(|err| GatewayError::Provider(err.to_string()))?;

        debug!("Provider call: {url}");

        let mut request = self
            .client
            .post(&url)
            .bearer_auth(self.token.expose_secret())
            .json(&payload);

        if let Some(ip) = &context.client_ip {
            request = request.header("X-Forwarded-For", ip);
        }

        if let Some(cookie) = &context.cookie {
            request = request.header(COOKIE, cookie);
        }

        let response = request.send().await?;

        let status = response.status();
        let set_cookies = collect_cookies(&response);

        if !status.is_success() {
            let body: Value = response.json().await.unwrap_or_default();

            return Err(classify_error(status, &body));
        }

        let body: Value = response.json().await?;

        let user = match body.get("user") {
            Some(Value::Null) | None => None,
            Some(user) => Some(
                serde_json::from_value::<GatewayUser>(user.clone()).map_err(|err| {
                    GatewayError::Provider(format!("Invalid provider payload: {err}"))
                })?,
            ),
        };

        Ok(GatewaySession { user, set_cookies })
    }
}

#[async_trait]
impl AuthGateway for HttpAuthGateway {
    async fn sign_in_email(
        &self,
        credentials: &SignInCredentials,
        context: &RequestContext,
    ) -> Result<GatewaySession, GatewayError> {
        self.post(
            "/sign-in/email",
            json!({
                "email": credentials.email,
                "password": credentials.password,
            }),
            context,
        )
        .await
    }

    async fn sign_up_email(
        &self,
        credentials: &SignUpCredentials,
        context: &RequestContext,
    ) -> Result<GatewaySession, GatewayError> {
        self.post(
            "/sign-up/email",
            json!({
                "name": credentials.name,
                "email": credentials.email,
                "password": credentials.password,
            }),
            context,
        )
        .await
    }
}

fn endpoint_url(base_url: &str, endpoint: &str) -> Result<String> {
    let url = Url::parse(base_url)?;

    let scheme = url.scheme();

    let host = url
        .host()
        .ok_or_else(|| anyhow!("Error parsing URL: no host specified"))?
        .to_owned();

    let port = match url.port() {
        Some(p) => p,
        None => match scheme {
            "http" => 80,
            "https" => 443,
            _ => return Err(anyhow!("Error parsing URL: unsupported scheme {}", scheme)),
        },
    };

    Ok(format!("{scheme}://{host}:{port}{endpoint}"))
}

fn collect_cookies(response: &Response) -> Vec<String> {
    response
        .headers()
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .map(str::to_string)
        .collect()
}

/// Decode a provider error payload into the structured taxonomy. A `code`
/// starting with the reserved prefix is a control-flow signal, whatever the
/// message says.
fn classify_error(status: StatusCode, body: &Value) -> GatewayError {
    if let Some(signal) = body["code"].as_str().and_then(RedirectSignal::from_marker) {
        return GatewayError::Redirect(signal);
    }

    if status == StatusCode::TOO_MANY_REQUESTS {
        return GatewayError::RateLimited;
    }

    let message = body["message"]
        .as_str()
        .filter(|message| !message.is_empty())
        .unwrap_or_else(|| status.canonical_reason().unwrap_or("Provider error"))
        .to_string();

    GatewayError::Provider(message)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_url() {
        let url = endpoint_url("https://auth.tld", "/sign-in/email");
        assert_eq!(url.unwrap(), "https://auth.tld:443/sign-in/email");

        let url = endpoint_url("http://auth.tld", "/sign-up/email");
        assert_eq!(url.unwrap(), "http://auth.tld:80/sign-up/email");

        let url = endpoint_url("https://auth.tld:3000", "/sign-in/email");
        assert_eq!(url.unwrap(), "https://auth.tld:3000/sign-in/email");

        assert!(endpoint_url("ftp://auth.tld", "/sign-in/email").is_err());
    }

    #[test]
    fn redirect_codes_classify_as_signals() {
        let body = json!({
            "code": "REDIRECT;/find-services",
            "message": "See Other",
        });

        match classify_error(StatusCode::BAD_REQUEST, &body) {
            GatewayError::Redirect(signal) => assert_eq!(signal.location(), "/find-services"),
            other => panic!("expected a redirect signal, got {other:?}"),
        }
    }

    #[test]
    fn misleading_messages_do_not_classify_as_signals() {
        // Classification keys on the structured code, never on message text.
        let body = json!({
            "code": "INVALID_CREDENTIALS",
            "message": "REDIRECT;/nowhere",
        });

        match classify_error(StatusCode::UNAUTHORIZED, &body) {
            GatewayError::Provider(message) => assert_eq!(message, "REDIRECT;/nowhere"),
            other => panic!("expected a provider error, got {other:?}"),
        }
    }

    #[test]
    fn too_many_requests_maps_to_rate_limited() {
        let body = json!({ "message": "slow down" });

        assert!(matches!(
            classify_error(StatusCode::TOO_MANY_REQUESTS, &body),
            GatewayError::RateLimited
        ));
    }

    #[test]
    fn empty_bodies_fall_back_to_the_status_reason() {
        match classify_error(StatusCode::BAD_GATEWAY, &Value::Null) {
            GatewayError::Provider(message) => assert_eq!(message, "Bad Gateway"),
            other => panic!("expected a provider error, got {other:?}"),
        }
    }
}
