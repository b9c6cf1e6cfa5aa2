//! The sign-in and sign-up procedures: validate, call the provider,
//! resolve the role, classify the outcome.

use crate::{
    auth::{
        credentials::{SignInCredentials, SignUpCredentials},
        identity::{Identity, IdentityStore},
        outcome::AuthOutcome,
        redirect,
    },
    gateway::{AuthGateway, GatewayError, RequestContext},
};
use tracing::{debug, error};

/// User-facing message for payloads rejected by the schema check.
pub const INVALID_FIELDS: &str = "Invalid fields provided.";
/// User-facing message when the provider returns no identity on sign-in.
pub const SIGN_IN_FAILED: &str = "Sign in failed";
/// User-facing message when the provider returns no identity on sign-up.
pub const SIGN_UP_FAILED: &str = "Failed to create user";

/// Attempt a sign-in.
///
/// Failures come back as data; the only non-error branch that leaves this
/// function early is the provider's redirect signal, which must reach the
/// caller untouched.
pub async fn attempt_sign_in(
    gateway: &dyn AuthGateway,
    identities: &dyn IdentityStore,
    credentials: SignInCredentials,
    context: &RequestContext,
) -> AuthOutcome {
    let credentials = credentials.normalized();

    if let Err(err) = credentials.validate() {
        debug!("Rejected sign-in payload: {err}");

        return AuthOutcome::ValidationFailure(INVALID_FIELDS.to_string());
    }

    let session = match gateway.sign_in_email(&credentials, context).await {
        Ok(session) => session,

        // The signal is the transfer mechanism, not a failure.
        Err(GatewayError::Redirect(signal)) => return AuthOutcome::Redirect(signal),

        Err(err) => {
            error!("Sign in error: {err}");

            return AuthOutcome::ProviderFailure(err.to_string());
        }
    };

    let Some(user) = session.user else {
        return AuthOutcome::ProviderFailure(SIGN_IN_FAILED.to_string());
    };

    let identity = match identities.find_by_id(&user.id).await {
        Ok(identity) => identity,
        Err(err) => {
            error!("Failed to resolve identity {}: {err}", user.id);

            return AuthOutcome::ProviderFailure(err.to_string());
        }
    };

    let destination = redirect::destination(identity.as_ref().map(|identity| identity.role));

    debug!("User {} signed in, destination: {destination}", user.id);

    AuthOutcome::Success {
        user: identity,
        destination: Some(destination),
        set_cookies: session.set_cookies,
    }
}

/// Attempt a sign-up.
///
/// Fresh identities carry the default role, so there is no role lookup and
/// no destination; the caller navigates to the sign-in page afterwards.
pub async fn attempt_sign_up(
    gateway: &dyn AuthGateway,
    credentials: SignUpCredentials,
    context: &RequestContext,
) -> AuthOutcome {
    let credentials = credentials.normalized();

    if let Err(err) = credentials.validate() {
        debug!("Rejected sign-up payload: {err}");

        return AuthOutcome::ValidationFailure(INVALID_FIELDS.to_string());
    }

    let session = match gateway.sign_up_email(&credentials, context).await {
        Ok(session) => session,
        Err(GatewayError::Redirect(signal)) => return AuthOutcome::Redirect(signal),
        Err(err) => {
            error!("Sign up error: {err}");

            return AuthOutcome::ProviderFailure(err.to_string());
        }
    };

    let Some(user) = session.user else {
        return AuthOutcome::ProviderFailure(SIGN_UP_FAILED.to_string());
    };

    debug!("User {} signed up", user.id);

    AuthOutcome::Success {
        user: Some(Identity::from(user)),
        destination: None,
        set_cookies: session.set_cookies,
    }
}
