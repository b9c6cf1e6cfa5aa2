use crate::{
    auth::{flow, AuthOutcome, IdentityStore, SignInCredentials},
    eniro::handlers::{see_other, AuthReply},
    gateway::{AuthGateway, RequestContext},
};
use axum::{
    extract::Extension,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Json, Response},
};
use std::sync::Arc;
use tracing::instrument;

#[utoipa::path(
    post,
    path = "/user/sign-in",
    request_body = SignInCredentials,
    responses(
        (status = 303, description = "Signed in; Location carries the role-based destination"),
        (status = 400, description = "Payload rejected by the schema check", body = AuthReply),
        (status = 401, description = "Provider rejected the credentials", body = AuthReply),
    ),
    tag = "auth"
)]
#[instrument(skip_all)]
pub async fn sign_in(
    gateway: Extension<Arc<dyn AuthGateway>>,
    identities: Extension<Arc<dyn IdentityStore>>,
    headers: HeaderMap,
    payload: Option<Json<SignInCredentials>>,
) -> Response {
    let Some(Json(credentials)) = payload else {
        return (
            StatusCode::BAD_REQUEST,
            Json(AuthReply::invalid("Missing payload")),
        )
            .into_response();
    };

    let context = RequestContext::from_headers(&headers);

    let outcome =
        flow::attempt_sign_in(gateway.as_ref(), identities.as_ref(), credentials, &context).await;

    match outcome {
        AuthOutcome::Success {
            user,
            destination,
            set_cookies,
        } => match destination {
            // The transfer is the response; anything after it is unreachable.
            Some(destination) => see_other(destination, &set_cookies),
            None => (StatusCode::OK, Json(AuthReply::success(user))).into_response(),
        },

        AuthOutcome::Redirect(signal) => see_other(signal.location(), &[]),

        AuthOutcome::ValidationFailure(message) => {
            (StatusCode::BAD_REQUEST, Json(AuthReply::invalid(message))).into_response()
        }

        AuthOutcome::ProviderFailure(message) => {
            (StatusCode::UNAUTHORIZED, Json(AuthReply::failure(message))).into_response()
        }
    }
}
