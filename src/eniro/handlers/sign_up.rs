use crate::{
    auth::{flow, AuthOutcome, SignUpCredentials},
    eniro::handlers::{append_cookies, see_other, AuthReply},
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
    path = "/user/sign-up",
    request_body = SignUpCredentials,
    responses(
        (status = 201, description = "Account created", body = AuthReply),
        (status = 400, description = "Payload rejected by the schema check or refused by the provider", body = AuthReply),
    ),
    tag = "auth"
)]
#[instrument(skip_all)]
pub async fn sign_up(
    gateway: Extension<Arc<dyn AuthGateway>>,
    headers: HeaderMap,
    payload: Option<Json<SignUpCredentials>>,
) -> Response {
    let Some(Json(credentials)) = payload else {
        return (
            StatusCode::BAD_REQUEST,
            Json(AuthReply::invalid("Missing payload")),
        )
            .into_response();
    };

    let context = RequestContext::from_headers(&headers);

    let outcome = flow::attempt_sign_up(gateway.as_ref(), credentials, &context).await;

    match outcome {
        AuthOutcome::Success {
            user, set_cookies, ..
        } => {
            let mut response =
                (StatusCode::CREATED, Json(AuthReply::success(user))).into_response();

            append_cookies(response.headers_mut(), &set_cookies);

            response
        }

        AuthOutcome::Redirect(signal) => see_other(signal.location(), &[]),

        AuthOutcome::ValidationFailure(message) => {
            (StatusCode::BAD_REQUEST, Json(AuthReply::invalid(message))).into_response()
        }

        AuthOutcome::ProviderFailure(message) => {
            (StatusCode::BAD_REQUEST, Json(AuthReply::failure(message))).into_response()
        }
    }
}
