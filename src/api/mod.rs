use crate::core::error::ConversationError;
use crate::core::traits::Credentials;
use async_trait::async_trait;
use axum::Json;
use axum::extract::FromRequestParts;
use axum::http::StatusCode;
use axum::http::header::COOKIE;
use axum::http::request::Parts;
use axum::response::{IntoResponse, Response};
use cookie::Cookie;
use log::{debug, error};
use serde_json::json;
use std::convert::Infallible;

pub mod conversations;

pub const X_SESSION_ID: &str = "X-Session-Id";
pub const ACCESS_TOKEN_COOKIE: &str = "access_token";

/// Collects the session header and access token cookie without judging them; the
/// service decides which ones are required and in what order they are checked.
#[derive(Debug)]
pub struct ExtractCredentials(pub Credentials);

#[async_trait]
impl<S> FromRequestParts<S> for ExtractCredentials
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Infallible> {
        // a header that isn't visible ASCII can't match a session, but it was still sent
        let session_id = parts.headers.get(X_SESSION_ID).map(|session_id| {
            session_id
                .to_str()
                .map(str::to_owned)
                .unwrap_or_default()
        });

        let access_token = parts
            .headers
            .get_all(COOKIE)
            .iter()
            .filter_map(|header| header.to_str().ok())
            .flat_map(Cookie::split_parse)
            .filter_map(Result::ok)
            .find(|cookie| cookie.name() == ACCESS_TOKEN_COOKIE)
            .map(|cookie| cookie.value().to_owned())
            .filter(|token| !token.is_empty());

        Ok(ExtractCredentials(Credentials {
            session_id,
            access_token,
        }))
    }
}

fn status_code(err: &ConversationError) -> StatusCode {
    match err {
        ConversationError::MissingSession
        | ConversationError::InvalidIdentifierFormat(_)
        | ConversationError::InvalidBody(_)
        | ConversationError::InvalidInviteeName { .. } => StatusCode::BAD_REQUEST,
        ConversationError::Unauthenticated => StatusCode::UNAUTHORIZED,
        ConversationError::OwnershipMismatch(_) => StatusCode::FORBIDDEN,
        ConversationError::SessionNotFound | ConversationError::ResourceNotFound(_) => {
            StatusCode::NOT_FOUND
        }
        ConversationError::ConflictingFields(..) | ConversationError::RatingBeforeCompletion => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
        ConversationError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for ConversationError {
    fn into_response(self) -> Response {
        let status = status_code(&self);

        if status.is_server_error() {
            error!("request failed: {self:?}");
        } else {
            debug!("request rejected with {status}: {self}");
        }

        (status, Json(json!({ "message": self.to_string() }))).into_response()
    }
}
