//! Errors returned by the conversation service

use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum ConversationError {
    #[error("`X-Session-Id` header is missing")]
    MissingSession,

    #[error("`{0}` is not a valid conversation id")]
    InvalidIdentifierFormat(String),

    #[error("invalid request body: {0}")]
    InvalidBody(String),

    #[error("invited user name must be between 1 and {max} characters")]
    InvalidInviteeName { max: usize },

    #[error("not authenticated")]
    Unauthenticated,

    #[error("session not found")]
    SessionNotFound,

    #[error("conversation {0} not found")]
    ResourceNotFound(Uuid),

    #[error("conversation {0} belongs to another user")]
    OwnershipMismatch(Uuid),

    #[error("`{0}` and `{1}` cannot be changed in the same request")]
    ConflictingFields(&'static str, &'static str),

    #[error("conversation must be completed before it can be rated")]
    RatingBeforeCompletion,

    #[error("storage error")]
    Storage(#[from] sqlx::Error),
}
