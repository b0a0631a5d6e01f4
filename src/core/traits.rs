//! DI "Interfaces"

use crate::core::error::ConversationError;
use crate::core::validation::ConversationEdit;
use crate::infrastructure::entities;
use async_trait::async_trait;

/// A decoded request body, or why it could not be decoded.
///
/// Bodies are decoded before the service runs, but a decoding failure is only
/// reported once the checks that precede it have passed.
pub type RequestBody<T> = Result<T, String>;

/// What the caller presented to identify themselves.
#[derive(Debug, Clone, Default)]
pub struct Credentials {
    /// Value of the `X-Session-Id` header.
    pub session_id: Option<String>,
    /// Value of the `access_token` cookie.
    pub access_token: Option<String>,
}

#[async_trait]
pub trait ConversationService: Send + Sync {
    /// Lists the caller's conversations that are not marked deleted.
    async fn list_conversations(
        &self,
        credentials: &Credentials,
    ) -> Result<Vec<entities::Conversation>, ConversationError>;

    /// Creates a conversation inviting `invited_user_name`, sent by the session's user.
    ///
    /// Returns `SessionNotFound` if the session id is unknown.
    async fn create_conversation_invite(
        &self,
        credentials: &Credentials,
        invited_user_name: RequestBody<String>,
    ) -> Result<entities::Conversation, ConversationError>;

    /// Applies a partial update to a conversation owned by the caller.
    async fn edit_conversation(
        &self,
        credentials: &Credentials,
        conversation_id: &str,
        edit: RequestBody<ConversationEdit>,
    ) -> Result<entities::Conversation, ConversationError>;

    /// Marks a conversation owned by the caller as deleted. The row is kept.
    async fn delete_conversation(
        &self,
        credentials: &Credentials,
        conversation_id: &str,
    ) -> Result<(), ConversationError>;
}
