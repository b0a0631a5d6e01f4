//! Infrastructure traits, used for DI on higher levels

use crate::infrastructure::entities;
use async_trait::async_trait;
use uuid::Uuid;

#[async_trait]
pub trait ConversationRepository: Send + Sync {
    /// Lists the non-deleted conversations sent by the given user, oldest first.
    async fn list_conversations(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<entities::Conversation>, sqlx::Error>;

    /// Finds a conversation by id, including soft-deleted ones.
    async fn find_conversation(
        &self,
        conversation_id: Uuid,
    ) -> Result<Option<entities::Conversation>, sqlx::Error>;

    async fn create_conversation(
        &self,
        conversation: entities::Conversation,
    ) -> Result<entities::Conversation, sqlx::Error>;

    /// Writes every mutable column of `conversation` back to its row.
    async fn update_conversation(
        &self,
        conversation: entities::Conversation,
    ) -> Result<entities::Conversation, sqlx::Error>;

    /// Sets `is_marked_deleted`. The row itself is kept.
    async fn mark_conversation_deleted(&self, conversation_id: Uuid) -> Result<(), sqlx::Error>;
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_session(&self, session_id: Uuid)
    -> Result<Option<entities::Session>, sqlx::Error>;

    async fn find_user_by_access_token(
        &self,
        access_token: &str,
    ) -> Result<Option<entities::User>, sqlx::Error>;
}
