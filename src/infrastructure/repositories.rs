//! DB Repository abstractions

use crate::infrastructure::database::DatabaseConnection;
use crate::infrastructure::entities::{Conversation, Session, User};
use crate::infrastructure::traits::{ConversationRepository, UserRepository};
use async_trait::async_trait;
use chrono::Utc;
use di::{Ref, injectable};
use log::error;
use uuid::Uuid;

#[injectable(ConversationRepository)]
pub struct DbConversationRepository {
    connection: Ref<DatabaseConnection>,
}

#[async_trait]
impl ConversationRepository for DbConversationRepository {
    async fn list_conversations(&self, user_id: Uuid) -> Result<Vec<Conversation>, sqlx::Error> {
        sqlx::query_as(
            "SELECT * FROM conversations WHERE sender_user_id = ? AND is_marked_deleted = FALSE ORDER BY datetime(created_at) ASC, rowid ASC",
        )
        .bind(user_id)
        .fetch_all(&**self.connection)
        .await
        .inspect_err(|e| error!("failed to list conversations: {e}"))
    }

    async fn find_conversation(
        &self,
        conversation_id: Uuid,
    ) -> Result<Option<Conversation>, sqlx::Error> {
        sqlx::query_as("SELECT * FROM conversations WHERE id = ?")
            .bind(conversation_id)
            .fetch_optional(&**self.connection)
            .await
            .inspect_err(|e| error!("failed to load conversation {conversation_id}: {e}"))
    }

    async fn create_conversation(
        &self,
        conversation: Conversation,
    ) -> Result<Conversation, sqlx::Error> {
        sqlx::query_as(
            "INSERT INTO conversations (id, sender_user_id, receiver_name, state, user_a_rating, is_marked_deleted, created_at, updated_at) VALUES (?, ?, ?, ?, ?, ?, ?, ?) RETURNING *",
        )
        .bind(conversation.id)
        .bind(conversation.sender_user_id)
        .bind(conversation.receiver_name)
        .bind(conversation.state)
        .bind(conversation.user_a_rating)
        .bind(conversation.is_marked_deleted)
        .bind(conversation.created_at)
        .bind(conversation.updated_at)
        .fetch_one(&**self.connection)
        .await
        .inspect_err(|e| error!("failed to create conversation: {e}"))
    }

    async fn update_conversation(
        &self,
        conversation: Conversation,
    ) -> Result<Conversation, sqlx::Error> {
        // sender_user_id and created_at are never written after insert
        sqlx::query_as(
            "UPDATE conversations SET receiver_name = ?, state = ?, user_a_rating = ?, updated_at = ? WHERE id = ? RETURNING *",
        )
        .bind(conversation.receiver_name)
        .bind(conversation.state)
        .bind(conversation.user_a_rating)
        .bind(Utc::now())
        .bind(conversation.id)
        .fetch_one(&**self.connection)
        .await
        .inspect_err(|e| error!("failed to update conversation {}: {e}", conversation.id))
    }

    async fn mark_conversation_deleted(&self, conversation_id: Uuid) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE conversations SET is_marked_deleted = TRUE, updated_at = ? WHERE id = ?")
            .bind(Utc::now())
            .bind(conversation_id)
            .execute(&**self.connection)
            .await
            .map(|_| ())
            .inspect_err(|e| error!("failed to delete conversation {conversation_id}: {e}"))
    }
}

#[injectable(UserRepository)]
pub struct DbUserRepository {
    connection: Ref<DatabaseConnection>,
}

#[async_trait]
impl UserRepository for DbUserRepository {
    async fn find_session(&self, session_id: Uuid) -> Result<Option<Session>, sqlx::Error> {
        sqlx::query_as("SELECT * FROM sessions WHERE id = ?")
            .bind(session_id)
            .fetch_optional(&**self.connection)
            .await
            .inspect_err(|e| error!("failed to load session: {e}"))
    }

    async fn find_user_by_access_token(
        &self,
        access_token: &str,
    ) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as("SELECT * FROM users WHERE access_token = ?")
            .bind(access_token)
            .fetch_optional(&**self.connection)
            .await
            .inspect_err(|e| error!("failed to load user by access token: {e}"))
    }
}
