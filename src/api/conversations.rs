//! Conversations endpoints

use crate::api::ExtractCredentials;
use crate::api::conversations::schemas::{
    ConversationCreated, ConversationList, CreateConversationInvite, EditConversation,
};
use crate::core::error::ConversationError;
use crate::core::traits::ConversationService;
use crate::core::validation::ConversationEdit;
use axum::extract::Path;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::routing::{get, put};
use axum::{Json, Router};
use di_axum::Inject;

pub const CONVERSATION_CREATED: &str = "conversation created";

pub fn router() -> Router {
    Router::new()
        .route("/", get(get_conversations).post(create_conversation_invite))
        .route(
            "/:conversation_id",
            put(edit_conversation).delete(delete_conversation),
        )
}

async fn get_conversations(
    Inject(conversation_service): Inject<dyn ConversationService>,
    ExtractCredentials(credentials): ExtractCredentials,
) -> Result<(StatusCode, Json<ConversationList>), ConversationError> {
    let conversations = conversation_service
        .list_conversations(&credentials)
        .await?;

    Ok((
        StatusCode::OK,
        ConversationList {
            conversations: conversations
                .into_iter()
                .map(schemas::Conversation::from)
                .collect(),
        }
        .into(),
    ))
}

async fn create_conversation_invite(
    Inject(conversation_service): Inject<dyn ConversationService>,
    ExtractCredentials(credentials): ExtractCredentials,
    invite: Result<Json<CreateConversationInvite>, JsonRejection>,
) -> Result<(StatusCode, Json<ConversationCreated>), ConversationError> {
    let invited_user_name = invite
        .map(|Json(invite)| invite.invited_user_name)
        .map_err(|rejection| rejection.body_text());

    let conversation = conversation_service
        .create_conversation_invite(&credentials, invited_user_name)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ConversationCreated {
            message: CONVERSATION_CREATED,
            conversation_id: conversation.id,
        }),
    ))
}

async fn edit_conversation(
    Inject(conversation_service): Inject<dyn ConversationService>,
    ExtractCredentials(credentials): ExtractCredentials,
    Path(conversation_id): Path<String>,
    edit: Result<Json<EditConversation>, JsonRejection>,
) -> Result<(StatusCode, Json<schemas::Conversation>), ConversationError> {
    let edit = edit
        .map(|Json(edit)| ConversationEdit::from(edit))
        .map_err(|rejection| rejection.body_text());

    let conversation = conversation_service
        .edit_conversation(&credentials, &conversation_id, edit)
        .await?;

    Ok((StatusCode::OK, Json(conversation.into())))
}

async fn delete_conversation(
    Inject(conversation_service): Inject<dyn ConversationService>,
    ExtractCredentials(credentials): ExtractCredentials,
    Path(conversation_id): Path<String>,
) -> Result<StatusCode, ConversationError> {
    conversation_service
        .delete_conversation(&credentials, &conversation_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

pub mod schemas {
    use crate::core::validation::ConversationEdit;
    use crate::infrastructure::entities::{self, ConversationState, ConversationUserARating};
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Serialize};
    use uuid::Uuid;

    #[derive(Deserialize, Debug)]
    #[serde(rename_all = "camelCase")]
    pub struct CreateConversationInvite {
        pub invited_user_name: String,
    }

    #[derive(Serialize, Debug)]
    #[serde(rename_all = "camelCase")]
    pub struct ConversationCreated {
        pub message: &'static str,
        pub conversation_id: Uuid,
    }

    /// Body of an edit. Absent fields are left unchanged; unknown fields are ignored.
    #[derive(Deserialize, Debug, Default)]
    #[serde(rename_all = "camelCase")]
    pub struct EditConversation {
        pub receiver_name: Option<String>,
        pub state: Option<ConversationState>,
        pub user_a_rating: Option<ConversationUserARating>,
    }

    impl From<EditConversation> for ConversationEdit {
        fn from(edit: EditConversation) -> Self {
            ConversationEdit {
                receiver_name: edit.receiver_name,
                state: edit.state,
                user_a_rating: edit.user_a_rating,
            }
        }
    }

    #[derive(Serialize, Debug)]
    #[serde(rename_all = "camelCase")]
    pub struct Conversation {
        pub conversation_id: Uuid,
        pub sender_user_id: Uuid,
        pub receiver_name: String,
        pub state: ConversationState,
        pub user_a_rating: Option<ConversationUserARating>,
        pub created_at: DateTime<Utc>,
        pub updated_at: DateTime<Utc>,
    }

    impl From<entities::Conversation> for Conversation {
        fn from(conversation: entities::Conversation) -> Self {
            Conversation {
                conversation_id: conversation.id,
                sender_user_id: conversation.sender_user_id,
                receiver_name: conversation.receiver_name,
                state: conversation.state,
                user_a_rating: conversation.user_a_rating,
                created_at: conversation.created_at,
                updated_at: conversation.updated_at,
            }
        }
    }

    #[derive(Serialize, Debug)]
    pub struct ConversationList {
        pub conversations: Vec<Conversation>,
    }
}
